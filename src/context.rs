//! Pooled per-call validation state.
//!
//! Every public entry point borrows a [`Context`] from a process-wide pool,
//! runs the walk with it, and hands it back on drop. Reused contexts keep
//! the report's and the group map's allocations, so steady-state validation
//! of similar inputs settles into zero-allocation bookkeeping.

use std::sync::LazyLock;

use parking_lot::Mutex;
use tracing::trace;

use crate::error::{Report, ValidError};
use crate::groups::Groups;

/// Upper bound on idle pooled contexts; extras are dropped on release.
const POOL_CAPACITY: usize = 32;

/// Mutable state for one validation call.
#[derive(Debug, Default)]
pub(crate) struct Context {
    pub report: Report,
    pub groups: Groups,
}

impl Context {
    /// Clears accumulated state while keeping allocations.
    fn reset(&mut self) {
        self.report.reset();
        self.groups.clear();
    }

    /// Evaluates pending groups and converts the report into the call's
    /// outcome.
    pub(crate) fn finish(&mut self) -> Result<(), ValidError> {
        crate::groups::evaluate(&self.groups, &mut self.report);
        if self.report.is_empty() {
            Ok(())
        } else {
            Err(ValidError::Invalid(self.report.render()))
        }
    }
}

// ============================================================================
// POOL
// ============================================================================

static POOL: LazyLock<Mutex<Vec<Context>>> = LazyLock::new(|| Mutex::new(Vec::new()));

/// Borrows a context from the pool, creating one if none is idle.
pub(crate) fn acquire() -> ContextGuard {
    let ctx = POOL.lock().pop().unwrap_or_default();
    ContextGuard { ctx: Some(ctx) }
}

/// RAII handle over a pooled [`Context`]. The context returns to the pool
/// on drop, reset first so no report text or group entry leaks into the
/// next borrower.
pub(crate) struct ContextGuard {
    ctx: Option<Context>,
}

impl std::ops::Deref for ContextGuard {
    type Target = Context;

    fn deref(&self) -> &Context {
        // Only `drop` takes the context out.
        self.ctx.as_ref().unwrap_or_else(|| unreachable!())
    }
}

impl std::ops::DerefMut for ContextGuard {
    fn deref_mut(&mut self) -> &mut Context {
        self.ctx.as_mut().unwrap_or_else(|| unreachable!())
    }
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        if let Some(mut ctx) = self.ctx.take() {
            ctx.reset();
            let mut pool = POOL.lock();
            if pool.len() < POOL_CAPACITY {
                pool.push(ctx);
            } else {
                trace!("context pool full, dropping context");
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
