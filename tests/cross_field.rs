//! Cross-field groups: `either` and `bothEq` across a record.

use pretty_assertions::assert_eq;
use rulecheck::{describe, validate_struct, validate_struct_with_rules, RuleMap};

#[derive(serde::Serialize)]
struct Reachability {
    phone: String,
    email: String,
    wechat: String,
}

describe!(Reachability {
    phone => "either=contact",
    email => "either=contact",
    wechat => "either=contact",
});

#[derive(serde::Serialize)]
struct Transfer {
    amount: i64,
    confirm_amount: i64,
}

describe!(Transfer {
    amount => "required,bothEq=amt",
    confirm_amount => "bothEq=amt",
});

#[test]
fn either_passes_when_any_participant_is_set() {
    let r = Reachability {
        phone: String::new(),
        email: "a@example.com".to_string(),
        wechat: String::new(),
    };
    assert!(validate_struct(&r).is_ok());
}

#[test]
fn either_all_empty_names_every_participant_once() {
    let r = Reachability {
        phone: String::new(),
        email: String::new(),
        wechat: String::new(),
    };
    let err = validate_struct(&r).unwrap_err();
    assert_eq!(
        err.to_string(),
        "\"Reachability.phone\", \"Reachability.email\", \"Reachability.wechat\", \
         explain: they shouldn't all be empty"
    );
}

#[test]
fn both_eq_passes_when_all_equal() {
    let t = Transfer { amount: 100, confirm_amount: 100 };
    assert!(validate_struct(&t).is_ok());
}

#[test]
fn both_eq_fails_on_any_difference() {
    let t = Transfer { amount: 100, confirm_amount: 10 };
    let err = validate_struct(&t).unwrap_err();
    assert_eq!(
        err.to_string(),
        "\"Transfer.amount\", \"Transfer.confirm_amount\", explain: they should all be equal"
    );
}

#[test]
fn three_way_both_eq_via_rule_map() {
    #[derive(serde::Serialize)]
    struct Triple {
        a: i64,
        b: i64,
        c: i64,
    }
    describe!(Triple {
        a => "",
        b => "",
        c => "",
    });

    let rules: RuleMap =
        [("a", "bothEq=g"), ("b", "bothEq=g"), ("c", "bothEq=g")].into_iter().collect();

    assert!(validate_struct_with_rules(&rules, &Triple { a: 1, b: 1, c: 1 }).is_ok());

    let err = validate_struct_with_rules(&rules, &Triple { a: 1, b: 1, c: 10 }).unwrap_err();
    assert_eq!(
        err.to_string(),
        "\"Triple.a\", \"Triple.b\", \"Triple.c\", explain: they should all be equal"
    );
}

#[test]
fn single_member_group_always_violates() {
    #[derive(serde::Serialize)]
    struct Lonely {
        only: String,
    }
    describe!(Lonely {
        only => "either=solo",
    });

    let err = validate_struct(&Lonely { only: "set".to_string() }).unwrap_err();
    assert!(err.to_string().contains("\"Lonely.only\""));
}

#[test]
fn same_group_name_different_kinds_are_distinct_groups() {
    #[derive(serde::Serialize)]
    struct Mixed {
        a: String,
        b: String,
        c: i64,
        d: i64,
    }
    describe!(Mixed {
        a => "either=g",
        b => "either=g",
        c => "bothEq=g",
        d => "bothEq=g",
    });

    // either group passes (a set), bothEq group passes (c == d).
    let ok = Mixed { a: "x".to_string(), b: String::new(), c: 1, d: 1 };
    assert!(validate_struct(&ok).is_ok());

    // Only the bothEq group fails.
    let bad = Mixed { a: "x".to_string(), b: String::new(), c: 1, d: 2 };
    let text = validate_struct(&bad).unwrap_err().to_string();
    assert!(text.contains("they should all be equal"));
    assert!(!text.contains("shouldn't all be empty"));
}

#[test]
fn group_custom_message_replaces_text() {
    #[derive(serde::Serialize)]
    struct Form {
        home: String,
        mobile: String,
    }
    describe!(Form {
        home => "either=phones|leave at least one phone number",
        mobile => "either=phones",
    });

    let err = validate_struct(&Form { home: String::new(), mobile: String::new() }).unwrap_err();
    assert_eq!(err.to_string(), "leave at least one phone number");
}

#[test]
fn groups_combine_with_per_field_rules() {
    let t = Transfer { amount: 0, confirm_amount: 0 };
    let text = validate_struct(&t).unwrap_err().to_string();
    // `required` fires for the zero amount; bothEq holds since 0 == 0.
    assert!(text.contains("it is required"));
    assert!(!text.contains("they should all be equal"));
}

#[test]
fn required_failure_keeps_group_membership() {
    // The zero amount fails `required`, but it still counts as a bothEq
    // participant, so the unequal pair is reported too.
    let t = Transfer { amount: 0, confirm_amount: 10 };
    let text = validate_struct(&t).unwrap_err().to_string();
    assert!(text.contains("it is required"));
    assert!(text.contains("\"Transfer.amount\", \"Transfer.confirm_amount\""));
    assert!(text.contains("they should all be equal"));
}
