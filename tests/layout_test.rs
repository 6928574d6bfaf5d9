//! Layout detection and the per-bank plans.

mod common;

use common::*;
use remitform::layout::{plan_for, FieldStyle};
use remitform::{detect_layout, BankLayout, RemittanceRecord};

#[test]
fn test_detect_layout_examples() {
    let record = RecordBuilder::new()
        .with("bank", "The Hongkong and Shanghai Banking Corporation")
        .build();
    assert_eq!(detect_layout(&record), BankLayout::Hsbc);
    assert_eq!(detect_layout(&RemittanceRecord::new()), BankLayout::Generic);
}

#[test]
fn test_hint_keys_in_priority_order() {
    let record = RecordBuilder::new()
        .with("layoutBank", "Bank of China")
        .with("bank", "HSBC")
        .build();
    assert_eq!(detect_layout(&record), BankLayout::Boc);

    let record = RecordBuilder::new()
        .with("remittingBank", "Standard Chartered Hong Kong")
        .build();
    assert_eq!(detect_layout(&record), BankLayout::Scb);
}

#[test]
fn test_beneficiary_bank_does_not_pick_the_form() {
    let record = RecordBuilder::complete()
        .with("beneficiaryBank", "HSBC")
        .build();
    assert_eq!(detect_layout(&record), BankLayout::Generic);
}

#[test]
fn test_every_plan_has_fields_and_a_title() {
    for layout in BankLayout::ALL {
        let plan = plan_for(layout);
        assert_eq!(plan.layout, layout);
        assert!(!plan.title.is_empty());
        assert!(plan.field_count() > 10, "{} plan is too small", layout);
    }
}

#[test]
fn test_generic_plan_has_choice_and_box_fields() {
    let plan = plan_for(BankLayout::Generic);
    assert!(plan
        .fields()
        .any(|f| matches!(f.style, FieldStyle::Choice(_))));
    assert!(plan.fields().any(|f| f.style == FieldStyle::Boxed));
}

#[test]
fn test_layout_names_round_trip() {
    for layout in BankLayout::ALL {
        assert_eq!(layout.as_str().parse::<BankLayout>(), Ok(layout));
        assert_eq!(
            serde_json::to_string(&layout).unwrap(),
            format!("\"{}\"", layout.as_str())
        );
    }
    assert!("citibank".parse::<BankLayout>().is_err());
}
