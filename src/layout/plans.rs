//! Static plans for each supported bank form.

use super::plan::{ChoiceOption, ChoiceRule, FieldSpec, Issuer, LayoutPlan, Section};
use super::BankLayout;
use crate::record::fields::*;
use crate::render::Color;

const HSBC_RED: Color = Color::rgb(185, 28, 28);

pub const CUSTOMER_DECLARATION: &str = "We authorize the bank to debit the above monies for \
lawful purpose detailed above and agree to abide by the Terms and Conditions printed overleaf";

const RESIDENT_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption::new("Yes", ChoiceRule::StartsWith("y")),
    ChoiceOption::new("No", ChoiceRule::StartsWith("n")),
];

const PAYMENT_METHOD_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption::new("From Account", ChoiceRule::ContainsAny(&["account", "from"])),
    ChoiceOption::new("By Cash", ChoiceRule::ContainsAny(&["cash"])),
    ChoiceOption::new("Others", ChoiceRule::Otherwise),
];

pub static HSBC_PLAN: LayoutPlan = LayoutPlan {
    layout: BankLayout::Hsbc,
    title: "REMITTANCE APPLICATION FORM",
    issuer: Issuer::Fixed("HSBC"),
    band_color: HSBC_RED,
    label_width: 150.0,
    half_label_width: 90.0,
    mark_required: false,
    sections: &[
        Section::titled(
            "ACCOUNT HOLDER INFORMATION",
            &[
                FieldSpec::key("Account Name", ACCOUNT_HOLDER_NAME),
                FieldSpec::key("Debit Account Number", DEBIT_AC).required(),
                FieldSpec::first_of("Currency / Account Type", &[DEBIT_AC_CURRENCY, DEBIT_AC_TYPE])
                    .required(),
            ],
        ),
        Section::titled(
            "PAYMENT DETAILS",
            &[
                FieldSpec::key("Amount in Remittance Currency", AMOUNT),
                FieldSpec::key("Amount in Debit Account Currency", AMOUNT_DEBIT_CURRENCY),
                FieldSpec::key("Remittance Currency", REMIT_CURRENCY).shrink(),
            ],
        ),
        Section::titled(
            "BENEFICIARY BANK DETAILS",
            &[
                FieldSpec::key("Bank Name", BENEFICIARY_BANK).required(),
                FieldSpec::key("SWIFT / BIC", BENEFICIARY_SWIFT).shrink(),
                FieldSpec::key("Bank Code Type", BANK_CODE_TYPE),
                FieldSpec::key("Bank Code", BANK_CODE).shrink(),
                FieldSpec::key("Country / Territory", BENEFICIARY_BANK_COUNTRY),
                FieldSpec::key("City", BENEFICIARY_BANK_CITY),
                FieldSpec::key("Province / State", BENEFICIARY_BANK_PROVINCE),
                FieldSpec::key("Branch", BENEFICIARY_BANK_BRANCH),
            ],
        ),
        Section::titled(
            "BENEFICIARY DETAILS",
            &[
                FieldSpec::key("Account Name", BENEFICIARY_NAME).required(),
                FieldSpec::first_of("Account Number / IBAN", &[BENEFICIARY_ACCOUNT, IBAN]),
                FieldSpec::first_of(
                    "Currency / Account Type",
                    &[BENEFICIARY_CURRENCY, BENEFICIARY_ACCOUNT_TYPE],
                ),
                FieldSpec::key("Address Line 1", BENEFICIARY_ADDRESS_1),
                FieldSpec::key("Address Line 2", BENEFICIARY_ADDRESS_2),
                FieldSpec::key("Address Line 3", BENEFICIARY_ADDRESS_3),
                FieldSpec::key("Address Line 4", BENEFICIARY_ADDRESS_4),
                FieldSpec::key("Country / Territory", BENEFICIARY_COUNTRY),
                FieldSpec::key("City", BENEFICIARY_CITY),
                FieldSpec::key("Province / State", BENEFICIARY_PROVINCE),
                FieldSpec::key("Postcode", BENEFICIARY_POSTCODE).shrink(),
            ],
        ),
        Section::titled(
            "REMITTING PURPOSE / MESSAGE",
            &[
                FieldSpec::key("Purpose of Payment", PURPOSE_OF_PAYMENT),
                FieldSpec::key("Routing Number / Reference", ROUTING_REFERENCE),
            ],
        ),
        Section::titled(
            "CHARGE HANDLING",
            &[
                FieldSpec::key("Charge Type (OUR / BEN / SHA)", CHARGE_TYPE).shrink(),
                FieldSpec::key("Local / Overseas Charges", LOCAL_OVERSEAS_CHARGES),
            ],
        ),
        Section::titled(
            "ORDERING PARTY DETAILS",
            &[
                FieldSpec::key("Charge Account Number", CHARGES_DEBIT_AC),
                FieldSpec::first_of(
                    "Currency / Account Type",
                    &[CHARGES_DEBIT_AC_CURRENCY, CHARGES_DEBIT_AC_TYPE],
                ),
                FieldSpec::key("Full Name", SENDER_NAME).required(),
                FieldSpec::key("Address", ADDRESS),
                FieldSpec::key("Contact Number", CONTACT_NUMBER),
            ],
        ),
        Section::titled(
            "INTERMEDIARY BANK (IF ANY)",
            &[
                FieldSpec::first_of("Bank Name", &[INTERMEDIARY_BANK_NAME, INTERMEDIARY_BANK]),
                FieldSpec::key("SWIFT / BIC", INTERMEDIARY_SWIFT).shrink(),
                FieldSpec::key("Account With Intermediary Bank", INTERMEDIARY_ACCOUNT),
            ],
        ),
        Section::titled(
            "FOREIGN EXCHANGE DETAILS",
            &[
                FieldSpec::first_of("Exchange Rate", &[FX_RATE, EXCHANGE_RATE]),
                FieldSpec::key("Rate Given By / Contract No.", FX_CONTRACT_NO),
            ],
        ),
        Section::titled(
            "CUSTOMER DECLARATION",
            &[
                FieldSpec::key("Signature", SIGNATURE),
                FieldSpec::key("Email", EMAIL),
                FieldSpec::key("Telephone", TELEPHONE),
            ],
        ),
    ],
};

pub static BOC_PLAN: LayoutPlan = LayoutPlan {
    layout: BankLayout::Boc,
    title: "APPLICATION FOR REMITTANCE",
    issuer: Issuer::Fixed("BANK OF CHINA (HONG KONG) LIMITED"),
    band_color: Color::BLACK,
    label_width: 130.0,
    half_label_width: 95.0,
    mark_required: true,
    sections: &[
        Section::titled(
            "Remittance Details",
            &[
                FieldSpec::key("Remittance Currency", REMITTANCE_CURRENCY).half().shrink(),
                FieldSpec::key("Name", CURRENCY_NAME).half().shrink(),
                FieldSpec::key("Amount (Remittance Currency)", AMOUNT).half(),
                FieldSpec::key("Debit Amount", DEBIT_AMOUNT).half(),
            ],
        ),
        Section::titled(
            "Applicant / Accounts",
            &[
                FieldSpec::key("Sender Name", SENDER_NAME).required(),
                FieldSpec::key("Contact No.", CONTACT_NUMBER).half(),
                FieldSpec::key("FX Contract No.", FX_CONTRACT_NO).half().shrink(),
                FieldSpec::first_of("Exchange Rate", &[EXCHANGE_RATE, FX_RATE]).half(),
                FieldSpec::joined("Debit A/C Currency & No.", &[DEBIT_AC_CURRENCY, DEBIT_AC], " / ")
                    .required()
                    .half()
                    .shrink(),
                FieldSpec::joined(
                    "Charges A/C Currency & No. (if different)",
                    &[CHARGES_DEBIT_AC_CURRENCY, CHARGES_DEBIT_AC],
                    " / ",
                ),
            ],
        ),
        Section::titled(
            "Intermediary Bank",
            &[
                FieldSpec::key("Name & Address", INTERMEDIARY_BANK),
                FieldSpec::key("SWIFT Code", SWIFT_CODE).half().shrink(),
                FieldSpec::key("For TT only: CCASS Code", CCASS_CODE).half().shrink(),
                FieldSpec::key("Participant Code", PARTICIPANT_CODE).shrink(),
            ],
        ),
        Section::titled(
            "Beneficiary Bank",
            &[
                FieldSpec::joined(
                    "Name & Address",
                    &[BENEFICIARY_BANK, BENEFICIARY_BANK_ADDRESS],
                    "  ",
                )
                .required(),
                FieldSpec::key("Country/Region", BENEFICIARY_COUNTRY).half().shrink(),
                FieldSpec::key("Province", BENEFICIARY_PROVINCE).half().shrink(),
                FieldSpec::key("City", BENEFICIARY_CITY).half().shrink(),
                FieldSpec::key("Bank Code", BANK_CODE).half().shrink(),
            ],
        ),
        Section::titled(
            "Beneficiary Details",
            &[
                FieldSpec::first_of("Account No./IBAN", &[BENEFICIARY_ACCOUNT, IBAN]).required(),
                FieldSpec::key("Name", BENEFICIARY_NAME).required(),
                FieldSpec::joined(
                    "Address / Contact Tel.",
                    &[BENEFICIARY_ADDRESS, BENEFICIARY_PHONE],
                    " / ",
                ),
                FieldSpec::key("Message", MESSAGE),
            ],
        ),
        Section::untitled(&[
            FieldSpec::key("Bank Charges", BANK_CHARGES).required().half().shrink(),
            FieldSpec::joined("Purpose", &[PURPOSE, PURPOSE_DETAIL], " / ")
                .required()
                .half()
                .shrink(),
        ]),
        Section::titled(
            "Bank Use / Approval",
            &[
                FieldSpec::key("Same Day / Next Day / AM / PM / Others", BANK_USE_NOTE).shrink(),
                FieldSpec::key("Approval", APPROVAL).half(),
                FieldSpec::key("Checker", CHECKER).half().shrink(),
                FieldSpec::key("Remarks", REMARKS),
            ],
        ),
        Section::untitled(&[
            FieldSpec::key("Remitter Signature", SIGNATURE).required().half().shrink(),
            FieldSpec::key("Date", DATE).half().shrink(),
        ]),
    ],
};

const GENERIC_SECTIONS: &[Section] = &[
    Section::titled(
        "Applicant's Information",
        &[
            FieldSpec::key("Name of Sender", SENDER_NAME).required().half(),
            FieldSpec::key("ID/Passport No.", ID_NUMBER).half(),
            FieldSpec::key("Address", ADDRESS),
            FieldSpec::first_of("Resident", &[RESIDENT, "resident"])
                .half()
                .choice(RESIDENT_OPTIONS),
            FieldSpec::key("Contact Telephone Number", CONTACT_NUMBER).half(),
        ],
    ),
    Section::titled(
        "Transfer Instruction",
        &[
            FieldSpec::key("Payment Method", PAYMENT_METHOD).choice(PAYMENT_METHOD_OPTIONS),
            FieldSpec::key("Debit A/C Currency", DEBIT_AC_CURRENCY)
                .required()
                .half()
                .shrink(),
            FieldSpec::key("Debit A/C No.", DEBIT_AC).required().half(),
            FieldSpec::key("Charges A/C Currency", CHARGES_DEBIT_AC_CURRENCY)
                .half()
                .shrink(),
            FieldSpec::key("Charges Debit A/C No.", CHARGES_DEBIT_AC).half(),
        ],
    ),
    Section::untitled(&[
        FieldSpec::key("Intermediary Bank Name", INTERMEDIARY_BANK),
        FieldSpec::key("Beneficiary's Bank Name", BENEFICIARY_BANK).required(),
        FieldSpec::key("Beneficiary Name", BENEFICIARY_NAME).required(),
    ]),
    Section::titled(
        "Contract Details (As Applicable)",
        &[
            FieldSpec::key("Dealer's Name", DEALER_NAME).half(),
            FieldSpec::first_of("FX rates", &[FX_RATES, FX_RATE]).half(),
        ],
    ),
    Section::titled(
        "Customer's Signature",
        &[FieldSpec::key("Customer's Signature", SIGNATURE).boxed()],
    )
    .with_note(CUSTOMER_DECLARATION),
];

const GENERIC: LayoutPlan = LayoutPlan {
    layout: BankLayout::Generic,
    title: "REMITTANCE APPLICATION FORM",
    issuer: Issuer::Detected {
        fallback: "Remitting Bank",
    },
    band_color: Color::BLACK,
    label_width: 150.0,
    half_label_width: 95.0,
    mark_required: true,
    sections: GENERIC_SECTIONS,
};

pub static GENERIC_PLAN: LayoutPlan = GENERIC;

/// Standard Chartered uses the generic form under its own label.
pub static SCB_PLAN: LayoutPlan = LayoutPlan {
    layout: BankLayout::Scb,
    issuer: Issuer::Fixed("Standard Chartered"),
    ..GENERIC
};

pub fn plan_for(layout: BankLayout) -> &'static LayoutPlan {
    match layout {
        BankLayout::Hsbc => &HSBC_PLAN,
        BankLayout::Boc => &BOC_PLAN,
        BankLayout::Scb => &SCB_PLAN,
        BankLayout::Generic => &GENERIC_PLAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Columns, FieldStyle};

    #[test]
    fn test_every_plan_has_sections_and_required_fields() {
        for layout in BankLayout::ALL {
            let plan = plan_for(layout);
            assert!(!plan.sections.is_empty(), "{layout} has no sections");
            assert!(plan.fields().any(|f| f.required), "{layout} has no required field");
        }
    }

    #[test]
    fn test_required_fields_cover_blocking_keys() {
        // every plan shows the values the checklist blocks on
        for layout in BankLayout::ALL {
            let plan = plan_for(layout);
            let keys: Vec<&str> = plan.fields().flat_map(|f| f.source.keys()).collect();
            for key in [SENDER_NAME, DEBIT_AC, BENEFICIARY_BANK, BENEFICIARY_NAME] {
                assert!(keys.contains(&key), "{layout} plan never shows {key}");
            }
        }
    }

    #[test]
    fn test_scb_shares_generic_sections() {
        assert_eq!(SCB_PLAN.sections, GENERIC_PLAN.sections);
        assert_eq!(SCB_PLAN.issuer, Issuer::Fixed("Standard Chartered"));
    }

    #[test]
    fn test_generic_declaration_and_signature_box() {
        let signature = GENERIC_PLAN.sections.last().unwrap();
        assert_eq!(signature.note, Some(CUSTOMER_DECLARATION));
        assert_eq!(signature.fields[0].style, FieldStyle::Boxed);
    }

    #[test]
    fn test_display_label_marks_required() {
        let field = BOC_PLAN.sections[1].fields[0];
        assert_eq!(BOC_PLAN.display_label(&field), "Sender Name*");
        let hsbc_field = HSBC_PLAN.sections[0].fields[1];
        assert_eq!(HSBC_PLAN.display_label(&hsbc_field), "Debit Account Number");
    }

    #[test]
    fn test_hsbc_is_single_column() {
        assert!(HSBC_PLAN.fields().all(|f| f.columns == Columns::One));
    }
}
