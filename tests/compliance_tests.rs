use chrono::Utc;
use ledgerly::core::*;
use rust_decimal_macros::dec;

fn profile() -> BusinessProfile {
    BusinessProfile {
        legal_name: "J Cooper Landscaping Ltd".into(),
        trading_name: Some("Cooper Gardens".into()),
        address: "12 Hill Rise, Leeds, LS1 4AB".into(),
        email: "jane@coopergardens.co.uk".into(),
        phone: "07700 900123".into(),
        is_vat_registered: true,
        vat_number: Some("GB123456789".into()),
        vat_pricing_mode: VatPricingMode::Net,
        invoice_style: "classic".into(),
        payment_terms: Some("Due within 30 days".into()),
    }
}

fn invoice() -> Invoice {
    Invoice {
        id: "1".into(),
        invoice_number: "INV-00001".into(),
        status: InvoiceStatus::Draft,
        customer_name: "Sam Field".into(),
        customer_address: "3 Meadow Lane, York".into(),
        customer_email: None,
        invoice_date: "2026-08-01".into(),
        supply_date: "2026-07-28".into(),
        line_items: vec![LineItem {
            id: "1".into(),
            description: "Lawn care".into(),
            quantity: Some(dec!(4)),
            rate: Some(dec!(35)),
            vat_rate: dec!(20),
        }],
        notes: None,
        bank_details: None,
        include_stripe_link: false,
        created_at: Utc::now(),
        sent_at: None,
        paid_at: None,
        voided_at: None,
    }
}

fn labels(missing: &[MissingField]) -> Vec<String> {
    missing.iter().map(|m| m.to_string()).collect()
}

#[test]
fn fully_populated_invoice_is_compliant() {
    assert!(missing_compliance_fields(&invoice(), &profile()).is_empty());
}

#[test]
fn zero_line_items_reports_exactly_one_message() {
    let mut inv = invoice();
    inv.line_items.clear();
    let missing = missing_compliance_fields(&inv, &profile());
    assert_eq!(labels(&missing), vec!["Line items"]);
}

#[test]
fn supplier_contact_is_a_single_combined_check() {
    let mut p = profile();
    p.email = "  ".into();
    p.phone = String::new();
    let missing = missing_compliance_fields(&invoice(), &p);
    assert_eq!(labels(&missing), vec!["Supplier contact (email or phone)"]);

    // One of the two is enough
    p.phone = "07700 900123".into();
    assert!(missing_compliance_fields(&invoice(), &p).is_empty());
}

#[test]
fn vat_number_required_only_when_registered() {
    let mut p = profile();
    p.vat_number = None;
    let missing = missing_compliance_fields(&invoice(), &p);
    assert_eq!(labels(&missing), vec!["VAT number"]);

    p.is_vat_registered = false;
    assert!(missing_compliance_fields(&invoice(), &p).is_empty());
}

#[test]
fn blank_supply_date_inherits_invoice_date_validity() {
    // Valid invoice date covers for a blank supply date
    let mut inv = invoice();
    inv.supply_date = String::new();
    assert!(missing_compliance_fields(&inv, &profile()).is_empty());

    // Unparseable supply date is covered too
    inv.supply_date = "next tuesday".into();
    assert!(missing_compliance_fields(&inv, &profile()).is_empty());

    // Both invalid: both are reported
    inv.invoice_date = "not a date".into();
    let missing = missing_compliance_fields(&inv, &profile());
    assert_eq!(labels(&missing), vec!["Invoice date", "Supply date"]);
}

#[test]
fn valid_supply_date_does_not_rescue_invoice_date() {
    let mut inv = invoice();
    inv.invoice_date = String::new();
    let missing = missing_compliance_fields(&inv, &profile());
    assert_eq!(labels(&missing), vec!["Invoice date"]);
}

#[test]
fn line_item_messages_are_one_indexed() {
    let mut inv = invoice();
    inv.line_items.push(LineItem {
        id: "2".into(),
        description: "   ".into(),
        quantity: None,
        rate: None,
        vat_rate: dec!(20),
    });
    let missing = missing_compliance_fields(&inv, &profile());
    assert_eq!(
        labels(&missing),
        vec![
            "Line item 2 description",
            "Line item 2 quantity",
            "Line item 2 rate",
        ]
    );
}

#[test]
fn field_order_is_stable_under_many_violations() {
    let p = BusinessProfile {
        legal_name: String::new(),
        trading_name: None,
        address: String::new(),
        email: String::new(),
        phone: String::new(),
        is_vat_registered: true,
        vat_number: None,
        vat_pricing_mode: VatPricingMode::Net,
        invoice_style: "classic".into(),
        payment_terms: None,
    };
    let inv = Invoice {
        customer_name: String::new(),
        customer_address: String::new(),
        invoice_number: String::new(),
        invoice_date: String::new(),
        supply_date: String::new(),
        line_items: Vec::new(),
        ..invoice()
    };

    let missing = missing_compliance_fields(&inv, &p);
    assert_eq!(
        labels(&missing),
        vec![
            "Supplier legal name",
            "Supplier address",
            "Supplier contact (email or phone)",
            "VAT number",
            "Customer name",
            "Customer address",
            "Invoice number",
            "Invoice date",
            "Supply date",
            "Line items",
        ]
    );
}

#[test]
fn validator_does_not_mutate_inputs() {
    let inv = invoice();
    let p = profile();
    let before_inv = inv.clone();
    let _ = missing_compliance_fields(&inv, &p);
    assert_eq!(inv, before_inv);
}
