//! Walk an invoice through its lifecycle: onboard, draft, check compliance,
//! send, pay.
//!
//! Run with: `cargo run --example create_and_send`

use chrono::Utc;
use ledgerly::core::*;
use ledgerly::session::Session;
use ledgerly::store::LocalStore;
use rust_decimal_macros::dec;

fn main() -> Result<(), LedgerError> {
    env_logger::init();

    let mut session = Session::load(LocalStore::ephemeral())?;

    session.complete_onboarding(BusinessProfile {
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
    })?;

    let draft = InvoiceBuilder::new("Sam Field", "3 Meadow Lane, York")
        .invoice_date("2026-08-01")
        .supply_date("2026-07-28")
        .line("Lawn care (4 visits)", dec!(4), dec!(35), dec!(20))
        .line("Hedge trimming", dec!(2), dec!(45), dec!(20))
        .notes("Thanks for your business")
        .build();

    let invoice = session.create_draft(draft, Utc::now())?;
    println!("Created {} for {}", invoice.invoice_number, invoice.customer_name);

    let totals = calculate_invoice_totals(&invoice.line_items, true, VatPricingMode::Net);
    println!(
        "Totals: net {}, VAT {}, gross {}",
        format_gbp(totals.net),
        format_gbp(totals.vat),
        format_gbp(totals.gross)
    );

    session.send_invoice(&invoice.id, Utc::now())?;
    println!("Sent — number {} is now locked", invoice.invoice_number);

    session.mark_paid(&invoice.id, Utc::now())?;
    println!("Paid. Final status: {}", session.invoice(&invoice.id).unwrap().status);

    Ok(())
}
