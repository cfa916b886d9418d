//! Build the accountant export pack and print the CSVs, plus the VAT
//! registration threshold position.
//!
//! Run with: `cargo run --example export_pack`

use chrono::Utc;
use ledgerly::core::*;
use ledgerly::export::build_export_pack;
use ledgerly::session::Session;
use ledgerly::store::LocalStore;
use ledgerly::vat::threshold_status;
use rust_decimal_macros::dec;

fn main() -> Result<(), LedgerError> {
    env_logger::init();

    let mut session = Session::load(LocalStore::ephemeral())?;
    session.complete_onboarding(BusinessProfile {
        legal_name: "J Cooper Landscaping Ltd".into(),
        trading_name: None,
        address: "12 Hill Rise, Leeds, LS1 4AB".into(),
        email: "jane@coopergardens.co.uk".into(),
        phone: "07700 900123".into(),
        is_vat_registered: true,
        vat_number: Some("GB123456789".into()),
        vat_pricing_mode: VatPricingMode::Net,
        invoice_style: "classic".into(),
        payment_terms: None,
    })?;

    for (customer, rate) in [("Sam Field", dec!(140)), ("Priya Shah", dec!(320))] {
        let draft = InvoiceBuilder::new(customer, "3 Meadow Lane, York")
            .invoice_date("2026-08-01")
            .supply_date("2026-08-01")
            .line("Garden maintenance", dec!(1), rate, dec!(20))
            .build();
        let invoice = session.create_draft(draft, Utc::now())?;
        session.send_invoice(&invoice.id, Utc::now())?;
    }

    session.add_expense(Expense {
        id: "e1".into(),
        merchant: "Travis Perkins".into(),
        amount: dec!(84.20),
        category: "Materials".into(),
        date: "2026-08-10".into(),
        receipt_url: None,
        status: ExpenseStatus::Approved,
    })?;

    let profile = session.profile().cloned().expect("onboarded");
    let pack = build_export_pack(session.invoices(), session.expenses(), &profile);

    println!("--- invoices.csv ---\n{}", pack.invoices_csv);
    println!("--- expenses.csv ---\n{}", pack.expenses_csv);
    if let Some(summary) = &pack.vat_summary_csv {
        println!("--- vat-summary.csv ---\n{summary}");
    }

    let status = threshold_status(session.invoices(), Utc::now().date_naive());
    println!(
        "Rolling 12-month turnover: {} ({:.1}% of threshold, {:?})",
        format_gbp(status.turnover),
        status.percent_of_threshold,
        status.band
    );

    Ok(())
}
