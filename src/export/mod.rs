//! Accountant export pack: CSV renditions of the invoice ledger, expense
//! log, and (for VAT-registered businesses) a VAT summary grouped by rate.
//!
//! The pack is built in memory; delivery (email, file share) is the host
//! application's concern.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::core::{
    BusinessProfile, Expense, ExpenseStatus, Invoice, InvoiceStatus, Totals, VatPricingMode,
    calculate_invoice_totals, calculate_line_totals,
};

/// The generated CSV documents.
#[derive(Debug, Clone)]
pub struct ExportPack {
    /// One row per invoice, every status included. This ledger doubles as
    /// the transaction log: it is the complete chronological record of
    /// issued documents, so no separate log file is produced.
    pub invoices_csv: String,
    pub expenses_csv: String,
    /// Present only when the business is VAT-registered.
    pub vat_summary_csv: Option<String>,
}

/// Build the full export pack from session state.
pub fn build_export_pack(
    invoices: &[Invoice],
    expenses: &[Expense],
    profile: &BusinessProfile,
) -> ExportPack {
    let vat_registered = profile.is_vat_registered;
    let pricing_mode = profile.vat_pricing_mode;

    ExportPack {
        invoices_csv: generate_invoices_csv(invoices, vat_registered, pricing_mode),
        expenses_csv: generate_expenses_csv(expenses),
        vat_summary_csv: vat_registered
            .then(|| generate_vat_summary_csv(invoices, pricing_mode)),
    }
}

/// One row per invoice: number, status, customer, dates, net/VAT/gross.
fn generate_invoices_csv(
    invoices: &[Invoice],
    vat_registered: bool,
    pricing_mode: VatPricingMode,
) -> String {
    let mut out = String::from(
        "Invoice number,Status,Customer,Invoice date,Supply date,Net,VAT,Gross\r\n",
    );
    for inv in invoices {
        let totals = calculate_invoice_totals(&inv.line_items, vat_registered, pricing_mode);
        csv_field_str(&mut out, &inv.invoice_number);
        out.push(',');
        csv_field_str(&mut out, &inv.status.to_string());
        out.push(',');
        csv_field_str(&mut out, &inv.customer_name);
        out.push(',');
        csv_field_date(&mut out, &inv.invoice_date);
        out.push(',');
        csv_field_date(&mut out, &inv.supply_date);
        out.push(',');
        csv_field_decimal(&mut out, totals.net);
        out.push(',');
        csv_field_decimal(&mut out, totals.vat);
        out.push(',');
        csv_field_decimal(&mut out, totals.gross);
        out.push_str("\r\n");
    }
    out
}

/// One row per expense: date, merchant, category, status, amount.
fn generate_expenses_csv(expenses: &[Expense]) -> String {
    let mut out = String::from("Date,Merchant,Category,Status,Amount\r\n");
    for exp in expenses {
        csv_field_date(&mut out, &exp.date);
        out.push(',');
        csv_field_str(&mut out, &exp.merchant);
        out.push(',');
        csv_field_str(&mut out, &exp.category);
        out.push(',');
        let status = match exp.status {
            ExpenseStatus::Draft => "draft",
            ExpenseStatus::Approved => "approved",
        };
        csv_field_str(&mut out, status);
        out.push(',');
        csv_field_decimal(&mut out, exp.amount);
        out.push_str("\r\n");
    }
    out
}

/// Net and VAT totals grouped by VAT rate across non-voided invoices.
fn generate_vat_summary_csv(invoices: &[Invoice], pricing_mode: VatPricingMode) -> String {
    let mut groups: BTreeMap<Decimal, Totals> = BTreeMap::new();

    for inv in invoices
        .iter()
        .filter(|inv| inv.status != InvoiceStatus::Voided)
    {
        for item in &inv.line_items {
            let line = calculate_line_totals(item, true, pricing_mode);
            let entry = groups.entry(item.vat_rate).or_default();
            entry.net += line.net;
            entry.vat += line.vat;
            entry.gross += line.gross;
        }
    }

    let mut out = String::from("VAT rate,Net,VAT,Gross\r\n");
    for (rate, totals) in &groups {
        csv_field_decimal(&mut out, *rate);
        out.push(',');
        csv_field_decimal(&mut out, totals.net);
        out.push(',');
        csv_field_decimal(&mut out, totals.vat);
        out.push(',');
        csv_field_decimal(&mut out, totals.gross);
        out.push_str("\r\n");
    }
    out
}

fn csv_field_str(out: &mut String, value: &str) {
    out.push('"');
    // Escape internal double quotes
    for ch in value.chars() {
        if ch == '"' {
            out.push_str("\"\"");
        } else {
            out.push(ch);
        }
    }
    out.push('"');
}

/// Stored dates are ISO `YYYY-MM-DD`; accountants get `DD/MM/YYYY`.
/// Anything unparseable is passed through as entered.
fn csv_field_date(out: &mut String, value: &str) {
    match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
        Ok(date) => csv_field_str(out, &date.format("%d/%m/%Y").to_string()),
        Err(_) => csv_field_str(out, value),
    }
}

fn csv_field_decimal(out: &mut String, d: Decimal) {
    out.push_str(&format!("{:.2}", d.round_dp(2)));
}
