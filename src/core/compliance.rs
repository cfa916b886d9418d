use chrono::NaiveDate;

use super::types::{BusinessProfile, Invoice};

/// A legally required field that is missing or invalid.
///
/// `Display` renders the exact label shown to the user, e.g.
/// "Supplier contact (email or phone)" or "Line item 2 quantity".
/// Line item variants carry the 1-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingField {
    SupplierLegalName,
    SupplierAddress,
    SupplierContact,
    VatNumber,
    CustomerName,
    CustomerAddress,
    InvoiceNumber,
    InvoiceDate,
    SupplyDate,
    LineItems,
    LineItemDescription(usize),
    LineItemQuantity(usize),
    LineItemRate(usize),
}

impl std::fmt::Display for MissingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SupplierLegalName => f.write_str("Supplier legal name"),
            Self::SupplierAddress => f.write_str("Supplier address"),
            Self::SupplierContact => f.write_str("Supplier contact (email or phone)"),
            Self::VatNumber => f.write_str("VAT number"),
            Self::CustomerName => f.write_str("Customer name"),
            Self::CustomerAddress => f.write_str("Customer address"),
            Self::InvoiceNumber => f.write_str("Invoice number"),
            Self::InvoiceDate => f.write_str("Invoice date"),
            Self::SupplyDate => f.write_str("Supply date"),
            Self::LineItems => f.write_str("Line items"),
            Self::LineItemDescription(i) => write!(f, "Line item {i} description"),
            Self::LineItemQuantity(i) => write!(f, "Line item {i} quantity"),
            Self::LineItemRate(i) => write!(f, "Line item {i} rate"),
        }
    }
}

/// Collect every missing field that blocks an invoice from being sent.
///
/// Pure function; the result order is fixed (supplier, customer, document,
/// line items) because callers display it verbatim. An empty result means
/// fully compliant.
///
/// A blank supply date passes as long as the invoice date itself is valid —
/// the tax point defaults to the issue date. Supply date is only reported
/// when both are invalid.
pub fn missing_compliance_fields(
    invoice: &Invoice,
    profile: &BusinessProfile,
) -> Vec<MissingField> {
    let mut missing = Vec::new();

    if is_blank(&profile.legal_name) {
        missing.push(MissingField::SupplierLegalName);
    }
    if is_blank(&profile.address) {
        missing.push(MissingField::SupplierAddress);
    }
    if is_blank(&profile.email) && is_blank(&profile.phone) {
        missing.push(MissingField::SupplierContact);
    }
    if profile.is_vat_registered && is_blank_opt(profile.vat_number.as_deref()) {
        missing.push(MissingField::VatNumber);
    }

    if is_blank(&invoice.customer_name) {
        missing.push(MissingField::CustomerName);
    }
    if is_blank(&invoice.customer_address) {
        missing.push(MissingField::CustomerAddress);
    }

    if is_blank(&invoice.invoice_number) {
        missing.push(MissingField::InvoiceNumber);
    }

    let invoice_date_valid = is_valid_date(&invoice.invoice_date);
    if !invoice_date_valid {
        missing.push(MissingField::InvoiceDate);
    }
    if !is_valid_date(&invoice.supply_date) && !invoice_date_valid {
        missing.push(MissingField::SupplyDate);
    }

    if invoice.line_items.is_empty() {
        missing.push(MissingField::LineItems);
    } else {
        for (index, item) in invoice.line_items.iter().enumerate() {
            let position = index + 1;
            if is_blank(&item.description) {
                missing.push(MissingField::LineItemDescription(position));
            }
            if item.quantity.is_none() {
                missing.push(MissingField::LineItemQuantity(position));
            }
            if item.rate.is_none() {
                missing.push(MissingField::LineItemRate(position));
            }
        }
    }

    missing
}

/// Blank = empty after trimming whitespace.
fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Blank = absent, or empty after trimming.
fn is_blank_opt(value: Option<&str>) -> bool {
    value.is_none_or(|s| s.trim().is_empty())
}

/// Valid dates are ISO `YYYY-MM-DD` calendar dates.
fn is_valid_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").is_ok()
}
