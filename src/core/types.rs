use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single invoice line.
///
/// `quantity` and `rate` are optional because line items arrive from
/// free-text input and may be incomplete while an invoice is still in draft.
/// The compliance checker reports missing values; the calculator treats them
/// as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Unique within the parent invoice.
    pub id: String,
    pub description: String,
    pub quantity: Option<Decimal>,
    /// Unit price.
    pub rate: Option<Decimal>,
    /// VAT rate percentage (e.g. 20 for 20%).
    pub vat_rate: Decimal,
}

/// Invoice lifecycle status. Transitions are monotonic and never reverse:
/// draft → sent → (overdue →) paid, or draft/sent/overdue → voided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Voided,
}

impl InvoiceStatus {
    /// Whether the lifecycle allows moving from `self` to `to`.
    pub fn can_transition_to(self, to: InvoiceStatus) -> bool {
        use InvoiceStatus::*;
        matches!(
            (self, to),
            (Draft, Sent)
                | (Sent, Overdue)
                | (Sent, Paid)
                | (Overdue, Paid)
                | (Draft, Voided)
                | (Sent, Voided)
                | (Overdue, Voided)
        )
    }

    /// Paid and voided invoices never change again.
    pub fn is_terminal(self) -> bool {
        matches!(self, InvoiceStatus::Paid | InvoiceStatus::Voided)
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
            Self::Voided => "voided",
        };
        f.write_str(s)
    }
}

/// The invoice document.
///
/// `invoice_date` and `supply_date` are stored as entered (strings) and
/// validated by [`crate::core::missing_compliance_fields`]; lifecycle
/// timestamps are proper UTC instants set by the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    /// Formatted number, e.g. "INV-00042". Unique across the pool's lifetime
    /// once locked.
    pub invoice_number: String,
    pub status: InvoiceStatus,
    pub customer_name: String,
    pub customer_address: String,
    pub customer_email: Option<String>,
    /// Issue date as entered (expected ISO `YYYY-MM-DD`).
    pub invoice_date: String,
    /// Tax point as entered. May differ from the issue date.
    pub supply_date: String,
    pub line_items: Vec<LineItem>,
    pub notes: Option<String>,
    /// Free-text bank transfer details printed on the invoice.
    pub bank_details: Option<String>,
    pub include_stripe_link: bool,
    pub created_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
    pub paid_at: Option<DateTime<Utc>>,
    pub voided_at: Option<DateTime<Utc>>,
}

/// Whether entered line-item rates are VAT-inclusive or VAT-exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VatPricingMode {
    /// Entered amounts include VAT.
    Gross,
    /// Entered amounts exclude VAT; VAT is added on top.
    #[default]
    Net,
}

/// Supplier-side invoicing identity, collected during onboarding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessProfile {
    pub legal_name: String,
    pub trading_name: Option<String>,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub is_vat_registered: bool,
    pub vat_number: Option<String>,
    #[serde(default)]
    pub vat_pricing_mode: VatPricingMode,
    /// Chosen visual template id. Presentation-only; carried opaquely.
    pub invoice_style: String,
    /// Default payment terms, e.g. "Due within 30 days".
    pub payment_terms: Option<String>,
}

/// A logged business expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub merchant: String,
    pub amount: Decimal,
    pub category: String,
    /// As entered (expected ISO `YYYY-MM-DD`).
    pub date: String,
    pub receipt_url: Option<String>,
    pub status: ExpenseStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    Draft,
    Approved,
}

/// App-level preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub weekly_admin_reminder: bool,
    pub automated_chasing: bool,
    pub accountant_email: Option<String>,
}
