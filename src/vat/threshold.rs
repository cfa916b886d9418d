//! UK VAT registration threshold checks.
//!
//! HMRC requires VAT registration once taxable turnover over any rolling
//! 12-month period exceeds the threshold. Turnover is counted net, from
//! non-voided invoices.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::core::{Invoice, InvoiceStatus, VatPricingMode, calculate_invoice_totals};

/// UK VAT registration threshold (taxable turnover, rolling 12 months).
pub const VAT_REGISTRATION_THRESHOLD: Decimal = dec!(85_000);

/// How close the business is to mandatory registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdBand {
    /// Below 70% of the threshold.
    Safe,
    /// 70–90% of the threshold.
    Warning,
    /// 90% or more — registration is imminent or already required.
    Critical,
}

/// Result of a threshold check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdStatus {
    /// Rolling 12-month taxable turnover (net).
    pub turnover: Decimal,
    /// Headroom before the threshold. Negative once exceeded.
    pub remaining: Decimal,
    /// Turnover as a percentage of the threshold.
    pub percent_of_threshold: Decimal,
    pub band: ThresholdBand,
}

/// Sum net turnover from invoices dated within the 12 months up to `today`.
///
/// Voided invoices are excluded, as are invoices whose date does not parse —
/// an undated invoice cannot fall inside the window. Amounts are taken as
/// entered (net pricing, no VAT), matching how unregistered turnover is
/// assessed.
pub fn rolling_turnover(invoices: &[Invoice], today: NaiveDate) -> Decimal {
    let window_start = today
        .checked_sub_months(Months::new(12))
        .unwrap_or(NaiveDate::MIN);

    invoices
        .iter()
        .filter(|inv| inv.status != InvoiceStatus::Voided)
        .filter(|inv| {
            NaiveDate::parse_from_str(inv.invoice_date.trim(), "%Y-%m-%d")
                .is_ok_and(|d| d >= window_start && d <= today)
        })
        .map(|inv| calculate_invoice_totals(&inv.line_items, false, VatPricingMode::Net).net)
        .sum()
}

/// Check how the business stands against the registration threshold.
pub fn threshold_status(invoices: &[Invoice], today: NaiveDate) -> ThresholdStatus {
    let turnover = rolling_turnover(invoices, today);
    let percent_of_threshold = turnover / VAT_REGISTRATION_THRESHOLD * dec!(100);

    let band = if percent_of_threshold < dec!(70) {
        ThresholdBand::Safe
    } else if percent_of_threshold < dec!(90) {
        ThresholdBand::Warning
    } else {
        ThresholdBand::Critical
    };

    ThresholdStatus {
        turnover,
        remaining: VAT_REGISTRATION_THRESHOLD - turnover,
        percent_of_threshold,
        band,
    }
}
