use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::types::{LineItem, VatPricingMode};

/// Net / VAT / gross breakdown of a line item or whole invoice.
///
/// Amounts are carried at full precision — display rounding to 2 decimals
/// happens at presentation time only ([`format_gbp`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    /// Amount excluding VAT.
    pub net: Decimal,
    pub vat: Decimal,
    /// Amount including VAT.
    pub gross: Decimal,
}

/// Compute the net/VAT/gross amounts for a single line item.
///
/// - Unregistered business: no VAT, net = gross = quantity × rate.
/// - Registered, net-mode entry (VAT-exclusive): VAT is added on top.
/// - Registered, gross-mode entry (VAT-inclusive): the entered amount is the
///   gross and the net is backed out of it.
///
/// Missing quantity or rate contributes zero; the compliance checker flags
/// the omission upstream. A rate of -100% in gross mode would divide by
/// zero; the amount is kept as net with no VAT instead.
pub fn calculate_line_totals(
    item: &LineItem,
    vat_registered: bool,
    pricing_mode: VatPricingMode,
) -> Totals {
    let raw = item.quantity.unwrap_or_default() * item.rate.unwrap_or_default();

    if !vat_registered {
        return Totals {
            net: raw,
            vat: Decimal::ZERO,
            gross: raw,
        };
    }

    match pricing_mode {
        VatPricingMode::Gross => {
            let divisor = Decimal::ONE + item.vat_rate / dec!(100);
            let Some(net) = raw.checked_div(divisor) else {
                return Totals {
                    net: raw,
                    vat: Decimal::ZERO,
                    gross: raw,
                };
            };
            Totals {
                net,
                vat: raw - net,
                gross: raw,
            }
        }
        VatPricingMode::Net => {
            let vat = raw * item.vat_rate / dec!(100);
            Totals {
                net: raw,
                vat,
                gross: raw + vat,
            }
        }
    }
}

/// Compute invoice totals as the sum of per-line breakdowns.
///
/// Summing line by line (rather than applying a single aggregate rate)
/// keeps the result correct when lines carry different VAT rates.
pub fn calculate_invoice_totals(
    line_items: &[LineItem],
    vat_registered: bool,
    pricing_mode: VatPricingMode,
) -> Totals {
    let mut totals = Totals::default();
    for item in line_items {
        let line = calculate_line_totals(item, vat_registered, pricing_mode);
        totals.net += line.net;
        totals.vat += line.vat;
        totals.gross += line.gross;
    }
    totals
}

/// Format an amount as British Pounds for display: 2 decimals, thousands
/// grouping, e.g. "£1,234.50". Presentation only — stored amounts stay at
/// full precision.
pub fn format_gbp(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative();
    let formatted = format!("{:.2}", rounded.abs());

    let (whole, frac) = formatted.split_once('.').unwrap_or((&formatted, "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}£{grouped}.{frac}")
}
