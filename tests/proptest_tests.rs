//! Property-based tests for the numbering pool and VAT calculator.

use ledgerly::core::*;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ── Strategies ──────────────────────────────────────────────────────────────

/// A reasonable money amount (0.01 to 99999.99).
fn arb_rate() -> impl Strategy<Value = Decimal> {
    (1u64..10_000_000u64).prop_map(|pennies| Decimal::new(pennies as i64, 2))
}

/// Quantity 0.5 to 200, in halves.
fn arb_quantity() -> impl Strategy<Value = Decimal> {
    (1u32..=400u32).prop_map(|halves| Decimal::new(halves as i64, 0) / dec!(2))
}

/// UK VAT rates.
fn arb_vat_rate() -> impl Strategy<Value = Decimal> {
    prop_oneof![Just(dec!(0)), Just(dec!(5)), Just(dec!(20))]
}

fn arb_line() -> impl Strategy<Value = LineItem> {
    (arb_quantity(), arb_rate(), arb_vat_rate()).prop_map(|(quantity, rate, vat_rate)| LineItem {
        id: "1".into(),
        description: "Work".into(),
        quantity: Some(quantity),
        rate: Some(rate),
        vat_rate,
    })
}

/// A random interleaving of pool operations on previously issued numbers.
#[derive(Debug, Clone)]
enum PoolOp {
    Allocate,
    Release(usize),
    Lock(usize),
}

fn arb_pool_ops() -> impl Strategy<Value = Vec<PoolOp>> {
    prop::collection::vec(
        prop_oneof![
            3 => Just(PoolOp::Allocate),
            1 => (0usize..64).prop_map(PoolOp::Release),
            1 => (0usize..64).prop_map(PoolOp::Lock),
        ],
        1..64,
    )
}

// ── Pool properties ─────────────────────────────────────────────────────────

proptest! {
    /// Outstanding (non-released) numbers are always unique, and a locked
    /// number is never reissued, under any interleaving of operations.
    #[test]
    fn pool_never_duplicates_or_resurrects(ops in arb_pool_ops()) {
        let mut pool = InvoiceNumberPool::new();
        let mut issued: Vec<String> = Vec::new();
        let mut outstanding: Vec<String> = Vec::new();
        let mut locked: Vec<String> = Vec::new();

        for op in ops {
            match op {
                PoolOp::Allocate => {
                    let n = pool.allocate();
                    prop_assert!(!outstanding.contains(&n), "duplicate issue of {}", n);
                    prop_assert!(!locked.contains(&n), "locked {} reissued", n);
                    outstanding.push(n.clone());
                    issued.push(n);
                }
                PoolOp::Release(i) => {
                    if let Some(n) = issued.get(i % issued.len().max(1)).cloned() {
                        pool.release(&n);
                        if !locked.contains(&n) {
                            outstanding.retain(|o| o != &n);
                        }
                    }
                }
                PoolOp::Lock(i) => {
                    if let Some(n) = issued.get(i % issued.len().max(1)).cloned() {
                        pool.lock(&n);
                        if !locked.contains(&n) {
                            locked.push(n);
                        }
                    }
                }
            }
        }

        // Invariant: nothing both locked and released
        for n in &locked {
            prop_assert!(pool.is_locked(n));
        }
        prop_assert!(pool.released().all(|r| !pool.is_locked(&format_invoice_number(r))));
    }

    /// Release followed by lock always ends locked-and-not-released.
    #[test]
    fn lock_beats_release(count in 1u32..50) {
        let mut pool = InvoiceNumberPool::new();
        let numbers: Vec<String> = (0..count).map(|_| pool.allocate()).collect();
        for n in &numbers {
            pool.release(n);
            pool.lock(n);
        }
        prop_assert_eq!(pool.released().count(), 0);
        for n in &numbers {
            prop_assert!(pool.is_locked(n));
        }
    }
}

// ── Calculator properties ───────────────────────────────────────────────────

proptest! {
    /// Gross-mode breakdown reconstructs the entered amount exactly.
    #[test]
    fn gross_mode_is_consistent(item in arb_line()) {
        let totals = calculate_line_totals(&item, true, VatPricingMode::Gross);
        let raw = item.quantity.unwrap() * item.rate.unwrap();
        prop_assert_eq!(totals.gross, raw);
        prop_assert_eq!(totals.net + totals.vat, totals.gross);
        // Backing out then reapplying the rate reproduces the gross
        let reapplied = totals.net * (Decimal::ONE + item.vat_rate / dec!(100));
        prop_assert!((reapplied - totals.gross).abs() < dec!(0.000_000_001));
    }

    /// Net-mode VAT is exactly rate% of the entered amount.
    #[test]
    fn net_mode_is_consistent(item in arb_line()) {
        let totals = calculate_line_totals(&item, true, VatPricingMode::Net);
        let raw = item.quantity.unwrap() * item.rate.unwrap();
        prop_assert_eq!(totals.net, raw);
        prop_assert_eq!(totals.vat, raw * item.vat_rate / dec!(100));
        prop_assert_eq!(totals.gross, totals.net + totals.vat);
    }

    /// Unregistered businesses never accumulate VAT, whatever the rates.
    #[test]
    fn unregistered_is_vat_free(items in prop::collection::vec(arb_line(), 0..6)) {
        for mode in [VatPricingMode::Gross, VatPricingMode::Net] {
            let totals = calculate_invoice_totals(&items, false, mode);
            prop_assert_eq!(totals.vat, Decimal::ZERO);
            prop_assert_eq!(totals.net, totals.gross);
        }
    }

    /// Invoice totals are the sum of their per-line breakdowns.
    #[test]
    fn totals_are_sum_of_parts(items in prop::collection::vec(arb_line(), 0..6)) {
        let whole = calculate_invoice_totals(&items, true, VatPricingMode::Net);
        let mut net = Decimal::ZERO;
        let mut vat = Decimal::ZERO;
        let mut gross = Decimal::ZERO;
        for item in &items {
            let line = calculate_line_totals(item, true, VatPricingMode::Net);
            net += line.net;
            vat += line.vat;
            gross += line.gross;
        }
        prop_assert_eq!(whole.net, net);
        prop_assert_eq!(whole.vat, vat);
        prop_assert_eq!(whole.gross, gross);
    }
}
