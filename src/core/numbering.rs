use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Literal prefix of every formatted invoice number.
pub const INVOICE_NUMBER_PREFIX: &str = "INV-";

/// Zero-padding width of the numeric part, e.g. "INV-00001".
const NUMBER_WIDTH: usize = 5;

/// Pool of numeric invoice identifiers.
///
/// The single source of truth for which invoice numbers exist. Numbers are
/// issued sequentially; numbers freed from discarded drafts go back into
/// `released_numbers` and are reused lowest-first; numbers from sent or
/// voided invoices are locked forever.
///
/// A slot moves through: unallocated → allocated → released (reusable) or
/// locked (terminal). Locked is absorbing — a locked number can never be
/// released or reissued.
///
/// All three operations are plain state mutations with no I/O; the caller
/// persists the pool after each change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceNumberPool {
    next_number: u32,
    released_numbers: BTreeSet<u32>,
    locked_numbers: BTreeSet<u32>,
}

impl Default for InvoiceNumberPool {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceNumberPool {
    /// Fresh pool: next sequential number is 1, nothing released or locked.
    pub fn new() -> Self {
        Self {
            next_number: 1,
            released_numbers: BTreeSet::new(),
            locked_numbers: BTreeSet::new(),
        }
    }

    /// Issue the next invoice number.
    ///
    /// Reuses the lowest released number if any exist, otherwise takes the
    /// sequential counter and advances it.
    pub fn allocate(&mut self) -> String {
        if let Some(&lowest) = self.released_numbers.iter().next() {
            self.released_numbers.remove(&lowest);
            return format_invoice_number(lowest);
        }

        let number = self.next_number;
        self.next_number += 1;
        format_invoice_number(number)
    }

    /// Return a number to the pool — e.g. when a draft is discarded.
    ///
    /// Releasing a locked number is a silent no-op: locking is permanent and
    /// a release attempt must never resurrect the number. Malformed input
    /// (no parseable numeric suffix) leaves the pool untouched.
    pub fn release(&mut self, invoice_number: &str) {
        let Some(numeric) = parse_invoice_number(invoice_number) else {
            log::warn!("release ignored malformed invoice number {invoice_number:?}");
            return;
        };
        if !self.locked_numbers.contains(&numeric) {
            self.released_numbers.insert(numeric);
        }
    }

    /// Permanently retire a number — when its invoice is sent or voided.
    ///
    /// Locking wins over a pending release and is idempotent. Malformed input
    /// leaves the pool untouched.
    pub fn lock(&mut self, invoice_number: &str) {
        let Some(numeric) = parse_invoice_number(invoice_number) else {
            log::warn!("lock ignored malformed invoice number {invoice_number:?}");
            return;
        };
        self.locked_numbers.insert(numeric);
        self.released_numbers.remove(&numeric);
    }

    /// Whether a formatted number has been permanently retired.
    pub fn is_locked(&self, invoice_number: &str) -> bool {
        parse_invoice_number(invoice_number)
            .is_some_and(|n| self.locked_numbers.contains(&n))
    }

    /// The sequential counter value (next number issued once the released
    /// set is empty).
    pub fn next_raw(&self) -> u32 {
        self.next_number
    }

    /// Released numbers in ascending order.
    pub fn released(&self) -> impl Iterator<Item = u32> + '_ {
        self.released_numbers.iter().copied()
    }
}

/// Format a numeric slot as "INV-" + zero-padded 5-digit decimal.
pub fn format_invoice_number(number: u32) -> String {
    format!(
        "{}{:0>width$}",
        INVOICE_NUMBER_PREFIX,
        number,
        width = NUMBER_WIDTH
    )
}

/// Strip the "INV-" prefix and parse the remainder as base-10.
/// Returns `None` for malformed input.
pub fn parse_invoice_number(invoice_number: &str) -> Option<u32> {
    invoice_number
        .strip_prefix(INVOICE_NUMBER_PREFIX)
        .and_then(|suffix| suffix.parse().ok())
}
