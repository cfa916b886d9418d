use thiserror::Error;

use super::compliance::MissingField;
use super::types::InvoiceStatus;

/// Errors surfaced by the session and store layers.
///
/// The pure core functions (calculator, validator, numbering pool) are total
/// over well-formed inputs and never return errors themselves.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LedgerError {
    /// Lifecycle violation — status transitions never reverse.
    #[error("invalid status transition {from} -> {to} for invoice {id}")]
    Transition {
        id: String,
        from: InvoiceStatus,
        to: InvoiceStatus,
    },

    /// No invoice with the given id in the session.
    #[error("unknown invoice: {0}")]
    UnknownInvoice(String),

    /// Only drafts can be discarded.
    #[error("invoice {0} is not a draft")]
    NotADraft(String),

    /// Compliance check failed — the invoice cannot be sent.
    #[error("invoice {id} is missing required fields: {}", format_missing(.missing))]
    NotSendable {
        id: String,
        missing: Vec<MissingField>,
    },

    /// Operation requires a completed onboarding / business profile.
    #[error("onboarding incomplete: {0}")]
    Onboarding(String),

    /// Local store I/O failure.
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Persisted state could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn format_missing(missing: &[MissingField]) -> String {
    missing
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
