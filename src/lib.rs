//! # ledgerly
//!
//! Invoicing core for a mobile sole-trader assistant: invoice numbering,
//! VAT-aware totals, compliance checks, lifecycle management, expense logging,
//! VAT registration threshold tracking, and local key-value persistence.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//! The crate is the logic layer only: screens, chat input, and invoice
//! rendering live in the host application.
//!
//! ## Quick Start
//!
//! ```rust
//! use ledgerly::core::*;
//! use rust_decimal_macros::dec;
//!
//! let mut pool = InvoiceNumberPool::new();
//! assert_eq!(pool.allocate(), "INV-00001");
//!
//! let item = LineItem {
//!     id: "1".into(),
//!     description: "Garden design".into(),
//!     quantity: Some(dec!(1)),
//!     rate: Some(dec!(120)),
//!     vat_rate: dec!(20),
//! };
//!
//! // VAT-inclusive entry: £120 gross at 20% breaks down to £100 net + £20 VAT.
//! let totals = calculate_line_totals(&item, true, VatPricingMode::Gross);
//! assert_eq!(totals.net, dec!(100));
//! assert_eq!(totals.vat, dec!(20));
//! assert_eq!(totals.gross, dec!(120));
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `core` | Entity types, numbering pool, VAT calculator, compliance checks |
//! | `vat` | VAT registration threshold tracking |
//! | `store` | JSON-backed local key-value store |
//! | `session` | Application controller: lifecycle + save-on-mutation |
//! | `export` | Accountant export pack (CSV) |

pub mod core;
pub mod export;
pub mod session;
pub mod store;
pub mod vat;

// Re-export core types at crate root for convenience
pub use crate::core::*;
