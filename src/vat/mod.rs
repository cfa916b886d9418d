//! VAT registration threshold tracking.

mod threshold;

pub use threshold::*;
