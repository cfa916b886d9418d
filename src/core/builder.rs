use rust_decimal::Decimal;

use super::types::LineItem;

/// Customer-facing invoice content before it enters the lifecycle.
///
/// Produced by [`InvoiceBuilder`] and consumed by
/// [`crate::session::Session::create_draft`], which assigns the id, invoice
/// number, status, and creation timestamp.
#[derive(Debug, Clone, Default)]
pub struct DraftInvoice {
    pub customer_name: String,
    pub customer_address: String,
    pub customer_email: Option<String>,
    pub invoice_date: String,
    pub supply_date: String,
    pub line_items: Vec<LineItem>,
    pub notes: Option<String>,
    pub bank_details: Option<String>,
    pub include_stripe_link: bool,
}

/// Builder for draft invoice content.
///
/// ```
/// use ledgerly::core::InvoiceBuilder;
/// use rust_decimal_macros::dec;
///
/// let draft = InvoiceBuilder::new("Jane Cooper", "12 Hill Rise, Leeds")
///     .invoice_date("2026-08-01")
///     .supply_date("2026-07-28")
///     .line("Patio repair", dec!(6), dec!(45), dec!(20))
///     .notes("Thanks for your business")
///     .build();
///
/// assert_eq!(draft.line_items.len(), 1);
/// assert_eq!(draft.line_items[0].id, "1");
/// ```
pub struct InvoiceBuilder {
    draft: DraftInvoice,
}

impl InvoiceBuilder {
    pub fn new(customer_name: impl Into<String>, customer_address: impl Into<String>) -> Self {
        Self {
            draft: DraftInvoice {
                customer_name: customer_name.into(),
                customer_address: customer_address.into(),
                ..DraftInvoice::default()
            },
        }
    }

    pub fn customer_email(mut self, email: impl Into<String>) -> Self {
        self.draft.customer_email = Some(email.into());
        self
    }

    pub fn invoice_date(mut self, date: impl Into<String>) -> Self {
        self.draft.invoice_date = date.into();
        self
    }

    pub fn supply_date(mut self, date: impl Into<String>) -> Self {
        self.draft.supply_date = date.into();
        self
    }

    /// Append a line item, assigning the next 1-based id.
    pub fn line(
        mut self,
        description: impl Into<String>,
        quantity: Decimal,
        rate: Decimal,
        vat_rate: Decimal,
    ) -> Self {
        let id = (self.draft.line_items.len() + 1).to_string();
        self.draft.line_items.push(LineItem {
            id,
            description: description.into(),
            quantity: Some(quantity),
            rate: Some(rate),
            vat_rate,
        });
        self
    }

    /// Append a pre-built line item — e.g. one still missing its quantity.
    pub fn add_line(mut self, item: LineItem) -> Self {
        self.draft.line_items.push(item);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.draft.notes = Some(notes.into());
        self
    }

    pub fn bank_details(mut self, details: impl Into<String>) -> Self {
        self.draft.bank_details = Some(details.into());
        self
    }

    pub fn include_stripe_link(mut self, include: bool) -> Self {
        self.draft.include_stripe_link = include;
        self
    }

    pub fn build(self) -> DraftInvoice {
        self.draft
    }
}
