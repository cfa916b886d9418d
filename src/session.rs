//! Application controller: owns the session state and serializes every
//! read-modify-write cycle against the invoice number pool.
//!
//! All entity mutations flow through here; each one persists to the local
//! store before returning, so the store always reflects the last completed
//! operation. Invalid transitions fail before any state changes.

use chrono::{DateTime, Utc};

use crate::core::{
    AppSettings, BusinessProfile, DraftInvoice, Expense, Invoice, InvoiceNumberPool,
    InvoiceStatus, LedgerError, MissingField, missing_compliance_fields,
};
use crate::store::{LocalStore, keys};

/// A single-device, single-user application session.
#[derive(Debug)]
pub struct Session {
    store: LocalStore,
    profile: Option<BusinessProfile>,
    onboarding_complete: bool,
    invoices: Vec<Invoice>,
    expenses: Vec<Expense>,
    settings: AppSettings,
    pool: InvoiceNumberPool,
}

impl Session {
    /// Load session state from a store, defaulting anything absent.
    pub fn load(store: LocalStore) -> Result<Self, LedgerError> {
        let profile = store.get(keys::BUSINESS_PROFILE)?;
        let onboarding_complete = store.get_raw(keys::ONBOARDING_COMPLETE) == Some("true");
        let invoices = store.get(keys::INVOICES)?.unwrap_or_default();
        let expenses = store.get(keys::EXPENSES)?.unwrap_or_default();
        let settings = store.get(keys::SETTINGS)?.unwrap_or_default();
        let pool = store
            .get(keys::INVOICE_NUMBER_POOL)?
            .unwrap_or_else(InvoiceNumberPool::new);

        Ok(Self {
            store,
            profile,
            onboarding_complete,
            invoices,
            expenses,
            settings,
            pool,
        })
    }

    pub fn profile(&self) -> Option<&BusinessProfile> {
        self.profile.as_ref()
    }

    pub fn onboarding_complete(&self) -> bool {
        self.onboarding_complete
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn invoice(&self, id: &str) -> Option<&Invoice> {
        self.invoices.iter().find(|inv| inv.id == id)
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn pool(&self) -> &InvoiceNumberPool {
        &self.pool
    }

    /// Finish the onboarding wizard with the collected business profile.
    pub fn complete_onboarding(&mut self, profile: BusinessProfile) -> Result<(), LedgerError> {
        log::info!("onboarding complete for {}", profile.legal_name);
        self.profile = Some(profile);
        self.onboarding_complete = true;
        self.persist()
    }

    /// Replace the business profile (settings → edit profile).
    pub fn update_profile(&mut self, profile: BusinessProfile) -> Result<(), LedgerError> {
        if self.profile.is_none() {
            return Err(LedgerError::Onboarding(
                "cannot edit a profile before onboarding".into(),
            ));
        }
        self.profile = Some(profile);
        self.persist()
    }

    pub fn update_settings(&mut self, settings: AppSettings) -> Result<(), LedgerError> {
        self.settings = settings;
        self.persist()
    }

    /// Create a draft invoice, allocating the next invoice number.
    ///
    /// Returns the stored invoice. The id is derived from the creation
    /// instant and guaranteed unique within the session.
    pub fn create_draft(
        &mut self,
        draft: DraftInvoice,
        now: DateTime<Utc>,
    ) -> Result<Invoice, LedgerError> {
        let invoice_number = self.pool.allocate();
        log::info!("draft created with number {invoice_number}");

        let invoice = Invoice {
            id: self.next_invoice_id(now),
            invoice_number,
            status: InvoiceStatus::Draft,
            customer_name: draft.customer_name,
            customer_address: draft.customer_address,
            customer_email: draft.customer_email,
            invoice_date: draft.invoice_date,
            supply_date: draft.supply_date,
            line_items: draft.line_items,
            notes: draft.notes,
            bank_details: draft.bank_details,
            include_stripe_link: draft.include_stripe_link,
            created_at: now,
            sent_at: None,
            paid_at: None,
            voided_at: None,
        };

        self.invoices.push(invoice.clone());
        self.persist()?;
        Ok(invoice)
    }

    /// Remove a draft and release its number for reuse.
    pub fn discard_draft(&mut self, id: &str) -> Result<(), LedgerError> {
        let index = self
            .invoices
            .iter()
            .position(|inv| inv.id == id)
            .ok_or_else(|| LedgerError::UnknownInvoice(id.to_string()))?;

        if self.invoices[index].status != InvoiceStatus::Draft {
            return Err(LedgerError::NotADraft(id.to_string()));
        }

        let invoice = self.invoices.remove(index);
        self.pool.release(&invoice.invoice_number);
        log::info!("draft {id} discarded, released {}", invoice.invoice_number);
        self.persist()
    }

    /// Mark a compliant draft as sent, permanently locking its number.
    pub fn send_invoice(&mut self, id: &str, now: DateTime<Utc>) -> Result<(), LedgerError> {
        let profile = self.profile.as_ref().ok_or_else(|| {
            LedgerError::Onboarding("cannot send an invoice before onboarding".into())
        })?;
        let invoice = self
            .invoices
            .iter()
            .find(|inv| inv.id == id)
            .ok_or_else(|| LedgerError::UnknownInvoice(id.to_string()))?;

        check_transition(invoice, InvoiceStatus::Sent)?;

        let missing: Vec<MissingField> = missing_compliance_fields(invoice, profile);
        if !missing.is_empty() {
            return Err(LedgerError::NotSendable {
                id: id.to_string(),
                missing,
            });
        }

        let number = invoice.invoice_number.clone();
        self.transition(id, InvoiceStatus::Sent, |inv| inv.sent_at = Some(now))?;
        self.pool.lock(&number);
        log::info!("invoice {id} sent, locked {number}");
        self.persist()
    }

    /// Mark a sent invoice overdue (automated chasing).
    pub fn mark_overdue(&mut self, id: &str) -> Result<(), LedgerError> {
        self.transition(id, InvoiceStatus::Overdue, |_| {})?;
        self.persist()
    }

    /// Record payment of a sent or overdue invoice.
    pub fn mark_paid(&mut self, id: &str, now: DateTime<Utc>) -> Result<(), LedgerError> {
        self.transition(id, InvoiceStatus::Paid, |inv| inv.paid_at = Some(now))?;
        log::info!("invoice {id} paid");
        self.persist()
    }

    /// Void an invoice. Its number is locked and never reused, whether the
    /// invoice had been sent or was still a draft.
    pub fn void_invoice(&mut self, id: &str, now: DateTime<Utc>) -> Result<(), LedgerError> {
        let number = self
            .invoices
            .iter()
            .find(|inv| inv.id == id)
            .map(|inv| inv.invoice_number.clone())
            .ok_or_else(|| LedgerError::UnknownInvoice(id.to_string()))?;

        self.transition(id, InvoiceStatus::Voided, |inv| inv.voided_at = Some(now))?;
        self.pool.lock(&number);
        log::info!("invoice {id} voided, locked {number}");
        self.persist()
    }

    pub fn add_expense(&mut self, expense: Expense) -> Result<(), LedgerError> {
        self.expenses.push(expense);
        self.persist()
    }

    /// Derive an id from the creation instant, bumping the millisecond until
    /// it is unique — two drafts created in the same millisecond must not
    /// collide.
    fn next_invoice_id(&self, now: DateTime<Utc>) -> String {
        let mut millis = now.timestamp_millis();
        let mut id = millis.to_string();
        while self.invoices.iter().any(|inv| inv.id == id) {
            millis += 1;
            id = millis.to_string();
        }
        id
    }

    /// Apply a checked status transition, then run `apply` on the invoice.
    fn transition(
        &mut self,
        id: &str,
        to: InvoiceStatus,
        apply: impl FnOnce(&mut Invoice),
    ) -> Result<(), LedgerError> {
        let invoice = self
            .invoices
            .iter_mut()
            .find(|inv| inv.id == id)
            .ok_or_else(|| LedgerError::UnknownInvoice(id.to_string()))?;

        if !invoice.status.can_transition_to(to) {
            return Err(LedgerError::Transition {
                id: id.to_string(),
                from: invoice.status,
                to,
            });
        }

        invoice.status = to;
        apply(invoice);
        Ok(())
    }

    /// Write every session entity to the store and flush to disk.
    fn persist(&mut self) -> Result<(), LedgerError> {
        if let Some(profile) = &self.profile {
            self.store.set(keys::BUSINESS_PROFILE, profile)?;
        }
        if self.onboarding_complete {
            self.store.set_raw(keys::ONBOARDING_COMPLETE, "true");
        }
        self.store.set(keys::INVOICES, &self.invoices)?;
        self.store.set(keys::EXPENSES, &self.expenses)?;
        self.store.set(keys::SETTINGS, &self.settings)?;
        self.store.set(keys::INVOICE_NUMBER_POOL, &self.pool)?;
        self.store.save()
    }
}

fn check_transition(invoice: &Invoice, to: InvoiceStatus) -> Result<(), LedgerError> {
    if invoice.status.can_transition_to(to) {
        Ok(())
    } else {
        Err(LedgerError::Transition {
            id: invoice.id.clone(),
            from: invoice.status,
            to,
        })
    }
}
