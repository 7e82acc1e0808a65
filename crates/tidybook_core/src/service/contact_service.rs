//! Contact use-case service.
//!
//! # Responsibility
//! - Provide add/view/update/delete/search entry points for the address book.
//!
//! # Invariants
//! - Name and phone are required; email and address may be empty.
//! - Form text is trimmed before it is stored.

use crate::config::StoreConfig;
use crate::model::contact::Contact;
use crate::model::record::RecordId;
use crate::query::search::search;
use crate::service::OpenError;
use crate::storage::{CollectionStorage, JsonFileStorage};
use crate::store::record_store::{RecordStore, StoreResult};

/// Contact form input, used for both add and update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl ContactDraft {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            ..Self::default()
        }
    }

    fn into_contact(self) -> Contact {
        Contact::new(self.name.trim(), self.phone.trim())
            .with_email(self.email.trim())
            .with_address(self.address.trim())
    }
}

impl From<&Contact> for ContactDraft {
    fn from(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            phone: contact.phone.clone(),
            email: contact.email.clone(),
            address: contact.address.clone(),
        }
    }
}

/// Use-case facade over a contact store.
pub struct ContactService<S: CollectionStorage<Contact>> {
    store: RecordStore<Contact, S>,
}

impl ContactService<JsonFileStorage<Contact>> {
    /// Opens the contacts file named by `config`, creating it when absent.
    pub fn open(config: &StoreConfig) -> Result<Self, OpenError> {
        config.validate()?;
        let storage = JsonFileStorage::new(config.contacts_path());
        let store = RecordStore::open(storage, config.corrupt_policy)?;
        Ok(Self::new(store))
    }
}

impl<S: CollectionStorage<Contact>> ContactService<S> {
    pub fn new(store: RecordStore<Contact, S>) -> Self {
        Self { store }
    }

    /// Creates a contact from form input and returns it.
    pub fn add_contact(&mut self, draft: ContactDraft) -> StoreResult<Contact> {
        self.store.create(draft.into_contact())
    }

    /// Replaces every field of the contact identified by `id`.
    pub fn update_contact(&mut self, id: RecordId, draft: ContactDraft) -> StoreResult<()> {
        self.store.update_by_id(id, draft.into_contact())
    }

    /// Full contact details for a selected row.
    pub fn get_contact(&self, id: RecordId) -> Option<&Contact> {
        self.store.get(id)
    }

    pub fn delete_contacts<I>(&mut self, ids: I) -> StoreResult<usize>
    where
        I: IntoIterator<Item = RecordId>,
    {
        self.store.delete_by_ids(ids)
    }

    /// Matches name (case-insensitive) or phone; blank text returns all.
    pub fn search(&self, text: &str) -> Vec<Contact> {
        search(self.store.snapshot(), text)
    }

    pub fn contacts(&self) -> &[Contact] {
        self.store.snapshot()
    }

    pub fn store(&self) -> &RecordStore<Contact, S> {
        &self.store
    }

    /// Positional access for callers that still address rows by index.
    pub fn store_mut(&mut self) -> &mut RecordStore<Contact, S> {
        &mut self.store
    }
}
