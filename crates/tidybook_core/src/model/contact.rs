//! Contact record.
//!
//! # Invariants
//! - `name` and `phone` are required on write.
//! - `email` and `address` are optional and default to empty.
//! - Names are not unique; identity is `id`.

use crate::model::record::{
    id_or_nil, require_id, require_text, string_or_default, Record, RecordId, RecordKind,
    RecordValidationError,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One address-book entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Nil when decoded from a file written before ids existed.
    #[serde(default, deserialize_with = "id_or_nil")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "string_or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "string_or_default")]
    pub email: String,
    /// Free text, may span multiple lines.
    #[serde(default, deserialize_with = "string_or_default")]
    pub address: String,
}

impl Contact {
    /// Creates a contact with a generated id and empty optional fields.
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            phone: phone.into(),
            email: String::new(),
            address: String::new(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }
}

impl Record for Contact {
    const KIND: RecordKind = RecordKind::Contact;

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), RecordValidationError> {
        require_id(self.id)?;
        require_text(Self::KIND, "name", &self.name)?;
        require_text(Self::KIND, "phone", &self.phone)?;
        Ok(())
    }

    fn carry_over(&mut self, previous: &Self) {
        self.id = previous.id;
    }
}
