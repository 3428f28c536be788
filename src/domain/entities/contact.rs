use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

/// A persisted contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub phone_numbers: Vec<String>,
    pub emails: Vec<String>,
    pub addresses: Vec<String>,
    pub socials: Vec<String>,
    pub is_bookmarked: bool,
    pub created_time: String,
    pub updated_time: String,
}

/// Candidate field values for a create or update.
///
/// Drafts built from request payloads are raw; call [`ContactDraft::validate`]
/// before handing one to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub phone_numbers: Vec<String>,
    pub emails: Vec<String>,
    pub addresses: Vec<String>,
    pub socials: Vec<String>,
    pub is_bookmarked: bool,
}

impl ContactDraft {
    pub fn new(name: impl Into<String>, phone_numbers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            phone_numbers,
            ..Default::default()
        }
    }

    /// Trims every text field and drops blank list entries.
    ///
    /// Duplicates inside a single list are kept as-is.
    pub fn validate(self) -> DomainResult<Self> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::ValidationError("name required".to_string()));
        }

        let phone_numbers = clean_values(self.phone_numbers);
        let emails = clean_values(self.emails);
        let addresses = clean_values(self.addresses);
        let socials = clean_values(self.socials);

        if phone_numbers.is_empty() {
            return Err(DomainError::ValidationError(
                "at least one phone number required".to_string(),
            ));
        }

        Ok(Self {
            name,
            phone_numbers,
            emails,
            addresses,
            socials,
            is_bookmarked: self.is_bookmarked,
        })
    }

    /// Phone numbers with repeats removed, first occurrence wins.
    pub fn distinct_phone_numbers(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.phone_numbers
            .iter()
            .map(String::as_str)
            .filter(|phone| seen.insert(*phone))
            .collect()
    }
}

fn clean_values(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

// DTOs for API responses

/// Public serialized form of a contact; timestamps stay internal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactView {
    pub id: i64,
    pub name: String,
    pub phone_numbers: Vec<String>,
    pub emails: Vec<String>,
    pub addresses: Vec<String>,
    pub socials: Vec<String>,
    pub is_bookmarked: bool,
}

impl From<Contact> for ContactView {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            name: contact.name,
            phone_numbers: contact.phone_numbers,
            emails: contact.emails,
            addresses: contact.addresses,
            socials: contact.socials,
            is_bookmarked: contact.is_bookmarked,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkView {
    pub is_bookmarked: bool,
}
