use crate::domain::entities::{BookmarkView, ContactDraft, ContactView};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::contact_repository::ContactRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct ContactService {
    contact_repo: Arc<dyn ContactRepository>,
}

impl ContactService {
    pub fn new(contact_repo: Arc<dyn ContactRepository>) -> Self {
        Self { contact_repo }
    }

    /// List every contact
    pub async fn list_contacts(&self) -> DomainResult<Vec<ContactView>> {
        let contacts = self.contact_repo.list_contacts().await?;
        Ok(contacts.into_iter().map(ContactView::from).collect())
    }

    /// Get a contact by ID
    pub async fn get_contact(&self, id: i64) -> DomainResult<ContactView> {
        let contact = self.contact_repo.get_contact_by_id(id).await?;
        Ok(contact.into())
    }

    /// Create a new contact
    pub async fn create_contact(&self, draft: ContactDraft) -> DomainResult<ContactView> {
        let draft = draft.validate()?;

        for phone in draft.distinct_phone_numbers() {
            if self.contact_repo.find_phone_owner(phone, None).await?.is_some() {
                return Err(phone_conflict(format!(
                    "Phone number {} is already in use",
                    phone
                )));
            }
        }

        let contact = self
            .contact_repo
            .create_contact(&draft)
            .await
            .map_err(record_write_failure)?;
        metrics::counter!("contacts_created_total").increment(1);

        Ok(contact.into())
    }

    /// Replace every editable field of a contact
    pub async fn update_contact(&self, id: i64, draft: ContactDraft) -> DomainResult<ContactView> {
        // Unknown ids are reported before any body problem
        self.contact_repo.get_contact_by_id(id).await?;

        let draft = draft.validate()?;

        for phone in draft.distinct_phone_numbers() {
            if self
                .contact_repo
                .find_phone_owner(phone, Some(id))
                .await?
                .is_some()
            {
                return Err(phone_conflict(format!(
                    "Phone number {} is already used by another contact",
                    phone
                )));
            }
        }

        let contact = self
            .contact_repo
            .update_contact(id, &draft)
            .await
            .map_err(record_write_failure)?;
        metrics::counter!("contacts_updated_total").increment(1);

        Ok(contact.into())
    }

    /// Set the bookmark flag; setting the current value again is a no-op
    pub async fn set_bookmark(&self, id: i64, is_bookmarked: bool) -> DomainResult<BookmarkView> {
        let contact = self
            .contact_repo
            .set_bookmark(id, is_bookmarked)
            .await
            .map_err(record_write_failure)?;

        Ok(BookmarkView {
            is_bookmarked: contact.is_bookmarked,
        })
    }

    /// Permanently delete a contact
    pub async fn delete_contact(&self, id: i64) -> DomainResult<()> {
        self.contact_repo
            .delete_contact(id)
            .await
            .map_err(record_write_failure)?;
        metrics::counter!("contacts_deleted_total").increment(1);

        Ok(())
    }
}

fn phone_conflict(message: String) -> DomainError {
    tracing::warn!("{}", message);
    metrics::counter!("contacts_conflicts_total").increment(1);
    DomainError::Conflict(message)
}

fn record_write_failure(err: DomainError) -> DomainError {
    match &err {
        DomainError::Conflict(msg) => {
            tracing::warn!("Contact write rejected: {}", msg);
            metrics::counter!("contacts_conflicts_total").increment(1);
        }
        DomainError::Internal(msg) => tracing::error!("Contact write failed: {}", msg),
        _ => {}
    }
    err
}
