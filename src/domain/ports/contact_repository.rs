use crate::domain::entities::{Contact, ContactDraft};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

/// Durable storage for contact records.
///
/// Implementations must run the phone-uniqueness check and the write for
/// `create_contact` and `update_contact` as one transaction.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn list_contacts(&self) -> DomainResult<Vec<Contact>>;
    async fn get_contact_by_id(&self, id: i64) -> DomainResult<Contact>;
    async fn create_contact(&self, draft: &ContactDraft) -> DomainResult<Contact>;
    async fn update_contact(&self, id: i64, draft: &ContactDraft) -> DomainResult<Contact>;
    async fn set_bookmark(&self, id: i64, is_bookmarked: bool) -> DomainResult<Contact>;
    async fn delete_contact(&self, id: i64) -> DomainResult<()>;
    /// Id of the contact owning `phone_number`, skipping `excluding` when set.
    async fn find_phone_owner(
        &self,
        phone_number: &str,
        excluding: Option<i64>,
    ) -> DomainResult<Option<i64>>;
}
