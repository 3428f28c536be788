use crate::application::services::ContactService;
use crate::domain::ports::contact_repository::ContactRepository;
use crate::infrastructure::http::middleware::AppState;
use crate::infrastructure::persistence::Database;
use std::sync::Arc;

/// Wires services to the store. The caller owns the database lifecycle.
pub fn build_app_state(db: Database) -> AppState {
    let contact_repo: Arc<dyn ContactRepository> = Arc::new(db);
    let contact_service = ContactService::new(contact_repo);
    tracing::info!("Contact service initialized");

    AppState { contact_service }
}
