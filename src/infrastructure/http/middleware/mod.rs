pub mod error;

pub use error::{ApiError, ApiResult};

use crate::application::services::ContactService;

/// Shared handler state, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub contact_service: ContactService,
}
