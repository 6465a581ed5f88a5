//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::LinkService;

/// State shared by all request flows.
///
/// Built once at startup; the store client inside the link service is the
/// only resource shared between requests.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
}

impl AppState {
    pub fn new(link_service: Arc<LinkService>) -> Self {
        Self { link_service }
    }
}
