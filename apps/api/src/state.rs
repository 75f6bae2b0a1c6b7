use crate::config::Config;
use crate::layout::PageConfig;
use crate::session::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// In-memory resume sessions; the only mutable state in the service.
    pub store: ResumeStore,
    /// Screen style and PDF layout constants for the configured paper format.
    pub page_config: PageConfig,
}
