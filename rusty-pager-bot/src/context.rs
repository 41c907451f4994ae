use std::sync::Arc;

use rusty_pager::PaginationConfig;
use rusty_pager_twilight::{ComponentRouter, TwilightTransport};
use twilight_http::Client;

/// Shared application context passed into command handlers.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone)]
pub struct Context {
    pub http: Arc<Client>,
    pub router: ComponentRouter,
    pub pagination: Arc<PaginationConfig>,
}

impl Context {
    pub fn new(http: Arc<Client>, router: ComponentRouter, pagination: PaginationConfig) -> Self {
        Self {
            http,
            router,
            pagination: Arc::new(pagination),
        }
    }

    /// A transport sharing this context's client and router.
    pub fn transport(&self) -> Arc<TwilightTransport> {
        Arc::new(TwilightTransport::new(
            Arc::clone(&self.http),
            self.router.clone(),
        ))
    }
}
