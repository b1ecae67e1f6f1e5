//! Shared application state.

use crate::feedback::FeedbackStore;
use crate::request_log::RequestLogStore;
use crate::sessions::SessionStore;
use archflow::{ServiceConfig, SpecGenerator};
use archflow_advisor::Advisor;
use archflow_engine::Renderer;
use archflow_resolver::{ContextTable, Resolver};
use archflow_symbols::{Registry, SymbolIndex};
use std::sync::Arc;

/// State shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub generator: Arc<dyn SpecGenerator>,
    pub advisor: Advisor,
    pub resolver: Arc<Resolver>,
    pub renderer: Arc<Renderer>,
    pub sessions: Arc<SessionStore>,
    pub request_logs: Arc<RequestLogStore>,
    pub feedback: Arc<FeedbackStore>,
}

impl AppState {
    /// Wire up the full pipeline around a spec generator.
    ///
    /// # Errors
    ///
    /// When the embedded catalog or context table fails to load.
    pub fn new(
        config: ServiceConfig,
        generator: Arc<dyn SpecGenerator>,
    ) -> anyhow::Result<Self> {
        let registry = Arc::new(Registry::load_builtin()?);
        let index = Arc::new(SymbolIndex::new(Arc::clone(&registry)));
        let resolver = Arc::new(Resolver::new(
            Arc::clone(&registry),
            index,
            ContextTable::load_builtin()?,
        ));
        let renderer = Arc::new(Renderer::new(
            config.output_dir.clone(),
            config.renderer_command.clone(),
            config.render_timeout,
        ));
        let sessions = Arc::new(SessionStore::new(config.session_ttl, config.undo_depth));

        Ok(AppState {
            config: Arc::new(config),
            generator,
            advisor: Advisor::new(),
            resolver,
            renderer,
            sessions,
            request_logs: Arc::new(RequestLogStore::default()),
            feedback: Arc::new(FeedbackStore::new()),
        })
    }
}
