//! HTTP orchestrator for the archflow diagram service.
//!
//! Wires the pipeline crates behind an axum API:
//! request validation and relevance gating, spec generation through the
//! [`archflow::SpecGenerator`] seam, advisory passes, component resolution,
//! sandboxed rendering, session persistence with bounded undo, and
//! traversal-safe artifact serving. Background tasks sweep idle sessions and
//! stale artifacts.
//!
//! # Quick start
//!
//! ```ignore
//! use archflow::ServiceConfig;
//! use archflow_anthropic::AnthropicSpecGenerator;
//! use archflow_server::{build_router, AppState};
//! use std::sync::Arc;
//!
//! let config = ServiceConfig::from_env();
//! let generator = Arc::new(AnthropicSpecGenerator::try_new()?);
//! let state = AppState::new(config, generator)?;
//! let app = build_router(state);
//! ```

pub mod artifacts;
pub mod client;
pub mod codecheck;
pub mod completions;
pub mod error;
pub mod feedback;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod request_log;
pub mod schema;
pub mod server;
pub mod sessions;
pub mod state;

pub use client::{ArchflowClient, ClientError};
pub use error::{ApiError, ErrorResponse};
pub use server::build_router;
pub use state::AppState;
