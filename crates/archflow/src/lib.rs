//! Core data model and contracts for the archflow diagram service
//!
//! This crate defines the types that flow between the HTTP orchestrator, the
//! spec generator (LLM), the architectural advisor, the component resolver and
//! the diagram engine:
//!
//! - [`ArchitectureSpec`] and its parts ([`Component`], [`Connection`],
//!   [`Cluster`], [`GraphvizAttrs`])
//! - spec validation ([`validate::SpecValidationError`])
//! - the [`SpecGenerator`] trait, the seam behind which an LLM provider lives
//! - [`ServiceConfig`], the enumerated runtime configuration
//! - the shared error taxonomy ([`Error`])
//!
//! Downstream crates (`archflow-resolver`, `archflow-advisor`,
//! `archflow-engine`, `archflow-server`) consume these types and add their own
//! error kinds on top.

pub mod config;
pub mod error;
pub mod generator;
pub mod spec;
pub mod validate;

pub use config::ServiceConfig;
pub use error::{Error, Result};
pub use generator::{GenerateRequest, GeneratedSpec, ModifiedSpec, SpecGenerator};
pub use spec::{
    ArchitectureSpec, Cluster, Component, Connection, Direction, EdgeDirection, GraphvizAttrs,
    OutFormat, OutFormats, Provider,
};
pub use validate::SpecValidationError;
