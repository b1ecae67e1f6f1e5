//! Symbol discovery for archflow.
//!
//! Three layers, bottom up:
//!
//! - [`tables`]: build-time generated per-provider symbol tables, the static
//!   stand-in for runtime icon-library introspection. Re-exported aliases are
//!   first-class entries.
//! - [`registry`]: the declarative catalog routing categories to modules and
//!   type ids to expected classes, plus the tag index. Hints, not truth.
//! - [`index`]: lazily-populated per-module caches with at-most-once
//!   population and the exact/normalized/substring/fuzzy lookup ladder.

pub mod index;
pub mod registry;
pub mod tables;

pub use index::{normalize, ClassSet, Located, Suggestion, SymbolIndex, FUZZY_THRESHOLD};
pub use registry::{Registry, RegistryError, TypeMapping};
pub use tables::{module_entry, module_exports, provider_modules, ModuleSymbols};
