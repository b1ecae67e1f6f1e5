//! Component resolution for archflow.
//!
//! Maps a free-form `(provider, type, display name)` triple onto a concrete
//! renderer symbol through a four-stage cascade:
//!
//! 1. **Library-first discovery** against the symbol index, hinted by the
//!    registry's category routing.
//! 2. **Contextual resolution** for ambiguous or unmatched type ids: the
//!    closed context-pattern table, fuzzy similarity against known type ids,
//!    then tag overlap; rewritten ids are resubmitted to stage 1.
//! 3. **Registry fallback**: trust the catalog mapping and consult the
//!    generated symbol tables directly by exact class name.
//! 4. **Diagnostic failure** carrying fuzzy suggestions and the hinted
//!    module's actual exports.
//!
//! Also hosts the relevance pre-gate that rejects non-architecture requests
//! before any LLM call is made.

pub mod cascade;
pub mod context;
pub mod diagnostics;
pub mod relevance;

pub use cascade::{Resolution, Resolver, Stage};
pub use context::{ContextTable, ContextTableError};
pub use diagnostics::{ModuleListing, ResolutionDiagnostic, ResolverError, SuggestionInfo};
pub use relevance::check_description;
