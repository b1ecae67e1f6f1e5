//! The diagram engine.
//!
//! Turns a resolved [`archflow::ArchitectureSpec`] into renderer source and
//! executes it in a sandboxed subprocess:
//!
//! - [`emit`]: deterministic source emission (grouped imports, cluster
//!   nesting, group-edge forms, operator selection)
//! - [`filename`]: the sanitizer shared by the write and serve paths
//! - [`exec`]: the interpreter subprocess with working-directory pinning,
//!   wall-clock timeout and process-group teardown
//!
//! The `/api/execute-code` path reuses [`exec::Renderer::execute_source`]
//! so user code runs under exactly the same sandbox and budget as emitted
//! code.

pub mod emit;
pub mod error;
pub mod exec;
pub mod filename;

pub use emit::{emit, EmitError};
pub use error::{EngineError, STDERR_LIMIT};
pub use exec::{RenderOutcome, Renderer};
pub use filename::{sanitize_stem, validate_serving_name, ServingNameError, MAX_STEM_LEN};
