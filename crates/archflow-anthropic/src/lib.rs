//! Anthropic Messages API integration for archflow.
//!
//! Implements [`archflow::SpecGenerator`] on top of the Messages API: the
//! system prompt embeds the JSON Schema generated from the spec types, the
//! reply is stripped of markdown fences before parsing, and request-level
//! fields (provider, formats, direction) always win over what the model
//! echoes back.
//!
//! # Example
//!
//! ```ignore
//! use archflow_anthropic::AnthropicSpecGenerator;
//!
//! let generator = AnthropicSpecGenerator::try_new()?
//!     .with_model("claude-3-7-sonnet-20250219")
//!     .with_max_tokens(4096);
//! ```

pub mod generator;
pub mod prompts;

pub use generator::{AnthropicSpecGenerator, ANTHROPIC_API_KEY, DEFAULT_API_URL, DEFAULT_MODEL};
