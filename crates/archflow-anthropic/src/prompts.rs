//! Prompt assembly for spec generation and modification.
//!
//! The model is asked for raw JSON conforming to the `ArchitectureSpec`
//! schema; the schema itself is generated from the Rust types and embedded
//! into the system prompt so the two can never drift apart.

use archflow::{ArchitectureSpec, Direction, OutFormats, Provider};

/// System prompt for fresh generation.
#[must_use]
pub fn generation_system_prompt() -> String {
    let schema = schema_json();
    format!(
        "You are an expert cloud architect. Convert the user's description into an \
         architecture diagram specification.\n\
         \n\
         Respond with a single JSON object conforming to this JSON Schema, and nothing else \
         (no prose, no markdown fences):\n\
         \n\
         {schema}\n\
         \n\
         Rules:\n\
         - component ids are short snake_case identifiers, unique within the spec\n\
         - component types are concrete service identifiers (e.g. \"lambda\", \"rds\", \
           \"apigateway\"), not marketing names\n\
         - every connection references existing component ids\n\
         - use clusters to group components that share a network boundary or tier; \
           clusters form a forest through parent_id\n\
         - include only what the description implies; do not invent unrelated services"
    )
}

/// User message for fresh generation.
#[must_use]
pub fn generation_user_prompt(
    description: &str,
    provider: Provider,
    out_formats: &OutFormats,
    direction: Direction,
) -> String {
    let formats: Vec<&str> = out_formats.iter().map(|f| f.as_str()).collect();
    format!(
        "Provider: {provider}\nOutput format(s): {}\nDirection: {direction}\n\n\
         Description:\n{description}",
        formats.join(", ")
    )
}

/// System prompt for spec modification.
#[must_use]
pub fn modification_system_prompt() -> String {
    let schema = schema_json();
    format!(
        "You are an expert cloud architect maintaining an existing architecture diagram \
         specification.\n\
         \n\
         Apply the user's modification to the current spec. Respond with a single JSON \
         object, and nothing else (no prose, no markdown fences), of the shape:\n\
         {{\"spec\": <modified spec>, \"changes\": [<short human-readable change summaries>]}}\n\
         \n\
         The spec value must conform to this JSON Schema:\n\
         \n\
         {schema}\n\
         \n\
         Rules:\n\
         - keep every component, connection and cluster the modification does not touch\n\
         - keep existing component ids stable\n\
         - every connection references existing component ids"
    )
}

/// User message for spec modification.
#[must_use]
pub fn modification_user_prompt(spec: &ArchitectureSpec, instruction: &str) -> String {
    let current = serde_json::to_string_pretty(spec).unwrap_or_else(|_| "{}".to_string());
    format!("Current spec:\n{current}\n\nModification:\n{instruction}")
}

fn schema_json() -> String {
    let schema = schemars::schema_for!(ArchitectureSpec);
    serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string())
}
