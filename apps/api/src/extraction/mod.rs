// Resume extraction core.
// Document text → prompt → model → tolerant parse → completeness score.
// All model calls go through llm_client.

pub mod completeness;
pub mod document;
pub mod handlers;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod prompts;
pub mod schema;
