// Tailoring engine: JD keyword matching, rule-based generation, prompt
// construction for delegated backends, and per-mode dispatch.
// All remote calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod keywords;
pub mod local;
pub mod prompts;
