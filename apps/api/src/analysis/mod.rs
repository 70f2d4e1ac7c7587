// Resume analysis: keyword fallback, model-backed analysis, and the
// orchestrator that picks between them.
// All model calls go through llm_client; handlers only talk to the orchestrator.

pub mod fallback;
pub mod handlers;
pub mod model;
pub mod orchestrator;
pub mod prompts;
pub mod result;
pub mod skills;
