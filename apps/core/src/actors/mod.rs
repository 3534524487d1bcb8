//! Actor system: the LLM client actor and the per-turn supervisor.

pub mod llm;
pub mod messages;
pub mod supervisor;
pub mod traits;
