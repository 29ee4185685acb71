//! Business logic services for the assistant.
//!
//! # Services
//!
//! - `assistant` - The classify → retrieve → compose pipeline
//! - `composer` - Model-written or deterministic fallback answers

pub mod assistant;
pub mod composer;

pub use assistant::{AssistantService, PipelineAnswer};
pub use composer::{
    AnswerSource, ComposeError, ComposedAnswer, ResponseComposer, TextGenerator, ToolOutcome,
    build_prompt, fallback_answer, rupiah_amounts,
};
