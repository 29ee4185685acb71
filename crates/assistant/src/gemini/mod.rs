//! Google Gemini API client.
//!
//! Answers are generated with one `generateContent` call per query. There
//! is no conversation history, streaming, or tool calling: the inventory
//! data is already in the prompt.

mod client;
mod error;
mod types;

pub use client::GeminiClient;
pub use error::GeminiError;
pub use types::{Candidate, Content, GenerateContentRequest, GenerateContentResponse, Part};
