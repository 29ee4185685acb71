//! Response composition.
//!
//! Turns a query and its tool outcome into the answer shown to the user.
//!
//! - With a text generator configured, the query and the tool text are
//!   embedded in an instruction prompt and the model's reply is returned
//!   verbatim. A failing model call is an error, never a silent fallback.
//! - Without one, a deterministic template echoes the query and the tool
//!   text (currency rewritten to rupiah) and lists example questions. This
//!   path does no I/O and cannot fail.

use std::borrow::Cow;
use std::fmt::Write;
use std::sync::{Arc, LazyLock};

use askama::Template;
use async_trait::async_trait;
use regex::{Captures, Regex};
use sams_core::Rupiah;
use serde::Serialize;
use tracing::{error, info, instrument};

use crate::gemini::GeminiError;
use crate::inventory::ToolError;

/// Example questions listed at the end of every fallback answer.
const EXAMPLE_QUESTIONS: &[&str] = &[
    "Give me a summary of all assets",
    "What is the total value of our IT equipment?",
    "Show me assets in the Finance department",
    "Which assets are under maintenance?",
    "What assets do we have in Jakarta?",
];

/// Dollar amounts as the inventory service writes them: `$12,345.67`.
static DOLLAR_AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\s?(\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?)").expect("Invalid regex")
});

/// Single-turn text generation backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a reply to one prompt.
    ///
    /// # Errors
    ///
    /// Returns `GeminiError` on network, auth, quota, decode or
    /// empty-response failures.
    async fn generate(&self, prompt: &str) -> Result<String, GeminiError>;
}

/// What the inventory tool produced for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    /// The tool's text result.
    Data(String),
    /// The call failed; the reason is passed on as text.
    Failed(ToolError),
}

impl ToolOutcome {
    /// Text handed to the model in place of the tool result.
    #[must_use]
    pub fn prompt_text(&self) -> Cow<'_, str> {
        match self {
            Self::Data(text) => Cow::Borrowed(text),
            Self::Failed(err) => Cow::Owned(format!("tool call failed: {err}")),
        }
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl From<Result<String, ToolError>> for ToolOutcome {
    fn from(result: Result<String, ToolError>) -> Self {
        match result {
            Ok(text) => Self::Data(text),
            Err(err) => Self::Failed(err),
        }
    }
}

/// Which path produced an answer. Never shown to the end user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    Model,
    Fallback,
}

impl std::fmt::Display for AnswerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Model => "model",
            Self::Fallback => "fallback",
        })
    }
}

/// A finished answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedAnswer {
    pub text: String,
    pub source: AnswerSource,
}

/// Errors that can occur while composing with a configured model.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    /// The model call failed.
    #[error("model call failed: {0}")]
    Model(#[from] GeminiError),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Instruction prompt for the model.
#[derive(Template)]
#[template(path = "prompts/inventory_answer.txt")]
struct InventoryAnswerPrompt<'a> {
    query: &'a str,
    tool_result: &'a str,
}

/// Render the instruction prompt for a query and its tool outcome.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn build_prompt(query: &str, outcome: &ToolOutcome) -> Result<String, askama::Error> {
    InventoryAnswerPrompt {
        query,
        tool_result: &outcome.prompt_text(),
    }
    .render()
}

/// Builds answers, through a model when one is configured.
#[derive(Clone, Default)]
pub struct ResponseComposer {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl std::fmt::Debug for ResponseComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseComposer")
            .field("uses_model", &self.uses_model())
            .finish()
    }
}

impl ResponseComposer {
    /// A composer that always uses the deterministic fallback.
    #[must_use]
    pub const fn fallback() -> Self {
        Self { generator: None }
    }

    /// A composer that asks `generator` for every answer.
    #[must_use]
    pub fn with_generator(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    /// Whether answers come from a model.
    #[must_use]
    pub const fn uses_model(&self) -> bool {
        self.generator.is_some()
    }

    /// Compose the answer for a query.
    ///
    /// # Errors
    ///
    /// Returns an error only when a model is configured and the prompt
    /// cannot be rendered or the model call fails.
    #[instrument(skip(self, query, outcome), fields(tool_failed = outcome.is_failure()))]
    pub async fn compose(
        &self,
        query: &str,
        outcome: &ToolOutcome,
    ) -> Result<ComposedAnswer, ComposeError> {
        let Some(generator) = &self.generator else {
            info!(answer_source = %AnswerSource::Fallback, "Composed answer");
            return Ok(ComposedAnswer {
                text: fallback_answer(query, outcome),
                source: AnswerSource::Fallback,
            });
        };

        let prompt = build_prompt(query, outcome)?;
        let text = generator
            .generate(&prompt)
            .await
            .inspect_err(|e| error!(error = %e, "Model call failed"))?;

        info!(answer_source = %AnswerSource::Model, "Composed answer");
        Ok(ComposedAnswer {
            text,
            source: AnswerSource::Model,
        })
    }
}

/// Deterministic answer used when no model is configured.
///
/// Pure: the same query and outcome always give the same text.
#[must_use]
pub fn fallback_answer(query: &str, outcome: &ToolOutcome) -> String {
    let query = query.trim();
    let mut answer = String::new();

    // Writing to a String cannot fail.
    match outcome {
        ToolOutcome::Data(text) if !text.trim().is_empty() => {
            let _ = writeln!(answer, "Here is what I found for \"{query}\":");
            let _ = writeln!(answer);
            let _ = writeln!(answer, "{}", rupiah_amounts(text.trim()));
        }
        ToolOutcome::Data(_) => {
            let _ = writeln!(
                answer,
                "I couldn't find any assets matching \"{query}\". Try rephrasing your question."
            );
        }
        ToolOutcome::Failed(_) => {
            let _ = writeln!(
                answer,
                "Sorry, I couldn't look up the asset information for \"{query}\" right now. \
                 Please try again in a moment."
            );
        }
    }

    let _ = writeln!(answer);
    let _ = writeln!(answer, "You can also ask me things like:");
    for example in EXAMPLE_QUESTIONS {
        let _ = writeln!(answer, "- \"{example}\"");
    }

    answer.trim_end().to_string()
}

/// Rewrite dollar amounts (`$12,345.67`) as whole rupiah (`Rp 12.346`).
///
/// Amounts that fail to parse are left untouched.
#[must_use]
pub fn rupiah_amounts(text: &str) -> Cow<'_, str> {
    DOLLAR_AMOUNT_RE.replace_all(text, |caps: &Captures<'_>| {
        let original = caps.get(0).map_or("", |m| m.as_str());
        caps.get(1)
            .and_then(|amount| Rupiah::parse_grouped(amount.as_str()))
            .map_or_else(|| original.to_string(), |amount| amount.to_string())
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Records prompts and answers with a fixed reply or error.
    struct StubGenerator {
        reply: Result<String, fn() -> GeminiError>,
        prompts: Mutex<Vec<String>>,
    }

    impl StubGenerator {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn failing(err: fn() -> GeminiError) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(err),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, GeminiError> {
            self.prompts.lock().expect("lock").push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    const SUMMARY: &str = "Asset Summary:\n- Total Assets: 42\n- Total Value: $1,234,567.89\n- Active Assets: 40\n- Critical Assets: 2";

    #[test]
    fn test_rupiah_amounts() {
        assert_eq!(
            rupiah_amounts("- Total Value: $1,234,567.89"),
            "- Total Value: Rp 1.234.568"
        );
        assert_eq!(rupiah_amounts("cost $ 999"), "cost Rp 999");
        assert_eq!(rupiah_amounts("no money here"), "no money here");
    }

    #[test]
    fn test_fallback_echoes_query_and_data() {
        let answer = fallback_answer(
            "asset summary please",
            &ToolOutcome::Data(SUMMARY.to_string()),
        );
        assert!(answer.starts_with("Here is what I found for \"asset summary please\":"));
        assert!(answer.contains("- Total Assets: 42"));
        assert!(answer.contains("- Total Value: Rp 1.234.568"));
        assert!(!answer.contains('$'));
        assert!(answer.contains("- \"Which assets are under maintenance?\""));
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let outcome = ToolOutcome::Data(SUMMARY.to_string());
        let first = fallback_answer("asset summary please", &outcome);
        let second = fallback_answer("asset summary please", &outcome);
        assert_eq!(first, second);
    }

    #[test]
    fn test_fallback_tool_failure_apologizes_without_internals() {
        let outcome = ToolOutcome::Failed(ToolError::Unreachable(
            "error sending request for url (http://sams-mcp-server:8081/call/x)".to_string(),
        ));
        let answer = fallback_answer("assets in Jakarta", &outcome);
        assert!(answer.starts_with("Sorry, I couldn't look up"));
        assert!(!answer.contains("sams-mcp-server"));
        assert!(answer.contains("You can also ask me things like:"));
    }

    #[test]
    fn test_fallback_empty_result() {
        let answer = fallback_answer("find a unicorn", &ToolOutcome::Data("  ".to_string()));
        assert!(answer.starts_with("I couldn't find any assets matching \"find a unicorn\""));
    }

    #[test]
    fn test_prompt_text_for_failure() {
        let outcome = ToolOutcome::Failed(ToolError::BadStatus {
            status: 500,
            message: "boom".to_string(),
        });
        assert_eq!(
            outcome.prompt_text(),
            "tool call failed: inventory service returned 500: boom"
        );
    }

    #[test]
    fn test_prompt_embeds_query_and_result_literally() {
        let prompt = build_prompt(
            "What is the total value of our IT equipment? <b>",
            &ToolOutcome::Data("Total Value: $5,000.00 & more".to_string()),
        )
        .expect("render");
        assert!(prompt.contains("What is the total value of our IT equipment? <b>"));
        assert!(prompt.contains("Total Value: $5,000.00 & more"));
        assert!(prompt.contains("Rp 1.234.567"));
        assert!(prompt.contains("Never mention tools"));
    }

    #[tokio::test]
    async fn test_compose_without_model_uses_fallback() {
        let composer = ResponseComposer::fallback();
        let answer = composer
            .compose("asset summary please", &ToolOutcome::Data(SUMMARY.to_string()))
            .await
            .expect("fallback never fails");
        assert_eq!(answer.source, AnswerSource::Fallback);
        assert_eq!(
            answer.text,
            fallback_answer("asset summary please", &ToolOutcome::Data(SUMMARY.to_string()))
        );
    }

    #[tokio::test]
    async fn test_compose_with_model_returns_text_verbatim() {
        let generator = StubGenerator::replying("You have 42 assets worth Rp 1.234.568.");
        let composer = ResponseComposer::with_generator(generator.clone());

        let answer = composer
            .compose("asset summary please", &ToolOutcome::Data(SUMMARY.to_string()))
            .await
            .expect("model answer");
        assert_eq!(answer.source, AnswerSource::Model);
        assert_eq!(answer.text, "You have 42 assets worth Rp 1.234.568.");

        let prompts = generator.prompts.lock().expect("lock");
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("asset summary please"));
        assert!(prompts[0].contains("Total Assets: 42"));
    }

    #[tokio::test]
    async fn test_compose_forwards_tool_failure_to_model() {
        let generator = StubGenerator::replying("Sorry, please rephrase.");
        let composer = ResponseComposer::with_generator(generator.clone());

        let outcome = ToolOutcome::Failed(ToolError::Malformed("expected value".to_string()));
        let answer = composer.compose("assets", &outcome).await.expect("model answer");
        assert_eq!(answer.text, "Sorry, please rephrase.");

        let prompts = generator.prompts.lock().expect("lock");
        assert!(prompts[0].contains("tool call failed: malformed inventory response"));
    }

    #[tokio::test]
    async fn test_compose_model_failure_is_error_not_fallback() {
        let composer = ResponseComposer::with_generator(StubGenerator::failing(|| {
            GeminiError::EmptyResponse("no candidates".to_string())
        }));
        let err = composer
            .compose("asset summary please", &ToolOutcome::Data(SUMMARY.to_string()))
            .await
            .expect_err("model failure");
        assert!(matches!(
            err,
            ComposeError::Model(GeminiError::EmptyResponse(_))
        ));
    }
}
