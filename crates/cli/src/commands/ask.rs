//! One-shot pipeline run.

use std::fmt::Write;

use sams_assistant::config::AssistantConfig;
use sams_assistant::services::PipelineAnswer;
use sams_assistant::state::AppState;

use super::CommandError;

/// Answer a query with the services configured in the environment.
///
/// # Errors
///
/// Returns an error if configuration is invalid or a configured model fails.
/// Inventory failures still produce an answer.
pub async fn ask(query: &str, verbose: bool) -> Result<String, CommandError> {
    let config = AssistantConfig::from_env()?;
    let state = AppState::from_config(&config)?;
    let result = state.service().answer(query).await?;
    Ok(render(&result, verbose))
}

/// Render the answer, optionally preceded by how it was produced.
#[must_use]
pub fn render(result: &PipelineAnswer, verbose: bool) -> String {
    let mut out = String::new();
    if verbose {
        let _ = writeln!(out, "tier:   {}", result.classification.tier);
        let _ = writeln!(
            out,
            "tool:   {} {}",
            result.invocation.name,
            serde_json::to_string(&result.invocation.params).unwrap_or_default()
        );
        let _ = writeln!(
            out,
            "source: {}{}",
            result.answer.source,
            if result.outcome.is_failure() {
                " (tool call failed)"
            } else {
                ""
            }
        );
        out.push('\n');
    }
    out.push_str(&result.answer.text);
    out
}

#[cfg(test)]
mod tests {
    use sams_assistant::intent::IntentClassifier;
    use sams_assistant::services::{AnswerSource, ComposedAnswer, ToolOutcome};

    use super::*;

    fn pipeline_answer() -> PipelineAnswer {
        let classification = IntentClassifier::default().classify("asset summary please");
        PipelineAnswer {
            invocation: classification.invocation(),
            classification,
            outcome: ToolOutcome::Data("Total Assets: 3".to_string()),
            answer: ComposedAnswer {
                text: "There are 3 assets.".to_string(),
                source: AnswerSource::Fallback,
            },
        }
    }

    #[test]
    fn test_render_plain() {
        assert_eq!(render(&pipeline_answer(), false), "There are 3 assets.");
    }

    #[test]
    fn test_render_verbose() {
        let output = render(&pipeline_answer(), true);
        assert!(output.contains("tier:   summary"));
        assert!(output.contains("tool:   get_asset_summary {}"));
        assert!(output.ends_with("There are 3 assets."));
    }
}
