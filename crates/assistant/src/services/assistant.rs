//! The query pipeline: classify, retrieve, compose.
//!
//! Each stage is exposed on its own so callers and tests can run or
//! substitute them independently:
//!
//! 1. [`IntentClassifier::classify`] picks one tool invocation (never fails)
//! 2. [`AssistantService::retrieve`] makes the single inventory call; a failure
//!    becomes a [`ToolOutcome::Failed`] instead of an error
//! 3. [`ResponseComposer::compose`] writes the answer

use std::sync::Arc;

use sams_core::ToolInvocation;
use tracing::{info, instrument, warn};

use crate::intent::{Classification, IntentClassifier};
use crate::inventory::ToolDispatcher;

use super::composer::{ComposeError, ComposedAnswer, ResponseComposer, ToolOutcome};

/// Everything one pipeline run produced.
#[derive(Debug, Clone)]
pub struct PipelineAnswer {
    /// Which tier claimed the query and the resulting intent.
    pub classification: Classification,
    /// The tool call that was made.
    pub invocation: ToolInvocation,
    /// What the tool returned.
    pub outcome: ToolOutcome,
    /// The answer for the user.
    pub answer: ComposedAnswer,
}

/// Answers natural-language asset questions.
///
/// Stateless between queries; clones share the classifier's taxonomy and
/// the downstream clients.
#[derive(Clone)]
pub struct AssistantService {
    classifier: IntentClassifier,
    dispatcher: Arc<dyn ToolDispatcher>,
    composer: ResponseComposer,
}

impl std::fmt::Debug for AssistantService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantService")
            .field("tiers", &self.classifier.tiers().len())
            .field("composer", &self.composer)
            .finish_non_exhaustive()
    }
}

impl AssistantService {
    /// Create a new assistant service.
    #[must_use]
    pub fn new(
        classifier: IntentClassifier,
        dispatcher: Arc<dyn ToolDispatcher>,
        composer: ResponseComposer,
    ) -> Self {
        Self {
            classifier,
            dispatcher,
            composer,
        }
    }

    #[must_use]
    pub const fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    #[must_use]
    pub const fn composer(&self) -> &ResponseComposer {
        &self.composer
    }

    /// Classify a query without calling anything.
    #[must_use]
    pub fn classify(&self, query: &str) -> Classification {
        self.classifier.classify(query)
    }

    /// Run one tool call. Failures are returned as data.
    #[instrument(skip(self, invocation), fields(tool = %invocation.name))]
    pub async fn retrieve(&self, invocation: &ToolInvocation) -> ToolOutcome {
        let outcome = ToolOutcome::from(self.dispatcher.invoke(invocation).await);
        if let ToolOutcome::Failed(err) = &outcome {
            warn!(error = %err, "Tool call failed, answering without data");
        }
        outcome
    }

    /// Answer a query end to end.
    ///
    /// # Errors
    ///
    /// Returns an error only when a configured model fails. Tool failures
    /// are passed to the composer instead.
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    pub async fn answer(&self, query: &str) -> Result<PipelineAnswer, ComposeError> {
        let classification = self.classify(query);
        let invocation = classification.invocation();
        let outcome = self.retrieve(&invocation).await;
        let answer = self.composer.compose(query, &outcome).await?;

        info!(
            tier = %classification.tier,
            tool = %invocation.name,
            tool_failed = outcome.is_failure(),
            answer_source = %answer.source,
            "Answered query"
        );

        Ok(PipelineAnswer {
            classification,
            invocation,
            outcome,
            answer,
        })
    }
}
