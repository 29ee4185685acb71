//! Integration tests for the classify → retrieve → compose pipeline.
//!
//! The real inventory and Gemini clients talk to in-process mocks.

use std::sync::Arc;

use sams_assistant::config::InventoryConfig;
use sams_assistant::gemini::{GeminiClient, GeminiError};
use sams_assistant::intent::IntentClassifier;
use sams_assistant::inventory::{InventoryClient, ToolDispatcher, ToolError};
use sams_assistant::services::{
    AnswerSource, AssistantService, ComposeError, ResponseComposer, ToolOutcome,
};
use sams_core::{ToolInvocation, ToolName};
use sams_integration_tests::{GeminiReply, InventoryReply, MockGemini, MockInventory, RecordedCall};
use serde_json::json;

fn inventory_client(mock: &MockInventory) -> InventoryClient {
    InventoryClient::new(&InventoryConfig {
        base_url: mock.base_url(),
    })
    .expect("inventory client")
}

fn service(inventory: &MockInventory, gemini: Option<&MockGemini>) -> AssistantService {
    let composer = gemini.map_or_else(ResponseComposer::fallback, |mock| {
        let client = GeminiClient::new(&mock.config()).expect("gemini client");
        ResponseComposer::with_generator(Arc::new(client))
    });
    AssistantService::new(
        IntentClassifier::default(),
        Arc::new(inventory_client(inventory)),
        composer,
    )
}

// =============================================================================
// Dispatch
// =============================================================================

#[tokio::test]
async fn test_exactly_one_call_with_wire_params() {
    let inventory = MockInventory::start().await;
    let service = service(&inventory, None);

    service
        .answer("show me assets in the Finance department")
        .await
        .expect("answer");

    assert_eq!(
        inventory.calls(),
        vec![RecordedCall {
            tool: "get_assets_by_department".to_string(),
            params: json!({"department": "Finance", "limit": 20}),
        }]
    );
}

#[tokio::test]
async fn test_summary_sends_empty_object() {
    let inventory = MockInventory::start().await;
    service(&inventory, None)
        .answer("asset summary please")
        .await
        .expect("answer");

    let calls = inventory.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].tool, "get_asset_summary");
    assert_eq!(calls[0].params, json!({}));
}

#[tokio::test]
async fn test_dispatcher_error_statuses() {
    let inventory = MockInventory::start().await;
    inventory.reply(
        "get_asset_summary",
        InventoryReply::Error(404, "Tool 'get_asset_summary' not found.".to_string()),
    );
    let client = inventory_client(&inventory);

    let err = client
        .invoke(&ToolInvocation::bare(ToolName::GetAssetSummary))
        .await
        .expect_err("bad status");
    assert_eq!(
        err,
        ToolError::BadStatus {
            status: 404,
            message: "Tool 'get_asset_summary' not found.".to_string(),
        }
    );
}

#[tokio::test]
async fn test_dispatcher_malformed_body() {
    let inventory = MockInventory::start().await;
    inventory.reply("get_asset_summary", InventoryReply::Garbage);

    let err = inventory_client(&inventory)
        .invoke(&ToolInvocation::bare(ToolName::GetAssetSummary))
        .await
        .expect_err("malformed");
    assert!(matches!(err, ToolError::Malformed(_)));
}

#[tokio::test]
async fn test_list_tools() {
    let inventory = MockInventory::start().await;
    let catalog = inventory_client(&inventory).list_tools().await.expect("catalog");
    let names: Vec<&str> = catalog.tools.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names.len(), ToolName::ALL.len());
    assert!(names.contains(&"get_assets_by_location"));
}

// =============================================================================
// Fallback composition
// =============================================================================

#[tokio::test]
async fn test_fallback_converts_currency() {
    let inventory = MockInventory::start().await;
    inventory.reply(
        "get_asset_summary",
        InventoryReply::Result("Total Assets: 42\nTotal Value: $1,234,567.40".to_string()),
    );

    let result = service(&inventory, None)
        .answer("asset summary please")
        .await
        .expect("answer");

    assert_eq!(result.answer.source, AnswerSource::Fallback);
    assert!(result.answer.text.contains("Total Value: Rp 1.234.567"));
    assert!(!result.answer.text.contains('$'));
}

#[tokio::test]
async fn test_fallback_is_byte_identical_across_runs() {
    let inventory = MockInventory::start().await;
    let service = service(&inventory, None);

    let first = service.answer("list active assets").await.expect("first");
    let second = service.answer("list active assets").await.expect("second");
    assert_eq!(first.answer.text, second.answer.text);
}

#[tokio::test]
async fn test_tool_failure_degrades_to_apology() {
    let inventory = MockInventory::start().await;
    inventory.reply(
        "get_assets_by_status",
        InventoryReply::Error(500, "database offline".to_string()),
    );

    let result = service(&inventory, None)
        .answer("list active assets")
        .await
        .expect("tool failure is not an error");

    assert!(result.outcome.is_failure());
    assert!(result.answer.text.starts_with("Sorry, I couldn't look up"));
}

// =============================================================================
// Model composition
// =============================================================================

#[tokio::test]
async fn test_model_prompt_embeds_query_and_result() {
    let inventory = MockInventory::start().await;
    inventory.reply(
        "get_assets_by_category",
        InventoryReply::Result("Dell Latitude 5420 - $1,200".to_string()),
    );
    let gemini = MockGemini::start(GeminiReply::Text("You have one laptop.".to_string())).await;

    let result = service(&inventory, Some(&gemini))
        .answer("What is the total value of our IT equipment?")
        .await
        .expect("answer");

    assert_eq!(result.answer.text, "You have one laptop.");
    assert_eq!(result.answer.source, AnswerSource::Model);

    let prompts = gemini.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("What is the total value of our IT equipment?"));
    assert!(prompts[0].contains("Dell Latitude 5420 - $1,200"));
}

#[tokio::test]
async fn test_model_sees_tool_failure_text() {
    let inventory = MockInventory::start().await;
    inventory.reply(
        "get_asset_summary",
        InventoryReply::Error(503, "maintenance window".to_string()),
    );
    let gemini = MockGemini::start(GeminiReply::Text("Sorry about that.".to_string())).await;

    let result = service(&inventory, Some(&gemini))
        .answer("asset summary please")
        .await
        .expect("model still answers");

    assert!(matches!(result.outcome, ToolOutcome::Failed(_)));
    assert_eq!(result.answer.text, "Sorry about that.");
    assert!(gemini.prompts()[0].contains("tool call failed: "));
}

#[tokio::test]
async fn test_model_empty_response_is_an_error() {
    let inventory = MockInventory::start().await;
    let gemini = MockGemini::start(GeminiReply::Empty).await;

    let err = service(&inventory, Some(&gemini))
        .answer("asset summary please")
        .await
        .expect_err("empty response");
    assert!(matches!(
        err,
        ComposeError::Model(GeminiError::EmptyResponse(_))
    ));
}

#[tokio::test]
async fn test_model_api_error_is_surfaced() {
    let inventory = MockInventory::start().await;
    let gemini = MockGemini::start(GeminiReply::Error(500, "backend exploded".to_string())).await;

    let err = service(&inventory, Some(&gemini))
        .answer("asset summary please")
        .await
        .expect_err("api error");
    match err {
        ComposeError::Model(GeminiError::Api { message, .. }) => {
            assert_eq!(message, "backend exploded");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn test_model_rate_limit_uses_default_retry_after() {
    let inventory = MockInventory::start().await;
    let gemini = MockGemini::start(GeminiReply::RateLimited(None)).await;

    let err = service(&inventory, Some(&gemini))
        .answer("asset summary please")
        .await
        .expect_err("rate limited");
    assert!(matches!(
        err,
        ComposeError::Model(GeminiError::QuotaExceeded(60))
    ));
}

#[tokio::test]
async fn test_model_rate_limit_reads_retry_after() {
    let inventory = MockInventory::start().await;
    let gemini = MockGemini::start(GeminiReply::RateLimited(Some(17))).await;

    let err = service(&inventory, Some(&gemini))
        .answer("asset summary please")
        .await
        .expect_err("rate limited");
    assert!(matches!(
        err,
        ComposeError::Model(GeminiError::QuotaExceeded(17))
    ));
}

#[tokio::test]
async fn test_model_wrong_key_is_unauthorized() {
    let inventory = MockInventory::start().await;
    let gemini = MockGemini::start(GeminiReply::Text("unused".to_string())).await;
    let client = GeminiClient::new(&gemini.config_with_wrong_key()).expect("gemini client");
    let service = AssistantService::new(
        IntentClassifier::default(),
        Arc::new(inventory_client(&inventory)),
        ResponseComposer::with_generator(Arc::new(client)),
    );

    let err = service
        .answer("asset summary please")
        .await
        .expect_err("wrong key");
    assert!(matches!(
        err,
        ComposeError::Model(GeminiError::Unauthorized(_))
    ));
    assert!(gemini.prompts().is_empty());
}
