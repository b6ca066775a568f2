use std::sync::Arc;

use board::node::Position;
use serde_json::json;

use super::*;
use crate::state::test_helpers::{MockAi, test_app_state_with_ai};

fn fallback_list() -> Vec<String> {
    DECOMPOSE_FALLBACK.iter().map(ToString::to_string).collect()
}

// =============================================================================
// decompose_task
// =============================================================================

#[tokio::test]
async fn decompose_returns_service_items() {
    let ai = MockAi::new(vec![Ok(json!(["Book venue", "  Send invites ", ""]))]);
    let items = decompose_task(&ai, "plan party").await;
    assert_eq!(items, ["Book venue", "Send invites"]);
    assert_eq!(ai.calls(), [(AiAction::DecomposeTask, "plan party".to_string())]);
}

#[tokio::test]
async fn decompose_network_failure_uses_fallback() {
    let ai = MockAi::new(vec![Err(AiError::Request("connection refused".into()))]);
    assert_eq!(decompose_task(&ai, "plan party").await, fallback_list());
}

#[tokio::test]
async fn decompose_bad_status_uses_fallback() {
    let ai = MockAi::new(vec![Err(AiError::Status { status: 500, body: String::new() })]);
    assert_eq!(decompose_task(&ai, "x").await, ["Action item 1", "Action item 2"]);
}

#[tokio::test]
async fn decompose_wrong_shape_uses_fallback() {
    for result in [json!("one string"), json!([1, 2]), json!([]), json!(["  "])] {
        let ai = MockAi::new(vec![Ok(result.clone())]);
        assert_eq!(decompose_task(&ai, "x").await, fallback_list(), "{result}");
    }
}

// =============================================================================
// get_pick_suggestion
// =============================================================================

#[tokio::test]
async fn pick_returns_trimmed_suggestion() {
    let ai = MockAi::new(vec![Ok(json!(" Tacos al pastor\n"))]);
    assert_eq!(get_pick_suggestion(&ai, "food").await, "Tacos al pastor");
    assert_eq!(ai.calls()[0].0, AiAction::GetPickSuggestion);
}

#[tokio::test]
async fn pick_failure_uses_fallback() {
    let ai = MockAi::new(vec![Err(AiError::Parse("eof".into()))]);
    assert_eq!(get_pick_suggestion(&ai, "food").await, "Surprise me!");

    let ai = MockAi::new(vec![Ok(json!(["not", "a", "string"]))]);
    assert_eq!(get_pick_suggestion(&ai, "food").await, PICK_FALLBACK);
}

// =============================================================================
// decompose_into_todo
// =============================================================================

#[tokio::test]
async fn sub_tasks_are_appended_to_todo() {
    let ai = Arc::new(MockAi::new(vec![Ok(json!(["a", "b", "c"]))]));
    let state = test_app_state_with_ai(ai.clone());
    let id = {
        let mut store = state.board.write().await;
        let id = store.add_node(WidgetType::Todo, Position::new(0.0, 0.0));
        store.update_node_data(&id, &NodeDataPatch::content(json!([{"id": "x", "text": "existing", "completed": true}])));
        id
    };

    let added = decompose_into_todo(&state, &id, "  plan party ").await.unwrap();
    assert_eq!(added.len(), 3);
    assert_eq!(ai.calls()[0].1, "plan party");

    let store = state.board.read().await;
    let content = store.node(&id).unwrap().content();
    let texts: Vec<&str> = content.as_array().unwrap().iter().map(|i| i["text"].as_str().unwrap()).collect();
    assert_eq!(texts, ["existing", "a", "b", "c"]);
    assert_eq!(content[3]["completed"], false);
}

#[tokio::test]
async fn service_failure_appends_fallback_items() {
    let state = test_app_state_with_ai(Arc::new(MockAi::default()));
    let id = state.board.write().await.add_node(WidgetType::Todo, Position::new(0.0, 0.0));

    let added = decompose_into_todo(&state, &id, "clean garage").await.unwrap();
    let texts: Vec<&str> = added.iter().map(|i| i.text.as_str()).collect();
    assert_eq!(texts, DECOMPOSE_FALLBACK);
}

#[tokio::test]
async fn blank_task_is_rejected_without_calling_service() {
    let ai = Arc::new(MockAi::default());
    let state = test_app_state_with_ai(ai.clone());
    let id = state.board.write().await.add_node(WidgetType::Todo, Position::new(0.0, 0.0));

    assert!(matches!(decompose_into_todo(&state, &id, "   ").await, Err(DecomposeError::EmptyTask)));
    assert!(ai.calls().is_empty());
}

#[tokio::test]
async fn non_todo_target_is_rejected() {
    let state = test_app_state_with_ai(Arc::new(MockAi::default()));
    let id = state.board.write().await.add_node(WidgetType::Note, Position::new(0.0, 0.0));

    let err = decompose_into_todo(&state, &id, "task").await.unwrap_err();
    assert!(matches!(err, DecomposeError::NotTodo { widget_type: WidgetType::Note, .. }));
    assert!(matches!(
        decompose_into_todo(&state, "todo-missing", "task").await,
        Err(DecomposeError::NotFound(_))
    ));
}

#[tokio::test]
async fn corrupt_todo_content_is_reported() {
    let state = test_app_state_with_ai(Arc::new(MockAi::new(vec![Ok(json!(["a"]))])));
    let id = {
        let mut store = state.board.write().await;
        let id = store.add_node(WidgetType::Todo, Position::new(0.0, 0.0));
        store.update_node_data(&id, &NodeDataPatch::content(json!("not a list")));
        id
    };

    assert!(matches!(decompose_into_todo(&state, &id, "task").await, Err(DecomposeError::NotAList { .. })));
}

#[tokio::test]
async fn existing_items_are_kept_verbatim() {
    let state = test_app_state_with_ai(Arc::new(MockAi::new(vec![Ok(json!(["Sub"]))])));
    let existing = json!([
        {"id": "a", "text": "Keep", "completed": true, "priority": "high"},
        {"id": "b", "text": "No flag"}
    ]);
    let id = {
        let mut store = state.board.write().await;
        let id = store.add_node(WidgetType::Todo, Position::new(0.0, 0.0));
        store.update_node_data(&id, &NodeDataPatch::content(existing.clone()));
        id
    };

    let added = decompose_into_todo(&state, &id, "task").await.unwrap();
    assert_eq!(added.len(), 1);

    let store = state.board.read().await;
    let content = store.node(&id).unwrap().content().as_array().unwrap().clone();
    assert_eq!(content.len(), 3);
    assert_eq!(content[0], existing[0]);
    assert_eq!(content[1], existing[1]);
    assert_eq!(content[2]["text"], "Sub");
    assert_eq!(content[2]["completed"], false);
    assert_eq!(content[2]["id"], added[0].id.as_str());
}
