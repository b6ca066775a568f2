//! AI service: task decomposition and pick suggestions with fixed fallbacks.
//!
//! DESIGN
//! ======
//! Every failure of the external service (transport, status, body shape)
//! is logged and replaced by a fixed fallback, so callers always get a
//! usable value. Only board-side problems (unknown node, wrong widget,
//! todo content that is not a list) surface as errors from
//! [`decompose_into_todo`].
//!
//! Sub-tasks are appended to the todo list's raw JSON array. Existing
//! entries are left exactly as stored, unknown fields included.

use board::content::TodoItem;
use board::node::{NodeDataPatch, WidgetType};
use serde_json::Value;
use tracing::{info, warn};

use crate::ai::{AiAction, AiError, AiTransport};
use crate::state::AppState;

pub const DECOMPOSE_FALLBACK: [&str; 2] = ["Action item 1", "Action item 2"];
pub const PICK_FALLBACK: &str = "Surprise me!";

#[derive(Debug, thiserror::Error)]
pub enum DecomposeError {
    #[error("task description is empty")]
    EmptyTask,
    #[error("no node with id {0}")]
    NotFound(String),
    #[error("node {id} is a {widget_type} widget, not a todo list")]
    NotTodo { id: String, widget_type: WidgetType },
    #[error("todo list {id} does not hold a list of items")]
    NotAList { id: String },
    #[error("encoding todo item failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Ask the service to split `task` into sub-tasks.
///
/// Never fails: any service problem yields [`DECOMPOSE_FALLBACK`].
pub async fn decompose_task(ai: &dyn AiTransport, task: &str) -> Vec<String> {
    match ai.call(AiAction::DecomposeTask, task).await.and_then(sub_tasks) {
        Ok(items) => items,
        Err(e) => {
            warn!(error = %e, "ai: decomposition failed, using fallback");
            DECOMPOSE_FALLBACK.iter().map(ToString::to_string).collect()
        }
    }
}

/// Ask the service for one pick in `category`.
///
/// Never fails: any service problem yields [`PICK_FALLBACK`].
pub async fn get_pick_suggestion(ai: &dyn AiTransport, category: &str) -> String {
    match ai.call(AiAction::GetPickSuggestion, category).await.and_then(pick) {
        Ok(suggestion) => suggestion,
        Err(e) => {
            warn!(error = %e, "ai: pick suggestion failed, using fallback");
            PICK_FALLBACK.to_string()
        }
    }
}

/// Decompose `task` and append the sub-tasks to the todo list `todo_id`.
///
/// Returns the items that were added.
///
/// # Errors
///
/// Returns an error if `task` is blank, the node is missing or not a todo
/// list, or its current content is not a JSON array.
pub async fn decompose_into_todo(state: &AppState, todo_id: &str, task: &str) -> Result<Vec<TodoItem>, DecomposeError> {
    let task = task.trim();
    if task.is_empty() {
        return Err(DecomposeError::EmptyTask);
    }
    ensure_todo(&*state.board.read().await, todo_id)?;

    // The lock is not held across the service call.
    let sub_tasks = decompose_task(state.ai.as_ref(), task).await;
    let added: Vec<TodoItem> = sub_tasks.into_iter().map(TodoItem::new).collect();

    let mut store = state.board.write().await;
    let node = ensure_todo(&store, todo_id)?;
    let Value::Array(mut entries) = node.content().clone() else {
        return Err(DecomposeError::NotAList { id: todo_id.to_string() });
    };
    for item in &added {
        entries.push(serde_json::to_value(item)?);
    }
    store.update_node_data(todo_id, &NodeDataPatch::content(Value::Array(entries)));
    info!(id = %todo_id, added = added.len(), "ai: sub-tasks appended");
    Ok(added)
}

fn ensure_todo<'a>(store: &'a board::store::BoardStore, id: &str) -> Result<&'a board::node::Node, DecomposeError> {
    let node = store.node(id).ok_or_else(|| DecomposeError::NotFound(id.to_string()))?;
    match node.widget_type() {
        WidgetType::Todo => Ok(node),
        widget_type => Err(DecomposeError::NotTodo { id: id.to_string(), widget_type: widget_type.clone() }),
    }
}

/// Non-empty trimmed strings from a `decomposeTask` result.
fn sub_tasks(result: Value) -> Result<Vec<String>, AiError> {
    let unexpected = |detail: &str| AiError::UnexpectedResult { action: AiAction::DecomposeTask, detail: detail.into() };
    let Value::Array(entries) = result else {
        return Err(unexpected("expected a list"));
    };
    let mut items = Vec::with_capacity(entries.len());
    for entry in entries {
        let Value::String(text) = entry else {
            return Err(unexpected("expected only strings"));
        };
        let text = text.trim();
        if !text.is_empty() {
            items.push(text.to_string());
        }
    }
    if items.is_empty() {
        return Err(unexpected("no sub-tasks"));
    }
    Ok(items)
}

fn pick(result: Value) -> Result<String, AiError> {
    match result {
        Value::String(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(AiError::UnexpectedResult {
            action: AiAction::GetPickSuggestion,
            detail: "expected a non-empty string".into(),
        }),
    }
}

#[cfg(test)]
#[path = "ai_test.rs"]
mod tests;
