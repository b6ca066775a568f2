//! Board subcommands. Each handler runs against the shared state and
//! returns the text to print on stdout.

use std::path::{Path, PathBuf};

use board::change::NodeChange;
use board::content::WidgetContent;
use board::node::{Dimensions, Node, NodeDataPatch, Position, WidgetType};
use clap::Subcommand;
use serde_json::Value;
use tracing::info;

use crate::CliError;
use crate::config::AppConfig;
use crate::services::{ai, tidy};
use crate::state::AppState;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every node with a content summary.
    List,
    /// Print one node as JSON.
    Show { id: String },
    /// Add a widget with its default content.
    Add {
        widget_type: WidgetType,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        y: f64,
    },
    Remove { id: String },
    Move {
        id: String,
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
    },
    Resize {
        id: String,
        #[arg(long)]
        width: f64,
        #[arg(long)]
        height: f64,
    },
    /// Mark a node selected. Selection is never persisted.
    Select {
        id: String,
        #[arg(long)]
        off: bool,
    },
    /// Apply a JSON array of change descriptors from a file, or stdin for `-`.
    Apply { file: Option<PathBuf> },
    /// Replace a node's content, validated against its widget type.
    SetContent {
        id: String,
        json: String,
        #[arg(long)]
        force: bool,
    },
    /// Arrange every node in a centred grid.
    Tidy {
        #[arg(long)]
        instant: bool,
    },
    /// Toggle between light and dark.
    Theme,
    /// Write the node list to a timestamped JSON file.
    Export {
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Append AI-generated sub-tasks to a todo list.
    Decompose { todo_id: String, task: String },
    /// Ask the AI for one pick in a category.
    Suggest { category: String },
}

/// Run `command` and return its stdout text.
///
/// # Errors
///
/// Returns an error for unknown node ids, unreadable or invalid input, and
/// failed exports.
pub async fn run(state: &AppState, config: &AppConfig, command: Command) -> Result<String, CliError> {
    match command {
        Command::List => Ok(list(state).await),
        Command::Show { id } => {
            let store = state.board.read().await;
            let node = store.node(&id).ok_or(CliError::NodeNotFound(id))?;
            Ok(serde_json::to_string_pretty(node)?)
        }
        Command::Add { widget_type, x, y } => {
            let id = state.board.write().await.add_node(widget_type, Position::new(x, y));
            info!(%id, "cli: node added");
            Ok(id)
        }
        Command::Remove { id } => {
            if !state.board.write().await.remove_node(&id) {
                return Err(CliError::NodeNotFound(id));
            }
            Ok(format!("removed {id}"))
        }
        Command::Move { id, x, y } => {
            apply_one(state, NodeChange::moved(id.clone(), Position::new(x, y))).await?;
            Ok(format!("moved {id} to ({x}, {y})"))
        }
        Command::Resize { id, width, height } => {
            apply_one(state, NodeChange::resized(id.clone(), Dimensions::new(width, height))).await?;
            Ok(format!("resized {id} to {width}x{height}"))
        }
        Command::Select { id, off } => {
            apply_one(state, NodeChange::selected(id.clone(), !off)).await?;
            Ok(format!("{} {id}", if off { "deselected" } else { "selected" }))
        }
        Command::Apply { file } => {
            let raw = read_input(file.as_deref())?;
            let changes: Vec<NodeChange> = serde_json::from_str(&raw)?;
            state.board.write().await.on_nodes_change(&changes);
            Ok(format!("applied {} changes", changes.len()))
        }
        Command::SetContent { id, json, force } => set_content(state, &id, &json, force).await,
        Command::Tidy { instant } => {
            let outcome = if instant {
                tidy::instant(state).await
            } else {
                tidy::animate(state, config.frame_interval).await
            };
            Ok(match outcome {
                tidy::TidyOutcome::Empty => "board is empty".to_string(),
                tidy::TidyOutcome::Finished { frames } => {
                    format!("arranged {} nodes in {frames} frames", state.board.read().await.len())
                }
                tidy::TidyOutcome::Interrupted { frames } => format!("tidy interrupted after {frames} frames"),
            })
        }
        Command::Theme => Ok(state.board.write().await.toggle_theme().to_string()),
        Command::Export { out_dir } => {
            let artifact = state.board.read().await.export_board()?;
            let path = artifact.write_to(&out_dir)?;
            Ok(path.display().to_string())
        }
        Command::Decompose { todo_id, task } => {
            let added = ai::decompose_into_todo(state, &todo_id, &task).await?;
            Ok(added.iter().map(|item| format!("+ {}", item.text)).collect::<Vec<_>>().join("\n"))
        }
        Command::Suggest { category } => Ok(ai::get_pick_suggestion(state.ai.as_ref(), &category).await),
    }
}

async fn list(state: &AppState) -> String {
    let store = state.board.read().await;
    let mut lines = vec![format!("theme: {}, {} nodes", store.theme(), store.len())];
    for node in store.nodes() {
        let size = node.effective_size();
        lines.push(format!(
            "{:<28} {:<12} ({:.0}, {:.0}) {:.0}x{:.0}  {}",
            node.id,
            node.widget_type(),
            node.position.x,
            node.position.y,
            size.width,
            size.height,
            summary(node)
        ));
    }
    lines.join("\n")
}

fn summary(node: &Node) -> String {
    WidgetContent::parse(node.widget_type(), node.content())
        .map_or_else(|_| "invalid content".to_string(), |content| content.to_string())
}

/// Single-change batch against a node that must exist.
async fn apply_one(state: &AppState, change: NodeChange) -> Result<(), CliError> {
    let mut store = state.board.write().await;
    if store.node(change.id()).is_none() {
        return Err(CliError::NodeNotFound(change.id().to_string()));
    }
    store.on_nodes_change(&[change]);
    Ok(())
}

async fn set_content(state: &AppState, id: &str, raw: &str, force: bool) -> Result<String, CliError> {
    let value: Value = serde_json::from_str(raw)?;
    let mut store = state.board.write().await;
    let widget_type = store.node(id).ok_or_else(|| CliError::NodeNotFound(id.to_string()))?.widget_type().clone();
    if !force {
        WidgetContent::parse(&widget_type, &value).map_err(|source| CliError::ContentRejected { source })?;
    }
    store.update_node_data(id, &NodeDataPatch::content(value));
    Ok(format!("updated {id}"))
}

fn read_input(file: Option<&Path>) -> Result<String, CliError> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .map_err(|source| CliError::Read { path: path.display().to_string(), source }),
        _ => std::io::read_to_string(std::io::stdin()).map_err(|source| CliError::Read { path: "-".into(), source }),
    }
}

#[cfg(test)]
#[path = "commands_test.rs"]
mod tests;
