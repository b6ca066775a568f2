#![allow(clippy::float_cmp)]

use board::node::{Position, WidgetType};

use super::*;
use crate::state::test_helpers::test_app_state;

const FRAME: Duration = Duration::from_millis(16);

async fn seed(state: &AppState, count: usize) {
    let mut store = state.board.write().await;
    for i in 0..count {
        #[allow(clippy::cast_precision_loss)]
        let offset = i as f64 * 97.0;
        store.add_node(WidgetType::Todo, Position::new(offset, -offset));
    }
}

async fn positions(state: &AppState) -> Vec<Position> {
    state.board.read().await.nodes().iter().map(|n| n.position).collect()
}

#[tokio::test(start_paused = true)]
async fn empty_board_is_a_no_op() {
    let state = test_app_state();
    assert_eq!(animate(&state, FRAME).await, TidyOutcome::Empty);
    assert_eq!(instant(&state).await, TidyOutcome::Empty);
}

#[tokio::test(start_paused = true)]
async fn animation_lands_on_grid_after_duration() {
    let state = test_app_state();
    seed(&state, 4).await;

    let started = tokio::time::Instant::now();
    let outcome = animate(&state, FRAME).await;

    let TidyOutcome::Finished { frames } = outcome else {
        panic!("expected finished, got {outcome:?}");
    };
    // 800ms at 16ms per frame, plus the immediate first tick.
    assert!(frames >= 50, "only {frames} frames");
    assert!(started.elapsed() >= Duration::from_millis(800));
    assert_eq!(
        positions(&state).await,
        [
            Position::new(-310.0, -290.0),
            Position::new(10.0, -290.0),
            Position::new(-310.0, 10.0),
            Position::new(10.0, 10.0),
        ]
    );
    assert!(!state.board.read().await.is_animating());
}

#[tokio::test(start_paused = true)]
async fn positions_move_between_frames() {
    let state = test_app_state();
    seed(&state, 2).await;
    let before = positions(&state).await;

    let handle = start(&state).await.unwrap();
    let driver = {
        let state = state.clone();
        tokio::spawn(async move { drive(&state, handle, FRAME).await })
    };
    tokio::time::sleep(Duration::from_millis(400)).await;
    let mid = positions(&state).await;
    assert_ne!(mid, before);

    assert!(matches!(driver.await.unwrap(), TidyOutcome::Finished { .. }));
    assert_ne!(positions(&state).await, mid);
}

#[tokio::test(start_paused = true)]
async fn second_tidy_supersedes_first_driver() {
    let state = test_app_state();
    seed(&state, 3).await;

    let first = start(&state).await.unwrap();
    let first_driver = {
        let state = state.clone();
        tokio::spawn(async move { drive(&state, first, FRAME).await })
    };
    tokio::time::sleep(Duration::from_millis(200)).await;

    let outcome = animate(&state, FRAME).await;
    assert!(matches!(outcome, TidyOutcome::Finished { .. }));
    assert!(matches!(first_driver.await.unwrap(), TidyOutcome::Interrupted { .. }));
}

#[tokio::test(start_paused = true)]
async fn cancel_interrupts_driver() {
    let state = test_app_state();
    seed(&state, 2).await;

    let handle = start(&state).await.unwrap();
    let driver = {
        let state = state.clone();
        tokio::spawn(async move { drive(&state, handle, FRAME).await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(state.board.write().await.cancel_animation(handle));

    assert!(matches!(driver.await.unwrap(), TidyOutcome::Interrupted { .. }));
}

#[tokio::test]
async fn instant_writes_final_positions() {
    let state = test_app_state();
    seed(&state, 1).await;
    assert_eq!(instant(&state).await, TidyOutcome::Finished { frames: 1 });
    assert_eq!(positions(&state).await, [Position::new(-150.0, -140.0)]);
}
