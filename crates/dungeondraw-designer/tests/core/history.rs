use std::sync::Arc;

use dungeondraw_designer::{DungeonState, History, Rect};
use proptest::prelude::*;

use crate::common::fixture;

fn state(mark: u32) -> DungeonState {
    let mut state = DungeonState::start_state();
    state.config.wall_thickness = mark as f64;
    state
}

fn marked(mark: u32) -> Arc<DungeonState> {
    Arc::new(state(mark))
}

fn mark_of(state: &DungeonState) -> u32 {
    state.config.wall_thickness as u32
}

#[derive(Debug, Clone)]
enum HistoryOp {
    Push(u32),
    Back,
    Forward,
    Reset(u32),
}

fn history_op() -> impl Strategy<Value = HistoryOp> {
    prop_oneof![
        4 => (0u32..1000).prop_map(HistoryOp::Push),
        3 => Just(HistoryOp::Back),
        2 => Just(HistoryOp::Forward),
        1 => (0u32..1000).prop_map(HistoryOp::Reset),
    ]
}

proptest! {
    #[test]
    fn history_matches_vec_model(ops in prop::collection::vec(history_op(), 0..60)) {
        let mut history = History::new(state(8));
        let mut model: Vec<u32> = vec![8];
        let mut cursor = 0usize;

        for op in ops {
            match op {
                HistoryOp::Push(mark) => {
                    history.push(marked(mark));
                    model.truncate(cursor + 1);
                    model.push(mark);
                    cursor = model.len() - 1;
                }
                HistoryOp::Back => {
                    let moved = history.step_back();
                    prop_assert_eq!(moved, cursor > 0);
                    cursor = cursor.saturating_sub(1);
                }
                HistoryOp::Forward => {
                    let moved = history.step_forward();
                    prop_assert_eq!(moved, cursor + 1 < model.len());
                    if moved {
                        cursor += 1;
                    }
                }
                HistoryOp::Reset(mark) => {
                    history.reset(marked(mark));
                    model = vec![mark];
                    cursor = 0;
                }
            }

            history.assert_invariants();
            prop_assert!(history.len() >= 1);
            prop_assert!(history.index() < history.len());
            prop_assert_eq!(history.index(), cursor);
            let marks: Vec<u32> = history.states().iter().map(|s| mark_of(s)).collect();
            prop_assert_eq!(&marks, &model);
        }
    }

    #[test]
    fn push_after_undo_truncates(pushes in 2usize..10, back in 1usize..10) {
        let mut history = History::default();
        for mark in 0..pushes {
            history.push(marked(mark as u32));
        }
        let back = back.min(history.len() - 1);
        for _ in 0..back {
            history.step_back();
        }
        let i = history.index();

        history.push(marked(999));

        prop_assert_eq!(history.len(), i + 2);
        prop_assert_eq!(history.index(), i + 1);
    }
}

#[derive(Debug, Clone)]
enum EditOp {
    AddRect(i32, i32, i32, i32),
    Cut(i32, i32, i32, i32),
    Door(i32, i32, i32, i32),
    CutDoors(i32, i32, i32, i32),
    Undo,
    Redo,
    Clear,
}

fn edit_op() -> impl Strategy<Value = EditOp> {
    let span = || (0i32..50, 0i32..50, 0i32..30, 0i32..30);
    prop_oneof![
        3 => span().prop_map(|(x, y, w, h)| EditOp::AddRect(x, y, w, h)),
        2 => span().prop_map(|(x, y, w, h)| EditOp::Cut(x, y, w, h)),
        2 => span().prop_map(|(a, b, c, d)| EditOp::Door(a, b, c, d)),
        1 => span().prop_map(|(x, y, w, h)| EditOp::CutDoors(x, y, w, h)),
        3 => Just(EditOp::Undo),
        2 => Just(EditOp::Redo),
        1 => Just(EditOp::Clear),
    ]
}

fn rect(x: i32, y: i32, w: i32, h: i32) -> Rect {
    Rect::new(x as f64, y as f64, w as f64, h as f64)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn controller_keeps_history_invariants(ops in prop::collection::vec(edit_op(), 0..16)) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        runtime.block_on(async {
            let mut fx = fixture();
            for op in ops {
                let c = &mut fx.controller;
                match op {
                    EditOp::AddRect(x, y, w, h) => { c.add_rectangle(rect(x, y, w, h)).await.unwrap(); }
                    EditOp::Cut(x, y, w, h) => { c.subtract_rectangle(rect(x, y, w, h)).await.unwrap(); }
                    EditOp::Door(x1, y1, x2, y2) => {
                        c.add_door(x1 as f64, y1 as f64, x2 as f64, y2 as f64).await.unwrap();
                    }
                    EditOp::CutDoors(x, y, w, h) => { c.subtract_doors(rect(x, y, w, h)).await.unwrap(); }
                    EditOp::Undo => { c.undo().await.unwrap(); }
                    EditOp::Redo => { c.redo().await.unwrap(); }
                    EditOp::Clear => { c.delete_all().await.unwrap(); }
                }

                fx.controller.history().assert_invariants();
                assert!(fx.controller.history_len() >= 1);
                assert!(fx.controller.history_index() < fx.controller.history_len());

                if fx.store.peek(fx.controller.document()).is_some() {
                    let stored = DungeonState::load_from_document(
                        fx.store.as_ref(),
                        fx.controller.document(),
                    )
                    .await
                    .unwrap();
                    assert_eq!(&stored, fx.controller.state().as_ref());
                }
            }
        });
    }
}
