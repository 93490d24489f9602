use std::sync::Arc;

use dungeondraw_core::DocumentStore;
use dungeondraw_designer::{DungeonState, Point, Rect};
use dungeondraw_settings::{theme, StyleConfig};

use crate::common::{approx, fixture, Fixture};

async fn stored_state(fx: &Fixture) -> DungeonState {
    DungeonState::load_from_document(fx.store.as_ref(), fx.controller.document())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_example_scenario() {
    let Fixture { mut controller, .. } = fixture();
    assert_eq!(controller.history_len(), 1);
    assert!(controller.state().region.is_empty());
    assert!(controller.state().doors.is_empty());

    controller
        .add_rectangle(Rect::new(0.0, 0.0, 100.0, 100.0))
        .await
        .unwrap();
    assert_eq!(controller.history_len(), 2);
    assert!(approx(controller.state().region.area(), 10000.0));

    controller.add_door(50.0, 0.0, 50.0, 10.0).await.unwrap();
    assert_eq!(controller.history_len(), 3);
    assert_eq!(controller.state().doors.len(), 1);

    controller.undo().await.unwrap();
    assert_eq!(controller.history_len(), 3);
    assert_eq!(controller.history_index(), 1);
    assert_eq!(controller.state().doors.len(), 0);

    controller
        .add_rectangle(Rect::new(200.0, 0.0, 50.0, 50.0))
        .await
        .unwrap();
    assert_eq!(controller.history_len(), 3);
    assert_eq!(controller.history_index(), 2);
    assert!(approx(controller.state().region.area(), 12500.0));
    assert!(controller.state().doors.is_empty());
    controller.history().assert_invariants();
}

#[tokio::test]
async fn test_branch_truncation() {
    let Fixture { mut controller, .. } = fixture();
    for i in 0..4 {
        controller
            .add_door(i as f64, 0.0, i as f64, 5.0)
            .await
            .unwrap();
    }
    assert_eq!(controller.history_len(), 5);

    controller.undo().await.unwrap();
    controller.undo().await.unwrap();
    let i = controller.history_index();
    assert_eq!(i, 2);

    controller.set_config(theme("wood").unwrap().config()).await.unwrap();

    assert_eq!(controller.history_len(), i + 2);
    assert_eq!(controller.history_index(), i + 1);
    assert!(!controller.can_redo());
    assert_eq!(controller.state().doors.len(), 2);
}

#[tokio::test]
async fn test_undo_redo_restores_same_snapshot() {
    let Fixture { mut controller, .. } = fixture();
    controller
        .add_rectangle(Rect::new(0.0, 0.0, 10.0, 10.0))
        .await
        .unwrap();
    controller.add_door(0.0, 5.0, 2.0, 5.0).await.unwrap();
    let before = Arc::clone(controller.state());
    let index = controller.history_index();

    assert!(controller.undo().await.unwrap());
    assert!(controller.redo().await.unwrap());

    assert_eq!(controller.history_index(), index);
    assert!(Arc::ptr_eq(controller.state(), &before));
    assert_eq!(controller.history_len(), 3);
}

#[tokio::test]
async fn test_boundary_clamps_are_silent() {
    let Fixture {
        mut controller,
        store,
        renderer,
    } = fixture();

    assert!(!controller.undo().await.unwrap());
    assert!(!controller.redo().await.unwrap());
    assert_eq!(controller.history_index(), 0);
    assert_eq!(renderer.frame_count(), 0);
    assert!(store.is_empty());

    controller.add_door(1.0, 1.0, 2.0, 2.0).await.unwrap();
    let frames = renderer.frame_count();
    assert!(!controller.redo().await.unwrap());
    assert_eq!(renderer.frame_count(), frames);
    assert_eq!(controller.history_index(), 1);
}

#[tokio::test]
async fn test_every_transition_persists_and_renders() {
    let mut fx = fixture();

    fx.controller
        .add_rectangle(Rect::new(0.0, 0.0, 40.0, 40.0))
        .await
        .unwrap();
    assert_eq!(stored_state(&fx).await, **fx.controller.state());

    fx.controller.add_door(0.0, 10.0, 0.0, 20.0).await.unwrap();
    assert_eq!(stored_state(&fx).await, **fx.controller.state());

    fx.controller.undo().await.unwrap();
    assert_eq!(stored_state(&fx).await, **fx.controller.state());
    assert!(stored_state(&fx).await.doors.is_empty());

    fx.controller.redo().await.unwrap();
    assert_eq!(stored_state(&fx).await.doors.len(), 1);

    assert_eq!(fx.renderer.frame_count(), 4);
    assert_eq!(fx.renderer.last_frame().unwrap(), **fx.controller.state());
}

#[tokio::test]
async fn test_subtract_rectangle_no_ops() {
    let Fixture { mut controller, .. } = fixture();

    let cut = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(!controller.subtract_rectangle(cut).await.unwrap());
    assert_eq!(controller.history_len(), 1);

    controller
        .add_rectangle(Rect::new(0.0, 0.0, 100.0, 100.0))
        .await
        .unwrap();
    let disjoint = Rect::new(500.0, 500.0, 10.0, 10.0);
    assert!(!controller.subtract_rectangle(disjoint).await.unwrap());
    assert_eq!(controller.history_len(), 2);

    // Sharing only an edge is not an overlap
    let adjacent = Rect::new(100.0, 0.0, 10.0, 10.0);
    assert!(!controller.subtract_rectangle(adjacent).await.unwrap());
    assert_eq!(controller.history_len(), 2);
}

#[tokio::test]
async fn test_subtract_rectangle_cuts_floor() {
    let Fixture { mut controller, .. } = fixture();
    controller
        .add_rectangle(Rect::new(0.0, 0.0, 100.0, 100.0))
        .await
        .unwrap();

    assert!(controller
        .subtract_rectangle(Rect::new(90.0, 0.0, 20.0, 100.0))
        .await
        .unwrap());

    assert_eq!(controller.history_len(), 3);
    assert!(approx(controller.state().region.area(), 9000.0));
}

#[tokio::test]
async fn test_degenerate_rectangle_is_ignored() {
    let Fixture { mut controller, .. } = fixture();
    assert!(!controller
        .add_rectangle(Rect::new(10.0, 10.0, 0.0, 50.0))
        .await
        .unwrap());
    assert!(!controller
        .add_rectangle(Rect::new(10.0, 10.0, 50.0, -5.0))
        .await
        .unwrap());
    assert_eq!(controller.history_len(), 1);
}

#[tokio::test]
async fn test_subtract_doors() {
    let Fixture { mut controller, .. } = fixture();
    controller.add_door(10.0, 10.0, 20.0, 10.0).await.unwrap();
    controller.add_door(50.0, 50.0, 60.0, 50.0).await.unwrap();
    controller.add_door(90.0, 90.0, 95.0, 95.0).await.unwrap();
    assert_eq!(controller.history_len(), 4);

    assert!(!controller
        .subtract_doors(Rect::new(200.0, 200.0, 5.0, 5.0))
        .await
        .unwrap());
    assert_eq!(controller.history_len(), 4);

    assert!(controller
        .subtract_doors(Rect::new(45.0, 45.0, 20.0, 20.0))
        .await
        .unwrap());
    assert_eq!(controller.history_len(), 5);
    let doors = &controller.state().doors;
    assert_eq!(doors.len(), 2);
    assert_eq!(doors[0].x1, 10.0);
    assert_eq!(doors[1].x1, 90.0);
}

#[tokio::test]
async fn test_duplicate_doors_are_kept() {
    let Fixture { mut controller, .. } = fixture();
    controller.add_door(1.0, 1.0, 1.0, 3.0).await.unwrap();
    controller.add_door(1.0, 1.0, 1.0, 3.0).await.unwrap();
    assert_eq!(controller.state().doors.len(), 2);
}

#[tokio::test]
async fn test_add_polygon() {
    let Fixture { mut controller, .. } = fixture();
    let triangle = [
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(0.0, 10.0),
    ];
    assert!(controller.add_polygon(&triangle).await.unwrap());
    assert!(approx(controller.state().region.area(), 50.0));
    assert_eq!(controller.history_len(), 2);
}

#[tokio::test]
async fn test_invalid_polygon_leaves_history_alone() {
    let Fixture {
        mut controller,
        renderer,
        ..
    } = fixture();
    let bowtie = [
        Point::new(0.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(10.0, 0.0),
        Point::new(0.0, 10.0),
    ];

    assert!(!controller.add_polygon(&bowtie).await.unwrap());
    assert!(!controller
        .add_polygon(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)])
        .await
        .unwrap());

    assert_eq!(controller.history_len(), 1);
    assert_eq!(renderer.frame_count(), 0);
}

#[tokio::test]
async fn test_set_config() {
    let Fixture { mut controller, .. } = fixture();
    let metal = theme("metal").unwrap().config();
    controller.set_config(metal.clone()).await.unwrap();
    assert_eq!(controller.state().config, metal);
    assert_eq!(controller.history_len(), 2);
    controller.undo().await.unwrap();
    assert_eq!(controller.state().config, StyleConfig::default());
}

#[tokio::test]
async fn test_non_finite_door_is_rejected() {
    let fx = fixture();
    let mut controller = fx.controller;
    controller
        .add_rectangle(Rect::new(0.0, 0.0, 100.0, 100.0))
        .await
        .unwrap();
    let stored = fx.store.get(controller.document()).await.unwrap();
    let frames = fx.renderer.frame_count();

    for door in [
        [f64::NAN, 0.0, 10.0, 10.0],
        [0.0, f64::INFINITY, 10.0, 10.0],
        [0.0, 0.0, 10.0, f64::NEG_INFINITY],
    ] {
        let err = controller
            .add_door(door[0], door[1], door[2], door[3])
            .await
            .unwrap_err();
        assert!(err.is_invalid_shape());
    }

    assert_eq!(controller.history_len(), 2);
    assert!(controller.state().doors.is_empty());
    assert_eq!(fx.renderer.frame_count(), frames);
    assert_eq!(fx.store.get(controller.document()).await.unwrap(), stored);
}

#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let fx = fixture();
    let mut controller = fx.controller;
    controller
        .add_rectangle(Rect::new(0.0, 0.0, 100.0, 100.0))
        .await
        .unwrap();
    let stored = fx.store.get(controller.document()).await.unwrap();

    let mut infinite = StyleConfig::default();
    infinite.wall_thickness = f64::INFINITY;
    let mut nan_opacity = StyleConfig::default();
    nan_opacity.scene_grid_opacity = f64::NAN;

    for config in [infinite, nan_opacity] {
        assert!(controller.set_config(config).await.is_err());
    }

    assert_eq!(controller.history_len(), 2);
    assert_eq!(controller.state().config, StyleConfig::default());
    assert_eq!(fx.store.get(controller.document()).await.unwrap(), stored);

    let reloaded = DungeonState::load_from_document(fx.store.as_ref(), controller.document())
        .await
        .unwrap();
    assert!(approx(reloaded.region.area(), 10000.0));
}

#[tokio::test]
async fn test_delete_all_keeps_config() {
    let mut fx = fixture();
    let metal = theme("metal").unwrap().config();
    fx.controller.set_config(metal.clone()).await.unwrap();
    fx.controller
        .add_rectangle(Rect::new(0.0, 0.0, 30.0, 30.0))
        .await
        .unwrap();
    fx.controller.add_door(0.0, 0.0, 0.0, 5.0).await.unwrap();

    fx.controller.delete_all().await.unwrap();

    assert_eq!(fx.controller.history_len(), 1);
    assert_eq!(fx.controller.history_index(), 0);
    assert!(fx.controller.state().region.is_empty());
    assert!(fx.controller.state().doors.is_empty());
    assert_eq!(fx.controller.state().config, metal);
    assert!(!fx.controller.can_undo());
    assert_eq!(stored_state(&fx).await, **fx.controller.state());
}

#[tokio::test]
async fn test_load_replaces_history() {
    let mut fx = fixture();
    fx.controller
        .add_rectangle(Rect::new(0.0, 0.0, 30.0, 30.0))
        .await
        .unwrap();
    fx.controller.add_door(0.0, 0.0, 0.0, 5.0).await.unwrap();
    let saved = Arc::clone(fx.controller.state());

    fx.controller.load_from_journal_entry().await.unwrap();

    assert_eq!(fx.controller.history_len(), 1);
    assert_eq!(fx.controller.history_index(), 0);
    assert_eq!(**fx.controller.state(), *saved);
}

#[tokio::test]
async fn test_load_recovers_from_corrupt_payload() {
    let mut fx = fixture();
    fx.controller.add_door(0.0, 0.0, 0.0, 5.0).await.unwrap();
    fx.store
        .insert_raw(fx.controller.document().clone(), "{ definitely not json");

    fx.controller.load_from_journal_entry().await.unwrap();

    assert_eq!(fx.controller.history_len(), 1);
    assert_eq!(**fx.controller.state(), DungeonState::start_state());
}

#[tokio::test]
async fn test_load_from_empty_store_gives_start_state() {
    let Fixture {
        mut controller,
        renderer,
        ..
    } = fixture();
    controller.load_from_journal_entry().await.unwrap();
    assert_eq!(**controller.state(), DungeonState::start_state());
    assert_eq!(renderer.frame_count(), 1);
}
