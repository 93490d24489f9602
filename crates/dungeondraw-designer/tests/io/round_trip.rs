use dungeondraw_core::{ActorId, DocumentId, DocumentStore, FileDocumentStore, MemoryDocumentStore};
use dungeondraw_designer::{
    rect_to_polygon, DungeonPayload, DungeonState, Door, Region, RegionPolygon, Point, Rect,
    PAYLOAD_VERSION,
};
use dungeondraw_settings::{theme, themes, StyleConfig};
use proptest::prelude::*;
use tempfile::TempDir;

fn room_with_pillar() -> DungeonState {
    let room = rect_to_polygon(&Rect::new(0.0, 0.0, 100.0, 60.0));
    let pillar = rect_to_polygon(&Rect::new(40.0, 20.0, 10.0, 10.0));
    let annex = rect_to_polygon(&Rect::new(150.0, 0.0, 30.0, 30.0));
    DungeonState {
        region: room.difference(&pillar).union(&annex),
        doors: vec![
            Door::new(100.0, 10.0, 100.0, 20.0),
            Door::new(0.0, 30.0, 0.0, 40.0),
            Door::new(0.0, 30.0, 0.0, 40.0),
        ],
        config: theme("moldvayBlue").unwrap().config(),
    }
}

#[test]
fn test_json_round_trip_with_holes() {
    let state = room_with_pillar();
    assert!(state.region.polygons().iter().any(|p| !p.holes.is_empty()));

    let json = state.to_json(Some(&ActorId::new("gm"))).unwrap();
    let loaded = DungeonState::from_json(&json).unwrap();

    assert_eq!(loaded, state);
}

#[test]
fn test_payload_sections() {
    let json = room_with_pillar().to_json(None).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["version"], PAYLOAD_VERSION);
    assert!(value["geometry"].is_array());
    assert_eq!(value["doors"][0], serde_json::json!([100.0, 10.0, 100.0, 20.0]));
    assert_eq!(value["config"]["wallColor"], "#3A9FF2");
    assert!(value["metadata"]["savedAt"].is_string());
}

#[test]
fn test_empty_state_has_null_geometry() {
    let json = DungeonState::start_state().to_json(None).unwrap();
    let payload = DungeonPayload::from_json(&json).unwrap();
    assert!(payload.geometry.is_none());
    assert_eq!(
        DungeonState::from_json(&json).unwrap(),
        DungeonState::start_state()
    );
}

#[test]
fn test_partial_config_is_filled_from_defaults() {
    let json = r#"{"version":1,"geometry":null,"doors":[],"config":{"wallThickness":3}}"#;
    let state = DungeonState::from_json(json).unwrap();
    assert_eq!(state.config.wall_thickness, 3.0);
    assert_eq!(state.config.floor_color, StyleConfig::default().floor_color);
}

#[test]
fn test_every_theme_round_trips() {
    for preset in themes() {
        let state = DungeonState::with_config(preset.config());
        let loaded = DungeonState::from_json(&state.to_json(None).unwrap()).unwrap();
        assert_eq!(loaded, state, "theme {}", preset.key);
    }
}

#[tokio::test]
async fn test_file_store_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = FileDocumentStore::open(dir.path()).unwrap();
    let doc = DocumentId::new("level-1");
    let state = room_with_pillar();

    state
        .save_to_document(&store, &doc, &ActorId::new("gm"))
        .await
        .unwrap();
    let loaded = DungeonState::load_from_document(&store, &doc).await.unwrap();

    assert_eq!(loaded, state);
}

#[tokio::test]
async fn test_unreadable_snapshot_never_reaches_the_store() {
    let store = MemoryDocumentStore::new();
    let doc = DocumentId::new("nan");
    let mut state = room_with_pillar();
    state.doors.push(Door::new(0.0, f64::NAN, 5.0, 5.0));

    let err = state
        .save_to_document(&store, &doc, &ActorId::new("gm"))
        .await
        .unwrap_err();

    assert!(err.is_corrupt_state());
    assert!(store.get(&doc).await.unwrap().is_none());
}

fn arb_rect_polygon() -> impl Strategy<Value = RegionPolygon> {
    (-1e4f64..1e4, -1e4f64..1e4, 0.5f64..500.0, 0.5f64..500.0).prop_map(|(x, y, w, h)| {
        RegionPolygon::new(vec![
            Point::new(x, y),
            Point::new(x + w, y),
            Point::new(x + w, y + h),
            Point::new(x, y + h),
        ])
    })
}

fn arb_state() -> impl Strategy<Value = DungeonState> {
    (
        prop::collection::vec(arb_rect_polygon(), 0..5),
        prop::collection::vec(prop::array::uniform4(-1e4f64..1e4), 0..8),
        0.0f64..100.0,
        0.0f64..=1.0,
    )
        .prop_map(|(polygons, doors, thickness, opacity)| {
            let mut config = StyleConfig::default();
            config.wall_thickness = thickness;
            config.exterior_shadow_opacity = opacity;
            DungeonState {
                region: Region::from_polygons(polygons),
                doors: doors.into_iter().map(Door::from).collect(),
                config,
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn load_of_save_is_identity(state in arb_state()) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let store = MemoryDocumentStore::new();
        let doc = DocumentId::new("prop");

        let loaded = runtime.block_on(async {
            state.save_to_document(&store, &doc, &ActorId::new("p")).await.unwrap();
            DungeonState::load_from_document(&store, &doc).await.unwrap()
        });

        prop_assert_eq!(loaded, state);
    }
}
