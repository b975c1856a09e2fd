//! Session integration tests through the public API.

use rust_2048::core::Tile;
use rust_2048::session::{JsonFileStore, MemoryStore, ScoreStore, ScriptedSpawner};
use rust_2048::{
    Direction, EngineConfig, GameRng, Grid, InputEvent, MoveOutcome, Rejection, Session, Status,
};

fn twos() -> ScriptedSpawner {
    ScriptedSpawner::default()
}

fn resume(values: [[u32; 4]; 4], score: u64) -> Session<MemoryStore, ScriptedSpawner> {
    Session::resume(EngineConfig::new(), Grid::from_values(values), score, MemoryStore::new(), twos())
        .unwrap()
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_fresh_session() {
    let session = Session::new(MemoryStore::new(), GameRng::new(42));

    assert_eq!(session.grid().tile_count(), 2);
    assert_eq!(session.score(), 0);
    assert_eq!(session.high_score(), 0);
    assert!(!session.is_game_over());
    assert!(!session.has_won());
    for (_, tile) in session.grid().tiles() {
        assert!(tile == Tile::TWO || tile == Tile::FOUR);
    }
}

#[test]
fn test_same_seed_same_game() {
    let mut a = Session::new(MemoryStore::new(), GameRng::new(99));
    let mut b = Session::new(MemoryStore::new(), GameRng::new(99));

    for direction in [Direction::Left, Direction::Up, Direction::Right, Direction::Down].repeat(10) {
        assert_eq!(a.make_move(direction), b.make_move(direction));
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_two_step_merge_scenario() {
    // First spawn goes to the last empty cell, (3,3), away from row 0.
    let spawner = ScriptedSpawner::new([(13, Tile::TWO)]);
    let mut session = Session::resume(
        EngineConfig::new(),
        Grid::from_values([[2, 2, 4, 0], [0; 4], [0; 4], [0; 4]]),
        0,
        MemoryStore::new(),
        spawner,
    )
    .unwrap();

    let first = session.make_move(Direction::Left);
    assert_eq!(first.gained(), 4);
    assert_eq!(session.grid().values()[0], [4, 4, 0, 0]);
    assert_eq!(session.grid().values()[3], [0, 0, 0, 2]);

    let second = session.make_move(Direction::Left);
    assert_eq!(second.gained(), 8);
    assert_eq!(session.grid().values()[0], [8, 0, 0, 0]);
    assert_eq!(session.score(), 12);
}

#[test]
fn test_checkerboard_game_over() {
    let session = resume([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]], 0);
    assert!(session.is_game_over());
    assert!(!session.has_won());
}

#[test]
fn test_loss_freezes_session() {
    let mut session = resume([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [0, 4, 2, 4]], 12);

    let outcome = session.make_move(Direction::Left);
    assert_eq!(
        outcome,
        MoveOutcome::Applied {
            gained: 0,
            spawned: Some((3, 3)),
            status: Status::Lost,
        }
    );
    assert!(session.is_game_over());

    let before = session.snapshot();
    for direction in Direction::ALL {
        assert_eq!(
            session.make_move(direction),
            MoveOutcome::Rejected(Rejection::Terminal)
        );
    }
    assert_eq!(session.snapshot(), before);
}

#[test]
fn test_win_then_restart() {
    let mut store = MemoryStore::new();
    {
        let mut session = Session::resume(
            EngineConfig::new(),
            Grid::from_values([[0, 0, 1024, 1024], [0; 4], [0; 4], [0; 4]]),
            10_000,
            &mut store,
            twos(),
        )
        .unwrap();

        session.make_move(Direction::Right);
        assert!(session.has_won());
        assert_eq!(session.score(), 12_048);
        assert_eq!(
            session.make_move(Direction::Left),
            MoveOutcome::Rejected(Rejection::Terminal)
        );

        session.restart();
        assert_eq!(session.score(), 0);
        assert!(!session.has_won());
        assert_eq!(session.high_score(), 12_048);
        assert_eq!(session.grid().tile_count(), 2);
    }
    assert_eq!(store.get("highScore").unwrap(), Some(12_048));
}

#[test]
fn test_noop_move_leaves_everything() {
    let mut session = resume([[2, 4, 8, 16], [0; 4], [0; 4], [0; 4]], 20);
    let before = session.snapshot();

    assert_eq!(
        session.make_move(Direction::Up),
        MoveOutcome::Rejected(Rejection::NoChange)
    );
    assert_eq!(
        session.make_move(Direction::Left),
        MoveOutcome::Rejected(Rejection::NoChange)
    );
    assert_eq!(
        session.make_move(Direction::Right),
        MoveOutcome::Rejected(Rejection::NoChange)
    );
    assert_eq!(session.snapshot(), before);
}

#[test]
fn test_input_events_drive_moves() {
    let mut session = resume([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], 0);

    assert_eq!(session.handle_input(&InputEvent::Key("Escape".into())), None);
    assert_eq!(session.handle_input(&InputEvent::Swipe { dx: 2.0, dy: 1.0 }), None);
    assert_eq!(session.score(), 0);

    let outcome = session.handle_input(&InputEvent::Swipe { dx: -80.0, dy: 4.0 });
    assert_eq!(outcome.map(|o| o.gained()), Some(4));
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_high_score_persisted_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("best.json");

    {
        let mut session = Session::resume(
            EngineConfig::new(),
            Grid::from_values([[64, 64, 0, 0], [0; 4], [0; 4], [0; 4]]),
            0,
            JsonFileStore::new(&path),
            twos(),
        )
        .unwrap();
        session.make_move(Direction::Left);
        assert_eq!(session.high_score(), 128);
    }

    let reloaded = Session::new(JsonFileStore::new(&path), GameRng::new(1));
    assert_eq!(reloaded.high_score(), 128);
}

#[test]
fn test_custom_high_score_key() {
    let config = EngineConfig::new().with_high_score_key("best-4x4");
    let store = MemoryStore::new().with_value("highScore", 999).with_value("best-4x4", 5);

    let session = Session::try_new(config, store, GameRng::new(0)).unwrap();
    assert_eq!(session.high_score(), 5);
}

#[test]
fn test_snapshot_serializes_for_view() {
    let session = resume([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]], 8);
    let json = serde_json::to_value(session.snapshot()).unwrap();

    assert_eq!(json["score"], 8);
    assert_eq!(json["status"], "Playing");
    assert_eq!(json["grid"]["rows"][0][0], 2);
    assert!(json["grid"]["rows"][0][1].is_null());
    assert_eq!(json["hints"]["cells"][0][0]["is_new"], false);
}
