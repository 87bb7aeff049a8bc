//! The game loop wired to the real leaderboard and terminal frontend.

use tetris_arena::core::{GameState, Grid, SequenceSource};
use tetris_arena::engine::{GameLoop, LogScoreDisplay, LoopControl};
use tetris_arena::scores::{Leaderboard, MemoryStorage};
use tetris_arena::term::{TerminalFrontend, Viewport, LEADERBOARD_ROWS};
use tetris_arena::types::{GameAction, PieceKind};

type TestLoop = GameLoop<TerminalFrontend<Vec<u8>>, LogScoreDisplay, Leaderboard<MemoryStorage>>;

/// A 4x4 field whose two bottom rows only lack the middle columns, so the
/// first `O` scores 200 and the next two top the field out.
fn short_game() -> TestLoop {
    let mut grid = Grid::new(4, 4);
    for y in 2..4 {
        grid.set(0, y, 1);
        grid.set(3, y, 1);
    }
    GameLoop::new(
        GameState::with_grid(grid, SequenceSource::repeat(PieceKind::O)),
        TerminalFrontend::with_writer(Vec::new(), Viewport::new(60, 20)),
        LogScoreDisplay,
        Leaderboard::new(MemoryStorage::new()),
    )
}

#[test]
fn test_game_over_records_final_score() {
    let mut game = short_game();

    for _ in 0..3 {
        assert!(!game.is_halted());
        game.handle(GameAction::HardDrop);
    }

    assert!(game.is_halted());
    assert_eq!(game.state().score(), 200);
    assert_eq!(game.frame(10_000), LoopControl::Halted);

    let top = game.recorder().top(LEADERBOARD_ROWS);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].score, 200);
}

#[test]
fn test_reset_after_game_over_plays_again() {
    let mut game = short_game();
    for _ in 0..3 {
        game.handle(GameAction::HardDrop);
    }
    assert!(game.is_halted());

    game.reset();

    assert!(!game.is_halted());
    assert_eq!(game.state().score(), 0);
    assert_eq!(game.frame(0), LoopControl::Continue);
    assert!(!game.renderer().frame().contains_text("GAME OVER"));
}

#[test]
fn test_frames_drive_gravity() {
    let mut game = short_game();
    let start_y = game.state().active().y;

    game.frame(5_000);
    assert_eq!(game.state().active().y, start_y);

    game.frame(6_001);
    assert_eq!(game.state().active().y, start_y + 1);
}

#[test]
fn test_zero_score_is_not_recorded() {
    let mut grid = Grid::new(4, 4);
    grid.set(1, 0, 1);
    let game = GameLoop::new(
        GameState::with_grid(grid, SequenceSource::repeat(PieceKind::O)),
        TerminalFrontend::with_writer(Vec::new(), Viewport::new(60, 20)),
        LogScoreDisplay,
        Leaderboard::new(MemoryStorage::new()),
    );

    assert!(game.is_halted());
    assert!(game.recorder().storage().payload().is_none());
}
