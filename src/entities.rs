//! All game entity types — pure data, no logic.

use crate::config::GameConfig;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box. `x`/`y` is the top-left corner, y grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Why a round ended. Every variant is a game over; `Cleared` is not a win.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Lives ran out.
    Defeated,
    /// A living enemy reached the player's row.
    Overrun,
    /// Every enemy in the formation is dead.
    Cleared,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// Travel direction comes from the collection the bullet lives in:
/// `player_bullets` move up, `enemy_bullets` move down.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
    pub speed: f32,
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub speed: f32,
}

/// Dead enemies stay in the formation so grid indices never shift.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    pub alive: bool,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub arena_width: f32,
    pub arena_height: f32,
    pub player: Player,
    /// Formation in row-major order.
    pub enemies: Vec<Enemy>,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub score: u32,
    /// Signed so a burst of hits in one frame can overshoot zero harmlessly.
    pub lives: i32,
    pub status: GameStatus,
    pub outcome: Option<Outcome>,
    /// 1.0 = right, -1.0 = left
    pub enemy_direction: f32,
    /// Set for the single frame in which the formation steps down.
    pub enemy_move_down: bool,
    /// Frames left before the player may fire again.
    pub fire_cooldown: u32,
    pub frame: u64,
}

impl GameState {
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}

/// Read-only view handed to the renderer.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub arena_width: f32,
    pub arena_height: f32,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub player_bullets: &'a [Bullet],
    pub enemy_bullets: &'a [Bullet],
    pub score: u32,
    pub lives: i32,
    pub game_over: bool,
    pub outcome: Option<Outcome>,
}
