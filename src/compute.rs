//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a brand-new
//! `GameState`.  Side effects are limited to the injected RNG and log records.

use log::{debug, info, trace};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{
    Bullet, Direction, Enemy, GameState, GameStatus, Outcome, Player, Rect, Snapshot,
};

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Open-interval overlap on both axes: boxes that only share an edge or a
/// corner do not collide.
pub fn is_colliding(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

// ── Constructors ─────────────────────────────────────────────────────────────

fn spawn_player(config: &GameConfig, arena_width: f32, arena_height: f32) -> Player {
    Player {
        rect: Rect::new(
            arena_width / 2.0 - config.player_width / 2.0,
            arena_height - config.player_height - config.player_bottom_margin,
            config.player_width,
            config.player_height,
        ),
        speed: config.player_speed,
    }
}

/// Lay out the formation grid in row-major order, every enemy alive.
pub fn build_formation(config: &GameConfig) -> Vec<Enemy> {
    (0..config.enemy_rows)
        .flat_map(|row| {
            (0..config.enemy_cols).map(move |col| Enemy {
                rect: Rect::new(
                    col as f32 * config.enemy_spacing_x + config.enemy_origin_x,
                    row as f32 * config.enemy_spacing_y + config.enemy_origin_y,
                    config.enemy_width,
                    config.enemy_height,
                ),
                alive: true,
            })
        })
        .collect()
}

/// Build the initial game state for an arena of the given size.
pub fn init_state(config: GameConfig, arena_width: f32, arena_height: f32) -> GameState {
    debug_assert!(
        arena_width > 0.0 && arena_height > 0.0,
        "arena must have positive size"
    );
    GameState {
        player: spawn_player(&config, arena_width, arena_height),
        enemies: build_formation(&config),
        player_bullets: Vec::new(),
        enemy_bullets: Vec::new(),
        score: 0,
        lives: config.starting_lives,
        status: GameStatus::Playing,
        outcome: None,
        enemy_direction: 1.0,
        enemy_move_down: false,
        fire_cooldown: 0,
        frame: 0,
        arena_width,
        arena_height,
        config,
    }
}

/// Start a fresh round in the same arena with the same config.
///
/// Rebuilds through `init_state`, so the formation heading also returns to
/// the right (`+1.0`) along with the grid layout.
pub fn reset(state: &GameState) -> GameState {
    debug!(
        "round reset (previous score {}, outcome {:?})",
        state.score, state.outcome
    );
    init_state(state.config.clone(), state.arena_width, state.arena_height)
}

pub fn snapshot(state: &GameState) -> Snapshot<'_> {
    Snapshot {
        arena_width: state.arena_width,
        arena_height: state.arena_height,
        player: &state.player,
        enemies: &state.enemies,
        player_bullets: &state.player_bullets,
        enemy_bullets: &state.enemy_bullets,
        score: state.score,
        lives: state.lives,
        game_over: state.is_game_over(),
        outcome: state.outcome,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn handle_move_request(state: &GameState, direction: Direction) -> GameState {
    if state.is_game_over() {
        return state.clone();
    }
    let player = &state.player;
    let dx = match direction {
        Direction::Left => -player.speed,
        Direction::Right => player.speed,
    };
    let max_x = (state.arena_width - player.rect.width).max(0.0);
    let x = (player.rect.x + dx).clamp(0.0, max_x);
    GameState {
        player: Player {
            rect: Rect { x, ..player.rect },
            ..player.clone()
        },
        ..state.clone()
    }
}

/// Fire a bullet from the player's horizontal center, just above the ship.
/// Rate is unlimited unless `fire_cooldown_frames` is set.
pub fn handle_fire_request(state: &GameState) -> GameState {
    if state.is_game_over() || state.fire_cooldown > 0 {
        return state.clone();
    }
    let config = &state.config;
    let ship = &state.player.rect;
    let new_bullet = Bullet {
        rect: Rect::new(
            ship.center_x() - config.bullet_width / 2.0,
            ship.y - config.bullet_height,
            config.bullet_width,
            config.bullet_height,
        ),
        speed: config.player_bullet_speed,
    };
    let mut player_bullets = state.player_bullets.clone();
    player_bullets.push(new_bullet);
    GameState {
        player_bullets,
        fire_cooldown: config.fire_cooldown_frames,
        ..state.clone()
    }
}

// ── Per-frame helpers ────────────────────────────────────────────────────────

/// Move every living enemy sideways, bounce off the walls and step down in
/// the same frame an edge is crossed.  Returns the moved formation and the
/// direction for the next frame.
fn advance_formation(state: &GameState) -> (Vec<Enemy>, f32) {
    let config = &state.config;
    let dx = config.enemy_step * state.enemy_direction;

    let mut enemies: Vec<Enemy> = state
        .enemies
        .iter()
        .map(|e| {
            if e.alive {
                Enemy {
                    rect: Rect { x: e.rect.x + dx, ..e.rect },
                    alive: true,
                }
            } else {
                e.clone()
            }
        })
        .collect();

    let edge_reached = enemies
        .iter()
        .filter(|e| e.alive)
        .any(|e| e.rect.x < 0.0 || e.rect.right() > state.arena_width);

    let mut direction = state.enemy_direction;
    let mut move_down = state.enemy_move_down;
    if edge_reached {
        direction = -direction;
        move_down = true;
        debug!("formation bounced, heading {}", direction);
    }

    if move_down {
        let dy = config.enemy_spacing_y / 2.0;
        for enemy in enemies.iter_mut().filter(|e| e.alive) {
            enemy.rect.y += dy;
        }
    }

    (enemies, direction)
}

/// Roll for an enemy shot and, on success, spawn it under a random living
/// enemy.
fn enemy_fire(config: &GameConfig, enemies: &[Enemy], rng: &mut impl Rng) -> Option<Bullet> {
    if !rng.gen_bool(config.enemy_fire_chance) {
        return None;
    }
    let alive: Vec<&Enemy> = enemies.iter().filter(|e| e.alive).collect();
    let shooter = alive.choose(rng)?;
    trace!("enemy at ({}, {}) fires", shooter.rect.x, shooter.rect.y);
    Some(Bullet {
        rect: Rect::new(
            shooter.rect.center_x() - config.bullet_width / 2.0,
            shooter.rect.bottom(),
            config.bullet_width,
            config.bullet_height,
        ),
        speed: config.enemy_bullet_speed,
    })
}

/// Each bullet kills at most the first living enemy (by formation index) it
/// overlaps.  Returns the updated formation, surviving bullets and kill count.
fn resolve_player_hits(
    mut enemies: Vec<Enemy>,
    bullets: Vec<Bullet>,
) -> (Vec<Enemy>, Vec<Bullet>, u32) {
    let mut kills = 0;
    let survivors: Vec<Bullet> = bullets
        .into_iter()
        .filter(|bullet| {
            match enemies
                .iter_mut()
                .find(|e| e.alive && is_colliding(&bullet.rect, &e.rect))
            {
                Some(enemy) => {
                    enemy.alive = false;
                    kills += 1;
                    false
                }
                None => true,
            }
        })
        .collect();
    (enemies, survivors, kills)
}

fn check_outcome(lives: i32, enemies: &[Enemy], player: &Player) -> Option<Outcome> {
    if lives <= 0 {
        Some(Outcome::Defeated)
    } else if enemies.iter().all(|e| !e.alive) {
        Some(Outcome::Cleared)
    } else if enemies
        .iter()
        .any(|e| e.alive && e.rect.bottom() >= player.rect.y)
    {
        Some(Outcome::Overrun)
    } else {
        None
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
/// Does nothing once the game is over.
pub fn step(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.is_game_over() {
        return state.clone();
    }
    let config = &state.config;

    // ── 1. Move bullets, keep the ones still on screen ───────────────────────
    let player_bullets: Vec<Bullet> = state
        .player_bullets
        .iter()
        .map(|b| Bullet {
            rect: Rect { y: b.rect.y - b.speed, ..b.rect },
            ..b.clone()
        })
        .filter(|b| b.rect.y >= 0.0)
        .collect();

    let mut enemy_bullets: Vec<Bullet> = state
        .enemy_bullets
        .iter()
        .map(|b| Bullet {
            rect: Rect { y: b.rect.y + b.speed, ..b.rect },
            ..b.clone()
        })
        .filter(|b| b.rect.y <= state.arena_height)
        .collect();

    // ── 2. Formation ─────────────────────────────────────────────────────────
    let (enemies, enemy_direction) = advance_formation(state);

    // ── 3. Enemies randomly shoot ────────────────────────────────────────────
    if let Some(bullet) = enemy_fire(config, &enemies, rng) {
        enemy_bullets.push(bullet);
    }

    // ── 4. Collision: player bullets ↔ enemies ───────────────────────────────
    let (enemies, player_bullets, kills) = resolve_player_hits(enemies, player_bullets);
    let score = state.score + kills * config.score_per_enemy;

    // ── 5. Collision: enemy bullets ↔ player ─────────────────────────────────
    let (hits, enemy_bullets): (Vec<Bullet>, Vec<Bullet>) = enemy_bullets
        .into_iter()
        .partition(|b| is_colliding(&b.rect, &state.player.rect));
    let lives = state.lives - hits.len() as i32;

    // ── 6. Terminal condition ────────────────────────────────────────────────
    let outcome = check_outcome(lives, &enemies, &state.player);
    let status = match outcome {
        Some(outcome) => {
            info!(
                "game over: {:?} with score {} and {} lives left",
                outcome, score, lives
            );
            GameStatus::GameOver
        }
        None => GameStatus::Playing,
    };

    GameState {
        enemies,
        player_bullets,
        enemy_bullets,
        score,
        lives,
        status,
        outcome,
        enemy_direction,
        enemy_move_down: false,
        fire_cooldown: state.fire_cooldown.saturating_sub(1),
        frame: state.frame + 1,
        ..state.clone()
    }
}
