//! Tuning constants for the arena, loadable from TOML.
//!
//! Every field has a default, so a config file only needs to list the
//! values it overrides.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "ARENA_SHOOTER_CONFIG";

/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "arena_shooter.toml";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Arena ────────────────────────────────────────────────────────────────
    /// Logical arena size. The renderer scales it onto the terminal.
    pub arena_width: f32,
    pub arena_height: f32,
    /// Length of one frame in the driver loop.
    pub frame_millis: u64,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    /// Gap between the player's bottom edge and the arena floor.
    pub player_bottom_margin: f32,
    pub starting_lives: i32,
    /// Frames between player shots. 0 means no limit.
    pub fire_cooldown_frames: u32,

    // ── Formation ────────────────────────────────────────────────────────────
    pub enemy_rows: usize,
    pub enemy_cols: usize,
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub enemy_spacing_x: f32,
    pub enemy_spacing_y: f32,
    pub enemy_origin_x: f32,
    pub enemy_origin_y: f32,
    /// Horizontal distance the formation covers per frame.
    pub enemy_step: f32,
    /// Per-frame probability that one enemy fires.
    pub enemy_fire_chance: f64,
    pub score_per_enemy: u32,

    // ── Projectiles ──────────────────────────────────────────────────────────
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub player_bullet_speed: f32,
    pub enemy_bullet_speed: f32,

    // ── Logging ──────────────────────────────────────────────────────────────
    /// Log records go here instead of stderr, which the game screen owns.
    pub log_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: 800.0,
            arena_height: 600.0,
            frame_millis: 16,

            player_width: 40.0,
            player_height: 20.0,
            player_speed: 5.0,
            player_bottom_margin: 10.0,
            starting_lives: 3,
            fire_cooldown_frames: 0,

            enemy_rows: 3,
            enemy_cols: 8,
            enemy_width: 30.0,
            enemy_height: 20.0,
            enemy_spacing_x: 40.0,
            enemy_spacing_y: 30.0,
            enemy_origin_x: 50.0,
            enemy_origin_y: 30.0,
            enemy_step: 2.0,
            enemy_fire_chance: 0.005,
            score_per_enemy: 10,

            bullet_width: 5.0,
            bullet_height: 10.0,
            player_bullet_speed: 7.0,
            enemy_bullet_speed: 3.0,

            log_file: None,
        }
    }
}

impl GameConfig {
    /// Parse a TOML document and validate the result.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config '{}'", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Invalid config '{}'", path.display()))
    }

    /// Load from `$ARENA_SHOOTER_CONFIG`, else `./arena_shooter.toml` if it
    /// exists, else the built-in defaults.
    pub fn load() -> Result<Self> {
        if let Ok(explicit) = std::env::var(CONFIG_ENV_VAR) {
            return Self::from_path(Path::new(&explicit));
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Self::from_path(local);
        }
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.arena_width > 0.0 && self.arena_height > 0.0) {
            bail!(
                "arena must have positive size, got {}x{}",
                self.arena_width,
                self.arena_height
            );
        }
        if self.enemy_rows == 0 || self.enemy_cols == 0 {
            bail!("formation needs at least one row and one column");
        }
        if !(0.0..=1.0).contains(&self.enemy_fire_chance) {
            bail!("enemy_fire_chance must lie in [0, 1], got {}", self.enemy_fire_chance);
        }
        let sizes = [
            ("player", self.player_width, self.player_height),
            ("enemy", self.enemy_width, self.enemy_height),
            ("bullet", self.bullet_width, self.bullet_height),
        ];
        for (name, w, h) in sizes {
            if w < 0.0 || h < 0.0 {
                return Err(anyhow!("{} size must be non-negative, got {}x{}", name, w, h));
            }
        }
        if self.player_width > self.arena_width {
            bail!("player is wider than the arena");
        }
        Ok(())
    }
}
