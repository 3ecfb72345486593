//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable snapshot of the
//! game.  No game logic is performed; this module only translates state into
//! terminal commands, scaling the logical arena onto the terminal grid.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::entities::{Outcome, Rect, Snapshot};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::Green;
const C_ENEMY: Color = Color::Red;
const C_BULLET_PLAYER: Color = Color::White;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

const CONTROLS_HINT: &str = "← → / A D : Move   SPACE : Shoot   Q : Quit";

/// Smallest terminal the play area fits in (border plus one cell inside).
const MIN_COLS: u16 = 3;
const MIN_ROWS: u16 = 5;

// ── Arena → terminal mapping ──────────────────────────────────────────────────

/// The cell block inside the border and the scale from arena units to cells.
struct Viewport {
    left: u16,
    top: u16,
    cols: u16,
    rows: u16,
    scale_x: f32,
    scale_y: f32,
}

/// A rect in terminal cells: column, row, width, height.
type CellRect = (u16, u16, u16, u16);

impl Viewport {
    fn new(snapshot: &Snapshot, width: u16, height: u16) -> Option<Self> {
        if width < MIN_COLS || height < MIN_ROWS {
            return None;
        }
        // Row 0 is the HUD, row 1 the top bar, rows h-2 / h-1 the bottom bar
        // and the hint line.
        let cols = width - 2;
        let rows = height - 4;
        Some(Viewport {
            left: 1,
            top: 2,
            cols,
            rows,
            scale_x: cols as f32 / snapshot.arena_width,
            scale_y: rows as f32 / snapshot.arena_height,
        })
    }

    /// Cells covered by `rect`.  Anything visible covers at least one cell.
    fn cells(&self, rect: &Rect) -> Option<CellRect> {
        let span = |start: f32, end: f32, scale: f32, limit: u16| -> Option<(u16, u16)> {
            let first = (start * scale).floor().max(0.0);
            let last = (end * scale).ceil().min(limit as f32);
            if first >= limit as f32 || end < 0.0 {
                return None;
            }
            let first = first as u16;
            let len = (last as u16).saturating_sub(first).max(1);
            Some((first, len))
        };
        let (col, w) = span(rect.x, rect.right(), self.scale_x, self.cols)?;
        let (row, h) = span(rect.y, rect.bottom(), self.scale_y, self.rows)?;
        Some((self.left + col, self.top + row, w, h))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame onto a terminal of `width` × `height` cells.
pub fn render<W: Write>(
    out: &mut W,
    snapshot: &Snapshot,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_hud(out, snapshot, width)?;

    if let Some(view) = Viewport::new(snapshot, width, height) {
        draw_border(out, width, height)?;

        for enemy in snapshot.enemies.iter().filter(|e| e.alive) {
            fill(out, &view, &enemy.rect, "▓", C_ENEMY)?;
        }
        for bullet in snapshot.player_bullets {
            fill(out, &view, &bullet.rect, "║", C_BULLET_PLAYER)?;
        }
        for bullet in snapshot.enemy_bullets {
            fill(out, &view, &bullet.rect, "↓", C_BULLET_ENEMY)?;
        }
        fill(out, &view, &snapshot.player.rect, "█", C_PLAYER)?;

        draw_controls_hint(out, height)?;
    }

    if snapshot.game_over {
        draw_game_over(out, snapshot, width, height)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, snapshot: &Snapshot, width: u16) -> std::io::Result<()> {
    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>6}", snapshot.score)))?;

    // Lives — right
    let hearts: String = "♥".repeat(snapshot.lives.max(0) as usize);
    let lives_text = format!("Lives: {}", hearts);
    let rx = width.saturating_sub(lives_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_text))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn fill<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: &Rect,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    let Some((col, row, w, h)) = view.cells(rect) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(color))?;
    let line = glyph.repeat(w as usize);
    for r in row..row + h {
        out.queue(cursor::MoveTo(col, r))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(CONTROLS_HINT))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

/// Overlay headline for how the round ended.
pub fn headline(outcome: Option<Outcome>) -> &'static str {
    match outcome {
        Some(Outcome::Cleared) => "║  WAVE  CLEARED   ║",
        Some(Outcome::Overrun) => "║     INVADED      ║",
        Some(Outcome::Defeated) | None => "║    GAME  OVER    ║",
    }
}

fn draw_game_over<W: Write>(
    out: &mut W,
    snapshot: &Snapshot,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", snapshot.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        (headline(snapshot.outcome), Color::Red),
        ("╚══════════════════╝", Color::Red),
        (&score_line,            Color::Yellow),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
