//! Single-screen arcade shooter.
//!
//! `compute` holds the arena simulation as pure state transitions over the
//! data in `entities`. `display` draws a snapshot with crossterm, `config`
//! carries the tuning constants and `controller` maps key events onto
//! requests. The binary wires them to the terminal.

pub mod compute;
pub mod config;
pub mod controller;
pub mod display;
pub mod entities;
