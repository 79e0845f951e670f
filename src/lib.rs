//! Billy Run - terminal side-scrolling runner.
//!
//! The game core (`game`) is pure and driven by explicit millisecond
//! timestamps; the binary wires it to a terminal, a clock and a data
//! directory.

pub mod assets;
pub mod audio;
pub mod build_info;
pub mod clock;
pub mod config;
pub mod game;
pub mod input;
pub mod render;
pub mod storage;
pub mod ui;
