//! Skyline: an artillery playfield of destructible pixel buildings.

pub mod config;
pub mod core;
pub mod world;
