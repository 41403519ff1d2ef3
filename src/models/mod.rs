//! Core data models for the stats engine.

mod deck;
mod game;
mod ids;
mod participation;
mod player;
mod stats;

pub use deck::*;
pub use game::*;
pub use ids::*;
pub use participation::*;
pub use player::*;
pub use stats::*;
