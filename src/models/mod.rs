//! Core data models: cards, decks, tournaments and derived statistics.

mod card;
mod classified;
mod deck;
mod result;
mod stats;
mod tournament;

pub use card::*;
pub use classified::*;
pub use deck::*;
pub use result::*;
pub use stats::*;
pub use tournament::*;
