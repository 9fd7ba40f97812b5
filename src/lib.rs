//! # Deck Meta
//!
//! A local MTGO metagame tracker: classifies tournament decklists into
//! archetypes and reports how often each archetype is played and how well it
//! performs.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (cards, decks, tournaments, results)
//! - **classify**: Ordered rule sets and the first-match classifier
//! - **calculate**: Play rate, win rate and competition score computation
//! - **storage**: Tournament repositories (in-memory, JSONL)
//! - **report**: Plain-text tables
//! - **config**: Configuration loading and validation

pub mod calculate;
pub mod classify;
pub mod config;
pub mod models;
pub mod report;
pub mod storage;

pub use models::*;
