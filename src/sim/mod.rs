//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (collection order)
//! - No rendering or platform dependencies

pub mod config;
pub mod engine;
pub mod state;

pub use config::{GameConfig, Hole};
pub use engine::Engine;
pub use state::{CharacterKind, GamePhase, MatchState, Mole, MoleState};
