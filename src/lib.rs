//! Mole Rush - whack-a-mole arcade game simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entity state machines, scoring, difficulty)
//! - `storage`: Injected key-value persistence for the high score
//!
//! Rendering, audio and input wiring are external collaborators: they consume
//! the state snapshot exposed by [`sim::Engine::state`] and forward raw
//! pointer coordinates into [`sim::Engine::handle_whack`].

pub mod sim;
pub mod storage;

pub use sim::{Engine, GameConfig, GamePhase, MatchState};
pub use storage::{JsonFileStore, MemoryStore, ScoreStore};

/// Fixed engine constants
pub mod consts {
    /// Simulation tick rate (all durations in the config are tick counts)
    pub const TICK_HZ: u32 = 60;
    /// Fixed simulation timestep for external drivers
    pub const SIM_DT: f32 = 1.0 / TICK_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death after a stall
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Minimum emergence before a mole can be hit
    pub const MIN_HITTABLE_POP: f32 = 0.3;
    /// Vertical offset of the hit anchor above the hole mouth at full emergence
    pub const MAX_POP_OFFSET: f32 = 75.0;
    /// Pointer must land within this distance of the anchor to register a hit
    pub const HIT_RADIUS: f32 = 60.0;
    /// A miss only records feedback when a hole mouth is within this distance
    pub const MISS_PROXIMITY: f32 = 100.0;

    /// Combo bonus per hit is capped at this many extra points
    pub const COMBO_BONUS_CAP: i32 = 5;

    /// Rise speed gained per difficulty level
    pub const SPEED_PER_DIFFICULTY: f32 = 0.008;
    /// Random jitter added to every speed roll
    pub const SPEED_JITTER: f32 = 0.02;
    /// Threaten window shrinks by this many ticks per difficulty level
    pub const THREATEN_SHRINK_PER_DIFFICULTY: f32 = 8.0;
    /// Hidden window shrinks by this many ticks per difficulty level
    pub const HIDDEN_SHRINK_PER_DIFFICULTY: f32 = 5.0;
    /// The randomized duration range never collapses below min + this spread
    pub const MIN_DURATION_SPREAD: f32 = 15.0;

    /// Frantic window: the final seconds of the match
    pub const FRANTIC_WINDOW_TICKS: u32 = 5 * TICK_HZ;
    pub const FRANTIC_SPEED_MULT: f32 = 2.0;
    pub const FRANTIC_THREATEN_MULT: f32 = 0.4;
    pub const FRANTIC_HIDDEN_MULT: f32 = 0.3;
    /// Frantic mode overrides the difficulty curve with this many moles
    pub const FRANTIC_TARGET_MOLES: usize = 5;

    /// Character rolls (checked in this order; see `Engine::roll_character`)
    pub const BUNNY_CHANCE: f64 = 0.20;
    pub const FRANTIC_BUNNY_CHANCE: f64 = 0.35;
    pub const BUNNY_MIN_DIFFICULTY: u32 = 1;
    pub const CHICK_CHANCE: f64 = 0.18;
    pub const FRANTIC_CHICK_CHANCE: f64 = 0.30;
    pub const CHICK_MIN_DIFFICULTY: u32 = 2;
    pub const GOLDEN_CHANCE: f64 = 0.40;
    pub const GOLDEN_MIN_DIFFICULTY: u32 = 1;

    /// Seed mole delay after a restart
    pub const INITIAL_MOLE_DELAY: f32 = 30.0;
    /// Staggered hidden countdown for pool growth: min + rand(0..range)
    pub const SPAWN_STAGGER_MIN: u32 = 10;
    pub const SPAWN_STAGGER_RANGE: u32 = 30;

    /// Sink rate once the whacked timer passes the sink threshold
    pub const WHACKED_SINK_RATE: f32 = 0.03;
    /// Fraction of the whacked duration after which the mole starts sinking
    pub const WHACKED_SINK_FRACTION: f32 = 0.6;

    /// Renderer feedback timers (ticks)
    pub const HIT_EFFECT_TICKS: u32 = 20;
    pub const MISS_EFFECT_TICKS: u32 = 15;
    pub const SHAKE_TICKS: u32 = 8;

    /// Cosmetic palette variants per character
    pub const COLOR_VARIANTS: u8 = 5;
}
