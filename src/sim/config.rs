//! Match configuration: hole layout and timing tunables
//!
//! Immutable for the duration of a match. All durations are in simulation
//! ticks, all coordinates in canvas space (y grows downward).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A fixed hole in the table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hole {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Hole {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-center of the hole. Moles emerge from here; hit anchors and
    /// miss proximity are both measured against this point.
    pub fn mouth(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y)
    }
}

/// Full match configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Ordered hole list; entity `hole_index` values index into this
    pub holes: Vec<Hole>,
    /// Table rect, consumed only by the renderer
    pub table_x: f32,
    pub table_y: f32,
    pub table_w: f32,
    pub table_h: f32,
    /// Emergence fraction gained per tick before difficulty/jitter bonuses
    pub base_rise_speed: f32,
    pub base_threaten_duration: f32,
    pub min_threaten_duration: f32,
    pub max_threaten_duration: f32,
    pub base_hidden_duration: f32,
    pub min_hidden_duration: f32,
    pub max_hidden_duration: f32,
    /// Ticks a whacked mole stays dazed before recovering underground
    pub whacked_duration: f32,
    /// Emergence fraction lost per tick while retreating
    pub retreat_speed: f32,
    /// Total match length in ticks
    pub game_duration: u32,
    /// Difficulty level increases once per this many elapsed ticks
    pub difficulty_interval: u32,
}

/// Landscape layout: two rows of three holes
const LANDSCAPE_HOLES: [Hole; 6] = [
    Hole::new(145.0, 185.0, 100.0, 38.0),
    Hole::new(350.0, 185.0, 100.0, 38.0),
    Hole::new(555.0, 185.0, 100.0, 38.0),
    Hole::new(145.0, 305.0, 100.0, 38.0),
    Hole::new(350.0, 305.0, 100.0, 38.0),
    Hole::new(555.0, 305.0, 100.0, 38.0),
];

/// Portrait layout: three rows of two holes
const PORTRAIT_HOLES: [Hole; 6] = [
    Hole::new(80.0, 260.0, 100.0, 38.0),
    Hole::new(220.0, 260.0, 100.0, 38.0),
    Hole::new(80.0, 380.0, 100.0, 38.0),
    Hole::new(220.0, 380.0, 100.0, 38.0),
    Hole::new(80.0, 500.0, 100.0, 38.0),
    Hole::new(220.0, 500.0, 100.0, 38.0),
];

impl GameConfig {
    /// Shared timing defaults for both orientations (20 second match at 60 Hz)
    fn timing_defaults() -> Self {
        Self {
            canvas_width: 0.0,
            canvas_height: 0.0,
            holes: Vec::new(),
            table_x: 0.0,
            table_y: 0.0,
            table_w: 0.0,
            table_h: 0.0,
            base_rise_speed: 0.055,
            base_threaten_duration: 100.0,
            min_threaten_duration: 30.0,
            max_threaten_duration: 150.0,
            base_hidden_duration: 50.0,
            min_hidden_duration: 12.0,
            max_hidden_duration: 80.0,
            whacked_duration: 35.0,
            retreat_speed: 0.08,
            game_duration: 20 * 60,
            difficulty_interval: 150,
        }
    }

    /// Portrait orientation preset
    pub fn portrait() -> Self {
        Self {
            canvas_width: 400.0,
            canvas_height: 700.0,
            holes: PORTRAIT_HOLES.to_vec(),
            table_x: 30.0,
            table_y: 140.0,
            table_w: 340.0,
            table_h: 440.0,
            ..Self::timing_defaults()
        }
    }
}

impl Default for GameConfig {
    /// Landscape orientation preset
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 400.0,
            holes: LANDSCAPE_HOLES.to_vec(),
            table_x: 60.0,
            table_y: 130.0,
            table_w: 680.0,
            table_h: 240.0,
            ..Self::timing_defaults()
        }
    }
}
