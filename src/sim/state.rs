//! Match state and entity types
//!
//! Pure data. All mutation happens in [`super::engine`]; the rendering and
//! input layers only ever see an immutable snapshot of [`MatchState`].

use serde::{Deserialize, Serialize};

/// Overall match lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first whack to start a match
    Start,
    /// Active gameplay
    Playing,
    /// Match ended, waiting for an external restart
    GameOver,
}

/// Per-entity state machine tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoleState {
    /// Underground, counting down to the next appearance
    Hidden,
    /// Emerging from the hole
    Rising,
    /// Fully emerged, hittable, counting down to retreat
    Threatening,
    /// Struck; dazed on the spot, then sinks back underground
    Whacked,
    /// Escaped unstruck, sinking back underground
    Retreating,
}

/// Character variant occupying an entity slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterKind {
    /// Default target, 1 base point
    Mole,
    /// Rare bonus target: double points, rises faster, shorter threat window
    Golden,
    /// Penalty character, -3 on hit
    Bunny,
    /// Penalty character, -2 on hit
    Chick,
}

impl CharacterKind {
    /// Points deducted when this character is hit, if it is a penalty variant
    pub fn penalty(self) -> Option<i32> {
        match self {
            CharacterKind::Bunny => Some(3),
            CharacterKind::Chick => Some(2),
            CharacterKind::Mole | CharacterKind::Golden => None,
        }
    }

    /// Base points awarded for a non-penalty hit
    pub fn base_points(self) -> i32 {
        match self {
            CharacterKind::Golden => 2,
            _ => 1,
        }
    }

    /// Rise speed multiplier (golden moles are harder to catch)
    pub fn speed_mult(self) -> f32 {
        match self {
            CharacterKind::Golden => 1.15,
            _ => 1.0,
        }
    }

    /// Threaten window multiplier
    pub fn threaten_mult(self) -> f32 {
        match self {
            CharacterKind::Golden => 0.7,
            _ => 1.0,
        }
    }

    /// Screen shake intensity fed to the renderer when this character is hit
    pub fn shake_intensity(self) -> f32 {
        match self {
            CharacterKind::Bunny | CharacterKind::Chick => 8.0,
            CharacterKind::Golden => 6.0,
            CharacterKind::Mole => 4.0,
        }
    }
}

/// One entity slot, cycling through hole occupancy for the whole match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mole {
    /// Hole currently occupied (or to be occupied on the next rise)
    pub hole_index: usize,
    pub state: MoleState,
    /// Ticks remaining in the current state (Hidden/Threatening/Whacked)
    pub state_timer: f32,
    /// Vertical emergence fraction, clamped to [0, 1]
    pub pop_progress: f32,
    /// Idle animation accumulators (cosmetic, unbounded)
    pub bob_phase: f32,
    pub taunt_phase: f32,
    /// Whacked animation accumulators (cosmetic, reset on each hit)
    pub dizzy_phase: f32,
    pub star_phase: f32,
    /// Emergence gained per tick, re-rolled each cycle
    pub speed: f32,
    pub kind: CharacterKind,
    /// Cosmetic palette index
    pub color_variant: u8,
}

impl Mole {
    /// Hittable only while up and sufficiently emerged
    pub fn is_hittable(&self) -> bool {
        matches!(self.state, MoleState::Rising | MoleState::Threatening)
            && self.pop_progress > crate::consts::MIN_HITTABLE_POP
    }
}

/// Complete match state (replaced wholesale on restart)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub phase: GamePhase,
    /// May go negative through penalty hits
    pub score: i32,
    /// Best positive score ever reached, persisted externally
    pub high_score: i32,
    /// Consecutive successful non-penalty hits
    pub combo: u32,
    pub max_combo: u32,
    pub total_whacks: u32,
    /// Ticks until the match ends
    pub time_remaining: u32,
    /// Derived from elapsed time, recomputed every tick
    pub difficulty: u32,
    /// Entity slots; grows with difficulty, never shrinks
    pub moles: Vec<Mole>,
    // Renderer feedback. Engine-owned timers, zero gameplay effect.
    pub last_whacked_hole: Option<usize>,
    pub hit_effect_timer: u32,
    pub miss_effect_timer: u32,
    pub miss_effect_hole: Option<usize>,
    pub shake_timer: u32,
    pub shake_intensity: f32,
}

impl MatchState {
    /// Fresh match state with no entities yet
    pub fn new(high_score: i32, game_duration: u32) -> Self {
        Self {
            phase: GamePhase::Start,
            score: 0,
            high_score,
            combo: 0,
            max_combo: 0,
            total_whacks: 0,
            time_remaining: game_duration,
            difficulty: 0,
            moles: Vec::new(),
            last_whacked_hole: None,
            hit_effect_timer: 0,
            miss_effect_timer: 0,
            miss_effect_hole: None,
            shake_timer: 0,
            shake_intensity: 0.0,
        }
    }

    /// True during the final-seconds frantic window
    pub fn is_frantic(&self) -> bool {
        self.time_remaining > 0 && self.time_remaining <= crate::consts::FRANTIC_WINDOW_TICKS
    }

    /// How many entity slots the current difficulty calls for
    pub fn target_mole_count(&self) -> usize {
        if self.is_frantic() {
            return crate::consts::FRANTIC_TARGET_MOLES;
        }
        match self.difficulty {
            0..=2 => 1,
            3..=5 => 2,
            _ => 3,
        }
    }

    /// At most one golden mole may be live at a time
    pub fn has_live_golden(&self) -> bool {
        self.moles
            .iter()
            .any(|m| m.kind == CharacterKind::Golden && m.state != MoleState::Hidden)
    }

    /// Holes occupied by entities that are currently above ground
    pub fn occupied_holes(&self) -> Vec<usize> {
        self.moles
            .iter()
            .filter(|m| m.state != MoleState::Hidden)
            .map(|m| m.hole_index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_scoring() {
        assert_eq!(CharacterKind::Mole.base_points(), 1);
        assert_eq!(CharacterKind::Golden.base_points(), 2);
        assert_eq!(CharacterKind::Mole.penalty(), None);
        assert_eq!(CharacterKind::Golden.penalty(), None);
        assert_eq!(CharacterKind::Bunny.penalty(), Some(3));
        assert_eq!(CharacterKind::Chick.penalty(), Some(2));
    }

    #[test]
    fn test_penalty_shake_is_strongest() {
        assert!(CharacterKind::Bunny.shake_intensity() > CharacterKind::Golden.shake_intensity());
        assert!(CharacterKind::Golden.shake_intensity() > CharacterKind::Mole.shake_intensity());
    }

    #[test]
    fn test_target_count_steps() {
        let mut state = MatchState::new(0, 1200);
        state.time_remaining = 1200;
        for (difficulty, expected) in [(0, 1), (2, 1), (3, 2), (5, 2), (6, 3), (9, 3)] {
            state.difficulty = difficulty;
            assert_eq!(state.target_mole_count(), expected);
        }
        // Frantic window overrides the curve entirely
        state.difficulty = 0;
        state.time_remaining = crate::consts::FRANTIC_WINDOW_TICKS;
        assert_eq!(state.target_mole_count(), crate::consts::FRANTIC_TARGET_MOLES);
        // A finished match is not frantic
        state.time_remaining = 0;
        assert!(!state.is_frantic());
    }

    #[test]
    fn test_occupied_holes_skips_hidden() {
        let mut state = MatchState::new(0, 1200);
        let template = Mole {
            hole_index: 0,
            state: MoleState::Hidden,
            state_timer: 10.0,
            pop_progress: 0.0,
            bob_phase: 0.0,
            taunt_phase: 0.0,
            dizzy_phase: 0.0,
            star_phase: 0.0,
            speed: 0.05,
            kind: CharacterKind::Mole,
            color_variant: 0,
        };
        state.moles.push(Mole {
            hole_index: 1,
            state: MoleState::Threatening,
            ..template.clone()
        });
        state.moles.push(Mole {
            hole_index: 2,
            ..template.clone()
        });
        state.moles.push(Mole {
            hole_index: 3,
            state: MoleState::Retreating,
            ..template
        });
        assert_eq!(state.occupied_holes(), vec![1, 3]);
    }
}
