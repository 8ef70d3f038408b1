//! The simulation engine: per-tick state machine, hit detection and scoring
//!
//! Single-threaded and step-driven. An external fixed-timestep driver calls
//! [`Engine::tick`]; pointer callbacks call [`Engine::handle_whack`] between
//! ticks. Everything is deterministic given the RNG seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::config::GameConfig;
use super::state::{CharacterKind, GamePhase, MatchState, Mole, MoleState};
use crate::consts::*;
use crate::storage::ScoreStore;

/// Owns the configuration, the match state and the RNG stream.
///
/// The high-score store is injected so the engine never touches a platform
/// storage API directly; store failures are the store's problem (a failed
/// read means no value, a failed write is dropped).
pub struct Engine<S: ScoreStore> {
    config: GameConfig,
    data: MatchState,
    rng: Pcg32,
    store: S,
}

impl<S: ScoreStore> Engine<S> {
    /// Construct a new engine. Reads the persisted high score once.
    pub fn new(config: GameConfig, store: S, seed: u64) -> Self {
        let high_score = store.load().unwrap_or(0).max(0);
        let mut engine = Self {
            data: MatchState::new(high_score, config.game_duration),
            config,
            rng: Pcg32::seed_from_u64(seed),
            store,
        };
        let seed_mole = engine.spawn_hidden_mole(&[]);
        engine.data.moles.push(seed_mole);
        engine
    }

    /// Read-only snapshot of the current match state
    pub fn state(&self) -> &MatchState {
        &self.data
    }

    /// Active configuration
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the match, keeping only the high score, and begin playing.
    pub fn start_match(&mut self) {
        let high_score = self.data.high_score;
        self.data = MatchState::new(high_score, self.config.game_duration);
        let seed_mole = self.spawn_hidden_mole(&[]);
        self.data.moles.push(seed_mole);
        self.data.moles[0].state_timer = INITIAL_MOLE_DELAY;
        self.data.phase = GamePhase::Playing;
        log::info!(
            "match started: {} ticks, {} holes, high score {}",
            self.config.game_duration,
            self.config.holes.len(),
            high_score
        );
    }

    /// Advance the simulation by one fixed step. No-op unless PLAYING.
    pub fn tick(&mut self) {
        if self.data.phase != GamePhase::Playing {
            return;
        }

        self.data.time_remaining = self.data.time_remaining.saturating_sub(1);
        if self.data.time_remaining == 0 {
            self.finish_match();
            return;
        }

        let elapsed = self.config.game_duration - self.data.time_remaining;
        self.data.difficulty = elapsed / self.config.difficulty_interval.max(1);

        self.data.hit_effect_timer = self.data.hit_effect_timer.saturating_sub(1);
        self.data.miss_effect_timer = self.data.miss_effect_timer.saturating_sub(1);
        self.data.shake_timer = self.data.shake_timer.saturating_sub(1);

        // Grow the pool toward the difficulty-derived target. Slots are never
        // removed, only cycled through states.
        let target = self.data.target_mole_count();
        while self.data.moles.len() < target {
            let taken: Vec<usize> = self.data.moles.iter().map(|m| m.hole_index).collect();
            let mut mole = self.spawn_hidden_mole(&taken);
            // Stagger appearances so new slots don't pop in sync
            mole.state_timer =
                (SPAWN_STAGGER_MIN + self.rng.random_range(0..SPAWN_STAGGER_RANGE)) as f32;
            log::debug!(
                "mole slot added ({} -> {}), difficulty {}",
                self.data.moles.len(),
                target,
                self.data.difficulty
            );
            self.data.moles.push(mole);
        }

        for i in 0..self.data.moles.len() {
            self.step_mole(i);
        }
    }

    /// Process one pointer interaction at canvas-space coordinates.
    ///
    /// Returns the struck mole's index, or `None` on a miss. A whack during
    /// the START phase begins the match instead; GAMEOVER whacks are ignored
    /// (restart is owned by the external UI).
    pub fn handle_whack(&mut self, x: f32, y: f32) -> Option<usize> {
        match self.data.phase {
            GamePhase::Start => {
                self.start_match();
                return None;
            }
            GamePhase::GameOver => return None,
            GamePhase::Playing => {}
        }

        let click = Vec2::new(x, y);

        // First hittable mole in collection order wins; there is deliberately
        // no z-order or nearest-anchor tie-break.
        for i in 0..self.data.moles.len() {
            let mole = &self.data.moles[i];
            if !mole.is_hittable() {
                continue;
            }
            let hole = &self.config.holes[mole.hole_index];
            let anchor = hole.mouth() - Vec2::new(0.0, MAX_POP_OFFSET * mole.pop_progress);
            if click.distance(anchor) < HIT_RADIUS {
                self.score_hit(i);
                return Some(i);
            }
        }

        // Miss: any whiff breaks the streak
        self.data.combo = 0;

        let mut closest: Option<(usize, f32)> = None;
        for (i, hole) in self.config.holes.iter().enumerate() {
            let dist = click.distance(hole.mouth());
            if dist < MISS_PROXIMITY && closest.is_none_or(|(_, best)| dist < best) {
                closest = Some((i, dist));
            }
        }
        if let Some((hole_index, _)) = closest {
            self.data.miss_effect_timer = MISS_EFFECT_TICKS;
            self.data.miss_effect_hole = Some(hole_index);
        }

        None
    }

    fn finish_match(&mut self) {
        self.data.phase = GamePhase::GameOver;
        self.persist_high_score();
        log::info!(
            "match over: score {}, max combo {}, {} whacks",
            self.data.score,
            self.data.max_combo,
            self.data.total_whacks
        );
    }

    /// Persist the high score if the current score beats it. Negative scores
    /// never qualify.
    fn persist_high_score(&mut self) {
        if self.data.score > 0 && self.data.score > self.data.high_score {
            self.data.high_score = self.data.score;
            self.store.store(self.data.high_score);
            log::info!("new high score: {}", self.data.high_score);
        }
    }

    fn score_hit(&mut self, index: usize) {
        let (kind, hole_index) = {
            let mole = &mut self.data.moles[index];
            mole.state = MoleState::Whacked;
            mole.state_timer = self.config.whacked_duration;
            mole.dizzy_phase = 0.0;
            mole.star_phase = 0.0;
            (mole.kind, mole.hole_index)
        };

        if let Some(points) = kind.penalty() {
            self.data.score -= points;
            self.data.combo = 0;
            log::debug!("penalty hit ({kind:?}): -{points}");
        } else {
            self.data.combo += 1;
            self.data.total_whacks += 1;
            let combo_bonus = (self.data.combo as i32 - 1).min(COMBO_BONUS_CAP);
            self.data.score += kind.base_points() + combo_bonus;
            if self.data.combo > self.data.max_combo {
                self.data.max_combo = self.data.combo;
            }
        }

        self.persist_high_score();

        self.data.last_whacked_hole = Some(hole_index);
        self.data.hit_effect_timer = HIT_EFFECT_TICKS;
        self.data.shake_timer = SHAKE_TICKS;
        self.data.shake_intensity = kind.shake_intensity();
    }

    /// Advance one mole's state machine by one tick.
    fn step_mole(&mut self, i: usize) {
        {
            let mole = &mut self.data.moles[i];
            mole.bob_phase += 0.12;
            mole.taunt_phase += 0.15;
        }

        match self.data.moles[i].state {
            MoleState::Hidden => {
                self.data.moles[i].state_timer -= 1.0;
                if self.data.moles[i].state_timer <= 0.0 {
                    let new_hole = self.pick_fresh_hole(self.data.moles[i].hole_index);
                    let speed = self.roll_speed() * self.data.moles[i].kind.speed_mult();
                    let mole = &mut self.data.moles[i];
                    mole.state = MoleState::Rising;
                    mole.hole_index = new_hole;
                    mole.speed = speed;
                    mole.pop_progress = 0.0;
                }
            }

            MoleState::Rising => {
                self.data.moles[i].pop_progress += self.data.moles[i].speed;
                if self.data.moles[i].pop_progress >= 1.0 {
                    let duration =
                        self.roll_threaten_duration() * self.data.moles[i].kind.threaten_mult();
                    let mole = &mut self.data.moles[i];
                    mole.pop_progress = 1.0;
                    mole.state = MoleState::Threatening;
                    mole.state_timer = duration;
                }
            }

            MoleState::Threatening => {
                let mole = &mut self.data.moles[i];
                mole.state_timer -= 1.0;
                if mole.state_timer <= 0.0 {
                    mole.state = MoleState::Retreating;
                    // An unstruck threat breaks the streak
                    self.data.combo = 0;
                }
            }

            MoleState::Whacked => {
                let sink_after = self.config.whacked_duration * WHACKED_SINK_FRACTION;
                let mole = &mut self.data.moles[i];
                mole.state_timer -= 1.0;
                mole.dizzy_phase += 0.2;
                mole.star_phase += 0.08;
                if mole.state_timer < sink_after {
                    mole.pop_progress -= WHACKED_SINK_RATE;
                }
                if mole.state_timer <= 0.0 || mole.pop_progress <= 0.0 {
                    self.return_to_hidden(i);
                }
            }

            MoleState::Retreating => {
                let mole = &mut self.data.moles[i];
                mole.pop_progress -= self.config.retreat_speed;
                if mole.pop_progress <= 0.0 {
                    self.return_to_hidden(i);
                }
            }
        }
    }

    /// Send a mole back underground with a fresh countdown and a re-rolled
    /// character for its next appearance.
    fn return_to_hidden(&mut self, i: usize) {
        let timer = self.roll_hidden_duration();
        let kind = self.roll_character();
        let color_variant = self.rng.random_range(0..COLOR_VARIANTS);
        let mole = &mut self.data.moles[i];
        mole.pop_progress = 0.0;
        mole.state = MoleState::Hidden;
        mole.state_timer = timer;
        mole.kind = kind;
        mole.color_variant = color_variant;
    }

    /// Create a new hidden mole, preferring holes not in `taken`.
    fn spawn_hidden_mole(&mut self, taken: &[usize]) -> Mole {
        let hole_count = self.config.holes.len();
        let available: Vec<usize> = (0..hole_count).filter(|i| !taken.contains(i)).collect();
        let hole_index = if available.is_empty() {
            self.rng.random_range(0..hole_count)
        } else {
            available[self.rng.random_range(0..available.len())]
        };

        let kind = self.roll_character();
        let speed = self.roll_speed() * kind.speed_mult();

        Mole {
            hole_index,
            state: MoleState::Hidden,
            state_timer: self.roll_hidden_duration(),
            pop_progress: 0.0,
            bob_phase: 0.0,
            taunt_phase: 0.0,
            dizzy_phase: 0.0,
            star_phase: 0.0,
            speed,
            kind,
            color_variant: self.rng.random_range(0..COLOR_VARIANTS),
        }
    }

    /// Pick the hole for the next appearance: uniform among holes that are
    /// neither occupied by a surfaced mole nor the previous hole, falling
    /// back to any different hole when everything is taken.
    fn pick_fresh_hole(&mut self, current: usize) -> usize {
        let occupied = self.data.occupied_holes();
        let hole_count = self.config.holes.len();
        let available: Vec<usize> = (0..hole_count)
            .filter(|&i| i != current && !occupied.contains(&i))
            .collect();
        if !available.is_empty() {
            return available[self.rng.random_range(0..available.len())];
        }
        if hole_count <= 1 {
            return current;
        }
        loop {
            let hole = self.rng.random_range(0..hole_count);
            if hole != current {
                return hole;
            }
        }
    }

    /// Weighted character roll. Penalty characters get more likely with
    /// difficulty and in the frantic window; at most one golden mole is live.
    fn roll_character(&mut self) -> CharacterKind {
        let difficulty = self.data.difficulty;
        let frantic = self.data.is_frantic();

        let bunny_chance = if frantic {
            FRANTIC_BUNNY_CHANCE
        } else {
            BUNNY_CHANCE
        };
        let chick_chance = if frantic {
            FRANTIC_CHICK_CHANCE
        } else {
            CHICK_CHANCE
        };

        if difficulty >= BUNNY_MIN_DIFFICULTY && self.rng.random_range(0.0..1.0) < bunny_chance {
            return CharacterKind::Bunny;
        }
        if difficulty >= CHICK_MIN_DIFFICULTY && self.rng.random_range(0.0..1.0) < chick_chance {
            return CharacterKind::Chick;
        }
        if !self.data.has_live_golden()
            && difficulty >= GOLDEN_MIN_DIFFICULTY
            && self.rng.random_range(0.0..1.0) < GOLDEN_CHANCE
        {
            return CharacterKind::Golden;
        }
        CharacterKind::Mole
    }

    fn roll_speed(&mut self) -> f32 {
        let mut speed = self.config.base_rise_speed
            + self.data.difficulty as f32 * SPEED_PER_DIFFICULTY
            + self.rng.random_range(0.0..SPEED_JITTER);
        if self.data.is_frantic() {
            speed *= FRANTIC_SPEED_MULT;
        }
        speed
    }

    fn roll_threaten_duration(&mut self) -> f32 {
        let min = self.config.min_threaten_duration;
        let max = (self.config.max_threaten_duration
            - self.data.difficulty as f32 * THREATEN_SHRINK_PER_DIFFICULTY)
            .max(min + MIN_DURATION_SPREAD);
        let mut duration = self.rng.random_range(min..max);
        if self.data.is_frantic() {
            duration *= FRANTIC_THREATEN_MULT;
        }
        duration
    }

    fn roll_hidden_duration(&mut self) -> f32 {
        let min = self.config.min_hidden_duration;
        let max = (self.config.max_hidden_duration
            - self.data.difficulty as f32 * HIDDEN_SHRINK_PER_DIFFICULTY)
            .max(min + MIN_DURATION_SPREAD);
        let mut duration = self.rng.random_range(min..max);
        if self.data.is_frantic() {
            duration *= FRANTIC_HIDDEN_MULT;
        }
        duration
    }
}
