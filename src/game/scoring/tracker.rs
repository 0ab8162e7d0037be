// Score, combo streaks, and floating score text for one fighter

use log::debug;
use serde::{Deserialize, Serialize};

use super::text::ScoreText;
use crate::engine::assets::HitClass;
use crate::engine::input::Facing;

/// Streak length at which hits start counting toward a combo
const COMBO_THRESHOLD: u32 = 2;

/// Score bonus per point of health remaining at round end
const VICTORY_BONUS_PER_HEALTH: u32 = 100;

/// Scoring classes fed to the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreEvent {
    Punch,
    Kick,
    Roundhouse,
    PerfectRound,
}

impl ScoreEvent {
    /// Base points before the round multiplier
    pub fn base_points(self) -> u32 {
        match self {
            ScoreEvent::Punch => 100,
            ScoreEvent::Kick => 150,
            ScoreEvent::Roundhouse => 300,
            ScoreEvent::PerfectRound => 2000,
        }
    }
}

impl From<HitClass> for ScoreEvent {
    fn from(class: HitClass) -> Self {
        match class {
            HitClass::Punch => ScoreEvent::Punch,
            HitClass::Kick => ScoreEvent::Kick,
            HitClass::Roundhouse => ScoreEvent::Roundhouse,
        }
    }
}

/// Per-fighter score state for one round
///
/// Total score only ever grows; the multiplier is fixed at creation and
/// applied to every award. Created at round start, torn down with the
/// fighter. Serialization covers the counters verbatim; the transient
/// texts are rebuilt empty on load.
#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreTracker {
    score: u32,
    x: i32,
    y: i32,
    direction: Facing,
    multiplier: f32,
    #[serde(skip)]
    texts: Vec<ScoreText>,
    consecutive_hits: u32,
    consecutive_hit_score: u32,
    combo_hits: u32,
    combo_hit_score: u32,
}

impl ScoreTracker {
    /// Create a tracker with the round's score multiplier
    pub fn new(multiplier: f32) -> Self {
        Self {
            score: 0,
            x: 0,
            y: 0,
            direction: Facing::Right,
            multiplier,
            texts: Vec::new(),
            consecutive_hits: 0,
            consecutive_hit_score: 0,
            combo_hits: 0,
            combo_hit_score: 0,
        }
    }

    /// Anchor position and reading direction for spawned texts
    pub fn set_pos(&mut self, x: i32, y: i32, direction: Facing) {
        self.x = x;
        self.y = y;
        self.direction = direction;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    pub fn consecutive_hits(&self) -> u32 {
        self.consecutive_hits
    }

    pub fn combo_hits(&self) -> u32 {
        self.combo_hits
    }

    /// Live floating texts, oldest first
    pub fn texts(&self) -> &[ScoreText] {
        &self.texts
    }

    /// Award a landed hit worth `points` base points.
    ///
    /// The multiplied value goes to the total immediately; raw points
    /// accumulate in the streak counters. Once the streak reaches the
    /// combo threshold the combo counters absorb it and keep growing
    /// with every further hit.
    pub fn hit(&mut self, points: u32) {
        let awarded = (points as f32 * self.multiplier) as u32;
        self.score += awarded;
        self.consecutive_hits += 1;
        self.consecutive_hit_score += points;

        if self.consecutive_hits == COMBO_THRESHOLD {
            self.combo_hits += COMBO_THRESHOLD;
            self.combo_hit_score += self.consecutive_hit_score;
        } else if self.consecutive_hits > COMBO_THRESHOLD {
            self.combo_hits += 1;
            self.combo_hit_score += points;
        }

        self.spawn_text(awarded.to_string());
    }

    /// Award a landed hit by its scoring class
    pub fn hit_event(&mut self, event: ScoreEvent) {
        self.hit(event.base_points());
    }

    /// Finalize an open combo at a position.
    ///
    /// Awards the accumulated combo score exactly once and resets every
    /// streak counter. Returns whether a combo was actually finalized,
    /// so callers can trigger fanfare.
    pub fn end_combo(&mut self, pos: (i32, i32)) -> bool {
        let finalized = self.combo_hits >= COMBO_THRESHOLD;
        if finalized {
            self.score += self.combo_hit_score;
            self.texts.push(ScoreText::new(
                format!("{} hit combo {}", self.combo_hits, self.combo_hit_score),
                pos.0 as f32,
                pos.1 as f32,
            ));
            debug!(
                "combo finalized: {} hits for {}",
                self.combo_hits, self.combo_hit_score
            );
        }
        self.consecutive_hits = 0;
        self.consecutive_hit_score = 0;
        self.combo_hits = 0;
        self.combo_hit_score = 0;
        finalized
    }

    /// The opponent broke this fighter's streak.
    ///
    /// Streak counters reset without any award; combo score already
    /// absorbed stays pending until `end_combo`. Returns whether a
    /// streak was active.
    pub fn interrupt(&mut self, _pos: (i32, i32)) -> bool {
        let had_streak = self.consecutive_hits > 0;
        self.consecutive_hits = 0;
        self.consecutive_hit_score = 0;
        had_streak
    }

    /// One-off bonus award outside the streak system
    pub fn bonus(&mut self, event: ScoreEvent) {
        let awarded = (event.base_points() as f32 * self.multiplier) as u32;
        self.score += awarded;
        self.spawn_text(awarded.to_string());
    }

    /// Round-end bonus for remaining health
    pub fn victory(&mut self, health: i32) {
        let bonus = health.max(0) as u32 * VICTORY_BONUS_PER_HEALTH;
        let awarded = (bonus as f32 * self.multiplier) as u32;
        self.score += awarded;
        self.spawn_text(awarded.to_string());
    }

    /// Age floating texts one tick and drop the expired ones
    pub fn tick(&mut self) {
        for text in &mut self.texts {
            text.tick();
        }
        self.texts.retain(|text| !text.is_expired());
    }

    fn spawn_text(&mut self, text: String) {
        self.texts
            .push(ScoreText::new(text, self.x as f32, self.y as f32));
    }
}
