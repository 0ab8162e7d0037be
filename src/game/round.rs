// Round orchestration: two fighters advanced in fixed tick order
//
// One tick runs movement, bounds and frame upkeep, the symmetric
// collision test, score side effects, and score text aging. Rendering
// and audio consume the event feed and never block the tick.

use log::{debug, info};

use super::fighters::{Behavior, Fighter, FighterId, MAX_HEALTH};
use super::scoring::{ScoreEvent, ScoreTracker};
use crate::engine::animation::{AnimationId, AnimationSink};
use crate::engine::input::{Action, Facing};
use crate::engine::physics::Contact;

/// Fire-and-forget notifications for the UI/audio layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundEvent {
    Hit {
        attacker: FighterId,
        defender: FighterId,
        damage: i32,
        points: u32,
    },
    StreakBroken {
        fighter: FighterId,
    },
    ComboFinished {
        fighter: FighterId,
        hits: u32,
    },
    Victory {
        fighter: FighterId,
    },
}

/// A single round between two fighters
pub struct Round {
    fighters: [Fighter; 2],
    scores: [ScoreTracker; 2],
    /// Animation last handed to the sink, per fighter
    presented: [Option<(AnimationId, bool)>; 2],
    events: Vec<RoundEvent>,
    ticks: u64,
    winner: Option<usize>,
}

impl Round {
    /// Start a round; both score trackers share the round multiplier
    pub fn new(left: Fighter, right: Fighter, multiplier: f32) -> Self {
        let mut scores = [ScoreTracker::new(multiplier), ScoreTracker::new(multiplier)];
        // HUD anchors in the top corners
        scores[0].set_pos(10, 20, Facing::Right);
        scores[1].set_pos(250, 20, Facing::Left);
        info!(
            "round start: fighter {} vs fighter {} (x{} score)",
            left.id(),
            right.id(),
            multiplier
        );
        Self {
            fighters: [left, right],
            scores,
            presented: [None, None],
            events: Vec::new(),
            ticks: 0,
            winner: None,
        }
    }

    pub fn fighter(&self, side: usize) -> &Fighter {
        &self.fighters[side]
    }

    pub fn score(&self, side: usize) -> &ScoreTracker {
        &self.scores[side]
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// The winner's id once the round is decided
    pub fn winner(&self) -> Option<FighterId> {
        self.winner.map(|side| self.fighters[side].id())
    }

    /// Route a controller action to one side
    pub fn act(&mut self, side: usize, action: Action) {
        if self.winner.is_some() {
            return;
        }
        if let Some(fighter) = self.fighters.get_mut(side) {
            fighter.on_act(action);
        }
    }

    /// Advance the simulation one tick
    pub fn tick(&mut self) {
        if self.winner.is_some() {
            return;
        }
        self.ticks += 1;

        for fighter in &mut self.fighters {
            fighter.on_move();
            fighter.on_tick();
        }
        self.face_opponents();

        // Both directions read the same pre-hit snapshots, so trading
        // hits on one tick is possible
        let (from_left, from_right) = {
            let left = &self.fighters[0];
            let right = &self.fighters[1];
            (
                left.on_collide(&right.collision_profile()),
                right.on_collide(&left.collision_profile()),
            )
        };
        if let Some(contact) = from_left {
            self.apply_hit(0, contact);
        }
        if let Some(contact) = from_right {
            self.apply_hit(1, contact);
        }

        for score in &mut self.scores {
            score.tick();
        }

        self.check_victory();
    }

    /// Take the events accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    /// Push current animation selections and frames to the renderer
    pub fn render(&mut self, sink: &mut dyn AnimationSink) {
        for (side, fighter) in self.fighters.iter().enumerate() {
            let selected = (fighter.current_animation(), fighter.is_repeating());
            if self.presented[side] != Some(selected) {
                sink.set_animation(fighter.id(), selected.0, selected.1);
                self.presented[side] = Some(selected);
            }
            sink.render(
                fighter.id(),
                selected.0,
                fighter.frame(),
                fighter.facing() == Facing::Left,
            );
        }
    }

    /// Keep interruptible fighters turned toward each other
    fn face_opponents(&mut self) {
        let (left_facing, right_facing) =
            if self.fighters[0].position().x <= self.fighters[1].position().x {
                (Facing::Right, Facing::Left)
            } else {
                (Facing::Left, Facing::Right)
            };
        if self.fighters[0].is_interruptible() {
            self.fighters[0].set_facing(left_facing);
        }
        if self.fighters[1].is_interruptible() {
            self.fighters[1].set_facing(right_facing);
        }
    }

    fn apply_hit(&mut self, attacker: usize, contact: Contact) {
        let defender = 1 - attacker;
        self.fighters[attacker].mark_connected();
        self.fighters[defender].take_hit(contact);

        let attacker_id = self.fighters[attacker].id();
        let defender_id = self.fighters[defender].id();
        let event = ScoreEvent::from(contact.class);
        self.scores[attacker].hit_event(event);

        let defender_pos = self.fighters[defender].position();
        if self.scores[defender].interrupt((defender_pos.x as i32, defender_pos.y as i32)) {
            self.events.push(RoundEvent::StreakBroken {
                fighter: defender_id,
            });
        }

        self.events.push(RoundEvent::Hit {
            attacker: attacker_id,
            defender: defender_id,
            damage: contact.damage,
            points: event.base_points(),
        });
        debug!(
            "fighter {} hit fighter {} for {}",
            attacker_id, defender_id, contact.damage
        );
    }

    fn check_victory(&mut self) {
        for loser in 0..self.fighters.len() {
            if !self.fighters[loser].is_defeated() {
                continue;
            }
            let winner = 1 - loser;
            let winner_id = self.fighters[winner].id();
            let pos = self.fighters[winner].position();
            let pos = (pos.x as i32, pos.y as i32);

            let hits = self.scores[winner].combo_hits();
            if self.scores[winner].end_combo(pos) {
                self.events.push(RoundEvent::ComboFinished {
                    fighter: winner_id,
                    hits,
                });
            }

            let health = self.fighters[winner].health();
            self.scores[winner].victory(health);
            if health == MAX_HEALTH {
                self.scores[winner].bonus(ScoreEvent::PerfectRound);
                info!("perfect round for fighter {}", winner_id);
            }

            self.winner = Some(winner);
            self.events.push(RoundEvent::Victory { fighter: winner_id });
            info!(
                "fighter {} wins after {} ticks with {} health left",
                winner_id, self.ticks, health
            );
            break;
        }
    }
}
