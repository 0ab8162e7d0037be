use anyhow::Result;
use log::info;

use ironclash::core::math::Rect;
use ironclash::engine::animation::{AnimationId, AnimationSink};
use ironclash::engine::assets::{
    HitClass, HitWindow, MoveDefinition, MoveSlot, MoveTable, MoveTableBuilder, MoveTableError,
    MoveTableLoader, MoveTuning,
};
use ironclash::engine::input::{Action, Facing};
use ironclash::engine::physics::GROUND_LINE;
use ironclash::game::fighters::Fighter;
use ironclash::game::round::Round;

use glam::Vec2;
use std::sync::Arc;

/// Built-in move tables standing in for the binary archive loader
struct DemoLoader;

impl MoveTableLoader for DemoLoader {
    fn load(&self, fighter_id: &str) -> Result<Arc<MoveTable>, MoveTableError> {
        if fighter_id != "demo bot" {
            return Err(MoveTableError::UnknownFighter(fighter_id.to_string()));
        }
        MoveTableBuilder::new(
            fighter_id,
            MoveTuning {
                forward_speed: 480.0,
                reverse_speed: 320.0,
                jump_speed: -340.0,
                fall_speed: 2.0,
            },
        )
        .push(MoveDefinition::new("idle", AnimationId(11), 8).with_slot(MoveSlot::Idle))
        .push(MoveDefinition::new("walking", AnimationId(10), 8).with_slot(MoveSlot::Walking))
        .push(MoveDefinition::new("crouching", AnimationId(4), 4).with_slot(MoveSlot::Crouching))
        .push(MoveDefinition::new("jumping", AnimationId(1), 6).with_slot(MoveSlot::Jumping))
        .push(
            MoveDefinition::new("jab", AnimationId(20), 3)
                .with_signature("P".parse()?)
                .with_hit(HitWindow {
                    first_frame: 0,
                    last_frame: 1,
                    hitbox: Rect::new(8.0, 20.0, 14.0, 10.0),
                    damage: 80,
                    class: HitClass::Punch,
                }),
        )
        .push(
            MoveDefinition::new("snap kick", AnimationId(21), 4)
                .with_signature("K".parse()?)
                .with_hit(HitWindow {
                    first_frame: 1,
                    last_frame: 2,
                    hitbox: Rect::new(10.0, 12.0, 16.0, 10.0),
                    damage: 120,
                    class: HitClass::Kick,
                }),
        )
        .push(
            MoveDefinition::new("dash roundhouse", AnimationId(22), 6)
                .with_signature("66K".parse()?)
                .special()
                .with_hit(HitWindow {
                    first_frame: 2,
                    last_frame: 4,
                    hitbox: Rect::new(12.0, 24.0, 20.0, 12.0),
                    damage: 220,
                    class: HitClass::Roundhouse,
                }),
        )
        .build()
    }
}

/// Log-only stand-in for the renderer
struct ConsoleSink;

impl AnimationSink for ConsoleSink {
    fn set_animation(&mut self, fighter: u32, animation: AnimationId, repeat: bool) {
        log::debug!(
            "fighter {} -> animation {:?} (repeat: {})",
            fighter,
            animation,
            repeat
        );
    }

    fn render(&mut self, _fighter: u32, _animation: AnimationId, _frame: u32, _flipped: bool) {
        // A real compositor blits here
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting ironclash demo bout...");

    let loader = DemoLoader;
    let table = loader.load("demo bot")?;

    let left = Fighter::new(
        1,
        Arc::clone(&table),
        Vec2::new(60.0, GROUND_LINE),
        Facing::Right,
    );
    let right = Fighter::new(2, table, Vec2::new(260.0, GROUND_LINE), Facing::Left);
    let mut round = Round::new(left, right, 1.5);
    let mut sink = ConsoleSink;

    // Scripted bout: the left fighter advances and attacks, the right
    // fighter answers with jabs whenever it can
    for tick in 0..6000 {
        if round.is_over() {
            break;
        }

        match tick % 40 {
            0 => round.act(0, Action::Right),
            20 => round.act(0, Action::Punch),
            25 => round.act(0, Action::Kick),
            30 => round.act(1, Action::Punch),
            _ => {}
        }

        round.tick();
        round.render(&mut sink);

        for event in round.drain_events() {
            info!("event: {:?}", event);
        }
    }

    info!(
        "bout finished after {} ticks: {} vs {} (winner: {:?})",
        round.ticks(),
        round.score(0).score(),
        round.score(1).score(),
        round.winner()
    );

    Ok(())
}
