//! Per-frame simulation step
//!
//! Core game loop that advances the simulation deterministically. The order
//! of the stages is fixed: jump, tide, tide contact, physics, camera, falling
//! out of frame, score, generation, pruning.

use super::player::PlayerState;
use super::state::{GameEvent, GamePhase, GameState, LossCause};
use crate::input::TiltVector;

/// Input snapshot for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Latest tilt from the controller (zero when none arrived yet)
    pub tilt: TiltVector,
    /// A jump was requested since the last frame
    pub jump: bool,
}

/// Advance the game by `dt` reference frames
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase != GamePhase::Playing || dt <= 0.0 {
        return events;
    }

    state.time_ticks += 1;

    let world = state.world;
    let GameState {
        player,
        walls,
        tide,
        camera,
        tuning,
        sticky_mode,
        ..
    } = state;

    // --- JUMP ---
    if input.jump && input.tilt.magnitude >= tuning.min_jump_magnitude {
        let accepted = player.jump(
            input.tilt.angle,
            input.tilt.magnitude,
            world.w(tuning.max_jump_force),
            world.w(tuning.jump_force_multiplier),
        );
        if accepted {
            events.push(GameEvent::Jumped);
        }
    }

    // --- TIDE ---
    tide.rise(player.pos.y, &world, tuning, dt);
    if tide.touches(player, &world, tuning) {
        end_run(state, LossCause::Tide, &mut events);
        return events;
    }

    // --- PHYSICS ---
    let report = player.step(walls, &world, tuning, *sticky_mode, dt);
    for _ in 0..report.bounces {
        events.push(GameEvent::Bounced);
    }
    match report.landed {
        Some(PlayerState::Stuck) => events.push(GameEvent::Stuck),
        Some(PlayerState::Sticky { .. }) => events.push(GameEvent::Sticky),
        _ => {}
    }
    if report.broke_away {
        events.push(GameEvent::BrokeAway);
    }

    // --- CAMERA ---
    camera.follow(player.pos.y, tide.y, &world, tuning, dt);
    if player.pos.y - player.radius > camera.bottom(&world) {
        end_run(state, LossCause::Fell, &mut events);
        return events;
    }

    // --- SCORE ---
    if player.pos.y < state.best_y {
        state.best_y = player.pos.y;
        let score = state.score_for(state.best_y);
        if score > state.score {
            state.score = score;
            events.push(GameEvent::ScoreChanged(score));
        }
    }

    // --- LEVEL ---
    state.fill_ahead();
    state.prune_behind();

    events
}

fn end_run(state: &mut GameState, cause: LossCause, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::GameOver;
    log::info!(
        "Game over ({:?}) at tick {} with score {}",
        cause,
        state.time_ticks,
        state.score
    );
    events.push(GameEvent::GameOver {
        score: state.score,
        cause,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Wall, WallKind};
    use crate::sim::world::World;
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_2;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed, World::new(1000.0, 1600.0), Tuning::default(), true);
        state.start();
        state
    }

    /// Tilt straight down so the jump goes straight up
    fn jump_up(magnitude: f32) -> TickInput {
        TickInput {
            tilt: TiltVector::from_components(0.0, magnitude),
            jump: true,
        }
    }

    #[test]
    fn test_start_phase_is_frozen() {
        let mut state = GameState::new(1, World::new(1000.0, 1600.0), Tuning::default(), true);
        let tide = state.tide.y;
        let events = tick(&mut state, &jump_up(100.0), 1.0);
        assert!(events.is_empty());
        assert_eq!(state.tide.y, tide);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_jump_event_and_climb() {
        let mut state = playing(5);
        // Clear the way so nothing interrupts the climb
        state.walls.truncate(1);

        let events = tick(&mut state, &jump_up(100.0), 1.0);
        assert!(events.contains(&GameEvent::Jumped));
        assert_eq!(state.player.state, PlayerState::Air);
        assert!(state.player.vel.y < 0.0);
        assert!(state.score > 0);
        assert!(events.iter().any(|e| matches!(e, GameEvent::ScoreChanged(_))));
    }

    #[test]
    fn test_weak_tilt_does_not_jump() {
        let mut state = playing(5);
        let events = tick(&mut state, &jump_up(2.0), 1.0);
        assert!(!events.contains(&GameEvent::Jumped));
        assert_eq!(state.player.state, PlayerState::Stuck);
    }

    #[test]
    fn test_tide_contact_ends_run() {
        let mut state = playing(9);
        state.player.pos = Vec2::new(500.0, 500.0);
        state.player.radius = 12.0;
        state.tide.y = 200.0;

        let events = tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(
            events.last(),
            Some(&GameEvent::GameOver {
                score: 0,
                cause: LossCause::Tide
            })
        );

        // Frozen afterwards
        let y = state.player.pos.y;
        assert!(tick(&mut state, &jump_up(100.0), 1.0).is_empty());
        assert_eq!(state.player.pos.y, y);
    }

    #[test]
    fn test_idle_player_is_eventually_caught() {
        let mut state = playing(77);
        let mut caught = false;
        for _ in 0..10_000 {
            let events = tick(&mut state, &TickInput::default(), 1.0);
            if events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })) {
                caught = true;
                break;
            }
        }
        assert!(caught);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_falling_out_of_frame_ends_run() {
        let mut state = playing(3);
        state.walls.clear();
        state.player.state = PlayerState::Air;
        state.player.pos.y = state.camera.bottom(&state.world) + 100.0;
        state.tide.y = state.player.pos.y + 10_000.0;

        let events = tick(&mut state, &TickInput::default(), 1.0);
        assert!(events.contains(&GameEvent::GameOver {
            score: 0,
            cause: LossCause::Fell
        }));
    }

    #[test]
    fn test_bouncy_event_reported() {
        let mut state = playing(4);
        state.walls = vec![Wall::new(0.0, -200.0, 1000.0, 50.0, WallKind::Bouncy)];
        state.player.state = PlayerState::Air;
        state.player.pos = Vec2::new(500.0, -140.0);
        state.player.vel = Vec2::new(0.0, -20.0);

        let events = tick(&mut state, &TickInput::default(), 1.0);
        assert!(events.contains(&GameEvent::Bounced));
        assert!(state.player.vel.y > 0.0);
    }

    #[test]
    fn test_underside_hit_reports_sticky() {
        let mut state = playing(4);
        state.walls = vec![Wall::new(0.0, -200.0, 1000.0, 50.0, WallKind::Normal)];
        state.player.state = PlayerState::Air;
        state.player.pos = Vec2::new(500.0, -120.0);
        state.player.vel = Vec2::new(0.0, -20.0);

        let events = tick(&mut state, &TickInput::default(), 1.0);
        assert!(events.contains(&GameEvent::Sticky));
        assert!(matches!(state.player.state, PlayerState::Sticky { .. }));

        // Jump back out of the sticky state
        let events = tick(&mut state, &jump_up(50.0), 1.0);
        assert!(events.contains(&GameEvent::Jumped));
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = playing(2024);
        let mut b = playing(2024);
        let script = [jump_up(60.0), TickInput::default(), jump_up(80.0)];

        for i in 0..600 {
            let input = script[i % script.len()];
            assert_eq!(tick(&mut a, &input, 1.0), tick(&mut b, &input, 1.0));
        }
        assert_eq!(a.player, b.player);
        assert_eq!(a.walls, b.walls);
        assert_eq!(a.score, b.score);
    }

    #[test]
    fn test_snapshot_restore_replays_identically() {
        let mut live = playing(31337);
        let script = [
            jump_up(70.0),
            TickInput::default(),
            TickInput {
                tilt: TiltVector::from_components(-40.0, 60.0),
                jump: true,
            },
        ];
        for i in 0..90 {
            tick(&mut live, &script[i % 3], 1.0);
        }

        let mut restored = GameState::from_json(&live.to_json().unwrap()).unwrap();
        for i in 0..900 {
            let input = script[i % 3];
            let dt = 0.5 + (i % 4) as f32 * 0.25;
            assert_eq!(tick(&mut live, &input, dt), tick(&mut restored, &input, dt));
        }
        assert_eq!(live.player, restored.player);
        assert_eq!(live.walls, restored.walls);
        assert_eq!(live.tide, restored.tide);
        assert_eq!(live.camera, restored.camera);
    }

    #[test]
    fn test_jump_angle_is_opposite_tilt() {
        let mut state = playing(8);
        state.walls.truncate(1);
        // Tilt down-left: launch up-right
        let input = TickInput {
            tilt: TiltVector::from_components(-50.0, 50.0),
            jump: true,
        };
        tick(&mut state, &input, 1.0);
        assert!(state.player.vel.x > 0.0);
        assert!(state.player.vel.y < 0.0);
        let angle = state.player.vel.y.atan2(state.player.vel.x);
        assert!((angle + FRAC_PI_2 / 2.0).abs() < 0.05);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_score_tracks_best_height(seed in any::<u64>(), pattern in proptest::collection::vec(0u8..4, 1..16)) {
            let mut state = playing(seed);
            let mut best = state.player.pos.y;
            let mut last_score = state.score;

            for i in 0..400 {
                let input = match pattern[i % pattern.len()] {
                    0 => TickInput::default(),
                    1 => jump_up(100.0),
                    2 => TickInput { tilt: TiltVector::from_components(40.0, 60.0), jump: true },
                    _ => TickInput { tilt: TiltVector::from_components(-40.0, 60.0), jump: true },
                };
                tick(&mut state, &input, 1.0);
                if state.phase != GamePhase::Playing {
                    break;
                }
                best = best.min(state.player.pos.y);
                prop_assert!(state.score >= last_score);
                prop_assert_eq!(state.score, state.score_for(best));
                last_score = state.score;
            }
        }
    }
}
