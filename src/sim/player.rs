//! Player body and its force models
//!
//! The player is a circle that is either glued to a surface, flying, or
//! hanging from the underside of a wall on a viscous tether.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Reaction, check_collision, resolve};
use super::state::Wall;
use super::world::World;
use crate::consts::SUBSTEPS;
use crate::tuning::Tuning;

/// Discrete player state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlayerState {
    /// Resting on a top or side surface, ready to jump
    Stuck,
    /// Free flight under gravity
    Air,
    /// Hanging under a wall, anchored at its bottom edge
    Sticky { anchor: Vec2 },
}

/// What happened to the player during one frame of physics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// Reflections off bouncy walls this frame
    pub bounces: u32,
    /// State entered by a halting contact, if any
    pub landed: Option<PlayerState>,
    /// Sticky tether snapped
    pub broke_away: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub state: PlayerState,
    /// Speed at the last sticking impact (drives sticky drag)
    pub impact_speed: f32,
}

impl Player {
    /// Spawn a player resting at `pos`
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            state: PlayerState::Stuck,
            impact_speed: 0.0,
        }
    }

    pub fn can_jump(&self) -> bool {
        matches!(self.state, PlayerState::Stuck | PlayerState::Sticky { .. })
    }

    /// Launch opposite the tilt direction
    ///
    /// Returns false (and changes nothing) unless the player is stuck or
    /// sticky. Callers gate haptic feedback on the result.
    pub fn jump(
        &mut self,
        angle: f32,
        magnitude: f32,
        max_force: f32,
        force_multiplier: f32,
    ) -> bool {
        if !self.can_jump() {
            return false;
        }
        let force = (magnitude * force_multiplier).min(max_force).max(0.0);
        let direction = angle + std::f32::consts::PI;
        self.vel = Vec2::new(direction.cos(), direction.sin()) * force;
        self.state = PlayerState::Air;
        true
    }

    /// Drag multiplier while hanging from `anchor`
    ///
    /// Harder impacts hang looser; stretching the tether tightens it.
    pub fn sticky_drag(&self, anchor: Vec2, world: &World, tuning: &Tuning) -> f32 {
        let base = (tuning.sticky_base_viscosity
            + self.impact_speed / world.width * tuning.sticky_impact_drag)
            .clamp(tuning.sticky_min_drag, tuning.sticky_max_drag);
        let stretch = (self.pos.y - anchor.y).abs() / world.width;
        (base - stretch * tuning.sticky_tension).clamp(0.0, base)
    }

    /// Advance one frame: forces, sub-stepped motion, walls
    pub fn step(
        &mut self,
        walls: &[Wall],
        world: &World,
        tuning: &Tuning,
        sticky_mode: bool,
        dt: f32,
    ) -> StepReport {
        let mut report = StepReport::default();
        let gravity = world.w(tuning.gravity);

        match self.state {
            PlayerState::Stuck => return report,
            PlayerState::Air => {
                self.vel.y += gravity * dt;
                self.vel.x *= tuning.air_friction.powf(dt);
            }
            PlayerState::Sticky { anchor } => {
                let drag = self.sticky_drag(anchor, world, tuning);
                self.vel.y += gravity * tuning.sticky_gravity_scale * dt;
                self.vel.y *= drag.powf(dt);
                self.vel.x *= tuning.sticky_lateral_damping.powf(dt);
            }
        }

        let sub_dt = dt / SUBSTEPS as f32;
        for _ in 0..SUBSTEPS {
            self.pos += self.vel * sub_dt;
            self.keep_inside(world, tuning);

            let mut halted = false;
            // First overlapping wall in list order wins this sub-step
            for wall in walls {
                if let Some(contact) = check_collision(self, wall) {
                    match resolve(self, wall, &contact, tuning, sticky_mode) {
                        Reaction::Halted => {
                            report.landed = Some(self.state);
                            halted = true;
                        }
                        Reaction::Bounced => report.bounces += 1,
                        Reaction::Separated => {}
                    }
                    break;
                }
            }
            if halted {
                break;
            }
        }

        if let PlayerState::Sticky { anchor } = self.state {
            if (self.pos.y - anchor.y).abs() > world.w(tuning.sticky_breakaway) {
                self.state = PlayerState::Air;
                report.broke_away = true;
            }
        }

        report
    }

    /// Clamp to the world's side walls, bouncing with energy loss
    fn keep_inside(&mut self, world: &World, tuning: &Tuning) {
        let min_x = self.radius;
        let max_x = world.width - self.radius;
        if self.pos.x < min_x {
            self.pos.x = min_x;
            self.vel.x = self.vel.x.abs() * tuning.side_bounce_damping;
        } else if self.pos.x > max_x {
            self.pos.x = max_x;
            self.vel.x = -self.vel.x.abs() * tuning.side_bounce_damping;
        }
    }

    /// Multiply every length and speed by `factor` (world resize)
    pub fn scale(&mut self, factor: f32) {
        self.pos *= factor;
        self.vel *= factor;
        self.radius *= factor;
        self.impact_speed *= factor;
        if let PlayerState::Sticky { anchor } = &mut self.state {
            *anchor *= factor;
        }
    }
}
