//! The rising tide
//!
//! A lower boundary that only ever moves up. It rubber-bands toward players
//! who climb too far ahead.

use serde::{Deserialize, Serialize};

use super::player::Player;
use super::world::World;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tide {
    /// Surface (top edge) in world space
    pub y: f32,
}

impl Tide {
    pub fn new(y: f32) -> Self {
        Self { y }
    }

    /// Rise speed this frame, including catch-up
    pub fn speed(&self, player_y: f32, world: &World, tuning: &Tuning) -> f32 {
        let base = world.w(tuning.tide_speed);
        let distance = self.y - player_y;
        let threshold = world.h(tuning.tide_catchup_threshold);
        if distance > threshold {
            base + (distance - threshold) * tuning.tide_catchup_rate
        } else {
            base
        }
    }

    /// Move the surface up; returns the distance risen
    pub fn rise(&mut self, player_y: f32, world: &World, tuning: &Tuning, dt: f32) -> f32 {
        let step = self.speed(player_y, world, tuning).max(0.0) * dt;
        self.y -= step;
        step
    }

    /// Player's lower edge is past the surface plus the wave leeway
    pub fn touches(&self, player: &Player, world: &World, tuning: &Tuning) -> bool {
        player.pos.y + player.radius > self.y + world.w(tuning.tide_leeway)
    }

    pub fn scale(&mut self, factor: f32) {
        self.y *= factor;
    }
}
