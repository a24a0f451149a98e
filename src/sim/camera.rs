//! Vertical follow camera

use serde::{Deserialize, Serialize};

use super::world::World;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World-space y of the top of the viewport
    pub y: f32,
}

impl Camera {
    pub fn new(y: f32) -> Self {
        Self { y }
    }

    /// Where the camera wants to be to frame the player
    #[inline]
    pub fn target(player_y: f32, world: &World, tuning: &Tuning) -> f32 {
        player_y - world.h(tuning.camera_lead)
    }

    /// Lowest camera position that still hides what's under the tide
    #[inline]
    pub fn limit(tide_y: f32, world: &World, tuning: &Tuning) -> f32 {
        tide_y - world.height + world.h(tuning.camera_tide_padding)
    }

    /// Ease toward the player, frame-rate independent, then clamp
    pub fn follow(&mut self, player_y: f32, tide_y: f32, world: &World, tuning: &Tuning, dt: f32) {
        let target = Self::target(player_y, world, tuning);
        let blend = 1.0 - (1.0 - tuning.camera_smoothness).powf(dt);
        let mut next = self.y + (target - self.y) * blend;
        if tuning.camera_one_way {
            next = next.min(self.y);
        }
        self.y = next.min(Self::limit(tide_y, world, tuning));
    }

    /// Bottom edge of the viewport
    #[inline]
    pub fn bottom(&self, world: &World) -> f32 {
        self.y + world.height
    }

    pub fn scale(&mut self, factor: f32) {
        self.y *= factor;
    }
}
