//! Procedural wall generation
//!
//! Walls are appended one at a time above a cursor that only ever moves up.
//! The cursor is the y of the highest wall generated so far.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Wall, WallKind};
use super::world::World;
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelGenerator {
    /// Top of the highest wall generated so far
    pub cursor: f32,
    /// Where generation started (difficulty is measured from here)
    pub origin: f32,
}

impl LevelGenerator {
    pub fn new(start_y: f32) -> Self {
        Self {
            cursor: start_y,
            origin: start_y,
        }
    }

    pub fn reset(&mut self, start_y: f32) {
        self.cursor = start_y;
        self.origin = start_y;
    }

    /// World heights climbed by the generator
    pub fn climbed(&self, world: &World) -> f32 {
        (self.origin - self.cursor) / world.height
    }

    /// Produce the next wall strictly above the cursor and advance it
    pub fn generate_next<R: Rng>(
        &mut self,
        world: &World,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Wall {
        let gap = world.w(tuning.gap_min + rng.random::<f32>() * tuning.gap_range);
        let y = self.cursor - gap;

        let roll = rng.random::<f32>();
        let kind = if roll < tuning.normal_chance {
            WallKind::Normal
        } else if roll < tuning.bouncy_chance {
            WallKind::Bouncy
        } else {
            WallKind::Vertical
        };

        let thickness = world.w(tuning.wall_thickness);
        let (w, h) = match kind {
            WallKind::Vertical => {
                let length = lerp(tuning.wall_length_min, tuning.wall_length_max, rng.random());
                (thickness, world.w(length))
            }
            _ => {
                let max = (tuning.wall_length_max * self.length_scale(world, tuning))
                    .max(tuning.wall_length_min);
                let length = lerp(tuning.wall_length_min, max, rng.random());
                (world.w(length), thickness)
            }
        };
        let x = (world.width - w).max(0.0) * rng.random::<f32>();

        self.cursor = y;
        Wall::new(x, y, w, h, kind)
    }

    /// Longest horizontal wall as a fraction of its starting length
    fn length_scale(&self, world: &World, tuning: &Tuning) -> f32 {
        let progress = if tuning.difficulty_span > 0.0 {
            (self.climbed(world) / tuning.difficulty_span).clamp(0.0, 1.0)
        } else {
            1.0
        };
        lerp(1.0, tuning.difficulty_min_length_scale, progress)
    }

    pub fn scale(&mut self, factor: f32) {
        self.cursor *= factor;
        self.origin *= factor;
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
