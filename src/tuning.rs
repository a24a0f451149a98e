//! Data-driven game balance
//!
//! Every distance, speed and force is a ratio of the world width (or height,
//! where noted) so the game plays the same on any screen. Velocities are in
//! world units per reference frame (60 Hz).

use serde::{Deserialize, Serialize};

/// Smallest wall gap (× width) generation accepts; anything tighter can stall
/// the level cursor in f32
pub const MIN_GAP: f32 = 0.01;

/// Gameplay balance, loaded from the `tuning` section of the settings file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Player radius (× width)
    pub player_radius: f32,
    /// Gravity (× width per frame²)
    pub gravity: f32,
    /// Horizontal velocity retained per frame while airborne
    pub air_friction: f32,
    /// Velocity retained after bouncing off a side of the world
    pub side_bounce_damping: f32,

    // === Jump ===
    /// Force per unit of tilt magnitude (× width)
    pub jump_force_multiplier: f32,
    /// Jump force ceiling (× width)
    pub max_jump_force: f32,
    /// Tilt magnitudes below this don't launch
    pub min_jump_magnitude: f32,

    // === Sticky adhesion ===
    /// Velocity retained per frame under a wall before impact and stretch
    pub sticky_base_viscosity: f32,
    /// Extra drag per unit of impact speed (× 1/width)
    pub sticky_impact_drag: f32,
    /// Loosest hang (lowest retained velocity per frame)
    pub sticky_min_drag: f32,
    /// Tightest hang; kept at or below 1 so hanging never gains speed
    pub sticky_max_drag: f32,
    /// Drag lost per world-width of stretch
    pub sticky_tension: f32,
    /// Fraction of gravity felt while stuck underneath
    pub sticky_gravity_scale: f32,
    /// Horizontal velocity retained per frame while stuck underneath
    pub sticky_lateral_damping: f32,
    /// Stretch at which the tether snaps (× width)
    pub sticky_breakaway: f32,

    // === Bouncy walls ===
    /// Speed multiplier after a reflection
    pub bounce_amplify: f32,

    // === Level generation ===
    /// Smallest vertical gap between walls (× width)
    pub gap_min: f32,
    /// Gap spread above the minimum (× width)
    pub gap_range: f32,
    /// Roll below this is a normal wall
    pub normal_chance: f32,
    /// Roll below this (and above `normal_chance`) is a bouncy wall
    pub bouncy_chance: f32,
    /// Short side of a wall (× width)
    pub wall_thickness: f32,
    /// Shortest long side of a wall (× width)
    pub wall_length_min: f32,
    /// Longest long side of a wall before the difficulty ramp (× width)
    pub wall_length_max: f32,
    /// Difficulty ramp: the longest normal wall shrinks to this fraction...
    pub difficulty_min_length_scale: f32,
    /// ...after climbing this many world heights
    pub difficulty_span: f32,
    /// Keep generated walls this far above the camera (× height)
    pub generate_ahead: f32,
    /// Drop walls this far below the camera's bottom edge (× height)
    pub prune_behind: f32,
    /// Floor slab thickness (× width)
    pub floor_thickness: f32,

    // === Tide ===
    /// Base rise speed (× width per frame)
    pub tide_speed: f32,
    /// Catch-up kicks in beyond this distance (× height)
    pub tide_catchup_threshold: f32,
    /// Extra speed per unit of excess distance, per frame
    pub tide_catchup_rate: f32,
    /// Extra reach of the visual wave before contact counts (× width)
    pub tide_leeway: f32,
    /// Tide start below the floor top (× height)
    pub tide_start_offset: f32,

    // === Camera ===
    /// Player sits this far below the camera top (× height)
    pub camera_lead: f32,
    /// Fraction of the distance to the target closed per frame
    pub camera_smoothness: f32,
    /// Camera bottom may dip this far under the tide surface (× height)
    pub camera_tide_padding: f32,
    /// Camera only follows upward progress
    pub camera_one_way: bool,

    // === Score ===
    /// Height per point (× width)
    pub score_divisor: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_radius: 0.025,
            gravity: 0.0006,
            air_friction: 0.99,
            side_bounce_damping: 0.75,

            jump_force_multiplier: 0.0007,
            max_jump_force: 0.028,
            min_jump_magnitude: 8.0,

            sticky_base_viscosity: 0.9,
            sticky_impact_drag: 2.0,
            sticky_min_drag: 0.85,
            sticky_max_drag: 0.98,
            sticky_tension: 1.5,
            sticky_gravity_scale: 0.1,
            sticky_lateral_damping: 0.8,
            sticky_breakaway: 0.12,

            bounce_amplify: 1.1,

            gap_min: 0.2,
            gap_range: 0.4,
            normal_chance: 0.73,
            bouncy_chance: 0.78,
            wall_thickness: 0.05,
            wall_length_min: 0.1,
            wall_length_max: 0.6,
            difficulty_min_length_scale: 0.5,
            difficulty_span: 40.0,
            generate_ahead: 1.2,
            prune_behind: 1.0,
            floor_thickness: 0.1,

            tide_speed: 0.0008,
            tide_catchup_threshold: 1.0,
            tide_catchup_rate: 0.01,
            tide_leeway: 0.02,
            tide_start_offset: 0.6,

            camera_lead: 0.6,
            camera_smoothness: 0.1,
            camera_tide_padding: 0.05,
            camera_one_way: true,

            score_divisor: 0.01,
        }
    }
}

impl Tuning {
    /// Clamp values that would break the simulation if hand-edited out of range
    pub fn sanitized(mut self) -> Self {
        self.air_friction = self.air_friction.clamp(0.0, 1.0);
        self.side_bounce_damping = self.side_bounce_damping.clamp(0.0, 1.0);
        self.sticky_min_drag = self.sticky_min_drag.clamp(0.0, 1.0);
        self.sticky_max_drag = self.sticky_max_drag.clamp(self.sticky_min_drag, 1.0);
        self.sticky_lateral_damping = self.sticky_lateral_damping.clamp(0.0, 1.0);
        self.camera_smoothness = self.camera_smoothness.clamp(0.0, 1.0);
        self.bouncy_chance = self.bouncy_chance.max(self.normal_chance);
        self.wall_length_max = self.wall_length_max.max(self.wall_length_min);
        self.gap_min = self.gap_min.max(MIN_GAP);
        self.gap_range = self.gap_range.max(0.0);
        self.score_divisor = self.score_divisor.max(f32::EPSILON);
        self
    }
}
