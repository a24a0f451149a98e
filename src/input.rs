//! Controller signal normalization
//!
//! Whatever the controller reads (device orientation, arrow keys), the
//! simulation only ever sees a [`TiltVector`] plus discrete jump triggers.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_TILT;
use crate::normalize_angle;

/// Canonical controller intent: components in [-100, 100], magnitude in [0, 100]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TiltVector {
    pub x: f32,
    pub y: f32,
    pub magnitude: f32,
    /// Direction of (x, y), radians, screen coordinates (+y down)
    pub angle: f32,
}

impl TiltVector {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        magnitude: 0.0,
        angle: 0.0,
    };

    /// Build from raw components, clamping the magnitude to 100
    pub fn from_components(x: f32, y: f32) -> Self {
        if !x.is_finite() || !y.is_finite() {
            return Self::ZERO;
        }
        let mut x = x;
        let mut y = y;
        let len = x.hypot(y);
        if len > MAX_TILT {
            x *= MAX_TILT / len;
            y *= MAX_TILT / len;
        }
        Self {
            x,
            y,
            magnitude: len.min(MAX_TILT),
            angle: y.atan2(x),
        }
    }

    /// Repair a vector that arrived over the wire
    ///
    /// Non-finite fields yield the zero vector; components and magnitude are
    /// clamped, the angle wrapped to [-π, π).
    pub fn sanitized(self) -> Self {
        if ![self.x, self.y, self.magnitude, self.angle]
            .iter()
            .all(|v| v.is_finite())
        {
            return Self::ZERO;
        }
        Self {
            x: self.x.clamp(-MAX_TILT, MAX_TILT),
            y: self.y.clamp(-MAX_TILT, MAX_TILT),
            magnitude: self.magnitude.clamp(0.0, MAX_TILT),
            angle: normalize_angle(self.angle),
        }
    }
}

/// Device orientation mapping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationConfig {
    /// Tilt (degrees) that maps to full magnitude
    pub max_tilt_deg: f32,
    /// Tilt (degrees) ignored around rest
    pub dead_zone_deg: f32,
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self {
            max_tilt_deg: 45.0,
            dead_zone_deg: 4.0,
        }
    }
}

/// Map `deviceorientation` angles onto a tilt vector
///
/// `gamma` is left/right tilt, `beta` front/back, both in degrees. A phone
/// held flat reads (0, 0).
pub fn from_orientation(beta: f32, gamma: f32, config: &OrientationConfig) -> TiltVector {
    let axis = |deg: f32| -> f32 {
        if !deg.is_finite() {
            return 0.0;
        }
        let span = (config.max_tilt_deg - config.dead_zone_deg).max(f32::EPSILON);
        let live = (deg.abs() - config.dead_zone_deg).max(0.0);
        (live / span).min(1.0) * MAX_TILT * deg.signum()
    };
    TiltVector::from_components(axis(gamma), axis(beta))
}

/// Arrow-key state of a keyboard controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Keys push full tilt along each held axis; diagonals are normalized
pub fn from_keys(keys: KeyState) -> TiltVector {
    let axis = |neg: bool, pos: bool| match (neg, pos) {
        (true, false) => -MAX_TILT,
        (false, true) => MAX_TILT,
        _ => 0.0,
    };
    TiltVector::from_components(axis(keys.left, keys.right), axis(keys.up, keys.down))
}
