//! Tilt Tide - a tilt-controlled vertical climber
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, tide, camera, game state)
//! - `input`: Controller signal normalization (orientation/keys to tilt vector)
//! - `transport`: Message contract with the controller and the bounded inbox
//! - `host`: Frame driver that owns the simulation and talks to the transport
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod host;
pub mod input;
pub mod settings;
pub mod sim;
pub mod transport;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::HighScores;
pub use host::Host;
pub use input::TiltVector;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Reference frame duration in milliseconds. Velocities are per reference frame.
    pub const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Longest frame the simulation will integrate (tab suspension, debugger pauses)
    pub const MAX_FRAME_MS: f32 = 100.0;
    /// Fixed physics sub-steps per frame
    pub const SUBSTEPS: u32 = 8;

    /// Tilt vector magnitude ceiling
    pub const MAX_TILT: f32 = 100.0;

    /// Default viewport zoom (world units per pixel = 1 / zoom)
    pub const DEFAULT_ZOOM: f32 = 1.0;
    /// Default world aspect ratio (width / height), portrait
    pub const DEFAULT_ASPECT: f32 = 9.0 / 16.0;
}

/// Convert an elapsed wall-clock span into simulation frame units, capped
#[inline]
pub fn frame_delta(elapsed_ms: f32) -> f32 {
    if !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
        return 0.0;
    }
    elapsed_ms.min(consts::MAX_FRAME_MS) / consts::FRAME_MS
}

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn wall_clock_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch (0 if the system clock is before it)
#[cfg(not(target_arch = "wasm32"))]
pub fn wall_clock_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}
