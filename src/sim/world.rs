//! Logical world extents
//!
//! The simulation never sees pixels. A viewport is letterboxed to the target
//! aspect ratio and divided by the zoom factor to get world units.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ASPECT, DEFAULT_ZOOM};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
}

impl Default for World {
    fn default() -> Self {
        Self::from_viewport(1080.0, 1920.0, DEFAULT_ZOOM, DEFAULT_ASPECT)
    }
}

impl World {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Fit the target aspect ratio inside the viewport, then apply zoom
    pub fn from_viewport(viewport_w: f32, viewport_h: f32, zoom: f32, aspect: f32) -> Self {
        let zoom = if zoom.is_finite() && zoom > 0.0 { zoom } else { DEFAULT_ZOOM };
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { DEFAULT_ASPECT };
        let viewport_w = viewport_w.max(1.0);
        let viewport_h = viewport_h.max(1.0);

        let width = if viewport_w / viewport_h > aspect {
            viewport_h * aspect
        } else {
            viewport_w
        };
        let width = width / zoom;
        Self::new(width, width / aspect)
    }

    /// Scale factor that maps this world onto `next`
    #[inline]
    pub fn scale_to(&self, next: &World) -> f32 {
        next.width / self.width
    }

    /// Absolute length from a width ratio
    #[inline]
    pub fn w(&self, ratio: f32) -> f32 {
        self.width * ratio
    }

    /// Absolute length from a height ratio
    #[inline]
    pub fn h(&self, ratio: f32) -> f32 {
        self.height * ratio
    }
}
