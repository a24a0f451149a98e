//! Game state and core simulation types
//!
//! All state that must survive a snapshot/restore for determinism lives here,
//! including the RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::level::LevelGenerator;
use super::player::Player;
use super::tide::Tide;
use super::world::World;
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the controller to connect / the first start
    Start,
    /// Active gameplay
    Playing,
    /// Run ended, frozen until restart
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    /// Caught by the tide
    Tide,
    /// Fell out of the bottom of the frame
    Fell,
}

/// Things that happened during a tick, for haptics/UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Bounced,
    Stuck,
    Sticky,
    BrokeAway,
    ScoreChanged(u64),
    GameOver { score: u64, cause: LossCause },
}

/// Wall types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WallKind {
    /// Starting slab under the player
    Floor,
    #[default]
    Normal,
    /// Reflects and speeds the player up
    Bouncy,
    /// Narrow and tall
    Vertical,
}

/// An axis-aligned wall (y grows downward, so `y` is the top edge)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub kind: WallKind,
}

impl Wall {
    pub fn new(x: f32, y: f32, w: f32, h: f32, kind: WallKind) -> Self {
        Self { x, y, w, h, kind }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Nearest point of the rectangle to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(self.x, self.right()), p.y.clamp(self.y, self.bottom()))
    }

    pub fn scale(&mut self, factor: f32) {
        self.x *= factor;
        self.y *= factor;
        self.w *= factor;
        self.h *= factor;
    }
}

/// Read-only view handed to renderers each frame
#[derive(Debug, Serialize)]
pub struct FrameView<'a> {
    pub phase: GamePhase,
    pub world: World,
    pub walls: &'a [Wall],
    pub player: &'a Player,
    pub tide_y: f32,
    pub camera_y: f32,
    pub score: u64,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Wall generation RNG
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub world: World,
    pub tuning: Tuning,
    /// Underside hits hang on a tether instead of sticking
    pub sticky_mode: bool,
    pub player: Player,
    /// Live walls, in generation order
    pub walls: Vec<Wall>,
    pub level: LevelGenerator,
    pub tide: Tide,
    pub camera: Camera,
    /// Highest point the player reached (minimum y)
    pub best_y: f32,
    pub score: u64,
    /// Simulation frame counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a fresh run in the `Start` phase
    pub fn new(seed: u64, world: World, tuning: Tuning, sticky_mode: bool) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            world,
            tuning: tuning.sanitized(),
            sticky_mode,
            player: Player::new(Vec2::ZERO, 0.0),
            walls: Vec::new(),
            level: LevelGenerator::new(0.0),
            tide: Tide::new(0.0),
            camera: Camera::new(0.0),
            best_y: 0.0,
            score: 0,
            time_ticks: 0,
        };
        state.build_world();
        state
    }

    /// Lay out the floor, player, tide and the first screens of walls
    ///
    /// The RNG is not reseeded, so consecutive runs differ but stay
    /// reproducible from the original seed.
    fn build_world(&mut self) {
        let world = self.world;
        let radius = world.w(self.tuning.player_radius);

        // Floor top sits one radius below y = 0 so the player starts at 0
        let floor_top = radius;
        self.player = Player::new(Vec2::new(world.width / 2.0, 0.0), radius);
        self.walls.clear();
        self.walls.push(Wall::new(
            0.0,
            floor_top,
            world.width,
            world.w(self.tuning.floor_thickness),
            WallKind::Floor,
        ));
        self.level.reset(floor_top);
        self.tide = Tide::new(floor_top + world.h(self.tuning.tide_start_offset));
        let target = Camera::target(self.player.pos.y, &world, &self.tuning);
        self.camera = Camera::new(target.min(Camera::limit(self.tide.y, &world, &self.tuning)));
        self.best_y = self.player.pos.y;
        self.score = 0;
        self.time_ticks = 0;
        self.fill_ahead();
    }

    /// Throw away the current run and start playing a new one
    pub fn restart(&mut self) {
        self.build_world();
        self.phase = GamePhase::Playing;
        log::info!("Run restarted (seed {}, {} walls)", self.seed, self.walls.len());
    }

    /// Leave the `Start` screen
    pub fn start(&mut self) {
        if self.phase == GamePhase::Start {
            self.phase = GamePhase::Playing;
            log::info!("Run started (seed {})", self.seed);
        }
    }

    /// Generate walls until the look-ahead buffer above the camera is full
    pub fn fill_ahead(&mut self) -> usize {
        let horizon = self.camera.y - self.world.h(self.tuning.generate_ahead);
        let mut added = 0;
        while self.level.cursor > horizon {
            let wall = self.level.generate_next(&self.world, &self.tuning, &mut self.rng);
            self.walls.push(wall);
            added += 1;
        }
        if added > 0 {
            log::debug!("Generated {} walls (cursor {:.1})", added, self.level.cursor);
        }
        added
    }

    /// Drop walls that scrolled well below the camera
    pub fn prune_behind(&mut self) -> usize {
        let cutoff = self.camera.bottom(&self.world) + self.world.h(self.tuning.prune_behind);
        let before = self.walls.len();
        self.walls.retain(|wall| wall.y <= cutoff);
        let removed = before - self.walls.len();
        if removed > 0 {
            log::debug!("Pruned {} walls below {:.1}", removed, cutoff);
        }
        removed
    }

    /// Score for a given best height
    pub fn score_for(&self, best_y: f32) -> u64 {
        let divisor = self.world.w(self.tuning.score_divisor);
        (-best_y / divisor).max(0.0).floor() as u64
    }

    /// Swap in a new world size, rescaling every live entity
    pub fn resize(&mut self, world: World) {
        let factor = self.world.scale_to(&world);
        self.world = world;

        self.player.scale(factor);
        self.player.radius = world.w(self.tuning.player_radius);
        for wall in &mut self.walls {
            wall.scale(factor);
        }
        self.level.scale(factor);
        self.tide.scale(factor);
        self.camera.scale(factor);
        self.best_y *= factor;

        log::info!(
            "World resized to {:.0}x{:.0} (x{:.3})",
            world.width,
            world.height,
            factor
        );
    }

    /// Borrowed render surface
    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            phase: self.phase,
            world: self.world,
            walls: &self.walls,
            player: &self.player,
            tide_y: self.tide.y,
            camera_y: self.camera.y,
            score: self.score,
        }
    }

    /// Serialize the whole simulation, RNG included
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Restore a snapshot produced by [`GameState::to_json`]
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
