//! Frame driver
//!
//! The host owns the simulation, the controller inbox and the outbound
//! message queue. Its caller (the animation callback in the browser, a loop in
//! the native binary) hands it a timestamp each frame and forwards whatever it
//! wants sent back to the controller.

use crate::{frame_delta, wall_clock_ms};
use crate::highscores::HighScores;
use crate::input::TiltVector;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, World, tick};
use crate::transport::{HostMessage, Inbox, InboxSender, inbox};

pub struct Host {
    state: GameState,
    settings: Settings,
    inbox: Inbox,
    sender: InboxSender,
    /// Latest controller tilt; stays put between tilt messages
    tilt: TiltVector,
    /// Jump drained from the inbox but not yet seen by a tick
    pending_jump: bool,
    outbox: Vec<HostMessage>,
    last_time_ms: Option<f64>,
    high_scores: HighScores,
}

impl Host {
    pub fn new(settings: Settings, viewport_w: f32, viewport_h: f32, seed: u64) -> Self {
        let world = World::from_viewport(viewport_w, viewport_h, settings.zoom, settings.aspect);
        let state = GameState::new(seed, world, settings.tuning.clone(), settings.sticky_mode);
        let (sender, inbox) = inbox(settings.inbox_capacity);
        let high_scores = settings
            .high_scores_path
            .as_ref()
            .map(HighScores::load_from)
            .unwrap_or_default();

        log::info!(
            "Host ready: seed {}, world {:.0}x{:.0}, sticky mode {}",
            seed,
            world.width,
            world.height,
            if settings.sticky_mode { "on" } else { "off" }
        );

        Self {
            state,
            settings,
            inbox,
            sender,
            tilt: TiltVector::ZERO,
            pending_jump: false,
            outbox: Vec::new(),
            last_time_ms: None,
            high_scores,
        }
    }

    /// Handle for the transport adapter to push controller messages
    pub fn sender(&self) -> InboxSender {
        self.sender.clone()
    }

    /// Controller connected: leave the start screen
    pub fn start(&mut self) {
        self.state.start();
    }

    /// Run one animation frame at time `now_ms`
    ///
    /// `now_ms` only needs to be monotonic (`performance.now()` is fine).
    /// A jump that arrives on a frame with no elapsed time waits for the
    /// next frame that actually steps the simulation.
    pub fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let elapsed = self.last_time_ms.map_or(0.0, |last| (now_ms - last) as f32);
        self.last_time_ms = Some(now_ms);
        let dt = frame_delta(elapsed);

        let input = self.inbox.drain();
        if let Some(tilt) = input.tilt {
            self.tilt = tilt;
        }

        if input.restarts > 0 {
            self.restart();
            return Vec::new();
        }

        if self.state.phase != GamePhase::Playing {
            self.pending_jump = false;
            return Vec::new();
        }
        self.pending_jump |= input.jumps > 0;
        if dt <= 0.0 {
            return Vec::new();
        }

        let tick_input = TickInput {
            tilt: self.tilt,
            jump: std::mem::take(&mut self.pending_jump),
        };
        let events = tick(&mut self.state, &tick_input, dt);
        for event in &events {
            self.react(event);
        }
        events
    }

    /// Translate simulation events into controller feedback
    fn react(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::Jumped => self.vibrate(self.settings.vibrate_jump_ms),
            GameEvent::Bounced => self.vibrate(self.settings.vibrate_bounce_ms),
            GameEvent::GameOver { score, .. } => {
                self.vibrate(self.settings.vibrate_game_over_ms);
                self.outbox.push(HostMessage::GameOver { score });
                self.record_score(score, wall_clock_ms());
            }
            _ => {}
        }
    }

    fn vibrate(&mut self, duration: u32) {
        if duration > 0 {
            self.outbox.push(HostMessage::Vibrate { duration });
        }
    }

    fn record_score(&mut self, score: u64, timestamp: f64) {
        let Some(rank) = self.high_scores.add_score(score, self.state.seed, timestamp) else {
            return;
        };
        log::info!("New high score #{}: {}", rank, score);
        if let Some(path) = &self.settings.high_scores_path {
            if let Err(e) = self.high_scores.save_to(path) {
                log::warn!("Failed to save high scores: {}", e);
            }
        }
    }

    /// Fresh world, straight into play
    pub fn restart(&mut self) {
        self.state.restart();
        self.tilt = TiltVector::ZERO;
        self.pending_jump = false;
        self.last_time_ms = None;
    }

    /// Viewport changed size; rescale the world in place
    pub fn resize(&mut self, viewport_w: f32, viewport_h: f32) {
        let world = World::from_viewport(
            viewport_w,
            viewport_h,
            self.settings.zoom,
            self.settings.aspect,
        );
        if world != self.state.world {
            self.state.resize(world);
        }
    }

    /// Messages for the controller since the last call
    pub fn take_outbound(&mut self) -> Vec<HostMessage> {
        std::mem::take(&mut self.outbox)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn tilt(&self) -> TiltVector {
        self.tilt
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
