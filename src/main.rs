//! Tilt Tide entry point
//!
//! The browser build starts from `tilt_tide::web`. Natively this runs a
//! headless session: a simulated phone aims at the next wall up and jumps,
//! talking to the host through the same JSON messages a real controller sends.
//!
//! Usage: `tilt-tide [settings.json] [max_seconds]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use tilt_tide::Settings;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let settings = args
        .next()
        .map(Settings::load_from)
        .unwrap_or_default();
    let max_seconds: f64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(300.0);

    log::info!("Tilt Tide (headless) starting...");
    headless::run(settings, max_seconds);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is tilt_tide::web::wasm_main
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use tilt_tide::consts::FRAME_MS;
    use tilt_tide::input::{OrientationConfig, from_orientation};
    use tilt_tide::sim::{GameEvent, GamePhase, GameState, PlayerState};
    use tilt_tide::transport::{ControllerMessage, InboxSender};
    use tilt_tide::{Host, Settings};

    /// Frames the simulated phone waits on a surface before jumping
    const AIM_FRAMES: u32 = 20;

    pub fn run(settings: Settings, max_seconds: f64) {
        let seed = settings
            .seed
            .unwrap_or_else(|| tilt_tide::wall_clock_ms() as u64);
        let orientation = settings.orientation;

        let mut host = Host::new(settings, 1080.0, 1920.0, seed);
        let mut phone = Phone::new(host.sender(), orientation, seed);
        host.start();

        let mut now = 0.0;
        let mut jumps = 0;
        while now < max_seconds * 1000.0 {
            phone.think(host.state());
            for event in host.frame(now) {
                match event {
                    GameEvent::Jumped => jumps += 1,
                    GameEvent::ScoreChanged(score) => log::debug!("Score {}", score),
                    GameEvent::GameOver { score, cause } => {
                        log::info!(
                            "Run over after {:.1}s: score {} ({:?}, {} jumps)",
                            now / 1000.0,
                            score,
                            cause,
                            jumps
                        );
                    }
                    _ => {}
                }
            }
            for message in host.take_outbound() {
                match message.to_json() {
                    Ok(json) => log::trace!("-> controller {}", json),
                    Err(e) => log::warn!("Failed to encode {:?}: {}", message, e),
                }
            }
            if host.phase() == GamePhase::GameOver {
                break;
            }
            now += FRAME_MS as f64;
        }

        if host.phase() == GamePhase::Playing {
            log::info!("Time limit reached with score {}", host.state().score);
        }
        match host.high_scores().top_score() {
            Some(best) => log::info!("Best score: {}", best),
            None => log::info!("No score recorded"),
        }
    }

    /// A controller that reads the host's state instead of a gyroscope
    struct Phone {
        link: InboxSender,
        orientation: OrientationConfig,
        rng: Pcg32,
        settle: u32,
    }

    impl Phone {
        fn new(link: InboxSender, orientation: OrientationConfig, seed: u64) -> Self {
            Self {
                link,
                orientation,
                rng: Pcg32::seed_from_u64(seed ^ 0x5eed),
                settle: 0,
            }
        }

        fn think(&mut self, state: &GameState) {
            let player = &state.player;
            if player.state == PlayerState::Air {
                self.settle = 0;
                return;
            }
            self.settle += 1;
            if self.settle < AIM_FRAMES {
                return;
            }
            self.settle = 0;

            let Some(target) = next_wall_above(state) else {
                return;
            };
            let aim = (target - player.pos).normalize_or(Vec2::NEG_Y);
            let jitter = self.rng.random_range(-0.15..0.15);
            let aim = Vec2::from_angle(jitter).rotate(aim);

            // Tilt the phone away from where the player should go
            let tilt = -aim * self.orientation.max_tilt_deg;
            let reading = from_orientation(tilt.y, tilt.x, &self.orientation);
            match serde_json::to_string(&ControllerMessage::Tilt(reading)) {
                Ok(json) => {
                    if let Err(e) = self.link.push_json(&json) {
                        log::warn!("Controller rejected its own tilt: {}", e);
                        return;
                    }
                    self.link.push(ControllerMessage::Jump);
                }
                Err(e) => log::warn!("Failed to encode tilt: {}", e),
            }
        }
    }

    /// Center of the top face of the closest wall above the player
    fn next_wall_above(state: &GameState) -> Option<Vec2> {
        let player = &state.player;
        state
            .walls
            .iter()
            .filter(|w| w.y < player.pos.y - player.radius * 2.0)
            .max_by(|a, b| a.y.total_cmp(&b.y))
            .map(|w| Vec2::new(w.x + w.w / 2.0, w.y - player.radius))
    }
}
