//! Collision detection and response for circle vs. axis-aligned walls
//!
//! Detection projects the player center onto the wall rectangle; response
//! pushes the player out along the contact normal and then reacts by wall
//! kind: bouncy walls reflect, everything else grabs the player.

use glam::Vec2;

use super::player::{Player, PlayerState};
use super::state::{Wall, WallKind};
use crate::tuning::Tuning;

/// Overlap between the player and a wall
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Distance from the player center to the nearest point on the wall
    pub distance: f32,
    /// Offset from that nearest point to the player center
    pub dx: f32,
    pub dy: f32,
}

impl Contact {
    /// Unit normal pointing from the wall toward the player
    ///
    /// A center inside the wall has no offset; it is pushed straight up.
    pub fn normal(&self) -> Vec2 {
        if self.distance > 0.0 {
            Vec2::new(self.dx, self.dy) / self.distance
        } else {
            Vec2::NEG_Y
        }
    }
}

/// Test the player circle against a wall rectangle
pub fn check_collision(player: &Player, wall: &Wall) -> Option<Contact> {
    let nearest = wall.closest_point(player.pos);
    let offset = player.pos - nearest;
    let distance = offset.length();

    if distance < player.radius {
        Some(Contact {
            distance,
            dx: offset.x,
            dy: offset.y,
        })
    } else {
        None
    }
}

/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Outcome of resolving one contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// Stuck or sticky; the sub-step loop must stop for this frame
    Halted,
    /// Reflected off a bouncy wall
    Bounced,
    /// Pushed out of a bouncy wall it was already leaving
    Separated,
}

/// Push the player out of `wall` and apply the wall's reaction
pub fn resolve(
    player: &mut Player,
    wall: &Wall,
    contact: &Contact,
    tuning: &Tuning,
    sticky_mode: bool,
) -> Reaction {
    let normal = contact.normal();

    if contact.distance > 0.0 {
        player.pos += normal * (player.radius - contact.distance);
    } else {
        // Center buried inside: surface on top of the wall
        player.pos.y = wall.y - player.radius;
    }

    match wall.kind {
        WallKind::Bouncy => {
            if player.vel.dot(normal) < 0.0 {
                player.vel = reflect_velocity(player.vel, normal) * tuning.bounce_amplify;
                Reaction::Bounced
            } else {
                Reaction::Separated
            }
        }
        WallKind::Floor | WallKind::Normal | WallKind::Vertical => {
            let impact_speed = player.vel.length();
            player.vel = Vec2::ZERO;
            if sticky_mode && normal.y > 0.5 {
                player.state = PlayerState::Sticky {
                    anchor: Vec2::new(player.pos.x, wall.bottom()),
                };
                player.impact_speed = impact_speed;
            } else {
                player.state = PlayerState::Stuck;
            }
            Reaction::Halted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn airborne(x: f32, y: f32, vx: f32, vy: f32) -> Player {
        let mut player = Player::new(Vec2::new(x, y), 10.0);
        player.state = PlayerState::Air;
        player.vel = Vec2::new(vx, vy);
        player
    }

    #[test]
    fn test_miss_when_touching_exactly() {
        let wall = Wall::new(0.0, 100.0, 200.0, 20.0, WallKind::Normal);
        let player = airborne(50.0, 90.0, 0.0, 0.0);
        assert!(check_collision(&player, &wall).is_none());
    }

    #[test]
    fn test_landing_on_top_sticks() {
        let wall = Wall::new(0.0, 100.0, 200.0, 20.0, WallKind::Normal);
        let mut player = airborne(50.0, 95.0, 2.0, 6.0);

        let contact = check_collision(&player, &wall).unwrap();
        assert!((contact.distance - 5.0).abs() < 1e-5);

        let reaction = resolve(&mut player, &wall, &contact, &Tuning::default(), true);
        assert_eq!(reaction, Reaction::Halted);
        assert_eq!(player.state, PlayerState::Stuck);
        assert_eq!(player.vel, Vec2::ZERO);
        assert!((player.pos.y - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_underside_hit_goes_sticky() {
        let wall = Wall::new(0.0, 100.0, 200.0, 20.0, WallKind::Normal);
        let mut player = airborne(50.0, 125.0, 0.0, -8.0);

        let contact = check_collision(&player, &wall).unwrap();
        assert_eq!(
            resolve(&mut player, &wall, &contact, &Tuning::default(), true),
            Reaction::Halted
        );

        assert_eq!(
            player.state,
            PlayerState::Sticky {
                anchor: Vec2::new(50.0, 120.0)
            }
        );
        assert!((player.impact_speed - 8.0).abs() < 1e-5);
        assert!((player.pos.y - 130.0).abs() < 1e-4);
    }

    #[test]
    fn test_underside_hit_sticks_without_sticky_mode() {
        let wall = Wall::new(0.0, 100.0, 200.0, 20.0, WallKind::Normal);
        let mut player = airborne(50.0, 125.0, 0.0, -8.0);

        let contact = check_collision(&player, &wall).unwrap();
        assert_eq!(
            resolve(&mut player, &wall, &contact, &Tuning::default(), false),
            Reaction::Halted
        );
        assert_eq!(player.state, PlayerState::Stuck);
    }

    #[test]
    fn test_side_hit_on_vertical_wall_sticks() {
        let wall = Wall::new(100.0, 0.0, 20.0, 300.0, WallKind::Vertical);
        let mut player = airborne(95.0, 150.0, 5.0, 1.0);

        let contact = check_collision(&player, &wall).unwrap();
        assert_eq!(
            resolve(&mut player, &wall, &contact, &Tuning::default(), true),
            Reaction::Halted
        );
        assert_eq!(player.state, PlayerState::Stuck);
        assert!((player.pos.x - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_bouncy_reflects_and_keeps_going() {
        let wall = Wall::new(0.0, 100.0, 200.0, 20.0, WallKind::Bouncy);
        let mut player = airborne(50.0, 95.0, 3.0, 4.0);

        let contact = check_collision(&player, &wall).unwrap();
        let reaction = resolve(&mut player, &wall, &contact, &Tuning::default(), true);

        assert_eq!(reaction, Reaction::Bounced);
        assert_eq!(player.state, PlayerState::Air);
        assert!((player.vel.x - 3.3).abs() < 1e-4);
        assert!((player.vel.y + 4.4).abs() < 1e-4);
    }

    #[test]
    fn test_leaving_bouncy_wall_is_not_a_bounce() {
        let wall = Wall::new(0.0, 100.0, 200.0, 20.0, WallKind::Bouncy);
        // Overlapping the top face but already moving up and away
        let mut player = airborne(50.0, 95.0, 1.0, -6.0);

        let contact = check_collision(&player, &wall).unwrap();
        let reaction = resolve(&mut player, &wall, &contact, &Tuning::default(), true);

        assert_eq!(reaction, Reaction::Separated);
        assert_eq!(player.vel, Vec2::new(1.0, -6.0));
        assert!(check_collision(&player, &wall).is_none());
    }

    #[test]
    fn test_buried_center_is_pushed_above() {
        let wall = Wall::new(0.0, 100.0, 200.0, 40.0, WallKind::Normal);
        let mut player = airborne(50.0, 130.0, 0.0, 0.0);

        let contact = check_collision(&player, &wall).unwrap();
        assert_eq!(contact.distance, 0.0);
        assert_eq!(contact.normal(), Vec2::NEG_Y);

        resolve(&mut player, &wall, &contact, &Tuning::default(), true);
        assert!((player.pos.y - 90.0).abs() < 1e-4);
        assert!(check_collision(&player, &wall).is_none());
    }

    #[test]
    fn test_reflect_velocity() {
        let reflected = reflect_velocity(Vec2::new(100.0, 0.0), Vec2::new(-1.0, 0.0));
        assert!((reflected.x + 100.0).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    proptest! {
        #[test]
        fn prop_no_residual_penetration(
            x in -40.0f32..240.0,
            y in 60.0f32..160.0,
            vx in -20.0f32..20.0,
            vy in -20.0f32..20.0,
            bouncy in any::<bool>(),
        ) {
            let kind = if bouncy { WallKind::Bouncy } else { WallKind::Normal };
            let wall = Wall::new(0.0, 100.0, 200.0, 20.0, kind);
            let mut player = airborne(x, y, vx, vy);

            if let Some(contact) = check_collision(&player, &wall) {
                resolve(&mut player, &wall, &contact, &Tuning::default(), true);
                let nearest = wall.closest_point(player.pos);
                prop_assert!(player.pos.distance(nearest) >= player.radius - 1e-3);
            }
        }

        #[test]
        fn prop_bouncy_gains_speed(
            x in 10.0f32..190.0,
            depth in 0.1f32..9.0,
            vx in -20.0f32..20.0,
            vy in 0.5f32..20.0,
        ) {
            let wall = Wall::new(0.0, 100.0, 200.0, 20.0, WallKind::Bouncy);
            // Falling onto the top face
            let mut player = airborne(x, 90.0 + depth, vx, vy);
            let before = player.vel.length();

            let contact = check_collision(&player, &wall).unwrap();
            resolve(&mut player, &wall, &contact, &Tuning::default(), true);

            prop_assert!(player.vel.length() > before);
        }
    }
}
