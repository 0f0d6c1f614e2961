/*

    Session state for the hat trick: which planes were found, where
    the hat went, which balls are in flight and which ones settled
    inside the hat volume.

    The owner of the per-tick loop holds a TrickSession and feeds it
    host events explicitly (plane anchors, taps, tick states), nothing
    is ambient state.

    @date: 2 Dec, 2025
    @author: bartu
*/

use crate::aabb::{self, AxisAlignedBox};
use crate::frame::Frame;
use crate::scene::{FloorMaterial, SceneConfig};
use crate::prelude::*;

pub type BallId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallState {
    InFlight,
    Captured, // settled inside the hat volume
}

#[derive(Debug, Clone)]
pub struct Ball {
    pub id: BallId,
    pub state: BallState,
    pub opacity: Float,
    pub world_position: Vector3,
}

/// Horizontal plane anchor reported by the host tracking service.
#[derive(Debug, Clone, Copy)]
pub struct PlaneAnchor {
    pub center: Vector3,
    pub extent: Vector3, // y is unused for horizontal planes
}

/// Hit test result for a tap against the detected planes.
#[derive(Debug, Clone, Copy)]
pub struct PlaneHit {
    pub world_transform: Matrix4,
}

impl PlaneHit {
    /// Plane position from the 4th column of the hit transform
    pub fn position(&self) -> Vector3 {
        Frame::new_from(self.world_transform).position()
    }
}

/// Physics body parameters the host engine should apply to a spawned
/// ball. The session only describes the body, it never integrates it.
#[derive(Debug, Clone, Copy)]
pub struct BallBody {
    pub radius: Float,
    pub friction: Float,
    pub rolling_friction: Float,
    pub affected_by_gravity: bool,
}

/// Per-ball state the host physics engine reports every tick.
#[derive(Debug, Clone, Copy)]
pub struct BallTickState {
    pub id: BallId,
    pub world_position: Vector3,
    pub resting: bool,
}

#[derive(Debug, Clone)]
pub enum TapOutcome {
    HatPlaced {
        floor: Vector3,
        hat: Vector3,
        floor_material: FloorMaterial,
    },
    BallThrown {
        id: BallId,
        spawn: Frame,
        impulse: Vector3,
        body: BallBody,
    },
    Ignored,
}

#[derive(Debug)]
pub struct TrickSession {
    config: SceneConfig,
    hat_bbox: AxisAlignedBox, // in the hat model's local frame
    hat: Option<Frame>,
    floor: Option<Frame>,
    planes: Vec<PlaneAnchor>,
    balls: Vec<Ball>,
    next_ball_id: BallId,
}

impl TrickSession {

    pub fn new_from(config: SceneConfig) -> Self {
        let hat_bbox = config.hat.bounding_box();
        Self {
            config,
            hat_bbox,
            hat: None,
            floor: None,
            planes: Vec::new(),
            balls: Vec::new(),
            next_ball_id: 1,
        }
    }

    pub fn hat_is_placed(&self) -> bool {
        self.hat.is_some()
    }

    pub fn hat_frame(&self) -> Option<&Frame> {
        self.hat.as_ref()
    }

    pub fn floor_frame(&self) -> Option<&Frame> {
        self.floor.as_ref()
    }

    pub fn planes(&self) -> &[PlaneAnchor] {
        &self.planes
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn balls_thrown(&self) -> usize {
        self.balls.len()
    }

    pub fn balls_captured(&self) -> usize {
        self.balls.iter().filter(|b| b.state == BallState::Captured).count()
    }

    pub fn plane_detected(&mut self, anchor: PlaneAnchor) {
        if self.hat.is_some() {
            // Anchors keep arriving after placement, there is nothing to show for them anymore
            debug!("Plane anchor at {:?} arrived after hat placement", anchor.center);
        }
        self.planes.push(anchor);
    }

    /// A single tap either places the hat (before placement, on a plane
    /// hit) or throws a ball (after placement, from the camera pose).
    pub fn handle_tap(&mut self, hit: Option<PlaneHit>, camera: Option<&Frame>) -> TapOutcome {
        if self.hat.is_none() {
            match hit {
                Some(hit) => self.place_hat(hit),
                None => {
                    debug!("Tap missed every detected plane, ignoring");
                    TapOutcome::Ignored
                }
            }
        }
        else {
            match camera {
                Some(cam) => self.throw_ball(cam),
                None => {
                    warn!("No camera pose available for this frame, cannot throw");
                    TapOutcome::Ignored
                }
            }
        }
    }

    fn place_hat(&mut self, hit: PlaneHit) -> TapOutcome {
        let plane_position = hit.position();

        // Seat the hat half its height above the hit so the
        // origin-centered model rests on the plane.
        let hat_height = self.hat_bbox.height();
        let hat_position = Vector3::new(
            plane_position.x,
            plane_position.y + hat_height / 2.0,
            plane_position.z,
        );

        self.floor = Some(Frame::from_position(plane_position));
        self.hat = Some(Frame::from_position(hat_position));

        info!("Hat placed at {:?} (floor at {:?})", hat_position, plane_position);
        TapOutcome::HatPlaced {
            floor: plane_position,
            hat: hat_position,
            floor_material: self.config.floor,
        }
    }

    fn throw_ball(&mut self, camera: &Frame) -> TapOutcome {
        // Spawn a short distance in front of the camera and push the
        // ball along its world front.
        let spawn = camera.translated_forward(self.config.physics.spawn_offset);
        let impulse = spawn.front() * self.config.physics.impulse_strength;

        let id = self.next_ball_id;
        self.next_ball_id += 1;
        self.balls.push(Ball {
            id,
            state: BallState::InFlight,
            opacity: 1.0,
            world_position: spawn.position(),
        });

        let body = BallBody {
            radius: self.config.physics.ball_radius,
            friction: self.config.physics.friction,
            rolling_friction: self.config.physics.rolling_friction,
            affected_by_gravity: true,
        };

        debug!("Ball {} thrown from {:?} with impulse {:?}", id, spawn.position(), impulse);
        TapOutcome::BallThrown {
            id,
            spawn,
            impulse,
            body,
        }
    }

    /// Per-tick callback. `states` is whatever the host physics engine
    /// reported for this frame; only balls flagged as resting are
    /// candidates for capture. Returns the ids captured this tick.
    pub fn physics_settled(&mut self, states: &[BallTickState]) -> Vec<BallId> {
        let mut captured = Vec::new();
        let Some(hat) = self.hat else {
            return captured; // no hat, nothing to fall into
        };

        for state in states {
            let Some(ball) = self.balls.iter_mut().find(|b| b.id == state.id) else {
                warn!("Tick reported unknown ball id {}", state.id);
                continue;
            };
            if ball.state == BallState::Captured {
                continue; // already released from the simulation
            }
            ball.world_position = state.world_position;
            if !state.resting {
                continue;
            }

            // Localize into the hat frame before the containment test
            let local = hat.to_local(&state.world_position);
            if aabb::contains(&local, &self.hat_bbox) {
                ball.state = BallState::Captured;
                ball.opacity = 0.0; // the trick: captured balls vanish
                captured.push(ball.id);
                info!("Ball {} settled inside the hat", ball.id);
            }
        }
        captured
    }

    /// Toggle from the UI switch: reveal or hide the captured balls.
    pub fn set_captured_visible(&mut self, visible: bool) {
        let opacity = if visible { 1.0 } else { 0.0 };
        for ball in self.balls.iter_mut() {
            if ball.state == BallState::Captured {
                ball.opacity = opacity;
            }
        }
    }
}
