/*

    Load and replay a recorded session trace.

    A trace is the JSON log of everything the host platform would
    have delivered live: detected plane anchors, taps together with
    their hit test or camera pose, physics ticks and toggle flips.
    Replaying one drives a TrickSession exactly like a live host
    would, minus the rendering.

    @date: 3 Dec, 2025
    @author: bartu
*/

use std::{path::Path, io::BufReader, fs::File};

use crate::frame::Frame;
use crate::scene::SceneConfig;
use crate::session::{BallTickState, PlaneAnchor, PlaneHit, TrickSession};
use crate::prelude::*;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct SessionTrace {
    #[serde(rename = "Scene")]
    pub scene: SceneConfig,

    #[serde(rename = "Events")]
    pub events: Vec<TraceEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "_type", rename_all = "lowercase")]
pub enum TraceEvent {
    Plane(PlaneEvent),
    Tap(TapEvent),
    Tick(TickEvent),
    Toggle(ToggleEvent),
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct PlaneEvent {
    #[serde(rename = "Center", deserialize_with = "deser_vec3")]
    pub center: Vector3,

    #[serde(rename = "Extent", deserialize_with = "deser_vec3")]
    pub extent: Vector3,
}

// A live host supplies at most one of the two fields: the hit test
// result for placement taps, the camera pose for throw taps.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct TapEvent {
    #[serde(rename = "Hit")]
    pub hit: Option<TransformField>,

    #[serde(rename = "Camera")]
    pub camera: Option<TransformField>,
}

#[derive(Debug, Deserialize)]
pub struct TransformField {
    #[serde(rename = "Transform", deserialize_with = "deser_mat4")]
    pub transform: Matrix4,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct TickEvent {
    #[serde(rename = "Balls")]
    pub balls: Vec<BallField>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct BallField {
    #[serde(rename = "_id", deserialize_with = "deser_usize")]
    pub _id: usize,

    #[serde(rename = "Position", deserialize_with = "deser_vec3")]
    pub position: Vector3,

    #[serde(rename = "Resting", deserialize_with = "deser_bool")]
    pub resting: bool,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ToggleEvent {
    #[serde(rename = "On", deserialize_with = "deser_bool")]
    pub on: bool,
}

pub fn load_trace(path: &Path) -> Result<SessionTrace, Box<dyn std::error::Error>> {

    let span = tracing::span!(tracing::Level::INFO, "load_trace");
    let _enter = span.enter();

    // Open file
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    debug!("Reading session trace from {:?}", path);

    let trace: SessionTrace = serde_json::from_reader(reader)?;
    Ok(trace)
}

/// Feed every recorded event through a fresh session and hand the
/// session back for inspection.
pub fn replay(trace: &SessionTrace) -> TrickSession {
    let mut session = TrickSession::new_from(trace.scene.clone());

    for event in trace.events.iter() {
        match event {
            TraceEvent::Plane(plane) => {
                session.plane_detected(PlaneAnchor {
                    center: plane.center,
                    extent: plane.extent,
                });
            }
            TraceEvent::Tap(tap) => {
                let hit = tap.hit.as_ref().map(|h| PlaneHit { world_transform: h.transform });
                let camera = tap.camera.as_ref().map(|c| Frame::new_from(c.transform));
                let outcome = session.handle_tap(hit, camera.as_ref());
                debug!("Tap outcome: {:?}", outcome);
            }
            TraceEvent::Tick(tick) => {
                let states: Vec<BallTickState> = tick.balls.iter()
                    .map(|b| BallTickState {
                        id: b._id,
                        world_position: b.position,
                        resting: b.resting,
                    })
                    .collect();
                session.physics_settled(&states);
            }
            TraceEvent::Toggle(toggle) => {
                session.set_captured_visible(toggle.on);
            }
        }
    }
    session
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::BallState;

    // One plane, one placement tap, two throws; ball 1 settles inside
    // the hat, ball 2 settles on the floor next to it.
    const TRACE: &str = r#"{
        "Events": [
            { "_type": "plane", "Center": "0 0 0", "Extent": "0.8 0 0.8" },
            { "_type": "tap", "Hit": { "Transform": "1 0 0 0 0 1 0 0 0 0 1 0 0 0 0 1" } },
            { "_type": "tap", "Camera": { "Transform": "1 0 0 0 0 1 0 0 0 0 1 0 0 0.3 0.5 1" } },
            { "_type": "tap", "Camera": { "Transform": "1 0 0 0 0 1 0 0 0 0 1 0 0.3 0.3 0.5 1" } },
            { "_type": "tick", "Balls": [
                { "_id": 1, "Position": "0.02 0.05 0.01", "Resting": true },
                { "_id": 2, "Position": "0.45 0 0.3", "Resting": false }
            ] },
            { "_type": "tick", "Balls": [
                { "_id": 2, "Position": "0.45 0 0.3", "Resting": true }
            ] },
            { "_type": "toggle", "On": true }
        ]
    }"#;

    #[test]
    fn trace_round_trip_classifies_balls() {
        let trace: SessionTrace = serde_json::from_str(TRACE).unwrap();
        assert_eq!(trace.events.len(), 7);

        let session = replay(&trace);
        assert!(session.hat_is_placed());
        assert_eq!(session.planes().len(), 1);
        assert_eq!(session.balls_thrown(), 2);
        assert_eq!(session.balls_captured(), 1);

        let captured = session.balls().iter().find(|b| b.state == BallState::Captured).unwrap();
        assert_eq!(captured.id, 1);
        // The final toggle revealed it again
        assert!(approx_zero(captured.opacity - 1.0));
    }

    #[test]
    fn empty_trace_replays_to_an_idle_session() {
        let trace: SessionTrace = serde_json::from_str("{}").unwrap();
        let session = replay(&trace);
        assert!(!session.hat_is_placed());
        assert_eq!(session.balls_thrown(), 0);
    }
}
