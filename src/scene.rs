/*

    Scene and physics configuration for the hat trick session.

    This gathers the hat model's bounding volume plus the tuning
    values handed over to the host physics engine. Everything loads
    from the "Scene" section of a session trace JSON and falls back
    to gameplay-tuned defaults.

    @date: 1 Dec, 2025
    @author: Bartu
*/

use crate::aabb::AxisAlignedBox;
use crate::prelude::*;

#[derive(Debug, Deserialize, Clone, SmartDefault)]
#[serde(default)]
pub struct SceneConfig {
    #[serde(rename = "Hat")]
    pub hat: HatModel,

    #[serde(rename = "Physics")]
    pub physics: PhysicsTuning,

    #[serde(rename = "Floor")]
    pub floor: FloorMaterial,
}

// Local-frame bounding volume of the hat mesh. The shipped model is a
// top hat roughly 20 cm tall centered on its origin, units are meters.
#[derive(Debug, Deserialize, Clone, SmartDefault)]
#[serde(default)]
pub struct HatModel {
    #[default(Vector3::new(-0.1, -0.1, -0.1))]
    #[serde(rename = "BoundingBoxMin", deserialize_with = "deser_vec3")]
    pub bbox_min: Vector3,

    #[default(Vector3::new(0.1, 0.1, 0.1))]
    #[serde(rename = "BoundingBoxMax", deserialize_with = "deser_vec3")]
    pub bbox_max: Vector3,
}

impl HatModel {
    pub fn bounding_box(&self) -> AxisAlignedBox {
        AxisAlignedBox::new_from(self.bbox_min, self.bbox_max)
    }
}

#[derive(Debug, Deserialize, Clone, SmartDefault)]
#[serde(default)]
pub struct PhysicsTuning {
    // Lightened gravity so throws feel floaty
    #[default(Vector3::new(0.0, -0.2, 0.0))]
    #[serde(rename = "Gravity", deserialize_with = "deser_vec3")]
    pub gravity: Vector3,

    #[default = 0.03]
    #[serde(rename = "BallRadius", deserialize_with = "deser_float")]
    pub ball_radius: Float,

    #[default = 0.5]
    #[serde(rename = "Friction", deserialize_with = "deser_float")]
    pub friction: Float,

    #[default = 0.5]
    #[serde(rename = "RollingFriction", deserialize_with = "deser_float")]
    pub rolling_friction: Float,

    #[default = 0.5]
    #[serde(rename = "ImpulseStrength", deserialize_with = "deser_float")]
    pub impulse_strength: Float,

    // Balls spawn this far in front of the camera
    #[default = 0.05]
    #[serde(rename = "SpawnOffset", deserialize_with = "deser_float")]
    pub spawn_offset: Float,
}

#[derive(Debug, Deserialize, Clone, Copy, SmartDefault)]
#[serde(default)]
pub struct FloorMaterial {
    #[default = 0.5]
    #[serde(rename = "Friction", deserialize_with = "deser_float")]
    pub friction: Float,

    #[default = 0.5]
    #[serde(rename = "Reflectivity", deserialize_with = "deser_float")]
    pub reflectivity: Float,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tuning_values() {
        let config = SceneConfig::default();
        assert!(approx_zero(config.physics.gravity.y + 0.2));
        assert!(approx_zero(config.physics.ball_radius - 0.03));
        assert!(approx_zero(config.physics.friction - 0.5));
        assert!(approx_zero(config.physics.rolling_friction - 0.5));
        assert!(approx_zero(config.physics.impulse_strength - 0.5));
        assert!(approx_zero(config.physics.spawn_offset - 0.05));
        assert!(approx_zero(config.floor.friction - 0.5));
        assert!(approx_zero(config.floor.reflectivity - 0.5));
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let json = r#"{
            "Hat": { "BoundingBoxMin": "-0.15 0 -0.15", "BoundingBoxMax": "0.15 0.3 0.15" },
            "Physics": { "ImpulseStrength": "0.8" }
        }"#;
        let config: SceneConfig = serde_json::from_str(json).unwrap();

        let bbox = config.hat.bounding_box();
        assert!(approx_zero(bbox.height() - 0.3));
        assert!(approx_zero(config.physics.impulse_strength - 0.8));
        // Untouched fields keep their defaults
        assert!(approx_zero(config.physics.ball_radius - 0.03));
        assert!(approx_zero(config.floor.reflectivity - 0.5));
    }
}
