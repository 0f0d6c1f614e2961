/*

    Provide utilities to parse session trace JSON files.

    This format currently assumes:
        - Numbers may be encapsulated in quotes (e.g. "0.5") or given as is
        - Vector3 data fields are in format "<a> <a> <a>" where <a> is
          integer or float, or plain arrays [a, a, a]
        - Matrices are 16 values in column major order, either as one
          whitespace separated string or as an array

    @date: 28 Nov, 2025
    @author: bartu
*/

use std::fmt::{self};

use serde_json::{self};
use serde::{Deserialize, Deserializer};
use serde::de::{self, Visitor, SeqAccess};

use crate::numeric::{Float, Matrix4, Vector3};

pub(crate) fn deser_usize<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    /*
        Deserialize usize type given as either string or number in JSON
    */
    let s: serde_json::Value = Deserialize::deserialize(deserializer)?;
    match s {
        serde_json::Value::Number(n) => n.as_i64()
            .map(|v| v as usize)
            .ok_or_else(|| de::Error::custom("Invalid integer")),
        serde_json::Value::String(s) => s.parse::<usize>()
            .map_err(|_| de::Error::custom("Failed to parse integer from string")),
        t => Err(de::Error::custom(format!("Expected int or string, found {t}"))),
    }
}

// Handles floats as string or number
pub(crate) fn deser_float<'de, D>(deserializer: D) -> Result<Float, D::Error>
where
    D: Deserializer<'de>,
{
    let s: serde_json::Value = Deserialize::deserialize(deserializer)?;
    match s {
        serde_json::Value::Number(n) => n.as_f64()
            .map(|v| v as Float)
            .ok_or_else(|| de::Error::custom("Invalid float")),
        serde_json::Value::String(s) => s.parse::<Float>()
            .map_err(|_| de::Error::custom("Failed to parse float from string")),
        t => Err(de::Error::custom(format!("Expected float or string, found {t}"))),
    }
}

pub(crate) fn deser_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct BoolVisitor;

    impl<'de> serde::de::Visitor<'de> for BoolVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a boolean or a string containing true/false")
        }

        fn visit_bool<E>(self, v: bool) -> Result<bool, E>
        where
            E: serde::de::Error,
        {
            Ok(v)
        }

        fn visit_str<E>(self, v: &str) -> Result<bool, E>
        where
            E: serde::de::Error,
        {
            match v.to_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                "1" => Ok(true),
                "0" => Ok(false),
                _ => Err(E::custom(format!("invalid bool '{}'", v))),
            }
        }

        fn visit_string<E>(self, v: String) -> Result<bool, E>
        where
            E: serde::de::Error,
        {
            self.visit_str(&v)
        }

        fn visit_u64<E>(self, v: u64) -> Result<bool, E>
        where
            E: serde::de::Error,
        {
            Ok(v != 0)
        }
    }

    deserializer.deserialize_any(BoolVisitor)
}

pub(crate) fn deser_vec3<'de, D>(deserializer: D) -> Result<Vector3, D::Error>
where
    D: Deserializer<'de>,
{
    struct Vec3Visitor;

    impl<'de> Visitor<'de> for Vec3Visitor {
        type Value = Vector3;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a Vec3 as a string 'x y z' or an array [x, y, z]")
        }

        // Given "X Y Z"
        fn visit_str<E>(self, value: &str) -> Result<Vector3, E>
        where
            E: de::Error,
        {
            parse_vec3_str(value).map_err(de::Error::custom)
        }

        // Given [X, Y, Z]
        fn visit_seq<A>(self, mut seq: A) -> Result<Vector3, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let x: Float = seq
                .next_element()?
                .ok_or_else(|| de::Error::custom("Expected 3 elements in Vec3 array"))?;
            let y: Float = seq
                .next_element()?
                .ok_or_else(|| de::Error::custom("Expected 3 elements in Vec3 array"))?;
            let z: Float = seq
                .next_element()?
                .ok_or_else(|| de::Error::custom("Expected 3 elements in Vec3 array"))?;
            if seq.next_element::<Float>()?.is_some() {
                return Err(de::Error::custom("Expected only 3 elements in Vec3 array"));
            }
            Ok(Vector3::new(x, y, z))
        }
    }

    deserializer.deserialize_any(Vec3Visitor)
}

pub(crate) fn deser_mat4<'de, D>(deserializer: D) -> Result<Matrix4, D::Error>
where
    D: Deserializer<'de>,
{
    struct Mat4Visitor;

    impl<'de> Visitor<'de> for Mat4Visitor {
        type Value = Matrix4;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("16 column-major floats as one string or an array")
        }

        fn visit_str<E>(self, value: &str) -> Result<Matrix4, E>
        where
            E: de::Error,
        {
            let nums = parse_float_list(value).map_err(de::Error::custom)?;
            to_mat4(&nums).map_err(de::Error::custom)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Matrix4, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut nums: Vec<Float> = Vec::with_capacity(16);
            while let Some(x) = seq.next_element::<Float>()? {
                nums.push(x);
            }
            to_mat4(&nums).map_err(de::Error::custom)
        }
    }

    deserializer.deserialize_any(Mat4Visitor)
}

fn to_mat4(nums: &[Float]) -> Result<Matrix4, String> {
    let cols: [Float; 16] = nums
        .try_into()
        .map_err(|_| format!("Expected 16 values for a matrix, got {}", nums.len()))?;
    Ok(Matrix4::from_cols_array(&cols))
}

/// Helper function: parse a string like "25 25 25" into Vector3
fn parse_vec3_str(s: &str) -> Result<Vector3, String> {
    let parts = parse_float_list(s)?;
    if parts.len() != 3 {
        return Err(format!("Expected 3 values, got {}", parts.len()));
    }
    Ok(Vector3::new(parts[0], parts[1], parts[2]))
}

fn parse_float_list(s: &str) -> Result<Vec<Float>, String> {
    s.split_whitespace()
        .map(|x| x.parse::<Float>().map_err(|e| e.to_string()))
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::approx_zero;

    #[test]
    fn vec3_parses_from_string_and_array() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(deserialize_with = "deser_vec3")]
            v: Vector3,
        }

        let from_str: Holder = serde_json::from_str(r#"{ "v": "0 -0.2 0" }"#).unwrap();
        assert!(approx_zero(from_str.v.y + 0.2));

        let from_arr: Holder = serde_json::from_str(r#"{ "v": [1, 2, 3] }"#).unwrap();
        assert!(approx_zero(from_arr.v.z - 3.0));
    }

    #[test]
    fn mat4_parses_translation_column() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(deserialize_with = "deser_mat4")]
            m: Matrix4,
        }

        let h: Holder = serde_json::from_str(
            r#"{ "m": "1 0 0 0 0 1 0 0 0 0 1 0 0 0.3 0.5 1" }"#,
        ).unwrap();
        assert!(approx_zero(h.m.w_axis.y - 0.3));
        assert!(approx_zero(h.m.w_axis.z - 0.5));
    }

    #[test]
    fn mat4_rejects_wrong_length() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(deserialize_with = "deser_mat4")]
            #[allow(dead_code)]
            m: Matrix4,
        }

        assert!(serde_json::from_str::<Holder>(r#"{ "m": "1 0 0" }"#).is_err());
    }
}
