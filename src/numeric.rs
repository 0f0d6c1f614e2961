/*

    Declare numeric types used throughout this repo.

    WARNING: If you like to use f64 instead of f32
    during computations, you need to change both of these:
    pub type Float = f64;
    pub type Vector3 = DVec3;

    @date: 28 Nov, 2025
    @author: Bartu
*/

use bevy_math::{Mat4, Vec3, Vec4};

pub type Float = f32; // WARNING: If you want to change it to f64, don't forget to update Vector3 and Matrix4 types
pub type Vector3 = Vec3;
pub type Matrix4 = Mat4;
pub type Vector4 = Vec4;

pub fn approx_zero(x: Float) -> bool {
    x.abs() < 1e-5
}

pub fn transform_point(mat: &Matrix4, v: &Vector3) -> Vector3 {
    let v4 = Vector4::new(v.x, v.y, v.z, 1.0);
    let r = *mat * v4;
    Vector3::new(r.x, r.y, r.z)
}

pub fn transform_dir(mat: &Matrix4, v: &Vector3) -> Vector3 {
    // Only difference from transform_point is that last component
    // w = 0
    let v4 = Vector4::new(v.x, v.y, v.z, 0.0);
    let r = *mat * v4;
    Vector3::new(r.x, r.y, r.z)
}
