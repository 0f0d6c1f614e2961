/*

    Axis Aligned Bounding Box and the point containment test
    used to decide whether a settled ball ended up inside the
    hat volume.

    WARNING: The bounds are asymmetric: lower bound is inclusive,
    upper bound is exclusive, on all three axes. A point resting
    exactly on a max face does NOT count as inside.

    @date: 29 Nov, 2025
    @author: bartu
*/


use crate::prelude::*;

#[derive(Debug, Clone, Copy)]
pub struct AxisAlignedBox {
    pub min: Vector3,
    pub max: Vector3,
}

impl AxisAlignedBox {
    pub fn new_from(min: Vector3, max: Vector3) -> Self {
        // An inverted box (min > max on some axis) is not rejected,
        // it simply contains no point at all.
        Self {
            min,
            max,
        }
    }

    pub fn height(&self) -> Float {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vector3 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: &Vector3) -> bool {
        contains(point, self)
    }
}

/// Point-in-box test over plain value types. The caller is responsible
/// for expressing `point` in the same reference frame as `bbox` before
/// calling (see frame::convert_position), no conversion happens here.
pub fn contains(point: &Vector3, bbox: &AxisAlignedBox) -> bool {
    bbox.min.x <= point.x &&
        bbox.min.y <= point.y &&
        bbox.min.z <= point.z &&

        bbox.max.x > point.x &&
        bbox.max.y > point.y &&
        bbox.max.z > point.z
}


#[cfg(test)]
mod tests {
    use super::*; // access to the outer scope

    fn unit_box() -> AxisAlignedBox {
        AxisAlignedBox::new_from(Vector3::ZERO, Vector3::ONE)
    }

    #[test]
    fn point_strictly_inside() {
        let b = unit_box();
        assert!(contains(&Vector3::new(0.5, 0.5, 0.5), &b));
    }

    #[test]
    fn min_corner_counts_as_inside() {
        let b = unit_box();
        assert!(contains(&Vector3::new(0.0, 0.0, 0.0), &b));
    }

    #[test]
    fn max_corner_counts_as_outside() {
        let b = unit_box();
        assert!(!contains(&Vector3::new(1.0, 1.0, 1.0), &b));
    }

    #[test]
    fn below_min_on_any_axis_is_outside() {
        let b = unit_box();
        assert!(!contains(&Vector3::new(-0.01, 0.5, 0.5), &b));
        assert!(!contains(&Vector3::new(0.5, -0.01, 0.5), &b));
        assert!(!contains(&Vector3::new(0.5, 0.5, -0.01), &b));
    }

    #[test]
    fn at_or_above_max_on_any_axis_is_outside() {
        let b = unit_box();
        assert!(!contains(&Vector3::new(1.0, 0.5, 0.5), &b));
        assert!(!contains(&Vector3::new(0.5, 1.2, 0.5), &b));
        assert!(!contains(&Vector3::new(0.5, 0.5, 1.0), &b));
    }

    #[test]
    fn symmetric_box_boundaries() {
        let b = AxisAlignedBox::new_from(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));
        assert!(!contains(&Vector3::new(1.0, 1.0, 1.0), &b));
        assert!(contains(&Vector3::new(0.999, 0.999, 0.999), &b));
        assert!(contains(&Vector3::new(-1.0, -1.0, -1.0), &b));
    }

    #[test]
    fn inverted_box_contains_nothing() {
        let b = AxisAlignedBox::new_from(Vector3::new(1.0, 0.0, 0.0), Vector3::new(-1.0, 1.0, 1.0));
        assert!(!contains(&b.center(), &b));
        assert!(!contains(&Vector3::ZERO, &b));
    }

    #[test]
    fn height_and_center() {
        let b = AxisAlignedBox::new_from(Vector3::new(-0.1, -0.1, -0.1), Vector3::new(0.1, 0.3, 0.1));
        assert!(approx_zero(b.height() - 0.4));
        assert!(approx_zero(b.center().y - 0.1));
    }
}
