use serde::{Deserialize, Serialize};

/// Convert a raw CDX fixed-point coordinate to points.
///
/// CDX coordinates are signed 32-bit integers in units of 1/65536 point. This
/// is a legacy scaled-integer representation, not IEEE float.
pub fn coordinate_to_points(raw: i32) -> f64 {
    f64::from(raw) / 65536.0
}

/// A 2D point in points.
///
/// The binary encoding stores the Y component before the X component; the
/// decoder in `cdx-binary` honors that ordering, this type is purely the
/// decoded result.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

/// A 3D point in points (stored Z, Y, X in the stream unless the ascending
/// order flag is set).
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A rectangle in points (stored top, left, bottom, right in the stream).
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_point_conversion() {
        assert_eq!(coordinate_to_points(65536), 1.0);
        assert_eq!(coordinate_to_points(-32768), -0.5);
        assert_eq!(coordinate_to_points(0), 0.0);
    }
}
