//! Little-endian scalar and fixed-point coordinate reads.
//!
//! All readers are bounds-checked and return `None` rather than panicking on
//! short buffers; the property layer maps `None` to a `SizeMismatch` with the
//! property's stream position.
//!
//! Compound geometric values use the format's historical component orderings:
//! a 2D point stores Y before X, a 3D point stores Z, Y, X (unless the
//! ascending-order flag asks for X, Y, Z), and a rectangle stores top, left,
//! bottom, right. These orderings are load-bearing and must not be "fixed".

use cdx_model::{coordinate_to_points, Point2, Point3, Rect};

pub fn read_u8(data: &[u8], offset: usize) -> Option<u8> {
    data.get(offset).copied()
}

pub fn read_i8(data: &[u8], offset: usize) -> Option<i8> {
    read_u8(data, offset).map(|v| v as i8)
}

pub fn read_u16(data: &[u8], offset: usize) -> Option<u16> {
    let bytes = data.get(offset..offset.checked_add(2)?)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

pub fn read_i16(data: &[u8], offset: usize) -> Option<i16> {
    read_u16(data, offset).map(|v| v as i16)
}

pub fn read_u32(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset.checked_add(4)?)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

pub fn read_i32(data: &[u8], offset: usize) -> Option<i32> {
    read_u32(data, offset).map(|v| v as i32)
}

pub fn read_u64(data: &[u8], offset: usize) -> Option<u64> {
    let bytes = data.get(offset..offset.checked_add(8)?)?;
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    Some(u64::from_le_bytes(buf))
}

pub fn read_i64(data: &[u8], offset: usize) -> Option<i64> {
    read_u64(data, offset).map(|v| v as i64)
}

/// A 64-bit IEEE double stored as its little-endian bit pattern.
pub fn read_f64(data: &[u8], offset: usize) -> Option<f64> {
    read_u64(data, offset).map(f64::from_bits)
}

/// One fixed-point coordinate (i32 in units of 1/65536 point), in points.
pub fn read_coordinate(data: &[u8], offset: usize) -> Option<f64> {
    read_i32(data, offset).map(coordinate_to_points)
}

/// An 8-byte 2D point. The stream stores Y first, then X.
pub fn read_point2(data: &[u8], offset: usize) -> Option<Point2> {
    let y = read_coordinate(data, offset)?;
    let x = read_coordinate(data, offset.checked_add(4)?)?;
    Some(Point2 { x, y })
}

/// A 12-byte 3D point. The stream stores Z, Y, X; `ascending` selects the
/// explicit X, Y, Z variant some producers emit.
pub fn read_point3(data: &[u8], offset: usize, ascending: bool) -> Option<Point3> {
    let a = read_coordinate(data, offset)?;
    let b = read_coordinate(data, offset.checked_add(4)?)?;
    let c = read_coordinate(data, offset.checked_add(8)?)?;
    Some(if ascending {
        Point3 { x: a, y: b, z: c }
    } else {
        Point3 { x: c, y: b, z: a }
    })
}

/// A 16-byte rectangle. The stream stores top, left, bottom, right.
pub fn read_rect(data: &[u8], offset: usize) -> Option<Rect> {
    let top = read_coordinate(data, offset)?;
    let left = read_coordinate(data, offset.checked_add(4)?)?;
    let bottom = read_coordinate(data, offset.checked_add(8)?)?;
    let right = read_coordinate(data, offset.checked_add(12)?)?;
    Some(Rect {
        left,
        top,
        right,
        bottom,
    })
}

/// An 8-byte font style: font id, face bits, size (1/20 pt), color index.
pub fn read_font_style(data: &[u8], offset: usize) -> Option<cdx_model::FontStyle> {
    Some(cdx_model::FontStyle {
        font: read_u16(data, offset)?,
        face: read_u16(data, offset.checked_add(2)?)?,
        size_20pt: read_u16(data, offset.checked_add(4)?)?,
        color: read_u16(data, offset.checked_add(6)?)?,
    })
}

/// Split a count-prefixed payload: a u16 element count at offset 0 followed by
/// exactly `count` elements of `elem_size` bytes.
///
/// Returns `None` unless `count * elem_size + 2 == data.len()` holds exactly.
pub fn count_prefixed(data: &[u8], elem_size: usize) -> Option<(usize, &[u8])> {
    let count = usize::from(read_u16(data, 0)?);
    let expected = count.checked_mul(elem_size)?.checked_add(2)?;
    if expected != data.len() {
        return None;
    }
    Some((count, &data[2..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(value: f64) -> [u8; 4] {
        ((value * 65536.0) as i32).to_le_bytes()
    }

    #[test]
    fn point2_stores_y_before_x() {
        let mut data = Vec::new();
        data.extend_from_slice(&coord(1.0)); // y
        data.extend_from_slice(&coord(2.0)); // x
        let p = read_point2(&data, 0).unwrap();
        assert_eq!(p.x, 2.0);
        assert_eq!(p.y, 1.0);
    }

    #[test]
    fn point3_stores_z_y_x_unless_ascending() {
        let mut data = Vec::new();
        data.extend_from_slice(&coord(3.0));
        data.extend_from_slice(&coord(2.0));
        data.extend_from_slice(&coord(1.0));

        let p = read_point3(&data, 0, false).unwrap();
        assert_eq!((p.x, p.y, p.z), (1.0, 2.0, 3.0));

        let p = read_point3(&data, 0, true).unwrap();
        assert_eq!((p.x, p.y, p.z), (3.0, 2.0, 1.0));
    }

    #[test]
    fn rect_stores_top_left_bottom_right() {
        let mut data = Vec::new();
        data.extend_from_slice(&coord(0.0)); // top
        data.extend_from_slice(&coord(0.0)); // left
        data.extend_from_slice(&coord(10.0)); // bottom
        data.extend_from_slice(&coord(20.0)); // right
        let r = read_rect(&data, 0).unwrap();
        assert_eq!(r.left, 0.0);
        assert_eq!(r.top, 0.0);
        assert_eq!(r.right, 20.0);
        assert_eq!(r.bottom, 10.0);
    }

    #[test]
    fn count_prefix_must_account_for_every_byte() {
        let mut data = Vec::new();
        data.extend_from_slice(&2u16.to_le_bytes());
        data.extend_from_slice(&[0u8; 16]);
        let (count, rest) = count_prefixed(&data, 8).unwrap();
        assert_eq!(count, 2);
        assert_eq!(rest.len(), 16);

        // One trailing byte too many.
        data.push(0);
        assert!(count_prefixed(&data, 8).is_none());
    }

    #[test]
    fn scalar_reads_are_bounds_checked() {
        let data = [1u8, 2];
        assert_eq!(read_u16(&data, 0), Some(0x0201));
        assert_eq!(read_u16(&data, 1), None);
        assert_eq!(read_u32(&data, 0), None);
        assert_eq!(read_u8(&data, 2), None);
    }
}
