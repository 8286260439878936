//! Typed property decoding.
//!
//! A [`Property`] is just tagged bytes; its semantic type is chosen by the
//! accessor the caller invokes. Every accessor enforces an exact size
//! precondition before interpreting bytes and fails with a position-annotated
//! [`DecodeError::SizeMismatch`] otherwise — payloads are never truncated or
//! padded.
//!
//! The decoder borrows the document-level font/color tables and the object
//! store read-only; the only state it mutates is its own warning list.

use std::any::Any;

use chrono::{NaiveDate, NaiveDateTime};

use cdx_model::{
    Color, ColorTable, ElementList, Font, FontStyle, FontTable, GenericList, Point2, Point3,
    Property, Rect, StyledText,
};

use crate::error::{DecodeError, DecodeWarning, Result};
use crate::primitives;
use crate::resolver::{ObjectStore, ResolveMode};
use crate::text;

/// Per-document property decoder.
pub struct PropertyDecoder<'a> {
    fonts: &'a FontTable,
    colors: &'a ColorTable,
    objects: &'a ObjectStore,
    warnings: Vec<DecodeWarning>,
}

fn size_mismatch(kind: &'static str, expected: &'static str, prop: &Property) -> DecodeError {
    DecodeError::SizeMismatch {
        kind,
        expected,
        actual: prop.len(),
        position: prop.position,
    }
}

macro_rules! fixed_width_accessor {
    ($name:ident, $ty:ty, $reader:path, $bytes:literal, $kind:literal, $expected:literal) => {
        #[doc = concat!("A ", $kind, " stored in exactly ", $expected, ".")]
        pub fn $name(&self, prop: &Property) -> Result<$ty> {
            if prop.len() != $bytes {
                return Err(size_mismatch($kind, $expected, prop));
            }
            $reader(prop.data(), 0).ok_or_else(|| size_mismatch($kind, $expected, prop))
        }
    };
}

impl<'a> PropertyDecoder<'a> {
    pub fn new(fonts: &'a FontTable, colors: &'a ColorTable, objects: &'a ObjectStore) -> Self {
        Self {
            fonts,
            colors,
            objects,
            warnings: Vec::new(),
        }
    }

    /// Warnings recorded so far (charset/font fallbacks).
    pub fn warnings(&self) -> &[DecodeWarning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<DecodeWarning> {
        std::mem::take(&mut self.warnings)
    }

    /// A boolean flag. A zero-length payload means "present", which decodes
    /// to `true`.
    pub fn boolean(&self, prop: &Property) -> Result<bool> {
        match prop.data() {
            [] => Ok(true),
            [byte] => Ok(*byte != 0),
            _ => Err(size_mismatch("boolean", "0 or 1 bytes", prop)),
        }
    }

    /// A generic unsigned integer whose width (1, 2, or 4 bytes) selects the
    /// interpretation.
    pub fn unsigned(&self, prop: &Property) -> Result<u32> {
        let data = prop.data();
        match data.len() {
            1 => Ok(u32::from(data[0])),
            2 => Ok(u32::from(u16::from_le_bytes([data[0], data[1]]))),
            4 => Ok(u32::from_le_bytes([data[0], data[1], data[2], data[3]])),
            _ => Err(size_mismatch("unsigned integer", "1, 2, or 4 bytes", prop)),
        }
    }

    /// A generic signed integer whose width (1, 2, or 4 bytes) selects the
    /// interpretation; narrower widths sign-extend.
    pub fn signed(&self, prop: &Property) -> Result<i32> {
        let data = prop.data();
        match data.len() {
            1 => Ok(i32::from(data[0] as i8)),
            2 => Ok(i32::from(i16::from_le_bytes([data[0], data[1]]))),
            4 => Ok(i32::from_le_bytes([data[0], data[1], data[2], data[3]])),
            _ => Err(size_mismatch("signed integer", "1, 2, or 4 bytes", prop)),
        }
    }

    fixed_width_accessor!(uint8, u8, primitives::read_u8, 1, "u8", "1 byte");
    fixed_width_accessor!(int8, i8, primitives::read_i8, 1, "i8", "1 byte");
    fixed_width_accessor!(uint16, u16, primitives::read_u16, 2, "u16", "2 bytes");
    fixed_width_accessor!(int16, i16, primitives::read_i16, 2, "i16", "2 bytes");
    fixed_width_accessor!(uint32, u32, primitives::read_u32, 4, "u32", "4 bytes");
    fixed_width_accessor!(int32, i32, primitives::read_i32, 4, "i32", "4 bytes");
    fixed_width_accessor!(uint64, u64, primitives::read_u64, 8, "u64", "8 bytes");
    fixed_width_accessor!(int64, i64, primitives::read_i64, 8, "i64", "8 bytes");
    fixed_width_accessor!(float64, f64, primitives::read_f64, 8, "f64", "8 bytes");

    /// A raw array of 64-bit IEEE doubles filling the whole payload.
    pub fn float64_array(&self, prop: &Property) -> Result<Vec<f64>> {
        let data = prop.data();
        if data.len() % 8 != 0 {
            return Err(size_mismatch("f64 array", "a multiple of 8 bytes", prop));
        }
        Ok(data
            .chunks_exact(8)
            .filter_map(|chunk| primitives::read_f64(chunk, 0))
            .collect())
    }

    /// A raw array of 16-bit integers filling the whole payload.
    pub fn int16_array(&self, prop: &Property) -> Result<Vec<i16>> {
        let data = prop.data();
        if data.len() % 2 != 0 {
            return Err(size_mismatch("i16 array", "a multiple of 2 bytes", prop));
        }
        Ok(data
            .chunks_exact(2)
            .map(|chunk| i16::from_le_bytes([chunk[0], chunk[1]]))
            .collect())
    }

    /// A count-prefixed list of 16-bit integers (`count*2 + 2` bytes).
    pub fn int16_list(&self, prop: &Property) -> Result<Vec<i16>> {
        let (count, elems) = primitives::count_prefixed(prop.data(), 2)
            .ok_or_else(|| size_mismatch("i16 list", "count*2 + 2 bytes", prop))?;
        Ok(elems
            .chunks_exact(2)
            .take(count)
            .map(|chunk| i16::from_le_bytes([chunk[0], chunk[1]]))
            .collect())
    }

    /// One fixed-point coordinate, in points.
    pub fn coordinate(&self, prop: &Property) -> Result<f64> {
        if prop.len() != 4 {
            return Err(size_mismatch("coordinate", "4 bytes", prop));
        }
        primitives::read_coordinate(prop.data(), 0)
            .ok_or_else(|| size_mismatch("coordinate", "4 bytes", prop))
    }

    /// A 2D point (stored Y before X).
    pub fn point2(&self, prop: &Property) -> Result<Point2> {
        if prop.len() != 8 {
            return Err(size_mismatch("2D point", "8 bytes", prop));
        }
        primitives::read_point2(prop.data(), 0)
            .ok_or_else(|| size_mismatch("2D point", "8 bytes", prop))
    }

    /// A 3D point (stored Z, Y, X unless `ascending`).
    pub fn point3(&self, prop: &Property, ascending: bool) -> Result<Point3> {
        if prop.len() != 12 {
            return Err(size_mismatch("3D point", "12 bytes", prop));
        }
        primitives::read_point3(prop.data(), 0, ascending)
            .ok_or_else(|| size_mismatch("3D point", "12 bytes", prop))
    }

    /// A rectangle (stored top, left, bottom, right).
    pub fn rect(&self, prop: &Property) -> Result<Rect> {
        if prop.len() != 16 {
            return Err(size_mismatch("rectangle", "16 bytes", prop));
        }
        primitives::read_rect(prop.data(), 0)
            .ok_or_else(|| size_mismatch("rectangle", "16 bytes", prop))
    }

    /// A count-prefixed array of 2D points (`count*8 + 2` bytes).
    pub fn point2_list(&self, prop: &Property) -> Result<Vec<Point2>> {
        let (count, elems) = primitives::count_prefixed(prop.data(), 8)
            .ok_or_else(|| size_mismatch("2D point list", "count*8 + 2 bytes", prop))?;
        Ok((0..count)
            .filter_map(|i| primitives::read_point2(elems, i * 8))
            .collect())
    }

    /// A count-prefixed array of 3D points (`count*12 + 2` bytes).
    pub fn point3_list(&self, prop: &Property, ascending: bool) -> Result<Vec<Point3>> {
        let (count, elems) = primitives::count_prefixed(prop.data(), 12)
            .ok_or_else(|| size_mismatch("3D point list", "count*12 + 2 bytes", prop))?;
        Ok((0..count)
            .filter_map(|i| primitives::read_point3(elems, i * 12, ascending))
            .collect())
    }

    /// A 14-byte timestamp: six sequential u16 fields (year, month, day,
    /// hour, minute, second); the trailing u16 is reserved.
    pub fn date(&self, prop: &Property) -> Result<NaiveDateTime> {
        if prop.len() != 14 {
            return Err(size_mismatch("date", "14 bytes", prop));
        }
        let data = prop.data();
        let field = |i: usize| u16::from_le_bytes([data[i * 2], data[i * 2 + 1]]);

        let invalid = DecodeError::InvalidDate {
            position: prop.position,
        };
        let date = NaiveDate::from_ymd_opt(
            i32::from(field(0)),
            u32::from(field(1)),
            u32::from(field(2)),
        )
        .ok_or(invalid.clone())?;
        date.and_hms_opt(
            u32::from(field(3)),
            u32::from(field(4)),
            u32::from(field(5)),
        )
        .ok_or(invalid)
    }

    /// A scalar object reference (4 bytes). Resolution is rigid: an
    /// unresolved or mistyped id fails the decode.
    pub fn object_ref<T: Any>(&self, prop: &Property) -> Result<&'a T> {
        if prop.len() != 4 {
            return Err(size_mismatch("object reference", "4 bytes", prop));
        }
        let data = prop.data();
        let id = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        self.objects
            .resolve::<T>(id, ResolveMode::Rigid, prop.position)?
            .ok_or(DecodeError::UnresolvedReference {
                id,
                position: prop.position,
            })
    }

    /// A raw array of object references. Resolution is lenient: entries that
    /// do not resolve (or resolve to the wrong type) are dropped.
    pub fn object_ref_array<T: Any>(&self, prop: &Property) -> Result<Vec<&'a T>> {
        let data = prop.data();
        if data.len() % 4 != 0 {
            return Err(size_mismatch(
                "object reference array",
                "a multiple of 4 bytes",
                prop,
            ));
        }
        Ok(self.resolve_ids(data.chunks_exact(4), prop.position))
    }

    /// A count-prefixed array of object references (`count*4 + 2` bytes),
    /// with the same lenient drop policy as [`object_ref_array`](Self::object_ref_array).
    pub fn object_ref_list<T: Any>(&self, prop: &Property) -> Result<Vec<&'a T>> {
        let (count, elems) = primitives::count_prefixed(prop.data(), 4)
            .ok_or_else(|| size_mismatch("object reference list", "count*4 + 2 bytes", prop))?;
        Ok(self.resolve_ids(elems.chunks_exact(4).take(count), prop.position))
    }

    fn resolve_ids<'b, T: Any>(
        &self,
        chunks: impl Iterator<Item = &'b [u8]>,
        position: usize,
    ) -> Vec<&'a T> {
        chunks
            .filter_map(|chunk| {
                let id = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
                self.objects
                    .resolve::<T>(id, ResolveMode::Lenient, position)
                    .ok()
                    .flatten()
            })
            .collect()
    }

    /// A map of object references stored as (key id, value id) pairs. A pair
    /// is dropped when either side fails to resolve.
    pub fn object_ref_map<K: Any, V: Any>(&self, prop: &Property) -> Result<Vec<(&'a K, &'a V)>> {
        let data = prop.data();
        if data.len() % 8 != 0 {
            return Err(size_mismatch(
                "object reference map",
                "a multiple of 8 bytes",
                prop,
            ));
        }
        Ok(data
            .chunks_exact(8)
            .filter_map(|pair| {
                let key_id = u32::from_le_bytes([pair[0], pair[1], pair[2], pair[3]]);
                let value_id = u32::from_le_bytes([pair[4], pair[5], pair[6], pair[7]]);
                let key = self
                    .objects
                    .resolve::<K>(key_id, ResolveMode::Lenient, prop.position)
                    .ok()
                    .flatten()?;
                let value = self
                    .objects
                    .resolve::<V>(value_id, ResolveMode::Lenient, prop.position)
                    .ok()
                    .flatten()?;
                Some((key, value))
            })
            .collect())
    }

    /// A font reference (2-byte index into the font table). A missing index
    /// synthesizes a default font with a recorded warning — never a failure.
    pub fn font_ref(&mut self, prop: &Property) -> Result<Font> {
        if prop.len() != 2 {
            return Err(size_mismatch("font reference", "2 bytes", prop));
        }
        let index = u16::from_le_bytes([prop.data()[0], prop.data()[1]]);
        Ok(text::font_or_default(
            index,
            self.fonts,
            prop.position,
            &mut self.warnings,
        ))
    }

    /// A color reference (2- or 4-byte index into the color table). A missing
    /// index is a hard failure: there is no safe visual default.
    pub fn color_ref(&self, prop: &Property) -> Result<Color> {
        let data = prop.data();
        let index = match data.len() {
            2 => u32::from(u16::from_le_bytes([data[0], data[1]])),
            4 => u32::from_le_bytes([data[0], data[1], data[2], data[3]]),
            _ => return Err(size_mismatch("color reference", "2 or 4 bytes", prop)),
        };
        u16::try_from(index)
            .ok()
            .and_then(|i| self.colors.get(i))
            .ok_or(DecodeError::MissingColor {
                index,
                position: prop.position,
            })
    }

    /// An 8-byte font style (font, face, size in 1/20 pt, color index).
    pub fn font_style(&self, prop: &Property) -> Result<FontStyle> {
        if prop.len() != 8 {
            return Err(size_mismatch("font style", "8 bytes", prop));
        }
        primitives::read_font_style(prop.data(), 0)
            .ok_or_else(|| size_mismatch("font style", "8 bytes", prop))
    }

    /// A styled string: style runs merged into ordered, charset-decoded text
    /// chunks.
    pub fn styled_string(&mut self, prop: &Property) -> Result<StyledText> {
        text::decode_styled_string(prop.data(), prop.position, self.fonts, &mut self.warnings)
    }

    /// An element list: a signed leading count (negative = exclusive, "anything
    /// except these") followed by 16-bit periodic-table element codes.
    pub fn element_list(&self, prop: &Property) -> Result<ElementList> {
        let data = prop.data();
        let mismatch = || size_mismatch("element list", "|count|*2 + 2 bytes", prop);

        let count = primitives::read_i16(data, 0).ok_or_else(mismatch)?;
        let exclusive = count < 0;
        let count = usize::from(count.unsigned_abs());
        if count.checked_mul(2).and_then(|n| n.checked_add(2)) != Some(data.len()) {
            return Err(mismatch());
        }

        let elements = data[2..]
            .chunks_exact(2)
            .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
            .collect();
        Ok(ElementList {
            exclusive,
            elements,
        })
    }

    /// A generic (free-text) list: a signed leading count with the same
    /// exclusive convention as [`element_list`](Self::element_list), then
    /// `|count|` length-prefixed styled strings reduced to plain text.
    pub fn generic_list(&mut self, prop: &Property) -> Result<GenericList> {
        let data = prop.data();
        let mismatch = || {
            size_mismatch(
                "generic list",
                "a signed count then length-prefixed styled strings",
                prop,
            )
        };

        let count = primitives::read_i16(data, 0).ok_or_else(mismatch)?;
        let exclusive = count < 0;
        let count = usize::from(count.unsigned_abs());

        let mut names = Vec::with_capacity(count);
        let mut offset = 2usize;
        for _ in 0..count {
            let len = usize::from(primitives::read_u16(data, offset).ok_or_else(mismatch)?);
            offset += 2;
            let end = offset.checked_add(len).ok_or_else(mismatch)?;
            let entry = data.get(offset..end).ok_or_else(mismatch)?;
            let styled =
                text::decode_styled_string(entry, prop.position, self.fonts, &mut self.warnings)?;
            names.push(styled.plain_text());
            offset = end;
        }
        if offset != data.len() {
            return Err(mismatch());
        }

        Ok(GenericList { exclusive, names })
    }
}

/// Decode a font table property: a u16 record count, then repeated
/// (id, charset, name-length, name-bytes) records. Font names are stored in a
/// single-byte Western code page.
pub fn decode_font_table(prop: &Property) -> Result<FontTable> {
    let data = prop.data();
    let mismatch = || {
        size_mismatch(
            "font table",
            "a u16 count then (id, charset, length, name) records",
            prop,
        )
    };

    let count = usize::from(primitives::read_u16(data, 0).ok_or_else(mismatch)?);
    let mut table = FontTable::default();
    let mut offset = 2usize;
    for _ in 0..count {
        let id = primitives::read_u16(data, offset).ok_or_else(mismatch)?;
        let charset = primitives::read_u16(data, offset + 2).ok_or_else(mismatch)?;
        let name_len = usize::from(primitives::read_u16(data, offset + 4).ok_or_else(mismatch)?);
        offset += 6;
        let end = offset.checked_add(name_len).ok_or_else(mismatch)?;
        let name_bytes = data.get(offset..end).ok_or_else(mismatch)?;
        let (name, _, _) = encoding_rs::WINDOWS_1252.decode(name_bytes);
        table.insert(Font {
            id,
            charset: cdx_model::Charset(charset),
            name: name.into_owned(),
        });
        offset = end;
    }
    if offset != data.len() {
        return Err(mismatch());
    }
    Ok(table)
}

/// Decode a color table property: a u16 entry count, then 3×u16 RGB triples.
/// Stored entries populate indices 2 and up; the built-in entries (fixed
/// black/white at 0-1, default palette through index 9) are present even for
/// an empty table.
pub fn decode_color_table(prop: &Property) -> Result<ColorTable> {
    let data = prop.data();
    let (count, entries) = primitives::count_prefixed(data, 6)
        .ok_or_else(|| size_mismatch("color table", "count*6 + 2 bytes", prop))?;

    let mut table = ColorTable::default();
    for i in 0..count {
        let base = i * 6;
        let channel = |off: usize| {
            u16::from_le_bytes([entries[base + off], entries[base + off + 1]])
        };
        // Entries past u16::MAX have no addressable index; a color reference
        // can never name them, so stop rather than wrap onto indices 0-1.
        let Ok(index) = u16::try_from(usize::from(ColorTable::FIRST_STORED_INDEX) + i) else {
            break;
        };
        table.set(index, Color::rgb(channel(0), channel(2), channel(4)));
    }
    Ok(table)
}
