use core::fmt;
use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An RGB color with 16-bit components, as stored in the CDX color table
/// (components are fractions of 0xFFFF).
///
/// Serialized as a `#RRGGBB` hex string for IPC friendliness; the low bytes of
/// the components are dropped on serialization and replicated on parse.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u16,
    pub g: u16,
    pub b: u16,
}

impl Color {
    pub const fn rgb(r: u16, g: u16, b: u16) -> Self {
        Self { r, g, b }
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(0xFFFF, 0xFFFF, 0xFFFF)
    }

    fn to_hex(self) -> String {
        format!(
            "#{:02X}{:02X}{:02X}",
            self.r >> 8,
            self.g >> 8,
            self.b >> 8
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let s = s.trim();
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| D::Error::custom("color must be a #RRGGBB hex string (missing '#')"))?;
        if hex.len() != 6 {
            return Err(D::Error::custom(
                "color must be a #RRGGBB hex string (6 hex digits)",
            ));
        }
        let rgb = u32::from_str_radix(hex, 16).map_err(|_| D::Error::custom("invalid hex"))?;
        let widen = |byte: u32| -> u16 {
            let byte = (byte & 0xFF) as u16;
            byte << 8 | byte
        };
        Ok(Color {
            r: widen(rgb >> 16),
            g: widen(rgb >> 8),
            b: widen(rgb),
        })
    }
}

/// A CDX character set identifier.
///
/// The value space mostly mirrors Windows code page numbers (1250-1258, 932,
/// 936, ...) plus the 10000-range Macintosh sets. Value 0 means "unknown".
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Charset(pub u16);

impl Charset {
    pub const UNKNOWN: Charset = Charset(0);
    pub const THAI: Charset = Charset(874);
    pub const SHIFT_JIS: Charset = Charset(932);
    pub const GB_2312: Charset = Charset(936);
    pub const KSC_5601: Charset = Charset(949);
    pub const BIG5: Charset = Charset(950);
    pub const UTF_16: Charset = Charset(1200);
    pub const WIN_EASTERN_EUROPEAN: Charset = Charset(1250);
    pub const WIN_CYRILLIC: Charset = Charset(1251);
    pub const WIN_LATIN_1: Charset = Charset(1252);
    pub const WIN_GREEK: Charset = Charset(1253);
    pub const WIN_TURKISH: Charset = Charset(1254);
    pub const WIN_HEBREW: Charset = Charset(1255);
    pub const WIN_ARABIC: Charset = Charset(1256);
    pub const WIN_BALTIC: Charset = Charset(1257);
    pub const WIN_VIETNAMESE: Charset = Charset(1258);
    pub const MAC_ROMAN: Charset = Charset(10000);
    pub const UTF_8: Charset = Charset(65001);
}

/// A font table entry: document-local font id, character set, and face name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Font {
    pub id: u16,
    pub charset: Charset,
    pub name: String,
}

/// Document-level font table, built once before property decoding and shared
/// read-only afterwards. Fonts are referenced by id from nearly every text
/// property.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontTable {
    fonts: BTreeMap<u16, Font>,
}

impl FontTable {
    pub fn insert(&mut self, font: Font) {
        self.fonts.insert(font.id, font);
    }

    pub fn get(&self, id: u16) -> Option<&Font> {
        self.fonts.get(&id)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Font> {
        self.fonts.values()
    }
}

/// Number of built-in color table entries that exist even when the document
/// carries no color table.
pub const BUILTIN_COLOR_COUNT: usize = 10;

// Indices 0-1 are fixed black/white; 2-9 are the default palette a stored
// table overwrites.
const BUILTIN_COLORS: [Color; BUILTIN_COLOR_COUNT] = [
    Color::black(),
    Color::white(),
    Color::white(),
    Color::black(),
    Color::rgb(0xFFFF, 0, 0),      // red
    Color::rgb(0xFFFF, 0xFFFF, 0), // yellow
    Color::rgb(0, 0xFFFF, 0),      // green
    Color::rgb(0, 0xFFFF, 0xFFFF), // cyan
    Color::rgb(0, 0, 0xFFFF),      // blue
    Color::rgb(0xFFFF, 0, 0xFFFF), // magenta
];

/// Document-level color table.
///
/// Always starts out with the ten built-in entries; a stored color table
/// overwrites entries from index 2 upward (indices 0-1 are fixed black and
/// white regardless of document contents).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTable {
    colors: Vec<Color>,
}

impl Default for ColorTable {
    fn default() -> Self {
        Self {
            colors: BUILTIN_COLORS.to_vec(),
        }
    }
}

impl ColorTable {
    /// First index a stored color table entry lands at.
    pub const FIRST_STORED_INDEX: u16 = 2;

    pub fn get(&self, index: u16) -> Option<Color> {
        self.colors.get(usize::from(index)).copied()
    }

    /// Overwrite or append the entry at `index`. Indices 0-1 are fixed and
    /// silently left untouched.
    pub fn set(&mut self, index: u16, color: Color) {
        let index = usize::from(index);
        if index < usize::from(Self::FIRST_STORED_INDEX) {
            return;
        }
        if index >= self.colors.len() {
            self.colors.resize(index + 1, Color::black());
        }
        self.colors[index] = color;
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Text face attribute bits as stored in an 8-byte font style.
pub const FACE_PLAIN: u16 = 0x0000;
pub const FACE_BOLD: u16 = 0x0001;
pub const FACE_ITALIC: u16 = 0x0002;
pub const FACE_UNDERLINE: u16 = 0x0004;
pub const FACE_OUTLINE: u16 = 0x0008;
pub const FACE_SHADOW: u16 = 0x0010;
pub const FACE_SUBSCRIPT: u16 = 0x0020;
pub const FACE_SUPERSCRIPT: u16 = 0x0040;

/// An 8-byte font style: font id, face bits, size, color index.
///
/// `size_20pt` is in 1/20-point units, matching the binary encoding.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontStyle {
    pub font: u16,
    pub face: u16,
    pub size_20pt: u16,
    pub color: u16,
}

impl FontStyle {
    pub fn size_points(&self) -> f64 {
        f64::from(self.size_20pt) / 20.0
    }

    pub fn is_bold(&self) -> bool {
        self.face & FACE_BOLD != 0
    }

    pub fn is_italic(&self) -> bool {
        self.face & FACE_ITALIC != 0
    }
}
