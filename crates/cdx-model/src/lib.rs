//! Core in-memory data model for CDX documents.
//!
//! CDX is a tag-length-value binary format: a document is a tree of tagged
//! objects, each carrying tagged, length-delimited byte properties. This crate
//! holds the generic tree ([`Object`], [`Property`]) plus the document-level
//! lookup tables and value types that property decoding produces: fonts,
//! colors, styled text, geometry, and element lists.
//!
//! Decoding of property payloads lives in the `cdx-binary` crate; nothing in
//! this crate interprets bytes beyond storing them.

mod geometry;
mod lists;
mod object;
mod rich_text;
mod style;

pub use geometry::{coordinate_to_points, Point2, Point3, Rect};
pub use lists::{ElementList, GenericList};
pub use object::{Object, Property};
pub use rich_text::{StyledText, TextChunk};
pub use style::{Charset, Color, Font, FontStyle, FontTable};
pub use style::{ColorTable, BUILTIN_COLOR_COUNT};
pub use style::{
    FACE_BOLD, FACE_ITALIC, FACE_OUTLINE, FACE_PLAIN, FACE_SHADOW, FACE_SUBSCRIPT,
    FACE_SUPERSCRIPT, FACE_UNDERLINE,
};
