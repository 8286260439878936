//! Typed property decoding for the legacy CDX binary chemical-structure
//! format.
//!
//! CDX documents are a tag-length-value stream: a tree of tagged objects,
//! each carrying tagged, length-delimited byte properties. An external
//! tokenizer walks the stream and hands this crate `(tag, length, bytes,
//! position)` tuples as [`cdx_model::Property`] values; this crate interprets
//! those payloads:
//!
//! - [`primitives`]: little-endian scalars and fixed-point coordinates,
//!   honoring the format's historical component orderings (a 2D point stores
//!   Y before X; a rectangle stores top, left, bottom, right).
//! - [`PropertyDecoder`]: the typed accessors — one per semantic property
//!   type — each enforcing an exact size precondition.
//! - [`ObjectStore`]: the id → instance arena that turns 4-byte object ids
//!   into live handles, including ids that point forward in the stream.
//! - styled string assembly: font/charset/color runs merged into ordered
//!   [`cdx_model::TextChunk`]s, re-encoded from legacy code pages.
//! - [`tokens`]: the ordered value ⇄ token tables used by the symbolic (XML)
//!   exchange form.
//!
//! Decoding a document is single-threaded and synchronous; the font table,
//! color table, and object store are built once per document and read-only
//! during property decoding, so independent documents can be decoded
//! concurrently on independent instances.
//!
//! Hard failures (size mismatches, unresolved scalar references, missing
//! colors, unknown tokens) propagate as [`DecodeError`] with the byte
//! position of the offending property. Cosmetic degradations (an unmapped
//! charset, a missing font index) fall back to defaults and are recorded as
//! [`DecodeWarning`]s instead, with a deduplicated `log::warn!`.

mod decode;
mod error;
pub mod primitives;
mod resolver;
mod text;
pub mod tokens;

pub use decode::{decode_color_table, decode_font_table, PropertyDecoder};
pub use error::{DecodeError, DecodeWarning, Result};
pub use resolver::{ObjectStore, ResolveMode};
pub use tokens::EnumTable;
