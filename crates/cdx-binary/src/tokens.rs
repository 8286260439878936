//! Enumerated value ⇄ token tables for the symbolic (XML) exchange form.
//!
//! Each enumerated domain is an ordered association list searched linearly
//! with first-match semantics in both directions. The ordering is part of the
//! contract: tables may legitimately map several values to the same token
//! (legacy variants), and `to_token` must deterministically pick the first.
//! Do not replace the linear scan with a hash lookup.
//!
//! The catalogue below covers the domains this core ships; the mechanism is
//! the contract, further domains are configuration data.

use crate::error::DecodeError;

/// An ordered (value, token) table for one enumerated domain.
#[derive(Debug, Clone, Copy)]
pub struct EnumTable {
    domain: &'static str,
    entries: &'static [(i32, &'static str)],
}

impl EnumTable {
    pub const fn new(domain: &'static str, entries: &'static [(i32, &'static str)]) -> Self {
        Self { domain, entries }
    }

    pub fn domain(&self) -> &'static str {
        self.domain
    }

    /// The token of the first entry whose value matches.
    pub fn to_token(&self, value: i32) -> Result<&'static str, DecodeError> {
        self.entries
            .iter()
            .find(|(v, _)| *v == value)
            .map(|(_, token)| *token)
            .ok_or(DecodeError::UnknownValue {
                domain: self.domain,
                value,
            })
    }

    /// The value of the first entry whose token matches exactly.
    pub fn to_value(&self, token: &str) -> Result<i32, DecodeError> {
        self.entries
            .iter()
            .find(|(_, t)| *t == token)
            .map(|(value, _)| *value)
            .ok_or_else(|| DecodeError::UnknownToken {
                domain: self.domain,
                token: token.to_string(),
            })
    }

    pub fn entries(&self) -> &'static [(i32, &'static str)] {
        self.entries
    }
}

/// Text justification.
pub const JUSTIFICATION: EnumTable = EnumTable::new(
    "justification",
    &[
        (-1, "Right"),
        (0, "Left"),
        (1, "Center"),
        (2, "Full"),
        (3, "Above"),
        (4, "Below"),
        (5, "Auto"),
    ],
);

/// Drawing-space type of a document.
pub const DRAWING_SPACE: EnumTable =
    EnumTable::new("drawing space", &[(0, "Pages"), (1, "Poster")]);

/// Node (atom) type.
///
/// Value 13 (link node) has no verified token and is deliberately absent:
/// converting it in either direction fails explicitly rather than guessing.
pub const NODE_TYPE: EnumTable = EnumTable::new(
    "node type",
    &[
        (0, "Unspecified"),
        (1, "Element"),
        (2, "ElementList"),
        (3, "ElementListNickname"),
        (4, "Nickname"),
        (5, "Fragment"),
        (6, "Formula"),
        (7, "GenericNickname"),
        (8, "AnonymousAlternativeGroup"),
        (9, "NamedAlternativeGroup"),
        (10, "MultiAttachment"),
        (11, "VariableAttachment"),
        (12, "ExternalConnectionPoint"),
    ],
);

/// Bond order (bit values; fractional orders have their own bits).
pub const BOND_ORDER: EnumTable = EnumTable::new(
    "bond order",
    &[
        (0x0001, "1"),
        (0x0002, "2"),
        (0x0004, "3"),
        (0x0008, "4"),
        (0x0010, "0.5"),
        (0x0020, "1.5"),
        (0x0040, "2.5"),
        (0x0080, "3.5"),
        (0x0100, "4.5"),
        (0x0200, "5.5"),
        (0x0400, "dative"),
        (0x0800, "ionic"),
        (0x1000, "hydrogen"),
        (0x2000, "threecenter"),
    ],
);

/// Bond display style.
pub const BOND_DISPLAY: EnumTable = EnumTable::new(
    "bond display",
    &[
        (0, "Solid"),
        (1, "Dash"),
        (2, "Hash"),
        (3, "WedgedHashBegin"),
        (4, "WedgedHashEnd"),
        (5, "Bold"),
        (6, "WedgeBegin"),
        (7, "WedgeEnd"),
        (8, "Wavy"),
        (9, "HollowWedgeBegin"),
        (10, "HollowWedgeEnd"),
        (11, "WavyWedgeBegin"),
        (12, "WavyWedgeEnd"),
        (13, "Dot"),
        (14, "DashDot"),
    ],
);
