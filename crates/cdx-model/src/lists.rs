use serde::{Deserialize, Serialize};

/// A set of periodic-table element codes, optionally exclusive.
///
/// `exclusive` means "anything except these" (the stored list carried a
/// negative leading count).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementList {
    pub exclusive: bool,
    pub elements: Vec<u16>,
}

/// A set of free-text tokens (generic nicknames), optionally exclusive.
///
/// Same exclusive-flag convention as [`ElementList`]; the stored entries are
/// styled strings reduced to their plain text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericList {
    pub exclusive: bool,
    pub names: Vec<String>,
}
