/// A node in the decoded CDX object tree.
///
/// Objects own their children and properties exclusively. The eventual domain
/// object an id-bearing node maps to is *not* stored here: the reference
/// resolver in `cdx-binary` keeps an id-indexed arena of instances so the tree
/// never holds shared mutable references.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    /// Object tag identifying the node's semantic kind.
    pub tag: u16,
    /// Document-unique object id. `0` means "no id"; only id-bearing objects
    /// can be the target of references.
    pub id: u32,
    /// Byte offset of the object header in the source stream, for diagnostics.
    pub position: usize,
    pub children: Vec<Object>,
    pub properties: Vec<Property>,
}

/// A single tagged, length-delimited byte payload attached to an object.
///
/// A property has no fixed type by itself; its semantic type is chosen by the
/// decoding accessor the caller invokes, which enforces a size precondition at
/// call time. The payload is immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Property tag identifying its semantic meaning.
    pub tag: u16,
    /// Byte offset of the property header in the source stream.
    pub position: usize,
    data: Vec<u8>,
}

impl Property {
    pub fn new(tag: u16, position: usize, data: Vec<u8>) -> Self {
        Self {
            tag,
            position,
            data,
        }
    }

    /// Raw payload bytes. The declared TLV length and `data().len()` are the
    /// same thing; the tokenizer never hands over a partial payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_payload_is_length_exact() {
        let p = Property::new(0x0204, 17, vec![1, 2, 3]);
        assert_eq!(p.len(), 3);
        assert_eq!(p.data(), &[1, 2, 3]);
        assert!(!p.is_empty());
    }
}
