//! Object-id reference resolution.
//!
//! CDX properties reference other objects by document-unique integer id, and a
//! reference may point at an object that appears later in the stream. The
//! tree-walking driver therefore populates an [`ObjectStore`] for the whole
//! document (phase one) before decoding id-bearing properties (phase two);
//! with full visibility up front, resolution order never affects the final
//! graph.
//!
//! Instances live in an id-indexed arena rather than as shared references
//! into the object tree, so cyclic and self-referential graphs need no
//! special handling.

use std::any::{type_name, Any};
use std::collections::HashMap;

use crate::error::DecodeError;

/// Resolution-strictness policy, chosen per call site (never globally).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResolveMode {
    /// Unresolved or mistyped references are hard failures. Used for scalar
    /// reference properties.
    Rigid,
    /// Unresolved or mistyped references yield `None`. Used when building
    /// reference arrays/maps, where one bad entry should not discard the
    /// whole collection.
    Lenient,
}

/// Id-indexed arena of materialized domain objects.
///
/// Mutated only by the driver via [`register`](Self::register); every decoding
/// accessor reads it through [`resolve`](Self::resolve). Independent documents
/// use independent stores.
#[derive(Default)]
pub struct ObjectStore {
    instances: HashMap<u32, Box<dyn Any>>,
}

impl ObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `instance` with an object id. Registering an id twice
    /// replaces the earlier instance.
    pub fn register<T: Any>(&mut self, id: u32, instance: T) {
        self.instances.insert(id, Box::new(instance));
    }

    pub fn contains(&self, id: u32) -> bool {
        self.instances.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Resolve an id to the instance registered for it.
    ///
    /// `position` is the stream offset of the referencing property and is
    /// carried into any hard failure.
    pub fn resolve<T: Any>(
        &self,
        id: u32,
        mode: ResolveMode,
        position: usize,
    ) -> Result<Option<&T>, DecodeError> {
        let Some(instance) = self.instances.get(&id) else {
            return match mode {
                ResolveMode::Rigid => Err(DecodeError::UnresolvedReference { id, position }),
                ResolveMode::Lenient => Ok(None),
            };
        };

        match instance.downcast_ref::<T>() {
            Some(value) => Ok(Some(value)),
            None => match mode {
                ResolveMode::Rigid => Err(DecodeError::TypeMismatch {
                    id,
                    expected: type_name::<T>(),
                    position,
                }),
                ResolveMode::Lenient => Ok(None),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Atom(u8);

    #[derive(Debug, PartialEq)]
    struct Bond;

    #[test]
    fn resolves_registered_instances() {
        let mut store = ObjectStore::new();
        store.register(7, Atom(6));

        let atom: &Atom = store.resolve(7, ResolveMode::Rigid, 0).unwrap().unwrap();
        assert_eq!(atom, &Atom(6));
    }

    #[test]
    fn rigid_mode_fails_on_missing_id() {
        let store = ObjectStore::new();
        let err = store.resolve::<Atom>(7, ResolveMode::Rigid, 42).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnresolvedReference {
                id: 7,
                position: 42
            }
        );
    }

    #[test]
    fn rigid_mode_fails_on_wrong_type() {
        let mut store = ObjectStore::new();
        store.register(3, Bond);
        let err = store.resolve::<Atom>(3, ResolveMode::Rigid, 9).unwrap_err();
        assert!(matches!(err, DecodeError::TypeMismatch { id: 3, .. }));
    }

    #[test]
    fn lenient_mode_returns_none_for_both_failure_kinds() {
        let mut store = ObjectStore::new();
        store.register(3, Bond);
        assert_eq!(store.resolve::<Atom>(99, ResolveMode::Lenient, 0).unwrap(), None);
        assert_eq!(store.resolve::<Atom>(3, ResolveMode::Lenient, 0).unwrap(), None);
    }

    #[test]
    fn registration_order_does_not_matter() {
        // Forward reference: the referencing property is decoded only after
        // the driver has registered every id, so late registration works.
        let mut store = ObjectStore::new();
        store.register(2, Atom(8));
        store.register(1, Atom(1));
        let atom: &Atom = store.resolve(2, ResolveMode::Rigid, 0).unwrap().unwrap();
        assert_eq!(atom, &Atom(8));
    }
}
