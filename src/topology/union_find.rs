use ena::unify::{InPlaceUnificationTable, UnifyKey};

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub(crate) struct IntKey(pub u32);

impl UnifyKey for IntKey {
    type Value = ();
    fn index(&self) -> u32 {
        self.0
    }
    fn from_index(u: u32) -> IntKey {
        IntKey(u)
    }
    fn tag() -> &'static str {
        "IntKey"
    }
}

/// A union-find over `len` elements identified by their index.
pub(crate) fn union_find(len: usize) -> InPlaceUnificationTable<IntKey> {
    let mut ufind = InPlaceUnificationTable::new();
    for _ in 0..len {
        let _ = ufind.new_key(());
    }

    ufind
}
