//! The hash-map and hash-set used by the mesh processing algorithms.

pub use hashbrown::hash_map::Entry;
pub use hashbrown::{HashMap, HashSet};
