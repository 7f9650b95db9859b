//! Generation of convex collision proxies from a set of input meshes.
//!
//! Input meshes are registered on a [`CollisionGen`], then turned into hulls by
//! one of the [`CollisionTechnique`]s. The decomposition techniques work on every
//! input independently: an input that cannot be repaired or decomposed is
//! skipped and reported in the [`GenerationReport`], without affecting the
//! other inputs.

pub use self::collision_gen::CollisionGen;
pub use self::decomposer::{ConvexDecomposer, HullPoints, VhacdDecomposer};
pub use self::report::{GenerationReport, InputOutcome, SkipReason};
pub use self::settings::{
    CollisionGenSettings, CollisionTechnique, DecompositionMode, UnknownTechnique,
};

mod collision_gen;
mod decomposer;
mod report;
mod settings;
