/*!
colgen3d
========

**colgen3d** derives convex collision proxies from arbitrary triangle meshes.

Input meshes may be open, inconsistently wound, or non-manifold. They are
registered on a [`CollisionGen`](pipeline::CollisionGen) and turned into one
of three kinds of output:

- a single convex hull enveloping every input ([`CollisionTechnique::SimpleHull`](pipeline::CollisionTechnique)),
- an exact convex decomposition of each repaired input solid,
- an approximate, voxel-based (V-HACD style) convex decomposition of each
  repaired input solid.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![allow(clippy::type_complexity)] // Complains about closures that are fairly simple.
#![deny(unused_qualifications)]

extern crate alloc;
#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod kernel;
pub mod pipeline;
pub mod repair;
pub mod shape;
pub mod topology;
pub mod transformation;
pub mod utils;

/// Aliases for the mathematical types used throughout this crate.
pub mod math {
    pub use na::{Matrix3, Point3, Vector3};

    /// The scalar type used throughout this crate.
    pub use f64 as Real;

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;

    /// The matrix type.
    pub use Matrix3 as Matrix;
}

pub use crate::pipeline::{
    CollisionGen, CollisionGenSettings, CollisionTechnique, ConvexDecomposer, DecompositionMode,
    GenerationReport, InputOutcome, SkipReason, VhacdDecomposer,
};
pub use crate::shape::Mesh;
