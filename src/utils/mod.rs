//! Various unsorted geometrical and logical operators.

pub use self::center::center;
pub use self::cleanup::{remove_unused_points, remove_unused_polygon_points};
pub use self::cov::{center_cov, cov};
pub use self::hashable_partial_eq::HashablePartialEq;
pub use self::interval::Interval;
pub use self::point_in_triangle::{corner_direction, is_point_in_triangle, Orientation};
pub use self::sorted_pair::SortedPair;

mod center;
mod cleanup;
mod cov;
mod hashable_partial_eq;
pub mod hashmap;
mod interval;
mod point_in_triangle;
mod sorted_pair;
