/// Errors that can occur during convex hull computation.
///
/// When computing the convex hull of a set of points using [`try_convex_hull`],
/// the algorithm can fail if the input is degenerate (too few points, coplanar
/// points) or contains invalid data (NaN values).
///
/// # Example
///
/// ```
/// use colgen3d::transformation::{try_convex_hull, ConvexHullError};
/// use colgen3d::math::Point;
///
/// let flat = vec![
///     Point::new(0.0, 0.0, 0.0),
///     Point::new(1.0, 0.0, 0.0),
///     Point::new(0.0, 1.0, 0.0),
///     Point::new(1.0, 1.0, 0.0),
/// ];
///
/// assert_eq!(
///     try_convex_hull(&flat),
///     Err(ConvexHullError::Degenerate { dimension: 2 })
/// );
/// ```
///
/// [`try_convex_hull`]: crate::transformation::try_convex_hull
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvexHullError {
    /// An internal error occurred during convex hull computation.
    ///
    /// This is generally caused by floating-point inaccuracies on nearly
    /// degenerate inputs.
    #[error("Internal error: {0}")]
    InternalError(&'static str),

    /// The algorithm could not find a valid support point.
    ///
    /// This happens when the input contains NaN or infinite coordinates.
    #[error("Input points are either invalid (NaN) or are almost coplanar.")]
    MissingSupportPoint,

    /// Less than four points were given to the convex hull algorithm.
    #[error("Less than 4 points were given to the convex-hull algorithm.")]
    IncompleteInput,

    /// The points do not span a 3D volume: they are all identical (dimension 0),
    /// collinear (dimension 1) or coplanar (dimension 2).
    #[error("The input points only span a {dimension}-dimensional subspace.")]
    Degenerate {
        /// The dimension of the affine subspace spanned by the points.
        dimension: usize,
    },

    /// A triangle in the hull was not properly constructed: one of its edges has no neighbor.
    #[error("Detected unfinished triangle")]
    UnfinishedTriangle,

    /// An edge of the hull is shared by more than two triangles.
    ///
    /// The error reports the triangle index and the vertex indices of the edge.
    #[error("Detected t-junction for triangle {0}, edge: ({1}, {2})")]
    TJunction(usize, u32, u32),

    /// The hull contains two vertices at the same location.
    #[error("Detected duplicate points {0} and {1}")]
    DuplicatePoints(usize, usize),
}
