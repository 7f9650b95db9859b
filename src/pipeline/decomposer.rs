use crate::math::{Point, Real};
use crate::pipeline::CollisionGenSettings;
use crate::transformation::vhacd::{VHACDParameters, VHACD};
use crate::transformation::DecompositionError;

/// The vertices of a convex hull.
pub type HullPoints = Vec<Point<Real>>;

/// An approximate convex decomposition algorithm.
///
/// The collision generation only relies on this interface, so the algorithm
/// can be swapped without touching the rest of the pipeline.
pub trait ConvexDecomposer: Send + Sync {
    /// Decomposes the volume bounded by a closed triangle mesh into convex hulls.
    ///
    /// Returns the vertices of every hull. A failed decomposition must not
    /// return partial results.
    fn decompose(
        &self,
        points: &[Point<Real>],
        triangles: &[[u32; 3]],
        settings: &CollisionGenSettings,
    ) -> Result<Vec<HullPoints>, DecompositionError>;
}

/// The VHACD approximate convex decomposition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VhacdDecomposer {
    /// Evaluate the clipping planes concurrently (requires the `parallel` feature).
    pub acceleration: bool,
}

impl Default for VhacdDecomposer {
    /// Acceleration is disabled on macOS.
    fn default() -> Self {
        Self {
            acceleration: cfg!(not(target_os = "macos")),
        }
    }
}

impl ConvexDecomposer for VhacdDecomposer {
    fn decompose(
        &self,
        points: &[Point<Real>],
        triangles: &[[u32; 3]],
        settings: &CollisionGenSettings,
    ) -> Result<Vec<HullPoints>, DecompositionError> {
        let params = VHACDParameters {
            acceleration: self.acceleration,
            ..settings.to_vhacd_parameters()
        };

        let hulls = VHACD::decompose(&params, points, triangles)?.into_convex_hulls();
        log::debug!("VHACD convex decomposition generated {} hulls.", hulls.len());
        Ok(hulls.into_iter().map(|hull| hull.points).collect())
    }
}
