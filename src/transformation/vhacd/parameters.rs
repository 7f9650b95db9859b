use crate::math::Real;
use crate::transformation::voxelization::FillMode;

/// The kind of primitives the voxelized volume is split into.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum PrimitiveMode {
    /// The volume is a set of voxels.
    #[default]
    VoxelBased,
    /// Every voxel is split into tetrahedra.
    TetrahedronBased,
}

/// Parameters controlling the VHACD convex decomposition.
///
/// See <https://github.com/Unity-Technologies/VHACD#parameters> for details.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct VHACDParameters {
    /// Maximum concavity.
    ///
    /// Default: 0.001 (in [0.0, 1.0])
    pub concavity: Real,
    /// Controls the bias toward clipping along symmetry planes.
    ///
    /// Default: 0.05 (in [0.0, 1.0])
    pub alpha: Real,
    /// Controls the bias toward clipping along revolution planes.
    ///
    /// Default: 0.05 (in [0.0, 1.0])
    pub beta: Real,
    /// Hulls with a volume smaller than this fraction of the volume of the
    /// convex hull of the whole input are merged into their best neighbor.
    ///
    /// Default: 0.0001 (in [0.0, 0.01])
    pub min_volume_per_ch: Real,
    /// Maximum number of voxels generated during the voxelization stage.
    ///
    /// Default: 100_000 (in [10_000, 64_000_000])
    pub resolution: u32,
    /// Maximum number of vertices per convex hull.
    ///
    /// Default: 64 (in [4, 1024])
    pub max_num_vertices_per_ch: u32,
    /// Controls the granularity of the search for the best clipping plane.
    ///
    /// Default: 4 (in [1, 16])
    pub plane_downsampling: u32,
    /// Controls the precision of the convex-hull generation process
    /// during the clipping plane selection stage.
    ///
    /// Default: 4 (in [1, 16])
    pub convex_hull_downsampling: u32,
    /// Split voxels into tetrahedra before the decomposition.
    ///
    /// Default: `PrimitiveMode::VoxelBased`
    pub mode: PrimitiveMode,
    /// Controls how the input mesh is voxelized.
    ///
    /// Default: `FillMode::FloodFill`
    pub fill_mode: FillMode,
    /// Approximate the convex hulls of the parts with the clipped hull of
    /// their parent while searching for the best clipping plane.
    ///
    /// Default: `true`
    pub convex_hull_approximation: bool,
    /// The maximum number of convex hulls generated.
    ///
    /// Default: 1024
    pub max_convex_hulls: u32,
    /// The maximum depth of the recursive clipping. `0` derives it from
    /// `max_convex_hulls`.
    ///
    /// Default: 0
    pub max_depth: u32,
    /// Evaluate the candidate clipping planes concurrently. Only has an effect
    /// if the `parallel` feature is enabled.
    ///
    /// Default: `true`
    pub acceleration: bool,
}

impl Default for VHACDParameters {
    fn default() -> Self {
        Self {
            resolution: 100_000,
            concavity: 0.001,
            plane_downsampling: 4,
            convex_hull_downsampling: 4,
            alpha: 0.05,
            beta: 0.05,
            mode: PrimitiveMode::VoxelBased,
            max_num_vertices_per_ch: 64,
            min_volume_per_ch: 0.0001,
            convex_hull_approximation: true,
            max_convex_hulls: 1024,
            max_depth: 0,
            fill_mode: FillMode::FloodFill,
            acceleration: true,
        }
    }
}
