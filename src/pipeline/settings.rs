use crate::math::Real;
use crate::transformation::vhacd::{PrimitiveMode, VHACDParameters};

/// The kind of collision proxies to generate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(u32)]
pub enum CollisionTechnique {
    /// A single convex hull enveloping the points of every input.
    #[default]
    SimpleHull = 0,
    /// An exact decomposition of every repaired input into convex cells.
    ExactDecomposition = 1,
    /// An approximate, voxel-based, decomposition of every repaired input.
    ApproximateDecomposition = 2,
}

/// Error returned when converting an unknown value into a [`CollisionTechnique`].
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
#[error("unknown collision technique: {0}")]
pub struct UnknownTechnique(pub u32);

impl TryFrom<u32> for CollisionTechnique {
    type Error = UnknownTechnique;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CollisionTechnique::SimpleHull),
            1 => Ok(CollisionTechnique::ExactDecomposition),
            2 => Ok(CollisionTechnique::ApproximateDecomposition),
            _ => Err(UnknownTechnique(value)),
        }
    }
}

impl From<CollisionTechnique> for u32 {
    fn from(technique: CollisionTechnique) -> u32 {
        technique as u32
    }
}

/// How the approximate decomposition subdivides the voxelized input.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum DecompositionMode {
    /// The parts are sets of voxels.
    #[default]
    Voxel,
    /// The voxels are split into tetrahedra first.
    Tetrahedron,
}

/// Parameters of the collision generation.
///
/// Every technique ignores the fields it does not use.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CollisionGenSettings {
    /// Uniform scale applied to every output hull, about its bounding sphere center.
    pub scale: Real,
    /// Outward displacement of the input points of the simple hull, relative to
    /// the bounding sphere diameter of their mesh.
    pub padding: Real,
    /// Maximum number of voxels of the approximate decomposition.
    pub resolution: u32,
    /// Maximum number of hulls generated by the approximate decomposition, per input.
    pub max_hulls: u32,
    /// Maximum number of vertices of each hull of the approximate decomposition.
    ///
    /// A convex hull needs at least 4 vertices: values below 4 are treated as 4,
    /// so the output hulls may have more vertices than this in that case.
    pub max_hull_vertices: u32,
    /// Hulls smaller than this fraction of the input hull volume are merged into a neighbor.
    pub min_hull_volume: Real,
    /// Downsampling factor of the clipping planes and hull points of the approximate decomposition.
    pub downsample: u32,
    /// Maximum concavity tolerated before a part is split again.
    pub concavity: Real,
    /// Maximum recursion depth of the clipping. `0` derives it from `max_hulls`.
    pub depth_planes: u32,
    /// The primitives the approximate decomposition works on.
    pub mode: DecompositionMode,
}

impl Default for CollisionGenSettings {
    fn default() -> Self {
        Self {
            scale: 1.0,
            padding: 0.0,
            resolution: 100_000,
            max_hulls: 1024,
            max_hull_vertices: 64,
            min_hull_volume: 0.0001,
            downsample: 4,
            concavity: 0.001,
            depth_planes: 0,
            mode: DecompositionMode::Voxel,
        }
    }
}

impl CollisionGenSettings {
    /// The VHACD parameters matching these settings.
    pub fn to_vhacd_parameters(&self) -> VHACDParameters {
        VHACDParameters {
            resolution: self.resolution,
            concavity: self.concavity,
            plane_downsampling: self.downsample,
            convex_hull_downsampling: self.downsample,
            max_convex_hulls: self.max_hulls,
            max_num_vertices_per_ch: self.max_hull_vertices,
            min_volume_per_ch: self.min_hull_volume,
            max_depth: self.depth_planes,
            mode: match self.mode {
                DecompositionMode::Voxel => PrimitiveMode::VoxelBased,
                DecompositionMode::Tetrahedron => PrimitiveMode::TetrahedronBased,
            },
            ..VHACDParameters::default()
        }
    }
}

#[cfg(test)]
mod test {
    use super::{CollisionGenSettings, CollisionTechnique, DecompositionMode, UnknownTechnique};
    use crate::transformation::vhacd::PrimitiveMode;

    #[test]
    fn technique_from_u32() {
        for technique in [
            CollisionTechnique::SimpleHull,
            CollisionTechnique::ExactDecomposition,
            CollisionTechnique::ApproximateDecomposition,
        ] {
            assert_eq!(CollisionTechnique::try_from(u32::from(technique)), Ok(technique));
        }

        assert_eq!(CollisionTechnique::try_from(3), Err(UnknownTechnique(3)));
    }

    #[test]
    fn settings_to_vhacd_parameters() {
        let settings = CollisionGenSettings {
            max_hulls: 12,
            downsample: 2,
            depth_planes: 5,
            mode: DecompositionMode::Tetrahedron,
            ..CollisionGenSettings::default()
        };
        let params = settings.to_vhacd_parameters();

        assert_eq!(params.max_convex_hulls, 12);
        assert_eq!(params.plane_downsampling, 2);
        assert_eq!(params.convex_hull_downsampling, 2);
        assert_eq!(params.max_depth, 5);
        assert_eq!(params.resolution, 100_000);
        assert_eq!(params.mode, PrimitiveMode::TetrahedronBased);
    }
}
