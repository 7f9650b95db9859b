pub use self::tetrahedron_set::{Tetrahedron, TetrahedronSet};
pub use self::voxel_set::{Voxel, VoxelSet};
pub use self::voxelized_volume::{FillMode, VoxelValue, VoxelizedVolume};

mod tetrahedron_set;
mod tri_box_overlap;
mod voxel_set;
mod voxelized_volume;
