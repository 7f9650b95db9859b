use crate::math::Real;

bitflags::bitflags! {
    /// The optional steps of the repair pipeline.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
    pub struct RepairFlags: u8 {
        /// Merge the border edges whose endpoints coincide.
        const STITCH_BORDERS = 1;
        /// Cap every remaining border loop.
        const FILL_HOLES = 1 << 1;
        /// Round-trip the closed boundary through its volumetric representation.
        const ENFORCE_SOLIDITY = 1 << 2;
    }
}

impl Default for RepairFlags {
    fn default() -> Self {
        RepairFlags::all()
    }
}

/// Parameters of [`repair_mesh`](super::repair_mesh).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct RepairParameters {
    /// The steps to run.
    pub flags: RepairFlags,
    /// Maximum distance between two endpoints for border edges to be stitched.
    ///
    /// Zero only stitches exactly coincident endpoints.
    pub stitch_tolerance: Real,
}

impl Default for RepairParameters {
    fn default() -> Self {
        Self {
            flags: RepairFlags::default(),
            stitch_tolerance: 0.0,
        }
    }
}
