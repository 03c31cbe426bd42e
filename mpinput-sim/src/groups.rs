//! Particle release groups (items 12-21 of the simulation file).
//!
//! The group-level option numbers written on the placement line are derived
//! from which variant holds the data, so they can never disagree with it.

use serde::{Deserialize, Serialize};

use mpinput_core::Array3d;

/// Inclusive cell box, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellBounds {
    pub min_layer: usize,
    pub min_row: usize,
    pub min_column: usize,
    pub max_layer: usize,
    pub max_row: usize,
    pub max_column: usize,
}

/// Spatial extent of a group.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupRegion {
    /// Region option 1.
    Bounds(CellBounds),
    /// Region option 2: mask over every layer.
    Mask(Array3d<i32>),
    /// Region option 3: mask over one layer (0-based).
    LayerMask { layer: usize, mask: Array3d<i32> },
}

impl GroupRegion {
    pub fn option(&self) -> u8 {
        match self {
            GroupRegion::Bounds(_) => 1,
            GroupRegion::Mask(_) => 2,
            GroupRegion::LayerMask { .. } => 3,
        }
    }
}

/// Particles on one cell face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacePlacement {
    pub iface: u8,
    pub row_count: u32,
    pub column_count: u32,
}

/// Particles distributed through the cell volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellParticleCount {
    pub layer_count: u32,
    pub row_count: u32,
    pub column_count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParticlePlacement {
    /// Placement option 1.
    Faces(Vec<FacePlacement>),
    /// Placement option 2.
    Cells(CellParticleCount),
}

impl ParticlePlacement {
    pub fn option(&self) -> u8 {
        match self {
            ParticlePlacement::Faces(_) => 1,
            ParticlePlacement::Cells(_) => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ReleaseSchedule {
    /// Release option 1: one release at the start time.
    Single,
    /// Release option 2: evenly spaced releases.
    Repeated { period_length: f64, event_count: u32 },
}

impl ReleaseSchedule {
    pub fn option(&self) -> u8 {
        match self {
            ReleaseSchedule::Single => 1,
            ReleaseSchedule::Repeated { .. } => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseGroup {
    pub name: String,
    pub grid: u32,
    pub region: GroupRegion,
    pub placement: ParticlePlacement,
    pub release_start_time: f64,
    pub release: ReleaseSchedule,
    pub head_option: u8,
}

impl ReleaseGroup {
    /// `group_1`: single release at time 0 from face 6 of the first cell.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            grid: 1,
            region: GroupRegion::Bounds(CellBounds::default()),
            placement: ParticlePlacement::Faces(vec![FacePlacement {
                iface: 6,
                row_count: 1,
                column_count: 1,
            }]),
            release_start_time: 0.0,
            release: ReleaseSchedule::Single,
            head_option: 1,
        }
    }
}

impl Default for ReleaseGroup {
    fn default() -> Self {
        Self::new("group_1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_numbers_follow_variants() {
        let mask = Array3d::constant("mask", (1, 2, 2), 1);
        assert_eq!(GroupRegion::Bounds(CellBounds::default()).option(), 1);
        assert_eq!(GroupRegion::Mask(mask.clone()).option(), 2);
        assert_eq!(GroupRegion::LayerMask { layer: 0, mask }.option(), 3);

        let cells = CellParticleCount { layer_count: 2, row_count: 2, column_count: 2 };
        assert_eq!(ParticlePlacement::Cells(cells).option(), 2);
        assert_eq!(ReleaseSchedule::Repeated { period_length: 10.0, event_count: 3 }.option(), 2);
    }

    #[test]
    fn default_group_uses_single_face_release() {
        let group = ReleaseGroup::default();
        assert_eq!(group.name, "group_1");
        assert_eq!(group.region.option(), 1);
        assert_eq!(group.placement.option(), 1);
        assert_eq!(group.release.option(), 1);
    }
}
