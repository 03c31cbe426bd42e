use serde::{Deserialize, Serialize};

/// Discretization of the flow model the particle files refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    pub nlay: usize,
    pub nrow: usize,
    pub ncol: usize,
    /// Number of stress periods.
    pub nper: usize,
}

impl GridShape {
    pub fn new(nlay: usize, nrow: usize, ncol: usize, nper: usize) -> Self {
        Self { nlay, nrow, ncol, nper }
    }

    /// Shape of a full (layer, row, column) array.
    pub fn shape3d(&self) -> (usize, usize, usize) {
        (self.nlay, self.nrow, self.ncol)
    }

    /// Shape of a single-layer array.
    pub fn layer_shape(&self) -> (usize, usize, usize) {
        (1, self.nrow, self.ncol)
    }
}

impl Default for GridShape {
    fn default() -> Self {
        Self::new(1, 1, 1, 1)
    }
}
