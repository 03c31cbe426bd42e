//! The host model that owns the particle-tracking input packages.
//!
//! Packages are appended by the caller; constructing a package never
//! registers it anywhere.

use std::path::{Path, PathBuf};

use log::info;

use crate::check::CheckReport;
use crate::error::PackageError;
use crate::grid::GridShape;

/// A single input file the host model knows how to write.
pub trait Package {
    /// Short package tag, e.g. `MPSIM`.
    fn name(&self) -> &'static str;

    /// Where `write_file` puts the package.
    fn file_path(&self) -> &Path;

    /// Creates or overwrites the package file.
    ///
    /// # Errors
    ///
    /// Returns `PackageError` if required data is missing or the file cannot
    /// be written.
    fn write_file(&self) -> Result<(), PackageError>;

    /// Runs the package's consistency checks. The default has none.
    fn check(&self) -> CheckReport {
        CheckReport::new(self.name())
    }
}

/// MODPATH host model: name, workspace, grid, and an explicit package list.
pub struct Modpath {
    name: String,
    model_ws: PathBuf,
    grid: GridShape,
    packages: Vec<Box<dyn Package>>,
}

impl Modpath {
    pub fn new(name: impl Into<String>, model_ws: impl Into<PathBuf>, grid: GridShape) -> Self {
        Self {
            name: name.into(),
            model_ws: model_ws.into(),
            grid,
            packages: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model_ws(&self) -> &Path {
        &self.model_ws
    }

    pub fn grid(&self) -> GridShape {
        self.grid
    }

    /// `<model_ws>/<name>.<extension>`
    pub fn package_path(&self, extension: &str) -> PathBuf {
        self.model_ws.join(format!("{}.{}", self.name, extension))
    }

    pub fn add_package(&mut self, package: Box<dyn Package>) {
        info!("Adding {} package to model '{}'", package.name(), self.name);
        self.packages.push(package);
    }

    pub fn packages(&self) -> &[Box<dyn Package>] {
        &self.packages
    }

    pub fn get_package(&self, name: &str) -> Option<&dyn Package> {
        self.packages
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
            .map(|p| p.as_ref())
    }

    /// One report per package, in insertion order.
    pub fn check(&self) -> Vec<CheckReport> {
        self.packages.iter().map(|p| p.check()).collect()
    }

    /// Writes every package in insertion order, stopping at the first failure.
    pub fn write_input(&self) -> Result<(), PackageError> {
        for package in &self.packages {
            info!("Writing {} to {}", package.name(), package.file_path().display());
            package.write_file()?;
        }
        Ok(())
    }
}
