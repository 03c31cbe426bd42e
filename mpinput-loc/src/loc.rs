use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};

use mpinput_core::{CheckReport, GridShape, Modpath, Package, PackageError};

use crate::record::ParticleRecord;
use crate::table::{FloatFormat, LocTable};
use crate::text::TextPolicy;
use crate::writer::WriteStrategy;

/// MODPATH starting locations file package (`.loc`).
pub struct StartingLocations {
    file_path: PathBuf,
    grid: GridShape,
    input_style: i32,
    pub heading: String,
    pub data: Vec<ParticleRecord>,
    pub strategy: WriteStrategy,
    pub float_format: FloatFormat,
    pub text_policy: TextPolicy,
}

impl StartingLocations {
    pub const EXTENSION: &'static str = "loc";

    /// Creates an empty starting locations package.
    ///
    /// # Errors
    ///
    /// Returns `PackageError::UnsupportedInputStyle` for any input style but 1.
    pub fn new(model: &Modpath, input_style: i32) -> Result<Self, PackageError> {
        if input_style != 1 {
            return Err(PackageError::UnsupportedInputStyle(input_style));
        }
        Ok(Self {
            file_path: model.package_path(Self::EXTENSION),
            grid: model.grid(),
            input_style,
            heading: "# Starting locations file for MODPATH, generated by mpinput.".to_string(),
            data: Vec::new(),
            strategy: WriteStrategy::default(),
            float_format: FloatFormat::default(),
            text_policy: TextPolicy::default(),
        })
    }

    pub fn set_file_path(&mut self, path: impl Into<PathBuf>) {
        self.file_path = path.into();
    }

    fn prepare(&self, records: &[ParticleRecord]) -> Result<LocTable, PackageError> {
        LocTable::prepare(records, self.text_policy, self.float_format)
    }

    fn write_table(&self, table: &LocTable, out: &mut dyn Write) -> Result<(), PackageError> {
        table.write_header(&self.heading, self.input_style, out)?;
        self.strategy.writer().write_body(table, out)?;
        Ok(())
    }

    /// Renders `records` (or the stored data) as file text.
    pub fn render(&self, records: Option<&[ParticleRecord]>) -> Result<String, PackageError> {
        let table = self.prepare(records.unwrap_or(self.data.as_slice()))?;
        let mut buf = Vec::new();
        self.write_table(&table, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Writes `records`, or the stored data when `None`.
    ///
    /// An empty record set is logged and leaves the file untouched.
    pub fn write_records(&self, records: Option<&[ParticleRecord]>) -> Result<(), PackageError> {
        let records = records.unwrap_or(self.data.as_slice());
        if records.is_empty() {
            warn!("No particle data to write to {}", self.file_path.display());
            return Ok(());
        }
        let table = self.prepare(records)?;

        info!(
            "Writing {} particles in {} groups to {} ({:?} writer)",
            table.rows().len(),
            table.groups().len(),
            self.file_path.display(),
            self.strategy
        );
        let mut out = BufWriter::new(File::create(&self.file_path)?);
        self.write_table(&table, &mut out)?;
        out.flush()?;
        Ok(())
    }
}

impl Package for StartingLocations {
    fn name(&self) -> &'static str {
        "LOC"
    }

    fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn write_file(&self) -> Result<(), PackageError> {
        self.write_records(None)
    }

    /// Flags particles whose starting cell lies outside the model grid.
    fn check(&self) -> CheckReport {
        let mut report = CheckReport::new(self.name());
        if self.data.is_empty() {
            return report;
        }
        let outside = self
            .data
            .iter()
            .filter(|r| r.k0 >= self.grid.nlay || r.i0 >= self.grid.nrow || r.j0 >= self.grid.ncol)
            .count();
        if outside > 0 {
            report.add_error(
                Some(outside as f64),
                "Particles with starting cells outside the grid",
            );
        } else {
            report.append_passed("Starting cells inside the grid");
        }
        report
    }
}
