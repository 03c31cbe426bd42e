use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use mpinput_core::{
    Array3d, ArrayWriter, CheckReport, FreeFormatArrayWriter, Modpath, Package, PackageError,
};

use crate::groups::ReleaseGroup;
use crate::options::OptionFlags;
use crate::records::RECORDS;

/// Reference time given as a position inside the stress-period calendar.
/// Period and step are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReferencePeriod {
    pub period: usize,
    pub step: usize,
    pub time_fraction: f64,
}

/// Cell whose flow budget is reported. Layer, row and column are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetCell {
    pub grid: u32,
    pub layer: usize,
    pub row: usize,
    pub column: usize,
}

/// MODPATH simulation file package (`.mpsim`).
///
/// Fields are public and may be changed freely between construction and
/// `write_file`. Which of them end up on disk depends on [`OptionFlags`];
/// a field switched on by an option but left empty is reported as
/// `PackageError::MissingField` when the file is written.
pub struct ModpathSim {
    file_path: PathBuf,
    array_writer: Box<dyn ArrayWriter>,

    pub heading1: String,
    pub heading2: String,
    pub name_file: String,
    pub list_file: String,
    pub options: OptionFlags,

    pub endpoint_file: String,
    pub pathline_file: String,
    pub time_series_file: String,
    pub advective_observations_file: String,

    pub reference_time: f64,
    pub reference_period: ReferencePeriod,
    pub stop_time: Option<f64>,

    pub groups: Vec<ReleaseGroup>,
    pub starting_locations_file: String,

    pub time_point_count: usize,
    pub time_point_increment: f64,
    pub time_points: Vec<f64>,

    pub budget_cells: Vec<BudgetCell>,
    pub trace_file: String,
    pub trace_particle_id: u32,

    pub stop_zone: i32,
    pub zone: Array3d<i32>,
    pub retardation: Array3d<f32>,
    pub retardation_chead: Array3d<f32>,
}

impl ModpathSim {
    pub const EXTENSION: &'static str = "mpsim";

    /// Creates the package with every file name derived from the model name
    /// and the default option flags.
    pub fn new(model: &Modpath) -> Self {
        let name = model.name();
        let shape = model.grid().shape3d();
        Self {
            file_path: model.package_path(Self::EXTENSION),
            array_writer: Box::new(FreeFormatArrayWriter),
            heading1: "MPSIM for MODPATH, generated by mpinput.".to_string(),
            heading2: String::new(),
            name_file: format!("{}.mpnam", name),
            list_file: format!("{}.mplst", name),
            options: OptionFlags::default(),
            endpoint_file: format!("{}.mpend", name),
            pathline_file: format!("{}.mppth", name),
            time_series_file: format!("{}.mp.tim_ser", name),
            advective_observations_file: format!("{}.mp.advobs", name),
            reference_time: 0.0,
            reference_period: ReferencePeriod { period: 0, step: 0, time_fraction: 1.0 },
            stop_time: None,
            groups: vec![ReleaseGroup::default()],
            starting_locations_file: format!("{}.loc", name),
            time_point_count: 1,
            time_point_increment: 1.0,
            time_points: vec![1.0],
            budget_cells: Vec::new(),
            trace_file: format!("{}.trace_file.txt", name),
            trace_particle_id: 1,
            stop_zone: 1,
            zone: Array3d::constant("zone", shape, 1),
            retardation: Array3d::constant("retard_fac", shape, 1.0),
            retardation_chead: Array3d::constant("retard_fcCB", shape, 1.0),
        }
    }

    pub fn with_options(mut self, options: OptionFlags) -> Self {
        self.options = options;
        self
    }

    /// Replaces the writer used for zone, retardation and mask arrays.
    pub fn with_array_writer(mut self, writer: Box<dyn ArrayWriter>) -> Self {
        self.array_writer = writer;
        self
    }

    pub fn set_file_path(&mut self, path: impl Into<PathBuf>) {
        self.file_path = path.into();
    }

    pub fn array_writer(&self) -> &dyn ArrayWriter {
        self.array_writer.as_ref()
    }

    /// Names of the records the current options switch on, in file order.
    pub fn planned_records(&self) -> Vec<&'static str> {
        RECORDS
            .iter()
            .filter(|r| (r.when)(self))
            .map(|r| r.name)
            .collect()
    }

    /// Writes the whole simulation file to `out`.
    pub fn write_to(&self, out: &mut dyn Write) -> Result<(), PackageError> {
        for record in RECORDS.iter().filter(|r| (r.when)(self)) {
            debug!("MPSIM: writing {}", record.name);
            (record.emit)(self, out)?;
        }
        Ok(())
    }

    /// The simulation file as a string.
    pub fn render(&self) -> Result<String, PackageError> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl Package for ModpathSim {
    fn name(&self) -> &'static str {
        "MPSIM"
    }

    fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn write_file(&self) -> Result<(), PackageError> {
        let mut out = BufWriter::new(File::create(&self.file_path)?);
        self.write_to(&mut out)?;
        out.flush()?;
        info!("Wrote simulation file {}", self.file_path.display());
        Ok(())
    }

    /// MODPATH produces no output when the stop time lies beyond the last
    /// written time point, so that combination is flagged. Only the first
    /// `time_point_count` points reach the file.
    fn check(&self) -> CheckReport {
        let mut report = CheckReport::new(self.name());
        if self.options.stop_option == 3 && self.options.time_point_option == 3 {
            let last_written = self
                .time_point_count
                .checked_sub(1)
                .and_then(|i| self.time_points.get(i));
            match (self.stop_time, last_written) {
                (Some(stop), Some(&last)) if last < stop => {
                    report.add_error(Some(stop), "Stop time greater than last TimePoint");
                }
                (Some(_), Some(_)) => report.append_passed("Valid stop time"),
                (None, _) => report.add_error(None, "Stop time not set"),
                (Some(_), None) => report.add_error(
                    Some(self.time_point_count as f64),
                    "Fewer time points than time_point_count",
                ),
            }
        }
        report
    }
}
