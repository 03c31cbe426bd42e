use std::path::PathBuf;

use serde::Deserialize;

use mpinput_core::{Array3d, ArrayValue, PackageError};
use mpinput_loc::{ParticleRecord, TextPolicy, WriteStrategy};
use mpinput_sim::{
    BudgetCell, CellBounds, CellParticleCount, FacePlacement, ReferencePeriod, ReleaseSchedule,
};

// --- Top-Level Config Struct ---

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub model: ModelSettings,
    #[serde(default)]
    pub simulation: Option<SimulationSettings>,
    #[serde(default)]
    pub starting_locations: Option<StartingLocationSettings>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ModelSettings {
    pub name: String,
    #[serde(default = "default_model_ws")]
    pub model_ws: PathBuf,
    pub nlay: usize,
    pub nrow: usize,
    pub ncol: usize,
    #[serde(default = "default_one")]
    pub nper: usize,
}

fn default_model_ws() -> PathBuf { PathBuf::from(".") }
fn default_one() -> usize { 1 }

// --- 3-D Arrays ---

/// A scalar fills the whole grid; a list gives every cell, layer by layer.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ArrayInput<T> {
    Constant(T),
    Values(Vec<T>),
}

impl<T: ArrayValue> ArrayInput<T> {
    pub fn to_array(&self, name: &str, shape: (usize, usize, usize)) -> Result<Array3d<T>, PackageError> {
        match self {
            ArrayInput::Constant(v) => Ok(Array3d::constant(name, shape, *v)),
            ArrayInput::Values(values) => Array3d::from_vec(name, shape, values.clone()),
        }
    }
}

// --- Simulation File ---

/// File names that replace the ones derived from the model name.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct FileOverrides {
    pub name_file: Option<String>,
    pub list_file: Option<String>,
    pub endpoint_file: Option<String>,
    pub pathline_file: Option<String>,
    pub time_series_file: Option<String>,
    pub advective_observations_file: Option<String>,
    pub starting_locations_file: Option<String>,
    pub trace_file: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SimulationSettings {
    #[serde(default = "default_option_flags")]
    pub option_flags: Vec<u8>,
    #[serde(default)]
    pub files: FileOverrides,
    #[serde(default)]
    pub ref_time: f64,
    #[serde(default = "default_reference_period")]
    pub ref_time_per_stp: ReferencePeriod,
    pub stop_time: Option<f64>,
    #[serde(default = "default_groups")]
    pub groups: Vec<GroupSettings>,
    #[serde(default = "default_one")]
    pub time_point_count: usize,
    #[serde(default = "default_time_increment")]
    pub time_point_increment: f64,
    #[serde(default = "default_time_points")]
    pub time_points: Vec<f64>,
    #[serde(default)]
    pub budget_cells: Vec<BudgetCell>,
    #[serde(default = "default_trace_particle_id")]
    pub trace_particle_id: u32,
    #[serde(default = "default_stop_zone")]
    pub stop_zone: i32,
    #[serde(default = "default_zone")]
    pub zone: ArrayInput<i32>,
    #[serde(default = "default_retardation")]
    pub retardation: ArrayInput<f32>,
    #[serde(default = "default_retardation")]
    pub retardation_chead: ArrayInput<f32>,
}

pub(crate) fn default_option_flags() -> Vec<u8> { vec![1, 2, 1, 1, 1, 2, 2, 1, 2, 1, 1, 1] }
fn default_reference_period() -> ReferencePeriod {
    ReferencePeriod { period: 0, step: 0, time_fraction: 1.0 }
}
fn default_groups() -> Vec<GroupSettings> { vec![GroupSettings::named("group_1")] }
fn default_time_increment() -> f64 { 1.0 }
fn default_time_points() -> Vec<f64> { vec![1.0] }
fn default_trace_particle_id() -> u32 { 1 }
fn default_stop_zone() -> i32 { 1 }
fn default_zone() -> ArrayInput<i32> { ArrayInput::Constant(1) }
fn default_retardation() -> ArrayInput<f32> { ArrayInput::Constant(1.0) }

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "snake_case")]
pub enum RegionSettings {
    Bounds(CellBounds),
    Mask(ArrayInput<i32>),
    LayerMask { layer: usize, mask: ArrayInput<i32> },
}

impl Default for RegionSettings {
    fn default() -> Self {
        RegionSettings::Bounds(CellBounds::default())
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "snake_case")]
pub enum PlacementSettings {
    Faces(Vec<FacePlacement>),
    Cells(CellParticleCount),
}

impl Default for PlacementSettings {
    fn default() -> Self {
        PlacementSettings::Faces(vec![FacePlacement { iface: 6, row_count: 1, column_count: 1 }])
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct GroupSettings {
    pub name: String,
    #[serde(default = "default_grid")]
    pub grid: u32,
    #[serde(default)]
    pub region: RegionSettings,
    #[serde(default)]
    pub placement: PlacementSettings,
    #[serde(default)]
    pub release_start_time: f64,
    #[serde(default = "default_release")]
    pub release: ReleaseSchedule,
    #[serde(default = "default_head_option")]
    pub head_option: u8,
}

fn default_grid() -> u32 { 1 }
fn default_release() -> ReleaseSchedule { ReleaseSchedule::Single }
fn default_head_option() -> u8 { 1 }

impl GroupSettings {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            grid: default_grid(),
            region: RegionSettings::default(),
            placement: PlacementSettings::default(),
            release_start_time: 0.0,
            release: default_release(),
            head_option: default_head_option(),
        }
    }
}

// --- Starting Locations File ---

#[derive(Deserialize, Debug, Clone)]
pub struct StartingLocationSettings {
    #[serde(default = "default_input_style")]
    pub input_style: i32,
    #[serde(default)]
    pub strategy: WriteStrategy,
    #[serde(default = "default_float_precision")]
    pub float_precision: usize,
    #[serde(default)]
    pub text_policy: TextPolicy,
    /// Explicit particles; takes precedence over `particle_count`.
    #[serde(default)]
    pub particles: Vec<ParticleRecord>,
    /// Number of default particles to generate when `particles` is empty.
    #[serde(default)]
    pub particle_count: Option<usize>,
}

fn default_input_style() -> i32 { 1 }
fn default_float_precision() -> usize { 8 }
