use std::fs;
use std::path::Path;

use log::info;
use thiserror::Error;

use mpinput_core::{GridShape, Modpath, PackageError};
use mpinput_loc::{FloatFormat, ParticleRecord, StartingLocations};
use mpinput_sim::{
    GroupRegion, ModpathSim, OptionFlags, ParticlePlacement, ReleaseGroup,
};

// Re-export types
pub use self::types::{
    ArrayInput, Config, FileOverrides, GroupSettings, ModelSettings, PlacementSettings,
    RegionSettings, SimulationSettings, StartingLocationSettings,
};
mod types;

// --- Error Type ---
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    #[error("Invalid package data: {0}")]
    PackageError(#[from] PackageError),
}

// --- Loading Function ---

/// Reads a `.toml` file as TOML and anything else as JSON, then validates it.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("toml"));
    let config: Config = if is_toml {
        toml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    validate(&config)?;
    info!("Loaded configuration for model '{}' from {}", config.model.name, path.display());
    Ok(config)
}

pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let model = &config.model;
    if model.name.trim().is_empty() {
        return Err(ConfigError::ValidationError("Model name cannot be empty.".to_string()));
    }
    if model.nlay == 0 || model.nrow == 0 || model.ncol == 0 {
        return Err(ConfigError::ValidationError(
            "Grid dimensions (nlay, nrow, ncol) must be greater than 0.".to_string(),
        ));
    }
    if model.nper == 0 {
        return Err(ConfigError::ValidationError(
            "Number of stress periods must be greater than 0.".to_string(),
        ));
    }

    if let Some(sim) = &config.simulation {
        OptionFlags::from_slice(&sim.option_flags)?;
    }

    if let Some(loc) = &config.starting_locations {
        if loc.input_style != 1 {
            return Err(PackageError::UnsupportedInputStyle(loc.input_style).into());
        }
    }
    Ok(())
}

// --- Model Assembly ---

impl Config {
    pub fn grid(&self) -> GridShape {
        GridShape::new(self.model.nlay, self.model.nrow, self.model.ncol, self.model.nper)
    }

    /// Builds the host model and appends the configured packages to it.
    pub fn assemble(&self) -> Result<Modpath, ConfigError> {
        let mut model = Modpath::new(self.model.name.clone(), self.model.model_ws.clone(), self.grid());
        if let Some(settings) = &self.simulation {
            let sim = build_simulation(&model, settings)?;
            model.add_package(Box::new(sim));
        }
        if let Some(settings) = &self.starting_locations {
            let loc = build_starting_locations(&model, settings)?;
            model.add_package(Box::new(loc));
        }
        Ok(model)
    }
}

pub fn build_simulation(model: &Modpath, s: &SimulationSettings) -> Result<ModpathSim, ConfigError> {
    let shape = model.grid().shape3d();
    let mut sim = ModpathSim::new(model).with_options(OptionFlags::from_slice(&s.option_flags)?);

    let files = &s.files;
    let overrides = [
        (&files.name_file, &mut sim.name_file),
        (&files.list_file, &mut sim.list_file),
        (&files.endpoint_file, &mut sim.endpoint_file),
        (&files.pathline_file, &mut sim.pathline_file),
        (&files.time_series_file, &mut sim.time_series_file),
        (&files.advective_observations_file, &mut sim.advective_observations_file),
        (&files.starting_locations_file, &mut sim.starting_locations_file),
        (&files.trace_file, &mut sim.trace_file),
    ];
    for (value, target) in overrides {
        if let Some(value) = value {
            *target = value.clone();
        }
    }

    sim.reference_time = s.ref_time;
    sim.reference_period = s.ref_time_per_stp;
    sim.stop_time = s.stop_time;
    sim.groups = s
        .groups
        .iter()
        .map(|g| build_group(model, g))
        .collect::<Result<_, _>>()?;
    sim.time_point_count = s.time_point_count;
    sim.time_point_increment = s.time_point_increment;
    sim.time_points = s.time_points.clone();
    sim.budget_cells = s.budget_cells.clone();
    sim.trace_particle_id = s.trace_particle_id;
    sim.stop_zone = s.stop_zone;
    sim.zone = s.zone.to_array("zone", shape)?;
    sim.retardation = s.retardation.to_array("retard_fac", shape)?;
    sim.retardation_chead = s.retardation_chead.to_array("retard_fcCB", shape)?;
    Ok(sim)
}

fn build_group(model: &Modpath, g: &GroupSettings) -> Result<ReleaseGroup, PackageError> {
    let grid = model.grid();
    let region = match &g.region {
        RegionSettings::Bounds(bounds) => GroupRegion::Bounds(*bounds),
        RegionSettings::Mask(mask) => GroupRegion::Mask(mask.to_array("mask_nlay", grid.shape3d())?),
        RegionSettings::LayerMask { layer, mask } => GroupRegion::LayerMask {
            layer: *layer,
            mask: mask.to_array("mask_1lay", grid.layer_shape())?,
        },
    };
    let placement = match &g.placement {
        PlacementSettings::Faces(faces) => ParticlePlacement::Faces(faces.clone()),
        PlacementSettings::Cells(counts) => ParticlePlacement::Cells(*counts),
    };
    Ok(ReleaseGroup {
        name: g.name.clone(),
        grid: g.grid,
        region,
        placement,
        release_start_time: g.release_start_time,
        release: g.release,
        head_option: g.head_option,
    })
}

pub fn build_starting_locations(
    model: &Modpath,
    s: &StartingLocationSettings,
) -> Result<StartingLocations, ConfigError> {
    let mut loc = StartingLocations::new(model, s.input_style)?;
    loc.strategy = s.strategy;
    loc.float_format = FloatFormat { precision: s.float_precision };
    loc.text_policy = s.text_policy;
    loc.data = if s.particles.is_empty() {
        ParticleRecord::empty_set(s.particle_count.unwrap_or(0))
    } else {
        s.particles.clone()
    };
    Ok(loc)
}

#[cfg(test)]
mod tests;
