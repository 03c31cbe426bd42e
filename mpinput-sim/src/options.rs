//! The twelve option flags on the third line of the simulation file.

use std::fmt;

use serde::{Deserialize, Serialize};

use mpinput_core::PackageError;

/// Names of the option flags, in their on-disk order.
pub const OPTION_NAMES: [&str; 12] = [
    "SimulationType",
    "TrackingDirection",
    "WeakSinkOption",
    "WeakSourceOption",
    "ReferenceTimeOption",
    "StopOption",
    "ParticleGenerationOption",
    "TimePointOption",
    "BudgetOutputOption",
    "ZoneArrayOption",
    "RetardationOption",
    "AdvectiveObservationsOption",
];

/// Largest legal value of each flag; every flag starts at 1.
const OPTION_MAX: [u8; 12] = [3, 2, 2, 2, 2, 3, 2, 3, 4, 2, 2, 2];

/// Option flags with one named field per position. Values keep the 1-based
/// numbering used on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct OptionFlags {
    pub simulation_type: u8,
    pub tracking_direction: u8,
    pub weak_sink_option: u8,
    pub weak_source_option: u8,
    pub reference_time_option: u8,
    pub stop_option: u8,
    pub particle_generation_option: u8,
    pub time_point_option: u8,
    pub budget_output_option: u8,
    pub zone_array_option: u8,
    pub retardation_option: u8,
    pub advective_observations_option: u8,
}

impl OptionFlags {
    /// Builds the flags from their positional form.
    ///
    /// # Errors
    ///
    /// Returns `PackageError::InvalidOptions` unless there are exactly twelve
    /// values and each lies in its option's range.
    pub fn from_slice(values: &[u8]) -> Result<Self, PackageError> {
        let values: [u8; 12] = values.try_into().map_err(|_| {
            PackageError::InvalidOptions(format!("expected 12 option flags, got {}", values.len()))
        })?;
        for (i, &value) in values.iter().enumerate() {
            if value < 1 || value > OPTION_MAX[i] {
                return Err(PackageError::InvalidOptions(format!(
                    "{} must be between 1 and {}, got {}",
                    OPTION_NAMES[i], OPTION_MAX[i], value
                )));
            }
        }
        let [
            simulation_type,
            tracking_direction,
            weak_sink_option,
            weak_source_option,
            reference_time_option,
            stop_option,
            particle_generation_option,
            time_point_option,
            budget_output_option,
            zone_array_option,
            retardation_option,
            advective_observations_option,
        ] = values;
        Ok(Self {
            simulation_type,
            tracking_direction,
            weak_sink_option,
            weak_source_option,
            reference_time_option,
            stop_option,
            particle_generation_option,
            time_point_option,
            budget_output_option,
            zone_array_option,
            retardation_option,
            advective_observations_option,
        })
    }

    pub fn to_array(&self) -> [u8; 12] {
        [
            self.simulation_type,
            self.tracking_direction,
            self.weak_sink_option,
            self.weak_source_option,
            self.reference_time_option,
            self.stop_option,
            self.particle_generation_option,
            self.time_point_option,
            self.budget_output_option,
            self.zone_array_option,
            self.retardation_option,
            self.advective_observations_option,
        ]
    }

    /// Looks a flag up by its legacy name.
    pub fn get(&self, name: &str) -> Option<u8> {
        let index = OPTION_NAMES.iter().position(|n| *n == name)?;
        Some(self.to_array()[index])
    }
}

impl Default for OptionFlags {
    fn default() -> Self {
        Self {
            simulation_type: 1,
            tracking_direction: 2,
            weak_sink_option: 1,
            weak_source_option: 1,
            reference_time_option: 1,
            stop_option: 2,
            particle_generation_option: 2,
            time_point_option: 1,
            budget_output_option: 2,
            zone_array_option: 1,
            retardation_option: 1,
            advective_observations_option: 1,
        }
    }
}

/// Fixed-width line: each flag right-aligned in four columns.
impl fmt::Display for OptionFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in self.to_array() {
            write!(f, "{:4}", value)?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<u8>> for OptionFlags {
    type Error = PackageError;

    fn try_from(values: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_slice(&values)
    }
}

impl From<OptionFlags> for Vec<u8> {
    fn from(flags: OptionFlags) -> Self {
        flags.to_array().to_vec()
    }
}
