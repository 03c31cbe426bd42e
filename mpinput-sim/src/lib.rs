//! MODPATH simulation file (`.mpsim`) package.

pub mod groups;   // Particle release groups
pub mod options;  // The twelve option flags
mod records;      // Ordered record table for the simulation file
mod sim;          // The package itself and its stop-time check

pub use groups::{
    CellBounds, CellParticleCount, FacePlacement, GroupRegion, ParticlePlacement, ReleaseGroup,
    ReleaseSchedule,
};
pub use options::{OptionFlags, OPTION_NAMES};
pub use sim::{BudgetCell, ModpathSim, ReferencePeriod};
