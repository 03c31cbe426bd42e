//! MODPATH starting locations file (`.loc`) package.

mod loc;      // The package
mod record;   // Particle rows as the caller builds them
mod table;    // Shared preparation of rows and groups
mod text;     // Length limits for label and group name
mod writer;   // Row and bulk output backends

pub use loc::StartingLocations;
pub use record::{LocationDefaults, ParticleRecord};
pub use table::{FloatFormat, GroupCount, LocRow, LocTable};
pub use text::{TextPolicy, GROUP_NAME_WIDTH, LABEL_WIDTH};
pub use writer::{BulkWriter, RowWriter, TabularWriter, WriteStrategy};
