pub mod array;   // 3-D arrays and the text block writer used for them
pub mod check;   // Advisory check reports
pub mod error;   // Error type shared by every package writer
pub mod grid;    // Grid shape supplied by the host model
pub mod model;   // Host model and the Package trait

// Re-export commonly used items
pub use array::{Array3d, ArrayValue, ArrayWriter, FormattedArray, FreeFormatArrayWriter};
pub use check::{CheckEntry, CheckLevel, CheckReport};
pub use error::PackageError;
pub use grid::GridShape;
pub use model::{Modpath, Package};
