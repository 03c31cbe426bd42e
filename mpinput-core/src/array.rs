//! Three-dimensional (layer, row, column) arrays and the text blocks the
//! simulator reads them from.
//!
//! Package writers never format array cells themselves. They hand the array
//! to an [`ArrayWriter`], which keeps the block layout in one place and lets a
//! host swap in its own layout if it needs one.

use std::fmt::Debug;
use std::io::{self, Write};

use crate::error::PackageError;

/// Cell types that can live in an [`Array3d`].
pub trait ArrayValue: Copy + PartialEq + Debug + Send + Sync + 'static {
    /// Multiplier written in the `INTERNAL` control line.
    const UNIT_MULTIPLIER: &'static str;

    fn to_text(&self) -> String;
}

impl ArrayValue for i32 {
    const UNIT_MULTIPLIER: &'static str = "1";

    fn to_text(&self) -> String {
        self.to_string()
    }
}

/// Fixed notation for ordinary magnitudes, exponent notation outside
/// `[1e-4, 1e6)` so small factors keep their significant digits.
impl ArrayValue for f32 {
    const UNIT_MULTIPLIER: &'static str = "1.0";

    fn to_text(&self) -> String {
        let magnitude = self.abs();
        if *self == 0.0 || (1e-4..1e6).contains(&magnitude) {
            format!("{:.6}", self)
        } else {
            format!("{:.6e}", self)
        }
    }
}

/// Storage of an [`Array3d`].
#[derive(Debug, Clone, PartialEq)]
enum ArrayValues<T> {
    Constant(T),
    /// Layer-major, then row, then column.
    Internal(Vec<T>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Array3d<T: ArrayValue> {
    name: String,
    shape: (usize, usize, usize),
    values: ArrayValues<T>,
}

impl<T: ArrayValue> Array3d<T> {
    pub fn constant(name: impl Into<String>, shape: (usize, usize, usize), value: T) -> Self {
        Self {
            name: name.into(),
            shape,
            values: ArrayValues::Constant(value),
        }
    }

    /// Builds an array from explicit cell values.
    ///
    /// # Errors
    ///
    /// Returns `PackageError::ArrayShapeError` if `values` does not hold
    /// exactly `nlay * nrow * ncol` cells.
    pub fn from_vec(
        name: impl Into<String>,
        shape: (usize, usize, usize),
        values: Vec<T>,
    ) -> Result<Self, PackageError> {
        let name = name.into();
        let expected = shape.0 * shape.1 * shape.2;
        if values.len() != expected {
            return Err(PackageError::ArrayShapeError {
                name,
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            name,
            shape,
            values: ArrayValues::Internal(values),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        self.shape
    }

    pub fn get(&self, layer: usize, row: usize, col: usize) -> T {
        match &self.values {
            ArrayValues::Constant(v) => *v,
            ArrayValues::Internal(cells) => {
                let (_, nrow, ncol) = self.shape;
                cells[(layer * nrow + row) * ncol + col]
            }
        }
    }

    /// The single value of the array, if every cell holds it.
    pub fn uniform_value(&self) -> Option<T> {
        match &self.values {
            ArrayValues::Constant(v) => Some(*v),
            ArrayValues::Internal(cells) => {
                let first = *cells.first()?;
                cells.iter().all(|c| *c == first).then_some(first)
            }
        }
    }
}

/// Type-erased read access to an array, so writers can be trait objects.
pub trait FormattedArray {
    fn name(&self) -> &str;
    fn shape(&self) -> (usize, usize, usize);
    fn unit_multiplier(&self) -> &'static str;
    fn constant_text(&self) -> Option<String>;
    fn cell_text(&self, layer: usize, row: usize, col: usize) -> String;
}

impl<T: ArrayValue> FormattedArray for Array3d<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn shape(&self) -> (usize, usize, usize) {
        self.shape
    }

    fn unit_multiplier(&self) -> &'static str {
        T::UNIT_MULTIPLIER
    }

    fn constant_text(&self) -> Option<String> {
        self.uniform_value().map(|v| v.to_text())
    }

    fn cell_text(&self, layer: usize, row: usize, col: usize) -> String {
        self.get(layer, row, col).to_text()
    }
}

/// Produces the on-disk text block for a 3-D array.
pub trait ArrayWriter: Send + Sync {
    fn write_array(&self, array: &dyn FormattedArray, out: &mut dyn Write) -> io::Result<()>;
}

/// Writes one control record per layer: `CONSTANT` when the whole array is
/// uniform, otherwise `INTERNAL` followed by one free-format line per row.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreeFormatArrayWriter;

impl ArrayWriter for FreeFormatArrayWriter {
    fn write_array(&self, array: &dyn FormattedArray, out: &mut dyn Write) -> io::Result<()> {
        let (nlay, nrow, ncol) = array.shape();
        let constant = array.constant_text();
        for layer in 0..nlay {
            if let Some(value) = &constant {
                writeln!(out, "CONSTANT {}    #{}_Layer{}", value, array.name(), layer + 1)?;
                continue;
            }
            writeln!(
                out,
                "INTERNAL {} (FREE) -1    #{}_Layer{}",
                array.unit_multiplier(),
                array.name(),
                layer + 1
            )?;
            let mut line = String::new();
            for row in 0..nrow {
                line.clear();
                for col in 0..ncol {
                    if col > 0 {
                        line.push(' ');
                    }
                    line.push_str(&array.cell_text(layer, row, col));
                }
                writeln!(out, "{}", line)?;
            }
        }
        Ok(())
    }
}
