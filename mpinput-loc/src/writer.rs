//! Backends that push a prepared [`LocTable`] to a writer.
//!
//! Both produce byte-identical output because all formatting goes through
//! `LocTable::push_group` and `LocTable::push_row`; they only differ in how
//! the work is batched.

use std::io::{self, Write};

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::table::LocTable;

/// Writes the group block and particle rows of a starting locations file.
pub trait TabularWriter: Send + Sync {
    fn name(&self) -> &'static str;

    fn write_body(&self, table: &LocTable, out: &mut dyn Write) -> io::Result<()>;
}

/// Selects a [`TabularWriter`] from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteStrategy {
    Row,
    #[default]
    Bulk,
}

impl WriteStrategy {
    pub fn writer(&self) -> Box<dyn TabularWriter> {
        match self {
            WriteStrategy::Row => Box::new(RowWriter),
            WriteStrategy::Bulk => Box::new(BulkWriter::default()),
        }
    }
}

/// Formats and writes one line at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowWriter;

impl TabularWriter for RowWriter {
    fn name(&self) -> &'static str {
        "row"
    }

    fn write_body(&self, table: &LocTable, out: &mut dyn Write) -> io::Result<()> {
        let mut line = String::new();
        for group in table.groups() {
            line.clear();
            table.push_group(group, &mut line);
            out.write_all(line.as_bytes())?;
        }
        for row in table.rows() {
            line.clear();
            table.push_row(row, &mut line);
            out.write_all(line.as_bytes())?;
        }
        Ok(())
    }
}

/// Formats rows in parallel chunks and writes each chunk in one call.
/// Meant for files with tens of thousands of particles.
#[derive(Debug, Clone, Copy)]
pub struct BulkWriter {
    pub chunk_size: usize,
}

impl Default for BulkWriter {
    fn default() -> Self {
        Self { chunk_size: 4096 }
    }
}

impl TabularWriter for BulkWriter {
    fn name(&self) -> &'static str {
        "bulk"
    }

    fn write_body(&self, table: &LocTable, out: &mut dyn Write) -> io::Result<()> {
        let mut group_block = String::new();
        for group in table.groups() {
            table.push_group(group, &mut group_block);
        }
        out.write_all(group_block.as_bytes())?;

        let chunks: Vec<String> = table
            .rows()
            .par_chunks(self.chunk_size.max(1))
            .map(|rows| {
                let mut chunk = String::with_capacity(rows.len() * 96);
                for row in rows {
                    table.push_row(row, &mut chunk);
                }
                chunk
            })
            .collect();
        debug!("Formatted {} particle rows in {} chunks", table.rows().len(), chunks.len());

        for chunk in &chunks {
            out.write_all(chunk.as_bytes())?;
        }
        Ok(())
    }
}
