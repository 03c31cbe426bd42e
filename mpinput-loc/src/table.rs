//! Preparation shared by every starting-locations backend: text bounds,
//! 1-based cell indices, grouping and number formatting all happen here so
//! the backends only differ in how they push bytes out.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use mpinput_core::PackageError;

use crate::record::ParticleRecord;
use crate::text::{TextPolicy, GROUP_NAME_WIDTH, LABEL_WIDTH};

/// Fixed-point format for the float columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloatFormat {
    pub precision: usize,
}

impl Default for FloatFormat {
    fn default() -> Self {
        Self { precision: 8 }
    }
}

/// A group and the number of particles in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCount {
    pub name: String,
    pub count: usize,
}

/// A particle row ready for output, with 1-based cell indices.
#[derive(Debug, Clone, PartialEq)]
pub struct LocRow {
    pub particle_id: u32,
    pub particle_group: i32,
    pub initial_grid: i32,
    pub k: usize,
    pub i: usize,
    pub j: usize,
    pub xloc0: f32,
    pub yloc0: f32,
    pub zloc0: f32,
    pub initial_time: f32,
    pub label: String,
}

/// Rows plus their groups in first-appearance order.
#[derive(Debug, Clone, PartialEq)]
pub struct LocTable {
    groups: Vec<GroupCount>,
    rows: Vec<LocRow>,
    format: FloatFormat,
}

impl LocTable {
    /// Copies `records` into output form. The records themselves are never
    /// modified.
    ///
    /// # Errors
    ///
    /// Returns `PackageError::TextTooLong` when a label or group name is too
    /// long and `policy` is `TextPolicy::Reject`.
    pub fn prepare(
        records: &[ParticleRecord],
        policy: TextPolicy,
        format: FloatFormat,
    ) -> Result<Self, PackageError> {
        let mut groups: Vec<GroupCount> = Vec::new();
        let mut group_index: HashMap<String, usize> = HashMap::new();
        let mut rows = Vec::with_capacity(records.len());

        for record in records {
            let group_name = policy.apply("group name", &record.group_name, GROUP_NAME_WIDTH)?;
            match group_index.get(&*group_name) {
                Some(&index) => groups[index].count += 1,
                None => {
                    group_index.insert(group_name.to_string(), groups.len());
                    groups.push(GroupCount { name: group_name.into_owned(), count: 1 });
                }
            }

            let label = policy.apply("label", &record.label, LABEL_WIDTH)?;
            rows.push(LocRow {
                particle_id: record.particle_id,
                particle_group: record.particle_group,
                initial_grid: record.initial_grid,
                k: record.k0 + 1,
                i: record.i0 + 1,
                j: record.j0 + 1,
                xloc0: record.xloc0,
                yloc0: record.yloc0,
                zloc0: record.zloc0,
                initial_time: record.initial_time,
                label: label.into_owned(),
            });
        }

        Ok(Self { groups, rows, format })
    }

    pub fn groups(&self) -> &[GroupCount] {
        &self.groups
    }

    pub fn rows(&self) -> &[LocRow] {
        &self.rows
    }

    /// Heading, input style and group count lines.
    pub fn write_header(&self, heading: &str, input_style: i32, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", heading)?;
        writeln!(out, "{}", input_style)?;
        writeln!(out, "{}", self.groups.len())
    }

    /// Appends a group's name and count lines to `buf`.
    pub fn push_group(&self, group: &GroupCount, buf: &mut String) {
        // Writing into a String cannot fail.
        let _ = write!(buf, "{}\n{}\n", group.name, group.count);
    }

    /// Appends one particle line to `buf`.
    pub fn push_row(&self, row: &LocRow, buf: &mut String) {
        let p = self.format.precision;
        let _ = writeln!(
            buf,
            "{} {} {} {} {} {} {:.*} {:.*} {:.*} {:.*} {}",
            row.particle_id,
            row.particle_group,
            row.initial_grid,
            row.k,
            row.i,
            row.j,
            p,
            row.xloc0,
            p,
            row.yloc0,
            p,
            row.zloc0,
            p,
            row.initial_time,
            row.label
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(names: &[&str]) -> Vec<ParticleRecord> {
        let mut records = ParticleRecord::empty_set(names.len());
        for (record, name) in records.iter_mut().zip(names) {
            record.group_name = name.to_string();
        }
        records
    }

    #[test]
    fn groups_keep_first_appearance_order() {
        let table = LocTable::prepare(&records(&["B", "A", "B"]), TextPolicy::Reject, FloatFormat::default())
            .unwrap();
        assert_eq!(
            table.groups(),
            [
                GroupCount { name: "B".into(), count: 2 },
                GroupCount { name: "A".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn indices_shift_without_touching_input() {
        let mut input = ParticleRecord::empty_set(1);
        input[0].k0 = 2;
        input[0].j0 = 7;
        let table = LocTable::prepare(&input, TextPolicy::Truncate, FloatFormat::default()).unwrap();
        let row = &table.rows()[0];
        assert_eq!((row.k, row.i, row.j), (3, 1, 8));
        assert_eq!((input[0].k0, input[0].i0, input[0].j0), (2, 0, 7));
    }

    #[test]
    fn push_row_uses_float_precision() {
        let mut input = ParticleRecord::empty_set(1);
        input[0].label = "p1".into();
        input[0].initial_time = 2.25;
        let table = LocTable::prepare(&input, TextPolicy::Reject, FloatFormat { precision: 3 }).unwrap();
        let mut buf = String::new();
        table.push_row(&table.rows()[0], &mut buf);
        assert_eq!(buf, "1 1 1 1 1 1 0.500 0.500 0.000 2.250 p1\n");
    }

    #[test]
    fn truncated_group_names_merge() {
        let long_a = "abcdefghijklmnopXXX";
        let long_b = "abcdefghijklmnopYYY";
        let table =
            LocTable::prepare(&records(&[long_a, long_b]), TextPolicy::Truncate, FloatFormat::default())
                .unwrap();
        assert_eq!(table.groups().len(), 1);
        assert_eq!(table.groups()[0].count, 2);
        assert_eq!(table.groups()[0].name, "abcdefghijklmnop");
    }

    #[test]
    fn rejected_label_fails_preparation() {
        let mut input = ParticleRecord::empty_set(1);
        input[0].label = "x".repeat(41);
        assert!(LocTable::prepare(&input, TextPolicy::Reject, FloatFormat::default()).is_err());
    }
}
