//! Declarative layout of the simulation file.
//!
//! Each entry pairs a predicate over the package with the function that emits
//! its lines. Entries are evaluated top to bottom, which is the order the
//! simulator reads them in. Indices stored 0-based are shifted to 1-based
//! here and nowhere else.

use std::io::Write;

use mpinput_core::PackageError;

use crate::groups::{GroupRegion, ParticlePlacement, ReleaseGroup, ReleaseSchedule};
use crate::sim::ModpathSim;

type Emit = fn(&ModpathSim, &mut dyn Write) -> Result<(), PackageError>;

pub(crate) struct Record {
    pub name: &'static str,
    pub when: fn(&ModpathSim) -> bool,
    pub emit: Emit,
}

pub(crate) const RECORDS: &[Record] = &[
    Record { name: "heading", when: always, emit: heading },
    Record { name: "name file", when: always, emit: |s, out| line(out, &s.name_file) },
    Record { name: "list file", when: always, emit: |s, out| line(out, &s.list_file) },
    Record { name: "option flags", when: always, emit: |s, out| line(out, &s.options) },
    Record { name: "endpoint file", when: always, emit: |s, out| line(out, &s.endpoint_file) },
    Record {
        name: "pathline file",
        when: |s| s.options.simulation_type == 2,
        emit: |s, out| line(out, &s.pathline_file),
    },
    Record {
        name: "time series file",
        when: |s| s.options.simulation_type == 3,
        emit: |s, out| line(out, &s.time_series_file),
    },
    Record {
        name: "advective observations file",
        when: |s| s.options.advective_observations_option == 2 && s.options.simulation_type == 3,
        emit: |s, out| line(out, &s.advective_observations_file),
    },
    Record {
        name: "reference time",
        when: |s| s.options.reference_time_option == 1,
        emit: |s, out| line(out, format_args!("{:.6}", s.reference_time)),
    },
    Record {
        name: "reference period and step",
        when: |s| s.options.reference_time_option == 2,
        emit: |s, out| {
            let r = &s.reference_period;
            line(out, format_args!("{} {} {:.6}", r.period + 1, r.step + 1, r.time_fraction))
        },
    },
    Record {
        name: "stop time",
        when: |s| s.options.stop_option == 3,
        emit: stop_time,
    },
    Record {
        name: "release groups",
        when: |s| s.options.particle_generation_option == 1,
        emit: release_groups,
    },
    Record {
        name: "starting locations file",
        when: |s| s.options.particle_generation_option == 2,
        emit: |s, out| line(out, &s.starting_locations_file),
    },
    Record {
        name: "time point count",
        when: |s| matches!(s.options.time_point_option, 2 | 3),
        emit: |s, out| line(out, s.time_point_count),
    },
    Record {
        name: "time point increment",
        when: |s| s.options.time_point_option == 2,
        emit: |s, out| line(out, format_args!("{:.6}", s.time_point_increment)),
    },
    Record {
        name: "time points",
        when: |s| s.options.time_point_option == 3,
        emit: time_points,
    },
    Record {
        name: "budget cells",
        when: |s| budget_block(s) && s.options.budget_output_option == 3,
        emit: budget_cells,
    },
    Record {
        name: "trace particle",
        when: |s| budget_block(s) && s.options.budget_output_option == 4,
        emit: |s, out| {
            line(out, &s.trace_file)?;
            line(out, s.trace_particle_id)
        },
    },
    Record {
        name: "stop zone",
        when: |s| s.options.zone_array_option != 1,
        emit: |s, out| line(out, s.stop_zone),
    },
    Record {
        name: "zone array",
        when: |s| s.options.zone_array_option != 1,
        emit: |s, out| Ok(s.array_writer().write_array(&s.zone, out)?),
    },
    Record {
        name: "retardation factors",
        when: |s| s.options.retardation_option != 1,
        emit: |s, out| Ok(s.array_writer().write_array(&s.retardation, out)?),
    },
    Record {
        name: "constant-head retardation factors",
        when: |s| s.options.retardation_option != 1,
        emit: |s, out| Ok(s.array_writer().write_array(&s.retardation_chead, out)?),
    },
];

fn always(_: &ModpathSim) -> bool {
    true
}

/// Budget output options 1 and 2 carry no extra records.
fn budget_block(sim: &ModpathSim) -> bool {
    !matches!(sim.options.budget_output_option, 1 | 2)
}

fn line(out: &mut dyn Write, value: impl std::fmt::Display) -> Result<(), PackageError> {
    writeln!(out, "{}", value)?;
    Ok(())
}

fn heading(sim: &ModpathSim, out: &mut dyn Write) -> Result<(), PackageError> {
    comment(out, &sim.heading1)?;
    comment(out, &sim.heading2)
}

fn comment(out: &mut dyn Write, text: &str) -> Result<(), PackageError> {
    if text.is_empty() {
        writeln!(out, "#")?;
    } else {
        writeln!(out, "# {}", text)?;
    }
    Ok(())
}

fn stop_time(sim: &ModpathSim, out: &mut dyn Write) -> Result<(), PackageError> {
    let stop_time = sim
        .stop_time
        .ok_or_else(|| PackageError::missing("MPSIM", "stop_time", "StopOption is 3"))?;
    line(out, format_args!("{:.6}", stop_time))
}

fn release_groups(sim: &ModpathSim, out: &mut dyn Write) -> Result<(), PackageError> {
    line(out, sim.groups.len())?;
    for group in &sim.groups {
        release_group(sim, group, out)?;
    }
    Ok(())
}

fn release_group(sim: &ModpathSim, group: &ReleaseGroup, out: &mut dyn Write) -> Result<(), PackageError> {
    line(out, &group.name)?;
    writeln!(
        out,
        "{} {} {} {:.6} {} {}",
        group.grid,
        group.region.option(),
        group.placement.option(),
        group.release_start_time,
        group.release.option(),
        group.head_option
    )?;

    if let ReleaseSchedule::Repeated { period_length, event_count } = group.release {
        writeln!(out, "{:.6} {}", period_length, event_count)?;
    }

    match &group.region {
        GroupRegion::Bounds(b) => writeln!(
            out,
            "{} {} {} {} {} {}",
            b.min_layer + 1,
            b.min_row + 1,
            b.min_column + 1,
            b.max_layer + 1,
            b.max_row + 1,
            b.max_column + 1
        )?,
        GroupRegion::Mask(mask) => sim.array_writer().write_array(mask, out)?,
        GroupRegion::LayerMask { layer, mask } => {
            line(out, layer + 1)?;
            sim.array_writer().write_array(mask, out)?;
        }
    }

    match &group.placement {
        ParticlePlacement::Faces(faces) => {
            line(out, faces.len())?;
            for face in faces {
                writeln!(out, "{} {} {}", face.iface, face.row_count, face.column_count)?;
            }
        }
        ParticlePlacement::Cells(c) => {
            writeln!(out, "{} {} {} ", c.layer_count, c.row_count, c.column_count)?;
        }
    }
    Ok(())
}

fn time_points(sim: &ModpathSim, out: &mut dyn Write) -> Result<(), PackageError> {
    let count = sim.time_point_count;
    let points = sim.time_points.get(..count).ok_or_else(|| {
        PackageError::missing(
            "MPSIM",
            "time_points",
            format!("TimePointOption is 3 and {} time points are expected", count),
        )
    })?;
    for t in points {
        line(out, format_args!("{:.6}", t))?;
    }
    Ok(())
}

fn budget_cells(sim: &ModpathSim, out: &mut dyn Write) -> Result<(), PackageError> {
    line(out, sim.budget_cells.len())?;
    for cell in &sim.budget_cells {
        writeln!(out, "{} {} {} {} ", cell.grid, cell.layer + 1, cell.row + 1, cell.column + 1)?;
    }
    Ok(())
}
