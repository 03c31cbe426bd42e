use serde::{Deserialize, Serialize};

/// One particle of a starting locations file (input style 1).
///
/// `k0`, `i0` and `j0` are 0-based layer, row and column indices; they are
/// shifted to 1-based only when the file is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleRecord {
    pub particle_id: u32,
    pub particle_group: i32,
    pub initial_grid: i32,
    pub k0: usize,
    pub i0: usize,
    pub j0: usize,
    pub xloc0: f32,
    pub yloc0: f32,
    pub zloc0: f32,
    pub initial_time: f32,
    #[serde(default)]
    pub label: String,
    pub group_name: String,
}

/// Cell-local offsets given to freshly created particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationDefaults {
    pub xloc0: f32,
    pub yloc0: f32,
    pub zloc0: f32,
}

impl Default for LocationDefaults {
    fn default() -> Self {
        Self { xloc0: 0.5, yloc0: 0.5, zloc0: 0.0 }
    }
}

impl ParticleRecord {
    /// `npt` particles numbered 1..=npt in the first cell, all in `group1`.
    pub fn empty_set(npt: usize) -> Vec<ParticleRecord> {
        Self::empty_set_with(npt, LocationDefaults::default())
    }

    pub fn empty_set_with(npt: usize, defaults: LocationDefaults) -> Vec<ParticleRecord> {
        (1..=npt as u32)
            .map(|particle_id| ParticleRecord {
                particle_id,
                particle_group: 1,
                initial_grid: 1,
                k0: 0,
                i0: 0,
                j0: 0,
                xloc0: defaults.xloc0,
                yloc0: defaults.yloc0,
                zloc0: defaults.zloc0,
                initial_time: 0.0,
                label: String::new(),
                group_name: "group1".to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_numbers_particles_from_one() {
        let records = ParticleRecord::empty_set(3);
        let ids: Vec<u32> = records.iter().map(|r| r.particle_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(records.iter().all(|r| r.group_name == "group1" && r.xloc0 == 0.5 && r.zloc0 == 0.0));
        assert!(ParticleRecord::empty_set(0).is_empty());
    }

    #[test]
    fn label_defaults_to_empty_when_deserializing() {
        let record: ParticleRecord = serde_json::from_str(
            r#"{"particle_id": 7, "particle_group": 2, "initial_grid": 1,
                "k0": 0, "i0": 4, "j0": 9, "xloc0": 0.5, "yloc0": 0.5,
                "zloc0": 1.0, "initial_time": 0.0, "group_name": "east"}"#,
        )
        .unwrap();
        assert_eq!(record.label, "");
        assert_eq!(record.i0, 4);
    }
}
