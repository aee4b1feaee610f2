use super::Orientation;
use crate::StrError;
use log::error;
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Maps grain ids to crystallographic orientations
///
/// The table is read once and never modified afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct OrientationTable {
    orientations: BTreeMap<usize, Orientation>,
}

impl OrientationTable {
    /// Reads the table from a file
    ///
    /// Each non-empty line not starting with `#` holds `grain_id r1 r2 r3`.
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path);
        let file = File::open(path).map_err(|_| "cannot open orientation file")?;
        OrientationTable::from_reader(BufReader::new(file))
    }

    /// Reads the table from a buffered reader
    pub fn from_reader<R>(reader: R) -> Result<Self, StrError>
    where
        R: BufRead,
    {
        let mut orientations = BTreeMap::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|_| "cannot read line of orientation file")?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let tokens: Vec<_> = trimmed.split_whitespace().collect();
            if tokens.len() != 4 {
                error!(
                    "orientation file, line {}: found {} entries instead of 4",
                    index + 1,
                    tokens.len()
                );
                return Err("orientation line must have 4 entries");
            }
            let id = tokens[0].parse::<usize>().map_err(|_| {
                error!("orientation file, line {}: invalid grain id '{}'", index + 1, tokens[0]);
                "cannot parse grain id in orientation file"
            })?;
            let mut r = [0.0; 3];
            for i in 0..3 {
                r[i] = match tokens[1 + i].parse::<f64>() {
                    Ok(v) if v.is_finite() => v,
                    _ => {
                        error!("orientation file, line {}: invalid value '{}'", index + 1, tokens[1 + i]);
                        return Err("cannot parse orientation");
                    }
                };
            }
            if orientations.insert(id, Orientation::new(r)).is_some() {
                error!("orientation file, line {}: grain {} is repeated", index + 1, id);
                return Err("grain id is repeated in orientation file");
            }
        }
        if orientations.is_empty() {
            return Err("orientation file has no entries");
        }
        Ok(OrientationTable { orientations })
    }

    /// Returns the orientation of a grain
    pub fn get(&self, grain_id: usize) -> Option<&Orientation> {
        self.orientations.get(&grain_id)
    }

    /// Returns the grain ids (sorted)
    pub fn ids(&self) -> Vec<usize> {
        self.orientations.keys().copied().collect()
    }

    /// Returns the number of grains
    pub fn len(&self) -> usize {
        self.orientations.len()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
