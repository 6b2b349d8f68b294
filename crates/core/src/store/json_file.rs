//! Center store backed by a JSON file
//!
//! The file holds `{ "lastId": n, "centers": [...] }`, with centers in the
//! same camelCase shape the API returns. A bare array of centers is also
//! accepted. Every read loads the whole file and every write rewrites it,
//! which suits the small, single-process data sets the CLI manages.

use super::{next_id, select_active, CenterStore};
use crate::error::{Error, Result};
use crate::model::{CenterPatch, NewCenter};
use chrono::Utc;
use relief_geo::{BoundingBox, Center};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A center store persisted as a JSON array on disk.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open a store at `path`. The file is created on the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Records> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Records::default()),
            Err(e) => {
                return Err(Error::upstream(format!(
                    "Failed to read center data {}",
                    self.path.display()
                ))
                .with_source(e))
            }
        };

        if content.trim().is_empty() {
            return Ok(Records::default());
        }

        let on_disk: OnDisk = serde_json::from_str(&content).map_err(|e| {
            Error::upstream(format!("Failed to parse center data {}", self.path.display()))
                .with_source(e)
        })?;
        Ok(on_disk.into())
    }

    fn save(&self, records: &Records) -> Result<()> {
        let json = serde_json::to_string_pretty(records).map_err(|e| {
            Error::upstream("Failed to serialize center data").with_source(e)
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::upstream(format!("Failed to create {}", parent.display())).with_source(e)
            })?;
        }

        // Write beside the target and rename so readers never see a torn file.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)
            .and_then(|()| std::fs::rename(&tmp, &self.path))
            .map_err(|e| {
                Error::upstream(format!("Failed to write center data {}", self.path.display()))
                    .with_source(e)
            })
    }
}

/// File contents: the records plus the last id handed out.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Records {
    /// Ids are never reused, even after a delete.
    #[serde(default)]
    last_id: i64,
    centers: Vec<Center>,
}

impl Records {
    fn allocate_id(&mut self) -> i64 {
        self.last_id = self.last_id.max(next_id(&self.centers) - 1) + 1;
        self.last_id
    }
}

/// Accepted file shapes. A bare array is read as records with no sequence.
#[derive(Deserialize)]
#[serde(untagged)]
enum OnDisk {
    Sequenced(Records),
    Array(Vec<Center>),
}

impl From<OnDisk> for Records {
    fn from(on_disk: OnDisk) -> Self {
        match on_disk {
            OnDisk::Sequenced(records) => records,
            OnDisk::Array(centers) => Records {
                last_id: next_id(&centers) - 1,
                centers,
            },
        }
    }
}

impl CenterStore for JsonFileStore {
    fn fetch_active(&self, bounds: Option<&BoundingBox>) -> Result<Vec<Center>> {
        Ok(select_active(&self.load()?.centers, bounds))
    }

    fn get(&self, id: i64) -> Result<Option<Center>> {
        Ok(self.load()?.centers.into_iter().find(|c| c.id == id))
    }

    fn insert(&self, center: NewCenter) -> Result<Center> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut records = self.load()?;
        let record = center.into_center(records.allocate_id(), Utc::now());
        records.centers.push(record.clone());
        self.save(&records)?;
        Ok(record)
    }

    fn update(&self, id: i64, patch: CenterPatch) -> Result<Option<Center>> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut records = self.load()?;
        let updated = match records.centers.iter_mut().find(|c| c.id == id) {
            Some(center) => {
                patch.apply(center, Utc::now());
                center.clone()
            }
            None => return Ok(None),
        };
        self.save(&records)?;
        Ok(Some(updated))
    }

    fn delete(&self, id: i64) -> Result<bool> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut records = self.load()?;
        let before = records.centers.len();
        records.centers.retain(|c| c.id != id);
        if records.centers.len() == before {
            return Ok(false);
        }
        self.save(&records)?;
        Ok(true)
    }
}
