use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SaveError;

/// Where a finished drawing goes. The editor never knows about persistence;
/// the hosting app injects a sink (or fails loudly when it cannot).
pub trait ExportSink {
    fn save_svg(&mut self, svg: &str) -> Result<(), SaveError>;
}

/// One saved drawing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryEntry {
    pub id: Uuid,
    /// Seconds since the UNIX epoch at save time.
    pub created_secs: u64,
    pub svg: String,
}

/// The persisted collection of saved drawings, stored as a JSON string in
/// the eframe key/value storage.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Gallery {
    entries: Vec<GalleryEntry>,
}

impl Gallery {
    const STORAGE_KEY: &'static str = "sketch_gallery";

    pub fn entries(&self) -> &[GalleryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn remove(&mut self, id: Uuid) {
        self.entries.retain(|entry| entry.id != id);
    }

    pub fn load(storage: Option<&dyn eframe::Storage>) -> Self {
        let Some(raw) = storage.and_then(|s| s.get_string(Self::STORAGE_KEY)) else {
            return Self::default();
        };
        match serde_json::from_str(&raw) {
            Ok(gallery) => gallery,
            Err(err) => {
                log::warn!("discarding unreadable gallery state: {err}");
                Self::default()
            }
        }
    }

    pub fn persist(&self, storage: &mut dyn eframe::Storage) {
        match serde_json::to_string(self) {
            Ok(json) => storage.set_string(Self::STORAGE_KEY, json),
            Err(err) => log::error!("failed to serialize gallery: {err}"),
        }
    }
}

impl ExportSink for Gallery {
    fn save_svg(&mut self, svg: &str) -> Result<(), SaveError> {
        self.entries.push(GalleryEntry {
            id: Uuid::new_v4(),
            created_secs: timestamp_secs(),
            svg: svg.to_owned(),
        });
        Ok(())
    }
}

/// Seconds since the UNIX epoch.
pub fn timestamp_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
