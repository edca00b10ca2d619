use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::fields::{ApplicantKind, FormFields, Step};

/// Fixed storage key for the single in-progress draft.
pub const DRAFT_KEY: &str = "vrt_application_draft";

/// Snapshot persisted on every field, step, or kind change while the
/// workflow is unsubmitted. File handles are never part of it: the
/// attachment slots in [`FormFields`] are skipped by serde.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    #[serde(rename = "formData")]
    pub form_data: FormFields,
    #[serde(rename = "currentStep")]
    pub current_step: u8,
    #[serde(rename = "isFreshApplicant")]
    pub is_fresh_applicant: bool,
}

impl Draft {
    pub fn kind(&self) -> ApplicantKind {
        if self.is_fresh_applicant {
            ApplicantKind::Fresh
        } else {
            ApplicantKind::Experienced
        }
    }

    /// Recovered step, falling back to the kind's starting step when the
    /// stored index is out of range.
    pub fn step(&self) -> Step {
        Step::from_index(self.current_step).unwrap_or_else(|| self.kind().starting_step())
    }
}

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("draft i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("draft serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Local key-value persistence surface for the in-progress draft. The
/// medium is swappable: a JSON file here, browser storage in a web shell,
/// or memory in tests. A load never fails loudly — unreadable or malformed
/// data is discarded and the workflow starts fresh.
pub trait DraftStore {
    fn load(&self) -> Option<Draft>;
    fn save(&self, draft: &Draft) -> Result<(), DraftError>;
    fn clear(&self) -> Result<(), DraftError>;
}

/// Draft storage in a JSON file named after [`DRAFT_KEY`] inside the given
/// directory.
pub struct JsonFileDraftStore {
    path: PathBuf,
}

impl JsonFileDraftStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{DRAFT_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DraftStore for JsonFileDraftStore {
    fn load(&self) -> Option<Draft> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(draft) => Some(draft),
            Err(e) => {
                warn!("Discarding malformed draft at {}: {e}", self.path.display());
                None
            }
        }
    }

    fn save(&self, draft: &Draft) -> Result<(), DraftError> {
        let json = serde_json::to_string(draft)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), DraftError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory draft store. Clones share the same slot, so a "fresh" engine
/// over a clone sees what an earlier engine persisted — which is exactly
/// the rehydration scenario tests need. Stores serialized JSON so the
/// round trip exercises the same serde path as the file store.
#[derive(Debug, Clone, Default)]
pub struct MemoryDraftStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryDraftStore {
    pub fn is_empty(&self) -> bool {
        self.slot.lock().unwrap().is_none()
    }
}

impl DraftStore for MemoryDraftStore {
    fn load(&self) -> Option<Draft> {
        let slot = self.slot.lock().unwrap();
        let raw = slot.as_ref()?;
        match serde_json::from_str(raw) {
            Ok(draft) => Some(draft),
            Err(e) => {
                warn!("Discarding malformed in-memory draft: {e}");
                None
            }
        }
    }

    fn save(&self, draft: &Draft) -> Result<(), DraftError> {
        let json = serde_json::to_string(draft)?;
        *self.slot.lock().unwrap() = Some(json);
        Ok(())
    }

    fn clear(&self) -> Result<(), DraftError> {
        *self.slot.lock().unwrap() = None;
        Ok(())
    }
}
