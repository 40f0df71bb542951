//! Problem editor draft autosave
//!
//! One editor session moves through `Clean -> Dirty -> Saved | Discarded`.
//! Every field change overwrites the single global draft slot; resuming a
//! session restores the slot's draft only when it is bound to the same
//! target. Last-writer-wins across sessions.

use std::sync::Arc;

use chrono::Utc;

use crate::constants::storage_keys;
use crate::error::{AppError, AppResult};
use crate::models::ProblemDraft;
use crate::store::StorageBackend;

/// Lifecycle state of an editor session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftState {
    Clean,
    Dirty,
    Saved,
    Discarded,
}

/// One problem editor session bound to a target (`Some(id)` for an existing
/// problem, `None` for a new one)
pub struct DraftSession {
    backend: Arc<dyn StorageBackend>,
    target: Option<u64>,
    state: DraftState,
}

impl DraftSession {
    /// Open an editor session for the given target
    pub fn open(backend: Arc<dyn StorageBackend>, target: Option<u64>) -> Self {
        Self {
            backend,
            target,
            state: DraftState::Clean,
        }
    }

    pub fn state(&self) -> DraftState {
        self.state
    }

    pub fn target(&self) -> Option<u64> {
        self.target
    }

    /// Whether leaving the editor should ask for confirmation
    pub fn has_unsaved_changes(&self) -> bool {
        self.state == DraftState::Dirty
    }

    /// Record a field change: mark the session dirty and persist a snapshot,
    /// unconditionally overwriting any prior draft in the slot
    pub fn record_change(&mut self, mut draft: ProblemDraft) -> AppResult<()> {
        draft.problem_id = self.target;
        draft.saved_at = Utc::now();

        let raw = serde_json::to_string(&draft)?;
        self.backend.put(storage_keys::EDITOR_DRAFT, &raw)?;
        self.state = DraftState::Dirty;

        Ok(())
    }

    /// Re-read the slot on return to the editor; a stored draft is restored
    /// only when it is bound to this session's target
    pub fn resume(&self) -> AppResult<Option<ProblemDraft>> {
        let Some(raw) = self.backend.get(storage_keys::EDITOR_DRAFT)? else {
            return Ok(None);
        };

        let draft: ProblemDraft =
            serde_json::from_str(&raw).map_err(|err| AppError::CorruptData {
                key: storage_keys::EDITOR_DRAFT.to_string(),
                reason: err.to_string(),
            })?;

        if draft.targets(self.target) {
            Ok(Some(draft))
        } else {
            Ok(None)
        }
    }

    /// Successful submit: clear the slot and finish the session
    pub fn mark_saved(&mut self) -> AppResult<()> {
        self.backend.remove(storage_keys::EDITOR_DRAFT)?;
        self.state = DraftState::Saved;
        Ok(())
    }

    /// Explicit discard: clear the slot; the caller restores the form to the
    /// last persisted problem state (or blank defaults)
    pub fn discard(&mut self) -> AppResult<()> {
        self.backend.remove(storage_keys::EDITOR_DRAFT)?;
        self.state = DraftState::Discarded;
        Ok(())
    }

    /// Clear the slot when the problem it is bound to has been deleted
    pub fn discard_for_problem(backend: &Arc<dyn StorageBackend>, id: u64) -> AppResult<()> {
        let Some(raw) = backend.get(storage_keys::EDITOR_DRAFT)? else {
            return Ok(());
        };

        let draft: ProblemDraft =
            serde_json::from_str(&raw).map_err(|err| AppError::CorruptData {
                key: storage_keys::EDITOR_DRAFT.to_string(),
                reason: err.to_string(),
            })?;

        if draft.problem_id == Some(id) {
            backend.remove(storage_keys::EDITOR_DRAFT)?;
        }

        Ok(())
    }
}
