//! Planning of folder deletions.
//!
//! A plan only names what must go; the store removes it in one transaction.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::OrganizerError;
use crate::folders::tree::{self, FolderTree};
use crate::models::{Folder, FolderId, Note, NoteId, ROOT_FOLDER_ID};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletePlan {
    target: FolderId,
    folder_ids: BTreeSet<FolderId>,
}

impl DeletePlan {
    fn new(target: FolderId, descendants: BTreeSet<FolderId>) -> Self {
        let mut folder_ids = descendants;
        folder_ids.insert(target);
        DeletePlan { target, folder_ids }
    }

    pub fn target(&self) -> FolderId {
        self.target
    }

    /// The target folder and all of its descendants.
    pub fn folder_ids(&self) -> &BTreeSet<FolderId> {
        &self.folder_ids
    }

    pub fn contains_folder(&self, id: FolderId) -> bool {
        self.folder_ids.contains(&id)
    }

    /// Whether a note filed in `folder_id` goes with the folders.
    /// Unfiled notes are never touched.
    pub fn deletes_note(&self, folder_id: Option<FolderId>) -> bool {
        folder_id.is_some_and(|id| self.folder_ids.contains(&id))
    }

    pub fn notes_to_delete(&self, notes: &[Note]) -> Vec<NoteId> {
        notes
            .iter()
            .filter(|note| self.deletes_note(note.folder_id))
            .filter_map(|note| note.id)
            .collect()
    }

    /// Folder to show once the plan has run: root if `current` is being deleted.
    pub fn active_folder_after(&self, current: FolderId) -> FolderId {
        if self.contains_folder(current) {
            ROOT_FOLDER_ID
        } else {
            current
        }
    }

    pub fn len(&self) -> usize {
        self.folder_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folder_ids.is_empty()
    }
}

fn protect_root(target: FolderId) -> Result<(), OrganizerError> {
    if target == ROOT_FOLDER_ID {
        return Err(OrganizerError::ProtectedResource(
            "the root folder cannot be deleted".to_string(),
        ));
    }
    Ok(())
}

/// Plan the recursive removal of `target`, its sub-folders and their notes.
pub fn plan_delete(target: FolderId, folders: &[Folder]) -> Result<DeletePlan, OrganizerError> {
    protect_root(target)?;
    if !folders.iter().any(|f| f.id == target) {
        return Err(OrganizerError::FolderNotFound(target));
    }
    let plan = DeletePlan::new(target, tree::descendants_of(target, folders));
    tracing::debug!(folder_id = target, folders = plan.len(), "planned recursive folder delete");
    Ok(plan)
}

/// Plan the removal of `target` alone, refusing when it still holds anything.
pub fn plan_shallow_delete(
    target: FolderId,
    folders: &[Folder],
    notes: &[Note],
) -> Result<DeletePlan, OrganizerError> {
    protect_root(target)?;
    if !folders.iter().any(|f| f.id == target) {
        return Err(OrganizerError::FolderNotFound(target));
    }
    let has_subfolders = !tree::descendants_of(target, folders).is_empty();
    let has_notes = notes.iter().any(|n| n.folder_id == Some(target));
    if has_subfolders || has_notes {
        return Err(OrganizerError::FolderNotEmpty(target));
    }
    Ok(DeletePlan::new(target, BTreeSet::new()))
}

impl FolderTree {
    /// Same as [`plan_delete`] against an already built tree.
    pub fn plan_delete(&self, target: FolderId) -> Result<DeletePlan, OrganizerError> {
        protect_root(target)?;
        if !self.contains(target) {
            return Err(OrganizerError::FolderNotFound(target));
        }
        Ok(DeletePlan::new(target, self.descendants_of(target)))
    }
}
