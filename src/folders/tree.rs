//! Folder hierarchy built from flat `(id, parent_id)` records.
//!
//! Nodes live in one arena and refer to each other by index, so nothing read
//! from the store can create an ownership cycle. Parent links that point
//! nowhere, or that loop back on themselves, are re-attached under root.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use serde::Serialize;

use crate::error::OrganizerError;
use crate::models::{Folder, FolderId, ROOT_FOLDER_ID};

#[derive(Debug, Clone)]
struct FolderNode {
    folder: Folder,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// A folder and its depth below root, as produced by [`FolderTree::flatten`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatFolder<'a> {
    pub folder: &'a Folder,
    pub depth: usize,
}

#[derive(Debug, Clone, Default)]
pub struct FolderTree {
    nodes: Vec<FolderNode>,
    index: HashMap<FolderId, usize>,
}

impl FolderTree {
    /// Build the tree rooted at folder 0.
    ///
    /// Without a root folder in `folders` the tree is empty: there are no
    /// folders to show until the root has been created.
    pub fn build(folders: &[Folder]) -> Self {
        let mut by_id: HashMap<FolderId, &Folder> = HashMap::with_capacity(folders.len());
        for folder in folders {
            if by_id.insert(folder.id, folder).is_some() {
                tracing::warn!(folder_id = folder.id, "duplicate folder id, keeping the last record");
            }
        }
        let Some(root) = by_id.get(&ROOT_FOLDER_ID) else {
            tracing::debug!("root folder missing, treating folder list as empty");
            return FolderTree::default();
        };

        let mut ids: Vec<FolderId> = by_id.keys().copied().filter(|id| *id != ROOT_FOLDER_ID).collect();
        ids.sort_unstable();

        let mut parents: HashMap<FolderId, FolderId> = ids
            .iter()
            .map(|id| {
                let parent = by_id[id]
                    .parent_id
                    .filter(|p| by_id.contains_key(p))
                    .unwrap_or(ROOT_FOLDER_ID);
                (*id, parent)
            })
            .collect();
        break_cycles(&ids, &mut parents);

        let mut tree = FolderTree {
            nodes: Vec::with_capacity(ids.len() + 1),
            index: HashMap::with_capacity(ids.len() + 1),
        };
        tree.push(Folder {
            parent_id: None,
            ..(*root).clone()
        });
        for id in &ids {
            tree.push(by_id[id].clone());
        }
        for id in &ids {
            let child = tree.index[id];
            let parent = tree.index[&parents[id]];
            tree.nodes[child].parent = Some(parent);
            tree.nodes[parent].children.push(child);
        }
        tree
    }

    fn push(&mut self, folder: Folder) {
        self.index.insert(folder.id, self.nodes.len());
        self.nodes.push(FolderNode {
            folder,
            parent: None,
            children: Vec::new(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn root(&self) -> Option<&Folder> {
        self.get(ROOT_FOLDER_ID)
    }

    pub fn contains(&self, id: FolderId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: FolderId) -> Option<&Folder> {
        self.index.get(&id).map(|&i| &self.nodes[i].folder)
    }

    pub fn children_of(&self, id: FolderId) -> Vec<&Folder> {
        self.index
            .get(&id)
            .map(|&i| {
                self.nodes[i]
                    .children
                    .iter()
                    .map(|&c| &self.nodes[c].folder)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Breadcrumb from root down to `id`, both included.
    pub fn path_to(&self, id: FolderId) -> Vec<&Folder> {
        let mut path = Vec::new();
        let mut cursor = self.index.get(&id).copied();
        while let Some(i) = cursor {
            path.push(&self.nodes[i].folder);
            cursor = self.nodes[i].parent;
        }
        path.reverse();
        path
    }

    /// Depth-first, pre-order listing starting at root.
    pub fn flatten(&self) -> Vec<FlatFolder<'_>> {
        let mut flat = Vec::with_capacity(self.nodes.len());
        let Some(&root) = self.index.get(&ROOT_FOLDER_ID) else {
            return flat;
        };
        let mut stack = vec![(root, 0usize)];
        while let Some((i, depth)) = stack.pop() {
            let node = &self.nodes[i];
            flat.push(FlatFolder {
                folder: &node.folder,
                depth,
            });
            stack.extend(node.children.iter().rev().map(|&c| (c, depth + 1)));
        }
        flat
    }

    /// Every folder nested below `id` at any depth, excluding `id` itself.
    pub fn descendants_of(&self, id: FolderId) -> BTreeSet<FolderId> {
        let mut found = BTreeSet::new();
        let Some(&start) = self.index.get(&id) else {
            return found;
        };
        let mut queue: VecDeque<usize> = self.nodes[start].children.iter().copied().collect();
        while let Some(i) = queue.pop_front() {
            let node = &self.nodes[i];
            if found.insert(node.folder.id) {
                queue.extend(node.children.iter().copied());
            }
        }
        found
    }

    /// Check that moving `folder` under `new_parent` keeps the hierarchy acyclic.
    pub fn check_move(&self, folder: FolderId, new_parent: FolderId) -> Result<(), OrganizerError> {
        if folder == ROOT_FOLDER_ID {
            return Err(OrganizerError::ProtectedResource(
                "the root folder cannot be moved".to_string(),
            ));
        }
        if !self.contains(folder) {
            return Err(OrganizerError::FolderNotFound(folder));
        }
        if !self.contains(new_parent) {
            return Err(OrganizerError::FolderNotFound(new_parent));
        }
        if folder == new_parent || self.descendants_of(folder).contains(&new_parent) {
            return Err(OrganizerError::InvalidMove { folder, new_parent });
        }
        Ok(())
    }
}

/// Re-attach one member of every parent cycle under root.
///
/// `ids` must be sorted; the smallest id of each cycle is the one detached,
/// which keeps the outcome independent of input order.
fn break_cycles(ids: &[FolderId], parents: &mut HashMap<FolderId, FolderId>) {
    let mut settled: HashSet<FolderId> = HashSet::with_capacity(ids.len());
    for &id in ids {
        let mut path: Vec<FolderId> = Vec::new();
        let mut on_path: HashSet<FolderId> = HashSet::new();
        let mut cursor = id;
        while cursor != ROOT_FOLDER_ID && !settled.contains(&cursor) {
            if !on_path.insert(cursor) {
                let cycle_start = path.iter().position(|f| *f == cursor).unwrap_or(0);
                let cut = path[cycle_start..].iter().copied().min().unwrap_or(cursor);
                tracing::warn!(folder_id = cut, "folder parent chain loops, attaching under root");
                parents.insert(cut, ROOT_FOLDER_ID);
                break;
            }
            path.push(cursor);
            cursor = parents.get(&cursor).copied().unwrap_or(ROOT_FOLDER_ID);
        }
        settled.extend(path);
    }
}

/// Descendants of `id` computed straight from a flat folder list.
///
/// Uses the full tree when root is present. Otherwise follows whatever parent
/// links exist, guarding against loops.
pub fn descendants_of(id: FolderId, folders: &[Folder]) -> BTreeSet<FolderId> {
    if folders.iter().any(Folder::is_root) {
        return FolderTree::build(folders).descendants_of(id);
    }

    let mut children: HashMap<FolderId, Vec<FolderId>> = HashMap::new();
    for folder in folders {
        if let Some(parent) = folder.parent_id {
            children.entry(parent).or_default().push(folder.id);
        }
    }
    let mut found = BTreeSet::new();
    let mut queue: VecDeque<FolderId> = children.get(&id).cloned().unwrap_or_default().into();
    while let Some(current) = queue.pop_front() {
        if current == id || !found.insert(current) {
            continue;
        }
        if let Some(next) = children.get(&current) {
            queue.extend(next.iter().copied());
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(id: FolderId, parent: Option<FolderId>) -> Folder {
        Folder::new(id, format!("Folder {}", id), parent)
    }

    fn chain() -> Vec<Folder> {
        vec![
            Folder::root(),
            folder(1, Some(0)),
            folder(2, Some(1)),
            folder(3, Some(2)),
            folder(4, None),
            folder(5, Some(4)),
        ]
    }

    fn ids(folders: &[&Folder]) -> Vec<FolderId> {
        folders.iter().map(|f| f.id).collect()
    }

    #[test]
    fn builds_hierarchy_under_root() {
        let tree = FolderTree::build(&chain());
        assert_eq!(tree.len(), 6);
        assert_eq!(ids(&tree.children_of(0)), vec![1, 4]);
        assert_eq!(ids(&tree.children_of(2)), vec![3]);
        assert_eq!(ids(&tree.path_to(4)), vec![0, 4]);
        assert_eq!(ids(&tree.path_to(3)), vec![0, 1, 2, 3]);
    }

    #[test]
    fn flatten_is_preorder_with_depth() {
        let folders = chain();
        let tree = FolderTree::build(&folders);
        let flat: Vec<_> = tree.flatten().iter().map(|f| (f.folder.id, f.depth)).collect();
        assert_eq!(flat, vec![(0, 0), (1, 1), (2, 2), (3, 3), (4, 1), (5, 2)]);
    }

    #[test]
    fn descendants_are_transitive_and_exclude_self() {
        let tree = FolderTree::build(&chain());
        assert_eq!(tree.descendants_of(1), BTreeSet::from([2, 3]));
        assert_eq!(tree.descendants_of(3), BTreeSet::new());
        assert_eq!(tree.descendants_of(42), BTreeSet::new());
    }

    #[test]
    fn root_descendants_are_every_other_folder() {
        let folders = chain();
        assert_eq!(descendants_of(0, &folders), BTreeSet::from([1, 2, 3, 4, 5]));
    }

    #[test]
    fn dangling_parent_attaches_under_root() {
        let folders = vec![Folder::root(), folder(1, Some(99)), folder(2, Some(1))];
        let tree = FolderTree::build(&folders);
        assert_eq!(ids(&tree.children_of(0)), vec![1]);
        assert_eq!(tree.descendants_of(0), BTreeSet::from([1, 2]));
    }

    #[test]
    fn cycles_are_broken_at_smallest_member() {
        let folders = vec![
            Folder::root(),
            folder(7, Some(8)),
            folder(8, Some(9)),
            folder(9, Some(7)),
            folder(10, Some(9)),
            folder(11, Some(11)),
        ];
        let tree = FolderTree::build(&folders);
        assert_eq!(tree.len(), 6);
        assert_eq!(ids(&tree.children_of(0)), vec![7, 11]);
        assert_eq!(ids(&tree.path_to(10)), vec![0, 7, 9, 10]);
        assert_eq!(tree.descendants_of(0), BTreeSet::from([7, 8, 9, 10, 11]));
        assert_eq!(tree.flatten().len(), 6);
    }

    #[test]
    fn root_parent_link_is_ignored() {
        let folders = vec![folder(0, Some(1)), folder(1, Some(0))];
        let tree = FolderTree::build(&folders);
        assert_eq!(ids(&tree.path_to(0)), vec![0]);
        assert_eq!(tree.descendants_of(0), BTreeSet::from([1]));
    }

    #[test]
    fn missing_root_means_no_folders_yet() {
        let folders = vec![folder(1, None), folder(2, Some(1))];
        let tree = FolderTree::build(&folders);
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
        assert!(tree.flatten().is_empty());
        // descendants still follow the links that exist
        assert_eq!(descendants_of(1, &folders), BTreeSet::from([2]));
    }

    #[test]
    fn descendants_without_root_survive_loops() {
        let folders = vec![folder(1, Some(2)), folder(2, Some(1)), folder(3, Some(2))];
        assert_eq!(descendants_of(1, &folders), BTreeSet::from([2, 3]));
    }

    #[test]
    fn moves_that_would_create_a_cycle_are_rejected() {
        let tree = FolderTree::build(&chain());
        assert_eq!(
            tree.check_move(1, 3),
            Err(OrganizerError::InvalidMove { folder: 1, new_parent: 3 })
        );
        assert_eq!(
            tree.check_move(2, 2),
            Err(OrganizerError::InvalidMove { folder: 2, new_parent: 2 })
        );
        assert!(matches!(tree.check_move(0, 1), Err(OrganizerError::ProtectedResource(_))));
        assert_eq!(tree.check_move(3, 77), Err(OrganizerError::FolderNotFound(77)));
        assert_eq!(tree.check_move(3, 4), Ok(()));
        assert_eq!(tree.check_move(3, 0), Ok(()));
    }
}
