//! Operations - Imperative child updates for native components.
//!
//! When a native node survives a reconcile pass, its list of child mounts may
//! still change. The reconciler describes that change as a batch of
//! [`Operation`]s handed to `NativeComponent::update`.
//!
//! # Algorithm
//!
//! Children are compared by position, never matched by key. Mounts are
//! compared by identity:
//!
//! 1. `Replace` an index whose old mount is gone and whose new mount is new
//!    (ascending)
//! 2. `Remove` every other mount missing from the new list (descending)
//! 3. Walk the new list and `Insert` what is missing at each index; a mount
//!    that survived at a later index is moved with `Remove` then `Insert`
//!
//! Applying the batch in order to the old list yields the new list. At every
//! step the mount an operation names is the one at its index, so a host may
//! apply the batch by index or by identity.

use crate::node::Mount;

/// One imperative change to a parent's list of child mounts.
///
/// Indices refer to the list as it stands when the operation is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Insert `mount` at `index`.
    Insert { index: usize, mount: Mount },
    /// Swap the mount at `index` from `old` to `new`.
    Replace { index: usize, old: Mount, new: Mount },
    /// Remove `mount` from `index`.
    Remove { index: usize, mount: Mount },
}

impl Operation {
    /// Position the operation applies to.
    pub fn index(&self) -> usize {
        match self {
            Operation::Insert { index, .. }
            | Operation::Replace { index, .. }
            | Operation::Remove { index, .. } => *index,
        }
    }

    /// Apply a batch of operations to a plain list of mounts, in order.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of bounds for the list at that point.
    pub fn apply(operations: &[Operation], mounts: &mut Vec<Mount>) {
        for operation in operations {
            match operation {
                Operation::Insert { index, mount } => mounts.insert(*index, mount.clone()),
                Operation::Replace { index, new, .. } => mounts[*index] = new.clone(),
                Operation::Remove { index, .. } => {
                    mounts.remove(*index);
                }
            }
        }
    }
}

/// Compute the operations that turn `old` into `new`.
///
/// Identical lists (same mounts, same order) produce no operations.
pub fn diff_mounts(old: &[Mount], new: &[Mount]) -> Vec<Operation> {
    let mut operations = Vec::new();
    let mut current = old.to_vec();

    for index in 0..old.len().min(new.len()) {
        if !old[index].same(&new[index]) && !contains(new, &old[index]) && !contains(old, &new[index]) {
            operations.push(Operation::Replace {
                index,
                old: old[index].clone(),
                new: new[index].clone(),
            });
            current[index] = new[index].clone();
        }
    }

    for index in (0..current.len()).rev() {
        if !contains(new, &current[index]) {
            let mount = current.remove(index);
            operations.push(Operation::Remove { index, mount });
        }
    }

    for (index, mount) in new.iter().enumerate() {
        if current.get(index).is_some_and(|m| m.same(mount)) {
            continue;
        }

        let moved_from = current
            .iter()
            .skip(index + 1)
            .position(|m| m.same(mount))
            .map(|offset| index + 1 + offset);
        if let Some(from) = moved_from {
            let mount = current.remove(from);
            operations.push(Operation::Remove {
                index: from,
                mount,
            });
        }

        current.insert(index, mount.clone());
        operations.push(Operation::Insert {
            index,
            mount: mount.clone(),
        });
    }

    // Only reachable when a list holds the same mount twice.
    for index in (new.len()..current.len()).rev() {
        let mount = current.remove(index);
        operations.push(Operation::Remove { index, mount });
    }

    operations
}

fn contains(mounts: &[Mount], mount: &Mount) -> bool {
    mounts.iter().any(|m| m.same(mount))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn mounts(count: usize) -> Vec<Mount> {
        (0..count).map(Mount::new).collect()
    }

    fn assert_same(a: &[Mount], b: &[Mount]) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!(x.same(y));
        }
    }

    /// Apply a batch the way a host tracking children by identity would,
    /// checking that every named mount is where the index says.
    fn apply_by_identity(operations: &[Operation], mounts: &mut Vec<Mount>) {
        for operation in operations {
            match operation {
                Operation::Insert { index, mount } => {
                    assert!(!mounts.iter().any(|m| m.same(mount)), "{operation:?} inserts a live mount");
                    mounts.insert(*index, mount.clone());
                }
                Operation::Replace { index, old, new } => {
                    let position = mounts.iter().position(|m| m.same(old));
                    assert_eq!(position, Some(*index), "{operation:?}");
                    mounts[*index] = new.clone();
                }
                Operation::Remove { index, mount } => {
                    let position = mounts.iter().position(|m| m.same(mount));
                    assert_eq!(position, Some(*index), "{operation:?}");
                    mounts.remove(*index);
                }
            }
        }
    }

    #[test]
    fn test_identical_lists() {
        let list = mounts(3);
        assert!(diff_mounts(&list, &list.clone()).is_empty());
        assert!(diff_mounts(&[], &[]).is_empty());
    }

    #[test]
    fn test_insert_into_empty() {
        let new = mounts(2);
        let operations = diff_mounts(&[], &new);

        assert_eq!(
            operations,
            vec![
                Operation::Insert { index: 0, mount: new[0].clone() },
                Operation::Insert { index: 1, mount: new[1].clone() },
            ]
        );
    }

    #[test]
    fn test_remove_tail_descending() {
        let old = mounts(3);
        let operations = diff_mounts(&old, &old[..1]);

        assert_eq!(
            operations,
            vec![
                Operation::Remove { index: 2, mount: old[2].clone() },
                Operation::Remove { index: 1, mount: old[1].clone() },
            ]
        );
    }

    #[test]
    fn test_replace_in_place() {
        let old = mounts(3);
        let mut new = old.clone();
        new[1] = Mount::new(99);

        let operations = diff_mounts(&old, &new);
        assert_eq!(
            operations,
            vec![Operation::Replace {
                index: 1,
                old: old[1].clone(),
                new: new[1].clone(),
            }]
        );
        assert_eq!(operations[0].index(), 1);
    }

    #[test]
    fn test_shrink_in_the_middle_removes_the_missing_mount() {
        let old = mounts(4);
        let new = vec![old[0].clone(), old[1].clone(), old[3].clone()];

        let operations = diff_mounts(&old, &new);

        assert_eq!(
            operations,
            vec![Operation::Remove { index: 2, mount: old[2].clone() }]
        );
    }

    #[test]
    fn test_grow_in_the_middle_inserts_the_new_mount() {
        let pool = mounts(4);
        let old = vec![pool[0].clone(), pool[2].clone()];
        let new = vec![pool[0].clone(), pool[1].clone(), pool[2].clone()];

        assert_eq!(
            diff_mounts(&old, &new),
            vec![Operation::Insert { index: 1, mount: pool[1].clone() }]
        );
    }

    #[test]
    fn test_reorder_moves_mount() {
        let old = mounts(3);
        let new = vec![old[2].clone(), old[0].clone(), old[1].clone()];

        assert_eq!(
            diff_mounts(&old, &new),
            vec![
                Operation::Remove { index: 2, mount: old[2].clone() },
                Operation::Insert { index: 0, mount: old[2].clone() },
            ]
        );
    }

    #[test]
    fn test_apply_reproduces_new_list() {
        let pool = mounts(6);
        let cases: Vec<(Vec<Mount>, Vec<Mount>)> = vec![
            (pool[..3].to_vec(), pool[..3].to_vec()),
            (pool[..3].to_vec(), pool[..5].to_vec()),
            (pool[..5].to_vec(), pool[..2].to_vec()),
            (pool[..3].to_vec(), vec![pool[3].clone(), pool[1].clone()]),
            (vec![], pool[..4].to_vec()),
            (pool[..4].to_vec(), vec![]),
            (vec![pool[0].clone(), pool[1].clone()], vec![pool[1].clone(), pool[0].clone(), pool[5].clone()]),
            (pool[..4].to_vec(), vec![pool[0].clone(), pool[1].clone(), pool[3].clone()]),
            (pool[..4].to_vec(), vec![pool[4].clone(), pool[2].clone(), pool[5].clone(), pool[0].clone()]),
        ];

        for (old, new) in cases {
            let operations = diff_mounts(&old, &new);

            let mut by_index = old.clone();
            Operation::apply(&operations, &mut by_index);
            assert_same(&by_index, &new);

            let mut by_identity = old.clone();
            apply_by_identity(&operations, &mut by_identity);
            assert_same(&by_identity, &new);
        }
    }
}
