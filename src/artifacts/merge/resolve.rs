//! Three-way merge planner
//!
//! The merge engine is a flat planner: it first classifies every candidate
//! file name into an action by comparing blob digests across HEAD, the
//! other tip, and the split point(s), and only then touches the working
//! tree. No command re-enters another command while merging.
//!
//! Digest comparison stands in for content comparison: a blob digest covers
//! the file name and bytes, so for a fixed name equal digests mean equal
//! bytes and vice versa.
//!
//! When the current tip is a merge commit, a second pass runs against the
//! secondary split point. If the passes disagree, `Conflict` dominates
//! `TakeOther`, which dominates `Remove` — the state the working tree would
//! end up in if the decisions were executed one after the other.

use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};

/// What the merge does to one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// Take the other side's version: write it and stage it
    TakeOther { other: ObjectId },
    /// Remove the file and stage the removal
    Remove,
    /// Overwrite with conflict markers built from both sides and stage
    Conflict {
        active: Option<ObjectId>,
        other: Option<ObjectId>,
    },
}

/// The planned merge: one decision per affected file, in name order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    pub actions: Vec<(String, MergeAction)>,
}

impl MergePlan {
    pub fn has_conflict(&self) -> bool {
        self.actions
            .iter()
            .any(|(_, action)| matches!(action, MergeAction::Conflict { .. }))
    }
}

/// Classify every candidate file into a merge action
///
/// The candidate universe is the union of the file sets of HEAD, the other
/// tip, the split point(s), and the current working directory. Files whose
/// classification is "keep the active side" produce no action.
pub fn plan_merge(
    active: &BTreeMap<String, ObjectId>,
    other: &BTreeMap<String, ObjectId>,
    split: &BTreeMap<String, ObjectId>,
    split2: Option<&BTreeMap<String, ObjectId>>,
    working_files: &[String],
) -> MergePlan {
    let mut universe = BTreeSet::new();
    universe.extend(active.keys().cloned());
    universe.extend(other.keys().cloned());
    universe.extend(split.keys().cloned());
    if let Some(split2) = split2 {
        universe.extend(split2.keys().cloned());
    }
    universe.extend(working_files.iter().cloned());

    let mut actions = Vec::new();
    for file_name in universe {
        let a = active.get(&file_name);
        let o = other.get(&file_name);

        let first = classify(a, o, split.get(&file_name));
        let second = split2.and_then(|split2| classify(a, o, split2.get(&file_name)));

        if let Some(action) = combine(first, second) {
            actions.push((file_name, action));
        }
    }

    MergePlan { actions }
}

/// One pass of the decision table against a single split-point version
fn classify(
    a: Option<&ObjectId>,
    o: Option<&ObjectId>,
    s: Option<&ObjectId>,
) -> Option<MergeAction> {
    match o {
        Some(other_oid) => {
            if a == s && o != s {
                // unchanged on the active side, changed on the other side
                Some(MergeAction::TakeOther {
                    other: other_oid.clone(),
                })
            } else if a != s && o != s && a != o {
                // changed on both sides, in different ways
                Some(MergeAction::Conflict {
                    active: a.cloned(),
                    other: o.cloned(),
                })
            } else {
                None
            }
        }
        None => match (a, s) {
            // present at the split point, deleted on the other side
            (Some(active_oid), Some(split_oid)) => {
                if active_oid == split_oid {
                    Some(MergeAction::Remove)
                } else {
                    Some(MergeAction::Conflict {
                        active: Some(active_oid.clone()),
                        other: None,
                    })
                }
            }
            _ => None,
        },
    }
}

fn combine(first: Option<MergeAction>, second: Option<MergeAction>) -> Option<MergeAction> {
    let rank = |action: &MergeAction| match action {
        MergeAction::Conflict { .. } => 2,
        MergeAction::TakeOther { .. } => 1,
        MergeAction::Remove => 0,
    };

    match (first, second) {
        (Some(first), Some(second)) => {
            if rank(&second) > rank(&first) {
                Some(second)
            } else {
                Some(first)
            }
        }
        (first, second) => first.or(second),
    }
}

/// Assemble the conflict-marker file contents
///
/// Each side contributes its bytes newline-terminated; an absent or empty
/// side contributes nothing between its markers.
pub fn conflict_marker(active: Option<&Bytes>, other: Option<&Bytes>) -> Bytes {
    let mut content = Vec::new();

    content.extend_from_slice(b"<<<<<<< HEAD\n");
    push_side(&mut content, active);
    content.extend_from_slice(b"=======\n");
    push_side(&mut content, other);
    content.extend_from_slice(b">>>>>>>\n");

    Bytes::from(content)
}

fn push_side(content: &mut Vec<u8>, side: Option<&Bytes>) {
    if let Some(bytes) = side {
        if !bytes.is_empty() {
            content.extend_from_slice(bytes);
            if !bytes.ends_with(b"\n") {
                content.push(b'\n');
            }
        }
    }
}
