//! First-parent history traversal
//!
//! `RevList` walks the commit graph along first parents only, the order
//! `log` prints and the order push/fetch copy chains in. A seen-set guards
//! against malformed graphs: the walk terminates even if summaries form a
//! cycle.

use crate::areas::history::History;
use crate::artifacts::objects::commit::CommitSummary;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::HashSet;

/// Iterator over the first-parent chain of a commit
pub struct RevList<'h> {
    history: &'h History,
    next: Option<ObjectId>,
    seen: HashSet<ObjectId>,
}

impl<'h> RevList<'h> {
    pub fn new(history: &'h History, start: ObjectId) -> Self {
        RevList {
            history,
            next: Some(start),
            seen: HashSet::new(),
        }
    }
}

impl<'h> Iterator for RevList<'h> {
    type Item = (ObjectId, &'h CommitSummary);

    fn next(&mut self) -> Option<Self::Item> {
        let oid = self.next.take()?;

        if !self.seen.insert(oid.clone()) {
            return None;
        }

        let summary = self.history.get(&oid)?;
        self.next = summary.parent.clone();

        Some((oid, summary))
    }
}
