//! Split-point search for merges
//!
//! The split point of two branch tips is the most recent commit reachable
//! from both, used as the base of the three-way merge. The search is
//! chain-based: it collects the first-parent chain of the current tip into
//! a set, then walks the other tip's first-parent chain and returns the
//! first member of that set.
//!
//! When the current tip is itself a merge commit, a secondary split point
//! is computed the same way over the tip's second-parent chain. This is a
//! deliberate heuristic, not a true lowest common ancestor over the full
//! merge DAG: commits reachable only through second parents deeper in the
//! history are not considered. The merge engine's decision table is defined
//! against exactly these two chains.
//!
//! All walks carry a seen-set so malformed histories (cycles, missing
//! summaries) terminate instead of looping.

use crate::artifacts::objects::commit::CommitSummary;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::HashSet;

/// Which parent pointer a chain walk follows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentChain {
    First,
    Second,
}

/// Finds split points between two commits
///
/// Takes a loader function resolving a commit id to its summary, making
/// the search independent of where summaries live (the control record in
/// production, a plain map in tests).
pub struct SplitPointFinder<'h, LoaderFn>
where
    LoaderFn: Fn(&ObjectId) -> Option<&'h CommitSummary>,
{
    load: LoaderFn,
    _marker: std::marker::PhantomData<&'h ()>,
}

impl<'h, LoaderFn> SplitPointFinder<'h, LoaderFn>
where
    LoaderFn: Fn(&ObjectId) -> Option<&'h CommitSummary>,
{
    pub fn new(load: LoaderFn) -> Self {
        Self {
            load,
            _marker: std::marker::PhantomData,
        }
    }

    /// Find the split point between the current tip and another tip
    ///
    /// `chain` selects which parent pointer the current tip's ancestry
    /// follows; the other tip always walks first parents. Returns `None`
    /// when the chains share no commit.
    pub fn find(
        &self,
        head: &ObjectId,
        other: &ObjectId,
        chain: ParentChain,
    ) -> Option<ObjectId> {
        let head_chain = self.chain_set(head, chain);

        let mut seen = HashSet::new();
        let mut current = Some(other.clone());

        while let Some(oid) = current {
            if !seen.insert(oid.clone()) {
                break;
            }

            if head_chain.contains(&oid) {
                return Some(oid);
            }

            current = (self.load)(&oid).and_then(|summary| summary.parent.clone());
        }

        None
    }

    /// Collect the commits on one parent chain of a starting commit
    fn chain_set(&self, start: &ObjectId, chain: ParentChain) -> HashSet<ObjectId> {
        let mut members = HashSet::new();
        let mut current = Some(start.clone());

        while let Some(oid) = current {
            if !members.insert(oid.clone()) {
                break;
            }

            current = (self.load)(&oid).and_then(|summary| match chain {
                ParentChain::First => summary.parent.clone(),
                ParentChain::Second => summary.parent2.clone(),
            });
        }

        members
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::collections::HashMap;

    /// In-memory commit store for exercising the finder
    #[derive(Debug, Default)]
    struct InMemoryCommitStore {
        commits: HashMap<ObjectId, CommitSummary>,
    }

    impl InMemoryCommitStore {
        fn add_commit(&mut self, oid: ObjectId, parent: Option<ObjectId>, parent2: Option<ObjectId>) {
            let timestamp_offset = self.commits.len() as i64;
            let summary = CommitSummary {
                parent,
                parent2,
                timestamp: chrono::FixedOffset::east_opt(0)
                    .unwrap()
                    .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
                    .unwrap()
                    + chrono::Duration::hours(timestamp_offset),
                message: "m".to_string(),
            };
            self.commits.insert(oid, summary);
        }

        fn get(&self, oid: &ObjectId) -> Option<&CommitSummary> {
            self.commits.get(oid)
        }
    }

    fn create_oid(id: &str) -> ObjectId {
        let mut hex_string = String::new();
        for byte in id.as_bytes().iter() {
            hex_string.push_str(&format!("{:02x}", byte));
        }
        while hex_string.len() < 40 {
            hex_string.push('0');
        }
        hex_string.truncate(40);

        ObjectId::try_parse(hex_string).expect("Invalid test ObjectId")
    }

    #[fixture]
    fn linear_history() -> InMemoryCommitStore {
        // Linear history: A <- B <- C <- D
        let mut store = InMemoryCommitStore::default();
        let a = create_oid("commit_a");
        let b = create_oid("commit_b");
        let c = create_oid("commit_c");
        let d = create_oid("commit_d");

        store.add_commit(a.clone(), None, None);
        store.add_commit(b.clone(), Some(a), None);
        store.add_commit(c.clone(), Some(b), None);
        store.add_commit(d.clone(), Some(c), None);

        store
    }

    #[fixture]
    fn forked_history() -> InMemoryCommitStore {
        //     A
        //    / \
        //   B   C
        //   |   |
        //   D   E
        let mut store = InMemoryCommitStore::default();
        let a = create_oid("commit_a");
        let b = create_oid("commit_b");
        let c = create_oid("commit_c");
        let d = create_oid("commit_d");
        let e = create_oid("commit_e");

        store.add_commit(a.clone(), None, None);
        store.add_commit(b.clone(), Some(a.clone()), None);
        store.add_commit(c.clone(), Some(a), None);
        store.add_commit(d.clone(), Some(b), None);
        store.add_commit(e.clone(), Some(c), None);

        store
    }

    #[fixture]
    fn merge_head_history() -> InMemoryCommitStore {
        //     A
        //    / \
        //   B   C
        //    \ / \
        //     M   E    (M = merge of B and C, parent2 = C)
        let mut store = InMemoryCommitStore::default();
        let a = create_oid("commit_a");
        let b = create_oid("commit_b");
        let c = create_oid("commit_c");
        let e = create_oid("commit_e");
        let m = create_oid("commit_m");

        store.add_commit(a.clone(), None, None);
        store.add_commit(b.clone(), Some(a.clone()), None);
        store.add_commit(c.clone(), Some(a), None);
        store.add_commit(e.clone(), Some(c.clone()), None);
        store.add_commit(m.clone(), Some(b), Some(c));

        store
    }

    #[rstest]
    fn ancestor_of_the_other_tip_is_the_split_point(linear_history: InMemoryCommitStore) {
        let finder = SplitPointFinder::new(|oid| linear_history.get(oid));

        let split = finder.find(&create_oid("commit_b"), &create_oid("commit_d"), ParentChain::First);
        assert_eq!(split, Some(create_oid("commit_b")));

        let split = finder.find(&create_oid("commit_d"), &create_oid("commit_b"), ParentChain::First);
        assert_eq!(split, Some(create_oid("commit_b")));
    }

    #[rstest]
    fn a_tip_is_its_own_split_point(linear_history: InMemoryCommitStore) {
        let finder = SplitPointFinder::new(|oid| linear_history.get(oid));

        let c = create_oid("commit_c");
        assert_eq!(finder.find(&c, &c, ParentChain::First), Some(c));
    }

    #[rstest]
    fn forked_tips_meet_at_the_fork(forked_history: InMemoryCommitStore) {
        let finder = SplitPointFinder::new(|oid| forked_history.get(oid));

        let split = finder.find(&create_oid("commit_d"), &create_oid("commit_e"), ParentChain::First);
        assert_eq!(split, Some(create_oid("commit_a")));
    }

    #[rstest]
    fn second_parent_chain_finds_the_merged_in_tip(merge_head_history: InMemoryCommitStore) {
        let finder = SplitPointFinder::new(|oid| merge_head_history.get(oid));

        // Along first parents, M and E meet at A; along M's second-parent
        // chain they meet at C, the branch that was merged into M.
        let first = finder.find(&create_oid("commit_m"), &create_oid("commit_e"), ParentChain::First);
        assert_eq!(first, Some(create_oid("commit_a")));

        let second = finder.find(&create_oid("commit_m"), &create_oid("commit_e"), ParentChain::Second);
        assert_eq!(second, Some(create_oid("commit_c")));
    }

    #[rstest]
    fn disjoint_roots_have_no_split_point() {
        let mut store = InMemoryCommitStore::default();
        let a = create_oid("commit_a");
        let b = create_oid("commit_b");
        let x = create_oid("commit_x");
        let y = create_oid("commit_y");

        store.add_commit(a.clone(), None, None);
        store.add_commit(b.clone(), Some(a), None);
        store.add_commit(x.clone(), None, None);
        store.add_commit(y.clone(), Some(x), None);

        let finder = SplitPointFinder::new(|oid| store.get(oid));
        assert_eq!(finder.find(&b, &y, ParentChain::First), None);
    }

    #[rstest]
    fn cyclic_histories_terminate() {
        let mut store = InMemoryCommitStore::default();
        let a = create_oid("commit_a");
        let b = create_oid("commit_b");
        let x = create_oid("commit_x");

        store.add_commit(a.clone(), Some(b.clone()), None);
        store.add_commit(b.clone(), Some(a.clone()), None);
        store.add_commit(x.clone(), None, None);

        let finder = SplitPointFinder::new(|oid| store.get(oid));
        assert_eq!(finder.find(&a, &x, ParentChain::First), None);
        assert_eq!(finder.find(&x, &a, ParentChain::First), None);
    }
}
