//! Data structures and algorithms
//!
//! This module contains the core types and algorithms:
//!
//! - `checkout`: Working-tree reconciliation and the untracked-file hazard
//! - `log`: First-parent history traversal
//! - `merge`: Split-point search and the three-way merge planner
//! - `objects`: Object types (blob, commit) and their codec
//! - `status`: Working tree status inspection

pub mod checkout;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
