//! Command implementations
//!
//! Every user-visible operation lives here as an `impl Repository` block,
//! one file per command. Commands check their preconditions first — a
//! violated precondition prints its fixed message and returns `Ok`, so the
//! process still exits cleanly and the control record is written back.

pub mod porcelain;
