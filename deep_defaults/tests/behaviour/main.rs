//! Behavioural tests for `deep_defaults` using `rstest-bdd`.
//!
//! Step implementations live in [`steps`], shared scenario state in
//! [`fixtures`], and [`scenarios`] binds `tests/features/merge.feature` to
//! both.

mod fixtures;
mod scenarios;
mod steps;
