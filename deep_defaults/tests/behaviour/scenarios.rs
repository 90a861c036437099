//! Binds the merge feature file to the step registry.

use crate::fixtures::{MergeContext, merge_context};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/merge.feature",
    fixtures = [merge_context: MergeContext]
);
