//! Shared fixtures for the behavioural scenarios.

use deep_defaults::{Patch, Replacer};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

/// Scenario state shared between the merge steps.
#[derive(Debug, Default, ScenarioState)]
pub struct MergeContext {
    /// Defaults the target is merged over.
    pub defaults: Slot<Value>,
    /// Replacer registered by a `Given` step, if any.
    pub replacer: Slot<Replacer>,
    /// Target supplied by the `When` step.
    pub target: Slot<Patch>,
    /// Outcome of the merge.
    pub result: Slot<Value>,
}

/// Creates an empty merge context and routes merge traces to the test output.
///
/// Set `RUST_LOG=deep_defaults=trace` to see each merge decision.
#[fixture]
pub fn merge_context() -> MergeContext {
    // Another scenario in this binary may have installed the subscriber.
    drop(
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init(),
    );
    MergeContext::default()
}
