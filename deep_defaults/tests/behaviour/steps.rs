//! Step definitions for the merge scenarios.

use anyhow::{Result, anyhow, ensure};
use deep_defaults::{Defaults, Patch, Replacer, merge};
use rstest_bdd_macros::{given, then, when};
use serde_json::{Value, json};

use crate::fixtures::MergeContext;

fn tweet_target(body: &str) -> Patch {
    Patch::from(json!({"id": 2, "type": "tweet", "content": {"body": body}}))
}

fn defaults_of(merge_context: &MergeContext) -> Result<Value> {
    merge_context
        .defaults
        .get()
        .ok_or_else(|| anyhow!("defaults must be given before merging"))
}

fn run_merge(merge_context: &MergeContext, target: Patch) -> Result<()> {
    let defaults = defaults_of(merge_context)?;
    let replacer = merge_context.replacer.get();
    merge_context
        .result
        .set(merge(&defaults, &target, replacer.as_ref()));
    merge_context.target.set(target);
    Ok(())
}

fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[given("blog post defaults")]
fn blog_post_defaults(merge_context: &MergeContext) {
    merge_context.defaults.set(json!({
        "id": 1,
        "type": "post",
        "content": {"title": "A", "body": "B"},
    }));
}

#[given("list defaults {items}")]
fn list_defaults(merge_context: &MergeContext, items: String) {
    let values: Vec<Value> = items.split(',').map(|item| json!(item.trim())).collect();
    merge_context.defaults.set(Value::Array(values));
}

#[given("a replacer that renames tweets to twots")]
fn tweet_replacer(merge_context: &MergeContext) {
    merge_context.replacer.set(Replacer::fields([(
        "type",
        Replacer::func(|default, target| match target.as_scalar() {
            Some(Value::String(kind)) if kind == "tweet" => json!("twot"),
            _ => target.overlay(default.unwrap_or(&Value::Null)),
        }),
    )]));
}

#[given("a replacer that doubles the id and rewrites the body")]
fn doubling_replacer(merge_context: &MergeContext) {
    merge_context.replacer.set(Replacer::fields([
        (
            "id",
            Replacer::func(|default, target| {
                let id = target
                    .overlay(default.unwrap_or(&Value::Null))
                    .as_i64()
                    .unwrap_or_default();
                json!(id * 2)
            }),
        ),
        (
            "content",
            Replacer::fields([("body", Replacer::func(|_, _| json!("rewritten")))]),
        ),
    ]));
}

#[when("an empty target is merged")]
fn merge_empty(merge_context: &MergeContext) -> Result<()> {
    run_merge(merge_context, Patch::from(json!({})))
}

#[when("a tweet target with body {body} is merged")]
fn merge_tweet(merge_context: &MergeContext, body: String) -> Result<()> {
    run_merge(merge_context, tweet_target(&body))
}

#[when("a target with an empty content object is merged")]
fn merge_empty_content(merge_context: &MergeContext) -> Result<()> {
    run_merge(
        merge_context,
        Patch::from(json!({"id": 5, "type": "tweet", "content": {}})),
    )
}

#[when("the list target {items} is merged")]
fn merge_list(merge_context: &MergeContext, items: String) -> Result<()> {
    let target = Patch::seq(items.split(',').map(str::trim).map(|item| {
        if item == "_" {
            Patch::unset()
        } else {
            Patch::from(json!(item))
        }
    }));
    run_merge(merge_context, target)
}

#[when("a tweet target is applied through stored defaults with an empty call replacer")]
fn apply_with_call_replacer(merge_context: &MergeContext) -> Result<()> {
    let defaults = defaults_of(merge_context)?;
    let stored = merge_context
        .replacer
        .get()
        .ok_or_else(|| anyhow!("a stored replacer must be given"))?;
    let handle = Defaults::with_replacer(defaults, stored);
    let call = Replacer::fields(Vec::<(String, Replacer)>::new());
    let target = tweet_target("C");
    merge_context
        .result
        .set(handle.apply_with(&target, Some(&call)));
    merge_context.target.set(target);
    Ok(())
}

#[then("the result equals the defaults")]
fn result_equals_defaults(merge_context: &MergeContext) -> Result<()> {
    let defaults = defaults_of(merge_context)?;
    let result = merge_context
        .result
        .get()
        .ok_or_else(|| anyhow!("expected a merge result"))?;
    ensure!(result == defaults, "expected {defaults}, got {result}");
    Ok(())
}

#[then("the field {pointer} is {expected}")]
fn field_matches(merge_context: &MergeContext, pointer: String, expected: String) -> Result<()> {
    let actual = merge_context
        .result
        .with_ref(|result| result.pointer(&pointer).map(render))
        .ok_or_else(|| anyhow!("expected a merge result"))?
        .ok_or_else(|| anyhow!("no value at {pointer}"))?;
    ensure!(
        actual == expected,
        "expected {pointer} to be {expected}, got {actual}"
    );
    Ok(())
}
