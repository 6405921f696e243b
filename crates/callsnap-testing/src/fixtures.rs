//! Ready-made targets with known behavior.
//!
//! Source strings mimic what a real method would expose so that the source
//! heuristic classifies them the way their shape suggests.

use callsnap_runtime::{Method, Target};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn int_arg(args: &[Value], i: usize) -> i64 {
    args.get(i).and_then(Value::as_i64).unwrap_or_default()
}

/// `M.add(a, b) -> a + b`, synchronous.
pub fn adder() -> Target {
    Target::new("M").with_method(
        "add",
        Method::sync(|args| Ok(json!(int_arg(&args, 0) + int_arg(&args, 1))))
            .with_source("(a, b) => a + b"),
    )
}

/// `Greeter.greet(name) -> "hello <name>"`, asynchronous.
pub fn async_greeter() -> Target {
    Target::new("Greeter").with_method(
        "greet",
        Method::future(|args| async move {
            let name = args.first().and_then(Value::as_str).unwrap_or("nobody").to_string();
            Ok::<_, anyhow::Error>(json!(format!("hello {}", name)))
        })
        .with_source("async greet(name) { return await this.format(name); }"),
    )
}

/// `View.render() -> "<p>hi</p>"`, a text output archived as `.html`.
pub fn html_renderer() -> Target {
    Target::new("View").with_method(
        "render",
        Method::sync(|_| Ok(json!("<p>hi</p>"))).with_source("render() { return '<p>hi</p>'; }"),
    )
}

/// `Api.fetch() -> {"a": 1}`, a structured output archived as `.json`.
pub fn json_producer() -> Target {
    Target::new("Api").with_method(
        "fetch",
        Method::sync(|_| Ok(json!({"a": 1}))).with_source("fetch() { return { a: 1 }; }"),
    )
}

/// `Api.explode()` always fails with "boom".
pub fn failing() -> Target {
    Target::new("Api").with_method(
        "explode",
        Method::sync(|_| Err(anyhow::anyhow!("boom"))).with_source("explode() { throw new Error('boom'); }"),
    )
}

/// `Api.explode()` failing asynchronously.
pub fn async_failing() -> Target {
    Target::new("Api").with_method(
        "explode",
        Method::future(|_| async { Err::<Value, _>(anyhow::anyhow!("boom")) })
            .with_source("async explode() { throw new Error('boom'); }"),
    )
}

/// `Counter.tick() -> n`, counting real invocations in `calls`.
pub fn counting(calls: Arc<AtomicUsize>) -> Target {
    Target::new("Counter").with_method(
        "tick",
        Method::sync(move |_| Ok(json!(calls.fetch_add(1, Ordering::SeqCst) + 1)))
            .with_source("tick() { return ++this.n; }"),
    )
}

/// `Opaque.run() -> null` with no source, so source-based classification
/// cannot decide.
pub fn opaque() -> Target {
    Target::new("Opaque").with_method("run", Method::sync(|_| Ok(Value::Null)))
}
