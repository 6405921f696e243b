//! The two wrapper variants installed in place of an original method.
//!
//! Both run the same lifecycle per call: record the call as observed, invoke
//! the original, archive the output, record the call as completed. They
//! differ in which snapshot they record:
//!
//! - the awaiting wrapper clones the template for every call;
//! - the direct wrapper mutates one snapshot shared by all calls, so the
//!   previous output and the counters folded in by the global index carry
//!   over, and overlapping calls can interleave on it.
//!
//! A failing original aborts the lifecycle after the observed record; no
//! output is archived and no completion record is written.

use callsnap_store::SnapshotStore;
use callsnap_types::{FunctionIdentity, Snapshot, new_snapshot_id};
use serde_json::Value;
use std::sync::{Arc, Mutex, PoisonError};

use crate::{CallResult, Method, Outcome, Shape};

/// Where an invocation is in its recording lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unstarted,
    RecordedStart,
    Invoking,
    RecordedComplete,
}

/// Hook notified on every lifecycle transition of every wrapped call.
pub trait PhaseObserver: Send + Sync {
    fn on_phase(&self, identity: &FunctionIdentity, snapshot_id: &str, phase: Phase);
}

/// Everything a wrapper needs to persist a call.
#[derive(Clone)]
pub(crate) struct Recording {
    pub(crate) store: SnapshotStore,
    pub(crate) run_id: String,
    pub(crate) observer: Option<Arc<dyn PhaseObserver>>,
}

impl Recording {
    fn phase(&self, snapshot: &Snapshot, phase: Phase) {
        let id = snapshot.id.as_deref().unwrap_or_default();
        tracing::trace!(
            target_name = %snapshot.target_name,
            function_name = %snapshot.function_name,
            id,
            ?phase,
            "Call lifecycle"
        );
        if let Some(observer) = &self.observer {
            observer.on_phase(&snapshot.identity(), id, phase);
        }
    }

    /// Fresh id and inputs, then the "call observed" write. Output is left
    /// as is, so a shared snapshot still carries the previous call's output.
    fn record_start(&self, snapshot: &mut Snapshot, args: &[Value]) {
        snapshot.input = args.to_vec();
        snapshot.id = Some(new_snapshot_id());
        self.phase(snapshot, Phase::Unstarted);
        self.store.save(snapshot);
        self.phase(snapshot, Phase::RecordedStart);
    }

    /// Attach the output, archive it, then the "call completed" write.
    fn record_complete(&self, snapshot: &mut Snapshot, output: &Value) {
        snapshot.output = Some(output.clone());
        self.store.archive(snapshot, &self.run_id);
        self.store.save(snapshot);
        self.phase(snapshot, Phase::RecordedComplete);
    }
}

/// Wrapper for methods classified as asynchronous. Every call starts from a
/// clone of `template`.
///
/// The "call observed" write happens when the wrapper is invoked, before the
/// returned future is first polled. A future that is dropped unpolled leaves
/// only that record.
pub(crate) fn awaiting_wrapper(ctx: Arc<Recording>, template: Snapshot, original: Method) -> Method {
    original.rebody(Shape::Future, {
        let original = original.clone();
        move |args| {
            let mut snapshot = template.clone();
            ctx.record_start(&mut snapshot, &args);
            Outcome::Pending(Box::pin(awaiting_call(
                ctx.clone(),
                original.clone(),
                snapshot,
                args,
            )))
        }
    })
}

async fn awaiting_call(
    ctx: Arc<Recording>,
    original: Method,
    mut snapshot: Snapshot,
    args: Vec<Value>,
) -> CallResult {
    ctx.phase(&snapshot, Phase::Invoking);

    let output = original.invoke(args).resolve().await?;

    ctx.record_complete(&mut snapshot, &output);
    Ok(output)
}

/// Wrapper for methods classified as synchronous (or unclassifiable). All
/// calls record into the same `shared` snapshot.
pub(crate) fn direct_wrapper(ctx: Arc<Recording>, shared: Snapshot, original: Method) -> Method {
    let shared = Arc::new(Mutex::new(shared));

    original.rebody(Shape::Sync, {
        let original = original.clone();
        move |args| Outcome::Ready(direct_call(&ctx, &shared, &original, args))
    })
}

fn direct_call(
    ctx: &Recording,
    shared: &Mutex<Snapshot>,
    original: &Method,
    args: Vec<Value>,
) -> CallResult {
    {
        let mut snapshot = shared.lock().unwrap_or_else(PoisonError::into_inner);
        ctx.record_start(&mut snapshot, &args);
        ctx.phase(&snapshot, Phase::Invoking);
    }

    let outcome = original.invoke(args);
    if outcome.is_pending() {
        let snapshot = shared.lock().unwrap_or_else(PoisonError::into_inner);
        tracing::warn!(
            target_name = %snapshot.target_name,
            function_name = %snapshot.function_name,
            "Method classified as synchronous returned a future; blocking on it"
        );
    }
    let output = outcome.resolve_blocking()?;

    let mut snapshot = shared.lock().unwrap_or_else(PoisonError::into_inner);
    ctx.record_complete(&mut snapshot, &output);
    Ok(output)
}
