//! Concurrency tests for the gate policies.
//!
//! These integration tests exercise the guarantees the gates make:
//! at-most-once construction, discard of late construction arguments,
//! idempotence after construction, recovery from failed constructions, and
//! the observable race in the unsynchronized gate.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use og_core::{DeferredGate, GateState, InitGate, LockedGate, RacyGate};

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// Hammer `gate` with `n` simultaneous first calls carrying distinct values.
///
/// Returns the total number of constructor invocations and the handle each
/// thread received.
fn hammer_first_access<G>(gate: Arc<G>, n: usize) -> (usize, Vec<Arc<String>>)
where
    G: InitGate<String> + Send + Sync + 'static,
{
    let constructions = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(Barrier::new(n));

    let workers: Vec<_> = (0..n)
        .map(|i| {
            let gate = gate.clone();
            let constructions = constructions.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                gate.get_or_init(|| {
                    constructions.fetch_add(1, Ordering::SeqCst);
                    format!("thread-{i}")
                })
            })
        })
        .collect();

    let handles = workers
        .into_iter()
        .map(|w| w.join().expect("worker panicked"))
        .collect();
    (constructions.load(Ordering::SeqCst), handles)
}

fn assert_single_winner(constructions: usize, handles: &[Arc<String>], n: usize) {
    assert_eq!(constructions, 1, "expected exactly one construction");
    assert_eq!(handles.len(), n);

    let expected: HashSet<String> = (0..n).map(|i| format!("thread-{i}")).collect();
    assert!(
        expected.contains(handles[0].as_str()),
        "winner value {:?} is not one of the supplied arguments",
        handles[0]
    );
    for handle in handles {
        assert!(
            Arc::ptr_eq(handle, &handles[0]),
            "a caller observed a different instance identity"
        );
        assert_eq!(handle, &handles[0]);
    }
}

// ─── At-most-one construction ────────────────────────────────────────────────

#[test]
fn locked_gate_constructs_at_most_once() {
    let gate = Arc::new(LockedGate::new());
    let (constructions, handles) = hammer_first_access(gate, 8);
    assert_single_winner(constructions, &handles, 8);
}

#[test]
fn deferred_gate_constructs_at_most_once() {
    let gate = Arc::new(DeferredGate::new());
    let (constructions, handles) = hammer_first_access(gate, 8);
    assert_single_winner(constructions, &handles, 8);
}

// ─── Argument discard & idempotence ──────────────────────────────────────────

#[test]
fn arguments_after_the_first_call_are_discarded() {
    let gate: LockedGate<String> = LockedGate::new();
    let original = gate.get_or_init(|| String::from("X"));
    let later = gate.get_or_init(|| String::from("Y"));

    assert_eq!(&*original, "X");
    assert_eq!(&*later, "X");
    assert!(Arc::ptr_eq(&original, &later));
}

#[test]
fn construction_happens_once_no_matter_how_often_callers_return() {
    let gate = Arc::new(LockedGate::new());
    let constructions = Arc::new(AtomicUsize::new(0));

    let first = {
        let constructions = constructions.clone();
        gate.get_or_init(move || {
            constructions.fetch_add(1, Ordering::SeqCst);
            String::from("only")
        })
    };

    // Post-construction calls from several threads never construct again.
    let workers: Vec<_> = (0..4)
        .map(|_| {
            let gate = gate.clone();
            let constructions = constructions.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    let handle = gate.get_or_init(|| {
                        constructions.fetch_add(1, Ordering::SeqCst);
                        String::from("late")
                    });
                    assert_eq!(&*handle, "only");
                }
            })
        })
        .collect();
    for w in workers {
        w.join().expect("worker panicked");
    }

    assert_eq!(constructions.load(Ordering::SeqCst), 1);
    assert_eq!(&*first, "only");
}

// ─── The naive policy's race ─────────────────────────────────────────────────

/// Force two threads past the unset check before either publishes.  The
/// barrier inside the constructor stands in for the "injected delay": neither
/// construction can complete until both threads have entered it, so both
/// threads must have observed the gate as unconstructed.
#[test]
fn racy_gate_race_is_observable() {
    let gate = Arc::new(RacyGate::new());
    let constructions = Arc::new(AtomicUsize::new(0));
    let both_inside = Arc::new(Barrier::new(2));

    let workers: Vec<_> = (0..2)
        .map(|i| {
            let gate = gate.clone();
            let constructions = constructions.clone();
            let both_inside = both_inside.clone();
            thread::spawn(move || {
                gate.get_or_init(|| {
                    both_inside.wait();
                    constructions.fetch_add(1, Ordering::SeqCst);
                    format!("instance-{i}")
                })
            })
        })
        .collect();

    let handles: Vec<_> = workers
        .into_iter()
        .map(|w| w.join().expect("worker panicked"))
        .collect();

    assert_eq!(
        constructions.load(Ordering::SeqCst),
        2,
        "both threads should have constructed"
    );
    assert!(
        !Arc::ptr_eq(&handles[0], &handles[1]),
        "the naive policy should have produced two distinct instances"
    );
    assert_ne!(handles[0], handles[1]);
}

#[test]
fn racy_gate_is_correct_under_single_threaded_first_access() {
    let gate: RacyGate<String> = RacyGate::new();
    let first = gate.get_or_init(|| String::from("solo"));
    let second = gate.get_or_init(|| String::from("ignored"));

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(&*second, "solo");
}

// ─── State machine ───────────────────────────────────────────────────────────

#[test]
fn gate_state_fires_the_single_transition() {
    let gate: LockedGate<u8> = LockedGate::new();
    assert_eq!(gate.state(), GateState::Uninitialized);
    assert!(!gate.state().is_initialized());
    assert_eq!(gate.state().to_string(), "Uninitialized");

    gate.get_or_init(|| 1);
    assert_eq!(gate.state(), GateState::Initialized);
    assert!(gate.state().is_initialized());
    assert_eq!(gate.state().to_string(), "Initialized");

    // No transition back: further calls leave the state alone.
    gate.get_or_init(|| 2);
    assert_eq!(gate.state(), GateState::Initialized);
}

// ─── Properties ──────────────────────────────────────────────────────────────

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Whatever sequence of arguments is supplied, the first one wins
        /// and every call returns it.
        #[test]
        fn first_value_wins(values in proptest::collection::vec("[a-z]{1,8}", 1..16)) {
            let gate: LockedGate<String> = LockedGate::new();
            let first = values[0].clone();
            for v in &values {
                let got = gate.get_or_init(|| v.clone());
                prop_assert_eq!(&*got, &first);
            }
        }
    }
}
