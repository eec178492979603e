//! Fixture-driven scenarios, grounded directly on `original_source/
//! test.c`'s `main()` — which builds one shared task table and drives
//! `test_task_create`, `test_task_scheduler`, `test_task_insert`,
//! `test_task_stop`, `test_task_tick_overflow`, `test_task_preserve`,
//! and `test_task_repete` in sequence. These run as one `#[test]` for
//! the same reason: they share the `start` hook's recording globals,
//! and running them out of order (or concurrently, as independent
//! `#[test]` functions would under the default test harness) would
//! make the recorded firing sequence meaningless.

use softimer::config;
use softimer::scheduler::SoftTimer;
use softimer::task::TaskId;

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::vec::Vec;

static CURRENT_TICK: AtomicU32 = AtomicU32::new(0);
static FIRES: Mutex<Vec<(TaskId, u32)>> = Mutex::new(Vec::new());

fn reset_recorder() {
    CURRENT_TICK.store(0, Ordering::SeqCst);
    FIRES.lock().unwrap().clear();
}

fn drained_fires() -> Vec<(TaskId, u32)> {
    core::mem::take(&mut FIRES.lock().unwrap())
}

fn record_start(id: TaskId) {
    let tick = CURRENT_TICK.load(Ordering::SeqCst);
    FIRES.lock().unwrap().push((id, tick));
}

fn noop(_: *mut ()) {}

/// Advance the tick by one and drain the wait list, recording every
/// `start` hook firing against the tick it fired at.
fn tick_and_serve<const N: usize>(engine: &mut SoftTimer<N>) {
    engine.tick_increase();
    CURRENT_TICK.store(engine.get_tick(), Ordering::SeqCst);
    engine.serve();
}

#[test]
fn fixture_driven_scenarios_match_original_source() {
    sixteen_firing_sequence();
    insert_during_serve();
    stop_during_serve();
    tick_rollback();
    reserved_task_survives_stop();
    infinite_loop_sentinel();
}

/// spec.md §8's literal fixture: 5 tasks, `interval = [1,2,3,4,1]`,
/// `priority = [1,1,1,1,2]`, `repeat = [2,2,2,2,8]`, all started at
/// `timetick = 0`. Serving after each tick through tick 10 must
/// produce exactly this 16-entry `(id, tick)` sequence.
fn sixteen_firing_sequence() {
    reset_recorder();
    let mut engine: SoftTimer<5> = SoftTimer::new();
    engine.set_schedule_hook(|_| {});
    engine.set_start_hook(record_start);

    let intervals = [1u32, 2, 3, 4, 1];
    let priorities = [1u16, 1, 1, 1, 2];
    let repeats = [2u16, 2, 2, 2, 8];

    for i in 0..5 {
        let id = engine.create(noop, intervals[i], priorities[i], false);
        assert_eq!(id as usize, i, "fixture assumes tasks are allocated 0..4 in order");
        #[cfg(feature = "task-arg")]
        engine.start(id, repeats[i], core::ptr::null_mut());
        #[cfg(not(feature = "task-arg"))]
        engine.start(id, repeats[i]);
    }

    for _ in 0..10 {
        tick_and_serve(&mut engine);
    }

    let expected: Vec<(TaskId, u32)> = [
        (4, 1), (0, 1), (4, 2), (1, 2), (0, 2), (4, 3), (2, 3), (4, 4),
        (3, 4), (1, 4), (4, 5), (4, 6), (2, 6), (4, 7), (4, 8), (3, 8),
    ]
    .into_iter()
    .collect();

    assert_eq!(drained_fires(), expected);
    assert_eq!(engine.wait_cnt(), 0, "every task retires by tick 10");
}

/// A task created and started while callbacks are firing is folded
/// into the ordering on its very next `serve()`.
fn insert_during_serve() {
    reset_recorder();
    let mut engine: SoftTimer<5> = SoftTimer::new();
    engine.set_start_hook(record_start);

    let a = engine.create(noop, 1, 0, false);
    #[cfg(feature = "task-arg")]
    engine.start(a, 2, core::ptr::null_mut());
    #[cfg(not(feature = "task-arg"))]
    engine.start(a, 2);

    tick_and_serve(&mut engine);

    let b = engine.create(noop, 1, 1, false);
    #[cfg(feature = "task-arg")]
    engine.start(b, 1, core::ptr::null_mut());
    #[cfg(not(feature = "task-arg"))]
    engine.start(b, 1);

    tick_and_serve(&mut engine);
    tick_and_serve(&mut engine);

    let fires = drained_fires();
    let order: Vec<TaskId> = fires.iter().map(|&(id, _)| id).collect();
    assert_eq!(order, std::vec![a, b, a]);
    assert_eq!(engine.wait_cnt(), 0);
}

/// Stopping a task mid-series removes it from later firings without
/// disturbing the other task still pending.
fn stop_during_serve() {
    reset_recorder();
    let mut engine: SoftTimer<5> = SoftTimer::new();
    engine.set_start_hook(record_start);

    let a = engine.create(noop, 1, 1, false);
    #[cfg(feature = "task-arg")]
    engine.start(a, 2, core::ptr::null_mut());
    #[cfg(not(feature = "task-arg"))]
    engine.start(a, 2);

    tick_and_serve(&mut engine);

    let b = engine.create(noop, 1, 0, false);
    #[cfg(feature = "task-arg")]
    engine.start(b, 2, core::ptr::null_mut());
    #[cfg(not(feature = "task-arg"))]
    engine.start(b, 2);

    engine.stop(a);

    tick_and_serve(&mut engine);

    engine.stop(b);

    let fires = drained_fires();
    let order: Vec<TaskId> = fires.iter().map(|&(id, _)| id).collect();
    assert_eq!(order, std::vec![a, b]);
    assert_eq!(engine.wait_cnt(), 0);
}

/// A tick counter approaching its maximum rolls every queued
/// expiration back before an overflowing addition happens, preserving
/// relative firing order.
fn tick_rollback() {
    reset_recorder();
    let mut engine: SoftTimer<5> = SoftTimer::new();
    engine.set_start_hook(record_start);
    engine.set_tick(config::MAX_TICK - 1);
    CURRENT_TICK.store(engine.get_tick(), Ordering::SeqCst);

    let a = engine.create(noop, 1, 0, false);
    #[cfg(feature = "task-arg")]
    engine.start(a, 2, core::ptr::null_mut());
    #[cfg(not(feature = "task-arg"))]
    engine.start(a, 2);

    let reset_before = engine.reset_cnt();

    let b = engine.create(noop, 2, 0, false);
    #[cfg(feature = "task-arg")]
    engine.start(b, 1, core::ptr::null_mut());
    #[cfg(not(feature = "task-arg"))]
    engine.start(b, 1);

    assert!(
        engine.reset_cnt() > reset_before,
        "starting b must trigger a rollback of a's already-queued expiration"
    );

    for _ in 0..3 {
        tick_and_serve(&mut engine);
    }

    let fires = drained_fires();
    let order: Vec<TaskId> = fires.iter().map(|&(id, _)| id).collect();
    assert_eq!(order, std::vec![a, b, a]);
}

/// Stopping a reserved task unlinks it from the wait list but keeps
/// the slot allocated, callback intact, and `reserved` set, so it can
/// be restarted later. `find_wait_task` still resolves its slot by id
/// once it is back on the list.
fn reserved_task_survives_stop() {
    reset_recorder();
    let mut engine: SoftTimer<5> = SoftTimer::new();
    engine.set_start_hook(record_start);

    let r = engine.create(noop, 1, 0, true);
    #[cfg(feature = "task-arg")]
    engine.start(r, 1, core::ptr::null_mut());
    #[cfg(not(feature = "task-arg"))]
    engine.start(r, 1);

    tick_and_serve(&mut engine);
    assert_eq!(drained_fires(), std::vec![(r, 1)]);

    engine.stop(r);

    assert!(engine.task_callback(r).is_some(), "reserved slot keeps its callback");
    assert!(engine.task_reserved(r), "reserved bit remains set");
    assert!(engine.find_wait_task(r).is_none(), "already off the wait list after stop");

    #[cfg(feature = "task-arg")]
    engine.start(r, 1, core::ptr::null_mut());
    #[cfg(not(feature = "task-arg"))]
    engine.start(r, 1);
    assert!(engine.find_wait_task(r).is_some(), "back on the wait list once restarted");
}

/// A task started with `repetitions = LOOP` never decrements and
/// keeps firing indefinitely.
fn infinite_loop_sentinel() {
    reset_recorder();
    let mut engine: SoftTimer<5> = SoftTimer::new();
    engine.set_start_hook(record_start);

    let l = engine.create(noop, 1, 0, false);
    #[cfg(feature = "task-arg")]
    engine.start(l, config::LOOP, core::ptr::null_mut());
    #[cfg(not(feature = "task-arg"))]
    engine.start(l, config::LOOP);

    const FIRINGS: usize = 20;
    for _ in 0..FIRINGS {
        tick_and_serve(&mut engine);
    }

    assert_eq!(drained_fires().len(), FIRINGS);
    assert_eq!(engine.task_repetitions(l), config::LOOP, "LOOP sentinel never decrements");
}

/// Creating a task beyond the table's capacity is a programmer error:
/// it asserts at create time rather than returning a deferred error
/// (spec.md §7).
#[test]
#[should_panic]
#[cfg(feature = "assert-std")]
fn create_beyond_capacity_asserts() {
    let mut engine: SoftTimer<2> = SoftTimer::new();
    engine.create(noop, 1, 0, false);
    engine.create(noop, 1, 0, false);
    engine.create(noop, 1, 0, false);
}
