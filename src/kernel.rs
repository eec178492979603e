//! # Lifecycle & Accessors
//!
//! Create / start / stop / oneshot / query operations that delegate
//! to the scheduler core (spec.md §4.6). This is "thin plumbing" per
//! spec.md §1 — none of it does anything beyond writing slot fields
//! and calling into [`crate::scheduler`]'s `schedule`/`stop_internal`.
//!
//! Grounded on `stimer_create_task` / `stimer_task_stop` / the hook
//! setters in `stimer.c`/`stimer.h`, and on the teacher crate's
//! `kernel::{create_task, start, yield_task}` free-function API shape
//! — generalized here to inherent methods on an owned [`SoftTimer`]
//! instance. A host that needs a single process-wide instance (the
//! role the teacher's `static mut SCHEDULER` plays) is expected to
//! embed `SoftTimer<N>` in its own `critical_section::Mutex<RefCell<_>>`
//! static and bracket calls made from outside the main loop with
//! [`crate::sync::critical_section`], per spec.md §5 — this crate
//! does not impose that global itself, since it is a reusable library
//! rather than a single firmware image.

use crate::scheduler::SoftTimer;
use crate::task::{Callback, TaskId, TaskSlot};
use crate::{config, stimer_assert};

#[cfg(feature = "task-hooks")]
type Hook = fn(TaskId);

impl<const N: usize> SoftTimer<N> {
    /// Find the first slot whose `callback` is `None` and whose
    /// `reserved` flag is clear. `O(N)`, per spec.md §4.1.
    fn find_free_slot(&self) -> Option<TaskId> {
        self.tasks
            .iter()
            .position(TaskSlot::is_free)
            .map(|i| i as TaskId)
    }

    /// Allocate a slot and write its static parameters. Does **not**
    /// place the task on the wait list — `repetitions` stays `0` until
    /// [`SoftTimer::start`] is called.
    ///
    /// Preconditions (assertion-gated, programmer errors, per
    /// spec.md §7): `priority <= MAX_PRIORITY` and the table is not
    /// full. A full table is not a recoverable error here — spec.md §7
    /// states plainly that it "causes an assertion at create time, not
    /// a deferred error", matching `stimer_create_task`'s own
    /// `STIMER_ASSERT(hstimer.wait_cnt < hstimer.size)` in
    /// `original_source/stimer.c`.
    pub fn create(
        &mut self,
        callback: Callback,
        interval: u32,
        priority: u16,
        reserved: bool,
    ) -> TaskId {
        stimer_assert!(priority <= config::MAX_PRIORITY);

        let id = self.find_free_slot();
        stimer_assert!(id.is_some());
        let id = id.expect("checked by the assertion above");
        self.tasks[id as usize].create(callback, interval, priority, reserved);
        id
    }

    /// Start (or restart) a created task: set its repetition count and
    /// argument, then schedule it.
    ///
    /// Preconditions (assertion-gated): `id < N`, `repetitions <=
    /// MAX_REPETITIONS`, the slot has a callback.
    pub fn start(&mut self, id: TaskId, repetitions: u16, #[cfg(feature = "task-arg")] arg: *mut ()) {
        stimer_assert!((id as usize) < N);
        stimer_assert!(repetitions <= config::MAX_REPETITIONS);
        stimer_assert!(self.tasks[id as usize].callback.is_some());

        self.tasks[id as usize].repetitions = repetitions;
        #[cfg(feature = "task-arg")]
        {
            self.tasks[id as usize].arg = arg;
        }
        self.schedule(id);
    }

    /// Start with an extra one-time delay added ahead of the first
    /// firing: net effect is a first firing at `now + interval +
    /// delay`, with every subsequent firing spaced by `interval` alone.
    ///
    /// Not re-entrant with respect to the same task — the interval
    /// field is mutated and restored around the call, so a concurrent
    /// read of `interval` for the same `id` during this call observes
    /// a transient value. This is inherited from the original
    /// (spec.md §9) rather than fixed with extra locking.
    pub fn delay_start(
        &mut self,
        id: TaskId,
        repetitions: u16,
        #[cfg(feature = "task-arg")] arg: *mut (),
        delay: u32,
    ) {
        stimer_assert!((id as usize) < N);
        let original_interval = self.tasks[id as usize].interval;
        self.tasks[id as usize].interval = original_interval + delay;
        #[cfg(feature = "task-arg")]
        self.start(id, repetitions, arg);
        #[cfg(not(feature = "task-arg"))]
        self.start(id, repetitions);
        self.tasks[id as usize].interval = original_interval;
    }

    /// Convenience wrapper: `create(reserved = false)` followed by
    /// `start(repetitions = 1)`.
    pub fn oneshot(
        &mut self,
        callback: Callback,
        interval: u32,
        priority: u16,
        #[cfg(feature = "task-arg")] arg: *mut (),
    ) -> TaskId {
        let id = self.create(callback, interval, priority, false);
        #[cfg(feature = "task-arg")]
        self.start(id, 1, arg);
        #[cfg(not(feature = "task-arg"))]
        self.start(id, 1);
        id
    }

    /// Stop `id`: unlink it from the wait list if present. If
    /// `reserved` is clear, the slot is zeroed and returned to the
    /// free pool; if set, only wait-list membership ends and the slot
    /// remains allocated (its callback pointer preserved) so it can be
    /// restarted later.
    pub fn stop(&mut self, id: TaskId) {
        stimer_assert!((id as usize) < N);
        self.stop_internal(id);
    }

    // -- Diagnostics / accessors (spec.md §6) --------------------------------

    /// Walk the wait list and fill `ids_out`/`times_out` with up to
    /// `min(ids_out.len(), times_out.len())` `(id, expire)` pairs in
    /// scheduled order. Returns the number of pairs written.
    pub fn get_wait_table(&self, ids_out: &mut [TaskId], times_out: &mut [u32]) -> usize {
        let cap = ids_out.len().min(times_out.len());
        let mut n = 0;
        for (id, expire) in crate::waitlist::walk(&self.tasks, self.wait_id, self.wait_cnt) {
            if n >= cap {
                break;
            }
            ids_out[n] = id;
            times_out[n] = expire;
            n += 1;
        }
        n
    }

    /// If `id` is currently on the wait list, return a reference to
    /// its slot. Grounded on `stimer_find_waitTask` (`original_source/
    /// test.c`), exercised by spec.md §8's "Reserved" scenario.
    pub fn find_wait_task(&self, id: TaskId) -> Option<&TaskSlot> {
        crate::waitlist::walk(&self.tasks, self.wait_id, self.wait_cnt)
            .find(|&(found, _)| found == id)
            .map(|_| &self.tasks[id as usize])
    }

    // -- Per-task getters/setters ---------------------------------------------

    pub fn task_interval(&self, id: TaskId) -> u32 {
        stimer_assert!((id as usize) < N);
        self.tasks[id as usize].interval
    }

    pub fn set_task_interval(&mut self, id: TaskId, interval: u32) {
        stimer_assert!((id as usize) < N);
        self.tasks[id as usize].interval = interval;
    }

    pub fn task_priority(&self, id: TaskId) -> u16 {
        stimer_assert!((id as usize) < N);
        self.tasks[id as usize].priority
    }

    pub fn set_task_priority(&mut self, id: TaskId, priority: u16) {
        stimer_assert!((id as usize) < N);
        stimer_assert!(priority <= config::MAX_PRIORITY);
        self.tasks[id as usize].priority = priority;
    }

    pub fn task_repetitions(&self, id: TaskId) -> u16 {
        stimer_assert!((id as usize) < N);
        self.tasks[id as usize].repetitions
    }

    pub fn set_task_repetitions(&mut self, id: TaskId, repetitions: u16) {
        stimer_assert!((id as usize) < N);
        self.tasks[id as usize].repetitions = repetitions;
    }

    pub fn task_callback(&self, id: TaskId) -> Option<Callback> {
        stimer_assert!((id as usize) < N);
        self.tasks[id as usize].callback
    }

    pub fn set_task_callback(&mut self, id: TaskId, callback: Callback) {
        stimer_assert!((id as usize) < N);
        self.tasks[id as usize].callback = Some(callback);
    }

    pub fn task_reserved(&self, id: TaskId) -> bool {
        stimer_assert!((id as usize) < N);
        self.tasks[id as usize].reserved
    }

    pub fn set_task_reserved(&mut self, id: TaskId, reserved: bool) {
        stimer_assert!((id as usize) < N);
        self.tasks[id as usize].reserved = reserved;
    }

    #[cfg(feature = "task-arg")]
    pub fn task_arg(&self, id: TaskId) -> *mut () {
        stimer_assert!((id as usize) < N);
        self.tasks[id as usize].arg
    }

    #[cfg(feature = "task-arg")]
    pub fn set_task_arg(&mut self, id: TaskId, arg: *mut ()) {
        stimer_assert!((id as usize) < N);
        self.tasks[id as usize].arg = arg;
    }

    // -- Hook setters (spec.md §6) --------------------------------------------

    #[cfg(feature = "task-hooks")]
    pub fn set_start_hook(&mut self, hook: Hook) {
        self.start_hook = Some(hook);
    }

    #[cfg(feature = "task-hooks")]
    pub fn set_end_hook(&mut self, hook: Hook) {
        self.end_hook = Some(hook);
    }

    #[cfg(feature = "task-hooks")]
    pub fn set_stop_hook(&mut self, hook: Hook) {
        self.stop_hook = Some(hook);
    }

    #[cfg(feature = "task-hooks")]
    pub fn set_schedule_hook(&mut self, hook: Hook) {
        self.schedule_hook = Some(hook);
    }

    #[cfg(feature = "task-hooks")]
    pub fn start_hook(&self) -> Option<Hook> {
        self.start_hook
    }

    #[cfg(feature = "task-hooks")]
    pub fn end_hook(&self) -> Option<Hook> {
        self.end_hook
    }

    #[cfg(feature = "task-hooks")]
    pub fn stop_hook(&self) -> Option<Hook> {
        self.stop_hook
    }

    #[cfg(feature = "task-hooks")]
    pub fn schedule_hook(&self) -> Option<Hook> {
        self.schedule_hook
    }

    /// Force the wait count, bypassing the usual bookkeeping. Used by
    /// tests that need to reset engine state between scenarios, the
    /// same way `stimer_set_waitCnt`/`stimer_set_tick` are used in
    /// `original_source/test.c` between its own scenarios.
    #[doc(hidden)]
    pub fn set_wait_cnt(&mut self, wait_cnt: u16) {
        stimer_assert!((wait_cnt as usize) < N);
        self.wait_cnt = wait_cnt;
    }

    /// Directly set the tick value. See [`Self::set_wait_cnt`].
    #[doc(hidden)]
    pub fn set_tick(&mut self, tick: u32) {
        self.tick.set(tick);
    }
}
