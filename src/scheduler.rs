//! # Scheduler & Service Loop
//!
//! The engine core: `schedule()` places a task into the wait list at
//! its correct ordered position, and `serve()` drains every currently-
//! expired task from the head of the list, invoking callbacks and
//! re-scheduling or retiring them.
//!
//! Grounded on `stimer_scheduler`/`stimer_serve` in `stimer.c`,
//! restructured into a method set on a struct carrying its own state.

use crate::config;
use crate::stimer_assert;
use crate::task::{Callback, TaskId, TaskSlot};
use crate::tick::TickCounter;
use crate::waitlist;

#[cfg(feature = "task-hooks")]
type Hook = fn(TaskId);

/// The central engine state: one instance per timer.
///
/// `N` is the fixed task-table capacity, analogous to an externally-
/// supplied `(ptasks, size)` pair — here folded into an owned
/// const-generic array so the type carries its own storage rather
/// than a caller-managed pointer+length, the natural Rust rendering
/// of a statically-sized arena (see DESIGN.md).
pub struct SoftTimer<const N: usize> {
    pub(crate) tasks: [TaskSlot; N],
    pub(crate) tick: TickCounter,
    pub(crate) wait_id: TaskId,
    pub(crate) wait_cnt: u16,

    #[cfg(feature = "task-hooks")]
    pub(crate) start_hook: Option<Hook>,
    #[cfg(feature = "task-hooks")]
    pub(crate) end_hook: Option<Hook>,
    #[cfg(feature = "task-hooks")]
    pub(crate) stop_hook: Option<Hook>,
    #[cfg(feature = "task-hooks")]
    pub(crate) schedule_hook: Option<Hook>,
}

impl<const N: usize> SoftTimer<N> {
    /// Construct a new, empty engine. `N` must be nonzero — enforced
    /// at monomorphization time by [`stimer_assert_size`], so a
    /// misconfigured capacity is a compile error.
    pub const fn new() -> Self {
        stimer_assert_size::<N>();
        Self {
            tasks: [TaskSlot::EMPTY; N],
            tick: TickCounter::new(),
            wait_id: 0,
            wait_cnt: 0,
            #[cfg(feature = "task-hooks")]
            start_hook: None,
            #[cfg(feature = "task-hooks")]
            end_hook: None,
            #[cfg(feature = "task-hooks")]
            stop_hook: None,
            #[cfg(feature = "task-hooks")]
            schedule_hook: None,
        }
    }

    /// Number of slots on the wait list right now.
    #[inline]
    pub fn wait_cnt(&self) -> u16 {
        self.wait_cnt
    }

    /// Index of the head of the wait list. Meaningful only when
    /// `wait_cnt() > 0`.
    #[inline]
    pub fn wait_id(&self) -> TaskId {
        self.wait_id
    }

    /// Current tick value.
    #[inline]
    pub fn get_tick(&self) -> u32 {
        self.tick.get()
    }

    /// Diagnostic counter of how many times a tick rollback has fired.
    #[inline]
    pub fn reset_cnt(&self) -> u32 {
        self.tick.reset_count()
    }

    /// The head task's expiration, or `0` if the wait list is empty —
    /// matching `stimer_get_nextExpire`'s "return 0 if wait_cnt == 0".
    pub fn next_expire(&self) -> u32 {
        if self.wait_cnt == 0 {
            0
        } else {
            self.tasks[self.wait_id as usize].expire
        }
    }

    /// Advance the tick counter by one. Intended to be called from the
    /// host's tick interrupt; this is the only engine operation that
    /// runs in the tick context, and needs no critical section of its
    /// own beyond the word-sized increment being naturally atomic.
    pub fn tick_increase(&mut self) {
        self.tick.increase();
    }

    /// Place or move `id` into the wait list at the position dictated
    /// by its computed expiration.
    ///
    /// Preconditions (assertion-gated, programmer errors): `id < N`,
    /// `tasks[id].callback` is set.
    pub fn schedule(&mut self, id: TaskId) {
        stimer_assert!((id as usize) < N);
        stimer_assert!(self.tasks[id as usize].callback.is_some());

        // Step 1: defensive no-op.
        if self.tasks[id as usize].repetitions == 0 {
            return;
        }

        // Step 2: rollback if the addition would overflow.
        let interval = self.tasks[id as usize].interval;
        if self.tick.would_overflow(interval) {
            self.tick
                .rollback(&mut self.tasks, self.wait_id, self.wait_cnt);
            #[cfg(feature = "log")]
            log::trace!("softimer: tick rollback, reset_cnt={}", self.tick.reset_count());
        }

        // Step 3: compute expire against the (possibly just-rolled-back)
        // tick value.
        self.tasks[id as usize].expire = self.tick.get() + interval;

        // Step 4: idempotent re-schedule — unlink if already present.
        waitlist::unlink(&mut self.tasks, &mut self.wait_id, &mut self.wait_cnt, id);

        // Steps 5-6: insert at the ordered position (or as the sole
        // element if the list was empty).
        waitlist::insert_ordered(&mut self.tasks, &mut self.wait_id, &mut self.wait_cnt, id);

        #[cfg(feature = "log")]
        log::trace!(
            "softimer: scheduled id={} expire={} wait_cnt={}",
            id,
            self.tasks[id as usize].expire,
            self.wait_cnt
        );

        // Step 7: schedule hook.
        #[cfg(feature = "task-hooks")]
        if let Some(hook) = self.schedule_hook {
            hook(id);
        }
    }

    /// Drain every currently-expired task from the head of the wait
    /// list, invoking callbacks and re-scheduling or retiring them.
    /// Intended to be called from the main loop.
    ///
    /// Callbacks may themselves schedule or stop any task, including
    /// the one currently running — `wait_id` is re-read every
    /// iteration so such mutation is observed correctly.
    pub fn serve(&mut self) {
        while self.wait_cnt > 0 && self.tasks[self.wait_id as usize].expire <= self.tick.get() {
            let id = self.wait_id;

            stimer_assert!((id as usize) < N);
            stimer_assert!(self.tasks[id as usize].repetitions > 0);
            stimer_assert!(self.tasks[id as usize].callback.is_some());

            if self.tasks[id as usize].repetitions != config::LOOP {
                self.tasks[id as usize].repetitions -= 1;
            }

            #[cfg(feature = "task-hooks")]
            if let Some(hook) = self.start_hook {
                hook(id);
            }

            let callback: Callback = self.tasks[id as usize]
                .callback
                .expect("checked by the assertion above");
            #[cfg(feature = "task-arg")]
            let arg = self.tasks[id as usize].arg;
            #[cfg(not(feature = "task-arg"))]
            let arg = core::ptr::null_mut();
            callback(arg);

            #[cfg(feature = "task-hooks")]
            if let Some(hook) = self.end_hook {
                hook(id);
            }

            if self.tasks[id as usize].repetitions > 0 {
                self.schedule(id);
            } else {
                #[cfg(feature = "task-hooks")]
                if let Some(hook) = self.stop_hook {
                    hook(id);
                }
                self.stop_internal(id);
            }
        }
    }

    /// Shared by `serve`'s retirement path and the public `stop` in
    /// [`crate::kernel`]: unlink from the wait list if present, then
    /// either clear the slot or, if reserved, leave it allocated.
    pub(crate) fn stop_internal(&mut self, id: TaskId) {
        stimer_assert!((id as usize) < N);

        waitlist::unlink(&mut self.tasks, &mut self.wait_id, &mut self.wait_cnt, id);

        if self.tasks[id as usize].reserved {
            self.tasks[id as usize].repetitions = 0;
        } else {
            self.tasks[id as usize].clear();
        }

        #[cfg(feature = "log")]
        log::trace!("softimer: stopped id={}", id);
    }
}

/// `const fn`-time guard that `N` fits in a [`TaskId`] and is
/// nonzero. Evaluated at monomorphization time so a misconfigured
/// capacity is a compile error, not a runtime assertion.
const fn stimer_assert_size<const N: usize>() {
    assert!(N > 0, "softimer: capacity must be nonzero");
    assert!(
        N <= TaskId::MAX as usize,
        "softimer: capacity exceeds TaskId range"
    );
}

impl<const N: usize> Default for SoftTimer<N> {
    fn default() -> Self {
        Self::new()
    }
}
