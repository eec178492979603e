//! # Task Slot
//!
//! Defines the task record stored in the engine's fixed slot table.
//! Each slot is either free (`callback.is_none()`), created-but-not-
//! started (`callback.is_some()`, `repetitions == 0`), on the wait
//! list (`repetitions > 0`), or reserved-and-retired (`reserved` set,
//! `callback` cleared from the wait list but the slot itself stays
//! allocated).
//!
//! Grounded directly on `stimer_task_structure_type` (`stimer.h`).

use crate::config;

/// Index of a task slot in the engine's fixed-capacity array.
pub type TaskId = u16;

/// Opaque per-task callback, matching the original's
/// `void (*task_callback)(void*)`. `core` has no generic function-
/// pointer-with-context story beyond a raw pointer argument, so the
/// argument stays untyped exactly as specified.
pub type Callback = fn(*mut ());

/// A single task record.
///
/// `callback == None` means the slot is free. This is the direct
/// idiomatic rendering of "`callback`: ... absent (null) means the
/// slot is free" (spec.md §3) — an `Option` instead of a null-checked
/// raw pointer, since the callback itself carries no per-call state
/// that needs raw-pointer aliasing.
#[derive(Clone, Copy)]
pub struct TaskSlot {
    /// Callback invoked at expiration. `None` means the slot is free.
    pub callback: Option<Callback>,

    /// Opaque argument pointer passed to `callback` at invocation.
    /// Compiled out entirely when the `task-arg` feature is disabled,
    /// per `STIMER_TASK_ARG_ENABLE`.
    #[cfg(feature = "task-arg")]
    pub arg: *mut (),

    /// Ticks between successive firings.
    pub interval: u32,

    /// Absolute tick value at which this task next fires. Meaningful
    /// only while the slot is on the wait list.
    pub expire: u32,

    /// Remaining fire count, in `[0, MAX_REPETITIONS]`.
    /// `config::LOOP` means "repeat forever, do not decrement".
    /// `0` means "not scheduled / retired".
    pub repetitions: u16,

    /// Scheduling priority in `[0, MAX_PRIORITY]`. Higher wins ties.
    pub priority: u16,

    /// When set, the slot is not returned to the free pool on stop;
    /// the callback pointer is preserved so the task can be restarted.
    pub reserved: bool,

    /// Index of the next task on the wait list. Meaningful only while
    /// this slot is linked in; undefined (left stale) once unlinked.
    pub next_id: TaskId,
}

// Safety: `arg` is an opaque pointer the caller supplies and is only
// ever read back by the caller's own callback. The engine itself never
// dereferences it, and all mutation of a `TaskSlot` happens inside the
// critical section required by spec.md §5.
#[cfg(feature = "task-arg")]
unsafe impl Send for TaskSlot {}
#[cfg(feature = "task-arg")]
unsafe impl Sync for TaskSlot {}

impl TaskSlot {
    /// A free slot, suitable for `const`-initializing the fixed array.
    pub const EMPTY: TaskSlot = TaskSlot {
        callback: None,
        #[cfg(feature = "task-arg")]
        arg: core::ptr::null_mut(),
        interval: 0,
        expire: 0,
        repetitions: 0,
        priority: 0,
        reserved: false,
        next_id: 0,
    };

    /// Is this slot free (no callback, not reserved)? A reserved slot
    /// with a retired (`None`) callback is not reallocated — it must
    /// be explicitly restarted, per spec.md §4.1/§4.6.
    #[inline]
    pub fn is_free(&self) -> bool {
        self.callback.is_none() && !self.reserved
    }

    /// Write the static parameters of a newly created task. Does not
    /// place the slot on the wait list — `repetitions` stays `0` until
    /// `start` is called, per spec.md §4.6. `arg` is supplied later by
    /// `start`/`delay_start`, matching the original's
    /// `stimer_create_task(callback, interval, priority, reserved)` /
    /// `stimer_task_start(id, repetitions, arg)` split.
    pub fn create(&mut self, callback: Callback, interval: u32, priority: u16, reserved: bool) {
        debug_assert!(priority <= config::MAX_PRIORITY);
        self.callback = Some(callback);
        self.interval = interval;
        self.priority = priority;
        self.reserved = reserved;
        self.repetitions = 0;
        #[cfg(feature = "task-arg")]
        {
            self.arg = core::ptr::null_mut();
        }
    }

    /// Clear the slot back to the free state, preserving nothing.
    /// Used by `stop` when `reserved` is clear.
    pub fn clear(&mut self) {
        *self = TaskSlot::EMPTY;
    }
}
