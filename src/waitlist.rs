//! # Wait List
//!
//! The ordered singly-linked list over slot indices that the scheduler
//! and service loop operate on. There is no tail pointer — the list is
//! small (bounded by the table's capacity) so the O(n) walks required
//! to unlink an arbitrary id or find an insertion point are acceptable,
//! per spec.md §4.2/§9.
//!
//! Every function here assumes it is called from inside the critical
//! section spec.md §5 requires; none of them take or release one
//! themselves; that's the caller's job ([`crate::sync::critical_section`]).
//!
//! Grounded on the inline list-walk code inside `stimer_scheduler` and
//! `stimer_task_stop` in `stimer.c`, factored into a named module.

use crate::task::{TaskId, TaskSlot};

/// Unlink `id` from the wait list if it is currently linked in.
/// Returns `true` if it was found and removed. O(n).
pub fn unlink(tasks: &mut [TaskSlot], head: &mut TaskId, count: &mut u16, id: TaskId) -> bool {
    if *count == 0 {
        return false;
    }

    if *head == id {
        *head = tasks[id as usize].next_id;
        *count -= 1;
        return true;
    }

    let mut prev = *head;
    for _ in 1..*count {
        let next = tasks[prev as usize].next_id;
        if next == id {
            tasks[prev as usize].next_id = tasks[id as usize].next_id;
            *count -= 1;
            return true;
        }
        prev = next;
    }
    false
}

/// Insert `id` into the wait list at the position dictated by
/// `(expire, priority)` ordering. Assumes `id` is not already linked
/// in (callers unlink first, per spec.md §4.4 step 4 — idempotent
/// re-schedule).
///
/// Ordering: strictly earlier `expire` wins; on a tie, strictly higher
/// `priority` wins; on a full tie (`expire` and `priority` both equal),
/// `id` is placed **after** every existing node at that rank — FIFO
/// among ties, so a task already on the list keeps its place ahead of
/// one just (re)scheduled. Matches the walk condition spelled out in
/// spec.md §4.4 and the 16-firing fixture in spec.md §8 (at tick 2,
/// task 1 — scheduled once at tick 0 and untouched since — fires
/// ahead of task 0, which was rescheduled a tick later to the same
/// `(expire, priority)`).
pub fn insert_ordered(tasks: &mut [TaskSlot], head: &mut TaskId, count: &mut u16, id: TaskId) {
    if *count == 0 {
        *head = id;
        *count = 1;
        return;
    }

    let (expire, priority) = (tasks[id as usize].expire, tasks[id as usize].priority);

    let mut cur = *head;
    let mut prev: Option<TaskId> = None;
    for _ in 0..*count {
        let node = &tasks[cur as usize];
        if node.expire > expire || (node.expire == expire && node.priority < priority) {
            tasks[id as usize].next_id = cur;
            match prev {
                None => *head = id,
                Some(p) => tasks[p as usize].next_id = id,
            }
            *count += 1;
            return;
        }
        prev = Some(cur);
        cur = tasks[cur as usize].next_id;
    }

    // No node satisfied the "insert before me" condition — append after
    // the current tail.
    let tail = prev.expect("count > 0 implies at least one node was visited");
    tasks[tail as usize].next_id = id;
    *count += 1;
}

/// Walk the wait list from `head`, yielding `(id, expire)` pairs in
/// scheduled order. Used by diagnostics (`get_wait_table`) and tests
/// that assert ordering invariants.
pub fn walk<'a>(
    tasks: &'a [TaskSlot],
    head: TaskId,
    count: u16,
) -> impl Iterator<Item = (TaskId, u32)> + 'a {
    let mut cur = head;
    let mut remaining = count;
    core::iter::from_fn(move || {
        if remaining == 0 {
            return None;
        }
        let id = cur;
        let slot = &tasks[cur as usize];
        cur = slot.next_id;
        remaining -= 1;
        Some((id, slot.expire))
    })
}
