//! # softimer — a cooperative software timer engine
//!
//! A fixed-capacity, list-ordered software timer scheduler for deeply
//! embedded systems: `#![no_std]`, no heap, no dynamic allocation.
//! One free-running tick counter plus a fixed task-slot arena give you
//! many independent, periodic or one-shot timers driven from a single
//! hardware tick source.
//!
//! ## Overview
//!
//! Application code creates tasks (a callback, an interval in ticks, a
//! priority, a "reserved" flag), starts them with a repeat count, and
//! calls [`scheduler::SoftTimer::serve`] from its main loop. A single
//! tick interrupt calls [`scheduler::SoftTimer::tick_increase`]; no
//! other work happens in interrupt context. Every task that has
//! reached its expiration is drained from the head of an ordered wait
//! list, its callback invoked, and it is either re-scheduled (periodic)
//! or retired (one-shot) — see [`scheduler`] for the full algorithm.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                    Application Tasks                    │
//! ├────────────────────────────────────────────────────────┤
//! │               Lifecycle API (kernel.rs)                 │
//! │     create() · start() · delay_start() · stop()         │
//! │     oneshot() · get_wait_table() · find_wait_task()      │
//! ├──────────────┬────────────────────┬───────────────────┤
//! │  Scheduler   │   Wait List        │  Sync Primitives  │
//! │  scheduler.rs│   waitlist.rs      │  sync.rs          │
//! │  ─ schedule()│   ─ insert_ordered │  ─ critical_section│
//! │  ─ serve()   │   ─ unlink         │                   │
//! ├──────────────┴────────────────────┴───────────────────┤
//! │          Tick Source & Rollback (tick.rs)                │
//! │    TickCounter · increase() · would_overflow() · rollback│
//! ├────────────────────────────────────────────────────────┤
//! │            Task Slot Table (task.rs)                    │
//! │    TaskSlot · TaskId · Callback                          │
//! ├────────────────────────────────────────────────────────┤
//! │                assert.rs (ASSERT_ENABLE)                 │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Scheduling model
//!
//! Tasks are ordered in the wait list by `(expire, priority)`: the
//! earliest expiration runs first; among equal expirations, higher
//! priority wins; among equal expiration and priority, the most
//! recently scheduled task wins (see [`waitlist::insert_ordered`]).
//!
//! Ticks never wrap while tasks are scheduled: before an addition
//! would overflow the tick counter's range, every queued task's
//! expiration is renormalized against the current tick and the
//! counter is reset to zero (see [`tick::TickCounter::rollback`]).
//!
//! ## Memory model
//!
//! - **No heap**: every task table is a caller-sized `[TaskSlot; N]`
//!   array, `N` fixed at compile time via a const generic.
//! - **No `alloc`**: pure `core` only.
//! - **Critical sections**: [`sync::critical_section`], backed by the
//!   `critical-section` crate so this crate stays portable across
//!   architectures rather than hard-coding one interrupt-masking
//!   scheme.
//!
//! ## Configuration
//!
//! Compile-time behavior (task arguments, lifecycle hooks, logging,
//! and the assertion-failure strategy) is controlled by Cargo
//! features — see the crate's `Cargo.toml` and [`assert`].

#![no_std]

pub mod assert;
pub mod config;
pub mod kernel;
pub mod scheduler;
pub mod sync;
pub mod task;
pub mod tick;
pub mod waitlist;
