//! # Synchronization Primitives
//!
//! Critical-section abstraction used to bracket mutation of the wait
//! list and task slot table. Per spec.md §5, the tick context only
//! ever touches `timetick` (a bare word increment); every other
//! operation — `schedule`, `stop`, `serve`, the accessors — runs in
//! the base context and must be atomic with respect to a tick
//! interrupt landing mid-mutation.

use critical_section::{with, CriticalSection};

/// Execute a closure within a critical section.
///
/// [`SoftTimer`](crate::scheduler::SoftTimer) takes `&mut self` for
/// every mutating call, so Rust's own borrow checker already rules out
/// concurrent base-context access to one instance. The hazard spec.md
/// §5 describes only arises once a host shares one engine between the
/// tick interrupt and the main loop — typically by placing it in a
/// `critical_section::Mutex<RefCell<SoftTimer<N>>>` static. This helper
/// is what a host uses to bracket its own access to that static; the
/// engine does not call it on its own behalf.
///
/// # Usage
/// ```ignore
/// sync::critical_section(|_cs| {
///     // Access the shared SoftTimer<N> safely
/// });
/// ```
#[inline]
pub fn critical_section<F, R>(f: F) -> R
where
    F: FnOnce(CriticalSection) -> R,
{
    with(f)
}
