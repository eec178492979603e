//! # Assertion Shim
//!
//! Precondition violations (out-of-range IDs, priority out of range,
//! starting a slot with no callback, service-loop invariant breaches)
//! are programmer errors. The original C library routes
//! these through a configurable `STIMER_ASSERT` macro with four
//! behaviors (`off`, `std`, `callback`, `spin`); this module is the
//! direct Rust rendering of that axis, selected by Cargo feature:
//! `assert-off`, `assert-std` (the default), `assert-callback`,
//! `assert-spin`.
//!
//! Exactly one of the four should be enabled. `assert-off` reproduces
//! the original's `NODEBUG` behavior: [`stimer_assert!`] expands to
//! nothing, so the guarded condition is never evaluated and control
//! returns normally — it is the only feature of the four that keeps
//! [`fail`] from ever being called. If none of the four is enabled,
//! the condition is still evaluated and, on failure, falls back to
//! spinning forever (the same terminal behavior as `assert-spin`,
//! used as a last resort for a misconfigured feature set rather than
//! as a stand-in for `off`).

/// Signature of a user-installed assertion-failure handler, used only
/// when the `assert-callback` feature is enabled. Receives the
/// offending file name and line number, mirroring
/// `stimer_assert_handle(const char *file, uint32_t line)`.
pub type AssertHandler = fn(file: &'static str, line: u32);

#[cfg(feature = "assert-callback")]
static HANDLER: critical_section::Mutex<core::cell::Cell<Option<AssertHandler>>> =
    critical_section::Mutex::new(core::cell::Cell::new(None));

/// Install the assertion-failure callback used by the `assert-callback`
/// feature. Calling this is the host's responsibility during startup;
/// until it is called, a failed assertion under this feature spins
/// (the same fallback the original gives a `NULL` hook).
#[cfg(feature = "assert-callback")]
pub fn set_handler(handler: AssertHandler) {
    critical_section::with(|cs| HANDLER.borrow(cs).set(Some(handler)));
}

/// Report an assertion failure at `file:line` and never return: in
/// every configuration, control does not return from a failed
/// assertion.
#[cold]
#[inline(never)]
pub fn fail(file: &'static str, line: u32) -> ! {
    #[cfg(feature = "assert-std")]
    {
        panic!("softimer assertion failed at {}:{}", file, line);
    }

    #[cfg(all(feature = "assert-callback", not(feature = "assert-std")))]
    {
        let handler = critical_section::with(|cs| HANDLER.borrow(cs).get());
        if let Some(handler) = handler {
            handler(file, line);
        }
        loop {
            core::hint::spin_loop();
        }
    }

    #[cfg(all(
        feature = "assert-spin",
        not(feature = "assert-std"),
        not(feature = "assert-callback")
    ))]
    {
        let _ = (file, line);
        loop {
            core::hint::spin_loop();
        }
    }

    #[cfg(not(any(
        feature = "assert-std",
        feature = "assert-callback",
        feature = "assert-spin"
    )))]
    {
        let _ = (file, line);
        loop {
            core::hint::spin_loop();
        }
    }
}

/// Check a precondition, failing via [`fail`] if it does not hold.
/// Active regardless of Rust's own `debug_assertions` setting — these
/// are library-level preconditions, not debug-only sanity checks, and
/// the original is unconditional outside of `NODEBUG` builds.
///
/// Under the `assert-off` feature this expands to nothing: the
/// condition is not evaluated and control always returns normally,
/// matching the original's `NODEBUG` build where `STIMER_ASSERT`
/// compiles away entirely.
#[macro_export]
macro_rules! stimer_assert {
    ($cond:expr) => {
        #[cfg(not(feature = "assert-off"))]
        {
            if !($cond) {
                $crate::assert::fail(file!(), line!());
            }
        }
    };
}
