//! # Configuration
//!
//! Compile-time constants governing the timer engine. All limits are
//! fixed at compile time — no dynamic allocation, no per-instance
//! resizing.
//!
//! These mirror the "user config" block at the top of the original
//! C header: edit the constants here (not a runtime parameter) to
//! change the bit widths of the `repetitions`/`priority` fields.

/// Width in bits of the `repetitions` field. Defines [`MAX_REPETITIONS`]
/// and the [`LOOP`] sentinel as `(1 << REPETITIONS_BIT) - 1`.
///
/// Bounded to `[1, 11]` (spec.md §6's `MAX_REPETITIONS_BIT` domain),
/// one bit narrower than the original C header's 12-bit field: this
/// spec's `reserved` flag is a new bit with no counterpart in
/// `original_source/stimer.h`'s bitfield, and has to come from
/// somewhere in the same 16-bit word that packs `repetitions` and
/// `priority`.
pub const REPETITIONS_BIT: u32 = 11;

/// Width in bits of the `priority` field. Defines [`MAX_PRIORITY`].
pub const PRIORITY_BIT: u32 = 4;

/// Maximum legal value of a task's `repetitions` field.
pub const MAX_REPETITIONS: u16 = (1u16 << REPETITIONS_BIT) - 1;

/// Maximum legal value of a task's `priority` field.
pub const MAX_PRIORITY: u16 = (1u16 << PRIORITY_BIT) - 1;

/// Sentinel `repetitions` value meaning "fire forever, never decrement".
/// Equal to [`MAX_REPETITIONS`] (all-ones in the field's bit width).
pub const LOOP: u16 = MAX_REPETITIONS;

/// Largest representable tick value. `timetick` never wraps past this
/// without a rollback first being performed (see [`crate::tick`]).
pub const MAX_TICK: u32 = u32::MAX;

/// Slack kept below [`MAX_TICK`] by the rollback check in
/// [`crate::tick::TickCounter`]. The check itself
/// (`MAX_TICK - timetick < interval`) is exact, so this is `0`, matching
/// the original; it exists as a named quantity because invariant 5
/// refers to it directly (`expire - timetick <= MAX_TICK - MIN_MARGIN`).
pub const MIN_MARGIN: u32 = 0;

/// Convert a duration in milliseconds to a tick count, given the tick
/// granularity `tick_per_ms` (ticks per millisecond). Declared per the
/// `TICK_PER_MS` compile-time option in the original; this crate takes
/// it as a caller-supplied parameter rather than a single crate-wide
/// constant, since nothing else in the engine depends on wall-clock
/// duration — only the caller converting a human-facing duration into
/// the tick units the engine actually schedules in.
#[inline]
pub const fn ms_to_ticks(ms: u32, tick_per_ms: u32) -> u32 {
    ms * tick_per_ms
}

/// Inverse of [`ms_to_ticks`].
#[inline]
pub const fn ticks_to_ms(ticks: u32, tick_per_ms: u32) -> u32 {
    ticks / tick_per_ms
}
