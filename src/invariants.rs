//! Debug assertion macros for ring buffer invariants.
//!
//! These macros check internal consistency of the cursor arithmetic in
//! [`crate::Ring`] — properties the implementation must uphold on every
//! call, as opposed to preconditions a caller can violate. They compile to
//! nothing outside debug builds, so there is zero overhead in release.

// =============================================================================
// INV-CAP: Capacity Bound
// =============================================================================

/// Assert that the total readable byte count never exceeds capacity.
///
/// **Invariant**: `consumeable_size() ≤ size`
macro_rules! debug_assert_capacity_bound {
    ($size_avail:expr, $size:expr) => {
        debug_assert!(
            $size_avail <= $size,
            "INV-CAP violated: consumeable_size {} exceeds capacity {}",
            $size_avail,
            $size
        )
    };
}

// =============================================================================
// INV-TAIL: Tail Not Behind Front
// =============================================================================

/// Assert that, while already split and not sitting at the skip point, the
/// consumer's front offset is at or past the producer's tail offset.
///
/// **Invariant**: `(read & mask) ≥ (write & mask)`
macro_rules! debug_assert_tail_ge_front {
    ($read_off:expr, $write_off:expr) => {
        debug_assert!(
            $read_off >= $write_off,
            "INV-TAIL violated: read offset {} precedes write offset {} while split",
            $read_off,
            $write_off
        )
    };
}

// =============================================================================
// INV-WRAP: Wrap Distance Bound
// =============================================================================

/// Assert that, while split with `read != wrap`, the cyclic distance between
/// `wrap` and `read` stays under one full lap of the buffer.
///
/// **Invariant**: `cyclic_distance(wrap, read) < size`
macro_rules! debug_assert_wrap_distance {
    ($distance:expr, $size:expr) => {
        debug_assert!(
            $distance < $size,
            "INV-WRAP violated: cyclic_distance(wrap, read) {} >= capacity {}",
            $distance,
            $size
        )
    };
}

// =============================================================================
// INV-CONSUME: Contiguous Consume Bound
// =============================================================================

/// Assert that a caller never consumes more than the contiguous readable run
/// reported by `consumeable_size_continuous`.
///
/// **Invariant**: `k ≤ consumeable_size_continuous()`
macro_rules! debug_assert_consume_in_bounds {
    ($k:expr, $available:expr) => {
        debug_assert!(
            $k <= $available,
            "INV-CONSUME violated: consume({}) exceeds contiguous readable size {}",
            $k,
            $available
        )
    };
}

pub(crate) use debug_assert_capacity_bound;
pub(crate) use debug_assert_consume_in_bounds;
pub(crate) use debug_assert_tail_ge_front;
pub(crate) use debug_assert_wrap_distance;
