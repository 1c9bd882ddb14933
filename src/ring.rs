use crate::invariants::{
    debug_assert_capacity_bound, debug_assert_consume_in_bounds, debug_assert_tail_ge_front,
    debug_assert_wrap_distance,
};

/// A contiguous variable-sized ring buffer, single-producer / single-consumer.
///
/// Every successfully [`produce`](Ring::produce)d record is stored as one
/// unbroken run of bytes inside the borrowed backing buffer, so
/// [`peek`](Ring::peek) can hand the consumer a slice directly with no
/// gather/scatter and no copy-out. When a record does not fit in the
/// remaining tail space but would fit at the front of the buffer, `produce`
/// skips the tail and stores the record at offset zero instead; `consume`
/// follows that skip transparently. No record is ever split across the wrap
/// point.
///
/// `read`, `write` and `wrap` are free-running counters, not small indices —
/// they are only masked down to a physical offset into `data` when one is
/// actually needed. The gap between `read` and `write` encodes both how
/// many bytes are outstanding and whether a tail-skip is currently in
/// effect; see [`Ring::is_split`].
///
/// This type does no internal synchronization. `produce`, `consume` and
/// `reset` take `&mut self`, so the borrow checker enforces exclusive access
/// for whichever side of the producer/consumer split is calling — sharing
/// one `Ring` across threads is sound only if the caller publishes
/// `produce`'s writes before the consumer observes the new `write`/`wrap`,
/// and publishes the new `read` only after the consumer is done with the
/// bytes it peeked.
pub struct Ring<'a> {
    data: &'a mut [u8],
    size: u32,
    mask: u32,
    read: u32,
    write: u32,
    wrap: u32,
}

impl<'a> Ring<'a> {
    /// Creates a new, empty ring over `data`.
    ///
    /// # Panics
    ///
    /// Panics if `data.len()` is zero or not a power of two. This is a
    /// caller configuration error discovered once at construction time, so
    /// the check is a real `assert!` rather than a `debug_assert!`: every
    /// subsequent masked-index computation relies on it.
    pub fn new(data: &'a mut [u8]) -> Self {
        let size = data.len();
        assert!(size > 0, "ring buffer size must be non-zero");
        assert!(
            size & (size - 1) == 0,
            "ring buffer size must be a power of two, got {size}"
        );
        let size = size as u32;
        Self {
            data,
            size,
            mask: size - 1,
            read: 0,
            write: 0,
            wrap: 0,
        }
    }

    /// Returns the capacity of the backing buffer in bytes.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.size as usize
    }

    /// Zeroes all three cursors. Equivalent to re-initializing over the
    /// same storage.
    pub fn reset(&mut self) {
        self.read = 0;
        self.write = 0;
        self.wrap = 0;
    }

    #[inline]
    fn mask(&self, cursor: u32) -> u32 {
        cursor & self.mask
    }

    fn cyclic_distance(a: u32, b: u32) -> u32 {
        a.wrapping_sub(b).min(b.wrapping_sub(a))
    }

    /// Whether a tail-skip is currently in flight: the readable region spans
    /// the end of the buffer and then wraps to the front.
    #[inline]
    #[must_use]
    pub fn is_split(&self) -> bool {
        Self::cyclic_distance(self.read, self.write) > self.size
    }

    /// Attempts to store `bytes` as one contiguous record.
    ///
    /// Returns `true` iff all of `bytes` was stored; on `false` the Ring is
    /// left entirely unchanged. This is the Ring's sole recoverable failure
    /// mode — the caller is expected to drain via [`consume`](Ring::consume)
    /// and retry, or drop the record.
    pub fn produce(&mut self, bytes: &[u8]) -> bool {
        let insize = bytes.len() as u32;
        let mw = self.mask(self.write);

        if self.is_split() {
            let avail = if self.wrap == self.read {
                if mw == 0 {
                    0
                } else {
                    self.size - mw
                }
            } else {
                let front = self.mask(self.read);
                debug_assert_tail_ge_front!(front, mw);
                self.read.wrapping_sub(self.write) & self.mask
            };
            if avail < insize {
                return false;
            }
            self.write_in_place(mw, bytes, insize);
            return true;
        }

        if self.is_empty() && mw != 0 {
            // Auto-reset: fully drained, but the write cursor sits
            // mid-buffer. The whole buffer is available from offset zero,
            // not just the tail remainder.
            if self.size < insize {
                return false;
            }
            return self.perform_tail_skip(bytes, insize, mw);
        }

        if mw == 0 && !self.is_empty() {
            // Tail is exactly full; no room there at all.
            return self.front_check(bytes, insize, mw);
        }

        let avail = self.size - mw;
        if avail >= insize {
            self.write_in_place(mw, bytes, insize);
            return true;
        }
        self.front_check(bytes, insize, mw)
    }

    /// Shared tail of cases (c) and (d): the tail has no usable room, so try
    /// the front instead.
    fn front_check(&mut self, bytes: &[u8], insize: u32, mw: u32) -> bool {
        if self.mask(self.read) < insize {
            return false;
        }
        self.perform_tail_skip(bytes, insize, mw)
    }

    /// Records a tail-skip: snapshots `wrap`, writes `bytes` at offset zero,
    /// and inflates `write` so `is_split()` becomes true without writing a
    /// single byte outside `bytes` itself.
    fn perform_tail_skip(&mut self, bytes: &[u8], insize: u32, mw: u32) -> bool {
        self.wrap = self.write;
        self.write_at(0, bytes);
        self.write = self
            .write
            .wrapping_add(self.size)
            .wrapping_add(self.size - mw)
            .wrapping_add(insize);
        debug_assert!(
            self.mask(self.write) == self.mask(insize),
            "tail-skip post-condition violated: write & mask != insize & mask"
        );
        true
    }

    fn write_in_place(&mut self, mw: u32, bytes: &[u8], insize: u32) {
        self.write_at(mw, bytes);
        self.write = self.write.wrapping_add(insize);
    }

    fn write_at(&mut self, offset: u32, bytes: &[u8]) {
        let offset = offset as usize;
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    /// Returns the contiguous readable run starting at the consumer's
    /// current position.
    ///
    /// Calling `peek` on an empty Ring is legal: the returned slice is
    /// valid but has length zero (see
    /// [`consumeable_size_continuous`](Ring::consumeable_size_continuous)).
    #[must_use]
    pub fn peek(&self) -> &[u8] {
        let start = if self.read == self.wrap && self.is_split() {
            0
        } else {
            self.mask(self.read) as usize
        };
        let len = self.consumeable_size_continuous();
        &self.data[start..start + len]
    }

    /// Bytes readable contiguously from the start of [`peek`](Ring::peek).
    #[must_use]
    pub fn consumeable_size_continuous(&self) -> usize {
        self.consumeable_sizes().0
    }

    /// Total bytes readable, across the tail-skip boundary if split.
    #[must_use]
    pub fn consumeable_size(&self) -> usize {
        let cs = self.consumeable_sizes().1;
        debug_assert_capacity_bound!(cs, self.size as usize);
        cs
    }

    /// Returns `(continuous, total)`.
    fn consumeable_sizes(&self) -> (usize, usize) {
        if !self.is_split() {
            let cs = self.write.wrapping_sub(self.read) as usize;
            return (cs, cs);
        }
        if self.read == self.wrap {
            let mw = self.mask(self.write);
            let cs = if mw != 0 { mw } else { self.size } as usize;
            return (cs, cs);
        }
        let distance = Self::cyclic_distance(self.wrap, self.read);
        debug_assert_wrap_distance!(distance, self.size);
        let continuous = self.wrap.wrapping_sub(self.read) & self.mask;
        let front = self.mask(self.write);
        (continuous as usize, (continuous + front) as usize)
    }

    /// Releases `k` bytes, making them available to future `produce` calls.
    ///
    /// # Panics (debug builds only)
    ///
    /// Panics in debug builds if `k` exceeds
    /// [`consumeable_size_continuous`](Ring::consumeable_size_continuous).
    /// Undershooting this precondition is a caller bug.
    pub fn consume(&mut self, k: usize) {
        debug_assert_consume_in_bounds!(k, self.consumeable_size_continuous());
        let k = k as u32;
        if self.read == self.wrap && self.is_split() {
            let front = self.mask(self.read);
            self.read = self
                .read
                .wrapping_add(self.size)
                .wrapping_add(self.size - front)
                .wrapping_add(k);
            debug_assert!(
                self.mask(self.read) == self.mask(k),
                "consume post-condition violated: read & mask != k & mask"
            );
        } else {
            self.read = self.read.wrapping_add(k);
        }
    }

    /// Whether there are no outstanding readable bytes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read == self.write
    }

    /// Whether the Ring is at full capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.consumeable_size() == self.size as usize
    }

    #[cfg(test)]
    fn seed_cursors(&mut self, read: u32, write: u32, wrap: u32) {
        self.read = read;
        self.write = write;
        self.wrap = wrap;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const H: &[u8] = b"0123456789abcdef";

    #[test]
    fn s1_fill_drain_refill_with_wrap() {
        let mut backing = [0u8; 8];
        let mut ring = Ring::new(&mut backing);

        assert!(ring.produce(&H[0..8]));
        assert!(!ring.produce(&H[0..1]));
        assert_eq!(ring.consumeable_size(), 8);
        assert_eq!(ring.peek(), &H[0..8]);
        ring.consume(8);

        assert!(ring.produce(&H[4..11]));
        assert_eq!(ring.consumeable_size(), 7);
        assert_eq!(ring.peek(), &H[4..11]);
        ring.consume(6);

        assert!(ring.produce(&H[0..6]));
        assert_eq!(ring.peek(), &H[10..11]);
        ring.consume(1);
        assert_eq!(ring.peek(), &H[0..6]);
        ring.consume(6);
        assert!(ring.is_empty());
    }

    #[test]
    fn s2_front_refusal() {
        let mut backing = [0u8; 8];
        let mut ring = Ring::new(&mut backing);

        assert!(ring.produce(&H[0..6]));
        ring.consume(5);
        assert!(ring.produce(&H[0..4]));
        assert!(ring.produce(&H[0..1]));
        assert!(!ring.produce(&H[0..1]));
    }

    #[test]
    fn s3_counter_wrap() {
        let mut backing = [0u8; 8];
        let mut ring = Ring::new(&mut backing);
        ring.seed_cursors(0xFFFF_FFFC, 0xFFFF_FFFC, 0);

        assert!(ring.produce(&H[0..6]));
        assert!(ring.produce(&H[0..2]));
        assert_eq!(ring.consumeable_size(), 8);
        assert_eq!(ring.peek(), &H[0..6]);
        ring.consume(6);
        assert_eq!(ring.peek(), &H[0..2]);
        ring.consume(2);
    }

    #[test]
    fn s4_split_with_producer_saturated() {
        let mut backing = [0u8; 8];
        let mut ring = Ring::new(&mut backing);
        ring.seed_cursors(0xFFFF_FFFB, 0xFFFF_FFFC, 0);

        assert_eq!(ring.consumeable_size(), 1);
        assert!(ring.produce(&H[0..4]));
        assert_eq!(ring.consumeable_size_continuous(), 5);
        assert_eq!(ring.consumeable_size(), 5);
        assert!(!ring.produce(&H[0..4]));
        assert!(ring.produce(&H[0..3]));
        assert!(!ring.produce(&H[0..1]));
        assert_eq!(ring.consumeable_size_continuous(), 5);
        assert_eq!(ring.consumeable_size(), 8);
    }

    #[test]
    fn s5_split_asymmetric_queries() {
        let mut backing = [0u8; 8];
        let mut ring = Ring::new(&mut backing);

        assert!(ring.produce(&H[0..6]));
        ring.consume(5);
        assert!(ring.produce(&H[0..2]));
        assert_eq!(ring.consumeable_size_continuous(), 3);
        assert!(ring.produce(&H[0..5]));
        assert_eq!(ring.consumeable_size_continuous(), 3);
        assert_eq!(ring.consumeable_size(), 8);
    }

    #[test]
    fn s6_single_byte_slide() {
        let mut backing = [0u8; 8];
        let mut ring = Ring::new(&mut backing);

        assert!(ring.produce(&H[0..8]));
        ring.consume(1);
        assert_eq!(ring.consumeable_size_continuous(), 7);
        assert!(ring.produce(&H[1..2]));
        assert_eq!(ring.consumeable_size_continuous(), 7);
        assert_eq!(ring.consumeable_size(), 8);
        ring.consume(7);
        assert_eq!(ring.consumeable_size_continuous(), 1);
        assert_eq!(ring.peek(), &H[1..2]);
    }

    #[test]
    fn produce_does_not_touch_bytes_outside_insize() {
        let mut backing = [0u8; 8];
        let mut ring = Ring::new(&mut backing);

        assert!(ring.produce(b"abcdef")); // fills [0..6], tail [6..8] untouched
        ring.consume(5);
        assert!(ring.produce(b"xy")); // fits the remaining tail exactly
        assert_eq!(&backing, b"abcdefxy");
    }

    #[test]
    fn auto_reset_after_full_drain_mid_buffer() {
        let mut backing = [0u8; 8];
        let mut ring = Ring::new(&mut backing);

        assert!(ring.produce(b"abcd")); // write lands at mw=4
        ring.consume(4); // fully drained, write cursor still mid-buffer
        assert!(ring.produce(b"12345678")); // needs the full buffer from offset 0
        assert_eq!(ring.peek(), b"12345678");
    }

    #[test]
    fn empty_ring_peek_is_valid_empty_slice() {
        let mut backing = [0u8; 8];
        let ring = Ring::new(&mut backing);
        assert_eq!(ring.peek(), &[] as &[u8]);
        assert_eq!(ring.consumeable_size_continuous(), 0);
        assert!(ring.is_empty());
    }

    #[test]
    fn produce_false_leaves_ring_unchanged() {
        let mut backing = [0u8; 8];
        let mut ring = Ring::new(&mut backing);
        assert!(ring.produce(b"1234567"));
        assert!(!ring.produce(b"xy"));
        assert_eq!(ring.consumeable_size(), 7);
        assert_eq!(ring.peek(), b"1234567");
    }

    #[test]
    #[should_panic(expected = "power of two")]
    fn new_rejects_non_power_of_two_size() {
        let mut backing = [0u8; 6];
        let _ = Ring::new(&mut backing);
    }

    #[test]
    #[should_panic(expected = "non-zero")]
    fn new_rejects_zero_size() {
        let mut backing: [u8; 0] = [];
        let _ = Ring::new(&mut backing);
    }

    #[test]
    fn is_full_at_capacity() {
        let mut backing = [0u8; 4];
        let mut ring = Ring::new(&mut backing);
        assert!(ring.produce(b"abcd"));
        assert!(ring.is_full());
    }

    // =========================================================================
    // Property 6: counter-wrap independence
    // Round-tripping a sequence of records is unaffected by the cursors
    // starting near the top of the u32 domain and crossing zero mid-test.
    // Needs `seed_cursors`, so it lives here rather than in
    // tests/property_tests.rs, which only sees the public API.
    // =========================================================================

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_round_trip_survives_counter_wrap(
            records in prop::collection::vec(prop::collection::vec(any::<u8>(), 1..8), 1..20),
            seed_offset in 0u32..16,
        ) {
            let mut backing = [0u8; 16];
            let mut ring = Ring::new(&mut backing);
            ring.seed_cursors(
                u32::MAX.wrapping_sub(seed_offset),
                u32::MAX.wrapping_sub(seed_offset),
                0,
            );

            let mut expected = Vec::new();
            for record in &records {
                if ring.produce(record) {
                    expected.extend_from_slice(record);
                }
                while ring.consumeable_size_continuous() > 0 {
                    let chunk = ring.peek().to_vec();
                    prop_assert_eq!(&chunk, &expected[..chunk.len()]);
                    ring.consume(chunk.len());
                    expected.drain(..chunk.len());
                }
            }
            prop_assert!(expected.is_empty());
        }
    }
}
