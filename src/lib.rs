//! Contiguous variable-sized ring buffer — single-producer, single-consumer.
//!
//! [`Ring`] stores every enqueued record as one unbroken run of bytes inside
//! a fixed-size, caller-owned backing buffer, so the consumer can read a
//! record directly as a slice with no gather/scatter and no copy-out. When a
//! record does not fit in the remaining tail space but would fit at the
//! front of the buffer, the producer skips the tail and restarts at offset
//! zero; the consumer follows that skip transparently on its next read. No
//! record is ever split across the wrap point.
//!
//! This is a single-threaded data structure: `produce` and `consume` take
//! `&mut self`, so the borrow checker enforces exclusive access for whichever
//! side is calling. Sharing one `Ring` between a producer thread and a
//! consumer thread is sound only if the caller supplies its own
//! memory-ordering discipline around the handoff; see the module docs on
//! [`Ring`] for what that discipline must guarantee.
//!
//! # Example
//!
//! ```
//! use ringspsc_rs::Ring;
//!
//! let mut backing = [0u8; 8];
//! let mut ring = Ring::new(&mut backing);
//!
//! assert!(ring.produce(b"hello"));
//! assert_eq!(ring.peek(), b"hello");
//! ring.consume(5);
//! assert!(ring.is_empty());
//! ```

mod invariants;
mod ring;

pub use ring::Ring;
