// SPDX-License-Identifier: MIT OR Apache-2.0
//! Lock-free optional parameter slots.
//!
//! A tuning thread calls [`ParamSlot::set`] while another thread
//! concurrently reads the same slot to feed a node's computation.
//! Both sides are single-word atomic operations: presence and value
//! change together, so no half-written state is ever observable.

use std::sync::atomic::{AtomicU64, Ordering};

/// Tag bit marking the slot as holding a value. The low 32 bits carry
/// the `f32` bit pattern; a word without the tag bit reads as absent.
const PRESENT: u64 = 1 << 32;

/// An independently, atomically mutable optional `f32`.
///
/// Fresh slots hold `Some(0.0)`. All access goes through `&self`;
/// concurrent writes to the same slot resolve to last-write-wins.
/// There is no cross-slot atomicity: reading several slots does not
/// yield a consistent snapshot of the set.
#[derive(Debug)]
pub struct ParamSlot(AtomicU64);

impl ParamSlot {
    /// Create a slot holding the default value `0.0`.
    pub fn new() -> Self {
        Self(AtomicU64::new(encode(Some(0.0))))
    }

    /// Read the current value, or `None` if the slot is unset.
    pub fn get(&self) -> Option<f32> {
        decode(self.0.load(Ordering::Acquire))
    }

    /// Store a value, or clear the slot with `None`.
    pub fn set(&self, value: Option<f32>) {
        self.0.store(encode(value), Ordering::Release);
    }

    /// Clear the slot to absent.
    pub fn clear(&self) {
        self.set(None);
    }

    /// Restore the slot to its default value of `0.0`.
    pub fn reset(&self) {
        self.set(Some(0.0));
    }
}

impl Default for ParamSlot {
    fn default() -> Self {
        Self::new()
    }
}

fn encode(value: Option<f32>) -> u64 {
    match value {
        Some(v) => PRESENT | u64::from(v.to_bits()),
        None => 0,
    }
}

fn decode(word: u64) -> Option<f32> {
    ((word & PRESENT) != 0).then(|| f32::from_bits(word as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero() {
        let slot = ParamSlot::new();
        assert_eq!(slot.get(), Some(0.0));
    }

    #[test]
    fn test_set_get_clear() {
        let slot = ParamSlot::new();

        slot.set(Some(3.5));
        assert_eq!(slot.get(), Some(3.5));

        slot.set(None);
        assert_eq!(slot.get(), None);

        slot.set(Some(-1.25));
        assert_eq!(slot.get(), Some(-1.25));

        slot.clear();
        assert_eq!(slot.get(), None);
    }

    #[test]
    fn test_reset_restores_default() {
        let slot = ParamSlot::new();

        slot.set(Some(3.5));
        slot.reset();
        assert_eq!(slot.get(), Some(0.0));

        slot.clear();
        slot.reset();
        assert_eq!(slot.get(), Some(0.0));
    }

    #[test]
    fn test_zero_is_distinct_from_absent() {
        let slot = ParamSlot::new();
        slot.set(Some(0.0));
        assert_eq!(slot.get(), Some(0.0));
        slot.set(None);
        assert_eq!(slot.get(), None);
    }

    #[test]
    fn test_concurrent_set_get_no_torn_values() {
        let slot = ParamSlot::new();

        std::thread::scope(|s| {
            s.spawn(|| {
                for i in 0..10_000 {
                    if i % 2 == 0 {
                        slot.set(Some(3.5));
                    } else {
                        slot.set(None);
                    }
                }
            });
            s.spawn(|| {
                for _ in 0..10_000 {
                    // Only values actually written (or the initial
                    // default) may ever be observed.
                    let value = slot.get();
                    assert!(matches!(value, None | Some(0.0) | Some(3.5)));
                }
            });
        });
    }
}
