use crate::ring::RingState;
use crate::sync::atomic::Ordering::{Acquire, Relaxed};
use crate::trace::trace;

/// One of any number of reading ends of a [`RingState`].
///
/// Consumers compete for items: every published item is returned by
/// exactly one [`pop`](Consumer::pop) across all consumers of the ring.
/// Cloning a consumer gives a new, independent one.
pub struct Consumer<'a, T, const N: usize> {
    ring: &'a RingState<T, N>,
}

/// What a single `pop` call knows about the published slots.
///
/// `write` was loaded when the shared read index was `base`, so every
/// position from `base` up to (excluding) `write` was published then.
/// Other consumers may since have moved the read index past `write`,
/// so a plain equality check isn't enough. Indices are masked, so the
/// window only means something until the read index laps the ring:
/// it never outlives the call that loaded it.
struct WriteWindow {
    base: usize,
    write: usize,
}

impl WriteWindow {
    /// A window covering nothing, forcing a load of the write index.
    #[inline]
    fn closed_at(pos: usize) -> Self {
        Self {
            base: pos,
            write: pos,
        }
    }

    #[inline]
    fn covers(&self, pos: usize, mask: usize) -> bool {
        pos.wrapping_sub(self.base) & mask < self.write.wrapping_sub(self.base) & mask
    }
}

impl<'a, T, const N: usize> Consumer<'a, T, N> {
    /// Binds a new consumer to `ring`.
    pub fn new(ring: &'a RingState<T, N>) -> Self {
        trace!(capacity = N, "spmc consumer bound");
        Self { ring }
    }

    /// Claims the next item and takes it out of the ring without blocking.
    ///
    /// Returns `None` if every published item was already claimed.
    /// Retries while other consumers win the claim, so it's lock-free
    /// but not wait-free.
    pub fn pop(&mut self) -> Option<T> {
        let mask = RingState::<T, N>::MASK;
        let mut head = self.ring.read_index.load(Relaxed);
        let mut window = WriteWindow::closed_at(head);

        loop {
            if !window.covers(head, mask) {
                let write = self.ring.write_index.load(Acquire);
                window = WriteWindow { base: head, write };
                if head == write {
                    return None;
                }
            }

            match self.ring.read_index.compare_exchange_weak(
                head,
                (head + 1) & mask,
                Acquire,
                Relaxed,
            ) {
                /*SAFETY:
                 *head is masked, the window shows it was published to us
                 *and the successful CAS makes the slot ours alone.
                 */
                Ok(_) => return unsafe { self.ring.take(head) },
                Err(current) => head = current,
            }
        }
    }
}

impl<'a, T, const N: usize> Clone for Consumer<'a, T, N> {
    fn clone(&self) -> Self {
        Self::new(self.ring)
    }
}
