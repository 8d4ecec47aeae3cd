use crate::ring::RingState;
use crate::sync::atomic::Ordering::{Relaxed, Release};
use crate::trace::trace;
use crossbeam_utils::CachePadded;

/// The writing end of a [`RingState`], shared by both queue flavors.
///
/// [`push`](Self::push) and [`emplace`](Self::emplace) never block and
/// never fail. They don't check for free space either: see
/// [overwrite on overrun](RingState#overwrite-on-overrun).
pub struct Producer<'a, T, const N: usize> {
    ring: &'a RingState<T, N>,
    /// Next slot to write. Kept here so publishing is a plain store.
    write_pos: CachePadded<usize>,
}

impl<'a, T, const N: usize> Producer<'a, T, N> {
    /// Binds a producer to `ring`, resuming at its published write index.
    ///
    /// # Safety
    ///
    /// - No other `Producer` may be bound to `ring` while this one lives.
    ///   Handing the ring over to a later producer on another thread
    ///   needs the usual synchronisation, e.g. a `join`.
    /// - The producer must not overwrite a slot that a consumer on
    ///   another thread may still be reading. In practice: keep fewer
    ///   than `N` unconsumed items in the ring while consumers run
    ///   concurrently. Overruns without concurrent consumers are fine.
    /// - The ring must not be lapped under a stalled multi consumer:
    ///   while one [`spmc::Consumer::pop`](crate::spmc::Consumer::pop)
    ///   call is in progress, no more than `N - 1` items may be pushed.
    ///   Its claim compares masked indices, so a read index that came
    ///   all the way around would look unchanged.
    pub unsafe fn new(ring: &'a RingState<T, N>) -> Self {
        let write_pos = ring.write_index.load(Relaxed);
        trace!(capacity = N, write_pos, "producer bound");
        Self {
            ring,
            write_pos: CachePadded::new(write_pos),
        }
    }

    /// Writes `item` into the next slot and publishes it.
    ///
    /// If the slot still holds an unconsumed item, that item is dropped.
    #[inline]
    pub fn push(&mut self, item: T) {
        self.emplace(move || item)
    }

    /// Builds an item with `make` straight into the next slot and publishes it.
    ///
    /// If `make` panics, nothing is published.
    #[inline]
    pub fn emplace<F>(&mut self, make: F)
    where
        F: FnOnce() -> T,
    {
        let pos = *self.write_pos;
        /*SAFETY:
         *write_pos is always masked. We're the only producer (Self::new),
         *consumers only touch published slots and the caller keeps them
         *off this one (no concurrent overrun).
         */
        unsafe { self.ring.fill(pos, make) };
        let next = (pos + 1) & RingState::<T, N>::MASK;
        *self.write_pos = next;
        self.ring.write_index.store(next, Release);
    }

    /// Returns the ring this producer writes to.
    #[inline]
    pub fn ring(&self) -> &'a RingState<T, N> {
        self.ring
    }
}
