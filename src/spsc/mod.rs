use crate::ring::RingState;
use crate::sync::atomic::Ordering::Acquire;
use crate::trace::trace;
use crossbeam_utils::CachePadded;

/// The only reading end of a [`RingState`].
///
/// Created with [`Consumer::new`], items are read with [`pop`](Consumer::pop).
pub struct Consumer<'a, T, const N: usize> {
    ring: &'a RingState<T, N>,
    local: CachePadded<ReadState>,
}

struct ReadState {
    read_pos: usize,
    /// Last observed value of the ring's write index.
    write_cache: usize,
}

impl<'a, T, const N: usize> Consumer<'a, T, N> {
    /// Binds the consumer to `ring`, starting at slot 0.
    ///
    /// # Safety
    ///
    /// No other consumer, of either flavor, may be bound to `ring`
    /// while this one lives.
    pub unsafe fn new(ring: &'a RingState<T, N>) -> Self {
        trace!(capacity = N, "spsc consumer bound");
        Self {
            ring,
            local: CachePadded::new(ReadState {
                read_pos: 0,
                write_cache: 0,
            }),
        }
    }

    /// Takes the next item out of the ring without blocking.
    ///
    /// Returns `None` if nothing was published since the last item.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        let local = &mut *self.local;
        let head = local.read_pos;

        if head == local.write_cache {
            local.write_cache = self.ring.write_index.load(Acquire);
            if head == local.write_cache {
                return None;
            }
        }

        /*SAFETY:
         *read_pos is always masked. The acquire load above saw the
         *producer publish past head, and we're the only consumer.
         */
        let item = unsafe { self.ring.take(head) };
        local.read_pos = (head + 1) & RingState::<T, N>::MASK;
        item
    }
}

#[cfg(test)]
mod tests;
