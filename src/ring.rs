use crate::cell::Slot;
use crate::error::CapacityError;
use crate::sync::atomic::AtomicUsize;
use crate::sync::atomic::Ordering::Relaxed;
use crate::trace::debug;
use crossbeam_utils::CachePadded;
use std::fmt;

/// Checks that `capacity` can be used as the capacity of a [`RingState`].
///
/// Returns the capacity back if it's a non-zero power of two.
///
/// ```
/// use ring_qs::validate_capacity;
///
/// assert_eq!(validate_capacity(64), Ok(64));
/// assert!(validate_capacity(48).is_err());
/// ```
pub const fn validate_capacity(capacity: usize) -> Result<usize, CapacityError> {
    if capacity.is_power_of_two() {
        Ok(capacity)
    } else {
        Err(CapacityError { capacity })
    }
}

/// The state shared by a [`Producer`](crate::Producer) and its consumers.
///
/// Holds `N` slots and two indices, each on its own cache line. `N` must
/// be a non-zero power of two, which is checked when [`new`](Self::new)
/// is instantiated:
///
/// ```compile_fail
/// let _ = ring_qs::RingState::<u8, 12>::new();
/// ```
///
/// # Overwrite on overrun
///
/// The producer never looks at the consumers' progress. Pushing into a
/// ring that already holds `N - 1` unconsumed items silently replaces
/// the oldest of them, and a ring holding `N` items reads as empty.
/// Size `N` for the worst case backlog, or throttle the producer from
/// the outside.
pub struct RingState<T, const N: usize> {
    /// The slot the producer writes next. Published after the write.
    pub(crate) write_index: CachePadded<AtomicUsize>,
    /// The next slot to claim. Only the multi consumer protocol uses it.
    pub(crate) read_index: CachePadded<AtomicUsize>,
    buffer: Box<[Slot<T>]>,
}

impl<T, const N: usize> RingState<T, N> {
    const CAPACITY_CHECK: () = match validate_capacity(N) {
        Ok(_) => (),
        Err(_) => panic!("RingState capacity must be a non-zero power of two"),
    };

    pub(crate) const MASK: usize = N.wrapping_sub(1);

    /// Creates a ring with every slot empty and both indices at zero.
    pub fn new() -> Self {
        let () = Self::CAPACITY_CHECK;
        debug!(
            capacity = N,
            slot_size = std::mem::size_of::<Option<T>>(),
            "allocating ring state"
        );
        Self {
            write_index: CachePadded::new(AtomicUsize::new(0)),
            read_index: CachePadded::new(AtomicUsize::new(0)),
            buffer: (0..N).map(|_| Slot::empty()).collect(),
        }
    }

    /// Returns the number of slots in the ring.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Replaces the occupant of slot `pos` with `make()`.
    ///
    /// # Safety
    ///
    /// `pos` is masked, the caller is the ring's only producer and
    /// no consumer is accessing the slot.
    #[inline]
    pub(crate) unsafe fn fill(&self, pos: usize, make: impl FnOnce() -> T) {
        debug_assert_eq!(pos & Self::MASK, pos, "unmasked slot index");
        /*SAFETY:
         *pos & MASK is in [0, N) and buffer.len() == N.
         */
        let slot = unsafe { self.buffer.get_unchecked(pos) };
        /*SAFETY:
         *the caller guarantees exclusive access to the slot.
         *The previous occupant, if any, is dropped here.
         */
        unsafe { slot.put(make) }
    }

    /// Moves the item out of slot `pos`, leaving it empty.
    ///
    /// # Safety
    ///
    /// `pos` is masked and the caller has exclusive access to the slot:
    /// its write was published to the caller and no one else claimed it.
    #[inline]
    pub(crate) unsafe fn take(&self, pos: usize) -> Option<T> {
        debug_assert_eq!(pos & Self::MASK, pos, "unmasked slot index");
        /*SAFETY:
         *pos & MASK is in [0, N) and buffer.len() == N.
         */
        let slot = unsafe { self.buffer.get_unchecked(pos) };
        /*SAFETY:
         *the caller guarantees exclusive access to the slot.
         */
        unsafe { slot.take() }
    }
}

impl<T, const N: usize> Default for RingState<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> fmt::Debug for RingState<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingState")
            .field("capacity", &N)
            .field("write_index", &self.write_index.load(Relaxed))
            .field("read_index", &self.read_index.load(Relaxed))
            .finish_non_exhaustive()
    }
}

/*SAFETY:
 *slots are only accessed through Producer and the consumers,
 *whose contracts hand each slot to one thread at a time.
 */
unsafe impl<T: Send, const N: usize> Send for RingState<T, N> {}
unsafe impl<T: Send, const N: usize> Sync for RingState<T, N> {}
