#[cfg(feature = "loom")]
use loom::cell::UnsafeCell;
#[cfg(not(feature = "loom"))]
use std::cell::UnsafeCell;

/// One ring slot: an item or nothing, accessed without synchronisation.
///
/// Who may touch a slot, and when, is decided by the ring's indices.
/// Under loom every access is tracked, so a protocol bug shows up as a
/// model failure instead of a silent race.
pub(crate) struct Slot<T>(UnsafeCell<Option<T>>);

impl<T> Slot<T> {
    pub(crate) fn empty() -> Self {
        Self(UnsafeCell::new(None))
    }

    #[inline(always)]
    fn with_mut<R>(&self, f: impl FnOnce(*mut Option<T>) -> R) -> R {
        #[cfg(feature = "loom")]
        return self.0.with_mut(f);
        #[cfg(not(feature = "loom"))]
        return f(self.0.get());
    }

    /// Stores `make()`, dropping the previous occupant.
    ///
    /// # Safety
    ///
    /// No other thread may access the slot during the call.
    #[inline]
    pub(crate) unsafe fn put(&self, make: impl FnOnce() -> T) {
        // The safety of this write is guaranteed by the caller.
        self.with_mut(|ptr| unsafe { *ptr = Some(make()) })
    }

    /// Moves the occupant out, leaving the slot empty.
    ///
    /// # Safety
    ///
    /// No other thread may access the slot during the call.
    #[inline]
    pub(crate) unsafe fn take(&self) -> Option<T> {
        // The safety of this read is guaranteed by the caller.
        self.with_mut(|ptr| unsafe { (*ptr).take() })
    }
}
