use std::error::Error;
use std::fmt;

/// Error returned by [`validate_capacity`](crate::validate_capacity).
///
/// A ring's capacity has to be a non-zero power of two, so slot
/// indices can wrap with a mask. [`RingState`](crate::RingState)
/// rejects other capacities at compile time; this error is the
/// runtime answer for the same check.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct CapacityError {
    /// The rejected capacity.
    pub capacity: usize,
}

impl Error for CapacityError {}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ring capacity {} is not a non-zero power of two",
            self.capacity
        )
    }
}
