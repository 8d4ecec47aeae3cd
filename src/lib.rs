#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

#[doc(hidden)]
macro_rules! has_any_feature {
    ($($item:item)*) => {
        $(
            #[cfg(any(doc, feature = "spsc", feature = "spmc"))]
            $item
        )*
    }
}

has_any_feature! {

// loom integration
#[doc(hidden)]
macro_rules! cfg_loom {
    ($($item:item)*) => {
        $(
            #[cfg(feature = "loom")]
            $item
        )*
    };
}
#[doc(hidden)]
macro_rules! cfg_not_loom {
    ($($item:item)*) => {
        $(
            #[cfg(not(feature = "loom"))]
            $item
        )*
    };
}

#[doc(hidden)]
mod cell;
#[doc(hidden)]
mod sync;
//loom integration finished.

#[doc(hidden)]
mod trace;

/// A module containing the error types used by the library.
pub mod error;

mod ring;
#[doc(inline)]
pub use ring::{validate_capacity, RingState};

mod producer;
#[doc(inline)]
pub use producer::Producer;

/// A lock-free Single Producer Single Consumer ring queue.
///
/// The consumer keeps its read position to itself and only touches
/// shared state to refresh its view of the producer's progress.
///
/// # Example
///
/// ```
/// use ring_qs::{spsc, Producer, RingState};
///
/// let ring = RingState::<&'static str, 8>::new();
/// std::thread::scope(|s| {
///     // SAFETY: one producer and one consumer, and the producer
///     // pushes fewer items than the ring holds.
///     let mut src = unsafe { Producer::new(&ring) };
///     let mut sink = unsafe { spsc::Consumer::new(&ring) };
///
///     s.spawn(move || {
///         for c in ["H", "E", "L", "L", "O"] {
///             src.push(c);
///         }
///     });
///     let mut str = String::new();
///     while str.len() < 5 {
///         match sink.pop() {
///             Some(s) => str.push_str(s),
///             None => {/*sophisticated back-off policy*/},
///         }
///     }
///     assert_eq!(str, "HELLO");
/// });
/// ```
#[cfg(any(doc, feature = "spsc"))]
pub mod spsc;

/// A lock-free Single Producer Multi Consumer ring queue.
///
/// Any number of consumers claim items by racing a compare-and-swap
/// on the shared read index. Each item goes to exactly one of them.
///
/// # Example
///
/// ```
/// use ring_qs::{spmc, Producer, RingState};
///
/// let ring = RingState::<u32, 16>::new();
/// // SAFETY: the only producer, and nothing is consumed concurrently
/// // with an overwrite since fewer than 16 items are pushed.
/// let mut src = unsafe { Producer::new(&ring) };
/// for i in 0..10 {
///     src.push(i);
/// }
///
/// let sink = spmc::Consumer::new(&ring);
/// let got: u32 = std::thread::scope(|s| {
///     let workers: Vec<_> = (0..3)
///         .map(|_| {
///             let mut sink = sink.clone();
///             s.spawn(move || std::iter::from_fn(|| sink.pop()).sum::<u32>())
///         })
///         .collect();
///     workers.into_iter().map(|w| w.join().unwrap()).sum()
/// });
/// assert_eq!(got, (0..10).sum());
/// ```
#[cfg(any(doc, feature = "spmc"))]
pub mod spmc;

}
