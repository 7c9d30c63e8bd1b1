//! Common traits and the error type for the tagged heap
//!
//! - [`Priority`]: keys the heap can order, with a reserved bottom value
//! - [`Value`]: payloads that carry their own tag and key
//! - [`HeapError`]: failures reported by the fallible heap operations

use std::fmt::Debug;
use std::hash::Hash;

use thiserror::Error;

/// Error type for heap operations
///
/// Every failed call leaves the heap exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// The tag is already present (on insert, or in both heaps on union)
    #[error("duplicate tag is not allowed")]
    DuplicateTag,
    /// No live entry carries the tag
    #[error("tag is not found in the heap")]
    TagNotFound,
    /// The caller passed the reserved negative-infinity key
    #[error("negative infinity key is reserved for internal usage")]
    ReservedKey,
    /// decrease_key got a key that is not smaller, or increase_key got a key that is not larger
    #[error("new key does not move in the requested direction")]
    InvalidKeyOrder,
    /// The key cannot be ordered against other keys (NaN)
    #[error("key has no position in the total order")]
    UnorderedKey,
}

/// Keys usable as heap priorities
///
/// A priority domain is `(NEG_INFINITY, +inf]`. `NEG_INFINITY` is never
/// accepted from callers: the heap uses it internally to push an entry to
/// the top before removing it.
///
/// # Example
///
/// ```rust
/// use tagged_fibonacci_heap::Priority;
///
/// assert!(f64::NEG_INFINITY.is_neg_infinity());
/// assert!(i32::MIN.is_neg_infinity());
/// assert!(!f64::NAN.is_ordered());
/// ```
pub trait Priority: Copy + PartialOrd + Debug {
    /// The reserved bottom of the domain
    const NEG_INFINITY: Self;

    /// Returns true if this is the reserved bottom value
    fn is_neg_infinity(&self) -> bool;

    /// Returns false for values that compare unordered with everything (NaN)
    fn is_ordered(&self) -> bool {
        true
    }
}

macro_rules! impl_priority_float {
    ($($t:ty),+) => {
        $(
            impl Priority for $t {
                const NEG_INFINITY: Self = <$t>::NEG_INFINITY;

                #[inline]
                fn is_neg_infinity(&self) -> bool {
                    *self == <$t>::NEG_INFINITY
                }

                #[inline]
                fn is_ordered(&self) -> bool {
                    !self.is_nan()
                }
            }
        )+
    };
}

macro_rules! impl_priority_signed {
    ($($t:ty),+) => {
        $(
            impl Priority for $t {
                const NEG_INFINITY: Self = <$t>::MIN;

                #[inline]
                fn is_neg_infinity(&self) -> bool {
                    *self == <$t>::MIN
                }
            }
        )+
    };
}

impl_priority_float!(f32, f64);
impl_priority_signed!(i8, i16, i32, i64, i128, isize);

/// Payloads that know their own tag and key
///
/// Implementing this lets a payload be handed to the heap directly with
/// [`insert_value`](crate::FibHeap::insert_value) and the other `*_value`
/// methods instead of passing tag and key separately.
///
/// # Example
///
/// ```rust
/// use tagged_fibonacci_heap::{FibHeap, Value};
///
/// #[derive(Debug, PartialEq)]
/// struct Job {
///     id: u32,
///     deadline: f64,
/// }
///
/// impl Value for Job {
///     type Tag = u32;
///     type Key = f64;
///
///     fn tag(&self) -> u32 {
///         self.id
///     }
///
///     fn key(&self) -> f64 {
///         self.deadline
///     }
/// }
///
/// let mut heap = FibHeap::new();
/// heap.insert_value(Job { id: 7, deadline: 3.5 }).unwrap();
/// heap.insert_value(Job { id: 9, deadline: 1.0 }).unwrap();
/// assert_eq!(heap.minimum_value(), Some(&Job { id: 9, deadline: 1.0 }));
/// ```
pub trait Value {
    /// Unique identifier type
    type Tag: Hash + Eq + Clone;
    /// Priority type
    type Key: Priority;

    /// Returns the tag used in the index
    fn tag(&self) -> Self::Tag;

    /// Returns the priority of the value
    fn key(&self) -> Self::Key;
}
