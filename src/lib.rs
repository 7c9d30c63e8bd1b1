//! Tagged Fibonacci Heap
//!
//! A Fibonacci heap whose entries are addressed by a caller-supplied unique
//! tag. An index from tag to node replaces the handles a plain Fibonacci heap
//! hands out, so decrease-key, increase-key, delete and lookups all take the
//! tag directly.
//!
//! # Complexity
//!
//! | Operation                    | Complexity          |
//! |------------------------------|---------------------|
//! | `insert`                     | O(1)                |
//! | `minimum`, `get`             | O(1)                |
//! | `extract_min`                | O(log n) amortized  |
//! | `decrease_key`               | O(1) amortized      |
//! | `increase_key`               | O(log n) amortized  |
//! | `delete`, `extract_tag`      | O(log n) amortized  |
//! | `union`                      | O(m), m = other.len() |
//!
//! # Keys
//!
//! Keys implement [`Priority`]. The bottom of each key domain
//! (`f64::NEG_INFINITY`, `i32::MIN`, ...) is reserved for the heap's own
//! removal path and rejected on input, as is NaN.
//!
//! # Example
//!
//! ```rust
//! use tagged_fibonacci_heap::{FibHeap, HeapError};
//!
//! let mut heap = FibHeap::new();
//! heap.insert("io", 3.0, ()).unwrap();
//! heap.insert("net", 7.5, ()).unwrap();
//! heap.insert("cpu", 1.25, ()).unwrap();
//!
//! heap.increase_key("cpu", 9.0).unwrap();
//! assert_eq!(heap.decrease_key("net", 8.0), Err(HeapError::InvalidKeyOrder));
//! assert_eq!(heap.minimum(), Some((&"io", &3.0, &())));
//!
//! heap.delete("io").unwrap();
//! assert_eq!(heap.extract_min(), Some(("net", 7.5, ())));
//! ```
//!
//! Heaps are single-threaded values: every mutation takes `&mut self`, so
//! sharing one between threads requires external locking.

pub mod fibonacci;
mod inspect;
mod storage;
pub mod traits;

pub use fibonacci::FibHeap;
pub use traits::{HeapError, Priority, Value};
