//! Runarray - compact per-character attribute storage for rich text.
//!
//! A document of tens of thousands of characters usually carries only a
//! handful of distinct styles. [`RunArray`] stores such a sequence as
//! `(length, value)` runs while answering random access, range, and splice
//! queries as if it were a flat array. [`TypedBuffer`] is the growable buffer
//! underneath, and [`sort`] orders index lists kept in one.
//!
//! # Quick Start
//!
//! ```
//! use runarray::RunArray;
//!
//! // Ten characters, all plain.
//! let mut styles = RunArray::filled(10, "plain");
//!
//! // Make characters 2..5 bold.
//! styles.replace(2, 5, &RunArray::filled(3, "bold")).unwrap();
//! assert_eq!(styles.get(3), Ok(&"bold"));
//! assert_eq!(styles.run_count(), 3);
//!
//! // Un-bold them again; the runs merge back into one.
//! styles.replace(2, 5, &RunArray::filled(3, "plain")).unwrap();
//! assert_eq!(styles.run_count(), 1);
//! ```

pub mod buffer;
pub mod error;
pub mod run;
pub mod sort;

pub use buffer::{BufferConfig, TypedBuffer};
pub use error::{Error, Result};
pub use run::RunArray;
pub use sort::{quicksort, quicksort_slice, Comparer};
