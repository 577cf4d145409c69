//! Run-length compressed array.
//!
//! A `RunArray<V>` presents `len()` logical positions, but stores only one
//! `(length, value)` pair per maximal run of equal adjacent values. A document
//! of tens of thousands of characters sharing a handful of styles costs a
//! handful of runs.
//!
//! Storage is two parallel [`TypedBuffer`]s, `lengths` and `values`, plus the
//! total `count` and a [`CursorCache`] remembering where the last lookup ended.
//!
//! # Invariants
//!
//! 1. `lengths.len() == values.len()`
//! 2. `count == sum(lengths)`
//! 3. Every run length is positive, and no two adjacent runs hold equal values.
//!
//! Invariant 3 is established by every constructor and preserved by every
//! mutation. Because no API can produce a non-compact array, splices only
//! merge at their two boundaries and trust the interior of their operand.
//!
//! # Complexity
//!
//! - `get` and friends: O(1) amortized for sequential access, O(runs) for random access
//! - `append`: O(1) amortized
//! - `replace`: O(runs) for the buffer shift

pub mod cursor;
pub mod iter;

use std::cell::Cell;
use std::hash::{Hash, Hasher};
use std::ops::Index;

use rustc_hash::FxHasher;
use smallvec::SmallVec;

use crate::buffer::{BufferConfig, TypedBuffer};
use crate::error::{check_index, check_range, range_end, Result};

pub use cursor::CursorCache;
pub use iter::{Elements, Runs};

/// A logical position resolved to its run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Location {
    run: usize,
    /// Logical position of the run's first element.
    start: usize,
    /// Offset of the position within the run.
    offset: usize,
}

/// The part of a run that survives a splice next to it.
#[derive(Clone, Copy, Debug)]
struct Boundary {
    run: usize,
    keep: usize,
}

/// Runs assembled for one splice, merged only where pushed with `push_merging`.
struct Pieces<V> {
    lengths: SmallVec<[usize; 4]>,
    values: SmallVec<[V; 4]>,
}

impl<V: Clone + PartialEq> Pieces<V> {
    fn with_capacity(capacity: usize) -> Pieces<V> {
        return Pieces {
            lengths: SmallVec::with_capacity(capacity),
            values: SmallVec::with_capacity(capacity),
        };
    }

    fn push(&mut self, len: usize, value: V) {
        self.lengths.push(len);
        self.values.push(value);
    }

    /// Push a run, folding it into the previous one if the values match.
    fn push_merging(&mut self, len: usize, value: V) {
        if self.values.last() == Some(&value) {
            if let Some(last) = self.lengths.last_mut() {
                *last += len;
            }
            return;
        }
        self.push(len, value);
    }

    /// Push already-compact runs; only the first may merge.
    fn push_runs(&mut self, lengths: &[usize], values: &[V]) {
        for (i, (len, value)) in lengths.iter().zip(values).enumerate() {
            if i == 0 {
                self.push_merging(*len, value.clone());
            } else {
                self.push(*len, value.clone());
            }
        }
    }
}

/// A run-length compressed array of `V`.
#[derive(Clone)]
pub struct RunArray<V> {
    lengths: TypedBuffer<usize>,
    values: TypedBuffer<V>,
    count: usize,
    cursor: Cell<CursorCache>,
}

impl<V> RunArray<V> {
    /// Create an empty array.
    pub fn new() -> RunArray<V> {
        return RunArray::from_config(BufferConfig::default());
    }

    /// Create an empty array whose buffers use `config`.
    pub fn with_config(config: BufferConfig) -> Result<RunArray<V>> {
        config.validate()?;
        return Ok(RunArray::from_config(config));
    }

    fn from_config(config: BufferConfig) -> RunArray<V> {
        return RunArray {
            lengths: TypedBuffer::from_config(config),
            values: TypedBuffer::from_config(config),
            count: 0,
            cursor: Cell::new(CursorCache::new()),
        };
    }

    /// Number of logical positions.
    #[inline]
    pub fn len(&self) -> usize {
        return self.count;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        return self.count == 0;
    }

    /// Number of stored runs.
    #[inline]
    pub fn run_count(&self) -> usize {
        return self.lengths.len();
    }

    /// Growth policy shared by both run buffers.
    pub fn config(&self) -> &BufferConfig {
        return self.lengths.config();
    }

    /// One value per run, in order.
    pub fn values(&self) -> &[V] {
        return self.values.as_slice();
    }

    /// Values of the runs overlapping `begin..end`.
    pub fn values_in(&self, begin: usize, end: usize) -> Result<&[V]> {
        check_range(begin, end, self.count)?;
        if begin == end {
            return Ok(&[][..]);
        }
        let first = self.locate(begin);
        let last = self.locate(end - 1);
        return Ok(&self.values.as_slice()[first.run..=last.run]);
    }

    /// Value at `index`.
    pub fn get(&self, index: usize) -> Result<&V> {
        check_index(index, self.count)?;
        let location = self.locate(index);
        return Ok(&self.values[location.run]);
    }

    /// Positions left in the run containing `index`, counting `index` itself.
    pub fn run_length_at(&self, index: usize) -> Result<usize> {
        check_index(index, self.count)?;
        let location = self.locate(index);
        return Ok(self.lengths[location.run] - location.offset);
    }

    /// Offset of `index` within its run.
    pub fn run_offset_at(&self, index: usize) -> Result<usize> {
        check_index(index, self.count)?;
        return Ok(self.locate(index).offset);
    }

    /// First position of the run containing `index`.
    pub fn run_start_at(&self, index: usize) -> Result<usize> {
        check_index(index, self.count)?;
        return Ok(self.locate(index).start);
    }

    /// Iterate one value per logical position.
    pub fn elements(&self) -> Elements<'_, V> {
        return Elements::new(self.lengths.as_slice(), self.values.as_slice(), 0, 0, self.count);
    }

    /// Iterate one value per logical position in `begin..end`.
    pub fn elements_in(&self, begin: usize, end: usize) -> Result<Elements<'_, V>> {
        check_range(begin, end, self.count)?;
        if begin == end {
            return Ok(Elements::new(self.lengths.as_slice(), self.values.as_slice(), 0, 0, 0));
        }
        let location = self.locate(begin);
        return Ok(Elements::new(
            self.lengths.as_slice(),
            self.values.as_slice(),
            location.run,
            location.offset,
            end - begin,
        ));
    }

    /// Iterate `(length, value)` per run.
    pub fn runs(&self) -> Runs<'_, V> {
        return Runs::new(self.lengths.as_slice(), self.values.as_slice());
    }

    /// Resolve `index` (which must be `< len()`) to its run.
    ///
    /// Scans forward from the cached run when `index` is at or past its start,
    /// otherwise from run 0, and caches the result.
    fn locate(&self, index: usize) -> Location {
        debug_assert!(index < self.count);
        let lengths = self.lengths.as_slice();
        let mut cursor = self.cursor.get();
        let (mut run, mut start) = cursor.starting_point(index, lengths.len());
        while start + lengths[run] <= index {
            start += lengths[run];
            run += 1;
        }
        cursor.update(run, start);
        self.cursor.set(cursor);
        return Location {
            run,
            start,
            offset: index - start,
        };
    }

    fn invalidate_cursor(&self) {
        let mut cursor = self.cursor.get();
        cursor.invalidate();
        self.cursor.set(cursor);
    }
}

impl<V: PartialEq> RunArray<V> {
    /// Check that run lengths are positive and adjacent values differ.
    pub fn is_compact(&self) -> bool {
        let lengths_ok = self.lengths.iter().all(|len| *len > 0);
        let values_ok = self.values.as_slice().windows(2).all(|pair| pair[0] != pair[1]);
        return lengths_ok && values_ok;
    }
}

impl<V: Clone + PartialEq> RunArray<V> {
    /// Create an array of `size` copies of `value` (a single run).
    pub fn filled(size: usize, value: V) -> RunArray<V> {
        return RunArray::filled_in(BufferConfig::default(), size, value);
    }

    /// Like [`filled`](RunArray::filled), with buffers using `config`.
    pub fn filled_with_config(config: BufferConfig, size: usize, value: V) -> Result<RunArray<V>> {
        config.validate()?;
        return Ok(RunArray::filled_in(config, size, value));
    }

    fn filled_in(config: BufferConfig, size: usize, value: V) -> RunArray<V> {
        let mut array = RunArray::from_config(config);
        if size > 0 {
            array.lengths.push(size);
            array.values.push(value);
            array.count = size;
        }
        return array;
    }

    /// Build an array from `(length, value)` runs.
    ///
    /// Zero-length runs are skipped and adjacent equal values are merged, so
    /// the result is compact whatever the input.
    pub fn from_runs<I: IntoIterator<Item = (usize, V)>>(runs: I) -> RunArray<V> {
        return RunArray::from_runs_in(BufferConfig::default(), runs);
    }

    /// Like [`from_runs`](RunArray::from_runs), with buffers using `config`.
    pub fn from_runs_with_config<I: IntoIterator<Item = (usize, V)>>(
        config: BufferConfig,
        runs: I,
    ) -> Result<RunArray<V>> {
        config.validate()?;
        return Ok(RunArray::from_runs_in(config, runs));
    }

    fn from_runs_in<I: IntoIterator<Item = (usize, V)>>(config: BufferConfig, runs: I) -> RunArray<V> {
        let mut array = RunArray::from_config(config);
        for (len, value) in runs {
            if len == 0 {
                continue;
            }
            array.push_run(len, value);
        }
        return array;
    }

    fn push_run(&mut self, len: usize, value: V) {
        if self.values.last() == Some(&value) {
            if let Some(last) = self.lengths.last_mut() {
                *last += len;
            }
        } else {
            self.lengths.push(len);
            self.values.push(value);
        }
        self.count += len;
    }

    /// Append one position holding `value`.
    ///
    /// Extends the last run when it holds an equal value. The cursor stays
    /// valid: no existing run moves.
    pub fn append(&mut self, value: V) {
        self.push_run(1, value);
    }

    /// Append every position of `other`.
    ///
    /// Merges at most once, where the two arrays meet.
    pub fn append_array(&mut self, other: &RunArray<V>) {
        if other.is_empty() {
            return;
        }
        let mut first = 0;
        if self.values.last() == other.values.first() {
            if let Some(last) = self.lengths.last_mut() {
                *last += other.lengths[0];
            }
            first = 1;
        }
        let end = self.lengths.len();
        self.lengths.splice(end, end, &other.lengths.as_slice()[first..]);
        self.values.splice(end, end, &other.values.as_slice()[first..]);
        self.count += other.count;
    }

    /// Overwrite the value at `index`.
    pub fn set(&mut self, index: usize, value: V) -> Result<()> {
        check_index(index, self.count)?;
        if self.values[self.locate(index).run] == value {
            return Ok(());
        }
        self.splice_runs(index, index + 1, &[1], std::slice::from_ref(&value), 1);
        return Ok(());
    }

    /// Insert `other` before position `offset`.
    pub fn insert(&mut self, offset: usize, other: &RunArray<V>) -> Result<()> {
        return self.replace(offset, offset, other);
    }

    /// Remove `size` positions starting at `offset`.
    pub fn remove(&mut self, offset: usize, size: usize) -> Result<()> {
        let end = range_end(offset, size, self.count)?;
        self.splice_runs(offset, end, &[], &[], 0);
        return Ok(());
    }

    /// Replace positions `begin..end` with the contents of `other`.
    ///
    /// Afterwards `len() == old_len - (end - begin) + other.len()`.
    pub fn replace(&mut self, begin: usize, end: usize, other: &RunArray<V>) -> Result<()> {
        check_range(begin, end, self.count)?;
        self.splice_runs(
            begin,
            end,
            other.lengths.as_slice(),
            other.values.as_slice(),
            other.count,
        );
        return Ok(());
    }

    /// The splice behind `replace`, `remove`, and `set`. The range must be valid
    /// and `lengths`/`values` must describe compact runs summing to `inserted`.
    ///
    /// The run holding `begin - 1` is the head; the run holding `end` is the
    /// tail. Only the part of the head before `begin` and the part of the tail
    /// from `end` on survive. The surviving head, the new runs, and the
    /// surviving tail replace every run from head to tail, merging where they
    /// meet. When head and tail are the same run it is split in two around
    /// the new runs, or absorbs them if their values match.
    fn splice_runs(&mut self, begin: usize, end: usize, lengths: &[usize], values: &[V], inserted: usize) {
        tracing::trace!(begin, end, inserted, runs = lengths.len(), "replace runs");
        if begin == end && inserted == 0 {
            return;
        }

        let head = if begin > 0 {
            let location = self.locate(begin - 1);
            Some(Boundary { run: location.run, keep: location.offset + 1 })
        } else {
            None
        };
        let tail = if end < self.count {
            let location = self.locate(end);
            Some(Boundary { run: location.run, keep: self.lengths[location.run] - location.offset })
        } else {
            None
        };

        let mut pieces = Pieces::with_capacity(lengths.len() + 2);
        let (from, to) = match (head, tail) {
            // Whole extent (or empty array): take the new runs as they are.
            (None, None) => {
                pieces.push_runs(lengths, values);
                (0, self.lengths.len())
            }
            (None, Some(tail)) => {
                pieces.push_runs(lengths, values);
                pieces.push_merging(tail.keep, self.values[tail.run].clone());
                (0, tail.run + 1)
            }
            (Some(head), None) => {
                pieces.push(head.keep, self.values[head.run].clone());
                pieces.push_runs(lengths, values);
                (head.run, self.lengths.len())
            }
            (Some(head), Some(tail)) => {
                pieces.push(head.keep, self.values[head.run].clone());
                pieces.push_runs(lengths, values);
                pieces.push_merging(tail.keep, self.values[tail.run].clone());
                (head.run, tail.run + 1)
            }
        };

        self.lengths.splice(from, to, &pieces.lengths);
        self.values.splice(from, to, &pieces.values);
        self.count = self.count - (end - begin) + inserted;
        self.invalidate_cursor();
        debug_assert!(self.is_compact());
        debug_assert_eq!(self.count, self.lengths.iter().sum::<usize>());
    }

    /// Copy positions `begin..end` into a new array.
    pub fn subarray(&self, begin: usize, end: usize) -> Result<RunArray<V>> {
        check_range(begin, end, self.count)?;
        let mut sub = RunArray::from_config(*self.lengths.config());
        if begin == end {
            return Ok(sub);
        }
        let first = self.locate(begin);
        let last = self.locate(end - 1);
        sub.lengths = self.lengths.subarray(first.run, last.run + 1)?;
        sub.values = self.values.subarray(first.run, last.run + 1)?;
        if first.run == last.run {
            sub.lengths[0] = end - begin;
        } else {
            sub.lengths[0] -= first.offset;
            let tail = sub.lengths.len() - 1;
            sub.lengths[tail] = last.offset + 1;
        }
        sub.count = end - begin;
        return Ok(sub);
    }

    /// Copy positions `begin..len()` into a new array.
    pub fn subarray_from(&self, begin: usize) -> Result<RunArray<V>> {
        return self.subarray(begin, self.count);
    }
}

impl<V: Hash> RunArray<V> {
    /// Fx hash of the run structure, consistent with `==`.
    pub fn structural_hash(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.hash(&mut hasher);
        return hasher.finish();
    }
}

impl<V> Default for RunArray<V> {
    fn default() -> Self {
        return RunArray::new();
    }
}

// The cursor is a lookup hint, not part of the value.
impl<V: PartialEq> PartialEq for RunArray<V> {
    fn eq(&self, other: &Self) -> bool {
        return self.count == other.count
            && self.lengths == other.lengths
            && self.values == other.values;
    }
}

impl<V: Eq> Eq for RunArray<V> {}

impl<V: Hash> Hash for RunArray<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.count.hash(state);
        self.lengths.hash(state);
        self.values.hash(state);
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for RunArray<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return f.debug_list().entries(self.runs()).finish();
    }
}

impl<V> Index<usize> for RunArray<V> {
    type Output = V;

    fn index(&self, index: usize) -> &V {
        match self.get(index) {
            Ok(value) => return value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<'a, V> IntoIterator for &'a RunArray<V> {
    type Item = &'a V;
    type IntoIter = Elements<'a, V>;

    fn into_iter(self) -> Elements<'a, V> {
        return self.elements();
    }
}

impl<V: Clone + PartialEq> FromIterator<V> for RunArray<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut array = RunArray::new();
        array.extend(iter);
        return array;
    }
}

impl<V: Clone + PartialEq> Extend<V> for RunArray<V> {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}
