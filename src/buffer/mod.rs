//! Growable typed buffer.
//!
//! A `TypedBuffer<T>` is an index-addressable, contiguous buffer with an
//! explicit capacity policy (see [`BufferConfig`]). It knows nothing about
//! runs; [`RunArray`](crate::run::RunArray) keeps two of them in parallel.
//!
//! Bulk operations (`insert`, `remove`, `replace`) validate every range
//! before moving any element, so a failed call leaves the buffer untouched.

pub mod config;

use std::ops::{Index, IndexMut, Range};

use crate::error::{check_index, check_range, range_end, Result};
use crate::sort::{quicksort_slice, Comparer};

pub use config::BufferConfig;

/// A growable buffer of `T` with amortized O(1) push.
#[derive(Clone)]
pub struct TypedBuffer<T> {
    storage: Vec<T>,
    /// Logical capacity; the policy decides it, `storage` reserves at least this.
    capacity: usize,
    config: BufferConfig,
}

impl<T> TypedBuffer<T> {
    /// Create an empty buffer with the default policy.
    pub fn new() -> TypedBuffer<T> {
        return TypedBuffer::from_config(BufferConfig::default());
    }

    /// Create an empty buffer with room for at least `capacity` elements.
    pub fn with_capacity(capacity: usize) -> TypedBuffer<T> {
        return TypedBuffer::from_config(BufferConfig::default().with_initial_capacity(capacity));
    }

    /// Create an empty buffer with a custom policy.
    pub fn with_config(config: BufferConfig) -> Result<TypedBuffer<T>> {
        config.validate()?;
        return Ok(TypedBuffer::from_config(config));
    }

    pub(crate) fn from_config(config: BufferConfig) -> TypedBuffer<T> {
        return TypedBuffer {
            storage: Vec::with_capacity(config.initial_capacity),
            capacity: config.initial_capacity,
            config,
        };
    }

    #[inline]
    pub fn len(&self) -> usize {
        return self.storage.len();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        return self.storage.is_empty();
    }

    /// Number of elements the buffer can hold before it must grow.
    #[inline]
    pub fn capacity(&self) -> usize {
        return self.capacity;
    }

    pub fn config(&self) -> &BufferConfig {
        return &self.config;
    }

    /// Grow so that at least `required` elements fit.
    pub fn ensure_capacity(&mut self, required: usize) {
        if required <= self.capacity {
            return;
        }
        let new_capacity = self.config.grown_capacity(self.capacity, required);
        tracing::trace!(old = self.capacity, new = new_capacity, "grow buffer");
        self.storage.reserve_exact(new_capacity - self.storage.len());
        self.capacity = new_capacity;
    }

    /// Give memory back if the buffer is mostly empty.
    fn shrink_if_underused(&mut self) {
        if let Some(new_capacity) = self.config.shrunk_capacity(self.len(), self.capacity) {
            tracing::trace!(old = self.capacity, new = new_capacity, "shrink buffer");
            self.storage.shrink_to(new_capacity);
            self.capacity = new_capacity;
        }
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        check_index(index, self.len())?;
        return Ok(&self.storage[index]);
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        check_index(index, self.len())?;
        return Ok(&mut self.storage[index]);
    }

    /// Overwrite the element at `index`.
    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        check_index(index, self.len())?;
        self.storage[index] = value;
        return Ok(());
    }

    pub fn first(&self) -> Option<&T> {
        return self.storage.first();
    }

    pub fn last(&self) -> Option<&T> {
        return self.storage.last();
    }

    pub fn last_mut(&mut self) -> Option<&mut T> {
        return self.storage.last_mut();
    }

    /// Append one element, growing by the policy if full.
    pub fn push(&mut self, value: T) {
        self.ensure_capacity(self.len() + 1);
        self.storage.push(value);
    }

    pub fn pop(&mut self) -> Option<T> {
        let value = self.storage.pop();
        if value.is_some() {
            self.shrink_if_underused();
        }
        return value;
    }

    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        check_index(a, self.len())?;
        check_index(b, self.len())?;
        self.storage.swap(a, b);
        return Ok(());
    }

    /// Remove `size` elements starting at `offset`.
    pub fn remove(&mut self, offset: usize, size: usize) -> Result<()> {
        let end = range_end(offset, size, self.len())?;
        if size == 0 {
            return Ok(());
        }
        self.storage.drain(offset..end);
        self.shrink_if_underused();
        return Ok(());
    }

    pub fn truncate(&mut self, len: usize) {
        if len >= self.len() {
            return;
        }
        self.storage.truncate(len);
        self.shrink_if_underused();
    }

    pub fn clear(&mut self) {
        self.truncate(0);
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        return &self.storage;
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        return &mut self.storage;
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        return self.storage.iter();
    }

    /// Sort the whole buffer in place with `comparer`. Not stable.
    pub fn sort_by_comparer<C: Comparer<T>>(&mut self, comparer: &C) {
        quicksort_slice(self.as_mut_slice(), comparer);
    }
}

impl<T: Clone> TypedBuffer<T> {
    /// Insert `other[range]` before `offset`.
    pub fn insert(&mut self, offset: usize, other: &TypedBuffer<T>, range: Range<usize>) -> Result<()> {
        return self.replace(offset, offset, other, range);
    }

    /// Replace `self[begin..end]` with `other[other_range]`.
    pub fn replace(
        &mut self,
        begin: usize,
        end: usize,
        other: &TypedBuffer<T>,
        other_range: Range<usize>,
    ) -> Result<()> {
        check_range(begin, end, self.len())?;
        check_range(other_range.start, other_range.end, other.len())?;
        self.splice(begin, end, &other.storage[other_range]);
        return Ok(());
    }

    /// Replace `self[begin..end]` with a copy of `items`. Ranges must be valid.
    pub(crate) fn splice(&mut self, begin: usize, end: usize, items: &[T]) {
        let old_len = self.len();
        let new_len = old_len - (end - begin) + items.len();
        self.ensure_capacity(new_len);
        self.storage.splice(begin..end, items.iter().cloned());
        if new_len < old_len {
            self.shrink_if_underused();
        }
    }

    /// Append a copy of every element of `other`.
    pub fn extend_from(&mut self, other: &TypedBuffer<T>) {
        self.ensure_capacity(self.len() + other.len());
        self.storage.extend_from_slice(&other.storage);
    }

    /// Copy `self[begin..end]` into a new buffer with the same policy.
    pub fn subarray(&self, begin: usize, end: usize) -> Result<TypedBuffer<T>> {
        check_range(begin, end, self.len())?;
        let mut sub = TypedBuffer::from_config(self.config);
        sub.ensure_capacity(end - begin);
        sub.storage.extend_from_slice(&self.storage[begin..end]);
        return Ok(sub);
    }
}

impl<T> Default for TypedBuffer<T> {
    fn default() -> Self {
        return TypedBuffer::new();
    }
}

impl<T> From<Vec<T>> for TypedBuffer<T> {
    fn from(storage: Vec<T>) -> Self {
        let config = BufferConfig::default();
        let capacity = storage.len().max(config.initial_capacity);
        let mut buffer = TypedBuffer { storage, capacity: 0, config };
        buffer.storage.reserve_exact(capacity - buffer.storage.len());
        buffer.capacity = capacity;
        return buffer;
    }
}

impl<T> FromIterator<T> for TypedBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        return TypedBuffer::from(iter.into_iter().collect::<Vec<T>>());
    }
}

impl<T> Index<usize> for TypedBuffer<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        return &self.storage[index];
    }
}

impl<T> IndexMut<usize> for TypedBuffer<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        return &mut self.storage[index];
    }
}

impl<'a, T> IntoIterator for &'a TypedBuffer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        return self.storage.iter();
    }
}

// Capacity and policy are not part of a buffer's value.
impl<T: PartialEq> PartialEq for TypedBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        return self.storage == other.storage;
    }
}

impl<T: Eq> Eq for TypedBuffer<T> {}

impl<T: std::hash::Hash> std::hash::Hash for TypedBuffer<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.storage.hash(state);
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for TypedBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return f.debug_list().entries(self.storage.iter()).finish();
    }
}
