//! Iterators over a [`RunArray`](super::RunArray).

use std::iter::FusedIterator;

/// Yields one value per logical position, in index order.
///
/// Created by [`RunArray::elements`](super::RunArray::elements) and
/// [`RunArray::elements_in`](super::RunArray::elements_in).
#[derive(Clone, Debug)]
pub struct Elements<'a, V> {
    lengths: &'a [usize],
    values: &'a [V],
    run: usize,
    /// Positions left in `run`.
    left_in_run: usize,
    /// Positions left overall.
    remaining: usize,
}

impl<'a, V> Elements<'a, V> {
    /// Start at `offset` within `run`, yielding `remaining` positions.
    pub(crate) fn new(
        lengths: &'a [usize],
        values: &'a [V],
        run: usize,
        offset: usize,
        remaining: usize,
    ) -> Elements<'a, V> {
        let left_in_run = match lengths.get(run) {
            Some(len) => len - offset,
            None => 0,
        };
        return Elements {
            lengths,
            values,
            run,
            left_in_run,
            remaining,
        };
    }
}

impl<'a, V> Iterator for Elements<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        if self.remaining == 0 {
            return None;
        }
        while self.left_in_run == 0 {
            self.run += 1;
            self.left_in_run = self.lengths[self.run];
        }
        self.left_in_run -= 1;
        self.remaining -= 1;
        return Some(&self.values[self.run]);
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        return (self.remaining, Some(self.remaining));
    }
}

impl<V> ExactSizeIterator for Elements<'_, V> {}

impl<V> FusedIterator for Elements<'_, V> {}

/// Yields `(length, value)` for each run, in order.
///
/// Created by [`RunArray::runs`](super::RunArray::runs).
#[derive(Clone, Debug)]
pub struct Runs<'a, V> {
    inner: std::iter::Zip<std::slice::Iter<'a, usize>, std::slice::Iter<'a, V>>,
}

impl<'a, V> Runs<'a, V> {
    pub(crate) fn new(lengths: &'a [usize], values: &'a [V]) -> Runs<'a, V> {
        return Runs {
            inner: lengths.iter().zip(values.iter()),
        };
    }
}

impl<'a, V> Iterator for Runs<'a, V> {
    type Item = (usize, &'a V);

    #[inline]
    fn next(&mut self) -> Option<(usize, &'a V)> {
        return self.inner.next().map(|(len, value)| (*len, value));
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        return self.inner.size_hint();
    }
}

impl<V> DoubleEndedIterator for Runs<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        return self.inner.next_back().map(|(len, value)| (*len, value));
    }
}

impl<V> ExactSizeIterator for Runs<'_, V> {}

impl<V> FusedIterator for Runs<'_, V> {}
