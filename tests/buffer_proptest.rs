//! Property-based tests for the typed buffer against a `Vec` model.

use proptest::prelude::*;
use proptest::sample::Index;
use runarray::{BufferConfig, TypedBuffer};

#[derive(Clone, Debug)]
enum BufferOp {
    Push(u16),
    Pop,
    Insert { at: Index, items: Vec<u16> },
    Remove { at: Index, len: Index },
    Replace { at: Index, len: Index, items: Vec<u16> },
    Set { at: Index, value: u16 },
}

fn arbitrary_op() -> impl Strategy<Value = BufferOp> {
    let items = || prop::collection::vec(any::<u16>(), 0..40);
    prop_oneof![
        any::<u16>().prop_map(BufferOp::Push),
        Just(BufferOp::Pop),
        (any::<Index>(), items()).prop_map(|(at, items)| BufferOp::Insert { at, items }),
        (any::<Index>(), any::<Index>()).prop_map(|(at, len)| BufferOp::Remove { at, len }),
        (any::<Index>(), any::<Index>(), items())
            .prop_map(|(at, len, items)| BufferOp::Replace { at, len, items }),
        (any::<Index>(), any::<u16>()).prop_map(|(at, value)| BufferOp::Set { at, value }),
    ]
}

fn apply(buffer: &mut TypedBuffer<u16>, model: &mut Vec<u16>, op: &BufferOp) {
    let len = model.len();
    match op {
        BufferOp::Push(value) => {
            buffer.push(*value);
            model.push(*value);
        }
        BufferOp::Pop => {
            assert_eq!(buffer.pop(), model.pop());
        }
        BufferOp::Insert { at, items } => {
            let at = at.index(len + 1);
            let source = TypedBuffer::from(items.clone());
            buffer.insert(at, &source, 0..items.len()).unwrap();
            model.splice(at..at, items.iter().copied());
        }
        BufferOp::Remove { at, len: size } => {
            let at = at.index(len + 1);
            let size = size.index(len - at + 1);
            buffer.remove(at, size).unwrap();
            model.drain(at..at + size);
        }
        BufferOp::Replace { at, len: size, items } => {
            let at = at.index(len + 1);
            let end = at + size.index(len - at + 1);
            let source = TypedBuffer::from(items.clone());
            buffer.replace(at, end, &source, 0..items.len()).unwrap();
            model.splice(at..end, items.iter().copied());
        }
        BufferOp::Set { at, value } => {
            if len == 0 {
                assert!(buffer.set(0, *value).is_err());
                return;
            }
            let at = at.index(len);
            buffer.set(at, *value).unwrap();
            model[at] = *value;
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Contents track the model; capacity always covers the length.
    #[test]
    fn ops_match_vec_model(ops in prop::collection::vec(arbitrary_op(), 1..60)) {
        let config = BufferConfig::new().with_initial_capacity(2).with_max_increment(16).with_min_capacity(2);
        let mut buffer = TypedBuffer::with_config(config).unwrap();
        let mut model = Vec::new();
        for op in &ops {
            apply(&mut buffer, &mut model, op);
            prop_assert_eq!(buffer.as_slice(), &model[..]);
            prop_assert!(buffer.capacity() >= buffer.len());
        }
    }

    /// Growth never overshoots by more than one step.
    #[test]
    fn growth_is_bounded(capacity in 0usize..10_000, extra in 1usize..5_000) {
        let config = BufferConfig::default();
        let required = capacity + extra;
        let grown = config.grown_capacity(capacity, required);
        prop_assert!(grown >= required);
        prop_assert!(grown <= required.max(capacity + capacity.min(config.max_increment)).max(config.min_capacity));
    }

    /// Shrinking keeps room for the contents and respects the floor.
    #[test]
    fn shrink_keeps_contents(len in 0usize..10_000, capacity in 0usize..40_000) {
        prop_assume!(len <= capacity);
        let config = BufferConfig::default();
        if let Some(shrunk) = config.shrunk_capacity(len, capacity) {
            prop_assert!(shrunk >= len);
            prop_assert!(shrunk >= config.min_capacity);
            prop_assert!(shrunk < capacity);
        }
    }

    /// A subarray is a copy of the slice.
    #[test]
    fn subarray_is_slice(v in prop::collection::vec(any::<u16>(), 0..100), a in any::<Index>(), b in any::<Index>()) {
        let x = a.index(v.len() + 1);
        let y = b.index(v.len() + 1);
        let (begin, end) = (x.min(y), x.max(y));
        let buffer = TypedBuffer::from(v.clone());
        let sub = buffer.subarray(begin, end).unwrap();
        prop_assert_eq!(sub.as_slice(), &v[begin..end]);
    }
}
