//! AFL Fuzz harness for RunArray
//!
//! This harness checks a run array against a flat `Vec` model:
//! 1. Contents: every position holds the same value as the model
//! 2. Length: `len()` matches the model and the sum of run lengths
//! 3. Compactness: no zero-length runs, no adjacent equal values
//!
//! Model: a single document whose attribute values are small integers. Edits
//! are decoded from the input bytes and applied to both representations.

use afl::fuzz;
use runarray::RunArray;

/// Number of distinct attribute values. Small, so merges happen often.
const NUM_VALUES: u8 = 4;

/// Operation types the fuzzer can generate
#[derive(Debug, Clone, Copy)]
enum FuzzOp {
    /// Replace a range with a run of a single value
    Replace { pos_frac: u8, len: u8, value: u8, count: u8 },
    /// Remove a range
    Remove { pos_frac: u8, len: u8 },
    /// Overwrite one position
    Set { pos_frac: u8, value: u8 },
    /// Append one position
    Append { value: u8 },
    /// Re-insert a copy of a sub-range at another position
    CopyPaste { from_frac: u8, len: u8, to_frac: u8 },
}

impl FuzzOp {
    fn from_bytes(bytes: &[u8]) -> Option<(FuzzOp, &[u8])> {
        if bytes.is_empty() {
            return None;
        }

        let op_type = bytes[0] % 5;
        let rest = &bytes[1..];

        match op_type {
            0 if rest.len() >= 4 => {
                let op = FuzzOp::Replace {
                    pos_frac: rest[0],
                    len: rest[1] % 16,
                    value: rest[2] % NUM_VALUES,
                    count: rest[3] % 16,
                };
                Some((op, &rest[4..]))
            }
            1 if rest.len() >= 2 => {
                let op = FuzzOp::Remove {
                    pos_frac: rest[0],
                    len: rest[1] % 16,
                };
                Some((op, &rest[2..]))
            }
            2 if rest.len() >= 2 => {
                let op = FuzzOp::Set {
                    pos_frac: rest[0],
                    value: rest[1] % NUM_VALUES,
                };
                Some((op, &rest[2..]))
            }
            3 if !rest.is_empty() => {
                let op = FuzzOp::Append { value: rest[0] % NUM_VALUES };
                Some((op, &rest[1..]))
            }
            4 if rest.len() >= 3 => {
                let op = FuzzOp::CopyPaste {
                    from_frac: rest[0],
                    len: rest[1] % 32,
                    to_frac: rest[2],
                };
                Some((op, &rest[3..]))
            }
            _ => None,
        }
    }
}

/// Scale a fraction byte to a position in `0..=len`.
fn position(frac: u8, len: usize) -> usize {
    return (frac as usize * len / 255).min(len);
}

fn check(array: &RunArray<u8>, model: &[u8]) {
    assert_eq!(array.len(), model.len(), "Length mismatch");
    assert!(array.is_compact(), "Adjacent equal runs: {:?}", array);
    let total: usize = array.runs().map(|(len, _)| len).sum();
    assert_eq!(total, model.len(), "Run lengths do not sum to len()");
    let flat: Vec<u8> = array.elements().copied().collect();
    assert_eq!(flat, model, "Content mismatch");
}

fn main() {
    fuzz!(|data: &[u8]| {
        let mut array: RunArray<u8> = RunArray::new();
        let mut model: Vec<u8> = Vec::new();
        let mut remaining = data;

        while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
            remaining = rest;

            match op {
                FuzzOp::Replace { pos_frac, len, value, count } => {
                    let begin = position(pos_frac, model.len());
                    let end = (begin + len as usize).min(model.len());
                    let replacement = RunArray::filled(count as usize, value);
                    array.replace(begin, end, &replacement).expect("valid range");
                    model.splice(begin..end, std::iter::repeat_n(value, count as usize));
                }

                FuzzOp::Remove { pos_frac, len } => {
                    let begin = position(pos_frac, model.len());
                    let size = (len as usize).min(model.len() - begin);
                    array.remove(begin, size).expect("valid range");
                    model.drain(begin..begin + size);
                }

                FuzzOp::Set { pos_frac, value } => {
                    if model.is_empty() {
                        continue;
                    }
                    let index = position(pos_frac, model.len() - 1);
                    array.set(index, value).expect("valid index");
                    model[index] = value;
                }

                FuzzOp::Append { value } => {
                    array.append(value);
                    model.push(value);
                }

                FuzzOp::CopyPaste { from_frac, len, to_frac } => {
                    let begin = position(from_frac, model.len());
                    let end = (begin + len as usize).min(model.len());
                    let copied = array.subarray(begin, end).expect("valid range");
                    let to = position(to_frac, model.len());
                    array.insert(to, &copied).expect("valid offset");
                    let piece: Vec<u8> = model[begin..end].to_vec();
                    model.splice(to..to, piece);
                }
            }

            check(&array, &model);
        }

        // Splicing a copy of itself back in must be a no-op.
        let copy = array.clone();
        let mid = model.len() / 2;
        let sub = array.subarray(mid, model.len()).expect("valid range");
        array.replace(mid, model.len(), &sub).expect("valid range");
        assert_eq!(array, copy, "Self-splice changed the array");
        assert_eq!(array.structural_hash(), copy.structural_hash(), "Hash mismatch");
    });
}
