//! Test utilities and fixture meshes for Floe development.
//!
//! Provides mock implementations of the field access traits, small
//! meshes with hand-checkable connectivity, and deterministic random
//! field initialization.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::HashMap;

use floe_core::{FieldId, FieldReader, FieldWriter};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

pub mod fixtures;

pub use fixtures::{small_equilateral, twin_triangle_mesh};

/// Mock implementation of [`FieldReader`].
///
/// Backed by a `HashMap<FieldId, Vec<f64>>` for flexible test setup.
/// Pre-populate fields with [`set_field`](MockFieldReader::set_field)
/// before passing to code under test.
#[derive(Default)]
pub struct MockFieldReader {
    fields: HashMap<FieldId, Vec<f64>>,
}

impl MockFieldReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a field with data for testing.
    pub fn set_field(&mut self, field: FieldId, data: Vec<f64>) {
        self.fields.insert(field, data);
    }
}

impl FieldReader for MockFieldReader {
    fn read(&self, field: FieldId) -> Option<&[f64]> {
        self.fields.get(&field).map(|v| v.as_slice())
    }
}

/// Mock implementation of [`FieldWriter`].
///
/// Pre-allocate buffers with [`add_field`](MockFieldWriter::add_field),
/// pass to code under test, then inspect results with
/// [`get_field`](MockFieldWriter::get_field).
#[derive(Default)]
pub struct MockFieldWriter {
    fields: HashMap<FieldId, Vec<f64>>,
}

impl MockFieldWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate a field buffer with the given size, initialized to zero.
    pub fn add_field(&mut self, field: FieldId, size: usize) {
        self.fields.insert(field, vec![0.0; size]);
    }

    /// Read back the current field data for test assertions.
    pub fn get_field(&self, field: FieldId) -> Option<&[f64]> {
        self.fields.get(&field).map(|v| v.as_slice())
    }
}

impl FieldWriter for MockFieldWriter {
    fn write(&mut self, field: FieldId) -> Option<&mut [f64]> {
        self.fields.get_mut(&field).map(|v| v.as_mut_slice())
    }
}

/// Fill a buffer with uniform values in `[0, 1)` from a seeded ChaCha8
/// stream.
///
/// Identical seeds produce identical buffers on every platform, keeping
/// equivalence tests and benchmark inputs reproducible.
pub fn fill_random(buf: &mut [f64], seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for v in buf.iter_mut() {
        *v = rng.random_range(0.0..1.0);
    }
}
