//! Dense field storage over a mesh.

use floe_core::{FieldDef, FieldId, FieldReader, FieldWriter, VerticalExtent};
use floe_mesh::Mesh;

#[derive(Debug, Clone)]
struct Buffer {
    data: Vec<f64>,
    element_count: usize,
    extent: VerticalExtent,
}

/// Dense `f64` buffers for every field of a catalog, allocated against a
/// mesh and a level count.
///
/// Surface fields hold `element_count` values. Column fields hold
/// `num_levels * element_count` values in **level-major** order: the
/// value of element `i` at level `k` sits at `k * element_count + i`, so
/// each level is one contiguous slice.
///
/// Buffers are zero-initialized; [`FieldId`] indexes the catalog the
/// store was built from.
#[derive(Debug, Clone)]
pub struct FieldStore {
    buffers: Vec<Buffer>,
    num_levels: u32,
}

impl FieldStore {
    /// Allocate zeroed buffers for every field in the catalog.
    pub fn new(fields: &[FieldDef], mesh: &dyn Mesh, num_levels: u32) -> Self {
        let buffers = fields
            .iter()
            .map(|def| {
                let element_count = mesh.element_count(def.location);
                let len = match def.extent {
                    VerticalExtent::Surface => element_count,
                    VerticalExtent::Column => element_count * num_levels as usize,
                };
                Buffer {
                    data: vec![0.0; len],
                    element_count,
                    extent: def.extent,
                }
            })
            .collect();
        Self {
            buffers,
            num_levels,
        }
    }

    /// Number of vertical levels column fields span.
    pub fn num_levels(&self) -> u32 {
        self.num_levels
    }

    /// Number of registered fields.
    pub fn field_count(&self) -> usize {
        self.buffers.len()
    }

    /// Horizontal element count of a field's buffer.
    pub fn element_count(&self, field: FieldId) -> Option<usize> {
        self.buffers.get(field.0 as usize).map(|b| b.element_count)
    }

    /// Vertical extent of a field's buffer.
    pub fn extent(&self, field: FieldId) -> Option<VerticalExtent> {
        self.buffers.get(field.0 as usize).map(|b| b.extent)
    }

    /// Read one value.
    ///
    /// For surface fields the level is ignored. Returns `None` for an
    /// unknown field or an out-of-range index.
    pub fn sample(&self, field: FieldId, element: u32, level: u32) -> Option<f64> {
        let buf = self.buffers.get(field.0 as usize)?;
        let idx = match buf.extent {
            VerticalExtent::Surface => element as usize,
            VerticalExtent::Column => level as usize * buf.element_count + element as usize,
        };
        buf.data.get(idx).copied()
    }

    /// The contiguous slice of one level of a column field, or the whole
    /// buffer of a surface field.
    pub fn level_slice(&self, field: FieldId, level: u32) -> Option<&[f64]> {
        let buf = self.buffers.get(field.0 as usize)?;
        match buf.extent {
            VerticalExtent::Surface => Some(&buf.data[..]),
            VerticalExtent::Column => {
                let lo = level as usize * buf.element_count;
                buf.data.get(lo..lo + buf.element_count)
            }
        }
    }
}

impl FieldReader for FieldStore {
    fn read(&self, field: FieldId) -> Option<&[f64]> {
        self.buffers.get(field.0 as usize).map(|b| b.data.as_slice())
    }
}

impl FieldWriter for FieldStore {
    fn write(&mut self, field: FieldId) -> Option<&mut [f64]> {
        self.buffers
            .get_mut(field.0 as usize)
            .map(|b| b.data.as_mut_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floe_core::Location;
    use floe_mesh::equilateral_mesh;
    use proptest::prelude::*;

    fn catalog() -> Vec<FieldDef> {
        vec![
            FieldDef::column("theta_v", Location::Cell),
            FieldDef::surface("inv_len", Location::Vertex),
        ]
    }

    #[test]
    fn allocation_sizes() {
        let mesh = equilateral_mesh(3, 3).unwrap();
        let store = FieldStore::new(&catalog(), &mesh, 4);
        // 8 cells * 4 levels
        assert_eq!(store.read(FieldId(0)).unwrap().len(), 32);
        // 9 vertices, level-independent
        assert_eq!(store.read(FieldId(1)).unwrap().len(), 9);
        assert_eq!(store.element_count(FieldId(0)), Some(8));
        assert_eq!(store.extent(FieldId(1)), Some(VerticalExtent::Surface));
        assert!(store.read(FieldId(2)).is_none());
    }

    #[test]
    fn surface_fields_ignore_level() {
        let mesh = equilateral_mesh(3, 3).unwrap();
        let mut store = FieldStore::new(&catalog(), &mesh, 4);
        store.write(FieldId(1)).unwrap()[2] = 7.5;
        assert_eq!(store.sample(FieldId(1), 2, 0), Some(7.5));
        assert_eq!(store.sample(FieldId(1), 2, 3), Some(7.5));
    }

    #[test]
    fn level_slice_of_column_field() {
        let mesh = equilateral_mesh(3, 3).unwrap();
        let mut store = FieldStore::new(&catalog(), &mesh, 2);
        let buf = store.write(FieldId(0)).unwrap();
        for (i, v) in buf.iter_mut().enumerate() {
            *v = i as f64;
        }
        let level1 = store.level_slice(FieldId(0), 1).unwrap();
        assert_eq!(level1[0], 8.0);
        assert_eq!(level1.len(), 8);
        assert!(store.level_slice(FieldId(0), 2).is_none());
    }

    proptest! {
        #[test]
        fn sample_agrees_with_level_major_layout(
            element in 0u32..8,
            level in 0u32..5,
        ) {
            let mesh = equilateral_mesh(3, 3).unwrap();
            let mut store = FieldStore::new(&catalog(), &mesh, 5);
            let count = store.element_count(FieldId(0)).unwrap();
            let buf = store.write(FieldId(0)).unwrap();
            for (i, v) in buf.iter_mut().enumerate() {
                *v = i as f64;
            }
            let expected = (level as usize * count + element as usize) as f64;
            prop_assert_eq!(store.sample(FieldId(0), element, level), Some(expected));
        }
    }
}
