//! Compressed-sparse-row neighbor tables.

/// A neighbor table in compressed-sparse-row form.
///
/// Row `i` holds the neighbor indices of target element `i`, in a
/// deterministic, mesh-defined order. Rows may have different lengths
/// (boundary elements have fewer neighbors); an empty row is valid and
/// reductions over it yield the sum identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrTable {
    offsets: Vec<u32>,
    targets: Vec<u32>,
}

impl CsrTable {
    /// Build a table from per-element neighbor rows.
    ///
    /// Accepts any row type that derefs to `[u32]` (`Vec`, `SmallVec`,
    /// arrays), so generators can assemble rows without heap churn.
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Self {
        let mut offsets = Vec::with_capacity(rows.len() + 1);
        let mut targets = Vec::new();
        offsets.push(0);
        for row in rows {
            targets.extend_from_slice(row.as_ref());
            offsets.push(targets.len() as u32);
        }
        Self { offsets, targets }
    }

    /// Number of rows (target elements).
    pub fn row_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Total number of stored neighbor entries.
    pub fn entry_count(&self) -> usize {
        self.targets.len()
    }

    /// The neighbor indices of target element `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= row_count()`.
    pub fn row(&self, i: u32) -> &[u32] {
        let lo = self.offsets[i as usize] as usize;
        let hi = self.offsets[i as usize + 1] as usize;
        &self.targets[lo..hi]
    }

    /// Length of the longest row.
    pub fn max_row_len(&self) -> usize {
        self.offsets
            .windows(2)
            .map(|w| (w[1] - w[0]) as usize)
            .max()
            .unwrap_or(0)
    }

    /// The largest neighbor index stored, or `None` for an all-empty table.
    ///
    /// Builders use this to check that every entry indexes a valid source
    /// element.
    pub fn max_entry(&self) -> Option<u32> {
        self.targets.iter().copied().max()
    }

    /// Iterate over all rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> + '_ {
        (0..self.row_count() as u32).map(move |i| self.row(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn from_rows_round_trips() {
        let table = CsrTable::from_rows(&[vec![1, 2], vec![], vec![0]]);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.entry_count(), 3);
        assert_eq!(table.row(0), &[1, 2]);
        assert_eq!(table.row(1), &[] as &[u32]);
        assert_eq!(table.row(2), &[0]);
        assert_eq!(table.max_row_len(), 2);
        assert_eq!(table.max_entry(), Some(2));
    }

    #[test]
    fn empty_table() {
        let table = CsrTable::from_rows::<Vec<u32>>(&[]);
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.max_row_len(), 0);
        assert_eq!(table.max_entry(), None);
    }

    proptest! {
        #[test]
        fn rows_survive_compression(
            rows in prop::collection::vec(prop::collection::vec(0u32..1000, 0..8), 0..32)
        ) {
            let table = CsrTable::from_rows(&rows);
            prop_assert_eq!(table.row_count(), rows.len());
            for (i, row) in rows.iter().enumerate() {
                prop_assert_eq!(table.row(i as u32), row.as_slice());
            }
            prop_assert_eq!(table.entry_count(), rows.iter().map(Vec::len).sum::<usize>());
        }
    }
}
