//! Horizontal domain markers and interval resolution.
//!
//! The horizontal index space of each element kind is laid out so that
//! lateral-boundary elements come first, then the nudging zone, the
//! interior, and finally the halo. Five ordered markers partition it;
//! stencil blocks name a half-open interval between two markers and the
//! engine resolves it to a concrete index range per location.

use crate::error::MeshError;
use std::fmt;
use std::ops::Range;

/// A named boundary offset partitioning the horizontal index space.
///
/// Markers are ordered; the region `[position(m), position(next(m)))`
/// holds the elements of the zone starting at `m`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Marker {
    /// Start of the lateral boundary rows (index 0 in practice).
    LateralBoundary,
    /// Start of the nudging zone.
    Nudging,
    /// Start of the prognostic interior.
    Interior,
    /// Start of the halo rows.
    Halo,
    /// One past the last element.
    End,
}

impl Marker {
    /// All markers, in partition order.
    pub const ALL: [Marker; 5] = [
        Marker::LateralBoundary,
        Marker::Nudging,
        Marker::Interior,
        Marker::Halo,
        Marker::End,
    ];

    /// Position of this marker in [`Marker::ALL`].
    pub fn rank(self) -> usize {
        match self {
            Self::LateralBoundary => 0,
            Self::Nudging => 1,
            Self::Interior => 2,
            Self::Halo => 3,
            Self::End => 4,
        }
    }

    /// Lowercase name, as used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::LateralBoundary => "lateral_boundary",
            Self::Nudging => "nudging",
            Self::Interior => "interior",
            Self::Halo => "halo",
            Self::End => "end",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A half-open interval between two markers (`across[lo:hi]`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DomainInterval {
    /// Marker at which iteration starts.
    pub lo: Marker,
    /// Marker at which iteration stops (exclusive).
    pub hi: Marker,
}

impl DomainInterval {
    /// Construct an interval from two markers.
    pub const fn new(lo: Marker, hi: Marker) -> Self {
        Self { lo, hi }
    }

    /// The full horizontal range, lateral boundary to end.
    pub const fn full() -> Self {
        Self {
            lo: Marker::LateralBoundary,
            hi: Marker::End,
        }
    }

    /// Whether `lo` precedes or equals `hi` in marker order.
    pub fn is_ordered(self) -> bool {
        self.lo.rank() <= self.hi.rank()
    }
}

impl fmt::Display for DomainInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}]", self.lo, self.hi)
    }
}

/// The five marker positions for one element kind.
///
/// Positions are absolute element indices, monotone non-decreasing.
/// Each location of a mesh carries its own `HorizontalDomain`; the same
/// [`DomainInterval`] resolves to different index ranges on vertices,
/// cells, and edges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HorizontalDomain {
    positions: [u32; 5],
}

impl HorizontalDomain {
    /// Build a domain from the five marker positions.
    ///
    /// Returns [`MeshError::InvalidMarkers`] if the positions are not
    /// monotone non-decreasing.
    pub fn new(
        lateral_boundary: u32,
        nudging: u32,
        interior: u32,
        halo: u32,
        end: u32,
    ) -> Result<Self, MeshError> {
        let positions = [lateral_boundary, nudging, interior, halo, end];
        for w in positions.windows(2) {
            if w[0] > w[1] {
                return Err(MeshError::InvalidMarkers {
                    reason: format!("positions must be non-decreasing, got {positions:?}"),
                });
            }
        }
        Ok(Self { positions })
    }

    /// A degenerate domain covering `0..count` with every zone collapsed:
    /// `nudging..halo` spans the whole range.
    ///
    /// This is the default for meshes without measured splitter indices.
    pub fn full_range(count: u32) -> Self {
        Self {
            positions: [0, 0, 0, count, count],
        }
    }

    /// Place the nudging, interior, and halo markers at fractions of the
    /// element count.
    ///
    /// Fractions must satisfy `0 <= nudging <= interior <= halo <= 1`.
    pub fn from_fractions(
        count: u32,
        nudging: f64,
        interior: f64,
        halo: f64,
    ) -> Result<Self, MeshError> {
        if !(0.0..=1.0).contains(&nudging) || nudging > interior || interior > halo || halo > 1.0 {
            return Err(MeshError::InvalidMarkers {
                reason: format!(
                    "fractions must be ordered within [0, 1], got ({nudging}, {interior}, {halo})"
                ),
            });
        }
        let at = |f: f64| (f * count as f64).round() as u32;
        Self::new(0, at(nudging), at(interior), at(halo), count)
    }

    /// Absolute position of a marker.
    pub fn position(&self, marker: Marker) -> u32 {
        self.positions[marker.rank()]
    }

    /// Position of the end marker (the element count the domain covers).
    pub fn end(&self) -> u32 {
        self.positions[4]
    }

    /// Resolve an interval to a concrete index range.
    ///
    /// A reversed interval (`hi` before `lo`) resolves to an empty range
    /// starting at `lo`'s position; stencil validation rejects reversed
    /// intervals before execution, so this is a belt for direct callers.
    pub fn resolve(&self, interval: DomainInterval) -> Range<u32> {
        let lo = self.position(interval.lo);
        let hi = self.position(interval.hi).max(lo);
        lo..hi
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_rejects_reordered_markers() {
        assert!(HorizontalDomain::new(0, 1000, 2000, 3000, 4000).is_ok());
        let err = HorizontalDomain::new(0, 2000, 1000, 3000, 4000).unwrap_err();
        assert!(matches!(err, MeshError::InvalidMarkers { .. }));
    }

    #[test]
    fn resolve_between_markers() {
        let dom = HorizontalDomain::new(0, 1000, 2000, 3000, 4000).unwrap();
        let r = dom.resolve(DomainInterval::new(Marker::Nudging, Marker::Halo));
        assert_eq!(r, 1000..3000);
        assert_eq!(dom.resolve(DomainInterval::full()), 0..4000);
    }

    #[test]
    fn full_range_spans_everything_between_nudging_and_halo() {
        let dom = HorizontalDomain::full_range(17);
        let r = dom.resolve(DomainInterval::new(Marker::Nudging, Marker::Halo));
        assert_eq!(r, 0..17);
        assert_eq!(dom.end(), 17);
    }

    #[test]
    fn reversed_interval_is_empty() {
        let dom = HorizontalDomain::new(0, 1000, 2000, 3000, 4000).unwrap();
        let r = dom.resolve(DomainInterval::new(Marker::Halo, Marker::Nudging));
        assert!(r.is_empty());
    }

    #[test]
    fn from_fractions_places_markers() {
        let dom = HorizontalDomain::from_fractions(100, 0.1, 0.5, 0.9).unwrap();
        assert_eq!(dom.position(Marker::Nudging), 10);
        assert_eq!(dom.position(Marker::Interior), 50);
        assert_eq!(dom.position(Marker::Halo), 90);
        assert_eq!(dom.end(), 100);
        assert!(HorizontalDomain::from_fractions(100, 0.5, 0.1, 0.9).is_err());
    }

    fn arb_markers() -> impl Strategy<Value = [u32; 5]> {
        prop::collection::vec(0u32..10_000, 5).prop_map(|mut v| {
            v.sort_unstable();
            [v[0], v[1], v[2], v[3], v[4]]
        })
    }

    proptest! {
        #[test]
        fn sorted_markers_always_valid(m in arb_markers()) {
            prop_assert!(HorizontalDomain::new(m[0], m[1], m[2], m[3], m[4]).is_ok());
        }

        #[test]
        fn resolved_ranges_nest_within_full(m in arb_markers()) {
            let dom = HorizontalDomain::new(m[0], m[1], m[2], m[3], m[4]).unwrap();
            let full = dom.resolve(DomainInterval::full());
            for lo in Marker::ALL {
                for hi in Marker::ALL {
                    let r = dom.resolve(DomainInterval::new(lo, hi));
                    prop_assert!(r.start >= full.start);
                    prop_assert!(r.end <= full.end);
                    prop_assert!(r.start <= r.end);
                }
            }
        }
    }
}
