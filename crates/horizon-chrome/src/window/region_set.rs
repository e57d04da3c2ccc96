//! Ordered collection of hit regions.

use horizon_chrome_core::{ChromeError, RegionId, Result};
use horizon_chrome_render::{Point, Rect};

use super::region::HitRegion;

/// Hit regions in paint order.
///
/// Insertion order is paint order, bottom to top. Every point lookup walks
/// the set top-down so the topmost of several overlapping regions wins.
/// Region ids are unique.
#[derive(Debug, Clone, Default)]
pub struct RegionSet {
    regions: Vec<HitRegion>,
}

impl RegionSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a region above all existing ones.
    ///
    /// # Errors
    ///
    /// Returns [`ChromeError::DuplicateRegion`] if a region with the same id
    /// is already in the set.
    pub fn insert(&mut self, region: HitRegion) -> Result<()> {
        if self.contains_id(region.id()) {
            return Err(ChromeError::DuplicateRegion(region.id()));
        }
        self.regions.push(region);
        Ok(())
    }

    /// Number of regions.
    #[inline]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Check if the set has no regions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Check if a region with this id exists.
    pub fn contains_id(&self, id: RegionId) -> bool {
        self.regions.iter().any(|region| region.id() == id)
    }

    /// The region with this id.
    pub fn get(&self, id: RegionId) -> Option<&HitRegion> {
        self.regions.iter().find(|region| region.id() == id)
    }

    /// The region with this id, mutably.
    pub fn get_mut(&mut self, id: RegionId) -> Option<&mut HitRegion> {
        self.regions.iter_mut().find(|region| region.id() == id)
    }

    /// Regions in paint order (bottom first).
    pub fn bottom_up(&self) -> impl DoubleEndedIterator<Item = &HitRegion> {
        self.regions.iter()
    }

    /// Regions in lookup order (top first).
    pub fn top_down(&self) -> impl DoubleEndedIterator<Item = &HitRegion> {
        self.regions.iter().rev()
    }

    pub(crate) fn top_down_mut(&mut self) -> impl Iterator<Item = &mut HitRegion> {
        self.regions.iter_mut().rev()
    }

    /// The topmost region containing a client point.
    pub fn find_at(&self, point: Point) -> Option<&HitRegion> {
        self.top_down().find(|region| region.contains(point))
    }

    /// The id of the topmost region containing a client point.
    pub fn region_at(&self, point: Point) -> Option<RegionId> {
        self.find_at(point).map(HitRegion::id)
    }

    /// Replace a region's bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ChromeError::UnknownRegion`] if no region has this id.
    pub fn set_bounds(&mut self, id: RegionId, bounds: Rect) -> Result<()> {
        let region = self.get_mut(id).ok_or(ChromeError::UnknownRegion(id))?;
        region.set_bounds(bounds);
        Ok(())
    }

    /// Remove every region.
    pub fn clear(&mut self) {
        self.regions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlapping() -> RegionSet {
        let mut set = RegionSet::new();
        set.insert(HitRegion::new(RegionId::Caption).with_bounds(Rect::new(0.0, 0.0, 700.0, 47.0)))
            .unwrap();
        set.insert(HitRegion::new(RegionId::Close).with_bounds(Rect::new(656.0, 0.0, 44.0, 47.0)))
            .unwrap();
        set
    }

    #[test]
    fn test_topmost_wins() {
        let set = overlapping();
        assert_eq!(set.region_at(Point::new(660.0, 10.0)), Some(RegionId::Close));
        assert_eq!(set.region_at(Point::new(300.0, 10.0)), Some(RegionId::Caption));
        assert_eq!(set.region_at(Point::new(300.0, 100.0)), None);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut set = overlapping();
        let result = set.insert(HitRegion::new(RegionId::Close));
        assert_eq!(result, Err(ChromeError::DuplicateRegion(RegionId::Close)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_order() {
        let set = overlapping();
        let bottom_up: Vec<_> = set.bottom_up().map(HitRegion::id).collect();
        let top_down: Vec<_> = set.top_down().map(HitRegion::id).collect();
        assert_eq!(bottom_up, vec![RegionId::Caption, RegionId::Close]);
        assert_eq!(top_down, vec![RegionId::Close, RegionId::Caption]);
    }

    #[test]
    fn test_set_bounds() {
        let mut set = overlapping();
        set.set_bounds(RegionId::Close, Rect::new(0.0, 0.0, 10.0, 10.0))
            .unwrap();
        assert_eq!(set.region_at(Point::new(5.0, 5.0)), Some(RegionId::Close));

        let result = set.set_bounds(RegionId::Minimize, Rect::ZERO);
        assert_eq!(result, Err(ChromeError::UnknownRegion(RegionId::Minimize)));
    }

    #[test]
    fn test_clear() {
        let mut set = overlapping();
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.region_at(Point::new(660.0, 10.0)), None);
    }
}
