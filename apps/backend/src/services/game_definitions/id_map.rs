//! Submitted-index → stored-id bookkeeping for matching rounds.
//!
//! Choices of a matching round are inserted first, one side at a time; the
//! pairs arrive as indices into the submitted lists and are resolved through
//! these maps once both sides have ids.

use std::collections::BTreeMap;

use crate::domain::{MatchPair, Side};

/// Index → id for one side of a round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceIdMap {
    ids: BTreeMap<usize, i64>,
}

impl ChoiceIdMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the id stored for submitted index `index`.
    /// Returns the id previously recorded at that index, if any.
    pub fn record(&mut self, index: usize, id: i64) -> Option<i64> {
        self.ids.insert(index, id)
    }

    pub fn resolve(&self, index: usize) -> Option<i64> {
        self.ids.get(&index).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Both sides of one matching round.
#[derive(Debug, Clone, Default)]
pub struct RoundIdMaps {
    pub left: ChoiceIdMap,
    pub right: ChoiceIdMap,
}

impl RoundIdMaps {
    pub fn side_mut(&mut self, side: Side) -> &mut ChoiceIdMap {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Stored `(left_id, right_id)` of a pair, or the first side that
    /// has no id for its index.
    pub fn resolve_pair(&self, pair: &MatchPair) -> Result<(i64, i64), (Side, usize)> {
        let left = self
            .left
            .resolve(pair.left)
            .ok_or((Side::Left, pair.left))?;
        let right = self
            .right
            .resolve(pair.right)
            .ok_or((Side::Right, pair.right))?;
        Ok((left, right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_recorded_indices() {
        let mut map = ChoiceIdMap::new();
        assert!(map.is_empty());
        assert_eq!(map.record(0, 41), None);
        assert_eq!(map.record(1, 42), None);
        assert_eq!(map.resolve(0), Some(41));
        assert_eq!(map.resolve(1), Some(42));
        assert_eq!(map.resolve(2), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn re_recording_returns_previous_id() {
        let mut map = ChoiceIdMap::new();
        map.record(3, 10);
        assert_eq!(map.record(3, 11), Some(10));
        assert_eq!(map.resolve(3), Some(11));
    }

    #[test]
    fn pair_resolution_reports_missing_side() {
        let mut maps = RoundIdMaps::default();
        maps.side_mut(Side::Left).record(0, 100);
        maps.side_mut(Side::Right).record(0, 200);

        assert_eq!(maps.resolve_pair(&MatchPair::new(0, 0)), Ok((100, 200)));
        assert_eq!(
            maps.resolve_pair(&MatchPair::new(1, 0)),
            Err((Side::Left, 1))
        );
        assert_eq!(
            maps.resolve_pair(&MatchPair::new(0, 5)),
            Err((Side::Right, 5))
        );
    }
}
