use crate::plan::{EntityId, FloorPlan};

/// Recomputes derived fields of edited entities and re-sums plan totals.
///
/// Runs after every geometry mutation so area, width and height are never
/// left stale. Missing ids are skipped.
pub struct RecomputeDerived<'a> {
    entities: &'a [EntityId],
}

impl<'a> RecomputeDerived<'a> {
    /// Creates a new `RecomputeDerived` operation.
    #[must_use]
    pub fn new(entities: &'a [EntityId]) -> Self {
        Self { entities }
    }

    /// Executes the recompute in place.
    pub fn execute(&self, plan: &mut FloorPlan) {
        for &id in self.entities {
            if let Ok(entity) = plan.entity_mut(id) {
                entity.recompute_derived();
            }
        }
        plan.refresh_totals();
    }
}
