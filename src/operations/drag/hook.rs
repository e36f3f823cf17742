use crate::plan::FloorPlan;

/// Caller-supplied overlap resolution, invoked after every mutating
/// frame and on release.
///
/// The hook may edit the plan. By convention `Some(true)` means an overlap
/// was detected or handled; the drag engine does not interpret the value.
pub trait OverlapHook {
    fn resolve(&mut self, plan: &mut FloorPlan) -> Option<bool>;
}

impl<F> OverlapHook for F
where
    F: FnMut(&mut FloorPlan) -> Option<bool>,
{
    fn resolve(&mut self, plan: &mut FloorPlan) -> Option<bool> {
        self(plan)
    }
}

/// Hook that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOverlapHook;

impl OverlapHook for NoOverlapHook {
    fn resolve(&mut self, _plan: &mut FloorPlan) -> Option<bool> {
        None
    }
}
