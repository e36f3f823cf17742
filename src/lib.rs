//! Floor-plan editing kernel: room and fixture geometry, a drag/resize
//! gesture engine, two-click drawing tools and mitered wall synthesis.

pub mod error;
pub mod math;
pub mod operations;
pub mod plan;
pub mod view;

pub use error::{PlanError, Result};
pub use math::Point;
pub use plan::{FloorPlan, FloorPlanData, FloorPlanEntity, Outline};
pub use view::{Bounds, ScreenPoint, ScreenTransform};
