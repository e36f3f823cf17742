mod containment;
mod derived;

pub use containment::{FixturesInside, RoomAt};
pub use derived::RecomputeDerived;
