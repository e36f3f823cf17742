pub mod drag;
pub mod drawing;
pub mod edit;
pub mod query;
pub mod walls;
