pub mod face;
pub mod list;
pub mod lookup;
pub mod render;
