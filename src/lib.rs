pub mod model;

pub use crate::model::config::AppConfig;
pub use crate::model::world::World;
