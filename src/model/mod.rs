pub mod animal;
pub mod config;
pub mod error;
pub mod events;
pub mod grid;
pub mod plant;
pub mod rng;
pub mod stats;
pub mod terrain;
pub mod world;
