pub mod directions;
pub mod fare_engine;
pub mod infrastructure;
pub mod narrator;
