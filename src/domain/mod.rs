//! Domain layer - pool model and filtering rules

pub mod pool;
