//! Infrastructure layer - chain access

pub mod cosmos;
