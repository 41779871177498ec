// src/services/mod.rs

pub mod merge;
pub mod performance;
pub mod profile;
