// src/models/mod.rs

pub mod profile_update;
pub mod topic;
pub mod user;
