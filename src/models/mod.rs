// src/models/mod.rs
pub mod replacement;
pub mod schedule;
pub mod student;
pub mod user;
