// src/core/mod.rs

pub mod json;
pub mod net;
pub mod when;
