// src/lib.rs

#[macro_use]
pub mod macros;

pub mod core;

pub mod data;
pub mod error;
pub mod export;
pub mod fetch;
pub mod filter;
pub mod normalize;
pub mod params;
pub mod session;
