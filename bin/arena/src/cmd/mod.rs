//! Command implementations.

pub mod check;
pub mod serve;
pub mod sitemap;
