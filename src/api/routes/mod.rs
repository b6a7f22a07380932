//! API Routes
//!
//! Route handlers organized by functionality.

pub mod calculate;
pub mod chart;
pub mod export;
pub mod health;
