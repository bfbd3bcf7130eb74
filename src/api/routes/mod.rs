//! API Routes
//!
//! Route handlers organized by functionality.

pub mod countries;
pub mod dashboard;
pub mod health;
pub mod page;
pub mod series;
pub mod totals;
