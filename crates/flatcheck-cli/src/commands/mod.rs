//! Command implementations.

pub mod catalog;
pub mod check;
pub mod groups;
