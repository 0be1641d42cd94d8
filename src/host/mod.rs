//! Host-facing command contract and stdio bridge for frontend integration.

pub mod contract;
pub mod handler;
pub mod stdio;
