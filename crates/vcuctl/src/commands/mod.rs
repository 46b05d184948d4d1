//! Command implementations for vcuctl

pub mod check;
pub mod replay;
pub mod thresholds;
