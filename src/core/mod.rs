// Shared core utilities

pub mod math;
