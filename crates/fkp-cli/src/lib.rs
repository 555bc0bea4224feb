//! CLI library components for the 4klang patch transpiler.

pub mod logging;
