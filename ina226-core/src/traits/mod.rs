//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and the power monitor implementation.

pub mod monitor;

pub use monitor::{Measurement, PowerMonitor};
