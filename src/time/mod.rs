//! Time primitives shared by the solar resolver and the interval timer.
//!
//! - [`convert`]: pure conversions between epoch timestamps, local and UTC wall
//!   clocks, and fractional solar hours
//! - [`source`]: the [`Clock`] port with system and simulated implementations

pub mod convert;
pub mod source;

pub use convert::Timestamp;
pub use source::{Clock, SimulatedClock, SystemClock};
