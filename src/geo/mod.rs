//! Location model and solar event resolution.
//!
//! ## Module Structure
//!
//! - [`coordinate`]: sign-and-digits decomposition of a coordinate for editing, with
//!   axis bound clamping
//! - [`location`]: the stored latitude/longitude pair, its packed register layout,
//!   and the [`LocationStore`] port
//! - [`solar`]: the day-level rise/set algorithm port and a `sunrise`-crate backed
//!   implementation with polar day/night detection
//! - [`resolver`]: picks the next rise or set in local time, rolling over to the next
//!   day when today's events have passed
//! - [`query`]: owned state of the sunrise/sunset face (pages, edit cursor, commit)

pub mod coordinate;
pub mod location;
pub mod query;
pub mod resolver;
pub mod solar;

pub use coordinate::{Axis, Digit, EditableCoordinate};
pub use location::{BackupRegister, Location, LocationStore};
pub use query::{EditSummary, Page, SolarEventQuery};
pub use resolver::{EventFocus, SolarEventResolver, SolarReport};
pub use solar::{SolarAlgorithm, SolarDayResult, SolarEventKind, SolarStatus, SunriseSolver};
