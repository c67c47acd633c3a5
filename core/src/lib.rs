//! Chart-data shaping core for the UK carbon-intensity forecast dashboard.
//!
//! Raw half-hourly settlement-period records from the upstream intensity API
//! are normalized into axis-aligned, chart-ready series. Every shaping step is
//! a pure function over an immutable input snapshot; the only shared state is
//! the [`session::SelectionGate`] used at the fetch boundary.

pub mod api;
pub mod catalog;
pub mod math;
pub mod prelude;
pub mod session;
pub mod shaping;
pub mod telemetry;
pub mod time;

pub use prelude::{ShapeResult, ShapingError, ShapingStage, StageConfig};
