//! Render job planning and dispatch.
//!
//! The planner filters the scanned catalog down to the parts that still
//! need rendering and prepares their output directories. The dispatcher
//! then runs one external render process per job, strictly one at a
//! time.

mod dispatch;
mod planner;
mod types;

pub use dispatch::{DispatchError, DispatchResult, Dispatcher};
pub use planner::{plan_jobs, PlanError, PlanResult};
pub use types::RenderJob;

/// The only category the planner ever renders.
pub const TARGET_CATEGORY: &str = "Brick";
