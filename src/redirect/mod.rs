pub mod dispatch;
pub mod gate;
pub mod marker;
pub mod scope;
pub mod timeout;

pub use gate::{Decision, decide};
pub use scope::{RequestContext, is_eligible};
pub use timeout::{TimeoutUnit, convert};
