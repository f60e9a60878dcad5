//! View model: sections, routes and the view state reducer

mod route;
mod section;
mod state;

pub use route::Route;
pub use section::Section;
pub use state::{reduce, Action, ViewState};
