//! Presentation: an explicit session state machine and a pure render from that state to a view
//! model, plus HTML and plain-text renderers of the view model.

pub mod chart;
pub mod html;
pub mod render;
pub mod state;
pub mod text;

pub use render::{render, report_view, Screen};
pub use state::{Session, SubmitError, ViewState};
