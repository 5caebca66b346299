//! Application-level orchestration between the terminal UI and the backend.
//!
//! The UI thread owns all controller state; this module only performs the
//! remote calls it asks for and hands the results back.

mod controller;

pub(crate) use controller::{run_controller, AppEvent, Request, UiCommand};
