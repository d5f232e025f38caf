//! Command Handlers

mod consult_handler;

pub use consult_handler::{ConsultConfig, ConsultHandler};
