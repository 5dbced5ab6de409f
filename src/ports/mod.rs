//! Port traits between the domain and its collaborators.

pub mod config_port;
pub mod event_port;
pub mod report_port;
