pub mod links;
pub mod monitor;
pub mod phones;

#[cfg(test)]
pub(crate) mod testing;

pub use monitor::{Monitor, MonitorState};
