mod database;
mod state_builder;

pub use database::connect_and_migrate;
pub use state_builder::{PortSet, build_app_state, build_postgres_ports};
#[cfg(test)]
pub(crate) use state_builder::state_from_ports;
