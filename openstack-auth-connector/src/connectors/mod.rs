//! Connector implementations

#[cfg(feature = "openstack-cli")]
mod openstack_cli;

#[cfg(feature = "openstack-cli")]
pub use openstack_cli::OpenstackCliConnector;
