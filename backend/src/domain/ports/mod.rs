//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod user_registry;

#[cfg(test)]
pub use user_registry::MockUserRegistry;
pub use user_registry::{UserRegistry, UserRegistryError};
