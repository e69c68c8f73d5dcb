//! Host-facing data types

mod module_args;
mod report;

pub use module_args::{MODULE_ARGS_KEY, parse_module_args};
pub use report::{AuthFacts, ModuleReport};
