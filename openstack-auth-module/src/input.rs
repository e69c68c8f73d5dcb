//! Module argument input
//!
//! The host passes the path of a JSON args file as the first argument; without
//! one the arguments are read from stdin.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

/// Reads the raw module arguments from `path`, or stdin when `None`.
pub fn read_args(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read module arguments from {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read module arguments from stdin")?;
            Ok(buf)
        }
    }
}
