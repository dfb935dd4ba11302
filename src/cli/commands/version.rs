//! `curriculum version` and `curriculum dsl-version`.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::DSL_VERSION;

#[derive(Debug, Serialize)]
pub struct VersionOutput {
    pub name: &'static str,
    pub version: &'static str,
}

impl CommandOutput for VersionOutput {
    fn to_human(&self) -> String {
        self.version.to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Print the package version.
pub fn execute(json_mode: bool) -> Result<()> {
    output(
        &VersionOutput {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        },
        json_mode,
    );
    Ok(())
}

/// Print the curriculum model version.
pub fn execute_dsl(json_mode: bool) -> Result<()> {
    output(
        &VersionOutput {
            name: "dsl",
            version: DSL_VERSION,
        },
        json_mode,
    );
    Ok(())
}
