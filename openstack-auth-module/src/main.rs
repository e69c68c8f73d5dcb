//! OpenStack auth module entry point
//!
//! Reads the module arguments, authenticates through the `openstack` client
//! and prints the JSON report on stdout. Logs go to stderr.

mod input;

use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use openstack_auth_connector::{ConnectorKind, describe_auth_types};
use openstack_auth_core::{
    AuthModuleService, ConnectorBootstrapService, InMemoryConnectorRegistry, ModuleReport,
    parse_module_args,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Prints the requirement tables of every auth type instead of running.
const DESCRIBE_FLAG: &str = "--describe-auth-types";

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing to stderr (stdout carries the report)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let arg = std::env::args_os().nth(1);
    if arg.as_deref() == Some(OsStr::new(DESCRIBE_FLAG)) {
        return match serde_json::to_string_pretty(&describe_auth_types()) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!("Failed to render auth types: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let report = run(arg.map(PathBuf::from)).await;
    emit(&report)
}

async fn run(args_path: Option<PathBuf>) -> ModuleReport {
    let raw = match input::read_args(args_path.as_deref()) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!("{e:#}");
            return ModuleReport::failed(format!("{e:#}"), None);
        }
    };
    let params = match parse_module_args(&raw) {
        Ok(params) => params,
        Err(e) => {
            tracing::warn!("{e}");
            return ModuleReport::failed(e.to_string(), None);
        }
    };

    let registry = Arc::new(InMemoryConnectorRegistry::new());
    if !params.check_mode() {
        ConnectorBootstrapService::new(registry.clone())
            .load_default(ConnectorKind::OpenstackCli)
            .await;
    }

    AuthModuleService::new(registry).run(&params).await
}

fn emit(report: &ModuleReport) -> ExitCode {
    match serde_json::to_string(report) {
        Ok(json) => {
            println!("{json}");
            ExitCode::from(report.exit_code())
        }
        Err(e) => {
            tracing::error!("Failed to serialize report: {e}");
            ExitCode::FAILURE
        }
    }
}
