//! Single-shot connect dispatch and result normalization.

use std::any::Any;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error as _;
use std::panic::{self, AssertUnwindSafe};

use crate::error::ConnectorError;
use crate::traits::{Connection, Connector};
use crate::types::{AuthCredential, ConnectResult, ConnectionConfig, ServiceCatalog};
use crate::utils::log_sanitizer::truncate_for_log;

/// Calls `connector.connect` once and folds the outcome into a
/// [`ConnectResult`].
///
/// - a connect error becomes `Failure` with the error text and no trace;
///   this includes [`ConnectorError::SdkUnavailable`] raised while starting
///   the SDK, whose text keeps the "Failed to load the required library"
///   wording;
/// - a failure (or panic) while reading `auth_token` / `service_catalog`
///   becomes `Failure` with a diagnostic trace attached.
pub async fn dispatch(
    config: &ConnectionConfig,
    credential: &AuthCredential,
    connector: &dyn Connector,
) -> ConnectResult {
    log::debug!(
        "Dispatching connect via '{}' (region={}, interface={}, verify={})",
        connector.id(),
        config.region_name,
        config.interface,
        config.verify
    );

    let connection = match connector.connect(config, credential).await {
        Ok(connection) => connection,
        Err(e) => {
            let rendered = truncate_for_log(&e.to_string());
            if e.is_expected() {
                log::warn!("[{}] connect rejected: {rendered}", connector.id());
            } else {
                log::error!("[{}] connect failed: {rendered}", connector.id());
            }
            return ConnectResult::Failure {
                message: e.to_string(),
                diagnostic_trace: None,
            };
        }
    };

    match read_connection(connection.as_ref()) {
        Ok((auth_token, service_catalog)) => {
            log::debug!(
                "[{}] connected, catalog has {} services",
                connector.id(),
                service_catalog.len()
            );
            ConnectResult::Success {
                auth_token,
                service_catalog,
            }
        }
        Err((message, trace)) => {
            log::error!("[{}] reading connection failed: {message}", connector.id());
            ConnectResult::Failure {
                message,
                diagnostic_trace: Some(trace),
            }
        }
    }
}

/// Reads both fields off the handle, converting errors and panics into a
/// `(message, trace)` pair.
fn read_connection(
    connection: &dyn Connection,
) -> Result<(String, ServiceCatalog), (String, String)> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let auth_token = connection.auth_token()?;
        let service_catalog = connection.service_catalog()?;
        Ok::<_, ConnectorError>((auth_token, service_catalog))
    }));

    match outcome {
        Ok(Ok(fields)) => Ok(fields),
        Ok(Err(e)) => {
            let trace = error_trace(&e);
            Err((e.to_string(), trace))
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            let trace = format!("panic while reading connection: {message}");
            Err((message, with_backtrace(trace)))
        }
    }
}

/// Renders the error, its source chain and (if enabled) a backtrace.
fn error_trace(error: &ConnectorError) -> String {
    let mut trace = format!("{error:?}");
    let mut source = error.source();
    while let Some(cause) = source {
        trace.push_str(&format!("\ncaused by: {cause}"));
        source = cause.source();
    }
    with_backtrace(trace)
}

fn with_backtrace(mut trace: String) -> String {
    let backtrace = Backtrace::capture();
    if backtrace.status() == BacktraceStatus::Captured {
        trace.push_str(&format!("\nbacktrace:\n{backtrace}"));
    }
    trace
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
