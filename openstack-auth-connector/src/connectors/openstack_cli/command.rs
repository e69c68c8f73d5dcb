//! Rendering and execution of `openstack` client invocations.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Output;

use crate::error::{ConnectorError, Result};
use crate::types::{AuthCredential, ConnectionConfig};
use crate::utils::log_sanitizer::truncate_for_log;

use super::{LIBRARY, connector::CONNECTOR_ID};

/// Prefix of the environment variables read by the client.
const ENV_PREFIX: &str = "OS_";

/// `OS_*` variables that locate `clouds.yaml`/`secure.yaml` rather than
/// carry credentials; they stay visible to the client.
const CONFIG_LOCATORS: &[&str] = &["OS_CLIENT_CONFIG_FILE", "OS_CLIENT_SECURE_FILE"];

/// A prepared client invocation: global options plus the `OS_*` environment.
///
/// Secrets only ever live in `envs`, so [`Invocation::render`] is safe to log.
#[derive(Clone)]
pub(crate) struct Invocation {
    executable: PathBuf,
    options: Vec<String>,
    envs: Vec<(String, String)>,
}

impl Invocation {
    pub(crate) fn new(
        executable: &Path,
        config: &ConnectionConfig,
        credential: &AuthCredential,
    ) -> Self {
        Self {
            executable: executable.to_path_buf(),
            options: render_options(config),
            envs: render_environment(config, credential),
        }
    }

    /// Command line for `subcommand`, without the environment.
    pub(crate) fn render(&self, subcommand: &[&str]) -> String {
        std::iter::once(self.executable.display().to_string())
            .chain(self.options.iter().cloned())
            .chain(subcommand.iter().map(ToString::to_string))
            .map(|arg| {
                if arg.contains(' ') {
                    format!("'{arg}'")
                } else {
                    arg
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Runs `subcommand` and returns its stdout.
    ///
    /// A spawn failure maps to [`ConnectorError::SdkUnavailable`]; a non-zero
    /// exit maps to [`ConnectorError::Sdk`] carrying the client's stderr.
    pub(crate) async fn output(&self, subcommand: &[&str]) -> Result<String> {
        let rendered = self.render(subcommand);
        log::trace!("Executing '{rendered}'");

        let mut cmd = tokio::process::Command::new(&self.executable);
        cmd.args(&self.options)
            .args(subcommand)
            .stdin(std::process::Stdio::null())
            .kill_on_drop(true);
        for key in inherited_keys() {
            cmd.env_remove(key);
        }
        cmd.envs(self.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        let output = cmd
            .output()
            .await
            .map_err(|e| ConnectorError::sdk_unavailable(LIBRARY, format!("{rendered}: {e}")))?;
        let output = CommandOutput { inner: output };
        log::trace!("Executed '{rendered}': {}", output.explain_exit());

        if output.success() {
            return Ok(output.stdout());
        }

        let stderr = output.stderr();
        let stderr = stderr.trim();
        log::debug!(
            "'{rendered}' {}: {}",
            output.explain_exit(),
            truncate_for_log(stderr)
        );
        let message = if stderr.is_empty() {
            format!("'{rendered}' {}", output.explain_exit())
        } else {
            stderr.to_string()
        };
        Err(ConnectorError::Sdk {
            connector: CONNECTOR_ID.to_string(),
            message,
        })
    }
}

/// Global client options derived from the connection settings.
pub(crate) fn render_options(config: &ConnectionConfig) -> Vec<String> {
    let mut options = Vec::new();
    if !config.verify {
        options.push("--insecure".to_string());
    }
    if let Some(secs) = config.api_timeout {
        options.push("--timeout".to_string());
        options.push(secs.to_string());
    }
    options
}

/// `OS_*` variables for the connection settings and every credential entry.
///
/// Credential keys map to `OS_<KEY>` upper-cased, so `auth_url` becomes
/// `OS_AUTH_URL` and `cloud` becomes `OS_CLOUD`.
pub(crate) fn render_environment(
    config: &ConnectionConfig,
    credential: &AuthCredential,
) -> Vec<(String, String)> {
    let mut envs = vec![
        (format!("{ENV_PREFIX}REGION_NAME"), config.region_name.clone()),
        (format!("{ENV_PREFIX}INTERFACE"), config.interface.to_string()),
    ];
    if let Some(cacert) = &config.cacert {
        envs.push((format!("{ENV_PREFIX}CACERT"), cacert.clone()));
    }
    envs.extend(credential.iter().map(|(key, value)| {
        (
            format!("{ENV_PREFIX}{}", key.to_ascii_uppercase()),
            value.to_string(),
        )
    }));
    envs
}

/// `OS_*` variables of the current process, which must not leak into the
/// client's view of the credential.
fn inherited_keys() -> Vec<OsString> {
    std::env::vars_os()
        .map(|(key, _)| key)
        .filter(|key| is_credential_key(&key.to_string_lossy()))
        .collect()
}

fn is_credential_key(key: &str) -> bool {
    key.starts_with(ENV_PREFIX) && !CONFIG_LOCATORS.contains(&key)
}

struct CommandOutput {
    inner: Output,
}

impl CommandOutput {
    fn success(&self) -> bool {
        self.inner.status.success()
    }

    fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.inner.stdout).into()
    }

    fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.inner.stderr).into()
    }

    #[cfg(unix)]
    fn signal(&self) -> Option<i32> {
        use std::os::unix::process::ExitStatusExt;
        self.inner.status.signal()
    }

    #[cfg(not(unix))]
    fn signal(&self) -> Option<i32> {
        None
    }

    fn explain_exit(&self) -> String {
        if let Some(code) = self.inner.status.code() {
            format!("exited with status: {code}")
        } else if let Some(signal) = self.signal() {
            format!("terminated by signal: {signal}")
        } else {
            "exited with unknown status".into()
        }
    }
}
