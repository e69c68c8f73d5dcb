use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::{ConnectorError, Result};
use crate::traits::{Connection, Connector};
use crate::types::{AuthCredential, ConnectionConfig, ServiceCatalog};

use super::OpenstackCliConnector;
use super::command::Invocation;
use super::types::{CatalogListEntry, TokenIssueOutput, catalog_from_entries};

pub(crate) const CONNECTOR_ID: &str = "openstack-cli";

const TOKEN_ISSUE: &[&str] = &["token", "issue", "-f", "json"];
const CATALOG_LIST: &[&str] = &["catalog", "list", "-f", "json"];

#[async_trait]
impl Connector for OpenstackCliConnector {
    fn id(&self) -> &'static str {
        CONNECTOR_ID
    }

    async fn connect(
        &self,
        config: &ConnectionConfig,
        credential: &AuthCredential,
    ) -> Result<Box<dyn Connection>> {
        let invocation = Invocation::new(&self.executable, config, credential);

        let token: TokenIssueOutput = parse(&invocation.output(TOKEN_ISSUE).await?)?;
        log::debug!(
            "[{CONNECTOR_ID}] token issued (user={}, project={}, expires={})",
            token.user_id.as_deref().unwrap_or("-"),
            token.project_id.as_deref().unwrap_or("-"),
            token.expires.as_deref().unwrap_or("-")
        );
        let catalog: Vec<CatalogListEntry> = parse(&invocation.output(CATALOG_LIST).await?)?;

        Ok(Box::new(CliConnection { token, catalog }))
    }
}

fn parse<T: DeserializeOwned>(stdout: &str) -> Result<T> {
    serde_json::from_str(stdout).map_err(|e| ConnectorError::ParseError {
        connector: CONNECTOR_ID.to_string(),
        detail: e.to_string(),
    })
}

/// Connection established through the client: an issued token plus the
/// catalog listed with it.
pub(crate) struct CliConnection {
    token: TokenIssueOutput,
    catalog: Vec<CatalogListEntry>,
}

impl Connection for CliConnection {
    fn auth_token(&self) -> Result<String> {
        if self.token.id.trim().is_empty() {
            return Err(ConnectorError::Extraction {
                field: "auth_token".to_string(),
                detail: "token issue returned no id".to_string(),
            });
        }
        Ok(self.token.id.clone())
    }

    fn service_catalog(&self) -> Result<ServiceCatalog> {
        Ok(catalog_from_entries(&self.catalog))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection(token: &str, catalog: &str) -> CliConnection {
        CliConnection {
            token: parse(token).unwrap(),
            catalog: parse(catalog).unwrap(),
        }
    }

    #[test]
    fn connection_exposes_token_and_catalog() {
        let conn = connection(
            r#"{"id": "gAAAAAB", "expires": "2030-01-01T00:00:00+0000"}"#,
            r#"[{"Name": "keystone", "Type": "identity", "Endpoints": []}]"#,
        );
        assert_eq!(conn.auth_token().unwrap(), "gAAAAAB");
        assert_eq!(conn.service_catalog().unwrap()["identity"]["name"], "keystone");
    }

    #[test]
    fn missing_token_id_is_extraction_error() {
        let conn = connection(r#"{"expires": "2030-01-01T00:00:00+0000"}"#, "[]");
        let err = conn.auth_token().unwrap_err();
        assert!(matches!(err, ConnectorError::Extraction { ref field, .. } if field == "auth_token"));
    }

    #[test]
    fn garbage_output_is_parse_error() {
        let err = parse::<TokenIssueOutput>("Password: ").unwrap_err();
        assert!(matches!(err, ConnectorError::ParseError { .. }));
        assert!(err.to_string().starts_with("[openstack-cli] Parse error:"));
    }

    #[test]
    fn connector_id() {
        let connector = OpenstackCliConnector::with_executable("/usr/bin/openstack");
        assert_eq!(connector.id(), "openstack-cli");
    }
}
