// Standard library
use std::fmt;
use std::sync::Arc;

// 3rd party crates
use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, info};

// Project imports
use crate::gate::{GateError, RateLimitedGate};
use crate::providers::DocumentTransport;

// Current module imports
use super::constants::{default_timeout_secs, default_url};
use super::errors::{CrptError, CrptValidationError};
use super::functions::{create_reqwest_client, send_document};
use super::models::Document;
use super::types::{CrptApi, CrptConfig, HttpTransport};

impl Default for CrptConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            api_token: None,
            accept_invalid_certs: false,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CrptConfig {
    pub fn validate(&self) -> Result<(), CrptValidationError> {
        let url = Url::parse(&self.url).map_err(|e| CrptValidationError::InvalidUrl {
            url: self.url.clone(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "https" | "http") {
            return Err(CrptValidationError::UnsupportedScheme(
                url.scheme().to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(CrptValidationError::InvalidTimeout);
        }

        if let Some(token) = &self.api_token {
            if token.trim().is_empty() {
                return Err(CrptValidationError::EmptyApiToken);
            }
        }

        Ok(())
    }
}

impl HttpTransport {
    pub fn new(config: &CrptConfig) -> Result<Self, CrptError> {
        Ok(Self {
            url: config.url.clone(),
            client: create_reqwest_client(config)?,
        })
    }
}

#[async_trait]
impl DocumentTransport for HttpTransport {
    async fn post_document(
        &self,
        document: &Document,
        signature: &str,
    ) -> Result<Document, CrptError> {
        send_document(self, document, signature).await
    }

    fn get_name(&self) -> &str {
        "http"
    }
}

impl CrptApi {
    /// Creates a client posting over HTTP and sharing `gate` with every
    /// other user of the same gate.
    pub fn new(config: &CrptConfig, gate: Arc<RateLimitedGate>) -> Result<Self, CrptError> {
        let transport = HttpTransport::new(config)?;
        info!(url = %transport.url, "CRPT client created");
        Ok(Self::with_transport(gate, Arc::new(transport)))
    }

    pub fn with_transport(gate: Arc<RateLimitedGate>, transport: Arc<dyn DocumentTransport>) -> Self {
        Self { gate, transport }
    }

    /// Creates `document` in the CRPT system.
    ///
    /// Blocks while the gate's window is exhausted. Any transport failure is
    /// returned as [`GateError::OperationFailed`] wrapping the [`CrptError`].
    pub async fn create_document(
        &self,
        document: &Document,
        signature: &str,
    ) -> Result<Document, GateError> {
        debug!(
            doc_id = %document.label(),
            transport = %self.transport.get_name(),
            "Queueing document for creation"
        );

        self.gate
            .run_gated(|| self.transport.post_document(document, signature))
            .await
    }
}

impl fmt::Debug for CrptApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrptApi")
            .field("gate", &self.gate)
            .field("transport", &self.transport.get_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct RecordingTransport {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl DocumentTransport for RecordingTransport {
        async fn post_document(
            &self,
            document: &Document,
            signature: &str,
        ) -> Result<Document, CrptError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CrptError::Unauthorized(document.label().to_string()));
            }
            let mut created = document.clone();
            created.doc_status = Some(format!("SIGNED:{}", signature));
            Ok(created)
        }

        fn get_name(&self) -> &str {
            "recording"
        }
    }

    fn api(fail: bool) -> (CrptApi, Arc<RecordingTransport>) {
        let gate = Arc::new(RateLimitedGate::new(Duration::from_secs(1), 2).unwrap());
        let transport = Arc::new(RecordingTransport {
            calls: AtomicUsize::new(0),
            fail,
        });
        (CrptApi::with_transport(gate, transport.clone()), transport)
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(CrptConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_rejects_bad_values() {
        let config = CrptConfig {
            url: "not a url".into(),
            ..CrptConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CrptValidationError::InvalidUrl { .. })
        ));

        let config = CrptConfig {
            url: "ftp://ismp.crpt.ru/upload".into(),
            ..CrptConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CrptValidationError::UnsupportedScheme(_))
        ));

        let config = CrptConfig {
            timeout_secs: 0,
            ..CrptConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CrptValidationError::InvalidTimeout)
        ));

        let config = CrptConfig {
            api_token: Some("  ".into()),
            ..CrptConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CrptValidationError::EmptyApiToken)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_document_goes_through_gate() {
        let (api, transport) = api(false);
        let document = Document {
            doc_id: Some("doc-7".into()),
            ..Document::default()
        };

        let created = api.create_document(&document, "sig").await.unwrap();

        assert_eq!(created.doc_id.as_deref(), Some("doc-7"));
        assert_eq!(created.doc_status.as_deref(), Some("SIGNED:sig"));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.gate.current_count().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_failure_is_wrapped() {
        let (api, _) = api(true);

        let result = api.create_document(&Document::default(), "sig").await;

        match result {
            Err(GateError::OperationFailed(cause)) => {
                let cause = cause.downcast_ref::<CrptError>().unwrap();
                assert!(matches!(cause, CrptError::Unauthorized(_)));
            }
            other => panic!("expected OperationFailed, got {:?}", other),
        }
    }
}
