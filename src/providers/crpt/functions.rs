// Standard library
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

// 3rd party crates
use futures::{stream::FuturesUnordered, StreamExt};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{header, Client, StatusCode};
use tokio::sync::{broadcast, RwLockReadGuard};
use tracing::{debug, error, info, warn};

// Project imports
use crate::gate::GateSlot;
use crate::settings::types::{ConfigManager, Settings};

// Current module imports
use super::constants::SIGNATURE_HEADER;
use super::errors::CrptError;
use super::models::Document;
use super::types::{CrptApi, CrptConfig, HttpTransport};

/// Creates a reqwest client with the appropriate headers for the CRPT API.
pub(super) fn create_reqwest_client(crpt: &CrptConfig) -> Result<Client, CrptError> {
    // Create headers.
    let mut headers: HeaderMap = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    // Mark security-sensitive headers with `set_sensitive`.
    if let Some(api_token) = &crpt.api_token {
        let bearer_token: String = format!("Bearer {}", api_token);
        let mut auth_value: HeaderValue = HeaderValue::from_str(&bearer_token).map_err(|e| {
            error!("Invalid API token format: {}", e);
            CrptError::InvalidHeaderValue(e)
        })?;
        auth_value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth_value);
    }

    if crpt.accept_invalid_certs {
        warn!(url = %crpt.url, "TLS certificate verification is disabled");
    }

    // Build the client.
    let client: Client = Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(crpt.timeout_secs))
        .danger_accept_invalid_certs(crpt.accept_invalid_certs)
        .build()
        .map_err(|e| {
            error!("Failed to build HTTP client: {}", e);
            CrptError::HttpClientBuild(e)
        })?;

    Ok(client)
}

/// Posts a document and decodes the created document from the response.
///
/// Only `201 Created` counts as success.
pub(super) async fn send_document(
    transport: &HttpTransport,
    document: &Document,
    signature: &str,
) -> Result<Document, CrptError> {
    if signature.trim().is_empty() {
        return Err(CrptError::MissingSignature);
    }

    let doc_id: String = document.label().to_string();
    let signature_value: HeaderValue = HeaderValue::from_str(signature)?;

    debug!(
        doc_id = %doc_id,
        url = %transport.url,
        "Sending create document request"
    );

    let response = transport
        .client
        .post(&transport.url)
        .header(SIGNATURE_HEADER, signature_value)
        .json(document)
        .send()
        .await
        .map_err(|e| CrptError::RequestFailed {
            doc_id: doc_id.clone(),
            message: e.to_string(),
        })?;

    let status = response.status();
    match status {
        StatusCode::CREATED => {
            let response_text = response
                .text()
                .await
                .map_err(|e| CrptError::InvalidResponse {
                    doc_id: doc_id.clone(),
                    message: format!("Failed to read response body: {}", e),
                })?;

            debug!(
                doc_id = %doc_id,
                response = %response_text,
                "Received create document response"
            );

            serde_json::from_str(&response_text).map_err(|e| CrptError::InvalidResponse {
                doc_id,
                message: format!("{} - Raw: {}", e, response_text),
            })
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(CrptError::Unauthorized(doc_id)),
        StatusCode::TOO_MANY_REQUESTS => Err(CrptError::RateLimited(doc_id)),
        _ => {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(CrptError::UnexpectedStatus {
                doc_id,
                status,
                body,
            })
        }
    }
}

/// Reads a JSON document file.
pub fn load_document(path: &Path) -> Result<Document, CrptError> {
    let file: File = File::open(path).map_err(|e| CrptError::DocumentLoad {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let reader: BufReader<File> = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|e| CrptError::DocumentLoad {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Builds the CRPT client from the configuration, sharing the slot's gate.
pub async fn get_crpt_api(
    config: Arc<ConfigManager>,
    gate_slot: &GateSlot,
) -> Result<CrptApi, Box<dyn Error>> {
    let settings: RwLockReadGuard<Settings> = config.get_settings().await;

    let gate = gate_slot.get_or_init(&settings.rate_limit).await?;
    let api = CrptApi::new(&settings.crpt, gate)?;

    Ok(api)
}

/// Submits every document concurrently; the gate decides when each one runs.
///
/// Stops waiting for outstanding submissions once a shutdown signal arrives.
/// Returns the number of documents created.
pub async fn process_submissions(
    api: &CrptApi,
    documents: &[Document],
    signature: &str,
    shutdown_rx: Option<broadcast::Receiver<()>>,
) -> Result<usize, Box<dyn Error>> {
    // Create a FuturesUnordered to hold our concurrent tasks.
    let mut futures = FuturesUnordered::new();

    for document in documents {
        futures.push(async move {
            let result = api.create_document(document, signature).await;
            (document.label(), result)
        });
    }

    let mut created: usize = 0;
    let mut failed: usize = 0;
    let mut shutdown_rx = shutdown_rx;

    loop {
        let next = match shutdown_rx.as_mut() {
            Some(rx) => {
                tokio::select! {
                    next = futures.next() => next,
                    Ok(_) = rx.recv() => {
                        warn!("Shutdown requested, abandoning pending submissions");
                        break;
                    }
                }
            }
            None => futures.next().await,
        };

        let Some((doc_id, result)) = next else {
            break;
        };

        match result {
            Ok(response) => {
                created += 1;
                info!(
                    doc_id = %doc_id,
                    status = ?response.doc_status,
                    "Document created"
                );
            }
            Err(e) => {
                failed += 1;
                error!(doc_id = %doc_id, "Failed to create document: {}", e);
            }
        }
    }

    if failed > 0 {
        warn!(created, failed, "Some documents were not created");
    }

    Ok(created)
}
