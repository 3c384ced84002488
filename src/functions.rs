// Standard library
use std::error::Error;
use std::sync::Arc;

// 3rd party crates
use tokio::sync::broadcast;
use tracing::{error, info, warn};

// Project imports
use crate::gate::GateSlot;
use crate::providers::crpt::functions::{get_crpt_api, load_document, process_submissions};
use crate::providers::crpt::models::Document;
use crate::settings::types::ConfigManager;

/// Main application flow: submits every configured document through the
/// rate limited CRPT client.
///
/// This function:
/// - Builds the single gate shared by every submission
/// - Loads the configured document files, skipping unreadable ones
/// - Submits all documents concurrently, letting the gate pace them
/// - Stops waiting on pending submissions when a shutdown signal arrives
pub async fn run(
    config: Arc<ConfigManager>,
    shutdown_rx: broadcast::Receiver<()>,
) -> Result<(), Box<dyn Error>> {
    let gate_slot = GateSlot::new();
    let api = get_crpt_api(Arc::clone(&config), &gate_slot).await?;

    let settings = config.get_settings().await;
    let signature: String = settings.submission.signature.clone();
    let paths = settings.submission.documents.clone();
    info!(
        "🚦 Submitting at most {} documents every {} seconds",
        settings.rate_limit.max_requests, settings.rate_limit.window_secs
    );

    // Drop the settings lock
    drop(settings);

    if paths.is_empty() {
        warn!("No documents configured for submission");
        return Ok(());
    }

    let mut documents: Vec<Document> = Vec::with_capacity(paths.len());
    for path in &paths {
        match load_document(path) {
            Ok(document) => documents.push(document),
            Err(e) => error!("Skipping document: {}", e),
        }
    }

    let created = process_submissions(&api, &documents, &signature, Some(shutdown_rx)).await?;
    info!(
        created,
        total = paths.len(),
        "📄 Document submission finished"
    );

    Ok(())
}
