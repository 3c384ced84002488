// 3rd party crates
use async_trait::async_trait;

// Project imports
use crate::providers::crpt::errors::CrptError;
use crate::providers::crpt::models::Document;

/// Transport that performs one document submission.
///
/// This is the protected action run under the rate limited gate. The HTTP
/// implementation is [`HttpTransport`](crate::providers::crpt::types::HttpTransport);
/// tests and alternative deployments can supply their own.
///
/// # Example Implementation
///
/// ```rust
/// # use async_trait::async_trait;
/// # use crpt_api::providers::DocumentTransport;
/// # use crpt_api::providers::crpt::errors::CrptError;
/// # use crpt_api::providers::crpt::models::Document;
/// struct Echo;
///
/// #[async_trait]
/// impl DocumentTransport for Echo {
///     async fn post_document(
///         &self,
///         document: &Document,
///         _signature: &str,
///     ) -> Result<Document, CrptError> {
///         Ok(document.clone())
///     }
///
///     fn get_name(&self) -> &str {
///         "echo"
///     }
/// }
/// ```
#[async_trait]
pub trait DocumentTransport: Send + Sync {
    /// Submits `document` with its detached `signature`.
    ///
    /// # Returns
    ///
    /// * `Ok(Document)` - The document as registered by the API
    /// * `Err(CrptError)` - Transport, status or decoding failure
    async fn post_document(&self, document: &Document, signature: &str)
        -> Result<Document, CrptError>;

    /// Gets the transport's name for logging.
    fn get_name(&self) -> &str;
}
