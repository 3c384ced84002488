/// Endpoint creating a document for the entry into circulation of goods
/// produced in the Russian Federation.
pub const CRPT_CREATE_DOCUMENT_URL: &str = "https://ismp.crpt.ru/api/v3/lk/documents/create";

/// Header carrying the detached signature of the submitted document.
pub const SIGNATURE_HEADER: &str = "Signature";

/// Wire format of every date field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn default_timeout_secs() -> u64 {
    30
}

pub fn default_url() -> String {
    CRPT_CREATE_DOCUMENT_URL.to_string()
}
