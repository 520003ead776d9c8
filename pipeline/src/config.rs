//! Pipeline configuration.

use std::path::PathBuf;

/// Company identity interpolated into outgoing emails.
#[derive(Clone, Debug)]
pub struct CompanyIdentity {
    /// Display name, e.g. "Toss & Trips".
    pub name: String,
    /// Public site URL.
    pub url: String,
}

impl Default for CompanyIdentity {
    fn default() -> Self {
        Self {
            name: "Toss & Trips".to_string(),
            url: "https://tossntrips.com".to_string(),
        }
    }
}

/// Settings consumed by the confirmation pipeline.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Default sender address.
    pub from_email: String,
    /// Operator address CC'd on every confirmation; `None` disables the CC.
    pub operator_email: Option<String>,
    /// Directory holding static assets; the brand logo is expected at
    /// `<assets_dir>/logo.png`. A missing file downgrades to a warning.
    pub assets_dir: PathBuf,
    /// Company identity for subjects, bodies and footers.
    pub company: CompanyIdentity,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            from_email: "noreply@tossntrips.com".to_string(),
            operator_email: Some("bookings@tossntrips.com".to_string()),
            assets_dir: PathBuf::from("static"),
            company: CompanyIdentity::default(),
        }
    }
}
