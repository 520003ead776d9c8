//! The outgoing email value.

/// An image embedded in the email body, referenced from the HTML by
/// `cid:<content_id>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineImage {
    /// Content id the HTML references, without angle brackets.
    pub content_id: String,
    /// MIME type, e.g. `image/png`.
    pub content_type: String,
    /// Raw image bytes.
    pub bytes: Vec<u8>,
}

/// A fully composed email, ready for a [`Mailer`](crate::Mailer).
///
/// The HTML body is the primary rendering; `text_body` is the plain-text
/// alternative for clients that refuse HTML.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutgoingEmail {
    /// Subject line.
    pub subject: String,
    /// Plain-text alternative body.
    pub text_body: String,
    /// HTML body.
    pub html_body: String,
    /// Sender address, optionally `Name <addr>` form.
    pub from: String,
    /// Primary recipients.
    pub to: Vec<String>,
    /// Carbon-copy recipients.
    pub cc: Vec<String>,
    /// Optional inline image (the brand logo).
    pub inline_image: Option<InlineImage>,
}
