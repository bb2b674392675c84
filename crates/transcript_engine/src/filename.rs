use crate::identifier::Identifier;

/// Download filename for a transcript document.
pub fn document_filename(identifier: &Identifier) -> String {
    format!("Document_{identifier}.pdf")
}

/// `Content-Disposition` header value asking the browser to render inline
/// while still suggesting a filename for manual saves.
pub fn content_disposition(identifier: &Identifier) -> String {
    format!("inline; filename=\"{}\"", document_filename(identifier))
}
