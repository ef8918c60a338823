use bytes::Bytes;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
const PDF_MAGIC: &[u8] = b"%PDF";

/// An uploaded resume, held as an owned in-memory buffer for the life of a session.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub file_name: String,
    pub bytes: Bytes,
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn has_pdf_extension(&self) -> bool {
        self.file_name.to_lowercase().ends_with(".pdf")
    }

    /// Checks the `%PDF` header rather than trusting the file name alone.
    pub fn has_pdf_header(&self) -> bool {
        self.bytes.starts_with(PDF_MAGIC)
    }
}
