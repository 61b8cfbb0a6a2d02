//! Document I/O: plain text out of `.txt`, `.pdf` and `.docx` files.

pub mod docx;

use std::path::Path;

use tracing::debug;

use crate::errors::ScreeningError;

/// Resume container formats the screener can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Txt,
    Pdf,
    Docx,
}

impl ResumeFormat {
    /// Detects the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, ScreeningError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "txt" => Ok(ResumeFormat::Txt),
            "pdf" => Ok(ResumeFormat::Pdf),
            "docx" => Ok(ResumeFormat::Docx),
            _ => Err(ScreeningError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Extracts plain text from a resume file.
pub fn extract_text(path: &Path) -> Result<String, ScreeningError> {
    let format = ResumeFormat::from_path(path)?;
    if !path.exists() {
        return Err(ScreeningError::FileNotFound(path.to_path_buf()));
    }

    let text = match format {
        ResumeFormat::Txt => read_text_file(path)?,
        ResumeFormat::Pdf => read_pdf_file(path)?,
        ResumeFormat::Docx => docx::read_paragraphs(path)?.concat(),
    };

    debug!(path = %path.display(), ?format, chars = text.len(), "extracted resume text");
    Ok(text)
}

/// Loads the job description. A missing file or blank content is an error.
pub fn load_job_description(path: &Path) -> Result<String, ScreeningError> {
    if !path.exists() {
        return Err(ScreeningError::FileNotFound(path.to_path_buf()));
    }
    let text = read_text_file(path)?;
    if text.trim().is_empty() {
        return Err(ScreeningError::EmptyInput("Job description"));
    }
    Ok(text)
}

fn read_text_file(path: &Path) -> Result<String, ScreeningError> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// `pdf_extract` can panic on malformed fonts; that becomes a document error
/// for this file instead of taking down the whole run.
fn read_pdf_file(path: &Path) -> Result<String, ScreeningError> {
    let bytes = std::fs::read(path)?;
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(&bytes)) {
        Ok(extracted) => extracted.map_err(|e| ScreeningError::document(path, e)),
        Err(_) => Err(ScreeningError::document(path, "PDF parser panicked")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_detection_is_case_insensitive() {
        assert_eq!(
            ResumeFormat::from_path(Path::new("cv.PDF")).unwrap(),
            ResumeFormat::Pdf
        );
        assert_eq!(
            ResumeFormat::from_path(Path::new("cv.Docx")).unwrap(),
            ResumeFormat::Docx
        );
        assert_eq!(
            ResumeFormat::from_path(Path::new("dir/cv.txt")).unwrap(),
            ResumeFormat::Txt
        );
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let err = ResumeFormat::from_path(Path::new("cv.odt")).unwrap_err();
        assert!(matches!(err, ScreeningError::UnsupportedFormat(p) if p == PathBuf::from("cv.odt")));
        assert!(ResumeFormat::from_path(Path::new("README")).is_err());
    }

    #[test]
    fn test_extract_text_reads_txt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, "Jane Doe\nRust developer").unwrap();
        assert_eq!(extract_text(&path).unwrap(), "Jane Doe\nRust developer");
    }

    #[test]
    fn test_extract_text_reads_docx_paragraphs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.docx");
        docx::write_paragraphs(&path, &["Jane Doe".to_string(), "Rust developer".to_string()])
            .unwrap();
        assert_eq!(extract_text(&path).unwrap(), "Jane DoeRust developer");
    }

    #[test]
    fn test_extract_text_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = extract_text(&dir.path().join("ghost.txt")).unwrap_err();
        assert!(matches!(err, ScreeningError::FileNotFound(_)));
    }

    /// One page, one line of Helvetica text, with a correct xref table.
    fn single_page_pdf(text: &str) -> Vec<u8> {
        let content = format!("BT /F1 24 Tf 72 700 Td ({text}) Tj ET");
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>"
                .to_string(),
            format!("<< /Length {} >>\nstream\n{content}\nendstream", content.len()),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        ];

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (idx, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", idx + 1).as_bytes());
        }
        let xref_start = pdf.len();
        pdf.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
        for offset in offsets {
            pdf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_start}\n%%EOF\n",
                objects.len() + 1
            )
            .as_bytes(),
        );
        pdf
    }

    #[test]
    fn test_extract_text_reads_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        std::fs::write(&path, single_page_pdf("Jane Doe Rust developer")).unwrap();

        let text = extract_text(&path).unwrap();

        assert!(text.contains("Jane Doe"), "got {text:?}");
        assert!(text.contains("Rust developer"), "got {text:?}");
    }

    #[test]
    fn test_corrupt_pdf_is_document_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"definitely not a pdf").unwrap();
        let err = extract_text(&path).unwrap_err();
        assert!(matches!(err, ScreeningError::Document { .. }));
    }

    #[test]
    fn test_load_job_description_missing() {
        let err = load_job_description(Path::new("/nonexistent/jd.txt")).unwrap_err();
        assert!(matches!(err, ScreeningError::FileNotFound(_)));
    }

    #[test]
    fn test_load_job_description_blank_is_empty_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jd.txt");
        std::fs::write(&path, "   \n\t").unwrap();
        let err = load_job_description(&path).unwrap_err();
        assert!(matches!(err, ScreeningError::EmptyInput(_)));
    }
}
