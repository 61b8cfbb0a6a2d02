use std::fs::File;
use std::path::Path;

use docx_rs::{read_docx, DocumentChild, Docx, Paragraph, ParagraphChild, Run, RunChild};

use crate::errors::ScreeningError;

/// Reads the text of every top-level paragraph, in document order.
/// Runs inside a paragraph are concatenated; empty paragraphs are kept as "".
pub fn read_paragraphs(path: &Path) -> Result<Vec<String>, ScreeningError> {
    let bytes = std::fs::read(path)?;
    let docx = read_docx(&bytes).map_err(|e| ScreeningError::document(path, e))?;

    let mut paragraphs = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(p) = child {
            let mut text = String::new();
            for pc in &p.children {
                if let ParagraphChild::Run(run) = pc {
                    for rc in &run.children {
                        if let RunChild::Text(t) = rc {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            paragraphs.push(text);
        }
    }
    Ok(paragraphs)
}

/// Writes a new document with one plain paragraph per entry.
pub fn write_paragraphs(path: &Path, paragraphs: &[String]) -> Result<(), ScreeningError> {
    pack_paragraphs(File::create(path)?, path, paragraphs)
}

/// Packs the paragraphs into an already opened `file`; `path` is only for errors.
pub fn pack_paragraphs(file: File, path: &Path, paragraphs: &[String]) -> Result<(), ScreeningError> {
    let docx = paragraphs.iter().fold(Docx::new(), |doc, text| {
        doc.add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)))
    });

    docx.build()
        .pack(file)
        .map_err(|e| ScreeningError::document(path, e))
}
