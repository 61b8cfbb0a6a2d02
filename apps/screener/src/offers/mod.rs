//! Offer letters: literal placeholder substitution over a `.docx` template.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use crate::documents::docx;
use crate::errors::ScreeningError;

pub const CANDIDATE_NAME_PLACEHOLDER: &str = "{{ candidate_name }}";
pub const ROLE_PLACEHOLDER: &str = "{{ role }}";
pub const JOINING_DATE_PLACEHOLDER: &str = "{{ joining_date }}";

pub const OFFER_LETTER_SUFFIX: &str = "_Offer_Letter.docx";

/// Values substituted into an offer letter.
#[derive(Debug, Clone)]
pub struct OfferFields<'a> {
    pub candidate_name: &'a str,
    pub role: &'a str,
    pub joining_date: &'a str,
}

/// Paragraph text of an offer-letter template, loaded once per run.
#[derive(Debug, Clone)]
pub struct OfferLetterTemplate {
    paragraphs: Vec<String>,
}

impl OfferLetterTemplate {
    pub fn load(path: &Path) -> Result<Self, ScreeningError> {
        if !path.exists() {
            return Err(ScreeningError::FileNotFound(path.to_path_buf()));
        }
        Ok(Self {
            paragraphs: docx::read_paragraphs(path)?,
        })
    }

    /// Template paragraphs with every placeholder replaced.
    pub fn render(&self, fields: &OfferFields<'_>) -> Vec<String> {
        self.paragraphs
            .iter()
            .map(|p| {
                p.replace(CANDIDATE_NAME_PLACEHOLDER, fields.candidate_name)
                    .replace(ROLE_PLACEHOLDER, fields.role)
                    .replace(JOINING_DATE_PLACEHOLDER, fields.joining_date)
            })
            .collect()
    }

    /// Renders the template and writes
    /// `<candidate_name>_<YYYYmmddHHMMSS>_Offer_Letter.docx` into `output_dir`.
    /// An existing letter is never overwritten; a `_2`, `_3`, ... counter goes
    /// before the suffix instead.
    pub fn create_offer_letter(
        &self,
        output_dir: &Path,
        fields: &OfferFields<'_>,
    ) -> Result<PathBuf, ScreeningError> {
        std::fs::create_dir_all(output_dir)?;

        let stem = format!(
            "{}_{}",
            sanitize_file_component(fields.candidate_name),
            Local::now().format("%Y%m%d%H%M%S")
        );
        let (path, file) = create_unique_file(output_dir, &stem)?;

        docx::pack_paragraphs(file, &path, &self.render(fields))?;
        info!(path = %path.display(), "offer letter written");
        Ok(path)
    }
}

fn create_unique_file(dir: &Path, stem: &str) -> Result<(PathBuf, File), ScreeningError> {
    let mut attempt = 1;
    loop {
        let file_name = match attempt {
            1 => format!("{stem}{OFFER_LETTER_SUFFIX}"),
            n => format!("{stem}_{n}{OFFER_LETTER_SUFFIX}"),
        };
        let path = dir.join(file_name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => return Err(e.into()),
        }
    }
}

/// Replaces path separators so a name can never escape the output directory.
pub fn sanitize_file_component(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c })
        .collect();
    match cleaned.as_str() {
        "" | "." | ".." => "_".to_string(),
        _ => cleaned,
    }
}

#[cfg(test)]
impl OfferLetterTemplate {
    pub fn from_paragraphs(paragraphs: Vec<String>) -> Self {
        Self { paragraphs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> OfferFields<'static> {
        OfferFields {
            candidate_name: "Jane Doe",
            role: "Backend Engineer",
            joining_date: "2024-03-01",
        }
    }

    #[test]
    fn test_render_substitutes_all_placeholders() {
        let template = OfferLetterTemplate::from_paragraphs(vec![
            "Dear {{ candidate_name }},".to_string(),
            "We are pleased to offer you the role of {{ role }}.".to_string(),
            "Your joining date is {{ joining_date }}. Welcome, {{ candidate_name }}!".to_string(),
            "Regards, HR".to_string(),
        ]);

        let rendered = template.render(&fields());

        assert_eq!(
            rendered,
            vec![
                "Dear Jane Doe,".to_string(),
                "We are pleased to offer you the role of Backend Engineer.".to_string(),
                "Your joining date is 2024-03-01. Welcome, Jane Doe!".to_string(),
                "Regards, HR".to_string(),
            ]
        );
    }

    #[test]
    fn test_placeholders_are_literal() {
        let template =
            OfferLetterTemplate::from_paragraphs(vec!["{{candidate_name}} {{ ROLE }}".to_string()]);
        assert_eq!(template.render(&fields()), vec!["{{candidate_name}} {{ ROLE }}"]);
    }

    #[test]
    fn test_create_offer_letter_writes_docx() {
        let dir = tempfile::tempdir().unwrap();
        let template_path = dir.path().join("template.docx");
        docx::write_paragraphs(
            &template_path,
            &[
                "Dear {{ candidate_name }},".to_string(),
                "Role: {{ role }}, starting {{ joining_date }}.".to_string(),
            ],
        )
        .unwrap();

        let template = OfferLetterTemplate::load(&template_path).unwrap();
        let out_dir = dir.path().join("offers");
        let path = template.create_offer_letter(&out_dir, &fields()).unwrap();

        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("Jane Doe_"), "got {name}");
        assert!(name.ends_with(OFFER_LETTER_SUFFIX), "got {name}");
        assert_eq!(path.parent().unwrap(), out_dir);

        assert_eq!(
            docx::read_paragraphs(&path).unwrap(),
            vec![
                "Dear Jane Doe,".to_string(),
                "Role: Backend Engineer, starting 2024-03-01.".to_string(),
            ]
        );
    }

    #[test]
    fn test_same_second_letters_do_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let template = OfferLetterTemplate::from_paragraphs(vec!["Dear {{ candidate_name }},".to_string()]);
        let stem = "Jane Doe_20240115143000";

        let (first, _) = create_unique_file(dir.path(), stem).unwrap();
        let (second, _) = create_unique_file(dir.path(), stem).unwrap();
        assert_eq!(first, dir.path().join("Jane Doe_20240115143000_Offer_Letter.docx"));
        assert_eq!(second, dir.path().join("Jane Doe_20240115143000_2_Offer_Letter.docx"));

        let a = template.create_offer_letter(dir.path(), &fields()).unwrap();
        let b = template.create_offer_letter(dir.path(), &fields()).unwrap();
        assert_ne!(a, b);
        assert!(a.exists() && b.exists());
    }

    #[test]
    fn test_load_missing_template() {
        let err = OfferLetterTemplate::load(Path::new("/nonexistent/template.docx")).unwrap_err();
        assert!(matches!(err, ScreeningError::FileNotFound(_)));
    }

    #[test]
    fn test_sanitize_file_component() {
        assert_eq!(sanitize_file_component("Jane Doe"), "Jane Doe");
        assert_eq!(sanitize_file_component("../etc/passwd"), ".._etc_passwd");
        assert_eq!(sanitize_file_component(".."), "_");
        assert_eq!(sanitize_file_component("  "), "_");
    }
}
