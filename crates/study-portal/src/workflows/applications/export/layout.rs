//! Fixed text layout for the single-application PDF report.
//!
//! Positions are millimetres from the top-left corner of an A4 page. Lines
//! advance by a fixed step; content past the bottom margin is not paginated.

use crate::workflows::applications::domain::ApplicationRecord;

use super::fields::{BasicFields, NARRATIVE_PLACEHOLDER};

pub const LEFT_MARGIN_MM: f32 = 20.0;
pub const TOP_OFFSET_MM: f32 = 20.0;
pub const LINE_STEP_MM: f32 = 10.0;
pub const SECTION_GAP_MM: f32 = 20.0;
pub const TITLE_FONT_SIZE: f32 = 20.0;
pub const BODY_FONT_SIZE: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub font_size: f32,
    pub weight: FontWeight,
    pub x_mm: f32,
    pub y_mm: f32,
}

/// Laid-out document handed to a [`DocumentRenderer`](super::DocumentRenderer).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextDocument {
    pub title: String,
    pub lines: Vec<TextLine>,
}

impl TextDocument {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.text.as_str())
    }

    pub fn contains_line(&self, text: &str) -> bool {
        self.texts().any(|line| line == text)
    }
}

/// Sections appended after the program block when requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtraSections {
    pub documents: bool,
    pub timeline: bool,
}

struct Cursor {
    document: TextDocument,
    y_mm: f32,
}

impl Cursor {
    fn new(title: String) -> Self {
        Self {
            document: TextDocument {
                title,
                lines: Vec::new(),
            },
            y_mm: TOP_OFFSET_MM,
        }
    }

    fn push(&mut self, text: String, font_size: f32, weight: FontWeight) {
        self.document.lines.push(TextLine {
            text,
            font_size,
            weight,
            x_mm: LEFT_MARGIN_MM,
            y_mm: self.y_mm,
        });
    }

    fn heading(&mut self, text: &str) {
        self.y_mm += SECTION_GAP_MM;
        self.push(text.to_string(), BODY_FONT_SIZE, FontWeight::Bold);
    }

    fn line(&mut self, text: String) {
        self.y_mm += LINE_STEP_MM;
        self.push(text, BODY_FONT_SIZE, FontWeight::Regular);
    }
}

pub(crate) fn application_document(
    record: &ApplicationRecord,
    extras: ExtraSections,
) -> TextDocument {
    let fields = BasicFields::from_record(record);
    let [_, name, email, phone, country, university, program, status, applied] =
        fields.values(NARRATIVE_PLACEHOLDER);

    let title = format!("Application Report - {}", fields.id);
    let mut cursor = Cursor::new(title.clone());
    cursor.push(title, TITLE_FONT_SIZE, FontWeight::Bold);

    cursor.heading("Student Information:");
    cursor.line(format!("Name: {name}"));
    cursor.line(format!("Email: {email}"));
    cursor.line(format!("Phone: {phone}"));
    cursor.line(format!("Country: {country}"));

    cursor.heading("Program Information:");
    cursor.line(format!("University: {university}"));
    cursor.line(format!("Program: {program}"));
    cursor.line(format!("Status: {status}"));
    cursor.line(format!("Applied Date: {applied}"));

    if extras.documents {
        cursor.heading("Documents:");
        if record.documents.is_empty() {
            cursor.line("No documents on file".to_string());
        }
        for document in &record.documents {
            let status = document.status.as_deref().unwrap_or(NARRATIVE_PLACEHOLDER);
            cursor.line(format!("- {}: {}", document.name, status));
        }
    }

    if extras.timeline {
        cursor.heading("Timeline:");
        if record.timeline.is_empty() {
            cursor.line("No timeline events recorded".to_string());
        }
        for event in &record.timeline {
            let line = match event.note.as_deref().filter(|note| !note.is_empty()) {
                Some(note) => format!("- {}: {} ({})", event.occurred_at, event.event, note),
                None => format!("- {}: {}", event.occurred_at, event.event),
            };
            cursor.line(line);
        }
    }

    cursor.document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::applications::domain::{
        ApplicationDocument, ApplicationStatus, TimelineEvent,
    };

    fn omar() -> ApplicationRecord {
        let mut record =
            ApplicationRecord::new("A1", ApplicationStatus::Pending, "2024-01-01T00:00:00Z");
        record.student_name = Some("Omar".to_string());
        record
    }

    #[test]
    fn student_block_follows_heading() {
        let document = application_document(&omar(), ExtraSections::default());
        let texts: Vec<&str> = document.texts().collect();

        assert_eq!(texts[0], "Application Report - A1");
        assert_eq!(texts[1], "Student Information:");
        assert_eq!(texts[2], "Name: Omar");
        assert!(document.contains_line("Email: N/A"));
        assert!(document.contains_line("Phone: N/A"));
        assert!(document.contains_line("Country: N/A"));
        assert!(document.contains_line("University: N/A"));
        assert!(document.contains_line("Status: pending"));
        assert!(document.contains_line("Applied Date: 2024-01-01"));
    }

    #[test]
    fn lines_use_fixed_offsets() {
        let document = application_document(&omar(), ExtraSections::default());
        let offsets: Vec<f32> = document.lines.iter().map(|line| line.y_mm).collect();
        assert_eq!(
            offsets,
            vec![20.0, 40.0, 50.0, 60.0, 70.0, 80.0, 100.0, 110.0, 120.0, 130.0, 140.0]
        );
        assert_eq!(document.lines[0].font_size, TITLE_FONT_SIZE);
        assert!(document
            .lines
            .iter()
            .all(|line| line.x_mm == LEFT_MARGIN_MM));
    }

    #[test]
    fn optional_sections_follow_program_block() {
        let mut record = omar();
        record.documents.push(ApplicationDocument {
            name: "Passport".to_string(),
            document_type: Some("identity".to_string()),
            status: Some("verified".to_string()),
            uploaded_at: None,
        });
        record.timeline.push(TimelineEvent {
            occurred_at: "2024-01-03".to_string(),
            event: "Submitted to university".to_string(),
            note: Some("fast track".to_string()),
        });

        let document = application_document(
            &record,
            ExtraSections {
                documents: true,
                timeline: true,
            },
        );

        assert!(document.contains_line("Documents:"));
        assert!(document.contains_line("- Passport: verified"));
        assert!(document.contains_line("Timeline:"));
        assert!(document.contains_line("- 2024-01-03: Submitted to university (fast track)"));
        let documents_heading = document
            .lines
            .iter()
            .find(|line| line.text == "Documents:")
            .expect("documents heading");
        assert_eq!(documents_heading.y_mm, 160.0);
    }

    #[test]
    fn empty_sections_say_so() {
        let document = application_document(
            &omar(),
            ExtraSections {
                documents: true,
                timeline: false,
            },
        );
        assert!(document.contains_line("No documents on file"));
        assert!(!document.contains_line("Timeline:"));
    }
}
