//! Modal text forms used by every create/edit dialog.
//!
//! A `Form` is a list of labelled single-line fields plus the `FormKind`
//! that decides what submitting it does. Conversion into drafts happens in
//! `App::submit_form`.

use quizdesk_core::models::{
    QuizQuestion, Subject, TryOutDraft, TryOutQuestionDraft, OPTION_LABELS,
};

/// Maximum characters accepted in one field.
/// Descriptions and explanations are the longest inputs.
pub const MAX_FIELD_LENGTH: usize = 2000;

/// What a submitted form creates or updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormKind {
    CreateSubject,
    EditSubject { id: String },
    CreateChapter { subject_id: String },
    CreateQuiz {
        chapter_id: String,
        subject_id: Option<String>,
        number: u32,
    },
    EditQuiz {
        id: String,
        chapter_id: String,
        subject_id: Option<String>,
    },
    /// Title, description and duration of the try-out being built
    TryOutDetails,
    /// One question of the try-out being built, by index
    TryOutQuestion(usize),
    CreateInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub hint: Option<&'static str>,
}

impl FormField {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
            hint: None,
        }
    }

    fn hint(mut self, hint: &'static str) -> Self {
        self.hint = Some(hint);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub title: String,
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub focus: usize,
    pub error: Option<String>,
}

impl Form {
    fn new(title: impl Into<String>, kind: FormKind, fields: Vec<FormField>) -> Self {
        Self {
            title: title.into(),
            kind,
            fields,
            focus: 0,
            error: None,
        }
    }

    pub fn subject(existing: Option<&Subject>) -> Self {
        let (title, kind) = match existing {
            Some(s) => ("Edit Subject", FormKind::EditSubject { id: s.id.clone() }),
            None => ("New Subject", FormKind::CreateSubject),
        };
        Self::new(
            title,
            kind,
            vec![
                FormField::new("Title", existing.map(|s| s.title.clone()).unwrap_or_default()),
                FormField::new(
                    "Description",
                    existing.map(|s| s.description.clone()).unwrap_or_default(),
                ),
            ],
        )
    }

    pub fn chapter(subject_id: &str) -> Self {
        Self::new(
            "New Chapter",
            FormKind::CreateChapter {
                subject_id: subject_id.to_string(),
            },
            vec![
                FormField::new("Title", ""),
                FormField::new("Description", ""),
                FormField::new("Video file", "").hint("optional path to a video"),
                FormField::new("PDF file", "").hint("optional path to a PDF"),
            ],
        )
    }

    /// Question form for a chapter quiz; `existing` switches to edit mode.
    pub fn quiz(
        chapter_id: &str,
        subject_id: Option<&str>,
        question_count: usize,
        existing: Option<&QuizQuestion>,
    ) -> Self {
        let (title, kind) = match existing {
            Some(q) => (
                "Edit Question".to_string(),
                FormKind::EditQuiz {
                    id: q.id.clone(),
                    chapter_id: chapter_id.to_string(),
                    subject_id: subject_id.map(str::to_string),
                },
            ),
            None => {
                let number = question_count as u32 + 1;
                (
                    format!("New Question #{}", number),
                    FormKind::CreateQuiz {
                        chapter_id: chapter_id.to_string(),
                        subject_id: subject_id.map(str::to_string),
                        number,
                    },
                )
            }
        };

        let options = existing.map(|q| q.options.clone()).unwrap_or_default();
        let answer = existing
            .and_then(|q| q.correct_label())
            .map(String::from)
            .unwrap_or_default();
        let explanation = existing
            .and_then(|q| q.explanation.clone())
            .unwrap_or_default();

        Self::new(
            title,
            kind,
            question_fields(
                existing.map(|q| q.question.as_str()).unwrap_or_default(),
                &options,
                &answer,
                &explanation,
            ),
        )
    }

    pub fn tryout_details(draft: &TryOutDraft) -> Self {
        Self::new(
            "Try-out Details",
            FormKind::TryOutDetails,
            vec![
                FormField::new("Title", draft.title.clone()),
                FormField::new("Description", draft.description.clone()),
                FormField::new("Duration", draft.duration.to_string()).hint("minutes, at least 1"),
            ],
        )
    }

    pub fn tryout_question(index: usize, question: &TryOutQuestionDraft) -> Self {
        let answer = question.correct_label().map(String::from).unwrap_or_default();
        Self::new(
            format!("Question {}", index + 1),
            FormKind::TryOutQuestion(index),
            question_fields(
                &question.question,
                &question.options,
                &answer,
                &question.explanation,
            ),
        )
    }

    pub fn info() -> Self {
        Self::new(
            "New Info Banner",
            FormKind::CreateInfo,
            vec![
                FormField::new("Title", ""),
                FormField::new("Image file", "").hint("path to a PNG or JPEG"),
            ],
        )
    }

    /// Value of the field with this label.
    pub fn value(&self, label: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
            .unwrap_or_default()
    }

    /// The five option fields, in A-E order.
    pub fn options(&self) -> Vec<String> {
        OPTION_LABELS
            .iter()
            .map(|l| self.value(option_label(*l)).to_string())
            .collect()
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len().max(1);
    }

    pub fn prev_field(&mut self) {
        let len = self.fields.len().max(1);
        self.focus = (self.focus + len - 1) % len;
    }

    pub fn on_last_field(&self) -> bool {
        self.focus + 1 >= self.fields.len()
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if can_add_field_char(field.value.chars().count(), c) {
                field.value.push(c);
            }
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }
}

fn option_label(label: char) -> &'static str {
    match label {
        'A' => "Option A",
        'B' => "Option B",
        'C' => "Option C",
        'D' => "Option D",
        _ => "Option E",
    }
}

fn question_fields(question: &str, options: &[String], answer: &str, explanation: &str) -> Vec<FormField> {
    let mut fields = vec![FormField::new("Question", question)];
    for (i, label) in OPTION_LABELS.iter().enumerate() {
        fields.push(FormField::new(
            option_label(*label),
            options.get(i).cloned().unwrap_or_default(),
        ));
    }
    fields.push(FormField::new("Correct answer", answer).hint("letter A-E of a filled option"));
    fields.push(FormField::new("Explanation", explanation).hint("optional"));
    fields
}

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

pub fn can_add_field_char(current_len: usize, c: char) -> bool {
    current_len < MAX_FIELD_LENGTH && is_valid_input_char(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_navigation_wraps() {
        let mut form = Form::info();
        assert_eq!(form.focus, 0);
        form.next_field();
        assert!(form.on_last_field());
        form.next_field();
        assert_eq!(form.focus, 0);
        form.prev_field();
        assert_eq!(form.focus, 1);
    }

    #[test]
    fn test_typing_rejects_control_chars() {
        let mut form = Form::subject(None);
        for c in "Biologi\n".chars() {
            form.push_char(c);
        }
        assert_eq!(form.value("Title"), "Biologi");
        form.pop_char();
        assert_eq!(form.value("Title"), "Biolog");
        assert!(!can_add_field_char(MAX_FIELD_LENGTH, 'a'));
    }

    #[test]
    fn test_quiz_form_numbering_and_prefill() {
        let form = Form::quiz("c1", Some("s1"), 4, None);
        assert_eq!(
            form.kind,
            FormKind::CreateQuiz {
                chapter_id: "c1".to_string(),
                subject_id: Some("s1".to_string()),
                number: 5
            }
        );
        assert_eq!(form.fields.len(), 8);

        let existing: QuizQuestion = serde_json::from_str(
            r#"{"_id":"q1","question":"1+1?","options":["1","2","3","4","5"],"correctAnswer":"2"}"#,
        )
        .unwrap();
        let form = Form::quiz("c1", None, 4, Some(&existing));
        assert_eq!(form.value("Correct answer"), "B");
        assert_eq!(form.options()[4], "5");
        assert!(matches!(form.kind, FormKind::EditQuiz { .. }));
    }

    #[test]
    fn test_subject_form_edit_mode() {
        let subject = Subject {
            id: "s1".to_string(),
            title: "Kimia".to_string(),
            description: "Stoikiometri".to_string(),
        };
        let form = Form::subject(Some(&subject));
        assert_eq!(form.kind, FormKind::EditSubject { id: "s1".to_string() });
        assert_eq!(form.value("Description"), "Stoikiometri");
    }
}
