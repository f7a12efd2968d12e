use serde::{Deserialize, Serialize};

use super::{required, MissingId, RecordIds, ValidationError};

/// Every multiple-choice question carries exactly five options.
pub const OPTION_COUNT: usize = 5;

pub const OPTION_LABELS: [char; OPTION_COUNT] = ['A', 'B', 'C', 'D', 'E'];

pub(crate) fn blank_options() -> Vec<String> {
    vec![String::new(); OPTION_COUNT]
}

/// Option text for a letter choice, if that option is filled in.
pub(crate) fn option_for_label(options: &[String], label: char) -> Option<&str> {
    let index = OPTION_LABELS
        .iter()
        .position(|l| *l == label.to_ascii_uppercase())?;
    options
        .get(index)
        .map(|o| o.trim())
        .filter(|o| !o.is_empty())
}

/// Letter of the option whose text equals `answer`.
pub(crate) fn label_for_answer(options: &[String], answer: &str) -> Option<char> {
    if answer.trim().is_empty() {
        return None;
    }
    options
        .iter()
        .position(|o| o.trim() == answer.trim())
        .and_then(|i| OPTION_LABELS.get(i).copied())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawQuizQuestion")]
pub struct QuizQuestion {
    pub id: String,
    pub number: Option<u32>,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: Option<String>,
    pub chapter_id: Option<String>,
    pub subject_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuizQuestion {
    #[serde(flatten)]
    ids: RecordIds,
    #[serde(default)]
    number: Option<u32>,
    #[serde(default)]
    question: String,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    correct_answer: String,
    #[serde(default)]
    explanation: Option<String>,
    #[serde(default)]
    chapter_id: Option<String>,
    #[serde(default)]
    subject_id: Option<String>,
}

impl TryFrom<RawQuizQuestion> for QuizQuestion {
    type Error = MissingId;

    fn try_from(raw: RawQuizQuestion) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.ids.require()?,
            number: raw.number,
            question: raw.question,
            options: raw.options,
            correct_answer: raw.correct_answer,
            explanation: raw.explanation,
            chapter_id: raw.chapter_id,
            subject_id: raw.subject_id,
        })
    }
}

impl QuizQuestion {
    /// Number shown in the list; falls back to the position when unnumbered.
    pub fn display_number(&self, index: usize) -> u32 {
        self.number.unwrap_or(index as u32 + 1)
    }

    pub fn correct_label(&self) -> Option<char> {
        label_for_answer(&self.options, &self.correct_answer)
    }
}

/// Question form for a chapter quiz.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizDraft {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
}

impl Default for QuizDraft {
    fn default() -> Self {
        Self {
            question: String::new(),
            options: blank_options(),
            correct_answer: String::new(),
            explanation: String::new(),
        }
    }
}

/// Body for `POST /quizzes/for-chapter/{id}` and `PUT /quizzes/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizPayload {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
    pub chapter_id: String,
    pub subject_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
}

impl QuizDraft {
    pub fn from_question(question: &QuizQuestion) -> Self {
        let mut options = question.options.clone();
        options.resize(OPTION_COUNT, String::new());
        Self {
            question: question.question.clone(),
            options,
            correct_answer: question.correct_answer.clone(),
            explanation: question.explanation.clone().unwrap_or_default(),
        }
    }

    /// Pick the correct answer by letter. Returns false when that option is blank.
    pub fn choose_answer(&mut self, label: char) -> bool {
        match option_for_label(&self.options, label) {
            Some(text) => {
                self.correct_answer = text.to_string();
                true
            }
            None => false,
        }
    }

    pub fn set_option(&mut self, index: usize, text: &str) {
        if let Some(option) = self.options.get_mut(index) {
            *option = text.to_string();
        }
        // An answer whose option was edited away is no longer valid
        if label_for_answer(&self.options, &self.correct_answer).is_none() {
            self.correct_answer.clear();
        }
    }

    pub fn correct_label(&self) -> Option<char> {
        label_for_answer(&self.options, &self.correct_answer)
    }

    /// Validate for submission. `number` is set only when creating.
    pub fn validate(
        &self,
        chapter_id: &str,
        subject_id: Option<&str>,
        number: Option<u32>,
    ) -> Result<QuizPayload, ValidationError> {
        let question = required(&self.question, "Question")?;
        let correct_answer = required(&self.correct_answer, "Correct answer")?;
        if label_for_answer(&self.options, &correct_answer).is_none() {
            return Err(ValidationError::CorrectAnswerNotAnOption);
        }

        Ok(QuizPayload {
            question,
            options: self.options.iter().map(|o| o.trim().to_string()).collect(),
            correct_answer,
            explanation: self.explanation.trim().to_string(),
            chapter_id: chapter_id.to_string(),
            subject_id: subject_id.map(str::to_string),
            number,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_draft() -> QuizDraft {
        let mut draft = QuizDraft {
            question: "2 + 2 = ?".to_string(),
            ..Default::default()
        };
        for (i, text) in ["3", "4", "5", "", ""].iter().enumerate() {
            draft.set_option(i, text);
        }
        draft
    }

    #[test]
    fn test_choose_answer_only_from_filled_options() {
        let mut draft = filled_draft();
        assert!(!draft.choose_answer('E'));
        assert!(draft.choose_answer('b'));
        assert_eq!(draft.correct_answer, "4");
        assert_eq!(draft.correct_label(), Some('B'));
    }

    #[test]
    fn test_editing_option_resets_answer() {
        let mut draft = filled_draft();
        draft.choose_answer('B');
        draft.set_option(1, "four");
        assert!(draft.correct_answer.is_empty());
    }

    #[test]
    fn test_validate_payload() {
        let mut draft = filled_draft();
        assert_eq!(
            draft.validate("c1", Some("s1"), Some(3)).unwrap_err(),
            ValidationError::Required("Correct answer")
        );

        draft.choose_answer('B');
        let payload = draft.validate("c1", Some("s1"), Some(3)).unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["chapterId"], "c1");
        assert_eq!(json["subjectId"], "s1");
        assert_eq!(json["correctAnswer"], "4");
        assert_eq!(json["number"], 3);
        assert_eq!(json["options"].as_array().map(|a| a.len()), Some(OPTION_COUNT));

        let payload = draft.validate("c1", None, None).unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("number").is_none());
    }

    #[test]
    fn test_stale_answer_rejected() {
        let mut draft = filled_draft();
        draft.correct_answer = "7".to_string();
        assert_eq!(
            draft.validate("c1", None, None).unwrap_err(),
            ValidationError::CorrectAnswerNotAnOption
        );
    }

    #[test]
    fn test_question_display() {
        let q: QuizQuestion = serde_json::from_str(
            r#"{"_id":"q1","question":"Ibu kota?","options":["Bandung","Jakarta","","",""],"correctAnswer":"Jakarta"}"#,
        )
        .unwrap();
        assert_eq!(q.display_number(4), 5);
        assert_eq!(q.correct_label(), Some('B'));

        let draft = QuizDraft::from_question(&q);
        assert_eq!(draft.options.len(), OPTION_COUNT);
        assert_eq!(draft.correct_label(), Some('B'));
    }

    #[test]
    fn test_parse_question_with_both_ids() {
        let q: QuizQuestion = serde_json::from_str(
            r#"{"_id":"q2","id":"q2","number":3,"question":"2 + 2?","options":["3","4","5","6","7"],"correctAnswer":"4","chapterId":"c1"}"#,
        )
        .unwrap();
        assert_eq!(q.id, "q2");
        assert_eq!(q.display_number(0), 3);
        assert_eq!(q.chapter_id.as_deref(), Some("c1"));
    }
}
