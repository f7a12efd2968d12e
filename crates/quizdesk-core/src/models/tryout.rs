use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::quiz::{blank_options, label_for_answer, option_for_label};
use super::{required, MissingId, RecordIds, ValidationError, OPTION_COUNT};

pub const DEFAULT_DURATION_MINUTES: u32 = 60;

/// Try-out package as listed by `/tryouts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawTryOut")]
pub struct TryOut {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Minutes
    pub duration: Option<u32>,
    pub questions_count: Option<u32>,
    pub questions: Vec<TryOutQuestionDraft>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTryOut {
    #[serde(flatten)]
    ids: RecordIds,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    duration: Option<u32>,
    #[serde(default)]
    questions_count: Option<u32>,
    #[serde(default)]
    questions: Vec<TryOutQuestionDraft>,
}

impl TryFrom<RawTryOut> for TryOut {
    type Error = MissingId;

    fn try_from(raw: RawTryOut) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.ids.require()?,
            title: raw.title,
            description: raw.description,
            duration: raw.duration,
            questions_count: raw.questions_count,
            questions: raw.questions,
        })
    }
}

impl TryOut {
    pub fn question_count(&self) -> u32 {
        self.questions_count
            .unwrap_or(self.questions.len() as u32)
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration.unwrap_or(0)
    }
}

/// One question inside a try-out package. Used both for the form and the
/// submitted payload; the id is generated locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawTryOutQuestion")]
pub struct TryOutQuestionDraft {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTryOutQuestion {
    #[serde(flatten)]
    ids: RecordIds,
    #[serde(default)]
    question: String,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    correct_answer: String,
    #[serde(default)]
    explanation: String,
}

impl From<RawTryOutQuestion> for TryOutQuestionDraft {
    fn from(raw: RawTryOutQuestion) -> Self {
        Self {
            id: raw.ids.resolve().unwrap_or_default(),
            question: raw.question,
            options: raw.options,
            correct_answer: raw.correct_answer,
            explanation: raw.explanation,
        }
    }
}

impl TryOutQuestionDraft {
    pub fn blank() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            question: String::new(),
            options: blank_options(),
            correct_answer: String::new(),
            explanation: String::new(),
        }
    }

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
        if label_for_answer(&self.options, &self.correct_answer).is_none() {
            self.correct_answer.clear();
        }
    }

    pub fn correct_label(&self) -> Option<char> {
        label_for_answer(&self.options, &self.correct_answer)
    }

    pub fn is_complete(&self) -> bool {
        !self.question.trim().is_empty()
            && !self.correct_answer.trim().is_empty()
            && self.options.len() == OPTION_COUNT
            && self.options.iter().all(|o| !o.trim().is_empty())
    }
}

/// Create-try-out form.
#[derive(Debug, Clone, PartialEq)]
pub struct TryOutDraft {
    pub title: String,
    pub description: String,
    pub duration: u32,
    pub questions: Vec<TryOutQuestionDraft>,
}

impl Default for TryOutDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            duration: DEFAULT_DURATION_MINUTES,
            questions: vec![TryOutQuestionDraft::blank()],
        }
    }
}

/// Body for `POST /tryouts`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TryOutPayload {
    pub title: String,
    pub description: String,
    pub duration: u32,
    pub questions: Vec<TryOutQuestionDraft>,
}

impl TryOutDraft {
    pub fn add_question(&mut self) -> usize {
        self.questions.push(TryOutQuestionDraft::blank());
        self.questions.len() - 1
    }

    /// Remove a question; the last remaining one cannot be removed.
    pub fn remove_question(&mut self, index: usize) -> bool {
        if self.questions.len() <= 1 || index >= self.questions.len() {
            return false;
        }
        self.questions.remove(index);
        true
    }

    /// Parse the duration field; anything below one minute is rejected.
    pub fn set_duration(&mut self, input: &str) -> Result<(), ValidationError> {
        match input.trim().parse::<u32>() {
            Ok(minutes) if minutes >= 1 => {
                self.duration = minutes;
                Ok(())
            }
            _ => Err(ValidationError::InvalidDuration),
        }
    }

    pub fn validate(&self) -> Result<TryOutPayload, ValidationError> {
        let title = required(&self.title, "Title")?;
        if self.duration < 1 {
            return Err(ValidationError::InvalidDuration);
        }
        if self.questions.is_empty() {
            return Err(ValidationError::NoQuestions);
        }

        let mut questions = Vec::with_capacity(self.questions.len());
        for (i, q) in self.questions.iter().enumerate() {
            if !q.is_complete() {
                return Err(ValidationError::IncompleteQuestion(i + 1));
            }
            if q.correct_label().is_none() {
                return Err(ValidationError::CorrectAnswerNotAnOption);
            }
            questions.push(TryOutQuestionDraft {
                id: q.id.clone(),
                question: q.question.trim().to_string(),
                options: q.options.iter().map(|o| o.trim().to_string()).collect(),
                correct_answer: q.correct_answer.trim().to_string(),
                explanation: q.explanation.trim().to_string(),
            });
        }

        Ok(TryOutPayload {
            title,
            description: self.description.trim().to_string(),
            duration: self.duration,
            questions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_question() -> TryOutQuestionDraft {
        let mut q = TryOutQuestionDraft::blank();
        q.question = "Hasil 3 x 3?".to_string();
        for (i, text) in ["6", "9", "12", "3", "33"].iter().enumerate() {
            q.set_option(i, text);
        }
        q.choose_answer('B');
        q
    }

    #[test]
    fn test_new_draft_defaults() {
        let draft = TryOutDraft::default();
        assert_eq!(draft.duration, DEFAULT_DURATION_MINUTES);
        assert_eq!(draft.questions.len(), 1);
        assert_eq!(draft.questions[0].options.len(), OPTION_COUNT);
    }

    #[test]
    fn test_question_ids_are_unique() {
        let mut draft = TryOutDraft::default();
        draft.add_question();
        draft.add_question();
        let mut ids: Vec<&str> = draft.questions.iter().map(|q| q.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_last_question_cannot_be_removed() {
        let mut draft = TryOutDraft::default();
        assert!(!draft.remove_question(0));
        draft.add_question();
        assert!(draft.remove_question(0));
        assert_eq!(draft.questions.len(), 1);
        assert!(!draft.remove_question(5));
    }

    #[test]
    fn test_duration_minimum() {
        let mut draft = TryOutDraft::default();
        assert_eq!(draft.set_duration("0"), Err(ValidationError::InvalidDuration));
        assert_eq!(draft.set_duration("abc"), Err(ValidationError::InvalidDuration));
        assert_eq!(draft.duration, DEFAULT_DURATION_MINUTES);
        assert!(draft.set_duration(" 90 ").is_ok());
        assert_eq!(draft.duration, 90);
    }

    #[test]
    fn test_incomplete_question_rejected() {
        let mut draft = TryOutDraft {
            title: "TO 1".to_string(),
            ..Default::default()
        };
        draft.questions[0] = complete_question();
        let idx = draft.add_question();
        draft.questions[idx].question = "Kosong".to_string();
        assert_eq!(
            draft.validate().unwrap_err(),
            ValidationError::IncompleteQuestion(2)
        );

        draft.questions[idx] = complete_question();
        let payload = draft.validate().unwrap();
        assert_eq!(payload.questions.len(), 2);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["duration"], 60);
        assert_eq!(json["questions"][0]["correctAnswer"], "9");
        assert!(json["questions"][0]["id"].as_str().is_some());
    }

    #[test]
    fn test_listed_tryout_counts() {
        let listed: TryOut = serde_json::from_str(
            r#"{"_id":"t1","title":"TO","duration":90,"questionsCount":40}"#,
        )
        .unwrap();
        assert_eq!(listed.question_count(), 40);
        assert_eq!(listed.duration_minutes(), 90);

        let bare: TryOut = serde_json::from_str(r#"{"id":"t2","title":"TO 2"}"#).unwrap();
        assert_eq!(bare.question_count(), 0);
        assert_eq!(bare.duration_minutes(), 0);
    }

    #[test]
    fn test_parse_tryout_with_both_ids() {
        let tryout: TryOut = serde_json::from_str(
            r#"{
                "_id": "t3", "id": "t3", "title": "TO 3",
                "questions": [
                    {"_id": "x1", "id": "x1", "question": "1 + 1?", "options": ["1","2","3","4","5"], "correctAnswer": "2"},
                    {"question": "Tanpa id"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(tryout.id, "t3");
        assert_eq!(tryout.question_count(), 2);
        assert_eq!(tryout.questions[0].id, "x1");
        assert_eq!(tryout.questions[0].correct_label(), Some('B'));
        assert_eq!(tryout.questions[1].id, "");
    }
}
