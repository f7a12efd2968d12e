//! Data models for quiz platform entities.
//!
//! Records returned by the backend (`User`, `Subject`, `Chapter`,
//! `QuizQuestion`, `TryOut`, `Info`, `TryOutAnalytics`) and the drafts the
//! console builds from form input before submitting them. Drafts validate
//! locally and produce the JSON or multipart payload the backend expects.

pub mod analytics;
pub mod chapter;
pub mod info;
pub mod quiz;
pub mod subject;
pub mod tryout;
pub mod user;

pub use analytics::{Participant, TryOutAnalytics};
pub use chapter::{Chapter, ChapterDraft};
pub use info::{Info, InfoDraft};
pub use quiz::{QuizDraft, QuizQuestion, OPTION_COUNT, OPTION_LABELS};
pub use subject::{Subject, SubjectDraft};
pub use tryout::{TryOut, TryOutDraft, TryOutQuestionDraft, DEFAULT_DURATION_MINUTES};
pub use user::{User, STUDENT_ROLE};

use thiserror::Error;

/// Local rejection of a draft before anything is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Duration must be at least 1 minute")]
    InvalidDuration,

    #[error("The correct answer must be one of the filled options")]
    CorrectAnswerNotAnOption,

    #[error("A try-out needs at least one question")]
    NoQuestions,

    #[error("All questions and answer options must be filled in (question {0} is incomplete)")]
    IncompleteQuestion(usize),
}

/// Ids come back as Mongo-style strings from most endpoints and as numbers
/// from a few; both are kept as strings.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de;

    struct IdVisitor;

    impl<'de> de::Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string or number id")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

/// Both id keys of a record. Documents serialized with virtuals carry `id`
/// next to `_id`; older endpoints send only `_id`.
#[derive(Debug, Default, serde::Deserialize)]
pub(crate) struct RecordIds {
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    id: Option<String>,
    #[serde(rename = "_id", default, deserialize_with = "deserialize_opt_id")]
    object_id: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("missing field `id`")]
pub struct MissingId;

impl RecordIds {
    /// `id` when present and non-empty, else `_id`.
    pub(crate) fn resolve(self) -> Option<String> {
        self.id.filter(|id| !id.is_empty()).or(self.object_id)
    }

    pub(crate) fn require(self) -> Result<String, MissingId> {
        self.resolve().ok_or(MissingId)
    }
}

struct RawId(String);

impl<'de> serde::Deserialize<'de> for RawId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserialize_id(deserializer).map(RawId)
    }
}

fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|RawId(id)| id))
}

/// Trimmed copy of a required field, or the error naming it.
pub(crate) fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct WithId {
        #[serde(deserialize_with = "deserialize_id")]
        id: String,
    }

    #[test]
    fn test_id_accepts_string_or_number() {
        let parsed: WithId = serde_json::from_str(r#"{"id":"65f0c2"}"#).unwrap();
        assert_eq!(parsed.id, "65f0c2");
        let parsed: WithId = serde_json::from_str(r#"{"id":42}"#).unwrap();
        assert_eq!(parsed.id, "42");
        assert!(serde_json::from_str::<WithId>(r#"{"id":true}"#).is_err());
    }

    #[derive(Deserialize)]
    struct Keyed {
        #[serde(flatten)]
        ids: RecordIds,
        #[serde(default)]
        title: String,
    }

    #[test]
    fn test_record_ids_prefer_id_over_object_id() {
        let both: Keyed =
            serde_json::from_str(r#"{"_id":"65f0c2","id":"65f0c2-v","title":"Fisika"}"#).unwrap();
        assert_eq!(both.title, "Fisika");
        assert_eq!(both.ids.resolve().as_deref(), Some("65f0c2-v"));

        let object_only: Keyed = serde_json::from_str(r#"{"_id":7}"#).unwrap();
        assert_eq!(object_only.ids.require(), Ok("7".to_string()));

        let empty_id: Keyed = serde_json::from_str(r#"{"id":"","_id":"a1"}"#).unwrap();
        assert_eq!(empty_id.ids.resolve().as_deref(), Some("a1"));

        let null_id: Keyed = serde_json::from_str(r#"{"id":null,"_id":"a2"}"#).unwrap();
        assert_eq!(null_id.ids.resolve().as_deref(), Some("a2"));

        let none: Keyed = serde_json::from_str(r#"{"title":"x"}"#).unwrap();
        assert_eq!(none.ids.require(), Err(MissingId));
    }

    #[test]
    fn test_required_trims() {
        assert_eq!(required("  Fisika ", "Title").unwrap(), "Fisika");
        assert_eq!(required("   ", "Title"), Err(ValidationError::Required("Title")));
        assert_eq!(
            ValidationError::Required("Title").to_string(),
            "Title is required"
        );
    }
}
