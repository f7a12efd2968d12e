use serde::{Deserialize, Serialize};

use super::{required, MissingId, RecordIds, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawSubject")]
pub struct Subject {
    pub id: String,
    pub title: String,
    pub description: String,
}

#[derive(Deserialize)]
struct RawSubject {
    #[serde(flatten)]
    ids: RecordIds,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

impl TryFrom<RawSubject> for Subject {
    type Error = MissingId;

    fn try_from(raw: RawSubject) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.ids.require()?,
            title: raw.title,
            description: raw.description,
        })
    }
}

/// Create/edit form contents for a subject.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubjectDraft {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectPayload {
    pub title: String,
    pub description: String,
}

impl SubjectDraft {
    pub fn from_subject(subject: &Subject) -> Self {
        Self {
            title: subject.title.clone(),
            description: subject.description.clone(),
        }
    }

    pub fn validate(&self) -> Result<SubjectPayload, ValidationError> {
        Ok(SubjectPayload {
            title: required(&self.title, "Title")?,
            description: self.description.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_requires_title() {
        let draft = SubjectDraft {
            title: " ".to_string(),
            description: "Aljabar".to_string(),
        };
        assert_eq!(draft.validate().unwrap_err(), ValidationError::Required("Title"));
    }

    #[test]
    fn test_parse_subject_with_both_ids() {
        let subjects: Vec<Subject> = serde_json::from_str(
            r#"[{"_id":"s1","id":"s1","title":"Matematika"},{"_id":"s2","title":"Fisika"}]"#,
        )
        .unwrap();
        let ids: Vec<&str> = subjects.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s2"]);
        assert_eq!(subjects[0].description, "");
    }

    #[test]
    fn test_edit_draft_starts_from_subject() {
        let subject: Subject =
            serde_json::from_str(r#"{"_id":"s1","title":"Matematika","description":"Dasar"}"#)
                .unwrap();
        let draft = SubjectDraft::from_subject(&subject);
        let payload = draft.validate().unwrap();
        assert_eq!(payload.title, "Matematika");
        assert_eq!(payload.description, "Dasar");
    }
}
