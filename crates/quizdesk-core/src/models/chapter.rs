use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{required, MissingId, RecordIds, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawChapter")]
pub struct Chapter {
    pub id: String,
    pub title: String,
    pub description: String,
    pub subject_id: Option<String>,
    /// File name under `/uploads/videos`
    pub video_url: Option<String>,
    /// File name under `/uploads/documents`
    pub document_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawChapter {
    #[serde(flatten)]
    ids: RecordIds,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    subject_id: Option<String>,
    #[serde(default)]
    video_url: Option<String>,
    #[serde(default)]
    document_url: Option<String>,
}

impl TryFrom<RawChapter> for Chapter {
    type Error = MissingId;

    fn try_from(raw: RawChapter) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.ids.require()?,
            title: raw.title,
            description: raw.description,
            subject_id: raw.subject_id,
            video_url: raw.video_url,
            document_url: raw.document_url,
        })
    }
}

impl Chapter {
    pub fn has_media(&self) -> bool {
        self.video().is_some() || self.document().is_some()
    }

    pub fn video(&self) -> Option<&str> {
        self.video_url.as_deref().filter(|v| !v.is_empty())
    }

    pub fn document(&self) -> Option<&str> {
        self.document_url.as_deref().filter(|d| !d.is_empty())
    }
}

/// Chapter form: text fields plus optional local files to upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChapterDraft {
    pub title: String,
    pub description: String,
    pub video: Option<PathBuf>,
    pub document: Option<PathBuf>,
}

/// Validated chapter, ready to be turned into a multipart form.
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterUpload {
    pub title: String,
    pub description: String,
    pub video: Option<PathBuf>,
    pub document: Option<PathBuf>,
}

impl ChapterDraft {
    /// Set a file field from raw input; blank input clears it.
    pub fn path_from_input(input: &str) -> Option<PathBuf> {
        let trimmed = input.trim();
        (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
    }

    pub fn validate(&self) -> Result<ChapterUpload, ValidationError> {
        Ok(ChapterUpload {
            title: required(&self.title, "Title")?,
            description: self.description.trim().to_string(),
            video: self.video.clone(),
            document: self.document.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_presence() {
        let chapter: Chapter = serde_json::from_str(
            r#"{"_id":"c1","title":"Bab 1","subjectId":"s1","videoUrl":"","documentUrl":"bab1.pdf"}"#,
        )
        .unwrap();
        assert_eq!(chapter.video(), None);
        assert_eq!(chapter.document(), Some("bab1.pdf"));
        assert!(chapter.has_media());
        assert_eq!(chapter.subject_id.as_deref(), Some("s1"));
    }

    #[test]
    fn test_parse_chapter_with_virtual_id() {
        let chapter: Chapter = serde_json::from_str(
            r#"{"_id":"c9","id":"c9","title":"Bab 9","subjectId":"s1"}"#,
        )
        .unwrap();
        assert_eq!(chapter.id, "c9");
        assert_eq!(chapter.title, "Bab 9");
        assert!(!chapter.has_media());
    }

    #[test]
    fn test_draft_paths() {
        assert_eq!(ChapterDraft::path_from_input("  "), None);
        assert_eq!(
            ChapterDraft::path_from_input(" /tmp/intro.mp4 "),
            Some(PathBuf::from("/tmp/intro.mp4"))
        );

        let draft = ChapterDraft {
            title: "Bab 2".to_string(),
            ..Default::default()
        };
        let upload = draft.validate().unwrap();
        assert_eq!(upload.title, "Bab 2");
        assert!(upload.video.is_none() && upload.document.is_none());
    }
}
