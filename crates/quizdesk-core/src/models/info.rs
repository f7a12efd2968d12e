use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{required, MissingId, RecordIds, ValidationError};

/// Informational banner shown to students.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawInfo")]
pub struct Info {
    pub id: String,
    pub title: String,
    /// File name under `/uploads/images`
    pub image_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInfo {
    #[serde(flatten)]
    ids: RecordIds,
    #[serde(default)]
    title: String,
    #[serde(default)]
    image_url: Option<String>,
}

impl TryFrom<RawInfo> for Info {
    type Error = MissingId;

    fn try_from(raw: RawInfo) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.ids.require()?,
            title: raw.title,
            image_url: raw.image_url,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoDraft {
    pub title: String,
    pub image: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfoUpload {
    pub title: String,
    pub image: PathBuf,
}

impl InfoDraft {
    pub fn validate(&self) -> Result<InfoUpload, ValidationError> {
        let title = required(&self.title, "Title")?;
        let image = self
            .image
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(ValidationError::Required("Image"))?;
        Ok(InfoUpload { title, image })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_info_with_both_ids() {
        let info: Info = serde_json::from_str(
            r#"{"_id":"i1","id":"i1","title":"Libur","imageUrl":"banner.png"}"#,
        )
        .unwrap();
        assert_eq!(info.id, "i1");
        assert_eq!(info.image_url.as_deref(), Some("banner.png"));
    }

    #[test]
    fn test_title_and_image_required() {
        let mut draft = InfoDraft::default();
        assert_eq!(draft.validate().unwrap_err(), ValidationError::Required("Title"));

        draft.title = "Libur semester".to_string();
        assert_eq!(draft.validate().unwrap_err(), ValidationError::Required("Image"));

        draft.image = Some(PathBuf::from("banner.png"));
        let upload = draft.validate().unwrap();
        assert_eq!(upload.image, PathBuf::from("banner.png"));
    }
}
