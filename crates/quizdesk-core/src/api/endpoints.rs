//! Typed wrappers for every backend endpoint used by the console.

use reqwest::multipart::Form;
use serde::Serialize;
use tracing::debug;

use crate::models::chapter::ChapterUpload;
use crate::models::info::InfoUpload;
use crate::models::quiz::QuizPayload;
use crate::models::subject::SubjectPayload;
use crate::models::tryout::TryOutPayload;
use crate::models::{Chapter, Info, QuizQuestion, Subject, TryOut, TryOutAnalytics, User};

use super::{ApiClient, ApiError, ApiResult};

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub users: usize,
    pub subjects: usize,
    pub tryouts: usize,
}

impl ApiClient {
    // ===== Auth =====

    /// Exchange credentials for a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<String> {
        let body = self
            .post_value("/auth/login", &LoginRequest { email, password })
            .await?;

        body.get("token")
            .or_else(|| body.get("data").and_then(|d| d.get("token")))
            .and_then(|t| t.as_str())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ApiError::InvalidResponse("Login response has no token".to_string()))
    }

    pub async fn current_user(&self) -> ApiResult<User> {
        self.get("/auth/me").await
    }

    // ===== Subjects =====

    pub async fn subjects(&self) -> ApiResult<Vec<Subject>> {
        self.get("/subjects").await
    }

    pub async fn subject(&self, id: &str) -> ApiResult<Subject> {
        self.get(&format!("/subjects/{}", id)).await
    }

    pub async fn create_subject(&self, subject: &SubjectPayload) -> ApiResult<()> {
        self.post_value("/subjects", subject).await?;
        Ok(())
    }

    pub async fn update_subject(&self, id: &str, subject: &SubjectPayload) -> ApiResult<()> {
        self.put(&format!("/subjects/{}", id), subject).await
    }

    pub async fn delete_subject(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/subjects/{}", id)).await
    }

    // ===== Chapters =====

    pub async fn chapters(&self, subject_id: &str) -> ApiResult<Vec<Chapter>> {
        self.get(&format!("/chapters/for-subject/{}", subject_id)).await
    }

    pub async fn chapter(&self, id: &str) -> ApiResult<Chapter> {
        self.get(&format!("/chapters/{}", id)).await
    }

    /// Create a chapter, uploading its video and document when given.
    pub async fn create_chapter(&self, subject_id: &str, chapter: &ChapterUpload) -> ApiResult<()> {
        let mut form = Form::new()
            .text("title", chapter.title.clone())
            .text("description", chapter.description.clone());

        if let Some(video) = &chapter.video {
            form = form.part("video", Self::file_part(video).await?);
        }
        if let Some(document) = &chapter.document {
            form = form.part("document", Self::file_part(document).await?);
        }

        debug!(
            subject_id,
            video = chapter.video.is_some(),
            document = chapter.document.is_some(),
            "Uploading chapter"
        );
        self.post_multipart(&format!("/chapters/for-subject/{}", subject_id), form)
            .await
    }

    pub async fn delete_chapter(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/chapters/{}", id)).await
    }

    // ===== Quizzes =====

    pub async fn quizzes(&self, chapter_id: &str) -> ApiResult<Vec<QuizQuestion>> {
        self.get(&format!("/quizzes/for-chapter/{}", chapter_id)).await
    }

    pub async fn create_quiz(&self, chapter_id: &str, quiz: &QuizPayload) -> ApiResult<()> {
        self.post_value(&format!("/quizzes/for-chapter/{}", chapter_id), quiz)
            .await?;
        Ok(())
    }

    pub async fn update_quiz(&self, id: &str, quiz: &QuizPayload) -> ApiResult<()> {
        self.put(&format!("/quizzes/{}", id), quiz).await
    }

    pub async fn delete_quiz(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/quizzes/{}", id)).await
    }

    // ===== Try-outs =====

    pub async fn tryouts(&self) -> ApiResult<Vec<TryOut>> {
        self.get("/tryouts").await
    }

    pub async fn tryout(&self, id: &str) -> ApiResult<TryOut> {
        self.get(&format!("/tryouts/{}", id)).await
    }

    pub async fn create_tryout(&self, tryout: &TryOutPayload) -> ApiResult<()> {
        self.post_value("/tryouts", tryout).await?;
        Ok(())
    }

    pub async fn delete_tryout(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/tryouts/{}", id)).await
    }

    pub async fn tryout_analytics(&self, id: &str) -> ApiResult<TryOutAnalytics> {
        let body = self.get_value(&format!("/analytics/tryout/{}", id)).await?;
        if body.is_null() {
            return Ok(TryOutAnalytics::default());
        }
        Self::unwrap_data::<Option<TryOutAnalytics>>(body).map(Option::unwrap_or_default)
    }

    // ===== Users =====

    pub async fn users(&self) -> ApiResult<Vec<User>> {
        self.get("/users").await
    }

    pub async fn delete_user(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/users/{}", id)).await
    }

    // ===== Info banners =====

    pub async fn infos(&self) -> ApiResult<Vec<Info>> {
        self.get("/infos").await
    }

    pub async fn create_info(&self, info: &InfoUpload) -> ApiResult<()> {
        let form = Form::new()
            .text("title", info.title.clone())
            .part("image", Self::file_part(&info.image).await?);
        self.post_multipart("/infos", form).await
    }

    pub async fn delete_info(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/infos/{}", id)).await
    }

    // ===== Dashboard =====

    /// Fetch the three dashboard counts concurrently. Any failure fails the whole.
    pub async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        let (users, subjects, tryouts) =
            futures::try_join!(self.users(), self.subjects(), self.tryouts())?;

        Ok(DashboardStats {
            users: users.len(),
            subjects: subjects.len(),
            tryouts: tryouts.len(),
        })
    }
}
