use serde::{Deserialize, Serialize};

use super::{MissingId, RecordIds};

/// Role assigned to student accounts; the users page lists only these.
pub const STUDENT_ROLE: &str = "siswa";

/// Identity record returned by `/auth/me` and `/users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawUser")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUser {
    #[serde(flatten)]
    ids: RecordIds,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    role: String,
    #[serde(default)]
    created_at: Option<String>,
}

impl TryFrom<RawUser> for User {
    type Error = MissingId;

    fn try_from(raw: RawUser) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.ids.require()?,
            name: raw.name,
            email: raw.email,
            role: raw.role,
            created_at: raw.created_at,
        })
    }
}

impl User {
    pub fn is_student(&self) -> bool {
        self.role == STUDENT_ROLE
    }

    /// Name for greetings, with a fallback for accounts without one.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "User"
        } else {
            &self.name
        }
    }

    /// Students only, in backend order.
    pub fn students(users: Vec<User>) -> Vec<User> {
        users.into_iter().filter(User::is_student).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mongo_user() {
        let json = r#"{
            "_id": "6650a1",
            "name": "Sari",
            "email": "sari@example.com",
            "role": "siswa",
            "createdAt": "2024-05-24T08:30:00.000Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "6650a1");
        assert!(user.is_student());
        assert_eq!(user.created_at.as_deref(), Some("2024-05-24T08:30:00.000Z"));
    }

    #[test]
    fn test_parse_user_with_virtual_id() {
        let user: User = serde_json::from_str(
            r#"{"_id":"6650a1","id":"6650a1","name":"Sari","email":"sari@example.com","role":"siswa"}"#,
        )
        .unwrap();
        assert_eq!(user.id, "6650a1");
        assert_eq!(user.email, "sari@example.com");

        assert!(serde_json::from_str::<User>(r#"{"name":"Tanpa Id"}"#).is_err());
    }

    #[test]
    fn test_students_filter_and_display_name() {
        let users: Vec<User> = serde_json::from_str(
            r#"[
                {"id": 1, "name": "Admin", "role": "admin"},
                {"id": 2, "name": "", "role": "siswa"},
                {"id": 3, "name": "Budi", "role": "siswa"}
            ]"#,
        )
        .unwrap();
        let students = User::students(users);
        assert_eq!(students.len(), 2);
        assert_eq!(students[0].display_name(), "User");
        assert_eq!(students[1].display_name(), "Budi");
    }
}
