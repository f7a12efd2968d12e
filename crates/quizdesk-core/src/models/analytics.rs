use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(default)]
    pub name: String,
    /// Missing or null until the attempt is graded
    #[serde(default)]
    pub score: Option<f64>,
}

/// Aggregated results of one try-out package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TryOutAnalytics {
    #[serde(default)]
    pub participant_count: u32,
    #[serde(default)]
    pub average_score: Option<f64>,
    #[serde(default)]
    pub highest_score: Option<f64>,
    #[serde(default)]
    pub lowest_score: Option<f64>,
    #[serde(default)]
    pub participants: Vec<Participant>,
    /// Set by the backend instead of statistics when nothing is available
    #[serde(default)]
    pub message: Option<String>,
}

impl TryOutAnalytics {
    pub fn has_results(&self) -> bool {
        self.message.is_none() && self.participant_count > 0
    }

    /// Participants by score, best first; ungraded ones last.
    pub fn ranked_participants(&self) -> Vec<&Participant> {
        let mut ranked: Vec<&Participant> = self.participants.iter().collect();
        ranked.sort_by(|a, b| match (a.score, b.score) {
            (Some(a), Some(b)) => b.total_cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranking_descending() {
        let stats: TryOutAnalytics = serde_json::from_str(
            r#"{
                "participantCount": 3,
                "averageScore": 70.333,
                "highestScore": 90,
                "lowestScore": 51,
                "participants": [
                    {"name": "Ana", "score": 70},
                    {"name": "Budi", "score": 90},
                    {"name": "Cici", "score": 51}
                ]
            }"#,
        )
        .unwrap();
        assert!(stats.has_results());
        let names: Vec<&str> = stats.ranked_participants().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Budi", "Ana", "Cici"]);
    }

    #[test]
    fn test_null_score_ranks_last() {
        let stats: TryOutAnalytics = serde_json::from_str(
            r#"{
                "participantCount": 3,
                "participants": [
                    {"name": "Ana", "score": null},
                    {"name": "Budi", "score": 40.5},
                    {"name": "Cici"}
                ]
            }"#,
        )
        .unwrap();
        let ranked = stats.ranked_participants();
        let names: Vec<&str> = ranked.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Budi", "Ana", "Cici"]);
        assert_eq!(ranked[0].score, Some(40.5));
        assert_eq!(ranked[1].score, None);
    }

    #[test]
    fn test_empty_states() {
        let message: TryOutAnalytics =
            serde_json::from_str(r#"{"message":"Belum ada peserta"}"#).unwrap();
        assert!(!message.has_results());

        let zero: TryOutAnalytics = serde_json::from_str(r#"{"participantCount":0}"#).unwrap();
        assert!(!zero.has_results());
    }
}
