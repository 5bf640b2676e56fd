use services::ProgressOverview;

use super::time_fmt::{format_datetime, format_study_time};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecentTopicVm {
    pub topic: String,
    pub detail: String,
    pub score_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressVm {
    pub sessions_label: String,
    pub average_label: String,
    pub study_time_label: String,
    pub has_sessions: bool,
    pub recent: Vec<RecentTopicVm>,
}

#[must_use]
pub fn map_progress(overview: &ProgressOverview) -> ProgressVm {
    let recent = overview
        .recent_topics
        .iter()
        .map(|item| RecentTopicVm {
            topic: item.topic.clone(),
            detail: format!(
                "{} · {}",
                item.difficulty.label(),
                format_datetime(item.ended_at)
            ),
            score_label: item
                .score
                .map_or_else(|| "not scored".to_string(), |score| format!("{score}%")),
        })
        .collect();

    ProgressVm {
        sessions_label: overview.sessions_completed.to_string(),
        average_label: overview
            .average_score
            .map_or_else(|| "–".to_string(), |score| format!("{score}%")),
        study_time_label: format_study_time(overview.total_study_time),
        has_sessions: overview.sessions_completed > 0,
        recent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use services::RecentTopic;
    use study_core::model::Difficulty;
    use study_core::time::fixed_now;

    #[test]
    fn empty_overview_maps_to_placeholders() {
        let vm = map_progress(&ProgressOverview::from_records(&[], 5));
        assert!(!vm.has_sessions);
        assert_eq!(vm.sessions_label, "0");
        assert_eq!(vm.average_label, "–");
        assert_eq!(vm.study_time_label, "0m");
        assert!(vm.recent.is_empty());
    }

    #[test]
    fn recent_topics_carry_score_labels() {
        let overview = ProgressOverview {
            sessions_completed: 2,
            average_score: Some(84),
            total_study_time: Duration::minutes(42),
            recent_topics: vec![
                RecentTopic {
                    topic: "Rust".into(),
                    difficulty: Difficulty::Advanced,
                    ended_at: fixed_now(),
                    score: Some(100),
                },
                RecentTopic {
                    topic: "Go".into(),
                    difficulty: Difficulty::Beginner,
                    ended_at: fixed_now(),
                    score: None,
                },
            ],
        };
        let vm = map_progress(&overview);
        assert_eq!(vm.average_label, "84%");
        assert_eq!(vm.study_time_label, "42m");
        assert_eq!(vm.recent[0].score_label, "100%");
        assert_eq!(vm.recent[1].score_label, "not scored");
        assert!(vm.recent[0].detail.starts_with("Advanced"));
    }
}
