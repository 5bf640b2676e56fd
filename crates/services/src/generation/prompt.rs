use study_core::model::{Difficulty, Focus, SessionParameters};

/// System instruction for chat generators. Replies must be bare JSON.
pub const SYSTEM_PROMPT: &str = "You are a study assistant that writes structured study sessions. \
Reply with a single JSON object and nothing else. The object has the keys \
\"concepts\" (array of strings), \"questions\" (array) and \"summary\" (string). \
Every question has \"question\", \"type\" (one of \"multiple-choice\", \"true-false\", \
\"open-ended\") and \"explanation\". Multiple-choice and true-false questions also have \
\"options\" (array of strings) and \"correctAnswer\" (exactly one of the options).";

#[must_use]
pub fn build_user_prompt(params: &SessionParameters) -> String {
    format!(
        "Create a study session about \"{topic}\" for a {level} learner.\n\
         {level_hint}\n\
         {focus_hint}\n\
         Include 3 to 5 key concepts and 3 to 5 practice questions that mix \
         multiple-choice, true-false and open-ended types, then a short summary.",
        topic = params.topic(),
        level = params.difficulty().as_str(),
        level_hint = difficulty_hint(params.difficulty()),
        focus_hint = focus_hint(params.focus()),
    )
}

fn difficulty_hint(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Beginner => "Assume no prior knowledge and define every term.",
        Difficulty::Intermediate => "Assume the basics are known; connect ideas and use examples.",
        Difficulty::Advanced => "Go into edge cases, trade-offs and precise terminology.",
    }
}

fn focus_hint(focus: Focus) -> &'static str {
    match focus {
        Focus::Concepts => "Spend most of the effort on clear concept explanations.",
        Focus::Practice => "Favor practice questions with detailed explanations.",
        Focus::Review => "Write it as a recap: a dense summary and recall questions.",
        Focus::Mixed => "Balance explanations, practice and review.",
    }
}
