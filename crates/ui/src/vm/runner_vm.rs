use chrono::{DateTime, Utc};
use services::{ContentStatus, SessionRunner};
use study_core::ScoreDenominator;
use study_core::model::{Phase, Question, QuestionKind, SessionState, StudyContent, format_elapsed};

/// Everything the runner view renders, derived from the runner and the current time.
#[derive(Clone, Debug, PartialEq)]
pub struct RunnerVm {
    pub topic: String,
    pub difficulty_label: &'static str,
    pub focus_label: &'static str,
    pub elapsed_label: String,
    pub body: RunnerBodyVm,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RunnerBodyVm {
    Loading,
    Unavailable,
    Concepts(ConceptsVm),
    Practice(QuestionVm),
    Review(ReviewVm),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConceptsVm {
    pub concepts: Vec<String>,
    pub question_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub text: String,
    pub selected: bool,
    /// Set once the explanation is visible.
    pub correct: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub id: String,
    pub position_label: String,
    pub progress_percent: u8,
    pub kind_label: &'static str,
    pub prompt: String,
    pub options: Vec<OptionVm>,
    pub open_ended: bool,
    pub answer: Option<String>,
    pub explanation: Option<String>,
    /// `Some` only for a scored question whose explanation is visible.
    pub answered_correctly: Option<bool>,
    pub is_first: bool,
    pub is_last: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewItemVm {
    pub prompt: String,
    pub your_answer: String,
    pub correct_answer: Option<String>,
    pub correct: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewVm {
    pub score_label: String,
    pub tally_label: String,
    pub denominator_note: Option<&'static str>,
    pub summary: String,
    pub items: Vec<ReviewItemVm>,
}

impl RunnerVm {
    #[must_use]
    pub fn from_runner(runner: &SessionRunner, now: DateTime<Utc>) -> Self {
        let params = runner.params();
        let body = match runner.content_status() {
            ContentStatus::Loading => RunnerBodyVm::Loading,
            ContentStatus::Unavailable => RunnerBodyVm::Unavailable,
            ContentStatus::Ready(content) => body_for(runner, content),
        };
        Self {
            topic: params.topic().to_string(),
            difficulty_label: params.difficulty().label(),
            focus_label: params.focus().label(),
            elapsed_label: format_elapsed(runner.elapsed(now)),
            body,
        }
    }
}

fn body_for(runner: &SessionRunner, content: &StudyContent) -> RunnerBodyVm {
    let state = runner.state();
    match state.phase() {
        Phase::Concepts => RunnerBodyVm::Concepts(ConceptsVm {
            concepts: content.concepts().to_vec(),
            question_count: content.questions().len(),
        }),
        Phase::Practice => match content.question(state.current_question_index()) {
            Some(question) => RunnerBodyVm::Practice(question_vm(state, content, question)),
            None => RunnerBodyVm::Unavailable,
        },
        Phase::Review => RunnerBodyVm::Review(review_vm(runner, content)),
    }
}

fn question_vm(state: &SessionState, content: &StudyContent, question: &Question) -> QuestionVm {
    let index = state.current_question_index();
    let total = content.questions().len();
    let answer = state.answers().get(question.id()).map(str::to_string);
    let revealed = state.explanation_visible();

    let options = question
        .options()
        .unwrap_or_default()
        .iter()
        .map(|option| OptionVm {
            text: option.clone(),
            selected: answer.as_deref() == Some(option.as_str()),
            correct: revealed.then(|| question.correct_answer() == Some(option.as_str())),
        })
        .collect();

    let answered_correctly = match (revealed, question.correct_answer(), answer.as_deref()) {
        (true, Some(correct), Some(given)) => Some(correct == given),
        _ => None,
    };

    QuestionVm {
        id: question.id().to_string(),
        position_label: format!("Question {} of {total}", index + 1),
        progress_percent: percent_of(index + 1, total),
        kind_label: kind_label(question.kind()),
        prompt: question.prompt().to_string(),
        options,
        open_ended: !question.kind().has_options(),
        answer,
        explanation: revealed.then(|| question.explanation().to_string()),
        answered_correctly,
        is_first: index == 0,
        is_last: index == content.last_index(),
    }
}

fn review_vm(runner: &SessionRunner, content: &StudyContent) -> ReviewVm {
    let answers = runner.state().answers();
    let score = runner.score().unwrap_or(0);
    let breakdown = runner.breakdown();
    let tally_label = breakdown.map_or_else(String::new, |b| {
        format!(
            "{} correct of {} graded questions, {} of {} answered",
            b.correct, b.scored_questions, b.answered, b.total_questions
        )
    });
    let has_open_ended = content.questions().iter().any(|q| !q.is_scored());
    let denominator_note = (has_open_ended
        && runner.score_denominator() == ScoreDenominator::AllQuestions)
        .then_some("Open-ended questions count toward the total but are not graded.");

    let items = content
        .questions()
        .iter()
        .map(|question| {
            let given = answers.get(question.id());
            ReviewItemVm {
                prompt: question.prompt().to_string(),
                your_answer: given.unwrap_or("No answer").to_string(),
                correct_answer: question.correct_answer().map(str::to_string),
                correct: question
                    .correct_answer()
                    .map(|correct| given == Some(correct)),
            }
        })
        .collect();

    ReviewVm {
        score_label: format!("{score}%"),
        tally_label,
        denominator_note,
        summary: content.summary().to_string(),
        items,
    }
}

fn kind_label(kind: QuestionKind) -> &'static str {
    match kind {
        QuestionKind::MultipleChoice => "Multiple choice",
        QuestionKind::TrueFalse => "True or false",
        QuestionKind::OpenEnded => "Open-ended",
    }
}

fn percent_of(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    u8::try_from((part * 100) / total).unwrap_or(100)
}
