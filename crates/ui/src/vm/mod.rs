mod form_vm;
mod notification;
mod progress_vm;
mod runner_vm;
mod time_fmt;

pub use form_vm::{ChoiceVm, SessionFormVm, difficulty_choices, focus_choices};
pub use notification::{NOTIFICATION_TIMEOUT, Notification, NotificationKind};
pub use progress_vm::{ProgressVm, RecentTopicVm, map_progress};
pub use runner_vm::{
    ConceptsVm, OptionVm, QuestionVm, ReviewItemVm, ReviewVm, RunnerBodyVm, RunnerVm,
};
pub use time_fmt::{format_datetime, format_study_time};
