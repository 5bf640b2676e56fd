mod home;
mod notification;
mod session_form;
mod session_runner;
mod state;
mod widgets;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use home::HomeView;
pub use notification::{NotificationToast, show_notification};
pub use session_form::SessionFormView;
pub use session_runner::{SessionRunnerView, start_generation};
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use widgets::ProgressWidgets;
