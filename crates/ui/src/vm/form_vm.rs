use study_core::model::{
    Difficulty, Focus, FormField, FormValidationError, SessionParameters, SessionParametersDraft,
};

/// One entry of a select control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceVm {
    pub value: &'static str,
    pub label: &'static str,
}

#[must_use]
pub fn difficulty_choices() -> Vec<ChoiceVm> {
    Difficulty::ALL
        .into_iter()
        .map(|level| ChoiceVm {
            value: level.as_str(),
            label: level.label(),
        })
        .collect()
}

#[must_use]
pub fn focus_choices() -> Vec<ChoiceVm> {
    Focus::ALL
        .into_iter()
        .map(|focus| ChoiceVm {
            value: focus.as_str(),
            label: focus.label(),
        })
        .collect()
}

/// Session form state: the raw draft plus the errors of the last submit.
///
/// Errors only appear after a submit attempt; after that, edits re-validate
/// so fixed fields clear their message immediately.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionFormVm {
    draft: SessionParametersDraft,
    errors: Vec<FormValidationError>,
    attempted: bool,
}

impl SessionFormVm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.draft.topic
    }

    #[must_use]
    pub fn difficulty(&self) -> &str {
        &self.draft.difficulty
    }

    #[must_use]
    pub fn focus(&self) -> &str {
        &self.draft.focus
    }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.draft.topic = topic.into();
        self.revalidate();
    }

    pub fn set_difficulty(&mut self, difficulty: impl Into<String>) {
        self.draft.difficulty = difficulty.into();
        self.revalidate();
    }

    pub fn set_focus(&mut self, focus: impl Into<String>) {
        self.draft.focus = focus.into();
        self.revalidate();
    }

    /// Validate the draft. Field values are kept either way.
    ///
    /// # Errors
    ///
    /// Returns every field error found; they are also kept for inline display.
    pub fn submit(&mut self) -> Result<SessionParameters, Vec<FormValidationError>> {
        self.attempted = true;
        match self.draft.validate_all() {
            Ok(params) => {
                self.errors.clear();
                Ok(params)
            }
            Err(errors) => {
                self.errors.clone_from(&errors);
                Err(errors)
            }
        }
    }

    /// Back to defaults, called once a session ends.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    #[must_use]
    pub fn error_for(&self, field: FormField) -> Option<String> {
        self.errors
            .iter()
            .find(|err| err.field() == field)
            .map(field_message)
    }

    fn revalidate(&mut self) {
        if !self.attempted {
            return;
        }
        self.errors = match self.draft.validate_all() {
            Ok(_) => Vec::new(),
            Err(errors) => errors,
        };
    }
}

fn field_message(err: &FormValidationError) -> String {
    match err {
        FormValidationError::TopicRequired => "Please enter a topic to study.".to_string(),
        FormValidationError::TopicTooShort { min } => {
            format!("Topic must be at least {min} characters.")
        }
        FormValidationError::InvalidDifficulty(_) => "Choose a difficulty level.".to_string(),
        FormValidationError::InvalidFocus(_) => "Choose a focus area.".to_string(),
        _ => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_beginner_and_mixed() {
        let form = SessionFormVm::new();
        assert_eq!(form.topic(), "");
        assert_eq!(form.difficulty(), "beginner");
        assert_eq!(form.focus(), "mixed");
        assert!(!form.has_errors());
    }

    #[test]
    fn errors_show_only_after_submit() {
        let mut form = SessionFormVm::new();
        form.set_topic("ab");
        assert_eq!(form.error_for(FormField::Topic), None);

        assert!(form.submit().is_err());
        assert_eq!(
            form.error_for(FormField::Topic).as_deref(),
            Some("Topic must be at least 3 characters.")
        );
        assert_eq!(form.topic(), "ab");
    }

    #[test]
    fn fixing_a_field_clears_its_error() {
        let mut form = SessionFormVm::new();
        assert!(form.submit().is_err());
        assert!(form.error_for(FormField::Topic).is_some());

        form.set_topic("Linear algebra");
        assert!(!form.has_errors());
    }

    #[test]
    fn valid_submit_keeps_fields_until_reset() {
        let mut form = SessionFormVm::new();
        form.set_topic("Linear algebra");
        form.set_difficulty("advanced");
        form.set_focus("practice");

        let params = form.submit().unwrap();
        assert_eq!(params.topic(), "Linear algebra");
        assert_eq!(params.difficulty(), Difficulty::Advanced);
        assert_eq!(params.focus(), Focus::Practice);
        assert_eq!(form.topic(), "Linear algebra");

        form.reset();
        assert_eq!(form, SessionFormVm::new());
    }

    #[test]
    fn unknown_select_values_are_reported_per_field() {
        let mut form = SessionFormVm::new();
        form.set_topic("Linear algebra");
        form.set_difficulty("expert");
        assert!(form.submit().is_err());
        assert!(form.error_for(FormField::Difficulty).is_some());
        assert_eq!(form.error_for(FormField::Topic), None);
    }

    #[test]
    fn choices_cover_every_variant() {
        assert_eq!(difficulty_choices().len(), 3);
        assert_eq!(focus_choices().len(), 4);
        assert_eq!(focus_choices()[3].label, "Mixed approach");
    }
}
