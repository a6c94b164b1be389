use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::instrument;

use crate::document::host::{
    AddState, DeferUntilRendered, RetrieveAnswerGroups, RetrieveCustomizationArgs,
    RetrieveDefaultOutcome, SaveAnswerGroups, SaveCustomizationArgs, SaveDefaultOutcome,
};
use crate::document::interaction::{AnswerGroup, Outcome};
use crate::error::{EditorError, Result};
use crate::focus::{FocusBus, FocusEvent};

// Editing surface for one multiple choice question. Holds no document state
// of its own: every operation reads fresh state from the host, computes a
// replacement, and hands it back through the matching save capability.
pub struct ChoiceSetEditor<Host> {
    question_id: String,
    host: Arc<Host>,
    focus: FocusBus,
}

impl<Host> ChoiceSetEditor<Host> {
    pub fn new(question_id: impl Into<String>, host: Arc<Host>, focus: FocusBus) -> Self {
        Self {
            question_id: question_id.into(),
            host,
            focus,
        }
    }

    pub fn question_id(&self) -> &str {
        &self.question_id
    }

    // The question id is just the state name and may contain spaces; the
    // field id uses it verbatim, no escaping.
    pub fn field_id(&self, index: usize) -> String {
        format!("{}.{}", self.question_id, index)
    }

    fn open_choice_editor(&self, index: usize) {
        self.focus.open_editor_field(self.field_id(index));
    }

    pub async fn listen_for_interaction_selected(
        &self,
        mut events: broadcast::Receiver<FocusEvent>,
    ) {
        loop {
            match events.recv().await {
                Ok(FocusEvent::NewInteractionSelected { target_id })
                    if target_id == self.question_id =>
                {
                    log::info!("Interaction '{}' selected, opening first choice", target_id);
                    self.open_choice_editor(0);
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    log::debug!("Focus listener for '{}' skipped {} events", self.question_id, skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }
}

impl<Host: RetrieveCustomizationArgs> ChoiceSetEditor<Host> {
    pub async fn choices(&self) -> Result<Vec<String>> {
        let args = self.host.retrieve_customization_args().await?;
        Ok(args.choices.value)
    }
}

impl<Host: RetrieveCustomizationArgs + SaveCustomizationArgs> ChoiceSetEditor<Host> {
    #[instrument(level = "info", skip(self))]
    pub async fn delete_choice(&self, index: usize) -> Result<()> {
        let mut new_args = self.host.retrieve_customization_args().await?;
        if new_args.choices.value.len() == 1 {
            return Err(EditorError::LastRemainingChoice);
        }

        new_args.choices.value.remove(index);

        // TODO: renumber rule indexes that point past the removed choice.
        self.host.save_customization_args(new_args).await?;
        log::info!("Deleted choice {} from '{}'", index, self.question_id);
        Ok(())
    }

    #[instrument(level = "info", skip(self))]
    pub async fn save_choice(&self, index: usize, new_value: String) -> Result<()> {
        let mut new_args = self.host.retrieve_customization_args().await?;
        new_args.choices.value[index] = new_value;
        self.host.save_customization_args(new_args).await?;
        Ok(())
    }
}

impl<Host: RetrieveCustomizationArgs + SaveCustomizationArgs + DeferUntilRendered>
    ChoiceSetEditor<Host>
{
    #[instrument(level = "info", skip(self))]
    pub async fn add_choice(&self) -> Result<()> {
        let mut new_args = self.host.retrieve_customization_args().await?;
        new_args.choices.value.push(String::new());
        let new_index = new_args.choices.value.len() - 1;
        self.host.save_customization_args(new_args).await?;
        log::info!("Added empty choice {} to '{}'", new_index, self.question_id);

        // The new input field exists only after the next render pass.
        let focus = self.focus.clone();
        let field_id = self.field_id(new_index);
        self.host
            .defer_until_rendered(Box::new(move || focus.open_editor_field(field_id)));

        Ok(())
    }
}

impl<Host: RetrieveAnswerGroups> ChoiceSetEditor<Host> {
    pub async fn is_correct_answer(&self, index: usize) -> Result<bool> {
        let answer_groups = self.host.retrieve_answer_groups().await?;
        Ok(answer_groups
            .first()
            .and_then(|group| group.rule_specs.first())
            .is_some_and(|rule| rule.inputs.x == index))
    }
}

impl<Host: RetrieveAnswerGroups + SaveAnswerGroups> ChoiceSetEditor<Host> {
    #[instrument(level = "info", skip(self))]
    pub async fn save_correct_answer_feedback(&self, new_feedback: String) -> Result<()> {
        let mut new_answer_groups = self.host.retrieve_answer_groups().await?;
        match new_answer_groups.first_mut() {
            Some(group) => group.outcome.set_feedback(new_feedback),
            None => return Err(EditorError::EmptyAnswerGroups),
        }
        self.host.save_answer_groups(new_answer_groups).await?;
        Ok(())
    }
}

impl<Host: RetrieveAnswerGroups + SaveAnswerGroups + AddState> ChoiceSetEditor<Host> {
    #[instrument(level = "info", skip(self))]
    pub async fn select_correct_answer(&self, index: usize) -> Result<()> {
        let mut new_answer_groups = self.host.retrieve_answer_groups().await?;
        match new_answer_groups.first_mut() {
            None => {
                let new_state_name = self.host.add_state().await?;
                log::info!(
                    "Choice {} of '{}' is now correct, routing to new state '{}'",
                    index,
                    self.question_id,
                    new_state_name
                );
                new_answer_groups.push(AnswerGroup::for_choice(new_state_name, index));
            }
            Some(group) => {
                log::info!("Choice {} of '{}' is now correct", index, self.question_id);
                if let Some(rule) = group.rule_specs.first_mut() {
                    rule.inputs.x = index;
                }
            }
        }
        self.host.save_answer_groups(new_answer_groups).await?;
        Ok(())
    }
}

impl<Host: RetrieveDefaultOutcome> ChoiceSetEditor<Host> {
    pub async fn default_outcome(&self) -> Result<Outcome> {
        let mut default_outcome = self.host.retrieve_default_outcome().await?;
        default_outcome.ensure_feedback();
        Ok(default_outcome)
    }
}

impl<Host: RetrieveDefaultOutcome + SaveDefaultOutcome> ChoiceSetEditor<Host> {
    #[instrument(level = "info", skip(self))]
    pub async fn save_default_feedback(&self, new_feedback: String) -> Result<()> {
        let mut new_default_outcome = self.default_outcome().await?;
        new_default_outcome.set_feedback(new_feedback);
        self.host.save_default_outcome(new_default_outcome).await?;
        Ok(())
    }
}
