use std::error::Error;
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use uuid::Uuid;

use super::interaction::{AnswerGroup, CustomizationArgs, Outcome};

pub type HostResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

pub type RenderTask = Box<dyn FnOnce() + Send + 'static>;

pub trait RetrieveCustomizationArgs {
    async fn retrieve_customization_args(&self) -> HostResult<CustomizationArgs>;
}

pub trait SaveCustomizationArgs {
    async fn save_customization_args(&self, new_value: CustomizationArgs) -> HostResult<()>;
}

pub trait RetrieveAnswerGroups {
    async fn retrieve_answer_groups(&self) -> HostResult<Vec<AnswerGroup>>;
}

pub trait SaveAnswerGroups {
    async fn save_answer_groups(&self, new_value: Vec<AnswerGroup>) -> HostResult<()>;
}

pub trait RetrieveDefaultOutcome {
    async fn retrieve_default_outcome(&self) -> HostResult<Outcome>;
}

pub trait SaveDefaultOutcome {
    async fn save_default_outcome(&self, new_value: Outcome) -> HostResult<()>;
}

pub trait AddState {
    async fn add_state(&self) -> HostResult<String>;
}

pub trait DeferUntilRendered {
    fn defer_until_rendered(&self, task: RenderTask);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSnapshot {
    pub customization_args: CustomizationArgs,
    pub answer_groups: Vec<AnswerGroup>,
    pub default_outcome: Outcome,
    pub states: Vec<String>,
    pub revision: u64,
}

// Stand-in for the enclosing exploration editor: holds the one question
// document the widget edits and the tasks waiting on the next render pass.
pub struct InMemoryDocument {
    state: Mutex<DocumentSnapshot>,
    deferred: Mutex<Vec<RenderTask>>,
}

impl InMemoryDocument {
    pub fn new<I, S>(state_name: impl Into<String>, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            state: Mutex::new(DocumentSnapshot {
                customization_args: CustomizationArgs::with_choices(
                    choices.into_iter().map(Into::into).collect(),
                ),
                answer_groups: Vec::new(),
                default_outcome: Outcome {
                    dest: state_name.into(),
                    feedback: Vec::new(),
                    param_changes: Vec::new(),
                },
                states: Vec::new(),
                revision: 0,
            }),
            deferred: Mutex::new(Vec::new()),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, DocumentSnapshot> {
        self.state.lock().expect("Document state lock poisoned.")
    }

    pub fn snapshot(&self) -> DocumentSnapshot {
        self.lock_state().clone()
    }

    pub fn revision(&self) -> u64 {
        self.lock_state().revision
    }

    pub fn states(&self) -> Vec<String> {
        self.lock_state().states.clone()
    }

    pub fn complete_render(&self) {
        let tasks: Vec<RenderTask> = self
            .deferred
            .lock()
            .expect("Deferred task lock poisoned.")
            .drain(..)
            .collect();
        for task in tasks {
            task();
        }
    }
}

impl RetrieveCustomizationArgs for InMemoryDocument {
    async fn retrieve_customization_args(&self) -> HostResult<CustomizationArgs> {
        Ok(self.lock_state().customization_args.clone())
    }
}

impl SaveCustomizationArgs for InMemoryDocument {
    async fn save_customization_args(&self, new_value: CustomizationArgs) -> HostResult<()> {
        let mut state = self.lock_state();
        log::debug!("Replacing customization args: {:?}", new_value);
        state.customization_args = new_value;
        state.revision += 1;
        Ok(())
    }
}

impl RetrieveAnswerGroups for InMemoryDocument {
    async fn retrieve_answer_groups(&self) -> HostResult<Vec<AnswerGroup>> {
        Ok(self.lock_state().answer_groups.clone())
    }
}

impl SaveAnswerGroups for InMemoryDocument {
    async fn save_answer_groups(&self, new_value: Vec<AnswerGroup>) -> HostResult<()> {
        let mut state = self.lock_state();
        log::debug!("Replacing answer groups: {:?}", new_value);
        state.answer_groups = new_value;
        state.revision += 1;
        Ok(())
    }
}

impl RetrieveDefaultOutcome for InMemoryDocument {
    async fn retrieve_default_outcome(&self) -> HostResult<Outcome> {
        Ok(self.lock_state().default_outcome.clone())
    }
}

impl SaveDefaultOutcome for InMemoryDocument {
    async fn save_default_outcome(&self, new_value: Outcome) -> HostResult<()> {
        let mut state = self.lock_state();
        log::debug!("Replacing default outcome: {:?}", new_value);
        state.default_outcome = new_value;
        state.revision += 1;
        Ok(())
    }
}

impl AddState for InMemoryDocument {
    async fn add_state(&self) -> HostResult<String> {
        let mut state = self.lock_state();
        let name = Uuid::new_v4().to_string();
        log::debug!("Adding destination state '{}'", name);
        state.states.push(name.clone());
        state.revision += 1;
        Ok(name)
    }
}

impl DeferUntilRendered for InMemoryDocument {
    fn defer_until_rendered(&self, task: RenderTask) {
        self.deferred
            .lock()
            .expect("Deferred task lock poisoned.")
            .push(task);
    }
}
