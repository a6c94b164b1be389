use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Cannot delete choice when there is only 1 choice remaining.")]
    LastRemainingChoice,
    #[error("Empty answer groups detected")]
    EmptyAnswerGroups,
    #[error(transparent)]
    Host(#[from] Box<dyn std::error::Error + Send + Sync + 'static>),
}

pub type Result<T> = std::result::Result<T, EditorError>;
