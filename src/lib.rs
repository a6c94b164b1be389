#![allow(async_fn_in_trait)]

pub mod document;
pub mod editor;
pub mod error;
pub mod focus;

pub use document::host::InMemoryDocument;
pub use editor::ChoiceSetEditor;
pub use error::{EditorError, Result};
pub use focus::{FocusBus, FocusEvent};
