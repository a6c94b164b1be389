use tokio::sync::broadcast;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusEvent {
    OpenEditorField { field_id: String },
    NewInteractionSelected { target_id: String },
}

// Identifier-keyed pub/sub between the widget and whatever renders it.
#[derive(Debug, Clone)]
pub struct FocusBus {
    sender: broadcast::Sender<FocusEvent>,
}

impl FocusBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FocusEvent> {
        self.sender.subscribe()
    }

    // Fire and forget: a send with nobody listening is dropped, not an error.
    pub fn open_editor_field(&self, field_id: String) {
        let _ = self.sender.send(FocusEvent::OpenEditorField { field_id });
    }

    pub fn new_interaction_selected(&self, target_id: String) {
        let _ = self
            .sender
            .send(FocusEvent::NewInteractionSelected { target_id });
    }
}

impl Default for FocusBus {
    fn default() -> Self {
        Self::new(16)
    }
}
