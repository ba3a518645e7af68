/// Action emitted by a field in response to a key event, for the host to
/// apply (persist the value, move focus, and so on).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldAction {
    /// The committed display string after a successful edit.
    ValueChanged { text: String },
}

/// Outcome of offering a key event to a field.
///
/// `handled` tells the host whether the event was consumed; when it is
/// false the host should apply its own default behavior (focus traversal,
/// shortcuts). `request_render` is set when visible state changed.
#[derive(Debug, Clone, Default)]
pub struct InteractionResult {
    pub handled: bool,
    pub request_render: bool,
    pub actions: Vec<FieldAction>,
}

impl InteractionResult {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn consumed() -> Self {
        Self {
            handled: true,
            request_render: false,
            actions: Vec::new(),
        }
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: Vec::new(),
        }
    }

    pub fn with_action(action: FieldAction) -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: vec![action],
        }
    }
}
