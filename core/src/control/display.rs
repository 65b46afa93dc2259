//! Watchable text display

use super::Display;
use tokio::sync::watch;

/// Display whose text can be read back or observed for changes
#[derive(Debug)]
pub struct TextDisplay {
    id: String,
    text: watch::Sender<String>,
}

impl TextDisplay {
    pub fn new(id: impl Into<String>, initial: impl Into<String>) -> Self {
        let (text, _) = watch::channel(initial.into());
        Self {
            id: id.into(),
            text,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Currently displayed text
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    /// Receiver notified on every update
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.text.subscribe()
    }
}

impl Display for TextDisplay {
    fn show(&self, text: &str) {
        // Always notify, even when the text is unchanged.
        self.text.send_replace(text.to_string());
    }
}
