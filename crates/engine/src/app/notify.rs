use std::collections::VecDeque;

use tracing::info;

use super::Announcer;

/// Blocking announcement surface. While a message is open the host keeps
/// presenting frames but does not step the scene.
#[derive(Debug, Default)]
pub struct ModalBanner {
    messages: VecDeque<String>,
}

impl ModalBanner {
    pub fn is_open(&self) -> bool {
        !self.messages.is_empty()
    }

    pub fn current(&self) -> Option<&str> {
        self.messages.front().map(String::as_str)
    }

    pub fn pending(&self) -> usize {
        self.messages.len()
    }

    /// Closes the open message; the next queued one, if any, takes its place.
    pub fn dismiss(&mut self) -> Option<String> {
        let closed = self.messages.pop_front()?;
        info!(remaining = self.messages.len(), "announcement_dismissed");
        Some(closed)
    }
}

impl Announcer for ModalBanner {
    fn announce(&mut self, message: &str) {
        info!(message, "announcement");
        self.messages.push_back(message.to_string());
    }
}
