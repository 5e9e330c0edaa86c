//! Conversation state for a single agent pane.

use charla_types::ChatTurn;

/// System turn sent ahead of every conversation, matching the relay default.
pub const PREAMBLE: &str = "You are a helpful assistant.";

/// In-memory state of one agent's chat: the turn list plus the flags the
/// renderer needs.
///
/// The pane allows one outstanding request at a time. `submit` refuses input
/// while a call is pending or while the relay is unreachable, so there is
/// nothing to coalesce or cancel.
#[derive(Debug, Default)]
pub struct ChatPane {
    turns: Vec<ChatTurn>,
    connected: bool,
    pending: bool,
    banner: Option<String>,
}

impl ChatPane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Input is accepted only when connected and no call is outstanding.
    pub fn input_enabled(&self) -> bool {
        self.connected && !self.pending
    }

    /// Outcome of the startup probe.
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// Append the user turn and produce the outgoing request: the system
    /// preamble followed by every turn so far. Returns `None`, leaving the
    /// pane untouched, for blank input or while input is disabled.
    pub fn submit(&mut self, input: &str) -> Option<Vec<ChatTurn>> {
        if input.trim().is_empty() || !self.input_enabled() {
            return None;
        }

        self.banner = None;
        self.turns.push(ChatTurn::user(input));
        self.pending = true;

        let mut outgoing = Vec::with_capacity(self.turns.len() + 1);
        outgoing.push(ChatTurn::system(PREAMBLE));
        outgoing.extend(self.turns.iter().cloned());
        Some(outgoing)
    }

    /// Settle the outstanding call. On failure the optimistic user turn
    /// stays, nothing is appended, and the banner is set; either way input
    /// is re-enabled.
    pub fn resolve(&mut self, outcome: Result<ChatTurn, String>) {
        self.pending = false;
        match outcome {
            Ok(turn) => self.turns.push(turn),
            Err(message) => self.banner = Some(message),
        }
    }

    pub fn clear(&mut self) {
        self.turns.clear();
        self.banner = None;
    }
}
