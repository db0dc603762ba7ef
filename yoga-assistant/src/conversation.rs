//! Caller-owned chat history.

use serde::{Deserialize, Serialize};
use yoga_model::Role;

/// What a turn represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnKind {
    /// A question from the user.
    Query,
    /// A grounded answer.
    Answer,
    /// A safety advisory returned instead of an answer.
    Warning,
}

/// One entry in a [`Conversation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    pub kind: TurnKind,
}

/// The history of one chat session.
///
/// The assistant keeps no state between calls; the caller owns this and
/// passes it to each [`ask`](crate::YogaAssistant::ask). A question and its
/// reply are appended together once the reply is complete.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub(crate) fn record(&mut self, query: &str, reply: &str, kind: TurnKind) {
        self.turns.push(Turn { role: Role::User, content: query.to_string(), kind: TurnKind::Query });
        self.turns.push(Turn { role: Role::Assistant, content: reply.to_string(), kind });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_appends_query_and_reply() {
        let mut conversation = Conversation::new();
        conversation.record("hi", "hello", TurnKind::Answer);

        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation.turns()[0].kind, TurnKind::Query);
        assert_eq!(conversation.last().map(|t| t.role), Some(Role::Assistant));

        conversation.clear();
        assert!(conversation.is_empty());
    }
}
