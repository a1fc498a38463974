use std::collections::HashMap;

use thiserror::Error;
use uuid::Uuid;

use crate::machine::HandStateMachine;

pub type SessionId = String;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),
}

/// Caller-owned arena of independent tables, one state machine each.
///
/// Nothing is shared between sessions; each machine owns its own hand state.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, HandStateMachine>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, machine: HandStateMachine) -> SessionId {
        let id = Uuid::new_v4().to_string();
        tracing::info!(
            session_id = %id,
            players = machine.config().num_players(),
            "session created"
        );
        self.sessions.insert(id.clone(), machine);
        id
    }

    pub fn get(&self, id: &str) -> Result<&HandStateMachine, SessionError> {
        self.sessions
            .get(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    pub fn get_mut(&mut self, id: &str) -> Result<&mut HandStateMachine, SessionError> {
        self.sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    /// Abandons a session. Dropping the machine discards any hand in progress.
    pub fn remove(&mut self, id: &str) -> Result<HandStateMachine, SessionError> {
        let machine = self
            .sessions
            .remove(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        tracing::debug!(session_id = %id, "session removed");
        Ok(machine)
    }

    pub fn ids(&self) -> impl Iterator<Item = &SessionId> {
        self.sessions.keys()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
