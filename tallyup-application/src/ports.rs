use crate::{LedgerSnapshot, error::SnapshotLoadError};
use std::collections::HashMap;
use tallyup_domain::ParticipantId;

pub trait SnapshotReader: Send + Sync {
    fn read(&self) -> Result<LedgerSnapshot, SnapshotLoadError>;
}

pub trait ParticipantDirectory: Send + Sync {
    fn display_name(&self, participant_id: &ParticipantId) -> Option<&str>;
}

impl ParticipantDirectory for HashMap<ParticipantId, String> {
    fn display_name(&self, participant_id: &ParticipantId) -> Option<&str> {
        self.get(participant_id).map(String::as_str)
    }
}

impl ParticipantDirectory for LedgerSnapshot {
    fn display_name(&self, participant_id: &ParticipantId) -> Option<&str> {
        self.participants
            .iter()
            .find(|participant| participant.id == *participant_id)
            .map(|participant| participant.name.as_str())
    }
}
