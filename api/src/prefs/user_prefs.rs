use super::escrow_prefs::EscrowPrefs;
use serde::Deserialize;
use serde::Serialize;

/// Represents all user prefs. Intended for saving to a file, editing in a settings dialog, etc.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Default)]
pub struct UserPrefs {
    escrow: EscrowPrefs,
}

impl UserPrefs {
    pub fn escrow(&self) -> &EscrowPrefs {
        &self.escrow
    }
}
