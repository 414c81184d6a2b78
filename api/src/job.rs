//! Job descriptors as seen by the client.

use serde::Deserialize;
use serde::Serialize;

use crate::address::ChainAddress;
use crate::milestone::MilestoneRecord;

/// The part of a job the milestone dialog needs.
///
/// Deserializing validates the address format and requires the count (when
/// present) to be a non-negative integer. A missing count is kept as `None`;
/// the dialog then shows no milestone slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDescriptor {
    pub address: ChainAddress,
    #[serde(default)]
    pub milestone_count: Option<u32>,
}

impl JobDescriptor {
    pub fn new(address: ChainAddress, milestone_count: u32) -> Self {
        Self {
            address,
            milestone_count: Some(milestone_count),
        }
    }

    /// Number of milestone slots to offer. Zero when the count is unknown.
    pub fn slot_count(&self) -> usize {
        self.milestone_count.unwrap_or(0) as usize
    }
}

/// A job as listed by the escrow ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSummary {
    pub job: JobDescriptor,
    pub title: String,
    pub worker: Option<ChainAddress>,
    pub milestones: Vec<MilestoneRecord>,
}

impl JobSummary {
    pub fn milestones_set(&self) -> bool {
        !self.milestones.is_empty()
    }
}
