//! Server-side, in-memory escrow ledger.
//!
//! Stands in for the escrow contract: it owns jobs, their milestones and
//! assigned workers, and performs all validation of client submissions.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use tokio::sync::OnceCell;
use tokio::sync::RwLock;

use crate::address::ChainAddress;
use crate::address::ParseAddressError;
use crate::job::JobDescriptor;
use crate::job::JobSummary;
use crate::milestone::MilestoneBatch;
use crate::milestone::MilestoneRecord;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("no job exists at {0}")]
    UnknownJob(ChainAddress),
    #[error("a job already exists at {0}")]
    DuplicateJob(ChainAddress),
    #[error("job title must not be empty")]
    EmptyTitle,
    #[error("a job needs at least one milestone")]
    NoMilestones,
    #[error("milestone columns have different lengths")]
    MismatchedColumns,
    #[error("job expects {expected} milestones, got {got}")]
    WrongMilestoneCount { expected: u32, got: usize },
    #[error("milestone indices must be 0..{0} in order")]
    BadIndices(usize),
    #[error("milestone {index}: '{amount}' is not a positive amount")]
    InvalidAmount { index: u32, amount: String },
    #[error("milestone {index}: deadline {deadline} is in the past")]
    DeadlineInPast { index: u32, deadline: NaiveDate },
    #[error("invalid worker address: {0}")]
    InvalidWorkerAddress(#[from] ParseAddressError),
    #[error("worker {0} is already assigned to this job")]
    WorkerAlreadyAssigned(ChainAddress),
}

#[derive(Debug, Clone)]
struct JobEntry {
    address: ChainAddress,
    title: String,
    milestone_count: u32,
    worker: Option<ChainAddress>,
    milestones: Vec<MilestoneRecord>,
}

impl JobEntry {
    fn summary(&self) -> JobSummary {
        JobSummary {
            job: JobDescriptor::new(self.address, self.milestone_count),
            title: self.title.clone(),
            worker: self.worker,
            milestones: self.milestones.clone(),
        }
    }
}

/// All jobs known to this server, in creation order.
#[derive(Debug, Default)]
pub struct Ledger {
    jobs: Vec<JobEntry>,
}

impl Ledger {
    pub fn jobs(&self) -> Vec<JobSummary> {
        self.jobs.iter().map(JobEntry::summary).collect()
    }

    pub fn job(&self, address: ChainAddress) -> Option<JobSummary> {
        self.jobs
            .iter()
            .find(|j| j.address == address)
            .map(JobEntry::summary)
    }

    pub fn create_job(
        &mut self,
        address: ChainAddress,
        title: &str,
        milestone_count: u32,
    ) -> Result<JobDescriptor, LedgerError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(LedgerError::EmptyTitle);
        }
        if milestone_count == 0 {
            return Err(LedgerError::NoMilestones);
        }
        if self.jobs.iter().any(|j| j.address == address) {
            return Err(LedgerError::DuplicateJob(address));
        }

        self.jobs.push(JobEntry {
            address,
            title: title.to_string(),
            milestone_count,
            worker: None,
            milestones: Vec::new(),
        });
        Ok(JobDescriptor::new(address, milestone_count))
    }

    /// Replaces the milestones of a job after validating the whole batch.
    /// Nothing is stored unless every milestone passes.
    pub fn set_milestones(
        &mut self,
        job: ChainAddress,
        batch: &MilestoneBatch,
        today: NaiveDate,
    ) -> Result<(), LedgerError> {
        let entry = self.entry_mut(job)?;

        let n = batch.len().ok_or(LedgerError::MismatchedColumns)?;
        if n != entry.milestone_count as usize {
            return Err(LedgerError::WrongMilestoneCount {
                expected: entry.milestone_count,
                got: n,
            });
        }
        if !batch.indices.iter().enumerate().all(|(i, idx)| *idx as usize == i) {
            return Err(LedgerError::BadIndices(n));
        }

        let records = batch.records();
        for record in &records {
            let amount = Decimal::from_str(record.amount.trim()).ok();
            if !amount.is_some_and(|a| a > Decimal::ZERO) {
                return Err(LedgerError::InvalidAmount {
                    index: record.index,
                    amount: record.amount.clone(),
                });
            }
            if record.deadline < today {
                return Err(LedgerError::DeadlineInPast {
                    index: record.index,
                    deadline: record.deadline,
                });
            }
        }

        entry.milestones = records;
        Ok(())
    }

    /// Assigns a worker to a job. Re-assigning the same worker is a no-op.
    pub fn assign_worker(
        &mut self,
        job: ChainAddress,
        worker: &str,
    ) -> Result<ChainAddress, LedgerError> {
        let entry = self.entry_mut(job)?;
        let worker = ChainAddress::from_str(worker)?;

        match entry.worker {
            Some(current) if current != worker => Err(LedgerError::WorkerAlreadyAssigned(current)),
            _ => {
                entry.worker = Some(worker);
                Ok(worker)
            }
        }
    }

    fn entry_mut(&mut self, job: ChainAddress) -> Result<&mut JobEntry, LedgerError> {
        self.jobs
            .iter_mut()
            .find(|j| j.address == job)
            .ok_or(LedgerError::UnknownJob(job))
    }
}

/// Returns the process-wide ledger.
pub async fn shared() -> &'static RwLock<Ledger> {
    static LEDGER: OnceCell<RwLock<Ledger>> = OnceCell::const_new();
    LEDGER
        .get_or_init(|| async { RwLock::new(Ledger::default()) })
        .await
}

/// Generates a fresh random address for a new job.
pub fn random_address() -> ChainAddress {
    ChainAddress::from_bytes(rand::random())
}
