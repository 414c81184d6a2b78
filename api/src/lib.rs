//! This crate contains all shared fullstack server functions.

pub mod address;
pub mod job;
#[cfg(not(target_arch = "wasm32"))]
pub mod ledger;
pub mod milestone;
pub mod prefs;

use address::ChainAddress;
use dioxus::prelude::*;
use job::JobDescriptor;
use job::JobSummary;
use milestone::MilestoneBatch;
use prefs::user_prefs::UserPrefs;

pub type ApiError = anyhow::Error;

/// Retrieves the user's preferences.
///
/// In the future this may read from a settings file.  For now it just
/// returns the default settings, which read from env vars.
#[post("/api/get_user_prefs")]
pub async fn get_user_prefs() -> Result<UserPrefs, ApiError> {
    Ok(UserPrefs::default())
}

/// Lists every job known to the escrow, oldest first.
#[post("/api/jobs")]
pub async fn jobs() -> Result<Vec<JobSummary>, ApiError> {
    let ledger = ledger::shared().await.read().await;
    Ok(ledger.jobs())
}

#[post("/api/create_job")]
pub async fn create_job(title: String, milestone_count: u32) -> Result<JobDescriptor, ApiError> {
    let address = ledger::random_address();
    let job = ledger::shared()
        .await
        .write()
        .await
        .create_job(address, &title, milestone_count)?;

    dioxus_logger::tracing::info!("created job {} with {} milestones", job.address, milestone_count);
    Ok(job)
}

/// Stores the milestones of a job. The batch is validated as a whole.
#[post("/api/set_milestones")]
pub async fn set_milestones(job: ChainAddress, batch: MilestoneBatch) -> Result<(), ApiError> {
    let today = chrono::Utc::now().date_naive();
    let result = ledger::shared()
        .await
        .write()
        .await
        .set_milestones(job, &batch, today);

    if let Err(e) = &result {
        dioxus_logger::tracing::warn!("set_milestones rejected for {}: {}", job, e);
    }
    Ok(result?)
}

/// Assigns a worker to a job. The worker address is parsed here, not by the caller.
#[post("/api/assign_worker")]
pub async fn assign_worker(job: ChainAddress, worker: String) -> Result<(), ApiError> {
    let result = ledger::shared()
        .await
        .write()
        .await
        .assign_worker(job, &worker);

    match result {
        Ok(worker) => {
            dioxus_logger::tracing::info!("assigned worker {} to job {}", worker, job);
            Ok(())
        }
        Err(e) => {
            dioxus_logger::tracing::warn!("assign_worker rejected for {}: {}", job, e);
            Err(e.into())
        }
    }
}
