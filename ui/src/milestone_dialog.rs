//! State machine behind the "Manage Job" dialog.
//!
//! The dialog is either `Closed` or `Open` for exactly one job. Opening (or
//! switching to a different job) always starts from freshly initialised
//! drafts; nothing leaks from one job to the next.

use std::rc::Rc;

use api::address::ChainAddress;
use api::job::JobDescriptor;
use api::milestone::MilestoneBatch;
use chrono::Days;
use chrono::NaiveDate;
use itertools::multiunzip;

/// Date format used by `<input type="date">`.
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Returns `today` moved forward by `days`, saturating at the largest date.
pub fn default_deadline(today: NaiveDate, days: u32) -> NaiveDate {
    today
        .checked_add_days(Days::new(days.into()))
        .unwrap_or(NaiveDate::MAX)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::EnumIs)]
pub enum DialogTab {
    #[default]
    Milestones,
    AssignWorker,
}

impl DialogTab {
    pub fn label(&self) -> &'static str {
        match self {
            DialogTab::Milestones => "Set Milestones",
            DialogTab::AssignWorker => "Assign Worker",
        }
    }
}

pub const ALL_TABS: [DialogTab; 2] = [DialogTab::Milestones, DialogTab::AssignWorker];

/// Which of the two escrow operations a submission targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumIs)]
pub enum SubmitKind {
    Milestones,
    AssignWorker,
}

impl SubmitKind {
    pub fn failure_prefix(&self) -> &'static str {
        match self {
            SubmitKind::Milestones => "Failed to set milestones",
            SubmitKind::AssignWorker => "Failed to assign worker",
        }
    }
}

/// The last failed submission, kept so the dialog can show it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitError {
    pub kind: SubmitKind,
    pub message: String,
}

/// Not-yet-submitted edit state for one milestone slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MilestoneDraft {
    pub title: String,
    pub description: String,
    /// Free text; the escrow decides whether it is a valid amount.
    pub amount: String,
    pub deadline: NaiveDate,
}

impl MilestoneDraft {
    pub fn blank(deadline: NaiveDate) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            amount: String::new(),
            deadline,
        }
    }

    pub fn deadline_input_value(&self) -> String {
        self.deadline.format(DATE_INPUT_FORMAT).to_string()
    }
}

/// A single-field change to one draft.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MilestoneEdit {
    Title(String),
    Description(String),
    Amount(String),
    Deadline(NaiveDate),
}

impl MilestoneEdit {
    /// Parses the value of a date input. Returns `None` for a cleared or
    /// partial value, in which case the previous deadline is kept.
    pub fn deadline_from_input(value: &str) -> Option<Self> {
        NaiveDate::parse_from_str(value, DATE_INPUT_FORMAT)
            .ok()
            .map(MilestoneEdit::Deadline)
    }
}

/// A submission ready to be sent to the escrow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    Milestones {
        job: ChainAddress,
        batch: MilestoneBatch,
    },
    AssignWorker {
        job: ChainAddress,
        worker: String,
    },
}

impl Submission {
    pub fn kind(&self) -> SubmitKind {
        match self {
            Submission::Milestones { .. } => SubmitKind::Milestones,
            Submission::AssignWorker { .. } => SubmitKind::AssignWorker,
        }
    }

    /// The job the payload was built for.
    pub fn job(&self) -> ChainAddress {
        match self {
            Submission::Milestones { job, .. } | Submission::AssignWorker { job, .. } => *job,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumIs)]
pub enum SubmitOutcome {
    /// The dialog is now closed; fire `on_success` then `on_close`.
    Succeeded,
    /// The dialog stays open with its drafts unchanged.
    Failed,
    /// The call finished after its dialog was dismissed or moved to another
    /// job. The dialog on screen is left alone.
    Detached { succeeded: bool },
}

impl SubmitOutcome {
    /// Fires the parent callbacks this outcome calls for, in order.
    /// `on_close` only fires when this submission closed the dialog itself.
    pub fn notify(self, on_success: impl FnOnce(), on_close: impl FnOnce()) {
        match self {
            SubmitOutcome::Succeeded => {
                on_success();
                on_close();
            }
            SubmitOutcome::Detached { succeeded: true } => on_success(),
            SubmitOutcome::Failed | SubmitOutcome::Detached { succeeded: false } => {}
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenDialog {
    job: JobDescriptor,
    drafts: Vec<Rc<MilestoneDraft>>,
    worker_address: String,
    tab: DialogTab,
    last_error: Option<SubmitError>,
}

impl OpenDialog {
    /// One blank draft per milestone slot of `job`.
    pub fn new(job: JobDescriptor, first_deadline: NaiveDate) -> Self {
        let drafts = (0..job.slot_count())
            .map(|_| Rc::new(MilestoneDraft::blank(first_deadline)))
            .collect();
        Self {
            job,
            drafts,
            worker_address: String::new(),
            tab: DialogTab::default(),
            last_error: None,
        }
    }

    pub fn job(&self) -> &JobDescriptor {
        &self.job
    }

    pub fn drafts(&self) -> &[Rc<MilestoneDraft>] {
        &self.drafts
    }

    pub fn worker_address(&self) -> &str {
        &self.worker_address
    }

    pub fn tab(&self) -> DialogTab {
        self.tab
    }

    pub fn last_error(&self) -> Option<&SubmitError> {
        self.last_error.as_ref()
    }

    pub fn select_tab(&mut self, tab: DialogTab) {
        self.tab = tab;
    }

    /// Applies `edit` to the draft at `index`. Other drafts keep sharing
    /// their allocation with any earlier snapshot. Out-of-range is a no-op.
    pub fn edit_milestone(&mut self, index: usize, edit: MilestoneEdit) {
        let Some(slot) = self.drafts.get_mut(index) else {
            return;
        };
        let draft = Rc::make_mut(slot);
        match edit {
            MilestoneEdit::Title(title) => draft.title = title,
            MilestoneEdit::Description(description) => draft.description = description,
            MilestoneEdit::Amount(amount) => draft.amount = amount,
            MilestoneEdit::Deadline(deadline) => draft.deadline = deadline,
        }
    }

    pub fn set_worker_address(&mut self, address: String) {
        self.worker_address = address;
    }

    /// Packs the drafts into column form with `indices = 0..N`.
    pub fn milestone_batch(&self) -> MilestoneBatch {
        let (indices, titles, descriptions, amounts, deadlines): (
            Vec<u32>,
            Vec<String>,
            Vec<String>,
            Vec<String>,
            Vec<NaiveDate>,
        ) = multiunzip(self.drafts.iter().enumerate().map(|(i, d)| {
            (
                i as u32,
                d.title.clone(),
                d.description.clone(),
                d.amount.clone(),
                d.deadline,
            )
        }));

        MilestoneBatch {
            indices,
            titles,
            descriptions,
            amounts,
            deadlines,
        }
    }

    pub fn can_submit_milestones(&self, pending: bool) -> bool {
        !pending
    }

    pub fn can_assign_worker(&self, pending: bool) -> bool {
        !pending && !self.worker_address.is_empty()
    }

    pub fn can_submit(&self, kind: SubmitKind, pending: bool) -> bool {
        match kind {
            SubmitKind::Milestones => self.can_submit_milestones(pending),
            SubmitKind::AssignWorker => self.can_assign_worker(pending),
        }
    }

    /// Builds the payload for `kind` and clears a stale error of that kind.
    /// Editing stays possible while the submission is in flight.
    pub fn begin_submission(&mut self, kind: SubmitKind) -> Submission {
        if self.last_error.as_ref().is_some_and(|e| e.kind == kind) {
            self.last_error = None;
        }
        match kind {
            SubmitKind::Milestones => Submission::Milestones {
                job: self.job.address,
                batch: self.milestone_batch(),
            },
            SubmitKind::AssignWorker => Submission::AssignWorker {
                job: self.job.address,
                worker: self.worker_address.clone(),
            },
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DialogState {
    #[default]
    Closed,
    Open(OpenDialog),
}

impl DialogState {
    pub fn open(&self) -> Option<&OpenDialog> {
        match self {
            DialogState::Open(dialog) => Some(dialog),
            DialogState::Closed => None,
        }
    }

    pub fn open_mut(&mut self) -> Option<&mut OpenDialog> {
        match self {
            DialogState::Open(dialog) => Some(dialog),
            DialogState::Closed => None,
        }
    }

    /// Brings the state in line with the caller's `is_open`/`job` inputs.
    ///
    /// Closed unless both are present. A different job than the one
    /// currently shown resets everything, including the worker address.
    /// The same job leaves the drafts alone.
    pub fn sync(&mut self, is_open: bool, job: Option<JobDescriptor>, first_deadline: NaiveDate) {
        let job = match job {
            Some(job) if is_open => job,
            _ => {
                *self = DialogState::Closed;
                return;
            }
        };

        if self.open().is_some_and(|d| d.job == job) {
            return;
        }
        *self = DialogState::Open(OpenDialog::new(job, first_deadline));
    }

    /// Explicit dismissal by the user.
    pub fn close(&mut self) {
        *self = DialogState::Closed;
    }

    /// Records the result of an escrow call started with `begin_submission`
    /// for `job`. Results for a job that is no longer shown only report.
    pub fn finish_submission(
        &mut self,
        job: ChainAddress,
        kind: SubmitKind,
        result: Result<(), String>,
    ) -> SubmitOutcome {
        if !self.open().is_some_and(|d| d.job.address == job) {
            return SubmitOutcome::Detached {
                succeeded: result.is_ok(),
            };
        }
        match result {
            Ok(()) => {
                *self = DialogState::Closed;
                SubmitOutcome::Succeeded
            }
            Err(message) => {
                if let Some(dialog) = self.open_mut() {
                    dialog.last_error = Some(SubmitError { kind, message });
                }
                SubmitOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn week_out() -> NaiveDate {
        default_deadline(today(), 7)
    }

    fn job(last: u8, count: Option<u32>) -> JobDescriptor {
        let mut bytes = [0u8; 20];
        bytes[19] = last;
        JobDescriptor {
            address: ChainAddress::from_bytes(bytes),
            milestone_count: count,
        }
    }

    fn opened(job: JobDescriptor) -> DialogState {
        let mut state = DialogState::default();
        state.sync(true, Some(job), week_out());
        state
    }

    fn dialog(state: &mut DialogState) -> &mut OpenDialog {
        state.open_mut().expect("dialog should be open")
    }

    #[test]
    fn default_deadline_is_one_week_out() {
        assert_eq!(week_out(), NaiveDate::from_ymd_opt(2026, 10, 26).unwrap());
        assert_eq!(default_deadline(NaiveDate::MAX, 7), NaiveDate::MAX);
    }

    #[test]
    fn opening_creates_one_blank_draft_per_milestone() {
        for n in [0, 1, 3, 12] {
            let mut state = opened(job(1, Some(n)));
            let dialog = dialog(&mut state);
            assert_eq!(dialog.drafts().len(), n as usize);
            assert_eq!(dialog.tab(), DialogTab::Milestones);
            assert_eq!(dialog.worker_address(), "");
            for draft in dialog.drafts() {
                assert_eq!(**draft, MilestoneDraft::blank(week_out()));
            }
        }
    }

    #[test]
    fn missing_count_opens_with_no_drafts_and_submits_empty_batch() {
        let mut state = opened(job(1, None));
        let dialog = dialog(&mut state);
        assert!(dialog.drafts().is_empty());
        assert!(dialog.can_submit_milestones(false));

        let submission = dialog.begin_submission(SubmitKind::Milestones);
        assert_eq!(
            submission,
            Submission::Milestones {
                job: job(1, None).address,
                batch: MilestoneBatch::default(),
            }
        );
    }

    #[test]
    fn closed_or_jobless_renders_nothing() {
        let mut state = opened(job(1, Some(2)));
        state.sync(false, Some(job(1, Some(2))), week_out());
        assert!(state.open().is_none());

        let mut state = opened(job(1, Some(2)));
        state.sync(true, None, week_out());
        assert_eq!(state, DialogState::Closed);

        let mut state = DialogState::default();
        state.sync(false, None, week_out());
        assert!(state.open().is_none());
    }

    #[test]
    fn editing_one_field_leaves_everything_else_shared() {
        let mut state = opened(job(1, Some(3)));
        let dialog = dialog(&mut state);
        let before: Vec<_> = dialog.drafts().to_vec();

        dialog.edit_milestone(1, MilestoneEdit::Title("Build".to_string()));

        let after = dialog.drafts();
        assert!(Rc::ptr_eq(&before[0], &after[0]));
        assert!(!Rc::ptr_eq(&before[1], &after[1]));
        assert!(Rc::ptr_eq(&before[2], &after[2]));
        assert_eq!(after[1].title, "Build");
        assert_eq!(after[1].description, before[1].description);
        assert_eq!(after[1].amount, before[1].amount);
        assert_eq!(after[1].deadline, before[1].deadline);
        assert_eq!(before[1].title, "");
    }

    #[test]
    fn out_of_range_edit_is_ignored() {
        let mut state = opened(job(1, Some(1)));
        let before = state.clone();
        dialog(&mut state).edit_milestone(5, MilestoneEdit::Amount("1".to_string()));
        assert_eq!(state, before);
    }

    #[test]
    fn deadline_input_parsing() {
        let date = NaiveDate::from_ymd_opt(2027, 1, 2).unwrap();
        assert_eq!(
            MilestoneEdit::deadline_from_input("2027-01-02"),
            Some(MilestoneEdit::Deadline(date))
        );
        assert_eq!(MilestoneEdit::deadline_from_input(""), None);
        assert_eq!(MilestoneEdit::deadline_from_input("2027-13-01"), None);
        assert_eq!(MilestoneDraft::blank(date).deadline_input_value(), "2027-01-02");
    }

    #[test]
    fn worked_example_batch() {
        let job = job(0x0b, Some(2));
        let mut state = opened(job);
        let dialog = dialog(&mut state);

        dialog.edit_milestone(0, MilestoneEdit::Title("Design".to_string()));
        dialog.edit_milestone(1, MilestoneEdit::Amount("0.5".to_string()));

        let Submission::Milestones { job: target, batch } =
            dialog.begin_submission(SubmitKind::Milestones)
        else {
            panic!("expected a milestone submission");
        };
        assert_eq!(target, job.address);
        assert_eq!(batch.indices, vec![0, 1]);
        assert_eq!(batch.titles, vec!["Design".to_string(), String::new()]);
        assert_eq!(batch.descriptions, vec![String::new(), String::new()]);
        assert_eq!(batch.amounts, vec![String::new(), "0.5".to_string()]);
        assert_eq!(batch.deadlines, vec![week_out(), week_out()]);
        assert_eq!(batch.len(), Some(2));
    }

    #[test]
    fn submit_gates() {
        let mut state = opened(job(1, Some(1)));
        let dialog = dialog(&mut state);

        assert!(dialog.can_submit_milestones(false));
        assert!(!dialog.can_submit_milestones(true));

        assert!(!dialog.can_assign_worker(false));
        dialog.set_worker_address("0xabc".to_string());
        assert!(dialog.can_assign_worker(false));
        assert!(!dialog.can_assign_worker(true));
        assert!(dialog.can_submit(SubmitKind::AssignWorker, false));
        assert!(!dialog.can_submit(SubmitKind::Milestones, true));
    }

    #[test]
    fn worker_address_is_sent_verbatim() {
        let mut state = opened(job(1, Some(1)));
        let dialog = dialog(&mut state);
        dialog.set_worker_address(" not an address ".to_string());
        let submission = dialog.begin_submission(SubmitKind::AssignWorker);
        assert_eq!(submission.kind(), SubmitKind::AssignWorker);
        assert_eq!(
            submission,
            Submission::AssignWorker {
                job: job(1, Some(1)).address,
                worker: " not an address ".to_string(),
            }
        );
    }

    #[test]
    fn switching_tabs_keeps_both_drafts() {
        let mut state = opened(job(1, Some(1)));
        let dialog = dialog(&mut state);
        dialog.edit_milestone(0, MilestoneEdit::Description("wireframes".to_string()));
        dialog.set_worker_address("0x1".to_string());

        dialog.select_tab(DialogTab::AssignWorker);
        dialog.select_tab(DialogTab::Milestones);

        assert_eq!(dialog.drafts()[0].description, "wireframes");
        assert_eq!(dialog.worker_address(), "0x1");
    }

    #[test]
    fn same_job_keeps_drafts_new_job_resets() {
        let mut state = opened(job(1, Some(2)));
        dialog(&mut state).edit_milestone(0, MilestoneEdit::Title("kept".to_string()));
        dialog(&mut state).set_worker_address("0xw".to_string());
        dialog(&mut state).select_tab(DialogTab::AssignWorker);

        state.sync(true, Some(job(1, Some(2))), week_out());
        assert_eq!(dialog(&mut state).drafts()[0].title, "kept");

        state.sync(true, Some(job(2, Some(1))), week_out());
        let dialog = dialog(&mut state);
        assert_eq!(dialog.drafts().len(), 1);
        assert_eq!(dialog.drafts()[0].title, "");
        assert_eq!(dialog.worker_address(), "");
        assert_eq!(dialog.tab(), DialogTab::Milestones);
    }

    #[test]
    fn reopening_starts_fresh() {
        let mut state = opened(job(1, Some(1)));
        dialog(&mut state).edit_milestone(0, MilestoneEdit::Title("gone".to_string()));
        state.close();
        assert!(state.open().is_none());

        state.sync(true, Some(job(1, Some(1))), week_out());
        assert_eq!(dialog(&mut state).drafts()[0].title, "");
    }

    #[test]
    fn success_closes_the_dialog() {
        let mut state = opened(job(1, Some(1)));
        dialog(&mut state).begin_submission(SubmitKind::Milestones);

        let outcome = state.finish_submission(job(1, None).address, SubmitKind::Milestones, Ok(()));
        assert_eq!(outcome, SubmitOutcome::Succeeded);
        assert_eq!(state, DialogState::Closed);
    }

    #[test]
    fn failure_keeps_drafts_and_records_the_error() {
        let mut state = opened(job(1, Some(2)));
        dialog(&mut state).edit_milestone(1, MilestoneEdit::Amount("abc".to_string()));
        dialog(&mut state).begin_submission(SubmitKind::Milestones);
        let drafts_before = dialog(&mut state).drafts().to_vec();

        let outcome = state.finish_submission(
            job(1, None).address,
            SubmitKind::Milestones,
            Err("milestone 1: 'abc' is not a positive amount".to_string()),
        );
        assert_eq!(outcome, SubmitOutcome::Failed);

        let dialog = dialog(&mut state);
        assert_eq!(dialog.drafts(), drafts_before.as_slice());
        assert_eq!(
            dialog.last_error(),
            Some(&SubmitError {
                kind: SubmitKind::Milestones,
                message: "milestone 1: 'abc' is not a positive amount".to_string(),
            })
        );

        // Retrying the same operation clears the stale error.
        dialog.begin_submission(SubmitKind::Milestones);
        assert!(dialog.last_error().is_none());
    }

    #[test]
    fn error_of_other_kind_survives_a_new_submission() {
        let mut state = opened(job(1, Some(1)));
        state.finish_submission(
            job(1, None).address,
            SubmitKind::AssignWorker,
            Err("bad worker".to_string()),
        );

        let dialog = dialog(&mut state);
        dialog.begin_submission(SubmitKind::Milestones);
        assert_eq!(dialog.last_error().map(|e| e.kind), Some(SubmitKind::AssignWorker));
    }

    #[test]
    fn failure_after_close_is_harmless() {
        let mut state = DialogState::Closed;
        let outcome = state.finish_submission(
            job(1, None).address,
            SubmitKind::AssignWorker,
            Err("late".to_string()),
        );
        assert_eq!(outcome, SubmitOutcome::Detached { succeeded: false });
        assert_eq!(state, DialogState::Closed);
    }

    #[test]
    fn late_failure_stays_out_of_another_jobs_dialog() {
        let mut state = opened(job(1, Some(1)));
        let submission = dialog(&mut state).begin_submission(SubmitKind::Milestones);
        assert_eq!(submission.job(), job(1, None).address);

        state.close();
        state.sync(true, Some(job(2, Some(1))), week_out());
        dialog(&mut state).edit_milestone(0, MilestoneEdit::Title("second".to_string()));
        let before = state.clone();

        let outcome = state.finish_submission(
            submission.job(),
            submission.kind(),
            Err("job 1 rejected".to_string()),
        );
        assert_eq!(outcome, SubmitOutcome::Detached { succeeded: false });
        assert_eq!(state, before);
        assert!(dialog(&mut state).last_error().is_none());
    }

    #[test]
    fn late_success_keeps_another_jobs_dialog_open() {
        let mut state = opened(job(1, Some(1)));
        let submission = dialog(&mut state).begin_submission(SubmitKind::Milestones);

        state.sync(true, Some(job(2, Some(1))), week_out());
        dialog(&mut state).edit_milestone(0, MilestoneEdit::Title("second".to_string()));

        let outcome = state.finish_submission(submission.job(), submission.kind(), Ok(()));
        assert_eq!(outcome, SubmitOutcome::Detached { succeeded: true });
        let dialog = dialog(&mut state);
        assert_eq!(dialog.job(), &job(2, Some(1)));
        assert_eq!(dialog.drafts()[0].title, "second");
    }

    fn notified(outcome: SubmitOutcome) -> Vec<&'static str> {
        let calls = RefCell::new(Vec::new());
        outcome.notify(
            || calls.borrow_mut().push("success"),
            || calls.borrow_mut().push("close"),
        );
        calls.into_inner()
    }

    #[test]
    fn success_fires_on_success_then_on_close_once_each() {
        let mut state = opened(job(1, Some(1)));
        let submission = dialog(&mut state).begin_submission(SubmitKind::Milestones);
        let outcome = state.finish_submission(submission.job(), submission.kind(), Ok(()));

        assert_eq!(notified(outcome), vec!["success", "close"]);
    }

    #[test]
    fn failure_fires_no_callbacks() {
        let mut state = opened(job(1, Some(1)));
        let submission = dialog(&mut state).begin_submission(SubmitKind::Milestones);
        let outcome = state.finish_submission(
            submission.job(),
            submission.kind(),
            Err("rejected".to_string()),
        );

        assert!(notified(outcome).is_empty());
    }

    #[test]
    fn detached_success_only_refreshes() {
        assert_eq!(notified(SubmitOutcome::Detached { succeeded: true }), vec!["success"]);
        assert!(notified(SubmitOutcome::Detached { succeeded: false }).is_empty());
    }
}
