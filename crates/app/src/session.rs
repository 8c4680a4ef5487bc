//! The ledger session: one roster, its store, and the pending confirmation.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use messmate_core::{Aggregate, MemberId};
use messmate_infra::export::csv::{CSV_FILE_NAME, export_csv_to_path, to_csv_string};
use messmate_infra::{KeyValueStore, MealReport, REPORT_PDF_FILE_NAME, RosterRepository};
use messmate_ledger::{
    ConfirmationGate, ConfirmationToken, LedgerSummary, Member, MemberField, PendingAction,
    Roster, RosterCommand, RosterEvent,
};

use crate::error::AppResult;

/// Explicit model object owned by the presentation layer.
///
/// Every state change is written through to storage before the call returns.
/// Aggregates are recomputed on each [`MessManager::summary`] call.
#[derive(Debug)]
pub struct MessManager<S> {
    roster: Roster,
    repository: RosterRepository<S>,
    gate: ConfirmationGate,
}

impl<S> MessManager<S>
where
    S: KeyValueStore,
{
    /// Load the roster stored under the default key (or the seed roster).
    pub fn open(store: S) -> Self {
        Self::with_repository(RosterRepository::new(store))
    }

    pub fn open_with_key(store: S, key: impl Into<String>) -> Self {
        Self::with_repository(RosterRepository::with_key(store, key))
    }

    pub fn with_repository(repository: RosterRepository<S>) -> Self {
        let roster = repository.load();
        Self {
            roster,
            repository,
            gate: ConfirmationGate::new(),
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn members(&self) -> &[Member] {
        self.roster.members()
    }

    pub fn repository(&self) -> &RosterRepository<S> {
        &self.repository
    }

    pub fn summary(&self) -> LedgerSummary {
        self.roster.summary()
    }

    /// Add a member. Returns the new id, or `None` for a blank name.
    pub fn add_member(&mut self, name: &str) -> AppResult<Option<MemberId>> {
        let events = self.execute(RosterCommand::AddMember {
            name: name.to_string(),
        })?;

        Ok(events.iter().find_map(|e| match e {
            RosterEvent::MemberAdded { id, .. } => Some(*id),
            _ => None,
        }))
    }

    /// Set `field` from user-typed text.
    ///
    /// Non-numeric text is rejected with a validation error; the previous value
    /// stays and nothing is written.
    pub fn update_field(&mut self, id: MemberId, field: MemberField, raw: &str) -> AppResult<()> {
        self.execute(RosterCommand::UpdateField {
            id,
            field,
            raw: raw.to_string(),
        })?;
        Ok(())
    }

    /// First step of deleting a member.
    pub fn request_delete(&mut self, id: MemberId) -> ConfirmationToken {
        self.gate.request(PendingAction::DeleteMember(id))
    }

    /// First step of zeroing every deposit and meal count.
    pub fn request_reset(&mut self) -> ConfirmationToken {
        self.gate.request(PendingAction::ResetAll)
    }

    pub fn pending_confirmation(&self) -> Option<(ConfirmationToken, PendingAction)> {
        self.gate.pending()
    }

    /// Carry out the action parked under `token`.
    pub fn confirm(&mut self, token: ConfirmationToken) -> AppResult<()> {
        let action = self.gate.confirm(token)?;
        tracing::debug!(?action, "confirmation accepted");
        self.execute(action.to_command())?;
        Ok(())
    }

    /// Decline the action parked under `token`. No state change either way.
    pub fn cancel(&mut self, token: ConfirmationToken) -> bool {
        let cancelled = self.gate.cancel(token);
        if cancelled {
            tracing::debug!("confirmation declined");
        }
        cancelled
    }

    pub fn export_csv(&self) -> AppResult<String> {
        Ok(to_csv_string(&self.summary())?)
    }

    /// Write `meal_data.csv` into `dir` and return its path.
    pub fn export_csv_to(&self, dir: &Path) -> AppResult<PathBuf> {
        let path = dir.join(CSV_FILE_NAME);
        export_csv_to_path(&self.summary(), &path)?;
        Ok(path)
    }

    /// Write `meal-report.pdf`, dated `generated_on`, into `dir` and return its path.
    pub fn export_report_pdf_to(&self, dir: &Path, generated_on: NaiveDate) -> AppResult<PathBuf> {
        let path = dir.join(REPORT_PDF_FILE_NAME);
        self.report(generated_on).write_pdf_to_path(&path)?;
        Ok(path)
    }

    pub fn report(&self, generated_on: NaiveDate) -> MealReport {
        MealReport::build(&self.summary(), generated_on)
    }

    /// Report dated with the local calendar day.
    pub fn report_today(&self) -> MealReport {
        self.report(Local::now().date_naive())
    }

    fn execute(&mut self, command: RosterCommand) -> AppResult<Vec<RosterEvent>> {
        tracing::debug!(?command, "handling roster command");
        let events = self.roster.execute(&command)?;
        if events.is_empty() {
            return Ok(events);
        }

        for event in &events {
            tracing::info!(
                event_type = event.event_type(),
                version = self.roster.version(),
                "roster updated"
            );
        }

        if let Err(err) = self.repository.persist(&self.roster) {
            tracing::error!(error = %err, "failed to persist roster");
            return Err(err.into());
        }

        Ok(events)
    }
}
