//! CRUD dispatcher use-case service.
//!
//! # Responsibility
//! - Run session intents against a `PatientDirectory`.
//! - Feed every collaborator result back through `PatientListSession::resolve`.
//!
//! # Invariants
//! - Collaborator failures surface as `CrudOutcome::Failed`, never as `Err`.
//! - `Err` is only returned for intents rejected before dispatch
//!   (validation, duplicate submission, unknown target, closed form).
//! - No automatic retries.

use crate::directory::{ActionResult, DirectoryError, DirectoryResult, PatientDirectory};
use crate::list::session::{
    ActionRequest, CrudOutcome, PatientListSession, PendingAction, SessionError,
};
use crate::model::draft::PatientDraft;
use log::error;

/// Dispatcher over one directory implementation.
pub struct CrudDispatcher<D: PatientDirectory> {
    directory: D,
}

impl<D: PatientDirectory> CrudDispatcher<D> {
    /// Creates a dispatcher using the provided directory implementation.
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Fetches all patients into `session`, returning the loaded count.
    ///
    /// # Errors
    /// - Fetch failures are returned unchanged.
    /// - Records violating store invariants map to `DirectoryError::InvalidData`.
    pub fn load(&self, session: &mut PatientListSession) -> DirectoryResult<usize> {
        let records = self.directory.fetch_patients().inspect_err(|err| {
            error!("event=patients_loaded module=dispatch status=error error={err}");
        })?;
        session
            .load(records)
            .map_err(|err| DirectoryError::InvalidData(err.to_string()))?;
        Ok(session.store().len())
    }

    /// Submits the open create/edit form.
    pub fn submit_form(
        &self,
        session: &mut PatientListSession,
        draft: &PatientDraft,
    ) -> Result<CrudOutcome, SessionError> {
        let action = session.submit_form(draft)?;
        Ok(self.execute(session, action))
    }

    /// Creates a patient from a raw draft without going through the form
    /// surface.
    pub fn create(
        &self,
        session: &mut PatientListSession,
        draft: &PatientDraft,
    ) -> Result<CrudOutcome, SessionError> {
        let action = session.begin_create(draft.validate()?)?;
        Ok(self.execute(session, action))
    }

    pub fn update(
        &self,
        session: &mut PatientListSession,
        id: &str,
        draft: &PatientDraft,
    ) -> Result<CrudOutcome, SessionError> {
        let action = session.begin_update(id, draft.validate()?)?;
        Ok(self.execute(session, action))
    }

    pub fn delete(
        &self,
        session: &mut PatientListSession,
        id: &str,
    ) -> Result<CrudOutcome, SessionError> {
        let action = session.begin_delete(id)?;
        Ok(self.execute(session, action))
    }

    /// Calls the directory for an already started intent and reconciles it.
    pub fn execute(&self, session: &mut PatientListSession, action: PendingAction) -> CrudOutcome {
        let result = self.call(&action);
        session.resolve(action, result)
    }

    /// Performs the collaborator call for `action` without touching a session.
    pub fn call(&self, action: &PendingAction) -> ActionResult {
        match action.request() {
            ActionRequest::Create(draft) => self.directory.create_patient(draft),
            ActionRequest::Update(id, draft) => self.directory.update_patient(id, draft),
            ActionRequest::Delete(id) => self.directory.delete_patient(id),
        }
    }
}
