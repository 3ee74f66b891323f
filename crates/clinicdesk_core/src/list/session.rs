//! Patient list session.
//!
//! # Responsibility
//! - Own one session's store, query, page, page size and form surface.
//! - Hand out `PendingAction` tickets for CRUD intents and reconcile their
//!   collaborator results back into the store.
//!
//! # Invariants
//! - At most one unresolved update/delete per patient id, and at most one
//!   unresolved create.
//! - Collaborator results are applied as a single insert, replace or remove.
//! - A create result never overwrites a stored patient.
//! - A result for a patient that is no longer stored is a no-op.
//! - Every store change resets the current page to 1.

use crate::config::ListConfig;
use crate::directory::ActionResult;
use crate::list::filter::filter_patients;
use crate::list::paging::{
    check_page, page_bounds, page_buttons, total_pages, PageRow, PageSize, PageView, PagingError,
};
use crate::logging::sanitize_message;
use crate::model::draft::{DraftValidationErrors, PatientDraft, ValidatedDraft};
use crate::model::patient::{Patient, PatientId};
use crate::store::patient_store::{PatientStore, StoreResult};
use log::{debug, error, info, warn};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

const MAX_NOTICE_CHARS: usize = 200;

/// Errors raised before a CRUD intent reaches the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Target patient is not in the store.
    UnknownPatient(PatientId),
    /// An update or delete for this id is still unresolved.
    AlreadyInFlight(PatientId),
    /// A create is still unresolved.
    CreateInFlight,
    /// A form was submitted while no form surface is open.
    FormClosed,
    /// Draft failed field validation; the form stays open.
    Validation(DraftValidationErrors),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownPatient(id) => write!(f, "patient not found: {id}"),
            Self::AlreadyInFlight(id) => {
                write!(f, "an action for patient {id} is already in flight")
            }
            Self::CreateInFlight => write!(f, "a patient create is already in flight"),
            Self::FormClosed => write!(f, "no patient form is open"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DraftValidationErrors> for SessionError {
    fn from(value: DraftValidationErrors) -> Self {
        Self::Validation(value)
    }
}

/// Which create/edit surface is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormSurface {
    #[default]
    Closed,
    Creating,
    Editing(PatientId),
}

/// CRUD intent kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrudKind {
    Create,
    Update,
    Delete,
}

impl CrudKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    fn event(self) -> &'static str {
        match self {
            Self::Create => "patient_create",
            Self::Update => "patient_update",
            Self::Delete => "patient_delete",
        }
    }
}

#[derive(Debug)]
enum Intent {
    Create(ValidatedDraft),
    Update(PatientId, ValidatedDraft),
    Delete(PatientId),
}

/// Ticket for one dispatched CRUD intent.
///
/// Obtained from `begin_*`/`submit_form` and consumed by `resolve`, so each
/// intent is reconciled exactly once.
#[derive(Debug)]
#[must_use = "a pending action must be resolved to clear its in-flight marker"]
pub struct PendingAction {
    intent: Intent,
}

impl PendingAction {
    pub fn kind(&self) -> CrudKind {
        match self.intent {
            Intent::Create(_) => CrudKind::Create,
            Intent::Update(..) => CrudKind::Update,
            Intent::Delete(_) => CrudKind::Delete,
        }
    }

    /// Target id for update/delete, `None` for create.
    pub fn target_id(&self) -> Option<&str> {
        match &self.intent {
            Intent::Create(_) => None,
            Intent::Update(id, _) | Intent::Delete(id) => Some(id.as_str()),
        }
    }

    /// Validated payload for create/update, `None` for delete.
    pub fn draft(&self) -> Option<&ValidatedDraft> {
        match &self.intent {
            Intent::Create(draft) | Intent::Update(_, draft) => Some(draft),
            Intent::Delete(_) => None,
        }
    }

    /// Borrowed collaborator request for this intent.
    pub fn request(&self) -> ActionRequest<'_> {
        match &self.intent {
            Intent::Create(draft) => ActionRequest::Create(draft),
            Intent::Update(id, draft) => ActionRequest::Update(id, draft),
            Intent::Delete(id) => ActionRequest::Delete(id),
        }
    }
}

/// Collaborator call described by a `PendingAction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionRequest<'a> {
    Create(&'a ValidatedDraft),
    Update(&'a str, &'a ValidatedDraft),
    Delete(&'a str),
}

/// Reconciliation result of one resolved intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrudOutcome {
    /// Store was updated.
    Applied { kind: CrudKind, id: PatientId },
    /// Collaborator succeeded but the target is no longer stored.
    Skipped { kind: CrudKind, id: PatientId },
    /// Collaborator reported failure; store unchanged.
    Failed { kind: CrudKind, message: String },
}

impl CrudOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Explicit state of one patient list view.
#[derive(Debug, Clone)]
pub struct PatientListSession {
    store: PatientStore,
    query: String,
    page: usize,
    page_size: PageSize,
    pager_buttons: usize,
    form: FormSurface,
    in_flight: BTreeSet<PatientId>,
    create_in_flight: bool,
    last_error: Option<String>,
}

impl PatientListSession {
    /// Creates an empty session.
    pub fn new(config: &ListConfig) -> Self {
        Self {
            store: PatientStore::new(),
            query: String::new(),
            page: 1,
            page_size: config.page_size,
            pager_buttons: config.pager_buttons(),
            form: FormSurface::Closed,
            in_flight: BTreeSet::new(),
            create_in_flight: false,
            last_error: None,
        }
    }

    /// Creates a session over fetched records.
    pub fn with_records(config: &ListConfig, records: Vec<Patient>) -> StoreResult<Self> {
        let mut session = Self::new(config);
        session.load(records)?;
        Ok(session)
    }

    /// Replaces the store with freshly fetched records.
    pub fn load(&mut self, records: Vec<Patient>) -> StoreResult<()> {
        self.store = PatientStore::from_records(records)?;
        self.page = 1;
        info!(
            "event=patients_loaded module=session status=ok count={}",
            self.store.len()
        );
        Ok(())
    }

    pub fn store(&self) -> &PatientStore {
        &self.store
    }

    pub fn records(&self) -> &[Patient] {
        self.store.records()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn form(&self) -> &FormSurface {
        &self.form
    }

    /// Most recent collaborator failure shown to the user.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    pub fn is_in_flight(&self, id: &str) -> bool {
        self.in_flight.contains(id)
    }

    pub fn has_pending(&self) -> bool {
        self.create_in_flight || !self.in_flight.is_empty()
    }

    /// Sets the search query and returns to page 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    /// Changes records per page and returns to page 1.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page = 1;
    }

    /// Filtered view of the store for the current query.
    pub fn filtered(&self) -> Vec<&Patient> {
        filter_patients(self.store.records(), &self.query)
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered().len(), self.page_size)
    }

    /// Moves to `page`, rejecting pages outside `[1, total_pages]`.
    pub fn go_to_page(&mut self, page: usize) -> Result<(), PagingError> {
        match check_page(page, self.total_pages()) {
            Ok(page) => {
                self.page = page;
                Ok(())
            }
            Err(err) => {
                debug!("event=page_rejected module=session status=skipped requested={page}");
                Err(err)
            }
        }
    }

    pub fn next_page(&mut self) -> Result<(), PagingError> {
        self.go_to_page(self.page + 1)
    }

    pub fn previous_page(&mut self) -> Result<(), PagingError> {
        self.go_to_page(self.page.saturating_sub(1))
    }

    /// Derives the current page from the store snapshot.
    pub fn page_view(&self) -> PageView<'_> {
        let filtered = self.filtered();
        let total = total_pages(filtered.len(), self.page_size);
        let bounds = page_bounds(filtered.len(), self.page_size, self.page);
        let start = bounds.start;
        let rows = filtered[bounds]
            .iter()
            .copied()
            .enumerate()
            .map(|(index, patient)| PageRow {
                serial: start + index + 1,
                patient,
            })
            .collect();

        PageView {
            rows,
            page: self.page,
            total_pages: total,
            page_size: self.page_size,
            buttons: page_buttons(self.page, total, self.pager_buttons),
            filtered_count: filtered.len(),
            total_count: self.store.len(),
            query_active: !self.query.is_empty(),
        }
    }

    /// Read-only lookup backing the detail view.
    pub fn view_patient(&self, id: &str) -> Option<&Patient> {
        self.store.get(id)
    }

    pub fn open_create_form(&mut self) {
        self.form = FormSurface::Creating;
    }

    /// Opens the edit form for a stored patient and returns its pre-filled
    /// draft.
    pub fn open_edit_form(&mut self, id: &str) -> Result<PatientDraft, SessionError> {
        let patient = self
            .store
            .get(id)
            .ok_or_else(|| SessionError::UnknownPatient(id.to_string()))?;
        let draft = PatientDraft::from_patient(patient);
        self.form = FormSurface::Editing(id.to_string());
        Ok(draft)
    }

    pub fn cancel_form(&mut self) {
        self.form = FormSurface::Closed;
    }

    /// Validates `draft` and turns the open form into a create or update
    /// intent. Validation failures keep the form open.
    pub fn submit_form(&mut self, draft: &PatientDraft) -> Result<PendingAction, SessionError> {
        let target = match &self.form {
            FormSurface::Closed => return Err(SessionError::FormClosed),
            FormSurface::Creating => None,
            FormSurface::Editing(id) => Some(id.clone()),
        };
        let validated = draft.validate()?;
        match target {
            None => self.begin_create(validated),
            Some(id) => self.begin_update(&id, validated),
        }
    }

    pub fn begin_create(&mut self, draft: ValidatedDraft) -> Result<PendingAction, SessionError> {
        if self.create_in_flight {
            warn!("event=dispatch_rejected module=session status=skipped kind=create");
            return Err(SessionError::CreateInFlight);
        }
        self.create_in_flight = true;
        self.form = FormSurface::Closed;
        Ok(PendingAction {
            intent: Intent::Create(draft),
        })
    }

    pub fn begin_update(
        &mut self,
        id: &str,
        draft: ValidatedDraft,
    ) -> Result<PendingAction, SessionError> {
        if !self.store.contains(id) {
            return Err(SessionError::UnknownPatient(id.to_string()));
        }
        self.mark_in_flight(id, CrudKind::Update)?;
        self.form = FormSurface::Closed;
        Ok(PendingAction {
            intent: Intent::Update(id.to_string(), draft),
        })
    }

    /// Starts a delete. Ids missing from the store are still dispatched; the
    /// result then reconciles as a no-op.
    pub fn begin_delete(&mut self, id: &str) -> Result<PendingAction, SessionError> {
        self.mark_in_flight(id, CrudKind::Delete)?;
        Ok(PendingAction {
            intent: Intent::Delete(id.to_string()),
        })
    }

    /// Applies a collaborator result for `action` and clears its marker.
    pub fn resolve(&mut self, action: PendingAction, result: ActionResult) -> CrudOutcome {
        let kind = action.kind();
        match &action.intent {
            Intent::Create(_) => self.create_in_flight = false,
            Intent::Update(id, _) | Intent::Delete(id) => {
                self.in_flight.remove(id);
            }
        }

        if !result.success {
            let message = result
                .error
                .unwrap_or_else(|| "unknown error".to_string());
            return self.fail(kind, message);
        }

        match action.intent {
            Intent::Create(_) => match result.record {
                Some(record) => self.apply_create(record),
                None => self.fail(kind, "collaborator reported success without a record"),
            },
            Intent::Update(id, _) => match result.record {
                Some(record) if record.id == id => self.apply_update(record),
                Some(_) => self.fail(kind, "collaborator returned a different patient"),
                None => self.fail(kind, "collaborator reported success without a record"),
            },
            Intent::Delete(id) => match self.store.remove(&id) {
                Some(_) => self.applied(kind, id),
                None => self.skipped(kind, id),
            },
        }
    }

    fn apply_create(&mut self, record: Patient) -> CrudOutcome {
        if let Err(err) = record.validate() {
            return self.fail(CrudKind::Create, err.to_string());
        }
        let id = record.id.clone();
        match self.store.insert(record) {
            Ok(()) => self.applied(CrudKind::Create, id),
            Err(_) => self.fail(
                CrudKind::Create,
                format!("collaborator returned an existing patient id: {id}"),
            ),
        }
    }

    fn apply_update(&mut self, record: Patient) -> CrudOutcome {
        if let Err(err) = record.validate() {
            return self.fail(CrudKind::Update, err.to_string());
        }
        let id = record.id.clone();
        if self.store.replace(record) {
            self.applied(CrudKind::Update, id)
        } else {
            self.skipped(CrudKind::Update, id)
        }
    }

    fn mark_in_flight(&mut self, id: &str, kind: CrudKind) -> Result<(), SessionError> {
        if !self.in_flight.insert(id.to_string()) {
            warn!(
                "event=dispatch_rejected module=session status=skipped kind={} id={}",
                kind.as_str(),
                id
            );
            return Err(SessionError::AlreadyInFlight(id.to_string()));
        }
        Ok(())
    }

    fn applied(&mut self, kind: CrudKind, id: PatientId) -> CrudOutcome {
        self.page = 1;
        self.last_error = None;
        info!(
            "event={} module=session status=ok id={} count={}",
            kind.event(),
            id,
            self.store.len()
        );
        CrudOutcome::Applied { kind, id }
    }

    fn skipped(&self, kind: CrudKind, id: PatientId) -> CrudOutcome {
        warn!(
            "event={} module=session status=skipped reason=not_in_store id={}",
            kind.event(),
            id
        );
        CrudOutcome::Skipped { kind, id }
    }

    fn fail(&mut self, kind: CrudKind, message: impl Into<String>) -> CrudOutcome {
        let message = sanitize_message(&message.into(), MAX_NOTICE_CHARS);
        error!(
            "event={} module=session status=error error={}",
            kind.event(),
            message
        );
        self.last_error = Some(format!("Failed to {} patient: {}", kind.as_str(), message));
        CrudOutcome::Failed { kind, message }
    }
}
