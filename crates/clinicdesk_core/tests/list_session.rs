use clinicdesk_core::{
    FormSurface, Gender, ListConfig, PageSize, PagingError, Patient, PatientDraft,
    PatientListSession, SessionError, StoreError,
};

fn patient(index: usize) -> Patient {
    Patient::new(
        format!("p-{index}"),
        format!("PT{index:04}"),
        format!("Patient {index}"),
        format!("98765{index:05}"),
        Gender::Male,
        30,
    )
    .expect("fixture patient should be valid")
}

fn session_with(count: usize, page_size: PageSize) -> PatientListSession {
    let config = ListConfig {
        page_size,
        ..ListConfig::default()
    };
    PatientListSession::with_records(&config, (0..count).map(patient).collect())
        .expect("fixture records should load")
}

#[test]
fn new_session_uses_configured_page_size() {
    let config = ListConfig::from_json_str(r#"{"pageSize": 25}"#).expect("config should parse");
    let session = PatientListSession::new(&config);

    assert_eq!(session.page_size(), PageSize::TwentyFive);
    assert_eq!(session.page(), 1);
    assert_eq!(session.total_pages(), 1);
    assert_eq!(session.form(), &FormSurface::Closed);
}

#[test]
fn loading_duplicate_ids_is_rejected() {
    let err = PatientListSession::with_records(
        &ListConfig::default(),
        vec![patient(1), patient(2), patient(1)],
    )
    .unwrap_err();
    assert_eq!(err, StoreError::DuplicateId("p-1".to_string()));
}

#[test]
fn twelve_records_paginate_into_three_pages() {
    let mut session = session_with(12, PageSize::Five);

    let first = session.page_view();
    assert_eq!(first.total_pages, 3);
    let first_ids = first
        .rows
        .iter()
        .map(|row| row.patient.id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(first_ids, vec!["p-0", "p-1", "p-2", "p-3", "p-4"]);

    session.go_to_page(3).unwrap();
    let last = session.page_view();
    assert_eq!(last.rows.len(), 2);
    assert_eq!(last.rows[0].patient.id, "p-10");
    assert_eq!(last.rows[0].serial, 11);
    assert_eq!(last.rows[1].serial, 12);
    assert!(last.has_previous());
    assert!(!last.has_next());
    assert_eq!(last.status_label(), "Showing page 3 of 3");
}

#[test]
fn navigation_outside_bounds_is_rejected_without_moving() {
    let mut session = session_with(12, PageSize::Five);

    assert_eq!(
        session.previous_page(),
        Err(PagingError::OutOfRange {
            requested: 0,
            total_pages: 3
        })
    );
    assert_eq!(session.page(), 1);

    session.next_page().unwrap();
    session.next_page().unwrap();
    assert_eq!(
        session.next_page(),
        Err(PagingError::OutOfRange {
            requested: 4,
            total_pages: 3
        })
    );
    assert_eq!(session.page(), 3);
}

#[test]
fn query_and_page_size_changes_reset_to_first_page() {
    let mut session = session_with(30, PageSize::Five);

    session.go_to_page(4).unwrap();
    session.set_query("Patient");
    assert_eq!(session.page(), 1);

    session.go_to_page(6).unwrap();
    session.set_page_size(PageSize::Ten);
    assert_eq!(session.page(), 1);
    assert_eq!(session.total_pages(), 3);
}

#[test]
fn active_query_is_reported_in_status_label() {
    let mut session = session_with(12, PageSize::Ten);
    session.set_query("patient 1");

    let view = session.page_view();
    assert_eq!(view.filtered_count, 3);
    assert_eq!(view.total_count, 12);
    assert!(!view.shows_pager());
    assert_eq!(
        view.status_label(),
        "Showing page 1 of 1 (filtered from 12 total)"
    );
    assert_eq!(view.empty_state_message(), None);
}

#[test]
fn empty_views_explain_why() {
    let mut session = session_with(3, PageSize::Ten);
    session.set_query("zzz");
    let view = session.page_view();
    assert!(view.rows.is_empty());
    assert_eq!(view.total_pages, 1);
    assert_eq!(
        view.empty_state_message(),
        Some("No patients found matching your search.")
    );

    let empty = PatientListSession::new(&ListConfig::default());
    assert_eq!(
        empty.page_view().empty_state_message(),
        Some("No patients found. Add your first patient to get started.")
    );
}

#[test]
fn pager_buttons_follow_current_page() {
    let mut session = session_with(60, PageSize::Five);
    assert_eq!(session.page_view().buttons, vec![1, 2, 3, 4, 5]);

    session.go_to_page(7).unwrap();
    let view = session.page_view();
    assert!(view.shows_pager());
    assert_eq!(view.buttons, vec![5, 6, 7, 8, 9]);

    session.go_to_page(12).unwrap();
    assert_eq!(session.page_view().buttons, vec![8, 9, 10, 11, 12]);
}

#[test]
fn edit_form_requires_a_stored_patient() {
    let mut session = session_with(3, PageSize::Ten);

    let err = session.open_edit_form("p-99").unwrap_err();
    assert_eq!(err, SessionError::UnknownPatient("p-99".to_string()));
    assert_eq!(session.form(), &FormSurface::Closed);

    let draft = session.open_edit_form("p-2").expect("p-2 should be editable");
    assert_eq!(draft.first_name, "Patient");
    assert_eq!(draft.last_name, "2");
    assert_eq!(session.form(), &FormSurface::Editing("p-2".to_string()));

    session.cancel_form();
    assert_eq!(session.form(), &FormSurface::Closed);
}

#[test]
fn submitting_without_an_open_form_is_rejected() {
    let mut session = session_with(1, PageSize::Ten);
    let err = session.submit_form(&PatientDraft::default()).unwrap_err();
    assert_eq!(err, SessionError::FormClosed);
}

#[test]
fn invalid_draft_keeps_form_open_and_dispatches_nothing() {
    let mut session = session_with(1, PageSize::Ten);
    session.open_create_form();

    let err = session.submit_form(&PatientDraft::default()).unwrap_err();
    assert!(matches!(err, SessionError::Validation(ref errors) if errors.len() == 8));
    assert_eq!(session.form(), &FormSurface::Creating);
    assert!(!session.has_pending());
}

#[test]
fn view_patient_is_read_only_lookup() {
    let session = session_with(3, PageSize::Ten);

    assert_eq!(session.view_patient("p-1").unwrap().name, "Patient 1");
    assert!(session.view_patient("p-7").is_none());
}
