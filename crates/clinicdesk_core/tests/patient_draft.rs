use clinicdesk_core::{
    Attachment, BloodGroup, DraftField, Gender, MaritalStatus, Occupation, Patient, PatientDraft,
};

fn intake_draft() -> PatientDraft {
    PatientDraft {
        first_name: " Asha ".to_string(),
        last_name: "Rao".to_string(),
        age: "34".to_string(),
        gender: "FEMALE".to_string(),
        patient_id: "PT9001".to_string(),
        email: "asha@example.com".to_string(),
        mobile_number: "98765 43210".to_string(),
        marital_status: "married".to_string(),
        occupation: "self-employed".to_string(),
        blood_group: "B+".to_string(),
        address: "12 MG Road".to_string(),
        city: "Pune".to_string(),
        state: "maharashtra".to_string(),
        postal_code: "411001".to_string(),
        ..PatientDraft::default()
    }
}

#[test]
fn valid_draft_produces_typed_fields() {
    let validated = intake_draft().validate().expect("intake draft should validate");

    assert_eq!(validated.first_name, "Asha");
    assert_eq!(validated.full_name(), "Asha Rao");
    assert_eq!(validated.age, 34);
    assert_eq!(validated.gender, Gender::Female);
    assert_eq!(validated.marital_status, MaritalStatus::Married);
    assert_eq!(validated.occupation, Some(Occupation::SelfEmployed));
    assert_eq!(validated.blood_group, BloodGroup::BPositive);
    assert_eq!(validated.blood_pressure, None);
    assert_eq!(
        validated.composed_address().as_deref(),
        Some("12 MG Road, Pune, maharashtra, 411001")
    );
}

#[test]
fn empty_draft_reports_every_required_field() {
    let errors = PatientDraft::default()
        .validate()
        .expect_err("empty draft must fail");

    let fields = errors
        .errors()
        .iter()
        .map(|error| error.field)
        .collect::<Vec<_>>();
    assert_eq!(
        fields,
        vec![
            DraftField::FirstName,
            DraftField::LastName,
            DraftField::Age,
            DraftField::Gender,
            DraftField::PatientId,
            DraftField::MobileNumber,
            DraftField::MaritalStatus,
            DraftField::BloodGroup,
        ]
    );
    assert_eq!(
        errors.message_for(DraftField::FirstName),
        Some("First name is required")
    );
    assert_eq!(
        errors.message_for(DraftField::PatientId),
        Some("Create ID is required")
    );
    assert_eq!(errors.message_for(DraftField::Email), None);
}

#[test]
fn malformed_optional_email_is_rejected() {
    let mut draft = intake_draft();
    draft.email = "asha@".to_string();

    let errors = draft.validate().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors.message_for(DraftField::Email),
        Some("Invalid email address")
    );
}

#[test]
fn short_mobile_number_is_rejected() {
    let mut draft = intake_draft();
    draft.mobile_number = "+91 12345".to_string();

    let errors = draft.validate().unwrap_err();
    assert_eq!(
        errors.message_for(DraftField::MobileNumber),
        Some("Mobile number must be at least 10 digits")
    );
}

#[test]
fn age_outside_form_range_is_rejected() {
    for raw in ["0", "101", "abc", "-4"] {
        let mut draft = intake_draft();
        draft.age = raw.to_string();

        let errors = draft.validate().unwrap_err();
        assert_eq!(
            errors.message_for(DraftField::Age),
            Some("Age must be between 1 and 100"),
            "age input `{raw}`"
        );
    }
}

#[test]
fn unknown_select_values_are_rejected() {
    let mut draft = intake_draft();
    draft.blood_group = "C+".to_string();
    draft.occupation = "astronaut".to_string();
    draft.gender = "unknown".to_string();

    let errors = draft.validate().unwrap_err();
    assert_eq!(errors.len(), 3);
    assert!(errors.to_string().contains("bloodGroup: Unknown blood group"));
}

#[test]
fn attachments_keep_selection_order_and_ignore_bad_indexes() {
    let mut draft = intake_draft();
    draft.add_attachments(vec![
        Attachment::new("xray.png", 2048),
        Attachment::new("report.pdf", 4096),
    ]);
    draft.add_attachments(vec![Attachment::new("prescription.jpg", 512)]);

    let removed = draft.remove_attachment(1).expect("second attachment should exist");
    assert_eq!(removed.file_name, "report.pdf");
    assert_eq!(draft.remove_attachment(5), None);

    let names = draft
        .attachments
        .iter()
        .map(|attachment| attachment.file_name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["xray.png", "prescription.jpg"]);

    let validated = draft.validate().unwrap();
    assert_eq!(validated.attachments.len(), 2);
}

#[test]
fn from_patient_prefills_edit_form() {
    let mut patient =
        Patient::new("p-4", "PT0004", "John Ronald Doe", "9876500004", Gender::Male, 61)
            .expect("fixture patient should be valid");
    patient.email = Some("john@example.com".to_string());

    let draft = PatientDraft::from_patient(&patient);
    assert_eq!(draft.first_name, "John");
    assert_eq!(draft.last_name, "Ronald Doe");
    assert_eq!(draft.age, "61");
    assert_eq!(draft.gender, "MALE");
    assert_eq!(draft.patient_id, "PT0004");
    assert_eq!(draft.email, "john@example.com");
    assert_eq!(draft.mobile_number, "9876500004");
    assert!(draft.marital_status.is_empty());
    assert!(draft.attachments.is_empty());
}

#[test]
fn from_patient_carries_intake_details() {
    let mut patient = Patient::new("p-6", "PT0006", "Sita Devi", "9876500006", Gender::Female, 48)
        .expect("fixture patient should be valid");
    patient.marital_status = Some(MaritalStatus::Widowed);
    patient.blood_group = Some(BloodGroup::ONegative);
    patient.sugar_levels = Some("110".to_string());

    let draft = PatientDraft::from_patient(&patient);
    assert_eq!(draft.marital_status, "widowed");
    assert_eq!(draft.blood_group, "O-");
    assert_eq!(draft.sugar_levels, "110");
    assert!(draft.occupation.is_empty());

    let validated = draft.validate().expect("pre-filled draft should validate");
    assert_eq!(validated.full_name(), "Sita Devi");
    assert_eq!(validated.marital_status, MaritalStatus::Widowed);
}

#[test]
fn draft_deserializes_from_form_keys() {
    let value = serde_json::json!({
        "firstName": "Asha",
        "lastName": "Rao",
        "age": "34",
        "gender": "FEMALE",
        "createId": "PT9001",
        "emailId": "",
        "mobileNumber": "9876543210",
        "maritalStatus": "single",
        "bloodGroup": "O-"
    });

    let draft: PatientDraft = serde_json::from_value(value).expect("form keys should decode");
    assert_eq!(draft.patient_id, "PT9001");
    let validated = draft.validate().unwrap();
    assert_eq!(validated.email, None);
    assert_eq!(validated.blood_group, BloodGroup::ONegative);
}
