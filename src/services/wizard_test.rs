use super::*;
use std::sync::Arc;

use crate::services::catalog::ReviewStatus;
use crate::store::MemoryStore;
use uuid::Uuid;

fn store() -> ClientStore {
    ClientStore::open(Arc::new(MemoryStore::new()), "client-1")
}

fn basic() -> BasicInfo {
    BasicInfo {
        founder_name: "Asha Rao".into(),
        startup_name: "Orbit Labs".into(),
        email: "asha@orbit.dev".into(),
        phone: "+91 9000000000".into(),
        company_type: Some(CompanyType::PvtLtd),
        team_size: Some(TeamSize::Small),
        coupon_code: String::new(),
    }
}

fn documentation() -> Documentation {
    Documentation {
        incubation_centre: "t-hub".into(),
        registration_certificate: Some(FileRef { name: "cert.pdf".into(), size: 1024, content_type: None }),
        incubation_letter: None,
        website_link: String::new(),
    }
}

fn idea() -> IdeaDetails {
    IdeaDetails {
        idea_description: "Satellite data for farmers".into(),
        expectations: vec![Expectation::Funding],
        challenges: String::new(),
    }
}

/// A wizard sitting on the final step with every field filled.
fn completed() -> Wizard {
    let mut wizard = Wizard::new();
    wizard.update(StepData::Basic(basic())).unwrap();
    wizard.next_step().unwrap();
    wizard.update(StepData::Documentation(documentation())).unwrap();
    wizard.next_step().unwrap();
    wizard.update(StepData::Idea(idea())).unwrap();
    wizard
}

// =============================================================================
// WizardStep
// =============================================================================

#[test]
fn step_numbers_and_titles() {
    assert_eq!(WizardStep::Basic.number(), 1);
    assert_eq!(WizardStep::Idea.number(), STEP_COUNT);
    assert_eq!(WizardStep::Documentation.title(), "Documentation");
    assert_eq!(WizardStep::Idea.title(), "About Your Startup");
}

#[test]
fn step_transitions_saturate() {
    assert_eq!(WizardStep::Idea.next(), WizardStep::Idea);
    assert_eq!(WizardStep::Basic.prev(), WizardStep::Basic);
    assert_eq!(WizardStep::Basic.next().next(), WizardStep::Idea);
}

// =============================================================================
// next_step gating
// =============================================================================

#[test]
fn empty_wizard_cannot_advance() {
    let mut wizard = Wizard::new();
    let err = wizard.next_step().unwrap_err();
    assert!(matches!(err, WizardError::MissingFields { step: WizardStep::Basic, .. }));
    assert_eq!(wizard.step(), WizardStep::Basic);
}

#[test]
fn missing_startup_name_stays_on_step_one() {
    let mut wizard = Wizard::new();
    let mut info = basic();
    info.startup_name = String::new();
    wizard.update(StepData::Basic(info)).unwrap();

    let err = wizard.next_step().unwrap_err();
    match err {
        WizardError::MissingFields { step, fields } => {
            assert_eq!(step, WizardStep::Basic);
            assert_eq!(fields, vec!["startupName"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(wizard.step(), WizardStep::Basic);
    assert_eq!(err_message(&mut wizard), "Please fill in all required fields");
}

fn err_message(wizard: &mut Wizard) -> String {
    wizard.next_step().unwrap_err().to_string()
}

#[test]
fn whitespace_counts_as_empty() {
    let mut wizard = Wizard::new();
    let mut info = basic();
    info.phone = "   ".into();
    wizard.update(StepData::Basic(info)).unwrap();
    assert!(wizard.next_step().is_err());
}

#[test]
fn each_required_basic_field_gates() {
    let clears: [fn(&mut BasicInfo); 6] = [
        |b| b.founder_name.clear(),
        |b| b.startup_name.clear(),
        |b| b.email.clear(),
        |b| b.phone.clear(),
        |b| b.company_type = None,
        |b| b.team_size = None,
    ];
    for clear in clears {
        let mut info = basic();
        clear(&mut info);
        let mut wizard = Wizard::new();
        wizard.update(StepData::Basic(info)).unwrap();
        assert!(wizard.next_step().is_err());
        assert_eq!(wizard.step(), WizardStep::Basic);
    }
}

#[test]
fn coupon_code_is_optional() {
    let mut wizard = Wizard::new();
    wizard.update(StepData::Basic(basic())).unwrap();
    assert_eq!(wizard.next_step().unwrap(), WizardStep::Documentation);
}

#[test]
fn documentation_requires_certificate() {
    let mut wizard = Wizard::new();
    wizard.update(StepData::Basic(basic())).unwrap();
    wizard.next_step().unwrap();
    let mut docs = documentation();
    docs.registration_certificate = None;
    wizard.update(StepData::Documentation(docs)).unwrap();

    let err = wizard.next_step().unwrap_err();
    assert!(matches!(
        err,
        WizardError::MissingFields { step: WizardStep::Documentation, ref fields } if fields == &vec!["registrationCertificate"]
    ));
    assert_eq!(wizard.step(), WizardStep::Documentation);
}

#[test]
fn next_step_bounded_at_last() {
    let mut wizard = completed();
    assert_eq!(wizard.next_step().unwrap(), WizardStep::Idea);
}

#[test]
fn prev_step_bounded_at_first() {
    let mut wizard = Wizard::new();
    assert_eq!(wizard.prev_step(), WizardStep::Basic);
    let mut wizard = completed();
    assert_eq!(wizard.prev_step(), WizardStep::Documentation);
    assert_eq!(wizard.prev_step(), WizardStep::Basic);
    assert_eq!(wizard.prev_step(), WizardStep::Basic);
}

#[test]
fn prev_step_is_unconditional() {
    let mut wizard = completed();
    wizard.update(StepData::Idea(IdeaDetails::default())).unwrap();
    assert_eq!(wizard.prev_step(), WizardStep::Documentation);
}

// =============================================================================
// update
// =============================================================================

#[test]
fn unsupported_certificate_rejected() {
    let mut wizard = Wizard::new();
    let mut docs = documentation();
    docs.registration_certificate = Some(FileRef { name: "cert.exe".into(), size: 1, content_type: None });
    let err = wizard.update(StepData::Documentation(docs)).unwrap_err();
    assert!(matches!(err, WizardError::UnsupportedFile { ref name } if name == "cert.exe"));
    assert_eq!(wizard.draft().documentation, Documentation::default());
}

#[test]
fn unsupported_letter_rejected() {
    let mut wizard = Wizard::new();
    let mut docs = documentation();
    docs.incubation_letter = Some(FileRef { name: "letter.docx".into(), size: 1, content_type: None });
    assert!(wizard.update(StepData::Documentation(docs)).is_err());
}

#[test]
fn file_extension_is_case_insensitive() {
    let file = FileRef { name: "SCAN.JPEG".into(), size: 1, content_type: None };
    assert_eq!(file.extension().as_deref(), Some("jpeg"));
    assert!(file.is_accepted());
}

#[test]
fn file_without_extension_rejected() {
    assert!(!FileRef { name: "certificate".into(), size: 1, content_type: None }.is_accepted());
    assert!(!FileRef { name: ".pdf".into(), size: 1, content_type: None }.is_accepted());
}

#[test]
fn idea_update_dedups_expectations() {
    let mut wizard = Wizard::new();
    let mut details = idea();
    details.expectations = vec![Expectation::Funding, Expectation::Legal, Expectation::Funding];
    wizard.update(StepData::Idea(details)).unwrap();
    assert_eq!(wizard.draft().idea.expectations, vec![Expectation::Funding, Expectation::Legal]);
}

#[test]
fn set_expectation_toggles() {
    let mut details = IdeaDetails::default();
    details.set_expectation(Expectation::Network, true);
    details.set_expectation(Expectation::Network, true);
    details.set_expectation(Expectation::Legal, true);
    assert_eq!(details.expectations, vec![Expectation::Network, Expectation::Legal]);
    details.set_expectation(Expectation::Network, false);
    assert_eq!(details.expectations, vec![Expectation::Legal]);
}

#[test]
fn prefilled_copies_identity() {
    let user = User {
        id: Uuid::nil(),
        name: "Asha".into(),
        email: "asha@orbit.dev".into(),
        contact: Some("+91 1".into()),
        role: None,
        incubation_centre: None,
        status: ReviewStatus::Pending,
    };
    let wizard = Wizard::prefilled(&user);
    assert_eq!(wizard.draft().basic.founder_name, "Asha");
    assert_eq!(wizard.draft().basic.email, "asha@orbit.dev");
    assert_eq!(wizard.draft().basic.phone, "+91 1");
    assert_eq!(wizard.step(), WizardStep::Basic);
}

// =============================================================================
// submit
// =============================================================================

#[test]
fn submit_persists_exact_draft() {
    let store = store();
    let wizard = completed();
    let submitted = wizard.submit(&store).unwrap();
    assert_eq!(&submitted, wizard.draft());
    let stored: Draft = store.get_json(keys::APPLICATION_DATA).unwrap();
    assert_eq!(stored, submitted);
}

#[test]
fn submit_without_expectations_persists_nothing() {
    let store = store();
    let mut wizard = completed();
    let mut details = idea();
    details.expectations.clear();
    wizard.update(StepData::Idea(details)).unwrap();

    let err = wizard.submit(&store).unwrap_err();
    assert!(matches!(err, WizardError::MissingFields { step: WizardStep::Idea, .. }));
    assert!(!store.contains(keys::APPLICATION_DATA));
}

#[test]
fn submit_revalidates_earlier_steps() {
    let store = store();
    let mut wizard = completed();
    let mut info = basic();
    info.founder_name.clear();
    wizard.update(StepData::Basic(info)).unwrap();

    let err = wizard.submit(&store).unwrap_err();
    assert!(matches!(err, WizardError::MissingFields { step: WizardStep::Basic, .. }));
    assert!(!store.contains(keys::APPLICATION_DATA));
}

#[test]
fn submit_before_final_step_rejected() {
    let store = store();
    let mut wizard = Wizard::new();
    wizard.update(StepData::Basic(basic())).unwrap();
    wizard.update(StepData::Documentation(documentation())).unwrap();
    wizard.update(StepData::Idea(idea())).unwrap();

    let err = wizard.submit(&store).unwrap_err();
    assert!(matches!(err, WizardError::NotOnFinalStep { step: WizardStep::Basic }));
    assert!(!store.contains(keys::APPLICATION_DATA));
}

#[test]
fn submit_store_failure_surfaces() {
    let store = ClientStore::open(Arc::new(MemoryStore::with_quota(16)), "c");
    let err = completed().submit(&store).unwrap_err();
    assert!(matches!(err, WizardError::Store(StoreError::QuotaExceeded { .. })));
}

// =============================================================================
// serde shape
// =============================================================================

#[test]
fn draft_serializes_flat_camel_case() {
    let value = serde_json::to_value(completed().draft()).unwrap();
    assert_eq!(value["startupName"], "Orbit Labs");
    assert_eq!(value["companyType"], "pvt-ltd");
    assert_eq!(value["teamSize"], "2-5");
    assert_eq!(value["incubationCentre"], "t-hub");
    assert_eq!(value["registrationCertificate"]["name"], "cert.pdf");
    assert_eq!(value["expectations"][0], "Funding Support");
    assert!(value.get("basic").is_none());
}

#[test]
fn step_data_tagged_by_step() {
    let json = r#"{"step":"idea","data":{"ideaDescription":"x","expectations":["Legal Support"]}}"#;
    let data: StepData = serde_json::from_str(json).unwrap();
    assert_eq!(data.step(), WizardStep::Idea);
    let StepData::Idea(details) = data else {
        panic!("expected idea step");
    };
    assert_eq!(details.expectations, vec![Expectation::Legal]);
    assert_eq!(details.challenges, "");
}
