use std::sync::Arc;

use chrono::NaiveDate;
use paydao_core::{ContributorStore, FixedClock, Role, seed_contributors};
use paydao_panels::panels::add_contributor::AddContributorForm;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 12).unwrap()
}

fn store() -> ContributorStore {
    ContributorStore::with_clock(seed_contributors(), Arc::new(FixedClock(today())))
}

#[test]
fn submit_adds_contributor_and_resets() {
    let mut store = store();
    let mut form = AddContributorForm::new(today());
    form.name = "Zed".into();
    form.role = Some(Role::QaEngineer);
    form.set_contributions_input("3");

    let toast = form.submit(&mut store, today());

    assert_eq!(toast.title.as_deref(), Some("Success"));
    assert_eq!(toast.message, "Zed has been added as a contributor.");
    assert_eq!(store.len(), 7);

    let zed = store.contributors().last().unwrap();
    assert_eq!(zed.name, "Zed");
    assert_eq!(zed.role, Role::QaEngineer);
    assert_eq!(zed.contributions, 3);
    assert!(zed.is_encrypted);
    assert_eq!(zed.join_date, today());
    assert_eq!(zed.last_active, today());

    assert_eq!(form, AddContributorForm::new(today()));
}

#[test]
fn missing_role_is_a_validation_error() {
    let mut store = store();
    let mut form = AddContributorForm::new(today());
    form.name = "Zed".into();

    let toast = form.submit(&mut store, today());
    assert!(toast.is_error());
    assert_eq!(toast.title.as_deref(), Some("Validation Error"));
    assert_eq!(toast.message, "Please fill in all required fields.");
    assert_eq!(store.len(), 6);
    assert_eq!(form.name, "Zed");
}

#[test]
fn blank_name_is_a_validation_error() {
    let mut store = store();
    let mut form = AddContributorForm::new(today());
    form.name = "  ".into();
    form.role = Some(Role::DataAnalyst);

    assert!(form.submit(&mut store, today()).is_error());
    assert_eq!(store.len(), 6);
}

#[test]
fn public_rewards_and_custom_join_date() {
    let mut store = ContributorStore::empty();
    let mut form = AddContributorForm::new(today());
    form.name = "Yara".into();
    form.role = Some(Role::DevOpsEngineer);
    form.is_encrypted = false;
    form.join_date = NaiveDate::from_ymd_opt(2023, 12, 1).unwrap();

    form.submit(&mut store, today());
    let yara = &store.contributors()[0];
    assert!(!yara.is_encrypted);
    assert_eq!(yara.join_date, NaiveDate::from_ymd_opt(2023, 12, 1).unwrap());
}
