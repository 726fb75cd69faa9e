use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error_handler::PayDaoError;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Fixed set of roles a contributor can hold. Serialized as the display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Frontend Developer")]
    FrontendDeveloper,
    #[serde(rename = "Backend Developer")]
    BackendDeveloper,
    #[serde(rename = "Smart Contract Developer")]
    SmartContractDeveloper,
    #[serde(rename = "UI/UX Designer")]
    UiUxDesigner,
    #[serde(rename = "Product Manager")]
    ProductManager,
    #[serde(rename = "DevOps Engineer")]
    DevOpsEngineer,
    #[serde(rename = "Data Analyst")]
    DataAnalyst,
    #[serde(rename = "QA Engineer")]
    QaEngineer,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FrontendDeveloper => "Frontend Developer",
            Self::BackendDeveloper => "Backend Developer",
            Self::SmartContractDeveloper => "Smart Contract Developer",
            Self::UiUxDesigner => "UI/UX Designer",
            Self::ProductManager => "Product Manager",
            Self::DevOpsEngineer => "DevOps Engineer",
            Self::DataAnalyst => "Data Analyst",
            Self::QaEngineer => "QA Engineer",
        }
    }

    /// All variants in the order the role picker lists them.
    pub fn all() -> [Self; 8] {
        [
            Self::FrontendDeveloper,
            Self::BackendDeveloper,
            Self::SmartContractDeveloper,
            Self::UiUxDesigner,
            Self::ProductManager,
            Self::DevOpsEngineer,
            Self::DataAnalyst,
            Self::QaEngineer,
        ]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = PayDaoError;

    /// Accepts the display label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .into_iter()
            .find(|role| role.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PayDaoError::Validation(format!("unknown role: {wanted}")))
    }
}

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// Opaque contributor identifier. Assigned once by the store, never changed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContributorId(String);

impl ContributorId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContributorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContributorId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ContributorId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One DAO participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributor {
    pub id: ContributorId,
    pub name: String,
    pub role: Role,
    pub contributions: i64,
    pub is_encrypted: bool,
    pub join_date: NaiveDate,
    pub last_active: NaiveDate,
}

/// Every contributor field except the id, as supplied to
/// [`ContributorStore::add_contributor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContributor {
    pub name: String,
    pub role: Role,
    pub contributions: i64,
    pub is_encrypted: bool,
    pub join_date: NaiveDate,
    pub last_active: NaiveDate,
}

impl NewContributor {
    fn into_contributor(self, id: ContributorId) -> Contributor {
        Contributor {
            id,
            name: self.name,
            role: self.role,
            contributions: self.contributions,
            is_encrypted: self.is_encrypted,
            join_date: self.join_date,
            last_active: self.last_active,
        }
    }
}

/// Field-level overrides for an existing contributor. `None` keeps the base
/// value. The id is not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContributorPatch {
    pub name: Option<String>,
    pub role: Option<Role>,
    pub contributions: Option<i64>,
    pub is_encrypted: Option<bool>,
    pub join_date: Option<NaiveDate>,
    pub last_active: Option<NaiveDate>,
}

impl ContributorPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn contributions(mut self, contributions: i64) -> Self {
        self.contributions = Some(contributions);
        self
    }

    pub fn is_encrypted(mut self, is_encrypted: bool) -> Self {
        self.is_encrypted = Some(is_encrypted);
        self
    }

    pub fn join_date(mut self, join_date: NaiveDate) -> Self {
        self.join_date = Some(join_date);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge onto `base`; patch fields win.
    pub fn apply(self, base: &Contributor) -> Contributor {
        Contributor {
            id: base.id.clone(),
            name: self.name.unwrap_or_else(|| base.name.clone()),
            role: self.role.unwrap_or(base.role),
            contributions: self.contributions.unwrap_or(base.contributions),
            is_encrypted: self.is_encrypted.unwrap_or(base.is_encrypted),
            join_date: self.join_date.unwrap_or(base.join_date),
            last_active: self.last_active.unwrap_or(base.last_active),
        }
    }
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Source of "today" for `last_active` refreshes.
pub trait Clock: Send + Sync + fmt::Debug {
    fn today(&self) -> NaiveDate;
}

/// Calendar date in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

fn seed_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn seed(
    id: &str,
    name: &str,
    role: Role,
    contributions: i64,
    joined: (i32, u32, u32),
    active: (i32, u32, u32),
) -> Contributor {
    Contributor {
        id: ContributorId::from(id),
        name: name.to_string(),
        role,
        contributions,
        is_encrypted: true,
        join_date: seed_date(joined.0, joined.1, joined.2),
        last_active: seed_date(active.0, active.1, active.2),
    }
}

/// The six sample contributors every dashboard starts with.
pub fn seed_contributors() -> Vec<Contributor> {
    vec![
        seed("1", "Alice Chen", Role::FrontendDeveloper, 47, (2024, 1, 15), (2024, 3, 10)),
        seed("2", "Bob Martinez", Role::SmartContractDeveloper, 32, (2024, 1, 20), (2024, 3, 9)),
        seed("3", "Carol Kim", Role::UiUxDesigner, 28, (2024, 2, 1), (2024, 3, 8)),
        seed("4", "David Wilson", Role::DevOpsEngineer, 41, (2024, 1, 25), (2024, 3, 10)),
        seed("5", "Elena Rodriguez", Role::ProductManager, 35, (2024, 2, 10), (2024, 3, 7)),
        seed("6", "Frank Zhang", Role::BackendDeveloper, 39, (2024, 2, 5), (2024, 3, 9)),
    ]
}

// ---------------------------------------------------------------------------
// ContributorStore
// ---------------------------------------------------------------------------

/// In-memory contributor collection.
///
/// The collection lives behind an `Arc<Vec<_>>` that is swapped for a fresh
/// one on every effective mutation, so a reader holding an older
/// [`snapshot`](Self::snapshot) can detect change with `Arc::ptr_eq`.
/// Operations never fail: unknown ids are silent no-ops.
#[derive(Debug)]
pub struct ContributorStore {
    contributors: Arc<Vec<Contributor>>,
    next_id: u64,
    revision: u64,
    clock: Arc<dyn Clock>,
}

impl ContributorStore {
    /// Store holding the sample contributors, dated by the system clock.
    pub fn seeded() -> Self {
        Self::with_clock(seed_contributors(), Arc::new(SystemClock))
    }

    pub fn empty() -> Self {
        Self::with_clock(Vec::new(), Arc::new(SystemClock))
    }

    pub fn with_clock(initial: Vec<Contributor>, clock: Arc<dyn Clock>) -> Self {
        // Generated ids continue after the largest numeric id already present.
        let next_id = initial
            .iter()
            .filter_map(|c| c.id.as_str().parse::<u64>().ok())
            .max()
            .map_or(1, |max| max.saturating_add(1));

        Self {
            contributors: Arc::new(initial),
            next_id,
            revision: 0,
            clock,
        }
    }

    // -----------------------------------------------------------------------
    // Readers
    // -----------------------------------------------------------------------

    /// Shared handle to the current collection.
    pub fn snapshot(&self) -> Arc<Vec<Contributor>> {
        Arc::clone(&self.contributors)
    }

    pub fn contributors(&self) -> &[Contributor] {
        &self.contributors
    }

    pub fn get(&self, id: &str) -> Option<&Contributor> {
        self.contributors.iter().find(|c| c.id.as_str() == id)
    }

    pub fn len(&self) -> usize {
        self.contributors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contributors.is_empty()
    }

    /// Bumped once per effective mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Appends a new contributor under a freshly generated id.
    pub fn add_contributor(&mut self, data: NewContributor) -> ContributorId {
        let id = self.generate_id();
        let mut next = Vec::with_capacity(self.contributors.len() + 1);
        next.extend(self.contributors.iter().cloned());
        next.push(data.into_contributor(id.clone()));
        self.install(next);
        debug!(contributor_id = %id, total = self.len(), "contributor added");
        id
    }

    /// Merges `patch` into the matching contributor and stamps `last_active`
    /// with today's date, whatever the patch said.
    pub fn update_contributor(&mut self, id: &str, patch: ContributorPatch) {
        let Some(pos) = self.position(id) else {
            debug!(contributor_id = %id, "update for unknown contributor ignored");
            return;
        };

        let today = self.clock.today();
        let mut next = self.contributors.as_ref().clone();
        let mut updated = patch.apply(&next[pos]);
        updated.last_active = today;
        next[pos] = updated;
        self.install(next);
        debug!(contributor_id = %id, "contributor updated");
    }

    pub fn remove_contributor(&mut self, id: &str) {
        let Some(pos) = self.position(id) else {
            debug!(contributor_id = %id, "remove for unknown contributor ignored");
            return;
        };

        let mut next = self.contributors.as_ref().clone();
        next.remove(pos);
        self.install(next);
        debug!(contributor_id = %id, total = self.len(), "contributor removed");
    }

    /// Adds `amount` (possibly negative) to the contributor's count. The
    /// result is not clamped. An unknown id reads as zero and the resulting
    /// update matches nothing.
    pub fn increment_contributions(&mut self, id: &str, amount: i64) {
        let current = self.get(id).map_or(0, |c| c.contributions);
        let total = current.saturating_add(amount);
        self.update_contributor(id, ContributorPatch::default().contributions(total));
    }

    pub fn increment_contributions_by_one(&mut self, id: &str) {
        self.increment_contributions(id, 1);
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn position(&self, id: &str) -> Option<usize> {
        self.contributors.iter().position(|c| c.id.as_str() == id)
    }

    fn generate_id(&mut self) -> ContributorId {
        loop {
            let candidate = self.next_id.to_string();
            self.next_id = self.next_id.saturating_add(1);
            if self.position(&candidate).is_none() {
                return ContributorId(candidate);
            }
        }
    }

    fn install(&mut self, next: Vec<Contributor>) {
        self.contributors = Arc::new(next);
        self.revision += 1;
    }
}

impl Default for ContributorStore {
    fn default() -> Self {
        Self::seeded()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        day(2024, 4, 2)
    }

    fn seeded_store() -> ContributorStore {
        ContributorStore::with_clock(seed_contributors(), Arc::new(FixedClock(today())))
    }

    fn zed() -> NewContributor {
        NewContributor {
            name: "Zed".into(),
            role: Role::QaEngineer,
            contributions: 0,
            is_encrypted: true,
            join_date: day(2024, 4, 1),
            last_active: day(2024, 4, 1),
        }
    }

    #[test]
    fn seed_has_six_contributors() {
        let store = seeded_store();
        assert_eq!(store.len(), 6);
        assert_eq!(store.get("1").unwrap().name, "Alice Chen");
        assert_eq!(store.get("6").unwrap().role, Role::BackendDeveloper);
        assert!(store.contributors().iter().all(|c| c.is_encrypted));
    }

    #[test]
    fn add_appends_to_end() {
        let mut store = seeded_store();
        let id = store.add_contributor(zed());

        assert_eq!(store.len(), 7);
        let last = store.contributors().last().unwrap();
        assert_eq!(last.name, "Zed");
        assert_eq!(last.id, id);
        assert_eq!(last.role, Role::QaEngineer);
        assert_eq!(last.last_active, day(2024, 4, 1));
    }

    #[test]
    fn add_generates_unique_ids() {
        let mut store = seeded_store();
        for _ in 0..50 {
            store.add_contributor(zed());
        }

        assert_eq!(store.len(), 56);
        let ids: HashSet<_> = store.contributors().iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids.len(), 56);
    }

    #[test]
    fn generated_ids_continue_after_seed() {
        let mut store = seeded_store();
        assert_eq!(store.add_contributor(zed()).as_str(), "7");
        assert_eq!(store.add_contributor(zed()).as_str(), "8");
    }

    #[test]
    fn generated_ids_skip_existing() {
        let mut initial = seed_contributors();
        initial[0].id = ContributorId::from("alpha");
        let mut store = ContributorStore::with_clock(initial, Arc::new(FixedClock(today())));
        // Largest numeric id is now 6.
        assert_eq!(store.add_contributor(zed()).as_str(), "7");
    }

    #[test]
    fn duplicate_names_allowed() {
        let mut store = ContributorStore::with_clock(Vec::new(), Arc::new(FixedClock(today())));
        let a = store.add_contributor(zed());
        let b = store.add_contributor(zed());
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn update_sets_contributions_and_refreshes_last_active() {
        let mut store = seeded_store();
        let before = store.get("2").unwrap().clone();

        store.update_contributor("2", ContributorPatch::default().contributions(100));

        let after = store.get("2").unwrap();
        assert_eq!(after.contributions, 100);
        assert_eq!(after.last_active, today());
        assert_eq!(after.name, before.name);
        assert_eq!(after.role, before.role);
        assert_eq!(after.is_encrypted, before.is_encrypted);
        assert_eq!(after.join_date, before.join_date);
        assert_eq!(after.id, before.id);
    }

    #[test]
    fn update_overrides_patched_last_active() {
        let mut store = seeded_store();
        let patch = ContributorPatch {
            last_active: Some(day(1999, 1, 1)),
            ..ContributorPatch::default()
        };
        store.update_contributor("3", patch);
        assert_eq!(store.get("3").unwrap().last_active, today());
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let mut store = seeded_store();
        let before = store.snapshot();

        store.update_contributor("nope", ContributorPatch::default().name("Ghost"));

        assert!(Arc::ptr_eq(&before, &store.snapshot()));
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut store = seeded_store();
        store.remove_contributor("4");
        assert_eq!(store.len(), 5);
        assert!(store.get("4").is_none());

        let snapshot = store.snapshot();
        store.remove_contributor("4");
        assert_eq!(store.len(), 5);
        assert!(Arc::ptr_eq(&snapshot, &store.snapshot()));
    }

    #[test]
    fn remove_preserves_order() {
        let mut store = seeded_store();
        store.remove_contributor("3");
        let ids: Vec<_> = store.contributors().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "4", "5", "6"]);
    }

    #[test]
    fn increment_adds_amount() {
        let mut store = seeded_store();
        store.update_contributor("5", ContributorPatch::default().contributions(10));
        store.increment_contributions("5", 5);
        assert_eq!(store.get("5").unwrap().contributions, 15);
    }

    #[test]
    fn increment_defaults_to_one() {
        let mut store = seeded_store();
        store.increment_contributions_by_one("1");
        assert_eq!(store.get("1").unwrap().contributions, 48);
        assert_eq!(store.get("1").unwrap().last_active, today());
    }

    #[test]
    fn increment_does_not_clamp_at_zero() {
        let mut store = seeded_store();
        store.increment_contributions("1", -100);
        assert_eq!(store.get("1").unwrap().contributions, -53);
    }

    #[test]
    fn increment_to_exactly_zero() {
        let mut store = seeded_store();
        store.update_contributor("1", ContributorPatch::default().contributions(1));
        store.increment_contributions("1", -1);
        assert_eq!(store.get("1").unwrap().contributions, 0);
    }

    #[test]
    fn increment_unknown_id_alters_nothing() {
        let mut store = seeded_store();
        let before: Vec<Contributor> = store.contributors().to_vec();

        store.increment_contributions("999", 5);

        assert_eq!(store.contributors(), before.as_slice());
        assert!(store.get("999").is_none());
    }

    #[test]
    fn mutations_replace_collection_reference() {
        let mut store = seeded_store();
        let s0 = store.snapshot();

        store.add_contributor(zed());
        let s1 = store.snapshot();
        assert!(!Arc::ptr_eq(&s0, &s1));
        assert_eq!(s0.len(), 6);

        store.increment_contributions("1", 1);
        let s2 = store.snapshot();
        assert!(!Arc::ptr_eq(&s1, &s2));
        assert_eq!(s1[0].contributions, 47);

        store.remove_contributor("1");
        assert!(!Arc::ptr_eq(&s2, &store.snapshot()));
        assert_eq!(store.revision(), 3);
    }

    #[test]
    fn patch_apply_prefers_patch_fields() {
        let base = seed_contributors().remove(0);
        let patched = ContributorPatch::default()
            .name("Alice C.")
            .role(Role::DataAnalyst)
            .is_encrypted(false)
            .apply(&base);

        assert_eq!(patched.name, "Alice C.");
        assert_eq!(patched.role, Role::DataAnalyst);
        assert!(!patched.is_encrypted);
        assert_eq!(patched.contributions, base.contributions);
        assert_eq!(patched.id, base.id);
    }

    #[test]
    fn empty_patch_is_empty() {
        assert!(ContributorPatch::default().is_empty());
        assert!(!ContributorPatch::default().contributions(0).is_empty());
    }

    #[test]
    fn role_parses_labels_case_insensitively() {
        assert_eq!("qa engineer".parse::<Role>().unwrap(), Role::QaEngineer);
        assert_eq!("UI/UX Designer".parse::<Role>().unwrap(), Role::UiUxDesigner);
        assert!("Wizard".parse::<Role>().is_err());
    }

    #[test]
    fn contributor_serializes_camel_case() {
        let c = seed_contributors().remove(0);
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["role"], "Frontend Developer");
        assert_eq!(json["isEncrypted"], true);
        assert_eq!(json["joinDate"], "2024-01-15");
        assert_eq!(json["lastActive"], "2024-03-10");
    }
}
