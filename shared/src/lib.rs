use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Gestation length used when a pregnancy has no recorded breeding/due dates.
pub const DEFAULT_GESTATION_DAYS: i64 = 280;

/// A housing shed on the farm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shed {
    pub id: u64,
    pub name: String,
    /// Maximum number of animals the shed can hold
    pub capacity: u32,
    pub status: ShedStatus,
    pub created_date: NaiveDate,
}

/// Operational status of a shed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShedStatus {
    Active,
    Maintenance,
    Inactive,
}

impl fmt::Display for ShedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ShedStatus::Active => "active",
            ShedStatus::Maintenance => "maintenance",
            ShedStatus::Inactive => "inactive",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ShedStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(ShedStatus::Active),
            "maintenance" => Ok(ShedStatus::Maintenance),
            "inactive" => Ok(ShedStatus::Inactive),
            other => Err(format!("Invalid shed status: {}", other)),
        }
    }
}

/// A vaccination administered to a single animal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vaccine {
    pub id: u64,
    /// Name of the vaccine product
    pub name: String,
    /// Ear-tag of the animal that received the dose
    pub animal_tag: String,
    pub date_administered: NaiveDate,
    pub next_due_date: Option<NaiveDate>,
    pub veterinarian: String,
    pub notes: String,
    pub created_date: NaiveDate,
}

/// A breeding event between a dam and a sire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreedingRecord {
    pub id: u64,
    pub dam_tag: String,
    pub sire_tag: String,
    pub breeding_date: NaiveDate,
    pub status: BreedingStatus,
    pub notes: String,
    pub created_date: NaiveDate,
}

/// Outcome status of a breeding event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreedingStatus {
    Pending,
    Confirmed,
    Failed,
}

impl fmt::Display for BreedingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BreedingStatus::Pending => "pending",
            BreedingStatus::Confirmed => "confirmed",
            BreedingStatus::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for BreedingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(BreedingStatus::Pending),
            "confirmed" => Ok(BreedingStatus::Confirmed),
            "failed" => Ok(BreedingStatus::Failed),
            other => Err(format!("Invalid breeding status: {}", other)),
        }
    }
}

/// A named boolean checkpoint embedded within a pregnancy record.
///
/// The milestone list is fixed at creation time; individual milestones are
/// toggled thereafter but never added or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub name: String,
    pub completed: bool,
}

/// An ongoing pregnancy being tracked for one animal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pregnancy {
    pub id: u64,
    pub animal_tag: String,
    pub breeding_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub status: PregnancyStatus,
    pub milestones: Vec<Milestone>,
    pub notes: String,
    pub created_date: NaiveDate,
}

/// Health status of a tracked pregnancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PregnancyStatus {
    Healthy,
    Monitoring,
    AtRisk,
}

impl fmt::Display for PregnancyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PregnancyStatus::Healthy => "healthy",
            PregnancyStatus::Monitoring => "monitoring",
            PregnancyStatus::AtRisk => "at-risk",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for PregnancyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "healthy" => Ok(PregnancyStatus::Healthy),
            "monitoring" => Ok(PregnancyStatus::Monitoring),
            "at-risk" => Ok(PregnancyStatus::AtRisk),
            other => Err(format!("Invalid pregnancy status: {}", other)),
        }
    }
}

/// Derived display values for a pregnancy, computed against a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GestationProgress {
    pub days_pregnant: i64,
    /// Days remaining until the due date; negative means overdue
    pub days_until_due: Option<i64>,
    pub progress_percent: f64,
}

impl Pregnancy {
    /// The milestone checklist every new pregnancy starts with.
    pub fn default_milestones() -> Vec<Milestone> {
        [
            "Breeding confirmed",
            "First pregnancy check",
            "Second pregnancy check",
            "Vaccination booster",
            "Dry-off started",
            "Moved to calving area",
        ]
        .iter()
        .map(|name| Milestone {
            name: (*name).to_string(),
            completed: false,
        })
        .collect()
    }

    /// Whole days since the breeding date, floored, never negative.
    /// Zero when no breeding date is recorded.
    pub fn days_pregnant(&self, now: DateTime<Utc>) -> i64 {
        match self.breeding_date {
            Some(bred) => days_between(bred, now).max(0),
            None => 0,
        }
    }

    /// Whole days until the due date, floored; negative means overdue.
    pub fn days_until_due(&self, now: DateTime<Utc>) -> Option<i64> {
        self.due_date.map(|due| {
            let midnight = due.and_hms_opt(0, 0, 0).expect("midnight is always valid").and_utc();
            (midnight - now).num_seconds().div_euclid(86_400)
        })
    }

    /// Expected gestation length in days. Defaults to 280 unless both dates
    /// are recorded, in which case the span between them (floored at 1).
    pub fn total_gestation_days(&self) -> i64 {
        match (self.breeding_date, self.due_date) {
            (Some(bred), Some(due)) => (due - bred).num_days().max(1),
            _ => DEFAULT_GESTATION_DAYS,
        }
    }

    /// Percentage of the gestation period elapsed, capped at 100.
    pub fn progress_percent(&self, now: DateTime<Utc>) -> f64 {
        let percent = self.days_pregnant(now) as f64 / self.total_gestation_days() as f64 * 100.0;
        percent.min(100.0)
    }

    pub fn gestation_progress(&self, now: DateTime<Utc>) -> GestationProgress {
        GestationProgress {
            days_pregnant: self.days_pregnant(now),
            days_until_due: self.days_until_due(now),
            progress_percent: self.progress_percent(now),
        }
    }
}

/// Whole days from `date` (at midnight UTC) to `now`, floored toward
/// negative infinity so that partial days count the way a calendar reads.
fn days_between(date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let midnight = date.and_hms_opt(0, 0, 0).expect("midnight is always valid").and_utc();
    (now - midnight).num_seconds().div_euclid(86_400)
}

/// A dry-off period for a lactating animal before calving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DryOffRecord {
    pub id: u64,
    pub animal_tag: String,
    pub start_date: NaiveDate,
    pub expected_calving_date: Option<NaiveDate>,
    /// Which pasture rotation the animal is assigned to while dry
    pub rotation_count: u32,
    pub notes: String,
    pub created_date: NaiveDate,
}

/// A bulk milk sale to a buyer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilkSale {
    pub id: u64,
    pub sale_date: NaiveDate,
    pub buyer: String,
    pub quantity_liters: f64,
    pub price_per_liter: f64,
    pub notes: String,
    pub created_date: NaiveDate,
}

impl MilkSale {
    /// Total sale value, derived for display and never stored.
    pub fn total(&self) -> f64 {
        self.quantity_liters * self.price_per_liter
    }
}

/// Derived-view filter over a record collection.
///
/// Both dimensions combine with logical AND. An absent query (or one that is
/// all whitespace) matches everything, as does an absent category or the
/// literal `"all"` wildcard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordFilter {
    /// Case-insensitive substring matched against the record's text fields
    pub query: Option<String>,
    /// Exact match against the record's categorical field
    pub category: Option<String>,
}

impl RecordFilter {
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            category: None,
        }
    }

    pub fn with_category(category: impl Into<String>) -> Self {
        Self {
            query: None,
            category: Some(category.into()),
        }
    }
}

/// One page of a list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    pub fn with_page(self, page: u32) -> Self {
        Self { page, ..self }
    }

    /// Changing the page size always lands back on page 1 so the view never
    /// ends up past the end of the shorter page range.
    pub fn with_page_size(self, page_size: u32) -> Self {
        Self { page: 1, page_size }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, page_size: 10 }
    }
}

/// Pagination metadata returned alongside a page slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    /// The (clamped) page that was actually returned
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_count: u32,
}
