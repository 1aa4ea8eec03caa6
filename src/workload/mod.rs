//! Workload aggregation over the employee roster.
//!
//! Single pass, recomputed fresh on every request — there is no cache and
//! no incremental update. Produces global counts, per-department load
//! buckets with risk tiers, and the list of individually overloaded
//! employees.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::Employee;

/// Overload threshold: strictly more than this many active missions while
/// marked "en cours" flags an employee. Fixed product constant.
pub const OVERLOAD_THRESHOLD: usize = 3;

/// Qualitative department load bucket derived from the in-progress ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    /// Below 50% in progress.
    Faible,
    /// At least 50%.
    Modere,
    /// At least 75%.
    Eleve,
    /// At least 90%.
    Critique,
}

impl RiskTier {
    /// Bucket a load percentage into a tier. Cut points are fixed product
    /// constants: ≥90 critique, ≥75 élevé, ≥50 modéré, else faible.
    pub fn from_rate(rate: f64) -> Self {
        if rate >= 90.0 {
            RiskTier::Critique
        } else if rate >= 75.0 {
            RiskTier::Eleve
        } else if rate >= 50.0 {
            RiskTier::Modere
        } else {
            RiskTier::Faible
        }
    }

    /// Uppercase French display label.
    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Faible => "FAIBLE",
            RiskTier::Modere => "MODÉRÉ",
            RiskTier::Eleve => "ÉLEVÉ",
            RiskTier::Critique => "CRITIQUE",
        }
    }
}

/// Roster-wide counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalStats {
    /// Roster size.
    pub total_employees: usize,
    /// Employees whose status reads "actif".
    pub active_employees: usize,
    /// Employees whose missions read "en cours".
    pub missions_in_progress: usize,
    /// `active / total * 100`, rounded to one decimal; 0 for an empty roster.
    pub activity_rate: f64,
}

/// Accumulated load for one department.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepartmentLoad {
    /// Employees in the department.
    pub total: usize,
    /// Active employees.
    pub active: usize,
    /// Employees with missions in progress.
    pub in_progress: usize,
    /// Every mission seen in the department, duplicates included.
    pub missions: Vec<String>,
}

impl DepartmentLoad {
    /// `in_progress / total * 100`, rounded to one decimal.
    pub fn load_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let rate = self.in_progress as f64 / self.total as f64 * 100.0;
        round1(rate)
    }

    /// Risk tier for this department's load rate.
    pub fn risk_tier(&self) -> RiskTier {
        RiskTier::from_rate(self.load_rate())
    }

    /// Distinct missions in first-seen order.
    pub fn distinct_missions(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.missions
            .iter()
            .filter(|m| seen.insert(m.as_str()))
            .cloned()
            .collect()
    }
}

/// An employee flagged as overloaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverloadedEmployee {
    /// Full display name.
    pub name: String,
    /// Department label.
    pub department: String,
    /// Number of active missions.
    pub mission_count: usize,
    /// The missions themselves.
    pub missions: Vec<String>,
}

/// Result of one analysis pass over the roster.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkloadAnalysis {
    /// Roster-wide counters.
    pub global: GlobalStats,
    /// Per-department accumulators, keyed by department label.
    pub departments: BTreeMap<String, DepartmentLoad>,
    /// Employees above the overload threshold, in roster order.
    pub overloaded: Vec<OverloadedEmployee>,
}

/// Aggregate the roster in a single pass.
///
/// Employees without a department land in the shared "Non défini" bucket.
/// Mission load is the comma-separated mission count; an employee is
/// overloaded when that count exceeds [`OVERLOAD_THRESHOLD`] while their
/// mission status reads "en cours". An empty roster yields all-zero
/// statistics.
pub fn analyze(roster: &[Employee]) -> WorkloadAnalysis {
    let mut analysis = WorkloadAnalysis::default();

    for employee in roster {
        analysis.global.total_employees = analysis.global.total_employees.saturating_add(1);
        if employee.is_active() {
            analysis.global.active_employees = analysis.global.active_employees.saturating_add(1);
        }
        if employee.missions_in_progress() {
            analysis.global.missions_in_progress =
                analysis.global.missions_in_progress.saturating_add(1);
        }

        let bucket = analysis
            .departments
            .entry(employee.department_label().to_owned())
            .or_default();
        bucket.total = bucket.total.saturating_add(1);
        if employee.is_active() {
            bucket.active = bucket.active.saturating_add(1);
        }
        if employee.missions_in_progress() {
            bucket.in_progress = bucket.in_progress.saturating_add(1);
        }

        let missions = employee.mission_list();
        if !missions.is_empty() {
            bucket.missions.extend(missions.iter().cloned());

            if missions.len() > OVERLOAD_THRESHOLD && employee.missions_in_progress() {
                analysis.overloaded.push(OverloadedEmployee {
                    name: employee.full_name(),
                    department: employee.department_label().to_owned(),
                    mission_count: missions.len(),
                    missions,
                });
            }
        }
    }

    if analysis.global.total_employees > 0 {
        #[allow(clippy::cast_precision_loss)]
        let rate = analysis.global.active_employees as f64
            / analysis.global.total_employees as f64
            * 100.0;
        analysis.global.activity_rate = round1(rate);
    }

    analysis
}

/// Round to one decimal place.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
