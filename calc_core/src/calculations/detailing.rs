//! # Detailing Checks
//!
//! Prescriptive reinforcement rules for tied rectangular columns, evaluated
//! independently of the strength check.
//!
//! | Rule               | Requirement                              | Reference      |
//! |--------------------|------------------------------------------|----------------|
//! | Minimum ratio      | ρ ≥ 0.01                                 | ACI 10.6.1.1   |
//! | Maximum ratio      | ρ ≤ 0.08                                 | ACI 10.6.1.1   |
//! | Minimum bar count  | n ≥ 4                                    | ACI 10.7.3.1   |
//! | Clear spacing      | s ≥ max(40 mm, 1.5 d_b, 4/3 d_agg)       | ACI 25.2.3     |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::aci_factors::{aci_ref, MAX_STEEL_RATIO, MIN_BARS_RECTANGULAR_TIED, MIN_STEEL_RATIO};
use crate::calculations::adequacy::{STATUS_NG, STATUS_OK};
use crate::calculations::section::SectionModel;
use crate::config::DetailingConfig;

/// Detailing rule identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DetailingRule {
    SteelRatioMinimum,
    SteelRatioMaximum,
    MinimumBarCount,
    ClearSpacing,
}

impl DetailingRule {
    /// All rules in report order
    pub const ALL: [DetailingRule; 4] = [
        DetailingRule::SteelRatioMinimum,
        DetailingRule::SteelRatioMaximum,
        DetailingRule::MinimumBarCount,
        DetailingRule::ClearSpacing,
    ];

    /// Display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            DetailingRule::SteelRatioMinimum => "Minimum steel ratio",
            DetailingRule::SteelRatioMaximum => "Maximum steel ratio",
            DetailingRule::MinimumBarCount => "Minimum bar count",
            DetailingRule::ClearSpacing => "Clear bar spacing",
        }
    }

    /// Governing code section
    pub fn reference(&self) -> &'static str {
        match self {
            DetailingRule::SteelRatioMinimum | DetailingRule::SteelRatioMaximum => aci_ref::REINFORCEMENT_LIMITS,
            DetailingRule::MinimumBarCount => aci_ref::MIN_BARS,
            DetailingRule::ClearSpacing => aci_ref::BAR_SPACING,
        }
    }
}

impl std::fmt::Display for DetailingRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Result of one detailing rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleCheck {
    /// Whether the rule is satisfied
    pub passes: bool,
    /// Provided value (ratio, count or mm)
    pub value: f64,
    /// Code limit the value is compared against
    pub limit: f64,
}

/// Detailing results keyed by rule.
///
/// ## JSON Example
///
/// ```json
/// {
///   "rules": {
///     "SteelRatioMinimum": { "passes": true, "value": 0.0262, "limit": 0.01 },
///     "SteelRatioMaximum": { "passes": true, "value": 0.0262, "limit": 0.08 },
///     "MinimumBarCount": { "passes": true, "value": 8.0, "limit": 4.0 },
///     "ClearSpacing": { "passes": true, "value": 160.0, "limit": 40.0 }
///   },
///   "status": "OK",
///   "summary": "All detailing rules satisfied"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailingResult {
    /// Outcome per rule
    pub rules: BTreeMap<DetailingRule, RuleCheck>,
    /// "OK" or "NG"
    pub status: String,
    /// Failing rules, or a note that all passed
    pub summary: String,
}

impl DetailingResult {
    /// Check if every evaluated rule passes
    pub fn passes(&self) -> bool {
        self.rules.values().all(|check| check.passes)
    }

    /// Rules that failed, in report order
    pub fn failures(&self) -> Vec<DetailingRule> {
        self.rules
            .iter()
            .filter(|(_, check)| !check.passes)
            .map(|(rule, _)| *rule)
            .collect()
    }
}

/// Evaluate the detailing rules for `section`.
///
/// The clear spacing rule is skipped when the section neither provides an
/// explicit spacing nor has a bar gap to measure.
pub fn check_detailing(section: &SectionModel, config: &DetailingConfig) -> DetailingResult {
    let mut rules = BTreeMap::new();

    let rho = section.steel_ratio();
    rules.insert(
        DetailingRule::SteelRatioMinimum,
        RuleCheck {
            passes: rho >= MIN_STEEL_RATIO,
            value: rho,
            limit: MIN_STEEL_RATIO,
        },
    );
    rules.insert(
        DetailingRule::SteelRatioMaximum,
        RuleCheck {
            passes: rho <= MAX_STEEL_RATIO,
            value: rho,
            limit: MAX_STEEL_RATIO,
        },
    );

    let bars = section.bar_count();
    rules.insert(
        DetailingRule::MinimumBarCount,
        RuleCheck {
            passes: bars >= MIN_BARS_RECTANGULAR_TIED,
            value: bars as f64,
            limit: MIN_BARS_RECTANGULAR_TIED as f64,
        },
    );

    match section.min_clear_spacing_mm() {
        Some(spacing) => {
            let required = config.required_clear_spacing_mm(section.max_bar_diameter_mm());
            rules.insert(
                DetailingRule::ClearSpacing,
                RuleCheck {
                    passes: spacing >= required,
                    value: spacing,
                    limit: required,
                },
            );
        }
        None => log::debug!("Clear spacing check skipped: no measurable bar gap"),
    }

    let failures: Vec<&str> = rules
        .iter()
        .filter(|(_, check)| !check.passes)
        .map(|(rule, _)| rule.display_name())
        .collect();
    let (status, summary) = if failures.is_empty() {
        (STATUS_OK, "All detailing rules satisfied".to_string())
    } else {
        (STATUS_NG, format!("Failed: {}", failures.join(", ")))
    };

    DetailingResult {
        rules,
        status: status.to_string(),
        summary,
    }
}
