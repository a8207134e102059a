use crate::models::{Contribution, ContributionType};
use crate::projection::format_currency;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub unit: &'static str,
}

pub fn bounds_for(contribution_type: ContributionType) -> InputBounds {
    match contribution_type {
        ContributionType::Percent => InputBounds {
            min: 0.0,
            max: 50.0,
            step: 0.5,
            unit: "%",
        },
        ContributionType::Dollar => InputBounds {
            min: 0.0,
            max: 2000.0,
            step: 10.0,
            unit: "$",
        },
    }
}

/// Value a control jumps to when the user switches type.
pub fn default_value_for(contribution_type: ContributionType) -> f64 {
    match contribution_type {
        ContributionType::Percent => 5.0,
        ContributionType::Dollar => 100.0,
    }
}

/// Control text for a number: `5`, `0.5`, `100`.
pub fn format_value(value: f64) -> String {
    value.to_string()
}

/// Short display of a committed setting: `6%` or `$150 per paycheck`.
pub fn describe_contribution(contribution: Contribution) -> String {
    match contribution.contribution_type {
        ContributionType::Percent => format!("{}%", format_value(contribution.value)),
        ContributionType::Dollar => format!("{} per paycheck", format_currency(contribution.value)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveState {
    #[default]
    Idle,
    Saving,
}

impl SaveState {
    pub fn label(self) -> &'static str {
        match self {
            SaveState::Idle => "Save Changes",
            SaveState::Saving => "Saving...",
        }
    }

    pub fn enabled(self) -> bool {
        self == SaveState::Idle
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    None,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

impl Status {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind == StatusKind::None
    }
}
