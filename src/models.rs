use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionType {
    Percent,
    Dollar,
}

impl ContributionType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContributionType::Percent => "percent",
            ContributionType::Dollar => "dollar",
        }
    }
}

impl fmt::Display for ContributionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub age: u32,
    pub salary: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionRecord {
    pub contribution_type: ContributionType,
    pub contribution_value: f64,
    pub ytd_contributions: f64,
    pub user_info: UserInfo,
}

impl ContributionRecord {
    pub fn contribution(&self) -> Contribution {
        Contribution {
            contribution_type: self.contribution_type,
            value: self.contribution_value,
        }
    }

    /// Copy of this record with the editable pair replaced.
    pub fn with_contribution(&self, contribution: Contribution) -> Self {
        Self {
            contribution_type: contribution.contribution_type,
            contribution_value: contribution.value,
            ..self.clone()
        }
    }
}

impl Default for ContributionRecord {
    fn default() -> Self {
        Self {
            contribution_type: ContributionType::Percent,
            contribution_value: 5.0,
            ytd_contributions: 0.0,
            user_info: UserInfo {
                age: 30,
                salary: 60_000.0,
            },
        }
    }
}

/// A type/value pair, either committed or pending.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contribution {
    pub contribution_type: ContributionType,
    pub value: f64,
}

impl Contribution {
    pub fn new(contribution_type: ContributionType, value: f64) -> Self {
        Self {
            contribution_type,
            value,
        }
    }

    pub fn percent(value: f64) -> Self {
        Self::new(ContributionType::Percent, value)
    }

    pub fn dollar(value: f64) -> Self {
        Self::new(ContributionType::Dollar, value)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ContributionRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SaveResponse {
    pub fn success(data: ContributionRecord) -> Self {
        Self {
            status: "success".to_string(),
            data: Some(data),
            message: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProjectionQuery {
    pub contribution_type: ContributionType,
    pub contribution_value: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectionResponse {
    pub incremental_annual: f64,
    pub future_impact: f64,
    pub formatted: String,
}
