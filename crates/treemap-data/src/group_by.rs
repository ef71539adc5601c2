use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Dimension the backend aggregates accounts by.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum GroupBy {
    #[default]
    #[serde(rename = "account_country")]
    Country,
    #[serde(rename = "account_ccy")]
    Currency,
}

impl GroupBy {
    pub const ALL: [GroupBy; 2] = [GroupBy::Country, GroupBy::Currency];

    /// Value sent to the backend as the `filter` field.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupBy::Country => "account_country",
            GroupBy::Currency => "account_ccy",
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            GroupBy::Country => "Country",
            GroupBy::Currency => "Currency",
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupBy {
    type Err = Error;

    /// Accepts wire values (`account_country`) and labels (`Country`, `COUNTRY`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        GroupBy::ALL
            .into_iter()
            .find(|group_by| {
                group_by.as_str() == value || group_by.label().eq_ignore_ascii_case(value)
            })
            .ok_or_else(|| Error::InvalidGroupBy(value.to_string()))
    }
}
