use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// Columns of the allocations table that rows can be ordered by.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    ToSchema,
    Hash,
    Eq,
    PartialEq,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum SortBy {
    Name,
    #[default]
    Tvl,
    StrategiesAmount,
    AllocatedStrategiesAmount,
}

impl SortBy {
    /// Column title shown in the table header.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Protocol",
            Self::Tvl => "Total Value Locked",
            Self::StrategiesAmount => "Strategies amount",
            Self::AllocatedStrategiesAmount => "Allocated strategies amount",
        }
    }

    /// Names read top-down alphabetically, amounts largest first.
    pub const fn default_order(self) -> SortOrder {
        match self {
            Self::Name => SortOrder::Asc,
            Self::Tvl | Self::StrategiesAmount | Self::AllocatedStrategiesAmount => SortOrder::Desc,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ToSchema,
    Hash,
    Eq,
    PartialEq,
    Display,
    AsRefStr,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortOrder {
    Asc,
    Desc,
}
