//! Status enums for listings.
//!
//! Both map to `PostgreSQL` enum types created by the initial migration and
//! serialize as the upper-case labels the admin forms submit.

use serde::{Deserialize, Serialize};

/// Visibility of an UMKM on the public site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "umkm_status", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UmkmStatus {
    /// Listed on the public site.
    #[default]
    Active,
    /// Hidden from the public site.
    Inactive,
}

/// Whether a product can be ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "product_status", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    #[default]
    Available,
    Unavailable,
}

impl UmkmStatus {
    /// All variants in form display order.
    pub const ALL: [Self; 2] = [Self::Active, Self::Inactive];

    /// The label stored in the database and submitted by forms.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
        }
    }
}

impl ProductStatus {
    /// All variants in form display order.
    pub const ALL: [Self; 2] = [Self::Available, Self::Unavailable];

    /// The label stored in the database and submitted by forms.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Unavailable => "UNAVAILABLE",
        }
    }
}

impl std::fmt::Display for UmkmStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UmkmStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "INACTIVE" => Ok(Self::Inactive),
            _ => Err(format!("invalid UMKM status: {s}")),
        }
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AVAILABLE" => Ok(Self::Available),
            "UNAVAILABLE" => Ok(Self::Unavailable),
            _ => Err(format!("invalid product status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_labels() {
        for status in UmkmStatus::ALL {
            assert_eq!(status.as_str().parse::<UmkmStatus>().unwrap(), status);
        }
        for status in ProductStatus::ALL {
            assert_eq!(status.as_str().parse::<ProductStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_serde_uses_upper_case() {
        let json = serde_json::to_string(&ProductStatus::Unavailable).unwrap();
        assert_eq!(json, "\"UNAVAILABLE\"");
    }

    #[test]
    fn test_rejects_unknown() {
        assert!("active".parse::<UmkmStatus>().is_err());
    }
}
