//! Geographic reference entities
//!
//! Country → State → LGA form the imported hierarchy; City hangs off a state
//! and is only ever created through the city append endpoint.

use serde::{Deserialize, Serialize};

use super::EntityId;
use crate::constants::UPSTREAM_ACTIVE_STATUS;

/// Two-valued country status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountryStatus {
    /// Upstream marks the country as active
    Active,
    /// Any other upstream status, including a missing one
    Inactive,
}

impl CountryStatus {
    /// Map the upstream numeric status enum onto the stored status.
    pub fn from_upstream(status: Option<i64>) -> Self {
        match status {
            Some(UPSTREAM_ACTIVE_STATUS) => CountryStatus::Active,
            _ => CountryStatus::Inactive,
        }
    }

    /// Stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            CountryStatus::Active => "active",
            CountryStatus::Inactive => "inactive",
        }
    }
}

/// A country imported from the upstream reference source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// Internal identifier
    pub id: EntityId,
    /// Display name
    pub name: String,
    /// ISO 3166-1 alpha-2 code
    pub iso2: String,
    /// International dialling prefix
    pub dial_code: String,
    /// URL of the country's flag image
    pub flag: String,
    /// ISO 4217 currency code
    pub currency_code: String,
    /// Currency symbol
    pub currency_symbol: String,
    /// Currency display name
    pub currency_name: String,
    /// Active or inactive
    pub status: CountryStatus,
}

/// A state (first-level subdivision) of a country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// Internal identifier
    pub id: EntityId,
    /// Display name
    pub name: String,
    /// Owning country
    pub country_id: EntityId,
}

/// A local government area within a state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lga {
    /// Internal identifier
    pub id: EntityId,
    /// Display name
    pub name: String,
    /// Owning state
    pub state_id: EntityId,
}

/// A user-supplied city within a state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    /// Internal identifier
    pub id: EntityId,
    /// Trimmed name, original casing preserved
    pub name: String,
    /// Owning state
    pub state_id: EntityId,
}

impl State {
    /// New state under `country_id` with a freshly generated id
    pub fn new(name: impl Into<String>, country_id: EntityId) -> Self {
        Self { id: EntityId::generate(), name: name.into(), country_id }
    }
}

impl Lga {
    /// New LGA under `state_id` with a freshly generated id
    pub fn new(name: impl Into<String>, state_id: EntityId) -> Self {
        Self { id: EntityId::generate(), name: name.into(), state_id }
    }
}

impl City {
    /// New city under `state_id` with a freshly generated id
    pub fn new(name: impl Into<String>, state_id: EntityId) -> Self {
        Self { id: EntityId::generate(), name: name.into(), state_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(CountryStatus::Active).unwrap(), "active");
        assert_eq!(serde_json::to_value(CountryStatus::Inactive).unwrap(), "inactive");
    }

    #[test]
    fn only_one_is_active() {
        assert_eq!(CountryStatus::from_upstream(Some(1)), CountryStatus::Active);
        assert_eq!(CountryStatus::from_upstream(Some(0)), CountryStatus::Inactive);
        assert_eq!(CountryStatus::from_upstream(Some(-1)), CountryStatus::Inactive);
        assert_eq!(CountryStatus::from_upstream(None), CountryStatus::Inactive);
    }

    proptest! {
        #[test]
        fn any_status_other_than_one_is_inactive(status in any::<i64>()) {
            let expected = if status == 1 { CountryStatus::Active } else { CountryStatus::Inactive };
            prop_assert_eq!(CountryStatus::from_upstream(Some(status)), expected);
        }
    }

    #[test]
    fn children_reference_their_parent() {
        let country_id = EntityId::generate();
        let state = State::new("Lagos", country_id);
        let lga = Lga::new("Ikeja", state.id);

        assert_eq!(state.country_id, country_id);
        assert_eq!(lga.state_id, state.id);

        let json = serde_json::to_value(&lga).unwrap();
        assert_eq!(json["state_id"], state.id.to_string());
        assert_eq!(json["name"], "Ikeja");
    }
}
