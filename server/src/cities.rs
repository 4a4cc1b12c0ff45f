//! City append with case-insensitive de-duplication
//!
//! Each name is checked against the state's stored cities and inserted only
//! when no case-insensitive match exists. Check and insert are separate store
//! calls, so two concurrent appends of the same name can both succeed.

use serde::Serialize;

use refdata_core::constants::CITIES;
use refdata_core::storage::typed;
use refdata_core::{log_debug, City, DocumentStore, EntityId, Filter, Result};

/// What an append call did with each submitted name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CityAppendOutcome {
    /// Newly stored cities, in submission order
    pub inserted: Vec<City>,
    /// Trimmed names skipped because the state already has them
    pub duplicates: Vec<String>,
    /// Number of empty or whitespace-only names skipped
    pub blank: usize,
}

/// Filter selecting every city of a state
pub fn state_filter(state_id: EntityId) -> Filter {
    Filter::eq("state_id", state_id.to_string())
}

/// Append `names` to the cities of `state_id`
pub async fn append_cities<S>(store: &S, state_id: EntityId, names: &[String]) -> Result<CityAppendOutcome>
where
    S: DocumentStore + ?Sized,
{
    let mut outcome = CityAppendOutcome::default();

    for raw in names {
        let name = raw.trim();
        if name.is_empty() {
            outcome.blank += 1;
            continue;
        }

        let existing = state_filter(state_id).and(Filter::eq_ignore_case("name", name));
        if store.exists(CITIES, &existing).await? {
            log_debug!("City '{}' already exists in state {}", name, state_id);
            outcome.duplicates.push(name.to_string());
            continue;
        }

        let city = City::new(name, state_id);
        typed::insert(store, CITIES, &city).await?;
        outcome.inserted.push(city);
    }

    Ok(outcome)
}

/// Cities stored for `state_id`
pub async fn list_cities<S>(store: &S, state_id: EntityId) -> Result<Vec<City>>
where
    S: DocumentStore + ?Sized,
{
    Ok(typed::find_all(store, CITIES, &state_filter(state_id)).await?)
}
