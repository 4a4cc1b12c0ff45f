//! Country → State → LGA import
//!
//! The run clears the geographic collections and rebuilds them level by
//! level from the upstream source. Any error aborts the run; rows inserted
//! before the failure stay in place.

use serde::Serialize;
use std::fmt;

use refdata_core::constants::{CITIES, COUNTRIES, LGAS, STATES};
use refdata_core::storage::typed;
use refdata_core::{log_debug, log_info, Country, CountryStatus, DocumentStore, EntityId, Lga, Result, State};

use super::source::{ReferenceSource, UpstreamCountry, UpstreamId};

/// Collections emptied at the start of every run
pub const CLEARED_COLLECTIONS: [&str; 4] = [
    COUNTRIES,
    STATES,
    LGAS,
    CITIES,
];

/// Row counts produced by one import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Rows removed by the clear step, across all cleared collections
    pub cleared: u64,
    /// Countries inserted
    pub countries: usize,
    /// States inserted
    pub states: usize,
    /// LGAs inserted
    pub lgas: usize,
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} countries, {} states, {} lgas imported ({} rows cleared)",
            self.countries, self.states, self.lgas, self.cleared
        )
    }
}

fn to_country(upstream: UpstreamCountry) -> Country {
    Country {
        id: EntityId::generate(),
        name: upstream.name,
        iso2: upstream.iso2.unwrap_or_default(),
        dial_code: upstream.dial_code.unwrap_or_default(),
        flag: upstream.flag.unwrap_or_default(),
        currency_code: upstream.currency_code.unwrap_or_default(),
        currency_symbol: upstream.currency_symbol.unwrap_or_default(),
        currency_name: upstream.currency_name.unwrap_or_default(),
        status: CountryStatus::from_upstream(upstream.status),
    }
}

/// Rebuild the geographic collections from `source`
pub async fn run_import<S, R>(store: &S, source: &R) -> Result<ImportReport>
where
    S: DocumentStore + ?Sized,
    R: ReferenceSource + ?Sized,
{
    let mut report = ImportReport::default();

    for collection in CLEARED_COLLECTIONS {
        let removed = store.delete_all(collection).await?;
        log_debug!("Cleared {} rows from {}", removed, collection);
        report.cleared += removed;
    }

    // Countries. Upstream ids are kept only to drive the next level.
    let upstream_countries = source.active_countries().await?;
    let mut country_links: Vec<(UpstreamId, EntityId)> = Vec::with_capacity(upstream_countries.len());
    let mut countries = Vec::with_capacity(upstream_countries.len());
    for upstream in upstream_countries {
        let upstream_id = upstream.id.clone();
        let country = to_country(upstream);
        country_links.push((upstream_id, country.id));
        countries.push(country);
    }
    typed::insert_all(store, COUNTRIES, &countries).await?;
    report.countries = countries.len();
    log_info!("Inserted {} countries", report.countries);

    // States
    let mut state_links: Vec<(UpstreamId, EntityId)> = Vec::new();
    for (upstream_country, country_id) in &country_links {
        let mut states: Vec<State> = Vec::new();
        for upstream in source.states(upstream_country).await? {
            let state = State::new(upstream.name, *country_id);
            state_links.push((upstream.id, state.id));
            states.push(state);
        }

        typed::insert_all(store, STATES, &states).await?;
        report.states += states.len();
    }
    log_info!("Inserted {} states", report.states);

    // LGAs
    for (upstream_state, state_id) in &state_links {
        let lgas: Vec<Lga> = source
            .lgas(upstream_state)
            .await?
            .into_iter()
            .map(|upstream| Lga::new(upstream.name, *state_id))
            .collect();

        typed::insert_all(store, LGAS, &lgas).await?;
        report.lgas += lgas.len();
    }
    log_info!("Inserted {} lgas", report.lgas);

    log_info!("Import complete: {}", report);
    Ok(report)
}
