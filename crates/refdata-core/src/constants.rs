//! Global constants used throughout the reference data services
//!
//! Collection and database names live here so both backends and both
//! services agree on the persisted layout.

/// Length of an [`EntityId`](crate::types::EntityId) in bytes
pub const ENTITY_ID_LENGTH: usize = 12;

/// Length of the hexadecimal string form of an entity identifier
pub const ENTITY_ID_HEX_LENGTH: usize = ENTITY_ID_LENGTH * 2;

/// Number of leading identifier bytes holding the creation timestamp
pub const ENTITY_ID_TIMESTAMP_BYTES: usize = 4;

/// Database holding the geographic reference collections
pub const GEO_DATABASE: &str = "reference_data";

/// Database holding the trivia questions
pub const TRIVIA_DATABASE: &str = "wwyd_game";

/// Collection of imported countries
pub const COUNTRIES: &str = "countries";

/// Collection of imported states
pub const STATES: &str = "states";

/// Collection of imported local government areas
pub const LGAS: &str = "lgas";

/// Collection of user-appended cities
pub const CITIES: &str = "cities";

/// Collection of trivia questions
pub const QUESTIONS: &str = "questions";

/// Upstream status enum value that marks a country as active
pub const UPSTREAM_ACTIVE_STATUS: i64 = 1;

/// Page of the upstream country listing that gets imported
///
/// Only the first page is ever requested.
pub const UPSTREAM_COUNTRY_PAGE: u32 = 1;

/// Default HTTP port of the trivia service
pub const TRIVIA_DEFAULT_PORT: u16 = 8080;

/// Default HTTP port of the geographic reference API
pub const GEO_DEFAULT_PORT: u16 = 8081;

/// Connection URI selecting the in-memory document store
pub const MEMORY_STORE_URI: &str = "memory://";
