//! Built-in question set and startup seeding

use refdata_core::constants::QUESTIONS;
use refdata_core::core::ConfiguredAppState;
use refdata_core::storage::typed;
use refdata_core::{log_info, log_warn, DocumentStore, Filter, Question, Result};

/// Game tag of the would-you-rather style prompts
pub const GAME_WWYD: &str = "wwyd";

/// Game tag of the hot-seat prompts
pub const GAME_HOTSEAT: &str = "hotseat";

/// Result of the startup seed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The collection was empty and this many questions were inserted
    Seeded(usize),
    /// The collection already held this many rows and was left alone
    AlreadyPresent(u64),
}

/// The fixed question set inserted into an empty collection
pub fn builtin_questions() -> Vec<Question> {
    vec![
        Question::new(
            "wwyd-1",
            GAME_WWYD,
            "You find ₦200,000 in a taxi you just left. Do you: A) Try to find the owner, B) Hand it into the nearest police station, C) Keep it?",
        )
        .with_hint("Discuss honesty vs risk"),
        Question::new(
            "wwyd-2",
            GAME_WWYD,
            "Your friend asks you to cover for them at work for a day while they attend an important interview. Their boss is strict. Do you help?",
        )
        .with_hint("Boundaries and loyalty"),
        Question::new(
            "wwyd-3",
            GAME_WWYD,
            "You have the chance to move abroad for 2 years with a big pay bump but your partner doesn't want to go. What do you do?",
        )
        .with_hint("Career vs relationships"),
        Question::new(
            "hot-1",
            GAME_HOTSEAT,
            "What’s the biggest mistake you made that taught you the most?",
        ),
        Question::new(
            "hot-2",
            GAME_HOTSEAT,
            "What’s a secret hobby you’ve never told anyone about?",
        ),
        Question::new(
            "hot-3",
            GAME_HOTSEAT,
            "If you could go back and give your 18-year-old self one piece of advice, what would it be?",
        ),
    ]
}

/// Insert the built-in set when the questions collection is empty
pub async fn seed_questions<S>(store: &S) -> Result<SeedOutcome>
where
    S: DocumentStore + ?Sized,
{
    let existing = store.count(QUESTIONS, &Filter::all()).await?;
    if existing > 0 {
        log_info!("Questions already present: {}", existing);
        return Ok(SeedOutcome::AlreadyPresent(existing));
    }

    log_info!("Seeding questions...");
    let questions = builtin_questions();
    typed::insert_all(store, QUESTIONS, &questions).await?;
    Ok(SeedOutcome::Seeded(questions.len()))
}

/// Seed whichever store backend `app_state` carries
pub async fn seed(app_state: &ConfiguredAppState) -> Result<SeedOutcome> {
    match app_state {
        ConfiguredAppState::Memory(state) => seed_questions(state.store()).await,
        #[cfg(feature = "mongo")]
        ConfiguredAppState::Mongo(state) => seed_questions(state.store()).await,
    }
}

/// Every stored question
///
/// Rows that do not decode as a question are logged and skipped.
pub async fn list_questions<S>(store: &S) -> Result<Vec<Question>>
where
    S: DocumentStore + ?Sized,
{
    let documents = store.find(QUESTIONS, &Filter::all()).await?;
    let questions = documents
        .into_iter()
        .filter_map(|doc| match serde_json::from_value::<Question>(doc) {
            Ok(question) => Some(question),
            Err(e) => {
                log_warn!("Skipping undecodable question: {}", e);
                None
            }
        })
        .collect();
    Ok(questions)
}
