//! Composition root: wires adapters to domain services.

pub mod config;

use std::sync::Arc;

use crate::domain::{
    AccountService, CommentBoardService, MutationLocks, RatingAggregator, RecipeOwnershipLedger,
    RecipeSearchEngine, SavedRecipeRegistry,
};
use crate::inbound::http::HttpState;
use crate::outbound::persistence::{InMemoryRecipeRepository, InMemoryUserRepository};
use crate::outbound::security::Argon2PasswordHasher;

/// Build the handler state over in-process stores.
///
/// All mutating services share one lock registry; saved-recipe writes and
/// ledger writes against the same user therefore serialise with each other.
pub fn build_state() -> HttpState {
    let users = Arc::new(InMemoryUserRepository::new());
    let recipes = Arc::new(InMemoryRecipeRepository::new());
    let locks = Arc::new(MutationLocks::new());
    let hasher = Arc::new(Argon2PasswordHasher::new());

    HttpState {
        search: Arc::new(RecipeSearchEngine::new(Arc::clone(&recipes))),
        ratings: Arc::new(RatingAggregator::new(
            Arc::clone(&recipes),
            Arc::clone(&locks),
        )),
        comments: Arc::new(CommentBoardService::new(
            Arc::clone(&recipes),
            Arc::clone(&locks),
        )),
        saved: Arc::new(SavedRecipeRegistry::new(
            Arc::clone(&users),
            Arc::clone(&recipes),
            Arc::clone(&locks),
        )),
        authoring: Arc::new(RecipeOwnershipLedger::new(
            Arc::clone(&users),
            Arc::clone(&recipes),
            Arc::clone(&locks),
        )),
        accounts: Arc::new(AccountService::new(Arc::clone(&users), hasher)),
    }
}
