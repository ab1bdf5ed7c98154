//! Domain layer: entities, ports, and the services behind the driving
//! ports. Nothing in this module knows about HTTP or the storage backend.

pub mod account_service;
pub mod comment;
pub mod comment_board_service;
pub mod error;
pub mod locks;
pub mod ownership_ledger;
pub mod ports;
pub mod rating_aggregator;
pub mod recipe;
pub mod saved_recipe_registry;
pub mod search_engine;
pub mod user;

pub use account_service::AccountService;
pub use comment_board_service::CommentBoardService;
pub use error::{Error, ErrorCode};
pub use locks::MutationLocks;
pub use ownership_ledger::RecipeOwnershipLedger;
pub use rating_aggregator::RatingAggregator;
pub use saved_recipe_registry::SavedRecipeRegistry;
pub use search_engine::RecipeSearchEngine;
