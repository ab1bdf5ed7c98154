//! Domain ports for the hexagonal boundary.
//!
//! Driven ports ([`UserRepository`], [`RecipeRepository`],
//! [`PasswordHasher`]) are implemented by outbound adapters; driving ports
//! (the remaining traits) are implemented by the domain services and
//! injected into the HTTP layer as trait objects.

mod accounts;
mod comment_board;
mod password_hasher;
mod rating_command;
mod recipe_authoring;
mod recipe_repository;
mod recipe_search;
mod saved_recipes;
mod user_repository;

#[cfg(test)]
pub use accounts::MockAccounts;
pub use accounts::{Accounts, SignUpRequest};
#[cfg(test)]
pub use comment_board::MockCommentBoard;
pub use comment_board::{CommentBoard, CommentView};
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use rating_command::MockRatingCommand;
pub use rating_command::RatingCommand;
#[cfg(test)]
pub use recipe_authoring::MockRecipeAuthoring;
pub use recipe_authoring::RecipeAuthoring;
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{RecipeRepository, RecipeStoreError};
#[cfg(test)]
pub use recipe_search::MockRecipeSearch;
pub use recipe_search::{RecipeSearch, SearchFilters};
#[cfg(test)]
pub use saved_recipes::MockSavedRecipes;
pub use saved_recipes::SavedRecipes;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserStoreError};
