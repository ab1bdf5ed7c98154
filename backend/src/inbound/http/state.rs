//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data`, so they depend only
//! on the driving ports and stay testable without storage or hashing.

use std::sync::Arc;

use crate::domain::ports::{
    Accounts, CommentBoard, RatingCommand, RecipeAuthoring, RecipeSearch, SavedRecipes,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub search: Arc<dyn RecipeSearch>,
    pub ratings: Arc<dyn RatingCommand>,
    pub comments: Arc<dyn CommentBoard>,
    pub saved: Arc<dyn SavedRecipes>,
    pub authoring: Arc<dyn RecipeAuthoring>,
    pub accounts: Arc<dyn Accounts>,
}
