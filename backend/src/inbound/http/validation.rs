//! Path and payload normalisation shared by the HTTP handlers.

use serde_json::json;

use crate::domain::comment::CommentId;
use crate::domain::recipe::RecipeId;
use crate::domain::user::UserId;
use crate::domain::Error;

pub fn parse_recipe_id(raw: &str) -> Result<RecipeId, Error> {
    RecipeId::parse(raw).map_err(|_| {
        Error::invalid_request("recipe id must be a UUID").with_details(json!({ "value": raw }))
    })
}

pub fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    UserId::parse(raw).map_err(|_| {
        Error::invalid_request("user id must be a UUID").with_details(json!({ "value": raw }))
    })
}

pub fn parse_comment_id(raw: &str) -> Result<CommentId, Error> {
    CommentId::parse(raw).map_err(|_| {
        Error::invalid_request("comment id must be a UUID").with_details(json!({ "value": raw }))
    })
}

/// Treat blank optional strings as absent so a PUT with `""` does not
/// overwrite a stored value with emptiness.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
