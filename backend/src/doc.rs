//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API:
//! every handler path from the inbound layer plus the request and
//! response schemas they reference.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::comments::{AddCommentRequest, CommentResponse, LikeRequest};
use crate::inbound::http::recipes::{
    EditRecipeRequest, IngredientDto, NewRecipeRequest, RateRequest, RateResponse, RecipeResponse,
};
use crate::inbound::http::users::{EditProfileBody, LoginBody, ProfileResponse, SignUpBody};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Drink recipes API",
        description = "HTTP interface for sharing, rating, and discussing drink recipes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::recipes::search,
        crate::inbound::http::recipes::fetch,
        crate::inbound::http::recipes::rate,
        crate::inbound::http::recipes::add_recipe,
        crate::inbound::http::recipes::edit_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::recipes::created_recipes,
        crate::inbound::http::comments::add,
        crate::inbound::http::comments::list,
        crate::inbound::http::comments::delete,
        crate::inbound::http::comments::toggle_like,
        crate::inbound::http::users::sign_up,
        crate::inbound::http::users::log_in,
        crate::inbound::http::users::save_recipe,
        crate::inbound::http::users::unsave_recipe,
        crate::inbound::http::users::saved_recipes,
        crate::inbound::http::users::edit_profile,
        crate::inbound::http::users::delete_account,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        RecipeResponse,
        IngredientDto,
        RateRequest,
        RateResponse,
        NewRecipeRequest,
        EditRecipeRequest,
        CommentResponse,
        AddCommentRequest,
        LikeRequest,
        SignUpBody,
        LoginBody,
        EditProfileBody,
        ProfileResponse,
    )),
    tags(
        (name = "recipes", description = "Recipe search, rating, and authoring"),
        (name = "comments", description = "Comment boards embedded in recipes"),
        (name = "users", description = "Accounts and saved recipes"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;
