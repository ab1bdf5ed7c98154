//! User API handlers: accounts and saved-recipe bookmarks.
//!
//! ```text
//! POST   /signup                             {"name":"alice","email":"a@x.com","password":"..."}
//! POST   /login                              {"email":"a@x.com","password":"..."}
//! POST   /user/{uid}/save-recipe/{rid}
//! DELETE /user/{uid}/save-recipe/{rid}
//! GET    /user/{uid}/saved-recipes
//! PUT    /user/{uid}/edit
//! DELETE /user/{uid}/delete
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Error;
use crate::domain::ports::SignUpRequest;
use crate::domain::user::{ProfilePatch, UserProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::recipes::RecipeResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{non_blank, parse_recipe_id, parse_user_id};

/// Public profile returned by account endpoints. Never carries the digest.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            name: profile.name,
            email: profile.email.to_string(),
            profile_image_ref: profile.profile_image_ref,
            created_at: profile.created_at,
        }
    }
}

/// Body for `POST /signup`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignUpBody {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignUpBody,
    responses(
        (status = 201, description = "Registered profile", body = ProfileResponse),
        (status = 400, description = "Invalid input", body = Error),
        (status = 409, description = "Email already registered", body = Error)
    ),
    tags = ["users"],
    operation_id = "signUp"
)]
#[post("/signup")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    payload: web::Json<SignUpBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let profile = state
        .accounts
        .sign_up(SignUpRequest {
            name: body.name,
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(HttpResponse::Created().json(ProfileResponse::from(profile)))
}

/// Body for `POST /login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

/// Verify credentials and return the profile.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 401, description = "Invalid credentials", body = Error)
    ),
    tags = ["users"],
    operation_id = "logIn"
)]
#[post("/login")]
pub async fn log_in(
    state: web::Data<HttpState>,
    payload: web::Json<LoginBody>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let body = payload.into_inner();
    let profile = state.accounts.log_in(body.email, body.password).await?;
    Ok(web::Json(ProfileResponse::from(profile)))
}

/// Bookmark a recipe for the user.
#[utoipa::path(
    post,
    path = "/user/{uid}/save-recipe/{rid}",
    params(
        ("uid" = String, Path, description = "User id"),
        ("rid" = String, Path, description = "Recipe id")
    ),
    responses(
        (status = 200, description = "Saved"),
        (status = 404, description = "Unknown user or recipe", body = Error),
        (status = 409, description = "Already saved", body = Error)
    ),
    tags = ["users"],
    operation_id = "saveRecipe"
)]
#[post("/user/{uid}/save-recipe/{rid}")]
pub async fn save_recipe(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (uid, rid) = path.into_inner();
    let user_id = parse_user_id(&uid)?;
    let recipe_id = parse_recipe_id(&rid)?;
    state.saved.save(user_id, recipe_id).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Remove a bookmark; succeeds even when it was never saved.
#[utoipa::path(
    delete,
    path = "/user/{uid}/save-recipe/{rid}",
    params(
        ("uid" = String, Path, description = "User id"),
        ("rid" = String, Path, description = "Recipe id")
    ),
    responses(
        (status = 200, description = "Removed or already absent"),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["users"],
    operation_id = "unsaveRecipe"
)]
#[delete("/user/{uid}/save-recipe/{rid}")]
pub async fn unsave_recipe(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (uid, rid) = path.into_inner();
    let user_id = parse_user_id(&uid)?;
    let recipe_id = parse_recipe_id(&rid)?;
    state.saved.unsave(user_id, recipe_id).await?;
    Ok(HttpResponse::Ok().finish())
}

/// List the user's saved recipes.
#[utoipa::path(
    get,
    path = "/user/{uid}/saved-recipes",
    params(("uid" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Saved recipes", body = [RecipeResponse]),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["users"],
    operation_id = "listSavedRecipes"
)]
#[get("/user/{uid}/saved-recipes")]
pub async fn saved_recipes(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<RecipeResponse>>> {
    let user_id = parse_user_id(&path)?;
    let recipes = state.saved.list(user_id).await?;
    Ok(web::Json(
        recipes.iter().map(RecipeResponse::from).collect(),
    ))
}

/// Body for `PUT /user/{uid}/edit`. Absent and blank fields leave the
/// stored value unchanged.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditProfileBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub profile_image_ref: Option<String>,
}

/// Apply a partial profile update.
#[utoipa::path(
    put,
    path = "/user/{uid}/edit",
    params(("uid" = String, Path, description = "User id")),
    request_body = EditProfileBody,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["users"],
    operation_id = "editProfile"
)]
#[put("/user/{uid}/edit")]
pub async fn edit_profile(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<EditProfileBody>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let user_id = parse_user_id(&path)?;
    let body = payload.into_inner();
    let profile = state
        .accounts
        .edit_profile(
            user_id,
            ProfilePatch {
                name: non_blank(body.name),
                profile_image_ref: non_blank(body.profile_image_ref),
            },
        )
        .await?;
    Ok(web::Json(ProfileResponse::from(profile)))
}

/// Delete the account. Created recipes are left in place.
#[utoipa::path(
    delete,
    path = "/user/{uid}/delete",
    params(("uid" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteAccount"
)]
#[delete("/user/{uid}/delete")]
pub async fn delete_account(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = parse_user_id(&path)?;
    state.accounts.delete_account(user_id).await?;
    Ok(HttpResponse::Ok().finish())
}
