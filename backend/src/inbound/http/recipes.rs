//! Recipe API handlers: search, fetch, rating, and authoring.
//!
//! ```text
//! GET    /drink-recipes?name=&ingredients=
//! GET    /drink-recipes/{id}
//! PUT    /drink-recipes/{id}/rate           {"rating":4}
//! POST   /user/{uid}/add-recipe
//! PUT    /user/{uid}/edit-recipe/{rid}
//! DELETE /user/{uid}/delete-recipe/{rid}
//! GET    /user/{uid}/created-recipe
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::Error;
use crate::domain::ports::SearchFilters;
use crate::domain::recipe::{Ingredient, Rating, Recipe, RecipeDraft, RecipePatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{non_blank, parse_recipe_id, parse_user_id};

/// One ingredient entry in recipe payloads.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngredientDto {
    pub name: String,
    #[serde(default)]
    pub measure: Option<String>,
}

impl From<IngredientDto> for Ingredient {
    fn from(dto: IngredientDto) -> Self {
        Self {
            name: dto.name,
            measure: dto.measure,
        }
    }
}

impl From<&Ingredient> for IngredientDto {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            name: ingredient.name.clone(),
            measure: ingredient.measure.clone(),
        }
    }
}

/// Recipe representation returned by every recipe endpoint.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    pub id: String,
    pub name: String,
    pub category: String,
    pub alcoholic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glass: Option<String>,
    pub instructions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    pub ingredients: Vec<IngredientDto>,
    pub avg_rate: f64,
    pub rating_count: usize,
    pub created_at: DateTime<Utc>,
}

impl From<&Recipe> for RecipeResponse {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id().to_string(),
            name: recipe.name().to_owned(),
            category: recipe.category().to_owned(),
            alcoholic: recipe.alcoholic().to_owned(),
            glass: recipe.glass().map(str::to_owned),
            instructions: recipe.instructions().to_owned(),
            image_ref: recipe.image_ref().map(str::to_owned),
            ingredients: recipe.ingredients().iter().map(IngredientDto::from).collect(),
            avg_rate: recipe.avg_rate(),
            rating_count: recipe.ratings().len(),
            created_at: recipe.created_at(),
        }
    }
}

fn to_responses(recipes: &[Recipe]) -> Vec<RecipeResponse> {
    recipes.iter().map(RecipeResponse::from).collect()
}

/// Search filters for `GET /drink-recipes`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Case-insensitive substring match on the recipe name.
    #[serde(default)]
    pub name: Option<String>,
    /// Comma-separated ingredient tokens; all must match.
    #[serde(default)]
    pub ingredients: Option<String>,
}

/// Search recipes by name and ingredients.
///
/// An empty result is reported as 404 rather than an empty array; clients
/// of the original API rely on that mapping.
#[utoipa::path(
    get,
    path = "/drink-recipes",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching recipes", body = [RecipeResponse]),
        (status = 404, description = "Nothing matched", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "searchRecipes"
)]
#[get("/drink-recipes")]
pub async fn search(
    state: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<Vec<RecipeResponse>>> {
    let query = query.into_inner();
    let hits = state
        .search
        .search(SearchFilters {
            name: query.name,
            ingredients: query.ingredients,
        })
        .await?;
    if hits.is_empty() {
        return Err(Error::not_found("no recipes matched the search"));
    }
    Ok(web::Json(to_responses(&hits)))
}

/// Fetch a single recipe by id.
#[utoipa::path(
    get,
    path = "/drink-recipes/{id}",
    params(("id" = String, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Recipe", body = RecipeResponse),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "fetchRecipe"
)]
#[get("/drink-recipes/{id}")]
pub async fn fetch(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<RecipeResponse>> {
    let recipe_id = parse_recipe_id(&path)?;
    let recipe = state.search.fetch(recipe_id).await?;
    Ok(web::Json(RecipeResponse::from(&recipe)))
}

/// Rating submission body.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RateRequest {
    /// Whole-star rating between 1 and 5.
    pub rating: i64,
}

/// Rating submission response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RateResponse {
    pub avg_rate: f64,
}

/// Submit a rating and return the recipe's new average.
#[utoipa::path(
    put,
    path = "/drink-recipes/{id}/rate",
    params(("id" = String, Path, description = "Recipe id")),
    request_body = RateRequest,
    responses(
        (status = 200, description = "New average", body = RateResponse),
        (status = 400, description = "Rating out of range", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "rateRecipe"
)]
#[put("/drink-recipes/{id}/rate")]
pub async fn rate(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<RateRequest>,
) -> ApiResult<web::Json<RateResponse>> {
    let recipe_id = parse_recipe_id(&path)?;
    let rating = Rating::try_new(payload.rating).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({ "field": "rating" }))
    })?;
    let avg_rate = state.ratings.submit(recipe_id, rating).await?;
    Ok(web::Json(RateResponse { avg_rate }))
}

/// Body for `POST /user/{uid}/add-recipe`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipeRequest {
    pub name: String,
    pub category: String,
    pub alcoholic: String,
    #[serde(default)]
    pub glass: Option<String>,
    pub instructions: String,
    #[serde(default)]
    pub image_ref: Option<String>,
    pub ingredients: Vec<IngredientDto>,
}

impl From<NewRecipeRequest> for RecipeDraft {
    fn from(body: NewRecipeRequest) -> Self {
        Self {
            name: body.name,
            category: body.category,
            alcoholic: body.alcoholic,
            glass: non_blank(body.glass),
            instructions: body.instructions,
            image_ref: non_blank(body.image_ref),
            ingredients: body.ingredients.into_iter().map(Ingredient::from).collect(),
        }
    }
}

/// Create a recipe owned by the user.
#[utoipa::path(
    post,
    path = "/user/{uid}/add-recipe",
    params(("uid" = String, Path, description = "User id")),
    request_body = NewRecipeRequest,
    responses(
        (status = 201, description = "Created recipe", body = RecipeResponse),
        (status = 400, description = "Invalid draft", body = Error),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "addRecipe"
)]
#[post("/user/{uid}/add-recipe")]
pub async fn add_recipe(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<NewRecipeRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = parse_user_id(&path)?;
    let recipe = state
        .authoring
        .create(user_id, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(RecipeResponse::from(&recipe)))
}

/// Body for `PUT /user/{uid}/edit-recipe/{rid}`. Absent and blank fields
/// leave the stored value unchanged.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditRecipeRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub alcoholic: Option<String>,
    #[serde(default)]
    pub glass: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub image_ref: Option<String>,
    #[serde(default)]
    pub ingredients: Option<Vec<IngredientDto>>,
}

impl From<EditRecipeRequest> for RecipePatch {
    fn from(body: EditRecipeRequest) -> Self {
        Self {
            name: non_blank(body.name),
            category: non_blank(body.category),
            alcoholic: non_blank(body.alcoholic),
            glass: non_blank(body.glass),
            instructions: non_blank(body.instructions),
            image_ref: non_blank(body.image_ref),
            ingredients: body
                .ingredients
                .map(|list| list.into_iter().map(Ingredient::from).collect()),
        }
    }
}

/// Edit a recipe; only its creator may do so.
#[utoipa::path(
    put,
    path = "/user/{uid}/edit-recipe/{rid}",
    params(
        ("uid" = String, Path, description = "User id"),
        ("rid" = String, Path, description = "Recipe id")
    ),
    request_body = EditRecipeRequest,
    responses(
        (status = 200, description = "Updated recipe", body = RecipeResponse),
        (status = 403, description = "Not the creator", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "editRecipe"
)]
#[put("/user/{uid}/edit-recipe/{rid}")]
pub async fn edit_recipe(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    payload: web::Json<EditRecipeRequest>,
) -> ApiResult<web::Json<RecipeResponse>> {
    let (uid, rid) = path.into_inner();
    let user_id = parse_user_id(&uid)?;
    let recipe_id = parse_recipe_id(&rid)?;
    let recipe = state
        .authoring
        .edit(user_id, recipe_id, payload.into_inner().into())
        .await?;
    Ok(web::Json(RecipeResponse::from(&recipe)))
}

/// Delete a recipe; only its creator may do so.
#[utoipa::path(
    delete,
    path = "/user/{uid}/delete-recipe/{rid}",
    params(
        ("uid" = String, Path, description = "User id"),
        ("rid" = String, Path, description = "Recipe id")
    ),
    responses(
        (status = 200, description = "Deleted"),
        (status = 403, description = "Not the creator", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "deleteRecipe"
)]
#[delete("/user/{uid}/delete-recipe/{rid}")]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (uid, rid) = path.into_inner();
    let user_id = parse_user_id(&uid)?;
    let recipe_id = parse_recipe_id(&rid)?;
    state.authoring.delete(user_id, recipe_id).await?;
    Ok(HttpResponse::Ok().finish())
}

/// List the recipes a user created.
#[utoipa::path(
    get,
    path = "/user/{uid}/created-recipe",
    params(("uid" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Created recipes", body = [RecipeResponse]),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "listCreatedRecipes"
)]
#[get("/user/{uid}/created-recipe")]
pub async fn created_recipes(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<RecipeResponse>>> {
    let user_id = parse_user_id(&path)?;
    let recipes = state.authoring.list_created(user_id).await?;
    Ok(web::Json(to_responses(&recipes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockRecipeAuthoring, MockRecipeSearch};
    use crate::domain::recipe::fixture_recipe;
    use crate::domain::user::UserId;
    use crate::inbound::http::state::test_support;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use serde_json::Value;
    use std::sync::Arc;

    fn app_with(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .service(search)
            .service(fetch)
            .service(rate)
            .service(add_recipe)
            .service(edit_recipe)
            .service(delete_recipe)
            .service(created_recipes)
    }

    #[actix_web::test]
    async fn search_returns_camel_case_recipes() {
        let mut mock = MockRecipeSearch::new();
        mock.expect_search()
            .withf(|filters| filters.name.as_deref() == Some("mojito"))
            .times(1)
            .return_once(|_| Ok(vec![fixture_recipe("Mojito", &["Light Rum"])]));
        let state = HttpState {
            search: Arc::new(mock),
            ..test_support::state()
        };
        let app = actix_test::init_service(app_with(state)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/drink-recipes?name=mojito")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        let first = &body.as_array().expect("array")[0];
        assert_eq!(first.get("name").and_then(Value::as_str), Some("Mojito"));
        assert_eq!(first.get("avgRate"), Some(&serde_json::json!(0.0)));
        assert!(first.get("avg_rate").is_none());
    }

    #[actix_web::test]
    async fn empty_search_results_map_to_404() {
        let mut mock = MockRecipeSearch::new();
        mock.expect_search().times(1).return_once(|_| Ok(Vec::new()));
        let state = HttpState {
            search: Arc::new(mock),
            ..test_support::state()
        };
        let app = actix_test::init_service(app_with(state)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/drink-recipes?name=nothing")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn fetch_rejects_malformed_ids() {
        let app = actix_test::init_service(app_with(test_support::state())).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/drink-recipes/not-a-uuid")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn rate_returns_the_new_average() {
        let recipe_id = crate::domain::recipe::RecipeId::random();
        let mut mock = crate::domain::ports::MockRatingCommand::new();
        mock.expect_submit()
            .withf(move |id, rating| *id == recipe_id && rating.value() == 4)
            .times(1)
            .return_once(|_, _| Ok(4.5));
        let state = HttpState {
            ratings: Arc::new(mock),
            ..test_support::state()
        };
        let app = actix_test::init_service(app_with(state)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!("/drink-recipes/{recipe_id}/rate"))
                .set_json(RateRequest { rating: 4 })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("avgRate"), Some(&serde_json::json!(4.5)));
    }

    #[actix_web::test]
    async fn rate_rejects_out_of_range_values() {
        let app = actix_test::init_service(app_with(test_support::state())).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!(
                    "/drink-recipes/{}/rate",
                    crate::domain::recipe::RecipeId::random()
                ))
                .set_json(RateRequest { rating: 9 })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn add_recipe_returns_201_with_the_new_recipe() {
        let user_id = UserId::random();
        let mut mock = MockRecipeAuthoring::new();
        mock.expect_create()
            .withf(move |uid, draft| *uid == user_id && draft.name == "Negroni")
            .times(1)
            .return_once(|_, draft| Ok(crate::domain::recipe::Recipe::new(draft)));
        let state = HttpState {
            authoring: Arc::new(mock),
            ..test_support::state()
        };
        let app = actix_test::init_service(app_with(state)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/user/{user_id}/add-recipe"))
                .set_json(serde_json::json!({
                    "name": "Negroni",
                    "category": "Cocktail",
                    "alcoholic": "Alcoholic",
                    "instructions": "Stir over ice.",
                    "ingredients": [{"name": "Gin", "measure": "1 oz"}]
                }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("name").and_then(Value::as_str), Some("Negroni"));
    }

    #[actix_web::test]
    async fn edit_recipe_surfaces_forbidden() {
        let mut mock = MockRecipeAuthoring::new();
        mock.expect_edit()
            .times(1)
            .return_once(|_, _, _| Err(Error::forbidden("only the creator may edit this recipe")));
        let state = HttpState {
            authoring: Arc::new(mock),
            ..test_support::state()
        };
        let app = actix_test::init_service(app_with(state)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!(
                    "/user/{}/edit-recipe/{}",
                    UserId::random(),
                    crate::domain::recipe::RecipeId::random()
                ))
                .set_json(EditRecipeRequest {
                    name: Some("Boulevardier".to_owned()),
                    ..EditRecipeRequest::default()
                })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn delete_recipe_returns_200() {
        let mut mock = MockRecipeAuthoring::new();
        mock.expect_delete().times(1).return_once(|_, _| Ok(()));
        let state = HttpState {
            authoring: Arc::new(mock),
            ..test_support::state()
        };
        let app = actix_test::init_service(app_with(state)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!(
                    "/user/{}/delete-recipe/{}",
                    UserId::random(),
                    crate::domain::recipe::RecipeId::random()
                ))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn created_recipes_lists_the_ledger() {
        let mut mock = MockRecipeAuthoring::new();
        mock.expect_list_created()
            .times(1)
            .return_once(|_| Ok(vec![fixture_recipe("Negroni", &["Gin"])]));
        let state = HttpState {
            authoring: Arc::new(mock),
            ..test_support::state()
        };
        let app = actix_test::init_service(app_with(state)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/user/{}/created-recipe", UserId::random()))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));
    }
}
