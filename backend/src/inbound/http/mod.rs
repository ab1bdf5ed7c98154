//! HTTP adapter: handlers, error mapping, and shared state.

pub mod comments;
pub mod error;
pub mod health;
pub mod recipes;
pub mod state;
pub mod users;
pub mod validation;

pub use error::ApiResult;
pub use state::HttpState;

use actix_web::web;

/// Register every route on an application. Health probes read
/// `web::Data<HealthState>`, the rest read `web::Data<HttpState>`; both
/// must be registered by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(recipes::search)
        .service(recipes::fetch)
        .service(recipes::rate)
        .service(recipes::add_recipe)
        .service(recipes::edit_recipe)
        .service(recipes::delete_recipe)
        .service(recipes::created_recipes)
        .service(comments::add)
        .service(comments::list)
        .service(comments::delete)
        .service(comments::toggle_like)
        .service(users::sign_up)
        .service(users::log_in)
        .service(users::save_recipe)
        .service(users::unsave_recipe)
        .service(users::saved_recipes)
        .service(users::edit_profile)
        .service(users::delete_account)
        .service(health::ready)
        .service(health::live);
}
