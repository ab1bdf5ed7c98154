//! Recipe search: name and ingredient filter evaluation.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{RecipeRepository, RecipeSearch, SearchFilters};
use crate::domain::recipe::{Recipe, RecipeId};
use crate::domain::Error;

/// Evaluates search filters over the recipe collection.
///
/// Filtering happens in the domain over the full collection; the store only
/// provides `find_all`. Results are ordered by average rating descending,
/// with ties left in store order (the sort is stable).
pub struct RecipeSearchEngine<R> {
    recipes: Arc<R>,
}

impl<R> RecipeSearchEngine<R> {
    pub fn new(recipes: Arc<R>) -> Self {
        Self { recipes }
    }
}

/// Lowercased name filter, or `None` for blank input.
fn normalised_name(filters: &SearchFilters) -> Option<String> {
    filters
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_lowercase)
}

/// Comma-split, trimmed, lowercased ingredient tokens. Blank tokens are
/// dropped, so `"rum,,lime"` behaves like `"rum, lime"`.
fn ingredient_tokens(filters: &SearchFilters) -> Vec<String> {
    filters
        .ingredients
        .as_deref()
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_lowercase)
                .collect()
        })
        .unwrap_or_default()
}

fn matches(recipe: &Recipe, name: Option<&str>, tokens: &[String]) -> bool {
    if let Some(name) = name {
        if !recipe.name().to_lowercase().contains(name) {
            return false;
        }
    }
    // Every token must be a substring of some ingredient name.
    tokens.iter().all(|token| {
        recipe
            .ingredients()
            .iter()
            .any(|ingredient| ingredient.name.to_lowercase().contains(token.as_str()))
    })
}

#[async_trait]
impl<R> RecipeSearch for RecipeSearchEngine<R>
where
    R: RecipeRepository,
{
    async fn search(&self, filters: SearchFilters) -> Result<Vec<Recipe>, Error> {
        let name = normalised_name(&filters);
        let tokens = ingredient_tokens(&filters);

        let mut hits: Vec<Recipe> = self
            .recipes
            .find_all()
            .await?
            .into_iter()
            .filter(|recipe| matches(recipe, name.as_deref(), &tokens))
            .collect();
        hits.sort_by(|a, b| b.avg_rate().total_cmp(&a.avg_rate()));
        Ok(hits)
    }

    async fn fetch(&self, id: RecipeId) -> Result<Recipe, Error> {
        self.recipes
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("recipe not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockRecipeRepository;
    use crate::domain::recipe::{fixture_recipe, Rating};
    use rstest::rstest;

    fn engine_with(recipes: Vec<Recipe>) -> RecipeSearchEngine<MockRecipeRepository> {
        let mut repo = MockRecipeRepository::new();
        repo.expect_find_all()
            .times(1)
            .return_once(move || Ok(recipes));
        RecipeSearchEngine::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn blank_filters_return_everything() {
        let engine = engine_with(vec![
            fixture_recipe("Mojito", &["Light Rum", "Mint"]),
            fixture_recipe("Margarita", &["Tequila", "Lime Juice"]),
        ]);
        let hits = engine
            .search(SearchFilters {
                name: Some("   ".to_owned()),
                ingredients: Some(String::new()),
            })
            .await
            .expect("search succeeds");
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn name_filter_matches_substrings_case_insensitively() {
        let engine = engine_with(vec![
            fixture_recipe("Mojito", &["Light Rum"]),
            fixture_recipe("Virgin Mojito", &["Mint"]),
            fixture_recipe("Margarita", &["Tequila"]),
        ]);
        let hits = engine
            .search(SearchFilters {
                name: Some("MOJI".to_owned()),
                ingredients: None,
            })
            .await
            .expect("search succeeds");
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|r| r.name().contains("Mojito")));
    }

    #[rstest]
    #[case(&["Light Rum", "Lime Juice"], true)]
    #[case(&["Lime Juice"], false)]
    #[tokio::test]
    async fn every_ingredient_token_must_match(
        #[case] ingredients: &[&str],
        #[case] expected: bool,
    ) {
        let engine = engine_with(vec![fixture_recipe("Daiquiri", ingredients)]);
        let hits = engine
            .search(SearchFilters {
                name: None,
                ingredients: Some("rum, lime".to_owned()),
            })
            .await
            .expect("search succeeds");
        assert_eq!(!hits.is_empty(), expected);
    }

    #[tokio::test]
    async fn both_filters_combine() {
        let engine = engine_with(vec![
            fixture_recipe("Mojito", &["Light Rum", "Mint"]),
            fixture_recipe("Mojito Twist", &["Vodka", "Mint"]),
        ]);
        let hits = engine
            .search(SearchFilters {
                name: Some("mojito".to_owned()),
                ingredients: Some("rum".to_owned()),
            })
            .await
            .expect("search succeeds");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.first().map(Recipe::name), Some("Mojito"));
    }

    #[tokio::test]
    async fn results_sort_by_average_rating_descending() {
        let mut low = fixture_recipe("Low", &["Gin"]);
        low.submit_rating(Rating::try_new(2).expect("valid rating"));
        let mut high = fixture_recipe("High", &["Gin"]);
        high.submit_rating(Rating::try_new(5).expect("valid rating"));
        let unrated = fixture_recipe("Unrated", &["Gin"]);

        let engine = engine_with(vec![low, unrated, high]);
        let hits = engine
            .search(SearchFilters::default())
            .await
            .expect("search succeeds");
        let names: Vec<&str> = hits.iter().map(Recipe::name).collect();
        assert_eq!(names, vec!["High", "Low", "Unrated"]);
    }

    #[tokio::test]
    async fn empty_result_is_a_successful_outcome() {
        let engine = engine_with(vec![fixture_recipe("Mojito", &["Light Rum"])]);
        let hits = engine
            .search(SearchFilters {
                name: Some("negroni".to_owned()),
                ingredients: None,
            })
            .await
            .expect("search succeeds");
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn fetch_reports_missing_recipes() {
        let mut repo = MockRecipeRepository::new();
        repo.expect_find_by_id().times(1).return_once(|_| Ok(None));
        let engine = RecipeSearchEngine::new(Arc::new(repo));

        let err = engine
            .fetch(RecipeId::random())
            .await
            .expect_err("missing recipe");
        assert_eq!(err.code(), crate::domain::ErrorCode::NotFound);
    }
}
