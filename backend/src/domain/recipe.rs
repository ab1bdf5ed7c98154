//! Recipe aggregate: ingredients, rating history, and embedded comments.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::comment::{Comment, CommentId};

/// Identifier assigned to a recipe document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecipeId(Uuid);

impl RecipeId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its string form.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, uuid::Error> {
        Uuid::parse_str(value.as_ref()).map(Self)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A submitted rating, constructible only within `[1, 5]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rating(u8);

/// Lowest accepted rating value.
pub const RATING_MIN: u8 = 1;
/// Highest accepted rating value.
pub const RATING_MAX: u8 = 5;

/// Error returned when a rating value falls outside `[1, 5]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("rating must be between {RATING_MIN} and {RATING_MAX}, got {value}")]
pub struct RatingOutOfRange {
    /// The rejected value.
    pub value: i64,
}

impl Rating {
    /// Validate and construct a rating.
    pub fn try_new(value: i64) -> Result<Self, RatingOutOfRange> {
        if (i64::from(RATING_MIN)..=i64::from(RATING_MAX)).contains(&value) {
            #[allow(clippy::cast_possible_truncation, reason = "range-checked above")]
            Ok(Self(value as u8))
        } else {
            Err(RatingOutOfRange { value })
        }
    }

    /// The validated value.
    pub fn value(&self) -> u8 {
        self.0
    }
}

/// One entry in a recipe's ingredient list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    /// Ingredient name, e.g. "Light Rum".
    pub name: String,
    /// Free-form measure, e.g. "2 oz". Optional.
    pub measure: Option<String>,
}

/// Validated input for creating a recipe.
#[derive(Debug, Clone)]
pub struct RecipeDraft {
    pub name: String,
    pub category: String,
    pub alcoholic: String,
    pub glass: Option<String>,
    pub instructions: String,
    pub image_ref: Option<String>,
    pub ingredients: Vec<Ingredient>,
}

/// Partial update for a recipe. `None` fields are left unchanged; blank
/// strings are normalised to `None` before the patch reaches the domain.
#[derive(Debug, Clone, Default)]
pub struct RecipePatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub alcoholic: Option<String>,
    pub glass: Option<String>,
    pub instructions: Option<String>,
    pub image_ref: Option<String>,
    pub ingredients: Option<Vec<Ingredient>>,
}

/// A drink recipe document.
///
/// ## Invariants
/// - `avg_rate()` is always the arithmetic mean of the rating history, and
///   `0.0` while the history is empty. The only rating mutator recomputes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    id: RecipeId,
    name: String,
    category: String,
    alcoholic: String,
    glass: Option<String>,
    instructions: String,
    image_ref: Option<String>,
    ingredients: Vec<Ingredient>,
    ratings: Vec<Rating>,
    avg_rate: f64,
    comments: Vec<Comment>,
    created_at: DateTime<Utc>,
}

impl Recipe {
    /// Create a new recipe from a validated draft.
    pub fn new(draft: RecipeDraft) -> Self {
        let RecipeDraft {
            name,
            category,
            alcoholic,
            glass,
            instructions,
            image_ref,
            ingredients,
        } = draft;
        Self {
            id: RecipeId::random(),
            name,
            category,
            alcoholic,
            glass,
            instructions,
            image_ref,
            ingredients,
            ratings: Vec::new(),
            avg_rate: 0.0,
            comments: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> RecipeId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn category(&self) -> &str {
        self.category.as_str()
    }

    /// Free-form classification, e.g. "Alcoholic" or "Non alcoholic".
    pub fn alcoholic(&self) -> &str {
        self.alcoholic.as_str()
    }

    pub fn glass(&self) -> Option<&str> {
        self.glass.as_deref()
    }

    pub fn instructions(&self) -> &str {
        self.instructions.as_str()
    }

    pub fn image_ref(&self) -> Option<&str> {
        self.image_ref.as_deref()
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    /// Full rating history, in submission order.
    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// Arithmetic mean of the rating history; `0.0` when empty.
    pub fn avg_rate(&self) -> f64 {
        self.avg_rate
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Append a rating and recompute the average. Returns the new average.
    pub fn submit_rating(&mut self, rating: Rating) -> f64 {
        self.ratings.push(rating);
        let sum: u64 = self.ratings.iter().map(|r| u64::from(r.value())).sum();
        #[allow(
            clippy::cast_precision_loss,
            reason = "rating counts stay far below 2^52"
        )]
        {
            self.avg_rate = sum as f64 / self.ratings.len() as f64;
        }
        self.avg_rate
    }

    /// Embedded comments in insertion order.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Comments sorted for display: most likes first, then most recent.
    ///
    /// Recomputed on every call rather than cached; like counts change
    /// between reads.
    pub fn comments_sorted(&self) -> Vec<&Comment> {
        let mut sorted: Vec<&Comment> = self.comments.iter().collect();
        sorted.sort_by(|a, b| {
            b.likes()
                .cmp(&a.likes())
                .then_with(|| b.posted_at().cmp(&a.posted_at()))
        });
        sorted
    }

    /// Append a new comment and return its id.
    pub fn add_comment(&mut self, author: impl Into<String>, text: impl Into<String>) -> CommentId {
        let comment = Comment::new(author, text);
        let id = comment.id();
        self.comments.push(comment);
        id
    }

    /// Look up an embedded comment.
    pub fn comment(&self, id: CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id() == id)
    }

    /// Mutable lookup for like-toggling.
    pub fn comment_mut(&mut self, id: CommentId) -> Option<&mut Comment> {
        self.comments.iter_mut().find(|c| c.id() == id)
    }

    /// Remove a comment by id. Returns `true` when a comment was removed.
    pub fn remove_comment(&mut self, id: CommentId) -> bool {
        let before = self.comments.len();
        self.comments.retain(|c| c.id() != id);
        self.comments.len() != before
    }

    /// Apply a partial update. `None` fields leave the current value alone.
    pub fn apply_patch(&mut self, patch: RecipePatch) {
        let RecipePatch {
            name,
            category,
            alcoholic,
            glass,
            instructions,
            image_ref,
            ingredients,
        } = patch;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(alcoholic) = alcoholic {
            self.alcoholic = alcoholic;
        }
        if let Some(glass) = glass {
            self.glass = Some(glass);
        }
        if let Some(instructions) = instructions {
            self.instructions = instructions;
        }
        if let Some(image_ref) = image_ref {
            self.image_ref = Some(image_ref);
        }
        if let Some(ingredients) = ingredients {
            self.ingredients = ingredients;
        }
    }
}

#[cfg(test)]
pub(crate) fn fixture_recipe(name: &str, ingredient_names: &[&str]) -> Recipe {
    Recipe::new(RecipeDraft {
        name: name.to_owned(),
        category: "Cocktail".to_owned(),
        alcoholic: "Alcoholic".to_owned(),
        glass: Some("Highball glass".to_owned()),
        instructions: "Shake with ice and strain.".to_owned(),
        image_ref: None,
        ingredients: ingredient_names
            .iter()
            .map(|n| Ingredient {
                name: (*n).to_owned(),
                measure: Some("1 oz".to_owned()),
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(6)]
    #[case(-3)]
    fn rating_rejects_out_of_range_values(#[case] value: i64) {
        assert!(Rating::try_new(value).is_err());
    }

    #[rstest]
    #[case(1)]
    #[case(5)]
    fn rating_accepts_bounds(#[case] value: i64) {
        assert!(Rating::try_new(value).is_ok());
    }

    #[test]
    fn avg_rate_is_zero_for_empty_history() {
        let recipe = fixture_recipe("Mojito", &["Light Rum", "Lime Juice"]);
        assert_eq!(recipe.avg_rate(), 0.0);
        assert!(recipe.ratings().is_empty());
    }

    #[test]
    fn avg_rate_tracks_the_mean_after_each_submission() {
        let mut recipe = fixture_recipe("Mojito", &["Light Rum"]);
        for (value, expected) in [(4, 4.0), (5, 4.5), (3, 4.0)] {
            let rating = Rating::try_new(value).expect("valid rating");
            assert_eq!(recipe.submit_rating(rating), expected);
            assert_eq!(recipe.avg_rate(), expected);
        }
        assert_eq!(recipe.ratings().len(), 3);
    }

    #[test]
    fn comments_sort_by_likes_then_recency() {
        let mut recipe = fixture_recipe("Daiquiri", &["Light Rum"]);
        let first = recipe.add_comment("alice", "first");
        let second = recipe.add_comment("bob", "second");

        // Insertion order: with equal likes, the newer comment leads.
        let order: Vec<CommentId> = recipe.comments_sorted().iter().map(|c| c.id()).collect();
        assert_eq!(order, vec![second, first]);

        recipe
            .comment_mut(first)
            .expect("comment present")
            .toggle_like("carol@x.com");
        let order: Vec<CommentId> = recipe.comments_sorted().iter().map(|c| c.id()).collect();
        assert_eq!(order, vec![first, second]);
    }

    #[test]
    fn remove_comment_reports_whether_anything_was_removed() {
        let mut recipe = fixture_recipe("Daiquiri", &["Light Rum"]);
        let id = recipe.add_comment("alice", "text");
        assert!(recipe.remove_comment(id));
        assert!(!recipe.remove_comment(id));
    }

    #[test]
    fn patch_leaves_unset_fields_alone() {
        let mut recipe = fixture_recipe("Margarita", &["Tequila"]);
        recipe.apply_patch(RecipePatch {
            category: Some("Classic".to_owned()),
            ..RecipePatch::default()
        });
        assert_eq!(recipe.name(), "Margarita");
        assert_eq!(recipe.category(), "Classic");
        assert_eq!(recipe.alcoholic(), "Alcoholic");
    }
}
