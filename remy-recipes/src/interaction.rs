use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    #[error("rating {0} is out of range, must be between 1 and 10")]
    OutOfRange(Decimal),
}

/// A profile's history with one recipe: every cook timestamp plus an
/// optional rating. Exactly one interaction exists per (profile, recipe)
/// pair; the store enforces the uniqueness, this type carries the state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub recipe_id: Uuid,
    pub cooked_at: Vec<DateTime<Utc>>,
    pub rating: Option<Decimal>,
}

impl Interaction {
    pub fn new(profile_id: Uuid, recipe_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            profile_id,
            recipe_id,
            cooked_at: Vec::new(),
            rating: None,
        }
    }

    /// Records a cook right now.
    pub fn cook(&mut self) {
        self.cooked_at.push(Utc::now());
    }

    /// Sets the rating, rejecting values outside [1, 10] inclusive.
    pub fn set_rating(&mut self, rating: Decimal) -> Result<(), RatingError> {
        if rating < Decimal::ONE || rating > Decimal::from(10) {
            return Err(RatingError::OutOfRange(rating));
        }
        self.rating = Some(rating);
        Ok(())
    }
}
