use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use remy_inventory::{Depletion, InventoryLedger};
use remy_recipes::Interaction;

use crate::repository::{Store, TransactionScope};
use crate::{CoreError, CoreResult};

/// Lifecycle of one cooking transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CookingState {
    Started,
    IngredientsApplied,
    Recorded,
    Committed,
    Failed,
}

impl CookingState {
    /// Checked transition. The happy path is strictly
    /// Started → IngredientsApplied → Recorded → Committed; any state short
    /// of Committed may fall to Failed.
    pub fn advance(self, next: CookingState) -> CoreResult<CookingState> {
        let legal = matches!(
            (self, next),
            (CookingState::Started, CookingState::IngredientsApplied)
                | (CookingState::IngredientsApplied, CookingState::Recorded)
                | (CookingState::Recorded, CookingState::Committed)
        ) || (next == CookingState::Failed && self != CookingState::Committed);

        if legal {
            Ok(next)
        } else {
            Err(CoreError::InvalidTransition {
                from: format!("{:?}", self),
                to: format!("{:?}", next),
            })
        }
    }
}

/// Result of a committed cook: the interaction as persisted and what
/// happened to each quantified ingredient in the ledger.
#[derive(Debug, Clone)]
pub struct CookingOutcome {
    pub state: CookingState,
    pub interaction: Interaction,
    pub depletions: Vec<(String, Depletion)>,
}

/// Orchestrates cooking a recipe: deplete its ingredients from the place's
/// ledger and record the cook interaction, all inside one transaction scope.
pub struct CookingService {
    store: Arc<dyn Store>,
}

impl CookingService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Cooks `recipe_id` as `profile_id` in the given place (or the
    /// profile's default place). Missing ingredients are tolerated;
    /// recipe/place resolution failures and out-of-range ratings abort with
    /// nothing persisted.
    pub async fn cook(
        &self,
        profile_id: Uuid,
        recipe_id: Uuid,
        place_id: Option<Uuid>,
        rating: Option<Decimal>,
    ) -> CoreResult<CookingOutcome> {
        let recipe = self
            .store
            .get_recipe(recipe_id)
            .await?
            .ok_or(CoreError::RecipeNotFound(recipe_id))?;
        let place = self
            .store
            .place_or_default(profile_id, place_id)
            .await?
            .ok_or(CoreError::PlaceNotFound)?;

        let mut state = CookingState::Started;
        let mut ledger = self.store.ledger_for_place(place.id).await?;

        let mut depletions = Vec::new();
        for ingredient in &recipe.ingredients {
            let Some(required) = ingredient.to_amount() else {
                continue;
            };
            let outcome = ledger.deplete(&required)?;
            tracing::debug!(
                product = %ingredient.product.name,
                outcome = ?outcome,
                "depleted ingredient"
            );
            depletions.push((ingredient.product.name.clone(), outcome));
        }
        state = state.advance(CookingState::IngredientsApplied)?;

        let mut interaction = self
            .store
            .find_interaction(profile_id, recipe_id)
            .await?
            .unwrap_or_else(|| Interaction::new(profile_id, recipe_id));
        interaction.cook();
        if let Some(rating) = rating {
            // aborts before anything is staged; no partial depletion survives
            interaction.set_rating(rating)?;
        }
        state = state.advance(CookingState::Recorded)?;

        let mut tx = self.store.begin().await?;
        if let Err(err) = stage(tx.as_mut(), &ledger, &interaction).await {
            tx.rollback().await?;
            return Err(err.into());
        }
        tx.commit().await?;
        state = state.advance(CookingState::Committed)?;

        tracing::info!(
            recipe = %recipe.title,
            place = %place.name,
            "recipe cooked"
        );

        Ok(CookingOutcome {
            state,
            interaction,
            depletions,
        })
    }
}

async fn stage(
    tx: &mut dyn TransactionScope,
    ledger: &InventoryLedger,
    interaction: &Interaction,
) -> Result<(), crate::repository::RepositoryError> {
    tx.save_ledger(ledger).await?;
    tx.save_interaction(interaction).await?;
    Ok(())
}
