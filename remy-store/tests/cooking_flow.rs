use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use remy_catalog::{Product, ProductAmount, Quantity, UnitCatalog};
use remy_core::repository::InventoryRepository;
use remy_core::{CookingService, CookingState, CoreError};
use remy_inventory::{Depletion, InventoryLedger, Place};
use remy_recipes::{Ingredient, Recipe};
use remy_store::MemoryStore;

struct Fixture {
    store: Arc<MemoryStore>,
    catalog: UnitCatalog,
    profile_id: Uuid,
    place: Place,
    milk: Product,
    coffee: Product,
    skim_milk: Product,
}

fn fixture() -> Fixture {
    let store = Arc::new(MemoryStore::new());
    let catalog = UnitCatalog::with_defaults();
    let profile_id = Uuid::new_v4();

    let mut place = Place::new("Casa");
    place.add_member(profile_id, true);

    let milk = Product::new("Leche").with_density(dec!(1032));
    let coffee = Product::new("Café");
    let skim_milk = Product::new("Leche Descremada").with_density(dec!(1032));

    let mut ledger = InventoryLedger::new(place.id);
    for (product, magnitude, unit) in [
        (&milk, dec!(1), "L"),
        (&coffee, dec!(1), "kg"),
        (&skim_milk, dec!(500), "mL"),
    ] {
        ledger
            .upsert(amount(&catalog, product, magnitude, unit))
            .unwrap();
    }

    store.insert_product(milk.clone()).unwrap();
    store.insert_product(coffee.clone()).unwrap();
    store.insert_product(skim_milk.clone()).unwrap();
    store.insert_place(place.clone()).unwrap();
    store.seed_ledger(ledger).unwrap();

    Fixture {
        store,
        catalog,
        profile_id,
        place,
        milk,
        coffee,
        skim_milk,
    }
}

fn amount(catalog: &UnitCatalog, product: &Product, magnitude: Decimal, unit: &str) -> ProductAmount {
    ProductAmount::new(
        product.clone(),
        Quantity::new(magnitude, catalog.resolve(unit).unwrap().clone()),
    )
}

fn recipe_with(catalog: &UnitCatalog, lines: &[(&Product, Decimal, &str)]) -> Recipe {
    let mut recipe = Recipe::new("Café con leche", "");
    for (product, magnitude, unit) in lines {
        recipe.add_ingredient(Ingredient::new(
            (*product).clone(),
            Some(Quantity::new(
                *magnitude,
                catalog.resolve(unit).unwrap().clone(),
            )),
        ));
    }
    recipe
}

#[tokio::test]
async fn test_cook_depletes_quantified_ingredients() {
    let fx = fixture();
    let recipe = recipe_with(
        &fx.catalog,
        &[(&fx.milk, dec!(500), "mL"), (&fx.coffee, dec!(500), "g")],
    );
    fx.store.insert_recipe(recipe.clone()).unwrap();

    let service = CookingService::new(fx.store.clone());
    let outcome = service
        .cook(fx.profile_id, recipe.id, None, None)
        .await
        .unwrap();

    assert_eq!(outcome.state, CookingState::Committed);
    assert_eq!(
        outcome.depletions,
        vec![
            ("Leche".to_string(), Depletion::Reduced),
            ("Café".to_string(), Depletion::Reduced),
        ]
    );

    let ledger = fx.store.ledger_for_place(fx.place.id).await.unwrap();
    let milk_entry = ledger.entry_for(fx.milk.id).unwrap();
    assert_eq!(milk_entry.amount.quantity.magnitude, dec!(0.5));
    assert_eq!(milk_entry.amount.quantity.unit.name, "liter");
    let coffee_entry = ledger.entry_for(fx.coffee.id).unwrap();
    assert_eq!(coffee_entry.amount.quantity.magnitude, dec!(0.5));
    // untouched product keeps its full amount
    let skim_entry = ledger.entry_for(fx.skim_milk.id).unwrap();
    assert_eq!(skim_entry.amount.quantity.magnitude, dec!(500));

    assert_eq!(outcome.interaction.cooked_at.len(), 1);
    assert_eq!(outcome.interaction.rating, None);
}

#[tokio::test]
async fn test_cook_exact_amount_removes_ledger_entry() {
    let fx = fixture();
    // 0.5 L asked against a 500 mL entry
    let recipe = recipe_with(&fx.catalog, &[(&fx.skim_milk, dec!(0.5), "L")]);
    fx.store.insert_recipe(recipe.clone()).unwrap();

    let outcome = CookingService::new(fx.store.clone())
        .cook(fx.profile_id, recipe.id, None, None)
        .await
        .unwrap();

    assert_eq!(
        outcome.depletions,
        vec![("Leche Descremada".to_string(), Depletion::Removed)]
    );
    let ledger = fx.store.ledger_for_place(fx.place.id).await.unwrap();
    assert!(ledger.entry_for(fx.skim_milk.id).is_none());
    assert_eq!(ledger.entries().len(), 2);
}

#[tokio::test]
async fn test_cooking_twice_reuses_the_interaction() {
    let fx = fixture();
    let recipe = recipe_with(&fx.catalog, &[(&fx.milk, dec!(100), "mL")]);
    fx.store.insert_recipe(recipe.clone()).unwrap();
    let service = CookingService::new(fx.store.clone());

    let first = service
        .cook(fx.profile_id, recipe.id, None, None)
        .await
        .unwrap();
    let second = service
        .cook(fx.profile_id, recipe.id, None, Some(dec!(9)))
        .await
        .unwrap();

    assert_eq!(first.interaction.id, second.interaction.id);
    assert_eq!(second.interaction.cooked_at.len(), 2);
    assert_eq!(second.interaction.rating, Some(dec!(9)));
}

#[tokio::test]
async fn test_out_of_range_rating_aborts_with_nothing_persisted() {
    let fx = fixture();
    let recipe = recipe_with(&fx.catalog, &[(&fx.milk, dec!(500), "mL")]);
    fx.store.insert_recipe(recipe.clone()).unwrap();
    let service = CookingService::new(fx.store.clone());

    let err = service
        .cook(fx.profile_id, recipe.id, None, Some(dec!(11)))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Rating(_)));

    // neither depletion nor interaction survived the failed cook
    let ledger = fx.store.ledger_for_place(fx.place.id).await.unwrap();
    assert_eq!(
        ledger.entry_for(fx.milk.id).unwrap().amount.quantity.magnitude,
        dec!(1)
    );

    let outcome = service
        .cook(fx.profile_id, recipe.id, None, None)
        .await
        .unwrap();
    assert_eq!(outcome.interaction.cooked_at.len(), 1);
    assert_eq!(outcome.interaction.rating, None);
}

#[tokio::test]
async fn test_unknown_recipe_changes_nothing() {
    let fx = fixture();
    let missing = Uuid::new_v4();

    let err = CookingService::new(fx.store.clone())
        .cook(fx.profile_id, missing, None, None)
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::RecipeNotFound(id) if id == missing));
    let ledger = fx.store.ledger_for_place(fx.place.id).await.unwrap();
    assert_eq!(ledger.entries().len(), 3);
}

#[tokio::test]
async fn test_profile_without_a_place_is_rejected() {
    let fx = fixture();
    let recipe = recipe_with(&fx.catalog, &[(&fx.milk, dec!(500), "mL")]);
    fx.store.insert_recipe(recipe.clone()).unwrap();

    let err = CookingService::new(fx.store.clone())
        .cook(Uuid::new_v4(), recipe.id, None, None)
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::PlaceNotFound));
}

#[tokio::test]
async fn test_missing_ingredient_is_tolerated() {
    let fx = fixture();
    let butter = Product::new("Manteca");
    fx.store.insert_product(butter.clone()).unwrap();
    let recipe = recipe_with(
        &fx.catalog,
        &[(&butter, dec!(200), "g"), (&fx.milk, dec!(500), "mL")],
    );
    fx.store.insert_recipe(recipe.clone()).unwrap();

    let outcome = CookingService::new(fx.store.clone())
        .cook(fx.profile_id, recipe.id, None, None)
        .await
        .unwrap();

    assert_eq!(outcome.state, CookingState::Committed);
    assert_eq!(
        outcome.depletions,
        vec![
            ("Manteca".to_string(), Depletion::Insufficient),
            ("Leche".to_string(), Depletion::Reduced),
        ]
    );
    assert_eq!(outcome.interaction.cooked_at.len(), 1);
}

#[tokio::test]
async fn test_uncounted_ingredients_never_touch_the_ledger() {
    let fx = fixture();
    let salt = Product::new("Sal");
    fx.store.insert_product(salt.clone()).unwrap();

    let mut recipe = recipe_with(&fx.catalog, &[(&fx.milk, dec!(500), "mL")]);
    recipe.add_ingredient(Ingredient::new(salt, None).with_notes("a pinch"));
    fx.store.insert_recipe(recipe.clone()).unwrap();

    let outcome = CookingService::new(fx.store.clone())
        .cook(fx.profile_id, recipe.id, None, None)
        .await
        .unwrap();

    assert_eq!(outcome.depletions.len(), 1);
    assert_eq!(outcome.depletions[0].0, "Leche");
}

#[tokio::test]
async fn test_explicit_place_overrides_the_default() {
    let fx = fixture();
    let mut cabin = Place::new("Cabaña");
    cabin.add_member(fx.profile_id, false);
    let mut cabin_ledger = InventoryLedger::new(cabin.id);
    cabin_ledger
        .upsert(amount(&fx.catalog, &fx.milk, dec!(2), "L"))
        .unwrap();
    fx.store.insert_place(cabin.clone()).unwrap();
    fx.store.seed_ledger(cabin_ledger).unwrap();

    let recipe = recipe_with(&fx.catalog, &[(&fx.milk, dec!(500), "mL")]);
    fx.store.insert_recipe(recipe.clone()).unwrap();

    CookingService::new(fx.store.clone())
        .cook(fx.profile_id, recipe.id, Some(cabin.id), None)
        .await
        .unwrap();

    let cabin_after = fx.store.ledger_for_place(cabin.id).await.unwrap();
    assert_eq!(
        cabin_after.entry_for(fx.milk.id).unwrap().amount.quantity.magnitude,
        dec!(1.5)
    );
    // the default place's ledger stayed untouched
    let home = fx.store.ledger_for_place(fx.place.id).await.unwrap();
    assert_eq!(
        home.entry_for(fx.milk.id).unwrap().amount.quantity.magnitude,
        dec!(1)
    );
}
