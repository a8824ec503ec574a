use chrono::Utc;
use mealgenie::db::{InMemoryMealStore, MealStore};
use mealgenie::models::*;
use mealgenie::planning;
use rand::{rngs::StdRng, SeedableRng};
use speculate2::speculate;
use uuid::Uuid;

fn meal(name: &str, ingredients: &str, category: MealCategory, calories: Option<i64>) -> Meal {
    CreateMealInput {
        calories,
        ..CreateMealInput::new(name, ingredients, category)
    }
    .into_meal(Uuid::new_v4(), Utc::now())
}

speculate! {
    before {
        let omelette = meal("Omelette", "2 eggs, 1 cup milk", MealCategory::Breakfast, Some(350));
        let scramble = meal("Scramble", "3 eggs; salt", MealCategory::Breakfast, Some(300));
        let feast = meal("Feast", "1 kg beef\n2 potatoes", MealCategory::Dinner, Some(1800));
        let store = InMemoryMealStore::with_meals(vec![
            omelette.clone(),
            scramble.clone(),
            feast.clone(),
        ]);
        let mut rng = StdRng::seed_from_u64(2024);
    }

    describe "shopping_list" {
        it "merges ingredients of the requested meals only" {
            let list = planning::shopping_list(&store, &[omelette.id, scramble.id])
                .expect("Aggregation failed");

            let keys: Vec<_> = list.ingredients.iter().map(|e| e.ingredient.as_str()).collect();
            assert_eq!(keys, vec!["cup milk", "eggs", "salt"]);
            assert_eq!(list.ingredients[1].count, 5.0);
        }

        it "is empty when no id matches" {
            let list = planning::shopping_list(&store, &[Uuid::new_v4()])
                .expect("Aggregation failed");
            assert!(list.ingredients.is_empty());
        }

        it "counts a meal once even when requested twice" {
            let list = planning::shopping_list(&store, &[feast.id, feast.id])
                .expect("Aggregation failed");

            assert_eq!(
                list.ingredients,
                vec![
                    ShoppingListEntry { ingredient: "kg beef".to_string(), count: 1.0 },
                    ShoppingListEntry { ingredient: "potatoes".to_string(), count: 2.0 },
                ]
            );
        }

        it "reflects meal updates" {
            store
                .update(feast.id, UpdateMealInput {
                    ingredients: Some("3 potatoes".to_string()),
                    ..Default::default()
                })
                .expect("Update failed");

            let list = planning::shopping_list(&store, &[feast.id]).expect("Aggregation failed");
            assert_eq!(list.ingredients[0].ingredient, "potatoes");
            assert_eq!(list.ingredients[0].count, 3.0);
        }
    }

    describe "random_meals" {
        it "never picks meals over the calorie limit" {
            let filter = PlanFilter { diet_type: None, max_calories: Some(1000) };

            for _ in 0..20 {
                let plan = planning::random_meals(&store, &filter, &mut rng).expect("Plan failed");
                assert!(plan.dinner.is_none());
                assert!(plan.breakfast.is_some());
            }
        }

        it "returns an empty plan for an empty store" {
            let empty = InMemoryMealStore::new();
            let plan = planning::random_meals(&empty, &PlanFilter::default(), &mut rng)
                .expect("Plan failed");
            assert_eq!(plan, DayMealPlan::default());
        }
    }

    describe "generate_weekly_plan" {
        it "only uses meals from the store" {
            let plan = planning::generate_weekly_plan(&store, &PlanFilter::default(), &mut rng)
                .expect("Plan failed");

            let ids = [omelette.id, scramble.id];
            for (_, day) in plan.days() {
                let breakfast = day.breakfast.as_ref().expect("breakfast missing");
                assert!(ids.contains(&breakfast.id));
                assert!(day.lunch.is_none());
                assert_eq!(day.dinner.as_ref().map(|m| m.id), Some(feast.id));
            }
        }
    }
}
