//! MCP tool logic tests, run against an in-memory database.

use mealgenie::db::Database;
use mealgenie::mcp::*;
use mealgenie::models::*;
use rand::{rngs::StdRng, SeedableRng};

fn setup() -> (McpServer, Database) {
    let db = Database::open_memory().expect("Failed to create database");
    db.migrate().expect("Failed to migrate");
    let server = McpServer::new(db.clone());
    (server, db)
}

fn create_meal(db: &Database, name: &str, ingredients: &str, category: MealCategory) -> Meal {
    db.create_meal(CreateMealInput::new(name, ingredients, category))
        .expect("Failed to create meal")
}

mod list_meals {
    use super::*;

    #[test]
    fn filters_by_category_name() {
        let (server, db) = setup();
        create_meal(&db, "Oats", "oats", MealCategory::Breakfast);
        create_meal(&db, "Stew", "beef", MealCategory::Dinner);

        let meals = server
            .find_meals(ListMealsRequest {
                category: Some("Dinner".to_string()),
                ..Default::default()
            })
            .expect("Tool failed");

        assert_eq!(meals.len(), 1);
        assert_eq!(meals[0].name, "Stew");
    }

    #[test]
    fn rejects_unknown_category() {
        let (server, _db) = setup();

        let result = server.find_meals(ListMealsRequest {
            category: Some("brunch".to_string()),
            ..Default::default()
        });

        assert!(result.is_err());
    }
}

mod get_meal {
    use super::*;

    #[test]
    fn returns_meal_by_id() {
        let (server, db) = setup();
        let meal = create_meal(&db, "Soup", "water", MealCategory::Lunch);

        let found = server.find_meal(&meal.id.to_string()).expect("Tool failed");
        assert_eq!(found, meal);
    }

    #[test]
    fn rejects_invalid_uuid() {
        let (server, _db) = setup();
        assert!(server.find_meal("not-a-uuid").is_err());
    }

    #[test]
    fn rejects_unknown_meal() {
        let (server, _db) = setup();
        assert!(server.find_meal(&uuid::Uuid::new_v4().to_string()).is_err());
    }
}

mod create_meal {
    use super::*;

    #[test]
    fn stores_meal_with_parsed_category() {
        let (server, db) = setup();

        let meal = server
            .add_meal(CreateMealRequest {
                name: "Tacos".to_string(),
                ingredients: "3 tortillas, 200 g beans".to_string(),
                category: "dinner".to_string(),
                image_url: None,
                prep_time: Some(20),
                servings: None,
                calories: Some(650),
                diet_type: Some("vegan".to_string()),
            })
            .expect("Tool failed");

        assert_eq!(meal.category, MealCategory::Dinner);
        assert_eq!(meal.servings, Some(2));
        assert!(db.get_meal(meal.id).expect("Query failed").is_some());
    }
}

mod planning_tools {
    use super::*;

    #[test]
    fn random_meals_uses_matching_candidates() {
        let (server, db) = setup();
        let oats = create_meal(&db, "Oats", "oats", MealCategory::Breakfast);

        let plan = server
            .plan_day(PlanRequest::default(), &mut StdRng::seed_from_u64(1))
            .expect("Tool failed");

        assert_eq!(plan.breakfast.map(|m| m.id), Some(oats.id));
        assert!(plan.lunch.is_none());
        assert!(plan.dinner.is_none());
    }

    #[test]
    fn weekly_plan_is_reproducible_with_a_seed() {
        let (server, db) = setup();
        for i in 0..5 {
            create_meal(&db, &format!("Dinner {i}"), "rice", MealCategory::Dinner);
        }

        let first = server
            .plan_week(PlanRequest::default(), &mut StdRng::seed_from_u64(11))
            .expect("Tool failed");
        let second = server
            .plan_week(PlanRequest::default(), &mut StdRng::seed_from_u64(11))
            .expect("Tool failed");

        assert_eq!(first, second);
    }
}

mod shopping_list {
    use super::*;

    #[test]
    fn aggregates_selected_meals() {
        let (server, db) = setup();
        let a = create_meal(&db, "Omelette", "2 eggs, 1 cup milk", MealCategory::Breakfast);
        let b = create_meal(&db, "Scramble", "3 eggs; salt", MealCategory::Breakfast);
        create_meal(&db, "Unused", "9 eggs", MealCategory::Dinner);

        let list = server
            .build_shopping_list(&[a.id.to_string(), b.id.to_string()])
            .expect("Tool failed");

        let pairs: Vec<_> = list
            .ingredients
            .iter()
            .map(|e| (e.ingredient.as_str(), e.count))
            .collect();
        assert_eq!(pairs, vec![("cup milk", 1.0), ("eggs", 5.0), ("salt", 1.0)]);
    }

    #[test]
    fn rejects_malformed_ids() {
        let (server, _db) = setup();
        assert!(server.build_shopping_list(&["nope".to_string()]).is_err());
    }
}
