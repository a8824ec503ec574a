use mealgenie::db::{Database, MealStore};
use mealgenie::models::*;
use speculate2::speculate;
use uuid::Uuid;

fn create_meal(db: &Database, name: &str, ingredients: &str, category: MealCategory) -> Meal {
    db.create_meal(CreateMealInput::new(name, ingredients, category))
        .expect("Failed to create meal")
}

speculate! {
    before {
        let db = Database::open_memory().expect("Failed to create in-memory database");
        db.migrate().expect("Failed to run migrations");
    }

    describe "meals" {
        describe "create_meal" {
            it "creates a meal with defaults for optional fields" {
                let meal = create_meal(&db, "Pancakes", "2 eggs, 1 cup flour", MealCategory::Breakfast);

                assert_eq!(meal.name, "Pancakes");
                assert_eq!(meal.category, MealCategory::Breakfast);
                assert_eq!(meal.prep_time, Some(15));
                assert_eq!(meal.servings, Some(2));
                assert_eq!(meal.diet_type.as_deref(), Some("veg"));
                assert!(meal.calories.is_none());
            }

            it "stores every provided field" {
                let meal = db.create_meal(CreateMealInput {
                    name: "Steak".to_string(),
                    ingredients: "1 steak".to_string(),
                    category: MealCategory::Dinner,
                    image_url: Some("https://img.example/steak.png".to_string()),
                    prep_time: Some(30),
                    servings: Some(1),
                    calories: Some(700),
                    diet_type: Some("keto".to_string()),
                }).expect("Failed to create");

                let found = db.get_meal(meal.id).expect("Query failed").expect("Meal missing");
                assert_eq!(found.image_url.as_deref(), Some("https://img.example/steak.png"));
                assert_eq!(found.prep_time, Some(30));
                assert_eq!(found.servings, Some(1));
                assert_eq!(found.calories, Some(700));
                assert_eq!(found.diet_type.as_deref(), Some("keto"));
            }
        }

        describe "get_meal" {
            it "returns None for non-existent meal" {
                let result = db.get_meal(Uuid::new_v4()).expect("Query failed");
                assert!(result.is_none());
            }

            it "returns the meal by id" {
                let created = create_meal(&db, "Soup", "1 l water", MealCategory::Lunch);
                let found = db.get_meal(created.id).expect("Query failed");
                assert_eq!(found.map(|m| m.name), Some("Soup".to_string()));
            }
        }

        describe "get_meals_by_ids" {
            it "returns an empty list for no ids" {
                create_meal(&db, "Soup", "water", MealCategory::Lunch);
                assert!(db.get_meals_by_ids(&[]).expect("Query failed").is_empty());
            }

            it "skips unknown ids and returns each meal once" {
                let soup = create_meal(&db, "Soup", "water", MealCategory::Lunch);
                let salad = create_meal(&db, "Salad", "lettuce", MealCategory::Lunch);
                create_meal(&db, "Stew", "beef", MealCategory::Dinner);

                let meals = db
                    .get_meals_by_ids(&[salad.id, Uuid::new_v4(), soup.id, salad.id])
                    .expect("Query failed");

                let names: Vec<_> = meals.iter().map(|m| m.name.as_str()).collect();
                assert_eq!(names, vec!["Soup", "Salad"]);
            }
        }

        describe "list_meals" {
            it "returns meals in creation order" {
                create_meal(&db, "Zucchini Bake", "zucchini", MealCategory::Dinner);
                create_meal(&db, "Apple Pie", "apples", MealCategory::Snack);

                let meals = db.list_meals(&MealFilter::default()).expect("Query failed");
                assert_eq!(meals.len(), 2);
                assert_eq!(meals[0].name, "Zucchini Bake");
                assert_eq!(meals[1].name, "Apple Pie");
            }

            it "filters by category and name search" {
                create_meal(&db, "Veggie Omelette", "eggs", MealCategory::Breakfast);
                create_meal(&db, "Veggie Wrap", "tortilla", MealCategory::Lunch);
                create_meal(&db, "Porridge", "oats", MealCategory::Breakfast);

                let meals = db.list_meals(&MealFilter {
                    category: Some(MealCategory::Breakfast),
                    search: Some("veggie".to_string()),
                    ..Default::default()
                }).expect("Query failed");

                assert_eq!(meals.len(), 1);
                assert_eq!(meals[0].name, "Veggie Omelette");
            }

            it "applies skip and limit after filtering" {
                for i in 0..5 {
                    create_meal(&db, &format!("Meal {i}"), "rice", MealCategory::Dinner);
                }

                let meals = db.list_meals(&MealFilter {
                    skip: Some(1),
                    limit: Some(2),
                    ..Default::default()
                }).expect("Query failed");

                let names: Vec<_> = meals.iter().map(|m| m.name.as_str()).collect();
                assert_eq!(names, vec!["Meal 1", "Meal 2"]);
            }

            it "excludes meals containing an excluded ingredient" {
                create_meal(&db, "Peanut Noodles", "noodles, peanut butter", MealCategory::Dinner);
                create_meal(&db, "Plain Noodles", "noodles", MealCategory::Dinner);

                let meals = db.list_meals(&MealFilter {
                    exclude_ingredients: Some("Peanut".to_string()),
                    ..Default::default()
                }).expect("Query failed");

                assert_eq!(meals.len(), 1);
                assert_eq!(meals[0].name, "Plain Noodles");
            }
        }

        describe "update_meal" {
            it "returns None for non-existent meal" {
                let result = db.update_meal(Uuid::new_v4(), UpdateMealInput::default())
                    .expect("Query failed");
                assert!(result.is_none());
            }

            it "updates only the provided fields" {
                let meal = create_meal(&db, "Soup", "water", MealCategory::Lunch);

                let updated = db.update_meal(meal.id, UpdateMealInput {
                    ingredients: Some("1 l water, 2 carrots".to_string()),
                    category: Some(MealCategory::Dinner),
                    ..Default::default()
                }).expect("Update failed").expect("Meal missing");

                assert_eq!(updated.name, "Soup");
                assert_eq!(updated.ingredients, "1 l water, 2 carrots");
                assert_eq!(updated.category, MealCategory::Dinner);
                assert_eq!(updated.created_at, meal.created_at);

                let stored = db.get_meal(meal.id).expect("Query failed").expect("Meal missing");
                assert_eq!(stored.category, MealCategory::Dinner);
                assert_eq!(stored.prep_time, Some(15));
            }
        }

        describe "delete_meal" {
            it "returns false for non-existent meal" {
                assert!(!db.delete_meal(Uuid::new_v4()).expect("Delete failed"));
            }

            it "removes the meal" {
                let meal = create_meal(&db, "Soup", "water", MealCategory::Lunch);
                assert!(db.delete_meal(meal.id).expect("Delete failed"));
                assert!(db.get_meal(meal.id).expect("Query failed").is_none());
            }
        }
    }

    describe "meal_store" {
        it "exposes every stored meal through all_meals" {
            for i in 0..120 {
                create_meal(&db, &format!("Meal {i}"), "rice", MealCategory::Dinner);
            }

            let store: &dyn MealStore = &db;
            assert_eq!(store.all_meals().expect("Query failed").len(), 120);
            assert_eq!(store.list_filtered(&MealFilter::default()).expect("Query failed").len(), 100);
        }
    }

    describe "persistence" {
        it "keeps meals across reopening the database file" {
            let dir = tempfile::tempdir().expect("Failed to create temp dir");
            let path = dir.path().join("nested").join("meals.db");

            let first = Database::open(path.clone()).expect("Failed to open");
            first.migrate().expect("Failed to migrate");
            let meal = create_meal(&first, "Soup", "water", MealCategory::Lunch);
            drop(first);

            let second = Database::open(path).expect("Failed to reopen");
            second.migrate().expect("Failed to migrate");
            let found = second.get_meal(meal.id).expect("Query failed");
            assert_eq!(found.map(|m| m.name), Some("Soup".to_string()));
        }
    }
}
