use std::{fs, path::Path};

use cookbook_core::{
    params::{
        CreateCategory, DeleteCategory, ExportBackup, Id, ImportBackup, ListCategories,
        ListRecipes, RenameCategory, ReorderCategories, SearchRecipes, SetFavorite,
        StartCooking, UpdateRecipe,
    },
    parse::{parse_ingredients, parse_steps},
    BackupDocument, CookbookError, IngredientInput, RecipeInput, StepInput,
};

mod common;
use common::{create_test_cookbook, open_cookbook};

#[tokio::test]
async fn test_complete_recipe_workflow() {
    let (_temp_dir, cookbook) = create_test_cookbook().await;

    let breakfast = cookbook
        .create_category(&CreateCategory {
            name: "Breakfast".to_string(),
        })
        .await
        .expect("Failed to create category");

    let created = cookbook
        .create_recipe(&RecipeInput {
            name: "  Porridge ".to_string(),
            category_id: breakfast.id,
            ingredients: parse_ingredients("oats 50g\nmilk: 250 ml, salt"),
            steps: parse_steps("1. Simmer oats in milk\n2. Season"),
            ..Default::default()
        })
        .await
        .expect("Failed to create recipe");

    assert_eq!(created.recipe.name, "Porridge");
    assert_eq!(created.ingredients.len(), 3);
    assert_eq!(created.ingredients[2].amount, "to taste");
    assert_eq!(created.steps[1].description, "Season");

    // Viewing counts, plain reads do not
    let id = Id {
        id: created.recipe.id,
    };
    cookbook.view_recipe(&id).await.unwrap();
    let viewed = cookbook.view_recipe(&id).await.unwrap();
    assert_eq!(viewed.recipe.view_count, 2);
    let read = cookbook.get_recipe(&id).await.unwrap().unwrap();
    assert_eq!(read.recipe.view_count, 2);

    let updated = cookbook
        .update_recipe(&UpdateRecipe {
            id: created.recipe.id,
            recipe: RecipeInput {
                name: "Porridge".to_string(),
                category_id: breakfast.id,
                ingredients: vec![IngredientInput::new("oats", "60g")],
                steps: vec![StepInput::new("Cook")],
                ..Default::default()
            },
        })
        .await
        .expect("Failed to update recipe");
    assert_eq!(updated.ingredients.len(), 1);
    assert_eq!(updated.recipe.view_count, 2);

    let favorite = cookbook
        .set_favorite(&SetFavorite {
            id: created.recipe.id,
            favorite: true,
        })
        .await
        .unwrap();
    assert!(favorite.is_favorite);
    assert_eq!(cookbook.list_favorites().await.unwrap().len(), 1);

    let listed = cookbook
        .list_recipes(&ListRecipes {
            category_id: Some(breakfast.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].category_name, "Breakfast");
}

#[tokio::test]
async fn test_category_management() {
    let (_temp_dir, cookbook) = create_test_cookbook().await;

    let mut ids = Vec::new();
    for name in ["Soups", "Mains", "Desserts"] {
        let category = cookbook
            .create_category(&CreateCategory {
                name: name.to_string(),
            })
            .await
            .unwrap();
        ids.push(category.id);
    }

    let renamed = cookbook
        .rename_category(&RenameCategory {
            id: ids[1],
            name: "Main courses".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(renamed.name, "Main courses");

    let ordered = cookbook
        .reorder_categories(&ReorderCategories {
            ids: vec![ids[2], ids[0]],
        })
        .await
        .unwrap();
    let names: Vec<&str> = ordered.iter().map(|c| c.category.name.as_str()).collect();
    assert_eq!(names, ["Desserts", "Soups", "Main courses"]);

    let listed = cookbook
        .list_categories(&ListCategories::default())
        .await
        .unwrap();
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0].category.name, "Desserts");

    let err = cookbook
        .create_category(&CreateCategory {
            name: "Soups".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CookbookError::DuplicateCategory { .. }));
}

#[tokio::test]
async fn test_search_requires_keyword() {
    let (_temp_dir, cookbook) = create_test_cookbook().await;
    let err = cookbook
        .search_recipes(&SearchRecipes {
            keyword: "  ".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CookbookError::InvalidInput { ref field, .. } if field == "keyword"));
}

#[tokio::test]
async fn test_view_missing_recipe() {
    let (_temp_dir, cookbook) = create_test_cookbook().await;
    assert!(matches!(
        cookbook.view_recipe(&Id { id: 12 }).await,
        Err(CookbookError::RecipeNotFound { id: 12 })
    ));
}

#[tokio::test]
async fn test_start_cooking() {
    let (_temp_dir, cookbook) = create_test_cookbook().await;
    let category = cookbook
        .create_category(&CreateCategory {
            name: "Mains".to_string(),
        })
        .await
        .unwrap();
    let recipe = cookbook
        .create_recipe(&RecipeInput {
            name: "Omelette".to_string(),
            category_id: category.id,
            steps: parse_steps("Beat eggs\nCook\nFold"),
            ..Default::default()
        })
        .await
        .unwrap();

    let session = cookbook
        .start_cooking(&StartCooking {
            id: recipe.recipe.id,
            completed_steps: vec![1, 2],
        })
        .await
        .unwrap();
    assert_eq!(session.progress(), (2, 3));
    assert_eq!(session.next_step().unwrap().description, "Fold");

    assert!(cookbook
        .start_cooking(&StartCooking {
            id: recipe.recipe.id,
            completed_steps: vec![4],
        })
        .await
        .is_err());
}

#[tokio::test]
async fn test_backup_round_trip_into_empty_store() {
    let (temp_dir, source) = create_test_cookbook().await;

    let soups = source
        .create_category(&CreateCategory {
            name: "Soups".to_string(),
        })
        .await
        .unwrap();
    let desserts = source
        .create_category(&CreateCategory {
            name: "Desserts".to_string(),
        })
        .await
        .unwrap();
    for (name, category_id) in [("Minestrone", soups.id), ("Tiramisu", desserts.id)] {
        source
            .create_recipe(&RecipeInput {
                name: name.to_string(),
                category_id,
                is_favorite: name == "Tiramisu",
                ingredients: vec![IngredientInput::new("Love", "plenty")],
                steps: vec![StepInput::new("Prepare"), StepInput::new("Serve")],
                ..Default::default()
            })
            .await
            .unwrap();
    }

    let backup_path = temp_dir.path().join("backup.json");
    let summary = source
        .export_backup(&ExportBackup {
            path: backup_path.clone(),
            embed_images: false,
        })
        .await
        .expect("Failed to export");
    assert_eq!(summary.categories, 2);
    assert_eq!(summary.recipes, 2);

    let target = open_cookbook(&temp_dir, "target").await;
    let report = target
        .import_backup(&ImportBackup {
            path: backup_path.clone(),
        })
        .await
        .expect("Failed to import");
    assert_eq!(report.categories_created, 2);
    assert_eq!(report.recipes_created, 2);

    let mut imported = target.list_recipes(&ListRecipes::default()).await.unwrap();
    imported.sort_by(|a, b| a.recipe.name.cmp(&b.recipe.name));
    assert_eq!(imported[0].recipe.name, "Minestrone");
    assert_eq!(imported[0].category_name, "Soups");
    assert!(imported[1].recipe.is_favorite);

    let details = target
        .get_recipe(&Id {
            id: imported[1].recipe.id,
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(details.steps.len(), 2);
    assert_eq!(details.steps[1].step_number, 2);

    // Importing the same file again changes nothing
    let again = target
        .import_backup(&ImportBackup { path: backup_path })
        .await
        .unwrap();
    assert_eq!(again.categories_unchanged, 2);
    assert_eq!(again.recipes_unchanged, 2);
    assert_eq!(target.list_recipes(&ListRecipes::default()).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_embedded_images_restored_into_image_dir() {
    let (temp_dir, source) = create_test_cookbook().await;
    let cover = temp_dir.path().join("cover.png");
    fs::write(&cover, b"\x89PNG cover").unwrap();

    let category = source
        .create_category(&CreateCategory {
            name: "Photos".to_string(),
        })
        .await
        .unwrap();
    source
        .create_recipe(&RecipeInput {
            name: "Pretty cake".to_string(),
            category_id: category.id,
            cover_image: Some(cover.to_string_lossy().into_owned()),
            ..Default::default()
        })
        .await
        .unwrap();

    let backup_path = temp_dir.path().join("embedded.json");
    let summary = source
        .export_backup(&ExportBackup {
            path: backup_path.clone(),
            embed_images: true,
        })
        .await
        .unwrap();
    assert_eq!(summary.images_embedded, 1);

    let json = fs::read_to_string(&backup_path).unwrap();
    let document: BackupDocument = serde_json::from_str(&json).unwrap();
    assert!(document.recipes[0]
        .cover_image_base64
        .as_deref()
        .unwrap()
        .starts_with("data:image/png;base64,"));

    let target = open_cookbook(&temp_dir, "target").await;
    let report = target
        .import_backup(&ImportBackup { path: backup_path })
        .await
        .unwrap();
    assert_eq!(report.images_restored, 1);

    let listed = target.list_recipes(&ListRecipes::default()).await.unwrap();
    let restored = listed[0].recipe.cover_image_path.clone().unwrap();
    assert!(Path::new(&restored).starts_with(target.image_dir()));
    assert!(restored.ends_with(".png"));
    assert_eq!(fs::read(&restored).unwrap(), b"\x89PNG cover");
}

#[tokio::test]
async fn test_import_rejects_newer_version() {
    let (temp_dir, cookbook) = create_test_cookbook().await;
    let path = temp_dir.path().join("future.json");
    fs::write(&path, r#"{"version": 3, "categories": []}"#).unwrap();

    let err = cookbook
        .import_backup(&ImportBackup { path })
        .await
        .unwrap_err();
    assert!(matches!(err, CookbookError::InvalidInput { ref field, .. } if field == "version"));
}

#[tokio::test]
async fn test_import_missing_file() {
    let (temp_dir, cookbook) = create_test_cookbook().await;
    let err = cookbook
        .import_backup(&ImportBackup {
            path: temp_dir.path().join("nope.json"),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CookbookError::FileSystem { .. }));
}

#[tokio::test]
async fn test_delete_category_cascades_through_facade() {
    let (_temp_dir, cookbook) = create_test_cookbook().await;
    let category = cookbook
        .create_category(&CreateCategory {
            name: "Temporary".to_string(),
        })
        .await
        .unwrap();
    let recipe = cookbook
        .create_recipe(&RecipeInput {
            name: "Short-lived".to_string(),
            category_id: category.id,
            ..Default::default()
        })
        .await
        .unwrap();

    cookbook
        .delete_category(&DeleteCategory {
            id: category.id,
            confirmed: true,
        })
        .await
        .unwrap();

    assert!(cookbook
        .get_recipe(&Id {
            id: recipe.recipe.id
        })
        .await
        .unwrap()
        .is_none());
}
