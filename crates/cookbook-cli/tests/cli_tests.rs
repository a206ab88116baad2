use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A throwaway cookbook directory plus the database argument pointing into it
struct TestEnv {
    dir: TempDir,
    db_arg: String,
}

impl TestEnv {
    fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temporary directory");
        let db_arg = dir
            .path()
            .join("cookbook.db")
            .to_str()
            .expect("Non UTF-8 temp path")
            .to_string();
        Self { dir, db_arg }
    }

    /// A `cookbook` command with --no-color and this environment's database
    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("cookbook").expect("Failed to find cookbook binary");
        cmd.args(["--no-color", "--database-file", &self.db_arg]);
        cmd
    }

    fn run(&self, args: &[&str]) -> String {
        let output = self
            .cmd()
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        String::from_utf8(output).expect("Invalid UTF-8")
    }

    fn add_category(&self, name: &str) -> String {
        extract_id_from_output(&self.run(&["category", "add", name]))
    }
}

#[test]
fn test_cli_no_command_lists_categories() {
    let env = TestEnv::new();

    env.cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("# Categories"))
        .stdout(predicate::str::contains("No categories yet."));

    env.add_category("Breakfast");
    env.cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("**Breakfast**"))
        .stdout(predicate::str::contains("0 recipes"));
}

#[test]
fn test_cli_add_category() {
    let env = TestEnv::new();

    env.cmd()
        .args(["category", "add", "Soups"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created category with ID: 1"))
        .stdout(predicate::str::contains("# 1. Soups"));
}

#[test]
fn test_cli_duplicate_category_fails() {
    let env = TestEnv::new();
    env.add_category("Soups");

    env.cmd()
        .args(["category", "add", "Soups"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_cli_rename_and_reorder_categories() {
    let env = TestEnv::new();
    let soups = env.add_category("Soups");
    let mains = env.add_category("Mains");
    let desserts = env.add_category("Desserts");

    env.cmd()
        .args(["category", "rename", &mains, "Main courses"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed from 'Mains'"));

    let output = env.run(&["category", "reorder", &desserts, &soups]);
    let desserts_at = output.find("Desserts").unwrap();
    let soups_at = output.find("Soups").unwrap();
    let mains_at = output.find("Main courses").unwrap();
    assert!(desserts_at < soups_at && soups_at < mains_at);
}

#[test]
fn test_cli_add_and_show_recipe() {
    let env = TestEnv::new();
    let category = env.add_category("Breakfast");

    let output = env.run(&[
        "recipe",
        "add",
        "Pancakes",
        "--category",
        &category,
        "--ingredient",
        "flour 200g",
        "--ingredient",
        "milk: 300 ml",
        "--steps-text",
        "1. Whisk everything\n2. Fry in butter",
    ]);
    assert!(output.contains("Created recipe with ID: 1"));
    assert!(output.contains("- flour 200g"));
    assert!(output.contains("- milk 300 ml"));

    env.cmd()
        .args(["recipe", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# 1. Pancakes"))
        .stdout(predicate::str::contains("1. Whisk everything"))
        .stdout(predicate::str::contains("2. Fry in butter"))
        .stdout(predicate::str::contains("- Views: 1"));
}

#[test]
fn test_cli_recipe_requires_existing_category() {
    let env = TestEnv::new();

    env.cmd()
        .args(["recipe", "add", "Orphan", "--category", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Category with ID 42 not found"));
}

#[test]
fn test_cli_show_missing_recipe() {
    let env = TestEnv::new();

    env.cmd()
        .args(["recipe", "show", "99999"])
        .assert()
        .failure();
}

#[test]
fn test_cli_list_and_search_recipes() {
    let env = TestEnv::new();
    let category = env.add_category("Mains");
    env.run(&[
        "recipe", "add", "Carbonara", "-c", &category, "-i", "spaghetti 200g", "-i", "egg 2",
    ]);
    env.run(&["recipe", "add", "Omelette", "-c", &category, "-i", "egg 3"]);
    env.run(&["recipe", "add", "Risotto", "-c", &category, "-i", "rice 150g"]);

    env.cmd()
        .args(["recipe", "list", "--sort", "name"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Carbonara"))
        .stdout(predicate::str::contains("## Risotto"));

    let output = env.run(&["recipe", "search", "egg"]);
    assert!(output.contains("Carbonara"));
    assert!(output.contains("Omelette"));
    assert!(!output.contains("Risotto"));

    env.cmd()
        .args(["recipe", "search", "truffle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No recipes found."));
}

#[test]
fn test_cli_favorites() {
    let env = TestEnv::new();
    let category = env.add_category("Desserts");
    env.run(&["recipe", "add", "Tiramisu", "-c", &category]);
    env.run(&["recipe", "add", "Flan", "-c", &category]);

    env.cmd()
        .args(["recipe", "favorite", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 'Tiramisu' to favorites"));

    let output = env.run(&["recipe", "list", "--favorites"]);
    assert!(output.contains("# Favorite recipes"));
    assert!(output.contains("Tiramisu"));
    assert!(!output.contains("Flan"));

    env.run(&["recipe", "unfavorite", "1"]);
    env.cmd()
        .args(["recipe", "list", "--favorites"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No recipes found."));
}

#[test]
fn test_cli_edit_recipe_replaces_steps_only() {
    let env = TestEnv::new();
    let category = env.add_category("Bakery");
    env.run(&[
        "recipe", "add", "Bread", "-c", &category, "-i", "flour 500g", "-s", "Knead", "-s",
        "Bake",
    ]);

    let output = env.run(&[
        "recipe",
        "edit",
        "1",
        "--name",
        "Sourdough",
        "--step",
        "Feed the starter",
    ]);
    assert!(output.contains("Updated recipe with ID: 1"));
    assert!(output.contains("Renamed from 'Bread'"));
    assert!(output.contains("Steps replaced (1)"));
    assert!(output.contains("- flour 500g"));
    assert!(output.contains("1. Feed the starter"));
    assert!(!output.contains("Knead"));
}

#[test]
fn test_cli_edit_without_changes_fails() {
    let env = TestEnv::new();
    let category = env.add_category("Bakery");
    env.run(&["recipe", "add", "Bread", "-c", &category]);

    env.cmd()
        .args(["recipe", "edit", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to change"));
}

#[test]
fn test_cli_cover_image_is_copied() {
    let env = TestEnv::new();
    let category = env.add_category("Photos");
    let cover = env.dir.path().join("cake.jpg");
    fs::write(&cover, b"jpeg bytes").unwrap();

    let output = env.run(&[
        "recipe",
        "add",
        "Cake",
        "-c",
        &category,
        "--cover",
        cover.to_str().unwrap(),
    ]);
    assert!(output.contains("- Cover: "));

    let images: Vec<_> = fs::read_dir(env.dir.path().join("images"))
        .unwrap()
        .collect();
    assert_eq!(images.len(), 1);
}

#[test]
fn test_cli_delete_requires_confirm() {
    let env = TestEnv::new();
    let category = env.add_category("Temporary");
    env.run(&["recipe", "add", "Toast", "-c", &category]);

    env.cmd()
        .args(["category", "delete", &category])
        .assert()
        .success()
        .stdout(predicate::str::contains("--confirm"));
    assert!(env.run(&["recipe", "list"]).contains("Toast"));

    env.cmd()
        .args(["category", "delete", &category, "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted category 'Temporary'"));
    assert!(env.run(&["recipe", "list"]).contains("No recipes found."));
}

#[test]
fn test_cli_delete_many_recipes() {
    let env = TestEnv::new();
    let category = env.add_category("Salads");
    for name in ["Caesar", "Greek", "Waldorf"] {
        env.run(&["recipe", "add", name, "-c", &category]);
    }

    env.cmd()
        .args(["recipe", "delete-many", "1", "3", "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 2 recipes:"));

    let output = env.run(&["recipe", "list"]);
    assert!(output.contains("Greek"));
    assert!(!output.contains("Caesar"));
}

#[test]
fn test_cli_cook_progress() {
    let env = TestEnv::new();
    let category = env.add_category("Mains");
    env.run(&[
        "recipe",
        "add",
        "Omelette",
        "-c",
        &category,
        "--steps-text",
        "Beat eggs\nCook\nFold",
    ]);

    env.cmd()
        .args(["cook", "1", "--done", "1,2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress: 2/3 steps"))
        .stdout(predicate::str::contains("- [x] 1. Beat eggs"))
        .stdout(predicate::str::contains("Next: step 3"));

    env.cmd()
        .args(["cook", "1", "--done", "7"])
        .assert()
        .failure();
}

#[test]
fn test_cli_backup_round_trip() {
    let source = TestEnv::new();
    let category = source.add_category("Soups");
    source.run(&[
        "recipe",
        "add",
        "Minestrone",
        "-c",
        &category,
        "-i",
        "beans 200g",
        "-s",
        "Simmer",
    ]);

    let backup = source.dir.path().join("backup.json");
    let backup_arg = backup.to_str().unwrap();
    source
        .cmd()
        .args(["backup", "export", backup_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Recipes: 1"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&backup).unwrap()).unwrap();
    assert_eq!(json["version"], 1);
    assert_eq!(json["recipes"][0]["name"], "Minestrone");

    let target = TestEnv::new();
    target
        .cmd()
        .args(["backup", "import", backup_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Recipes: 1 created"));
    target
        .cmd()
        .args(["recipe", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- beans 200g"));
}

#[test]
fn test_cli_import_invalid_file_fails() {
    let env = TestEnv::new();
    let bad = env.dir.path().join("bad.json");
    fs::write(&bad, "not json").unwrap();

    env.cmd()
        .args(["backup", "import", bad.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to import backup"));
}

#[test]
fn test_cli_images_cleanup() {
    let env = TestEnv::new();
    let images = env.dir.path().join("images");
    fs::create_dir_all(&images).unwrap();
    fs::write(images.join("stray.jpg"), b"unused").unwrap();

    env.cmd()
        .args(["images", "cleanup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 1 unused image"));
}

#[test]
fn test_cli_help_output() {
    Command::cargo_bin("cookbook")
        .unwrap()
        .args(["--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("category"))
        .stdout(predicate::str::contains("recipe"))
        .stdout(predicate::str::contains("backup"));
}

#[test]
fn test_cli_version_output() {
    Command::cargo_bin("cookbook")
        .unwrap()
        .args(["--version"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("cookbook "));
}

/// Extract the ID from a "Created ... with ID: <n>" line
fn extract_id_from_output(output: &str) -> String {
    if let Some(start) = output.find("ID: ") {
        let id_str = &output[start + 4..];
        let end = id_str
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(id_str.len());
        return id_str[..end].to_string();
    }
    panic!("Could not extract ID from output: {output}");
}
