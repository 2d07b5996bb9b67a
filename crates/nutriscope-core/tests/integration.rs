//! Integration tests for nutriscope-core.
//!
//! These tests run the full pipeline:
//! CSV file → load → prepare → views.

use std::io::Write;

use nutriscope_core::{
    Category, LoadError, MAX_SIDEBAR_RECIPES, Nutrient, NutrientSelection, health_rating_view,
    heatmap_view, load_prepared, nutrient_impact_view, nutrient_profile_view, overview_view,
    popularity_view,
};
use tempfile::NamedTempFile;

const DATASET: &str = "\
name, calories, protein, fat, sugar, carbs, minutes, n_steps, rating, Diet_Type
Lentil Soup,150,20,1,2,30,35,6,4.5,Vegan
Chocolate Cake,500,5,20,30,60,75,12,3.8,Vegetarian
Fruit Cup,150,5,5,10,25,10,2,4.1,Vegan
Steak Salad,420,40,15,4,,25,5,4.7,Paleo
Mystery Stew,,10,5,2,15,120,9,3.0,Keto
Butter Bomb,100,0,0,30,0,5,1,2.0,Keto
Bulk Feast,2400,90,80,40,200,180,20,4.0,Paleo
Lentil Soup,160,21,1,2,31,40,6,4.4,Vegan
Egg Bites,190,18,3,1,2,20,4,4.8,Keto
";

fn dataset_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write dataset");
    file
}

#[test]
fn pipeline_filters_and_classifies() {
    let file = dataset_file(DATASET);
    let table = load_prepared(file.path()).expect("load dataset");
    let report = table.report();

    assert_eq!(report.rows_read, 9);
    // Mystery Stew has no calories.
    assert_eq!(report.dropped_incomplete, 1);
    // Butter Bomb scores -15 at 100 kcal and is kept; Bulk Feast exceeds 2000 kcal.
    assert_eq!(report.dropped_out_of_range, 1);
    assert_eq!(report.retained, 7);

    for row in table.recipes() {
        assert!(row.recipe.calories < 2000.0);
        assert!(row.health_score > -100.0 && row.health_score < 100.0);
    }

    let counts = table.category_counts();
    let healthy = counts.iter().find(|(c, _)| *c == Category::Healthy).map(|(_, n)| *n);
    // Lentil Soup twice and Egg Bites.
    assert_eq!(healthy, Some(3));
}

#[test]
fn sidebar_resolves_clicks() {
    let file = dataset_file(DATASET);
    let table = load_prepared(file.path()).unwrap();

    let names = table.sidebar_names();
    assert!(names.len() <= MAX_SIDEBAR_RECIPES);
    assert_eq!(names[0], "Lentil Soup");
    assert_eq!(names.iter().filter(|n| *n == "Lentil Soup").count(), 1);

    let chart = nutrient_profile_view(&table, Some(0));
    let note = chart.annotation.expect("annotation for first recipe");
    assert_eq!(note.x, 150.0);
    assert!(note.text.contains("Category: Healthy"));

    let miss = nutrient_profile_view(&table, Some(names.len()));
    assert!(miss.annotation.is_none());
}

#[test]
fn heatmap_views_are_consistent() {
    let file = dataset_file(DATASET);
    let table = load_prepared(file.path()).unwrap();

    let single = heatmap_view(&table, "protein".parse().unwrap());
    let again = heatmap_view(&table, NutrientSelection::Single(Nutrient::Protein));
    assert_eq!(single, again);

    let panel = &single.panels[0];
    assert_eq!(panel.chart.x, vec!["Keto", "Paleo", "Vegan", "Vegetarian"]);
    let highest = panel.stats.highest.as_ref().unwrap();
    assert_eq!(highest.value, 40.0);
    assert_eq!(highest.column, "Paleo");
    assert_eq!(panel.stats.correlations.len(), 4);

    let all = heatmap_view(&table, NutrientSelection::All);
    assert_eq!(all.panels.len(), 5);
    assert_eq!(all.columns, 3);
}

#[test]
fn secondary_views_render() {
    let file = dataset_file(DATASET);
    let table = load_prepared(file.path()).unwrap();

    let popularity = popularity_view(&table);
    assert_eq!(popularity.by_minutes.point_count(), table.len());
    assert!(popularity.by_minutes.trend().is_some());

    let impact = nutrient_impact_view(&table);
    assert_eq!(impact.len(), 5);
    assert_eq!(impact[0].total(), table.len());
    // Steak Salad has no carbs value, so it has no carbs tier.
    assert_eq!(impact[1].total(), table.len() - 1);

    let health = health_rating_view(&table);
    assert_eq!(health.total(), table.len());

    let overview = overview_view(&table);
    assert_eq!(overview.rating_by_protein.categories.len(), 3);
    assert!(!overview.protein_by_diet_and_category.is_empty());

    let json = serde_json::to_value(&overview).unwrap();
    assert_eq!(json["title"], "Recipe Analysis Dashboard");
}

#[test]
fn missing_file_is_reported() {
    let err = load_prepared("/definitely/not/here.csv").unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("here.csv"));
}

#[test]
fn missing_column_is_reported() {
    let file = dataset_file("name,calories,protein,fat,sugar,carbs,minutes,n_steps,rating\n");
    let err = load_prepared(file.path()).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn("Diet_Type")));
}
