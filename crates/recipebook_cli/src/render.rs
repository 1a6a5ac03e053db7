//! Terminal rendering for catalog records.

use colored::Colorize;
use recipebook_core::{Category, CategoryId, Recipe};
use serde::Serialize;
use std::collections::HashMap;

pub fn json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn category_line(category: &Category) -> String {
    format!("{}  {}", category.id.to_string().dimmed(), category.name.bold())
}

pub fn category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories.".dimmed().to_string();
    }
    categories
        .iter()
        .map(category_line)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn recipe_line(recipe: &Recipe, names: &HashMap<CategoryId, String>) -> String {
    let categories = category_names(recipe, names);
    if categories.is_empty() {
        format!("{}  {}", recipe.id.to_string().dimmed(), recipe.name.bold())
    } else {
        format!(
            "{}  {} [{}]",
            recipe.id.to_string().dimmed(),
            recipe.name.bold(),
            categories.join(", ").cyan()
        )
    }
}

pub fn recipe_list(recipes: &[Recipe], names: &HashMap<CategoryId, String>) -> String {
    if recipes.is_empty() {
        return "No recipes.".dimmed().to_string();
    }
    recipes
        .iter()
        .map(|recipe| recipe_line(recipe, names))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full recipe card with numbered steps.
pub fn recipe_detail(recipe: &Recipe, names: &HashMap<CategoryId, String>) -> String {
    let mut out = vec![
        recipe.name.bold().to_string(),
        format!("{} {}", "id:".dimmed(), recipe.id),
    ];

    let categories = category_names(recipe, names);
    if !categories.is_empty() {
        out.push(format!("{} {}", "categories:".dimmed(), categories.join(", ").cyan()));
    }

    out.push(String::new());
    out.push("Ingredients".underline().to_string());
    push_numbered(&mut out, &recipe.ingredients);

    out.push(String::new());
    out.push("Instructions".underline().to_string());
    push_numbered(&mut out, &recipe.instructions);

    out.join("\n")
}

pub fn category_names_by_id(categories: &[Category]) -> HashMap<CategoryId, String> {
    categories
        .iter()
        .map(|category| (category.id, category.name.clone()))
        .collect()
}

fn push_numbered(out: &mut Vec<String>, entries: &[String]) {
    if entries.is_empty() {
        out.push(format!("  {}", "(none)".dimmed()));
        return;
    }
    for (index, entry) in entries.iter().enumerate() {
        out.push(format!("  {}. {}", index + 1, entry));
    }
}

// Unknown ids fall back to the raw uuid.
fn category_names(recipe: &Recipe, names: &HashMap<CategoryId, String>) -> Vec<String> {
    recipe
        .category_ids
        .iter()
        .map(|id| names.get(id).cloned().unwrap_or_else(|| id.to_string()))
        .collect()
}
