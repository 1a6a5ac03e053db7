use crate::cli::{
    CategoryCommand, Cli, Command, OutputFormat, RecipeCommand, RecipeCreateArgs,
    RecipeUpdateArgs,
};
use crate::client::CatalogClient;
use crate::render;
use anyhow::{bail, Result};
use colored::Colorize;
use recipebook_core::{
    normalize_name, Category, CategoryDraft, CategoryId, EntityId, Recipe, RecipeDraft,
};
use uuid::Uuid;

/// Execute a CLI command.
pub fn run_command(cli: Cli) -> Result<()> {
    let client = CatalogClient::new(&cli.server)?;
    match cli.command {
        Command::Categories(command) => run_category_command(&client, command, cli.format),
        Command::Recipes(command) => run_recipe_command(&client, command, cli.format),
    }
}

fn run_category_command(
    client: &CatalogClient,
    command: CategoryCommand,
    format: OutputFormat,
) -> Result<()> {
    match command {
        CategoryCommand::List => {
            let categories = client.list_categories()?;
            match format {
                OutputFormat::Json => println!("{}", render::json(&categories)?),
                OutputFormat::Text => println!("{}", render::category_list(&categories)),
            }
        }
        CategoryCommand::Get { target } => {
            let id = resolve_category(client, &target)?;
            print_category(&client.get_category(id)?, format)?;
        }
        CategoryCommand::Create { name } => {
            let created = client.create_category(&CategoryDraft::new(name))?;
            announce("Created category", &created.name, format);
            print_category(&created, format)?;
        }
        CategoryCommand::Update { target, name } => {
            let id = resolve_category(client, &target)?;
            let updated = client.update_category(id, &CategoryDraft::new(name))?;
            announce("Updated category", &updated.name, format);
            print_category(&updated, format)?;
        }
        CategoryCommand::Delete { target } => {
            let id = resolve_category(client, &target)?;
            let confirmation = client.delete_category(id)?;
            print_confirmation(&confirmation.message, format)?;
        }
    }
    Ok(())
}

fn run_recipe_command(
    client: &CatalogClient,
    command: RecipeCommand,
    format: OutputFormat,
) -> Result<()> {
    match command {
        RecipeCommand::List => {
            let recipes = client.list_recipes()?;
            match format {
                OutputFormat::Json => println!("{}", render::json(&recipes)?),
                OutputFormat::Text => {
                    let names = render::category_names_by_id(&client.list_categories()?);
                    println!("{}", render::recipe_list(&recipes, &names));
                }
            }
        }
        RecipeCommand::Get { target } => {
            let id = resolve_recipe(client, &target)?;
            print_recipe(client, &client.get_recipe(id)?, format)?;
        }
        RecipeCommand::Create(args) => {
            let draft = create_draft(client, args)?;
            let created = client.create_recipe(&draft)?;
            announce("Created recipe", &created.name, format);
            print_recipe(client, &created, format)?;
        }
        RecipeCommand::Update(args) => {
            let id = resolve_recipe(client, &args.target)?;
            let current = client.get_recipe(id)?;
            let draft = update_draft(client, current, args)?;
            let updated = client.update_recipe(id, &draft)?;
            announce("Updated recipe", &updated.name, format);
            print_recipe(client, &updated, format)?;
        }
        RecipeCommand::Delete { target } => {
            let id = resolve_recipe(client, &target)?;
            let confirmation = client.delete_recipe(id)?;
            print_confirmation(&confirmation.message, format)?;
        }
    }
    Ok(())
}

fn create_draft(client: &CatalogClient, args: RecipeCreateArgs) -> Result<RecipeDraft> {
    Ok(RecipeDraft {
        name: args.name,
        ingredients: args.ingredients,
        instructions: args.instructions,
        category_ids: resolve_categories(client, &args.categories)?,
    })
}

/// Merges flags over the current record; the server expects a full replacement.
fn update_draft(
    client: &CatalogClient,
    current: Recipe,
    args: RecipeUpdateArgs,
) -> Result<RecipeDraft> {
    let mut draft = RecipeDraft::from(current);
    if let Some(name) = args.name {
        draft.name = name;
    }
    if !args.ingredients.is_empty() {
        draft.ingredients = args.ingredients;
    }
    if !args.instructions.is_empty() {
        draft.instructions = args.instructions;
    }
    if args.clear_categories {
        draft.category_ids.clear();
    } else if !args.categories.is_empty() {
        draft.category_ids = resolve_categories(client, &args.categories)?;
    }
    Ok(draft)
}

fn resolve_categories(client: &CatalogClient, targets: &[String]) -> Result<Vec<CategoryId>> {
    if targets.is_empty() {
        return Ok(Vec::new());
    }
    let categories = client.list_categories()?;
    targets
        .iter()
        .map(|target| {
            find_target(
                "category",
                target,
                categories.iter().map(|c| (c.id, c.name.as_str())),
            )
        })
        .collect()
}

fn resolve_category(client: &CatalogClient, target: &str) -> Result<CategoryId> {
    if let Ok(id) = Uuid::parse_str(target) {
        return Ok(id);
    }
    let categories = client.list_categories()?;
    find_target(
        "category",
        target,
        categories.iter().map(|c| (c.id, c.name.as_str())),
    )
}

fn resolve_recipe(client: &CatalogClient, target: &str) -> Result<EntityId> {
    if let Ok(id) = Uuid::parse_str(target) {
        return Ok(id);
    }
    let recipes = client.list_recipes()?;
    find_target(
        "recipe",
        target,
        recipes.iter().map(|r| (r.id, r.name.as_str())),
    )
}

/// Resolves a UUID or a name (compared after name normalization).
pub(crate) fn find_target<'a>(
    kind: &str,
    target: &str,
    records: impl IntoIterator<Item = (EntityId, &'a str)>,
) -> Result<EntityId> {
    if let Ok(id) = Uuid::parse_str(target) {
        return Ok(id);
    }
    let wanted = normalize_name(target);
    if wanted.is_empty() {
        bail!("{kind} name must not be empty");
    }
    records
        .into_iter()
        .find(|(_, name)| normalize_name(name) == wanted)
        .map(|(id, _)| id)
        .ok_or_else(|| anyhow::anyhow!("no {kind} named '{wanted}'"))
}

fn announce(action: &str, name: &str, format: OutputFormat) {
    if format == OutputFormat::Text {
        println!("{} {} {}", "✓".green(), action, name.bold());
    }
}

fn print_category(category: &Category, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", render::json(category)?),
        OutputFormat::Text => println!("{}", render::category_line(category)),
    }
    Ok(())
}

fn print_recipe(client: &CatalogClient, recipe: &Recipe, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", render::json(recipe)?),
        OutputFormat::Text => {
            let names = if recipe.category_ids.is_empty() {
                Default::default()
            } else {
                render::category_names_by_id(&client.list_categories()?)
            };
            println!("{}", render::recipe_detail(recipe, &names));
        }
    }
    Ok(())
}

fn print_confirmation(message: &str, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", render::json(&serde_json::json!({ "message": message }))?),
        OutputFormat::Text => println!("{} {}", "✓".green(), message),
    }
    Ok(())
}
