use clap::{Args, Parser, Subcommand};

pub const DEFAULT_SERVER: &str = "http://localhost:5100";

#[derive(Parser, Debug)]
#[command(
    name = "recipebook",
    about = "Terminal client for the RecipeBook catalog server",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the RecipeBook server.
    #[arg(long, global = true, env = "RECIPEBOOK_SERVER", default_value = DEFAULT_SERVER)]
    pub server: String,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage recipe categories
    #[command(subcommand)]
    Categories(CategoryCommand),
    /// Manage recipes
    #[command(subcommand)]
    Recipes(RecipeCommand),
}

/// `<TARGET>` arguments accept a UUID or an exact record name.
#[derive(Subcommand, Debug)]
pub enum CategoryCommand {
    /// List all categories
    List,
    /// Show one category
    Get { target: String },
    /// Create a category
    Create { name: String },
    /// Rename a category
    Update { target: String, name: String },
    /// Delete a category and detach it from every recipe
    Delete { target: String },
}

#[derive(Subcommand, Debug)]
pub enum RecipeCommand {
    /// List all recipes
    List,
    /// Show one recipe
    Get { target: String },
    /// Create a recipe
    Create(RecipeCreateArgs),
    /// Change fields of a recipe; omitted fields keep their current value
    Update(RecipeUpdateArgs),
    /// Delete a recipe
    Delete { target: String },
}

#[derive(Args, Debug)]
pub struct RecipeCreateArgs {
    pub name: String,
    #[arg(short = 'i', long = "ingredient")]
    pub ingredients: Vec<String>,
    #[arg(short = 's', long = "instruction")]
    pub instructions: Vec<String>,
    /// Category UUID or name; repeatable
    #[arg(short = 'c', long = "category")]
    pub categories: Vec<String>,
}

#[derive(Args, Debug)]
pub struct RecipeUpdateArgs {
    pub target: String,
    #[arg(long)]
    pub name: Option<String>,
    /// Replaces the whole ingredient list when given
    #[arg(short = 'i', long = "ingredient")]
    pub ingredients: Vec<String>,
    /// Replaces the whole instruction list when given
    #[arg(short = 's', long = "instruction")]
    pub instructions: Vec<String>,
    /// Replaces the whole category list when given
    #[arg(short = 'c', long = "category", conflicts_with = "clear_categories")]
    pub categories: Vec<String>,
    #[arg(long)]
    pub clear_categories: bool,
}
