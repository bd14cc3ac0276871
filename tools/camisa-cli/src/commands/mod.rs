//! CLI command implementations.

pub mod cart;
pub mod config;
pub mod counts;
pub mod list;
pub mod show;

use camisa_commerce::controller::CatalogController;
use camisa_commerce::search::SortMode;
use camisa_store::ProductRepository;
use clap::{Args, Subcommand};

/// Filters shared by the listing commands.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Size to include (repeatable; any match counts).
    #[arg(short, long = "size")]
    pub sizes: Vec<String>,

    /// Subcategory name.
    #[arg(long)]
    pub subcategory: Option<String>,

    /// Text matched against name, description and colors.
    #[arg(long)]
    pub search: Option<String>,

    /// Sort mode: name-asc, newness, offers or none.
    #[arg(long, default_value = "none")]
    pub sort: String,
}

impl FilterArgs {
    /// Push these filters into the controller's shared filter state.
    pub fn apply<R: ProductRepository + ?Sized>(&self, catalog: &mut CatalogController<R>) {
        catalog.clear_filters();
        for size in &self.sizes {
            catalog.toggle_size(size);
        }
        if let Some(name) = &self.subcategory {
            catalog.select_subcategory(name);
        }
        if let Some(term) = &self.search {
            catalog.set_search_term(term.as_str());
        }
        catalog.set_sort(SortMode::parse(&self.sort));
    }
}

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Category: replicas, estampadas/printed or bordadas/embroidered.
    pub category: String,

    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Arguments for the counts command.
#[derive(Args)]
pub struct CountsArgs {
    /// Category: replicas, estampadas/printed or bordadas/embroidered.
    pub category: String,

    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Product id.
    pub id: String,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    /// Line item as id:size:color[:quantity] (repeatable).
    #[arg(short, long = "item", required = true)]
    pub items: Vec<String>,

    /// Override the WhatsApp number from the config.
    #[arg(long)]
    pub phone: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
