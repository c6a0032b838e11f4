use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "thriftdesk")]
#[command(version)]
#[command(about = "Inventory, pricing, and listing assistant for resellers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Database management
    #[command(subcommand)]
    Db(DbCommands),
    /// Inventory item management
    #[command(subcommand)]
    Item(ItemCommands),
    /// Pricing analysis and market research
    #[command(subcommand)]
    Pricing(PricingCommands),
    /// Listing content generation
    #[command(subcommand)]
    Listing(ListingCommands),
    /// Photo planning
    #[command(subcommand)]
    Photo(PhotoCommands),
    /// Market comparable management
    #[command(subcommand)]
    Comps(CompsCommands),
    /// Data export
    #[command(subcommand)]
    Export(ExportCommands),
    /// Multi-step item pipelines
    #[command(subcommand)]
    Pipeline(PipelineCommands),
}

#[derive(Subcommand)]
pub enum DbCommands {
    /// Create the database schema
    Init,
}

#[derive(Subcommand)]
pub enum ItemCommands {
    /// Add a new item to inventory
    Add {
        /// Item SKU/identifier
        #[arg(long)]
        sku: String,
        /// Item category
        #[arg(long)]
        category: String,
        /// Brand name
        #[arg(long)]
        brand: String,
        /// Item name/title
        #[arg(long)]
        name: String,
        /// Purchase cost in dollars
        #[arg(long)]
        cost: f64,
        /// Item size
        #[arg(long)]
        size: Option<String>,
        /// Item color
        #[arg(long)]
        color: Option<String>,
        /// Item condition
        #[arg(long, default_value = "Good")]
        condition: String,
    },
    /// List inventory items
    List {
        /// Filter by status: inventory, listed, sold, returned
        #[arg(long)]
        status: Option<String>,
        /// Filter by category
        #[arg(long)]
        category: Option<String>,
        /// Maximum number of items to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Show one item in full
    Show {
        #[arg(long)]
        sku: String,
    },
    /// Record that an item went live at a price
    MarkListed {
        #[arg(long)]
        sku: String,
        #[arg(long)]
        price: f64,
    },
    /// Record a completed sale and its fees
    MarkSold {
        #[arg(long)]
        sku: String,
        #[arg(long)]
        price: f64,
    },
}

#[derive(Subcommand)]
pub enum PricingCommands {
    /// Full market analysis with suggested prices
    Analyze {
        #[arg(long)]
        sku: String,
        /// Store the competitive price as the item's suggested price
        #[arg(long)]
        save: bool,
    },
    /// Break-even price after fees
    Breakeven {
        #[arg(long)]
        sku: String,
    },
    /// Price-change suggestions for a stale listing
    Adjust {
        #[arg(long)]
        sku: String,
        /// Days the item has been listed (tracked externally)
        #[arg(long, default_value = "14")]
        days_listed: u32,
    },
}

#[derive(Subcommand)]
pub enum ListingCommands {
    /// Generate title and description
    Describe {
        #[arg(long)]
        sku: String,
        /// Content style: professional, casual, enthusiastic, minimalist
        #[arg(long, default_value = "professional")]
        style: String,
        /// Skip the AI backend and use template content
        #[arg(long)]
        no_ai: bool,
        /// Leave SEO keywords out of the description prompt
        #[arg(long)]
        no_keywords: bool,
    },
    /// Suggest search keywords
    Keywords {
        #[arg(long)]
        sku: String,
        #[arg(long, default_value = "10")]
        count: usize,
    },
    /// Check a title against optimization heuristics
    AnalyzeTitle {
        #[arg(long)]
        title: String,
    },
}

#[derive(Subcommand)]
pub enum PhotoCommands {
    /// Locate an item's photos and lay out processing outputs
    Plan {
        #[arg(long)]
        sku: String,
        /// Directory to search (defaults to the configured photo dir)
        #[arg(long)]
        input_dir: Option<String>,
    },
    /// Group an entire directory of photos by SKU
    Batch {
        #[arg(long)]
        input_dir: Option<String>,
    },
    /// Photo-shot checklist for a category
    Guide {
        #[arg(long)]
        category: String,
    },
}

#[derive(Subcommand)]
pub enum CompsCommands {
    /// Record one researched comparable
    Add {
        #[arg(long)]
        search_term: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        shipping: Option<f64>,
        #[arg(long, default_value = "ebay")]
        platform: String,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        condition: Option<String>,
        #[arg(long)]
        url: Option<String>,
        /// active, sold, or ended
        #[arg(long, default_value = "active")]
        status: String,
    },
    /// Import a JSON file of research findings
    Import {
        #[arg(long)]
        file: String,
        #[arg(long)]
        search_term: String,
        #[arg(long)]
        category: String,
    },
    /// Show stored comparables matching a term
    Show {
        #[arg(long)]
        term: String,
        #[arg(long, default_value = "20")]
        limit: u32,
    },
}

#[derive(Subcommand)]
pub enum ExportCommands {
    /// eBay bulk-upload CSV
    EbayCsv {
        /// Output path (defaults under the configured drafts dir)
        #[arg(long)]
        output: Option<String>,
        #[arg(long)]
        include_sold: bool,
        #[arg(long)]
        category: Option<String>,
    },
    /// JSON dump (standard or automation layout)
    Json {
        #[arg(long)]
        output: Option<String>,
        #[arg(long)]
        include_sold: bool,
        /// Emit the browser-automation layout
        #[arg(long)]
        automation: bool,
    },
}

#[derive(Subcommand)]
pub enum PipelineCommands {
    /// Photos -> content -> pricing -> optional export for one item
    Run {
        #[arg(long)]
        sku: String,
        #[arg(long)]
        skip_photos: bool,
        #[arg(long)]
        skip_ai: bool,
        #[arg(long)]
        skip_pricing: bool,
        /// Export a CSV draft at the end
        #[arg(long)]
        export: bool,
        #[arg(long, default_value = "professional")]
        style: String,
    },
    /// Run the pipeline for every SKU found in a photo directory
    Batch {
        #[arg(long)]
        input_dir: Option<String>,
        #[arg(long)]
        skip_photos: bool,
        #[arg(long)]
        skip_ai: bool,
        #[arg(long)]
        skip_pricing: bool,
        #[arg(long, default_value = "professional")]
        style: String,
    },
}
