use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "watizat")]
#[command(about = "Community support client: ask for help, offer help, find volunteers")]
#[command(version)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Base directory (default: ~/.watizat)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Bearer token (overrides WATIZAT_TOKEN and api.token)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Backend URL (overrides WATIZAT_BACKEND_URL and api.base_url)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
#[allow(clippy::large_enum_variant)]
pub enum Commands {
    /// Show the feed of requests and offers
    Feed {
        /// Only posts in these categories (repeatable; default: feed.categories)
        #[arg(short, long = "category", value_name = "ID")]
        categories: Vec<String>,

        /// Post type: all, need or offer (default: feed.type_filter)
        #[arg(short = 't', long = "type")]
        post_type: Option<String>,

        /// Also list comments under each post
        #[arg(long)]
        comments: bool,
    },

    /// Create posts and preview matching requests
    Post {
        #[command(subcommand)]
        action: PostAction,
    },

    /// Read and write comments on a post
    Comments {
        #[command(subcommand)]
        action: CommentAction,
    },

    /// Show or edit your profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Find volunteers by help category or professional area
    Volunteers {
        /// Help categories (repeatable; default: all)
        #[arg(short, long = "category", value_name = "ID")]
        categories: Vec<String>,

        /// Professional area (legal, health, education, ...)
        #[arg(short, long)]
        area: Option<String>,
    },

    /// Open help requests in the categories you can help with
    HelpRequests {
        /// Categories to browse (repeatable)
        #[arg(short, long = "category", value_name = "ID")]
        categories: Vec<String>,

        /// Start from the help categories saved on your profile
        #[arg(long)]
        saved: bool,
    },

    /// Register as a volunteer
    Register(RegisterArgs),

    /// Log in and store the token in the config file
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        /// Print the token instead of saving it
        #[arg(long)]
        no_save: bool,
    },

    /// Remove the stored token
    Logout,

    /// Browse help categories and their resources
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Show sidebar content (announcements and job listings)
    Sidebar,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum PostAction {
    /// Publish a new request or offer
    Create {
        /// need or offer (default: derived from your role)
        #[arg(short = 't', long = "type")]
        post_type: Option<String>,

        /// Categories, 1 to 3 (repeatable; default: food)
        #[arg(short, long = "category", value_name = "ID")]
        categories: Vec<String>,

        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        /// File holding a base64 data URI (repeatable, 5 MB max each)
        #[arg(long = "image", value_name = "FILE")]
        images: Vec<PathBuf>,

        #[arg(long, requires = "lng")]
        lat: Option<f64>,

        #[arg(long, requires = "lat")]
        lng: Option<f64>,

        #[arg(long)]
        address: Option<String>,
    },

    /// Requests from other users that an offer in these categories would answer
    Matches {
        /// Categories of the offer, 1 to 3 (repeatable)
        #[arg(short, long = "category", value_name = "ID", required = true)]
        categories: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum CommentAction {
    /// List comments on a post
    List {
        post_id: String,
    },

    /// Add a comment to a post
    Add {
        post_id: String,

        /// Comment text
        text: String,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show your profile
    Show,

    /// Set the name shown publicly
    DisplayName {
        name: String,

        /// Keep the display name but show your real name
        #[arg(long)]
        off: bool,
    },

    /// Edit the categories you can help with
    Categories {
        /// Categories to add or remove (repeatable)
        #[arg(long = "toggle", value_name = "ID")]
        toggle: Vec<String>,

        /// Remove every category first
        #[arg(long)]
        clear: bool,
    },
}

#[derive(clap::Args)]
pub struct RegisterArgs {
    // Step 1
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    /// Spoken languages: pt, fr, en, es, ar, ru (repeatable; default: pt,fr)
    #[arg(long = "language", value_name = "CODE")]
    pub languages: Vec<String>,

    // Step 2
    /// Professional area (legal, health, education, ...)
    #[arg(long)]
    pub area: String,

    /// Comma-separated specialties
    #[arg(long, default_value = "")]
    pub specialties: String,

    #[arg(long, default_value = "")]
    pub organization: String,

    #[arg(long, default_value = "")]
    pub professional_id: String,

    // Step 3
    #[arg(long, default_value = "")]
    pub education: String,

    /// Comma-separated certifications
    #[arg(long, default_value = "")]
    pub certifications: String,

    /// Years of experience: 0-2, 3-5, 6-10, 11-15, 16+
    #[arg(long)]
    pub years: Option<String>,

    #[arg(long, default_value = "")]
    pub experience: String,

    // Step 4
    #[arg(long)]
    pub availability: String,

    /// Help modalities, e.g. "Remote", "Translation" (repeatable)
    #[arg(long = "help-type", value_name = "TYPE")]
    pub help_types: Vec<String>,

    /// Help categories (repeatable, at least one)
    #[arg(short, long = "category", value_name = "ID")]
    pub categories: Vec<String>,

    #[arg(long, default_value = "")]
    pub linkedin: String,

    /// Print the token instead of saving it
    #[arg(long)]
    pub no_save: bool,
}

#[derive(Subcommand)]
pub enum CategoryAction {
    /// List all help categories
    List,

    /// Show a category and its resources
    Show {
        /// Category id (e.g., food, legal)
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g., feed.categories)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., feed.categories)
        key: String,

        /// Value to set (e.g., "food,health" or "[food, health]")
        value: String,
    },

    /// List all config values
    List,

    /// Show config file path
    Path,

    /// Initialize config file with defaults
    Init,
}
