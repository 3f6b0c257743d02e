use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Utc;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;

use watizat_core::category::{CategoryStore, Toggle, TypeFilter};
use watizat_core::config::Config;
use watizat_core::feed::{filter_volunteers, offer_matches, FeedView, HelpRequestsView};
use watizat_core::post::{ImagePayload, Location, Post, PostDraft, PostType};
use watizat_core::profile::ProfileUpdate;
use watizat_core::session::{AuthResponse, Session};
use watizat_core::sources::Fetched;
use watizat_core::volunteer::{
    is_suggested_help_type, is_supported_language, ProfessionalArea, Registration,
    YearsOfExperience, HELP_TYPES, SUPPORTED_LANGUAGES,
};
use watizat_core::{load_sidebar, ApiClient, Result, WatizatError};

mod args;
mod display;
use args::{
    CategoryAction, Cli, Commands, CommentAction, ConfigAction, PostAction, ProfileAction,
    RegisterArgs, Shell,
};

const TOKEN_ENV: &str = "WATIZAT_TOKEN";

fn main() -> ExitCode {
    let cli = Cli::parse();
    watizat_core::logging::init(cli.verbose, cli.quiet);

    let base_dir = resolve_base_dir(cli.base_dir);
    let overrides = Overrides {
        token: cli.token,
        api_url: cli.api_url,
    };

    let result = match cli.command {
        Some(Commands::Feed {
            categories,
            post_type,
            comments,
        }) => Context::load(&base_dir, overrides)
            .and_then(|ctx| handle_feed(&ctx, categories, post_type.as_deref(), comments)),
        Some(Commands::Post { action }) => {
            Context::load(&base_dir, overrides).and_then(|ctx| handle_post(&ctx, action))
        }
        Some(Commands::Comments { action }) => {
            Context::load(&base_dir, overrides).and_then(|ctx| handle_comments(&ctx, action))
        }
        Some(Commands::Profile { action }) => {
            Context::load(&base_dir, overrides).and_then(|ctx| handle_profile(&ctx, action))
        }
        Some(Commands::Volunteers { categories, area }) => Context::load(&base_dir, overrides)
            .and_then(|ctx| handle_volunteers(&ctx, &categories, area.as_deref())),
        Some(Commands::HelpRequests { categories, saved }) => {
            Context::load(&base_dir, overrides)
                .and_then(|ctx| handle_help_requests(&ctx, categories, saved))
        }
        Some(Commands::Register(args)) => {
            Context::load(&base_dir, overrides).and_then(|ctx| handle_register(&ctx, args))
        }
        Some(Commands::Login {
            email,
            password,
            no_save,
        }) => Context::load(&base_dir, overrides)
            .and_then(|ctx| handle_login(&ctx, &email, &password, no_save)),
        Some(Commands::Logout) => handle_logout(&base_dir),
        Some(Commands::Categories { action }) => {
            Context::load(&base_dir, overrides).and_then(|ctx| handle_categories(&ctx, action))
        }
        Some(Commands::Sidebar) => {
            Context::load(&base_dir, overrides).and_then(|ctx| handle_sidebar(&ctx))
        }
        Some(Commands::Config { action }) => handle_config(action, &base_dir),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        None => {
            Cli::command().print_help().ok();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "watizat", &mut io::stdout());
}

fn resolve_base_dir(cli_base: Option<PathBuf>) -> PathBuf {
    if let Some(base) = cli_base {
        return base;
    }

    if let Ok(base) = std::env::var("WATIZAT_BASE") {
        return PathBuf::from(base);
    }

    dirs::home_dir()
        .map(|h| h.join(".watizat"))
        .unwrap_or_else(|| PathBuf::from(".watizat"))
}

/// Global flags that take precedence over env and config
struct Overrides {
    token: Option<String>,
    api_url: Option<String>,
}

/// Everything a network command needs, resolved once per invocation
struct Context {
    base_dir: PathBuf,
    config: Config,
    store: CategoryStore,
    client: ApiClient,
    token: Option<String>,
}

impl Context {
    fn load(base_dir: &Path, overrides: Overrides) -> Result<Self> {
        let config = Config::load(base_dir)?;
        let store = CategoryStore::builtin().with_config(&config.categories);
        let base_url = overrides.api_url.unwrap_or_else(|| config.base_url());
        let client = ApiClient::new(base_url)?;
        Ok(Self {
            base_dir: base_dir.to_path_buf(),
            config,
            store,
            client,
            token: overrides.token,
        })
    }

    /// Token from `--token`, then `WATIZAT_TOKEN`, then `api.token`
    fn session(&self) -> Result<Session> {
        Session::resolve([
            self.token.clone(),
            std::env::var(TOKEN_ENV).ok(),
            self.config.api.token.clone(),
        ])
    }

    /// Session carrying the current user's profile
    fn session_with_user(&self) -> Result<Session> {
        let session = self.session()?;
        let user = self.client.profile(&session)?;
        Ok(session.with_user(user))
    }

    fn warn_unknown(&self, ids: &[String]) {
        for id in ids.iter().filter(|id| !self.store.contains(id)) {
            eprintln!(
                "{} unknown category '{}' (see `watizat categories list`)",
                "[WARN]".yellow().bold(),
                id
            );
        }
    }

    fn save_auth(&self, auth: AuthResponse, no_save: bool) -> Result<()> {
        let session = auth.into_session()?;
        let name = session
            .user()
            .map(|u| u.public_name().to_string())
            .unwrap_or_default();

        if no_save {
            println!("{}", session.token());
            return Ok(());
        }

        let mut config = Config::load(&self.base_dir)?;
        config.set("api.token", session.token())?;
        config.save(&self.base_dir)?;
        println!(
            "{} {} (token saved to {})",
            "Logged in:".green(),
            name.bold(),
            Config::path(&self.base_dir).display()
        );
        Ok(())
    }
}

fn handle_feed(
    ctx: &Context,
    categories: Vec<String>,
    post_type: Option<&str>,
    with_comments: bool,
) -> Result<()> {
    let type_filter: TypeFilter = match post_type {
        Some(t) => t.parse()?,
        None => ctx.config.feed.type_filter,
    };
    let categories = if categories.is_empty() {
        ctx.config.feed.categories.clone()
    } else {
        categories
    };
    ctx.warn_unknown(&categories);

    let session = ctx.session()?;
    let posts = ctx.client.list_posts(&session, None)?;
    let feed = FeedView::with_filters(posts, categories, type_filter)?;
    let visible = feed.visible();

    println!();
    let filter_desc = if feed.selection().is_empty() {
        "all categories".to_string()
    } else {
        display::category_line(&ctx.store, feed.selection().current())
    };
    println!(
        "{} {} · {} · {} post(s)",
        "Feed:".bold(),
        filter_desc.cyan(),
        feed.type_filter(),
        visible.len()
    );
    println!();

    if visible.is_empty() {
        println!("  No posts match the current filters");
        println!();
        return Ok(());
    }

    let now = Utc::now();
    for post in visible {
        display::print_post(post, &ctx.store, now);
        if with_comments {
            let comments = if post.comments.is_empty() {
                ctx.client.list_comments(&session, &post.id)?
            } else {
                post.comments.clone()
            };
            for comment in &comments {
                display::print_comment(comment, now);
            }
        }
        println!();
    }

    Ok(())
}

fn handle_post(ctx: &Context, action: PostAction) -> Result<()> {
    match action {
        PostAction::Create {
            post_type,
            categories,
            title,
            description,
            images,
            lat,
            lng,
            address,
        } => {
            let session = ctx.session_with_user()?;
            let post_type = match post_type {
                Some(t) => t.parse()?,
                None => PostType::default_for_role(
                    session.user().map(|u| u.role.as_str()).unwrap_or_default(),
                ),
            };

            let mut draft = PostDraft::new(post_type)
                .title(title)
                .description(description);
            if !categories.is_empty() {
                ctx.warn_unknown(&categories);
                draft = draft.with_categories(categories)?;
            }
            for path in &images {
                let data = fs::read_to_string(path)?;
                draft.add_image(ImagePayload::new(data.trim()))?;
            }
            if let (Some(lat), Some(lng)) = (lat, lng) {
                draft = draft.location(Location { lat, lng, address });
            }

            let post = ctx.client.create_post(&session, &draft)?;
            println!();
            println!(
                "{} {} {}",
                "Published:".green(),
                display::type_badge(post.post_type),
                post.title.bold()
            );
            println!(
                "  {}",
                display::category_line(&ctx.store, draft.categories.current())
            );

            if post_type == PostType::Offer {
                let needs = ctx.client.list_posts(&session, Some(PostType::Need))?;
                print_matches(ctx, &draft, &needs, session.user_id());
            }
            println!();
        }
        PostAction::Matches { categories } => {
            ctx.warn_unknown(&categories);
            let draft = PostDraft::new(PostType::Offer).with_categories(categories)?;
            let session = ctx.session_with_user()?;
            let needs = ctx.client.list_posts(&session, Some(PostType::Need))?;
            println!();
            print_matches(ctx, &draft, &needs, session.user_id());
            println!();
        }
    }

    Ok(())
}

fn print_matches(
    ctx: &Context,
    draft: &PostDraft,
    needs: &[Post],
    user_id: Option<&str>,
) {
    let matches = offer_matches(draft, needs, user_id);
    if matches.is_empty() {
        println!("  No open requests in these categories yet");
        return;
    }
    println!("{}", "People who need this kind of help:".bold());
    println!();
    let now = Utc::now();
    for post in matches {
        display::print_post(post, &ctx.store, now);
    }
}

fn handle_comments(ctx: &Context, action: CommentAction) -> Result<()> {
    let session = ctx.session()?;
    match action {
        CommentAction::List { post_id } => {
            let comments = ctx.client.list_comments(&session, &post_id)?;
            if comments.is_empty() {
                println!("No comments yet");
                return Ok(());
            }
            let now = Utc::now();
            for comment in &comments {
                display::print_comment(comment, now);
            }
        }
        CommentAction::Add { post_id, text } => {
            let comment = ctx.client.add_comment(&session, &post_id, &text)?;
            println!("{} {}", "Commented:".green(), comment.comment);
        }
    }
    Ok(())
}

fn handle_profile(ctx: &Context, action: ProfileAction) -> Result<()> {
    let session = ctx.session()?;
    match action {
        ProfileAction::Show => {
            let profile = ctx.client.profile(&session)?;
            println!();
            println!("{}", profile.public_name().bold());
            if profile.use_display_name {
                println!("  name: {}", profile.name);
            }
            if let Some(email) = &profile.email {
                println!("  email: {}", email);
            }
            println!("  role: {}", profile.role.cyan());
            if !profile.languages.is_empty() {
                println!("  languages: {}", profile.languages.join(", "));
            }
            if profile.is_volunteer() {
                let helps = if profile.help_categories.is_empty() {
                    "-".to_string()
                } else {
                    display::category_line(&ctx.store, &profile.help_categories)
                };
                println!("  helps with: {}", helps);
            }
            if let Some(bio) = profile.bio.as_deref().filter(|b| !b.is_empty()) {
                println!("  bio: {}", bio);
            }
            println!();
        }
        ProfileAction::DisplayName { name, off } => {
            let update = ProfileUpdate::display_name(name, !off);
            let profile = ctx.client.update_profile(&session, &update)?;
            println!("{} {}", "Public name:".green(), profile.public_name().bold());
        }
        ProfileAction::Categories { toggle, clear } => {
            let profile = ctx.client.profile(&session)?;
            let mut selection = profile.help_selection()?;
            if clear {
                selection.clear();
            }
            ctx.warn_unknown(&toggle);
            for id in &toggle {
                match selection.toggle(id)? {
                    Toggle::Added => println!("  {} {}", "+".green(), id),
                    Toggle::Removed => println!("  {} {}", "-".red(), id),
                    Toggle::KeptMinimum => println!("  {} {} (kept)", "=".yellow(), id),
                }
            }

            let update = ProfileUpdate::help_categories(&selection);
            let profile = ctx.client.update_profile(&session, &update)?;
            let helps = if profile.help_categories.is_empty() {
                "-".to_string()
            } else {
                display::category_line(&ctx.store, &profile.help_categories)
            };
            println!("{} {}", "Helps with:".green(), helps);
        }
    }
    Ok(())
}

fn handle_volunteers(ctx: &Context, categories: &[String], area: Option<&str>) -> Result<()> {
    let area = area.map(str::parse::<ProfessionalArea>).transpose()?;
    ctx.warn_unknown(categories);

    let session = ctx.session()?;
    let volunteers = ctx.client.list_volunteers(&session, area)?;
    let matching = filter_volunteers(&volunteers, categories);

    println!();
    println!("{} {} volunteer(s)", "Volunteers:".bold(), matching.len());
    println!();
    for volunteer in matching {
        display::print_volunteer(volunteer, &ctx.store);
        println!();
    }
    Ok(())
}

fn handle_help_requests(ctx: &Context, mut categories: Vec<String>, saved: bool) -> Result<()> {
    let session = ctx.session_with_user()?;
    if saved {
        if let Some(user) = session.user() {
            categories.extend(user.help_categories.iter().cloned());
        }
    }
    ctx.warn_unknown(&categories);

    let mut view = HelpRequestsView::seeded(Vec::new(), categories)?;
    if !view.needs_fetch() {
        println!("Select at least one category with --category (or --saved) to see requests");
        return Ok(());
    }

    let requests = ctx.client.list_posts(&session, Some(PostType::Need))?;
    view.set_requests(requests);
    let visible = view.visible();

    println!();
    println!(
        "{} {} · {} request(s)",
        "Help requests:".bold(),
        display::category_line(&ctx.store, view.selection().current()).cyan(),
        visible.len()
    );
    println!();
    let now = Utc::now();
    for post in visible {
        display::print_post(post, &ctx.store, now);
        println!();
    }
    Ok(())
}

fn handle_register(ctx: &Context, args: RegisterArgs) -> Result<()> {
    let mut registration = Registration::new();
    registration.name = args.name;
    registration.email = args.email;
    registration.password = args.password;
    registration.phone = args.phone;
    for lang in args.languages.iter().filter(|l| !is_supported_language(l)) {
        eprintln!(
            "{} language '{}' is not offered (supported: {})",
            "[WARN]".yellow().bold(),
            lang,
            SUPPORTED_LANGUAGES.join(", ")
        );
    }
    registration.set_languages(args.languages);
    registration.next_step()?;

    registration.professional_area = Some(args.area.parse::<ProfessionalArea>()?);
    registration.specialties = args.specialties;
    registration.organization = args.organization;
    registration.professional_id = args.professional_id;
    registration.next_step()?;

    registration.education = args.education;
    registration.certifications = args.certifications;
    registration.years_experience = args
        .years
        .as_deref()
        .map(str::parse::<YearsOfExperience>)
        .transpose()?;
    registration.experience = args.experience;
    registration.next_step()?;

    registration.availability = args.availability;
    for help_type in args.help_types.iter().filter(|t| !is_suggested_help_type(t)) {
        eprintln!(
            "{} '{}' is not a suggested help type (suggested: {})",
            "[WARN]".yellow().bold(),
            help_type,
            HELP_TYPES.join(", ")
        );
    }
    registration.set_help_types(args.help_types);
    ctx.warn_unknown(&args.categories);
    registration.set_help_categories(args.categories)?;

    let auth = ctx.client.register(&registration)?;
    println!("{} {}", "Registered:".green(), auth.user.public_name().bold());
    ctx.save_auth(auth, args.no_save)
}

fn handle_login(ctx: &Context, email: &str, password: &str, no_save: bool) -> Result<()> {
    let auth = ctx.client.login(email, password)?;
    ctx.save_auth(auth, no_save)
}

fn handle_logout(base_dir: &Path) -> Result<()> {
    let mut config = Config::load(base_dir)?;
    if config.api.token.is_none() {
        println!("Not logged in");
        return Ok(());
    }
    config.set("api.token", "")?;
    config.save(base_dir)?;
    println!("{}", "Logged out".green());
    Ok(())
}

fn handle_categories(ctx: &Context, action: CategoryAction) -> Result<()> {
    match action {
        CategoryAction::List => {
            println!();
            for def in ctx.store.all() {
                let resources = ctx.store.resources(&def.id).len();
                println!(
                    "{} {:<12} {:<24} {}",
                    def.icon,
                    def.id.cyan(),
                    def.label,
                    format!("{} resource(s)", resources).dimmed()
                );
            }
            println!();
        }
        CategoryAction::Show { id } => {
            let def = ctx.store.lookup(&id);
            println!();
            println!("{} {}", def.icon, def.label.bold());
            if !def.known {
                println!("  {}", "Not a registered category".yellow());
            }
            if let Some(description) = &def.description {
                println!("  {}", description);
            }

            let resources = ctx.store.resources(&id);
            if !resources.is_empty() {
                println!();
                println!("{}", "Resources:".bold());
                for resource in resources {
                    let name = if resource.urgent {
                        resource.name.red().bold()
                    } else {
                        resource.name.normal()
                    };
                    println!("  • {} - {}", name, resource.description);
                    if let Some(link) = resource.link {
                        println!("    {}", link.underline());
                    }
                }
            }
            println!();
        }
    }
    Ok(())
}

fn handle_sidebar(ctx: &Context) -> Result<()> {
    // Sidebar content is shown to anonymous users too
    let session = ctx.session().ok();
    match load_sidebar(&ctx.client, session.as_ref()) {
        Fetched::Found { source, items } => {
            tracing::debug!(source = source.as_str(), "sidebar loaded");
            if items.is_empty() {
                println!("Nothing to show");
            }
            for item in &items {
                display::print_sidebar_item(item);
                println!();
            }
        }
        Fetched::NoData { failures } => {
            tracing::debug!(failures = failures.len(), "no sidebar source answered");
            println!("Nothing to show");
        }
    }
    Ok(())
}

fn handle_config(action: ConfigAction, base_dir: &Path) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load(base_dir)?;
            match config.get(&key) {
                Some(value) => {
                    println!("{}", value);
                }
                None => {
                    return Err(WatizatError::ConfigKeyNotFound { key });
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load(base_dir)?;
            config.set(&key, &value)?;
            config.save(base_dir)?;
            let shown = if key == "api.token" { "****" } else { value.as_str() };
            println!("{} {} = {}", "Set:".green(), key, shown);
        }
        ConfigAction::List => {
            let config = Config::load(base_dir)?;
            println!();
            for (key, value) in config.list() {
                println!("{} = {}", key.cyan(), value);
            }
            println!();
        }
        ConfigAction::Path => {
            let path = Config::path(base_dir);
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let path = Config::init(base_dir)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
    }

    Ok(())
}
