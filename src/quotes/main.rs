use clap::Parser;
use directories::ProjectDirs;
use quotes::api::{ConfigAction, ListParams, QueryParams, QuotesApi, SortKey, SortOrder};
use quotes::config::QuotesConfig;
use quotes::error::{QuotesError, Result};
use quotes::store::fs::FileStore;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

mod args;
mod print;
use args::{Cli, Commands, OrderArg, SortArg};
use print::{print_categories, print_config, print_home, print_list, print_messages};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: QuotesApi<FileStore>,
    config: QuotesConfig,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Random { category }) => handle_random(&ctx, category),
        Some(Commands::List {
            page,
            per_page,
            category,
            sort,
            order,
        }) => handle_list(&ctx, page, per_page, category, sort, order),
        Some(Commands::Add {
            text,
            author,
            category,
        }) => handle_add(&ctx, &text, &author, &category),
        Some(Commands::Query {
            category,
            author,
            random,
            limit,
            offset,
        }) => handle_query(
            &ctx,
            QueryParams {
                category,
                author,
                random,
                limit,
                offset,
            },
        ),
        Some(Commands::Rate { id, rating }) => handle_rate(&ctx, id, rating),
        Some(Commands::Categories) => handle_categories(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_random(&ctx, None),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.dir {
        Some(dir) => dir.clone(),
        None => ProjectDirs::from("com", "quotes", "quotes")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| QuotesError::Store("Could not determine data dir".into()))?,
    };

    let config = QuotesConfig::load(&data_dir)?;
    let store_path: PathBuf = config.store_path(&data_dir);
    debug!(dir = %data_dir.display(), store = %store_path.display(), "using data dir");

    let store = FileStore::new(store_path).with_write_mode(config.write_mode);
    let api = QuotesApi::new(store, data_dir).with_serialized_writes(config.serialize_writes);

    Ok(AppContext { api, config })
}

fn handle_random(ctx: &AppContext, category: Option<String>) -> Result<()> {
    let view = ctx.api.random_quote(category.as_deref())?;
    print_home(&view);
    Ok(())
}

fn handle_list(
    ctx: &AppContext,
    page: i64,
    per_page: Option<i64>,
    category: Option<String>,
    sort: SortArg,
    order: OrderArg,
) -> Result<()> {
    let params = ListParams {
        category,
        sort_by: match sort {
            SortArg::Id => SortKey::Id,
            SortArg::Author => SortKey::Author,
            SortArg::Rating => SortKey::Rating,
        },
        order: match order {
            OrderArg::Asc => SortOrder::Asc,
            OrderArg::Desc => SortOrder::Desc,
        },
        page,
        per_page: per_page.unwrap_or(ctx.config.per_page as i64),
    };
    let view = ctx.api.list_quotes(&params)?;
    print_list(&view);
    Ok(())
}

fn handle_add(ctx: &AppContext, text: &str, author: &str, category: &str) -> Result<()> {
    let result = ctx.api.add_quote(text, author, category)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_query(ctx: &AppContext, params: QueryParams) -> Result<()> {
    let response = ctx.api.query_quotes(&params)?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn handle_rate(ctx: &AppContext, id: i64, rating: i64) -> Result<()> {
    let outcome = ctx.api.rate_quote(id, rating)?;
    println!(
        "Rating saved successfully: quote {} now averages {:.1} over {} rating(s)",
        outcome.quote_id, outcome.new_rating, outcome.rating_count
    );
    Ok(())
}

fn handle_categories(ctx: &AppContext) -> Result<()> {
    let categories = ctx.api.categories()?;
    print_categories(&categories);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = ctx.api.config(action)?;
    if result.messages.is_empty() {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}
