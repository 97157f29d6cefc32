use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use message_catalog::Catalog;
use movie_facts::{RawMovieData, PLACEHOLDERS};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use server::{
    build_page, CatalogArgs, ComposedMovie, MessageOrchestrator, MovieMessages, PageRenderer, StaticMovieSource,
    UpstreamArgs,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use templating::placeholder::referenced_placeholders;
use templating::{EmojiTagDecorator, FailurePolicy, MessagesByTag, PlainTags, TemplateEngine};
use tracing::{debug, warn};
use upstream::MovieDataFetcher;

/// Movie Messages - fill catalog messages with facts about a movie
#[derive(Parser)]
#[command(name = "movie-messages")]
#[command(about = "Render tagged message templates with movie facts", long_about = None)]
struct Cli {
    #[command(flatten)]
    catalog: CatalogArgs,

    /// Print JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    /// Leave tags undecorated
    #[arg(long, global = true)]
    plain_tags: bool,

    /// Extra tag decoration, e.g. `--decorate "Sadly=:sob:"` (repeatable)
    #[arg(long = "decorate", value_name = "TAG=SHORTCODES", value_parser = parse_decoration, global = true)]
    decorations: Vec<(String, String)>,

    /// Drop templates whose facts are missing instead of failing
    #[arg(long, global = true)]
    skip_failures: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a movie from the API and render the catalog
    Query {
        /// Upstream movie identifier
        #[arg(long)]
        movie_id: String,

        #[command(flatten)]
        upstream: UpstreamArgs,
    },

    /// Render the catalog against a saved API response, offline
    Render {
        /// JSON file holding `{"info": {...}, "reviews": [...]}`
        #[arg(long)]
        fixture: PathBuf,

        /// Seed for the review pick, for repeatable output
        #[arg(long)]
        seed: Option<u64>,

        /// Print the HTML results page instead
        #[arg(long)]
        html: bool,
    },

    /// Summarize the message catalog: tags, counts and the facts they use
    Catalog,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Progress goes to stderr so stdout stays pipeable (JSON, HTML)
    let start = Instant::now();
    let catalog = cli.catalog.load()?;
    eprintln!(
        "{} Loaded {} messages from {} in {:?}",
        "✓".green(),
        catalog.len(),
        cli.catalog.catalog.display(),
        start.elapsed()
    );

    let engine = build_engine(cli.plain_tags, &cli.decorations, cli.skip_failures);

    match cli.command {
        Commands::Query { movie_id, upstream } => {
            handle_query(catalog, engine, &upstream, &movie_id, cli.json).await?
        }
        Commands::Render { fixture, seed, html } => {
            handle_render(catalog, engine, fixture, seed, html, cli.json).await?
        }
        Commands::Catalog => handle_catalog(&catalog, &engine, cli.json)?,
    }

    Ok(())
}

fn parse_decoration(value: &str) -> Result<(String, String)> {
    let (tag, shortcodes) = value
        .split_once('=')
        .ok_or_else(|| anyhow!("expected TAG=SHORTCODES, got {:?}", value))?;
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(anyhow!("decoration for {:?} has an empty tag", value));
    }
    Ok((tag.to_string(), shortcodes.trim().to_string()))
}

fn build_engine(
    plain_tags: bool,
    decorations: &[(String, String)],
    skip_failures: bool,
) -> TemplateEngine {
    let mut engine = TemplateEngine::new();
    if plain_tags {
        if !decorations.is_empty() {
            warn!("--plain-tags set, ignoring {} --decorate values", decorations.len());
        }
        engine = engine.with_decorator(PlainTags);
    } else if !decorations.is_empty() {
        let decorator = decorations
            .iter()
            .fold(EmojiTagDecorator::new(), |decorator, (tag, shortcodes)| {
                decorator.with_decoration(tag.as_str(), shortcodes)
            });
        engine = engine.with_decorator(decorator);
    }
    if skip_failures {
        engine = engine.with_policy(FailurePolicy::SkipEntry);
    }
    debug!("Render failure policy: {:?}", engine.policy());
    engine
}

/// Handle the 'query' command
async fn handle_query(
    catalog: Arc<Catalog>,
    engine: TemplateEngine,
    upstream: &UpstreamArgs,
    movie_id: &str,
    json: bool,
) -> Result<()> {
    let fetcher = MovieDataFetcher::new(upstream.to_config()?)
        .context("Failed to create movie API client")?;
    let orchestrator = MessageOrchestrator::new(Arc::new(fetcher), catalog).with_engine(engine);

    let start = Instant::now();
    let result = orchestrator.movie_messages(movie_id).await?;
    eprintln!("{} Fetched and rendered in {:?}", "✓".green(), start.elapsed());

    print_messages(&result, json)
}

/// Handle the 'render' command
async fn handle_render(
    catalog: Arc<Catalog>,
    engine: TemplateEngine,
    fixture: PathBuf,
    seed: Option<u64>,
    html: bool,
    json: bool,
) -> Result<()> {
    const FIXTURE_ID: &str = "fixture";

    let source = StaticMovieSource::from_file(&fixture, FIXTURE_ID)?;
    let orchestrator = MessageOrchestrator::new(Arc::new(source), catalog).with_engine(engine);

    let mut rng = match seed {
        Some(seed) => {
            debug!("Picking reviews with seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };
    let data = orchestrator.fetch(FIXTURE_ID).await?;
    let composed = orchestrator.compose(&data, &mut rng)?;

    if html {
        println!("{}", page_html(&data, composed)?);
        return Ok(());
    }

    let result = MovieMessages {
        title: composed.sheet.title().to_string(),
        messages: composed.messages,
    };
    print_messages(&result, json)
}

/// The full results page, exactly as printed by `render --html`
fn page_html(data: &RawMovieData, composed: ComposedMovie) -> Result<String> {
    let page = build_page(data, composed);
    Ok(PageRenderer::new()?.render(&page)?)
}

/// One decorated tag in the catalog summary
#[derive(Debug, Serialize)]
struct TagSummary {
    tag: String,
    messages: usize,
    /// Known placeholders used by this tag's templates, in fact-sheet order
    placeholders: Vec<&'static str>,
    /// Names no fact fills; these templates fail at render time
    unknown: Vec<String>,
    /// Templates that don't parse at all
    invalid: usize,
}

fn summarize_catalog(catalog: &Catalog, engine: &TemplateEngine) -> Vec<TagSummary> {
    let mut summaries: Vec<TagSummary> = Vec::new();

    for entry in catalog {
        let referenced = match referenced_placeholders(&entry.template) {
            Ok(names) => Some(names),
            Err(e) => {
                warn!("Catalog line {} has a bad template: {}", entry.line, e);
                None
            }
        };

        for tag in &entry.tags {
            let tag = engine.decorate(tag);
            let idx = match summaries.iter().position(|s| s.tag == tag) {
                Some(idx) => idx,
                None => {
                    summaries.push(TagSummary {
                        tag,
                        messages: 0,
                        placeholders: Vec::new(),
                        unknown: Vec::new(),
                        invalid: 0,
                    });
                    summaries.len() - 1
                }
            };
            let summary = &mut summaries[idx];
            summary.messages += 1;

            let Some(names) = &referenced else {
                summary.invalid += 1;
                continue;
            };
            for &name in names {
                match PLACEHOLDERS.iter().find(|known| **known == name) {
                    Some(known) if !summary.placeholders.contains(known) => {
                        summary.placeholders.push(*known)
                    }
                    Some(_) => {}
                    None if !summary.unknown.iter().any(|u| u == name) => {
                        summary.unknown.push(name.to_string())
                    }
                    None => {}
                }
            }
        }
    }

    for summary in &mut summaries {
        summary
            .placeholders
            .sort_by_key(|name| PLACEHOLDERS.iter().position(|known| known == name));
    }
    summaries
}

/// Handle the 'catalog' command
fn handle_catalog(catalog: &Catalog, engine: &TemplateEngine, json: bool) -> Result<()> {
    let summaries = summarize_catalog(catalog, engine);

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    println!("{}", "Catalog tags:".bold().blue());
    for summary in &summaries {
        println!(
            "  {} {} ({} messages)",
            "•".cyan(),
            summary.tag,
            summary.messages
        );
        if !summary.placeholders.is_empty() {
            println!("      uses: {}", summary.placeholders.join(", "));
        }
        if !summary.unknown.is_empty() {
            println!(
                "      {} {}",
                "unknown:".red(),
                summary.unknown.join(", ")
            );
        }
        if summary.invalid > 0 {
            println!(
                "      {} {} templates don't parse",
                "invalid:".red(),
                summary.invalid
            );
        }
    }
    Ok(())
}

/// Format and print rendered messages
fn print_messages(result: &MovieMessages, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!("{}", result.title.bold().blue());
    print_groups(&result.messages);
    Ok(())
}

fn print_groups(messages: &MessagesByTag) {
    if messages.is_empty() {
        println!("{}", "No messages rendered.".yellow());
        return;
    }
    for group in messages.groups() {
        println!();
        println!("{}", group.tag.bold());
        for (i, message) in group.messages.iter().enumerate() {
            println!("  {}. {}", (i + 1).to_string().green(), message);
        }
    }
}
