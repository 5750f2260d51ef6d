use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};

use wp_content_engine::content::sanitize;
use wp_content_engine::{load_config, ContentClient, HttpBackend};

#[derive(Parser)]
#[command(name = "wp-content-engine")]
#[command(about = "Cached WordPress content client for the marketing site")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the categories that contain at least one post
    Categories,
    /// List posts, optionally restricted to one category
    Posts {
        #[arg(long)]
        category: Option<u64>,
    },
    /// Render a single post by its slug
    Post { slug: String },
    /// Warm the post cache for every category, then time a cached read
    Warm,
}

fn setup_logging() -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging().expect("Failed to initialize logging");
    let cli = Cli::parse();

    let config = load_config()?;
    let backend = Arc::new(HttpBackend::new(&config)?);
    let client = Arc::new(ContentClient::new(
        backend,
        Duration::from_secs(config.cache_ttl_secs),
    ));

    match cli.command {
        Command::Categories => {
            let categories = client.categories().await;
            if categories.is_empty() {
                warn!("No categories found (backend unreachable or site empty)");
            }
            for category in categories {
                println!("{:>4}  {:>3} posts  {}", category.id, category.count, category.name);
            }
        }
        Command::Posts { category } => {
            let posts = match category {
                Some(id) => client.posts_by_category(id).await,
                None => client.posts().await,
            };
            if posts.is_empty() {
                warn!("No posts found");
            }
            for post in posts {
                println!(
                    "{:>4}  {}  /{}/  {}",
                    post.id,
                    post.date.format("%Y-%m-%d"),
                    post.slug,
                    post.title.rendered
                );
            }
        }
        Command::Post { slug } => {
            // Post body and the category list render together on a post
            // page, so fetch both concurrently.
            let (post, categories) =
                futures::future::join(client.post_by_slug(&slug), client.categories()).await;
            let Some(post) = post else {
                anyhow::bail!("No post published under slug '{}'", slug);
            };

            println!("# {}", post.title.rendered);
            println!("meta: {}", sanitize::meta_description(&post.excerpt.rendered));
            println!();
            println!("{}", sanitize::strip_denylisted(&post.content.rendered));
            info!("Site navigation holds {} categories", categories.len());
        }
        Command::Warm => {
            let categories = client.categories().await;
            let ids: Vec<u64> = categories.iter().map(|c| c.id).collect();
            info!("🔥 Warming post cache for {} categories...", ids.len());

            client
                .clone()
                .warm_all(
                    ids.clone(),
                    Duration::from_millis(config.prefetch_delay_ms),
                    Duration::from_millis(100),
                )
                .await?;

            if let Some(first) = ids.first() {
                let read_start = Instant::now();
                let posts = client.posts_by_category(*first).await;
                info!(
                    "✅ Cached read for category {}: {} posts in {:?}",
                    first,
                    posts.len(),
                    read_start.elapsed()
                );
            }
        }
    }

    Ok(())
}
