use actix_web::rt::System;
use clap::{Parser, Subcommand};
use log::info;
use savenest_meta::config::{self, SiteConfig};
use savenest_meta::content::{ContentPaths, ContentStore};
use savenest_meta::engine::MetadataEngine;
use savenest_meta::{output, server};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "savenest-meta")]
#[command(about = "Metadata-injecting document server for the SaveNest web app")]
#[command(long_about = "\
Metadata-injecting document server for the SaveNest web app

Every page of the single-page app is served from one HTML shell. Crawlers
and link-preview bots don't run the app, so the shell is rendered per path
with the right title, description, preview image, and canonical URL.

Routes:

  /                           site defaults
  /blog/{slug}                article from blog_posts.json
  /deal/{id}                  offer from products.json
  /guides/{state}/{utility}   generated guide metadata
  anything else               site defaults

Article and offer metadata is precomputed into a cache that is rebuilt
whenever a data file changes.

Run 'savenest-meta gen-config' to generate a documented savenest.toml.")]
#[command(version)]
struct Cli {
    /// Config file. Missing file means stock defaults; relative content
    /// paths resolve against its directory.
    #[arg(long, default_value = "savenest.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve,
    /// Rebuild the metadata cache and write the artifact
    BuildCache,
    /// Print the resolved metadata for a request path as JSON
    Resolve {
        /// Request path, e.g. /blog/nbn-speed
        path: String,
    },
    /// Print the full HTML document for a request path
    Render {
        /// Request path, e.g. /deal/agl-value-saver
        path: String,
    },
    /// Validate content data files
    Check,
    /// Print a stock savenest.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => {
            let (site_config, base_dir) = setup(&cli.config)?;
            info!(
                "Starting {} {} with config {}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                cli.config.display()
            );
            let engine = Arc::new(MetadataEngine::from_config(&site_config, &base_dir));
            System::new().block_on(server::run(site_config, engine))?;
        }
        Command::BuildCache => {
            let (site_config, base_dir) = setup(&cli.config)?;
            let engine = MetadataEngine::from_config(&site_config, &base_dir);
            let summary = engine.rebuild();
            output::print_rebuild_summary(&summary);
        }
        Command::Resolve { path } => {
            let (site_config, base_dir) = setup(&cli.config)?;
            let engine = MetadataEngine::from_config(&site_config, &base_dir);
            let resolution = engine.resolve_path(&path);
            output::print_resolution(&path, &resolution)?;
        }
        Command::Render { path } => {
            let (site_config, base_dir) = setup(&cli.config)?;
            let engine = MetadataEngine::from_config(&site_config, &base_dir);
            println!("{}", engine.render_path(&path));
        }
        Command::Check => {
            let (site_config, base_dir) = setup(&cli.config)?;
            let content = site_config.content.resolved(&base_dir);
            let paths = ContentPaths::new(content.articles, content.offers);
            let store = ContentStore::load(&paths);
            output::print_check_output(&store, &paths);
            if output::check_has_problems(&store) {
                return Err("content check failed".into());
            }
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load and validate the config, then start logging at its level.
fn setup(config_path: &Path) -> Result<(SiteConfig, PathBuf), config::ConfigError> {
    let site_config = config::load_config(config_path)?;
    init_logging(&site_config);
    Ok((site_config, config::config_base_dir(config_path)))
}

/// Log to stderr with a stable line format. `RUST_LOG` overrides the
/// configured level.
fn init_logging(config: &SiteConfig) {
    let level = config.logging.level.to_lowercase();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f UTC"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
