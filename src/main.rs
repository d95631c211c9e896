use clap::{Parser, Subcommand};
use std::path::PathBuf;
use studio_gallery::catalog::{self, Catalog};
use studio_gallery::config::{self, GalleryConfig};
use studio_gallery::gallery::{Event, Gallery};
use studio_gallery::host::Platform;
use studio_gallery::i18n::StringTable;
use studio_gallery::{output, render, url};
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "studio-gallery")]
#[command(about = "Browse an artwork catalog the way the gallery page does")]
#[command(long_about = "\
Browse an artwork catalog the way the gallery page does

The catalog is a JSON array of artwork records. The gallery shows a growing
prefix of it as a grid, opens a lightbox for the selected artwork, and keeps
the selection in the page URL (?image=<id>) so any artwork can be linked to
directly.

Examples:

  studio-gallery check
  studio-gallery grid --pages 2
  studio-gallery open '/gallery?image=dawn'
  studio-gallery share dawn
  studio-gallery render '/gallery?image=dawn' --out snapshot.html

Run 'studio-gallery gen-config' to generate a documented gallery.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Catalog file (JSON array of artwork records)
    #[arg(long, default_value = "catalog.json", global = true)]
    catalog: PathBuf,

    /// Gallery config (optional; stock defaults when absent)
    #[arg(long, default_value = "gallery.toml", global = true)]
    config: PathBuf,

    /// Display strings (flat TOML table of key = "text")
    #[arg(long, global = true)]
    strings: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate the catalog and config and list the inventory
    Check,
    /// Show the grid after a number of load-more steps
    Grid {
        /// Pages to load beyond the initial one
        #[arg(long, default_value_t = 0)]
        pages: usize,
    },
    /// Open the gallery at a URL and show the resulting state
    Open {
        /// Location, e.g. /gallery?image=dawn
        url: String,
    },
    /// Print the canonical share link for an artwork
    Share {
        /// Artwork id
        id: String,
    },
    /// Open the gallery at a URL and write an HTML snapshot
    Render {
        /// Location, e.g. /gallery?image=dawn
        url: String,
        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a stock gallery.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Command::Check => {
            let catalog = catalog::load_catalog(&cli.catalog)?;
            let config = config::load_config(&cli.config)?;
            output::print_check_output(&catalog, &config);
            println!("==> Catalog and config are valid");
        }
        Command::Grid { pages } => {
            let mut gallery = open_gallery(&cli, &config::load_config(&cli.config)?.base_path)?;
            for _ in 0..*pages {
                // Both triggers are offered; only the configured one advances.
                gallery.dispatch(Event::LoadMore);
                gallery.dispatch(Event::SentinelVisibility(0.0));
                gallery.dispatch(Event::SentinelVisibility(1.0));
            }
            output::print_grid_output(&gallery);
        }
        Command::Open { url } => {
            let mut gallery = open_gallery(&cli, url)?;
            gallery.run_until_idle();
            output::print_state_output(&gallery);
        }
        Command::Share { id } => {
            let catalog = catalog::load_catalog(&cli.catalog)?;
            let config = config::load_config(&cli.config)?;
            if !catalog.contains(id) {
                return Err(format!("unknown artwork id: {id}").into());
            }
            println!("{}", url::share_link(&config.origin, &config.base_path, id));
        }
        Command::Render { url, out } => {
            let mut gallery = open_gallery(&cli, url)?;
            gallery.run_until_idle();
            let html = render::render_page(&gallery).into_string();
            match out {
                Some(path) => {
                    std::fs::write(path, html)?;
                    println!("==> Wrote {}", path.display());
                }
                None => println!("{html}"),
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load catalog, config and strings, and mount a gallery at `location`.
fn open_gallery(cli: &Cli, location: &str) -> Result<Gallery, Box<dyn std::error::Error>> {
    let catalog: Catalog = catalog::load_catalog(&cli.catalog)?;
    let config: GalleryConfig = config::load_config(&cli.config)?;
    let (platform, _host) = Platform::in_memory(location);
    let platform = match &cli.strings {
        Some(path) => platform.with_strings(StringTable::load(path)?),
        None => platform,
    };
    let mut gallery = Gallery::new(catalog, config, platform);
    gallery.mount();
    Ok(gallery)
}

/// Install the stderr subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
