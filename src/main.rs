use clap::{Parser, Subcommand, ValueEnum};
use diecast_site::autoplay::{Slideshow, SlideshowEvent};
use diecast_site::carousel::Carousel;
use diecast_site::{config, generate, output, scan};
use std::path::{Path, PathBuf};
use std::time::Duration;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "diecast-site")]
#[command(about = "Static marketing site generator for a die-casting manufacturer")]
#[command(long_about = "\
Static marketing site generator for a die-casting manufacturer

The content directory is the data source. Section directories become
carousels, news articles are paged, and numbered markdown files become pages.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── hero.md                      # Home page banner: title, tagline, [button](/href)
  ├── assets/                      # Copied verbatim to the output root
  ├── about/                       # Rotating about panel
  │   └── 010-since-1968.md
  ├── products/                    # Product carousel + one page per product
  │   ├── 010-gearbox-housing.md
  │   └── 010-gearbox-housing.jpg  # Optional image with the same stem
  ├── industries/                  # Industries carousel
  ├── news/                        # Higher number = newer
  │   └── 060-new-press-line.md
  ├── 010-history.md               # Page (numbered = shown in nav)
  ├── 020-contact.md               # Contact page gets the contact form
  └── 030-catalog.md               # URL-only .md → external nav link

Run 'diecast-site gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".diecast-site-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Produce the HTML site from a scanned manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build,
    /// Validate content directory without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Run a section's carousel with its auto-advance timer in the terminal
    Preview(PreviewArgs),
}

#[derive(clap::Args)]
struct PreviewArgs {
    /// Carousel to run
    #[arg(long, value_enum, default_value_t = Section::About)]
    section: Section,

    /// Stop after this many timer ticks
    #[arg(long, default_value_t = 5)]
    ticks: u64,

    /// Override the configured interval
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Navigation to post before the first tick: next, prev, or a slide number
    #[arg(long, value_delimiter = ',', value_parser = parse_event)]
    input: Vec<SlideshowEvent>,
}

fn parse_event(s: &str) -> Result<SlideshowEvent, String> {
    match s.trim() {
        "next" => Ok(SlideshowEvent::Next),
        "prev" | "previous" => Ok(SlideshowEvent::Previous),
        other => match other.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(SlideshowEvent::GoTo(n - 1)),
            _ => Err(format!("expected next, prev or a slide number, got '{other}'")),
        },
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Section {
    About,
    Products,
    Industries,
}

impl Section {
    fn name(self) -> &'static str {
        match self {
            Section::About => "about",
            Section::Products => "products",
            Section::Industries => "industries",
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&cli.temp_dir, &manifest)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let manifest_content = std::fs::read_to_string(&manifest_path)?;
            let manifest: diecast_site::types::Manifest = serde_json::from_str(&manifest_content)?;
            init_thread_pool(&manifest.config.processing);
            let report = generate::generate_site(&manifest, &cli.source, &cli.output)?;
            output::print_generate_output(&report);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            let manifest_path = write_manifest(&cli.temp_dir, &manifest)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            init_thread_pool(&manifest.config.processing);
            let report = generate::generate(&manifest_path, &cli.source, &cli.output)?;
            output::print_generate_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Preview(args) => preview(&cli.source, &args)?,
    }

    Ok(())
}

fn write_manifest(
    temp_dir: &Path,
    manifest: &diecast_site::types::Manifest,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(temp_dir)?;
    let manifest_path = temp_dir.join("manifest.json");
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(&manifest_path, json)?;
    Ok(manifest_path)
}

/// Mount the section's carousel, print each applied tick, then unmount.
fn preview(source: &Path, args: &PreviewArgs) -> Result<(), Box<dyn std::error::Error>> {
    let manifest = scan::scan(source)?;
    let name = args.section.name();
    let slides = manifest.section(name).unwrap_or_default();
    if slides.is_empty() {
        return Err(format!("section '{name}' has no slides in {}", source.display()).into());
    }
    let settings = manifest
        .config
        .carousels
        .get(name)
        .cloned()
        .unwrap_or_default();
    let interval = match args.interval_ms {
        Some(ms) => config::check_interval("--interval-ms", ms)?,
        None => Duration::from_millis(settings.interval_ms),
    };

    let carousel = Carousel::with_boundary(slides.iter().collect(), settings.boundary)
        .starting_at(settings.start_index);
    let mut slideshow = Slideshow::mount(carousel, Some(interval));
    let handle = slideshow.handle();
    for event in &args.input {
        handle.send(*event);
    }

    println!(
        "==> Previewing {} ({} slides, every {}ms)",
        name,
        slides.len(),
        interval.as_millis()
    );
    while slideshow.ticks_applied() < args.ticks {
        let Some(event) = slideshow.wait(interval * 2) else {
            break;
        };
        let carousel = slideshow.carousel();
        let title = carousel.current().map(|s| s.title.as_str()).unwrap_or("");
        output::print_slideshow_event(event, carousel.current_index(), carousel.len(), title);
    }

    // Ticks still queued here are discarded by unmount, so report applied ones
    slideshow.stop_autoplay();
    let applied = slideshow.ticks_applied();
    let carousel = slideshow.unmount();
    println!(
        "==> Stopped after {} ticks on slide {}",
        applied,
        carousel.current_index() + 1
    );
    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores. The user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
