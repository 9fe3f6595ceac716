//! Job Links CLI — entry point.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use job_links::{
    clean_job_url, extract_job_info, format_urls, is_valid_job_url, CleanOptions, Extractor, Site,
};
use job_links_cli::config::{format_options, resolve_site, resolve_site_with};
use job_links_cli::input::{read_candidates, read_jsonld_blocks};

#[derive(Parser)]
#[command(
    name = "job-links",
    about = "Extract, clean and deduplicate job posting links from job boards",
    version
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Output results as JSON (machine-readable).
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract job links from candidate URLs (one per line).
    Extract {
        /// Site key (seek, linkedin, indeed, trademe).
        /// Also reads from JOB_LINKS_SITE env var.
        #[arg(short, long)]
        site: Option<String>,

        /// URL of the page the candidates came from, used to detect the site.
        /// Also reads from JOB_LINKS_PAGE_URL env var.
        #[arg(long)]
        page_url: Option<String>,

        /// Candidate file, or - for stdin.
        #[arg(short, long, default_value = "-")]
        input: String,

        /// File holding one application/ld+json block. Repeatable.
        #[arg(long)]
        jsonld: Vec<String>,

        /// Keep query strings on non-LinkedIn links.
        #[arg(long)]
        keep_query: bool,

        /// Prefix each link with its 1-based position.
        #[arg(long)]
        index: bool,

        /// Print a "Total: N links" header.
        #[arg(long)]
        count: bool,

        /// Separator between links (\n and \t escapes allowed).
        #[arg(long, default_value = "\\n")]
        separator: String,
    },

    /// Canonicalize URLs without site validation.
    Clean {
        /// URLs to clean.
        #[arg(required = true)]
        urls: Vec<String>,

        /// Keep the #fragment.
        #[arg(long)]
        keep_hash: bool,

        /// Keep the query string.
        #[arg(long)]
        keep_query: bool,
    },

    /// Check whether a URL is a job-detail page for a site.
    Validate {
        url: String,

        /// Site key (seek, linkedin, indeed, trademe).
        #[arg(short, long)]
        site: String,
    },

    /// Show the job id recovered from a URL.
    Info {
        url: String,

        /// Site key. Detected from the URL when omitted.
        #[arg(short, long)]
        site: Option<String>,
    },

    /// Print supported sites as JSON.
    Sites,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   job-links completions bash > ~/.local/share/bash-completion/completions/job-links
    ///   job-links completions zsh > ~/.zfunc/_job-links
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },

    /// Launch interactive REPL mode.
    Repl {
        /// Site key or page URL to start with.
        #[arg(short, long)]
        site: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Extract {
            site,
            page_url,
            input,
            jsonld,
            keep_query,
            index,
            count,
            separator,
        } => {
            let site = resolve_site(site.as_deref(), page_url.as_deref())?;
            let candidates = read_candidates(&input)?;
            let blocks = read_jsonld_blocks(&jsonld)?;

            let mut extractor = Extractor::new(site).with_options(CleanOptions {
                remove_tracking: !keep_query,
                ..site.clean_options()
            });
            if !blocks.is_empty() {
                extractor = extractor.with_structured_data(blocks);
            }

            let extraction = extractor.run(&|| candidates.clone());
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&extraction)?);
            } else if extraction.is_empty() {
                eprintln!("No job links found on {}.", site.display_name());
            } else {
                let opts = format_options(&separator, index, count);
                println!("{}", format_urls(&extraction.links, &opts));
            }
        }

        Commands::Clean {
            urls,
            keep_hash,
            keep_query,
        } => {
            let opts = CleanOptions {
                remove_tracking: !keep_query,
                remove_hash: !keep_hash,
                ..CleanOptions::default()
            };
            let cleaned: Vec<(String, String)> = urls
                .into_iter()
                .map(|url| {
                    let c = clean_job_url(&url, &opts);
                    (url, c)
                })
                .collect();

            if cli.json {
                let items: Vec<_> = cleaned
                    .iter()
                    .map(|(url, c)| serde_json::json!({ "url": url, "cleaned": c }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                for (url, c) in &cleaned {
                    if c.is_empty() {
                        eprintln!("Discarded: {url}");
                    } else {
                        println!("{c}");
                    }
                }
            }
        }

        Commands::Validate { url, site } => {
            let site: Site = site.parse()?;
            let valid = is_valid_job_url(&url, site);
            if cli.json {
                let out = serde_json::json!({ "url": url, "site": site, "valid": valid });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else if valid {
                println!("Valid {} job URL: {url}", site.display_name());
            } else {
                println!("Not a {} job URL: {url}", site.display_name());
            }
            if !valid {
                std::process::exit(1);
            }
        }

        Commands::Info { url, site } => {
            let site = match site {
                Some(key) => key.parse::<Site>()?,
                None => resolve_site_with(None, None, Some(&url))?,
            };
            let info = extract_job_info(&url, site);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Site: {}", site.display_name());
                println!("URL:  {}", info.url);
                println!("Id:   {}", info.id.as_deref().unwrap_or("(none)"));
            }
        }

        Commands::Sites => {
            let sites: Vec<_> = Site::ALL
                .iter()
                .map(|site| {
                    let rules = site.rules();
                    serde_json::json!({
                        "key": rules.key,
                        "name": rules.name,
                        "domains": rules.domains,
                        "path_markers": rules.path_markers,
                        "excluded_paths": rules.excluded_paths,
                        "page_pattern": rules.page_pattern.source(),
                        "structured_data": rules.structured_data_marker.is_some(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&sites)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "job-links", &mut std::io::stdout());
        }

        Commands::Repl { site } => {
            let site = site
                .as_deref()
                .and_then(|s| s.parse::<Site>().ok().or_else(|| Site::detect(s)));
            job_links_cli::repl::run(site)?;
        }
    }

    Ok(())
}
