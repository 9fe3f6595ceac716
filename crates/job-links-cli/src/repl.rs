//! Interactive REPL for collecting and cleaning job links.
//!
//! Launch with `job-links repl`. Paste URLs to collect them, `/list` to see
//! the cleaned set. Type `/help` for available commands, Tab for completion.

use rustyline::completion::{Completer, Pair};
use rustyline::config::CompletionType;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{
    Cmd, ConditionalEventHandler, Config, Editor, Event, EventContext, EventHandler, Helper,
    KeyEvent, RepeatCount,
};

use job_links::{
    clean_job_url_default, extract_job_info, format_urls, is_valid_job_url, Extractor,
    FormatOptions, Site,
};

use crate::config::resolve_history_path;

/// Available REPL commands.
const COMMANDS: &[(&str, &str)] = &[
    ("/site", "Show or set the site (key or page URL)"),
    ("/add", "Add candidate URLs (bare lines work too)"),
    ("/list", "Show the cleaned, deduplicated links"),
    ("/clean", "Canonicalize a single URL"),
    ("/validate", "Check a URL against the current site"),
    ("/info", "Show the job id recovered from a URL"),
    ("/sites", "List supported sites"),
    ("/reset", "Forget collected candidates"),
    ("/clear", "Clear the screen"),
    ("/help", "Show available commands"),
    ("/exit", "Quit the REPL"),
];

/// REPL helper for tab completion.
#[derive(Default)]
struct LinksHelper;

impl Completer for LinksHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let input = &line[..pos];

        if !input.contains(' ') {
            let matches: Vec<Pair> = COMMANDS
                .iter()
                .filter(|(cmd, _)| cmd.starts_with(input))
                .map(|(cmd, desc)| Pair {
                    display: format!("{cmd:<16} {desc}"),
                    replacement: format!("{cmd} "),
                })
                .collect();
            return Ok((0, matches));
        }

        // site key completion
        let parts: Vec<&str> = input.splitn(2, ' ').collect();
        let cmd = parts[0];
        let args = if parts.len() > 1 { parts[1] } else { "" };

        if cmd == "/site" {
            let prefix_start = input.len() - args.len();
            let matches: Vec<Pair> = Site::ALL
                .iter()
                .map(|s| s.key())
                .filter(|k| k.starts_with(args.trim()))
                .map(|k| Pair {
                    display: k.to_string(),
                    replacement: format!("{k} "),
                })
                .collect();
            return Ok((prefix_start, matches));
        }

        Ok((pos, Vec::new()))
    }
}

impl Hinter for LinksHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        if pos < line.len() || line.is_empty() {
            return None;
        }
        if line.starts_with('/') && !line.contains(' ') {
            for (cmd, _) in COMMANDS {
                if cmd.starts_with(line) && *cmd != line {
                    return Some(cmd[line.len()..].to_string());
                }
            }
        }
        None
    }
}

impl Highlighter for LinksHelper {}
impl Validator for LinksHelper {}
impl Helper for LinksHelper {}

struct TabCompleteOrAcceptHint;

impl ConditionalEventHandler for TabCompleteOrAcceptHint {
    fn handle(
        &self,
        _evt: &Event,
        _n: RepeatCount,
        _positive: bool,
        ctx: &EventContext<'_>,
    ) -> Option<Cmd> {
        if ctx.has_hint() {
            Some(Cmd::CompleteHint)
        } else {
            Some(Cmd::Complete)
        }
    }
}

/// Session state.
#[derive(Debug, Default)]
pub struct ReplState {
    pub site: Option<Site>,
    pub candidates: Vec<String>,
}

impl ReplState {
    pub fn new(site: Option<Site>) -> Self {
        Self {
            site,
            candidates: Vec::new(),
        }
    }

    /// Add whitespace-separated URLs. Returns how many were added.
    pub fn add(&mut self, args: &str) -> usize {
        let before = self.candidates.len();
        self.candidates
            .extend(args.split_whitespace().map(str::to_string));
        self.candidates.len() - before
    }

    /// Cleaned links for the current site, or `None` when no site is set.
    pub fn links(&self) -> Option<Vec<String>> {
        let site = self.site?;
        Some(Extractor::new(site).extract(&|| self.candidates.clone()))
    }

    pub fn reset(&mut self) {
        self.candidates.clear();
    }
}

/// Run the interactive REPL.
pub fn run(site: Option<Site>) -> anyhow::Result<()> {
    eprintln!();
    eprintln!(
        "  \x1b[32m\u{25c9}\x1b[0m \x1b[1mjob-links v{}\x1b[0m \x1b[90m\u{2014} Job board link extractor\x1b[0m",
        env!("CARGO_PKG_VERSION")
    );
    eprintln!();
    eprintln!(
        "    Paste URLs to collect them, \x1b[36m/list\x1b[0m to see results, \x1b[90m/exit\x1b[0m to quit."
    );
    eprintln!();

    let config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .completion_type(CompletionType::List)
        .completion_prompt_limit(20)
        .build();

    let mut rl: Editor<LinksHelper, rustyline::history::DefaultHistory> =
        Editor::with_config(config)?;
    rl.set_helper(Some(LinksHelper));
    rl.bind_sequence(
        KeyEvent::from('\t'),
        EventHandler::Conditional(Box::new(TabCompleteOrAcceptHint)),
    );

    let hist_path = resolve_history_path();
    if hist_path.exists() {
        let _ = rl.load_history(&hist_path);
    }

    let mut state = ReplState::new(site);
    let prompt = " \x1b[36mlinks>\x1b[0m ";

    loop {
        match rl.readline(prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let Some(input) = line.strip_prefix('/') else {
                    cmd_add(line, &mut state);
                    continue;
                };
                if input.is_empty() {
                    cmd_help();
                    continue;
                }

                let mut parts = input.splitn(2, ' ');
                let cmd = parts.next().unwrap_or("");
                let args = parts.next().unwrap_or("").trim();

                match cmd {
                    "exit" | "quit" => {
                        eprintln!("  \x1b[90m\u{2728}\x1b[0m Goodbye!");
                        break;
                    }
                    "help" | "h" | "?" => cmd_help(),
                    "clear" | "cls" => eprint!("\x1b[2J\x1b[H"),
                    "site" => cmd_site(args, &mut state),
                    "sites" => cmd_sites(),
                    "add" => cmd_add(args, &mut state),
                    "list" | "ls" => cmd_list(&state),
                    "clean" => cmd_clean(args),
                    "validate" => cmd_validate(args, &state),
                    "info" => cmd_info(args, &state),
                    "reset" => {
                        state.reset();
                        eprintln!("  Candidates cleared.");
                    }
                    _ => {
                        eprintln!("  Unknown command '/{cmd}'. Type /help for commands.");
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                eprintln!("  \x1b[90m(Ctrl+C)\x1b[0m Type \x1b[1m/exit\x1b[0m to quit.");
            }
            Err(ReadlineError::Eof) => {
                eprintln!("  \x1b[90m\u{2728}\x1b[0m Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("  Error: {err}");
                break;
            }
        }
    }

    let _ = std::fs::create_dir_all(hist_path.parent().unwrap_or(std::path::Path::new(".")));
    let _ = rl.save_history(&hist_path);

    Ok(())
}

fn cmd_help() {
    eprintln!();
    eprintln!("  Commands:");
    eprintln!();
    for (cmd, desc) in COMMANDS {
        eprintln!("    {cmd:<18} {desc}");
    }
    eprintln!();
    eprintln!("  Tip: lines that do not start with / are added as candidates.");
    eprintln!();
}

fn cmd_site(args: &str, state: &mut ReplState) {
    if args.is_empty() {
        match state.site {
            Some(site) => eprintln!("  Site: {} ({site})", site.display_name()),
            None => eprintln!("  No site set. Usage: /site <key|page-url>"),
        }
        return;
    }

    let arg = args.split_whitespace().next().unwrap_or(args);
    let resolved = arg.parse::<Site>().ok().or_else(|| Site::detect(arg));
    match resolved {
        Some(site) => {
            state.site = Some(site);
            eprintln!("  {} detected", site.display_name());
        }
        None => eprintln!("  Site not supported: {arg}"),
    }
}

fn cmd_sites() {
    eprintln!();
    for site in Site::ALL {
        eprintln!("    {:<10} {}", site.key(), site.display_name());
    }
    eprintln!();
}

fn cmd_add(args: &str, state: &mut ReplState) {
    if args.is_empty() {
        eprintln!("  Usage: /add <url> [url...]");
        return;
    }
    let added = state.add(args);
    eprintln!(
        "  Added {added} candidate(s), {} collected.",
        state.candidates.len()
    );
}

fn cmd_list(state: &ReplState) {
    let Some(links) = state.links() else {
        eprintln!("  No site set. Usage: /site <key|page-url>");
        return;
    };

    if links.is_empty() {
        eprintln!("  No job links found.");
        return;
    }

    let opts = FormatOptions {
        include_index: true,
        include_count: true,
        ..FormatOptions::default()
    };
    println!("{}", format_urls(&links, &opts));
}

fn cmd_clean(args: &str) {
    if args.is_empty() {
        eprintln!("  Usage: /clean <url>");
        return;
    }
    for url in args.split_whitespace() {
        let cleaned = clean_job_url_default(url);
        if cleaned.is_empty() {
            eprintln!("  {url} -> (discarded)");
        } else {
            println!("{cleaned}");
        }
    }
}

fn cmd_validate(args: &str, state: &ReplState) {
    let Some(site) = state.site else {
        eprintln!("  No site set. Usage: /site <key|page-url>");
        return;
    };
    if args.is_empty() {
        eprintln!("  Usage: /validate <url>");
        return;
    }
    for url in args.split_whitespace() {
        let verdict = if is_valid_job_url(url, site) {
            "valid"
        } else {
            "invalid"
        };
        eprintln!("  {verdict}: {url}");
    }
}

fn cmd_info(args: &str, state: &ReplState) {
    if args.is_empty() {
        eprintln!("  Usage: /info <url>");
        return;
    }
    let url = args.split_whitespace().next().unwrap_or(args);
    let Some(site) = state.site.or_else(|| Site::detect(url)) else {
        eprintln!("  No site set and none detected for {url}");
        return;
    };
    let info = extract_job_info(url, site);
    eprintln!();
    eprintln!("  Site: {}", site.display_name());
    eprintln!("  URL:  {}", info.url);
    eprintln!("  Id:   {}", info.id.as_deref().unwrap_or("(none)"));
    eprintln!();
}
