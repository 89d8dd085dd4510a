//! CLI command implementations for agentdeck.
//!
//! Provides subcommand handlers for:
//! - `agentdeck query "text" --agent crypto` — submit a query and print the rendered results
//! - `agentdeck render [file]` — render a saved `/api/query` response
//! - `agentdeck agents` / `agentdeck health` — inspect the demo server
//! - `agentdeck nav show|toggle|collapse|open|forget|clear` — manage persisted section state
//! - `agentdeck copy <file>` — copy a file's text with copy-control feedback
//! - `agentdeck config show|init|path` — configuration management

use std::io::Read;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::{self, DeckConfig};
use crate::copy::{Clipboard, CopyHelper, CopyStatus, MemoryClipboard, Placement, SystemClipboard};
use crate::nav::{NavMenu, NavSection, NavState, NavStore, SectionId};
use crate::query::{AgentCheckbox, DemoPage, HttpTransport, Outcome, QueryResponse};
use crate::render::{AgentKind, render_document, render_error, render_results};

// ---------------------------------------------------------------------------
// agentdeck query
// ---------------------------------------------------------------------------

/// Submit a query to the demo server and print the rendered results.
///
/// Without `--agent` flags every agent listed in `query.agents` is checked.
/// Requested agents the config doesn't list are added as extra checkboxes.
pub fn run_query(
    text: &str,
    agents: &[String],
    endpoint: Option<&str>,
    as_page: bool,
) -> Result<()> {
    let cfg = config::load();
    let transport = transport_for(&cfg, endpoint);
    let mut page = build_demo_page(&cfg, text, agents);

    let outcome = match page.submit(&transport) {
        Ok(outcome) => outcome,
        Err(notice) => {
            eprintln!("{}", notice.to_string().yellow());
            return Ok(());
        }
    };

    print_fragment(&format!("Results: {}", text.trim()), page.results.html(), as_page);

    match outcome {
        Outcome::Rendered => {}
        Outcome::ServerError => eprintln!("{}", "Server reported an error.".red()),
        Outcome::TransportError => eprintln!(
            "{} {}",
            "Could not reach".red(),
            transport.base_url().red()
        ),
        Outcome::Stale => {}
    }

    Ok(())
}

/// Build the page the CLI submits from.
pub fn build_demo_page(cfg: &DeckConfig, text: &str, agents: &[String]) -> DemoPage {
    let mut page = DemoPage::with_agents(cfg.query.agents.iter().cloned());
    for agent in agents {
        if !page.checkboxes.iter().any(|cb| &cb.value == agent) {
            page.checkboxes.push(AgentCheckbox::new(agent.clone(), false));
        }
    }

    if agents.is_empty() {
        for checkbox in &mut page.checkboxes {
            checkbox.checked = true;
        }
    } else {
        for agent in agents {
            page.set_checked(agent, true);
        }
    }

    page.query_input = text.to_string();
    page
}

fn transport_for(cfg: &DeckConfig, endpoint: Option<&str>) -> HttpTransport {
    let mut query = cfg.query.clone();
    if let Some(url) = endpoint {
        query.endpoint = url.to_string();
    }
    HttpTransport::from_config(&query)
}

fn print_fragment(title: &str, fragment: &str, as_page: bool) {
    if as_page {
        print!("{}", render_document(title, fragment));
    } else {
        print!("{fragment}");
    }
}

// ---------------------------------------------------------------------------
// agentdeck render
// ---------------------------------------------------------------------------

/// Render a saved `/api/query` response from a file, or stdin.
pub fn run_render(file: Option<&Path>, as_page: bool) -> Result<()> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed reading response from stdin")?;
            buf
        }
    };

    let fragment = render_response_text(&raw)?;
    print_fragment("Agent results", &fragment, as_page);
    Ok(())
}

/// Render response JSON the way the page would: results on success, the
/// error panel otherwise.
pub fn render_response_text(raw: &str) -> Result<String> {
    let response: QueryResponse =
        serde_json::from_str(raw).context("response is not valid query JSON")?;
    Ok(if response.is_success() {
        render_results(&response.results)
    } else {
        render_error(response.error_message())
    })
}

// ---------------------------------------------------------------------------
// agentdeck agents / health
// ---------------------------------------------------------------------------

pub fn run_agents(endpoint: Option<&str>) -> Result<()> {
    let cfg = config::load();
    let transport = transport_for(&cfg, endpoint);
    let listing = transport.agents()?;

    println!("{}", "Available agents".bold().cyan());
    for agent in &listing.agents {
        let kind = AgentKind::from_key(agent);
        match kind.formatter() {
            Some(formatter) => println!("  {} {agent} ({} formatter)", kind.icon(), formatter.name()),
            None => println!("  {} {agent} {}", kind.icon(), "(not rendered)".dimmed()),
        }
    }
    println!("  {} {}", "Total:".bold(), listing.agents.len());
    Ok(())
}

pub fn run_health(endpoint: Option<&str>) -> Result<()> {
    let cfg = config::load();
    let transport = transport_for(&cfg, endpoint);

    println!("{}", "agentdeck Health Check".bold().cyan());
    println!("{}", "=".repeat(40));
    println!("  {} {}", "Endpoint:".bold(), transport.base_url());

    match transport.health() {
        Ok(health) if health.status == "healthy" => {
            let agents = health
                .agents_available
                .map_or_else(|| "?".to_string(), |n| n.to_string());
            println!("  {} {} ({agents} agents)", "Server:".bold(), "healthy".green());
        }
        Ok(health) => println!("  {} {}", "Server:".bold(), health.status.yellow()),
        Err(err) => println!("  {} {} ({err:#})", "Server:".bold(), "unreachable".red()),
    }

    let nav_path = config::expand_home(&cfg.nav.state_path);
    println!(
        "  {} {}",
        "Nav state:".bold(),
        if nav_path.exists() {
            nav_path.display().to_string().green()
        } else {
            "none yet".dimmed()
        }
    );
    println!("  {} {}", "Copy policy:".bold(), cfg.copy.policy);
    match crate::logging::log_path() {
        Some(path) => println!("  {} {}", "Log file:".bold(), path.display()),
        None => println!("  {} {}", "Log file:".bold(), "disabled".dimmed()),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// agentdeck nav
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
    Show,
    Toggle(String),
    Collapse(String),
    Open(String),
    Forget(String),
    Clear,
}

pub fn run_nav(action: NavAction) -> Result<()> {
    let cfg = config::load();
    let mut store = NavStore::load(config::expand_home(&cfg.nav.state_path))?;

    match action {
        NavAction::Show => {
            if store.is_empty() {
                println!("{}", "No saved navigation state.".yellow());
                return Ok(());
            }
            println!(
                "{} {}",
                "Navigation sections".bold().cyan(),
                store.path().display().to_string().dimmed()
            );
            for (id, state) in store.iter() {
                let state = match state {
                    NavState::Open => state.to_string().green(),
                    NavState::Collapsed => state.to_string().dimmed(),
                };
                println!("  {:<30} {}", id.as_str(), state);
            }
            return Ok(());
        }
        NavAction::Toggle(id) => {
            let state = toggle_section(&mut store, section_id(&id)?)?;
            println!("{id}: {state}");
        }
        NavAction::Collapse(id) => {
            store.set(section_id(&id)?, NavState::Collapsed);
            println!("{id}: {}", NavState::Collapsed);
        }
        NavAction::Open(id) => {
            store.set(section_id(&id)?, NavState::Open);
            println!("{id}: {}", NavState::Open);
        }
        NavAction::Forget(id) => match store.remove(&section_id(&id)?) {
            Some(_) => println!("{id}: forgotten"),
            None => println!("{}", format!("No saved state for {id}.").yellow()),
        },
        NavAction::Clear => {
            store.clear();
            println!("{}", "Navigation state cleared.".green());
        }
    }

    store.save()
}

/// Parse a section id given on the command line.
pub fn section_id(id: &str) -> Result<SectionId> {
    match SectionId::declared(id) {
        Some(id) => Ok(id),
        None => anyhow::bail!("section id must not be empty"),
    }
}

/// Load the section into a one-entry menu, restore it, and click it.
pub fn toggle_section(store: &mut NavStore, id: SectionId) -> Result<NavState> {
    let mut menu = NavMenu::new(vec![NavSection {
        id: Some(id),
        ..NavSection::default()
    }]);
    menu.restore(store);
    menu.toggle(0, store)
}

// ---------------------------------------------------------------------------
// agentdeck copy
// ---------------------------------------------------------------------------

/// Copy a file's text to the clipboard through a standalone copy control.
pub fn run_copy(file: &Path, dry_run: bool) -> Result<()> {
    let cfg = config::load();
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let helper = CopyHelper::from_config(&cfg.copy);
    let mut button = helper.button(Placement::Standalone);
    let mut memory = MemoryClipboard::new();
    let mut system = SystemClipboard;
    let clipboard: &mut dyn Clipboard = if dry_run { &mut memory } else { &mut system };

    match button.click(Some(&text), clipboard, Instant::now()) {
        CopyStatus::Copied => println!("{}", button.label().green()),
        CopyStatus::Failed => println!("{}", button.label().red()),
        CopyStatus::NothingToCopy => {}
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// agentdeck config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    Show,
    Init { force: bool },
    Path,
}

pub fn run_config(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => print!("{}", config::show_effective_config()?),
        ConfigAction::Init { force } => {
            let path = config::init_config(force)?;
            println!("{} {}", "Wrote".green(), path.display());
        }
        ConfigAction::Path => {
            let show = |label: &str, path: Option<std::path::PathBuf>| match path {
                Some(path) if path.exists() => {
                    println!("  {label:<8} {}", path.display().to_string().green())
                }
                Some(path) => println!("  {label:<8} {} (absent)", path.display()),
                None => println!("  {label:<8} unavailable"),
            };
            show("global", config::global_config_file());
            show("project", config::project_config_file());
        }
    }
    Ok(())
}
