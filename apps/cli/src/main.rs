use std::{fmt::Write as _, sync::Arc};

use anyhow::{bail, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use client_core::{
    config::{load_settings, normalize_base_url},
    validate, FetchPhase, FieldErrors, HttpSuperheroApi, RosterClient, RosterHandle,
    RosterSnapshot, SubmitOutcome, SuperheroForm,
};
use shared::{
    domain::{SortOrder, Superhero},
    protocol::SuperheroListResponse,
};

#[derive(Parser, Debug)]
#[command(name = "heroes", about = "Superhero roster client")]
struct Cli {
    /// Roster service base URL; overrides heroes.toml and the environment.
    #[arg(long, global = true)]
    api_base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the roster sorted by humility score.
    List {
        #[arg(long, value_parser = parse_order)]
        order: Option<SortOrder>,
        #[arg(long)]
        json: bool,
    },
    /// Validate, create, then print the refreshed roster.
    Add {
        #[command(flatten)]
        hero: HeroArgs,
        #[arg(long, value_parser = parse_order)]
        order: Option<SortOrder>,
        #[arg(long)]
        json: bool,
    },
    /// Check a record offline without contacting the service.
    Validate {
        #[command(flatten)]
        hero: HeroArgs,
    },
}

#[derive(ClapArgs, Debug)]
struct HeroArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    superpower: String,
    #[arg(long, default_value = "")]
    humility_score: String,
}

impl HeroArgs {
    fn form(&self) -> SuperheroForm {
        SuperheroForm::new(&self.name, &self.superpower, &self.humility_score)
    }
}

fn parse_order(raw: &str) -> Result<SortOrder, String> {
    SortOrder::from_query_value(raw.trim())
        .ok_or_else(|| format!("unknown sort order '{raw}' (expected asc or dsc)"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings();
    if let Some(api_base_url) = cli.api_base_url.as_deref() {
        settings.api_base_url = normalize_base_url(api_base_url);
    }
    let default_order = settings.location().sort_order();

    match cli.command {
        Command::List { order, json } => {
            let client = connect(&settings.api_base_url, order.unwrap_or(default_order));
            client.refresh().await;
            let snapshot = client.snapshot();
            ensure_fetched(&snapshot)?;
            print!("{}", render_output(&snapshot, json)?);
        }
        Command::Add { hero, order, json } => {
            let client = connect(&settings.api_base_url, order.unwrap_or(default_order));
            match client.submit(&hero.form()).await {
                Err(errors) => {
                    eprint!("{}", render_field_errors(&errors));
                    bail!("superhero rejected by validation");
                }
                Ok(SubmitOutcome::Failed(failure)) => bail!("{failure}"),
                Ok(SubmitOutcome::Created) => {
                    let report = created_report(hero.name.trim(), &client.snapshot(), json)?;
                    print!("{}", report.stdout);
                    if let Some(warning) = report.warning {
                        eprintln!("warning: {warning}");
                    }
                }
            }
        }
        Command::Validate { hero } => match validate(&hero.form()) {
            Ok(hero) => println!("valid: {}", describe(&hero)),
            Err(errors) => {
                eprint!("{}", render_field_errors(&errors));
                bail!("superhero rejected by validation");
            }
        },
    }

    Ok(())
}

fn connect(api_base_url: &str, order: SortOrder) -> Arc<RosterClient> {
    let api = HttpSuperheroApi::new(api_base_url);
    tracing::debug!(api_base_url = api.base_url(), order = %order, "using roster service");
    RosterClient::new(Arc::new(api), order)
}

fn ensure_fetched(snapshot: &RosterSnapshot) -> Result<()> {
    if snapshot.phase == FetchPhase::Errored {
        let message = snapshot.fetch_error.as_deref().unwrap_or("Failed to fetch superheroes.");
        bail!("{message}");
    }
    Ok(())
}

/// Output for an acknowledged create. The record is already stored, so a failed
/// follow-up refresh is only a warning.
struct CreatedReport {
    stdout: String,
    warning: Option<String>,
}

fn created_report(name: &str, snapshot: &RosterSnapshot, json: bool) -> Result<CreatedReport> {
    let mut stdout = String::new();
    if !json {
        let _ = writeln!(stdout, "added: {name}");
    }
    if let Err(err) = ensure_fetched(snapshot) {
        return Ok(CreatedReport {
            stdout,
            warning: Some(format!("{name} was added but the roster could not be reloaded: {err}")),
        });
    }
    stdout.push_str(&render_output(snapshot, json)?);
    Ok(CreatedReport {
        stdout,
        warning: None,
    })
}

fn render_output(snapshot: &RosterSnapshot, json: bool) -> Result<String> {
    if json {
        let body = SuperheroListResponse {
            data: snapshot.heroes.clone(),
        };
        return Ok(serde_json::to_string_pretty(&body)? + "\n");
    }
    Ok(render_roster(&snapshot.heroes, snapshot.order))
}

fn describe(hero: &Superhero) -> String {
    format!(
        "{} ({}, humility {})",
        hero.name, hero.superpower, hero.humility_score
    )
}

fn render_roster(heroes: &[Superhero], order: SortOrder) -> String {
    let mut out = String::new();
    if heroes.is_empty() {
        out.push_str("No superheroes added yet!\nAdd some to see the list here.\n");
        return out;
    }
    let _ = writeln!(out, "Sort: {}", order.label());
    for (index, hero) in heroes.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {}", index + 1, describe(hero));
    }
    out
}

fn render_field_errors(errors: &FieldErrors) -> String {
    let mut out = String::new();
    for (field, message) in errors.iter() {
        let _ = writeln!(out, "{}: {message}", field.label());
    }
    out
}
