//! Command-line interface definitions and dispatch.

mod common;
mod config;
mod contact;
mod experience;
mod fetch;
mod locale;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use folio::{Locale, Resource};

/// Portfolio data gateway CLI.
#[derive(Parser, Debug)]
#[command(name = "folio", version, about)]
pub(crate) struct Cli {
    /// Path to config.json (default: ~/.folio/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Skip the network entirely and serve fixtures
    #[arg(long, global = true)]
    pub offline: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Fetch one or more records (or `all`)
    Fetch {
        /// Resource keys, e.g. personal-info, projects, featured-projects
        #[arg(required = true)]
        resources: Vec<String>,
        /// Print raw JSON payloads
        #[arg(long)]
        json: bool,
        /// Print cache statistics afterwards
        #[arg(long)]
        stats: bool,
    },
    /// Send the contact form
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
    /// Subscribe an address to the newsletter
    Subscribe { email: String },
    /// Show or change the site language
    Locale {
        #[command(subcommand)]
        action: LocaleAction,
    },
    /// Browse the Experience tabs
    Experience {
        /// Tab index to open (0-based)
        #[arg(long, conflicts_with = "company")]
        tab: Option<usize>,
        /// Company name of the tab to open
        #[arg(long)]
        company: Option<String>,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub(crate) enum LocaleAction {
    /// Print the active language
    Show,
    /// Persist a new language and clear cached records
    Set { locale: Locale },
}

#[derive(Subcommand, Debug)]
pub(crate) enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
}

/// Expand `all` and parse resource keys.
pub(crate) fn parse_resources(raw: &[String]) -> Result<Vec<Resource>> {
    if raw.iter().any(|r| r.eq_ignore_ascii_case("all")) {
        return Ok(Resource::ALL.to_vec());
    }
    raw.iter()
        .map(|r| r.parse::<Resource>().map_err(anyhow::Error::from))
        .collect()
}

pub(crate) async fn run(cli: Cli) -> Result<()> {
    let ctx = common::AppContext::load(cli.config.as_deref(), cli.offline)?;

    match cli.command {
        Commands::Fetch {
            resources,
            json,
            stats,
        } => fetch::cmd_fetch(&ctx, &parse_resources(&resources)?, json, stats).await,
        Commands::Contact {
            name,
            email,
            subject,
            message,
        } => {
            let form = folio::models::ContactForm {
                name,
                email,
                subject,
                message,
            };
            contact::cmd_contact(&ctx, form).await
        }
        Commands::Subscribe { email } => contact::cmd_subscribe(&ctx, &email).await,
        Commands::Locale { action } => locale::cmd_locale(&ctx, action),
        Commands::Experience { tab, company } => {
            experience::cmd_experience(&ctx, tab, company.as_deref()).await
        }
        Commands::Config { action } => config::cmd_config(&ctx, action),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_fetch_command() {
        let cli = Cli::try_parse_from(["folio", "--offline", "fetch", "projects", "--stats"]).unwrap();
        assert!(cli.offline);
        match cli.command {
            Commands::Fetch { resources, stats, json } => {
                assert_eq!(resources, ["projects"]);
                assert!(stats);
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_locale_set() {
        let cli = Cli::try_parse_from(["folio", "locale", "set", "en"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Locale {
                action: LocaleAction::Set { locale: Locale::En }
            }
        ));
        assert!(Cli::try_parse_from(["folio", "locale", "set", "fr"]).is_err());
    }

    #[test]
    fn test_parse_resources_all_and_unknown() {
        let all = parse_resources(&["all".to_string()]).unwrap();
        assert_eq!(all.len(), Resource::ALL.len());
        let some = parse_resources(&["projects".into(), "about-info".into()]).unwrap();
        assert_eq!(some, [Resource::Projects, Resource::AboutInfo]);
        assert!(parse_resources(&["resume".to_string()]).is_err());
    }

    #[test]
    fn test_experience_tab_conflicts_with_company() {
        assert!(Cli::try_parse_from(["folio", "experience", "--tab", "1", "--company", "X"]).is_err());
    }
}
