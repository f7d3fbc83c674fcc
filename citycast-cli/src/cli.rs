use std::process::ExitCode;

use anyhow::Context;
use citycast_core::{Config, Session};
use clap::{ArgAction, Parser, Subcommand};
use inquire::{InquireError, Text};

use crate::render::{self, RenderStyle};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "citycast", version, about = "Current weather for a city, from OpenWeatherMap")]
pub struct Cli {
    /// Disable ANSI colour themes.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Diagnostic output on stderr; repeat for more (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Prompt for cities until Esc or Ctrl-C (the default).
    Interactive,

    /// Show weather for one city and exit.
    Show {
        /// City name, e.g. "London" or "New York".
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let config = Config::load()?;
        if !config.has_api_key() {
            tracing::warn!("no API key configured");
        }

        let style = RenderStyle { color: !self.no_color, icon_base_url: config.icon_base_url.clone() };
        let mut session = Session::from_config(&config);

        match self.command.unwrap_or(Command::Interactive) {
            Command::Interactive => interactive(&mut session, &style).await,
            Command::Show { city } => {
                let state = session.search(&city.join(" ")).await;
                println!("{}", render::render(state, &style));

                Ok(if state.error().is_some() { ExitCode::FAILURE } else { ExitCode::SUCCESS })
            }
        }
    }
}

async fn interactive(session: &mut Session, style: &RenderStyle) -> anyhow::Result<ExitCode> {
    println!("{}", render::heading(style));

    loop {
        // The prompt only comes back once the previous search has settled.
        let input = match Text::new("City:").with_placeholder("Enter city name").prompt() {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city from terminal"),
        };

        match session.begin_search(&input) {
            Some(pending) => {
                println!("{}", render::render(session.state(), style));
                let outcome = session.fetch(&pending).await;
                session.finish_search(pending, outcome);
            }
            None => tracing::debug!(state = ?session.state(), "search not started"),
        }

        println!("{}", render::render(session.state(), style));
    }

    Ok(ExitCode::SUCCESS)
}
