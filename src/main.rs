use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::error;

use crate::{
  app::App,
  cli::Cli,
  config::Config,
  error::Error,
  git::GitCliRepo,
  utils::{initialize_logging, initialize_panic_handler},
};

pub mod action;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod error;
pub mod git;
pub mod tui;
pub mod utils;

async fn tokio_main() -> Result<()> {
  initialize_logging()?;
  initialize_panic_handler()?;

  Cli::parse();

  let config = Config::new()?;
  let repo = Arc::new(GitCliRepo::from_cwd()?);
  match App::new(config, repo).await {
    Ok(mut app) => app.run().await?,
    Err(e) => {
      if let Some(err) = e.downcast_ref::<Error>() {
        if err.is_fatal_at_startup() {
          error!("Unable to start: {}", err);
          eprintln!("Error: {err}");
          std::process::exit(1);
        }
      }
      return Err(e);
    },
  }

  Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
  if let Err(e) = tokio_main().await {
    eprintln!("{} error: Something went wrong", env!("CARGO_PKG_NAME"));
    Err(e)
  } else {
    Ok(())
  }
}
