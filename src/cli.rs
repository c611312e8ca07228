use clap::Parser;

use crate::utils::version;

/// Lists the local branches and switches to the one you pick.
#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {}
