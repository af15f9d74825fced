use clap::{Parser, Subcommand};

mod args;

#[cfg(test)]
mod tests;

pub use args::{PolicyArgs, TimelineArgs, WebArgs};

#[derive(Debug, Parser)]
#[command(name = "oobflash")]
#[command(about = "Out-of-band flash notifications for partial-update web apps", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the demo app with the injection middleware installed.
    Serve(WebArgs),
    /// Print the injection decision for a request/response shape.
    Policy(PolicyArgs),
    /// Print when notifications attached at the given offsets dismiss.
    Timeline(TimelineArgs),
}
