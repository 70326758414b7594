use clap::{Parser, Subcommand};
use log::LevelFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub action: Action,
}

#[derive(Debug, Subcommand)]
pub enum Action {
    /// Start the HTTP server.
    Serve(crate::serve::Serve),
    /// Render one post to a standalone HTML page.
    Render(crate::render::Render),
}

impl Action {
    pub fn log_level(&self) -> LevelFilter {
        match self {
            Action::Serve(serve) => serve.log_level,
            Action::Render(render) => render.log_level,
        }
    }
}
