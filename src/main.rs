mod cli;
mod model;
mod render;
mod serve;
mod util;
mod view;

use std::error::Error;

use clap::Parser;
use cli::Action;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();

    simple_logger::SimpleLogger::new()
        .with_level(args.action.log_level())
        .init()?;

    match args.action {
        Action::Serve(serve) => serve.run().await?,
        Action::Render(render) => render.run().await?,
    }

    Ok(())
}
