//! `render` command handler. Renders a single post to a standalone HTML file,
//! with no page address for the share widget to capture.

use std::{error::Error, path::PathBuf};

use chrono::{DateTime, Local};
use clap::Parser;
use dioxus::prelude::VirtualDom;
use log::{debug, info, LevelFilter};
use tokio::{fs, io::AsyncWriteExt};

use crate::{
    model::Site,
    util::{self, db::{parse_post, PostContent}},
    view::{self, PostProps},
};

#[derive(Debug, Parser)]
pub struct Render {
    /// Markdown file to render.
    file: PathBuf,

    /// Site configuration to render with. Defaults are used when omitted.
    #[arg(short, long)]
    site: Option<PathBuf>,

    /// Write the page here instead of standard output.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Adjusts the verbosity of the logger.
    #[arg(long, default_value = "warn")]
    pub log_level: LevelFilter,
}

impl Render {
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        let html = self.render().await?;

        match &self.output {
            Some(output) => {
                fs::write(output, html).await?;
                info!("Wrote {output:?}");
            }
            None => {
                let mut stdout = tokio::io::stdout();
                stdout.write_all(html.as_bytes()).await?;
                stdout.flush().await?;
            }
        }

        Ok(())
    }

    async fn render(&self) -> Result<String, Box<dyn Error>> {
        let site = match &self.site {
            Some(path) => Site::load(path).await?,
            None => Site::default(),
        };

        let id = self.file
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();

        debug!("Rendering {:?} as post {id:?}", self.file);

        let source = fs::read_to_string(&self.file).await?;
        let modified = fs::metadata(&self.file).await?.modified()?;
        let parsed = parse_post(&id, &source)?;

        let content = PostContent {
            id,
            post: parsed.post,
            body: parsed.body,
            timestamp: DateTime::<Local>::from(modified),
        };

        let vdom = VirtualDom::new_with_props(
            view::post,
            PostProps {
                post: content,
                site: site.clone(),
                location: None,
            },
        );

        Ok(util::render_html(vdom, &site.lang))
    }
}
