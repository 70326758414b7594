//! The post "database" loads markdown posts from disk and caches them for a
//! configurable time-to-live.

use std::{
    collections::HashMap,
    io::{self, ErrorKind},
    path::PathBuf,
    time::{Duration, SystemTime},
};

use chrono::{DateTime, Local};
use comrak::{nodes::NodeValue::FrontMatter, Arena, ComrakOptions};
use log::{debug, error, info, warn};
use tokio::fs;

use crate::model::{Error, Post};

pub struct PostDb {
    posts: HashMap<String, PostEntry>,
    posts_dir: PathBuf,
    ttl: Duration,
}

struct PostEntry {
    updated: SystemTime,
    last_modified: SystemTime,
    parsed: ParsedPost,
}

/// A post after its markdown has been turned into HTML.
#[derive(Debug, PartialEq, Clone)]
pub struct ParsedPost {
    pub post: Post,
    pub body: String,
}

/// Everything the post page needs.
#[derive(Debug, PartialEq, Clone)]
pub struct PostContent {
    pub id: String,
    pub post: Post,
    pub body: String,
    pub timestamp: DateTime<Local>,
}

impl PostDb {
    pub fn new(posts_dir: PathBuf, ttl_seconds: u32) -> Result<Self, io::Error> {
        Ok(Self {
            posts: HashMap::default(),
            posts_dir: dunce::canonicalize(posts_dir)?,
            ttl: Duration::from_secs(ttl_seconds as u64),
        })
    }

    /// Loads post `id`, reusing the cached copy while it is younger than the
    /// TTL or the file is unchanged. `Ok(None)` means there is no such post.
    pub async fn refresh(&mut self, id: &str) -> Result<Option<PostContent>, io::Error> {
        if !is_valid_id(id) {
            debug!("Rejecting malformed post id {id:?}");
            return Ok(None);
        }

        let post_file = match dunce::canonicalize(self.posts_dir.join(id).with_extension("md")) {
            Ok(ok) if ok.starts_with(&self.posts_dir) => ok,
            Ok(_) => {
                warn!("Suspicious refresh request for id={id:?} did not start with canonical posts_dir");
                return Ok(None);
            }
            Err(err) => {
                debug!("Refresh request for id={id:?} caused error: {err}");
                self.posts.remove(id);
                return Ok(None);
            }
        };

        let updated = self.posts.get(id).map(|ent| ent.updated);

        if updated.map_or(false, |updated| updated + self.ttl >= SystemTime::now()) {
            // not due for another check yet
            return Ok(self.content(id));
        }

        let file_modified_time = match fs::metadata(&post_file).await {
            Ok(meta) => meta.modified()?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("No such post with id {id}, dropping it from the cache");
                self.posts.remove(id);
                return Ok(None);
            }
            Err(err) => {
                error!("{err} (reading {post_file:?})");
                return Err(err);
            }
        };

        if let Some(entry) = self.posts.get_mut(id) {
            if entry.last_modified >= file_modified_time {
                // unchanged since the last parse
                entry.updated = SystemTime::now();
                return Ok(self.content(id));
            }
        }

        let source = fs::read_to_string(&post_file).await?;
        let parsed = parse_post(id, &source)?;

        self.posts.insert(id.to_string(), PostEntry {
            updated: SystemTime::now(),
            last_modified: file_modified_time,
            parsed,
        });

        info!("Refreshed post {id}");

        Ok(self.content(id))
    }

    fn content(&self, id: &str) -> Option<PostContent> {
        self.posts.get(id).map(|entry| PostContent {
            id: id.to_string(),
            post: entry.parsed.post.clone(),
            body: entry.parsed.body.clone(),
            timestamp: entry.last_modified.into(),
        })
    }
}

/// Post ids are file stems made of ASCII letters, digits and hyphens, so
/// every post has exactly one URL.
fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| matches!(c, 'a'..='z' | 'A'..='Z' | '0'..='9' | '-'))
}

/// Splits a markdown document into its front matter and rendered body.
pub fn parse_post(id: &str, source: &str) -> Result<ParsedPost, Error> {
    let arena = Arena::new();

    let mut options = ComrakOptions::default();
    options.extension.front_matter_delimiter = Some("---".into());
    options.extension.strikethrough = true;
    options.extension.header_ids = Some("p-".to_string());
    options.extension.table = true;
    options.extension.tasklist = true;
    options.parse.smart = true;
    options.parse.relaxed_tasklist_matching = true;

    let root = comrak::parse_document(&arena, source, &options);

    let mut html = vec![];
    comrak::format_html(root, &options, &mut html)?;

    let front_matter = root
        .children()
        .find_map(|child| {
            let data = child.data.borrow();
            match &data.value {
                FrontMatter(fm) => Some(fm.clone()),
                _ => None,
            }
        })
        .unwrap_or_default();

    let yaml = front_matter.trim();
    let yaml = yaml.strip_prefix("---").unwrap_or(yaml);
    let yaml = yaml.strip_suffix("---").unwrap_or(yaml);

    Ok(ParsedPost {
        post: Post::from_yaml(id, yaml)?,
        body: String::from_utf8_lossy(&html).to_string(),
    })
}
