use log::warn;
use serde::Deserialize;
use serde_yaml::Value;

use super::Error;

/// The post a page is about. Owned by whoever renders the page; the share
/// widget only borrows it.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Post {
    pub title: String,
    pub excerpt: String,
    pub author: String,
}

/// Front matter as written on disk, before the required fields are checked.
#[derive(Debug, Default, Deserialize)]
struct FrontMatter {
    title: Option<Value>,
    excerpt: Option<Value>,
    author: Option<Value>,
}

impl Post {
    pub fn new<T, E, A>(title: T, excerpt: E, author: A) -> Self
    where
        T: Into<String>,
        E: Into<String>,
        A: Into<String>,
    {
        Self {
            title: title.into(),
            excerpt: excerpt.into(),
            author: author.into(),
        }
    }

    /// Reads a post out of YAML front matter.
    ///
    /// `title`, `excerpt` and `author` are required strings. A missing or
    /// mistyped field is logged and left empty, so the page still renders.
    /// Only YAML that cannot be parsed at all is an error.
    pub fn from_yaml<S: AsRef<str>>(id: &str, yaml: S) -> Result<Self, Error> {
        let yaml = yaml.as_ref();
        let fm = if yaml.trim().is_empty() {
            FrontMatter::default()
        } else {
            let deserializer = serde_yaml::Deserializer::from_str(yaml);
            FrontMatter::deserialize(deserializer)?
        };

        Ok(Self {
            title: required_str(id, "title", fm.title),
            excerpt: required_str(id, "excerpt", fm.excerpt),
            author: required_str(id, "author", fm.author),
        })
    }
}

fn required_str(id: &str, field: &str, value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(other) => {
            warn!("Post {id:?} has a non-string `{field}` ({other:?}), treating it as empty");
            String::new()
        }
        None => {
            warn!("Post {id:?} is missing required field `{field}`");
            String::new()
        }
    }
}
