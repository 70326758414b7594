use std::path::Path;

use serde::{de::Error, Deserialize, Deserializer};
use url::Url;

/// Profile the share widget links to unless `site.yaml` names another.
pub const DEFAULT_PROFILE: &str = "https://www.linkedin.com/in/jason-schmitt-aa974932/";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Site {
    pub title: String,
    /// Public base address of the site. Page addresses are resolved against it.
    #[serde(default, deserialize_with = "deserialize_opt_url")]
    pub url: Option<Url>,
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default, deserialize_with = "deserialize_opt_url")]
    pub profile: Option<Url>,
}

impl Site {
    pub fn from_yaml<S: AsRef<str>>(yaml: S) -> Result<Self, super::Error> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml.as_ref());
        Ok(Self::deserialize(deserializer)?)
    }

    pub async fn load(path: &Path) -> Result<Self, super::Error> {
        let yaml = tokio::fs::read_to_string(path).await?;
        Self::from_yaml(yaml)
    }

    pub fn profile(&self) -> &str {
        self.profile.as_ref().map_or(DEFAULT_PROFILE, |url| url.as_str())
    }
}

impl Default for Site {
    fn default() -> Self {
        Self {
            title: "Untitled Blog".to_string(),
            url: None,
            lang: default_lang(),
            profile: None,
        }
    }
}

fn default_lang() -> String {
    "en_US".to_string()
}

fn deserialize_opt_url<'de, D>(deserializer: D) -> Result<Option<Url>, D::Error>
where
    D: Deserializer<'de>,
{
    let url_str = String::deserialize(deserializer)?;
    let url = Url::parse(&url_str)
        .map_err(|err| D::Error::custom(format!("{err}")))?;
    if url.cannot_be_a_base() {
        Err(D::Error::custom(format!("{url_str:?} must be a base URL")))
    } else {
        Ok(Some(url))
    }
}
