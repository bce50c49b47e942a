//! YouTube link normalization for the video embed.
//!
//! A pasted watch, share, shorts or embed URL is reduced to its video ID and
//! rebuilt as a tracking-free watch URL plus the medium thumbnail.

use thiserror::Error;
use url::Url;

/// Why a URL could not be turned into a [`VideoLink`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("invalid URL: {0}")]
    Invalid(#[from] url::ParseError),

    #[error("not a YouTube host: {0}")]
    UnsupportedHost(String),

    #[error("no video ID in {0}")]
    MissingId(String),
}

/// A normalized YouTube video reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoLink {
    pub id: String,
    pub clean_url: String,
    pub thumbnail: String,
}

impl VideoLink {
    /// Normalize a YouTube URL.
    ///
    /// Accepts `youtu.be/ID`, and on any `youtube.com` host `watch?v=ID`,
    /// `/shorts/ID` and `/embed/ID`. Query parameters other than `v` are
    /// dropped.
    pub fn parse(input: &str) -> Result<Self, LinkError> {
        let url = Url::parse(input)?;
        let host = url.host_str().unwrap_or_default();

        let id = if host == "youtu.be" {
            url.path().trim_start_matches('/').to_string()
        } else if host.contains("youtube.com") {
            youtube_com_id(&url).unwrap_or_default()
        } else {
            return Err(LinkError::UnsupportedHost(host.to_string()));
        };

        let id = id.split('?').next().unwrap_or_default();
        if id.is_empty() {
            return Err(LinkError::MissingId(input.to_string()));
        }
        Ok(Self::from_id(id))
    }

    fn from_id(id: &str) -> Self {
        Self {
            id: id.to_string(),
            clean_url: format!("https://www.youtube.com/watch?v={id}"),
            thumbnail: format!("https://img.youtube.com/vi/{id}/mqdefault.jpg"),
        }
    }

    /// Markdown for a thumbnail image that links to the video.
    pub fn embed_markdown(&self) -> String {
        format!("[![]({})]({})", self.thumbnail, self.clean_url)
    }
}

fn youtube_com_id(url: &Url) -> Option<String> {
    let from_query = url
        .query_pairs()
        .find(|(key, value)| key == "v" && !value.is_empty())
        .map(|(_, value)| value.into_owned());
    if from_query.is_some() {
        return from_query;
    }

    let path = url.path();
    path.strip_prefix("/shorts/")
        .or_else(|| path.strip_prefix("/embed/"))
        .map(str::to_string)
}

/// Normalize a YouTube URL, or `None` if it is not one.
pub fn parse_link(url: &str) -> Option<VideoLink> {
    match VideoLink::parse(url) {
        Ok(link) => Some(link),
        Err(err) => {
            tracing::debug!(%err, url, "video link rejected");
            None
        }
    }
}
