//! Speech topics: loaded from a JSON file or taken from the built-in list.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Result, WheelError};

/// Most topics a wheel is given.
pub const MAX_TOPICS: usize = 50;

/// Topics need at least this many characters.
pub const MIN_TOPIC_CHARS: usize = 4;

/// Topics must be shorter than this many characters.
pub const MAX_TOPIC_CHARS: usize = 200;

/// Page boilerplate that sometimes ends up in scraped topic lists.
const BOILERPLATE: [&str; 6] = [
    "Copyright",
    "Skip to content",
    "Mobile Menu",
    "tablet",
    "Theme",
    "OceanWP",
];

/// Accepted topic file layouts.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TopicFile {
    /// `{"topics": [...], "count": n}`; `count` is informational
    Listing {
        topics: Vec<String>,
        #[serde(default)]
        count: Option<usize>,
    },
    /// `[...]`
    Bare(Vec<String>),
}

impl TopicFile {
    fn into_topics(self) -> Vec<String> {
        match self {
            TopicFile::Listing { topics, count } => {
                if let Some(count) = count.filter(|&count| count != topics.len()) {
                    debug!(count, actual = topics.len(), "topic count does not match the list");
                }
                topics
            }
            TopicFile::Bare(topics) => topics,
        }
    }
}

/// Trims entries, drops short, overlong, boilerplate and repeated ones, and
/// keeps at most [`MAX_TOPICS`] in input order.
pub fn normalize<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|topic| topic.as_ref().trim().to_string())
        .filter(|topic| {
            let chars = topic.chars().count();
            chars >= MIN_TOPIC_CHARS && chars < MAX_TOPIC_CHARS
        })
        .filter(|topic| !BOILERPLATE.iter().any(|skip| topic.contains(skip)))
        .filter(|topic| seen.insert(topic.clone()))
        .take(MAX_TOPICS)
        .collect()
}

/// Parses topic JSON, either an object with a `topics` array or a bare array.
pub fn parse(json: &str) -> serde_json::Result<Vec<String>> {
    let file: TopicFile = serde_json::from_str(json)?;
    Ok(normalize(file.into_topics()))
}

/// Reads and normalizes the topic file at `path`.
pub fn load(path: &Path) -> Result<Vec<String>> {
    let json = std::fs::read_to_string(path).map_err(|source| WheelError::TopicsRead {
        path: path.to_path_buf(),
        source,
    })?;
    let topics = parse(&json).map_err(|source| WheelError::TopicsParse {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), count = topics.len(), "loaded topics");
    Ok(topics)
}

/// Built-in impromptu speech topics.
pub fn fallback_topics() -> Vec<String> {
    [
        "Love is blind",
        "What I did last summer",
        "The movie everyone must see and why",
        "What I am going to do next summer",
        "My favorite hobby and why",
        "Is anger positive or negative?",
        "My favorite pet peeve",
        "Who is my hero and why?",
        "Life is a bowl of cherries",
        "My favorite class",
        "If I could be anyone, who would it be?",
        "Does money make a person happy?",
        "My favorite book and why?",
        "One place I would like to see and why",
        "The description of my ideal partner",
        "What will I be like at age 50?",
        "Who is my favorite artist and why?",
        "Do horror movies have any socially redeeming value?",
        "If I had to lose sight or hearing which would it be and why?",
        "What are the bare necessities of life?",
        "What is my favorite meal and why?",
        "Should justice be blind?",
        "What is your favorite animal and why?",
        "What would it take for you to give up your cell phone for a year?",
        "Are you an introvert or extrovert and why?",
        "What is your favorite sport and why?",
        "What is your ideal job?",
        "Would you rather be a hammer or a nail?",
        "Describe your favorite recipe and how to make it",
        "Can hatred ever be a good thing?",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
