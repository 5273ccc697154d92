//! Story data structure.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Unique identity of a story in the search index.
///
/// The index reports `objectID` as a string, older fixtures use plain
/// integers; both decode to the same textual id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StoryId(String);

impl StoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StoryId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u64> for StoryId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for StoryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => StoryId(s),
            Raw::Number(n) => StoryId::from(n),
        })
    }
}

/// A single search hit. Immutable once fetched; identity is `object_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Story {
    /// Story title (empty when the index has none)
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    /// Link target of the story
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,

    /// Submitter name
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,

    /// Number of comments
    #[serde(default, deserialize_with = "null_as_default")]
    pub num_comments: u64,

    /// Score
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: i64,

    /// Index identity
    #[serde(rename = "objectID")]
    pub object_id: StoryId,
}

impl Story {
    pub fn id(&self) -> &StoryId {
        &self.object_id
    }
}

/// Body returned by the search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: Vec<Story>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
