use crate::error::InputError;
use crate::numeric::{Cell, Parsed};
use serde::{Deserialize, Deserializer, Serialize};

/// Social activity for one business as collected by the scraper.
///
/// Either part may be absent, empty or `null`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SocialRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile: Profile,
    #[serde(default, deserialize_with = "null_as_default")]
    pub posts: Vec<Post>,
}

/// Profile counters. Scrapers disagree on key names, so both spellings are
/// kept. `followers` and `follows` take precedence when non-zero.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Profile {
    #[serde(default)]
    pub followers: Option<Cell>,
    #[serde(default)]
    pub followers_count: Option<Cell>,
    #[serde(default)]
    pub following: Option<Cell>,
    #[serde(default)]
    pub follows: Option<Cell>,
    #[serde(default)]
    pub posts_count: Option<Cell>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Post {
    #[serde(default)]
    pub likes: Option<Cell>,
    #[serde(default)]
    pub comments: Option<Comments>,
    #[serde(default)]
    pub caption: Option<String>,
}

/// Comments arrive either as the scraped list or as a total.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Comments {
    List(Vec<serde_json::Value>),
    Count(Cell),
}

impl SocialRecord {
    pub fn from_json(json: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Post {
    pub fn new(likes: f64, comments: f64, caption: &str) -> Self {
        Self {
            likes: Some(Cell::Number(likes)),
            comments: Some(Comments::Count(Cell::Number(comments))),
            caption: Some(caption.to_string()),
        }
    }

    pub fn like_count(&self, index: usize) -> Result<f64, InputError> {
        Ok(count(self.likes.as_ref(), || format!("posts[{}].likes", index))?.unwrap_or(0.0))
    }

    pub fn comment_count(&self, index: usize) -> Result<f64, InputError> {
        match &self.comments {
            None => Ok(0.0),
            Some(Comments::List(items)) => Ok(items.len() as f64),
            Some(Comments::Count(cell)) => {
                Ok(count(Some(cell), || format!("posts[{}].comments", index))?.unwrap_or(0.0))
            }
        }
    }
}

/// Coerce an optional counter. Missing markers become `None`; text that is
/// not a number is a structural error naming `field`.
pub(crate) fn count(
    cell: Option<&Cell>,
    field: impl FnOnce() -> String,
) -> Result<Option<f64>, InputError> {
    let Some(cell) = cell else {
        return Ok(None);
    };
    match cell.parse() {
        Parsed::Missing => Ok(None),
        Parsed::Number(n) if n.is_finite() => Ok(Some(n)),
        Parsed::Number(_) | Parsed::Invalid => Err(InputError::NonNumericSocialField {
            field: field(),
            value: cell.raw(),
        }),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
