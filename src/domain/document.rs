use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// A document handed over by an ingestion collaborator.
///
/// Unknown fields are carried through `extra` so an augmented copy can be
/// written back without losing anything the collaborator attached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub content: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub source: String,
    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    pub fn new(title: impl Into<String>, content: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            source: source.into(),
            ..Default::default()
        }
    }

    pub fn published_at(mut self, published_at: impl Into<String>) -> Self {
        self.published_at = Some(published_at.into());
        self
    }

    /// Title and content joined the way the categorizer scans them.
    pub fn classification_text(&self) -> String {
        format!("{} {}", self.title, self.content)
    }
}

/// Date keys other collectors use, in precedence order after `published_at`.
const LEGACY_DATE_KEYS: &[&str] = &["published_date", "publishedAt"];

fn nullable_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Keeps string dates only; anything else is treated as an unknown date.
fn lenient_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(raw)) => Ok(Some(raw)),
        None | Some(Value::Null) => Ok(None),
        Some(other) => {
            tracing::debug!(target: "ingest", value = %other, "non-string publication date ignored");
            Ok(None)
        }
    }
}

/// Falls back to a legacy date key when `published_at` is absent. The legacy
/// keys stay in `extra` so they are written back unchanged.
fn resolve_legacy_date(document: &mut Document) {
    if document.published_at.is_some() {
        return;
    }
    document.published_at = LEGACY_DATE_KEYS
        .iter()
        .find_map(|key| document.extra.get(*key).and_then(Value::as_str))
        .map(str::to_string);
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("batch is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("batch root must be an object or an array of documents")]
    UnexpectedRoot,
    #[error("stream `{stream}` must be an array of documents")]
    InvalidStream { stream: &'static str },
    #[error("document {index} in `{stream}` is not a valid record: {source}")]
    InvalidDocument {
        stream: &'static str,
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// One ingestion run: news articles plus social and analyst commentary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestedBatch {
    pub articles: Vec<Document>,
    pub twitter_commentary: Vec<Document>,
    pub analyst_commentary: Vec<Document>,
}

impl IngestedBatch {
    /// Parses either `{articles, twitter_commentary, analyst_commentary}` or a
    /// bare array, which is treated as articles. Missing streams are empty.
    pub fn from_json(raw: &str) -> Result<Self, IngestError> {
        match serde_json::from_str::<Value>(raw)? {
            Value::Array(items) => Ok(Self {
                articles: parse_documents("articles", items)?,
                ..Default::default()
            }),
            Value::Object(mut root) => Ok(Self {
                articles: take_stream(&mut root, "articles")?,
                twitter_commentary: take_stream(&mut root, "twitter_commentary")?,
                analyst_commentary: take_stream(&mut root, "analyst_commentary")?,
            }),
            _ => Err(IngestError::UnexpectedRoot),
        }
    }

    pub fn len(&self) -> usize {
        self.articles.len() + self.twitter_commentary.len() + self.analyst_commentary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn take_stream(root: &mut Map<String, Value>, stream: &'static str) -> Result<Vec<Document>, IngestError> {
    match root.remove(stream) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => parse_documents(stream, items),
        Some(_) => Err(IngestError::InvalidStream { stream }),
    }
}

fn parse_documents(stream: &'static str, items: Vec<Value>) -> Result<Vec<Document>, IngestError> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(IngestError::InvalidDocument {
                    stream,
                    index,
                    source: serde::de::Error::custom("expected an object"),
                });
            }
            let mut document: Document =
                serde_json::from_value(item).map_err(|source| IngestError::InvalidDocument {
                    stream,
                    index,
                    source,
                })?;
            resolve_legacy_date(&mut document);
            Ok(document)
        })
        .collect()
}
