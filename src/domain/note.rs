//! Note struct: a titled block of text with an id and last-modified timestamp.

use crate::domain::NoteId;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Title shown for notes whose title is empty.
pub const UNTITLED: &str = "Untitled note";

/// Maximum number of characters kept in a list preview.
pub const PREVIEW_CHARS: usize = 60;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// A single note.
///
/// The serialized shape is the one used for both storage and backups:
///
/// ```json
/// { "id": "01HQ3K5M7NXJK4QZPW8V2R6T9Y", "title": "", "content": "", "updatedAt": 1712345678901 }
/// ```
///
/// `updatedAt` is integer milliseconds since the Unix epoch. Missing or null
/// `title` and `content` read as empty strings, a missing or null `updatedAt`
/// reads as the epoch, and a fractional `updatedAt` is cut to whole
/// milliseconds, so hand-edited backups still load.
///
/// # Examples
///
/// ```
/// use study_notes::domain::{Note, NoteId};
/// use chrono::Utc;
///
/// let note = Note::new(NoteId::generate(), Utc::now());
/// assert_eq!(note.title(), "");
/// assert_eq!(note.display_title(), "Untitled note");
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    id: NoteId,
    #[serde(default, deserialize_with = "text_or_null")]
    title: String,
    #[serde(default, deserialize_with = "text_or_null")]
    content: String,
    #[serde(default = "epoch", with = "millis")]
    updated_at: DateTime<Utc>,
}

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

fn text_or_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// `updatedAt` as milliseconds: written as an integer, read from any number.
mod millis {
    use chrono::{DateTime, Utc};
    use serde::de::{self, Deserializer, Visitor};
    use serde::Serializer;
    use std::fmt;

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        chrono::serde::ts_milliseconds::serialize(value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        deserializer.deserialize_any(MillisVisitor)
    }

    struct MillisVisitor;

    impl<'de> Visitor<'de> for MillisVisitor {
        type Value = DateTime<Utc>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a unix timestamp in milliseconds")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            DateTime::from_timestamp_millis(value)
                .ok_or_else(|| E::custom(format!("timestamp out of range: {}", value)))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            let millis = i64::try_from(value)
                .map_err(|_| E::custom(format!("timestamp out of range: {}", value)))?;
            self.visit_i64(millis)
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
            if !value.is_finite() {
                return Err(E::custom(format!("timestamp out of range: {}", value)));
            }
            // `as` saturates; anything that large is rejected as out of range.
            self.visit_i64(value.trunc() as i64)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(super::epoch())
        }
    }
}

impl Note {
    /// Creates an empty note stamped with `now`.
    pub fn new(id: NoteId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: String::new(),
            content: String::new(),
            updated_at: now,
        }
    }

    /// Creates a note with every field given (used by tests and benchmarks).
    pub fn with_fields(
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            updated_at,
        }
    }

    /// Returns the note's unique identifier.
    pub fn id(&self) -> &NoteId {
        &self.id
    }

    /// Returns the raw title, possibly empty.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the raw content, possibly empty.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when the note was last edited.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Overwrites title and content and refreshes the timestamp.
    ///
    /// The timestamp never moves backwards, even if `now` is earlier than the
    /// stored value (clock skew, or a backup stamped in the future).
    pub fn edit(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        self.title = title.into();
        self.content = content.into();
        self.updated_at = now.max(self.updated_at);
    }

    /// Returns the title, or [`UNTITLED`] when the title is empty.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            UNTITLED
        } else {
            &self.title
        }
    }

    /// Returns a one-line preview of the content.
    ///
    /// Whitespace runs collapse to a single space. Previews longer than
    /// [`PREVIEW_CHARS`] characters are cut and end in `...`.
    pub fn preview(&self) -> String {
        let plain = WHITESPACE_RUN.replace_all(&self.content, " ");
        let plain = plain.trim();
        if plain.chars().count() > PREVIEW_CHARS {
            let cut: String = plain.chars().take(PREVIEW_CHARS).collect();
            format!("{}...", cut)
        } else {
            plain.to_string()
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.display_title(), self.id.prefix())
    }
}

impl fmt::Debug for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Note")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("content", &self.content)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}
