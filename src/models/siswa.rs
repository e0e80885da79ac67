use crate::core::error::ScoreError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A quiz score in the inclusive range 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u8);

impl Score {
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Result<Self, ScoreError> {
        if value > Self::MAX {
            return Err(ScoreError::OutOfRange(value.to_string()));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Parse a score typed into a form or sent by the API.
    ///
    /// Blank input means "no score" and yields `Ok(None)`.
    pub fn parse(input: &str) -> Result<Option<Self>, ScoreError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let number: f64 = trimmed
            .parse()
            .map_err(|_| ScoreError::NotANumber(trimmed.to_string()))?;

        if !number.is_finite() {
            return Err(ScoreError::NotANumber(trimmed.to_string()));
        }

        if !(0.0..=f64::from(Self::MAX)).contains(&number) {
            return Err(ScoreError::OutOfRange(trimmed.to_string()));
        }

        if number.fract() != 0.0 {
            return Err(ScoreError::NotANumber(trimmed.to_string()));
        }

        // Range checked above
        Ok(Some(Self(number as u8)))
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Firestore-style timestamp as the API serializes it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Timestamp {
    #[serde(rename = "_seconds", default)]
    pub seconds: i64,
    #[serde(rename = "_nanoseconds", default)]
    pub nanoseconds: u32,
}

/// A student record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Siswa {
    pub id: String,
    #[serde(default)]
    pub nama: String,
    #[serde(default)]
    pub kelas: String,
    #[serde(default)]
    pub sekolah: String,
    #[serde(
        default,
        deserialize_with = "deserialize_score",
        serialize_with = "serialize_score"
    )]
    pub skor_bangun_datar: Option<Score>,
    #[serde(
        default,
        deserialize_with = "deserialize_score",
        serialize_with = "serialize_score"
    )]
    pub skor_luas_keliling: Option<Score>,
    #[serde(default)]
    pub created_at: Timestamp,
}

/// Body of `PUT /siswa/{id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiswaUpdate {
    pub nama: String,
    pub kelas: String,
    pub sekolah: String,
    #[serde(serialize_with = "serialize_score")]
    pub skor_bangun_datar: Option<Score>,
    #[serde(serialize_with = "serialize_score")]
    pub skor_luas_keliling: Option<Score>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScore {
    Number(f64),
    Text(String),
}

/// Scores arrive as strings or numbers. Unreadable values are dropped rather
/// than failing the whole collection.
fn deserialize_score<'de, D>(deserializer: D) -> Result<Option<Score>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawScore>::deserialize(deserializer)?;
    let text = match raw {
        None => return Ok(None),
        Some(RawScore::Number(n)) => n.to_string(),
        Some(RawScore::Text(s)) => s,
    };

    match Score::parse(&text) {
        Ok(score) => Ok(score),
        Err(e) => {
            tracing::warn!(value = %text, error = %e, "Ignoring invalid score from API");
            Ok(None)
        }
    }
}

/// The API stores scores as strings, an absent score as an empty string
fn serialize_score<S>(score: &Option<Score>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match score {
        Some(score) => serializer.serialize_str(&score.to_string()),
        None => serializer.serialize_str(""),
    }
}
