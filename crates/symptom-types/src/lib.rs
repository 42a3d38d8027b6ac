/// Fewest characters accepted as a symptom description.
pub const MIN_INPUT_CHARS: usize = 3;

/// Longest symptom description passed to the core before truncation.
pub const DEFAULT_MAX_INPUT_CHARS: usize = 500;

/// Errors that can occur when creating validated intake text.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    /// The trimmed input was shorter than the accepted minimum
    #[error("Describe symptoms (min {min} characters, got {actual})")]
    TooShort { min: usize, actual: usize },
}

/// A symptom description that is safe to hand to the intake core.
///
/// The input is trimmed of leading and trailing whitespace, must contain at least
/// [`MIN_INPUT_CHARS`] characters, and is truncated to the configured maximum. Truncation
/// counts characters, not bytes, so multi-byte input is never split mid-character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeText {
    text: String,
    truncated: bool,
}

impl IntakeText {
    /// Creates a new `IntakeText` using [`DEFAULT_MAX_INPUT_CHARS`].
    ///
    /// # Errors
    ///
    /// Returns `Err(TextError::Empty)` for blank input, or `Err(TextError::TooShort)` when the
    /// trimmed input is shorter than [`MIN_INPUT_CHARS`].
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        Self::with_max_chars(input, DEFAULT_MAX_INPUT_CHARS)
    }

    /// Creates a new `IntakeText`, truncating to at most `max_chars` characters.
    ///
    /// A `max_chars` below [`MIN_INPUT_CHARS`] is raised to the minimum.
    pub fn with_max_chars(input: impl AsRef<str>, max_chars: usize) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }

        let actual = trimmed.chars().count();
        if actual < MIN_INPUT_CHARS {
            return Err(TextError::TooShort {
                min: MIN_INPUT_CHARS,
                actual,
            });
        }

        let max_chars = max_chars.max(MIN_INPUT_CHARS);
        if actual > max_chars {
            return Ok(Self {
                text: trimmed.chars().take(max_chars).collect(),
                truncated: true,
            });
        }

        Ok(Self {
            text: trimmed.to_owned(),
            truncated: false,
        })
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the original input was longer than the accepted window.
    pub fn was_truncated(&self) -> bool {
        self.truncated
    }
}

impl std::fmt::Display for IntakeText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl AsRef<str> for IntakeText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl std::str::FromStr for IntakeText {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl serde::Serialize for IntakeText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> serde::Deserialize<'de> for IntakeText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        IntakeText::new(&s).map_err(serde::de::Error::custom)
    }
}
