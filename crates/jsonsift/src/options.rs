/// The nesting depth used when [`ValidatorOptions::default`] is taken.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Configuration options for the streaming validator.
///
/// # Examples
///
/// ```rust
/// use jsonsift::{StreamingValidator, SurrogatePolicy, ValidatorOptions};
///
/// let options = ValidatorOptions {
///     max_depth: 64,
///     surrogates: SurrogatePolicy::Allow,
/// };
/// let mut validator = StreamingValidator::new(options);
/// validator.feed(r#"["\uD800"]"#).unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ValidatorOptions {
    /// Maximum number of simultaneously open arrays and objects.
    ///
    /// Opening one more container than this fails with
    /// [`ErrorKind::DepthLimitExceeded`](crate::ErrorKind::DepthLimitExceeded).
    /// The limit bounds the memory held by the nesting stack.
    ///
    /// # Default
    ///
    /// [`DEFAULT_MAX_DEPTH`] (1024)
    pub max_depth: usize,

    /// How `\u` escapes that encode unpaired UTF-16 surrogates are treated.
    ///
    /// # Default
    ///
    /// [`SurrogatePolicy::Reject`]
    pub surrogates: SurrogatePolicy,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            surrogates: SurrogatePolicy::default(),
        }
    }
}

/// Policy for `\uXXXX` escapes that do not form a valid surrogate pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SurrogatePolicy {
    /// A high surrogate must be followed immediately by a `\u` low surrogate,
    /// and a low surrogate must follow a high one.
    #[default]
    Reject,
    /// Lone surrogates are accepted, as many JSON implementations do.
    Allow,
}
