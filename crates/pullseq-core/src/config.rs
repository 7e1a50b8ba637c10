use serde::{Deserialize, Serialize};

/// How a pull-shaped source signals that it has nothing more to give.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustionPolicy {
    /// Stop as soon as a step carries no value. The `done` flag is ignored,
    /// so a final value delivered together with `done == true` is still yielded.
    #[default]
    AbsentValue,
    /// Stop when a step reports `done`, discarding any value carried with it.
    /// A step without a value also stops the source.
    DoneFlag,
}

impl std::fmt::Display for ExhaustionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AbsentValue => write!(f, "absent_value"),
            Self::DoneFlag => write!(f, "done_flag"),
        }
    }
}

impl std::str::FromStr for ExhaustionPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "absent_value" => Ok(Self::AbsentValue),
            "done_flag" => Ok(Self::DoneFlag),
            other => Err(format!("unknown exhaustion policy: '{other}'")),
        }
    }
}

/// Environment variable selecting the [`ExhaustionPolicy`].
pub const EXHAUSTION_ENV: &str = "PULLSEQ_EXHAUSTION";
/// Environment variable naming sources in log output.
pub const LABEL_ENV: &str = "PULLSEQ_LABEL";

/// Configuration handed to the construction adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeqConfig {
    #[serde(default)]
    pub exhaustion: ExhaustionPolicy,

    /// Name attached to the adapter's log events.
    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl SeqConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from `PULLSEQ_EXHAUSTION` and `PULLSEQ_LABEL`.
    ///
    /// Unset variables fall back to the defaults; an unrecognised policy is an error.
    pub fn from_env() -> std::result::Result<Self, String> {
        let mut config = Self::default();
        if let Ok(policy) = std::env::var(EXHAUSTION_ENV) {
            config.exhaustion = policy.trim().parse()?;
        }
        if let Ok(label) = std::env::var(LABEL_ENV) {
            if !label.is_empty() {
                config.label = Some(label);
            }
        }
        Ok(config)
    }

    pub fn with_exhaustion(mut self, policy: ExhaustionPolicy) -> Self {
        self.exhaustion = policy;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub(crate) fn label_or_default(&self) -> &str {
        self.label.as_deref().unwrap_or("anonymous")
    }
}
