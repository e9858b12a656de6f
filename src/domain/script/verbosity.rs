//! Output verbosity policy for generated statements.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Redirection appended to silenced statements.
pub const QUIET_REDIRECT: &str = " > /dev/null 2>&1";

/// Statement prefixes that talk to the user and must stay visible.
const USER_FACING_PREFIXES: [&str; 6] =
    ["color_echo", "log_message", "echo", "printf", "read", "prompt_"];

/// Long-running operations that are never silenced.
const ALWAYS_VISIBLE: [&str; 3] = ["dnf upgrade", "dnf update", "reboot"];

/// Whether generated statements show their output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Discard stdout/stderr of most statements.
    Quiet,
    #[default]
    Verbose,
}

impl Verbosity {
    /// Apply the policy to one statement.
    pub fn apply(self, statement: &str) -> Cow<'_, str> {
        if self == Verbosity::Quiet && should_silence(statement) {
            Cow::Owned(format!("{}{}", statement, QUIET_REDIRECT))
        } else {
            Cow::Borrowed(statement)
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Verbose => "verbose",
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verbosity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" => Ok(Verbosity::Quiet),
            "verbose" => Ok(Verbosity::Verbose),
            other => Err(format!("invalid mode '{}': expected 'quiet' or 'verbose'", other)),
        }
    }
}

/// Statements shown to the user as-is: log helpers, prompts, heredocs, comments.
pub fn is_user_facing(statement: &str) -> bool {
    let trimmed = statement.trim_start();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || statement.contains("EOF")
        || USER_FACING_PREFIXES.iter().any(|prefix| trimmed.starts_with(prefix))
}

/// Statements whose output must stay visible even in quiet mode.
pub fn is_always_visible(statement: &str) -> bool {
    ALWAYS_VISIBLE.iter().any(|pattern| statement.contains(pattern))
}

fn should_silence(statement: &str) -> bool {
    !is_user_facing(statement) && !is_always_visible(statement)
}
