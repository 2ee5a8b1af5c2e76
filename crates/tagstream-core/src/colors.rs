//! Terminal coloring for evaluator trace lines.
//!
//! Colors are picked by what a fragment of a trace line *is* ([`Role`]),
//! not by hue, so trace code never spells escape codes itself.

use std::fmt;

/// What a painted fragment of a trace line represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Element open/close events.
    Tag,
    /// Text leaf events.
    Text,
    /// Items handed downstream.
    Value,
    /// Event indices, step labels, scopes.
    Step,
    /// Dropped jobs, aborted sweeps, malformed input.
    Warn,
}

impl Role {
    fn ansi(self) -> &'static str {
        match self {
            Self::Tag => "\x1b[34m",
            Self::Text => "\x1b[32m",
            Self::Value => "\x1b[1;32m",
            Self::Step => "\x1b[2m",
            Self::Warn => "\x1b[33m",
        }
    }
}

const RESET: &str = "\x1b[0m";

/// Color switch for trace output. Disabled by default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Colors {
    enabled: bool,
}

impl Colors {
    /// ANSI escape codes (standard 16-color palette only).
    pub const ANSI: Self = Self { enabled: true };

    /// No escape codes at all.
    pub const PLAIN: Self = Self { enabled: false };

    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Render `text` in the color for `role`.
    pub fn paint(&self, role: Role, text: impl fmt::Display) -> String {
        if self.enabled {
            format!("{}{text}{RESET}", role.ansi())
        } else {
            text.to_string()
        }
    }
}
