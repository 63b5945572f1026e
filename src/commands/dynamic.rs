//! Dynamic "clear N <unit>" commands.
//!
//! Queries such as `clear 45 mins` or `clear 3 days` do not exist in the
//! static catalog. They are recognized at search time and turned into a
//! one-off command that is never stored in the registry.

use once_cell::sync::Lazy;
use regex::Regex;

use super::registry::{Command, CommandAction, CommandCategory};

static CLEAR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^clear\s+(\d+)\s?(minutes|minute|mins|min|m|hours|hour|hr|h|days|day|d)$")
        .expect("clear pattern is a valid regex")
});

/// Minutes in one hour.
pub const MINUTES_PER_HOUR: u32 = 60;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// Unit of a dynamic clear duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// Parse a unit token such as `mins`, `hr` or `d`.
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "m" | "min" | "mins" | "minute" | "minutes" => Some(Self::Minutes),
            "h" | "hr" | "hour" | "hours" => Some(Self::Hours),
            "d" | "day" | "days" => Some(Self::Days),
            _ => None,
        }
    }

    /// Number of minutes in one of this unit.
    pub fn minutes(&self) -> u32 {
        match self {
            Self::Minutes => 1,
            Self::Hours => MINUTES_PER_HOUR,
            Self::Days => MINUTES_PER_DAY,
        }
    }

    fn noun(&self, count: u32) -> &'static str {
        match (self, count) {
            (Self::Minutes, 1) => "minute",
            (Self::Minutes, _) => "minutes",
            (Self::Hours, 1) => "hour",
            (Self::Hours, _) => "hours",
            (Self::Days, 1) => "day",
            (Self::Days, _) => "days",
        }
    }
}

/// A parsed `clear <amount> <unit>` query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearDuration {
    pub amount: u32,
    pub unit: TimeUnit,
    pub minutes: u32,
}

impl ClearDuration {
    /// Parse a query of the form `clear <positive integer> <unit>`.
    ///
    /// Returns `None` when the query does not match or the duration is
    /// zero or does not fit in a `u32` minute count.
    pub fn parse(query: &str) -> Option<Self> {
        let captures = CLEAR_PATTERN.captures(query)?;
        let amount: u32 = captures[1].parse().ok()?;
        let unit = TimeUnit::parse(&captures[2])?;
        let minutes = amount.checked_mul(unit.minutes())?;

        if minutes == 0 {
            return None;
        }

        Some(Self {
            amount,
            unit,
            minutes,
        })
    }

    /// Describe the duration in the unit the user typed, e.g. "2 hours".
    pub fn describe(&self) -> String {
        format!("{} {}", self.amount, self.unit.noun(self.amount))
    }

    /// Build the transient command for this duration.
    pub fn to_command(&self) -> Command {
        let span = self.describe();
        Command {
            id: format!("clear-{}-mins-dynamic", self.minutes),
            trigger: format!("clear {}", span),
            description: format!("Clear entries from the last {}", span),
            icon: "clock.arrow.circlepath",
            category: CommandCategory::Clear,
            is_destructive: false,
            action: CommandAction::ClearRecent {
                minutes: self.minutes,
            },
        }
    }
}

/// Recognize a dynamic clear query and synthesize its command.
pub fn parse_dynamic_clear(query: &str) -> Option<Command> {
    ClearDuration::parse(query).map(|duration| duration.to_command())
}

/// Pick the singular or plural form of a word for `count`.
pub fn pluralize(count: u64, singular: &'static str, plural: &'static str) -> &'static str {
    if count == 1 {
        singular
    } else {
        plural
    }
}

/// Render a minute count in the largest whole unit that fits.
///
/// Under an hour renders as minutes, under a day as hours, otherwise days.
pub fn describe_minutes(minutes: u32) -> String {
    let (count, unit) = if minutes < MINUTES_PER_HOUR {
        (minutes, TimeUnit::Minutes)
    } else if minutes < MINUTES_PER_DAY {
        (minutes / MINUTES_PER_HOUR, TimeUnit::Hours)
    } else {
        (minutes / MINUTES_PER_DAY, TimeUnit::Days)
    };
    format!("{} {}", count, unit.noun(count))
}
