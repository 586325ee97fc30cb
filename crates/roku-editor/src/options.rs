//! Editor options.
//!
//! [`Options`] carries the handful of settings the editor reads at run
//! time. They can be changed with `name=value` assignments (from the
//! command line's `--set`), using either the full name or the short
//! abbreviation:
//!
//! | Full name        | Abbrev | Type             | Default |
//! |------------------|--------|------------------|---------|
//! | `tabstop`        | `ts`   | integer (≥ 1)    | 8       |
//! | `messagetimeout` | `mt`   | seconds          | 5       |
//! | `quittimes`      | `qt`   | integer          | 1       |

use std::time::Duration;

use crate::error::{EditorError, Result};

/// The options roku knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionName {
    TabStop,
    MessageTimeout,
    QuitTimes,
}

impl OptionName {
    /// Every option, in display order.
    pub const ALL: [Self; 3] = [Self::TabStop, Self::MessageTimeout, Self::QuitTimes];

    /// Look up an option by full name or abbreviation.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "tabstop" | "ts" => Some(Self::TabStop),
            "messagetimeout" | "mt" => Some(Self::MessageTimeout),
            "quittimes" | "qt" => Some(Self::QuitTimes),
            _ => None,
        }
    }

    /// Full name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TabStop => "tabstop",
            Self::MessageTimeout => "messagetimeout",
            Self::QuitTimes => "quittimes",
        }
    }
}

/// Run-time configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Columns per tab stop.
    pub tab_stop: usize,
    /// How long a status message stays visible.
    pub message_timeout: Duration,
    /// Extra Ctrl-Q presses needed to quit with unsaved changes.
    pub quit_times: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tab_stop: 8,
            message_timeout: Duration::from_secs(5),
            quit_times: 1,
        }
    }
}

impl Options {
    /// Apply one `name=value` assignment.
    ///
    /// # Errors
    ///
    /// [`EditorError::UnknownOption`] for a name that is not in the table,
    /// [`EditorError::InvalidOptionValue`] for a missing or unparsable value.
    pub fn set(&mut self, assignment: &str) -> Result<()> {
        let (name, value) = assignment.split_once('=').unwrap_or((assignment, ""));
        let name = name.trim();
        let value = value.trim();

        let option = OptionName::parse(name)
            .ok_or_else(|| EditorError::UnknownOption(name.to_string()))?;
        let invalid = || EditorError::InvalidOptionValue {
            name: option.name().to_string(),
            value: value.to_string(),
        };

        match option {
            OptionName::TabStop => {
                self.tab_stop = value
                    .parse::<usize>()
                    .ok()
                    .filter(|&n| n > 0)
                    .ok_or_else(invalid)?;
            }
            OptionName::MessageTimeout => {
                let secs = value.parse::<u64>().map_err(|_| invalid())?;
                self.message_timeout = Duration::from_secs(secs);
            }
            OptionName::QuitTimes => {
                self.quit_times = value.parse::<u32>().map_err(|_| invalid())?;
            }
        }

        tracing::debug!(option = option.name(), value, "option set");
        Ok(())
    }

    /// Current value of `option`, formatted for display.
    #[must_use]
    pub fn get(&self, option: OptionName) -> String {
        match option {
            OptionName::TabStop => self.tab_stop.to_string(),
            OptionName::MessageTimeout => self.message_timeout.as_secs().to_string(),
            OptionName::QuitTimes => self.quit_times.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let o = Options::default();
        assert_eq!(o.tab_stop, 8);
        assert_eq!(o.message_timeout, Duration::from_secs(5));
        assert_eq!(o.quit_times, 1);
    }

    // -- Names --------------------------------------------------------------

    #[test]
    fn parse_full_names_and_abbreviations() {
        assert_eq!(OptionName::parse("tabstop"), Some(OptionName::TabStop));
        assert_eq!(OptionName::parse("ts"), Some(OptionName::TabStop));
        assert_eq!(OptionName::parse("mt"), Some(OptionName::MessageTimeout));
        assert_eq!(OptionName::parse("qt"), Some(OptionName::QuitTimes));
        assert_eq!(OptionName::parse("number"), None);
    }

    #[test]
    fn names_round_trip() {
        for option in OptionName::ALL {
            assert_eq!(OptionName::parse(option.name()), Some(option));
        }
    }

    // -- set ----------------------------------------------------------------

    #[test]
    fn set_tab_stop() {
        let mut o = Options::default();
        o.set("ts=4").unwrap();
        assert_eq!(o.tab_stop, 4);
        o.set("tabstop = 2").unwrap();
        assert_eq!(o.get(OptionName::TabStop), "2");
    }

    #[test]
    fn get_formats_every_option() {
        let mut o = Options::default();
        o.set("mt=3").unwrap();
        let values: Vec<String> = OptionName::ALL.iter().map(|&n| o.get(n)).collect();
        assert_eq!(values, ["8", "3", "1"]);
    }

    #[test]
    fn set_message_timeout_and_quit_times() {
        let mut o = Options::default();
        o.set("messagetimeout=10").unwrap();
        o.set("qt=3").unwrap();
        assert_eq!(o.message_timeout, Duration::from_secs(10));
        assert_eq!(o.quit_times, 3);
    }

    #[test]
    fn zero_tab_stop_is_invalid() {
        let mut o = Options::default();
        let err = o.set("ts=0").unwrap_err();
        assert!(matches!(err, EditorError::InvalidOptionValue { .. }));
        assert_eq!(o.tab_stop, 8);
    }

    #[test]
    fn non_numeric_value_is_invalid() {
        let mut o = Options::default();
        assert!(matches!(
            o.set("qt=many"),
            Err(EditorError::InvalidOptionValue { .. })
        ));
    }

    #[test]
    fn missing_value_is_invalid() {
        let mut o = Options::default();
        assert!(matches!(
            o.set("tabstop"),
            Err(EditorError::InvalidOptionValue { .. })
        ));
    }

    #[test]
    fn unknown_option() {
        let mut o = Options::default();
        let err = o.set("wrap=1").unwrap_err();
        assert_eq!(err.to_string(), "unknown option: wrap");
    }
}
