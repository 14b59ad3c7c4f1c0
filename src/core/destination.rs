//! Destination identifiers — the closed set of demonstration screens.
//!
//! Every variant must be referenced by exactly one catalog item and handled by
//! exactly one router arm.  The router matches on this enum without a wildcard
//! arm, so a new variant without a screen is a compile error rather than a
//! runtime fallback.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// One tag per demonstration screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Destination {
    BarChart,
    Gauge,
    Sparkline,
    Button,
    Picker,
    Slider,
    Stepper,
    TextField,
    Toggle,
    Capsule,
    Circle,
    Rectangle,
    Badge,
    Label,
}

impl Destination {
    /// Every destination, in declaration order.
    pub const ALL: &'static [Destination] = &[
        Destination::BarChart,
        Destination::Gauge,
        Destination::Sparkline,
        Destination::Button,
        Destination::Picker,
        Destination::Slider,
        Destination::Stepper,
        Destination::TextField,
        Destination::Toggle,
        Destination::Capsule,
        Destination::Circle,
        Destination::Rectangle,
        Destination::Badge,
        Destination::Label,
    ];

    /// Stable identifier used on the command line, in file names and in logs.
    pub fn id(self) -> &'static str {
        match self {
            Destination::BarChart => "bar-chart",
            Destination::Gauge => "gauge",
            Destination::Sparkline => "sparkline",
            Destination::Button => "button",
            Destination::Picker => "picker",
            Destination::Slider => "slider",
            Destination::Stepper => "stepper",
            Destination::TextField => "text-field",
            Destination::Toggle => "toggle",
            Destination::Capsule => "capsule",
            Destination::Circle => "circle",
            Destination::Rectangle => "rectangle",
            Destination::Badge => "badge",
            Destination::Label => "label",
        }
    }

    /// Comma-separated list of every id (for error messages and `--help`).
    pub fn id_list() -> String {
        Self::ALL
            .iter()
            .map(|d| d.id())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown destination `{given}` (expected one of: {expected})")]
pub struct ParseDestinationError {
    pub given: String,
    pub expected: String,
}

impl FromStr for Destination {
    type Err = ParseDestinationError;

    /// Accepts the kebab-case id; case and `_`/`-` are not significant.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.id() == wanted)
            .ok_or_else(|| ParseDestinationError {
                given: s.to_string(),
                expected: Self::id_list(),
            })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn all_lists_variants_in_declaration_order() {
        for (i, d) in Destination::ALL.iter().enumerate() {
            assert_eq!(*d as usize, i, "{d:?} is out of order in Destination::ALL");
        }
    }

    #[test]
    fn ids_are_unique() {
        let ids: HashSet<_> = Destination::ALL.iter().map(|d| d.id()).collect();
        assert_eq!(ids.len(), Destination::ALL.len());
    }

    #[test]
    fn parse_accepts_every_id() {
        for &d in Destination::ALL {
            assert_eq!(d.id().parse::<Destination>(), Ok(d));
        }
    }

    #[test]
    fn parse_is_lenient_about_case_and_underscores() {
        assert_eq!("Text_Field".parse::<Destination>(), Ok(Destination::TextField));
        assert_eq!(" BUTTON ".parse::<Destination>(), Ok(Destination::Button));
    }

    #[test]
    fn parse_error_lists_valid_ids() {
        let err = "knob".parse::<Destination>().unwrap_err();
        assert_eq!(err.given, "knob");
        assert!(err.to_string().contains("text-field"));
    }
}
