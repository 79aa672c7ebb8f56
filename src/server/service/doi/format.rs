//! Journal DOI layout.
//!
//! Manuscript DOIs are `<prefix>/<code><year:4><volume:2><issue:2><seq:3>` and
//! correction DOIs are `<prefix>/<code><year:4>00<seq:3>`. The layout is strictly
//! positional; numeric segments are ASCII digits only.

use lazy_static::lazy_static;
use regex::Regex;

use crate::server::model::doi::ParsedDoi;

lazy_static! {
    static ref MANUSCRIPT_SUFFIX: Regex =
        Regex::new(r"^([0-9]{4})([0-9]{2})([0-9]{2})([0-9]{3})$").unwrap();
    static ref CORRECTION_SUFFIX: Regex = Regex::new(r"^([0-9]{4})00([0-9]{3})$").unwrap();
}

/// Highest sequence number that fits the three-digit field.
pub const MAX_SEQUENCE: i32 = 999;

/// Registrant prefix and journal code shared by every DOI this journal mints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoiFormat {
    prefix: String,
    code: String,
}

impl DoiFormat {
    pub fn new(prefix: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            code: code.into(),
        }
    }

    /// `<prefix>/<code><year><volume><issue>`, the part shared by one issue's DOIs.
    pub fn manuscript_stem(&self, year: i32, volume: i32, issue: i32) -> String {
        format!(
            "{}/{}{:04}{:02}{:02}",
            self.prefix, self.code, year, volume, issue
        )
    }

    /// `<prefix>/<code><year>00`, the part shared by one year's correction DOIs.
    pub fn correction_stem(&self, year: i32) -> String {
        format!("{}/{}{:04}00", self.prefix, self.code, year)
    }

    /// Appends a zero-padded sequence number to a stem.
    pub fn with_sequence(stem: &str, sequence: i32) -> String {
        format!("{}{:03}", stem, sequence)
    }

    /// Whether the DOI belongs to this journal and matches either fixed-width layout.
    pub fn validate(&self, doi: &str) -> bool {
        self.parse(doi).is_some()
    }

    /// Decodes a journal DOI, returning `None` when it does not match either layout.
    ///
    /// A `00` volume/issue field marks a correction.
    pub fn parse(&self, doi: &str) -> Option<ParsedDoi> {
        let suffix = self.strip_journal(doi.trim())?;

        if let Some(caps) = CORRECTION_SUFFIX.captures(suffix) {
            return Some(ParsedDoi::Correction {
                year: caps[1].parse().ok()?,
                sequence: caps[2].parse().ok()?,
            });
        }

        let caps = MANUSCRIPT_SUFFIX.captures(suffix)?;
        Some(ParsedDoi::Manuscript {
            year: caps[1].parse().ok()?,
            volume: caps[2].parse().ok()?,
            issue: caps[3].parse().ok()?,
            sequence: caps[4].parse().ok()?,
        })
    }

    /// Strips `<prefix>/<code>`, ignoring ASCII case.
    fn strip_journal<'d>(&self, doi: &'d str) -> Option<&'d str> {
        let (prefix, rest) = doi.split_once('/')?;
        if !prefix.eq_ignore_ascii_case(&self.prefix) {
            return None;
        }

        let code = rest.get(..self.code.len())?;
        if !code.eq_ignore_ascii_case(&self.code) {
            return None;
        }

        rest.get(self.code.len()..)
    }
}

impl Default for DoiFormat {
    fn default() -> Self {
        Self::new("10.1578", "gjadt")
    }
}
