//! Advisory consistency reports.
//!
//! A failed check never stops a package from being written; callers decide
//! what to do with the report.

use log::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckLevel {
    Error,
    Warning,
}

/// One failed check.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckEntry {
    pub level: CheckLevel,
    pub package: String,
    /// The offending value, when there is one.
    pub value: Option<f64>,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckReport {
    pub package: String,
    pub summary: Vec<CheckEntry>,
    pub passed: Vec<String>,
}

impl CheckReport {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Self::default()
        }
    }

    pub fn add_error(&mut self, value: Option<f64>, description: impl Into<String>) {
        self.push(CheckLevel::Error, value, description.into());
    }

    pub fn add_warning(&mut self, value: Option<f64>, description: impl Into<String>) {
        self.push(CheckLevel::Warning, value, description.into());
    }

    pub fn append_passed(&mut self, description: impl Into<String>) {
        self.passed.push(description.into());
    }

    fn push(&mut self, level: CheckLevel, value: Option<f64>, description: String) {
        self.summary.push(CheckEntry {
            level,
            package: self.package.clone(),
            value,
            description,
        });
    }

    pub fn errors(&self) -> impl Iterator<Item = &CheckEntry> {
        self.summary.iter().filter(|e| e.level == CheckLevel::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &CheckEntry> {
        self.summary.iter().filter(|e| e.level == CheckLevel::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Logs every entry: failures at error/warn level, passed checks at info.
    pub fn summarize(&self) {
        for entry in &self.summary {
            let value = entry
                .value
                .map(|v| format!(" (value: {})", v))
                .unwrap_or_default();
            match entry.level {
                CheckLevel::Error => error!("{} check: {}{}", self.package, entry.description, value),
                CheckLevel::Warning => warn!("{} check: {}{}", self.package, entry.description, value),
            }
        }
        for description in &self.passed {
            info!("{} check passed: {}", self.package, description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_carry_package_and_level() {
        let mut report = CheckReport::new("MPSIM");
        report.add_error(Some(12.0), "Stop time greater than last TimePoint");
        report.add_warning(None, "something odd");
        report.append_passed("Valid thing");

        assert!(report.has_errors());
        assert_eq!(report.errors().count(), 1);
        assert_eq!(report.warnings().count(), 1);
        let err = report.errors().next().unwrap();
        assert_eq!(err.package, "MPSIM");
        assert_eq!(err.value, Some(12.0));
        assert_eq!(report.passed, vec!["Valid thing".to_string()]);
    }

    #[test]
    fn empty_report_has_no_errors() {
        let report = CheckReport::new("LOC");
        assert!(!report.has_errors());
        report.summarize();
    }
}
