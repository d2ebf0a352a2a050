//! One-outstanding-call guard for report and export.

use crate::error::{FocuslogError, LogAction};

/// Tracks which collaborator calls are outstanding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InFlight {
    report: bool,
    export: bool,
}

impl InFlight {
    fn flag(&mut self, action: LogAction) -> &mut bool {
        match action {
            LogAction::Report => &mut self.report,
            LogAction::Export => &mut self.export,
        }
    }

    /// Mark `action` as outstanding.
    ///
    /// # Errors
    ///
    /// Returns `FocuslogError::InFlight` if it already is.
    pub fn begin(&mut self, action: LogAction) -> Result<(), FocuslogError> {
        let flag = self.flag(action);
        if *flag {
            return Err(FocuslogError::InFlight(action));
        }
        *flag = true;
        Ok(())
    }

    /// Clear the flag for `action`.
    pub fn finish(&mut self, action: LogAction) {
        *self.flag(action) = false;
    }

    /// Check whether `action` is outstanding.
    #[must_use]
    pub const fn is_active(&self, action: LogAction) -> bool {
        match action {
            LogAction::Report => self.report,
            LogAction::Export => self.export,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_blocks_duplicates() {
        let mut in_flight = InFlight::default();
        in_flight.begin(LogAction::Report).unwrap();

        assert!(matches!(
            in_flight.begin(LogAction::Report),
            Err(FocuslogError::InFlight(LogAction::Report))
        ));
        assert!(in_flight.begin(LogAction::Export).is_ok());

        in_flight.finish(LogAction::Report);
        assert!(!in_flight.is_active(LogAction::Report));
        assert!(in_flight.is_active(LogAction::Export));
        assert!(in_flight.begin(LogAction::Report).is_ok());
    }
}
