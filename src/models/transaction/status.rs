use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Settlement state of a submitted transaction.
///
/// Progress only moves forward: `Pending -> Processed -> Confirmed -> Finalized`,
/// or from any non-terminal state into `Failed` or `TimedOut`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConfirmationStatus {
    Pending,
    Processed,
    Confirmed,
    Finalized,
    Failed,
    TimedOut,
}

impl ConfirmationStatus {
    /// Position on the settlement path. Terminal failures have no position.
    fn settlement_level(&self) -> Option<u8> {
        match self {
            ConfirmationStatus::Pending => Some(0),
            ConfirmationStatus::Processed => Some(1),
            ConfirmationStatus::Confirmed => Some(2),
            ConfirmationStatus::Finalized => Some(3),
            ConfirmationStatus::Failed | ConfirmationStatus::TimedOut => None,
        }
    }

    /// Confirmed or finalized.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            ConfirmationStatus::Confirmed | ConfirmationStatus::Finalized
        )
    }

    /// No further polling can change this status.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ConfirmationStatus::Finalized
                | ConfirmationStatus::Failed
                | ConfirmationStatus::TimedOut
        )
    }

    /// Applies an observed status, ignoring anything that would move backwards.
    pub fn advance(self, observed: ConfirmationStatus) -> ConfirmationStatus {
        if self.is_terminal() {
            return self;
        }
        match (self.settlement_level(), observed.settlement_level()) {
            (Some(current), Some(next)) if next > current => observed,
            (Some(_), Some(_)) => self,
            (_, None) => observed,
            (None, _) => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_advance_moves_forward() {
        let status = ConfirmationStatus::Pending
            .advance(ConfirmationStatus::Processed)
            .advance(ConfirmationStatus::Confirmed)
            .advance(ConfirmationStatus::Finalized);
        assert_eq!(status, ConfirmationStatus::Finalized);
    }

    #[test]
    fn test_advance_can_skip_levels() {
        assert_eq!(
            ConfirmationStatus::Pending.advance(ConfirmationStatus::Finalized),
            ConfirmationStatus::Finalized
        );
    }

    #[test]
    fn test_advance_ignores_regressions() {
        assert_eq!(
            ConfirmationStatus::Confirmed.advance(ConfirmationStatus::Processed),
            ConfirmationStatus::Confirmed
        );
        assert_eq!(
            ConfirmationStatus::Processed.advance(ConfirmationStatus::Pending),
            ConfirmationStatus::Processed
        );
    }

    #[test]
    fn test_terminal_states_are_sticky() {
        for terminal in [
            ConfirmationStatus::Finalized,
            ConfirmationStatus::Failed,
            ConfirmationStatus::TimedOut,
        ] {
            assert_eq!(terminal.advance(ConfirmationStatus::Pending), terminal);
            assert_eq!(terminal.advance(ConfirmationStatus::Confirmed), terminal);
        }
        assert_eq!(
            ConfirmationStatus::Failed.advance(ConfirmationStatus::Finalized),
            ConfirmationStatus::Failed
        );
    }

    #[test]
    fn test_failure_from_any_open_state() {
        for open in [
            ConfirmationStatus::Pending,
            ConfirmationStatus::Processed,
            ConfirmationStatus::Confirmed,
        ] {
            assert_eq!(
                open.advance(ConfirmationStatus::Failed),
                ConfirmationStatus::Failed
            );
        }
    }

    #[test]
    fn test_success_classification() {
        assert!(ConfirmationStatus::Confirmed.is_success());
        assert!(ConfirmationStatus::Finalized.is_success());
        assert!(!ConfirmationStatus::Processed.is_success());
        assert!(!ConfirmationStatus::TimedOut.is_success());
        assert!(!ConfirmationStatus::Confirmed.is_terminal());
    }

    #[test]
    fn test_string_forms() {
        assert_eq!(ConfirmationStatus::TimedOut.to_string(), "timedout");
        assert_eq!(
            ConfirmationStatus::from_str("finalized").unwrap(),
            ConfirmationStatus::Finalized
        );
    }
}
