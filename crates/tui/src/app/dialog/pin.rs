pub const PIN_LENGTH: usize = 4;
pub const DEFAULT_PIN: &str = "0000";

pub const PIN_CORRECT_MESSAGE: &str = "PIN Correct";
pub const PIN_INCORRECT_MESSAGE: &str = "Incorrect PIN. Try again.";

/// Source of truth for the stored PIN and whether private notes are unlocked.
pub trait PinVault {
    fn stored_pin(&self) -> Option<&str>;
    fn is_unlocked(&self) -> bool;
}

/// Visual feedback sinks. Calls are fire-and-forget.
pub trait AnimationHooks {
    fn pin_digit_filled(&mut self, index: usize);
    fn pin_success(&mut self);
    fn pin_error(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinPhase {
    Entering,
    Complete,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinInput {
    Ignored,
    Filled(usize),
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinPolicy {
    Verify(String),
    Collect,
    Stored(String),
}

impl PinPolicy {
    pub fn resolve(verify_mode: bool, correct_pin: Option<&str>, vault: &dyn PinVault) -> Self {
        match correct_pin {
            Some(expected) if verify_mode => Self::Verify(expected.to_string()),
            None if !verify_mode && vault.is_unlocked() => Self::Collect,
            _ => Self::Stored(vault.stored_pin().unwrap_or(DEFAULT_PIN).to_string()),
        }
    }

    pub fn accepts(&self, entered: &str) -> bool {
        match self {
            Self::Verify(expected) | Self::Stored(expected) => entered == expected,
            Self::Collect => true,
        }
    }

    pub fn is_comparison(&self) -> bool {
        !matches!(self, Self::Collect)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinVerdict {
    Accepted(String),
    Rejected,
}

#[derive(Debug, Clone)]
pub struct PinPad {
    digits: String,
    phase: PinPhase,
    pub message: Option<String>,
}

impl Default for PinPad {
    fn default() -> Self {
        Self {
            digits: String::with_capacity(PIN_LENGTH),
            phase: PinPhase::Entering,
            message: None,
        }
    }
}

impl PinPad {
    #[cfg(test)]
    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn phase(&self) -> PinPhase {
        self.phase
    }

    pub fn push_digit(&mut self, digit: char) -> PinInput {
        if self.phase != PinPhase::Entering
            || !digit.is_ascii_digit()
            || self.digits.len() >= PIN_LENGTH
        {
            return PinInput::Ignored;
        }
        self.digits.push(digit);
        if self.digits.len() == PIN_LENGTH {
            self.phase = PinPhase::Complete;
            return PinInput::Completed;
        }
        PinInput::Filled(self.digits.len() - 1)
    }

    /// Returns the index of the dot that was emptied.
    pub fn delete(&mut self) -> Option<usize> {
        if self.phase != PinPhase::Entering {
            return None;
        }
        self.digits.pop()?;
        Some(self.digits.len())
    }

    pub fn clear(&mut self) {
        if self.phase != PinPhase::Entering {
            return;
        }
        self.digits.clear();
    }

    pub fn evaluate(&mut self, policy: &PinPolicy) -> PinVerdict {
        if self.phase != PinPhase::Complete {
            return PinVerdict::Rejected;
        }
        if policy.accepts(&self.digits) {
            self.phase = PinPhase::Success;
            if policy.is_comparison() {
                self.message = Some(PIN_CORRECT_MESSAGE.to_string());
            }
            PinVerdict::Accepted(self.digits.clone())
        } else {
            self.phase = PinPhase::Error;
            self.message = Some(PIN_INCORRECT_MESSAGE.to_string());
            PinVerdict::Rejected
        }
    }

    /// Collection without comparison, used by the step-indicator pad.
    pub fn take_collected(&mut self) -> Option<String> {
        if self.phase != PinPhase::Complete {
            return None;
        }
        self.phase = PinPhase::Success;
        Some(self.digits.clone())
    }

    /// Back to an empty pad after error feedback. The message stays visible.
    pub fn reset(&mut self) {
        self.digits.clear();
        self.phase = PinPhase::Entering;
    }
}

#[cfg(test)]
mod tests {
    use super::{PinInput, PinPad, PinPhase, PinPolicy, PinVault, PinVerdict, PIN_LENGTH};

    struct Vault {
        pin: Option<&'static str>,
        unlocked: bool,
    }

    impl PinVault for Vault {
        fn stored_pin(&self) -> Option<&str> {
            self.pin
        }

        fn is_unlocked(&self) -> bool {
            self.unlocked
        }
    }

    fn fill(pad: &mut PinPad, digits: &str) {
        for digit in digits.chars() {
            pad.push_digit(digit);
        }
    }

    #[test]
    fn accumulator_length_tracks_mixed_operations() {
        let mut pad = PinPad::default();
        let script = ['1', 'D', 'D', '2', '3', 'C', '4', '5', 'D', '6', '7', '8'];
        let mut expected = 0usize;
        for op in script {
            match op {
                'D' => {
                    pad.delete();
                    expected = expected.saturating_sub(1);
                }
                'C' => {
                    pad.clear();
                    expected = 0;
                }
                digit => {
                    pad.push_digit(digit);
                    expected = (expected + 1).min(PIN_LENGTH);
                }
            }
            assert!(pad.len() <= PIN_LENGTH);
            assert_eq!(pad.len(), expected);
        }
        assert_eq!(pad.digits(), "4678");
        assert_eq!(pad.phase(), PinPhase::Complete);
    }

    #[test]
    fn only_the_fourth_digit_completes() {
        let mut pad = PinPad::default();
        assert_eq!(pad.push_digit('1'), PinInput::Filled(0));
        assert_eq!(pad.push_digit('2'), PinInput::Filled(1));
        assert_eq!(pad.push_digit('3'), PinInput::Filled(2));
        assert_eq!(pad.push_digit('4'), PinInput::Completed);
        assert_eq!(pad.push_digit('5'), PinInput::Ignored);
        assert_eq!(pad.len(), PIN_LENGTH);
    }

    #[test]
    fn complete_pad_ignores_edits_until_reset() {
        let mut pad = PinPad::default();
        fill(&mut pad, "1234");
        assert_eq!(pad.delete(), None);
        pad.clear();
        assert_eq!(pad.digits(), "1234");
        pad.evaluate(&PinPolicy::Verify("9999".to_string()));
        pad.reset();
        assert!(pad.is_empty());
        assert_eq!(pad.push_digit('9'), PinInput::Filled(0));
    }

    #[test]
    fn non_digits_are_ignored() {
        let mut pad = PinPad::default();
        assert_eq!(pad.push_digit('a'), PinInput::Ignored);
        assert!(pad.is_empty());
    }

    #[test]
    fn delete_on_empty_pad_is_noop() {
        let mut pad = PinPad::default();
        assert_eq!(pad.delete(), None);
        pad.push_digit('7');
        assert_eq!(pad.delete(), Some(0));
    }

    #[test]
    fn verify_policy_accepts_only_expected() {
        let mut pad = PinPad::default();
        fill(&mut pad, "1234");
        let policy = PinPolicy::Verify("1234".to_string());
        assert_eq!(pad.evaluate(&policy), PinVerdict::Accepted("1234".to_string()));
        assert_eq!(pad.message.as_deref(), Some("PIN Correct"));

        let mut pad = PinPad::default();
        fill(&mut pad, "4321");
        assert_eq!(pad.evaluate(&policy), PinVerdict::Rejected);
        assert_eq!(pad.phase(), PinPhase::Error);
        assert_eq!(pad.message.as_deref(), Some("Incorrect PIN. Try again."));
    }

    #[test]
    fn resolve_picks_verify_when_expected_pin_is_supplied() {
        let vault = Vault {
            pin: Some("5555"),
            unlocked: true,
        };
        assert_eq!(
            PinPolicy::resolve(true, Some("1234"), &vault),
            PinPolicy::Verify("1234".to_string())
        );
    }

    #[test]
    fn resolve_collects_only_while_unlocked() {
        let unlocked = Vault {
            pin: Some("5555"),
            unlocked: true,
        };
        assert_eq!(PinPolicy::resolve(false, None, &unlocked), PinPolicy::Collect);

        let locked = Vault {
            pin: Some("5555"),
            unlocked: false,
        };
        assert_eq!(
            PinPolicy::resolve(false, None, &locked),
            PinPolicy::Stored("5555".to_string())
        );
    }

    #[test]
    fn resolve_falls_back_to_default_pin() {
        let vault = Vault {
            pin: None,
            unlocked: false,
        };
        assert_eq!(
            PinPolicy::resolve(true, None, &vault),
            PinPolicy::Stored("0000".to_string())
        );
    }

    #[test]
    fn collect_policy_sets_no_message() {
        let mut pad = PinPad::default();
        fill(&mut pad, "8642");
        assert_eq!(
            pad.evaluate(&PinPolicy::Collect),
            PinVerdict::Accepted("8642".to_string())
        );
        assert!(pad.message.is_none());
    }
}
