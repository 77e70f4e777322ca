use crate::app::dialog::{PinVault, DEFAULT_PIN, PIN_LENGTH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateMode {
    unlocked: bool,
    pin: String,
}

impl Default for PrivateMode {
    fn default() -> Self {
        Self {
            unlocked: false,
            pin: DEFAULT_PIN.to_string(),
        }
    }
}

impl PrivateMode {
    /// Uses `saved` when it is a well-formed PIN, otherwise the default.
    pub fn with_saved_pin(saved: Option<&str>) -> Self {
        let mut mode = Self::default();
        if let Some(pin) = saved.filter(|pin| is_valid_pin(pin)) {
            mode.pin = pin.to_string();
        }
        mode
    }

    pub fn pin(&self) -> &str {
        &self.pin
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Returns false when already unlocked.
    pub fn unlock(&mut self) -> bool {
        !std::mem::replace(&mut self.unlocked, true)
    }

    /// Returns false when already locked.
    pub fn lock(&mut self) -> bool {
        std::mem::replace(&mut self.unlocked, false)
    }

    pub fn set_pin(&mut self, pin: String) {
        self.pin = pin;
    }
}

impl PinVault for PrivateMode {
    fn stored_pin(&self) -> Option<&str> {
        Some(&self.pin)
    }

    fn is_unlocked(&self) -> bool {
        self.unlocked
    }
}

fn is_valid_pin(pin: &str) -> bool {
    pin.len() == PIN_LENGTH && pin.chars().all(|ch| ch.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::PrivateMode;

    #[test]
    fn saved_pin_is_used_only_when_well_formed() {
        assert_eq!(PrivateMode::with_saved_pin(Some("1234")).pin(), "1234");
        assert_eq!(PrivateMode::with_saved_pin(Some("12a4")).pin(), "0000");
        assert_eq!(PrivateMode::with_saved_pin(None).pin(), "0000");
    }

    #[test]
    fn unlock_and_lock_report_transitions() {
        let mut mode = PrivateMode::default();
        assert!(!mode.lock());
        assert!(mode.unlock());
        assert!(!mode.unlock());
        assert!(mode.lock());
        assert!(!mode.is_unlocked());
    }
}
