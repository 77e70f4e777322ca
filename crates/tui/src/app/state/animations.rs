use crate::app::dialog::AnimationHooks;
use std::time::{Duration, Instant};

pub const DOT_PULSE: Duration = Duration::from_millis(200);
pub const PIN_FLASH: Duration = Duration::from_millis(500);
pub const MODE_FLASH: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinFlash {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeFlash {
    EnterPrivate,
    ExitPrivate,
}

/// Timestamps of decorative effects. The view asks whether each is still
/// running; nothing waits on them.
#[derive(Debug, Default)]
pub struct Animations {
    clock: Option<Instant>,
    dot_pulse: Option<(usize, Instant)>,
    pin_flash: Option<(PinFlash, Instant)>,
    mode_flash: Option<(ModeFlash, Instant)>,
}

impl Animations {
    /// Timestamp used for effects started by the next hook calls.
    pub fn set_clock(&mut self, now: Instant) {
        self.clock = Some(now);
    }

    fn stamp(&self) -> Instant {
        self.clock.unwrap_or_else(Instant::now)
    }

    pub fn pulsing_dot(&self, now: Instant) -> Option<usize> {
        self.dot_pulse
            .filter(|(_, started)| now.saturating_duration_since(*started) < DOT_PULSE)
            .map(|(index, _)| index)
    }

    pub fn pin_flash(&self, now: Instant) -> Option<PinFlash> {
        self.pin_flash
            .filter(|(_, started)| now.saturating_duration_since(*started) < PIN_FLASH)
            .map(|(flash, _)| flash)
    }

    pub fn mode_flash(&self, now: Instant) -> Option<ModeFlash> {
        self.mode_flash
            .filter(|(_, started)| now.saturating_duration_since(*started) < MODE_FLASH)
            .map(|(flash, _)| flash)
    }

    pub fn private_mode_changed(&mut self, entered: bool) {
        let flash = if entered {
            ModeFlash::EnterPrivate
        } else {
            ModeFlash::ExitPrivate
        };
        self.mode_flash = Some((flash, self.stamp()));
    }

    pub fn is_running(&self, now: Instant) -> bool {
        self.pulsing_dot(now).is_some()
            || self.pin_flash(now).is_some()
            || self.mode_flash(now).is_some()
    }
}

impl AnimationHooks for Animations {
    fn pin_digit_filled(&mut self, index: usize) {
        self.dot_pulse = Some((index, self.stamp()));
    }

    fn pin_success(&mut self) {
        self.pin_flash = Some((PinFlash::Success, self.stamp()));
    }

    fn pin_error(&mut self) {
        self.pin_flash = Some((PinFlash::Error, self.stamp()));
    }
}

#[cfg(test)]
mod tests {
    use super::{Animations, ModeFlash, PinFlash};
    use crate::app::dialog::AnimationHooks;
    use std::time::{Duration, Instant};

    #[test]
    fn effects_expire_after_their_duration() {
        let start = Instant::now();
        let mut animations = Animations::default();
        animations.set_clock(start);
        animations.pin_digit_filled(2);
        animations.pin_error();

        assert_eq!(animations.pulsing_dot(start), Some(2));
        assert_eq!(animations.pin_flash(start), Some(PinFlash::Error));
        let later = start + Duration::from_millis(250);
        assert_eq!(animations.pulsing_dot(later), None);
        assert_eq!(animations.pin_flash(later), Some(PinFlash::Error));
        assert!(!animations.is_running(start + Duration::from_secs(1)));
    }

    #[test]
    fn private_mode_flash_tracks_direction() {
        let start = Instant::now();
        let mut animations = Animations::default();
        animations.set_clock(start);
        animations.private_mode_changed(true);
        assert_eq!(animations.mode_flash(start), Some(ModeFlash::EnterPrivate));
        animations.private_mode_changed(false);
        assert_eq!(animations.mode_flash(start), Some(ModeFlash::ExitPrivate));
    }
}
