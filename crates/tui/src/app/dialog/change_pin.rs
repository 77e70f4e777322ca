use super::kind::{DialogAction, DialogConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangePinStep {
    VerifyCurrent,
    EnterNew,
    ConfirmNew,
}

impl ChangePinStep {
    pub fn number(self) -> u8 {
        match self {
            Self::VerifyCurrent => 1,
            Self::EnterNew => 2,
            Self::ConfirmNew => 3,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::VerifyCurrent => "Enter Current PIN",
            Self::EnterNew => "Enter New PIN",
            Self::ConfirmNew => "Confirm New PIN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangePinTransition {
    Next(ChangePinWorkflow),
    Committed(String),
    Mismatch,
}

/// Three-step PIN change. Nothing is written until `Committed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangePinWorkflow {
    step: ChangePinStep,
    pending_new_pin: Option<String>,
}

impl ChangePinWorkflow {
    pub fn start() -> Self {
        Self {
            step: ChangePinStep::VerifyCurrent,
            pending_new_pin: None,
        }
    }

    pub fn step(&self) -> ChangePinStep {
        self.step
    }

    #[cfg(test)]
    pub fn pending_new_pin(&self) -> Option<&str> {
        self.pending_new_pin.as_deref()
    }

    /// Pin-entry configuration for the current step. The first step verifies
    /// against `current_pin`; later steps only collect.
    pub fn dialog_config(&self, current_pin: &str) -> DialogConfig {
        let mut config = DialogConfig::default()
            .with_title(self.step.title())
            .on_confirm(DialogAction::ChangePin(self.clone()));
        config.step = Some(self.step.number());
        config.private_mode = true;
        if self.step == ChangePinStep::VerifyCurrent {
            config.verify_mode = true;
            config.correct_pin = Some(current_pin.to_string());
        }
        config
    }

    pub fn advance(self, entered: &str) -> ChangePinTransition {
        match self.step {
            ChangePinStep::VerifyCurrent => ChangePinTransition::Next(Self {
                step: ChangePinStep::EnterNew,
                pending_new_pin: None,
            }),
            ChangePinStep::EnterNew => ChangePinTransition::Next(Self {
                step: ChangePinStep::ConfirmNew,
                pending_new_pin: Some(entered.to_string()),
            }),
            ChangePinStep::ConfirmNew => match self.pending_new_pin {
                Some(candidate) if candidate == entered => ChangePinTransition::Committed(candidate),
                _ => ChangePinTransition::Mismatch,
            },
        }
    }
}
