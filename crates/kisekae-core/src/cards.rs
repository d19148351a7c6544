//! Display descriptors for the three step cards shown above the wizard.

use crate::asset::Asset;
use crate::wizard::{WizardState, WizardStep};

/// How a step card is highlighted relative to the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardStatus {
    /// The wizard is at this step.
    Active,
    /// This step has been passed.
    Past,
    /// This step has not been reached.
    Upcoming,
}

/// One card: which step, how to highlight it and what image to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepCard {
    pub step: WizardStep,
    pub status: CardStatus,
    /// `None` means the card shows its placeholder label.
    pub asset: Option<Asset>,
}

/// Cards for person, clothes and result, in that order.
#[must_use]
pub fn cards(wizard: &WizardState) -> [StepCard; 3] {
    let current = wizard.step();
    WizardStep::ALL.map(|step| {
        let status = match step.cmp(&current) {
            std::cmp::Ordering::Less => CardStatus::Past,
            std::cmp::Ordering::Equal => CardStatus::Active,
            std::cmp::Ordering::Greater => CardStatus::Upcoming,
        };
        let asset = match step {
            WizardStep::PersonSelect => wizard.person(),
            WizardStep::ClothesSelect => wizard.clothes(),
            WizardStep::Result => wizard.result(),
        };
        StepCard {
            step,
            status,
            asset: asset.cloned(),
        }
    })
}
