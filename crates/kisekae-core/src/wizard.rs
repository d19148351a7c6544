//! The three-step try-on wizard.
//!
//! ```text
//! PersonSelect ──select_person──▶ ClothesSelect ──select_clothes──▶ Result
//!      ▲                              │   ▲                           │
//!      └────────── go_back ───────────┘   └────────── go_back ────────┘
//! ```
//!
//! Forward transitions clear everything downstream of the new
//! selection. Backward navigation only moves the step marker and keeps
//! every asset, so reviewing a previous step and confirming it again is
//! cheap.

use std::fmt;

use crate::asset::Asset;
use crate::history::{HistoryEntry, Timestamp};

/// Wizard position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    /// Step 1: pick or upload a person photo.
    #[default]
    PersonSelect,
    /// Step 2: pick, upload or design a clothing image.
    ClothesSelect,
    /// Step 3: the try-on result.
    Result,
}

impl WizardStep {
    /// All steps in order.
    pub const ALL: [Self; 3] = [Self::PersonSelect, Self::ClothesSelect, Self::Result];

    /// One-based step number as shown to the user.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::PersonSelect => 1,
            Self::ClothesSelect => 2,
            Self::Result => 3,
        }
    }

    /// The step `go_back` returns to, if any.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::PersonSelect => None,
            Self::ClothesSelect => Some(Self::PersonSelect),
            Self::Result => Some(Self::ClothesSelect),
        }
    }

    /// Short identifier used in logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PersonSelect => "person-select",
            Self::ClothesSelect => "clothes-select",
            Self::Result => "result",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A transition was requested whose precondition does not hold.
///
/// These indicate a caller bug, never a user-facing condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// Clothes were chosen before a person.
    #[error("no person has been selected")]
    NoPerson,

    /// The operation belongs to a different step.
    #[error("expected the {expected} step, wizard is at {actual}")]
    WrongStep {
        /// Step the operation requires.
        expected: WizardStep,
        /// Step the wizard is at.
        actual: WizardStep,
    },
}

/// Current step plus the committed selections.
///
/// Invariants, upheld by every method:
/// - at `ClothesSelect` a person is selected;
/// - at `Result` a person and clothes are selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardState {
    step: WizardStep,
    person: Option<Asset>,
    clothes: Option<Asset>,
    result: Option<Asset>,
}

impl WizardState {
    /// The initial state: step 1, nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step.
    #[must_use]
    pub const fn step(&self) -> WizardStep {
        self.step
    }

    /// Selected person photo.
    #[must_use]
    pub const fn person(&self) -> Option<&Asset> {
        self.person.as_ref()
    }

    /// Selected clothing image.
    #[must_use]
    pub const fn clothes(&self) -> Option<&Asset> {
        self.clothes.as_ref()
    }

    /// Generated try-on image, once available.
    #[must_use]
    pub const fn result(&self) -> Option<&Asset> {
        self.result.as_ref()
    }

    /// Returns `true` when the state equals [`WizardState::new`].
    #[must_use]
    pub fn is_initial(&self) -> bool {
        *self == Self::new()
    }

    /// Commit a person and move to clothing selection.
    ///
    /// Clears any clothes and result chosen for the previous person.
    pub fn select_person(&mut self, person: Asset) {
        self.person = Some(person);
        self.clothes = None;
        self.result = None;
        self.step = WizardStep::ClothesSelect;
    }

    /// Commit clothes and move to the result step.
    ///
    /// Clears any previous result; the caller is expected to start a new
    /// try-on generation.
    ///
    /// # Errors
    ///
    /// [`TransitionError::NoPerson`] if no person is selected.
    pub fn select_clothes(&mut self, clothes: Asset) -> Result<(), TransitionError> {
        if self.person.is_none() {
            return Err(TransitionError::NoPerson);
        }
        self.clothes = Some(clothes);
        self.result = None;
        self.step = WizardStep::Result;
        Ok(())
    }

    /// Store a successful try-on result.
    ///
    /// Returns the history entry describing the completed try-on.
    ///
    /// # Errors
    ///
    /// [`TransitionError::WrongStep`] outside the result step.
    pub fn complete_generation(
        &mut self,
        result: Asset,
        created_at: Timestamp,
    ) -> Result<Option<HistoryEntry>, TransitionError> {
        if self.step != WizardStep::Result {
            return Err(TransitionError::WrongStep {
                expected: WizardStep::Result,
                actual: self.step,
            });
        }
        self.result = Some(result.clone());
        let entry = match (&self.person, &self.clothes) {
            (Some(person), Some(clothes)) => Some(HistoryEntry::new(
                person.clone(),
                clothes.clone(),
                result,
                created_at,
            )),
            _ => None,
        };
        Ok(entry)
    }

    /// Step back once. Selections are kept.
    ///
    /// Returns the new step, or `None` when already at the first step.
    pub fn go_back(&mut self) -> Option<WizardStep> {
        let previous = self.step.previous()?;
        self.step = previous;
        Some(previous)
    }

    /// Return to the initial state unconditionally.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn asset(tag: &str) -> Asset {
        Asset::new("image/png", tag)
    }

    fn at_result() -> WizardState {
        let mut wizard = WizardState::new();
        wizard.select_person(asset("p"));
        wizard.select_clothes(asset("c")).unwrap();
        wizard
    }

    #[test]
    fn starts_at_person_select_with_nothing_chosen() {
        let wizard = WizardState::new();
        assert_eq!(wizard.step(), WizardStep::PersonSelect);
        assert!(wizard.person().is_none());
        assert!(wizard.clothes().is_none());
        assert!(wizard.result().is_none());
        assert!(wizard.is_initial());
    }

    #[test]
    fn select_person_advances_and_clears_downstream() {
        let mut wizard = at_result();
        wizard
            .complete_generation(asset("r"), Timestamp::from_millis(1))
            .unwrap();

        wizard.select_person(asset("p2"));
        assert_eq!(wizard.step(), WizardStep::ClothesSelect);
        assert_eq!(wizard.person(), Some(&asset("p2")));
        assert!(wizard.clothes().is_none());
        assert!(wizard.result().is_none());
    }

    #[test]
    fn repeated_select_person_always_clears() {
        let mut wizard = WizardState::new();
        wizard.select_person(asset("a"));
        wizard.select_person(asset("b"));
        assert!(wizard.clothes().is_none());
        assert!(wizard.result().is_none());
        assert_eq!(wizard.person(), Some(&asset("b")));
    }

    #[test]
    fn select_clothes_requires_person() {
        let mut wizard = WizardState::new();
        assert_eq!(
            wizard.select_clothes(asset("c")),
            Err(TransitionError::NoPerson)
        );
        assert!(wizard.is_initial());
    }

    #[test]
    fn select_clothes_enters_result_without_result() {
        let wizard = at_result();
        assert_eq!(wizard.step(), WizardStep::Result);
        assert_eq!(wizard.clothes(), Some(&asset("c")));
        assert!(wizard.result().is_none());
    }

    #[test]
    fn complete_generation_builds_history_entry() {
        let mut wizard = at_result();
        let entry = wizard
            .complete_generation(asset("r"), Timestamp::from_millis(42))
            .unwrap()
            .unwrap();

        assert_eq!(wizard.result(), Some(&asset("r")));
        assert_eq!(entry.person(), &asset("p"));
        assert_eq!(entry.clothes(), &asset("c"));
        assert_eq!(entry.result(), &asset("r"));
        assert_eq!(entry.created_at(), Timestamp::from_millis(42));
    }

    #[test]
    fn complete_generation_outside_result_is_rejected() {
        let mut wizard = WizardState::new();
        wizard.select_person(asset("p"));
        assert_eq!(
            wizard.complete_generation(asset("r"), Timestamp::default()),
            Err(TransitionError::WrongStep {
                expected: WizardStep::Result,
                actual: WizardStep::ClothesSelect,
            })
        );
        assert!(wizard.result().is_none());
    }

    #[test]
    fn go_back_keeps_selections() {
        let mut wizard = at_result();
        assert_eq!(wizard.go_back(), Some(WizardStep::ClothesSelect));
        assert_eq!(wizard.clothes(), Some(&asset("c")));

        assert_eq!(wizard.go_back(), Some(WizardStep::PersonSelect));
        assert_eq!(wizard.person(), Some(&asset("p")));

        assert_eq!(wizard.go_back(), None);
        assert_eq!(wizard.step(), WizardStep::PersonSelect);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut wizard = at_result();
        wizard
            .complete_generation(asset("r"), Timestamp::default())
            .unwrap();
        wizard.reset();
        assert_eq!(wizard, WizardState::new());
    }

    #[test]
    fn step_numbers_follow_order() {
        let numbers: Vec<u8> = WizardStep::ALL.iter().map(|s| s.number()).collect();
        assert_eq!(numbers, [1, 2, 3]);
        assert!(WizardStep::PersonSelect < WizardStep::Result);
    }
}
