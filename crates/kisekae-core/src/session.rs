//! Application context tying the wizard to its generation requests.
//!
//! A [`Session`] owns every piece of mutable state: the wizard, both
//! preset lists, the history ledger and one [`GenerationTask`] for each
//! of the two generation paths. It never awaits anything itself.
//! Operations that need the generation service hand back a job; the
//! caller dispatches the job against a [`GenerationGateway`], awaits
//! the future wherever it likes and feeds the completion back through
//! [`Session::finish_try_on`] or [`Session::finish_clothing`].
//!
//! Completions carry the [`Ticket`] of the request they answer. When
//! the wizard has moved on in the meantime (reset, back navigation, a
//! new selection) the ticket is stale and the completion is discarded.

use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};
use tracing::{debug, info, warn};

use crate::asset::Asset;
use crate::cards::{self, StepCard};
use crate::gateway::{GenerationError, GenerationGateway};
use crate::history::{HistoryLedger, Timestamp};
use crate::messages::{CallSite, Catalog, Locale};
use crate::preset::PresetRegistry;
use crate::task::{GenerationTask, TaskError, TaskState, Ticket};
use crate::wizard::{TransitionError, WizardState, WizardStep};

/// Errors from [`Session`] operations.
///
/// None of these are shown to the user. [`SessionError::InvalidInput`]
/// is expected input validation; the others mean the caller offered an
/// action the current state does not allow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The clothing prompt is empty or only whitespace.
    #[error("the clothing prompt is empty")]
    InvalidInput,

    /// Wizard precondition violated.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// Generation controller precondition violated.
    #[error(transparent)]
    Task(#[from] TaskError),
}

/// A try-on request that has been admitted but not yet sent.
#[derive(Debug)]
#[must_use = "a job does nothing until it is dispatched"]
pub struct TryOnJob {
    ticket: Ticket,
    person: Asset,
    clothes: Asset,
}

impl TryOnJob {
    /// The person photo to dress.
    #[must_use]
    pub const fn person(&self) -> &Asset {
        &self.person
    }

    /// The garment to apply.
    #[must_use]
    pub const fn clothes(&self) -> &Asset {
        &self.clothes
    }

    /// Send the request through `gateway`.
    ///
    /// A gateway that refuses synchronously (no credential) yields a
    /// future that is already resolved with that error.
    pub fn dispatch<G>(self, gateway: &G) -> LocalBoxFuture<'static, TryOnCompletion>
    where
        G: GenerationGateway + ?Sized,
    {
        let Self {
            ticket,
            person,
            clothes,
        } = self;
        debug!(
            person_mime = person.mime_type(),
            clothes_mime = clothes.mime_type(),
            "dispatching try-on"
        );
        match gateway.generate_try_on(&person, &clothes) {
            Ok(pending) => async move {
                TryOnCompletion {
                    ticket,
                    outcome: pending.await,
                }
            }
            .boxed_local(),
            Err(err) => {
                warn!(error = %err, "try-on refused before sending");
                future::ready(TryOnCompletion {
                    ticket,
                    outcome: Err(err),
                })
                .boxed_local()
            }
        }
    }

    /// Pair this job with an outcome obtained some other way.
    pub fn complete(self, outcome: Result<Asset, GenerationError>) -> TryOnCompletion {
        TryOnCompletion {
            ticket: self.ticket,
            outcome,
        }
    }
}

/// The answer to a [`TryOnJob`].
#[derive(Debug)]
#[must_use = "pass the completion to Session::finish_try_on"]
pub struct TryOnCompletion {
    ticket: Ticket,
    outcome: Result<Asset, GenerationError>,
}

impl TryOnCompletion {
    /// What the gateway produced.
    pub const fn outcome(&self) -> &Result<Asset, GenerationError> {
        &self.outcome
    }
}

/// A clothing design request that has been admitted but not yet sent.
#[derive(Debug)]
#[must_use = "a job does nothing until it is dispatched"]
pub struct ClothingJob {
    ticket: Ticket,
    prompt: String,
}

impl ClothingJob {
    /// The prompt exactly as typed.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Send the request through `gateway`.
    ///
    /// A gateway that refuses synchronously (no credential) yields a
    /// future that is already resolved with that error.
    pub fn dispatch<G>(self, gateway: &G) -> LocalBoxFuture<'static, ClothingCompletion>
    where
        G: GenerationGateway + ?Sized,
    {
        let Self { ticket, prompt } = self;
        debug!(prompt = %prompt, "dispatching clothing design");
        match gateway.generate_clothing(&prompt) {
            Ok(pending) => async move {
                ClothingCompletion {
                    ticket,
                    outcome: pending.await,
                }
            }
            .boxed_local(),
            Err(err) => {
                warn!(error = %err, "clothing design refused before sending");
                future::ready(ClothingCompletion {
                    ticket,
                    outcome: Err(err),
                })
                .boxed_local()
            }
        }
    }

    /// Pair this job with an outcome obtained some other way.
    pub fn complete(self, outcome: Result<Asset, GenerationError>) -> ClothingCompletion {
        ClothingCompletion {
            ticket: self.ticket,
            outcome,
        }
    }
}

/// The answer to a [`ClothingJob`].
#[derive(Debug)]
#[must_use = "pass the completion to Session::finish_clothing"]
pub struct ClothingCompletion {
    ticket: Ticket,
    outcome: Result<Asset, GenerationError>,
}

impl ClothingCompletion {
    /// What the gateway produced.
    pub const fn outcome(&self) -> &Result<Asset, GenerationError> {
        &self.outcome
    }
}

/// What [`Session::finish_try_on`] did with a completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// The result was stored and a history entry recorded.
    Completed,
    /// The try-on failed; the wizard stays at the result step.
    Failed,
    /// The completion was stale and ignored.
    Discarded,
}

/// What [`Session::finish_clothing`] did with a completion.
#[derive(Debug)]
pub enum ClothingSettlement {
    /// The design was added to the presets and selected. The returned
    /// job is the try-on that selection started.
    Selected(TryOnJob),
    /// The design failed; the prompt is kept for a retry.
    Failed,
    /// The completion was stale and ignored.
    Discarded,
}

/// The whole client-side state of one try-on session.
#[derive(Debug)]
pub struct Session {
    wizard: WizardState,
    person_presets: PresetRegistry,
    clothes_presets: PresetRegistry,
    history: HistoryLedger,
    try_on: GenerationTask,
    clothing: GenerationTask,
    prompt: String,
    /// Prompt of the last design sent, reused verbatim by a retry.
    sent_prompt: String,
    locale: Locale,
    clock: fn() -> Timestamp,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(PresetRegistry::default(), PresetRegistry::default())
    }
}

impl Session {
    /// Start a session at the first step with the given presets.
    #[must_use]
    pub fn new(person_presets: PresetRegistry, clothes_presets: PresetRegistry) -> Self {
        Self {
            wizard: WizardState::new(),
            person_presets,
            clothes_presets,
            history: HistoryLedger::new(),
            try_on: GenerationTask::new(),
            clothing: GenerationTask::new(),
            prompt: String::new(),
            sent_prompt: String::new(),
            locale: Locale::default(),
            clock: Timestamp::now,
        }
    }

    /// Use `locale` for user-facing messages.
    #[must_use]
    pub const fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Stamp history entries with `clock` instead of the system time.
    #[must_use]
    pub const fn with_clock(mut self, clock: fn() -> Timestamp) -> Self {
        self.clock = clock;
        self
    }

    /// Switch the language of user-facing messages.
    pub const fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    /// Current display language.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Strings for the current locale.
    #[must_use]
    pub const fn catalog(&self) -> &'static Catalog {
        self.locale.catalog()
    }

    /// The wizard's step and selections.
    #[must_use]
    pub const fn wizard(&self) -> &WizardState {
        &self.wizard
    }

    /// Shorthand for `wizard().step()`.
    #[must_use]
    pub const fn step(&self) -> WizardStep {
        self.wizard.step()
    }

    /// Person photos offered on the first step.
    #[must_use]
    pub const fn person_presets(&self) -> &PresetRegistry {
        &self.person_presets
    }

    /// Clothing offered on the second step, newest design first.
    #[must_use]
    pub const fn clothes_presets(&self) -> &PresetRegistry {
        &self.clothes_presets
    }

    /// Add person presets that finished loading after startup.
    pub fn extend_person_presets(&mut self, assets: impl IntoIterator<Item = Asset>) {
        self.person_presets.extend(assets);
    }

    /// Add clothing presets that finished loading after startup.
    pub fn extend_clothes_presets(&mut self, assets: impl IntoIterator<Item = Asset>) {
        self.clothes_presets.extend(assets);
    }

    /// Completed try-ons, newest first.
    #[must_use]
    pub const fn history(&self) -> &HistoryLedger {
        &self.history
    }

    /// Lifecycle of the current try-on request.
    #[must_use]
    pub const fn try_on_state(&self) -> &TaskState {
        self.try_on.state()
    }

    /// Lifecycle of the current clothing design request.
    #[must_use]
    pub const fn clothing_state(&self) -> &TaskState {
        self.clothing.state()
    }

    /// The clothing prompt as currently typed.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Localized message for a failed try-on, if the last one failed.
    #[must_use]
    pub fn try_on_message(&self) -> Option<&'static str> {
        self.try_on
            .state()
            .failure()
            .map(|_| self.catalog().failure(CallSite::TryOn))
    }

    /// Localized message for a failed clothing design, if the last one
    /// failed.
    #[must_use]
    pub fn clothing_message(&self) -> Option<&'static str> {
        self.clothing
            .state()
            .failure()
            .map(|_| self.catalog().failure(CallSite::ClothingDesign))
    }

    /// Display descriptors for the step cards.
    #[must_use]
    pub fn cards(&self) -> [StepCard; 3] {
        cards::cards(&self.wizard)
    }

    /// Commit a person photo and move to clothing selection.
    ///
    /// Any outstanding request is abandoned.
    pub fn select_person(&mut self, person: Asset) {
        self.try_on.teardown();
        self.clothing.teardown();
        self.prompt.clear();
        self.wizard.select_person(person);
        debug!(step = %self.wizard.step(), "person selected");
    }

    /// Commit a clothing image, enter the result step and start the
    /// try-on.
    ///
    /// # Errors
    ///
    /// [`TransitionError::NoPerson`] if no person is selected. The
    /// session is left unchanged.
    pub fn select_clothes(&mut self, clothes: Asset) -> Result<TryOnJob, SessionError> {
        let person = self
            .wizard
            .person()
            .cloned()
            .ok_or(TransitionError::NoPerson)?;
        self.wizard.select_clothes(clothes.clone())?;
        self.clothing.teardown();
        self.prompt.clear();
        self.try_on.teardown();
        let ticket = self.try_on.start()?;
        debug!(step = %self.wizard.step(), "clothes selected, try-on started");
        Ok(TryOnJob {
            ticket,
            person,
            clothes,
        })
    }

    /// Apply the answer to a try-on request.
    ///
    /// # Errors
    ///
    /// [`TransitionError::WrongStep`] if a live completion arrives while
    /// the wizard is not at the result step. Every step change tears the
    /// try-on down, so this signals a bug in the session itself.
    pub fn finish_try_on(
        &mut self,
        completion: TryOnCompletion,
    ) -> Result<Settlement, SessionError> {
        let TryOnCompletion { ticket, outcome } = completion;
        if !self.try_on.is_live(ticket) {
            debug!(ok = outcome.is_ok(), "discarding stale try-on completion");
            return Ok(Settlement::Discarded);
        }
        self.try_on.settle(ticket, outcome.clone());
        match outcome {
            Ok(result) => {
                let created_at = (self.clock)();
                if let Some(entry) = self.wizard.complete_generation(result, created_at)? {
                    info!(id = entry.id(), history_len = self.history.len() + 1, "try-on complete");
                    self.history.record(entry);
                }
                Ok(Settlement::Completed)
            }
            Err(err) => {
                warn!(error = %err, "try-on failed");
                Ok(Settlement::Failed)
            }
        }
    }

    /// Replace the clothing prompt. Clears a displayed design failure.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
        self.clothing.clear_failure();
    }

    /// Start designing clothing from the current prompt.
    ///
    /// # Errors
    ///
    /// - [`SessionError::InvalidInput`] when the prompt is blank. The
    ///   controller does not change state.
    /// - [`TaskError::AlreadyInFlight`] while a design is outstanding.
    /// - [`TransitionError::WrongStep`] outside clothing selection.
    pub fn design_clothing(&mut self) -> Result<ClothingJob, SessionError> {
        self.require_step(WizardStep::ClothesSelect)?;
        if self.clothing.is_in_flight() {
            return Err(TaskError::AlreadyInFlight.into());
        }
        if self.prompt.trim().is_empty() {
            return Err(SessionError::InvalidInput);
        }
        self.clothing.teardown();
        let ticket = self.clothing.start()?;
        self.sent_prompt.clone_from(&self.prompt);
        Ok(ClothingJob {
            ticket,
            prompt: self.sent_prompt.clone(),
        })
    }

    /// Repeat a failed clothing design with the prompt it was sent with,
    /// even if the prompt was edited while that design was in flight.
    ///
    /// # Errors
    ///
    /// [`TaskError::NothingToRetry`] unless the last design failed and
    /// [`TransitionError::WrongStep`] outside clothing selection.
    pub fn retry_clothing(&mut self) -> Result<ClothingJob, SessionError> {
        self.require_step(WizardStep::ClothesSelect)?;
        let ticket = self.clothing.retry()?;
        debug!(prompt = %self.sent_prompt, "retrying clothing design");
        Ok(ClothingJob {
            ticket,
            prompt: self.sent_prompt.clone(),
        })
    }

    /// Apply the answer to a clothing design request.
    ///
    /// On success the design is prepended to the clothing presets and
    /// selected exactly as if the user had clicked it.
    ///
    /// # Errors
    ///
    /// Propagates [`Session::select_clothes`] errors.
    pub fn finish_clothing(
        &mut self,
        completion: ClothingCompletion,
    ) -> Result<ClothingSettlement, SessionError> {
        let ClothingCompletion { ticket, outcome } = completion;
        if !self.clothing.is_live(ticket) {
            debug!(ok = outcome.is_ok(), "discarding stale clothing completion");
            return Ok(ClothingSettlement::Discarded);
        }
        self.clothing.settle(ticket, outcome.clone());
        match outcome {
            Ok(design) => {
                info!(mime = design.mime_type(), "clothing designed");
                self.clothes_presets.prepend(design.clone());
                self.select_clothes(design).map(ClothingSettlement::Selected)
            }
            Err(err) => {
                warn!(error = %err, prompt = %self.prompt, "clothing design failed");
                Ok(ClothingSettlement::Failed)
            }
        }
    }

    /// Step back once, abandoning the request owned by the step being
    /// left. Selections are kept.
    pub fn go_back(&mut self) -> Option<WizardStep> {
        let leaving = self.wizard.step();
        let previous = self.wizard.go_back()?;
        match leaving {
            WizardStep::Result => self.try_on.teardown(),
            WizardStep::ClothesSelect => {
                self.clothing.teardown();
                self.prompt.clear();
            }
            WizardStep::PersonSelect => {}
        }
        debug!(from = %leaving, to = %previous, "went back");
        Some(previous)
    }

    /// Return the wizard to its initial state.
    ///
    /// Presets and history survive. Requests still in flight will be
    /// discarded when they settle.
    pub fn reset(&mut self) {
        self.try_on.teardown();
        self.clothing.teardown();
        self.prompt.clear();
        self.wizard.reset();
        debug!("session reset");
    }

    fn require_step(&self, expected: WizardStep) -> Result<(), TransitionError> {
        let actual = self.wizard.step();
        if actual == expected {
            Ok(())
        } else {
            Err(TransitionError::WrongStep { expected, actual })
        }
    }
}
