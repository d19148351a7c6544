//! End-to-end wizard scenarios driven through the public `Session` API.

#![allow(clippy::unwrap_used)]

use std::cell::RefCell;
use std::collections::VecDeque;

use futures::FutureExt;
use futures::channel::oneshot;
use futures::executor::block_on;
use futures::future;
use kisekae_core::{
    Asset, ClothingSettlement, GenerationError, GenerationFuture, GenerationGateway, Session,
    Settlement, TaskState, Timestamp, WizardStep,
};

/// Gateway whose answers are queued up front. An empty queue answers
/// with `NoImageReturned`.
#[derive(Default)]
struct QueuedGateway {
    answers: RefCell<VecDeque<Result<Asset, GenerationError>>>,
}

impl QueuedGateway {
    fn new(answers: impl IntoIterator<Item = Result<Asset, GenerationError>>) -> Self {
        Self {
            answers: RefCell::new(answers.into_iter().collect()),
        }
    }

    fn answer(&self) -> GenerationFuture {
        let answer = self
            .answers
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(GenerationError::NoImageReturned));
        future::ready(answer).boxed_local()
    }
}

impl GenerationGateway for QueuedGateway {
    fn generate_clothing(&self, _prompt: &str) -> Result<GenerationFuture, GenerationError> {
        Ok(self.answer())
    }

    fn generate_try_on(
        &self,
        _person: &Asset,
        _clothes: &Asset,
    ) -> Result<GenerationFuture, GenerationError> {
        Ok(self.answer())
    }
}

/// Gateway whose single answer is supplied later through a channel.
struct DeferredGateway {
    receiver: RefCell<Option<oneshot::Receiver<Result<Asset, GenerationError>>>>,
}

impl DeferredGateway {
    fn new() -> (Self, oneshot::Sender<Result<Asset, GenerationError>>) {
        let (sender, receiver) = oneshot::channel();
        let gateway = Self {
            receiver: RefCell::new(Some(receiver)),
        };
        (gateway, sender)
    }

    fn pending(&self) -> GenerationFuture {
        let receiver = self.receiver.borrow_mut().take().unwrap();
        async move {
            receiver
                .await
                .unwrap_or_else(|_| Err(GenerationError::GenerationFailed("dropped".into())))
        }
        .boxed_local()
    }
}

impl GenerationGateway for DeferredGateway {
    fn generate_clothing(&self, _prompt: &str) -> Result<GenerationFuture, GenerationError> {
        Ok(self.pending())
    }

    fn generate_try_on(
        &self,
        _person: &Asset,
        _clothes: &Asset,
    ) -> Result<GenerationFuture, GenerationError> {
        Ok(self.pending())
    }
}

fn clock() -> Timestamp {
    Timestamp::from_millis(1_717_171_717_000)
}

fn new_session() -> Session {
    let people = ["person-a", "person-b"]
        .into_iter()
        .map(|data| Asset::new("image/jpeg", data))
        .collect();
    let clothes = ["dress-a", "jacket-b"]
        .into_iter()
        .map(|data| Asset::new("image/jpeg", data))
        .collect();
    Session::new(people, clothes).with_clock(clock)
}

#[test]
fn upload_person_pick_preset_and_succeed() {
    let mut session = new_session();
    let gateway = QueuedGateway::new([Ok(Asset::parse("data:image/png;base64,UkVTVUxU"))]);

    let person = Asset::parse("data:image/jpeg;base64,UEVSU09O");
    session.select_person(person.clone());
    assert_eq!(session.step(), WizardStep::ClothesSelect);

    let clothes = session.clothes_presets().get(0).cloned().unwrap();
    let job = session.select_clothes(clothes.clone()).unwrap();
    let completion = block_on(job.dispatch(&gateway));
    assert_eq!(session.finish_try_on(completion).unwrap(), Settlement::Completed);

    let wizard = session.wizard();
    assert_eq!(wizard.step(), WizardStep::Result);
    assert_eq!(wizard.person(), Some(&person));
    assert_eq!(wizard.clothes(), Some(&clothes));
    assert_eq!(wizard.result().map(Asset::data), Some("UkVTVUxU"));

    let history = session.history().list();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].person(), &person);
    assert_eq!(history[0].clothes(), &clothes);
    assert_eq!(history[0].result().data(), "UkVTVUxU");
    assert_eq!(history[0].created_at(), clock());
}

#[test]
fn designing_without_image_keeps_prompt_and_presets() {
    let mut session = new_session();
    let gateway = QueuedGateway::new([Err(GenerationError::NoImageReturned)]);
    session.select_person(Asset::new("image/jpeg", "person-a"));
    let presets_before = session.clothes_presets().clone();

    session.set_prompt("red silk gown");
    let job = session.design_clothing().unwrap();
    let completion = block_on(job.dispatch(&gateway));
    assert!(matches!(
        session.finish_clothing(completion).unwrap(),
        ClothingSettlement::Failed
    ));

    assert_eq!(
        session.clothing_state(),
        &TaskState::Failed(GenerationError::NoImageReturned)
    );
    assert_eq!(session.clothes_presets(), &presets_before);
    assert_eq!(session.prompt(), "red silk gown");
    assert_eq!(session.step(), WizardStep::ClothesSelect);
}

#[test]
fn reset_before_settlement_discards_late_success() {
    let mut session = new_session();
    let (gateway, answer) = DeferredGateway::new();
    session.select_person(Asset::new("image/jpeg", "person-a"));
    let job = session
        .select_clothes(Asset::new("image/jpeg", "dress-a"))
        .unwrap();
    let pending = job.dispatch(&gateway);

    session.reset();
    answer.send(Ok(Asset::new("image/png", "late"))).unwrap();
    let completion = block_on(pending);

    assert_eq!(session.finish_try_on(completion).unwrap(), Settlement::Discarded);
    assert!(session.wizard().is_initial());
    assert!(session.history().is_empty());
}

#[test]
fn history_grows_once_per_success_newest_first() {
    let mut session = new_session();
    let gateway = QueuedGateway::new([
        Ok(Asset::new("image/png", "first")),
        Err(GenerationError::GenerationFailed("HTTP 500".into())),
        Ok(Asset::new("image/png", "second")),
    ]);
    session.select_person(Asset::new("image/jpeg", "person-a"));

    let mut lengths = Vec::new();
    for clothes in ["dress-a", "jacket-b", "dress-a"] {
        if session.step() == WizardStep::Result {
            session.go_back();
        }
        let job = session
            .select_clothes(Asset::new("image/jpeg", clothes))
            .unwrap();
        let completion = block_on(job.dispatch(&gateway));
        session.finish_try_on(completion).unwrap();
        lengths.push(session.history().len());
    }

    assert_eq!(lengths, [1, 1, 2]);
    assert_eq!(session.history().list()[0].result().data(), "second");
    assert_eq!(session.history().list()[1].result().data(), "first");
}

#[test]
fn designed_clothing_flows_into_try_on() {
    let mut session = new_session();
    let gateway = QueuedGateway::new([
        Err(GenerationError::GenerationFailed("timeout".into())),
        Ok(Asset::new("image/png", "gown")),
        Ok(Asset::new("image/png", "dressed")),
    ]);
    session.select_person(Asset::new("image/jpeg", "person-b"));
    session.set_prompt("red silk gown");

    let failed = block_on(session.design_clothing().unwrap().dispatch(&gateway));
    session.finish_clothing(failed).unwrap();
    assert!(session.clothing_message().is_some());

    let retried = block_on(session.retry_clothing().unwrap().dispatch(&gateway));
    let try_on = match session.finish_clothing(retried).unwrap() {
        ClothingSettlement::Selected(job) => Some(job),
        ClothingSettlement::Failed | ClothingSettlement::Discarded => None,
    }
    .unwrap();
    assert_eq!(session.clothes_presets().list()[0].data(), "gown");
    assert_eq!(session.prompt(), "");

    let completion = block_on(try_on.dispatch(&gateway));
    assert_eq!(session.finish_try_on(completion).unwrap(), Settlement::Completed);
    assert_eq!(session.wizard().result().map(Asset::data), Some("dressed"));
    assert_eq!(session.history().latest().unwrap().clothes().data(), "gown");
}
