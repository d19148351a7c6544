use dioxus::prelude::*;
use kisekae_core::{
    Asset, ClothingJob, ClothingSettlement, Locale, Session, SessionError, TryOnJob, WizardStep,
};
use kisekae_gemini::{GatewayConfig, GeminiGateway};
use kisekae_io::presets::{self, CLOTHES_PRESET_URLS, PERSON_PRESET_URLS};
use kisekae_io::{ClothesStep, HistoryGallery, PersonStep, ResultStep, TopCards};
use tracing::{error, info, warn};

fn main() {
    // Fails only if a subscriber is already installed.
    let _ = dioxus::logger::init(tracing::Level::INFO);
    dioxus::launch(app);
}

/// Root application component.
///
/// Owns the [`Session`] in a signal. Handlers call the session's
/// synchronous operations; generation jobs are dispatched through the
/// gateway and their completions fed back from spawned tasks. A stale
/// completion is recognized by the session itself, so no bookkeeping of
/// spawned tasks is needed here.
#[allow(clippy::too_many_lines)]
fn app() -> Element {
    // --- Application state ---
    let mut session = use_signal(Session::default);
    let gateway = use_signal(|| GeminiGateway::new(GatewayConfig::from_build_env()));

    use_hook(move || {
        let gateway = gateway.peek();
        let config = gateway.config();
        if config.has_credential() {
            info!(model = config.model(), "generation gateway configured");
        } else {
            warn!("API_KEY was not set at build time; generation requests will fail");
        }
    });

    // --- Preset loading ---
    use_future(move || async move {
        let http = reqwest::Client::new();
        let people = presets::fetch_all(&http, PERSON_PRESET_URLS).await;
        let clothes = presets::fetch_all(&http, CLOTHES_PRESET_URLS).await;
        let mut session = session.write();
        session.extend_person_presets(people);
        session.extend_clothes_presets(clothes);
    });

    // --- Generation plumbing ---
    let run_try_on = move |job: TryOnJob| {
        let pending = job.dispatch(&*gateway.peek());
        spawn(async move {
            let completion = pending.await;
            let settled = session.write().finish_try_on(completion);
            if let Err(err) = settled {
                error!(error = %err, "try-on completion rejected");
            }
        });
    };

    let run_clothing = move |job: ClothingJob| {
        let pending = job.dispatch(&*gateway.peek());
        spawn(async move {
            let completion = pending.await;
            let settled = session.write().finish_clothing(completion);
            match settled {
                Ok(ClothingSettlement::Selected(try_on)) => run_try_on(try_on),
                Ok(ClothingSettlement::Failed | ClothingSettlement::Discarded) => {}
                Err(err) => error!(error = %err, "clothing completion rejected"),
            }
        });
    };

    // --- Handlers ---
    let on_person = move |asset: Asset| session.write().select_person(asset);

    let on_clothes = move |asset: Asset| {
        let job = session.write().select_clothes(asset);
        match job {
            Ok(job) => run_try_on(job),
            Err(err) => error!(error = %err, "clothes selected out of order"),
        }
    };

    let on_prompt = move |prompt: String| session.write().set_prompt(prompt);

    let on_design = move |()| {
        let job = session.write().design_clothing();
        match job {
            Ok(job) => run_clothing(job),
            Err(SessionError::InvalidInput) => {}
            Err(err) => warn!(error = %err, "design request ignored"),
        }
    };

    let on_retry = move |()| {
        let job = session.write().retry_clothing();
        match job {
            Ok(job) => run_clothing(job),
            Err(err) => warn!(error = %err, "retry ignored"),
        }
    };

    let on_back = move |()| {
        session.write().go_back();
    };

    let on_reset = move |()| session.write().reset();

    let toggle_locale = move |_| {
        let next = match session.peek().locale() {
            Locale::SimplifiedChinese => Locale::English,
            Locale::English => Locale::SimplifiedChinese,
        };
        session.write().set_locale(next);
    };

    // --- Layout ---
    let current = session.read();
    let locale = current.locale();
    let text = current.catalog();

    let step_view = match current.step() {
        WizardStep::PersonSelect => rsx! {
            PersonStep {
                presets: current.person_presets().clone(),
                locale,
                on_select: on_person,
            }
        },
        WizardStep::ClothesSelect => match current.wizard().person().cloned() {
            Some(person) => rsx! {
                ClothesStep {
                    person,
                    presets: current.clothes_presets().clone(),
                    locale,
                    prompt: current.prompt().to_owned(),
                    designing: current.clothing_state().is_in_flight(),
                    failure: current.clothing_message(),
                    on_select: on_clothes,
                    on_prompt,
                    on_design,
                    on_retry,
                    on_back,
                }
            },
            None => rsx! {},
        },
        WizardStep::Result => rsx! {
            ResultStep {
                result: current.wizard().result().cloned(),
                in_flight: current.try_on_state().is_in_flight(),
                failure: current.try_on_message(),
                locale,
                on_reset,
                on_back,
            }
        },
    };

    let other_language = match locale {
        Locale::SimplifiedChinese => "English",
        Locale::English => "中文",
    };

    rsx! {
        style { dangerous_inner_html: include_str!("../assets/kisekae.css") }

        div { class: "app", lang: "{locale.tag()}",
            header { class: "app__header",
                div { class: "app__brand",
                    span { class: "app__logo" }
                    h1 { "{text.app_title}" }
                    span { class: "app__badge", "Beta" }
                }
                button {
                    class: "btn btn--ghost",
                    onclick: toggle_locale,
                    "{other_language}"
                }
            }

            main { class: "app__main",
                TopCards { cards: current.cards(), locale }
                div { class: "panel", {step_view} }
            }

            HistoryGallery {
                entries: current.history().list().to_vec(),
                locale,
            }
        }
    }
}
