//! Step 3: the generated try-on.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdDownload;
use kisekae_core::{Asset, Locale, WizardStep};
use tracing::{debug, warn};

use super::step_heading;
use crate::download;

/// Props for the [`ResultStep`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ResultStepProps {
    result: Option<Asset>,
    /// The try-on request is still outstanding.
    in_flight: bool,
    /// Localized message of a failed try-on.
    failure: Option<&'static str>,
    locale: Locale,
    on_reset: EventHandler<()>,
    on_back: EventHandler<()>,
}

#[component]
pub fn ResultStep(props: ResultStepProps) -> Element {
    let text = props.locale.catalog();

    let body = if let Some(message) = props.failure {
        rsx! {
            div { class: "result__error", role: "alert",
                span { class: "result__error-badge", "!" }
                p { "{message}" }
                button {
                    class: "btn btn--ghost",
                    onclick: move |_| props.on_back.call(()),
                    "{text.back_and_retry}"
                }
            }
        }
    } else if let (false, Some(asset)) = (props.in_flight, props.result.clone()) {
        let src = asset.to_data_uri();
        rsx! {
            img { class: "result__image", src: "{src}", alt: "{text.result_placeholder}" }
            button {
                class: "result__download",
                title: "{text.download}",
                aria_label: "{text.download}",
                onclick: move |_| match download::download_asset(&asset) {
                    Ok(()) => debug!("result downloaded"),
                    Err(err) => warn!(error = %err, "download failed"),
                },
                Icon { icon: LdDownload, width: 20, height: 20 }
            }
        }
    } else {
        rsx! {
            div { class: "result__loading",
                span { class: "spinner spinner--large" }
                p { class: "result__loading-title", "{text.trying_on}" }
                p { class: "result__loading-detail", "{text.trying_on_detail}" }
            }
        }
    };

    let finished = props.failure.is_none() && !props.in_flight && props.result.is_some();

    rsx! {
        section { class: "step step--result",
            {step_heading(WizardStep::Result, text.result_step_title)}
            div { class: "result", {body} }
            if finished {
                div { class: "result__actions",
                    button {
                        class: "btn btn--primary",
                        onclick: move |_| props.on_reset.call(()),
                        "{text.start_over}"
                    }
                    button {
                        class: "btn btn--ghost",
                        onclick: move |_| props.on_back.call(()),
                        "{text.change_clothes}"
                    }
                }
            }
        }
    }
}
