//! Step 2: choose, upload or design the clothing.
//!
//! The designer row sends the prompt to the generation service. While a
//! design is in flight the input is locked; a failure shows the
//! localized message with a retry button and clears as soon as the
//! prompt is edited.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdArrowLeft, LdRotateCcw, LdSparkles};
use kisekae_core::{Asset, Locale, PresetRegistry, WizardStep};

use super::preset_grid::PresetGrid;
use super::step_heading;

/// Props for the [`ClothesStep`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ClothesStepProps {
    /// The person chosen on step 1, shown as a reminder.
    person: Asset,
    presets: PresetRegistry,
    locale: Locale,
    prompt: String,
    /// A design request is in flight.
    designing: bool,
    /// Localized message of the last failed design.
    failure: Option<&'static str>,
    on_select: EventHandler<Asset>,
    on_prompt: EventHandler<String>,
    on_design: EventHandler<()>,
    on_retry: EventHandler<()>,
    on_back: EventHandler<()>,
}

#[component]
pub fn ClothesStep(props: ClothesStepProps) -> Element {
    let text = props.locale.catalog();
    let person_src = props.person.to_data_uri();
    let designing = props.designing;
    let can_design = !designing && !props.prompt.trim().is_empty();
    let on_design = props.on_design;

    let designer_class = if props.failure.is_some() {
        "designer designer--error"
    } else if designing {
        "designer designer--busy"
    } else {
        "designer"
    };

    rsx! {
        section { class: "step",
            div { class: "chosen-person",
                img { src: "{person_src}", alt: "{text.person_placeholder}" }
                span { "{text.person_chosen_hint}" }
            }

            {step_heading(WizardStep::ClothesSelect, text.clothes_step_title)}

            div { class: "{designer_class}",
                label { class: "designer__label", r#for: "designer-prompt", "{text.designer_label}" }
                div { class: "designer__row",
                    input {
                        id: "designer-prompt",
                        r#type: "text",
                        value: "{props.prompt}",
                        placeholder: "{text.prompt_placeholder}",
                        disabled: designing,
                        oninput: move |evt: FormEvent| props.on_prompt.call(evt.value()),
                        onkeydown: move |evt: KeyboardEvent| {
                            if evt.key() == Key::Enter && can_design {
                                on_design.call(());
                            }
                        },
                    }
                    button {
                        class: "btn btn--primary",
                        disabled: !can_design,
                        onclick: move |_| on_design.call(()),
                        if designing {
                            span { class: "spinner" }
                            span { "{text.designing}" }
                        } else {
                            Icon { icon: LdSparkles, width: 16, height: 16 }
                            span { "{text.generate}" }
                        }
                    }
                }

                if let Some(message) = props.failure {
                    div { class: "designer__error", role: "alert",
                        p { "{message}" }
                        button {
                            class: "btn btn--link",
                            onclick: move |_| props.on_retry.call(()),
                            Icon { icon: LdRotateCcw, width: 14, height: 14 }
                            span { "{text.retry}" }
                        }
                    }
                }
            }

            PresetGrid {
                presets: props.presets.clone(),
                upload_label: text.clothes_upload.to_owned(),
                locale: props.locale,
                alt: text.clothes_placeholder.to_owned(),
                on_select: props.on_select,
            }

            button {
                class: "btn btn--ghost",
                onclick: move |_| props.on_back.call(()),
                Icon { icon: LdArrowLeft, width: 16, height: 16 }
                span { "{text.back}" }
            }
        }
    }
}
