//! Step 1: choose or upload a person photo.

use dioxus::prelude::*;
use kisekae_core::{Asset, Locale, PresetRegistry, WizardStep};

use super::preset_grid::PresetGrid;
use super::step_heading;

/// Props for the [`PersonStep`] component.
#[derive(Props, Clone, PartialEq)]
pub struct PersonStepProps {
    presets: PresetRegistry,
    locale: Locale,
    on_select: EventHandler<Asset>,
}

#[component]
pub fn PersonStep(props: PersonStepProps) -> Element {
    let text = props.locale.catalog();

    rsx! {
        section { class: "step",
            {step_heading(WizardStep::PersonSelect, text.person_step_title)}
            PresetGrid {
                presets: props.presets.clone(),
                upload_label: text.person_upload.to_owned(),
                locale: props.locale,
                alt: text.person_placeholder.to_owned(),
                on_select: props.on_select,
            }
        }
    }
}
