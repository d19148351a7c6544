//! Dioxus UI components for the try-on wizard.
//!
//! One component per wizard step, plus the step cards, the history
//! strip and the shared upload tile and preset grid they are built from.

mod clothes_step;
mod history_gallery;
mod person_step;
mod preset_grid;
mod result_step;
mod top_cards;
mod upload;

use dioxus::prelude::*;
use kisekae_core::WizardStep;

pub use clothes_step::ClothesStep;
pub use history_gallery::HistoryGallery;
pub use person_step::PersonStep;
pub use preset_grid::PresetGrid;
pub use result_step::ResultStep;
pub use top_cards::TopCards;
pub use upload::FileUpload;

/// Numbered step title shared by all three steps.
fn step_heading(step: WizardStep, title: &str) -> Element {
    rsx! {
        h2 { class: "step__title",
            span { class: "step__number", "{step.number()}" }
            "{title}"
        }
    }
}
