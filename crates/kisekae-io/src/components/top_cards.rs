//! The three tilted step cards above the wizard.

use dioxus::prelude::*;
use kisekae_core::{CardStatus, Locale, StepCard, WizardStep};

/// Props for the [`TopCards`] component.
#[derive(Props, Clone, PartialEq)]
pub struct TopCardsProps {
    cards: [StepCard; 3],
    locale: Locale,
}

#[component]
pub fn TopCards(props: TopCardsProps) -> Element {
    rsx! {
        div { class: "top-cards",
            for card in props.cards.iter() {
                {render_card(card, props.locale)}
            }
        }
    }
}

const fn status_class(status: CardStatus) -> &'static str {
    match status {
        CardStatus::Active => "card--active",
        CardStatus::Past => "card--past",
        CardStatus::Upcoming => "card--upcoming",
    }
}

fn render_card(card: &StepCard, locale: Locale) -> Element {
    let text = locale.catalog();
    let (glyph, placeholder) = match card.step {
        WizardStep::PersonSelect => ("👤", text.person_placeholder),
        WizardStep::ClothesSelect => ("👕", text.clothes_placeholder),
        WizardStep::Result => ("✨", text.result_placeholder),
    };
    let number = card.step.number();
    let status = status_class(card.status);

    rsx! {
        div {
            key: "{card.step}",
            class: "card card--step{number} {status}",
            if let Some(asset) = &card.asset {
                img { src: "{asset.to_data_uri()}", alt: "{placeholder}" }
            } else {
                div { class: "card__placeholder",
                    span { class: "card__glyph", "{glyph}" }
                    span { "{placeholder}" }
                }
            }
            div { class: "card__caption", "Step {number}" }
        }
    }
}
