//! Horizontal strip of past try-ons, newest first.

use dioxus::prelude::*;
use kisekae_core::{HistoryEntry, Locale, Timestamp};
use wasm_bindgen::JsValue;

/// Props for the [`HistoryGallery`] component.
#[derive(Props, Clone, PartialEq)]
pub struct HistoryGalleryProps {
    entries: Vec<HistoryEntry>,
    locale: Locale,
}

/// Renders nothing until the first try-on completes.
#[component]
pub fn HistoryGallery(props: HistoryGalleryProps) -> Element {
    if props.entries.is_empty() {
        return rsx! {};
    }
    let text = props.locale.catalog();

    rsx! {
        section { class: "history",
            h3 { class: "history__title", "{text.history_title}" }
            div { class: "history__strip",
                for entry in props.entries.iter() {
                    {render_entry(entry, props.locale)}
                }
            }
        }
    }
}

fn render_entry(entry: &HistoryEntry, locale: Locale) -> Element {
    let text = locale.catalog();
    let time = local_time(entry.created_at(), locale);

    rsx! {
        figure { key: "{entry.id()}", class: "history__item",
            div { class: "history__result",
                img { src: "{entry.result().to_data_uri()}", alt: "{text.result_placeholder}" }
                figcaption { "{time}" }
            }
            div { class: "history__sources",
                img { src: "{entry.person().to_data_uri()}", alt: "{text.person_placeholder}" }
                span { "+" }
                img { src: "{entry.clothes().to_data_uri()}", alt: "{text.clothes_placeholder}" }
            }
        }
    }
}

/// Wall-clock time of `timestamp` formatted by the browser for `locale`.
#[allow(clippy::cast_precision_loss)]
fn local_time(timestamp: Timestamp, locale: Locale) -> String {
    let date = js_sys::Date::new(&JsValue::from_f64(timestamp.as_millis() as f64));
    String::from(date.to_locale_time_string(locale.tag()))
}
