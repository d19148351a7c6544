//! Grid of selectable images preceded by an upload tile.

use dioxus::prelude::*;
use kisekae_core::{Asset, Locale, PresetRegistry};

use super::upload::FileUpload;

/// Props for the [`PresetGrid`] component.
#[derive(Props, Clone, PartialEq)]
pub struct PresetGridProps {
    presets: PresetRegistry,
    /// Caption of the upload tile.
    upload_label: String,
    locale: Locale,
    /// Alt text prefix for preset images; the index is appended.
    alt: String,
    /// Fired with the clicked preset or the uploaded image.
    on_select: EventHandler<Asset>,
}

#[component]
pub fn PresetGrid(props: PresetGridProps) -> Element {
    rsx! {
        div { class: "preset-grid",
            FileUpload {
                label: props.upload_label.clone(),
                locale: props.locale,
                on_upload: props.on_select,
            }
            for (index, asset) in props.presets.list().iter().enumerate() {
                {render_preset(index, asset, &props.alt, props.on_select)}
            }
        }
    }
}

fn render_preset(index: usize, asset: &Asset, alt: &str, on_select: EventHandler<Asset>) -> Element {
    let src = asset.to_data_uri();
    let onclick = {
        let asset = asset.clone();
        move |_| on_select.call(asset.clone())
    };

    rsx! {
        button {
            key: "{index}",
            class: "preset",
            onclick: onclick,
            img { src: "{src}", alt: "{alt} {index}" }
        }
    }
}
