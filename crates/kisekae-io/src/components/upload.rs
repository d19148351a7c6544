//! Upload tile with drag-and-drop and a file picker.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdUpload;
use kisekae_core::{Asset, AssetError, Catalog, Locale};
use tracing::warn;

/// Extensions the picker offers. The format is still sniffed from the
/// bytes afterwards.
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "webp"];

fn has_allowed_extension(name: &str) -> bool {
    name.rsplit_once('.').is_some_and(|(_, ext)| {
        ALLOWED_EXTENSIONS
            .iter()
            .any(|a| a.eq_ignore_ascii_case(ext))
    })
}

/// Why a file was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    Unsupported,
    Unreadable,
    NotAnImage,
}

impl Rejection {
    const fn message(self, text: &Catalog) -> &'static str {
        match self {
            Self::Unsupported => text.upload_unsupported,
            Self::Unreadable => text.upload_unreadable,
            Self::NotAnImage => text.upload_not_image,
        }
    }
}

/// Localized `<reason>: <file name>` line shown under the tile.
fn rejection_text(locale: Locale, rejection: Rejection, name: &str) -> String {
    format!("{}: {name}", rejection.message(locale.catalog()))
}

/// Props for the [`FileUpload`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FileUploadProps {
    /// Caption shown inside the tile.
    label: String,
    /// Language of the error line.
    locale: Locale,
    /// Called with the decoded image once a file has been read.
    on_upload: EventHandler<Asset>,
}

/// A preset-sized tile that accepts a dropped or picked image file.
#[component]
pub fn FileUpload(props: FileUploadProps) -> Element {
    let mut dragging = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let locale = props.locale;
    let process_files = move |files: Vec<FileData>| async move {
        let Some(file) = files.first() else {
            return;
        };
        let name = file.name();
        if !has_allowed_extension(&name) {
            error.set(Some(rejection_text(locale, Rejection::Unsupported, &name)));
            return;
        }
        let bytes = match file.read_bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(file = %name, error = %e, "could not read upload");
                error.set(Some(rejection_text(locale, Rejection::Unreadable, &name)));
                return;
            }
        };
        match Asset::from_bytes(&bytes) {
            Ok(asset) => {
                error.set(None);
                props.on_upload.call(asset);
            }
            Err(e @ (AssetError::EmptyInput | AssetError::UnrecognizedFormat)) => {
                warn!(file = %name, error = %e, "rejected upload");
                error.set(Some(rejection_text(locale, Rejection::NotAnImage, &name)));
            }
            Err(e) => {
                warn!(file = %name, error = %e, "could not encode upload");
                error.set(Some(rejection_text(locale, Rejection::Unreadable, &name)));
            }
        }
    };

    let handle_files = move |evt: FormEvent| async move {
        process_files(evt.files()).await;
    };

    let handle_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        dragging.set(false);
        process_files(evt.files()).await;
    };

    let state_class = if dragging() { "upload upload--dragging" } else { "upload" };

    rsx! {
        label {
            class: "{state_class}",
            ondragover: move |evt| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |_| dragging.set(false),
            ondrop: handle_drop,

            span { class: "upload__icon",
                Icon { icon: LdUpload, width: 24, height: 24 }
            }
            span { class: "upload__label", "{props.label}" }

            if let Some(ref err) = error() {
                span { class: "upload__error", "{err}" }
            }

            input {
                r#type: "file",
                accept: ".png,.jpg,.jpeg,.bmp,.webp",
                class: "hidden",
                onchange: handle_files,
            }
        }
    }
}
