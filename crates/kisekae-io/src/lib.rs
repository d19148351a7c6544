//! kisekae-io: Browser I/O and Dioxus component library.
//!
//! Handles file uploads, Blob downloads and preset loading, and
//! provides the UI components of the kisekae web app.

pub mod components;
pub mod download;
pub mod presets;

pub use components::{
    ClothesStep, FileUpload, HistoryGallery, PersonStep, PresetGrid, ResultStep, TopCards,
};
