//! Sans-IO core of the kisekae virtual try-on wizard.
//!
//! The user picks a person photo, then picks or designs a garment, then
//! sees the generated try-on. Everything that decides what happens next
//! lives here as plain data and synchronous methods:
//!
//! - [`Asset`]: an image as mime type plus base64 payload.
//! - [`PresetRegistry`]: the selectable person and clothing images.
//! - [`WizardState`]: the three-step state machine.
//! - [`GenerationTask`]: one request's `Idle -> InFlight -> Succeeded |
//!   Failed` lifecycle, with epoch tickets that reject stale results.
//! - [`HistoryLedger`]: completed try-ons, newest first.
//! - [`Session`]: the application context combining all of the above.
//!
//! Network access sits behind the [`GenerationGateway`] trait. The core
//! has no dependency on any UI framework, HTTP client or async runtime.

pub mod asset;
pub mod cards;
pub mod gateway;
pub mod history;
pub mod messages;
pub mod preset;
pub mod session;
pub mod task;
pub mod wizard;

pub use asset::{Asset, AssetError, DEFAULT_MIME_TYPE};
pub use cards::{CardStatus, StepCard, cards};
pub use gateway::{GenerationError, GenerationFuture, GenerationGateway};
pub use history::{HistoryEntry, HistoryLedger, Timestamp};
pub use messages::{CallSite, Catalog, Locale};
pub use preset::PresetRegistry;
pub use session::{
    ClothingCompletion, ClothingJob, ClothingSettlement, Session, SessionError, Settlement,
    TryOnCompletion, TryOnJob,
};
pub use task::{GenerationTask, TaskError, TaskState, Ticket};
pub use wizard::{TransitionError, WizardState, WizardStep};
