//! # Proposal Page
//!
//! Client logic of the proposal page: one YES button that records the answer,
//! one NO button that refuses to be pressed.
//!
//! ## Overall Payloads
//!
//! Requests between the page and the recorder backend, see `records::payloads`.
//!
//! ### YES
//! To backend
//! - `POST /yes`, JSON `{ "message": "Your Billota is ready to marry you 💍" }`
//!
//! From backend
//! - `{ success, data: ResponseRecord, totalResponses }`
//! - Ignored by the page beyond logging, the celebration runs either way
//!
//! ### NO
//! - Never leaves the page
//! - Counter kept in session storage under `noAttempts`
//!
//!
//!
//! ## Flow
//!
//! - Host inspects `(pointer: coarse)` once and builds a [`PageController`]
//! - [`PageController::mount`] starts the hearts and retires a stale NO counter
//! - YES: disable button, one request, overlay + confetti, clear NO counter
//! - Second YES while the first is in flight or done: nothing happens
//! - NO on touch: button jumps away from the finger
//! - NO on mouse: button dodges on hover, a landed click warns and reloads
//! - [`PageController::teardown`] stops every timer the page started
//!
//!
//!
//! ## Hosting
//!
//! The DOM, the network and `sessionStorage` are capabilities handed to the
//! controller:
//! - [`PageView`]: every visual mutation
//! - [`ProposalApi`]: implemented for `records::remote::RecorderClient`
//! - [`SessionStorage`]: [`MemoryStorage`] when the host has none
//!
//! Recorder base URL comes from [`config::api_base_url`].
pub mod api;
pub mod config;
pub mod controller;
pub mod decor;
pub mod escape;
pub mod geometry;
pub mod storage;
pub mod view;

#[cfg(test)]
mod testing;

pub use api::ProposalApi;
pub use controller::{PageController, SubmissionOutcome, SubmissionPhase};
pub use escape::{EscapeStrategy, PointerCapability, Reaction};
pub use storage::{MemoryStorage, NoButtonState, SessionStorage};
pub use view::PageView;
