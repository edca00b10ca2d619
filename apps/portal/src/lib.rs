//! Form workflow engine for the candidate screening portal.
//!
//! Owns the multi-step navigation state machine, per-step validation,
//! local draft persistence (behind a swappable [`draft::DraftStore`]), and
//! the one-shot multipart submission to the intake service. The visual
//! layer on top of this crate is out of scope here.

pub mod ack;
pub mod client;
pub mod draft;
pub mod engine;
pub mod fields;
pub mod submission;
pub mod validation;

pub use client::SubmissionClient;
pub use draft::{DraftStore, JsonFileDraftStore, MemoryDraftStore};
pub use engine::{Delivery, FormEngine, SubmitOutcome};
pub use fields::{ApplicantKind, Attachment, FormFields, Step};
