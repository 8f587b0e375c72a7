//! `medinet-http` is an async HTTP client for the MediNet healthcare
//! portal REST API.
//!
//! The portal's pages all talk to the backend the same way; this crate
//! packages that shared path once:
//! - [`MediNetClient::fetch_with_retry`] — retry-aware send used by every
//!   request
//! - typed endpoint wrappers: [`MediNetClient::appointments`],
//!   [`MediNetClient::medical_history`], [`MediNetClient::billing_history`],
//!   [`MediNetClient::wearable`], [`MediNetClient::save_care_plan`],
//!   [`MediNetClient::save_prescription`], [`MediNetClient::send_chat`]
//! - [`MediNetClient::login`] — session bootstrap
//! - [`messages`] — role-flavored banner wording
//! - [`realtime`] — push-channel event dispatch

mod client;
mod credentials;
mod error;
mod request;
mod retry;
mod types;

pub mod messages;
pub mod realtime;

pub use client::MediNetClient;
pub use credentials::{Credentials, Role};
pub use error::MediNetError;
pub use request::{ApiRequest, Body};
pub use retry::RetryPolicy;
pub use types::{
    Appointment, Appointments, BillingEntry, BillingHistory, ChatMessage, LoginResponse,
    MedicalHistory, MedicalRecord, WearableData, WearableSnapshot,
};

pub type Result<T> = std::result::Result<T, MediNetError>;
