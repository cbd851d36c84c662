//! # folio-desk
//!
//! Contact intake and admin message triage for a personal portfolio site.
//!
//! Visitors submit the contact form; the site owner lists, filters, triages
//! (`new` → `read` → `responded`), deletes and exports the stored messages,
//! and watches aggregate counts on a dashboard. A typed client library
//! ([`client`]) carries the form and dashboard state for front ends.
//!
//! ## Architecture
//!
//! ```text
//! Clients (browser form, admin dashboard, client::PortfolioClient)
//!     │
//!     ├── REST Handlers (api/)   ── AdminAccess guard on /api/admin
//!     │
//!     ├── ContactService / AdminService (service/)
//!     ├── EventBus (domain/) ──► Notifier
//!     │
//!     └── MessageStore (persistence/)
//!           ├── InMemoryMessageStore
//!           └── PostgresMessageStore
//! ```

pub mod api;
pub mod app_state;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
