//! Domain layer containing business entities and logic.
//!
//! Nothing here depends on HTTP or on a concrete storage engine.
//!
//! # Architecture
//!
//! - [`entities`] - The link record
//! - [`repositories`] - Data access trait definitions
//! - [`platform`] - User-agent classification
//! - [`destination`] - Redirect target composition (deep links, intents, desktop URLs)
//! - [`click_event`] - Click accounting event model
//! - [`click_worker`] - Asynchronous click counter worker
//!
//! # Click Processing Flow
//!
//! 1. The redirect service picks a target for the request
//! 2. A [`click_event::ClickEvent`] is offered to a bounded channel
//! 3. [`click_worker::run_click_worker`] applies the increment with retry
//! 4. The counter is updated atomically via [`repositories::LinkRepository::increment_click`]

pub mod click_event;
pub mod click_worker;
pub mod destination;
pub mod entities;
pub mod platform;
pub mod repositories;
