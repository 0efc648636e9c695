//! API endpoint handlers.
//!
//! `pages` serves every screen through `views::render`; the other modules
//! are the commands a screen can issue.

pub mod appointments;
pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod doctors;
pub mod health;
pub mod pages;
