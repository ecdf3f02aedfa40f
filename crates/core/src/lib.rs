//! Your Slice Core - domain library.
//!
//! This crate provides the behaviour shared by the Your Slice binaries:
//! - `storefront` - Public ordering site (menu, cart, slice builder, reviews)
//! - `admin` - Staff back office (orders table, product table)
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O,
//! no HTTP, no storage. Web handlers load a value (a cart, a builder state,
//! a table), call into this crate, and persist the result themselves.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for prices, ids, emails and statuses
//! - [`cart`] - Shopping cart store and totals
//! - [`builder`] - Step-wise slice configurator
//! - [`lunch`] - Weekly lunch menu
//! - [`menu`] - Popular menu items
//! - [`review`] - Customer reviews and their stored format
//! - [`orders`] - Back-office order table and row actions
//! - [`catalog`] - Back-office product table
//! - [`credentials`] - Staff login validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod builder;
pub mod cart;
pub mod catalog;
pub mod credentials;
pub mod lunch;
pub mod menu;
pub mod orders;
pub mod review;
pub mod types;

pub use types::*;
