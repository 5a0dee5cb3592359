//! Bistro Core - Cart state and shared types.
//!
//! This crate provides the cart logic used by every Bistro component:
//! - `storefront` - Public restaurant site (menu, cart, order page)
//! - `cli` - Command-line cart tools backed by a JSON file
//!
//! # Architecture
//!
//! The core crate contains only types, pure state transitions, and the
//! storage slot trait - no HTTP, no filesystem access. Callers decide where the
//! serialized cart lives by implementing [`cart::CartStore`].
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs and prices
//! - [`cart`] - Cart lines, the cart manager, rendering, and order form fields

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartLine, CartManager, CartStore, CartView, OrderFormFields};
pub use types::*;
