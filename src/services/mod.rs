//! The two API surfaces.
//!
//! The account-scoped and instance-scoped APIs overlap in the resources they
//! expose but differ in paths, path parameter names and some operation
//! names, so each has its own handle.

pub(crate) mod account;
mod instance;

pub use account::AccountApi;
pub use instance::InstanceApi;
