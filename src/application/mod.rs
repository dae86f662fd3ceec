//! Application layer: the services that orchestrate the domain against the
//! store ports.
//!
//! [`Shop`](shop::Shop) bundles them. Cart mutations and order submission are
//! serialized per account through [`AccountLocks`](locks::AccountLocks);
//! different accounts proceed in parallel.

pub mod accounts;
pub mod cart_engine;
pub mod catalog;
pub mod locks;
pub(crate) mod lookup;
pub mod order_engine;
pub mod shop;

#[cfg(test)]
pub(crate) mod test_support;
