//! Domain types shared across the subscription core.

pub mod subscription;

pub use subscription::{BillingCycle, Category, Currency, Subscription};
