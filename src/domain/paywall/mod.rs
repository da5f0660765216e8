//! Paywall domain - who may read a post in full.

mod access;

pub use access::{
    AccessDecision, DenialReason, PaywallPolicy, PostAccessProfile, DEFAULT_FREE_ACCESS_DAYS,
};
