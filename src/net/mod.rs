//! Networking modules for identity-provider sign-in.
//!
//! SYSTEM CONTEXT
//! ==============
//! `authenticator` defines the seam the login controller calls, `cognito`
//! implements it against a Cognito user pool, and `types` holds the
//! credential and identity shapes shared with `state`.

pub mod authenticator;
pub mod cognito;
pub mod types;
