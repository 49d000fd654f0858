//! Network selection: the compiled-in profile table and the RPC credential
//! each profile requires from the process environment.

pub mod credential;
pub mod profile;

pub use credential::{resolve_rpc_url_with, MissingCredential};
pub use profile::{find_profile, network_ids, NetworkProfile, UnknownNetwork, NETWORKS};
