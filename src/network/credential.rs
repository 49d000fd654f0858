use crate::network::profile::NetworkProfile;
use std::fmt;

/// The RPC endpoint variable named by a profile is unset or empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingCredential {
    pub variable: &'static str,
}

impl MissingCredential {
    /// Shell instruction telling the operator how to provide the value.
    pub fn remediation(&self) -> String {
        format!("export {}=<your-rpc-url>", self.variable)
    }
}

impl fmt::Display for MissingCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} environment variable is not set", self.variable)
    }
}

impl std::error::Error for MissingCredential {}

/// Reads the RPC URL for `profile` through `lookup`.
///
/// The value is forwarded untouched; only an unset or empty variable counts
/// as missing.
pub fn resolve_rpc_url_with<F>(profile: &NetworkProfile, lookup: F) -> Result<String, MissingCredential>
where
    F: FnOnce(&str) -> Option<String>,
{
    lookup(profile.rpc_env_var)
        .filter(|value| !value.is_empty())
        .ok_or(MissingCredential {
            variable: profile.rpc_env_var,
        })
}
