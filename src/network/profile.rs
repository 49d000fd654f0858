//! Static deployment parameters for every network the driver knows about.

use std::fmt;

const MULTICALL3_ADDRESS: &str = "0xcA11bde05977b3631167028862bE2a173976CA11";

/// Immutable deployment record keyed by a network identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkProfile {
    pub id: &'static str,
    pub chain_id: u64,
    pub prize_pool_address: &'static str,
    pub contract_json_url: &'static str,
    pub subgraph_url: &'static str,
    pub multicall_address: Option<&'static str>,
    /// Name of the environment variable holding the JSON-RPC endpoint.
    pub rpc_env_var: &'static str,
}

pub static NETWORKS: &[NetworkProfile] = &[
    NetworkProfile {
        id: "optimism-mainnet",
        chain_id: 10,
        prize_pool_address: "0xf35fe10ffd0a9672d0095c435fd8767a7fe29b55",
        contract_json_url: "https://raw.githubusercontent.com/GenerationSoftware/pt-v5-mainnet/396f04daedc5a38935460ddf47d2f10e9ac1fec6/deployments/optimism/contracts.json",
        subgraph_url: "https://api.studio.thegraph.com/query/63100/pt-v5-optimism/version/latest/graphql",
        multicall_address: None,
        rpc_env_var: "OPTIMISM_MAINNET_RPC_URL",
    },
    NetworkProfile {
        id: "base-mainnet",
        chain_id: 8453,
        prize_pool_address: "0x45b2010d8A4f08b53c9fa7544C51dFd9733732cb",
        contract_json_url: "https://raw.githubusercontent.com/GenerationSoftware/pt-v5-mainnet/bc84c3f5e1d9703372ae7f9baf584bab42f47b27/deployments/base/contracts.json",
        subgraph_url: "https://subgraph.satsuma-prod.com/17063947abe2/g9-software-inc--666267/pt-v5-base/version/v0.0.1/api",
        multicall_address: None,
        rpc_env_var: "BASE_MAINNET_RPC_URL",
    },
    NetworkProfile {
        id: "gnosis-mainnet",
        chain_id: 100,
        prize_pool_address: "0x0c08c2999e1a14569554eddbcda9da5e1918120f",
        contract_json_url: "https://raw.githubusercontent.com/GenerationSoftware/pt-v5-mainnet/196aa20f4a0b3e651d0504ffeb0e1b9a08c7ccb6/deployments/gnosis/contracts.json",
        subgraph_url: "https://api.studio.thegraph.com/query/63100/pt-v5-gnosis/version/latest/graphql",
        multicall_address: Some(MULTICALL3_ADDRESS),
        rpc_env_var: "GNOSIS_MAINNET_RPC_URL",
    },
    NetworkProfile {
        id: "world-mainnet",
        chain_id: 480,
        prize_pool_address: "0x99ffb0a6c0cd543861c8de84dd40e059fd867dcf",
        contract_json_url: "https://raw.githubusercontent.com/GenerationSoftware/pt-v5-mainnet/8e1432b70c1f135966c1b70917675cd586dda7be/deployments/world/contracts.json",
        subgraph_url: "https://api.goldsky.com/api/public/project_cm3xb1e8iup5601yx9mt5caat/subgraphs/pt-v5-world/v0.0.1/gn",
        multicall_address: Some(MULTICALL3_ADDRESS),
        rpc_env_var: "WORLD_MAINNET_RPC_URL",
    },
];

/// Raised when the requested identifier is not present in [`NETWORKS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownNetwork {
    pub requested: Option<String>,
    pub available: Vec<&'static str>,
}

impl fmt::Display for UnknownNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.requested {
            Some(name) => write!(f, "network {name:?} is not supported")?,
            None => write!(f, "no network was provided")?,
        }
        write!(f, " (available: {})", self.available.join(", "))
    }
}

impl std::error::Error for UnknownNetwork {}

/// Identifiers of every supported network, in table order.
pub fn network_ids() -> Vec<&'static str> {
    NETWORKS.iter().map(|profile| profile.id).collect()
}

/// Looks up the profile registered under `id`. Pure table lookup.
pub fn find_profile(id: &str) -> Result<&'static NetworkProfile, UnknownNetwork> {
    NETWORKS
        .iter()
        .find(|profile| profile.id == id)
        .ok_or_else(|| UnknownNetwork {
            requested: Some(id.to_owned()),
            available: network_ids(),
        })
}
