//! LiteClientAppSample Config
//!
//! See instructions in `commands.rs` to specify the path to your
//! application's configuration file and/or command-line options
//! for specifying it.

use serde::{Deserialize, Serialize};

/// LiteClientAppSample Configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LiteClientAppSampleConfig {
    /// Configuration for NEAR rpc.
    pub near_rpc: NearRpcSection,
    /// Configuration for state data of the lite client.
    pub state_data: StateDataSection,
}

/// Configuration settings for NEAR RPC.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NearRpcSection {
    /// Endpoint of the RPC service. Should be a valid URL.
    pub rpc_endpoint: String,
    /// Seconds to wait between two head update attempts.
    pub poll_interval_secs: u64,
}

impl Default for NearRpcSection {
    fn default() -> Self {
        Self {
            rpc_endpoint: "https://rpc.testnet.near.org".to_owned(),
            poll_interval_secs: 5,
        }
    }
}

/// Configuration settings for state data of the lite client.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StateDataSection {
    /// The folder which stores state data files.
    pub data_folder: String,
}

impl Default for StateDataSection {
    fn default() -> Self {
        Self {
            data_folder: "./tmp/chain_data/testnet".to_owned(),
        }
    }
}
