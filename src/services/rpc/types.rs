use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("RPC error: {0}")]
    Rpc(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// A block as seen by the estimator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub number: u64,
    /// Unix seconds
    pub timestamp: u64,
    pub transactions: Vec<ChainTransaction>,
}

impl Block {
    pub fn empty(number: u64, timestamp: u64) -> Self {
        Self {
            number,
            timestamp,
            transactions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainTransaction {
    /// Fee per gas unit in the smallest denomination, `None` when the node omits it
    pub gas_price: Option<u128>,
    /// Raw call data, `"0x"` for a bare transfer
    pub input: String,
}

impl ChainTransaction {
    pub fn transfer(gas_price: u128) -> Self {
        Self {
            gas_price: Some(gas_price),
            input: "0x".to_string(),
        }
    }

    pub fn contract_call(gas_price: u128, input: impl Into<String>) -> Self {
        Self {
            gas_price: Some(gas_price),
            input: input.into(),
        }
    }

    /// True when the transaction carries call data beyond the bare-transfer marker
    pub fn carries_payload(&self) -> bool {
        !matches!(self.input.trim(), "" | "0x" | "0X")
    }
}

// =============================================================================
// Wire format (eth_getBlockByNumber with full transaction objects)
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct RpcBlock {
    pub number: String,
    pub timestamp: String,
    #[serde(default)]
    pub transactions: Vec<RpcTransaction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransaction {
    #[serde(default)]
    pub gas_price: Option<String>,
    #[serde(default, alias = "data")]
    pub input: Option<String>,
}

impl TryFrom<RpcBlock> for Block {
    type Error = RpcError;

    fn try_from(raw: RpcBlock) -> Result<Self, Self::Error> {
        let number = parse_quantity_u64(&raw.number)
            .map_err(|e| RpcError::Parse(format!("Invalid block number: {}", e)))?;
        let timestamp = parse_quantity_u64(&raw.timestamp)
            .map_err(|e| RpcError::Parse(format!("Invalid timestamp in block {}: {}", number, e)))?;

        let transactions = raw
            .transactions
            .into_iter()
            .map(|tx| {
                let gas_price = tx
                    .gas_price
                    .as_deref()
                    .map(parse_quantity_u128)
                    .transpose()
                    .map_err(|e| {
                        RpcError::Parse(format!("Invalid gas price in block {}: {}", number, e))
                    })?;
                Ok(ChainTransaction {
                    gas_price,
                    input: tx.input.unwrap_or_default(),
                })
            })
            .collect::<Result<Vec<_>, RpcError>>()?;

        Ok(Block {
            number,
            timestamp,
            transactions,
        })
    }
}

fn strip_hex_prefix(value: &str) -> Result<&str, String> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .ok_or_else(|| format!("missing 0x prefix in {:?}", value))?;
    if digits.is_empty() {
        return Err(format!("empty quantity {:?}", value));
    }
    Ok(digits)
}

pub fn parse_quantity_u64(value: &str) -> Result<u64, String> {
    let digits = strip_hex_prefix(value)?;
    u64::from_str_radix(digits, 16).map_err(|e| format!("{:?}: {}", value, e))
}

pub fn parse_quantity_u128(value: &str) -> Result<u128, String> {
    let digits = strip_hex_prefix(value)?;
    u128::from_str_radix(digits, 16).map_err(|e| format!("{:?}: {}", value, e))
}

pub fn to_quantity(value: u64) -> String {
    format!("0x{:x}", value)
}
