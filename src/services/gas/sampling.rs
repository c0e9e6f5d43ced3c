use super::types::{ClassifiedSamples, PriceSample};
use crate::services::rpc::Block;

/// Pull priced transactions out of a window ordered newest first.
/// Transactions with a missing or zero price are skipped.
pub fn extract_samples(window: &[Block]) -> Vec<PriceSample> {
    window
        .iter()
        .enumerate()
        .flat_map(|(age, block)| {
            block.transactions.iter().filter_map(move |tx| {
                let price = tx.gas_price.filter(|&p| p > 0)?;
                Some(PriceSample {
                    price,
                    block_age: age as u64,
                    is_contract_call: tx.carries_payload(),
                    block_timestamp: block.timestamp,
                })
            })
        })
        .collect()
}

/// Partition samples into simple transfers and contract calls, each sorted ascending
pub fn classify(samples: &[PriceSample]) -> ClassifiedSamples {
    let (contract, simple): (Vec<&PriceSample>, Vec<&PriceSample>) =
        samples.iter().partition(|s| s.is_contract_call);

    let mut simple_transfers: Vec<u128> = simple.into_iter().map(|s| s.price).collect();
    let mut contract_calls: Vec<u128> = contract.into_iter().map(|s| s.price).collect();
    simple_transfers.sort_unstable();
    contract_calls.sort_unstable();

    ClassifiedSamples {
        simple_transfers,
        contract_calls,
    }
}
