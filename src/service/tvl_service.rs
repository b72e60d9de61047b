//! TVL service: values every configured pool and aggregates the total.

use std::sync::Arc;

use alloy_primitives::Address;
use futures_util::future::try_join_all;
use rust_decimal::Decimal;

use crate::chain::BatchReader;
use crate::domain::tvl::total_value_locked;
use crate::domain::valuation::valuate;
use crate::domain::{PoolConfig, PoolRegistry, PoolValuation, PricingPolicy, RawReadSet};
use crate::error::GatewayError;

/// Orchestrates per-pool valuation and TVL aggregation.
///
/// Stateless coordinator: every call reads fresh on-chain values. Pools are
/// valued concurrently, one batch per pool, and the first failure aborts
/// the whole computation.
#[derive(Debug, Clone)]
pub struct TvlService {
    reader: Arc<dyn BatchReader>,
    registry: Arc<PoolRegistry>,
    staking_address: Address,
    policy: PricingPolicy,
}

impl TvlService {
    /// Creates a new `TvlService`.
    #[must_use]
    pub fn new(
        reader: Arc<dyn BatchReader>,
        registry: Arc<PoolRegistry>,
        staking_address: Address,
        policy: PricingPolicy,
    ) -> Self {
        Self {
            reader,
            registry,
            staking_address,
            policy,
        }
    }

    /// Returns the pool registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<PoolRegistry> {
        &self.registry
    }

    /// Returns the pricing policy.
    #[must_use]
    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Reads and values a single pool.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Read`] if the batch fails or returns values
    /// of the wrong shape.
    pub async fn value_pool(&self, pool: &PoolConfig) -> Result<PoolValuation, GatewayError> {
        let requests = RawReadSet::requests(pool, self.staking_address);
        let values = self.reader.read_batch(&requests).await?;
        let raw = RawReadSet::from_values(&values)?;
        let valuation = valuate(pool, &raw, &self.policy);
        tracing::debug!(
            pid = pool.pid,
            lp = %pool.lp_symbol,
            token_amount = %valuation.token_amount,
            value = ?valuation.value_in_quote,
            price = ?valuation.token_price_vs_quote,
            "pool valued"
        );
        Ok(valuation)
    }

    /// Values every registered pool concurrently, preserving registry
    /// order.
    ///
    /// # Errors
    ///
    /// Returns the first pool error; no partial result is produced.
    pub async fn value_farms(&self) -> Result<Vec<PoolValuation>, GatewayError> {
        try_join_all(self.registry.pools().iter().map(|pool| self.value_pool(pool))).await
    }

    /// Computes the total value locked in quote units.
    ///
    /// # Errors
    ///
    /// Returns any pool read error.
    pub async fn compute_tvl(&self) -> Result<Decimal, GatewayError> {
        let valuations = self.value_farms().await?;
        let total = total_value_locked(&valuations, &self.policy);
        tracing::info!(pools = valuations.len(), tvl = %total, "tvl computed");
        Ok(total)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use alloy_primitives::U256;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use tokio_test::assert_err;

    use super::*;
    use crate::chain::{ReadError, ReadFunction, ReadRequest, ReadValue};
    use crate::domain::tvl::format_tvl;

    /// Answers each batch from a script keyed by the LP address, which is
    /// always the `totalSupply` target.
    #[derive(Debug, Default)]
    struct ScriptedReader {
        pools: HashMap<Address, [ReadValue; 6]>,
    }

    #[async_trait]
    impl BatchReader for ScriptedReader {
        async fn read_batch(&self, requests: &[ReadRequest]) -> Result<Vec<ReadValue>, ReadError> {
            let lp = requests
                .iter()
                .find(|r| r.function == ReadFunction::TotalSupply)
                .map(|r| r.target)
                .ok_or_else(|| ReadError::Decode("no totalSupply request".to_string()))?;
            self.pools
                .get(&lp)
                .map(|values| values.to_vec())
                .ok_or_else(|| ReadError::Rpc {
                    code: -32000,
                    message: "execution reverted".to_string(),
                })
        }
    }

    fn wei(whole: u64) -> ReadValue {
        ReadValue::Uint(U256::from(whole) * U256::from(10u64).pow(U256::from(18u64)))
    }

    fn pool(pid: u32, token: &str, quote: &str, is_token_only: bool) -> PoolConfig {
        PoolConfig {
            pid,
            lp_symbol: format!("{token}-{quote}"),
            lp_address: Address::repeat_byte(u8::try_from(pid).unwrap_or(u8::MAX)),
            token_symbol: token.to_string(),
            token_address: Address::repeat_byte(0xa0),
            quote_token_symbol: quote.to_string(),
            quote_token_address: Address::repeat_byte(0xb0),
            is_token_only,
        }
    }

    /// BNB-BUSD reference pool (pid 2): 1000 BNB / 300000 BUSD, 10% staked.
    fn bnb_busd() -> (PoolConfig, [ReadValue; 6]) {
        (
            pool(2, "BNB", "BUSD", false),
            [
                wei(1_000),
                wei(300_000),
                wei(10),
                wei(100),
                ReadValue::Decimals(18),
                ReadValue::Decimals(18),
            ],
        )
    }

    /// EGG-BNB pool quoted in BNB: 50 BNB in the pool, half staked.
    fn egg_bnb() -> (PoolConfig, [ReadValue; 6]) {
        (
            pool(3, "EGG", "BNB", false),
            [
                wei(5_000),
                wei(50),
                wei(1),
                wei(2),
                ReadValue::Decimals(18),
                ReadValue::Decimals(18),
            ],
        )
    }

    /// Single-asset BUSD pool with 1234.5 BUSD staked.
    fn busd_single() -> (PoolConfig, [ReadValue; 6]) {
        (
            pool(4, "BUSD", "BUSD", true),
            [
                wei(1),
                wei(1),
                ReadValue::Uint(U256::from(12_345u64) * U256::from(10u64).pow(U256::from(17u64))),
                wei(1),
                ReadValue::Decimals(18),
                ReadValue::Decimals(18),
            ],
        )
    }

    fn service(fixtures: Vec<(PoolConfig, [ReadValue; 6])>, scripted: &[u32]) -> TvlService {
        let mut reader = ScriptedReader::default();
        let mut pools = Vec::new();
        for (config, values) in fixtures {
            if scripted.contains(&config.pid) {
                reader.pools.insert(config.lp_address, values);
            }
            pools.push(config);
        }
        let Ok(registry) = PoolRegistry::new(pools) else {
            panic!("unique pids");
        };
        TvlService::new(
            Arc::new(reader),
            Arc::new(registry),
            Address::repeat_byte(0xcc),
            PricingPolicy::default(),
        )
    }

    #[tokio::test]
    async fn values_farms_in_registry_order() {
        let svc = service(vec![busd_single(), bnb_busd(), egg_bnb()], &[2, 3, 4]);
        let Ok(valuations) = svc.value_farms().await else {
            panic!("all pools scripted");
        };
        let pids: Vec<u32> = valuations.iter().map(|v| v.config.pid).collect();
        assert_eq!(pids, vec![4, 2, 3]);
    }

    #[tokio::test]
    async fn reference_pool_price_converts_native_pools() {
        let svc = service(vec![bnb_busd(), egg_bnb(), busd_single()], &[2, 3, 4]);
        let Ok(valuations) = svc.value_farms().await else {
            panic!("all pools scripted");
        };
        let Some(reference) = valuations.iter().find(|v| v.config.pid == 2) else {
            panic!("reference pool valued");
        };
        // 300000 BUSD / 1000 BNB
        assert_eq!(reference.token_price_vs_quote, Some(dec!(300)));

        let Ok(total) = svc.compute_tvl().await else {
            panic!("tvl computed");
        };
        // bnb_busd: 300000 * 2 * 0.1 = 60000
        // egg_bnb: 50 * 2 * 0.5 = 50 BNB * 300 = 15000
        // busd_single: 1234.5 * 1
        assert_eq!(total, dec!(76234.5));
        assert_eq!(format_tvl(total), "76234.50");
    }

    #[tokio::test]
    async fn one_failing_pool_aborts_everything() {
        let svc = service(vec![bnb_busd(), egg_bnb(), busd_single()], &[2, 4]);
        assert_err!(svc.value_farms().await);
        let Err(GatewayError::Read(ReadError::Rpc { .. })) = svc.compute_tvl().await else {
            panic!("expected the read failure to propagate");
        };
    }

    #[tokio::test]
    async fn missing_reference_pool_degrades_total() {
        let svc = service(vec![egg_bnb(), busd_single()], &[3, 4]);
        let Ok(total) = svc.compute_tvl().await else {
            panic!("tvl computed");
        };
        assert_eq!(total, dec!(1234.5));
    }

    #[tokio::test]
    async fn empty_supply_pool_is_excluded() {
        let (config, mut values) = egg_bnb();
        values[3] = ReadValue::Uint(U256::ZERO);
        values[2] = ReadValue::Uint(U256::ZERO);
        let svc = service(vec![bnb_busd(), (config, values), busd_single()], &[2, 3, 4]);
        let Ok(total) = svc.compute_tvl().await else {
            panic!("zero supply degrades, it does not fail");
        };
        assert_eq!(total, dec!(61234.5));
    }

    #[tokio::test]
    async fn balance_wider_than_decimal_does_not_abort_tvl() {
        let (config, mut values) = egg_bnb();
        values[0] = ReadValue::Uint(U256::from(10u64).pow(U256::from(29u64)));
        let svc = service(vec![bnb_busd(), (config, values), busd_single()], &[2, 3, 4]);
        let Ok(total) = svc.compute_tvl().await else {
            panic!("large balances are valued, not rejected");
        };
        assert_eq!(total, dec!(76234.5));
    }

    #[tokio::test]
    async fn mistyped_batch_is_a_read_failure() {
        let (config, mut values) = bnb_busd();
        values[4] = wei(18);
        let svc = service(vec![(config, values)], &[2]);
        assert!(matches!(
            svc.compute_tvl().await,
            Err(GatewayError::Read(ReadError::UnexpectedValue { index: 4, .. }))
        ));
    }

    #[tokio::test]
    async fn empty_registry_is_zero() {
        let svc = service(Vec::new(), &[]);
        let Ok(total) = svc.compute_tvl().await else {
            panic!("nothing to read");
        };
        assert_eq!(total, Decimal::ZERO);
    }
}
