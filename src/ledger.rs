//! The ledger handle: the operations the presentation layer calls.

use crate::config::{ConfigError, LedgerConfig};
use crate::core::{Batch, BatchHistory, BatchId, Identity, Transition};
use crate::error::Result;
use crate::machine::{self, Decision};
use crate::policy::AuthorizationPolicy;
use crate::projection::Projection;
use crate::store::{BatchEntry, RecordStore};
use crate::validation;
use tracing::{debug, info};

/// Owned, thread-safe supply-chain ledger.
///
/// Share it across threads with `Arc<Ledger>`; every method takes `&self`.
///
/// # Example
///
/// ```rust
/// use harvest_ledger::{Identity, Ledger};
///
/// let ledger = Ledger::new();
/// let farmer = Identity::new("0xfarmer");
///
/// let id = ledger.create_batch(&farmer, "Wheat", 100).unwrap();
/// ledger.approve_batch(&Identity::new("0xmanager"), id).unwrap();
///
/// assert!(ledger.get_batch(id).unwrap().approved_by_manager);
/// assert!(ledger.approve_batch(&farmer, id).is_err());
/// ```
#[derive(Debug, Default)]
pub struct Ledger {
    config: LedgerConfig,
    policy: AuthorizationPolicy,
    store: RecordStore,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an empty ledger that applies `config` to every input.
    ///
    /// Fails when the config is inconsistent, such as inverted temperature
    /// bounds.
    pub fn with_config(config: LedgerConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub(crate) fn from_parts(config: LedgerConfig, store: RecordStore) -> Self {
        Self {
            config,
            policy: AuthorizationPolicy::stage_gated(),
            store,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn policy(&self) -> &AuthorizationPolicy {
        &self.policy
    }

    /// Create a batch owned by `caller` with all flags false and no
    /// temperature.
    pub fn create_batch(&self, caller: &Identity, crop_type: &str, quantity: u64) -> Result<BatchId> {
        let id = self
            .store
            .create(&self.config, caller.clone(), crop_type, quantity)
            .inspect_err(|err| debug!(farmer = %caller, error = %err, "batch rejected"))?;
        info!(batch_id = id, farmer = %caller, crop_type, quantity, "batch created");
        Ok(id)
    }

    /// Create a batch and record its first temperature reading as one unit.
    ///
    /// The reading is recorded as an `UpdateTemperature` by the creator.
    pub fn create_batch_with_temperature(
        &self,
        caller: &Identity,
        crop_type: &str,
        quantity: u64,
        temperature: i64,
    ) -> Result<BatchId> {
        let config = &self.config;
        let policy = &self.policy;
        let id = self
            .store
            .insert_with(|id| {
                validation::into_result(validation::validate_new_batch(
                    config, crop_type, quantity,
                ))?;
                let fresh = Batch::new(id, caller.clone(), crop_type.to_string(), quantity);
                let Decision { batch, record } = machine::decide(
                    policy,
                    config,
                    &fresh,
                    Transition::UpdateTemperature(temperature),
                    caller,
                )?;
                Ok(BatchEntry {
                    batch,
                    history: BatchHistory::new().record(record),
                })
            })
            .inspect_err(|err| debug!(farmer = %caller, error = %err, "batch rejected"))?;
        info!(
            batch_id = id,
            farmer = %caller,
            crop_type,
            quantity,
            temperature,
            "batch created"
        );
        Ok(id)
    }

    /// Apply one transition to batch `id` on behalf of `caller`.
    ///
    /// The record is locked for the whole decision, so two callers racing for
    /// the same step cannot both succeed.
    pub fn apply(&self, caller: &Identity, id: BatchId, transition: Transition) -> Result<Batch> {
        let kind = transition.kind();
        let batch = self
            .store
            .update(id, |entry| {
                let Decision { batch, record } =
                    machine::decide(&self.policy, &self.config, &entry.batch, transition, caller)?;
                Ok(BatchEntry {
                    batch,
                    history: entry.history.record(record),
                })
            })
            .inspect_err(|err| {
                debug!(batch_id = id, %kind, actor = %caller, error = %err, "transition rejected")
            })?;
        info!(
            batch_id = id,
            %kind,
            actor = %caller,
            stage = %batch.stage(),
            "transition committed"
        );
        Ok(batch)
    }

    pub fn approve_batch(&self, caller: &Identity, id: BatchId) -> Result<()> {
        self.apply(caller, id, Transition::Approve).map(|_| ())
    }

    /// Overwrite the cold-chain reading. Only legal before pickup.
    pub fn update_temperature(&self, caller: &Identity, id: BatchId, value: i64) -> Result<()> {
        self.apply(caller, id, Transition::UpdateTemperature(value))
            .map(|_| ())
    }

    pub fn pick_batch(&self, caller: &Identity, id: BatchId) -> Result<()> {
        self.apply(caller, id, Transition::Pick).map(|_| ())
    }

    pub fn receive_batch(&self, caller: &Identity, id: BatchId) -> Result<()> {
        self.apply(caller, id, Transition::Receive).map(|_| ())
    }

    pub fn confirm_delivery(&self, caller: &Identity, id: BatchId) -> Result<()> {
        self.apply(caller, id, Transition::Deliver).map(|_| ())
    }

    pub fn get_batch(&self, id: BatchId) -> Result<Batch> {
        self.store.get(id)
    }

    pub fn history(&self, id: BatchId) -> Result<BatchHistory> {
        self.store.history(id)
    }

    pub fn batch_count(&self) -> u64 {
        self.store.count()
    }

    pub fn list_batches(&self) -> Vec<Batch> {
        self.store.list()
    }

    pub fn projection(&self) -> Projection<'_> {
        Projection::new(&self.store)
    }

    pub(crate) fn store(&self) -> &RecordStore {
        &self.store
    }
}
