//! Configuration-change reconciliation.
//!
//! Tracks the signature of the configuration the slot array was last sized
//! against. When a new configuration produces a different signature the
//! array is replaced by an all-empty one for the new descriptor and every
//! discarded icon is reported with an `IconDropped` notification.

use crate::models::{BuilderConfig, Frame, Notification, PanelSize, Slot};
use crate::services::resolver::{normalize_variant, resolve};
use crate::services::store::SlotAssignmentStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Which configuration fields take part in the reset signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcilePolicy {
    /// Whether a frame change clears the panel
    pub reset_on_frame_change: bool,
}

impl Default for ReconcilePolicy {
    fn default() -> Self {
        Self {
            reset_on_frame_change: true,
        }
    }
}

/// Key compared across configuration changes. Glass never participates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ConfigSignature {
    /// Module size
    pub size: PanelSize,
    /// Normalized variant name
    pub variant: String,
    /// Frame trim, when the policy includes it
    pub frame: Option<Frame>,
}

impl ConfigSignature {
    /// Builds the signature of `config` under `policy`.
    #[must_use]
    pub fn of(config: &BuilderConfig, policy: ReconcilePolicy) -> Self {
        Self {
            size: config.size,
            variant: normalize_variant(&config.variant),
            frame: policy.reset_on_frame_change.then_some(config.frame),
        }
    }
}

/// Reconciler lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "signature", rename_all = "snake_case")]
pub enum ReconcilerState {
    /// No configuration recorded yet; hydration is still accepted
    Uninitialized,
    /// Array is sized against the recorded signature
    Stable(ConfigSignature),
}

/// Outcome of applying a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// First configuration recorded
    Initialized,
    /// Signature unchanged, slots kept
    Unchanged,
    /// Signature changed, panel cleared
    Reset {
        /// Number of icons discarded
        dropped: usize,
    },
}

/// Uninitialized/Stable state machine driving slot array resets.
#[derive(Debug, Clone)]
pub struct Reconciler {
    state: ReconcilerState,
    policy: ReconcilePolicy,
}

impl Reconciler {
    /// Creates an uninitialized reconciler.
    #[must_use]
    pub const fn new(policy: ReconcilePolicy) -> Self {
        Self {
            state: ReconcilerState::Uninitialized,
            policy,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &ReconcilerState {
        &self.state
    }

    /// Active policy.
    #[must_use]
    pub const fn policy(&self) -> ReconcilePolicy {
        self.policy
    }

    /// True once a configuration or hydration has been recorded.
    #[must_use]
    pub const fn is_stable(&self) -> bool {
        matches!(self.state, ReconcilerState::Stable(_))
    }

    /// Applies a configuration change to `store`.
    ///
    /// The first call records the signature and only resizes the store if
    /// its descriptor differs from the resolved one. Later calls clear the
    /// panel whenever the signature changes.
    pub fn apply_config(
        &mut self,
        config: &BuilderConfig,
        store: &mut SlotAssignmentStore,
    ) -> Reconciliation {
        let signature = ConfigSignature::of(config, self.policy);

        let outcome = match &self.state {
            ReconcilerState::Stable(current) if *current == signature => {
                debug!(size = %config.size, variant = %config.variant, "signature unchanged");
                return Reconciliation::Unchanged;
            }
            ReconcilerState::Stable(_) => {
                let dropped = reset(config, store);
                Reconciliation::Reset { dropped }
            }
            ReconcilerState::Uninitialized => {
                if store.descriptor() != &resolve(config.size, &config.variant) {
                    reset(config, store);
                }
                Reconciliation::Initialized
            }
        };

        self.state = ReconcilerState::Stable(signature);
        outcome
    }

    /// Adopts `slots` as the initial array while still uninitialized.
    ///
    /// The array is padded or truncated to the current descriptor's length.
    /// Returns `false` and leaves the store untouched once stable.
    pub fn hydrate(
        &mut self,
        config: &BuilderConfig,
        store: &mut SlotAssignmentStore,
        slots: Vec<Slot>,
    ) -> bool {
        if self.is_stable() {
            debug!("ignoring hydration after initialization");
            return false;
        }

        let descriptor = resolve(config.size, &config.variant);
        if store.descriptor() != &descriptor {
            store.reset(descriptor);
        }

        let supplied = slots.len();
        let overflow = store.adopt(slots);
        if supplied != store.len() {
            warn!(
                supplied,
                expected = store.len(),
                truncated = overflow.len(),
                "hydration array length does not match descriptor"
            );
        }

        self.state = ReconcilerState::Stable(ConfigSignature::of(config, self.policy));
        true
    }
}

/// Clears `store` for the descriptor of `config`, emitting one
/// `IconDropped` per discarded instance.
fn reset(config: &BuilderConfig, store: &mut SlotAssignmentStore) -> usize {
    let descriptor = resolve(config.size, &config.variant);
    let dropped = store.reset(descriptor);
    let total = dropped.len();

    for (slot, instance) in dropped {
        store.notify(Notification::IconDropped {
            icon: instance.icon.name,
            slot,
            total,
        });
    }

    info!(
        size = %config.size,
        variant = %config.variant,
        slots = store.len(),
        dropped = total,
        "panel reset after configuration change"
    );
    total
}
