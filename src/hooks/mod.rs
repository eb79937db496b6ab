//! Optimistic Resource Hooks
//!
//! One hook per resource list, all built on the same core: local state that
//! mirrors an optional shared cache, mutations that hit the network and
//! re-fetch the authoritative list on success, and errors that surface
//! through the notifier instead of escaping into the render path.

mod consumptions;
mod inputs;
mod orders;
mod resource;

pub use consumptions::{plan_sync, use_output_consumptions, ConsumptionsHook, SyncPlan};
pub use inputs::{use_production_inputs, ProductionInputsHook};
pub use orders::{use_order_details, OrderDetailsHook};
pub use resource::{fingerprint_ids, CacheHandle, OptimisticList, Phase};
