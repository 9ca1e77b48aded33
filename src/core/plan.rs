use crate::core::{AdapterLink, FarmInfo, FarmRegistration, NetworkAddressSet, WiringStep};
use alloy::primitives::Address;

pub const ADAPTER_CONTRACT: &str = "MasterchefBalanceAdapter";
pub const TRACKER_CONTRACT: &str = "TreasuryTracker";

pub const MONOLITH_POOL_PID: u64 = 37;
pub const FBEETS_BAR_PID: u64 = 22;
pub const DEMETER_DEGREE_PID: u64 = 40;

/// The three farm positions the adapter tracks, in submission order.
pub fn farm_registrations(addresses: &NetworkAddressSet) -> [FarmRegistration; 3] {
    let farm = |pool: Address, pid: u64| FarmRegistration {
        pool,
        farm: FarmInfo {
            contract_address: addresses.beets_masterchef,
            pid,
        },
    };

    [
        farm(addresses.monolith_pool, MONOLITH_POOL_PID),
        farm(addresses.fbeets_bar, FBEETS_BAR_PID),
        farm(addresses.demeter_degree, DEMETER_DEGREE_PID),
    ]
}

/// Tracker link first, then the farms.
pub fn wiring_plan(
    addresses: &NetworkAddressSet,
    tracker: Address,
    adapter: Address,
) -> Vec<WiringStep> {
    let mut steps = Vec::with_capacity(4);
    steps.push(WiringStep::link(AdapterLink { tracker, adapter }));
    steps.extend(
        farm_registrations(addresses)
            .into_iter()
            .map(|registration| WiringStep::farm(adapter, registration)),
    );
    steps
}

pub fn wiring_keys() -> Vec<String> {
    std::iter::once(WiringStep::ADD_ADAPTER_KEY.to_string())
        .chain(
            [MONOLITH_POOL_PID, FBEETS_BAR_PID, DEMETER_DEGREE_PID]
                .into_iter()
                .map(WiringStep::farm_key),
        )
        .collect()
}
