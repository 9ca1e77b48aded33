use crate::core::{FarmInfo, WiringCall};
use alloy::primitives::U256;
use alloy::sol;

sol! {
    struct Farm {
        address contractAddress;
        uint256 pid;
    }

    #[sol(rpc)]
    interface ITreasuryTracker {
        function addAdapter(address adapter) external;
    }

    #[sol(rpc)]
    interface IMasterchefBalanceAdapter {
        function addFarm(address pool, Farm memory farm) external;
    }
}

impl From<&FarmInfo> for Farm {
    fn from(farm: &FarmInfo) -> Self {
        Farm {
            contractAddress: farm.contract_address,
            pid: U256::from(farm.pid),
        }
    }
}

/// Short label used in logs and errors.
pub fn describe_call(call: &WiringCall) -> String {
    match call {
        WiringCall::AddAdapter { adapter } => format!("addAdapter({})", adapter),
        WiringCall::AddFarm(registration) => format!(
            "addFarm({}, pid {})",
            registration.pool, registration.farm.pid
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FarmRegistration;
    use alloy::primitives::Address;
    use alloy::sol_types::SolCall;

    #[test]
    fn test_wiring_signatures() {
        assert_eq!(
            ITreasuryTracker::addAdapterCall::SIGNATURE,
            "addAdapter(address)"
        );
        assert_eq!(
            IMasterchefBalanceAdapter::addFarmCall::SIGNATURE,
            "addFarm(address,(address,uint256))"
        );
    }

    #[test]
    fn test_add_farm_calldata_inlines_static_struct() {
        let registration = FarmRegistration {
            pool: Address::repeat_byte(0xaa),
            farm: FarmInfo {
                contract_address: Address::repeat_byte(0xbe),
                pid: 37,
            },
        };
        let data = IMasterchefBalanceAdapter::addFarmCall {
            pool: registration.pool,
            farm: Farm::from(&registration.farm),
        }
        .abi_encode();

        assert_eq!(data.len(), 4 + 3 * 32);
        assert_eq!(&data[16..36], registration.pool.as_slice());
        assert_eq!(&data[48..68], registration.farm.contract_address.as_slice());
        assert_eq!(&data[68..], U256::from(37u64).to_be_bytes::<32>().as_slice());
    }

    #[test]
    fn test_describe_call_names_pid() {
        let call = WiringCall::AddFarm(FarmRegistration {
            pool: Address::repeat_byte(0xfb),
            farm: FarmInfo {
                contract_address: Address::repeat_byte(0xbe),
                pid: 22,
            },
        });
        assert!(describe_call(&call).ends_with("pid 22)"));
    }
}
