use crate::core::NetworkAddressSet;
use crate::utils::error::{ProvisionError, Result};
use crate::utils::validation::{validate_nonzero_address, Validate};
use std::collections::HashMap;

/// 網路識別碼 → 地址集合的查詢表
#[derive(Debug, Clone, Default)]
pub struct NetworkRegistry {
    networks: HashMap<String, NetworkAddressSet>,
}

impl NetworkRegistry {
    pub fn new(networks: HashMap<String, NetworkAddressSet>) -> Self {
        Self { networks }
    }

    pub fn with_network(mut self, network: &str, addresses: NetworkAddressSet) -> Self {
        self.networks.insert(network.to_string(), addresses);
        self
    }

    pub fn for_network(&self, network: &str) -> Result<&NetworkAddressSet> {
        self.networks
            .get(network)
            .ok_or_else(|| ProvisionError::UnknownNetwork {
                network: network.to_string(),
            })
    }
}

impl Validate for NetworkAddressSet {
    fn validate(&self) -> Result<()> {
        validate_nonzero_address("monolith_pool", &self.monolith_pool)?;
        validate_nonzero_address("beets_masterchef", &self.beets_masterchef)?;
        validate_nonzero_address("fbeets_bar", &self.fbeets_bar)?;
        validate_nonzero_address("demeter_degree", &self.demeter_degree)?;
        Ok(())
    }
}

impl Validate for NetworkRegistry {
    fn validate(&self) -> Result<()> {
        for (network, addresses) in &self.networks {
            addresses
                .validate()
                .map_err(|e| ProvisionError::ConfigValidationError {
                    field: format!("networks.{}", network),
                    message: e.to_string(),
                })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;

    fn sample_set() -> NetworkAddressSet {
        NetworkAddressSet {
            monolith_pool: Address::repeat_byte(0xaa),
            beets_masterchef: Address::repeat_byte(0xbe),
            fbeets_bar: Address::repeat_byte(0xfb),
            demeter_degree: Address::repeat_byte(0xde),
        }
    }

    #[test]
    fn test_for_network_resolves_registered_set() {
        let registry = NetworkRegistry::default().with_network("sonic-main", sample_set());

        let resolved = registry.for_network("sonic-main").unwrap();
        assert_eq!(resolved.fbeets_bar, Address::repeat_byte(0xfb));
    }

    #[test]
    fn test_for_network_unknown_id() {
        let registry = NetworkRegistry::default().with_network("sonic-main", sample_set());

        match registry.for_network("opera") {
            Err(ProvisionError::UnknownNetwork { network }) => assert_eq!(network, "opera"),
            other => panic!("expected UnknownNetwork, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_address_fails_validation() {
        let mut set = sample_set();
        set.demeter_degree = Address::ZERO;
        let registry = NetworkRegistry::default().with_network("sonic-main", set);

        let err = registry.validate().unwrap_err();
        assert!(err.to_string().contains("networks.sonic-main"));
    }
}
