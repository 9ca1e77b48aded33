/// Identity of a provisioning unit plus the tags an external runner selects on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvisionUnit {
    pub id: &'static str,
    pub tags: &'static [&'static str],
}

pub const MASTERCHEF_BALANCE_ADAPTER_ID: &str = "masterchef_balance";

pub const MASTERCHEF_BALANCE_ADAPTER: ProvisionUnit = ProvisionUnit {
    id: MASTERCHEF_BALANCE_ADAPTER_ID,
    tags: &["local", "test", MASTERCHEF_BALANCE_ADAPTER_ID],
};

impl ProvisionUnit {
    /// 沒有指定標籤時一律執行
    pub fn matches_tags<S: AsRef<str>>(&self, requested: &[S]) -> bool {
        requested.is_empty()
            || requested
                .iter()
                .any(|tag| self.tags.contains(&tag.as_ref().trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_tags() {
        let unit = MASTERCHEF_BALANCE_ADAPTER;
        let none: [&str; 0] = [];

        assert!(unit.matches_tags(&none));
        assert!(unit.matches_tags(&["local"]));
        assert!(unit.matches_tags(&["mainnet", "masterchef_balance"]));
        assert!(!unit.matches_tags(&["mainnet"]));
    }
}
