use crate::utils::error::{ProvisionError, Result};
use alloy::primitives::Address;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ProvisionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ProvisionError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ProvisionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ProvisionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ProvisionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(ProvisionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ProvisionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 零地址代表設定缺漏，不可送上鏈
pub fn validate_nonzero_address(field_name: &str, address: &Address) -> Result<()> {
    if address.is_zero() {
        return Err(ProvisionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: address.to_string(),
            reason: "Address cannot be the zero address".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("rpc.url", "https://rpc.example.com").is_ok());
        assert!(validate_url("rpc.url", "http://127.0.0.1:8545").is_ok());
        assert!(validate_url("rpc.url", "").is_err());
        assert!(validate_url("rpc.url", "not-a-url").is_err());
        assert!(validate_url("rpc.url", "ws://127.0.0.1:8546").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("rpc.poll_interval_ms", 500, 1).is_ok());
        assert!(validate_positive_number("rpc.poll_interval_ms", 0, 1).is_err());
    }

    #[test]
    fn test_validate_nonzero_address() {
        let address = Address::repeat_byte(0x11);
        assert!(validate_nonzero_address("networks.x.fbeets_bar", &address).is_ok());
        assert!(validate_nonzero_address("networks.x.fbeets_bar", &Address::ZERO).is_err());
    }
}
