//! Canonical token records.
//!
//! A canonical record identifies a token at its chain of origin. It travels
//! inside every transfer payload and is stored in the registry next to the
//! bridged instance that represents it locally.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Attribute;

use crate::error::ContractError;

#[cw_serde]
pub struct CanonicalRecord {
    /// Chain the token was issued on
    pub chain_id: u64,
    /// Token contract address on its home chain
    pub addr: String,
    /// Decimals (fungible tokens only)
    pub decimals: Option<u8>,
    pub symbol: String,
    pub name: String,
}

impl CanonicalRecord {
    pub fn fungible(
        chain_id: u64,
        addr: impl Into<String>,
        decimals: u8,
        symbol: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            chain_id,
            addr: addr.into(),
            decimals: Some(decimals),
            symbol: symbol.into(),
            name: name.into(),
        }
    }

    pub fn non_fungible(
        chain_id: u64,
        addr: impl Into<String>,
        symbol: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            chain_id,
            addr: addr.into(),
            decimals: None,
            symbol: symbol.into(),
            name: name.into(),
        }
    }

    /// Forward-map key.
    pub fn key(&self) -> (u64, &str) {
        (self.chain_id, self.addr.as_str())
    }

    /// Metadata equality, ignoring the location fields.
    pub fn same_identity(&self, other: &CanonicalRecord) -> bool {
        self.decimals == other.decimals && self.symbol == other.symbol && self.name == other.name
    }

    pub fn validate(&self) -> Result<(), ContractError> {
        if self.chain_id == 0 {
            return Err(ContractError::MalformedPayload {
                reason: "canonical chain id must be nonzero".to_string(),
            });
        }
        if self.addr.is_empty() {
            return Err(ContractError::MalformedPayload {
                reason: "canonical address is empty".to_string(),
            });
        }
        Ok(())
    }

    /// Flattened event attributes, shared by every event that carries a record.
    pub fn attributes(&self) -> Vec<Attribute> {
        let mut attrs = vec![
            Attribute::new("canonical_chain_id", self.chain_id.to_string()),
            Attribute::new("canonical_addr", self.addr.clone()),
            Attribute::new("canonical_symbol", self.symbol.clone()),
            Attribute::new("canonical_name", self.name.clone()),
        ];
        if let Some(decimals) = self.decimals {
            attrs.push(Attribute::new("canonical_decimals", decimals.to_string()));
        }
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_identity_ignores_location() {
        let a = CanonicalRecord::fungible(1, "token_a", 18, "TST", "Test Token");
        let b = CanonicalRecord::fungible(5, "token_b", 18, "TST", "Test Token");
        assert!(a.same_identity(&b));

        let c = CanonicalRecord::fungible(1, "token_a", 6, "TST", "Test Token");
        assert!(!a.same_identity(&c));
    }

    #[test]
    fn test_attributes_omit_decimals_for_nft() {
        let nft = CanonicalRecord::non_fungible(1, "nft", "PUNK", "Punks");
        let attrs = nft.attributes();
        assert_eq!(attrs.len(), 4);
        assert!(attrs.iter().all(|a| a.key != "canonical_decimals"));

        let token = CanonicalRecord::fungible(1, "token", 18, "TST", "Test Token");
        let attrs = token.attributes();
        assert!(attrs
            .iter()
            .any(|a| a.key == "canonical_decimals" && a.value == "18"));
    }

    #[test]
    fn test_validate() {
        assert!(CanonicalRecord::fungible(1, "t", 6, "T", "T").validate().is_ok());
        assert!(CanonicalRecord::fungible(0, "t", 6, "T", "T").validate().is_err());
        assert!(CanonicalRecord::fungible(1, "", 6, "T", "T").validate().is_err());
    }
}
