//! The parameter bundle consumed by the escrow assembler, and its validator.
//!
//! `BuilderParams` deserializes from the camelCase JSON shape wallets hand over, e.g.
//!
//! ```json
//! {
//!   "sellerAddress": "2MxvBWEq38yWxqxgvNYPLVWMvDafL9breUF",
//!   "buyerAddress": "2N3WiSpTLmLdjdwH5rFVmHXfhdC9qVswEWV",
//!   "thirdpartyAddress": "2N4VF4FeSfvmL4wLPRWNQNx4oagQR4fwpzT",
//!   "scriptAddress": "2NFCQZeVoMTjKUc3nxrx4w72xHnb6DJu6Jy",
//!   "transactionVins": [{ "txid": "1ece...e622", "vout": 0, "amount": 5.0 }],
//!   "amount": 2.0,
//!   "thirdpartyFee": 0.02,
//!   "minersFee": 0.0001
//! }
//! ```
//!
//! Wallet RPCs attach more fields to each unspent output (`account`, `scriptPubKey`,
//! `confirmations`, ...). Those are ignored.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::amount::Amount;

/// Errors returned by parameter validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParamError {
    /// A required field is absent or empty. Carries the camelCase field name.
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// A funding input: an unspent output owned by the seller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingVin {
    /// The funding transaction id, in display (block explorer) byte order.
    pub txid: String,
    /// The index of the output being spent.
    pub vout: u32,
    /// The value of the output, in BTC.
    pub amount: Amount,
    /// The address owning the output. Informational.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Everything needed to build an escrow funding transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuilderParams {
    /// Receives the change.
    pub seller_address: String,
    /// The buyer. Not used by the assembler, but required by the validator. A key that is
    /// present deserializes to `Some`, even when its value is `null`.
    #[serde(deserialize_with = "present")]
    pub buyer_address: Option<String>,
    /// Receives the third-party fee.
    pub thirdparty_address: String,
    /// The escrow address, usually from `derive_script_address`.
    pub script_address: String,
    /// The seller's funding inputs, spent in order.
    pub transaction_vins: Vec<FundingVin>,
    /// The escrowed amount, in BTC.
    pub amount: Amount,
    /// The third-party fee, in BTC.
    pub thirdparty_fee: Amount,
    /// The miners' fee, in BTC. Implicit: it is whatever the outputs leave unclaimed.
    pub miners_fee: Amount,
}

// Only called when the key is present, so a `null` still yields `Some`.
fn present<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(Some(value.unwrap_or_default()))
}

fn require(value: &str, field: &'static str) -> Result<(), ParamError> {
    if value.is_empty() {
        Err(ParamError::MissingParameter(field))
    } else {
        Ok(())
    }
}

impl BuilderParams {
    /// Check the parameters the way wallets historically did: only the buyer address must be
    /// present. Its value, even an empty one, is not inspected. Addresses and amounts are not
    /// checked here; the assembler rejects bad ones.
    pub fn validate(&self) -> Result<(), ParamError> {
        match self.buyer_address {
            Some(_) => Ok(()),
            None => Err(ParamError::MissingParameter("buyerAddress")),
        }
    }

    /// `validate` as a boolean.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Check that the buyer address and every field the assembler consumes are present and
    /// non-empty. Never called implicitly.
    pub fn validate_strict(&self) -> Result<(), ParamError> {
        self.validate()?;
        require(self.buyer_address.as_deref().unwrap_or_default(), "buyerAddress")?;
        require(&self.seller_address, "sellerAddress")?;
        require(&self.thirdparty_address, "thirdpartyAddress")?;
        require(&self.script_address, "scriptAddress")?;
        if self.transaction_vins.is_empty() {
            return Err(ParamError::MissingParameter("transactionVins"));
        }
        Ok(())
    }
}

/// Returns false if the buyer address is absent, true otherwise.
pub fn validate(params: &BuilderParams) -> bool {
    params.is_valid()
}

#[cfg(test)]
mod test {
    use super::*;

    fn full_params() -> BuilderParams {
        BuilderParams {
            seller_address: "2MxvBWEq38yWxqxgvNYPLVWMvDafL9breUF".to_owned(),
            buyer_address: Some("2N3WiSpTLmLdjdwH5rFVmHXfhdC9qVswEWV".to_owned()),
            thirdparty_address: "2N4VF4FeSfvmL4wLPRWNQNx4oagQR4fwpzT".to_owned(),
            script_address: "2NFCQZeVoMTjKUc3nxrx4w72xHnb6DJu6Jy".to_owned(),
            transaction_vins: vec![FundingVin {
                txid: "1ece533038831e69e6b09c89441460c6e2715db10ab94f786b8fffe266a1e622"
                    .to_owned(),
                vout: 0,
                amount: "5".parse().unwrap(),
                address: None,
            }],
            amount: "2".parse().unwrap(),
            thirdparty_fee: "0.02".parse().unwrap(),
            miners_fee: "0.0001".parse().unwrap(),
        }
    }

    #[test]
    fn it_only_requires_the_buyer() {
        assert!(!validate(&BuilderParams::default()));
        assert_eq!(
            BuilderParams::default().validate(),
            Err(ParamError::MissingParameter("buyerAddress"))
        );

        let buyer_only = BuilderParams {
            buyer_address: Some("2N3WiSpTLmLdjdwH5rFVmHXfhdC9qVswEWV".to_owned()),
            ..Default::default()
        };
        assert!(validate(&buyer_only));

        let mut no_buyer = full_params();
        no_buyer.buyer_address = None;
        assert!(!no_buyer.is_valid());
        // an empty buyer is still present
        no_buyer.buyer_address = Some(String::new());
        assert!(no_buyer.is_valid());
    }

    #[test]
    fn it_treats_any_present_buyer_key_as_valid() {
        let cases = [
            (r#"{"buyerAddress": "2N3WiSpTLmLdjdwH5rFVmHXfhdC9qVswEWV"}"#, true),
            (r#"{"buyerAddress": ""}"#, true),
            (r#"{"buyerAddress": null}"#, true),
            (r#"{"sellerAddress": "2MxvBWEq38yWxqxgvNYPLVWMvDafL9breUF"}"#, false),
            ("{}", false),
        ];
        for case in cases.iter() {
            let params: BuilderParams = serde_json::from_str(case.0).unwrap();
            assert_eq!(validate(&params), case.1, "{}", case.0);
        }

        let null_buyer: BuilderParams = serde_json::from_str(r#"{"buyerAddress": null}"#).unwrap();
        assert_eq!(null_buyer.buyer_address, Some(String::new()));
    }

    #[test]
    fn it_validates_strictly_on_request() {
        assert_eq!(full_params().validate_strict(), Ok(()));

        let cases: [(fn(&mut BuilderParams), &str); 6] = [
            (|p| p.buyer_address = None, "buyerAddress"),
            (|p| p.buyer_address = Some(String::new()), "buyerAddress"),
            (|p| p.seller_address.clear(), "sellerAddress"),
            (|p| p.thirdparty_address.clear(), "thirdpartyAddress"),
            (|p| p.script_address.clear(), "scriptAddress"),
            (|p| p.transaction_vins.clear(), "transactionVins"),
        ];
        for case in cases.iter() {
            let mut params = full_params();
            (case.0)(&mut params);
            assert_eq!(
                params.validate_strict(),
                Err(ParamError::MissingParameter(case.1))
            );
            // the weak validator only looks at the buyer key
            assert_eq!(params.is_valid(), params.buyer_address.is_some());
        }
    }

    #[test]
    fn it_deserializes_wallet_json() {
        let json = r#"{
            "sellerAddress": "2MxvBWEq38yWxqxgvNYPLVWMvDafL9breUF",
            "buyerAddress": "2N3WiSpTLmLdjdwH5rFVmHXfhdC9qVswEWV",
            "thirdpartyAddress": "2N4VF4FeSfvmL4wLPRWNQNx4oagQR4fwpzT",
            "scriptAddress": "2NFCQZeVoMTjKUc3nxrx4w72xHnb6DJu6Jy",
            "transactionVins": [{
                "txid": "1ece533038831e69e6b09c89441460c6e2715db10ab94f786b8fffe266a1e622",
                "vout": 0,
                "account": "",
                "scriptPubKey": "a9143e36c73d865cbeec91069a23c4c0dd1e43a0034f87",
                "amount": 5.0,
                "confirmations": 6,
                "spendable": true
            }],
            "amount": 2.0,
            "thirdpartyFee": 0.02,
            "minersFee": 0.0001
        }"#;
        let params: BuilderParams = serde_json::from_str(json).unwrap();
        assert_eq!(params, full_params());
    }

    #[test]
    fn it_defaults_missing_fields() {
        let params: BuilderParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, BuilderParams::default());
        assert!(params.amount.is_zero());
        assert!(!validate(&params));
    }
}
