//! Schema-less remittance record.
//!
//! Extraction results are partial and forward-compatible, so a record is an
//! open map from field name to string value rather than a fixed struct. A
//! key that is missing and a key whose value was `null` are the same thing:
//! absent. The [`fields`] module names the keys the rest of the crate reads.

use crate::error::{RemitError, RemitResult};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Well-known record keys.
pub mod fields {
    pub const LAYOUT_BANK: &str = "layoutBank";
    pub const BANK: &str = "bank";
    pub const FORM_BANK: &str = "formBank";
    pub const SELECTED_BANK: &str = "selectedBank";
    pub const REMITTING_BANK: &str = "remittingBank";

    pub const SENDER_NAME: &str = "senderName";
    pub const ACCOUNT_HOLDER_NAME: &str = "accountHolderName";
    pub const ID_NUMBER: &str = "idNumber";
    pub const ADDRESS: &str = "address";
    pub const RESIDENT: &str = "isResident";
    pub const CONTACT_NUMBER: &str = "contactNumber";
    pub const DATE: &str = "date";
    pub const EMAIL: &str = "email";
    pub const TELEPHONE: &str = "telephone";
    pub const SIGNATURE: &str = "signature";

    pub const PAYMENT_METHOD: &str = "paymentMethod";
    pub const DEBIT_AC: &str = "debitAc";
    pub const DEBIT_AC_CURRENCY: &str = "debitAcCurrency";
    pub const DEBIT_AC_TYPE: &str = "debitAcType";
    pub const CHARGES_DEBIT_AC: &str = "chargesDebitAc";
    pub const CHARGES_DEBIT_AC_CURRENCY: &str = "chargesDebitAcCurrency";
    pub const CHARGES_DEBIT_AC_TYPE: &str = "chargesDebitAcType";

    pub const AMOUNT: &str = "amount";
    pub const AMOUNT_DEBIT_CURRENCY: &str = "amountDebitCurrency";
    pub const DEBIT_AMOUNT: &str = "debitAmount";
    pub const REMIT_CURRENCY: &str = "remitCurrency";
    pub const REMITTANCE_CURRENCY: &str = "remittanceCurrency";
    pub const CURRENCY_NAME: &str = "currencyName";
    pub const FX_RATE: &str = "fxRate";
    pub const FX_RATES: &str = "fxRates";
    pub const EXCHANGE_RATE: &str = "exchangeRate";
    pub const FX_CONTRACT_NO: &str = "fxContractNo";
    pub const DEALER_NAME: &str = "dealerName";

    pub const INTERMEDIARY_BANK: &str = "intermediaryBank";
    pub const INTERMEDIARY_BANK_NAME: &str = "intermediaryBankName";
    pub const INTERMEDIARY_SWIFT: &str = "intermediarySwift";
    pub const INTERMEDIARY_ACCOUNT: &str = "intermediaryAccount";
    pub const SWIFT_CODE: &str = "swiftCode";
    pub const CCASS_CODE: &str = "ccassCode";
    pub const PARTICIPANT_CODE: &str = "participantCode";

    pub const BENEFICIARY_BANK: &str = "beneficiaryBank";
    pub const BENEFICIARY_BANK_ADDRESS: &str = "beneficiaryBankAddress";
    pub const BENEFICIARY_SWIFT: &str = "beneficiarySwift";
    pub const BANK_CODE_TYPE: &str = "bankCodeType";
    pub const BANK_CODE: &str = "bankCode";
    pub const BENEFICIARY_BANK_COUNTRY: &str = "beneficiaryBankCountry";
    pub const BENEFICIARY_BANK_CITY: &str = "beneficiaryBankCity";
    pub const BENEFICIARY_BANK_PROVINCE: &str = "beneficiaryBankProvince";
    pub const BENEFICIARY_BANK_BRANCH: &str = "beneficiaryBankBranch";

    pub const BENEFICIARY_NAME: &str = "beneficiaryName";
    pub const BENEFICIARY_ACCOUNT: &str = "beneficiaryAccount";
    pub const IBAN: &str = "iban";
    pub const BENEFICIARY_CURRENCY: &str = "beneficiaryCurrency";
    pub const BENEFICIARY_ACCOUNT_TYPE: &str = "beneficiaryAccountType";
    pub const BENEFICIARY_ADDRESS: &str = "beneficiaryAddress";
    pub const BENEFICIARY_ADDRESS_1: &str = "beneficiaryAddress1";
    pub const BENEFICIARY_ADDRESS_2: &str = "beneficiaryAddress2";
    pub const BENEFICIARY_ADDRESS_3: &str = "beneficiaryAddress3";
    pub const BENEFICIARY_ADDRESS_4: &str = "beneficiaryAddress4";
    pub const BENEFICIARY_PHONE: &str = "beneficiaryPhone";
    pub const BENEFICIARY_COUNTRY: &str = "beneficiaryCountry";
    pub const BENEFICIARY_CITY: &str = "beneficiaryCity";
    pub const BENEFICIARY_PROVINCE: &str = "beneficiaryProvince";
    pub const BENEFICIARY_POSTCODE: &str = "beneficiaryPostcode";

    pub const PURPOSE_OF_PAYMENT: &str = "purposeOfPayment";
    pub const PURPOSE: &str = "purpose";
    pub const PURPOSE_DETAIL: &str = "purposeDetail";
    pub const ROUTING_REFERENCE: &str = "routingReference";
    pub const MESSAGE: &str = "message";
    pub const CHARGE_TYPE: &str = "chargeType";
    pub const BANK_CHARGES: &str = "bankCharges";
    pub const LOCAL_OVERSEAS_CHARGES: &str = "localOverseasCharges";

    pub const BANK_USE_NOTE: &str = "bankUseNote";
    pub const APPROVAL: &str = "approval";
    pub const CHECKER: &str = "checker";
    pub const REMARKS: &str = "remarks";
}

/// Returns true when `value` is absent or only whitespace.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// A remittance data set keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemittanceRecord {
    values: BTreeMap<String, String>,
}

impl RemittanceRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from `(key, value)` pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Parses a flat JSON object.
    pub fn from_json_str(json: &str) -> RemitResult<Self> {
        serde_json::from_str(json).map_err(|source| RemitError::Json {
            context: "remittance record".to_string(),
            source,
        })
    }

    /// Reads and parses a JSON record file.
    pub fn from_json_file(path: &Path) -> RemitResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| RemitError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Raw value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Value for `key`, or the empty string.
    pub fn get_or_default(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    /// Trimmed value for `key` when it is present and not blank.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|v| !v.is_empty())
    }

    /// True when `key` is absent or only whitespace.
    pub fn is_blank(&self, key: &str) -> bool {
        is_blank(self.get(key))
    }

    /// First non-blank value among `keys`, in order.
    pub fn first_non_empty(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|k| self.non_empty(k))
    }

    /// Sets `key` to `value`, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Iterates fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RemittanceRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl Serialize for RemittanceRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = RemittanceRecord;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a flat JSON object of field values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut record = RemittanceRecord::new();
        while let Some((key, value)) = map.next_entry::<String, serde_json::Value>()? {
            match value {
                serde_json::Value::Null => {}
                serde_json::Value::String(s) => {
                    record.set(key, s);
                }
                serde_json::Value::Number(n) => {
                    record.set(key, n.to_string());
                }
                serde_json::Value::Bool(b) => {
                    record.set(key, b.to_string());
                }
                // nested values keep their JSON text
                other => {
                    record.set(key, other.to_string());
                }
            }
        }
        Ok(record)
    }
}

impl<'de> Deserialize<'de> for RemittanceRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_is_absent() {
        let record =
            RemittanceRecord::from_json_str(r#"{"senderName": null, "amount": 1200.5}"#).unwrap();
        assert_eq!(record.get(fields::SENDER_NAME), None);
        assert_eq!(record.get(fields::AMOUNT), Some("1200.5"));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_first_non_empty_skips_blank() {
        let record = RemittanceRecord::from_pairs([("layoutBank", "  "), ("bank", "HSBC")]);
        assert_eq!(
            record.first_non_empty(&[fields::LAYOUT_BANK, fields::BANK]),
            Some("HSBC")
        );
        assert!(record.is_blank(fields::LAYOUT_BANK));
        assert!(record.is_blank("missing"));
    }

    #[test]
    fn test_get_or_default() {
        let record = RemittanceRecord::new();
        assert_eq!(record.get_or_default(fields::DEBIT_AC), "");
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(matches!(
            RemittanceRecord::from_json_str("[1, 2]"),
            Err(RemitError::Json { .. })
        ));
    }
}
