use serde::{Deserialize, Serialize};

use customsnet_core::{DomainError, DomainResult, ValueObject};

/// Postal address concept, embedded in participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AddressRecord")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip: String,
}

impl ValueObject for Address {}

impl Address {
    /// Build an address. City and country are mandatory; the rest may be empty.
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        country: impl Into<String>,
        zip: impl Into<String>,
    ) -> DomainResult<Self> {
        let address = Self {
            street: street.into(),
            city: city.into(),
            state: state.into(),
            country: country.into(),
            zip: zip.into(),
        };

        if address.city.trim().is_empty() {
            return Err(DomainError::validation("address city cannot be empty"));
        }
        if address.country.trim().is_empty() {
            return Err(DomainError::validation("address country cannot be empty"));
        }

        Ok(address)
    }
}

#[derive(Deserialize)]
struct AddressRecord {
    street: String,
    city: String,
    state: String,
    country: String,
    zip: String,
}

impl TryFrom<AddressRecord> for Address {
    type Error = DomainError;

    fn try_from(r: AddressRecord) -> DomainResult<Self> {
        Address::new(r.street, r.city, r.state, r.country, r.zip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_requires_city_and_country() {
        assert!(Address::new("10 Main St", "Albany", "NY", "USA", "12201").is_ok());

        let err = Address::new("10 Main St", " ", "NY", "USA", "12201").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = Address::new("10 Main St", "Albany", "NY", "", "12201").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn deserialized_address_is_validated() {
        let ok: Address = serde_json::from_str(
            r#"{"street":"10 Main St","city":"Albany","state":"NY","country":"USA","zip":"12201"}"#,
        )
        .unwrap();
        assert_eq!(ok.city, "Albany");

        let err = serde_json::from_str::<Address>(
            r#"{"street":"10 Main St","city":"","state":"NY","country":"USA","zip":"12201"}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn addresses_compare_by_value() {
        let a = Address::new("10 Blue St", "Newark", "NJ", "USA", "07105").unwrap();
        let b = Address::new("10 Blue St", "Newark", "NJ", "USA", "07105").unwrap();
        assert_eq!(a, b);
    }
}
