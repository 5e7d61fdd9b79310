use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use customsnet_core::{
    DomainError, DomainResult, MODEL_NAMESPACE, Relationship, Resource, ResourceId, ResourceKey,
    ResourceKind, TypeName,
};
use customsnet_participants::{
    CustomsParticipant, ImporterParticipant, LogisticsParticipant, ShipperParticipant,
};

/// Input for creating an invoice.
///
/// Monetary amounts are in the smallest currency unit (e.g. cents).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInvoice {
    pub id: ResourceId,
    pub customs: Relationship<CustomsParticipant>,
    pub importer: Relationship<ImporterParticipant>,
    pub shipper: Relationship<ShipperParticipant>,
    pub logistics: Relationship<LogisticsParticipant>,
    pub invoice_no: String,
    pub way_bill_no: String,
    pub date: NaiveDate,
    pub goods_units: u32,
    pub goods_description: String,
    pub goods_unit_value: u64,
    pub no_of_packages: u32,
    /// ISO 4217 code, e.g. "CAD".
    pub currency: String,
    pub total_weight: f64,
}

/// Asset: the commercial invoice a shipment travels under.
///
/// Immutable once created; the parties are weak references resolved by the
/// participant registries. Deserialization goes through [`Invoice::new`], and a
/// stored `goodsTotalValue` must equal the recomputed total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "InvoiceRecord")]
pub struct Invoice {
    id: ResourceId,
    customs: Relationship<CustomsParticipant>,
    importer: Relationship<ImporterParticipant>,
    shipper: Relationship<ShipperParticipant>,
    logistics: Relationship<LogisticsParticipant>,
    invoice_no: String,
    way_bill_no: String,
    date: NaiveDate,
    goods_units: u32,
    goods_description: String,
    goods_unit_value: u64,
    goods_total_value: u64,
    no_of_packages: u32,
    currency: String,
    total_weight: f64,
}

impl Invoice {
    pub fn new(input: NewInvoice) -> DomainResult<Self> {
        if input.invoice_no.trim().is_empty() {
            return Err(DomainError::validation("invoice number cannot be empty"));
        }
        if input.goods_units == 0 {
            return Err(DomainError::validation("an invoice must list at least one unit"));
        }
        if input.no_of_packages == 0 {
            return Err(DomainError::validation("an invoice must ship at least one package"));
        }
        if input.currency.len() != 3 || !input.currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(DomainError::validation(format!(
                "'{}' is not a currency code",
                input.currency
            )));
        }
        if !(input.total_weight.is_finite() && input.total_weight > 0.0) {
            return Err(DomainError::validation("total weight must be positive"));
        }

        let goods_total_value = u64::from(input.goods_units)
            .checked_mul(input.goods_unit_value)
            .ok_or_else(|| DomainError::invariant("goods total value overflows"))?;

        Ok(Self {
            id: input.id,
            customs: input.customs,
            importer: input.importer,
            shipper: input.shipper,
            logistics: input.logistics,
            invoice_no: input.invoice_no,
            way_bill_no: input.way_bill_no,
            date: input.date,
            goods_units: input.goods_units,
            goods_description: input.goods_description,
            goods_unit_value: input.goods_unit_value,
            goods_total_value,
            no_of_packages: input.no_of_packages,
            currency: input.currency,
            total_weight: input.total_weight,
        })
    }

    pub fn customs(&self) -> &Relationship<CustomsParticipant> {
        &self.customs
    }

    pub fn importer(&self) -> &Relationship<ImporterParticipant> {
        &self.importer
    }

    pub fn shipper(&self) -> &Relationship<ShipperParticipant> {
        &self.shipper
    }

    pub fn logistics(&self) -> &Relationship<LogisticsParticipant> {
        &self.logistics
    }

    pub fn invoice_no(&self) -> &str {
        &self.invoice_no
    }

    pub fn way_bill_no(&self) -> &str {
        &self.way_bill_no
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn goods_units(&self) -> u32 {
        self.goods_units
    }

    pub fn goods_description(&self) -> &str {
        &self.goods_description
    }

    pub fn goods_unit_value(&self) -> u64 {
        self.goods_unit_value
    }

    /// Invariant: `goods_units * goods_unit_value`.
    pub fn goods_total_value(&self) -> u64 {
        self.goods_total_value
    }

    pub fn no_of_packages(&self) -> u32 {
        self.no_of_packages
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }
}

/// Wire form of [`Invoice`], validated on conversion.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InvoiceRecord {
    id: ResourceId,
    customs: Relationship<CustomsParticipant>,
    importer: Relationship<ImporterParticipant>,
    shipper: Relationship<ShipperParticipant>,
    logistics: Relationship<LogisticsParticipant>,
    invoice_no: String,
    way_bill_no: String,
    date: NaiveDate,
    goods_units: u32,
    goods_description: String,
    goods_unit_value: u64,
    goods_total_value: u64,
    no_of_packages: u32,
    currency: String,
    total_weight: f64,
}

impl TryFrom<InvoiceRecord> for Invoice {
    type Error = DomainError;

    fn try_from(record: InvoiceRecord) -> DomainResult<Self> {
        let stored_total = record.goods_total_value;
        let invoice = Invoice::new(NewInvoice {
            id: record.id,
            customs: record.customs,
            importer: record.importer,
            shipper: record.shipper,
            logistics: record.logistics,
            invoice_no: record.invoice_no,
            way_bill_no: record.way_bill_no,
            date: record.date,
            goods_units: record.goods_units,
            goods_description: record.goods_description,
            goods_unit_value: record.goods_unit_value,
            no_of_packages: record.no_of_packages,
            currency: record.currency,
            total_weight: record.total_weight,
        })?;

        if invoice.goods_total_value != stored_total {
            return Err(DomainError::invariant(format!(
                "goods total value {stored_total} does not match {} units at {}",
                invoice.goods_units, invoice.goods_unit_value
            )));
        }
        Ok(invoice)
    }
}

impl Resource for Invoice {
    const TYPE: TypeName = TypeName::new(MODEL_NAMESPACE, "Invoice");
    const KIND: ResourceKind = ResourceKind::Asset;

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn references(&self) -> Vec<ResourceKey> {
        vec![
            self.customs.key(),
            self.importer.key(),
            self.shipper.key(),
            self.logistics.key(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rid(s: &str) -> ResourceId {
        ResourceId::new(s).unwrap()
    }

    fn input() -> NewInvoice {
        NewInvoice {
            id: rid("INV_001"),
            customs: Relationship::new(rid("CUST_01")),
            importer: Relationship::new(rid("importer@email.com")),
            shipper: Relationship::new(rid("shipper@email.com.ca")),
            logistics: Relationship::new(rid("LOGI_01")),
            invoice_no: "InvNo 1/2017".to_string(),
            way_bill_no: "1Z9842873829729801".to_string(),
            date: NaiveDate::from_ymd_opt(2017, 5, 2).unwrap(),
            goods_units: 4,
            goods_description: "iPhones".to_string(),
            goods_unit_value: 100_000,
            no_of_packages: 1,
            currency: "CAD".to_string(),
            total_weight: 356.0,
        }
    }

    #[test]
    fn new_invoice_computes_total_value() {
        let invoice = Invoice::new(input()).unwrap();
        assert_eq!(invoice.goods_total_value(), 400_000);
        assert_eq!(invoice.currency(), "CAD");
    }

    #[test]
    fn invoice_references_all_four_parties() {
        let invoice = Invoice::new(input()).unwrap();
        let refs: Vec<String> = invoice.references().iter().map(|k| k.to_string()).collect();
        assert_eq!(
            refs,
            vec![
                "org.acme.sample.CustomsParticipant#CUST_01",
                "org.acme.sample.ImporterParticipant#importer@email.com",
                "org.acme.sample.ShipperParticipant#shipper@email.com.ca",
                "org.acme.sample.LogisticsParticipant#LOGI_01",
            ]
        );
    }

    #[test]
    fn new_invoice_rejects_bad_currency_and_weight() {
        let mut bad = input();
        bad.currency = "cad".into();
        assert!(matches!(Invoice::new(bad), Err(DomainError::Validation(_))));

        let mut bad = input();
        bad.total_weight = 0.0;
        assert!(matches!(Invoice::new(bad), Err(DomainError::Validation(_))));

        let mut bad = input();
        bad.total_weight = f64::NAN;
        assert!(matches!(Invoice::new(bad), Err(DomainError::Validation(_))));
    }

    #[test]
    fn new_invoice_rejects_overflowing_total() {
        let mut bad = input();
        bad.goods_units = u32::MAX;
        bad.goods_unit_value = u64::MAX;
        assert!(matches!(Invoice::new(bad), Err(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn invoice_serializes_parties_as_uris() {
        let json = serde_json::to_value(Invoice::new(input()).unwrap()).unwrap();
        assert_eq!(json["customs"], "resource:org.acme.sample.CustomsParticipant#CUST_01");
        assert_eq!(json["date"], "2017-05-02");
        assert_eq!(json["goodsTotalValue"], 400_000);
    }

    #[test]
    fn deserialization_revalidates() {
        let valid = serde_json::to_value(Invoice::new(input()).unwrap()).unwrap();
        let back: Invoice = serde_json::from_value(valid.clone()).unwrap();
        assert_eq!(back, Invoice::new(input()).unwrap());

        let mut tampered_total = valid.clone();
        tampered_total["goodsTotalValue"] = 1.into();
        let err = serde_json::from_value::<Invoice>(tampered_total).unwrap_err();
        assert!(err.to_string().contains("goods total value"));

        let mut bad_currency = valid.clone();
        bad_currency["currency"] = "nope".into();
        assert!(serde_json::from_value::<Invoice>(bad_currency).is_err());

        let mut bad_weight = valid;
        bad_weight["totalWeight"] = (-5.0).into();
        assert!(serde_json::from_value::<Invoice>(bad_weight).is_err());
    }

    proptest! {
        #[test]
        fn total_is_units_times_unit_value(units in 1u32..10_000, unit in 0u64..1_000_000) {
            let mut i = input();
            i.goods_units = units;
            i.goods_unit_value = unit;
            let invoice = Invoice::new(i).unwrap();
            prop_assert_eq!(invoice.goods_total_value(), u64::from(units) * unit);
        }
    }
}
