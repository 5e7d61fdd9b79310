//! Literal demo data for `SetupDemo`.

use chrono::{Days, NaiveDate};

use customsnet_assets::{Invoice, NewInvoice, Shipment};
use customsnet_core::{DomainError, DomainResult, Relationship, ResourceId};
use customsnet_participants::{
    Address, CompanyContact, CustomsParticipant, ImporterParticipant, LogisticsParticipant,
    ShipperParticipant,
};

struct GoodsTemplate {
    description: &'static str,
    units: u32,
    /// Cents.
    unit_value: u64,
    packages: u32,
    weight: f64,
    way_bill_no: &'static str,
}

const GOODS: [GoodsTemplate; 3] = [
    GoodsTemplate {
        description: "iPhones",
        units: 4,
        unit_value: 100_000,
        packages: 1,
        weight: 356.0,
        way_bill_no: "1Z9842873829729801",
    },
    GoodsTemplate {
        description: "Laptops",
        units: 10,
        unit_value: 150_000,
        packages: 2,
        weight: 1_250.0,
        way_bill_no: "1Z9842873829729802",
    },
    GoodsTemplate {
        description: "Maple syrup pallets",
        units: 2,
        unit_value: 25_000,
        packages: 2,
        weight: 900.0,
        way_bill_no: "1Z9842873829729803",
    },
];

const CURRENCY: &str = "CAD";

/// Largest `invoice_count` the demo accepts; ids stay `INV_001`..`INV_999`.
pub const MAX_DEMO_INVOICES: usize = 999;

fn rid(id: &str) -> DomainResult<ResourceId> {
    ResourceId::new(id)
}

/// The full record graph `SetupDemo` writes, grouped per registry.
///
/// Identities are fixed: `CUST_01`/`CUST_02`, `LOGI_01`, the importer and
/// shipper emails, `INV_00n` and `SHIP_00n`. Shipment `n` always travels under
/// invoice `n`.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoFixture {
    pub customs: Vec<CustomsParticipant>,
    pub logistics: Vec<LogisticsParticipant>,
    pub importers: Vec<ImporterParticipant>,
    pub shippers: Vec<ShipperParticipant>,
    pub invoices: Vec<Invoice>,
    pub shipments: Vec<Shipment>,
}

impl DemoFixture {
    pub fn standard(invoice_count: usize) -> DomainResult<Self> {
        if invoice_count == 0 {
            return Err(DomainError::validation("demo setup needs at least one invoice"));
        }
        if invoice_count > MAX_DEMO_INVOICES {
            return Err(DomainError::validation(format!(
                "demo setup seeds at most {MAX_DEMO_INVOICES} invoices, got {invoice_count}"
            )));
        }

        let us_customs = CustomsParticipant::new(
            rid("CUST_01")?,
            "US Customs and Border Protection",
            "USA",
        )?;
        let can_customs =
            CustomsParticipant::new(rid("CUST_02")?, "Canada Border Services Agency", "Canada")?;

        let logistics = LogisticsParticipant::new(
            rid("LOGI_01")?,
            "Logistics Company 1",
            "info@corp.com",
            Address::new("10 Main St", "Albany", "NY", "USA", "12201")?,
        )?;

        let importer = ImporterParticipant::new(
            rid("importer@email.com")?,
            CompanyContact::new(
                "Susan Importer",
                "Importex Company",
                "III12345",
                Address::new("10 Blue St", "Newark", "NJ", "USA", "07105")?,
            )?,
        );

        let shipper = ShipperParticipant::new(
            rid("shipper@email.com.ca")?,
            CompanyContact::new(
                "Lucy Shipper",
                "Exporter Company",
                "SS12345678",
                Address::new("340 River Ave", "Montreal", "Quebec", "Canada", "HA1 OA1")?,
            )?,
        );

        let first_date = NaiveDate::from_ymd_opt(2017, 5, 2)
            .ok_or_else(|| DomainError::invariant("invalid demo date"))?;

        let mut invoices = Vec::with_capacity(invoice_count);
        let mut shipments = Vec::with_capacity(invoice_count);
        for n in 1..=invoice_count {
            let goods = &GOODS[(n - 1) % GOODS.len()];
            let date = first_date
                .checked_add_days(Days::new((n - 1) as u64))
                .ok_or_else(|| DomainError::invariant("demo invoice date out of range"))?;

            let invoice = Invoice::new(NewInvoice {
                id: rid(&format!("INV_{n:03}"))?,
                customs: Relationship::to(&us_customs),
                importer: Relationship::to(&importer),
                shipper: Relationship::to(&shipper),
                logistics: Relationship::to(&logistics),
                invoice_no: format!("InvNo {n}/2017"),
                way_bill_no: goods.way_bill_no.to_string(),
                date,
                goods_units: goods.units,
                goods_description: goods.description.to_string(),
                goods_unit_value: goods.unit_value,
                no_of_packages: goods.packages,
                currency: CURRENCY.to_string(),
                total_weight: goods.weight,
            })?;

            shipments.push(Shipment::new(
                rid(&format!("SHIP_{n:03}"))?,
                Relationship::to(&invoice),
            ));
            invoices.push(invoice);
        }

        Ok(Self {
            customs: vec![us_customs, can_customs],
            logistics: vec![logistics],
            importers: vec![importer],
            shippers: vec![shipper],
            invoices,
            shipments,
        })
    }

    pub fn participant_count(&self) -> usize {
        self.customs.len() + self.logistics.len() + self.importers.len() + self.shippers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use customsnet_assets::CustomsStatus;
    use customsnet_core::Resource;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn standard_fixture_has_literal_participants() {
        let f = DemoFixture::standard(1).unwrap();
        assert_eq!(f.participant_count(), 5);
        assert_eq!(f.customs[0].agency_name(), "US Customs and Border Protection");
        assert_eq!(f.customs[1].country(), "Canada");
        assert_eq!(f.logistics[0].address().zip, "12201");
        assert_eq!(f.importers[0].contact().tax_id, "III12345");
        assert_eq!(f.shippers[0].id().as_str(), "shipper@email.com.ca");
    }

    #[test]
    fn first_invoice_matches_the_classic_demo() {
        let f = DemoFixture::standard(1).unwrap();
        let inv = &f.invoices[0];
        assert_eq!(inv.id().as_str(), "INV_001");
        assert_eq!(inv.invoice_no(), "InvNo 1/2017");
        assert_eq!(inv.goods_description(), "iPhones");
        assert_eq!(inv.goods_total_value(), 400_000);
        assert_eq!(inv.date(), NaiveDate::from_ymd_opt(2017, 5, 2).unwrap());
        assert_eq!(inv.customs().id().as_str(), "CUST_01");

        let ship = &f.shipments[0];
        assert_eq!(ship.id().as_str(), "SHIP_001");
        assert_eq!(ship.customs_status(), CustomsStatus::Uncleared);
        assert_eq!(ship.invoice().id(), inv.id());
    }

    #[test]
    fn zero_invoices_is_rejected() {
        assert!(matches!(
            DemoFixture::standard(0),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn counts_above_the_maximum_are_rejected() {
        assert!(DemoFixture::standard(MAX_DEMO_INVOICES).is_ok());
        for n in [MAX_DEMO_INVOICES + 1, usize::MAX] {
            assert!(matches!(
                DemoFixture::standard(n),
                Err(DomainError::Validation(_))
            ));
        }
    }

    proptest! {
        #[test]
        fn one_shipment_per_distinct_invoice(n in 1usize..40) {
            let f = DemoFixture::standard(n).unwrap();
            prop_assert_eq!(f.invoices.len(), n);
            prop_assert_eq!(f.shipments.len(), n);

            let invoice_ids: HashSet<_> = f.invoices.iter().map(|i| i.id().clone()).collect();
            let targets: HashSet<_> = f.shipments.iter().map(|s| s.invoice().id().clone()).collect();
            prop_assert_eq!(invoice_ids.len(), n);
            prop_assert_eq!(targets, invoice_ids);
        }
    }
}
