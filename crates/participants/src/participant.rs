use serde::{Deserialize, Serialize};

use customsnet_core::{
    DomainError, DomainResult, MODEL_NAMESPACE, Resource, ResourceId, ResourceKind, TypeName,
};

use crate::address::Address;

fn ensure_not_blank(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Participant: a national customs agency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "CustomsRecord")]
pub struct CustomsParticipant {
    id: ResourceId,
    agency_name: String,
    country: String,
}

impl CustomsParticipant {
    pub fn new(
        id: ResourceId,
        agency_name: impl Into<String>,
        country: impl Into<String>,
    ) -> DomainResult<Self> {
        let agency_name = agency_name.into();
        let country = country.into();
        ensure_not_blank("agency name", &agency_name)?;
        ensure_not_blank("country", &country)?;

        Ok(Self {
            id,
            agency_name,
            country,
        })
    }

    pub fn agency_name(&self) -> &str {
        &self.agency_name
    }

    pub fn country(&self) -> &str {
        &self.country
    }
}

impl Resource for CustomsParticipant {
    const TYPE: TypeName = TypeName::new(MODEL_NAMESPACE, "CustomsParticipant");
    const KIND: ResourceKind = ResourceKind::Participant;

    fn id(&self) -> &ResourceId {
        &self.id
    }
}

/// Participant: the logistics provider moving the goods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "LogisticsRecord")]
pub struct LogisticsParticipant {
    id: ResourceId,
    logistics_name: String,
    email: String,
    address: Address,
}

impl LogisticsParticipant {
    pub fn new(
        id: ResourceId,
        logistics_name: impl Into<String>,
        email: impl Into<String>,
        address: Address,
    ) -> DomainResult<Self> {
        let logistics_name = logistics_name.into();
        let email = email.into();
        ensure_not_blank("logistics name", &logistics_name)?;
        if !email.contains('@') {
            return Err(DomainError::validation(format!(
                "'{email}' is not an email address"
            )));
        }

        Ok(Self {
            id,
            logistics_name,
            email,
            address,
        })
    }

    pub fn logistics_name(&self) -> &str {
        &self.logistics_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn address(&self) -> &Address {
        &self.address
    }
}

impl Resource for LogisticsParticipant {
    const TYPE: TypeName = TypeName::new(MODEL_NAMESPACE, "LogisticsParticipant");
    const KIND: ResourceKind = ResourceKind::Participant;

    fn id(&self) -> &ResourceId {
        &self.id
    }
}

/// Company details shared by the two trading parties of an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ContactRecord")]
pub struct CompanyContact {
    pub contact_name: String,
    pub company_name: String,
    pub tax_id: String,
    pub address: Address,
}

impl CompanyContact {
    pub fn new(
        contact_name: impl Into<String>,
        company_name: impl Into<String>,
        tax_id: impl Into<String>,
        address: Address,
    ) -> DomainResult<Self> {
        let contact = Self {
            contact_name: contact_name.into(),
            company_name: company_name.into(),
            tax_id: tax_id.into(),
            address,
        };
        ensure_not_blank("company name", &contact.company_name)?;
        ensure_not_blank("tax id", &contact.tax_id)?;
        Ok(contact)
    }
}

// Wire forms, converted through the validating constructors above.

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CustomsRecord {
    id: ResourceId,
    agency_name: String,
    country: String,
}

impl TryFrom<CustomsRecord> for CustomsParticipant {
    type Error = DomainError;

    fn try_from(r: CustomsRecord) -> DomainResult<Self> {
        CustomsParticipant::new(r.id, r.agency_name, r.country)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LogisticsRecord {
    id: ResourceId,
    logistics_name: String,
    email: String,
    address: Address,
}

impl TryFrom<LogisticsRecord> for LogisticsParticipant {
    type Error = DomainError;

    fn try_from(r: LogisticsRecord) -> DomainResult<Self> {
        LogisticsParticipant::new(r.id, r.logistics_name, r.email, r.address)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContactRecord {
    contact_name: String,
    company_name: String,
    tax_id: String,
    address: Address,
}

impl TryFrom<ContactRecord> for CompanyContact {
    type Error = DomainError;

    fn try_from(r: ContactRecord) -> DomainResult<Self> {
        CompanyContact::new(r.contact_name, r.company_name, r.tax_id, r.address)
    }
}

/// Participant: the importer of record. Identified by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImporterParticipant {
    id: ResourceId,
    #[serde(flatten)]
    contact: CompanyContact,
}

impl ImporterParticipant {
    pub fn new(id: ResourceId, contact: CompanyContact) -> Self {
        Self { id, contact }
    }

    pub fn contact(&self) -> &CompanyContact {
        &self.contact
    }
}

impl Resource for ImporterParticipant {
    const TYPE: TypeName = TypeName::new(MODEL_NAMESPACE, "ImporterParticipant");
    const KIND: ResourceKind = ResourceKind::Participant;

    fn id(&self) -> &ResourceId {
        &self.id
    }
}

/// Participant: the exporter shipping the goods. Identified by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipperParticipant {
    id: ResourceId,
    #[serde(flatten)]
    contact: CompanyContact,
}

impl ShipperParticipant {
    pub fn new(id: ResourceId, contact: CompanyContact) -> Self {
        Self { id, contact }
    }

    pub fn contact(&self) -> &CompanyContact {
        &self.contact
    }
}

impl Resource for ShipperParticipant {
    const TYPE: TypeName = TypeName::new(MODEL_NAMESPACE, "ShipperParticipant");
    const KIND: ResourceKind = ResourceKind::Participant;

    fn id(&self) -> &ResourceId {
        &self.id
    }
}
