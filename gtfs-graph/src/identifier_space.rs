//! Agency scopes of the identifiers seen during a load
use crate::enums::EntityType;
use crate::ids::AgencyAndId;
use crate::objects::Agency;
use crate::Error;
use log::debug;
use std::collections::HashMap;

/// Owns everything needed to build and check composite identifiers:
/// the default agency, the agency id translations, the accepted agencies and,
/// for each entity type, the ledger of which agency claimed which local id.
///
/// It is not reset between two loads made by the same [crate::GtfsReader],
/// which is how several feeds are merged with a shared identity.
#[derive(Debug, Default)]
pub struct IdentifierSpace {
    default_agency_id: Option<String>,
    agency_id_mapping: HashMap<String, String>,
    agencies: Vec<Agency>,
    agency_ids_by_entity_type_and_id: HashMap<EntityType, HashMap<String, String>>,
}

impl IdentifierSpace {
    pub fn set_default_agency_id(&mut self, agency_id: impl Into<String>) {
        self.default_agency_id = Some(agency_id.into());
    }

    pub fn add_agency_id_mapping(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.agency_id_mapping.insert(from.into(), to.into());
    }

    /// Replaces the accepted agencies, to continue a merge started elsewhere
    ///
    /// Every agency must have an id: the first one is the default agency.
    pub fn set_agencies(&mut self, agencies: Vec<Agency>) -> Result<(), Error> {
        if let Some(agency) = agencies.iter().find(|a| a.id.is_none()) {
            return Err(Error::InvalidArgument(format!(
                "agency {} has no id",
                agency.name
            )));
        }
        self.agencies = agencies;
        Ok(())
    }

    pub fn agencies(&self) -> &[Agency] {
        &self.agencies
    }

    /// The configured translation of `agency_id`, or `agency_id` itself
    pub fn translate_agency_id(&self, agency_id: &str) -> String {
        self.agency_id_mapping
            .get(agency_id)
            .map(String::as_str)
            .unwrap_or(agency_id)
            .to_owned()
    }

    /// The configured default agency, otherwise the first accepted agency
    ///
    /// Computed on each call from the current state, never cached.
    pub fn resolve_default_agency_id(&self) -> Result<String, Error> {
        if let Some(id) = &self.default_agency_id {
            return Ok(id.clone());
        }
        self.agencies
            .first()
            .and_then(|agency| agency.id.clone())
            .ok_or(Error::NoDefaultAgencyId)
    }

    /// Agency id of a column referencing an agency
    ///
    /// The default agency is resolved first, so a feed without any agency nor configured
    /// default fails even when the column has a value.
    /// An empty column means the default agency, otherwise the translated id must be the
    /// default agency or one of the accepted agencies.
    pub fn resolve_agency_reference(&self, raw_agency_id: Option<&str>) -> Result<String, Error> {
        let default_agency_id = self.resolve_default_agency_id()?;
        let agency_id = match raw_agency_id {
            None => return Ok(default_agency_id),
            Some(raw) => self.translate_agency_id(raw),
        };
        if agency_id == default_agency_id || self.is_accepted(&agency_id) {
            Ok(agency_id)
        } else {
            Err(Error::ReferenceNotFound {
                entity_type: EntityType::Agency,
                id: agency_id,
            })
        }
    }

    fn is_accepted(&self, agency_id: &str) -> bool {
        self.agencies
            .iter()
            .any(|a| a.id.as_deref() == Some(agency_id))
    }

    /// Adds an agency to the accepted ones, unless an agency with the same id is already there
    ///
    /// Returns false when the agency was already known. The known agency is kept as it is.
    pub fn accept_agency(&mut self, agency: Agency) -> bool {
        if self.agencies.iter().any(|a| a.id == agency.id) {
            return false;
        }
        self.agencies.push(agency);
        true
    }

    /// Records that `id.id` belongs to `id.agency_id` in the ledger of `entity_type`
    ///
    /// An already claimed local id is a [Error::DuplicateEntity] and the existing claim is kept,
    /// unless `overwrite` is set: the new claim then replaces the old one.
    pub fn register_claim(
        &mut self,
        entity_type: EntityType,
        id: &AgencyAndId,
        overwrite: bool,
    ) -> Result<(), Error> {
        let ledger = self
            .agency_ids_by_entity_type_and_id
            .entry(entity_type)
            .or_default();

        if let Some(previous) = ledger.get(&id.id) {
            if !overwrite {
                return Err(Error::DuplicateEntity {
                    entity_type,
                    id: id.clone(),
                });
            }
            debug!(
                "{} {} now belongs to {} instead of {}",
                entity_type, id.id, id.agency_id, previous
            );
        }
        ledger.insert(id.id.clone(), id.agency_id.clone());
        Ok(())
    }

    /// The agency that claimed `entity_id` in the ledger of `entity_type`
    pub fn agency_for(&self, entity_type: EntityType, entity_id: &str) -> Result<&str, Error> {
        if entity_id.is_empty() {
            return Err(Error::InvalidArgument(format!(
                "entity id must not be empty (type {})",
                entity_type
            )));
        }
        self.agency_ids_by_entity_type_and_id
            .get(&entity_type)
            .and_then(|ledger| ledger.get(entity_id))
            .map(String::as_str)
            .ok_or_else(|| Error::ReferenceNotFound {
                entity_type,
                id: entity_id.to_owned(),
            })
    }
}
