//! Turns the raw identifiers found in a column into the composite identifiers of the store
use crate::enums::EntityType;
use crate::identifier_space::IdentifierSpace;
use crate::ids::{AgencyAndId, EntityKey};
use crate::objects::Entity;
use crate::store::EntityStore;
use crate::Error;

/// Read only view of an [IdentifierSpace] used while decoding a row
#[derive(Debug, Clone, Copy)]
pub struct ReferenceResolver<'a> {
    space: &'a IdentifierSpace,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(space: &'a IdentifierSpace) -> Self {
        Self { space }
    }

    pub fn default_agency_id(&self) -> Result<String, Error> {
        self.space.resolve_default_agency_id()
    }

    pub fn translate_agency_id(&self, agency_id: &str) -> String {
        self.space.translate_agency_id(agency_id)
    }

    /// See [IdentifierSpace::resolve_agency_reference]
    pub fn agency_reference(&self, raw_agency_id: Option<&str>) -> Result<String, Error> {
        self.space.resolve_agency_reference(raw_agency_id)
    }

    /// The agency that claimed `entity_id`
    pub fn agency_for(&self, entity_type: EntityType, entity_id: &str) -> Result<&'a str, Error> {
        self.space.agency_for(entity_type, entity_id)
    }

    /// Composite identifier of an entity referenced by its local id
    ///
    /// The referenced entity must have been read before, which is what the load order is for.
    pub fn resolve(&self, entity_type: EntityType, entity_id: &str) -> Result<AgencyAndId, Error> {
        let agency_id = self.agency_for(entity_type, entity_id)?;
        Ok(AgencyAndId::new(agency_id, entity_id))
    }

    /// The stored entity referenced by `entity_id`
    pub fn entity<'s, S: EntityStore + ?Sized>(
        &self,
        store: &'s S,
        entity_type: EntityType,
        entity_id: &str,
    ) -> Result<&'s Entity, Error> {
        let key = EntityKey::Composite(self.resolve(entity_type, entity_id)?);
        store
            .entity_for_id(entity_type, &key)
            .ok_or_else(|| Error::ReferenceNotFound {
                entity_type,
                id: entity_id.to_owned(),
            })
    }
}
