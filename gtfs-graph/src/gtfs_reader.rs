use chrono::Utc;
use log::{debug, info};

use crate::config::ReaderConfig;
use crate::decoder::RowDecoder;
use crate::handler::EntityHandler;
use crate::identifier_space::IdentifierSpace;
use crate::resolver::ReferenceResolver;
use crate::schema::{descriptor_for, EntityDescriptor};
use crate::source::{open_source, TableSource};
use crate::store::EntityStore;
use crate::table::TableReader;
use crate::{Agency, Entity, EntityKey, EntityType, Error, Gtfs};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Where a [GtfsReader] is in its current load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoadState {
    /// No load started, or a new load is about to open the store
    Idle,
    /// The store is open and the tables are being read. A failed load stays there
    Loading,
    /// Every table was read and the store is closed
    Closed,
}

/// What a successful load did
#[derive(Debug, Clone, Serialize)]
pub struct LoadSummary {
    /// Number of entities read for each table. Skipped duplicate agencies are not counted
    pub entities: BTreeMap<EntityType, usize>,
    /// Ids of all the accepted agencies, including the ones of previous loads
    pub agencies: Vec<String>,
    /// Time needed to read and parse the feed in milliseconds
    pub read_duration: i64,
    /// Files of the feed
    pub files: Vec<String>,
    /// Fingerprint of the feed when it was a zip archive
    pub sha256: Option<String>,
    pub last_modified_time: Option<i64>,
}

/// Loads the tables of a feed into an [EntityStore]
///
/// The reader keeps its identifiers between two calls of [GtfsReader::run], so several feeds
/// can be merged into the same store:
/// ```
/// use gtfs_graph::{EntityType, Gtfs, GtfsReader, MemorySource};
/// let mut reader = GtfsReader::default()
///     .default_agency_id("METRO")
///     .entity_types(vec![EntityType::Agency, EntityType::Stop]);
/// let mut gtfs = Gtfs::default();
/// let mut north = MemorySource::default()
///     .with_table("agency.txt", "agency_id,agency_name,agency_url,agency_timezone\nMETRO,Metro,http://metro.example,Europe/Paris")
///     .with_table("stops.txt", "stop_id,stop_name\nN1,North");
/// let mut south = MemorySource::default()
///     .with_table("agency.txt", "agency_id,agency_name,agency_url,agency_timezone\nMETRO,Metro,http://metro.example,Europe/Paris")
///     .with_table("stops.txt", "stop_id,stop_name\nS1,South");
/// reader.run(&mut north, &mut gtfs)?;
/// let summary = reader.run(&mut south, &mut gtfs)?;
/// assert_eq!(gtfs.count(EntityType::Stop), 2);
/// assert_eq!(gtfs.count(EntityType::Agency), 1);
/// assert_eq!(summary.agencies, ["METRO"]);
/// # Ok::<(), gtfs_graph::Error>(())
/// ```
#[derive(Derivative)]
#[derivative(Default, Debug)]
pub struct GtfsReader {
    /// Tables to read, in this order. A table can only reference the ids of the tables read before it
    #[derivative(Default(value = "EntityType::LOAD_ORDER.to_vec()"))]
    pub entity_types: Vec<EntityType>,
    /// Should a local id claimed twice replace the first claim instead of failing
    pub overwrite_duplicates: bool,
    /// Avoid trimming the fields
    ///
    /// If performance is an issue, and if your data is high quality, you can switch it off
    #[derivative(Default(value = "true"))]
    pub trim_fields: bool,
    /// Reported as is in the [LoadSummary]
    pub last_modified_time: Option<i64>,
    space: IdentifierSpace,
    row_ids: HashMap<EntityType, u32>,
    #[derivative(Default(value = "LoadState::Idle"))]
    state: LoadState,
}

impl GtfsReader {
    /// Builds a reader from its configuration
    ///
    /// Fails with [Error::UnknownEntityType] if a table name is not known.
    pub fn from_config(config: &ReaderConfig) -> Result<Self, Error> {
        let mut reader = GtfsReader::default().overwrite_duplicates(config.overwrite_duplicates);
        if let Some(id) = &config.default_agency_id {
            reader = reader.default_agency_id(id.as_str());
        }
        for (from, to) in &config.agency_id_mapping {
            reader = reader.agency_id_mapping(from.as_str(), to.as_str());
        }
        if let Some(names) = &config.entity_types {
            let entity_types = names
                .iter()
                .map(|name| {
                    EntityType::from_name(name).ok_or_else(|| Error::UnknownEntityType(name.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            reader = reader.entity_types(entity_types);
        }
        if let Some(trim_fields) = config.trim_fields {
            reader = reader.trim_fields(trim_fields);
        }
        if let Some(last_modified_time) = config.last_modified_time {
            reader = reader.last_modified_time(last_modified_time);
        }
        Ok(reader)
    }

    /// Agency of the entities without explicit agency. By default, the first agency read
    ///
    /// Returns Self and can be chained
    pub fn default_agency_id(mut self, agency_id: impl Into<String>) -> Self {
        self.space.set_default_agency_id(agency_id);
        self
    }

    /// Replaces the agency id `from` by `to` wherever it is read
    pub fn agency_id_mapping(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.space.add_agency_id_mapping(from, to);
        self
    }

    /// Configures the reader to replace already claimed ids instead of failing (default: false)
    pub fn overwrite_duplicates(mut self, overwrite_duplicates: bool) -> Self {
        self.overwrite_duplicates = overwrite_duplicates;
        self
    }

    /// Only reads those tables, in this order
    pub fn entity_types(mut self, entity_types: Vec<EntityType>) -> Self {
        self.entity_types = entity_types;
        self
    }

    /// Should the fields be trimmed (default: true)
    pub fn trim_fields(mut self, trim_fields: bool) -> Self {
        self.trim_fields = trim_fields;
        self
    }

    /// Modification time of the feed in milliseconds, reported in the [LoadSummary]
    pub fn last_modified_time(mut self, last_modified_time: i64) -> Self {
        self.last_modified_time = Some(last_modified_time);
        self
    }

    /// Starts with those agencies already accepted, to continue a merge
    ///
    /// Fails with [Error::InvalidArgument] if one of them has no id.
    pub fn with_agencies(mut self, agencies: Vec<Agency>) -> Result<Self, Error> {
        self.space.set_agencies(agencies)?;
        Ok(self)
    }

    /// Changes the default agency between two loads
    pub fn set_default_agency_id(&mut self, agency_id: impl Into<String>) {
        self.space.set_default_agency_id(agency_id);
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// All the accepted agencies, in the order they were read
    pub fn agencies(&self) -> &[Agency] {
        self.space.agencies()
    }

    /// See [IdentifierSpace::resolve_default_agency_id]
    pub fn resolve_default_agency_id(&self) -> Result<String, Error> {
        self.space.resolve_default_agency_id()
    }

    /// The agency that claimed a local id
    pub fn agency_for_entity(&self, entity_type: EntityType, entity_id: &str) -> Result<&str, Error> {
        self.space.agency_for(entity_type, entity_id)
    }

    pub fn translate_agency_id(&self, agency_id: &str) -> String {
        self.space.translate_agency_id(agency_id)
    }

    /// Resolves references against the identifiers loaded so far
    pub fn resolver(&self) -> ReferenceResolver<'_> {
        ReferenceResolver::new(&self.space)
    }

    /// Reads back a loaded entity from the store
    pub fn entity<'s, S: EntityStore + ?Sized>(
        &self,
        store: &'s S,
        entity_type: EntityType,
        key: &EntityKey,
    ) -> Result<&'s Entity, Error> {
        if key.is_empty() {
            return Err(Error::InvalidArgument(format!(
                "entity id must not be empty (type {})",
                entity_type
            )));
        }
        store
            .entity_for_id(entity_type, key)
            .ok_or_else(|| Error::ReferenceNotFound {
                entity_type,
                id: key.to_string(),
            })
    }

    /// Reads the GTFS from a local zip archive or local directory into a new [Gtfs]
    pub fn read_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<Gtfs, Error> {
        let mut gtfs = Gtfs::default();
        let summary = self.load_path(path, &mut gtfs)?;
        gtfs.read_duration = summary.read_duration;
        Ok(gtfs)
    }

    /// Reads the GTFS from a local zip archive or local directory into `store`
    pub fn load_path<P, S>(&mut self, path: P, store: &mut S) -> Result<LoadSummary, Error>
    where
        P: AsRef<Path>,
        S: EntityStore + ?Sized,
    {
        let mut source = open_source(path)?;
        self.run(source.as_mut(), store)
    }

    /// Reads every configured table of `source` into `store`
    ///
    /// The first error stops the load. The store is then left as it was after the last flush
    /// and the reader stays in [LoadState::Loading].
    pub fn run<T, S>(&mut self, source: &mut T, store: &mut S) -> Result<LoadSummary, Error>
    where
        T: TableSource + ?Sized,
        S: EntityStore + ?Sized,
    {
        let now = Utc::now();
        self.state = LoadState::Idle;
        store.open()?;
        self.state = LoadState::Loading;

        let mut entities = BTreeMap::new();
        for entity_type in self.entity_types.clone() {
            let descriptor = descriptor_for(entity_type)?;
            let count = self.read_table(descriptor, source, store)?;
            entities.insert(entity_type, count);
            store.flush()?;
        }

        store.close()?;
        self.state = LoadState::Closed;

        Ok(LoadSummary {
            entities,
            agencies: self
                .space
                .agencies()
                .iter()
                .filter_map(|a| a.id.clone())
                .collect(),
            read_duration: Utc::now().signed_duration_since(now).num_milliseconds(),
            files: source.files(),
            sha256: source.sha256(),
            last_modified_time: self.last_modified_time,
        })
    }

    fn read_table<T, S>(
        &mut self,
        descriptor: &'static EntityDescriptor,
        source: &mut T,
        store: &mut S,
    ) -> Result<usize, Error>
    where
        T: TableSource + ?Sized,
        S: EntityStore + ?Sized,
    {
        let reader = match source.open_table(descriptor.file_name)? {
            Some(reader) => reader,
            None if descriptor.required => {
                return Err(Error::MissingFile(descriptor.file_name.to_owned()))
            }
            None => {
                debug!("no {} in the feed, skipped", descriptor.file_name);
                return Ok(0);
            }
        };
        info!("reading entities: {}", descriptor.entity_type);

        let mut table = TableReader::new(reader, descriptor.file_name, self.trim_fields)?;
        let decoder = RowDecoder::new(descriptor, table.headers());
        let mut handler = EntityHandler::new(
            &mut self.space,
            store,
            &mut self.row_ids,
            self.overwrite_duplicates,
        );

        let mut count = 0;
        while table.next_record()? {
            let entity = decoder.decode(table.record(), table.line(), handler.space())?;
            if handler.handle(entity)? {
                count += 1;
            }
        }
        Ok(count)
    }
}
