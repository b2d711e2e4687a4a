/*! Loads [General Transit Feed Specification](https://gtfs.org/) (GTFS) feeds into an entity store,
giving every entity an identifier scoped by its agency so that several feeds can be merged.

To get started, see [GtfsReader] and [Gtfs].

## What is GTFS

A Gtfs feed is a collection of CSV files (often bundled as a zip file).
Each file represents a collection of one type (stops, lines, etc.) that have relationships through unique identifiers.

## Design decisions

### Agency scoped identifiers

A local id like `stop_id` is only unique inside one feed. Every identifier is stored as an
[AgencyAndId]: routes and fares take the agency of their `agency_id` column, trips the agency of
their route, and everything else the default agency of the load.
The first agency read is the default agency, unless one is configured.

### Load order

The tables are read one after the other, in the order of [EntityType::LOAD_ORDER].
A reference can only be resolved if the referenced table was read before. A reference to an id
not read yet is an error, never a deferred lookup.

### Schema as data

The columns of each table are described by static [EntityDescriptor]s. A single [RowDecoder]
converts any row using them; the entity structs only pick their values from the decoded row.

### Use of Enum

Many values are integers that are actually enumerations of certain values. We always use Rust enums, like [LocationType] to represent them, and not the integer value.

### Renaming

We strip the object type from the field names (`route_short_name` is [Route::short_name]).

*/

#[macro_use]
extern crate derivative;
#[macro_use]
extern crate serde_derive;

mod config;
mod decoder;
mod enums;
pub mod error;
mod gtfs;
mod gtfs_reader;
mod handler;
mod identifier_space;
mod ids;
pub(crate) mod objects;
mod resolver;
mod schema;
mod source;
mod store;
mod table;
mod values;

#[cfg(test)]
mod tests;

pub use config::ReaderConfig;
pub use decoder::{Record, RowDecoder, Value};
pub use error::Error;
pub use gtfs::Gtfs;
pub use gtfs_reader::{GtfsReader, LoadState, LoadSummary};
pub use handler::EntityHandler;
pub use identifier_space::IdentifierSpace;
pub use ids::{AgencyAndId, EntityKey};
pub use objects::*;
pub use resolver::ReferenceResolver;
pub use schema::{descriptor_for, descriptors, EntityDescriptor, FieldDescriptor, FieldKind, Scope};
pub use source::{open_source, DirectorySource, MemorySource, TableSource, ZipSource};
pub use store::{EntityStore, StoreState};
pub use table::TableReader;
