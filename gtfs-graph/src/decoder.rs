//! Decoding of one CSV row into one entity, driven by an [EntityDescriptor]
use crate::identifier_space::IdentifierSpace;
use crate::ids::AgencyAndId;
use crate::objects::Entity;
use crate::resolver::ReferenceResolver;
use crate::schema::{EntityDescriptor, FieldDescriptor, FieldKind, Scope};
use crate::values;
use crate::Error;
use chrono::NaiveDate;
use csv::StringRecord;
use rgb::RGB8;
use std::convert::TryFrom;
use std::fmt::Display;

/// A converted column value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    Time(u32),
    Color(RGB8),
    Id(AgencyAndId),
}

/// The converted values of one row, by column name. A missing optional column has no value
#[derive(Debug)]
pub struct Record {
    file_name: &'static str,
    line: u64,
    values: Vec<(&'static str, Option<Value>)>,
}

impl Record {
    fn take(&mut self, name: &str) -> Option<Value> {
        self.values
            .iter_mut()
            .find(|(n, _)| *n == name)
            .and_then(|(_, v)| v.take())
    }

    fn invalid(&self, name: &str, value: impl Display, reason: impl Display) -> Error {
        Error::InvalidValue {
            file_name: self.file_name.to_owned(),
            column: name.to_owned(),
            value: value.to_string(),
            line: self.line,
            reason: reason.to_string(),
        }
    }

    /// Value of a required column without default
    pub fn required<T>(&self, name: &str, value: Option<T>) -> Result<T, Error> {
        value.ok_or_else(|| Error::MissingRequiredField {
            file_name: self.file_name.to_owned(),
            column: name.to_owned(),
            line: self.line,
        })
    }

    pub fn opt_text(&mut self, name: &str) -> Option<String> {
        match self.take(name) {
            Some(Value::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// Empty string when missing
    pub fn text(&mut self, name: &str) -> String {
        self.opt_text(name).unwrap_or_default()
    }

    /// Integer value checked against the range of `T`
    pub fn int<T: TryFrom<i64>>(&mut self, name: &str) -> Result<Option<T>, Error> {
        match self.take(name) {
            Some(Value::Int(i)) => T::try_from(i)
                .map(Some)
                .map_err(|_| self.invalid(name, i, "integer out of range")),
            _ => Ok(None),
        }
    }

    /// Enumeration built from its integer code
    pub fn code<T>(&mut self, name: &str) -> Result<Option<T>, Error>
    where
        T: TryFrom<i32>,
        T::Error: Display,
    {
        match self.take(name) {
            Some(Value::Int(i)) => {
                let code = i32::try_from(i).map_err(|_| self.invalid(name, i, "code out of range"))?;
                T::try_from(code)
                    .map(Some)
                    .map_err(|e| self.invalid(name, i, e))
            }
            _ => Ok(None),
        }
    }

    pub fn opt_float(&mut self, name: &str) -> Option<f64> {
        match self.take(name) {
            Some(Value::Float(f)) => Some(f),
            _ => None,
        }
    }

    /// Zero when missing
    pub fn float(&mut self, name: &str) -> f64 {
        self.opt_float(name).unwrap_or_default()
    }

    pub fn bool(&mut self, name: &str) -> bool {
        matches!(self.take(name), Some(Value::Bool(true)))
    }

    pub fn opt_date(&mut self, name: &str) -> Option<NaiveDate> {
        match self.take(name) {
            Some(Value::Date(d)) => Some(d),
            _ => None,
        }
    }

    pub fn date(&mut self, name: &str) -> NaiveDate {
        self.opt_date(name).unwrap_or(NaiveDate::MIN)
    }

    pub fn opt_time(&mut self, name: &str) -> Option<u32> {
        match self.take(name) {
            Some(Value::Time(t)) => Some(t),
            _ => None,
        }
    }

    pub fn time(&mut self, name: &str) -> u32 {
        self.opt_time(name).unwrap_or_default()
    }

    pub fn opt_color(&mut self, name: &str) -> Option<RGB8> {
        match self.take(name) {
            Some(Value::Color(c)) => Some(c),
            _ => None,
        }
    }

    pub fn opt_id(&mut self, name: &str) -> Option<AgencyAndId> {
        match self.take(name) {
            Some(Value::Id(id)) => Some(id),
            _ => None,
        }
    }

    pub fn id(&mut self, name: &str) -> AgencyAndId {
        self.opt_id(name).unwrap_or_default()
    }
}

/// Position of each descriptor field in the header of the table, computed once per table
#[derive(Debug)]
struct ColumnIndex {
    positions: Vec<Option<usize>>,
}

impl ColumnIndex {
    fn new(descriptor: &EntityDescriptor, headers: &StringRecord) -> Self {
        let positions = descriptor
            .fields
            .iter()
            .map(|field| {
                headers
                    .iter()
                    .position(|h| field.matches_header(h, descriptor.prefix))
            })
            .collect();
        Self { positions }
    }

    /// The raw token of a field. An empty value is the same as a missing column
    fn token<'r>(&self, field: usize, row: &'r StringRecord) -> Option<&'r str> {
        self.positions[field]
            .and_then(|p| row.get(p))
            .filter(|t| !t.is_empty())
    }
}

/// Turns the rows of one table into entities
///
/// It knows nothing about the entity types: adding a table only means adding its descriptor.
pub struct RowDecoder {
    descriptor: &'static EntityDescriptor,
    columns: ColumnIndex,
}

impl RowDecoder {
    pub fn new(descriptor: &'static EntityDescriptor, headers: &StringRecord) -> Self {
        Self {
            descriptor,
            columns: ColumnIndex::new(descriptor, headers),
        }
    }

    /// Decodes one row into its [Record]
    ///
    /// Identifier columns are converted last, as their agency scope can depend on another column.
    pub fn decode_record(
        &self,
        row: &StringRecord,
        line: u64,
        space: &IdentifierSpace,
    ) -> Result<Record, Error> {
        let resolver = ReferenceResolver::new(space);
        let fields = self.descriptor.fields;
        let mut values: Vec<Option<Value>> = (0..fields.len()).map(|_| None).collect();

        for (i, field) in fields.iter().enumerate() {
            if !matches!(field.kind, FieldKind::Id(_)) {
                values[i] = self.convert(field, self.columns.token(i, row), line, &values, &resolver)?;
            }
        }
        for (i, field) in fields.iter().enumerate() {
            if matches!(field.kind, FieldKind::Id(_)) {
                values[i] = self.convert(field, self.columns.token(i, row), line, &values, &resolver)?;
            }
            if field.required && values[i].is_none() {
                return Err(Error::MissingRequiredField {
                    file_name: self.descriptor.file_name.to_owned(),
                    column: field.name.to_owned(),
                    line,
                });
            }
        }

        Ok(Record {
            file_name: self.descriptor.file_name,
            line,
            values: fields.iter().map(|f| f.name).zip(values).collect(),
        })
    }

    /// Decodes one row into its entity
    pub fn decode(
        &self,
        row: &StringRecord,
        line: u64,
        space: &IdentifierSpace,
    ) -> Result<Entity, Error> {
        let record = self.decode_record(row, line, space)?;
        Entity::from_record(self.descriptor.entity_type, record)
    }

    fn convert(
        &self,
        field: &FieldDescriptor,
        token: Option<&str>,
        line: u64,
        values: &[Option<Value>],
        resolver: &ReferenceResolver,
    ) -> Result<Option<Value>, Error> {
        if field.kind == FieldKind::AgencyRef {
            return resolver.agency_reference(token).map(|id| Some(Value::Text(id)));
        }
        let token = match token {
            Some(t) => t,
            None => return Ok(None),
        };
        let invalid = |reason: String| Error::InvalidValue {
            file_name: self.descriptor.file_name.to_owned(),
            column: field.name.to_owned(),
            value: token.to_owned(),
            line,
            reason,
        };

        let value = match field.kind {
            FieldKind::Text => Value::Text(token.to_owned()),
            FieldKind::Integer | FieldKind::Code => {
                Value::Int(values::parse_integer(token).map_err(invalid)?)
            }
            FieldKind::Float => Value::Float(values::parse_float(token).map_err(invalid)?),
            FieldKind::Bool => Value::Bool(values::parse_bool(token).map_err(invalid)?),
            FieldKind::Date => Value::Date(values::parse_date(token).map_err(invalid)?),
            FieldKind::Time => Value::Time(values::parse_time(token).map_err(invalid)?),
            FieldKind::Color => Value::Color(values::parse_color(token).map_err(invalid)?),
            FieldKind::AgencyId => Value::Text(resolver.translate_agency_id(token)),
            FieldKind::AgencyRef => Value::Text(resolver.agency_reference(Some(token))?),
            FieldKind::Ref(entity_type) => Value::Id(resolver.resolve(entity_type, token)?),
            FieldKind::Id(scope) => {
                let agency_id = self.scope_agency_id(scope, values, resolver)?;
                Value::Id(AgencyAndId::new(agency_id, token))
            }
        };
        Ok(Some(value))
    }

    fn scope_agency_id(
        &self,
        scope: Scope,
        values: &[Option<Value>],
        resolver: &ReferenceResolver,
    ) -> Result<String, Error> {
        let value_of = |column: &str| {
            self.descriptor
                .fields
                .iter()
                .position(|f| f.name == column)
                .and_then(|i| values[i].as_ref())
        };
        match scope {
            Scope::AgencyColumn(column) => {
                if let Some(Value::Text(agency_id)) = value_of(column) {
                    return Ok(agency_id.clone());
                }
            }
            Scope::Reference(column) => {
                if let Some(Value::Id(id)) = value_of(column) {
                    return Ok(id.agency_id.clone());
                }
            }
            Scope::DefaultAgency => {}
        }
        resolver.default_agency_id()
    }
}
