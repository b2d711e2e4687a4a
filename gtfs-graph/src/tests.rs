use crate::objects::*;
use crate::{
    descriptor_for, descriptors, AgencyAndId, EntityKey, EntityStore, Error, Gtfs, GtfsReader,
    LoadState, MemorySource, ReaderConfig, StoreState, ZipSource,
};
use chrono::NaiveDate;
use rgb::RGB8;
use std::io::{Cursor, Write};

const AGENCY_HEADER: &str = "agency_id,agency_name,agency_url,agency_timezone";

fn agencies(rows: &[&str]) -> String {
    let mut table = AGENCY_HEADER.to_owned();
    for row in rows {
        table.push('\n');
        table.push_str(row);
    }
    table
}

fn id(agency_id: &str, id: &str) -> AgencyAndId {
    AgencyAndId::new(agency_id, id)
}

fn basic() -> Gtfs {
    Gtfs::from_path("fixtures/basic").expect("impossible to read gtfs")
}

/// Store recording the calls it receives
#[derive(Default)]
struct RecordingStore {
    calls: Vec<String>,
    gtfs: Gtfs,
}

impl EntityStore for RecordingStore {
    fn open(&mut self) -> Result<(), Error> {
        self.calls.push("open".to_owned());
        self.gtfs.open()
    }

    fn save_entity(&mut self, entity: Entity) -> Result<(), Error> {
        self.calls.push(format!("save {}", entity));
        self.gtfs.save_entity(entity)
    }

    fn entity_for_id(&self, entity_type: EntityType, key: &EntityKey) -> Option<&Entity> {
        self.gtfs.entity_for_id(entity_type, key)
    }

    fn flush(&mut self) -> Result<(), Error> {
        self.calls.push("flush".to_owned());
        self.gtfs.flush()
    }

    fn close(&mut self) -> Result<(), Error> {
        self.calls.push("close".to_owned());
        self.gtfs.close()
    }
}

#[test]
fn read_basic_fixture() {
    let mut reader = GtfsReader::default();
    let mut gtfs = Gtfs::default();
    let summary = reader
        .load_path("fixtures/basic", &mut gtfs)
        .expect("impossible to read gtfs");

    assert_eq!(LoadState::Closed, reader.state());
    assert_eq!(StoreState::Closed, gtfs.state());
    assert_eq!(EntityType::LOAD_ORDER.len(), gtfs.flush_count());
    assert_eq!(vec!["BIBUS"], summary.agencies);
    assert_eq!(Some(&5), summary.entities.get(&EntityType::Stop));
    assert_eq!(Some(&0), summary.entities.get(&EntityType::Zone));
    assert!(summary.sha256.is_none());
    assert!(summary.files.iter().any(|f| f.ends_with("stops.txt")));

    assert_eq!(1, gtfs.count(EntityType::Agency));
    assert_eq!(3, gtfs.count(EntityType::Route));
    assert_eq!(1, gtfs.count(EntityType::Level));
    assert_eq!(5, gtfs.count(EntityType::Stop));
    assert_eq!(2, gtfs.count(EntityType::Trip));
    assert_eq!(4, gtfs.count(EntityType::StopTime));
    assert_eq!(2, gtfs.count(EntityType::ServiceCalendar));
    assert_eq!(2, gtfs.count(EntityType::ServiceCalendarDate));
    assert_eq!(2, gtfs.count(EntityType::ShapePoint));
    assert_eq!(1, gtfs.count(EntityType::FareAttribute));
    assert_eq!(1, gtfs.count(EntityType::FareRule));
    assert_eq!(1, gtfs.count(EntityType::Frequency));
    assert_eq!(1, gtfs.count(EntityType::Pathway));
    assert_eq!(1, gtfs.count(EntityType::Transfer));
    assert_eq!(1, gtfs.count(EntityType::FeedInfo));
    assert_eq!(1, gtfs.count(EntityType::Translation));
    assert_eq!(0, gtfs.count(EntityType::Block));
}

#[test]
fn read_agency() {
    let gtfs = basic();
    let agency = gtfs.get_agency("BIBUS").unwrap();
    assert_eq!("BIBUS", agency.name);
    assert_eq!("Europe/Paris", agency.timezone);
    assert_eq!(Some("fr".to_owned()), agency.lang);
    assert_eq!(None, agency.phone);
}

#[test]
fn read_stop() {
    let gtfs = basic();
    assert_eq!(
        LocationType::StopArea,
        gtfs.get_stop(&id("BIBUS", "stop1")).unwrap().location_type
    );
    let stop2 = gtfs.get_stop(&id("BIBUS", "stop2")).unwrap();
    assert_eq!(LocationType::StopPoint, stop2.location_type);
    assert_eq!(Some(48.796_058), stop2.latitude);
    assert_eq!(Some("S2".to_owned()), stop2.code);
    assert_eq!(Some(id("BIBUS", "stop1")), stop2.parent_station);
    assert_eq!(Some(id("BIBUS", "L0")), stop2.level_id);
    assert_eq!(Availability::Available, stop2.wheelchair_boarding);

    let stop4 = gtfs.get_stop(&id("BIBUS", "stop4")).unwrap();
    assert_eq!(Availability::NotAvailable, stop4.wheelchair_boarding);
    assert_eq!(None, stop4.parent_station);
    assert_eq!("", stop4.description);

    let entrance = gtfs.get_stop(&id("BIBUS", "stop5")).unwrap();
    assert_eq!(LocationType::StationEntrance, entrance.location_type);
    assert_eq!(None, entrance.latitude);

    assert!(matches!(
        gtfs.get_stop(&id("OTHER", "stop1")),
        Err(Error::ReferenceNotFound { entity_type: EntityType::Stop, .. })
    ));
}

#[test]
fn read_routes() {
    let gtfs = basic();
    let route = gtfs.get_route(&id("BIBUS", "1")).unwrap();
    assert_eq!("Gare - Plage", route.long_name);
    assert_eq!("Gare - Plage", route.to_string());
    assert_eq!(RouteType::Bus, route.route_type);
    assert_eq!(RGB8::new(255, 0, 0), route.color);
    assert_eq!(RGB8::new(255, 255, 255), route.text_color);

    // no agency_id: the default agency
    let route = gtfs.get_route(&id("BIBUS", "2")).unwrap();
    assert_eq!("BIBUS", route.agency_id);
    assert_eq!(RouteType::Tramway, route.route_type);
    assert_eq!(RGB8::new(255, 255, 255), route.color);
    assert_eq!(RGB8::new(0, 0, 0), route.text_color);

    let route = gtfs.get_route(&id("BIBUS", "3")).unwrap();
    assert_eq!(RouteType::Other(1700), route.route_type);
}

#[test]
fn read_trips_and_stop_times() {
    let gtfs = basic();
    let trip = gtfs.get_trip(&id("BIBUS", "trip1")).unwrap();
    assert_eq!(id("BIBUS", "1"), trip.route_id);
    assert_eq!(id("BIBUS", "service1"), trip.service_id);
    assert_eq!(Some(id("BIBUS", "shape1")), trip.shape_id);
    assert_eq!(Some(DirectionType::Outbound), trip.direction_id);
    // a block is scoped by the default agency, like services and shapes
    assert_eq!(Some(id("BIBUS", "B1")), trip.block_id);
    assert_eq!(None, gtfs.get_trip(&id("BIBUS", "trip2")).unwrap().block_id);
    assert_eq!("Trip BIBUS_trip1 to Plage", trip.to_string());

    let stop_times = gtfs.stop_times(&trip.id);
    assert_eq!(3, stop_times.len());
    assert_eq!(id("BIBUS", "stop2"), stop_times[0].stop_id);
    assert_eq!(Some(14 * 3600), stop_times[0].arrival_time);
    assert_eq!(TimepointType::Approximate, stop_times[1].timepoint);
    assert_eq!(None, stop_times[2].arrival_time);
    assert_eq!(PickupDropOffType::NotAvailable, stop_times[2].pickup_type);
    assert_eq!(TimepointType::Exact, stop_times[2].timepoint);

    let night = gtfs.stop_times(&id("BIBUS", "trip2"));
    assert_eq!(Some(25 * 3600 + 60), night[0].departure_time);

    // row ids follow the order of the file
    let row_ids: Vec<u32> = gtfs.iter::<StopTime>().map(|st| st.id).collect();
    assert_eq!(vec![1, 2, 3, 4], row_ids);
    assert!(gtfs.get::<StopTime>(&EntityKey::Row(2)).is_ok());
}

#[test]
fn read_shapes() {
    let gtfs = basic();
    let shape = gtfs.shape(&id("BIBUS", "shape1"));
    assert_eq!(2, shape.len());
    assert_eq!(1, shape[0].sequence);
    assert_eq!(37.61956, shape[0].latitude);
}

#[test]
fn read_calendar() {
    let gtfs = basic();
    let calendar = gtfs.get_calendar(&id("BIBUS", "service1")).unwrap();
    assert!(calendar.monday);
    assert!(!calendar.saturday);
    assert_eq!(NaiveDate::from_ymd_opt(2017, 1, 15).unwrap(), calendar.end_date);

    let dates: Vec<_> = gtfs.iter::<ServiceCalendarDate>().collect();
    assert_eq!(Exception::Deleted, dates[0].exception_type);
    assert_eq!(Exception::Added, dates[1].exception_type);
}

#[test]
fn trip_days() {
    let gtfs = basic();
    let start = NaiveDate::from_ymd_opt(2017, 1, 1).unwrap();
    // weekdays of the first two weeks, without the 2nd of January
    assert_eq!(
        vec![2, 3, 4, 5, 8, 9, 10, 11, 12],
        gtfs.trip_days(&id("BIBUS", "service1"), start)
    );
    // week-ends, plus the 3rd of January
    assert_eq!(
        vec![0, 2, 6, 7, 13, 14],
        gtfs.trip_days(&id("BIBUS", "service2"), start)
    );
}

#[test]
fn trip_days_too_far_from_start() {
    let gtfs = basic();
    // more than u16::MAX days before the service
    let start = NaiveDate::from_ymd_opt(1800, 1, 1).unwrap();
    assert!(gtfs.trip_days(&id("BIBUS", "service1"), start).is_empty());
    assert!(gtfs.trip_days(&id("BIBUS", "service2"), start).is_empty());
}

#[test]
fn read_fares() {
    let gtfs = basic();
    let fare = gtfs.get_fare_attribute(&id("BIBUS", "50")).unwrap();
    assert_eq!(1.5, fare.price);
    assert_eq!("EUR", fare.currency);
    assert_eq!(PaymentMethod::Aboard, fare.payment_method);
    assert_eq!(Transfers::Unlimited, fare.transfers);
    assert_eq!(Some(3600), fare.transfer_duration);

    let rule = gtfs.iter::<FareRule>().next().unwrap();
    assert_eq!(id("BIBUS", "50"), rule.fare_id);
    assert_eq!(Some(id("BIBUS", "1")), rule.route_id);
}

#[test]
fn read_pathways_transfers_frequencies() {
    let gtfs = basic();
    let pathway = gtfs.get_pathway(&id("BIBUS", "pw1")).unwrap();
    assert_eq!(id("BIBUS", "stop5"), pathway.from_stop_id);
    assert_eq!(PathwayMode::Walkway, pathway.mode);
    assert_eq!(PathwayDirectionType::Bidirectional, pathway.is_bidirectional);
    assert_eq!(Some(60), pathway.traversal_time);

    let transfer = gtfs.iter::<Transfer>().next().unwrap();
    assert_eq!(Some(id("BIBUS", "stop3")), transfer.from_stop_id);
    assert_eq!(TransferType::MinTime, transfer.transfer_type);
    assert_eq!(Some(120), transfer.min_transfer_time);
    assert_eq!(None, transfer.from_route_id);

    let frequency = gtfs.iter::<Frequency>().next().unwrap();
    assert_eq!(id("BIBUS", "trip1"), frequency.trip_id);
    assert_eq!(6 * 3600, frequency.start_time);
    assert_eq!(600, frequency.headway_secs);
    assert_eq!(ExactTimes::FrequencyBased, frequency.exact_times);
}

#[test]
fn read_feed_info_and_translations() {
    let gtfs = basic();
    let feed = gtfs.iter::<FeedInfo>().next().unwrap();
    assert_eq!("SNCF", feed.name);
    assert_eq!(
        Some(NaiveDate::from_ymd_opt(2017, 1, 1).unwrap()),
        feed.start_date
    );
    assert_eq!(Some("0.3".to_owned()), feed.version);

    let translation = gtfs.iter::<Translation>().next().unwrap();
    assert_eq!("Beach", translation.translation);
    assert_eq!(Some("stop4".to_owned()), translation.record_id);
    assert_eq!(1, translation.id);
}

#[test]
fn route_claims_its_agency() {
    let mut reader =
        GtfsReader::default().entity_types(vec![EntityType::Agency, EntityType::Route]);
    let mut source = MemorySource::default()
        .with_table(
            "agency.txt",
            agencies(&["A1,Metro,http://metro.example,Europe/Paris"]),
        )
        .with_table(
            "routes.txt",
            "route_id,agency_id,route_short_name,route_type\nR1,A1,1,3",
        );
    let mut gtfs = Gtfs::default();
    reader.run(&mut source, &mut gtfs).unwrap();

    assert_eq!("A1", reader.agency_for_entity(EntityType::Route, "R1").unwrap());
    assert!(gtfs.get_route(&id("A1", "R1")).is_ok());
}

#[test]
fn no_default_agency() {
    let mut reader = GtfsReader::default().entity_types(vec![EntityType::Route]);
    let mut source = MemorySource::default().with_table(
        "routes.txt",
        "route_id,agency_id,route_short_name,route_type\nR1,A1,1,3",
    );
    let mut gtfs = Gtfs::default();
    let err = reader.run(&mut source, &mut gtfs).unwrap_err();

    assert!(matches!(err, Error::NoDefaultAgencyId));
    assert_eq!(LoadState::Loading, reader.state());
    assert_eq!(StoreState::Open, gtfs.state());
    assert_eq!(0, gtfs.flush_count());
    assert!(matches!(
        reader.resolve_default_agency_id(),
        Err(Error::NoDefaultAgencyId)
    ));
}

#[test]
fn duplicate_stop_id() {
    let mut reader = GtfsReader::default()
        .default_agency_id("A")
        .entity_types(vec![EntityType::Stop]);
    let mut source = MemorySource::default()
        .with_table("stops.txt", "stop_id,stop_name\nS1,First\nS1,Second");
    let mut gtfs = Gtfs::default();
    let err = reader.run(&mut source, &mut gtfs).unwrap_err();

    assert!(matches!(
        err,
        Error::DuplicateEntity { entity_type: EntityType::Stop, ref id } if id.id == "S1"
    ));
    assert_eq!("duplicate entity id: type=Stop id=A_S1", err.to_string());
    // the first stop was saved before the failure
    assert_eq!("First", gtfs.get_stop(&id("A", "S1")).unwrap().name);
    assert_eq!("A", reader.agency_for_entity(EntityType::Stop, "S1").unwrap());
}

#[test]
fn duplicate_stop_id_overwritten() {
    let mut reader = GtfsReader::default()
        .default_agency_id("A")
        .overwrite_duplicates(true)
        .entity_types(vec![EntityType::Stop]);
    let mut source = MemorySource::default()
        .with_table("stops.txt", "stop_id,stop_name\nS1,First\nS1,Second");
    let mut gtfs = Gtfs::default();
    reader.run(&mut source, &mut gtfs).unwrap();

    assert_eq!(1, gtfs.count(EntityType::Stop));
    assert_eq!("Second", gtfs.get_stop(&id("A", "S1")).unwrap().name);

    // a second feed, with another default agency, claims the same stop id
    reader.set_default_agency_id("B");
    let mut other = MemorySource::default().with_table("stops.txt", "stop_id,stop_name\nS1,Other");
    reader.run(&mut other, &mut gtfs).unwrap();

    assert_eq!("B", reader.agency_for_entity(EntityType::Stop, "S1").unwrap());
    assert_eq!(2, gtfs.count(EntityType::Stop));
    assert_eq!("Other", gtfs.get_stop(&id("B", "S1")).unwrap().name);
}

#[test]
fn merged_feeds_share_their_ledgers() {
    let mut reader = GtfsReader::default()
        .default_agency_id("A")
        .entity_types(vec![EntityType::Stop]);
    let mut gtfs = Gtfs::default();
    let mut first = MemorySource::default().with_table("stops.txt", "stop_id,stop_name\nS1,First");
    reader.run(&mut first, &mut gtfs).unwrap();

    reader.set_default_agency_id("B");
    let mut second = MemorySource::default().with_table("stops.txt", "stop_id,stop_name\nS1,Other");
    let err = reader.run(&mut second, &mut gtfs).unwrap_err();
    assert!(matches!(
        err,
        Error::DuplicateEntity { entity_type: EntityType::Stop, .. }
    ));
    assert_eq!("A", reader.agency_for_entity(EntityType::Stop, "S1").unwrap());
}

#[test]
fn translated_agency_id() {
    let mut reader = GtfsReader::default()
        .agency_id_mapping("OLD", "NEW")
        .entity_types(vec![EntityType::Agency, EntityType::Route, EntityType::Stop]);
    let mut source = MemorySource::default()
        .with_table(
            "agency.txt",
            agencies(&["OLD,Old agency,http://old.example,Europe/Paris"]),
        )
        .with_table(
            "routes.txt",
            "route_id,agency_id,route_short_name,route_type\nR1,OLD,1,3",
        )
        .with_table("stops.txt", "stop_id,stop_name\nS1,Stop");
    let mut gtfs = Gtfs::default();
    reader.run(&mut source, &mut gtfs).unwrap();

    assert_eq!(Some("NEW"), reader.agencies()[0].id.as_deref());
    assert_eq!("NEW", reader.translate_agency_id("OLD"));
    assert!(gtfs.get_agency("NEW").is_ok());
    assert!(gtfs.get_agency("OLD").is_err());
    assert_eq!("NEW", reader.agency_for_entity(EntityType::Route, "R1").unwrap());
    assert_eq!("NEW", reader.agency_for_entity(EntityType::Stop, "S1").unwrap());
    assert_eq!("NEW", gtfs.get_route(&id("NEW", "R1")).unwrap().agency_id);
}

#[test]
fn reference_to_a_table_not_read_yet() {
    let mut reader = GtfsReader::default().entity_types(vec![
        EntityType::Agency,
        EntityType::Trip,
        EntityType::Route,
    ]);
    let mut source = MemorySource::default()
        .with_table(
            "agency.txt",
            agencies(&["A1,Metro,http://metro.example,Europe/Paris"]),
        )
        .with_table("trips.txt", "route_id,service_id,trip_id\nR1,S,T1")
        .with_table("routes.txt", "route_id,route_short_name,route_type\nR1,1,3");
    let mut gtfs = Gtfs::default();
    let err = reader.run(&mut source, &mut gtfs).unwrap_err();

    assert!(matches!(
        err,
        Error::ReferenceNotFound { entity_type: EntityType::Route, ref id } if id == "R1"
    ));
    assert_eq!(0, gtfs.count(EntityType::Route));
}

#[test]
fn agencies_are_deduplicated() {
    let mut reader = GtfsReader::default().entity_types(vec![EntityType::Agency]);
    let mut source = MemorySource::default().with_table(
        "agency.txt",
        agencies(&[
            "A1,Metro,http://metro.example,Europe/Paris",
            "A1,Metro renamed,http://metro.example,Europe/Paris",
            "A2,Bus,http://bus.example,Europe/Paris",
        ]),
    );
    let mut gtfs = Gtfs::default();
    let summary = reader.run(&mut source, &mut gtfs).unwrap();

    assert_eq!(2, reader.agencies().len());
    assert_eq!(2, gtfs.count(EntityType::Agency));
    assert_eq!(Some(&2), summary.entities.get(&EntityType::Agency));
    // the first values are kept
    assert_eq!("Metro", gtfs.get_agency("A1").unwrap().name);
    assert_eq!("A1", reader.resolve_default_agency_id().unwrap());
    assert_eq!("A1", reader.resolve_default_agency_id().unwrap());
}

#[test]
fn merge_with_known_agencies() {
    let known = |id: &str, name: &str| Agency {
        id: Some(id.to_owned()),
        name: name.to_owned(),
        ..Agency::default()
    };
    let mut reader = GtfsReader::default()
        .entity_types(vec![EntityType::Agency, EntityType::Route])
        .with_agencies(vec![known("A1", "Metro"), known("A2", "Bus")])
        .unwrap();
    let mut source = MemorySource::default()
        .with_table(
            "agency.txt",
            agencies(&["A2,Bus again,http://bus.example,Europe/Paris"]),
        )
        .with_table(
            "routes.txt",
            "route_id,agency_id,route_short_name,route_type
R1,A1,1,3
R2,A2,2,3
R3,,3,3",
        );
    let mut gtfs = Gtfs::default();
    let summary = reader.run(&mut source, &mut gtfs).unwrap();

    // A2 was already known: not saved again
    assert_eq!(0, gtfs.count(EntityType::Agency));
    assert_eq!(Some(&0), summary.entities.get(&EntityType::Agency));
    assert_eq!(vec!["A1", "A2"], summary.agencies);
    assert_eq!("Bus", reader.agencies()[1].name);

    // A1 is only known from the previous merge, and is the default agency
    assert_eq!("A1", gtfs.get_route(&id("A1", "R1")).unwrap().agency_id);
    assert_eq!("A2", gtfs.get_route(&id("A2", "R2")).unwrap().agency_id);
    assert_eq!("A1", gtfs.get_route(&id("A1", "R3")).unwrap().agency_id);

    let nameless = Agency {
        name: "No id".to_owned(),
        ..Agency::default()
    };
    assert!(matches!(
        GtfsReader::default().with_agencies(vec![known("A1", "Metro"), nameless]),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn agency_without_id() {
    let source = || {
        MemorySource::default().with_table(
            "agency.txt",
            agencies(&[",Metro,http://metro.example,Europe/Paris"]),
        )
    };

    let mut reader = GtfsReader::default().entity_types(vec![EntityType::Agency]);
    reader.run(&mut source(), &mut Gtfs::default()).unwrap();
    assert_eq!(Some("Metro"), reader.agencies()[0].id.as_deref());

    let mut reader = GtfsReader::default()
        .default_agency_id("CONF")
        .entity_types(vec![EntityType::Agency]);
    let mut gtfs = Gtfs::default();
    reader.run(&mut source(), &mut gtfs).unwrap();
    assert_eq!(Some("CONF"), reader.agencies()[0].id.as_deref());
    assert!(gtfs.get_agency("CONF").is_ok());
}

#[test]
fn agencies_from_several_scopes() {
    let mut reader = GtfsReader::default().entity_types(vec![
        EntityType::Agency,
        EntityType::Route,
        EntityType::Stop,
        EntityType::Trip,
        EntityType::FareAttribute,
    ]);
    let mut source = MemorySource::default()
        .with_table(
            "agency.txt",
            agencies(&[
                "A1,Metro,http://metro.example,Europe/Paris",
                "A2,Bus,http://bus.example,Europe/Paris",
            ]),
        )
        .with_table(
            "routes.txt",
            "route_id,agency_id,route_short_name,route_type\nR1,,1,1\nR2,A2,2,3",
        )
        .with_table("stops.txt", "stop_id,stop_name\nS1,Stop")
        .with_table("trips.txt", "route_id,service_id,trip_id\nR2,WEEK,T2")
        .with_table(
            "fare_attributes.txt",
            "fare_id,price,currency_type,payment_method,agency_id\nF1,2.5,EUR,1,A2",
        );
    let mut gtfs = Gtfs::default();
    reader.run(&mut source, &mut gtfs).unwrap();

    assert!(gtfs.get_route(&id("A1", "R1")).is_ok());
    assert!(gtfs.get_route(&id("A2", "R2")).is_ok());
    assert!(gtfs.get_stop(&id("A1", "S1")).is_ok());
    let trip = gtfs.get_trip(&id("A2", "T2")).unwrap();
    assert_eq!(id("A1", "WEEK"), trip.service_id);
    let fare = gtfs.get_fare_attribute(&id("A2", "F1")).unwrap();
    assert_eq!(PaymentMethod::PreBoarding, fare.payment_method);
}

#[test]
fn unknown_agency_reference() {
    let mut reader = GtfsReader::default().entity_types(vec![EntityType::Agency, EntityType::Route]);
    let mut source = MemorySource::default()
        .with_table(
            "agency.txt",
            agencies(&["A1,Metro,http://metro.example,Europe/Paris"]),
        )
        .with_table(
            "routes.txt",
            "route_id,agency_id,route_short_name,route_type\nR1,X,1,3",
        );
    let err = reader.run(&mut source, &mut Gtfs::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::ReferenceNotFound { entity_type: EntityType::Agency, ref id } if id == "X"
    ));
}

#[test]
fn missing_tables() {
    let mut reader = GtfsReader::default()
        .default_agency_id("A")
        .entity_types(vec![EntityType::Level, EntityType::Stop]);
    let mut gtfs = Gtfs::default();
    let err = reader
        .run(&mut MemorySource::default(), &mut gtfs)
        .unwrap_err();
    assert!(matches!(err, Error::MissingFile(ref f) if f == "stops.txt"));
    // the absent levels table was skipped and flushed
    assert_eq!(1, gtfs.flush_count());
}

#[test]
fn missing_required_field() {
    let mut reader = GtfsReader::default()
        .default_agency_id("A")
        .entity_types(vec![EntityType::Stop]);
    let mut source =
        MemorySource::default().with_table("stops.txt", "stop_id,stop_name\nS1,First\n  ,Second");
    let err = reader.run(&mut source, &mut Gtfs::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::MissingRequiredField { ref file_name, ref column, line: 3 }
            if file_name == "stops.txt" && column == "stop_id"
    ));

    let mut source = MemorySource::default().with_table("calendar_dates.txt", "service_id,date\nS,20200101");
    let err = GtfsReader::default()
        .default_agency_id("A")
        .entity_types(vec![EntityType::ServiceCalendarDate])
        .run(&mut source, &mut Gtfs::default())
        .unwrap_err();
    assert!(matches!(
        err,
        Error::MissingRequiredField { ref column, .. } if column == "exception_type"
    ));
}

#[test]
fn invalid_values() {
    let read_stops = |table: &str| {
        GtfsReader::default()
            .default_agency_id("A")
            .entity_types(vec![EntityType::Stop])
            .run(
                &mut MemorySource::default().with_table("stops.txt", table),
                &mut Gtfs::default(),
            )
    };

    let err = read_stops("stop_id,stop_lat\nS1,north").unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidValue { ref column, ref value, line: 2, .. } if column == "stop_lat" && value == "north"
    ));
    let err = read_stops("stop_id,stop_lat\nS1,\"48,8\"").unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidValue { ref column, .. } if column == "stop_lat"
    ));
    let err = read_stops("stop_id,location_type\nS1,1.5").unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidValue { ref column, .. } if column == "location_type"
    ));
    assert!(read_stops("stop_id,stop_lat\nS1,48.5").is_ok());
    // blank lines are counted in the line of the error
    let err = read_stops("stop_id,stop_lat\n\nS1,48.5\n\n\nS2,north\n").unwrap_err();
    assert!(matches!(err, Error::InvalidValue { line: 6, .. }), "{:?}", err);

    let mut source = MemorySource::default()
        .with_table("calendar_dates.txt", "service_id,date,exception_type\nS,20200101,3");
    let err = GtfsReader::default()
        .default_agency_id("A")
        .entity_types(vec![EntityType::ServiceCalendarDate])
        .run(&mut source, &mut Gtfs::default())
        .unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidValue { ref column, .. } if column == "exception_type"
    ));

    let mut source = MemorySource::default()
        .with_table("frequencies.txt", "trip_id,start_time,end_time,headway_secs\nT1,6h,7h,600");
    let err = GtfsReader::default()
        .default_agency_id("A")
        .entity_types(vec![EntityType::Frequency])
        .run(&mut source, &mut Gtfs::default())
        .unwrap_err();
    // the trip reference is checked before
    assert!(matches!(
        err,
        Error::ReferenceNotFound { entity_type: EntityType::Trip, .. }
    ));
}

#[test]
fn malformed_times() {
    let read_stop_times = |arrival: &str, departure: &str| {
        let mut source = MemorySource::default()
            .with_table("agency.txt", agencies(&["A,Metro,http://metro.example,Europe/Paris"]))
            .with_table("routes.txt", "route_id,route_type\nR1,3")
            .with_table("stops.txt", "stop_id,stop_name\nS1,Gare")
            .with_table("trips.txt", "route_id,service_id,trip_id\nR1,WK,T1")
            .with_table(
                "stop_times.txt",
                format!(
                    "trip_id,arrival_time,departure_time,stop_id,stop_sequence\nT1,{},{},S1,1",
                    arrival, departure
                ),
            );
        let mut gtfs = Gtfs::default();
        GtfsReader::default()
            .entity_types(vec![
                EntityType::Agency,
                EntityType::Route,
                EntityType::Stop,
                EntityType::Trip,
                EntityType::StopTime,
            ])
            .run(&mut source, &mut gtfs)
            .map(|_| gtfs)
    };

    let gtfs = read_stop_times("00:05:00", "1:00:00").unwrap();
    let stop_time = gtfs.iter::<StopTime>().next().unwrap();
    assert_eq!(Some(300), stop_time.arrival_time);
    assert_eq!(Some(3600), stop_time.departure_time);

    for (arrival, departure) in [("00:+5:00", "01:00:00"), ("00:05:00", "+1:00:00"), ("00:05:60", "01:00:00")] {
        let err = read_stop_times(arrival, departure).unwrap_err();
        assert!(
            matches!(err, Error::InvalidValue { ref file_name, line: 2, .. } if file_name == "stop_times.txt"),
            "{} {} gave {:?}",
            arrival,
            departure,
            err
        );
    }
}

#[test]
fn headers_without_prefix() {
    let mut reader = GtfsReader::default()
        .default_agency_id("A")
        .entity_types(vec![EntityType::Stop]);
    let mut source =
        MemorySource::default().with_table("stops.txt", "id,name,lat,lon\nS1,Gare,48.1,2.2");
    let mut gtfs = Gtfs::default();
    reader.run(&mut source, &mut gtfs).unwrap();

    let stop = gtfs.get_stop(&id("A", "S1")).unwrap();
    assert_eq!("Gare", stop.name);
    assert_eq!(Some(2.2), stop.longitude);
}

#[test]
fn store_calls() {
    let mut reader = GtfsReader::default().entity_types(vec![
        EntityType::Agency,
        EntityType::Zone,
        EntityType::Stop,
    ]);
    let mut source = MemorySource::default()
        .with_table(
            "agency.txt",
            agencies(&[
                "A1,Metro,http://metro.example,Europe/Paris",
                "A1,Metro,http://metro.example,Europe/Paris",
            ]),
        )
        .with_table("stops.txt", "stop_id,stop_name\nS1,One\nS2,Two");
    let mut store = RecordingStore::default();
    reader.run(&mut source, &mut store).unwrap();

    assert_eq!(
        vec![
            "open",
            "save Agency A1",
            "flush",
            "flush",
            "save Stop A1_S1",
            "save Stop A1_S2",
            "flush",
            "close",
        ],
        store.calls
    );
}

#[test]
fn store_calls_on_failure() {
    let mut reader = GtfsReader::default()
        .default_agency_id("A")
        .entity_types(vec![EntityType::Level, EntityType::Stop]);
    let mut source = MemorySource::default()
        .with_table("levels.txt", "level_id,level_index\nL0,0")
        .with_table("stops.txt", "stop_id,level_id\nS1,L1");
    let mut store = RecordingStore::default();
    let err = reader.run(&mut source, &mut store).unwrap_err();

    assert!(matches!(
        err,
        Error::ReferenceNotFound { entity_type: EntityType::Level, .. }
    ));
    assert_eq!(vec!["open", "save Level A_L0", "flush"], store.calls);
    assert_eq!(LoadState::Loading, reader.state());
}

#[test]
fn read_zip_with_sub_directory() {
    let tables = [
        ("agency.txt", agencies(&["A1,Metro,http://metro.example,Europe/Paris"])),
        (
            "routes.txt",
            "route_id,route_short_name,route_type\nR1,1,3".to_owned(),
        ),
        ("stops.txt", "\u{feff}stop_id,stop_name\nS1,Gare".to_owned()),
        ("trips.txt", "route_id,service_id,trip_id\nR1,WEEK,T1".to_owned()),
        (
            "stop_times.txt",
            "trip_id,arrival_time,departure_time,stop_id,stop_sequence\nT1,08:00:00,08:00:00,S1,1"
                .to_owned(),
        ),
    ];
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, content) in tables.iter() {
        zip.start_file(format!("feed/{}", name), options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    let mut archive = zip.finish().unwrap();
    archive.set_position(0);

    let mut source = ZipSource::new(archive).unwrap();
    let mut gtfs = Gtfs::default();
    let summary = GtfsReader::default().run(&mut source, &mut gtfs).unwrap();

    assert_eq!(64, summary.sha256.as_ref().map_or(0, String::len));
    assert!(summary.files.contains(&"feed/stops.txt".to_owned()));
    assert_eq!("Gare", gtfs.get_stop(&id("A1", "S1")).unwrap().name);
    let stop_times = gtfs.stop_times(&id("A1", "T1"));
    assert_eq!(Some(8 * 3600), stop_times[0].arrival_time);
}

#[test]
fn lookups_through_the_store() {
    let mut reader = GtfsReader::default();
    let gtfs = reader.read_from_path("fixtures/basic").unwrap();

    let stop = reader
        .entity(&gtfs, EntityType::Stop, &EntityKey::Composite(id("BIBUS", "stop1")))
        .unwrap();
    assert_eq!("Stop BIBUS_stop1", stop.to_string());
    assert!(matches!(
        reader.entity(&gtfs, EntityType::Stop, &EntityKey::Composite(id("BIBUS", ""))),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        reader.entity(&gtfs, EntityType::Stop, &EntityKey::Composite(id("BIBUS", "nope"))),
        Err(Error::ReferenceNotFound { .. })
    ));

    let resolver = reader.resolver();
    assert_eq!(id("BIBUS", "trip2"), resolver.resolve(EntityType::Trip, "trip2").unwrap());
    match resolver.entity(&gtfs, EntityType::Route, "2").unwrap() {
        Entity::Route(route) => assert_eq!("Centre - Port", route.long_name),
        other => panic!("unexpected entity {}", other),
    }
    assert!(matches!(
        resolver.entity(&gtfs, EntityType::Route, ""),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        resolver.agency_for(EntityType::Trip, "trip3"),
        Err(Error::ReferenceNotFound { .. })
    ));
}

#[test]
fn reader_from_config() {
    let config = ReaderConfig {
        default_agency_id: Some("CONF".to_owned()),
        agency_id_mapping: vec![("OLD".to_owned(), "NEW".to_owned())]
            .into_iter()
            .collect(),
        overwrite_duplicates: true,
        entity_types: Some(vec!["agency".to_owned(), "stops.txt".to_owned()]),
        trim_fields: Some(false),
        last_modified_time: Some(1_500_000_000_000),
    };
    let reader = GtfsReader::from_config(&config).unwrap();
    assert_eq!(vec![EntityType::Agency, EntityType::Stop], reader.entity_types);
    assert!(reader.overwrite_duplicates);
    assert!(!reader.trim_fields);
    assert_eq!("CONF", reader.resolve_default_agency_id().unwrap());
    assert_eq!("NEW", reader.translate_agency_id("OLD"));
    assert_eq!(Some(1_500_000_000_000), reader.last_modified_time);

    let mut reader = GtfsReader::default()
        .default_agency_id("A")
        .entity_types(vec![EntityType::Stop])
        .last_modified_time(42);
    let mut source = MemorySource::default().with_table("stops.txt", "stop_id\nS1");
    let summary = reader.run(&mut source, &mut Gtfs::default()).unwrap();
    assert_eq!(Some(42), summary.last_modified_time);

    let config = ReaderConfig {
        entity_types: Some(vec!["buses".to_owned()]),
        ..ReaderConfig::default()
    };
    assert!(matches!(
        GtfsReader::from_config(&config),
        Err(Error::UnknownEntityType(ref name)) if name == "buses"
    ));
}

#[test]
fn schema_registry() {
    assert_eq!(EntityType::LOAD_ORDER.len(), descriptors().len());
    for entity_type in EntityType::LOAD_ORDER.iter() {
        let descriptor = descriptor_for(*entity_type).unwrap();
        assert_eq!(*entity_type, descriptor.entity_type);
        assert!(descriptor.file_name.ends_with(".txt"));
    }
    assert_eq!(Some(EntityType::StopTime), EntityType::from_name("stop_times"));
    assert_eq!(Some(EntityType::Stop), EntityType::from_name("stops.txt"));
    assert_eq!(Some(EntityType::FareRule), EntityType::from_name("FareRule"));
    assert_eq!(None, EntityType::from_name("buses"));

    let required: Vec<_> = descriptors()
        .iter()
        .filter(|d| d.required)
        .map(|d| d.file_name)
        .collect();
    assert_eq!(
        vec!["agency.txt", "routes.txt", "stops.txt", "trips.txt", "stop_times.txt"],
        required
    );
}
