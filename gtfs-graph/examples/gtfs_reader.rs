use gtfs_graph::{AgencyAndId, EntityType, Gtfs, GtfsReader, MemorySource};

fn main() {
    /* The same reader loads the fixture, then a small extra feed whose agency id `OLD`
       is renamed to the agency of the fixture. Both end up in one store.
    */
    let mut reader = GtfsReader::default().agency_id_mapping("OLD", "BIBUS");
    let mut gtfs = Gtfs::default();
    reader
        .load_path("fixtures/basic", &mut gtfs)
        .expect("impossible to read gtfs");

    let mut extra = MemorySource::default()
        .with_table(
            "agency.txt",
            "agency_id,agency_name,agency_url,agency_timezone\nOLD,BIBUS,http://www.bibus.fr,Europe/Paris",
        )
        .with_table("stops.txt", "stop_id,stop_name,stop_lat,stop_lon\nstop10,Port,48.38,-4.49");
    let mut reader = reader.entity_types(vec![EntityType::Agency, EntityType::Stop]);
    reader.run(&mut extra, &mut gtfs).expect("impossible to merge");
    gtfs.print_stats();

    println!("there are {} stops in the gtfs", gtfs.count(EntityType::Stop));

    let route_1 = gtfs
        .get_route(&AgencyAndId::new("BIBUS", "1"))
        .expect("no route 1");
    println!("{}: {:?}", route_1.short_name, route_1);
}
