mod common;

use common::*;
use hbnb_domain::models::{EntityKind, Model, Place, PlaceFilter};
use hbnb_storage::Storage;
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Builds one state with `cities` cities, places spread over them and amenities linked by mask.
fn populate(storage: &Storage, cities: usize, places: &[(usize, u8)]) -> Vec<String> {
    let ca = state(storage, "California");
    let owner = user(storage, "o@hbnb.io");
    let cities: Vec<_> = (0..cities).map(|i| city(storage, &ca, &format!("City {i}"))).collect();
    let amenities: Vec<_> = (0..4).map(|i| amenity(storage, &format!("Amenity {i}"))).collect();

    for (i, (city_index, mask)) in places.iter().enumerate() {
        let place = place(storage, &cities[city_index % cities.len()], &owner, &format!("P{i}"));
        for (bit, amenity) in amenities.iter().enumerate() {
            if mask & (1u8 << bit) != 0 {
                storage.link_amenity(place.id(), amenity.id());
            }
        }
    }
    amenities.iter().map(|a| a.id().to_owned()).collect()
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread().build().expect("runtime")
}

proptest! {
    #[test]
    fn count_matches_all(cities in 1usize..4, places in prop::collection::vec((0usize..4, 0u8..16), 0..12)) {
        let storage = runtime().block_on(memory());
        populate(&storage, cities, &places);

        prop_assert_eq!(storage.count(Some(EntityKind::Place)), storage.all::<Place>().len());
        prop_assert_eq!(storage.count(Some(EntityKind::Place)), places.len());
        for kind in EntityKind::iter() {
            prop_assert_eq!(storage.count(Some(kind)), storage.all_records(Some(kind)).len());
        }
        prop_assert_eq!(storage.count(None), storage.all_records(None).len());
    }

    #[test]
    fn search_results_carry_every_requested_amenity(
        places in prop::collection::vec((0usize..3, 0u8..16), 1..12),
        wanted in 0u8..16,
    ) {
        let storage = runtime().block_on(memory());
        let amenity_ids = populate(&storage, 3, &places);
        let required: Vec<String> = amenity_ids
            .iter()
            .enumerate()
            .filter(|(bit, _)| wanted & (1u8 << bit) != 0)
            .map(|(_, id)| id.clone())
            .collect();

        let found = storage.search_places(&PlaceFilter { amenities: required.clone(), ..PlaceFilter::default() });
        let unique: BTreeSet<&str> = found.iter().map(Model::id).collect();
        prop_assert_eq!(unique.len(), found.len());

        let expected = places.iter().filter(|(_, mask)| mask & wanted == wanted).count();
        prop_assert_eq!(found.len(), expected);
        for place in &found {
            prop_assert!(required.iter().all(|id| place.has_amenity(id)));
        }
    }
}
