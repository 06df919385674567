use hbnb_domain::models::{
    BelongsTo, City, EntityKind, Model, NewCity, NewPlace, NewReview, NewState, NewUser, Place,
    PlaceFilter, PlacePatch, Record, Review, State, User, UserPatch,
};
use serde_json::json;

fn place() -> Place {
    Place::new(
        "city-1",
        NewPlace {
            user_id: "user-1".to_owned(),
            name: "Loft".to_owned(),
            description: None,
            number_rooms: 2,
            number_bathrooms: 1,
            max_guest: 4,
            price_by_night: 120,
            latitude: Some(37.77),
            longitude: None,
        },
    )
}

#[test]
fn record_serializes_flat_with_class_tag() {
    let state = State::new(NewState { name: "California".to_owned() });
    let value = serde_json::to_value(Record::from(state.clone())).expect("serialize");

    assert_eq!(value["__class__"], "State");
    assert_eq!(value["id"], state.id());
    assert_eq!(value["name"], "California");
    assert!(value["created_at"].is_string());
    assert!(value["updated_at"].is_string());
}

#[test]
fn record_survives_a_snapshot_cycle() {
    let mut place = place();
    place.amenity_ids.insert("wifi".to_owned());

    let text = serde_json::to_string(&Record::from(place.clone())).expect("serialize");
    let record: Record = serde_json::from_str(&text).expect("deserialize");

    let restored = Place::from_record(&record).expect("a place");
    assert_eq!(restored.id(), place.id());
    assert_eq!(restored.meta.created_at, place.meta.created_at);
    assert_eq!(restored.latitude, Some(37.77));
    assert!(restored.has_amenity("wifi"));
}

#[test]
fn place_defaults_apply_to_sparse_records() {
    let record: Record = serde_json::from_value(json!({
        "__class__": "Place",
        "id": "p1",
        "created_at": "2017-03-25T02:17:06.000000Z",
        "updated_at": "2017-03-25T02:17:06.000000Z",
        "name": "Cabin",
        "city_id": "c1",
        "user_id": "u1"
    }))
    .expect("deserialize");

    assert_eq!(record.kind(), EntityKind::Place);
    let place = Place::from_record(&record).expect("a place");
    assert_eq!(place.number_rooms, 0);
    assert_eq!(place.description, None);
    assert!(place.amenity_ids.is_empty());
}

#[test]
fn drafts_ignore_unknown_keys() {
    let draft: NewCity =
        serde_json::from_value(json!({ "name": "Fremont", "population": 230_000 })).expect("draft");
    let city = City::new("state-1", draft);

    assert_eq!(city.name, "Fremont");
    assert_eq!(BelongsTo::<State>::owner_id(&city), "state-1");
}

#[test]
fn patches_only_touch_present_fields() {
    let mut user = User::new(NewUser {
        email: "a@b.c".to_owned(),
        password: "pwd".to_owned(),
        first_name: Some("Ada".to_owned()),
        last_name: None,
    });
    user.apply(UserPatch { last_name: Some(Some("Lovelace".to_owned())), ..UserPatch::default() });

    assert_eq!(user.first_name.as_deref(), Some("Ada"));
    assert_eq!(user.last_name.as_deref(), Some("Lovelace"));
    assert_eq!(user.password, "pwd");
    assert_eq!(User::PRIVATE_FIELDS, &["password"]);

    let mut place = place();
    place.apply(PlacePatch { price_by_night: Some(99), ..PlacePatch::default() });
    assert_eq!(place.price_by_night, 99);
    assert_eq!(place.number_rooms, 2);
    assert_eq!(place.latitude, Some(37.77));
}

#[test]
fn null_in_a_patch_clears_nullable_fields() {
    let mut place = place();
    place.description = Some("Sunny".to_owned());
    place.longitude = Some(-122.41);
    let patch: PlacePatch =
        serde_json::from_str(r#"{"description": null, "latitude": null, "max_guest": 6}"#).unwrap();
    assert_eq!(patch.description, Some(None));
    assert_eq!(patch.longitude, None);

    place.apply(patch);
    assert_eq!(place.description, None);
    assert_eq!(place.latitude, None);
    assert_eq!(place.longitude, Some(-122.41));
    assert_eq!(place.max_guest, 6);

    let mut user = User::new(NewUser {
        email: "a@b.c".to_owned(),
        password: "pwd".to_owned(),
        first_name: Some("Ada".to_owned()),
        last_name: Some("Lovelace".to_owned()),
    });
    user.apply(serde_json::from_str::<UserPatch>(r#"{"first_name": null}"#).unwrap());
    assert_eq!(user.first_name, None);
    assert_eq!(user.last_name.as_deref(), Some("Lovelace"));
}

#[test]
fn null_search_axes_do_not_filter() {
    let filter: PlaceFilter =
        serde_json::from_str(r#"{"states": null, "cities": null, "amenities": []}"#).unwrap();
    assert!(filter.is_empty());
    assert_eq!(filter, PlaceFilter::default());
}

#[test]
fn review_belongs_to_place_and_user() {
    let review = Review::new(
        "place-1",
        NewReview { user_id: "user-1".to_owned(), text: "Great".to_owned() },
    );

    assert_eq!(BelongsTo::<Place>::owner_id(&review), "place-1");
    assert_eq!(BelongsTo::<User>::owner_id(&review), "user-1");
    assert!(Review::IMMUTABLE_FIELDS.contains(&"place_id"));
}
