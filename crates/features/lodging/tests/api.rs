#![cfg(feature = "server")]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use hbnb_kernel::domain::models::{
    Amenity, City, NewAmenity, NewCity, NewPlace, NewState, NewUser, Place, State, User,
};
use hbnb_kernel::server::ApiState;
use hbnb_kernel::storage::Storage;
use serde_json::{Value, json};
use tower::ServiceExt;

struct Fixture {
    app: Router,
    storage: Storage,
    state: State,
    city: City,
    user: User,
}

async fn fixture() -> Fixture {
    let storage = Storage::builder().memory().connect().await.unwrap();
    let api = ApiState::builder().storage(storage.clone()).build().unwrap();
    let (app, _) = hbnb_lodging::router().with_state(api).split_for_parts();

    let state = State::new(NewState { name: "California".to_owned() });
    let city = City::new(&state.meta.id, NewCity { name: "San Francisco".to_owned() });
    let user = User::new(NewUser {
        email: "host@hbnb.io".to_owned(),
        password: "secret".to_owned(),
        first_name: None,
        last_name: None,
    });
    storage.register(&state);
    storage.register(&city);
    storage.register(&user);

    Fixture { app, storage, state, city, user }
}

impl Fixture {
    async fn call(&self, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let body = body.map_or_else(Body::empty, |raw| Body::from(raw.to_owned()));
        let request = Request::builder().method(method).uri(uri).body(body).unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn place(&self, name: &str) -> Place {
        let place = Place::new(
            &self.city.meta.id,
            NewPlace {
                user_id: self.user.meta.id.clone(),
                name: name.to_owned(),
                description: None,
                number_rooms: 1,
                number_bathrooms: 1,
                max_guest: 2,
                price_by_night: 90,
                latitude: None,
                longitude: None,
            },
        );
        self.storage.register(&place);
        place
    }

    fn amenity(&self, name: &str) -> Amenity {
        let amenity = Amenity::new(NewAmenity { name: name.to_owned() });
        self.storage.register(&amenity);
        amenity
    }
}

fn error(message: &str) -> Value {
    json!({ "error": message })
}

#[tokio::test]
async fn place_creation_validates_in_order() {
    let fx = fixture().await;
    let uri = format!("/cities/{}/places", fx.city.meta.id);

    let (status, _) = fx.call(Method::POST, "/cities/nope/places", Some("garbage")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = fx.call(Method::POST, &uri, Some("garbage")).await;
    assert_eq!((status, body), (StatusCode::BAD_REQUEST, error("Not a JSON")));

    let (status, body) = fx.call(Method::POST, &uri, Some(r#"{"name": "Loft"}"#)).await;
    assert_eq!((status, body), (StatusCode::BAD_REQUEST, error("Missing user_id")));

    let (status, body) =
        fx.call(Method::POST, &uri, Some(r#"{"user_id": "ghost", "name": "Loft"}"#)).await;
    assert_eq!((status, body), (StatusCode::NOT_FOUND, error("Not found")));

    let with_user = json!({ "user_id": fx.user.meta.id }).to_string();
    let (status, body) = fx.call(Method::POST, &uri, Some(&with_user)).await;
    assert_eq!((status, body), (StatusCode::BAD_REQUEST, error("Missing name")));

    let full = json!({ "user_id": fx.user.meta.id, "name": "Loft", "price_by_night": 120 });
    let (status, place) = fx.call(Method::POST, &uri, Some(&full.to_string())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(place["__class__"], "Place");
    assert_eq!(place["city_id"], fx.city.meta.id.as_str());
    assert_eq!(place["price_by_night"], 120);
    assert_eq!(place["number_rooms"], 0);

    let (_, listed) = fx.call(Method::GET, &uri, None).await;
    assert_eq!(listed, json!([place]));
}

#[tokio::test]
async fn place_update_ignores_ownership_keys() {
    let fx = fixture().await;
    let place = fx.place("Cabin");
    let uri = format!("/places/{}", place.meta.id);

    let (status, updated) = fx
        .call(
            Method::PUT,
            &uri,
            Some(r#"{"user_id": "other", "city_id": "other", "max_guest": 6, "latitude": 37.77}"#),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["user_id"], fx.user.meta.id.as_str());
    assert_eq!(updated["city_id"], fx.city.meta.id.as_str());
    assert_eq!(updated["max_guest"], 6);
    assert_eq!(updated["latitude"], 37.77);

    let (status, cleared) =
        fx.call(Method::PUT, &uri, Some(r#"{"latitude": null, "max_guest": 3}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cleared["latitude"], Value::Null);
    assert_eq!(cleared["max_guest"], 3);
    assert_eq!(fx.storage.get::<Place>(&place.meta.id).unwrap().latitude, None);

    let (status, body) = fx.call(Method::DELETE, &uri, None).await;
    assert_eq!((status, body), (StatusCode::OK, json!({})));
    let (status, _) = fx.call(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reviews_of_a_place() {
    let fx = fixture().await;
    let place = fx.place("Cabin");
    let uri = format!("/places/{}/reviews", place.meta.id);

    let (status, _) = fx.call(Method::GET, "/places/nope/reviews", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = fx.call(Method::POST, &uri, Some(r#"{"text": "Great"}"#)).await;
    assert_eq!((status, body), (StatusCode::BAD_REQUEST, error("Missing user_id")));

    let (status, _) =
        fx.call(Method::POST, &uri, Some(r#"{"user_id": "ghost", "text": "Great"}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let without_text = json!({ "user_id": fx.user.meta.id }).to_string();
    let (status, body) = fx.call(Method::POST, &uri, Some(&without_text)).await;
    assert_eq!((status, body), (StatusCode::BAD_REQUEST, error("Missing text")));

    let review = json!({ "user_id": fx.user.meta.id, "text": "Great stay" }).to_string();
    let (status, created) = fx.call(Method::POST, &uri, Some(&review)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["place_id"], place.meta.id.as_str());
    let review_id = created["id"].as_str().unwrap();

    let (_, listed) = fx.call(Method::GET, &uri, None).await;
    assert_eq!(listed, json!([created.clone()]));

    let (status, updated) = fx
        .call(Method::PUT, &format!("/reviews/{review_id}"), Some(r#"{"text": "Even better"}"#))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["text"], "Even better");

    let (status, _) = fx.call(Method::DELETE, &format!("/reviews/{review_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, listed) = fx.call(Method::GET, &uri, None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn amenity_links() {
    let fx = fixture().await;
    let place = fx.place("Cabin");
    let wifi = fx.amenity("Wifi");
    let link = format!("/places/{}/amenities/{}", place.meta.id, wifi.meta.id);

    let (status, body) = fx.call(Method::GET, &format!("/places/{}/amenities", place.meta.id), None).await;
    assert_eq!((status, body), (StatusCode::OK, json!([])));

    let (status, body) = fx.call(Method::DELETE, &link, None).await;
    assert_eq!((status, body), (StatusCode::NOT_FOUND, error("Not found")));

    let (status, linked) = fx.call(Method::POST, &link, None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(linked["name"], "Wifi");

    let (status, again) = fx.call(Method::POST, &link, None).await;
    assert_eq!((status, again), (StatusCode::OK, linked.clone()));

    let (_, listed) = fx.call(Method::GET, &format!("/places/{}/amenities", place.meta.id), None).await;
    assert_eq!(listed, json!([linked]));
    assert!(fx.storage.get::<Place>(&place.meta.id).unwrap().has_amenity(&wifi.meta.id));

    let (status, body) = fx.call(Method::DELETE, &link, None).await;
    assert_eq!((status, body), (StatusCode::OK, json!({})));

    let missing = format!("/places/{}/amenities/nope", place.meta.id);
    let (status, _) = fx.call(Method::POST, &missing, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = fx.call(Method::GET, "/places/nope/amenities", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_by_location_and_amenities() {
    let fx = fixture().await;
    fx.place("Cabin");
    let loft = fx.place("Loft");
    let wifi = fx.amenity("Wifi");
    assert_eq!(fx.storage.link_amenity(&loft.meta.id, &wifi.meta.id), Some(true));

    let names = |body: &Value| {
        let mut names: Vec<String> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|place| place["name"].as_str().unwrap().to_owned())
            .collect();
        names.sort();
        names
    };

    let (status, body) = fx.call(Method::POST, "/places_search", Some("{}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), ["Cabin", "Loft"]);

    let by_state = json!({ "states": [fx.state.meta.id] }).to_string();
    let (_, body) = fx.call(Method::POST, "/places_search", Some(&by_state)).await;
    assert_eq!(names(&body), ["Cabin", "Loft"]);

    let with_wifi =
        json!({ "cities": [fx.city.meta.id], "amenities": [wifi.meta.id] }).to_string();
    let (_, body) = fx.call(Method::POST, "/places_search", Some(&with_wifi)).await;
    assert_eq!(names(&body), ["Loft"]);
    assert_eq!(body[0]["id"], loft.meta.id.as_str());

    let null_axes = [r#"{"states": null}"#, r#"{"states": null, "cities": null, "amenities": []}"#];
    for null_axes in null_axes {
        let (status, body) = fx.call(Method::POST, "/places_search", Some(null_axes)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&body), ["Cabin", "Loft"]);
    }

    let unknown = json!({ "states": ["nowhere"] }).to_string();
    let (_, body) = fx.call(Method::POST, "/places_search", Some(&unknown)).await;
    assert_eq!(body, json!([]));

    let (status, body) = fx.call(Method::POST, "/places_search", Some("not json")).await;
    assert_eq!((status, body), (StatusCode::BAD_REQUEST, error("Not a JSON")));
}
