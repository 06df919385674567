#![allow(dead_code, unreachable_pub)]

use hbnb_domain::models::{
    Amenity, City, NewAmenity, NewCity, NewPlace, NewReview, NewState, NewUser, Place, Review,
    State, User,
};
use hbnb_storage::Storage;

pub fn state(storage: &Storage, name: &str) -> State {
    let state = State::new(NewState { name: name.to_owned() });
    storage.register(&state);
    state
}

pub fn city(storage: &Storage, state: &State, name: &str) -> City {
    let city = City::new(&state.meta.id, NewCity { name: name.to_owned() });
    storage.register(&city);
    city
}

pub fn user(storage: &Storage, email: &str) -> User {
    let user = User::new(NewUser {
        email: email.to_owned(),
        password: "secret".to_owned(),
        first_name: None,
        last_name: None,
    });
    storage.register(&user);
    user
}

pub fn place(storage: &Storage, city: &City, user: &User, name: &str) -> Place {
    let place = Place::new(
        &city.meta.id,
        NewPlace {
            user_id: user.meta.id.clone(),
            name: name.to_owned(),
            description: None,
            number_rooms: 1,
            number_bathrooms: 1,
            max_guest: 2,
            price_by_night: 80,
            latitude: None,
            longitude: None,
        },
    );
    storage.register(&place);
    place
}

pub fn amenity(storage: &Storage, name: &str) -> Amenity {
    let amenity = Amenity::new(NewAmenity { name: name.to_owned() });
    storage.register(&amenity);
    amenity
}

pub fn review(storage: &Storage, place: &Place, user: &User, text: &str) -> Review {
    let review = Review::new(
        &place.meta.id,
        NewReview { user_id: user.meta.id.clone(), text: text.to_owned() },
    );
    storage.register(&review);
    review
}

pub async fn memory() -> Storage {
    Storage::builder().memory().connect().await.expect("memory storage")
}
