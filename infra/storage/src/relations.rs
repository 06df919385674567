//! Reverse relationships, computed from the foreign keys held by the owned side.
//!
//! Nothing here is cached: every call rescans the registry, so results always reflect
//! the current state, including deletes.

use crate::engine::{Storage, sort_by_creation, unlink_everywhere};
use hbnb_domain::models::{Amenity, BelongsTo, Model, Place};
use tracing::debug;

impl Storage {
    /// Every `Child` whose foreign key points at `owner_id`, oldest first.
    ///
    /// ```rust
    /// # use hbnb_domain::models::{City, NewCity, NewState, State};
    /// # async fn run(storage: hbnb_storage::Storage) {
    /// let state = State::new(NewState { name: "California".to_owned() });
    /// let city = City::new(&state.meta.id, NewCity { name: "Fresno".to_owned() });
    /// storage.register(&state);
    /// storage.register(&city);
    ///
    /// let cities = storage.children::<State, City>(&state.meta.id);
    /// assert_eq!(cities, vec![city]);
    /// # }
    /// ```
    #[must_use]
    pub fn children<Owner, Child>(&self, owner_id: &str) -> Vec<Child>
    where
        Owner: Model,
        Child: BelongsTo<Owner>,
    {
        let mut children: Vec<Child> = self
            .registry
            .read()
            .models::<Child>()
            .filter(|child| child.owner_id() == owner_id)
            .cloned()
            .collect();
        sort_by_creation(&mut children);
        children
    }

    /// The `Owner` referenced by `child`, if it still exists.
    #[must_use]
    pub fn owner<Owner, Child>(&self, child: &Child) -> Option<Owner>
    where
        Owner: Model,
        Child: BelongsTo<Owner>,
    {
        self.get::<Owner>(child.owner_id())
    }

    /// Amenities linked to the place; `None` when the place does not exist.
    /// Links to deleted amenities are skipped.
    #[must_use]
    pub fn amenities_of(&self, place_id: &str) -> Option<Vec<Amenity>> {
        let registry = self.registry.read();
        let place = registry.find::<Place>(place_id)?;
        let mut amenities: Vec<Amenity> =
            place.amenity_ids.iter().filter_map(|id| registry.find::<Amenity>(id)).cloned().collect();
        sort_by_creation(&mut amenities);
        Some(amenities)
    }

    /// Places linked to the amenity, oldest first.
    #[must_use]
    pub fn places_with_amenity(&self, amenity_id: &str) -> Vec<Place> {
        let mut places: Vec<Place> = self
            .registry
            .read()
            .models::<Place>()
            .filter(|place| place.has_amenity(amenity_id))
            .cloned()
            .collect();
        sort_by_creation(&mut places);
        places
    }

    /// Links an existing amenity to an existing place.
    ///
    /// Returns `None` when either side is missing, `Some(true)` when the link was created and
    /// `Some(false)` when it already existed.
    pub fn link_amenity(&self, place_id: &str, amenity_id: &str) -> Option<bool> {
        let mut registry = self.registry.write();
        registry.find::<Amenity>(amenity_id)?;
        let place = registry.find_mut::<Place>(place_id)?;

        let linked = place.amenity_ids.insert(amenity_id.to_owned());
        if linked {
            place.touch();
        }
        drop(registry);

        if linked {
            self.mark_dirty();
            debug!(place = place_id, amenity = amenity_id, "Amenity linked");
        }
        Some(linked)
    }

    /// Removes a link. Returns `None` when the place is missing and `Some(false)` when the
    /// amenity was not linked.
    pub fn unlink_amenity(&self, place_id: &str, amenity_id: &str) -> Option<bool> {
        let mut registry = self.registry.write();
        let place = registry.find_mut::<Place>(place_id)?;

        let unlinked = place.amenity_ids.remove(amenity_id);
        if unlinked {
            place.touch();
        }
        drop(registry);

        if unlinked {
            self.mark_dirty();
            debug!(place = place_id, amenity = amenity_id, "Amenity unlinked");
        }
        Some(unlinked)
    }

    /// Removes the amenity from every place it is linked to; returns how many places changed.
    pub fn unlink_amenity_everywhere(&self, amenity_id: &str) -> usize {
        let changed = unlink_everywhere(&mut self.registry.write(), amenity_id);
        if changed > 0 {
            self.mark_dirty();
        }
        changed
    }
}
