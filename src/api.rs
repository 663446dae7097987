mod interface;

pub use interface::{
    DirectionsProvider, DynDirections, DynGeocoder, DynMapSurface, DynNotifier, Geocoder,
    MapSurface, Notifier,
};
