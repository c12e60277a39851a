//! Unit tests exercised through the public crate API

mod unit {
    mod engine;
    mod params;
}
