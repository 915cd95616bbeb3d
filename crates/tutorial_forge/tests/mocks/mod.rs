pub mod datastore;
pub mod model;
