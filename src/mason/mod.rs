//! Mason hypermedia machinery: documents, controls, the route table and
//! the domain control catalogue.

pub mod catalogue;
pub mod control;
pub mod document;
pub mod routes;
pub mod schema;

pub use catalogue::Catalogue;
pub use control::{Control, Method};
pub use document::{Document, MASON, error_document};
pub use routes::RouteTable;
