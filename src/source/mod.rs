//! Sources are the named categories that incomes and outcomes are
//! attributed to, e.g. 'Salary' or 'Rent'.

mod db;
mod domain;
mod routes;

pub use db::{
    create_source, create_source_table, delete_source, get_all_sources, get_source,
    source_exists, source_in_use, update_source,
};
pub use domain::{Source, SourceData, SourceName};
pub use routes::{SourceEndpointState, router};
