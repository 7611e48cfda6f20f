//! Incomes and outcomes share one row shape, a dated monetary amount
//! attributed to a source. This module holds the domain types, queries and
//! routes for both, parameterized by [EntryTable].

mod db;
mod domain;
mod routes;

pub use db::{
    create_entry_table, delete_entry, get_all_entry_views, get_entry_view,
    get_entry_views_by_source, get_total, get_total_in_range, insert_entry, update_entry,
};
pub use domain::{Amount, DateRange, EntryData, EntryTable, EntryView, NewEntry};
pub use routes::{EntryEndpointState, router};
