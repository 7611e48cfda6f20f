//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/sources/{id}', use
//! [format_endpoint].

/// The route for logging in a user and receiving a bearer token.
pub const LOG_IN: &str = "/api/login";
/// The route for reading the identity of the authenticated user.
pub const AUTH: &str = "/api/auth";

/// The route to access sources.
pub const SOURCES: &str = "/api/sources";
/// The route to access a single source.
pub const SOURCE: &str = "/api/sources/{id}";

/// The route to access users.
pub const USERS: &str = "/api/users";
/// The route to access a single user.
pub const USER: &str = "/api/users/{id}";

/// The set of routes shared by the income and outcome collections.
pub struct EntryEndpoints {
    /// The collection route for listing and creating records.
    pub collection: &'static str,
    /// The route for a single record.
    pub item: &'static str,
    /// The route for the sum over all records.
    pub total: &'static str,
    /// The route for the sum over one calendar month.
    pub total_by_month: &'static str,
    /// The route for the sum over one calendar year.
    pub total_by_year: &'static str,
    /// The route for the sum over an arbitrary inclusive date range.
    pub total_by_range: &'static str,
    /// The route for listing the records attributed to one source.
    pub by_source: &'static str,
}

/// The routes for income records.
pub const INCOMES: EntryEndpoints = EntryEndpoints {
    collection: "/api/incomes",
    item: "/api/incomes/{id}",
    total: "/api/incomes/total",
    total_by_month: "/api/incomes/total/month/{year}/{month}",
    total_by_year: "/api/incomes/total/year/{year}",
    total_by_range: "/api/incomes/total/range",
    by_source: "/api/incomes/by-source/{source_id}",
};

/// The routes for outcome records.
pub const OUTCOMES: EntryEndpoints = EntryEndpoints {
    collection: "/api/outcomes",
    item: "/api/outcomes/{id}",
    total: "/api/outcomes/total",
    total_by_month: "/api/outcomes/total/month/{year}/{month}",
    total_by_year: "/api/outcomes/total/year/{year}",
    total_by_range: "/api/outcomes/total/range",
    by_source: "/api/outcomes/by-source/{source_id}",
};

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/sources/{id}', '{id}' is the
/// parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::{EntryEndpoints, format_endpoint};

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    fn assert_entry_endpoints_are_valid_uris(entry_endpoints: &EntryEndpoints) {
        assert_endpoint_is_valid_uri(entry_endpoints.collection);
        assert_endpoint_is_valid_uri(entry_endpoints.item);
        assert_endpoint_is_valid_uri(entry_endpoints.total);
        assert_endpoint_is_valid_uri(entry_endpoints.total_by_month);
        assert_endpoint_is_valid_uri(entry_endpoints.total_by_year);
        assert_endpoint_is_valid_uri(entry_endpoints.total_by_range);
        assert_endpoint_is_valid_uri(entry_endpoints.by_source);
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::LOG_IN);
        assert_endpoint_is_valid_uri(endpoints::AUTH);
        assert_endpoint_is_valid_uri(endpoints::SOURCES);
        assert_endpoint_is_valid_uri(endpoints::SOURCE);
        assert_endpoint_is_valid_uri(endpoints::USERS);
        assert_endpoint_is_valid_uri(endpoints::USER);

        assert_entry_endpoints_are_valid_uris(&endpoints::INCOMES);
        assert_entry_endpoints_are_valid_uris(&endpoints::OUTCOMES);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint("/api/sources/{id}", 1);

        assert_eq!(formatted_path, "/api/sources/1");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/api/sources", 1);

        assert_eq!(formatted_path, "/api/sources");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
