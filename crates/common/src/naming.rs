//! Identifier conversions shared by the parser and the generator
//!
//! Resource names come from path segments (`internalNetworks` ->
//! `internal_network`) and field names from property keys
//! (`isGlobal` -> `is_global`). Generated identifiers are the PascalCase
//! form of those snake names.

/// Convert camelCase or PascalCase to snake_case
///
/// An underscore is inserted at every lowercase/digit to uppercase
/// boundary. Hyphens, spaces and dots become underscores.
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev: Option<char> = None;

    for ch in s.chars() {
        if ch == '-' || ch == ' ' || ch == '.' || ch == '_' {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
        } else if ch.is_uppercase() {
            let boundary = prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit());
            if boundary && !result.ends_with('_') {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
        prev = Some(ch);
    }

    result.trim_end_matches('_').to_string()
}

/// Convert snake_case to PascalCase
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Convert snake_case to camelCase
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Segments that end in "s" without being plurals
const INVARIANT_SEGMENTS: &[&str] = &["whois", "dns"];

/// Strip a single trailing plural "s"
///
/// Words ending in "ss" or "us" (`access`, `status`) and the segments in
/// [`INVARIANT_SEGMENTS`] are left alone.
pub fn singularize(segment: &str) -> &str {
    let lower = segment.to_ascii_lowercase();
    if lower.len() <= 1
        || !lower.ends_with('s')
        || lower.ends_with("ss")
        || lower.ends_with("us")
        || INVARIANT_SEGMENTS.contains(&lower.as_str())
    {
        return segment;
    }
    &segment[..segment.len() - 1]
}

/// Last non-empty segment of a URL path
pub fn last_segment(path: &str) -> Option<&str> {
    path.split('/').rev().find(|s| !s.is_empty())
}

/// Derive a resource name from a collection path
///
/// `/api/internalNetworks` -> `internal_network`. Returns an empty string
/// for the root path.
pub fn resource_name_from_path(path: &str) -> String {
    last_segment(path)
        .map(|segment| to_snake_case(singularize(segment)))
        .unwrap_or_default()
}

/// Collection prefix of an item path: everything before the first `{`,
/// without the trailing slash
pub fn item_path_prefix(path: &str) -> &str {
    let prefix = path.split('{').next().unwrap_or(path);
    prefix.trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("isGlobal"), "is_global");
        assert_eq!(to_snake_case("InternalNetwork"), "internal_network");
        assert_eq!(to_snake_case("ipv4Address"), "ipv4_address");
        assert_eq!(to_snake_case("v2Token"), "v2_token");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
        assert_eq!(to_snake_case("some-resource"), "some_resource");
        assert_eq!(to_snake_case("dns.server"), "dns_server");
        assert_eq!(to_snake_case("whois"), "whois");
    }

    #[test]
    fn test_acronyms_only_split_on_lower_to_upper() {
        assert_eq!(to_snake_case("HTTPServer"), "httpserver");
        assert_eq!(to_snake_case("serverIP"), "server_ip");
    }

    #[test]
    fn test_to_pascal_and_camel_case() {
        assert_eq!(to_pascal_case("is_global"), "IsGlobal");
        assert_eq!(to_pascal_case("internal_network"), "InternalNetwork");
        assert_eq!(to_pascal_case("id"), "Id");
        assert_eq!(to_camel_case("internal_network"), "internalNetwork");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn test_singularize() {
        assert_eq!(singularize("widgets"), "widget");
        assert_eq!(singularize("internalnetworks"), "internalnetwork");
        assert_eq!(singularize("whois"), "whois");
        assert_eq!(singularize("status"), "status");
        assert_eq!(singularize("access"), "access");
        assert_eq!(singularize("profile"), "profile");
        assert_eq!(singularize("s"), "s");
        assert_eq!(singularize("apis"), "api");
        assert_eq!(singularize("kpis"), "kpi");
        assert_eq!(singularize("WhoIs"), "WhoIs");
    }

    #[test]
    fn test_resource_name_from_path() {
        assert_eq!(resource_name_from_path("/widgets"), "widget");
        assert_eq!(resource_name_from_path("/internalnetworks"), "internalnetwork");
        assert_eq!(resource_name_from_path("/api/v1/internalNetworks/"), "internal_network");
        assert_eq!(resource_name_from_path("/tools/whois"), "whois");
        assert_eq!(resource_name_from_path("/"), "");
    }

    #[test]
    fn test_name_depends_only_on_final_segment() {
        assert_eq!(
            resource_name_from_path("/v1/widgets"),
            resource_name_from_path("/v2/widgets")
        );
    }

    #[test]
    fn test_item_path_prefix() {
        assert_eq!(item_path_prefix("/widgets/{id}"), "/widgets");
        assert_eq!(item_path_prefix("/zones/{zone}/records/{id}"), "/zones");
        assert_eq!(item_path_prefix("/widgets"), "/widgets");
    }
}
