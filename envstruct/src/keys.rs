//! Derivation of environment variable names from field paths

use std::collections::BTreeSet;

/// Join a parent path and a field name with `.`
pub fn combine_name(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

/// Compute every environment variable name accepted for a field.
///
/// With a `custom_name` the result is exactly that name, untouched. Otherwise
/// the dotted `path` is spelled four ways (upper and lower case, with and
/// without an extra `_` at camel-case word boundaries); duplicates are removed
/// and the result is sorted.
///
/// ```
/// use envstruct::keys::derive_keys;
///
/// assert_eq!(
///     derive_keys("Cassandra.SslCert", None),
///     ["CASSANDRA_SSLCERT", "CASSANDRA_SSL_CERT", "cassandra_ssl_cert", "cassandra_sslcert"],
/// );
/// assert_eq!(derive_keys("Name", Some("myName")), ["myName"]);
/// ```
pub fn derive_keys(path: &str, custom_name: Option<&str>) -> Vec<String> {
    if let Some(name) = custom_name {
        return vec![name.to_string()];
    }

    let chars: Vec<char> = path.chars().collect();

    // `exploded` gets an extra underscore on word boundaries, `plain` does not
    let mut exploded = String::with_capacity(path.len() * 2);
    let mut plain = String::with_capacity(path.len());

    let mut wrote_underscore = false;
    for (i, &ch) in chars.iter().enumerate() {
        if ch == '.' {
            exploded.push('_');
            plain.push('_');
            wrote_underscore = true;
            continue;
        }

        if i > 0 && ch.is_uppercase() && !wrote_underscore && is_word_boundary(&chars, i) {
            exploded.push('_');
        }

        exploded.push(ch);
        plain.push(ch);
        wrote_underscore = false;
    }

    let keys: BTreeSet<String> = [
        exploded.to_uppercase(),
        exploded.to_lowercase(),
        plain.to_uppercase(),
        plain.to_lowercase(),
    ]
    .into_iter()
    .collect();

    keys.into_iter().collect()
}

fn is_word_boundary(chars: &[char], i: usize) -> bool {
    let prev_lower = chars[i - 1].is_lowercase();
    let next_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
    prev_lower || next_lower
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_path() {
        let keys = derive_keys("CassandraSslCert", None);
        assert_eq!(
            keys,
            [
                "CASSANDRASSLCERT",
                "CASSANDRA_SSL_CERT",
                "cassandra_ssl_cert",
                "cassandrasslcert"
            ]
        );
    }

    #[test]
    fn test_acronym_path() {
        let keys = derive_keys("CassandraSSLCert", None);
        assert_eq!(
            keys,
            [
                "CASSANDRASSLCERT",
                "CASSANDRA_SSL_CERT",
                "cassandra_ssl_cert",
                "cassandrasslcert"
            ]
        );
    }

    #[test]
    fn test_dotted_path() {
        let keys = derive_keys("Cassandra.SslCert", None);
        assert_eq!(
            keys,
            [
                "CASSANDRA_SSLCERT",
                "CASSANDRA_SSL_CERT",
                "cassandra_ssl_cert",
                "cassandra_sslcert"
            ]
        );

        let keys = derive_keys("Cassandra.SSLCert", None);
        assert_eq!(
            keys,
            [
                "CASSANDRA_SSLCERT",
                "CASSANDRA_SSL_CERT",
                "cassandra_ssl_cert",
                "cassandra_sslcert"
            ]
        );
    }

    #[test]
    fn test_single_word_collapses_to_two() {
        assert_eq!(derive_keys("Name", None), ["NAME", "name"]);
        assert_eq!(derive_keys("database_url", None), ["DATABASE_URL", "database_url"]);
    }

    #[test]
    fn test_snake_case_nested_path() {
        assert_eq!(
            derive_keys("mysql.database.user", None),
            ["MYSQL_DATABASE_USER", "mysql_database_user"]
        );
    }

    #[test]
    fn test_prefixed_path() {
        let path = combine_name("FOO", "Name");
        assert_eq!(path, "FOO.Name");
        assert_eq!(derive_keys(&path, None), ["FOO_NAME", "foo_name"]);
    }

    #[test]
    fn test_custom_name_is_literal() {
        assert_eq!(derive_keys("Log.Rotate", Some("logRotate")), ["logRotate"]);
    }

    #[test]
    fn test_output_is_sorted_and_unique() {
        for path in ["A", "NbWorkers", "MySQL.Database.User", "a.b.c", "HTTPServer"] {
            let keys = derive_keys(path, None);
            let mut sorted = keys.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(keys, sorted, "{path}");
            assert!((1..=4).contains(&keys.len()), "{path}");
        }
    }

    #[test]
    fn test_combine_name_without_parent() {
        assert_eq!(combine_name("", "Timeout"), "Timeout");
        assert_eq!(combine_name("MySQL", "Host"), "MySQL.Host");
    }
}
