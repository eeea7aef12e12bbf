use apphost_domain::constants::ENV_KEY_SEPARATOR;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Deep-merges `overlay` into `base`: objects merge key by key, anything else replaces.
///
/// Object keys match case-insensitively; the base spelling is kept.
pub(crate) fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match find_key(base, &key) {
                    Some(existing) => {
                        if let Some(slot) = base.get_mut(&existing) {
                            merge(slot, value);
                        }
                    },
                    None => {
                        base.insert(key, value);
                    },
                }
            }
        },
        (base, overlay) => *base = overlay,
    }
}

/// Applies `{prefix}__Section__Key=value` variables to the document.
///
/// Returns the number of variables applied.
pub(crate) fn apply_env_overrides<I>(document: &mut Value, prefix: &str, vars: I) -> usize
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut matching: Vec<_> = vars
        .into_iter()
        .filter_map(|(name, raw)| strip_prefix(&name, prefix).map(|path| (path, raw)))
        .collect();
    matching.sort();

    let mut applied = 0;
    for (path, raw) in matching {
        let segments: Vec<_> = path.split(ENV_KEY_SEPARATOR).collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            warn!(prefix, path = %path, "Ignoring malformed settings override");
            continue;
        }

        if set_path(document, &segments, parse_scalar(&raw)) {
            debug!(key = %segments.join(":"), "Applied settings override from environment");
            applied += 1;
        } else {
            warn!(key = %segments.join(":"), "Ignoring settings override: parent is not an object");
        }
    }
    applied
}

fn strip_prefix(name: &str, prefix: &str) -> Option<String> {
    // Variable names may place a multi-byte character across either boundary.
    let candidate = name.get(..prefix.len())?;
    let rest = name.get(prefix.len()..)?.strip_prefix(ENV_KEY_SEPARATOR)?;

    candidate.eq_ignore_ascii_case(prefix).then(|| rest.to_owned())
}

fn set_path(document: &mut Value, segments: &[&str], value: Value) -> bool {
    let Some((last, parents)) = segments.split_last() else {
        return false;
    };

    let mut current = document;
    for segment in parents {
        let Value::Object(map) = current else {
            return false;
        };
        let key = find_key(map, segment).unwrap_or_else(|| (*segment).to_owned());
        current = map.entry(key).or_insert_with(|| Value::Object(Map::new()));
    }

    let Value::Object(map) = current else {
        return false;
    };
    let key = find_key(map, last).unwrap_or_else(|| (*last).to_owned());
    map.insert(key, value);
    true
}

fn find_key(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.keys().find(|existing| existing.eq_ignore_ascii_case(key)).cloned()
}

/// `30` -> number, `true` -> bool, `null` -> null, everything else -> string.
fn parse_scalar(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) if !value.is_object() && !value.is_array() => value,
        _ => Value::String(raw.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
    }

    #[test]
    fn merge_is_deep_and_case_insensitive() {
        let mut base =
            json!({ "ApiUrl": "a", "Logging": { "Level": "Information", "Console": true } });
        merge(&mut base, json!({ "logging": { "level": "Debug" }, "Extra": [1] }));

        assert_eq!(
            base,
            json!({ "ApiUrl": "a", "Logging": { "Level": "Debug", "Console": true }, "Extra": [1] })
        );
    }

    #[test]
    fn merge_replaces_non_objects() {
        let mut base = json!({ "Hosts": ["a", "b"] });
        merge(&mut base, json!({ "Hosts": ["c"] }));
        assert_eq!(base, json!({ "Hosts": ["c"] }));
    }

    #[test]
    fn overrides_match_existing_keys() {
        let mut document = json!({ "Timeout": 30, "Logging": { "Level": "Information" } });
        let applied = apply_env_overrides(
            &mut document,
            "APPHOST",
            vars(&[
                ("APPHOST__timeout", "45"),
                ("apphost__LOGGING__level", "Warning"),
                ("OTHER__Timeout", "1"),
                ("APPHOSTX__Timeout", "2"),
            ]),
        );

        assert_eq!(applied, 2);
        assert_eq!(document, json!({ "Timeout": 45, "Logging": { "Level": "Warning" } }));
    }

    #[test]
    fn overrides_create_missing_sections() {
        let mut document = json!({});
        apply_env_overrides(&mut document, "APPHOST", vars(&[("APPHOST__Cache__Enabled", "true")]));
        assert_eq!(document, json!({ "Cache": { "Enabled": true } }));
    }

    #[test]
    fn malformed_overrides_are_ignored() {
        let mut document = json!({ "Timeout": 30 });
        let applied = apply_env_overrides(
            &mut document,
            "APPHOST",
            vars(&[("APPHOST__", "x"), ("APPHOST__A____B", "y"), ("APPHOST__Timeout__Inner", "1")]),
        );

        assert_eq!(applied, 0);
        assert_eq!(document, json!({ "Timeout": 30 }));
    }

    #[test]
    fn non_ascii_names_are_skipped() {
        let mut document = json!({ "Timeout": 30 });
        let applied = apply_env_overrides(
            &mut document,
            "APPHOST",
            vars(&[("APPHOS\u{e9}_Timeout", "1"), ("APPHOST\u{e9}Timeout", "2"), ("\u{e9}", "3")]),
        );

        assert_eq!(applied, 0);
        assert_eq!(strip_prefix("APPHOST__Caf\u{e9}", "APPHOST").as_deref(), Some("Caf\u{e9}"));
        assert_eq!(document, json!({ "Timeout": 30 }));
    }

    #[test]
    fn scalars_fall_back_to_strings() {
        assert_eq!(parse_scalar("30"), json!(30));
        assert_eq!(parse_scalar("false"), json!(false));
        assert_eq!(parse_scalar("null"), Value::Null);
        assert_eq!(parse_scalar("https://example.com"), json!("https://example.com"));
        assert_eq!(parse_scalar("[1,2]"), json!("[1,2]"));
    }
}
