//! Root naming and key casing of rendered output.

use alloc::format;
use alloc::string::String;

use am_reflect::info::namespace;
use am_utils::text::{lower_camel, lower_first};
use serde_json::{Map, Value};

use crate::mapper::MapperPath;
use crate::options::KeyCase;

const MAPPER_SUFFIX: &str = "Mapper";

/// Derives the default root key of a mapper.
///
/// The `Mapper` suffix is stripped from the ident. A mapper nested below the
/// crate root is prefixed with its innermost module, so same-named mappers of
/// different modules get different roots.
///
/// ```
/// use am_mapper::MapperPath;
/// use am_mapper::key_transform::root_name;
///
/// assert_eq!(root_name(&MapperPath::parse("app::UserMapper")), "user");
/// assert_eq!(
///     root_name(&MapperPath::parse("app::actives_test::CamelKeyMapper")),
///     "activesTest/CamelKey",
/// );
/// ```
pub fn root_name(path: &MapperPath) -> String {
    let ident = path.ident();
    let base = match ident.strip_suffix(MAPPER_SUFFIX) {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => ident,
    };

    match path.module_path().and_then(namespace) {
        Some(namespace) => format!("{}/{base}", lower_camel(namespace)),
        None => lower_first(base),
    }
}

/// Rewrites every map key from `snake_case` to `lowerCamelCase`.
///
/// Recurses through maps and arrays of any depth, keeping order and length.
/// Other values are returned unchanged. Applying it twice is the same as
/// applying it once.
///
/// ```
/// use am_mapper::key_transform::camelize_keys;
/// use serde_json::json;
///
/// let params = json!({
///     "first_name": "Nathan",
///     "emails": [{ "email_professional": "nathan@fidme.com" }],
/// });
/// assert_eq!(
///     camelize_keys(params),
///     json!({
///         "firstName": "Nathan",
///         "emails": [{ "emailProfessional": "nathan@fidme.com" }],
///     }),
/// );
/// ```
pub fn camelize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(camelize_map(map)),
        Value::Array(items) => Value::Array(items.into_iter().map(camelize_keys).collect()),
        other => other,
    }
}

pub(crate) fn camelize_map(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .map(|(key, value)| (lower_camel(&key), camelize_keys(value)))
        .collect()
}

/// Applies a [`KeyCase`] to a rendered map.
pub(crate) fn apply_key_case(map: Map<String, Value>, case: KeyCase) -> Map<String, Value> {
    match case {
        KeyCase::LowerCamel => camelize_map(map),
        KeyCase::Preserve => map,
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn root_of_top_level_mapper() {
        assert_eq!(root_name(&MapperPath::parse("app::BusinessSectorMapper")), "businessSector");
        assert_eq!(root_name(&MapperPath::parse("UserMapper")), "user");
    }

    #[test]
    fn root_keeps_ident_without_suffix() {
        assert_eq!(root_name(&MapperPath::parse("app::Profile")), "profile");
        assert_eq!(root_name(&MapperPath::parse("app::Mapper")), "mapper");
    }

    #[test]
    fn root_of_nested_mapper_uses_innermost_module() {
        assert_eq!(root_name(&MapperPath::parse("app::api::v1::UserMapper")), "v1/User");
        assert_eq!(
            root_name(&MapperPath::parse("app::admin::UserMapperScopeAdmin")),
            "admin/UserMapperScopeAdmin"
        );
    }

    #[test]
    fn camelize_nested_structures() {
        let params = json!({
            "first_name": "Nathan",
            "emails": [{
                "email_private": "nathan@orange.fr",
                "email_professional": "nathan@fidme.com"
            }],
            "secret": {
                "password": "azerty",
                "password_confirmation": "azerty",
                "password_history": [{
                    "passwords": {
                        "first_password": "qwerty",
                        "actual_password": "azerty"
                    }
                }]
            }
        });

        let response = camelize_keys(params);
        assert_eq!(response["firstName"], "Nathan");
        assert_eq!(response["emails"][0]["emailProfessional"], "nathan@fidme.com");
        assert_eq!(response["secret"]["passwordConfirmation"], "azerty");
        assert_eq!(
            response["secret"]["passwordHistory"][0]["passwords"]["firstPassword"],
            "qwerty"
        );
    }

    #[test]
    fn camelize_is_idempotent_and_keeps_order() {
        let once = camelize_keys(json!({ "b_key": [1, { "c_d": null }], "a_key": "x" }));
        let keys: Vec<_> = once.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["bKey", "aKey"]);
        assert_eq!(camelize_keys(once.clone()), once);
    }

    #[test]
    fn scalars_are_untouched() {
        assert_eq!(camelize_keys(json!("snake_value")), json!("snake_value"));
        assert_eq!(camelize_keys(json!(null)), json!(null));
    }
}
