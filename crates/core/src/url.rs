//! URL template resolution.
//!
//! Templates carry `:name` or `{name}` placeholders. [`resolve`] substitutes
//! them at generation time; [`runtime_helper`] builds the `getUrl` function
//! that every generated module embeds to do the same in the browser.

use indexmap::IndexMap;

use crate::ir::types::{TsExpr, TsFunction, TsParam, TsPrimitive, TsStmt, TsType, VarKind};
use crate::ir::utils::make_string_record;

/// Name of the emitted helper.
pub const HELPER_NAME: &str = "getUrl";

/// Substitute every `:key` and `{key}` occurrence, for each key in order.
///
/// Placeholders without a matching key are left untouched.
pub fn resolve(template: &str, params: Option<&IndexMap<String, String>>) -> String {
    let Some(params) = params else {
        return template.to_string();
    };
    let mut resolved = template.to_string();
    for (key, value) in params {
        resolved = resolved
            .replace(&format!(":{key}"), value)
            .replace(&format!("{{{key}}}"), value);
    }
    resolved
}

/// List the placeholder names of a template in order of appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut names = Vec::new();
    for segment in template.split('/') {
        let name = if let Some(rest) = segment.strip_prefix(':') {
            rest
        } else if let Some(rest) = segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            rest
        } else {
            continue;
        };
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// The `getUrl(url, path?)` helper, the runtime twin of [`resolve`].
pub fn runtime_helper() -> TsFunction {
    let value_type = TsType::Union(vec![
        TsType::Primitive(TsPrimitive::String),
        TsType::Primitive(TsPrimitive::Number),
    ]);
    TsFunction {
        name: HELPER_NAME.to_string(),
        params: vec![
            TsParam {
                name: "url".to_string(),
                ty: Some(TsType::Primitive(TsPrimitive::String)),
                optional: false,
            },
            TsParam {
                name: "path".to_string(),
                ty: Some(make_string_record(value_type)),
                optional: true,
            },
        ],
        return_type: Some(TsType::Primitive(TsPrimitive::String)),
        body: vec![
            TsStmt::If {
                cond: "!path".to_string(),
                then_body: vec![TsStmt::Return(Some(TsExpr::ident("url")))],
            },
            TsStmt::VarDecl {
                kind: VarKind::Let,
                name: "resolved".to_string(),
                init: TsExpr::ident("url"),
            },
            TsStmt::Raw(
                "for (const key of Object.keys(path)) {\n  \
                 const value = String(path[key]);\n  \
                 resolved = resolved.split(`:${key}`).join(value).split(`{${key}}`).join(value);\n\
                 }"
                .to_string(),
            ),
            TsStmt::Return(Some(TsExpr::ident("resolved"))),
        ],
        is_export: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::emit::Emit;

    fn params(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_resolve_colon_placeholder() {
        let p = params(&[("id", "42")]);
        assert_eq!(resolve("/users/:id", Some(&p)), "/users/42");
    }

    #[test]
    fn test_resolve_brace_placeholder() {
        let p = params(&[("id", "42")]);
        assert_eq!(resolve("/users/{id}", Some(&p)), "/users/42");
    }

    #[test]
    fn test_resolve_every_occurrence() {
        let p = params(&[("id", "7"), ("tab", "posts")]);
        assert_eq!(
            resolve("/users/:id/:tab/{id}", Some(&p)),
            "/users/7/posts/7"
        );
    }

    #[test]
    fn test_resolve_without_params() {
        assert_eq!(resolve("/users/:id", None), "/users/:id");
        assert_eq!(resolve("/users", Some(&IndexMap::new())), "/users");
    }

    #[test]
    fn test_unmatched_placeholder_passes_through() {
        let p = params(&[("id", "42")]);
        assert_eq!(
            resolve("/orgs/:org/users/{id}", Some(&p)),
            "/orgs/:org/users/42"
        );
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(
            placeholders("/orgs/:org/users/{id}/:org"),
            vec!["org".to_string(), "id".to_string()]
        );
        assert!(placeholders("/health").is_empty());
    }

    #[test]
    fn test_runtime_helper_emission() {
        let code = runtime_helper().emit();
        assert!(code.starts_with(
            "function getUrl(url: string, path?: Record<string, string | number>): string {\n"
        ));
        assert!(code.contains("  if (!path) {\n    return url;\n  }\n"));
        assert!(code.contains("  let resolved = url;\n"));
        assert!(code.contains(
            "    resolved = resolved.split(`:${key}`).join(value).split(`{${key}}`).join(value);\n"
        ));
        assert!(code.ends_with("  return resolved;\n}\n"));
    }
}
