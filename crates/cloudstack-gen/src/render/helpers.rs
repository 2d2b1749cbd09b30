//! Helper functions for renderers emitting PHP sources and swagger annotations.

use crate::compile::SharedObjectRegistry;
use crate::model::{Field, ObjectVariable, Variable, DEFAULT_SINCE};

/// Doc descriptions wrap at this width.
const DOC_WRAP_WIDTH: usize = 100;

const RESPONSE_DATE_TAG: &str =
    "\\DateTime|string|null Value will try to be parsed as a \\DateTime, falling back to the raw string value if unable";
const JOB_RESULT_TAG: &str = "mixed Value will vary between async jobs";
const JOB_RESULT_FIELD: &str = "jobresult";

/// Leading indentation of a doc block line: `"    * "` plus trailing padding.
pub fn tag_indent(leading: usize, trailing: usize) -> String {
    format!("{} * {}", " ".repeat(leading), " ".repeat(trailing))
}

/// Escape double quotes for swagger annotation strings.
pub fn escape_swagger_string(s: &str) -> String {
    s.replace('"', "\"\"")
}

/// `@since` doc line; empty when the version is unknown.
pub fn since_tag_line(since: &str, indent: usize, newline: bool) -> String {
    if since == DEFAULT_SINCE {
        return String::new();
    }
    format!("{}@since {}{}", tag_indent(indent, 0), since, if newline { "\n" } else { "" })
}

/// `@required` / `@optional` doc line.
pub fn required_tag_line(required: bool, indent: usize, newline: bool) -> String {
    format!(
        "{}@{}{}",
        tag_indent(indent, 0),
        if required { "required" } else { "optional" },
        if newline { "\n" } else { "" }
    )
}

/// `snake_case_key` to `snakeCaseKey`.
pub fn clean_key(key: &str) -> String {
    let mut parts = key.split('_');
    let mut out = parts.next().unwrap_or_default().to_string();
    for part in parts {
        out.push_str(&crate::model::ucfirst(part));
    }
    out
}

/// `namespace ...;` statement for a sub-namespace of `root`.
pub fn namespace_stmt(root: &str, sub: &str) -> String {
    match (root.is_empty(), sub.is_empty()) {
        (true, true) => String::new(),
        (true, false) => format!("namespace {};", sub),
        (false, true) => format!("namespace {};", root),
        (false, false) => format!("namespace {}\\{};", root, sub),
    }
}

/// Namespace path of `sub` under `root`, optionally with a leading `\`.
pub fn namespace_path(root: &str, sub: &str, prefix: bool) -> String {
    let path = match (root.is_empty(), sub.is_empty()) {
        (true, true) => return String::new(),
        (true, false) => sub.to_string(),
        (false, true) => root.to_string(),
        (false, false) => format!("{}\\{}", root, sub),
    };
    if prefix {
        format!("\\{}", path)
    } else {
        path
    }
}

/// Effective class of an object: FQ name or short name.
pub fn determine_class(obj: &ObjectVariable, fq: bool) -> &str {
    if fq {
        obj.fq_name()
    } else {
        obj.class_name()
    }
}

/// Swagger name of a field: the object's definition name, or the field name.
pub fn determine_swagger_name(field: &Field, registry: &SharedObjectRegistry) -> String {
    match field {
        Field::Scalar(var) => var.name().to_string(),
        Field::Object(key) => registry
            .get(key)
            .map(|obj| obj.swagger_name().to_string())
            .unwrap_or_else(|| key.as_str().to_string()),
    }
}

/// `use` imports needed for overloaded classes reachable from `obj`.
pub fn find_imports(obj: &ObjectVariable, registry: &SharedObjectRegistry) -> Vec<String> {
    let mut imports = Vec::new();
    if let Some(overload) = obj.overload() {
        imports.push(overload.fq_name().trim_start_matches('\\').to_string());
    }
    for field in obj.properties() {
        if let Some(child) = field.as_object().and_then(|key| registry.get(key)) {
            for import in find_imports(child, registry) {
                if !imports.contains(&import) {
                    imports.push(import);
                }
            }
        }
    }
    imports
}

/// Doc block description: capitalised, wrapped, each line prefixed.
pub fn php_doc_description(description: &str, indent: usize) -> String {
    word_wrap(&crate::model::ucfirst(description), DOC_WRAP_WIDTH)
        .iter()
        .map(|line| format!("{} * {}", " ".repeat(indent), line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// PHP doc `@var` type of a field.
pub fn php_type_tag(field: &Field, registry: &SharedObjectRegistry) -> String {
    match field {
        Field::Scalar(var) => scalar_type_tag(var),
        Field::Object(key) => match registry.get(key) {
            Some(obj) if obj.variable().is_collection() => format!("{}[]", obj.php_type()),
            Some(obj) => obj.php_type().to_string(),
            None => "mixed".to_string(),
        },
    }
}

fn scalar_type_tag(var: &Variable) -> String {
    if var.in_response() {
        if var.is_date() {
            return RESPONSE_DATE_TAG.to_string();
        }
        if var.name() == JOB_RESULT_FIELD {
            return JOB_RESULT_TAG.to_string();
        }
    }

    let normalized = var.normalized_type();
    let tag = normalized.php_type();
    if tag != "array" && var.is_collection() {
        format!("{}[]", tag)
    } else {
        tag.to_string()
    }
}

/// PHP type hint of a field; empty when none applies.
pub fn php_type_hint(
    field: &Field,
    registry: &SharedObjectRegistry,
    nullable: bool,
    as_return: bool,
) -> String {
    let hint = match field {
        Field::Scalar(var) => scalar_type_hint(var),
        Field::Object(key) => match registry.get(key) {
            Some(obj) if obj.variable().is_collection() => "array",
            _ => "",
        },
    };

    if hint.is_empty() {
        return String::new();
    }

    let hint = if nullable { format!("?{}", hint) } else { hint.to_string() };
    if as_return {
        format!(": {}", hint)
    } else {
        hint
    }
}

fn scalar_type_hint(var: &Variable) -> &'static str {
    if var.in_response() && var.name() == JOB_RESULT_FIELD {
        return "";
    }
    if var.is_collection() {
        return "array";
    }
    if var.is_date() {
        return "";
    }
    match var.normalized_type().php_type() {
        "string" => "string",
        "int" | "integer" => "int",
        "double" => "float",
        "boolean" => "bool",
        _ => "",
    }
}

/// Greedy word wrap at spaces; words longer than `width` stay whole.
fn word_wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split(' ') {
            if !line.is_empty() && line.len() + 1 + word.len() > width {
                lines.push(std::mem::take(&mut line));
            } else if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::SchemaCompiler;
    use crate::config::GeneratorConfig;
    use crate::model::SharedObjectKey;
    use crate::source::{EventMap, RawField};
    use serde_json::json;

    fn response_var(name: &str, typ: &str) -> Field {
        let mut var = Variable::new(true, name);
        var.set_type(typ);
        Field::Scalar(var)
    }

    fn registry_with_nic() -> SharedObjectRegistry {
        let yaml = "namespace: Acme\noverloads:\n  - name: Nic\n    overload: \\Acme\\Models\\Nic\n";
        let config = GeneratorConfig::from_yaml_str(yaml).unwrap();
        let events = EventMap::default();
        let mut compiler = SchemaCompiler::new(&config, &events);
        let fields: Vec<RawField> = vec![serde_json::from_value(json!({"name": "id"})).unwrap()];
        compiler.resolve_shared_object("nic", Some("set"), &fields);
        compiler.resolve_shared_object("tags", Some("list"), &[]);
        compiler.finish().shared_objects
    }

    #[test]
    fn test_tag_lines() {
        assert_eq!(tag_indent(4, 0), "     * ");
        assert_eq!(tag_indent(4, 4), "     *     ");
        assert_eq!(since_tag_line("0.0", 4, true), "");
        assert_eq!(since_tag_line("4.2", 4, false), "     * @since 4.2");
        assert_eq!(required_tag_line(true, 4, true), "     * @required\n");
        assert_eq!(required_tag_line(false, 0, false), " * @optional");
    }

    #[test]
    fn test_escape_and_keys() {
        assert_eq!(escape_swagger_string(r#"the "id""#), r#"the ""id"""#);
        assert_eq!(clean_key("virtual_machine_id"), "virtualMachineId");
        assert_eq!(clean_key("id"), "id");
    }

    #[test]
    fn test_namespaces() {
        assert_eq!(namespace_stmt("", ""), "");
        assert_eq!(namespace_stmt("", "CloudStackRequest"), "namespace CloudStackRequest;");
        assert_eq!(namespace_stmt("Acme", ""), "namespace Acme;");
        assert_eq!(namespace_stmt("Acme", "CloudStackRequest"), "namespace Acme\\CloudStackRequest;");
        assert_eq!(namespace_path("Acme", "CloudStackResponse", true), "\\Acme\\CloudStackResponse");
        assert_eq!(namespace_path("", "CloudStackResponse", false), "CloudStackResponse");
        assert_eq!(namespace_path("", "", true), "");
    }

    #[test]
    fn test_scalar_type_tags() {
        let registry = SharedObjectRegistry::default();
        assert_eq!(php_type_tag(&response_var("created", "date"), &registry), RESPONSE_DATE_TAG);
        assert_eq!(php_type_tag(&response_var("jobresult", "responseobject"), &registry), JOB_RESULT_TAG);
        assert_eq!(php_type_tag(&response_var("details", "map"), &registry), "array");
        assert_eq!(php_type_tag(&response_var("anything", "responseobject"), &registry), "mixed[]");
        assert_eq!(php_type_tag(&response_var("count", "long"), &registry), "integer");

        let mut param = Variable::new(false, "startdate");
        param.set_type("date");
        assert_eq!(php_type_tag(&Field::Scalar(param), &registry), "\\DateTime");
    }

    #[test]
    fn test_scalar_type_hints() {
        let registry = SharedObjectRegistry::default();
        assert_eq!(php_type_hint(&response_var("id", "uuid"), &registry, false, false), "string");
        assert_eq!(php_type_hint(&response_var("count", "integer"), &registry, true, true), ": ?int");
        assert_eq!(php_type_hint(&response_var("ok", "boolean"), &registry, false, true), ": bool");
        assert_eq!(php_type_hint(&response_var("created", "date"), &registry, false, false), "");
        assert_eq!(php_type_hint(&response_var("jobresult", "list"), &registry, false, false), "");
        assert_eq!(php_type_hint(&response_var("ids", "list"), &registry, false, false), "array");
        assert_eq!(php_type_hint(&response_var("weird", "Nic"), &registry, false, false), "");
    }

    #[test]
    fn test_object_fields() {
        let registry = registry_with_nic();
        let nic = Field::Object(SharedObjectKey::new("nic"));
        let tags = Field::Object(SharedObjectKey::new("tags"));

        assert_eq!(php_type_tag(&nic, &registry), "\\Acme\\Models\\Nic[]");
        assert_eq!(php_type_tag(&tags, &registry), "\\Acme\\CloudStackResponse\\Tags[]");
        assert_eq!(php_type_hint(&nic, &registry, false, false), "array");
        assert_eq!(determine_swagger_name(&nic, &registry), "CloudStackNic");
        assert_eq!(determine_swagger_name(&tags, &registry), "CloudStackTags");
        assert_eq!(determine_swagger_name(&response_var("id", "uuid"), &registry), "id");

        let obj = registry.get_by_name("nic").unwrap();
        assert_eq!(determine_class(obj, true), "\\Acme\\Models\\Nic");
        assert_eq!(determine_class(obj, false), "Nic");
        assert_eq!(find_imports(obj, &registry), ["Acme\\Models\\Nic"]);
    }

    #[test]
    fn test_doc_description_wraps() {
        let long = "word ".repeat(30);
        let doc = php_doc_description(long.trim(), 4);
        let lines: Vec<&str> = doc.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("     * Word word"));
        assert!(lines.iter().all(|l| l.len() <= 100 + 7));
    }
}
