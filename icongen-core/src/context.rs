//! Template context assembly and the named filter registry.
//!
//! The template engine is a collaborator: it gets a context object exposing
//! `enumName`, the sorted `icons` sequence, an optional `familyName`, and
//! the filter set registered under the names templates depend on. Helpers
//! check parameter kinds at this boundary; a value outside a filter's
//! domain fails the render.

use handlebars::{
    Context as HbContext, Handlebars, Helper, HelperDef, RenderContext, RenderError, ScopedJson,
};
use serde_json::{json, Value};

use crate::error::Error;
use crate::filters::{self, EscapeStyle};
use crate::parser::IconSet;

/// Build the render context: icons sorted ascending by raw key, exposed as
/// `{key, value}` pairs. `familyName` is present only when the source knew it.
pub fn build_context(set: &IconSet, enum_name: &str) -> Value {
    let icons: Vec<Value> = set
        .icons
        .iter()
        .map(|(key, value)| json!({ "key": key, "value": value }))
        .collect();

    let mut context = json!({ "enumName": enum_name, "icons": icons });
    if let Some(family) = &set.family_name {
        context["familyName"] = Value::String(family.clone());
    }
    context
}

/// A registry with HTML escaping disabled and the filter set bound under
/// the names the templates use. The name-to-function binding here is a
/// contract; renaming a helper breaks every template in the wild.
pub fn renderer(style: EscapeStyle) -> Handlebars<'static> {
    let mut hb = Handlebars::new();
    hb.register_escape_fn(handlebars::no_escape);

    hb.register_helper("swiftIdentifier", Box::new(SwiftIdentifierHelper));
    hb.register_helper("stringToValidIdentifier", Box::new(SwiftIdentifierHelper));
    hb.register_helper("join", Box::new(JoinHelper));
    hb.register_helper("lowerFirstWord", Box::new(LowerFirstWordHelper));
    hb.register_helper("snakeToCamelCase", Box::new(SnakeToCamelCaseHelper));
    hb.register_helper("titlecase", Box::new(TitlecaseHelper));
    hb.register_helper("unicodeCase", Box::new(UnicodeCaseHelper { style }));
    hb.register_helper("hexToInt", Box::new(HexToIntHelper));
    hb.register_helper("int255toFloat", Box::new(Int255ToFloatHelper));
    hb.register_helper("percent", Box::new(PercentHelper));

    hb
}

/// Render a template source against an icon set.
pub fn render(
    template: &str,
    set: &IconSet,
    enum_name: &str,
    style: EscapeStyle,
) -> anyhow::Result<String> {
    let hb = renderer(style);
    let context = build_context(set, enum_name);
    Ok(hb.render_template(template, &context)?)
}

fn invalid_input(
    filter: &'static str,
    expected: &'static str,
    found: Option<&Value>,
) -> RenderError {
    let found = found.map_or_else(|| "nothing".to_string(), Value::to_string);
    RenderError::new(
        Error::InvalidInput {
            filter,
            expected,
            found,
        }
        .to_string(),
    )
}

fn param_str<'a>(h: &'a Helper, filter: &'static str) -> Result<&'a str, RenderError> {
    let value = h.param(0).map(|p| p.value());
    match value {
        Some(Value::String(s)) => Ok(s.as_str()),
        other => Err(invalid_input(filter, "a string", other)),
    }
}

fn string_result<'reg: 'rc, 'rc>(s: String) -> ScopedJson<'reg, 'rc> {
    ScopedJson::Derived(Value::String(s))
}

macro_rules! string_helper {
    ($struct_name:ident, $filter_name:literal, $apply:expr) => {
        struct $struct_name;

        impl HelperDef for $struct_name {
            fn call_inner<'reg: 'rc, 'rc>(
                &self,
                h: &Helper<'reg, 'rc>,
                _: &'reg Handlebars<'reg>,
                _: &'rc HbContext,
                _: &mut RenderContext<'reg, 'rc>,
            ) -> Result<ScopedJson<'reg, 'rc>, RenderError> {
                let raw = param_str(h, $filter_name)?;
                let apply: fn(&str) -> String = $apply;
                Ok(string_result(apply(raw)))
            }
        }
    };
}

string_helper!(
    SwiftIdentifierHelper,
    "swiftIdentifier",
    filters::string_to_valid_identifier
);
string_helper!(LowerFirstWordHelper, "lowerFirstWord", filters::lower_first_word);
string_helper!(
    SnakeToCamelCaseHelper,
    "snakeToCamelCase",
    filters::snake_to_camel_case
);
string_helper!(TitlecaseHelper, "titlecase", filters::titlecase);

struct UnicodeCaseHelper {
    style: EscapeStyle,
}

impl HelperDef for UnicodeCaseHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc HbContext,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'reg, 'rc>, RenderError> {
        let raw = param_str(h, "unicodeCase")?;
        Ok(string_result(filters::unicode_escape(raw, self.style)))
    }
}

struct JoinHelper;

impl HelperDef for JoinHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc HbContext,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'reg, 'rc>, RenderError> {
        let value = h.param(0).map(|p| p.value());
        let items = value
            .and_then(Value::as_array)
            .ok_or_else(|| invalid_input("join", "an array of strings", value))?;

        let mut parts = Vec::with_capacity(items.len());
        for item in items {
            parts.push(
                item.as_str()
                    .ok_or_else(|| invalid_input("join", "an array of strings", Some(item)))?,
            );
        }

        Ok(string_result(filters::join_strings(parts)))
    }
}

struct HexToIntHelper;

impl HelperDef for HexToIntHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc HbContext,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'reg, 'rc>, RenderError> {
        let raw = param_str(h, "hexToInt")?;
        // Non-hex input renders as nothing rather than failing, matching the
        // lenient contract templates rely on for unvalidated JSON sources.
        let parsed = filters::hex_to_int(raw).map_or(Value::Null, Value::from);
        Ok(ScopedJson::Derived(parsed))
    }
}

struct Int255ToFloatHelper;

impl HelperDef for Int255ToFloatHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc HbContext,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'reg, 'rc>, RenderError> {
        let value = h.param(0).map(|p| p.value());
        let n = value
            .and_then(Value::as_i64)
            .ok_or_else(|| invalid_input("int255toFloat", "an integer", value))?;
        Ok(ScopedJson::Derived(Value::from(
            filters::int255_to_unit_float(n),
        )))
    }
}

struct PercentHelper;

impl HelperDef for PercentHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc HbContext,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'reg, 'rc>, RenderError> {
        let value = h.param(0).map(|p| p.value());
        let f = value
            .and_then(Value::as_f64)
            .ok_or_else(|| invalid_input("percent", "a number", value))?;
        Ok(string_result(filters::to_percent_string(f)))
    }
}
