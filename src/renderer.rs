use crate::error::Result;
pub use cruet::{
    case::{
        camel::to_camel_case, kebab::to_kebab_case, pascal::to_pascal_case,
        screaming_snake::to_screaming_snake_case, snake::to_snake_case,
        table::to_table_case, train::to_train_case,
    },
    string::{pluralize::to_plural, singularize::to_singular},
    suffix::foreign_key::to_foreign_key,
};
use log::warn;
use minijinja::Environment;
use regex::Regex;
use serde_json::json;

/// Turns the raw contents of a template into the text that gets written.
///
/// The generator assumes nothing about what an implementation does with the
/// context. Any `Fn(&C, &str) -> Result<String>` is a renderer.
pub trait TemplateRenderer<C: ?Sized = serde_json::Value> {
    /// Renders `template` with the given `context`.
    ///
    /// # Arguments
    /// * `context` - Contextual information required when rendering
    /// * `template` - The contents of a template file
    ///
    /// # Returns
    /// * `Result<String>` - Rendered text
    fn render(&self, context: &C, template: &str) -> Result<String>;
}

impl<C: ?Sized, F> TemplateRenderer<C> for F
where
    F: Fn(&C, &str) -> Result<String>,
{
    fn render(&self, context: &C, template: &str) -> Result<String> {
        self(context, template)
    }
}

/// Writes templates out untouched, whatever the context.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityRenderer;

impl<C: ?Sized> TemplateRenderer<C> for IdentityRenderer {
    fn render(&self, _context: &C, template: &str) -> Result<String> {
        Ok(template.to_string())
    }
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
    /// Default context that will be merged with any provided context
    default_context: serde_json::Value,
}

fn regex_filter(val: &str, re: &str) -> bool {
    match Regex::new(re) {
        Ok(re) => re.is_match(val),
        Err(err) => {
            warn!("Invalid regex '{re}': {err}");
            false
        }
    }
}

impl MiniJinjaRenderer {
    /// Creates a new MiniJinjaRenderer instance with default environment.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        let default_context = json!({
            "platform": {
                "os": std::env::consts::OS,
                "family": std::env::consts::FAMILY,
                "arch": std::env::consts::ARCH,
            }
        });

        env.add_filter("camel_case", to_camel_case);
        env.add_filter("kebab_case", to_kebab_case);
        env.add_filter("pascal_case", to_pascal_case);
        env.add_filter("screaming_snake_case", to_screaming_snake_case);
        env.add_filter("snake_case", to_snake_case);
        env.add_filter("table_case", to_table_case);
        env.add_filter("train_case", to_train_case);
        env.add_filter("plural", to_plural);
        env.add_filter("singular", to_singular);
        env.add_filter("foreign_key", to_foreign_key);
        env.add_filter("regex", regex_filter);

        Self {
            env,
            default_context,
        }
    }

    /// The provided context wins over the defaults on key collisions.
    fn merge_context(&self, context: &serde_json::Value) -> serde_json::Value {
        match (self.default_context.as_object(), context.as_object()) {
            (Some(default_obj), Some(context_obj)) => {
                let mut result = default_obj.clone();
                for (key, value) in context_obj {
                    result.insert(key.clone(), value.clone());
                }
                serde_json::Value::Object(result)
            }
            _ => context.clone(),
        }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer<serde_json::Value> for MiniJinjaRenderer {
    fn render(&self, context: &serde_json::Value, template: &str) -> Result<String> {
        Ok(self.env.render_str(template, self.merge_context(context))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn render(template: &str, context: serde_json::Value) -> String {
        MiniJinjaRenderer::new().render(&context, template).unwrap()
    }

    #[test]
    fn identity_renderer_returns_input() {
        let out = IdentityRenderer.render(&json!({"foo": "bar"}), "{{ foo }}\n").unwrap();
        assert_eq!(out, "{{ foo }}\n");
    }

    #[test]
    fn closures_are_renderers() {
        let upper = |_: &(), text: &str| -> Result<String> { Ok(text.to_uppercase()) };
        assert_eq!(upper.render(&(), "abc").unwrap(), "ABC");
    }

    #[test]
    fn renders_context_values() {
        assert_eq!(render("hello {{ name }}", json!({"name": "world"})), "hello world");
    }

    #[test]
    fn keeps_trailing_newline() {
        assert_eq!(
            render("{\n  \"name\": \"{{ name }}\"\n}\n", json!({"name": "x"})),
            "{\n  \"name\": \"x\"\n}\n"
        );
    }

    #[test]
    fn exposes_platform_defaults() {
        assert_eq!(render("{{ platform.os }}", json!({})), std::env::consts::OS);
    }

    #[test]
    fn case_filters() {
        assert_eq!(render("{{ 'hello world' | snake_case }}", json!({})), "hello_world");
        assert_eq!(render("{{ 'hello world' | kebab_case }}", json!({})), "hello-world");
        assert_eq!(render("{{ 'hello world' | pascal_case }}", json!({})), "HelloWorld");
    }

    #[test]
    fn invalid_regex_is_false() {
        let template = "{% if 'hello' | regex(pattern) %}y{% else %}n{% endif %}";
        assert_eq!(render(template, json!({"pattern": "["})), "n");
        assert_eq!(render(template, json!({"pattern": "^h"})), "y");
    }

    #[test]
    fn syntax_errors_propagate() {
        let result = MiniJinjaRenderer::new().render(&json!({}), "{% if %}");
        assert!(matches!(result, Err(Error::MinijinjaError(_))));
    }
}
