//! Jinja-style template render backend.

use crate::render::{RenderBackend, RenderUnit};

/// Backend emitting Jinja template syntax.
///
/// Only basic expressions, the `e` escape filter, and `{% if %}` blocks are
/// used, so the produced templates tend to work in other engines with a
/// similar syntax with little or no modification.
#[derive(Debug)]
pub struct JinjaBackend {
    /// Name of the template variable holding submitted field values
    pub data_var: String,
}

impl JinjaBackend {
    /// Create a backend reading values from `<data_var>[...]`.
    pub fn new(data_var: &str) -> Self {
        Self {
            data_var: data_var.to_string(),
        }
    }
}

impl Default for JinjaBackend {
    fn default() -> Self {
        Self::new("fd")
    }
}

impl RenderBackend for JinjaBackend {
    fn value_variable(&self, unit: &RenderUnit<'_>) -> String {
        format!("{}['{}']", self.data_var, unit.name)
    }

    fn html_escape(&self, expr: &str) -> String {
        format!("{} | e", expr)
    }

    fn echo(&self, stmt: &str) -> String {
        format!("{{{{{}}}}}", stmt)
    }

    fn echo_if(&self, condition: &str, stmt: &str, escape: bool) -> String {
        let stmt = if escape {
            self.html_escape(stmt)
        } else {
            stmt.to_string()
        };
        self.wrap_if(condition, &self.echo(&stmt))
    }

    fn wrap_if(&self, condition: &str, markup: &str) -> String {
        format!("{{% if {} %}}{}{{% endif %}}", condition, markup)
    }

    fn value_attr(&self, unit: &RenderUnit<'_>) -> String {
        let var = self.value_variable(unit);
        let value = self.echo(&self.html_escape(&var));
        self.wrap_if(&var, &format!("value='{}'", value))
    }

    fn value_content(&self, unit: &RenderUnit<'_>) -> String {
        let var = self.value_variable(unit);
        self.echo_if(&var, &var, true)
    }

    fn checked_attr(&self, unit: &RenderUnit<'_>) -> String {
        let var = self.value_variable(unit);
        self.wrap_if(&var, "checked")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{Field, FieldType};
    use crate::geometry::Rect;
    use crate::render::{PositionStyle, RenderKind};

    fn unit<'a>(field: &'a Field, kind: RenderKind) -> RenderUnit<'a> {
        RenderUnit {
            kind,
            field,
            name: field.qualified_name.clone(),
            label: field.alternate_name.clone(),
            style: PositionStyle::from_rect(&Rect::new(0.0, 0.0, 10.0, 10.0), 1.0),
        }
    }

    #[test]
    fn test_echo_braces() {
        let backend = JinjaBackend::default();
        assert_eq!(backend.echo("x"), "{{x}}");
    }

    #[test]
    fn test_text_value_attr() {
        let field = Field::new("name", FieldType::Text);
        let html = JinjaBackend::default().render(&unit(&field, RenderKind::Text)).unwrap();
        assert!(html.contains(
            "{% if fd['name'] %}value='{{fd['name'] | e}}'{% endif %}"
        ));
    }

    #[test]
    fn test_checkbox_checked_is_conditional() {
        let field = Field::new("agree", FieldType::Button);
        let html = JinjaBackend::default()
            .render(&unit(&field, RenderKind::Checkbox))
            .unwrap();
        assert!(html.contains("{% if fd['agree'] %}checked{% endif %}"));
    }

    #[test]
    fn test_textarea_content() {
        let field = Field::new("notes", FieldType::Text);
        let html = JinjaBackend::default()
            .render(&unit(&field, RenderKind::Textarea))
            .unwrap();
        assert!(html.contains("{% if fd['notes'] %}{{fd['notes'] | e}}{% endif %}"));
    }

    #[test]
    fn test_custom_data_var() {
        let field = Field::new("a", FieldType::Text);
        let backend = JinjaBackend::new("row");
        assert_eq!(backend.value_variable(&unit(&field, RenderKind::Text)), "row['a']");
    }
}
