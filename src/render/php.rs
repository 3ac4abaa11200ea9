//! PHP render backend.

use crate::render::{RenderBackend, RenderUnit};

/// Backend emitting HTML interleaved with PHP that reads field values from a
/// per-submission data array at runtime.
///
/// With the default data variable `fd`, a field named `applicant_name` is
/// read as `$fd['applicant_name']`.
#[derive(Debug)]
pub struct PhpBackend {
    /// Name of the PHP array variable holding submitted field values
    pub data_var: String,
}

impl PhpBackend {
    /// Create a backend reading values from `$<data_var>[...]`.
    pub fn new(data_var: &str) -> Self {
        Self {
            data_var: data_var.to_string(),
        }
    }
}

impl Default for PhpBackend {
    fn default() -> Self {
        Self::new("fd")
    }
}

impl RenderBackend for PhpBackend {
    fn value_variable(&self, unit: &RenderUnit<'_>) -> String {
        format!("${}['{}']", self.data_var, unit.name)
    }

    fn html_escape(&self, expr: &str) -> String {
        format!("htmlspecialchars({})", expr)
    }

    fn echo(&self, stmt: &str) -> String {
        format!("<?={}?>", stmt)
    }

    fn echo_if(&self, condition: &str, stmt: &str, escape: bool) -> String {
        let stmt = if escape {
            self.html_escape(stmt)
        } else {
            stmt.to_string()
        };
        self.echo(&format!("{} ? '' : {}", condition, stmt))
    }

    fn wrap_if(&self, condition: &str, markup: &str) -> String {
        format!("<?php if ({}):?>{}<?endif;?>", condition, markup)
    }

    fn value_attr(&self, unit: &RenderUnit<'_>) -> String {
        let var = self.value_variable(unit);
        self.echo_if(
            &format!("empty({})", var),
            &format!("'value=\"'.{}.'\"'", self.html_escape(&var)),
            false,
        )
    }

    fn value_content(&self, unit: &RenderUnit<'_>) -> String {
        let var = self.value_variable(unit);
        self.echo_if(&format!("empty({})", var), &var, true)
    }

    fn checked_attr(&self, unit: &RenderUnit<'_>) -> String {
        let var = self.value_variable(unit);
        self.echo_if(&format!("empty({})", var), "'checked'", false)
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
    fn test_value_variable() {
        let field = Field::new("ssn", FieldType::Text);
        let backend = PhpBackend::default();
        assert_eq!(backend.value_variable(&unit(&field, RenderKind::Text)), "$fd['ssn']");
    }

    #[test]
    fn test_custom_data_var() {
        let field = Field::new("ssn", FieldType::Text);
        let backend = PhpBackend::new("row");
        assert_eq!(backend.value_variable(&unit(&field, RenderKind::Text)), "$row['ssn']");
    }

    #[test]
    fn test_text_value_attr_is_php_code() {
        let field = Field::new("name", FieldType::Text);
        let html = PhpBackend::default().render(&unit(&field, RenderKind::Text)).unwrap();
        assert!(html.contains(
            "<?=empty($fd['name']) ? '' : 'value=\"'.htmlspecialchars($fd['name']).'\"'?>"
        ));
    }

    #[test]
    fn test_checkbox_checked_is_conditional() {
        let field = Field::new("agree", FieldType::Button);
        let html = PhpBackend::default().render(&unit(&field, RenderKind::Checkbox)).unwrap();
        assert!(html.contains("<?=empty($fd['agree']) ? '' : 'checked'?>"));
    }

    #[test]
    fn test_textarea_content_is_escaped() {
        let field = Field::new("notes", FieldType::Text);
        let html = PhpBackend::default().render(&unit(&field, RenderKind::Textarea)).unwrap();
        assert!(html
            .contains("<?=empty($fd['notes']) ? '' : htmlspecialchars($fd['notes'])?>"));
    }

    #[test]
    fn test_wrap_if() {
        let backend = PhpBackend::default();
        assert_eq!(
            backend.wrap_if("$x", "<b>y</b>"),
            "<?php if ($x):?><b>y</b><?endif;?>"
        );
    }
}
