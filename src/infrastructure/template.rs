use handlebars::Handlebars;

/// ランディングページのテンプレート本体。バイナリに同梱する。
const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

/// TemplateEngine は HTML ビューのレンダリングを担う。
/// テンプレートは起動時に一度だけ登録する。
pub struct TemplateEngine {
    registry: Handlebars<'static>,
}

impl TemplateEngine {
    pub fn new() -> anyhow::Result<Self> {
        let mut registry = Handlebars::new();
        registry.register_template_string("index", INDEX_TEMPLATE)?;
        Ok(Self { registry })
    }

    /// トップページの HTML を返す。
    pub fn render_index(&self) -> anyhow::Result<String> {
        let context = serde_json::json!({
            "title": "PetClinic - Pet Management System",
            "message": "Welcome to PetClinic! 🐾",
        });
        let page = self.registry.render("index", &context)?;
        Ok(page)
    }
}
