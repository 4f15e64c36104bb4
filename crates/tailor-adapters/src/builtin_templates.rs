//! Built-in demo template.
//!
//! Ships one complete landing-page template exercising every marker form,
//! two slots with validators, and a constraints block. Serves as the demo
//! payload for `tailor process` and as a seed users can dump and edit.
//!
//! Content is authored against the default look (`blue` family utilities,
//! `Poppins`/`Inter` fonts); the theme applier reskins it per request.

use std::collections::BTreeMap;

use tailor_core::domain::{
    Constraints, FieldConfig, FieldType, FieldValidator, FileKind, SlotConfig, SourceFile,
    Template, TemplateMeta, TemplateVersion,
};

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <meta name="description" content="{{ hero.subtitle }}">
  <title>{{ hero.title }}</title>
  <link rel="stylesheet" href="styles/main.css">
</head>
<body class="<tw/>">
  <header class="bg-white shadow-sm">
    <nav class="flex px-6 py-4">
      <span class="font-bold text-blue-600"><data key="brand.short"/></span>
    </nav>
  </header>

  <main>
    <section class="px-6 py-16">
      <h1 class="<tw/>">{{ hero.title }}</h1>
      <p class="text-lg"><text/></p>
      <button className="<tw/>" aria-label="Primary call to action">{{ hero.cta }}</button>
    </section>

    <section class="px-6 py-12">
      <div class="feature-card rounded-xl shadow-md p-6">
        <h2 class="<tw/>"><text/></h2>
        <img src="<img/>" alt="What we offer">
        <p><text/></p>
      </div>
    </section>

    <section class="px-6 py-12">
      <h3>Visit us</h3>
      <p>{{ contact.address }}</p>
      <p>Email: {{ contact.email }} · Phone: <data key="contact.phone"/></p>
    </section>
  </main>

  <footer class="bg-slate-900 text-slate-200 px-6 py-8">
    <p><text/></p>
  </footer>
</body>
</html>
"#;

const MAIN_CSS: &str = r#"body {
  font-family: 'Inter', sans-serif;
  margin: 0;
}

h1, h2, h3 {
  font-family: 'Poppins', sans-serif;
}

.feature-card {
  max-width: 36rem;
}
"#;

const SITE_CONFIG: &str = r#"{
  "name": "{{ hero.title }}",
  "locale": "en",
  "analytics": false
}
"#;

/// The landing-page starter template.
pub fn landing_starter() -> Template {
    let mut slots = BTreeMap::new();

    slots.insert(
        "hero".to_string(),
        SlotConfig {
            label: Some("Hero section".into()),
            fields: vec![
                {
                    let mut f = FieldConfig::new("title", FieldType::Text);
                    f.required = true;
                    f.validators = vec![FieldValidator::MaxLength { value: 60 }];
                    f
                },
                {
                    let mut f = FieldConfig::new("subtitle", FieldType::Text);
                    f.validators = vec![FieldValidator::MaxLength { value: 160 }];
                    f
                },
                {
                    let mut f = FieldConfig::new("cta", FieldType::Text);
                    f.default = Some("Get started".into());
                    f.validators = vec![FieldValidator::MaxLength { value: 24 }];
                    f
                },
            ],
        },
    );

    slots.insert(
        "contact".to_string(),
        SlotConfig {
            label: Some("Contact details".into()),
            fields: vec![
                {
                    let mut f = FieldConfig::new("email", FieldType::Email);
                    f.required = true;
                    f
                },
                FieldConfig::new("address", FieldType::Text),
            ],
        },
    );

    Template {
        key: "landing-starter".into(),
        label: "Landing Starter".into(),
        category: "landing".into(),
        meta: TemplateMeta {
            description: "Single-page landing site with hero, feature and contact sections".into(),
            engine: "static".into(),
            status: "published".into(),
            author: "Tailor".into(),
        },
        tags: vec!["landing".into(), "starter".into(), "html".into()],
        version: TemplateVersion {
            source_files: vec![
                SourceFile::new("index.html", FileKind::Code, INDEX_HTML),
                SourceFile::new("styles/main.css", FileKind::Style, MAIN_CSS),
                SourceFile::new("site.config.json", FileKind::Config, SITE_CONFIG),
            ],
            slots,
            constraints: Constraints::default(),
        },
    }
}

/// All built-in templates.
pub fn all_templates() -> Vec<Template> {
    vec![landing_starter()]
}
