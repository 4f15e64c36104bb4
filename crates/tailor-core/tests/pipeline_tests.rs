//! End-to-end pipeline tests over the public API, with generation
//! disabled so every run is deterministic.

use std::collections::BTreeMap;

use tailor_core::{
    application::{TemplateProcessor, Validator},
    domain::{
        FieldConfig, FieldType, FileKind, SlotConfig, SourceFile, Template, TemplateMeta,
        TemplateVersion, ThemeRegistry, UserData,
    },
};

const MARKER_FORMS: [&str; 4] = ["<tw/>", "<text/>", "<img/>", "<data key="];

fn processor() -> TemplateProcessor {
    TemplateProcessor::new(ThemeRegistry::with_builtin(), Validator::standard())
}

fn landing_template() -> Template {
    let index = r#"<!doctype html>
<html>
<head>
  <title>Home</title>
  <meta name="description" content="A small landing page">
  <meta name="viewport" content="width=device-width, initial-scale=1">
</head>
<body>
  <header><h1><text/></h1></header>
  <main>
    <img src="<img/>" alt="hero image">
    <p><text/></p>
    <button className="<tw/>">{{ hero.cta }}</button>
    <p>Reach us at <data key="contact.email"/></p>
  </main>
  <footer><p><text/></p></footer>
</body>
</html>
"#;

    let styles = "body { font-family: 'Inter', sans-serif; }\nh1 { font-family: 'Poppins', serif; }\n";

    let mut slots = BTreeMap::new();
    slots.insert(
        "hero".into(),
        SlotConfig {
            label: Some("Hero".into()),
            fields: vec![
                FieldConfig::new("title", FieldType::Text),
                FieldConfig::new("cta", FieldType::Text),
            ],
        },
    );

    Template {
        key: "landing-starter".into(),
        label: "Landing Starter".into(),
        category: "landing".into(),
        meta: TemplateMeta {
            description: "Single-page landing template".into(),
            engine: "static".into(),
            status: "published".into(),
            author: "tailor".into(),
        },
        tags: vec!["landing".into()],
        version: TemplateVersion {
            source_files: vec![
                SourceFile::new("index.html", FileKind::Code, index),
                SourceFile::new("styles/main.css", FileKind::Style, styles),
            ],
            slots,
            constraints: Default::default(),
        },
    }
}

#[test]
fn happy_path_leaves_no_markers_behind() {
    let artifact = processor()
        .process(&landing_template(), &UserData::default())
        .unwrap();

    for file in &artifact.files {
        for form in MARKER_FORMS {
            assert!(
                !file.content.contains(form),
                "{} still contains {}",
                file.path,
                form
            );
        }
        assert!(!file.content.contains("{{ "), "{} has moustache marker", file.path);
    }

    // No completeness warnings either.
    assert!(
        !artifact
            .validation
            .warnings
            .iter()
            .any(|i| i.message.contains("Unresolved")),
    );
}

#[test]
fn identical_inputs_give_identical_files_and_checksums() {
    let template = landing_template();
    let user = UserData {
        brand_name: Some("Baan Kaffe".into()),
        theme: Some("cozy".into()),
        ..UserData::default()
    };

    let first = processor().process(&template, &user).unwrap();
    let second = processor().process(&template, &user).unwrap();

    assert_eq!(first.files.len(), second.files.len());
    for (a, b) in first.files.iter().zip(second.files.iter()) {
        assert_eq!(a.content, b.content, "{}", a.path);
        assert_eq!(a.checksum, b.checksum, "{}", a.path);
        assert_eq!(a.size, b.size, "{}", a.path);
    }
}

#[test]
fn unknown_theme_falls_back_to_modern_with_warning() {
    let user = UserData {
        theme: Some("does-not-exist".into()),
        ..UserData::default()
    };
    let artifact = processor().process(&landing_template(), &user).unwrap();

    assert_eq!(artifact.manifest.theme, "modern");
    assert_eq!(artifact.metadata.theme_applied, "modern");
    assert!(
        artifact
            .metadata
            .warnings
            .iter()
            .any(|w| w.contains("does-not-exist"))
    );
}

#[test]
fn clean_output_scores_100_and_validates() {
    let artifact = processor()
        .process(&landing_template(), &UserData::default())
        .unwrap();

    assert!(artifact.validation.is_valid, "{:?}", artifact.validation.errors);
    assert_eq!(artifact.validation.score, 100, "{:?}", artifact.validation.warnings);
    assert!(artifact.metadata.validation_passed);
}

#[test]
fn validity_depends_only_on_errors() {
    // A template whose output carries console.log (info) and a long title
    // (warning), but no errors.
    let mut template = landing_template();
    template.version.source_files.push(SourceFile::new(
        "app.js",
        FileKind::Code,
        format!(
            "console.log('boot');\nconst title = \"{}\";\n",
            "t".repeat(10)
        ),
    ));
    template.version.source_files[0].content = template.version.source_files[0]
        .content
        .replace("<title>Home</title>", &format!("<title>{}</title>", "x".repeat(90)));

    let artifact = processor()
        .process(&template, &UserData::default())
        .unwrap();

    assert!(artifact.validation.errors.is_empty());
    assert!(artifact.validation.is_valid);
    assert!(artifact.validation.score < 100);
    assert!(!artifact.validation.warnings.is_empty());
}

#[test]
fn cozy_button_scenario() {
    let user = UserData {
        brand_name: Some("Baan Kaffe".into()),
        theme: Some("cozy".into()),
        ..UserData::default()
    };
    let artifact = processor().process(&landing_template(), &user).unwrap();
    let index = &artifact.file("index.html").unwrap().content;

    let class_attr = index
        .split("className=\"")
        .nth(1)
        .and_then(|rest| rest.split('"').next())
        .expect("button class attribute");

    for token in ["bg-emerald-600", "px-4", "py-2", "rounded-lg"] {
        assert!(class_attr.contains(token), "missing {token} in {class_attr}");
    }
    for prefix in ["bg-", "px-", "py-"] {
        let count = class_attr
            .split_whitespace()
            .filter(|t| t.starts_with(prefix) && !t.contains(':'))
            .count();
        assert_eq!(count, 1, "duplicate {prefix} tokens in {class_attr}");
    }
}

#[test]
fn missing_alt_forces_invalid_result() {
    let mut template = landing_template();
    template.version.source_files[0].content = template.version.source_files[0]
        .content
        .replace(r#"<img src="<img/>" alt="hero image">"#, r#"<img src="<img/>">"#);

    let artifact = processor()
        .process(&template, &UserData::default())
        .unwrap();

    let alt_errors: Vec<_> = artifact
        .validation
        .errors
        .iter()
        .filter(|i| i.message == "Images missing alt attributes")
        .collect();
    assert_eq!(alt_errors.len(), 1);
    assert!(!artifact.validation.is_valid);
    assert!(!artifact.metadata.validation_passed);
}

#[test]
fn resolved_user_content_carrying_a_marker_is_reported() {
    // Resolution is total, but user-provided copy can itself contain a
    // literal marker form; the completeness rule must flag it.
    let mut user = UserData::default();
    user.content.insert("p".into(), "see <tw/> docs".into());

    let artifact = processor().process(&landing_template(), &user).unwrap();
    assert!(
        artifact
            .validation
            .warnings
            .iter()
            .any(|i| i.message.contains("Unresolved <tw/> placeholder"))
    );
    // Still only a warning: validity is unaffected.
    assert!(artifact.validation.is_valid);
}

#[test]
fn declared_slot_without_any_source_resolves_to_empty_string() {
    let mut template = landing_template();
    template.version.slots.insert(
        "extra".into(),
        SlotConfig {
            label: None,
            fields: vec![{
                let mut f = FieldConfig::new("note", FieldType::Text);
                f.required = true;
                f
            }],
        },
    );
    template.version.source_files.push(SourceFile::new(
        "extra.html",
        FileKind::Code,
        "<p>{{ extra.note }}</p>",
    ));

    let artifact = processor()
        .process(&template, &UserData::default())
        .unwrap();

    // The filled slot holds an empty string, not a missing entry, so the
    // marker resolves to "" rather than surviving or erroring.
    let content = &artifact.file("extra.html").unwrap().content;
    assert!(!content.contains("{{"));
    assert!(artifact.manifest.slots.contains(&"extra".to_string()));
}

#[test]
fn manifest_and_metadata_describe_the_run() {
    let user = UserData {
        brand_name: Some("Nimbus Software".into()),
        theme: Some("minimal".into()),
        ..UserData::default()
    };
    let artifact = processor().process(&landing_template(), &user).unwrap();

    assert_eq!(artifact.manifest.name, "Nimbus Software");
    assert_eq!(artifact.manifest.template, "landing-starter");
    assert_eq!(artifact.manifest.engine, "static");
    assert_eq!(artifact.manifest.theme, "minimal");
    assert_eq!(artifact.manifest.file_count, artifact.files.len());
    assert_eq!(artifact.manifest.slots, vec!["hero".to_string()]);
    assert!(artifact.metadata.placeholder_count >= 5);
}

#[test]
fn styles_are_reskinned_per_theme() {
    let user = UserData {
        theme: Some("cozy".into()),
        ..UserData::default()
    };
    let artifact = processor().process(&landing_template(), &user).unwrap();
    let css = &artifact.file("styles/main.css").unwrap().content;

    assert!(css.contains("'Nunito'"), "{css}");
    assert!(css.contains("'Lora'"), "{css}");
    assert!(!css.contains("Inter"));
    assert!(!css.contains("Poppins"));
}
