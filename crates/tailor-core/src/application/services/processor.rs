//! Template Processor - main application orchestrator.
//!
//! This service coordinates the entire pipeline for one request:
//! 1. Validate the template structure (hard failure if broken)
//! 2. Normalize user data (brand default, theme downgrade with warning)
//! 3. Fill slots
//! 4. Per file: tokenize → resolve markers → substitute → apply theme
//! 5. Compute sizes/checksums, validate the result set
//! 6. Assemble manifest + metadata
//!
//! All state is per-invocation; the processor itself holds only immutable
//! collaborators and can serve concurrent `process` calls.

use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind, resume_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::{
    application::{
        error::ApplicationError,
        ports::ContentGenerator,
        services::{
            resolver::{BrandProfile, ContentResolver, Resolution, ResolveContext, ResolveJob},
            slot_filler::SlotFiller,
            theme_applier::ThemeApplier,
            validator::Validator,
        },
    },
    domain::{
        DEFAULT_THEME, DomainValidator, Manifest, MarkerContext, PlaceholderKind,
        PlaceholderScanner, ProcessedFile, ProcessedTemplate, ProcessingMetadata, Segment,
        SourceFile, Template, ThemeRegistry, UserData,
    },
    error::TailorResult,
};

/// Brand name used when the caller supplies none.
const DEFAULT_BRAND: &str = "Your Brand";

/// Version stamped into generated manifests.
const ARTIFACT_VERSION: &str = "0.1.0";

/// Tuning knobs for one processor instance.
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    /// Upper bound on concurrent marker resolutions. Only engaged when a
    /// content generator is wired; the deterministic path is synchronous.
    pub max_concurrency: usize,

    /// Characters of literal context captured on each side of a marker
    /// for generation prompts.
    pub snippet_radius: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 4,
            snippet_radius: 80,
        }
    }
}

/// Main pipeline service.
pub struct TemplateProcessor {
    themes: ThemeRegistry,
    validator: Validator,
    scanner: PlaceholderScanner,
    applier: ThemeApplier,
    resolver: ContentResolver,
    config: ProcessorConfig,
}

impl TemplateProcessor {
    /// Processor without content generation: fully deterministic.
    pub fn new(themes: ThemeRegistry, validator: Validator) -> Self {
        Self {
            themes,
            validator,
            scanner: PlaceholderScanner::new(),
            applier: ThemeApplier::new(),
            resolver: ContentResolver::new(),
            config: ProcessorConfig::default(),
        }
    }

    /// Wire in a content generator; the resolver tries it first for
    /// generative marker kinds.
    pub fn with_generator(mut self, generator: Arc<dyn ContentGenerator>) -> Self {
        self.resolver = ContentResolver::with_generator(generator);
        self
    }

    pub fn with_config(mut self, config: ProcessorConfig) -> Self {
        self.config = config;
        self
    }

    /// Process one template against one user-data payload.
    ///
    /// Soft failures (unknown theme, generator errors, missing data paths)
    /// degrade internally and are reported through `metadata.warnings`. A
    /// returned error means the template is structurally broken or a file
    /// hit an unexpected fault, identified by path.
    #[instrument(skip_all, fields(template = %template.key))]
    pub fn process(
        &self,
        template: &Template,
        user: &UserData,
    ) -> TailorResult<ProcessedTemplate> {
        let started = Instant::now();

        DomainValidator::validate_template(template)?;

        let mut warnings = Vec::new();

        // ── Normalization ────────────────────────────────────────────────
        let brand_name = user
            .brand_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_BRAND)
            .to_string();

        let requested_theme = user.theme.as_deref().unwrap_or(DEFAULT_THEME);
        let base_theme = match self.themes.get(requested_theme) {
            Some(theme) => theme,
            None => {
                warn!(theme = requested_theme, "unknown theme, using default");
                warnings.push(format!(
                    "Unknown theme '{requested_theme}', substituted '{DEFAULT_THEME}'"
                ));
                self.themes.default_theme()
            }
        };
        let theme = base_theme.customized(&user.customizations);
        let brand = BrandProfile::classify(&brand_name);

        info!(
            brand = %brand_name,
            theme = %theme.name,
            files = template.version.source_files.len(),
            "processing template"
        );

        // ── Slots ────────────────────────────────────────────────────────
        let slots = SlotFiller::fill_slots(&template.version.slots, user, &brand);

        // ── Files ────────────────────────────────────────────────────────
        let cx = ResolveContext {
            theme: &theme,
            brand: &brand,
            user,
            slots: &slots,
        };

        let mut files = Vec::with_capacity(template.version.source_files.len());
        let mut placeholder_count = 0usize;

        for source in &template.version.source_files {
            let outcome = catch_unwind(AssertUnwindSafe(|| self.process_file(source, &cx)));
            let (content, count, mut file_warnings) = match outcome {
                Ok(result) => result,
                Err(_) => {
                    return Err(ApplicationError::FileProcessing {
                        path: source.path.clone(),
                        reason: "unexpected fault while resolving file".into(),
                    }
                    .into());
                }
            };
            placeholder_count += count;
            warnings.append(&mut file_warnings);
            files.push(ProcessedFile::new(&source.path, source.kind, content));
        }

        // ── Validation ───────────────────────────────────────────────────
        let validation = self
            .validator
            .validate(&files, &template.version.constraints);

        // ── Assembly ─────────────────────────────────────────────────────
        let manifest = Manifest {
            name: brand_name,
            version: ARTIFACT_VERSION.into(),
            description: template.meta.description.clone(),
            template: template.key.clone(),
            engine: template.meta.engine.clone(),
            file_count: files.len(),
            generated_at: Utc::now(),
            theme: theme.name.clone(),
            slots: slots.keys().cloned().collect(),
        };

        let metadata = ProcessingMetadata {
            processing_time_ms: started.elapsed().as_millis() as u64,
            placeholder_count,
            theme_applied: theme.name.clone(),
            validation_passed: validation.is_valid,
            warnings,
        };

        info!(
            files = manifest.file_count,
            placeholders = placeholder_count,
            score = validation.score,
            valid = validation.is_valid,
            "template processed"
        );

        Ok(ProcessedTemplate {
            files,
            manifest,
            metadata,
            validation,
        })
    }

    /// Resolve one source file: tokenize, resolve each distinct marker,
    /// substitute, then apply the theme. Returns the resolved content, the
    /// marker occurrence count, and soft warnings.
    fn process_file(
        &self,
        source: &SourceFile,
        cx: &ResolveContext<'_>,
    ) -> (String, usize, Vec<String>) {
        let segments = self.scanner.tokenize(&source.content);
        let marker_count = segments
            .iter()
            .filter(|s| matches!(s, Segment::Marker { .. }))
            .count();

        // One resolution per distinct (kind, key, context); every literal
        // occurrence sharing that identity receives the same value.
        let mut job_index: HashMap<JobKey, usize> = HashMap::new();
        let mut jobs: Vec<ResolveJob> = Vec::new();

        for (i, segment) in segments.iter().enumerate() {
            let Segment::Marker { placeholder, .. } = segment else {
                continue;
            };
            let key = JobKey::of(placeholder.kind, placeholder.key.clone(), &placeholder.context);
            job_index.entry(key).or_insert_with(|| {
                jobs.push(ResolveJob {
                    placeholder: placeholder.clone(),
                    snippet: self.snippet_around(&segments, i),
                });
                jobs.len() - 1
            });
        }

        let resolutions = self.resolve_jobs(&jobs, cx);

        let mut warnings: Vec<String> = Vec::new();
        for resolution in &resolutions {
            for warning in &resolution.warnings {
                warnings.push(format!("{}: {}", source.path, warning));
            }
        }

        let mut output = String::with_capacity(source.content.len());
        for segment in &segments {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Marker { placeholder, .. } => {
                    let key = JobKey::of(
                        placeholder.kind,
                        placeholder.key.clone(),
                        &placeholder.context,
                    );
                    let index = job_index[&key];
                    output.push_str(&resolutions[index].value);
                }
            }
        }

        let themed = self.applier.apply(&output, cx.theme);
        (themed, marker_count, warnings)
    }

    /// Literal text around a marker segment, truncated to the configured
    /// radius, for generation prompts.
    fn snippet_around(&self, segments: &[Segment<'_>], index: usize) -> String {
        let radius = self.config.snippet_radius;

        let before = match index.checked_sub(1).and_then(|i| segments.get(i)) {
            Some(Segment::Literal(text)) => tail_chars(text, radius),
            _ => "",
        };
        let after = match segments.get(index + 1) {
            Some(Segment::Literal(text)) => head_chars(text, radius),
            _ => "",
        };
        let marker = match &segments[index] {
            Segment::Marker { raw, .. } => *raw,
            Segment::Literal(_) => "",
        };

        format!("{before}{marker}{after}")
    }

    /// Resolve all jobs, fanning out over a bounded scoped-thread pool
    /// when generation is in play. Each resolution is a pure function of
    /// its own job, so ordering between workers is irrelevant.
    fn resolve_jobs(&self, jobs: &[ResolveJob], cx: &ResolveContext<'_>) -> Vec<Resolution> {
        let workers = self.config.max_concurrency.min(jobs.len());
        if !self.resolver.has_generator() || workers <= 1 {
            return jobs.iter().map(|job| self.resolver.resolve(job, cx)).collect();
        }

        let next = AtomicUsize::new(0);
        let per_worker: Vec<Vec<(usize, Resolution)>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|_| {
                    scope.spawn(|| {
                        let mut out = Vec::new();
                        loop {
                            let i = next.fetch_add(1, Ordering::SeqCst);
                            if i >= jobs.len() {
                                break;
                            }
                            out.push((i, self.resolver.resolve(&jobs[i], cx)));
                        }
                        out
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(results) => results,
                    Err(payload) => resume_unwind(payload),
                })
                .collect()
        });

        let mut results: Vec<Option<Resolution>> = vec![None; jobs.len()];
        for (i, resolution) in per_worker.into_iter().flatten() {
            results[i] = Some(resolution);
        }
        results
            .into_iter()
            .map(|r| r.expect("every job index visited by exactly one worker"))
            .collect()
    }
}

/// Owned resolution identity used for per-file deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct JobKey {
    kind: PlaceholderKind,
    key: Option<String>,
    context: MarkerContext,
}

impl JobKey {
    fn of(kind: PlaceholderKind, key: Option<String>, context: &MarkerContext) -> Self {
        Self {
            kind,
            key,
            context: context.clone(),
        }
    }
}

fn tail_chars(text: &str, n: usize) -> &str {
    match text.char_indices().rev().nth(n.saturating_sub(1)) {
        Some((idx, _)) => &text[idx..],
        None => text,
    }
}

fn head_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FileKind, SourceFile, TemplateMeta, TemplateVersion};
    use std::collections::BTreeMap;

    fn template_with(files: Vec<SourceFile>) -> Template {
        Template {
            key: "landing".into(),
            label: "Landing".into(),
            category: "landing".into(),
            meta: TemplateMeta {
                description: "A landing page".into(),
                engine: "static".into(),
                status: "published".into(),
                author: "tests".into(),
            },
            tags: vec![],
            version: TemplateVersion {
                source_files: files,
                slots: BTreeMap::new(),
                constraints: Default::default(),
            },
        }
    }

    fn processor() -> TemplateProcessor {
        TemplateProcessor::new(ThemeRegistry::with_builtin(), Validator::standard())
    }

    #[test]
    fn resolves_all_markers() {
        let template = template_with(vec![SourceFile::new(
            "index.html",
            FileKind::Code,
            r#"<h1><text/></h1><button className="<tw/>">Go</button>"#,
        )]);
        let result = processor().process(&template, &UserData::default()).unwrap();
        let content = &result.file("index.html").unwrap().content;
        assert!(!content.contains("<text/>"));
        assert!(!content.contains("<tw/>"));
        assert_eq!(result.metadata.placeholder_count, 2);
    }

    #[test]
    fn unknown_theme_downgrades_with_warning() {
        let template = template_with(vec![SourceFile::new(
            "index.html",
            FileKind::Code,
            "<h1><text/></h1>",
        )]);
        let user = UserData {
            theme: Some("does-not-exist".into()),
            ..UserData::default()
        };
        let result = processor().process(&template, &user).unwrap();
        assert_eq!(result.manifest.theme, "modern");
        assert!(
            result
                .metadata
                .warnings
                .iter()
                .any(|w| w.contains("does-not-exist"))
        );
    }

    #[test]
    fn empty_template_is_a_hard_error() {
        let template = template_with(vec![]);
        let result = processor().process(&template, &UserData::default());
        assert!(result.is_err());
    }

    #[test]
    fn identical_markers_in_same_context_share_one_value() {
        let template = template_with(vec![SourceFile::new(
            "index.html",
            FileKind::Code,
            "<p><text/> ... <text/></p>",
        )]);
        let result = processor().process(&template, &UserData::default()).unwrap();
        let content = &result.file("index.html").unwrap().content;
        let parts: Vec<&str> = content.split(" ... ").collect();
        assert_eq!(
            parts[0].trim_start_matches("<p>"),
            parts[1].trim_end_matches("</p>")
        );
        assert_eq!(result.metadata.placeholder_count, 2);
    }

    #[test]
    fn snippet_helpers_respect_char_boundaries() {
        assert_eq!(tail_chars("abcdef", 3), "def");
        assert_eq!(head_chars("abcdef", 3), "abc");
        assert_eq!(tail_chars("ab", 5), "ab");
        // Multi-byte safety.
        assert_eq!(tail_chars("กขค", 2), "ขค");
        assert_eq!(head_chars("กขค", 2), "กข");
    }
}
