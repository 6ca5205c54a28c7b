/// The report pipeline: Project → HTML or CSV document.
///
/// Walks chapters and scenes in reading order, classifies each row,
/// maps its fields, and renders it through the row template table.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::classify::{
    classify_chapter, classify_scene, ParentChapter, RowClass, RowKind, RowLevel,
};
use crate::core::columns::ReportTemplates;
use crate::core::config::ReportConfig;
use crate::core::fields::{chapter_values, document_values, scene_values, Totals};
use crate::core::filter::SceneFilter;
use crate::core::format::OutputKind;
use crate::core::template::{FieldValues, TemplateError};
use crate::schema::project::{Project, ProjectError};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("File \"{}\" not found.", .0.display())]
    NotFound(PathBuf),
    #[error("File type of \"{}\" not supported.", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
    #[error("project error: {0}")]
    Project(#[from] ProjectError),
}

/// The report generator. Built via `ReportEngine::builder()`; immutable
/// afterwards, so one engine can render any number of projects.
#[derive(Debug, Clone)]
pub struct ReportEngine {
    config: ReportConfig,
    templates: ReportTemplates,
}

/// Builder for constructing a `ReportEngine`.
#[derive(Debug, Default)]
pub struct ReportEngineBuilder {
    config_path: Option<PathBuf>,
    /// Directly provided configuration (for use without files).
    config: Option<ReportConfig>,
    output: Option<OutputKind>,
    suffix: Option<String>,
    filter: Option<SceneFilter>,
}

impl ReportEngine {
    pub fn builder() -> ReportEngineBuilder {
        ReportEngineBuilder::default()
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn templates(&self) -> &ReportTemplates {
        &self.templates
    }

    /// Render the complete report document for a project.
    pub fn render(&self, project: &Project) -> String {
        let output = self.config.output;
        let mut document = self
            .templates
            .document_header
            .render(&document_values(project, output));

        let mut chapter_number = 0u32;
        let mut scene_number = 0u32;
        let mut totals = Totals::default();

        for chapter in project.chapters_in_order() {
            match classify_chapter(chapter, &self.config.rows) {
                Some(class) => {
                    let number = (class.kind == RowKind::Normal).then(|| {
                        chapter_number += 1;
                        chapter_number
                    });
                    self.push_row(&mut document, class, &chapter_values(chapter, number, output));
                }
                None => debug!(chapter = chapter.id.0, kind = ?chapter.kind, "chapter row omitted"),
            }

            let parent = ParentChapter::of(project, chapter);
            for scene in project.scenes_of(chapter) {
                let Some(class) = classify_scene(project, scene, &parent, &self.config) else {
                    debug!(scene = scene.id.0, kind = ?scene.kind, "scene row omitted");
                    continue;
                };
                let number = (class.kind == RowKind::Normal).then(|| {
                    scene_number += 1;
                    totals.add(scene);
                    scene_number
                });
                let values = scene_values(
                    project,
                    scene,
                    number,
                    totals,
                    output,
                    &self.config.list_separator,
                );
                self.push_row(&mut document, class, &values);
            }
        }

        document.push_str(self.templates.document_footer);
        document
    }

    fn push_row(&self, document: &mut String, class: RowClass, values: &FieldValues) {
        if let Some(template) = self.templates.row(class) {
            document.push_str(&template.render(values));
            document.push('\n');
        }
    }

    /// `<dir>/<base><suffix>.<html|csv>` for a project file.
    pub fn target_path(&self, source: &Path) -> PathBuf {
        let base = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = format!(
            "{}{}.{}",
            base,
            self.config.suffix,
            self.config.output.extension()
        );
        match source.parent() {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        }
    }

    /// Load a project file, render its report and write it next to the
    /// source. Nothing is written unless every step before it succeeds.
    pub fn convert(&self, source: &Path) -> Result<PathBuf, ReportError> {
        if !source.is_file() {
            return Err(ReportError::NotFound(source.to_path_buf()));
        }
        let supported = source
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(Project::EXTENSION));
        if !supported {
            return Err(ReportError::UnsupportedFormat(source.to_path_buf()));
        }

        let project = Project::load_from_ron(source)?;
        let report = self.render(&project);
        let target = self.target_path(source);
        std::fs::write(&target, report)?;

        info!(
            source = %source.display(),
            target = %target.display(),
            filter = %self.config.filter.describe(&project),
            "report written"
        );
        Ok(target)
    }
}

impl ReportEngineBuilder {
    /// Read the configuration from a RON file at build time.
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Provide the configuration directly.
    pub fn with_config(mut self, config: ReportConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn output(mut self, output: OutputKind) -> Self {
        self.output = Some(output);
        self
    }

    pub fn suffix(mut self, suffix: &str) -> Self {
        self.suffix = Some(suffix.to_string());
        self
    }

    pub fn filter(mut self, filter: SceneFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Resolve the configuration and build the template table. The file
    /// config is the base, `with_config` replaces it, and the single-value
    /// setters override either.
    pub fn build(self) -> Result<ReportEngine, ReportError> {
        let mut config = match (self.config, self.config_path) {
            (Some(config), _) => config,
            (None, Some(path)) => ReportConfig::load_from_ron(&path)?,
            (None, None) => ReportConfig::default(),
        };
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(suffix) = self.suffix {
            config.suffix = suffix;
        }
        if let Some(filter) = self.filter {
            config.filter = filter;
        }

        let templates = ReportTemplates::build(&config)?;
        debug!(
            output = ?config.output,
            columns = templates.column_count(RowLevel::Scene),
            "report templates built"
        );
        Ok(ReportEngine { config, templates })
    }
}
