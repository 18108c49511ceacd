use crate::{
    cli::{Args, OverwritePolicy},
    config::Config,
    constants::STDIN_INDICATOR,
    error::{Error, Result},
    generator::{Generator, TemplateFilter},
    ignore::parse_ignore_file,
    ioutils::{parse_string_to_json, read_from, LocalFileSystem},
    overwrite::{GenerationReport, OverwriteController},
    prompt::{AutoConfirm, Confirmer, DialoguerConfirmer},
    renderer::MiniJinjaRenderer,
};
use globset::GlobSet;
use std::io::Write;

/// Main CLI runner that orchestrates the whole generation workflow
pub struct Runner {
    args: Args,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    /// Generates every template, streaming each written path to stdout.
    pub fn run(self) -> Result<GenerationReport> {
        let stdout = std::io::stdout();
        self.run_with_sink(stdout.lock())
    }

    /// Same as [`Runner::run`] but reports into `sink`.
    pub fn run_with_sink<W: Write>(self, sink: W) -> Result<GenerationReport> {
        let template_root = &self.args.template_dir;
        if !template_root.is_dir() {
            return Err(Error::TemplateDoesNotExistsError {
                template_dir: template_root.display().to_string(),
            });
        }

        let config = Config::load_config(template_root)?;
        let template_extensions = config.template_extensions(&self.args.template_extensions);
        log::debug!("Template extensions: {template_extensions:?}");

        let mut ignore_patterns = config.ignore.clone();
        ignore_patterns.extend(self.args.exclude.iter().cloned());
        let ignored = parse_ignore_file(template_root, &ignore_patterns)?;

        let context = self.build_context()?;

        let generator = Generator::with_file_system(
            template_root,
            &self.args.destination_dir,
            template_extensions,
            MiniJinjaRenderer::new(),
            LocalFileSystem::sorted(),
        );

        let report = match self.args.overwrite {
            OverwritePolicy::Ask => {
                self.generate_all(&generator, &context, &ignored, DialoguerConfirmer::new(), sink)?
            }
            OverwritePolicy::Always => {
                self.generate_all(&generator, &context, &ignored, AutoConfirm(true), sink)?
            }
            OverwritePolicy::Never => {
                self.generate_all(&generator, &context, &ignored, AutoConfirm(false), sink)?
            }
        };

        log::info!(
            "{} generated, {} overwritten, {} skipped",
            report.generated.len(),
            report.overwritten.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    /// The arguments themselves, with `--answers` merged on top.
    fn build_context(&self) -> Result<serde_json::Value> {
        let mut context = match serde_json::to_value(&self.args)? {
            serde_json::Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };

        if let Some(answers_arg) = &self.args.answers {
            let answers_str = if answers_arg == STDIN_INDICATOR {
                read_from(std::io::stdin())?
            } else {
                answers_arg.clone()
            };
            context.extend(parse_string_to_json(answers_str)?);
        }

        Ok(serde_json::Value::Object(context))
    }

    /// Explicit `--only` names bypass the ignore rules.
    fn template_filter<'a>(&self, ignored: &'a GlobSet) -> TemplateFilter<'a> {
        if self.args.only.is_empty() {
            TemplateFilter::predicate(move |name| !ignored.is_match(name))
        } else {
            TemplateFilter::names(self.args.only.iter().cloned())
        }
    }

    fn generate_all<K: Confirmer, W: Write>(
        &self,
        generator: &Generator<MiniJinjaRenderer>,
        context: &serde_json::Value,
        ignored: &GlobSet,
        confirmer: K,
        sink: W,
    ) -> Result<GenerationReport> {
        let mut controller = OverwriteController::new(generator, confirmer, sink);
        controller.generate_all(context, self.template_filter(ignored))
    }
}

/// Main entry point for CLI execution
pub fn run(args: Args) -> Result<GenerationReport> {
    Runner::new(args).run()
}
