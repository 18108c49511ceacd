//! Interactive overwrite handling on top of [`Generator`].
//!
//! The controller drives a bulk run, reports every generated file to a sink
//! and turns each conflict into a question. A "yes" regenerates the same
//! template with `force` set; a "no" skips it for the rest of the session.

use std::io::Write;

use log::{info, warn};

use crate::constants::REPORT_PREFIX;
use crate::error::{Error, FileExists, Result};
use crate::generator::{GenerateOptions, GeneratedFile, Generator, Outcome, TemplateFilter};
use crate::ioutils::FileSystem;
use crate::prompt::{overwrite_message, Confirmer};
use crate::renderer::TemplateRenderer;

/// What a bulk run did, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Written without any conflict.
    pub generated: Vec<GeneratedFile>,
    /// Written over an existing file after confirmation.
    pub overwritten: Vec<GeneratedFile>,
    /// Conflicts the confirmer declined.
    pub skipped: Vec<FileExists>,
}

pub struct OverwriteController<'g, R, F, K, W> {
    generator: &'g Generator<R, F>,
    confirmer: K,
    sink: W,
}

impl<'g, R, F, K, W> OverwriteController<'g, R, F, K, W>
where
    F: FileSystem,
    K: Confirmer,
    W: Write,
{
    pub fn new(generator: &'g Generator<R, F>, confirmer: K, sink: W) -> Self {
        Self {
            generator,
            confirmer,
            sink,
        }
    }

    pub fn generator(&self) -> &'g Generator<R, F> {
        self.generator
    }

    pub fn into_sink(self) -> W {
        self.sink
    }

    /// Generates every template accepted by `filter`, asking before any
    /// existing file is overwritten.
    ///
    /// Successes are reported as they happen. Errors other than conflicts,
    /// including a failing confirmer, end the run.
    pub fn generate_all<C>(
        &mut self,
        context: &C,
        filter: TemplateFilter<'_>,
    ) -> Result<GenerationReport>
    where
        C: ?Sized,
        R: TemplateRenderer<C>,
    {
        let generator = self.generator;
        let mut report = GenerationReport::default();

        for outcome in generator.generate_all(context, filter) {
            match outcome? {
                Outcome::Generated(generated) => {
                    info!("Writing to '{}'", generated.destination_path.display());
                    self.report(&generated)?;
                    report.generated.push(generated);
                }
                Outcome::Conflict(conflict) => {
                    if self.confirmer.confirm(&overwrite_message(&conflict.destination_path))? {
                        let generated = self.overwrite(context, &conflict)?;
                        report.overwritten.push(generated);
                    } else {
                        warn!(
                            "Skipping write to '{}' (target already exists)",
                            conflict.destination_path.display()
                        );
                        report.skipped.push(conflict);
                    }
                }
            }
        }

        Ok(report)
    }

    /// Generates a single template and reports it.
    ///
    /// Unlike [`OverwriteController::generate_all`], a conflict is returned
    /// as [`Error::FileExists`] without asking.
    pub fn generate<C>(
        &mut self,
        context: &C,
        template_name: &str,
        options: GenerateOptions,
    ) -> Result<GeneratedFile>
    where
        C: ?Sized,
        R: TemplateRenderer<C>,
    {
        let generated = self.generator.generate(context, template_name, options)?;
        self.report(&generated)?;
        Ok(generated)
    }

    /// Removes `file_name` from the destination directory after confirmation.
    ///
    /// Useful when a template must not coexist with an alternate name, e.g.
    /// making sure `docker-compose.yaml` is gone before generating
    /// `docker-compose.yml`:
    ///
    /// ```ignore
    /// controller.remove_destination_file("docker-compose.yaml", "docker-compose.yml.j2")?;
    /// ```
    ///
    /// Returns whether a file was removed. Nothing happens when the
    /// destination is already free or the confirmer declines.
    pub fn remove_destination_file(
        &mut self,
        file_name: &str,
        template_name: &str,
    ) -> Result<bool> {
        let conflict = match self.generator.assert_destination_free(file_name, template_name) {
            Ok(()) => return Ok(false),
            Err(Error::FileExists(conflict)) => conflict,
            Err(e) => return Err(e),
        };

        if !self.confirmer.confirm(&overwrite_message(&conflict.destination_path))? {
            return Ok(false);
        }

        self.generator
            .file_system()
            .remove_file(&conflict.destination_path)
            .map_err(|source| Error::RemoveFile {
                path: conflict.destination_path.clone(),
                source,
            })?;
        info!("Removed '{}'", conflict.destination_path.display());
        Ok(true)
    }

    fn overwrite<C>(&mut self, context: &C, conflict: &FileExists) -> Result<GeneratedFile>
    where
        C: ?Sized,
        R: TemplateRenderer<C>,
    {
        let generated = self.generate(
            context,
            &conflict.template_name,
            GenerateOptions::forced(conflict.file_name.as_str()),
        )?;
        info!("Writing to '{}' (overwriting existing file)", generated.destination_path.display());
        Ok(generated)
    }

    fn report(&mut self, generated: &GeneratedFile) -> Result<()> {
        writeln!(self.sink, "{REPORT_PREFIX} {}", generated.destination_path.display())?;
        Ok(())
    }
}
