//! The generation engine.
//!
//! A [`Generator`] maps every file below a template root onto a file below a
//! destination root, rendering the contents on the way and refusing to
//! overwrite existing files unless told to.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, FileExists, Result};
use crate::ioutils::{join_relative, to_relative_name, FileSystem, LocalFileSystem};
use crate::renderer::TemplateRenderer;

/// A template rendered into the destination directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeneratedFile {
    pub template_path: PathBuf,
    pub destination_path: PathBuf,
}

/// One element of a bulk generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Generated(GeneratedFile),
    /// The destination already existed; nothing was read or written.
    Conflict(FileExists),
}

/// Options for a single [`Generator::generate`] call.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Destination name relative to the destination root. Defaults to the
    /// template name with its template extension removed.
    pub file_name: Option<String>,
    /// Write even if the destination already exists.
    pub force: bool,
}

impl GenerateOptions {
    pub fn forced(file_name: impl Into<String>) -> Self {
        Self {
            file_name: Some(file_name.into()),
            force: true,
        }
    }
}

/// Selects which templates a bulk run generates.
#[derive(Default)]
pub enum TemplateFilter<'a> {
    #[default]
    All,
    /// Only the listed template names.
    Names(HashSet<String>),
    Predicate(Box<dyn Fn(&str) -> bool + 'a>),
}

impl<'a> TemplateFilter<'a> {
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TemplateFilter::Names(names.into_iter().map(Into::into).collect())
    }

    pub fn predicate(predicate: impl Fn(&str) -> bool + 'a) -> Self {
        TemplateFilter::Predicate(Box::new(predicate))
    }

    fn into_predicate(self) -> Box<dyn Fn(&str) -> bool + 'a> {
        match self {
            TemplateFilter::All => Box::new(|_: &str| true),
            TemplateFilter::Names(names) => Box::new(move |name: &str| names.contains(name)),
            TemplateFilter::Predicate(predicate) => predicate,
        }
    }
}

impl fmt::Debug for TemplateFilter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateFilter::All => f.write_str("All"),
            TemplateFilter::Names(names) => f.debug_tuple("Names").field(names).finish(),
            TemplateFilter::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Removes the first of `extensions` that matches the end of `file_name`.
///
/// Only one suffix is removed, and `file_name` is returned unchanged when no
/// extension matches.
pub fn strip_template_extension<S: AsRef<str>>(file_name: &str, extensions: &[S]) -> String {
    extensions
        .iter()
        .find_map(|extension| file_name.strip_suffix(extension.as_ref()))
        .unwrap_or(file_name)
        .to_string()
}

/// Renders a template tree into a destination tree.
pub struct Generator<R, F = LocalFileSystem> {
    template_root: PathBuf,
    destination_root: PathBuf,
    /// Extensions removed from template names to obtain destination names,
    /// e.g. `[".mustache", ".mu"]`. Read on every call.
    pub template_extensions: Vec<String>,
    renderer: R,
    fs: F,
}

impl<R> Generator<R, LocalFileSystem> {
    pub fn new<T, D>(
        template_root: T,
        destination_root: D,
        template_extensions: Vec<String>,
        renderer: R,
    ) -> Self
    where
        T: Into<PathBuf>,
        D: Into<PathBuf>,
    {
        Self::with_file_system(
            template_root,
            destination_root,
            template_extensions,
            renderer,
            LocalFileSystem::new(),
        )
    }
}

impl<R, F: FileSystem> Generator<R, F> {
    pub fn with_file_system<T, D>(
        template_root: T,
        destination_root: D,
        template_extensions: Vec<String>,
        renderer: R,
        fs: F,
    ) -> Self
    where
        T: Into<PathBuf>,
        D: Into<PathBuf>,
    {
        Self {
            template_root: template_root.into(),
            destination_root: destination_root.into(),
            template_extensions,
            renderer,
            fs,
        }
    }

    pub fn template_root(&self) -> &Path {
        &self.template_root
    }

    pub fn destination_root(&self) -> &Path {
        &self.destination_root
    }

    pub fn file_system(&self) -> &F {
        &self.fs
    }

    /// All template names found below the template root.
    ///
    /// Each call starts a fresh walk. The order is the walk's order and is
    /// not guaranteed to be sorted.
    pub fn template_names(&self) -> TemplateNames<'_> {
        TemplateNames {
            walk: self.fs.walk_files(&self.template_root),
        }
    }

    /// The full template path of `template_name`.
    pub fn template_path(&self, template_name: &str) -> PathBuf {
        join_relative(&self.template_root, template_name)
    }

    /// The full destination path of `file_name`.
    pub fn destination_path(&self, file_name: &str) -> PathBuf {
        join_relative(&self.destination_root, file_name)
    }

    /// Removes the first configured template extension matching the end of
    /// `file_name`.
    pub fn remove_template_extension(&self, file_name: &str) -> String {
        strip_template_extension(file_name, &self.template_extensions)
    }

    /// Fails with [`Error::FileExists`] if `file_name` exists in the
    /// destination directory.
    ///
    /// `template_name` only feeds the conflict record, since the template
    /// and destination names can differ.
    pub fn assert_destination_free(&self, file_name: &str, template_name: &str) -> Result<()> {
        let destination_path = self.destination_path(file_name);
        match self.fs.try_exists(&destination_path) {
            Ok(false) => Ok(()),
            Ok(true) => Err(FileExists {
                template_name: template_name.to_string(),
                file_name: file_name.to_string(),
                destination_path,
            }
            .into()),
            Err(source) => Err(Error::ExistenceCheck {
                path: destination_path,
                source,
            }),
        }
    }

    /// Generates `template_name` into the destination directory, passing
    /// `context` to the renderer.
    ///
    /// Fails with [`Error::FileExists`] if the destination already exists,
    /// unless `options.force` is set.
    pub fn generate<C>(
        &self,
        context: &C,
        template_name: &str,
        options: GenerateOptions,
    ) -> Result<GeneratedFile>
    where
        C: ?Sized,
        R: TemplateRenderer<C>,
    {
        let file_name = options
            .file_name
            .unwrap_or_else(|| self.remove_template_extension(template_name));

        if !options.force {
            self.assert_destination_free(&file_name, template_name)?;
        }

        let template_path = self.template_path(template_name);
        let template = self
            .fs
            .read_to_string(&template_path)
            .map_err(|source| Error::TemplateRead {
                path: template_path.clone(),
                source,
            })?;
        let content = self.renderer.render(context, &template)?;

        let destination_path = self.destination_path(&file_name);
        if let Some(parent) = destination_path.parent() {
            self.fs
                .create_dir_all(parent)
                .map_err(|source| Error::DestinationWrite {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        self.fs
            .write(&destination_path, &content)
            .map_err(|source| Error::DestinationWrite {
                path: destination_path.clone(),
                source,
            })?;

        debug!("Generated '{}' from '{}'", destination_path.display(), template_path.display());
        Ok(GeneratedFile {
            template_path,
            destination_path,
        })
    }

    /// Runs [`Generator::generate`] on every template accepted by `filter`.
    ///
    /// Conflicts are yielded as [`Outcome::Conflict`] and the run goes on.
    /// Any other error is yielded once, after which the iterator is
    /// exhausted and the remaining templates are not attempted.
    pub fn generate_all<'a, C>(
        &'a self,
        context: &'a C,
        filter: TemplateFilter<'a>,
    ) -> GenerateAll<'a, R, F, C>
    where
        C: ?Sized,
        R: TemplateRenderer<C>,
    {
        GenerateAll {
            generator: self,
            context,
            names: Some(self.template_names()),
            filter: filter.into_predicate(),
        }
    }
}

/// Iterator over template names, see [`Generator::template_names`].
pub struct TemplateNames<'a> {
    walk: Box<dyn Iterator<Item = Result<PathBuf>> + 'a>,
}

impl Iterator for TemplateNames<'_> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.walk.next().map(|path| path.and_then(to_relative_name))
    }
}

/// Iterator returned by [`Generator::generate_all`].
pub struct GenerateAll<'a, R, F, C: ?Sized> {
    generator: &'a Generator<R, F>,
    context: &'a C,
    /// `None` once a fatal error has been yielded.
    names: Option<TemplateNames<'a>>,
    filter: Box<dyn Fn(&str) -> bool + 'a>,
}

impl<R, F, C> Iterator for GenerateAll<'_, R, F, C>
where
    C: ?Sized,
    F: FileSystem,
    R: TemplateRenderer<C>,
{
    type Item = Result<Outcome>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let next = self.names.as_mut()?.next()?;
            let template_name = match next {
                Ok(name) => name,
                Err(e) => {
                    self.names = None;
                    return Some(Err(e));
                }
            };

            if !(self.filter)(&template_name) {
                debug!("Skipping '{template_name}' (filtered out)");
                continue;
            }

            return match self.generator.generate(
                self.context,
                &template_name,
                GenerateOptions::default(),
            ) {
                Ok(generated) => Some(Ok(Outcome::Generated(generated))),
                Err(Error::FileExists(conflict)) => Some(Ok(Outcome::Conflict(conflict))),
                Err(e) => {
                    self.names = None;
                    Some(Err(e))
                }
            };
        }
    }
}

impl<R, F, C> std::iter::FusedIterator for GenerateAll<'_, R, F, C>
where
    C: ?Sized,
    F: FileSystem,
    R: TemplateRenderer<C>,
{
}
