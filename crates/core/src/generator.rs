//! Generation driver: input variant dispatch, in-memory artifact assembly
//! and output writing, for single files and whole directories.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::ir::api::NormalizedApi;
use crate::ir::generate_typescript;
use crate::openapi::{OpenApiDocument, OpenApiSpec, generate_declarations};
use crate::schema::{DescriptorSource, FlatDocument, SplitDocument};

/// Suffix of the accessor module.
pub const MODULE_SUFFIX: &str = ".generated.ts";

/// Suffix of the OpenAPI declarations module.
pub const DECLARATIONS_SUFFIX: &str = ".typed.ts";

/// Syntax of a source document, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// `.json`: flat, split or OpenAPI
    Json,
    /// `.yaml` / `.yml`: OpenAPI
    Yaml,
}

impl SourceFormat {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(Error::UnsupportedExtension(path.to_path_buf())),
        }
    }
}

/// A parsed source document of any supported variant.
#[derive(Debug, Clone)]
pub enum SourceDocument {
    /// JSON array of operations
    Flat(FlatDocument),
    /// JSON object with `operations` and `types`
    Split(SplitDocument),
    /// OpenAPI document (YAML or JSON)
    OpenApi(OpenApiDocument),
}

impl SourceDocument {
    /// Parse `text` and detect its variant.
    ///
    /// `declarations` is the import specifier used by OpenAPI accessors.
    pub fn parse(text: &str, format: SourceFormat, declarations: &str) -> Result<Self> {
        match format {
            SourceFormat::Yaml => Ok(Self::OpenApi(OpenApiDocument::new(
                OpenApiSpec::from_yaml(text)?,
                declarations,
            ))),
            SourceFormat::Json => {
                let value: Value = serde_json::from_str(text)?;
                if is_openapi(&value) {
                    Ok(Self::OpenApi(OpenApiDocument::new(
                        OpenApiSpec::from_value(value)?,
                        declarations,
                    )))
                } else if value.is_array() {
                    Ok(Self::Flat(FlatDocument::from_value(value)?))
                } else {
                    Ok(Self::Split(SplitDocument::from_value(value)?))
                }
            }
        }
    }

    /// Short variant name for logs.
    pub fn variant(&self) -> &'static str {
        match self {
            Self::Flat(_) => "flat",
            Self::Split(_) => "split",
            Self::OpenApi(_) => "openapi",
        }
    }
}

impl DescriptorSource for SourceDocument {
    fn normalize(&self) -> Result<NormalizedApi> {
        match self {
            Self::Flat(doc) => doc.normalize(),
            Self::Split(doc) => doc.normalize(),
            Self::OpenApi(doc) => doc.normalize(),
        }
    }
}

fn is_openapi(value: &Value) -> bool {
    value.get("paths").is_some()
        && (value.get("openapi").is_some() || value.get("swagger").is_some())
}

/// Generated text, assembled before anything is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// Accessor module.
    pub module: String,
    /// Declarations module (OpenAPI input only).
    pub declarations: Option<String>,
}

/// Generate the artifacts for one source text.
///
/// `stem` names the declarations module the accessors import
/// (`./<stem>.typed`). Returns `Ok(None)` when the document describes no
/// operations.
pub fn generate_source(
    text: &str,
    format: SourceFormat,
    stem: &str,
    config: &GeneratorConfig,
) -> Result<Option<Artifacts>> {
    let document = SourceDocument::parse(text, format, &format!("./{stem}.typed"))?;
    let api = document.normalize()?;
    debug!(
        variant = document.variant(),
        operations = api.operations.len(),
        types = api.types.len(),
        "normalized schema"
    );

    if api.is_empty() {
        return Ok(None);
    }

    let module = generate_typescript(&api, config);
    let declarations = match &document {
        SourceDocument::OpenApi(doc) => Some(generate_declarations(&doc.spec)),
        _ => None,
    };
    debug!(
        module_len = module.len(),
        declarations_len = declarations.as_ref().map_or(0, String::len),
        "assembled artifacts"
    );

    Ok(Some(Artifacts {
        module,
        declarations,
    }))
}

/// Base name shared by the artifacts of `output`: `api.generated.ts` -> `api`.
pub fn output_stem(output: &Path) -> String {
    let file_name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    file_name
        .strip_suffix(MODULE_SUFFIX)
        .or_else(|| file_name.strip_suffix(".ts"))
        .unwrap_or(&file_name)
        .to_string()
}

/// Where the declarations module for `output` goes.
pub fn declarations_path(output: &Path) -> PathBuf {
    output.with_file_name(format!("{}{DECLARATIONS_SUFFIX}", output_stem(output)))
}

/// Generate `schema` into `output` (plus the declarations module beside it).
///
/// Returns `false` when the schema has no operations and nothing was written.
pub fn generate_file(schema: &Path, output: &Path, config: &GeneratorConfig) -> Result<bool> {
    generate_file_inner(schema, output, config).map_err(|e| e.in_file(schema))
}

fn generate_file_inner(schema: &Path, output: &Path, config: &GeneratorConfig) -> Result<bool> {
    let format = SourceFormat::from_path(schema)?;
    let text = fs::read_to_string(schema).map_err(|source| Error::Read {
        path: schema.to_path_buf(),
        source,
    })?;
    debug!(path = %schema.display(), bytes = text.len(), "read schema");

    let Some(artifacts) = generate_source(&text, format, &output_stem(output), config)? else {
        info!(path = %schema.display(), "no operations, nothing to generate");
        return Ok(false);
    };

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    if let Some(declarations) = &artifacts.declarations {
        let path = declarations_path(output);
        write_artifact(&path, declarations)?;
    }
    write_artifact(output, &artifacts.module)?;
    Ok(true)
}

fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = contents.len(), "wrote artifact");
    Ok(())
}

/// Schema files directly inside a directory, plus what kept others out.
#[derive(Debug, Default)]
pub struct SchemaListing {
    /// Schema files sorted by name, at most one per module name.
    pub files: Vec<PathBuf>,
    /// Unreadable entries and module name collisions.
    pub failures: Vec<Error>,
}

/// `<stem>.generated.ts` for a schema file.
fn module_name(schema: &Path) -> String {
    let stem = schema
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{stem}{MODULE_SUFFIX}")
}

/// List the schema files directly inside `dir`, sorted by name.
///
/// Symlinks are followed. When two files would generate the same module, the
/// first by name is kept and the other is reported as a failure.
pub fn schema_files(dir: &Path) -> Result<SchemaListing> {
    if !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }
    let mut listing = SchemaListing::default();
    let mut modules: HashMap<String, PathBuf> = HashMap::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "unreadable schema directory entry");
                listing.failures.push(Error::Walk(err));
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() || SourceFormat::from_path(path).is_err() {
            debug!(path = %path.display(), "skipping non-schema entry");
            continue;
        }
        match modules.entry(module_name(path)) {
            Entry::Occupied(taken) => {
                warn!(
                    path = %path.display(),
                    module = %taken.key(),
                    "module already generated by another schema"
                );
                listing.failures.push(Error::OutputCollision {
                    module: taken.key().clone(),
                    first: taken.get().clone(),
                    second: path.to_path_buf(),
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(path.to_path_buf());
                listing.files.push(path.to_path_buf());
            }
        }
    }
    Ok(listing)
}

/// Generate every schema file of `schema_dir` into `output_dir`.
///
/// Files are processed in parallel and independently. Returns the written
/// module paths; any failure, including entries [`schema_files`] could not
/// take, turns the whole run into [`Error::Batch`].
pub fn generate_dir(
    schema_dir: &Path,
    output_dir: &Path,
    config: &GeneratorConfig,
) -> Result<Vec<PathBuf>> {
    let SchemaListing {
        files,
        mut failures,
    } = schema_files(schema_dir)?;
    if output_dir.exists() && !output_dir.is_dir() {
        return Err(Error::NotADirectory(output_dir.to_path_buf()));
    }
    fs::create_dir_all(output_dir).map_err(|source| Error::Write {
        path: output_dir.to_path_buf(),
        source,
    })?;
    info!(
        schema_dir = %schema_dir.display(),
        files = files.len(),
        skipped = failures.len(),
        "generating directory"
    );

    let results: Vec<_> = files
        .par_iter()
        .map(|schema| {
            let output = output_dir.join(module_name(schema));
            generate_file(schema, &output, config).map(|written| written.then_some(output))
        })
        .collect();

    let mut written = Vec::new();
    for result in results {
        match result {
            Ok(Some(path)) => written.push(path),
            Ok(None) => {}
            Err(err) => failures.push(err),
        }
    }

    if failures.is_empty() {
        Ok(written)
    } else {
        Err(Error::Batch(failures))
    }
}
