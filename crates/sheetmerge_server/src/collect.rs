//! Local input discovery for the `merge` command.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use sheetmerge_io_xlsx::{SpecInputFile, TUP_WORKBOOK_PATTERNS_DEFAULT};

use crate::error::{ServerError, ServerResult};

/// Turn CLI inputs into merge inputs.
///
/// Directories are expanded one level deep, keeping files whose name matches
/// any of `patterns` (the workbook extensions when empty). Any other path is
/// taken as-is; one that cannot be opened is later skipped by the merge.
pub fn collect_input_files(
    inputs: &[PathBuf],
    patterns: &[String],
) -> ServerResult<Vec<SpecInputFile>> {
    let set_patterns = compile_patterns(patterns)?;

    let mut l_files = Vec::new();
    for path in inputs {
        if path.is_dir() {
            collect_dir(path, &set_patterns, &mut l_files)?;
        } else {
            l_files.push(SpecInputFile::from_path(path));
        }
    }
    Ok(l_files)
}

fn collect_dir(
    path_dir: &Path,
    set_patterns: &GlobSet,
    l_files: &mut Vec<SpecInputFile>,
) -> ServerResult<()> {
    for entry in std::fs::read_dir(path_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name_file = entry.file_name();
        if set_patterns.is_match(Path::new(&name_file)) {
            l_files.push(SpecInputFile::from_path(entry.path()));
        } else {
            tracing::debug!(path = %entry.path().display(), "not a workbook pattern, ignored");
        }
    }
    Ok(())
}

fn compile_patterns(patterns: &[String]) -> ServerResult<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    if patterns.is_empty() {
        for pattern in TUP_WORKBOOK_PATTERNS_DEFAULT {
            builder.add(compile_glob(pattern)?);
        }
    } else {
        for pattern in patterns {
            builder.add(compile_glob(pattern)?);
        }
    }
    builder
        .build()
        .map_err(|e| ServerError::InvalidPattern(e.to_string()))
}

fn compile_glob(pattern: &str) -> ServerResult<Glob> {
    Glob::new(pattern).map_err(|e| ServerError::InvalidPattern(format!("{pattern:?}: {e}")))
}
