// Per-file orchestration: load, transform, compare, report, write back.
use crate::embedded::{generate_header, EmbeddedArray};
use crate::patterns::{CallSiteRewriter, RegistrationRewriter};
use crate::walker::{find_files, FileSelector};
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Outcome for a single processed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileChange {
    Unchanged,
    WouldChange,
    Changed,
}

/// Per-run tally, returned to the caller rather than kept in any global.
pub struct ConvertSummary {
    pub files_found: usize,
    pub files_modified: usize,
    pub dry_run: bool,
}

impl ConvertSummary {
    pub fn print(&self) {
        if self.dry_run {
            println!(
                "\nDry run complete. {} files would be modified.",
                self.files_modified
            );
        } else {
            println!(
                "\nConversion complete! Modified {} files.",
                self.files_modified
            );
        }
    }
}

/// Rewrite registration-table string literals in `wrap_*.cpp` files.
pub fn convert_registrations(root: &Path, dry_run: bool) -> Result<ConvertSummary> {
    let rewriter = RegistrationRewriter::new();
    let selector = FileSelector::PrefixAndExtension {
        prefix: "wrap_",
        extension: "cpp",
    };
    convert_tree(root, selector, "wrap_*.cpp", dry_run, |text| {
        rewriter.rewrite(text)
    })
}

/// Rewrite API call sites in `.lua` files.
pub fn convert_calls(root: &Path, dry_run: bool) -> Result<ConvertSummary> {
    let rewriter = CallSiteRewriter::new();
    convert_tree(root, FileSelector::Extension("lua"), ".lua", dry_run, |text| {
        rewriter.rewrite(text)
    })
}

fn convert_tree<F>(
    root: &Path,
    selector: FileSelector,
    label: &str,
    dry_run: bool,
    transform: F,
) -> Result<ConvertSummary>
where
    F: Fn(&str) -> String,
{
    if !root.is_dir() {
        bail!("{} is not a directory", root.display());
    }

    let files = find_files(root, selector);
    if files.is_empty() {
        bail!("no {} files found in {}", label, root.display());
    }

    println!("Found {} {} files", files.len(), label);
    println!(
        "{} files...",
        if dry_run { "Analyzing" } else { "Processing" }
    );

    let mut files_modified = 0;
    for path in &files {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        let converted = transform(&content);
        if converted == content {
            debug!("Unchanged: {}", path.display());
            continue;
        }

        files_modified += 1;
        let relative = path.strip_prefix(root).unwrap_or(path);
        if dry_run {
            println!("Would modify: {}", relative.display());
        } else {
            fs::write(path, converted)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Modified: {}", relative.display());
        }
    }

    Ok(ConvertSummary {
        files_found: files.len(),
        files_modified,
        dry_run,
    })
}

/// Rewrite call sites inside the byte-array payload of one generated
/// header, re-serializing the declaration in place. Structural or decode
/// failures are reported and leave the file untouched.
pub fn convert_embedded(header_path: &Path, dry_run: bool) -> Result<FileChange> {
    if !header_path.is_file() {
        bail!("{} is not a file", header_path.display());
    }

    let header = fs::read_to_string(header_path)
        .with_context(|| format!("failed to read {}", header_path.display()))?;

    let array = match EmbeddedArray::extract(&header) {
        Ok(array) => array,
        Err(e) => {
            eprintln!("Error: {} ({})", e, header_path.display());
            return Ok(FileChange::Unchanged);
        }
    };

    let lua_code = match array.text() {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: {} ({})", e, header_path.display());
            return Ok(FileChange::Unchanged);
        }
    };

    let converted = CallSiteRewriter::new().rewrite(&lua_code);
    if converted == lua_code {
        return Ok(FileChange::Unchanged);
    }

    if dry_run {
        println!(
            "Would modify embedded Lua code in {}",
            header_path.display()
        );
        return Ok(FileChange::WouldChange);
    }

    let new_header = array.replace_in(&header, converted.as_bytes());
    fs::write(header_path, new_header)
        .with_context(|| format!("failed to write {}", header_path.display()))?;
    println!("Modified embedded Lua code in {}", header_path.display());

    Ok(FileChange::Changed)
}

/// Generate a fresh header embedding `payload_path` verbatim.
pub fn generate_embedded_header(payload_path: &Path, output_path: &Path) -> Result<()> {
    if !payload_path.is_file() {
        bail!("{} is not a file", payload_path.display());
    }

    let payload = fs::read(payload_path)
        .with_context(|| format!("failed to read {}", payload_path.display()))?;

    let filename = payload_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("payload.lua");

    let header = generate_header(filename, &payload);
    fs::write(output_path, header)
        .with_context(|| format!("failed to write {}", output_path.display()))?;

    println!(
        "Generated {} from {}",
        output_path.display(),
        payload_path.display()
    );

    Ok(())
}
