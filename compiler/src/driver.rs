//! File handling around the compiler: which files to read, where the outputs
//! go, and compiling a batch of classes in parallel.
use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use rayon::prelude::*;

use crate::{
    parser::parse_class, token_reader::TokenReader, tokenizer::Tokenizer, vm_compilation_engine,
    xml_compilation_engine,
};

pub const SOURCE_EXTENSION: &str = "jack";

#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Also write the parse tree as `<Name>.xml`.
    pub xml: bool,
    /// Also write the token list as `<Name>T.xml`.
    pub tokens: bool,
    /// Write outputs here instead of next to each source.
    pub out_dir: Option<PathBuf>,
}

fn is_source(path: &Path) -> bool {
    path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(SOURCE_EXTENSION)
}

/// A single `.jack` file, or every `.jack` file directly inside a directory,
/// sorted by name.
pub fn collect_sources(input: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if input.is_dir() {
        let mut sources = Vec::new();
        for entry in fs::read_dir(input).with_context(|| format!("reading {}", input.display()))? {
            let path = entry?.path();
            if is_source(&path) {
                sources.push(path);
            }
        }
        sources.sort();
        return Ok(sources);
    }
    if is_source(input) {
        return Ok(vec![input.to_path_buf()]);
    }
    bail!(
        "{} is neither a .{} file nor a directory",
        input.display(),
        SOURCE_EXTENSION
    )
}

/// `dir/Name.jack` becomes `<out_dir or dir>/Name<suffix>.<ext>`.
pub fn output_path(source: &Path, out_dir: Option<&Path>, suffix: &str, ext: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = match out_dir {
        Some(dir) => dir.to_path_buf(),
        None => source.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    dir.join(format!("{stem}{suffix}.{ext}"))
}

/// Compiles one source file and returns the path of its VM output. A file
/// that fails to compile or to write leaves none of its outputs behind.
pub fn compile_file(tokenizer: &Tokenizer, source: &Path, options: &Options) -> anyhow::Result<PathBuf> {
    let text = fs::read_to_string(source).with_context(|| format!("reading {}", source.display()))?;
    let tokens = tokenizer
        .tokenize(&text)
        .with_context(|| source.display().to_string())?;

    let mut tokens_xml = Vec::new();
    if options.tokens {
        xml_compilation_engine::write_tokens(&tokens, &mut tokens_xml)?;
    }
    let class = parse_class(&mut TokenReader::new(tokens)).with_context(|| source.display().to_string())?;
    let mut tree_xml = Vec::new();
    if options.xml {
        xml_compilation_engine::write_class(&class, &mut tree_xml)?;
    }
    let vm = vm_compilation_engine::compile(&class).with_context(|| source.display().to_string())?;

    let out_dir = options.out_dir.as_deref();
    let vm_path = output_path(source, out_dir, "", "vm");
    let mut outputs = vec![(vm_path.clone(), vm.into_bytes())];
    if options.xml {
        outputs.push((output_path(source, out_dir, "", "xml"), tree_xml));
    }
    if options.tokens {
        outputs.push((output_path(source, out_dir, "T", "xml"), tokens_xml));
    }
    write_all(&outputs)?;
    log::info!("{} -> {}", source.display(), vm_path.display());
    return Ok(vm_path);
}

fn staged_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Writes every output to a staging file, then renames them into place. On
/// failure the staging files and any output already renamed are removed.
fn write_all(outputs: &[(PathBuf, Vec<u8>)]) -> anyhow::Result<()> {
    let mut created = Vec::new();
    let result = stage_and_place(outputs, &mut created);
    if result.is_err() {
        for path in &created {
            let _ = fs::remove_file(path);
        }
    }
    result
}

fn stage_and_place(outputs: &[(PathBuf, Vec<u8>)], created: &mut Vec<PathBuf>) -> anyhow::Result<()> {
    for (path, data) in outputs {
        let tmp = staged_path(path);
        fs::write(&tmp, data).with_context(|| format!("writing {}", tmp.display()))?;
        created.push(tmp);
    }
    for (path, _) in outputs {
        fs::rename(staged_path(path), path).with_context(|| format!("writing {}", path.display()))?;
        created.push(path.clone());
    }
    return Ok(());
}

/// Compiles everything `input` names. All files are attempted; the error
/// counts the ones that failed, each of which has already been logged.
pub fn run(input: &Path, options: &Options) -> anyhow::Result<Vec<PathBuf>> {
    let sources = collect_sources(input)?;
    if sources.is_empty() {
        bail!("no .{} files in {}", SOURCE_EXTENSION, input.display());
    }
    if let Some(dir) = &options.out_dir {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let tokenizer = Tokenizer::new();
    let results: Vec<_> = sources
        .par_iter()
        .map(|source| compile_file(&tokenizer, source, options))
        .collect();

    let mut outputs = Vec::new();
    let mut failures = 0;
    for result in results {
        match result {
            Ok(path) => outputs.push(path),
            Err(err) => {
                log::error!("{err:#}");
                failures += 1;
            }
        }
    }
    if failures > 0 {
        bail!("{} of {} files failed to compile", failures, sources.len());
    }
    return Ok(outputs);
}
