//! Output file naming
//!
//! Single and batch mode derive output names through the same rule: the
//! suffix goes between the file stem and its extension.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// File name of `input` with `suffix` inserted before the extension.
///
/// `scan.png` + `_cropped` → `scan_cropped.png`; `README` → `README_cropped`.
pub fn suffixed_file_name(input: &Path, suffix: &str) -> OsString {
    let mut name = input.file_stem().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    name
}

/// Output path next to `input`, keeping its directory and extension
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    input.with_file_name(suffixed_file_name(input, suffix))
}

/// Output path for `input` placed inside `output_dir`
pub fn output_path_in(output_dir: &Path, input: &Path, suffix: &str) -> PathBuf {
    output_dir.join(suffixed_file_name(input, suffix))
}
