//! C# emitter: one `<Short>.cs` file per family, one `public const string` per icon.

use crate::error::EmitError;
use crate::fetch::Constant;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

/// Extension of generated files.
pub const FILE_EXTENSION: &str = "cs";

/// Current local time as `DD/MM/YYYY HH:MM:SS`, or UTC when the local offset
/// cannot be determined. Call before any worker thread is spawned.
pub fn generation_timestamp() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    format_timestamp(now)
}

pub fn format_timestamp(at: OffsetDateTime) -> String {
    let format = time::macros::format_description!("[day]/[month]/[year] [hour]:[minute]:[second]");
    at.format(format)
        .unwrap_or_else(|_| at.unix_timestamp().to_string())
}

/// Renders the whole file for one family. Pure: same inputs, same bytes.
pub fn render_family_file(
    project: &str,
    short_name: &str,
    constants: &[Constant],
    timestamp: &str,
) -> String {
    let mut w = String::new();
    // Writing into a String cannot fail.
    let _ = write!(
        w,
        "//  =======================================================\n\
         //  |  This file was auto-generated. {timestamp}  |\n\
         //  =======================================================\n\
         \n\
         // Copyright (c) UI 2024\n\
         // {project} licenses this file to you under the MIT license\n\
         // See the license here https://github.com/LumexUI/lumexui/blob/main/LICENSE\n\
         \n\
         namespace {project};\n\
         \n\
         public partial class Icons\n\
         {{\n\
         \tpublic partial class {short_name}\n    {{\n"
    );
    for constant in constants {
        let _ = writeln!(
            w,
            "\t\tpublic const string {} = \"{}\";",
            constant.name, constant.body
        );
    }
    w.push_str("\t}\n}");
    w
}

/// Path of the generated file for `short_name` inside `dir`.
pub fn family_file_path(dir: &Path, short_name: &str) -> PathBuf {
    dir.join(format!("{}.{}", short_name, FILE_EXTENSION))
}

/// Writes (truncating) the family file into `dir`, creating `dir` if needed.
/// Families without constants are skipped and `Ok(None)` is returned.
pub fn write_family_file(
    dir: &Path,
    project: &str,
    short_name: &str,
    constants: &[Constant],
    timestamp: &str,
) -> Result<Option<PathBuf>, EmitError> {
    if constants.is_empty() {
        tracing::debug!(family = short_name, "no constants; skipping file");
        return Ok(None);
    }

    let path = family_file_path(dir, short_name);
    let io_err = |source| EmitError::Io {
        path: path.clone(),
        source,
    };
    fs::create_dir_all(dir).map_err(io_err)?;
    let content = render_family_file(project, short_name, constants, timestamp);
    fs::write(&path, content).map_err(io_err)?;

    tracing::info!(path = %path.display(), constants = constants.len(), "wrote icon file");
    Ok(Some(path))
}
