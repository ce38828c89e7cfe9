use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use iconsync_lib::{ErrorOutput, IconSyncError, SyncOutput, OUTPUT_VERSION};

use crate::cli::OutputFormat;

pub fn write_output(
    body: &SyncOutput,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = match format {
        OutputFormat::Json => serde_json::to_string(body)?,
        OutputFormat::Pretty => {
            let colorize = output.is_none() && io::stdout().is_terminal();
            format_pretty(body, colorize)
        }
    };
    match output {
        Some(path) => std::fs::write(path, content)?,
        None => println!("{}", content.trim_end()),
    }
    Ok(())
}

pub fn render_error(err: IconSyncError, format: OutputFormat, output: Option<PathBuf>) -> ExitCode {
    let error_payload = err.to_payload();
    let payload = SyncOutput::Error(ErrorOutput {
        version: OUTPUT_VERSION.to_string(),
        message: Some(error_payload.message.clone()),
        error: error_payload,
    });

    if let Err(write_err) = write_output(&payload, format, output.as_deref()) {
        eprintln!("Failed to write error output: {}", write_err);
    }

    // Reserve exit code 2 for fatal errors.
    ExitCode::from(2)
}

pub fn format_pretty(body: &SyncOutput, colorize: bool) -> String {
    let mut buf = String::new();
    match body {
        SyncOutput::Sync(out) => {
            let name_width = out
                .icons
                .iter()
                .map(|i| i.relative_path.len())
                .chain(std::iter::once("name".len()))
                .max()
                .unwrap_or(4);
            let header = format!("{:<name_width$}  {:>10}", "name", "size");
            writeln!(buf, "{}", color(&header, "1", colorize)).ok();
            for icon in &out.icons {
                writeln!(buf, "{:<name_width$}  {:>10}", icon.relative_path, icon.size).ok();
            }
            writeln!(buf).ok();
            let done = format!("Finished exporting {} icons", out.count);
            writeln!(buf, "{} ({} bytes)", color(&done, "32", colorize), out.total_bytes).ok();
            writeln!(buf, "Index: {}", out.index_file.display()).ok();
        }
        SyncOutput::Error(out) => {
            let header = color("[ERROR]", "31", colorize);
            let message = out
                .message
                .as_deref()
                .unwrap_or(out.error.message.as_str());
            writeln!(buf, "{} {}", header, message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
        }
    }
    buf
}

fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}
