//! Application orchestrator.
//! Resolves paths, opens the audit log, runs the import and maps the result to
//! an exit status. Resolution errors surface before the log is opened.

use chrono::Local;
use date_import::output as out;
use date_import::{AuditLog, ExitStatus, ImportError, config, run_import};
use tracing::{debug, error};

use crate::logging::init_tracing;
use date_import::cli::Args;

/// Run the CLI application.
pub fn run(args: Args) -> ExitStatus {
    if let Err(e) = init_tracing(args.effective_log_level()) {
        out::print_warn(&e.to_string());
    }
    debug!(level = %args.effective_log_level(), "Starting date_import: {:?}", args);

    let paths = match config::resolve(
        &args,
        &config::default_config_path(),
        &config::default_log_path(),
    ) {
        Ok(p) => p,
        Err(e) => {
            debug!(kind = "config_resolution", error = ?e, "path resolution failed");
            out::print_error(&e.to_string());
            return ExitStatus::Error;
        }
    };
    debug!(?paths, "resolved paths");

    let mut log = match AuditLog::open(&paths.log_file) {
        Ok(l) => l,
        Err(e) => {
            report_import_error(&e);
            return ExitStatus::Error;
        }
    };
    debug!(log = %log.path().display(), "audit log open");

    if args.dry_run {
        out::print_info("Dry run: nothing will be created or moved.");
    }

    match run_import(&paths, &mut log, Local::now(), args.dry_run) {
        Ok(outcome) => outcome.exit_status(),
        Err(e) => {
            if let Some(ie) = e.downcast_ref::<ImportError>() {
                report_import_error(ie);
            } else {
                error!(kind = "filesystem", "Import aborted: {e:#}");
                out::print_error(&format!("Import aborted: {e:#}"));
            }
            ExitStatus::Error
        }
    }
}

/// Structured event plus a plain stderr line, so the failure is visible even
/// when the subscriber could not be installed.
fn report_import_error(e: &ImportError) {
    match e {
        ImportError::LogOpen { path, .. } | ImportError::LogWrite { path, .. } => {
            error!(kind = "log_sink", path = %path.display(), "{e}")
        }
        ImportError::MirrorWrite { .. } => error!(kind = "log_sink", "{e}"),
        ImportError::SourceScan { path, .. } => {
            error!(kind = "source_scan", path = %path.display(), "{e}")
        }
        _ => error!(kind = "import_error", "{e}"),
    }
    out::print_error(&e.to_string());
}
