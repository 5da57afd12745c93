use crate::{config::Settings, progress::ProgressBarSink};
use keyspace::{Error, FormatSink, Pipeline, RunReport, ShutdownCoordinator, SinkError};
use std::io;

/// Exit status for a configuration that was rejected before anything ran.
pub const EXIT_INVALID_CONFIG: u8 = 2;
/// Exit status for a run that failed before it could start.
pub const EXIT_FAILURE: u8 = 1;

/// Validates `settings`, opens the output and runs the pipeline to the end.
///
/// Nothing is created on disk unless validation succeeds. Missing parent
/// directories of the output are created after that.
///
/// # Errors
///
/// - [`Error::Config`] if the configuration is invalid.
/// - [`Error::Sink`] if the output file or its directory cannot be created.
pub async fn execute(
    settings: &Settings,
    shutdown: ShutdownCoordinator,
) -> Result<RunReport, Error> {
    let plan = settings.generation.validate()?;

    if cfg!(debug_assertions) {
        #[cfg(feature = "tracing")]
        tracing::debug!("Validated plan: {plan:#?}");
    }

    if let Some(parent) = settings
        .output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent).map_err(SinkError::from)?;
    }
    let sink = FormatSink::create(&settings.output, settings.format)?;
    let progress = ProgressBarSink::new(plan.total(), settings.show_progress);

    #[cfg(feature = "tracing")]
    tracing::info!(
        "Writing {} output to {}",
        settings.format,
        settings.output.display()
    );

    Ok(Pipeline::with_shutdown(plan, shutdown)
        .run(sink, progress)
        .await)
}

/// Maps a failure to start a run onto a process exit status.
pub const fn exit_code(error: &Error) -> u8 {
    match error {
        Error::Config(_) => EXIT_INVALID_CONFIG,
        Error::Sink(_) => EXIT_FAILURE,
    }
}

/// Exit status for a failure while building settings. Unreadable inputs are
/// failures; everything else is an invalid configuration.
pub fn settings_exit_code(error: &anyhow::Error) -> u8 {
    if error.chain().any(|cause| cause.is::<io::Error>()) {
        EXIT_FAILURE
    } else {
        EXIT_INVALID_CONFIG
    }
}
