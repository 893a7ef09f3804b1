use std::io::Write;

use log::LevelFilter;

/// Install the global logger.
///
/// Plain messages at info level by default; `verbose` adds debug output
/// with timestamps and levels, `quiet` keeps only warnings and errors.
/// `RUST_LOG` still overrides the level when set.
pub(crate) fn init_logging(quiet: bool, verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if verbose {
        builder.format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        });
    } else {
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }
    builder.parse_default_env();
    builder.init();
}
