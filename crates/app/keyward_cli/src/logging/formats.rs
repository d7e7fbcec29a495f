use flexi_logger::DeferredNow;
use log::{Level, Record};

/// `LEVEL message`, with the module path on debug and trace lines.
pub fn cli_format(
    w: &mut dyn std::io::Write,
    _now: &mut DeferredNow,
    record: &Record,
) -> std::io::Result<()> {
    match record.level() {
        Level::Debug | Level::Trace => write!(
            w,
            "{:<5} [{}] {}",
            record.level(),
            record.module_path().unwrap_or("<unknown>"),
            record.args()
        ),
        level => write!(w, "{:<5} {}", level, record.args()),
    }
}
