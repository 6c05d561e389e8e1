use std::fmt::Display;
use std::io::Write;

use chrono::{DateTime, Local, TimeZone};
use env_logger::{Env, Target};
use log::Level;

/// Render one log line: `[YYYY-MM-DD HH:MM:SS] LEVEL message`, with the
/// level padded to five characters so messages line up.
pub fn format_line<Tz>(at: &DateTime<Tz>, level: Level, message: impl Display) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "[{}] {:<5} {}",
        at.format("%Y-%m-%d %H:%M:%S"),
        level,
        message
    )
}

/// Send log lines to stdout, each stamped with the local time.
/// `RUST_LOG` overrides the default `info` level.
pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stdout)
        .format(|buf, record| {
            writeln!(
                buf,
                "{}",
                format_line(&Local::now(), record.level(), record.args())
            )
        })
        .init();
}
