//! Error reporting: everything lands in `error.log` next to the assets,
//! plus a message box so failures are visible outside a terminal.

use std::{fs::OpenOptions, io::Write, panic::PanicInfo, path::PathBuf};

fn log_path() -> PathBuf {
    let mut path = crate::asset::base_path();
    path.push("error.log");
    path
}

fn append(message: String) {
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path())
    {
        let _ = writeln!(file, "{}\n", message);
    }
}

#[track_caller]
pub fn nonfatal_error(message: &str) {
    append(format!(
        "nonfatal at {}:\n{}",
        std::panic::Location::caller(),
        message
    ));
    println!(
        "{}",
        console::style("A nonfatal error occurred. See error.log for details.").red()
    );
    let _ = msgbox::create("Error", message, msgbox::IconType::Error);
}

pub trait ResultExt<T> {
    /// Reports the error and substitutes a default value instead of
    /// unwinding. For problems the program can limp past.
    fn unwrap_nonfatal(self) -> T;
}

impl<T: Default, E: std::error::Error> ResultExt<T> for Result<T, E> {
    #[track_caller]
    fn unwrap_nonfatal(self) -> T {
        self.unwrap_or_else(|error| {
            nonfatal_error(&error.to_string());
            Default::default()
        })
    }
}

fn payload_message<'a>(info: &'a PanicInfo) -> &'a str {
    let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
        *s
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s
    } else {
        "An unknown error occured"
    };
    payload
        .strip_prefix("called `Result::unwrap()` on an `Err` value: ")
        .unwrap_or(payload)
}

fn panic_handler(info: &PanicInfo) {
    append(info.to_string());
    println!(
        "{}",
        console::style("A fatal error occurred. See error.log for details.").red()
    );
    let _ = msgbox::create("Fatal Error", payload_message(info), msgbox::IconType::Error);
}

/// Clears the previous run's log and routes panics through the handler.
/// Call once, before anything can fail.
pub(crate) fn install() {
    let _ = std::fs::remove_file(log_path());
    std::panic::set_hook(Box::new(panic_handler));
}
