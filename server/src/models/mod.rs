use std::path::{Component, Path};

pub type CalendarName = String;
pub type CalendarContent = String;

pub const CALENDAR_EXTENSION: &str = "ics";
pub const CALENDAR_MEDIA_TYPE: &str = "text/calendar; charset=utf-8";

const FORBIDDEN_CHARS: [char; 3] = ['/', '\\', '\0'];

/// A calendar name must map to exactly one file directly inside the catalog
/// directory, so separators and relative components are rejected before any
/// path is built from it.
pub fn is_valid_calendar_name(name: &str) -> bool {
    if name.is_empty() || name.contains(FORBIDDEN_CHARS) {
        return false;
    }

    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

pub fn calendar_file_name(name: &str) -> String {
    format!("{name}.{CALENDAR_EXTENSION}")
}
