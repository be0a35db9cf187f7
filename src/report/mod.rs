//! Report rendering and presentation.
//!
//! One renderer, parameterized by verbosity; the verbose and terse layouts
//! are two configurations of the same code path. Presentation goes through
//! the `ReportSink` seam: plain console output by default, a blocking
//! dialog on Windows.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::audio::EndpointRecord;

/// How much of each record the report shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Index and description only
    Terse,

    /// Index, id, state, and all name fields
    Verbose,
}

/// Formats endpoint records as a multi-line text report, one line per
/// device, in snapshot order. Absent fields render empty.
pub struct ReportRenderer {
    verbosity: Verbosity,
}

impl ReportRenderer {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    pub fn render(&self, records: &[EndpointRecord]) -> String {
        let mut out = String::new();
        for record in records {
            match self.verbosity {
                Verbosity::Verbose => {
                    // Infallible writes into a String
                    let _ = writeln!(
                        out,
                        "[{}] id={}, state={}, name={}, desc={}, audioif={}",
                        record.index,
                        field(&record.id),
                        record.state,
                        field(&record.friendly_name),
                        field(&record.description),
                        field(&record.interface_name),
                    );
                }
                Verbosity::Terse => {
                    let _ = writeln!(out, "[{}] {}", record.index, field(&record.description));
                }
            }
        }
        out
    }
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/// Display surface for the finished report.
pub trait ReportSink {
    /// Show the user the full report. Implementations may block until the
    /// user acknowledges it or simply emit it for non-interactive use.
    fn present(&self, title: &str, body: &str) -> Result<()>;
}

/// Non-blocking sink that writes the report to stdout.
pub struct ConsoleSink;

impl ReportSink for ConsoleSink {
    fn present(&self, title: &str, body: &str) -> Result<()> {
        println!("{}", title);
        print!("{}", body);
        Ok(())
    }
}

/// Blocking modal dialog, the original presentation of this tool.
#[cfg(windows)]
pub struct DialogSink;

#[cfg(windows)]
impl ReportSink for DialogSink {
    fn present(&self, title: &str, body: &str) -> Result<()> {
        use windows::Win32::Foundation::HWND;
        use windows::Win32::UI::WindowsAndMessaging::{MB_OK, MessageBoxW};
        use windows::core::HSTRING;

        let text = HSTRING::from(body);
        let caption = HSTRING::from(title);
        unsafe {
            // Blocks until the user dismisses the dialog
            let _ = MessageBoxW(HWND::default(), &text, &caption, MB_OK);
        }
        Ok(())
    }
}
