//! Terminal output: progress on stderr, results on stdout or a file.

use std::fs;
use std::path::Path;

use video_analyzer::{Phase, StateSink, ViewState};

/// Prints the progress label each time the pipeline advances, and each
/// streamed event while analyzing.
#[derive(Debug, Default)]
pub struct TerminalSink;

impl StateSink for TerminalSink {
    fn publish(&self, state: &ViewState) {
        match state.phase {
            Phase::Working(_) => match (&state.activity, state.progress_label()) {
                (Some(activity), _) => eprintln!("   💬 {}", activity),
                (None, Some(label)) => eprintln!("⏳ {}", label),
                (None, None) => {}
            },
            Phase::Done => eprintln!("✅ 分析が完了しました"),
            Phase::Idle => {}
        }
    }
}

/// Write `content` to `path`, or to stdout when no path is given.
pub fn write_output(content: &str, path: Option<&Path>) -> std::io::Result<()> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
