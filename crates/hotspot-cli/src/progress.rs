use crate::output::OutputWriter;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while a backend call is pending; hidden in JSON mode
pub fn create_spinner(output: &OutputWriter, message: &str) -> ProgressBar {
    if output.is_json() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Clear the spinner line; the command prints its own result
pub fn finish(pb: &ProgressBar) {
    pb.finish_and_clear();
}
