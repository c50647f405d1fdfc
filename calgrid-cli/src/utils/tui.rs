use std::borrow::Cow;
use std::future::Future;
use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner on stderr; hidden when stderr is not a terminal so piped output
/// carries no control sequences.
pub fn create_spinner(message: impl Into<Cow<'static, str>>) -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["◐", "◓", "◑", "◒", "●"])
        .template("{spinner} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Await `task` while a spinner shows `message`, clearing it afterwards.
pub async fn with_spinner<F: Future>(message: impl Into<Cow<'static, str>>, task: F) -> F::Output {
    let spinner = create_spinner(message);
    let output = task.await;
    spinner.finish_and_clear();
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_with_spinner_returns_task_output() {
        let value = with_spinner("Loading", async { 42 }).await;
        assert_eq!(value, 42);
    }
}
