//! Dialog presentation capability and the built-in skins.
//!
//! The orchestrator hands a [`DialogRequest`] to a [`DialogPresenter`] and
//! waits for exactly one [`DialogChoice`]. When [`DialogRequest::can_dismiss`]
//! is false the presenter must not offer a "later" affordance.

use std::io::IsTerminal;

use async_trait::async_trait;
use log::warn;
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout,
};
use tokio::sync::Mutex;

use crate::settings::DialogTexts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogChoice {
    Update,
    Later,
    /// The presenter went away without an answer, e.g. its input closed.
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogRequest {
    pub is_force_update: bool,
    pub app_name: Option<String>,
    pub texts: DialogTexts,
    pub show_later_button: bool,
}

impl DialogRequest {
    /// False when the update is forced or the later button is disabled.
    #[must_use]
    pub fn can_dismiss(&self) -> bool {
        !self.is_force_update && self.show_later_button
    }

    #[must_use]
    pub fn message(&self) -> String {
        self.texts
            .message_for(self.is_force_update, self.app_name.as_deref())
    }
}

#[async_trait]
pub trait DialogPresenter: Send + Sync {
    /// Whether a compatible UI root exists to render into.
    fn is_available(&self) -> bool {
        true
    }

    async fn present(&self, request: DialogRequest) -> DialogChoice;
}

/// Minimal text prompt over any line-based input and output.
pub struct ConsoleDialog<R, W> {
    io: Mutex<(R, W)>,
    interactive: bool,
}

impl ConsoleDialog<BufReader<Stdin>, Stdout> {
    /// Prompt on the process's stdin and stdout.
    ///
    /// Reports itself unavailable unless both are attached to a terminal.
    #[must_use]
    pub fn stdio() -> Self {
        let interactive = std::io::stdin().is_terminal() && std::io::stdout().is_terminal();
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .interactive(interactive)
    }
}

impl<R, W> ConsoleDialog<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            io: Mutex::new((reader, writer)),
            interactive: true,
        }
    }

    /// Whether someone is there to answer the prompt.
    #[must_use]
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn into_inner(self) -> (R, W) {
        self.io.into_inner()
    }

    async fn prompt(&self, request: &DialogRequest) -> std::io::Result<DialogChoice> {
        let mut io = self.io.lock().await;
        let (reader, writer) = &mut *io;
        let dismissible = request.can_dismiss();

        let options = if dismissible {
            format!(
                "[u] {}  [l] {}",
                request.texts.update_label, request.texts.later_label
            )
        } else {
            format!("[u] {}", request.texts.update_label)
        };
        let header = format!("{}\n{}\n{options}\n", request.texts.title, request.message());
        writer.write_all(header.as_bytes()).await?;

        loop {
            writer.write_all(b"> ").await?;
            writer.flush().await?;

            let mut line = String::new();
            if reader.read_line(&mut line).await? == 0 {
                return Ok(DialogChoice::Closed);
            }

            match parse_answer(&line, dismissible) {
                Some(choice) => return Ok(choice),
                None => writer.write_all(format!("{options}\n").as_bytes()).await?,
            }
        }
    }
}

fn parse_answer(line: &str, dismissible: bool) -> Option<DialogChoice> {
    match line.trim().to_ascii_lowercase().as_str() {
        "u" | "update" => Some(DialogChoice::Update),
        "l" | "later" if dismissible => Some(DialogChoice::Later),
        _ => None,
    }
}

#[async_trait]
impl<R, W> DialogPresenter for ConsoleDialog<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    fn is_available(&self) -> bool {
        self.interactive
    }

    async fn present(&self, request: DialogRequest) -> DialogChoice {
        match self.prompt(&request).await {
            Ok(choice) => choice,
            Err(error) => {
                warn!("Console update prompt failed: {error}");
                DialogChoice::Closed
            }
        }
    }
}

/// Caller-supplied renderer backed by a closure.
pub struct FnDialog<F> {
    render: F,
    available: bool,
}

impl<F> FnDialog<F>
where
    F: Fn(&DialogRequest) -> DialogChoice + Send + Sync,
{
    pub fn new(render: F) -> Self {
        Self {
            render,
            available: true,
        }
    }

    /// Report the UI root as missing, e.g. before the host window exists.
    #[must_use]
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }
}

#[async_trait]
impl<F> DialogPresenter for FnDialog<F>
where
    F: Fn(&DialogRequest) -> DialogChoice + Send + Sync,
{
    fn is_available(&self) -> bool {
        self.available
    }

    async fn present(&self, request: DialogRequest) -> DialogChoice {
        (self.render)(&request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(is_force_update: bool, show_later_button: bool) -> DialogRequest {
        DialogRequest {
            is_force_update,
            app_name: Some("Acme".to_string()),
            texts: DialogTexts::default(),
            show_later_button,
        }
    }

    async fn run_console(input: &'static str, request: DialogRequest) -> (DialogChoice, String) {
        let dialog = ConsoleDialog::new(input.as_bytes(), Vec::new());
        let choice = dialog.present(request).await;
        let (_, output) = dialog.into_inner();
        (
            choice,
            String::from_utf8(output).expect("console output is utf-8"),
        )
    }

    #[test]
    fn forced_or_buttonless_requests_cannot_be_dismissed() {
        assert!(request(false, true).can_dismiss());
        assert!(!request(true, true).can_dismiss());
        assert!(!request(false, false).can_dismiss());
    }

    #[tokio::test]
    async fn console_accepts_later_when_dismissible() {
        let (choice, output) = run_console("l\n", request(false, true)).await;

        assert_eq!(choice, DialogChoice::Later);
        assert!(output.starts_with("Update available\n"));
        assert!(output.contains("[l] Later"));
    }

    #[tokio::test]
    async fn console_hides_later_for_forced_update() {
        let (choice, output) = run_console("later\nu\n", request(true, true)).await;

        assert_eq!(choice, DialogChoice::Update);
        assert!(!output.contains("[l]"));
        assert!(output.contains("no longer supported"));
    }

    #[tokio::test]
    async fn console_reprompts_on_unknown_answer() {
        let (choice, output) = run_console("maybe\nUPDATE\n", request(false, true)).await;

        assert_eq!(choice, DialogChoice::Update);
        assert_eq!(output.matches("> ").count(), 2);
    }

    #[tokio::test]
    async fn console_end_of_input_never_answers() {
        let (dismissible, _) = run_console("", request(false, true)).await;
        let (forced, _) = run_console("", request(true, true)).await;
        let (abandoned, _) = run_console("maybe\n", request(true, true)).await;

        assert_eq!(dismissible, DialogChoice::Closed);
        assert_eq!(forced, DialogChoice::Closed);
        assert_eq!(abandoned, DialogChoice::Closed);
    }

    #[test]
    fn console_availability_follows_interactivity() {
        let attached = ConsoleDialog::new(&b""[..], Vec::new());
        let detached = ConsoleDialog::new(&b""[..], Vec::new()).interactive(false);

        assert!(attached.is_available());
        assert!(!detached.is_available());
    }

    #[tokio::test]
    async fn stdio_console_requires_a_terminal() {
        let expected = std::io::stdin().is_terminal() && std::io::stdout().is_terminal();

        assert_eq!(ConsoleDialog::stdio().is_available(), expected);
    }

    #[tokio::test]
    async fn fn_dialog_delegates_to_closure() {
        let dialog = FnDialog::new(|request: &DialogRequest| {
            if request.can_dismiss() {
                DialogChoice::Later
            } else {
                DialogChoice::Update
            }
        });

        assert!(dialog.is_available());
        assert_eq!(dialog.present(request(false, true)).await, DialogChoice::Later);
        assert_eq!(dialog.present(request(true, true)).await, DialogChoice::Update);
        assert!(!dialog.unavailable().is_available());
    }
}
