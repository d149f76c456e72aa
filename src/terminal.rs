use crate::capture_client::core::Msg;
use crate::capture_client::upload_form::UploadForm;
use crate::logger::interface::Logger;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Capture,
    Upload(PathBuf),
    Quit,
}

pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map(|(word, rest)| (word, rest.trim()))
        .unwrap_or((line, ""));

    match (word, rest) {
        ("capture", "") | ("c", "") => Some(Command::Capture),
        ("upload", path) | ("u", path) if !path.is_empty() => {
            Some(Command::Upload(PathBuf::from(path)))
        }
        ("quit", "") | ("q", "") | ("exit", "") => Some(Command::Quit),
        _ => None,
    }
}

/// Feeds commands from `input` to the capture client until `quit` or end of
/// input, then asks it to shut down.
pub fn run(
    input: impl BufRead,
    msg_sender: Sender<Msg>,
    logger: Arc<dyn Logger + Send + Sync>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let logger = logger.with_namespace("terminal");
    logger.info("Commands: capture | upload <path> | quit")?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Some(Command::Capture) => msg_sender.send(Msg::CaptureClicked)?,
            Some(Command::Upload(path)) => {
                msg_sender.send(Msg::UploadSubmitted(UploadForm::with_file(path)))?
            }
            Some(Command::Quit) => break,
            None => logger.info(&format!("Unknown command: {}", line.trim()))?,
        }
    }

    msg_sender.send(Msg::Shutdown)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::impl_fake::LoggerFake;
    use std::sync::mpsc::channel;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("capture"), Some(Command::Capture));
        assert_eq!(parse_command("  c "), Some(Command::Capture));
        assert_eq!(
            parse_command("upload /tmp/my photo.jpg"),
            Some(Command::Upload(PathBuf::from("/tmp/my photo.jpg")))
        );
        assert_eq!(parse_command("upload"), None);
        assert_eq!(parse_command("capture now"), None);
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command("dance"), None);
    }

    #[test]
    fn test_run_sends_messages_then_shutdown() {
        let (sender, receiver) = channel();
        let input = "capture\n\nupload bin.png\nwhat\nquit\ncapture\n".as_bytes();

        run(input, sender, Arc::new(LoggerFake::new())).unwrap();

        let msgs: Vec<Msg> = receiver.try_iter().collect();
        assert_eq!(msgs.len(), 3);
        assert!(matches!(msgs[0], Msg::CaptureClicked));
        match &msgs[1] {
            Msg::UploadSubmitted(form) => assert_eq!(form.file, Some(PathBuf::from("bin.png"))),
            other => panic!("unexpected message: {:?}", other),
        }
        assert!(matches!(msgs[2], Msg::Shutdown));
    }
}
