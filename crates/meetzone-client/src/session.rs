//! Interactive session: the meeting form in a terminal.
//!
//! A [`Session`] owns the participant registry and the raw form fields for
//! the lifetime of the process. Each line typed is parsed into a
//! [`SessionCommand`] and applied synchronously; only copying to the
//! clipboard is handed back to the driver loop as [`Outcome::Copy`].

use std::io::Write;
use std::str::FromStr;

use meetzone_core::{
    Language, MeetingForm, ParticipantId, Registry, ResultsLayout, calculate, city_label, generate,
    render_message, render_results,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::time::Instant;
use tracing::debug;

use crate::clipboard::{ClipboardBackend, Clipboards, Flash};
use crate::commands::zones::write_zones;
use crate::error::{ClientError, ClientResult};

const HELP: &str = "\
Commands:
  title <text>          set the meeting title
  date <YYYY-MM-DD>     set the meeting date
  time <HH:MM>          set the meeting time
  zone <Area/City>      set the base time zone
  lang <es|en>          set the message language
  add <name> @ <zone>   add a participant
  remove <id>           remove a participant
  list                  list participants
  show                  show the meeting fields
  calc                  show every participant's local time
  message               generate the invitation message
  copy                  copy the last message to the clipboard
  zones                 list base time zones
  help                  show this help
  quit                  leave";

/// One line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Title(String),
    Date(String),
    Time(String),
    Zone(String),
    Lang(String),
    Add { name: String, zone: String },
    Remove(String),
    List,
    Show,
    Calc,
    Message,
    Copy,
    Zones,
    Help,
    Quit,
    Empty,
}

impl FromStr for SessionCommand {
    type Err = ClientError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "" => Self::Empty,
            "title" => Self::Title(rest.to_string()),
            "date" => Self::Date(rest.to_string()),
            "time" => Self::Time(rest.to_string()),
            "zone" => Self::Zone(required(rest, "zone <Area/City>")?),
            "lang" | "language" => Self::Lang(required(rest, "lang <es|en>")?),
            "add" => {
                let (name, zone) = split_participant(rest);
                Self::Add {
                    name: name.to_string(),
                    zone: required(zone, "add <name> @ <zone>")?,
                }
            }
            "remove" | "rm" => Self::Remove(required(rest, "remove <id>")?),
            "list" | "ls" => Self::List,
            "show" => Self::Show,
            "calc" | "calculate" => Self::Calc,
            "message" | "msg" => Self::Message,
            "copy" => Self::Copy,
            "zones" => Self::Zones,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => {
                return Err(ClientError::Input(format!(
                    "unknown command '{}', type 'help'",
                    other
                )));
            }
        };
        Ok(command)
    }
}

/// Splits `name @ Area/City`. Without an `@`, the last word is the zone.
fn split_participant(rest: &str) -> (&str, &str) {
    if let Some((name, zone)) = rest.rsplit_once('@') {
        return (name.trim(), zone.trim());
    }
    match rest.rsplit_once(char::is_whitespace) {
        Some((name, zone)) => (name.trim(), zone),
        None => ("", rest),
    }
}

fn required(value: &str, usage: &str) -> ClientResult<String> {
    if value.is_empty() {
        Err(ClientError::Input(format!("usage: {}", usage)))
    } else {
        Ok(value.to_string())
    }
}

/// What the driver loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// Copy this text to the clipboard.
    Copy(String),
    Quit,
}

/// The application controller for an interactive session.
#[derive(Debug)]
pub struct Session {
    registry: Registry,
    form: MeetingForm,
    layout: ResultsLayout,
    last_message: Option<String>,
}

impl Session {
    pub fn new(registry: Registry, form: MeetingForm, layout: ResultsLayout) -> Self {
        Self {
            registry,
            form,
            layout,
            last_message: None,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn form(&self) -> &MeetingForm {
        &self.form
    }

    /// The most recently generated message.
    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    /// Applies one command, writing any output to `out`.
    ///
    /// On error nothing is written and previous results are kept.
    pub fn handle(
        &mut self,
        command: SessionCommand,
        out: &mut impl Write,
    ) -> ClientResult<Outcome> {
        debug!(?command, "session command");
        match command {
            SessionCommand::Title(title) => self.form.title = title,
            SessionCommand::Date(date) => self.form.date = Some(date),
            SessionCommand::Time(time) => self.form.time = Some(time),
            SessionCommand::Zone(zone) => self.form.set_base_timezone(&zone)?,
            SessionCommand::Lang(lang) => self.form.language = lang.parse::<Language>()?,
            SessionCommand::Add { name, zone } => {
                let p = self.registry.add_named(&name, &zone)?;
                writeln!(out, "added #{} {} ({})", p.id, p.name, city_label(p.timezone_name()))?;
            }
            SessionCommand::Remove(id) => {
                let id: ParticipantId = id
                    .parse()
                    .map_err(|_| ClientError::Input(format!("'{}' is not a participant id", id)))?;
                if let Some(p) = self.registry.remove(id) {
                    writeln!(out, "removed #{} {}", p.id, p.name)?;
                }
            }
            SessionCommand::List => self.write_participants(out)?,
            SessionCommand::Show => self.write_form(out)?,
            SessionCommand::Calc => {
                let set = calculate(&self.form, &self.registry)?;
                write!(out, "{}", render_results(&set, self.layout))?;
            }
            SessionCommand::Message => {
                let set = generate(&self.form, &self.registry)?;
                let message = render_message(&set);
                writeln!(out, "{}", message)?;
                self.last_message = Some(message);
            }
            SessionCommand::Copy => {
                let message = self.last_message.clone().ok_or_else(|| {
                    ClientError::Input("no message yet, run 'message' first".into())
                })?;
                return Ok(Outcome::Copy(message));
            }
            SessionCommand::Zones => write_zones(out)?,
            SessionCommand::Help => writeln!(out, "{}", HELP)?,
            SessionCommand::Quit => return Ok(Outcome::Quit),
            SessionCommand::Empty => {}
        }
        Ok(Outcome::Continue)
    }

    fn write_participants(&self, out: &mut impl Write) -> ClientResult<()> {
        if self.registry.is_empty() {
            writeln!(out, "no participants")?;
            return Ok(());
        }
        for p in self.registry.list() {
            writeln!(
                out,
                "#{:<3} {}  ({}, {})",
                p.id.get(),
                p.name,
                city_label(p.timezone_name()),
                p.timezone_name()
            )?;
        }
        Ok(())
    }

    fn write_form(&self, out: &mut impl Write) -> ClientResult<()> {
        let unset = "-";
        let title = if self.form.title.is_empty() {
            unset
        } else {
            self.form.title.as_str()
        };
        writeln!(out, "title:    {}", title)?;
        writeln!(out, "date:     {}", self.form.date.as_deref().unwrap_or(unset))?;
        writeln!(out, "time:     {}", self.form.time.as_deref().unwrap_or(unset))?;
        writeln!(out, "zone:     {}", self.form.base_timezone.name())?;
        writeln!(out, "language: {}", self.form.language)?;
        Ok(())
    }
}

/// Runs a session on stdin/stdout until `quit` or end of input.
pub async fn run(session: Session) -> ClientResult<()> {
    let input = BufReader::new(tokio::io::stdin());
    drive(session, input, std::io::stdout(), Clipboards::system()).await
}

/// Reads commands from `input` until `quit` or end of input.
///
/// A copy confirmation is shown above the prompt until
/// [`CONFIRMATION_WINDOW`](crate::clipboard::CONFIRMATION_WINDOW) has passed.
pub async fn drive<R, W, P, F>(
    mut session: Session,
    input: R,
    mut out: W,
    mut clipboards: Clipboards<P, F>,
) -> ClientResult<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    P: ClipboardBackend + Clone + Send + 'static,
    F: ClipboardBackend,
{
    let mut lines = input.lines();
    let mut flash: Option<Flash> = None;

    writeln!(out, "meetzone: type 'help' for commands")?;
    loop {
        if flash.as_ref().is_some_and(|f| !f.is_visible(Instant::now())) {
            flash = None;
        }
        match &flash {
            Some(f) => write!(out, "{}\nmeetzone> ", f.message())?,
            None => write!(out, "meetzone> ")?,
        }
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        let outcome = line
            .parse::<SessionCommand>()
            .and_then(|command| session.handle(command, &mut out));

        match outcome {
            Ok(Outcome::Continue) => {}
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Copy(message)) => match clipboards.copy(&message).await {
                Ok(method) => flash = Some(Flash::new(method.confirmation(), Instant::now())),
                Err(e) => eprintln!("error: {}", e),
            },
            Err(e) => eprintln!("error: {}", e),
        }
    }

    Ok(())
}
