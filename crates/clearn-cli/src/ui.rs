use std::io;
use std::io::BufRead;
use std::io::Write;
use std::sync::mpsc;
use std::sync::mpsc::RecvTimeoutError;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use clearn_core::actions::RuntimeAction;
use clearn_core::actions::SiteAction;
use clearn_core::actions::UserAction;
use clearn_core::carousel::SlideView;
use clearn_core::dialogue::SUGGESTED_PROMPTS;
use clearn_core::dialogue::WELCOME_TEXT;
use clearn_core::preferences::StorageBackend;
use clearn_core::render::Control;
use clearn_core::render::LIGHT_THEME_FLAG;
use clearn_core::render::RenderSurface;
use clearn_core::site::Site;
use clearn_core::state::ChatMessage;
use clearn_core::state::ChatRole;
use crossterm::style::Color;
use crossterm::style::Stylize;
use rand::Rng;
use tracing::debug;

const IDLE_POLL: Duration = Duration::from_secs(1);

#[derive(Clone, Copy)]
struct UiPalette {
    accent: Color,
    user: Color,
    assistant: Color,
    muted: Color,
}

fn palette_for(light: bool) -> UiPalette {
    if light {
        UiPalette {
            accent: Color::DarkBlue,
            user: Color::DarkMagenta,
            assistant: Color::DarkGreen,
            muted: Color::DarkGrey,
        }
    } else {
        UiPalette {
            accent: Color::Cyan,
            user: Color::Magenta,
            assistant: Color::Green,
            muted: Color::Grey,
        }
    }
}

/// Terminal rendition of the site: every surface update becomes a line.
pub struct TerminalSurface<W: Write> {
    out: W,
    palette: UiPalette,
    slides: Vec<SlideView>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            palette: palette_for(false),
            slides: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn notice(&mut self, text: &str) {
        let line = format!("{}", text.with(self.palette.muted));
        self.line(&line);
    }

    pub fn print_commands(&mut self) {
        let accent = self.palette.accent;
        self.line(&format!("{}", "Commands:".with(accent).bold()));
        for (command, about) in COMMAND_HELP {
            let padded = format!("{command:<14}");
            self.line(&format!("  {} {about}", padded.with(accent)));
        }
        self.line("  (any other line is sent to the assistant)");
    }

    pub fn print_status<B: StorageBackend, R: Rng>(&mut self, site: &Site<B, R>) {
        let state = site.state();
        let lines = [
            format!("theme: {}", state.theme.state().label()),
            format!("font scale: {}", state.font_scale.scale().stored_value()),
            format!(
                "quote: {}/{}",
                state.carousel.position() + 1,
                state.carousel.quote_count()
            ),
            format!(
                "chat: {} ({} messages, {} pending)",
                if state.dialogue.is_visible() { "open" } else { "closed" },
                state.dialogue.transcript().len(),
                site.pending_replies()
            ),
            format!("elapsed: {} ms", site.now().as_millis()),
        ];
        for line in lines {
            self.notice(&line);
        }
    }

    fn line(&mut self, text: &str) {
        // Output is best effort; a closed terminal must not stop the session.
        if let Err(err) = writeln!(self.out, "{text}") {
            debug!(error = %err, "terminal write failed");
        }
    }
}

impl<W: Write> RenderSurface for TerminalSurface<W> {
    fn set_root_flag(&mut self, flag: &str, on: bool) {
        if flag == LIGHT_THEME_FLAG {
            self.palette = palette_for(on);
            let label = if on { "light" } else { "dark" };
            self.notice(&format!("[theme] {label}"));
        }
    }

    fn set_root_font_size(&mut self, px: u16) {
        self.notice(&format!("[font] root size {px}px"));
    }

    fn set_control(&mut self, control: Control, label: &str, active: bool) {
        let name = match control {
            Control::ThemeToggle => "theme toggle",
            Control::FontScaleToggle => "font toggle",
        };
        let state = if active { " (active)" } else { "" };
        self.notice(&format!("[{name}] {label}{state}"));
    }

    fn mount_quote_track(&mut self, slides: &[SlideView]) {
        self.slides = slides.to_vec();
    }

    fn set_quote_active(&mut self, index: usize, active: bool) {
        if !active {
            return;
        }
        let Some(slide) = self.slides.iter().find(|slide| slide.index == index).copied() else {
            return;
        };
        // The track repeats the quote set, so the first half holds every dot.
        let count = self.slides.len() / 2;
        let dots: Vec<&str> = (0..count)
            .map(|dot| if dot == index { "●" } else { "○" })
            .collect();
        let quote = format!("\u{201c}{}\u{201d}", slide.quote.text);
        self.line(&format!("{}", quote.with(self.palette.accent).italic()));
        let byline = format!("  \u{2014} {}   {}", slide.quote.author, dots.join(" "));
        self.notice(&byline);
    }

    fn set_chat_visible(&mut self, visible: bool) {
        if visible {
            let header = format!("{}", "Assistant".with(self.palette.assistant).bold());
            self.line(&format!("{header}: {WELCOME_TEXT}"));
            self.notice("Suggested prompts:");
            for (idx, prompt) in SUGGESTED_PROMPTS.iter().enumerate() {
                self.notice(&format!("  /prompt {}  {prompt}", idx + 1));
            }
        } else {
            self.notice("[chat closed]");
        }
    }

    fn append_message(&mut self, message: &ChatMessage) {
        let color = match message.role {
            ChatRole::User => self.palette.user,
            ChatRole::Assistant => self.palette.assistant,
        };
        let who = format!("{}", message.role.label().with(color).bold());
        self.line(&format!("{who}: {}", message.text));
    }

    fn set_draft(&mut self, text: &str) {
        if !text.is_empty() {
            self.notice(&format!("[draft] {text}  (/send to submit)"));
        }
    }

    fn scroll_transcript_to_end(&mut self) {
        if let Err(err) = self.out.flush() {
            debug!(error = %err, "terminal flush failed");
        }
    }
}

const COMMAND_HELP: [(&str, &str); 13] = [
    ("/theme", "toggle light/dark theme"),
    ("/font", "toggle medium/large text"),
    ("/quote N", "show quote N"),
    ("/open", "open the assistant"),
    ("/close", "close the assistant"),
    ("/prompt N", "put suggested prompt N in the draft"),
    ("/draft TEXT", "replace the draft"),
    ("/send", "submit the draft"),
    ("/say TEXT", "send TEXT as is, even if it starts with /"),
    ("/wait MS", "let time pass"),
    ("/status", "show current state"),
    ("/help", "show this list"),
    ("/quit", "leave"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Site(SiteAction),
    Wait(Duration),
    Status,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    let Some(rest) = line.strip_prefix('/') else {
        return user(UserAction::Submit(line.to_string()));
    };
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "theme" => user(UserAction::ToggleTheme),
        "font" => user(UserAction::ToggleFontScale),
        "quote" => match parse_ordinal(arg) {
            Some(index) => user(UserAction::SelectQuote(index)),
            None => Command::Invalid("usage: /quote N (1-based)".to_string()),
        },
        "open" => user(UserAction::OpenChat),
        "close" => user(UserAction::CloseChat),
        "prompt" => match parse_ordinal(arg) {
            Some(index) => user(UserAction::UseSuggestedPrompt(index)),
            None => Command::Invalid("usage: /prompt N (1-based)".to_string()),
        },
        "draft" => user(UserAction::SetDraft(arg.to_string())),
        "send" => user(UserAction::SubmitDraft),
        "say" => user(UserAction::Submit(arg.to_string())),
        "wait" => match arg.parse::<u64>() {
            Ok(ms) => Command::Wait(Duration::from_millis(ms)),
            Err(_) => Command::Invalid("usage: /wait MS".to_string()),
        },
        "status" => Command::Status,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Invalid(format!("unknown command: /{other} (try /help)")),
    }
}

fn user(action: UserAction) -> Command {
    Command::Site(SiteAction::User(action))
}

fn parse_ordinal(arg: &str) -> Option<usize> {
    arg.parse::<usize>().ok()?.checked_sub(1)
}

/// Drives the site from stdin and the wall clock until `/quit` or EOF.
pub fn run_session<B, R, W>(
    mut site: Site<B, R>,
    surface: &mut TerminalSurface<W>,
) -> io::Result<()>
where
    B: StorageBackend,
    R: Rng,
    W: Write,
{
    surface.print_commands();

    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    let mut clock = Instant::now();
    loop {
        let timeout = site.until_next_timer().unwrap_or(IDLE_POLL);
        let received = rx.recv_timeout(timeout);
        catch_up(&mut site, &mut clock, surface);

        let line = match received {
            Ok(line) => line,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };
        match parse_command(&line) {
            Command::Site(action) => site.dispatch(action, surface),
            Command::Wait(duration) => {
                thread::sleep(duration);
                catch_up(&mut site, &mut clock, surface);
            }
            Command::Status => surface.print_status(&site),
            Command::Help => surface.print_commands(),
            Command::Quit => break,
            Command::Empty => {}
            Command::Invalid(message) => surface.notice(&message),
        }
    }

    // Input is gone; let outstanding replies land before leaving.
    while site.pending_replies() > 0 {
        if let Some(wait) = site.until_next_timer() {
            thread::sleep(wait);
        }
        catch_up(&mut site, &mut clock, surface);
    }
    site.dispatch(SiteAction::Runtime(RuntimeAction::TeardownChat), surface);
    surface.flush()
}

fn catch_up<B, R, W>(
    site: &mut Site<B, R>,
    clock: &mut Instant,
    surface: &mut TerminalSurface<W>,
) where
    B: StorageBackend,
    R: Rng,
    W: Write,
{
    let now = Instant::now();
    site.advance(now.duration_since(*clock), surface);
    *clock = now;
}
