use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use termimad::MadSkin;

use riofer::config::{AppConfig, CONFIG_FILE};
use riofer::translate::{MyMemoryClient, Orchestrator, OrchestratorHandle, Session, SessionEvent};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const HELP: &str = r#"# riofer

Terminal translator. Type and the translation follows after a short pause.

## Keys

* type / *Backspace*: edit the source text
* *Tab*: swap source and target language
* *F2* / *F3*: cycle the source / target language
* *Esc* or *Ctrl-C*: quit

## Options

* `--init`     Create an example `.riofer.json` in the current directory
* `--help`     Show this page

## Configuration

`.riofer.json` is looked up in the current directory, then in the home
directory. All fields are optional:

```json
{
  "endpoint": "https://api.mymemory.translated.net/get",
  "debounce_ms": 500,
  "request_timeout_secs": 10,
  "source_lang": "pt",
  "target_lang": "en"
}
```
"#;

fn create_help_skin() -> MadSkin {
    use termimad::crossterm::style::Color;

    let mut skin = MadSkin::default();
    skin.headers[0].set_fg(Color::Cyan);
    skin.headers[1].set_fg(Color::Blue);
    skin.code_block.set_fg(Color::Yellow);
    skin.inline_code.set_fg(Color::Yellow);
    skin.italic.set_fg(Color::Magenta);
    skin
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--init" => {
                let path = PathBuf::from(CONFIG_FILE);
                if path.exists() {
                    eprintln!("{} already exists", CONFIG_FILE);
                    std::process::exit(1);
                }
                AppConfig::write_example(&path)?;
                println!("Created example config at: {}", path.display());
                return Ok(());
            }
            "--help" | "-h" => {
                create_help_skin().print_text(HELP);
                return Ok(());
            }
            _ => {
                eprintln!("Unknown option: {}", args[1]);
                eprintln!("Use --help for usage information");
                std::process::exit(1);
            }
        }
    }

    let config = AppConfig::load()?;
    let backend = MyMemoryClient::new(
        &config.endpoint,
        Duration::from_secs(config.request_timeout_secs),
    )?;
    let session = Session::new(config.source_lang, config.target_lang);
    let mut handle = Orchestrator::spawn(
        session,
        Arc::new(backend),
        Duration::from_millis(config.debounce_ms),
    );

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let result = run_ui(&mut stdout, &mut handle).await;

    execute!(stdout, LeaveAlternateScreen, Show)?;
    terminal::disable_raw_mode()?;
    result
}

async fn run_ui(
    stdout: &mut io::Stdout,
    handle: &mut OrchestratorHandle,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut keys = EventStream::new();
    let mut spinner = tokio::time::interval(Duration::from_millis(120));
    let mut frame = 0usize;
    let mut input = String::new();
    let mut last_change = chrono::Local::now();

    draw(stdout, &handle.snapshot(), &input, frame, last_change)?;

    loop {
        tokio::select! {
            maybe_event = keys.next() => {
                let Some(event) = maybe_event else { break };
                match event? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        match key.code {
                            KeyCode::Esc => break,
                            KeyCode::Char('c')
                                if key.modifiers.contains(KeyModifiers::CONTROL) =>
                            {
                                break;
                            }
                            KeyCode::Tab => {
                                handle.send(SessionEvent::SwapLanguages);
                            }
                            KeyCode::F(2) => {
                                let next = handle.snapshot().source_lang().next();
                                handle.send(SessionEvent::SetSourceLang(next));
                            }
                            KeyCode::F(3) => {
                                let next = handle.snapshot().target_lang().next();
                                handle.send(SessionEvent::SetTargetLang(next));
                            }
                            KeyCode::Backspace => {
                                input.pop();
                                handle.send(SessionEvent::SetSourceText(input.clone()));
                            }
                            KeyCode::Char(c)
                                if key.modifiers.is_empty()
                                    || key.modifiers == KeyModifiers::SHIFT =>
                            {
                                input.push(c);
                                handle.send(SessionEvent::SetSourceText(input.clone()));
                            }
                            _ => {}
                        }
                        last_change = chrono::Local::now();
                    }
                    // Resize and everything else just trigger a redraw.
                    _ => {}
                }
            }
            changed = handle.state.changed() => {
                if changed.is_err() {
                    break;
                }
                last_change = chrono::Local::now();
            }
            _ = spinner.tick() => {
                frame = frame.wrapping_add(1);
            }
        }
        draw(stdout, &handle.snapshot(), &input, frame, last_change)?;
    }

    Ok(())
}

fn draw(
    stdout: &mut io::Stdout,
    session: &Session,
    input: &str,
    frame: usize,
    last_change: chrono::DateTime<chrono::Local>,
) -> io::Result<()> {
    let (cols, _) = terminal::size()?;
    let width = cols.max(20) as usize;

    queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
    queue!(
        stdout,
        SetForegroundColor(Color::Cyan),
        Print("Tradutor Riofer"),
        ResetColor
    )?;

    queue!(
        stdout,
        MoveTo(0, 2),
        Print(format!(
            "{}  ⇄  {}",
            session.source_lang().label(),
            session.target_lang().label()
        ))
    )?;

    queue!(
        stdout,
        MoveTo(0, 4),
        SetForegroundColor(Color::DarkGrey),
        Print("Texto:"),
        ResetColor,
        MoveTo(0, 5)
    )?;
    if input.is_empty() {
        queue!(
            stdout,
            SetForegroundColor(Color::DarkGrey),
            Print("Digite seu texto..."),
            ResetColor
        )?;
    } else {
        queue!(stdout, Print(format!("{}▌", tail(input, width - 1))))?;
    }

    queue!(
        stdout,
        MoveTo(0, 7),
        SetForegroundColor(Color::DarkGrey),
        Print("Tradução:"),
        ResetColor,
        MoveTo(0, 8)
    )?;
    if session.is_loading() {
        queue!(
            stdout,
            SetForegroundColor(Color::Blue),
            Print(SPINNER[frame % SPINNER.len()]),
            ResetColor
        )?;
    } else if let Some(error) = session.error() {
        queue!(
            stdout,
            SetForegroundColor(Color::Red),
            Print(error),
            ResetColor
        )?;
    } else {
        queue!(stdout, Print(tail(session.translated_text(), width)))?;
    }

    if let Some(error) = session.error() {
        queue!(
            stdout,
            MoveTo(0, 10),
            SetForegroundColor(Color::Red),
            Print(format!("⚠ {error}")),
            ResetColor
        )?;
    }

    queue!(
        stdout,
        MoveTo(0, 12),
        SetForegroundColor(Color::DarkGrey),
        Print(format!(
            "Tab: inverter  F2/F3: idiomas  Esc: sair  [{}]",
            last_change.format("%H:%M:%S")
        )),
        ResetColor
    )?;

    stdout.flush()
}

/// Last `width` characters of `text`, so long input stays visible at the
/// cursor end on a single render line.
fn tail(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        text.to_string()
    } else {
        text.chars().skip(count - width).collect()
    }
}
