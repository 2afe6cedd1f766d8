use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::SharedBackend;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::Focus;
use crate::domain::services::RequestOrchestrator;

const KEY_HINTS: &str = "[Enter] Hỏi  [Ctrl+T] Dịch  [Ctrl+S] Tóm tắt  [Tab] Đổi ô  [Ctrl+C] Thoát";

fn render<B: Backend>(frame: &mut Frame<B>, app_state: &mut AppState<'_>, loading: &Loading) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.size());

    if layout[0].width != app_state.last_known_width
        || layout[0].height != app_state.last_known_height
    {
        app_state.set_rect(layout[0]);
    }

    let lines = app_state
        .display_lines
        .iter()
        .map(|line| return Line::from(line.as_str()))
        .collect::<Vec<Line>>();

    frame.render_widget(
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title("Healthchat"),
            )
            .scroll((app_state.scroll.position, 0)),
        layout[0],
    );
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        layout[0].inner(&Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut app_state.scroll.scrollbar_state,
    );

    frame.render_widget(app_state.server_url.widget(), layout[1]);

    if app_state.busy {
        loading.render(frame, layout[2], app_state.ticks);
    } else {
        frame.render_widget(app_state.question.widget(), layout[2]);
    }

    let status = match &app_state.notice {
        Some(notice) => {
            Paragraph::new(notice.text.as_str()).style(Style::default().fg(Color::Yellow))
        }
        None => Paragraph::new(KEY_HINTS).style(Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(
        status.block(Block::default().padding(Padding::new(1, 1, 0, 0))),
        layout[3],
    );
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState<'_>,
    orchestrator: &mut RequestOrchestrator,
    events: &mut EventsService,
) -> Result<()> {
    let loading = Loading::default();

    loop {
        terminal.draw(|frame| {
            render(frame, app_state, &loading);
        })?;

        match events.next().await? {
            Event::HealthChecked(res) => {
                app_state.handle_health_check(res);
            }
            Event::KeyboardCharInput(input) => {
                app_state.input(input);
            }
            Event::KeyboardPaste(text) => {
                app_state.paste(&text);
            }
            Event::KeyboardTab() => {
                app_state.toggle_focus();
            }
            Event::KeyboardEnter() => {
                if app_state.focus == Focus::ServerUrl {
                    app_state.toggle_focus();
                    continue;
                }

                let question = app_state.question_text();
                let base_url = app_state.server_url_text();
                if orchestrator.ask(app_state, &question, &base_url).is_ok() {
                    app_state.clear_question();
                }
            }
            Event::KeyboardCTRLT() => {
                let text = orchestrator.last_answer().to_string();
                let base_url = app_state.server_url_text();
                // Rejections are already shown as a notice.
                orchestrator.translate(app_state, &text, &base_url).ok();
            }
            Event::KeyboardCTRLS() => {
                let text = orchestrator.last_answer().to_string();
                let base_url = app_state.server_url_text();
                orchestrator.summarize(app_state, &text, &base_url).ok();
            }
            Event::KeyboardCancel() => {
                orchestrator.cancel(app_state);
            }
            Event::KeyboardCTRLC() => {
                if !orchestrator.cancel(app_state) {
                    break;
                }
            }
            Event::RequestFinished(id, outcome) => {
                orchestrator.complete(app_state, id, outcome);
            }
            Event::UIScrollDown() => {
                app_state.scroll.down();
            }
            Event::UIScrollUp() => {
                app_state.scroll.up();
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
            Event::UITick() => {
                app_state.tick();
            }
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    backend: SharedBackend,
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let server_url = Config::get(ConfigKey::ServerURL);
    let mut app_state = AppState::new(&server_url);
    let mut orchestrator = RequestOrchestrator::new(backend, tx);
    let mut events = EventsService::new(rx);

    tracing::info!(server_url = %server_url, "Starting UI");
    orchestrator.check_health(&server_url);

    let res = start_loop(&mut terminal, &mut app_state, &mut orchestrator, &mut events).await;
    orchestrator.shutdown();

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return res;
}
