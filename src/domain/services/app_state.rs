#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use ratatui::prelude::Rect;
use tui_textarea::Input;

use super::Scroll;
use crate::domain::models::DisplaySink;
use crate::domain::models::HealthReport;
use crate::domain::models::TextArea;

pub const GREETING: &str = "Xin chào! Hãy đặt câu hỏi về sức khỏe...";

/// Number of UI ticks a transient notice stays on screen.
const NOTICE_TICKS: u8 = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Question,
    ServerUrl,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    ticks_left: u8,
}

fn wrap_line(line: &str, width: usize, rows: &mut Vec<String>) {
    let mut row = String::new();
    let mut row_length = 0;
    let mut started = false;

    for word in line.split(' ') {
        let word_length = word.chars().count();
        if started && row_length + 1 + word_length <= width {
            row.push(' ');
            row.push_str(word);
            row_length += 1 + word_length;
            continue;
        }
        if !started && word_length <= width {
            row.push_str(word);
            row_length = word_length;
            started = true;
            continue;
        }

        if started {
            rows.push(std::mem::take(&mut row));
        }

        // Words wider than the pane are split hard.
        let mut rest = word.chars().collect::<Vec<char>>();
        while rest.len() > width {
            rows.push(rest[..width].iter().collect());
            rest = rest[width..].to_vec();
        }
        row = rest.iter().collect();
        row_length = rest.len();
        started = true;
    }

    rows.push(row);
}

/// Splits `text` into the rows shown in a pane `width` columns wide, breaking
/// on spaces where possible. The answer pane renders these rows as-is, so the
/// row count is also the scroll length.
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    if width == 0 {
        return vec![];
    }

    let mut rows = vec![];
    for line in text.split('\n') {
        wrap_line(line, width as usize, &mut rows);
    }

    return rows;
}

pub struct AppState<'a> {
    pub busy: bool,
    pub display_lines: Vec<String>,
    pub display_text: String,
    pub focus: Focus,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub notice: Option<Notice>,
    pub question: tui_textarea::TextArea<'a>,
    pub scroll: Scroll,
    pub server_url: tui_textarea::TextArea<'a>,
    pub ticks: usize,
}

impl<'a> AppState<'a> {
    pub fn new(server_url: &str) -> AppState<'a> {
        let mut app_state = AppState {
            busy: false,
            display_lines: vec![],
            display_text: GREETING.to_string(),
            focus: Focus::Question,
            last_known_height: 0,
            last_known_width: 0,
            notice: None,
            question: TextArea::new("Câu hỏi", ""),
            scroll: Scroll::default(),
            server_url: TextArea::new("Địa chỉ server", server_url),
            ticks: 0,
        };
        app_state.sync_focus();

        return app_state;
    }

    pub fn question_text(&self) -> String {
        return TextArea::text(&self.question);
    }

    pub fn server_url_text(&self) -> String {
        return TextArea::text(&self.server_url);
    }

    pub fn clear_question(&mut self) {
        self.question = TextArea::new("Câu hỏi", "");
        self.sync_focus();
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Question => Focus::ServerUrl,
            Focus::ServerUrl => Focus::Question,
        };
        self.sync_focus();
    }

    /// Typing goes to the focused field. Inputs are locked while busy.
    pub fn input(&mut self, input: Input) {
        if self.busy {
            return;
        }

        match self.focus {
            Focus::Question => {
                self.question.input(input);
            }
            Focus::ServerUrl => {
                self.server_url.input(input);
            }
        }
    }

    pub fn paste(&mut self, text: &str) {
        if self.busy {
            return;
        }

        // Both fields are single line.
        let flattened = text.replace(['\r', '\n'], " ");
        match self.focus {
            Focus::Question => {
                self.question.insert_str(flattened);
            }
            Focus::ServerUrl => {
                self.server_url.insert_str(flattened.trim());
            }
        }
    }

    pub fn tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);

        if let Some(notice) = self.notice.as_mut() {
            notice.ticks_left = notice.ticks_left.saturating_sub(1);
            if notice.ticks_left == 0 {
                self.notice = None;
            }
        }
    }

    pub fn handle_health_check(&mut self, res: Result<HealthReport, String>) {
        match res {
            Ok(report) => {
                if report.model_loaded == Some(false) {
                    self.notify_transient("Server đang chạy nhưng chưa tải model.");
                }
            }
            Err(err) => {
                self.notify_transient(&format!("Không thể kết nối tới server: {err}"));
            }
        }
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    fn sync_focus(&mut self) {
        TextArea::set_focus(&mut self.question, self.focus == Focus::Question);
        TextArea::set_focus(&mut self.server_url, self.focus == Focus::ServerUrl);
    }

    fn sync_dependants(&mut self) {
        // Borders take one row and column on each side.
        let width = self.last_known_width.saturating_sub(2);
        let height = self.last_known_height.saturating_sub(2);
        self.display_lines = wrap_text(&self.display_text, width);
        let rows = u16::try_from(self.display_lines.len()).unwrap_or(u16::MAX);
        self.scroll.set_state(rows, height);
    }
}

impl DisplaySink for AppState<'_> {
    fn set_text(&mut self, text: &str) {
        self.display_text = text.to_string();
        self.sync_dependants();
        self.scroll.top();
    }

    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
        self.ticks = 0;
    }

    fn notify_transient(&mut self, text: &str) {
        self.notice = Some(Notice {
            text: text.to_string(),
            ticks_left: NOTICE_TICKS,
        });
    }
}
