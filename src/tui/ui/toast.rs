//! Toast notifications shown in the top-right corner.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::domain::Notification;
use crate::tui::styles::MedicalTheme;

const TOAST_TTL: Duration = Duration::from_secs(4);
const MAX_TOASTS: usize = 3;
const TOAST_WIDTH: u16 = 48;
const TOAST_HEIGHT: u16 = 4;

/// Queue of visible notifications, oldest first.
#[derive(Debug, Default)]
pub struct Toasts {
    items: VecDeque<(Notification, Instant)>,
}

impl Toasts {
    pub fn push(&mut self, notification: Notification) {
        self.push_at(notification, Instant::now());
    }

    fn push_at(&mut self, notification: Notification, at: Instant) {
        if self.items.len() == MAX_TOASTS {
            self.items.pop_front();
        }
        self.items.push_back((notification, at));
    }

    /// Drop toasts older than their time to live.
    pub fn expire(&mut self, now: Instant) {
        self.items
            .retain(|(_, shown)| now.saturating_duration_since(*shown) < TOAST_TTL);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter().map(|(n, _)| n)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub fn render_toasts(f: &mut Frame, area: Rect, toasts: &Toasts) {
    if toasts.is_empty() {
        return;
    }

    let width = TOAST_WIDTH.min(area.width);
    let x = area.x + area.width.saturating_sub(width + 1);

    for (i, toast) in toasts.iter().enumerate() {
        let y = area.y + 1 + i as u16 * TOAST_HEIGHT;
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }
        let rect = Rect::new(x, y, width, TOAST_HEIGHT);

        let style = MedicalTheme::notification(toast.variant);
        let block = Block::default()
            .title(Span::styled(format!(" {} ", toast.title), style))
            .borders(Borders::ALL)
            .border_style(style);

        let body = Paragraph::new(Line::from(Span::styled(
            toast.description.clone(),
            MedicalTheme::text(),
        )))
        .wrap(Wrap { trim: true })
        .block(block);

        f.render_widget(Clear, rect);
        f.render_widget(body, rect);
    }
}
