use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tui::{
    backend::Backend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::services::{Notification, Notifier, Severity};

const MAX_VISIBLE: usize = 3;
const TOAST_WIDTH: u16 = 48;
const TOAST_HEIGHT: u16 = 4;

/// Transient notifications stacked in the top-right corner.
pub struct ToastQueue {
    toasts: VecDeque<(Notification, Instant)>,
    ttl: Duration,
}

impl ToastQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            toasts: VecDeque::new(),
            ttl,
        }
    }

    /// Drops toasts older than the configured lifetime.
    pub fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.toasts
            .retain(|(_, shown_at)| now.saturating_duration_since(*shown_at) < ttl);
    }

    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.toasts.iter().rev().take(MAX_VISIBLE).map(|(n, _)| n)
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, notification: Notification) {
        self.toasts.push_back((notification, Instant::now()));
    }
}

pub fn render_toasts<B: Backend>(frame: &mut Frame<B>, queue: &ToastQueue) {
    let size = frame.size();
    let width = TOAST_WIDTH.min(size.width);

    for (slot, toast) in queue.visible().enumerate() {
        let y = size.y + 1 + slot as u16 * TOAST_HEIGHT;
        if y + TOAST_HEIGHT > size.y + size.height {
            break;
        }
        let area = Rect::new(size.x + size.width - width, y, width, TOAST_HEIGHT);

        let color = match toast.severity {
            Severity::Normal => Color::Green,
            Severity::Destructive => Color::Red,
        };
        let body = Paragraph::new(vec![
            Spans::from(Span::styled(
                toast.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Spans::from(toast.text.clone()),
        ])
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(color).bg(Color::Black));

        frame.render_widget(Clear, area);
        frame.render_widget(body, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prune_expires_old_toasts() {
        let mut queue = ToastQueue::new(Duration::from_secs(4));
        queue.notify(Notification::normal("Link copied", "http://x/projects/1"));
        assert_eq!(queue.visible().count(), 1);

        queue.prune(Instant::now());
        assert_eq!(queue.visible().count(), 1);

        queue.prune(Instant::now() + Duration::from_secs(5));
        assert_eq!(queue.visible().count(), 0);
    }

    #[test]
    fn test_newest_toast_first() {
        let mut queue = ToastQueue::new(Duration::from_secs(4));
        queue.notify(Notification::normal("first", ""));
        queue.notify(Notification::destructive("second", ""));

        let titles: Vec<&str> = queue.visible().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["second", "first"]);
    }
}
