use chrono::{DateTime, Utc};
use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::models::Project;
use crate::ui::components::{project_badge, status_badge, status_icon};
use crate::ui::format::{format_date, format_relative};

// Read-only view of one project plus its comment feed
pub struct ProjectDetailState {
    project_id: u32,
    comment_input: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum DetailAction {
    Back,
    SubmitComment(String),
}

impl ProjectDetailState {
    pub fn new(project_id: u32) -> Self {
        Self {
            project_id,
            comment_input: None,
        }
    }

    pub fn project_id(&self) -> u32 {
        self.project_id
    }

    pub fn is_commenting(&self) -> bool {
        self.comment_input.is_some()
    }
}

pub fn render_project_detail<B: Backend>(
    frame: &mut Frame<B>,
    state: &ProjectDetailState,
    project: Option<&Project>,
    now: DateTime<Utc>,
) {
    let size = frame.size();
    let Some(project) = project else {
        let missing = Paragraph::new(vec![
            Spans::from(format!("Project {} not found.", state.project_id)),
            Spans::from(""),
            Spans::from("<Esc> Back"),
        ])
        .block(Block::default().title("Project").borders(Borders::ALL));
        frame.render_widget(missing, size);
        return;
    };

    let input_height = if state.is_commenting() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(project.steps.len() as u16 + 6),
            Constraint::Min(3),
            Constraint::Length(input_height),
            Constraint::Length(2),
        ].as_ref())
        .split(size);

    let mut lines = vec![
        Spans::from(vec![
            Span::styled("Start date: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format_date(project.start_date)),
            Span::raw("   "),
            Span::styled("Expected end: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format_date(project.expected_end_date)),
        ]),
        Spans::from(""),
    ];
    for step in &project.steps {
        lines.push(Spans::from(vec![
            status_icon(step.status),
            Span::raw(format!(" {:<14}", step.name)),
            status_badge(step.status),
        ]));
    }
    lines.push(Spans::from(""));
    lines.push(Spans::from(vec![
        Span::styled("Overall: ", Style::default().add_modifier(Modifier::BOLD)),
        project_badge(project.status()),
    ]));

    let summary = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(project.title(), Style::default().add_modifier(Modifier::BOLD)))
            .borders(Borders::ALL),
    );
    frame.render_widget(summary, chunks[0]);

    let mut feed: Vec<Spans> = Vec::new();
    if project.comments.is_empty() {
        feed.push(Spans::from("No comments yet."));
    }
    for comment in project.comments.iter() {
        feed.push(Spans::from(vec![
            Span::styled(comment.user.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("  {}", format_relative(comment.timestamp, now)),
                Style::default().fg(Color::Gray),
            ),
        ]));
        feed.push(Spans::from(Span::styled(
            comment.text.clone(),
            Style::default().fg(Color::Gray),
        )));
        feed.push(Spans::from(""));
    }
    let comments = Paragraph::new(feed)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(format!("Comments ({})", project.comments.len()))
                .borders(Borders::ALL),
        );
    frame.render_widget(comments, chunks[1]);

    if let Some(input) = &state.comment_input {
        let input = Paragraph::new(format!("{}|", input))
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().title("New comment").borders(Borders::ALL));
        frame.render_widget(input, chunks[2]);
    }

    let help_text = if state.is_commenting() {
        "<Enter> Send | <Esc> Cancel"
    } else {
        "<A> Add comment | <Esc> Back"
    };
    let help = Paragraph::new(help_text)
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));
    frame.render_widget(help, chunks[3]);
}

pub fn handle_key(state: &mut ProjectDetailState, key: KeyCode) -> Option<DetailAction> {
    if let Some(input) = &mut state.comment_input {
        match key {
            KeyCode::Esc => state.comment_input = None,
            KeyCode::Enter => {
                let text = input.trim().to_string();
                if text.is_empty() {
                    return None;
                }
                state.comment_input = None;
                return Some(DetailAction::SubmitComment(text));
            }
            KeyCode::Char(c) => input.push(c),
            KeyCode::Backspace => {
                input.pop();
            }
            _ => {}
        }
        return None;
    }

    match key {
        KeyCode::Esc | KeyCode::Char('q') => Some(DetailAction::Back),
        KeyCode::Char('a') => {
            state.comment_input = Some(String::new());
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ProjectStore;
    use tui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol.as_str())
            .collect()
    }

    #[test]
    fn test_comment_entry() {
        let mut state = ProjectDetailState::new(1);
        assert_eq!(handle_key(&mut state, KeyCode::Char('a')), None);
        assert!(state.is_commenting());

        for c in "ok!".chars() {
            handle_key(&mut state, KeyCode::Char(c));
        }
        assert_eq!(
            handle_key(&mut state, KeyCode::Enter),
            Some(DetailAction::SubmitComment("ok!".to_string()))
        );
        assert!(!state.is_commenting());
    }

    #[test]
    fn test_blank_comment_stays_open() {
        let mut state = ProjectDetailState::new(1);
        handle_key(&mut state, KeyCode::Char('a'));
        handle_key(&mut state, KeyCode::Char(' '));
        assert_eq!(handle_key(&mut state, KeyCode::Enter), None);
        assert!(state.is_commenting());
    }

    #[test]
    fn test_q_inside_comment_is_text() {
        let mut state = ProjectDetailState::new(1);
        handle_key(&mut state, KeyCode::Char('a'));
        assert_eq!(handle_key(&mut state, KeyCode::Char('q')), None);
        assert_eq!(handle_key(&mut state, KeyCode::Esc), None);
        assert_eq!(handle_key(&mut state, KeyCode::Esc), Some(DetailAction::Back));
    }

    #[test]
    fn test_render_project_with_comments() {
        let store = ProjectStore::with_fixtures(vec!["Cut".into(), "Polish".into()]);
        let state = ProjectDetailState::new(1);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal
            .draw(|f| render_project_detail(f, &state, store.get_by_id(1), Utc::now()))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Carrara Marble"));
        assert!(text.contains("Project started as planned."));
        assert!(text.contains("Overall:"));
        assert!(text.contains("Comments (2)"));
        assert!(!text.contains("No comments yet."));
    }

    #[test]
    fn test_render_project_without_comments() {
        let store = ProjectStore::with_fixtures(vec!["Cut".into(), "Polish".into()]);
        let state = ProjectDetailState::new(2);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal
            .draw(|f| render_project_detail(f, &state, store.get_by_id(2), Utc::now()))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Comments (0)"));
        assert!(text.contains("No comments yet."));
    }

    #[test]
    fn test_render_missing_project() {
        let state = ProjectDetailState::new(9);
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();

        terminal
            .draw(|f| render_project_detail(f, &state, None, Utc::now()))
            .unwrap();

        assert!(screen_text(&terminal).contains("Project 9 not found."));
    }
}
