use chrono::{DateTime, Utc};
use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::domain::can_transition;
use crate::models::{Project, Step, StepStatus};
use crate::ui::components::{centered_rect, project_badge, status_badge, status_icon};
use crate::ui::format::{format_date, format_relative};

// Represents the state of the project status panel
pub struct StatusPanelState {
    list_state: ListState,
    selected_step: usize,
    menu_cursor: Option<usize>,
}

#[derive(Debug, PartialEq)]
pub enum PanelAction {
    Quit,
    NewProject,
    CopyLink(u32),   // Contains project_id
    OpenDetail(u32), // Contains project_id
    SetStatus {
        project_id: u32,
        step_index: usize,
        status: StepStatus,
    },
}

impl StatusPanelState {
    pub fn new(project_count: usize) -> Self {
        let mut list_state = ListState::default();
        if project_count > 0 {
            list_state.select(Some(0));
        }

        Self {
            list_state,
            selected_step: 0,
            menu_cursor: None,
        }
    }

    pub fn next(&mut self, project_count: usize) {
        if project_count == 0 {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) if i + 1 < project_count => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
        self.selected_step = 0;
    }

    pub fn previous(&mut self, project_count: usize) {
        if project_count == 0 {
            return;
        }

        let i = match self.list_state.selected() {
            Some(0) | None => project_count - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
        self.selected_step = 0;
    }

    pub fn select_last(&mut self, project_count: usize) {
        self.list_state.select(project_count.checked_sub(1));
        self.selected_step = 0;
    }

    pub fn next_step(&mut self, step_count: usize) {
        if self.selected_step + 1 < step_count {
            self.selected_step += 1;
        }
    }

    pub fn previous_step(&mut self) {
        self.selected_step = self.selected_step.saturating_sub(1);
    }

    pub fn selected_project<'a>(&self, projects: &'a [Project]) -> Option<&'a Project> {
        self.list_state.selected().and_then(|i| projects.get(i))
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_cursor.is_some()
    }

    fn open_menu(&mut self, current: StepStatus) {
        let cursor = StepStatus::ALL
            .iter()
            .position(|s| *s == current)
            .unwrap_or(0);
        self.menu_cursor = Some(cursor);
    }

    fn close_menu(&mut self) {
        self.menu_cursor = None;
    }
}

pub fn render_status_panel<B: Backend>(
    frame: &mut Frame<B>,
    state: &mut StatusPanelState,
    projects: &[Project],
    now: DateTime<Utc>,
) {
    let size = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ].as_ref())
        .split(size);

    let header = Paragraph::new(Spans::from(vec![
        Span::styled("Marmoraria / Projects  ", Style::default().fg(Color::Gray)),
        Span::styled(
            "Stone Shop Status Panel",
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    let selected = state.list_state.selected();
    let items: Vec<ListItem> = projects
        .iter()
        .enumerate()
        .map(|(i, project)| {
            let step_cursor = (selected == Some(i)).then_some(state.selected_step);
            project_card(project, step_cursor, now)
        })
        .collect();

    let cards = List::new(items)
        .block(Block::default().title("Projects").borders(Borders::ALL));
    frame.render_stateful_widget(cards, chunks[1], &mut state.list_state);

    let buttons_text = if state.is_menu_open() {
        "<Up/Down> Choose status | <Enter> Apply | <Esc> Close"
    } else if state.selected_project(projects).is_some() {
        "<Up/Down> Project | <Left/Right> Step | <Enter> Change status | <P/I/C> Pending/In progress/Completed | <N> New | <L> Copy link | <V> Details | <Q> Quit"
    } else {
        "<N> New Project | <Q> Quit"
    };

    let buttons = Paragraph::new(buttons_text)
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));
    frame.render_widget(buttons, chunks[2]);

    if let Some(cursor) = state.menu_cursor {
        let steps = state
            .selected_project(projects)
            .map_or(&[][..], |p| p.steps.as_slice());
        render_status_menu(frame, size, cursor, steps, state.selected_step);
    }
}

fn project_card(project: &Project, step_cursor: Option<usize>, now: DateTime<Utc>) -> ListItem<'static> {
    let title_style = if step_cursor.is_some() {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let mut lines = vec![
        Spans::from(Span::styled(project.title(), title_style)),
        Spans::from(format!(
            "Start: {}   Expected end: {}",
            format_date(project.start_date),
            format_date(project.expected_end_date)
        )),
    ];

    for (i, step) in project.steps.iter().enumerate() {
        let row_style = if step_cursor == Some(i) {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        lines.push(Spans::from(vec![
            Span::raw("  "),
            status_icon(step.status),
            Span::styled(format!(" {:<14}", step.name), row_style),
            status_badge(step.status),
        ]));
    }

    let update = &project.last_update;
    lines.push(Spans::from(vec![
        project_badge(project.status()),
        Span::raw("  "),
        Span::styled(update.user.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!(" {} {}", update.action, format_relative(update.timestamp, now)),
            Style::default().add_modifier(Modifier::ITALIC),
        ),
    ]));
    lines.push(Spans::from(""));

    ListItem::new(lines)
}

// Statuses the step cannot take yet are dimmed with a hint. Picking one is still rejected by the store.
fn render_status_menu<B: Backend>(
    frame: &mut Frame<B>,
    size: Rect,
    cursor: usize,
    steps: &[Step],
    step_index: usize,
) {
    let area = centered_rect(40, 30, size);
    let items: Vec<ListItem> = StepStatus::ALL
        .iter()
        .map(|status| {
            if can_transition(steps, step_index, *status) {
                ListItem::new(Spans::from(vec![
                    status_icon(*status),
                    Span::raw(format!(" {}", status.label())),
                ]))
            } else {
                ListItem::new(Spans::from(vec![
                    status_icon(*status),
                    Span::styled(
                        format!(" {} (earlier steps pending)", status.label()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            }
        })
        .collect();

    let menu = List::new(items)
        .block(Block::default().title("Set status").borders(Borders::ALL))
        .style(Style::default().bg(Color::Black))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    let mut menu_state = ListState::default();
    menu_state.select(Some(cursor));

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(menu, area, &mut menu_state);
}

pub fn handle_key(
    state: &mut StatusPanelState,
    projects: &[Project],
    key: KeyCode,
) -> Option<PanelAction> {
    let project = state.selected_project(projects);

    if let Some(cursor) = state.menu_cursor {
        match key {
            KeyCode::Up => {
                state.menu_cursor = Some(cursor.checked_sub(1).unwrap_or(StepStatus::ALL.len() - 1));
            }
            KeyCode::Down => {
                state.menu_cursor = Some((cursor + 1) % StepStatus::ALL.len());
            }
            KeyCode::Enter => {
                state.close_menu();
                return project.map(|p| PanelAction::SetStatus {
                    project_id: p.id,
                    step_index: state.selected_step,
                    status: StepStatus::ALL[cursor],
                });
            }
            KeyCode::Esc | KeyCode::Char('q') => state.close_menu(),
            _ => {}
        }
        return None;
    }

    let step_index = state.selected_step;
    let set_status = |status: StepStatus| {
        project.map(|p| PanelAction::SetStatus {
            project_id: p.id,
            step_index,
            status,
        })
    };

    match key {
        KeyCode::Char('q') | KeyCode::Esc => Some(PanelAction::Quit),
        KeyCode::Char('n') => Some(PanelAction::NewProject),
        KeyCode::Char('l') => project.map(|p| PanelAction::CopyLink(p.id)),
        KeyCode::Char('v') => project.map(|p| PanelAction::OpenDetail(p.id)),
        KeyCode::Char('p') => set_status(StepStatus::Pending),
        KeyCode::Char('i') => set_status(StepStatus::InProgress),
        KeyCode::Char('c') => set_status(StepStatus::Completed),
        KeyCode::Enter => {
            let current = project.and_then(|p| p.steps.get(step_index)).map(|s| s.status);
            if let Some(current) = current {
                state.open_menu(current);
            }
            None
        }
        KeyCode::Down => {
            state.next(projects.len());
            None
        }
        KeyCode::Up => {
            state.previous(projects.len());
            None
        }
        KeyCode::Right | KeyCode::Tab => {
            let step_count = project.map_or(0, |p| p.steps.len());
            state.next_step(step_count);
            None
        }
        KeyCode::Left | KeyCode::BackTab => {
            state.previous_step();
            None
        }
        _ => None,
    }
}
