use chrono::{Duration, NaiveDate};
use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::models::NewProject;
use crate::ui::components::date_input::DateInputState;

#[derive(Debug, PartialEq)]
pub enum ProjectWizardAction {
    Cancel,
    Save(NewProject),
}

#[derive(Clone, PartialEq, Copy, Debug)]
pub enum ProjectField {
    ClientName,
    StoneType,
    StartDate,
    ExpectedEndDate,
}

impl ProjectField {
    const ALL: [ProjectField; 4] = [
        ProjectField::ClientName,
        ProjectField::StoneType,
        ProjectField::StartDate,
        ProjectField::ExpectedEndDate,
    ];

    fn label(self) -> &'static str {
        match self {
            ProjectField::ClientName => "Client name",
            ProjectField::StoneType => "Stone type",
            ProjectField::StartDate => "Start date",
            ProjectField::ExpectedEndDate => "Expected end date",
        }
    }

    fn is_date(self) -> bool {
        matches!(self, ProjectField::StartDate | ProjectField::ExpectedEndDate)
    }
}

pub struct ProjectWizardState {
    pub client_name: String,
    pub stone_type: String,
    pub current_field: ProjectField,
    pub editing: bool,
    pub start_date_state: DateInputState,
    pub end_date_state: DateInputState,
}

impl ProjectWizardState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            client_name: String::new(),
            stone_type: String::new(),
            current_field: ProjectField::ClientName,
            editing: false,
            start_date_state: DateInputState::new(today),
            end_date_state: DateInputState::new(today + Duration::days(14)),
        }
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
        let editing = self.editing;
        match self.current_field {
            ProjectField::StartDate => self.start_date_state.set_editing(editing),
            ProjectField::ExpectedEndDate => self.end_date_state.set_editing(editing),
            _ => {}
        }
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            ProjectField::ClientName => ProjectField::StoneType,
            ProjectField::StoneType => ProjectField::StartDate,
            ProjectField::StartDate => ProjectField::ExpectedEndDate,
            ProjectField::ExpectedEndDate => ProjectField::ClientName,
        };
    }

    pub fn previous_field(&mut self) {
        self.current_field = match self.current_field {
            ProjectField::ClientName => ProjectField::ExpectedEndDate,
            ProjectField::StoneType => ProjectField::ClientName,
            ProjectField::StartDate => ProjectField::StoneType,
            ProjectField::ExpectedEndDate => ProjectField::StartDate,
        };
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        let text = match self.current_field {
            ProjectField::ClientName => &mut self.client_name,
            ProjectField::StoneType => &mut self.stone_type,
            ProjectField::StartDate => {
                self.start_date_state.handle_input(key);
                return;
            }
            ProjectField::ExpectedEndDate => {
                self.end_date_state.handle_input(key);
                return;
            }
        };
        match key {
            KeyCode::Char(c) => text.push(c),
            KeyCode::Backspace => {
                text.pop();
            }
            _ => {}
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.client_name.trim().is_empty() && !self.stone_type.trim().is_empty()
    }

    pub fn to_new_project(&self) -> NewProject {
        NewProject {
            client_name: self.client_name.trim().to_string(),
            stone_type: self.stone_type.trim().to_string(),
            start_date: self.start_date_state.date,
            expected_end_date: self.end_date_state.date,
        }
    }

    fn field_value(&self, field: ProjectField) -> String {
        let editing_this = self.editing && field == self.current_field;
        match field {
            ProjectField::ClientName | ProjectField::StoneType => {
                let value = if field == ProjectField::ClientName {
                    &self.client_name
                } else {
                    &self.stone_type
                };
                format!("{}{}", value, if editing_this { "|" } else { "" })
            }
            ProjectField::StartDate => self.start_date_state.display_string(),
            ProjectField::ExpectedEndDate => self.end_date_state.display_string(),
        }
    }
}

pub fn render_project_wizard<B: Backend>(f: &mut Frame<B>, state: &ProjectWizardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.size());

    let title = Paragraph::new("Add New Project")
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    render_form(f, state, chunks[1]);

    let help_text = if state.editing {
        if state.current_field.is_date() {
            "Enter - Save field | Left/Right - Switch date part | Esc - Cancel editing"
        } else {
            "Enter - Save field | Esc - Cancel editing"
        }
    } else if state.is_valid() {
        "Enter - Edit field | Up/Down - Navigate fields | S - Add project | Esc - Cancel"
    } else {
        "Enter - Edit field | Up/Down - Navigate fields | Esc - Cancel (client and stone are required)"
    };

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

fn render_form<B: Backend>(f: &mut Frame<B>, state: &ProjectWizardState, area: Rect) {
    let items: Vec<ListItem> = ProjectField::ALL
        .iter()
        .map(|field| {
            let selected = *field == state.current_field;
            let label_style = if selected {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            let value_style = if selected && state.editing {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            ListItem::new(Spans::from(vec![
                Span::styled(format!("{}: ", field.label()), label_style),
                Span::styled(state.field_value(*field), value_style),
            ]))
        })
        .collect();

    let form_list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Project Details"));

    f.render_widget(form_list, area);
}

pub fn handle_key(state: &mut ProjectWizardState, key: KeyCode) -> Option<ProjectWizardAction> {
    match key {
        KeyCode::Esc => {
            if state.editing {
                state.toggle_editing();
            } else {
                return Some(ProjectWizardAction::Cancel);
            }
        }
        KeyCode::Enter => state.toggle_editing(),
        KeyCode::Up if !state.editing => state.previous_field(),
        KeyCode::Down | KeyCode::Tab if !state.editing => state.next_field(),
        KeyCode::Char('s') if !state.editing => {
            if state.is_valid() {
                return Some(ProjectWizardAction::Save(state.to_new_project()));
            }
        }
        _ if state.editing => state.edit_current_field(key),
        _ => {}
    }

    None
}
