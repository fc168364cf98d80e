use chrono::{Datelike, NaiveDate};
use crossterm::event::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DatePart {
    Year,
    Month,
    Day,
}

impl DatePart {
    fn width(self) -> usize {
        match self {
            DatePart::Year => 4,
            DatePart::Month | DatePart::Day => 2,
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            DatePart::Year => "[YYYY]",
            DatePart::Month => "[MM]",
            DatePart::Day => "[DD]",
        }
    }
}

/// Digit-by-digit editor for a calendar date, one part at a time.
#[derive(Debug, Clone)]
pub struct DateInputState {
    pub date: NaiveDate,
    pub editing: bool,
    pub date_part: DatePart,
    pub buffer: String,
}

impl DateInputState {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            editing: false,
            date_part: DatePart::Year,
            buffer: String::new(),
        }
    }

    pub fn set_editing(&mut self, editing: bool) {
        self.editing = editing;
        self.date_part = DatePart::Year;
        self.buffer.clear();
    }

    pub fn next_date_part(&mut self) {
        self.date_part = match self.date_part {
            DatePart::Year => DatePart::Month,
            DatePart::Month => DatePart::Day,
            DatePart::Day => DatePart::Year,
        };
        self.buffer.clear();
    }

    pub fn previous_date_part(&mut self) {
        self.date_part = match self.date_part {
            DatePart::Year => DatePart::Day,
            DatePart::Month => DatePart::Year,
            DatePart::Day => DatePart::Month,
        };
        self.buffer.clear();
    }

    pub fn handle_input(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        match key {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.buffer.push(c);
                if self.buffer.len() == self.date_part.width() {
                    self.commit_buffer();
                    self.next_date_part();
                }
            }
            KeyCode::Backspace => {
                self.buffer.pop();
            }
            KeyCode::Right => self.next_date_part(),
            KeyCode::Left => self.previous_date_part(),
            _ => {}
        }
    }

    // Invalid values (month 13, Feb 30, ...) leave the date unchanged.
    fn commit_buffer(&mut self) {
        let Ok(value) = self.buffer.parse::<u32>() else {
            return;
        };
        let updated = match self.date_part {
            DatePart::Year => {
                if !(1900..=2100).contains(&value) {
                    return;
                }
                self.date.with_year(value as i32)
            }
            DatePart::Month => self.date.with_month(value),
            DatePart::Day => self.date.with_day(value),
        };
        if let Some(date) = updated {
            self.date = date;
        }
    }

    pub fn display_string(&self) -> String {
        if !self.editing {
            return self.date.format("%Y-%m-%d").to_string();
        }

        let marker = if self.buffer.is_empty() {
            self.date_part.placeholder().to_string()
        } else {
            format!("[{}]", self.buffer)
        };
        let year = format!("{:04}", self.date.year());
        let month = format!("{:02}", self.date.month());
        let day = format!("{:02}", self.date.day());

        match self.date_part {
            DatePart::Year => format!("{}{}-{}-{}", year, marker, month, day),
            DatePart::Month => format!("{}-{}{}-{}", year, month, marker, day),
            DatePart::Day => format!("{}-{}-{}{}", year, month, day, marker),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editing_at(y: i32, m: u32, d: u32) -> DateInputState {
        let mut state = DateInputState::new(NaiveDate::from_ymd_opt(y, m, d).unwrap());
        state.set_editing(true);
        state
    }

    fn type_digits(state: &mut DateInputState, digits: &str) {
        for c in digits.chars() {
            state.handle_input(KeyCode::Char(c));
        }
    }

    #[test]
    fn test_full_date_entry() {
        let mut state = editing_at(2024, 1, 1);
        type_digits(&mut state, "20250315");
        assert_eq!(state.date, NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
    }

    #[test]
    fn test_invalid_month_is_ignored() {
        let mut state = editing_at(2024, 5, 10);
        state.handle_input(KeyCode::Right);
        type_digits(&mut state, "13");
        assert_eq!(state.date.month(), 5);
    }

    #[test]
    fn test_invalid_day_for_month_is_ignored() {
        let mut state = editing_at(2023, 2, 10);
        state.handle_input(KeyCode::Left);
        assert_eq!(state.date_part, DatePart::Day);
        type_digits(&mut state, "30");
        assert_eq!(state.date.day(), 10);
    }

    #[test]
    fn test_not_editing_ignores_keys() {
        let mut state = DateInputState::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        type_digits(&mut state, "1999");
        assert_eq!(state.date.year(), 2024);
        assert_eq!(state.display_string(), "2024-06-01");
    }

    #[test]
    fn test_display_marks_current_part() {
        let mut state = editing_at(2024, 6, 1);
        assert_eq!(state.display_string(), "2024[YYYY]-06-01");
        state.handle_input(KeyCode::Right);
        state.handle_input(KeyCode::Char('1'));
        assert_eq!(state.display_string(), "2024-06[1]-01");
    }
}
