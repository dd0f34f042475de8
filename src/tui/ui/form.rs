//! Health parameter input form.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::application::PredictionSession;
use crate::domain::{FieldInput, ParameterField};
use crate::tui::styles::MedicalTheme;

/// Cursor position within the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormCursor {
    pub selected: usize,
}

impl FormCursor {
    #[must_use]
    pub fn field(&self) -> ParameterField {
        ParameterField::ALL[self.selected]
    }

    pub fn next_field(&mut self) {
        self.selected = (self.selected + 1) % ParameterField::ALL.len();
    }

    pub fn prev_field(&mut self) {
        if self.selected == 0 {
            self.selected = ParameterField::ALL.len() - 1;
        } else {
            self.selected -= 1;
        }
    }
}

/// Render the parameter form.
pub fn render_form(f: &mut Frame, area: Rect, session: &PredictionSession, cursor: FormCursor) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Fields
            Constraint::Length(3), // Selected field description
            Constraint::Length(3), // Submit button
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_fields(f, chunks[0], session, cursor);
    render_field_info(f, chunks[1], cursor.field());
    render_submit(f, chunks[2], session);
    render_form_footer(f, chunks[3], session);
}

fn render_form_fields(f: &mut Frame, area: Rect, session: &PredictionSession, cursor: FormCursor) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = ParameterField::ALL.len().div_ceil(2);
    render_field_column(f, columns[0], session, &ParameterField::ALL[..mid], cursor);
    render_field_column(f, columns[1], session, &ParameterField::ALL[mid..], cursor);
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    session: &PredictionSession,
    fields: &[ParameterField],
    cursor: FormCursor,
) {
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(4))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, &field) in fields.iter().enumerate() {
        let is_selected = field == cursor.field();
        render_field(f, chunks[i], field, session.form().input(field), is_selected);
    }
}

fn render_field(f: &mut Frame, area: Rect, field: ParameterField, input: &FieldInput, is_selected: bool) {
    let spec = field.spec();

    let (border_style, title_style) = match (input, is_selected) {
        (FieldInput::Pending { .. }, _) => (MedicalTheme::danger(), MedicalTheme::danger()),
        (_, true) => (MedicalTheme::border_focused(), MedicalTheme::focused()),
        (_, false) => (MedicalTheme::border(), MedicalTheme::text_secondary()),
    };

    let block = Block::default()
        .title(Span::styled(format!(" {} ", spec.label), title_style))
        .title_top(
            Line::from(Span::styled(
                format!(" Range: {} ", spec.range_hint()),
                MedicalTheme::text_muted(),
            ))
            .right_aligned(),
        )
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner_width = area.width.saturating_sub(4) as usize;

    let value_line = Line::from(vec![
        Span::raw(" "),
        if input.text().is_empty() {
            Span::styled("required", MedicalTheme::text_muted())
        } else {
            Span::styled(input.text().to_string(), MedicalTheme::text())
        },
        if is_selected {
            Span::styled("▌", MedicalTheme::focused())
        } else {
            Span::raw("")
        },
        Span::styled(
            if spec.unit.is_empty() {
                String::new()
            } else {
                format!(" {}", spec.unit)
            },
            MedicalTheme::text_secondary(),
        ),
    ]);

    let detail_line = match input {
        FieldInput::Valid { value, .. } => {
            let ratio = ((value - spec.min) / (spec.max - spec.min)).clamp(0.0, 1.0);
            Line::from(vec![
                Span::raw(" "),
                Span::styled(slider_bar(ratio, inner_width.min(40)), MedicalTheme::track()),
            ])
        }
        FieldInput::Pending { error, .. } => Line::from(vec![
            Span::raw(" "),
            Span::styled(error.to_string(), MedicalTheme::danger()),
        ]),
    };

    f.render_widget(Paragraph::new(vec![value_line, detail_line]).block(block), area);
}

/// Slider track, e.g. `━━━━━━●───────`.
#[must_use]
pub fn slider_bar(ratio: f64, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let knob = ((ratio.clamp(0.0, 1.0) * (width - 1) as f64).round()) as usize;
    (0..width)
        .map(|i| match i.cmp(&knob) {
            std::cmp::Ordering::Less => '━',
            std::cmp::Ordering::Equal => '●',
            std::cmp::Ordering::Greater => '─',
        })
        .collect()
}

fn render_field_info(f: &mut Frame, area: Rect, field: ParameterField) {
    let spec = field.spec();
    let info = Paragraph::new(Line::from(vec![
        Span::styled(" i ", MedicalTheme::info()),
        Span::styled(format!("{}: ", spec.label), MedicalTheme::subtitle()),
        Span::styled(spec.description, MedicalTheme::text_secondary()),
    ]))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(info, area);
}

fn render_submit(f: &mut Frame, area: Rect, session: &PredictionSession) {
    let (label, style) = if session.is_submitting() {
        (" Processing... ", MedicalTheme::disabled())
    } else if !session.form().is_valid() {
        (" Get Prediction ", MedicalTheme::disabled())
    } else {
        (" Get Prediction ", MedicalTheme::button())
    };

    let button = Paragraph::new(Line::from(Span::styled(label, style)))
        .alignment(Alignment::Center)
        .block(Block::default());

    f.render_widget(button, area);
}

fn render_form_footer(f: &mut Frame, area: Rect, session: &PredictionSession) {
    let content = if let Some(err) = session.validation_message() {
        Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(err.to_string(), MedicalTheme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", MedicalTheme::key_hint()),
            Span::styled("Navigate ", MedicalTheme::key_desc()),
            Span::styled("[←→] ", MedicalTheme::key_hint()),
            Span::styled("Adjust ", MedicalTheme::key_desc()),
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Submit ", MedicalTheme::key_desc()),
            Span::styled("[D] ", MedicalTheme::key_hint()),
            Span::styled("Defaults ", MedicalTheme::key_desc()),
            Span::styled("[R] ", MedicalTheme::key_hint()),
            Span::styled("Results ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Home", MedicalTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_wraps() {
        let mut cursor = FormCursor::default();
        cursor.prev_field();
        assert_eq!(cursor.field(), ParameterField::Age);
        cursor.next_field();
        assert_eq!(cursor.field(), ParameterField::Pregnancies);
    }

    #[test]
    fn test_slider_bar() {
        assert_eq!(slider_bar(0.0, 5), "●────");
        assert_eq!(slider_bar(1.0, 5), "━━━━●");
        assert_eq!(slider_bar(0.5, 5), "━━●──");
        assert_eq!(slider_bar(0.5, 0), "");
    }
}
