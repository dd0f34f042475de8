//! UI module: View components for the TUI.

pub mod form;
pub mod home;
pub mod result;
pub mod toast;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::application::report::DISCLAIMER;
use crate::application::View;
use crate::tui::styles::MedicalTheme;

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(vec![
        Span::styled("Important: ", MedicalTheme::warning()),
        Span::styled(DISCLAIMER, MedicalTheme::text_muted()),
    ])];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(MedicalTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

/// Form/result tab bar. The result tab is dimmed until a result exists.
pub fn render_tabs(f: &mut Frame, area: Rect, view: View, result_available: bool) {
    let results_style = if result_available {
        MedicalTheme::text()
    } else {
        MedicalTheme::disabled()
    };

    let titles = vec![
        Line::from(Span::styled(" Enter Parameters ", MedicalTheme::text())),
        Line::from(Span::styled(" View Results ", results_style)),
    ];

    let selected = match view {
        View::Form => 0,
        View::Result => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(MedicalTheme::selected())
        .divider(Span::styled("│", MedicalTheme::border()))
        .block(
            Block::default()
                .title(Span::styled(" Diabetes Risk Assessment ", MedicalTheme::title()))
                .borders(Borders::BOTTOM)
                .border_style(MedicalTheme::border()),
        );

    f.render_widget(tabs, area);
}
