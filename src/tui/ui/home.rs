//! Home view: what the tool does and how to start.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::MedicalTheme;

/// Render the home screen.
pub fn render_home(f: &mut Frame, area: Rect, endpoint: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
        ])
        .split(area);

    render_header(f, chunks[0]);
    render_main_content(f, chunks[1], endpoint);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Glycocheck", MedicalTheme::title()),
        Span::styled(" │ ", MedicalTheme::text_muted()),
        Span::styled("Diabetes Risk Assessment", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_main_content(f: &mut Frame, area: Rect, endpoint: &str) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55), // About diabetes
            Constraint::Percentage(45), // Service + actions
        ])
        .split(area);

    render_about(f, chunks[0]);
    render_side_panels(f, chunks[1], endpoint);
}

fn render_about(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "A machine learning model analyzes your health parameters to assess your diabetes risk.",
            MedicalTheme::text(),
        )),
        Line::from(""),
        Line::from(Span::styled("Type 1 Diabetes", MedicalTheme::subtitle())),
        Line::from(Span::styled(
            "Autoimmune condition. The body doesn't produce insulin because the immune system \
             destroys the cells in the pancreas that make it.",
            MedicalTheme::text_secondary(),
        )),
        Line::from(""),
        Line::from(Span::styled("Type 2 Diabetes", MedicalTheme::subtitle())),
        Line::from(Span::styled(
            "The most common type. The body doesn't use insulin well and can't keep blood \
             sugar at normal levels. It develops over many years.",
            MedicalTheme::text_secondary(),
        )),
        Line::from(""),
        Line::from(Span::styled("Risk Factors", MedicalTheme::subtitle())),
        risk_factor("Family History", "A parent or sibling with diabetes increases your risk."),
        risk_factor("Weight", "Being overweight is a primary risk factor for type 2 diabetes."),
        risk_factor("Inactivity", "Physical activity helps control weight and uses glucose."),
        risk_factor("Age", "Risk increases as you get older, especially after 45."),
    ];

    let block = Block::default()
        .title(Span::styled(" What is Diabetes? ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let p = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(p, area);
}

fn risk_factor(name: &'static str, text: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled("  • ", MedicalTheme::warning()),
        Span::styled(format!("{name}: "), MedicalTheme::text()),
        Span::styled(text, MedicalTheme::text_secondary()),
    ])
}

fn render_side_panels(f: &mut Frame, area: Rect, endpoint: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Service
            Constraint::Min(0),    // Quick actions
        ])
        .margin(1)
        .split(area);

    let service = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("  Endpoint: ", MedicalTheme::text_secondary()),
            Span::styled(endpoint.to_string(), MedicalTheme::text()),
        ]),
        Line::from(vec![
            Span::styled("  Parameters: ", MedicalTheme::text_secondary()),
            Span::styled("8 (Pima diabetes features)", MedicalTheme::text()),
        ]),
    ])
    .block(
        Block::default()
            .title(Span::styled(" Prediction Service ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(service, chunks[0]);

    let actions = vec![
        Line::from(vec![
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Start Assessment", MedicalTheme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[Q] ", MedicalTheme::key_hint()),
            Span::styled("Quit", MedicalTheme::key_desc()),
        ]),
    ];

    let actions_block = Block::default()
        .title(Span::styled(" Quick Actions ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    f.render_widget(Paragraph::new(actions).block(actions_block), chunks[1]);
}
