//! Assessment result view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::PredictionResult;
use crate::tui::styles::MedicalTheme;

/// Render the result view, or a placeholder when no result exists yet.
pub fn render_result(f: &mut Frame, area: Rect, result: Option<&PredictionResult>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    match result {
        Some(result) => render_assessment(f, chunks[0], result),
        None => render_empty(f, chunks[0]),
    }
    render_result_footer(f, chunks[1], result.is_some());
}

fn render_empty(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "No prediction results available yet. Please complete the form.",
            MedicalTheme::text_secondary(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(content, area);
}

fn render_assessment(f: &mut Frame, area: Rect, result: &PredictionResult) {
    let block = Block::default()
        .title(Span::styled(
            " Diabetes Risk Assessment Results ",
            MedicalTheme::subtitle(),
        ))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Prediction
            Constraint::Length(3), // Positive probability
            Constraint::Length(3), // Negative probability
            Constraint::Length(2), // Confidence
            Constraint::Min(0),    // What does this mean?
        ])
        .margin(1)
        .split(inner);

    let outcome = result.outcome();
    let outcome_style = MedicalTheme::outcome(outcome);

    let prediction = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Prediction: ", MedicalTheme::text_secondary()),
            Span::styled(outcome.label(), MedicalTheme::title()),
        ]),
        Line::from(Span::styled(
            outcome.headline(),
            outcome_style.add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(prediction, chunks[0]);

    let positive = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(" Probability of Diabetes ", MedicalTheme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(MedicalTheme::danger())
        .ratio(result.probability.clamp(0.0, 1.0))
        .label(result.positive_display());
    f.render_widget(positive, chunks[1]);

    let negative = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(
                    " Probability of Non-Diabetes ",
                    MedicalTheme::text_secondary(),
                ))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(MedicalTheme::success())
        .ratio((1.0 - result.probability).clamp(0.0, 1.0))
        .label(result.negative_display());
    f.render_widget(negative, chunks[2]);

    let confidence = Paragraph::new(Line::from(vec![
        Span::styled("Confidence Level: ", MedicalTheme::text_secondary()),
        Span::styled(
            result.confidence.to_string(),
            MedicalTheme::confidence(&result.confidence).add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(confidence, chunks[3]);

    let meaning = Paragraph::new(vec![
        Line::from(Span::styled("What does this mean?", MedicalTheme::subtitle())),
        Line::from(Span::styled(outcome.advice(), MedicalTheme::text())),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(meaning, chunks[4]);
}

fn render_result_footer(f: &mut Frame, area: Rect, has_result: bool) {
    let content = if has_result {
        Line::from(vec![
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Return to Form ", MedicalTheme::key_desc()),
            Span::styled("[P] ", MedicalTheme::key_hint()),
            Span::styled("Save Report ", MedicalTheme::key_desc()),
            Span::styled("[H] ", MedicalTheme::key_hint()),
            Span::styled("Home", MedicalTheme::key_desc()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Go to Form", MedicalTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
