//! Rendering for the deskmon screens.
//!
//! Each screen draws as a centered card with a one-line hint footer,
//! plus a status line pinned to the bottom of the frame.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::screens::FormPhase;
use crate::screens::login::{LoginField, LoginScreen};
use crate::screens::monitoring::MonitoringScreen;
use crate::screens::register::{RegisterField, RegisterScreen};
use crate::state::{AppState, Screen};

/// Spinner animation frames.
pub const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Renders the whole frame from the current state.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    render_status_line(app, frame, area);

    match &app.screen {
        Screen::Login(screen) => render_login(app, screen, frame, area),
        Screen::Register(screen) => render_register(app, screen, frame, area),
        Screen::Monitoring(screen) => render_monitoring(app, screen, frame, area),
    }
}

fn render_login(app: &AppState, screen: &LoginScreen, frame: &mut Frame, area: Rect) {
    let card = calculate_card_area(area, 52, 11);
    let inner = render_card(frame, card, "Sign in", Color::Cyan);

    let editable = screen.phase == FormPhase::Idle;
    let lines = vec![
        Line::default(),
        field_line(
            "Email",
            &screen.email,
            screen.focus == LoginField::Email,
            editable,
            false,
        ),
        field_line(
            "Password",
            &screen.password,
            screen.focus == LoginField::Password,
            editable,
            true,
        ),
        Line::default(),
        feedback_line(
            app,
            screen.phase,
            "Signing in",
            screen.error.as_deref(),
            screen.notice.as_deref(),
        ),
    ];
    frame.render_widget(Paragraph::new(lines), body_area(inner));

    render_hints(
        frame,
        inner,
        &[
            ("Enter", "sign in"),
            ("Tab", "switch field"),
            ("Ctrl+R", "register"),
            ("Esc", "quit"),
        ],
        Color::Cyan,
    );
}

fn render_register(app: &AppState, screen: &RegisterScreen, frame: &mut Frame, area: Rect) {
    let card = calculate_card_area(area, 52, 13);
    let inner = render_card(frame, card, "Create account", Color::Cyan);

    let editable = screen.phase == FormPhase::Idle;
    let lines = vec![
        Line::default(),
        field_line(
            "Email",
            &screen.email,
            screen.focus == RegisterField::Email,
            editable,
            false,
        ),
        field_line(
            "Full name",
            &screen.full_name,
            screen.focus == RegisterField::FullName,
            editable,
            false,
        ),
        field_line(
            "Password",
            &screen.password,
            screen.focus == RegisterField::Password,
            editable,
            true,
        ),
        field_line(
            "Confirm",
            &screen.confirm,
            screen.focus == RegisterField::Confirm,
            editable,
            true,
        ),
        Line::default(),
        feedback_line(
            app,
            screen.phase,
            "Creating account",
            screen.error.as_deref(),
            screen.notice.as_deref(),
        ),
    ];
    frame.render_widget(Paragraph::new(lines), body_area(inner));

    render_hints(
        frame,
        inner,
        &[
            ("Enter", "create account"),
            ("Tab", "switch field"),
            ("Ctrl+L", "sign in"),
            ("Esc", "quit"),
        ],
        Color::Cyan,
    );
}

fn render_monitoring(app: &AppState, screen: &MonitoringScreen, frame: &mut Frame, area: Rect) {
    let card = calculate_card_area(area, 64, 11);
    let inner = render_card(frame, card, "Monitoring", Color::Cyan);

    let status = if screen.launched {
        Line::from(Span::styled(
            "Dashboard opened in your browser.",
            Style::default().fg(Color::Green),
        ))
    } else {
        let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
        Line::from(Span::styled(
            format!("{spinner} Opening the Grafana dashboard..."),
            Style::default().fg(Color::Yellow),
        ))
    };

    let lines = vec![
        Line::default(),
        status,
        Line::default(),
        Line::from(Span::styled(
            "If nothing opened, follow this link:",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            format!(
                "  {}",
                truncate_middle(&app.monitoring_url, inner.width.saturating_sub(2) as usize)
            ),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), body_area(inner));

    render_hints(
        frame,
        inner,
        &[
            ("Enter", "open dashboard"),
            ("Ctrl+L", "back to sign in"),
            ("q", "quit"),
        ],
        Color::Cyan,
    );
}

/// Renders one form field row with a block cursor on the focused field.
fn field_line(
    label: &str,
    value: &str,
    focused: bool,
    editable: bool,
    mask: bool,
) -> Line<'static> {
    let shown = if mask {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    };

    let label_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![
        Span::styled(format!("{label:<11}"), label_style),
        Span::raw(shown),
    ];
    if focused && editable {
        spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
    }
    Line::from(spans)
}

/// The submit feedback row: spinner while in flight, then error or notice.
fn feedback_line(
    app: &AppState,
    phase: FormPhase,
    busy_label: &str,
    error: Option<&str>,
    notice: Option<&str>,
) -> Line<'static> {
    if phase == FormPhase::Submitting {
        let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
        return Line::from(Span::styled(
            format!("{spinner} {busy_label}..."),
            Style::default().fg(Color::Yellow),
        ));
    }
    if let Some(error) = error {
        return Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        ));
    }
    if let Some(notice) = notice {
        return Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Green),
        ));
    }
    Line::default()
}

/// Calculates the centered card area within the frame.
fn calculate_card_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));

    let card_x = (area.width.saturating_sub(width)) / 2;
    let card_y = (area.height.saturating_sub(height)) / 2;
    Rect::new(card_x, card_y, width, height)
}

/// Renders the card container (clears background, draws border and title)
/// and returns the inner area.
fn render_card(frame: &mut Frame, area: Rect, title: &str, border_color: Color) -> Rect {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(block, area);

    Rect::new(
        area.x + 2,
        area.y + 1,
        area.width.saturating_sub(4),
        area.height.saturating_sub(2),
    )
}

/// The card body above the hint footer row.
fn body_area(inner: Rect) -> Rect {
    Rect::new(
        inner.x,
        inner.y,
        inner.width,
        inner.height.saturating_sub(1),
    )
}

/// Renders a line of keyboard hints at the bottom of the card.
fn render_hints(frame: &mut Frame, inner: Rect, hints: &[(&str, &str)], highlight: Color) {
    let hints_y = inner.y + inner.height.saturating_sub(1);
    let hints_area = Rect::new(inner.x, hints_y, inner.width, 1);

    let mut spans = Vec::new();
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            (*key).to_string(),
            Style::default().fg(highlight),
        ));
        spans.push(Span::styled(
            format!(" {action}"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let para = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(para, hints_area);
}

/// Status line pinned to the bottom row of the frame.
fn render_status_line(app: &AppState, frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let status_area = Rect::new(area.x, area.y + area.height - 1, area.width, 1);

    let line = Line::from(vec![
        Span::styled(
            " deskmon",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", truncate_middle(&app.api_base_url, 48)),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), status_area);
}

/// Shortens a string to at most `max` characters by cutting out the middle.
fn truncate_middle(s: &str, max: usize) -> String {
    let len = s.chars().count();
    if len <= max || max < 10 {
        return s.to_string();
    }

    let keep = (max - 3) / 2;
    let start: String = s.chars().take(keep).collect();
    let end: String = s.chars().skip(len - keep).collect();
    format!("{start}...{end}")
}
