use crate::app::{App, Focus};
use crate::scene;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 22;

/// Max scroll for help content (generous to account for text wrapping on small screens)
pub const HELP_CONTENT_LINES: u16 = 40;

/// Number of lines in controls content
pub const CONTROLS_CONTENT_LINES: u16 = 13;

// UI color scheme
const BORDER_COLOR: Color = Color::Green;
const HIGHLIGHT_COLOR: Color = Color::Yellow;
const TEXT_COLOR: Color = Color::White;
const DIM_TEXT_COLOR: Color = Color::Gray;

/// Creates a standard styled block with rounded borders
fn styled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
        .title(title)
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if app.fullscreen_mode {
        render_canvas(frame, area, app);
    } else {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(area);

        render_sidebar(frame, layout[0], app);
        render_canvas(frame, layout[1], app);
    }

    if app.show_help {
        render_help_overlay(frame, area, app);
    }
}

fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),  // Status
            Constraint::Length(9),  // Parameters
            Constraint::Min(10),    // Controls
        ])
        .split(area);

    render_status_box(frame, sections[0], app);
    render_params_box(frame, sections[1], app);
    render_controls_box(frame, sections[2], app);
}

fn render_status_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Matrix Rain ");

    let status_text = if app.simulation.paused {
        "PAUSED"
    } else {
        "RAINING"
    };
    let status_color = if app.simulation.paused {
        HIGHLIGHT_COLOR
    } else {
        BORDER_COLOR
    };

    let (pitch, yaw) = app.simulation.view_angles();
    let tracking = if app.simulation.camera.auto_tracking {
        "moving"
    } else {
        "still"
    };

    let content = vec![
        Line::from(Span::styled(
            format!("{} strips", app.simulation.strips().len()),
            Style::default().fg(TEXT_COLOR),
        )),
        Line::from(Span::styled(
            format!("cam {:+.0}/{:+.0} {}", pitch, yaw, tracking),
            Style::default().fg(DIM_TEXT_COLOR),
        )),
        Line::from(Span::styled(status_text, Style::default().fg(status_color))),
    ];

    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}

fn render_params_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Parameters ");

    let make_line = |label: &str, value: String, focused: bool| {
        let prefix = if focused { "> " } else { "  " };
        let style = if focused {
            Style::default().fg(HIGHLIGHT_COLOR)
        } else {
            Style::default().fg(TEXT_COLOR)
        };
        Line::from(Span::styled(
            format!("{}{}: {}", prefix, label, value),
            style,
        ))
    };

    let on_off = |v: bool| if v { "on" } else { "off" }.to_string();
    let settings = &app.simulation.settings;

    let content = vec![
        make_line(
            "Speed",
            format!("{:.2}", settings.speed),
            app.focus == Focus::Speed,
        ),
        make_line(
            "Density",
            format!("{:.0}", settings.density),
            app.focus == Focus::Density,
        ),
        make_line(
            "Mode",
            settings.mode.name().to_string(),
            app.focus == Focus::Mode,
        ),
        make_line(
            "Color",
            app.color_scheme.name().to_string(),
            app.focus == Focus::ColorScheme,
        ),
        make_line("Fog", on_off(settings.fog), app.focus == Focus::Fog),
        make_line("Waves", on_off(settings.waves), app.focus == Focus::Waves),
        make_line("Rotate", on_off(settings.rotate), app.focus == Focus::Rotate),
    ];

    // Calculate scroll to keep focused item visible based on actual area
    let focus_line = app.focus.line_index();
    let visible_height = area.height.saturating_sub(2); // minus borders
    let content_height = content.len() as u16;

    let scroll = if visible_height == 0 || visible_height >= content_height {
        0
    } else if focus_line >= visible_height {
        focus_line.saturating_sub(visible_height - 1)
    } else {
        0
    };

    let paragraph = Paragraph::new(content).block(block).scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_controls_box(frame: &mut Frame, area: Rect, app: &App) {
    let key_style = Style::default().fg(HIGHLIGHT_COLOR);
    let desc_style = Style::default().fg(DIM_TEXT_COLOR);

    let settings = &app.simulation.settings;

    let make_control = |key: &str, desc: String| -> Line<'_> {
        Line::from(vec![
            Span::styled(format!("{:>5}", key), key_style),
            Span::styled(format!(" {}", desc), desc_style),
        ])
    };

    let content = vec![
        make_control("Space", "pause/resume".to_string()),
        make_control("H/?", "help".to_string()),
        make_control("R", "respawn strips".to_string()),
        make_control("M", format!("mode: {}", settings.mode.name())),
        make_control("C", format!("color: {}", app.color_scheme.name())),
        make_control("F", "toggle fog".to_string()),
        make_control("W", "toggle waves".to_string()),
        make_control("O", "toggle rotate".to_string()),
        make_control("V", "fullscreen".to_string()),
        make_control("+/-", "speed".to_string()),
        make_control("[/]", "density".to_string()),
        make_control("Tab", "focus params".to_string()),
        make_control("Q", "quit".to_string()),
    ];

    let content_height = content.len() as u16;
    let visible_height = area.height.saturating_sub(2); // minus borders
    let max_scroll = content_height.saturating_sub(visible_height);
    let is_scrollable = max_scroll > 0;

    let title = if is_scrollable {
        " Controls (↑↓) "
    } else {
        " Controls "
    };

    let block = styled_block(title);

    let paragraph = Paragraph::new(content)
        .block(block)
        .scroll((app.controls_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_canvas(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block("");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cells = scene::render_scene(&app.simulation, inner.width, inner.height, app.color_scheme);

    for cell in cells {
        let x = inner.x + cell.x;
        let y = inner.y + cell.y;

        if x < inner.x + inner.width && y < inner.y + inner.height {
            let cell_rect = Rect {
                x,
                y,
                width: 1,
                height: 1,
            };
            let span = Span::styled(cell.char.to_string(), Style::default().fg(cell.color));
            let paragraph = Paragraph::new(Line::from(span));
            frame.render_widget(paragraph, cell_rect);
        }
    }
}

fn render_help_overlay(frame: &mut Frame, area: Rect, app: &App) {
    // Calculate the canvas area (exclude sidebar unless fullscreen)
    let canvas_x = if app.fullscreen_mode { 0 } else { SIDEBAR_WIDTH };
    let canvas_width = if app.fullscreen_mode {
        area.width
    } else {
        area.width.saturating_sub(SIDEBAR_WIDTH)
    };

    // Center the help dialog within the canvas
    let help_width = 56.min(canvas_width.saturating_sub(4));
    let help_height = area.height.saturating_sub(4).min(30);
    let x = canvas_x + (canvas_width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = Rect {
        x: area.x + x,
        y: area.y + y,
        width: help_width,
        height: help_height,
    };

    // Clear the background
    frame.render_widget(Clear, help_area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "DIGITAL RAIN",
            Style::default().fg(BORDER_COLOR),
        )),
        Line::from(""),
        Line::from("Columns of glyphs fall through a 3D arena, projected with perspective, fog and a traveling brightness wave. Strips recycle endlessly; the camera drifts between preset views."),
        Line::from(""),
        Line::from(Span::styled("M - Glyph Mode", Style::default().fg(TEXT_COLOR))),
        Line::from("Matrix (katakana), DNA (ACGT), Binary, Hex, Decimal"),
        Line::from(""),
        Line::from(Span::styled("C - Color Scheme", Style::default().fg(TEXT_COLOR))),
        Line::from("Green, Amber, Ice, Violet"),
        Line::from(""),
        Line::from(Span::styled("F - Fog", Style::default().fg(TEXT_COLOR))),
        Line::from("Dim distant glyphs by depth"),
        Line::from(""),
        Line::from(Span::styled("W - Waves", Style::default().fg(TEXT_COLOR))),
        Line::from("Brightness wave traveling along each strip"),
        Line::from(""),
        Line::from(Span::styled("O - Rotate", Style::default().fg(TEXT_COLOR))),
        Line::from("Camera auto-tracking between 16 preset views"),
        Line::from(""),
        Line::from(Span::styled("BASIC CONTROLS:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("Space=Pause, R=Respawn, V=Fullscreen, Tab/Arrows=Adjust, +/-=Speed, [/]=Density, Q=Quit"),
        Line::from(""),
    ];

    let content_height = content.len() as u16;
    let visible_height = help_height.saturating_sub(2); // minus borders
    let max_scroll = content_height.saturating_sub(visible_height);
    let is_scrollable = max_scroll > 0;

    let title = if is_scrollable {
        " Help (J/K scroll, H to close) "
    } else {
        " Help (H to close) "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(HIGHLIGHT_COLOR))
        .title(title);

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.help_scroll, 0));

    frame.render_widget(paragraph, help_area);
}
