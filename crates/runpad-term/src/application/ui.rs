use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::Clear;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use tokio::sync::mpsc;
use tui_textarea::TextArea;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Languages;
use crate::domain::models::Message;
use crate::domain::services::AppState;
use crate::domain::services::AppStateProps;
use crate::domain::services::EventsService;
use crate::domain::services::Focus;

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];
const HELP_LINE: &str =
    " Ctrl+R run | F2 language | F3 assistant | F6 switch pane | Alt+↑/↓ Alt+PgUp/PgDn scroll output | Ctrl+C cancel/quit ";
const DIALOG_HELP_LINE: &str =
    " Enter ask | Alt+Enter new line | F4 use code block from reply | Esc close ";

struct Editors<'a> {
    source: TextArea<'a>,
    stdin: TextArea<'a>,
    prompt: TextArea<'a>,
}

fn new_textarea<'a>(text: &str) -> TextArea<'a> {
    return TextArea::new(text.split('\n').map(|e| return e.to_string()).collect());
}

fn text_of(textarea: &TextArea) -> String {
    return textarea.lines().join("\n");
}

fn decorate(textarea: &mut TextArea, title: String, focused: bool) {
    let mut block = Block::bordered().title(title);
    if focused {
        block = block.border_style(Style::default().fg(Color::Cyan));
        textarea.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
    } else {
        textarea.set_cursor_style(Style::default());
    }

    textarea.set_cursor_line_style(Style::default());
    textarea.set_block(block);
}

fn decorate_all(editors: &mut Editors, app_state: &AppState) {
    let dialog_open = app_state.is_assistant_dialog_open;

    decorate(
        &mut editors.source,
        format!(
            " {} · {} ",
            app_state.language.display_name, app_state.language.output_filename
        ),
        !dialog_open && app_state.focus == Focus::Source,
    );
    decorate(
        &mut editors.stdin,
        " stdin ".to_string(),
        !dialog_open && app_state.focus == Focus::Stdin,
    );
    decorate(&mut editors.prompt, " Prompt ".to_string(), dialog_open);
    editors.prompt.set_placeholder_text("Ask the assistant anything...");
}

fn message_style(message: &Message) -> Style {
    if message.is_error() {
        return Style::default().fg(Color::Red);
    }

    return Style::default();
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    return Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1])[1];
}

fn language_bar(app_state: &AppState, spinner: &str) -> Line<'static> {
    let mut spans = vec![Span::styled(
        " Language: ",
        Style::default().add_modifier(Modifier::BOLD),
    )];

    for language in Languages::all() {
        let style = if language.api_id == app_state.language.api_id {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", language.display_name), style));
        spans.push(Span::raw(" "));
    }

    if app_state.is_executing {
        spans.push(Span::styled(
            format!(" {spinner} running"),
            Style::default().fg(Color::Yellow),
        ));
    }
    if app_state.is_assistant_busy {
        spans.push(Span::styled(
            format!(" {spinner} assistant"),
            Style::default().fg(Color::Magenta),
        ));
    }

    return Line::from(spans);
}

fn render_output(frame: &mut Frame, area: Rect, app_state: &AppState, spinner: &str) {
    let title = match app_state.exit_code {
        Some(code) => format!(" Output (exit {code}) "),
        None => " Output ".to_string(),
    };
    let block = Block::bordered().title(title);

    if app_state.is_executing {
        let loading = Paragraph::new(format!("{spinner} Running {}...", app_state.language.display_name))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow))
            .block(block);
        frame.render_widget(loading, area);
        return;
    }

    let output = Paragraph::new(app_state.output.text.as_str())
        .style(message_style(&app_state.output))
        .wrap(Wrap { trim: false })
        .scroll((app_state.output_scroll, 0))
        .block(block);
    frame.render_widget(output, area);
}

fn render_assistant(frame: &mut Frame, app_state: &AppState, editors: &Editors, spinner: &str) {
    let area = centered_rect(70, 70, frame.area());
    frame.render_widget(Clear, area);

    let [reply_area, prompt_area, help_area] = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(5),
        Constraint::Length(1),
    ])
    .areas(area);

    let reply_block = Block::bordered()
        .title(" Assistant ")
        .border_style(Style::default().fg(Color::Magenta));

    let reply = if app_state.is_assistant_busy {
        Paragraph::new(format!("{spinner} Thinking..."))
            .style(Style::default().fg(Color::Magenta))
    } else {
        Paragraph::new(app_state.assistant_reply.text.as_str())
            .style(message_style(&app_state.assistant_reply))
    };
    frame.render_widget(
        reply.wrap(Wrap { trim: false }).block(reply_block),
        reply_area,
    );

    frame.render_widget(&editors.prompt, prompt_area);
    frame.render_widget(
        Paragraph::new(DIALOG_HELP_LINE).style(Style::default().fg(Color::DarkGray)),
        help_area,
    );
}

fn render(frame: &mut Frame, app_state: &AppState, editors: &Editors, tick: usize) {
    let spinner = SPINNER[tick % SPINNER.len()];

    let [bar_area, main_area, help_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let [left_area, output_area] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
            .areas(main_area);

    let [source_area, stdin_area] =
        Layout::vertical([Constraint::Min(5), Constraint::Length(6)]).areas(left_area);

    frame.render_widget(language_bar(app_state, spinner), bar_area);
    frame.render_widget(&editors.source, source_area);
    frame.render_widget(&editors.stdin, stdin_area);
    render_output(frame, output_area, app_state, spinner);
    frame.render_widget(
        Paragraph::new(HELP_LINE).style(Style::default().fg(Color::DarkGray)),
        help_area,
    );

    if app_state.is_assistant_dialog_open {
        render_assistant(frame, app_state, editors, spinner);
    }
}

fn focused_textarea<'a, 'b>(
    editors: &'b mut Editors<'a>,
    app_state: &AppState,
) -> &'b mut TextArea<'a> {
    if app_state.is_assistant_dialog_open {
        return &mut editors.prompt;
    }

    return match app_state.focus {
        Focus::Source => &mut editors.source,
        Focus::Stdin => &mut editors.stdin,
    };
}

fn sync_focused(editors: &Editors, app_state: &mut AppState) {
    if app_state.is_assistant_dialog_open {
        app_state.edit_assistant_prompt(&text_of(&editors.prompt));
        return;
    }

    match app_state.focus {
        Focus::Source => app_state.edit_source(&text_of(&editors.source)),
        Focus::Stdin => app_state.edit_stdin(&text_of(&editors.stdin)),
    }
}

pub async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state_props: AppStateProps,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut app_state = AppState::new(app_state_props)?;
    let mut events = EventsService::new(rx);
    let mut editors = Editors {
        source: new_textarea(&app_state.source_text),
        stdin: new_textarea(&app_state.stdin_text),
        prompt: new_textarea(""),
    };
    let mut tick: usize = 0;

    loop {
        decorate_all(&mut editors, &app_state);
        terminal.draw(|frame| render(frame, &app_state, &editors, tick))?;

        match events.next().await? {
            Event::ExecutionResponse(response) => {
                app_state.handle_execution_response(response);
            }
            Event::AssistantResponse(response) => {
                app_state.handle_assistant_response(response);
            }
            Event::UITick => {
                tick = tick.wrapping_add(1);
            }
            Event::KeyboardCTRLC => {
                if !app_state.is_executing {
                    break;
                }
                app_state.cancel_run(&tx)?;
            }
            Event::KeyboardCTRLR => {
                app_state.trigger_run(&tx)?;
            }
            Event::KeyboardF2 => {
                app_state.select_next_language(&tx)?;
                editors.source = new_textarea(&app_state.source_text);
            }
            Event::KeyboardF3 => {
                app_state.toggle_assistant();
            }
            Event::KeyboardF4 => {
                if app_state.is_assistant_dialog_open && app_state.accept_reply_codeblock() {
                    editors.source = new_textarea(&app_state.source_text);
                }
            }
            Event::KeyboardF6 => {
                app_state.switch_focus();
            }
            Event::KeyboardEsc => {
                app_state.close_assistant();
            }
            Event::KeyboardEnter => {
                if app_state.is_assistant_dialog_open {
                    app_state.trigger_ask(&tx)?;
                    editors.prompt = new_textarea(&app_state.assistant_prompt);
                } else {
                    focused_textarea(&mut editors, &app_state).insert_newline();
                    sync_focused(&editors, &mut app_state);
                }
            }
            Event::KeyboardPaste(text) => {
                focused_textarea(&mut editors, &app_state).insert_str(text);
                sync_focused(&editors, &mut app_state);
            }
            Event::KeyboardCharInput(input) => {
                if focused_textarea(&mut editors, &app_state).input(input) {
                    sync_focused(&editors, &mut app_state);
                }
            }
            Event::UIScrollDown => {
                app_state.scroll_down();
            }
            Event::UIScrollUp => {
                app_state.scroll_up();
            }
            Event::UIScrollPageDown => {
                app_state.scroll_page_down();
            }
            Event::UIScrollPageUp => {
                app_state.scroll_page_up();
            }
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}
