use std::cell::RefCell;
use std::io::{self, Write, stdout};
use std::num::NonZeroUsize;
use std::rc::Rc;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, FrameExt, List, ListItem, ListState, Paragraph};
use ratatui::{DefaultTerminal, Frame};
use tracing::info;
mod cli;
mod code_input;
mod logging;
mod styles;
mod utils;
pub use code_input::{CodeInput, Handled};

use crate::cli::Cli;
use crate::styles::{
    CellStyle, cell_style_index, cell_style_names, get_cell_style_by_index,
    get_cell_style_by_name,
};
use crate::utils::{centered_rect, top_centered};

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let _log_guard = logging::init(cli.log_file.as_deref())?;
    let style = get_cell_style_by_name(&cli.style).ok_or_else(|| {
        eyre!(
            "unknown cell style `{}` (available: {})",
            cli.style,
            cell_style_names().join(", ")
        )
    })?;
    info!(length = cli.length, style = %cli.style, "starting code input");

    let app = App::new(cli.length(), &cli.value, style);
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = set_input_modes(&mut stdout(), false);
        hook(info);
    }));
    ratatui::run(|terminal| -> Result<()> {
        set_input_modes(&mut stdout(), true)?;
        let result = app.run(terminal);
        set_input_modes(&mut stdout(), false)?;
        result
    })
}

/// Mouse capture and bracketed paste, which `ratatui::run` does not manage.
fn set_input_modes(out: &mut impl Write, enabled: bool) -> io::Result<()> {
    if enabled {
        execute!(out, EnableMouseCapture, EnableBracketedPaste)
    } else {
        execute!(out, DisableBracketedPaste, DisableMouseCapture)
    }
}

struct App {
    code_input: CodeInput,
    reported: Rc<RefCell<String>>,
    style: Box<dyn CellStyle + Send>,
    cell_areas: Vec<Rect>,
    editing: Editing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Editing {
    None,
    StyleType(Option<usize>),
}

impl App {
    fn new(length: NonZeroUsize, value: &str, style: Box<dyn CellStyle + Send>) -> Self {
        let reported = Rc::new(RefCell::new(String::new()));
        let sink = Rc::clone(&reported);
        let code_input = CodeInput::new(length, value, move |value| {
            value.clone_into(&mut sink.borrow_mut());
        });
        Self {
            code_input,
            reported,
            style,
            cell_areas: Vec::new(),
            editing: Editing::None,
        }
    }

    fn run(mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            terminal.draw(|frame| self.render(frame))?;
            // Terminate the program when the handler asks for it
            if self.handle_event(event::read()?) {
                return Ok(());
            }
        }
    }

    /// Routes one terminal event.
    ///
    /// @returns true if the user wants to quit the program.
    fn handle_event(&mut self, event: Event) -> bool {
        if let Some(k) = event.as_key_press_event() {
            return self.on_key(k);
        }
        match event {
            Event::Paste(text) => {
                if self.editing == Editing::None {
                    self.code_input.handle_paste(&text);
                }
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) if self.editing == Editing::None => {
                let position = Position::new(column, row);
                if self.code_input.handle_click(&self.cell_areas, position) == Handled::Ignored {
                    self.code_input.blur();
                }
            }
            _ => (),
        }
        false
    }

    fn on_key(&mut self, k: KeyEvent) -> bool {
        if k.modifiers.contains(KeyModifiers::CONTROL) && k.code == KeyCode::Char('c') {
            return true;
        }
        match self.editing {
            Editing::None => {
                // Tab traversal belongs to the host; only the first cell is a tab stop.
                if matches!(k.code, KeyCode::Tab | KeyCode::BackTab) {
                    if self.input_focused() {
                        self.code_input.blur();
                    } else {
                        self.code_input.focus(0);
                    }
                    return false;
                }
                if self.code_input.handle_key(&k) == Handled::Consumed {
                    return false;
                }
                match k.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') => return true,
                    KeyCode::Char('s') | KeyCode::Char('S') => {
                        self.editing = Editing::StyleType(None);
                    }
                    _ => (),
                }
            }
            Editing::StyleType(idx) => match k.code {
                KeyCode::Esc => {
                    self.editing = Editing::None;
                }
                KeyCode::Down => {
                    let styles_count = cell_style_names().len();
                    self.editing = match idx {
                        Some(idx) if idx + 1 < styles_count => Editing::StyleType(Some(idx + 1)),
                        _ => Editing::StyleType(Some(0)),
                    };
                }
                KeyCode::Up => {
                    let styles_count = cell_style_names().len();
                    self.editing = match idx {
                        Some(0) => Editing::StyleType(Some(styles_count.saturating_sub(1))),
                        Some(idx) => Editing::StyleType(Some(idx - 1)),
                        None => Editing::StyleType(Some(0)),
                    };
                }
                KeyCode::Enter => {
                    if let Some(selected_idx) = idx {
                        let current_idx = cell_style_index(self.style.name()).unwrap_or(0);
                        if current_idx != selected_idx {
                            if let Some(style) = get_cell_style_by_index(selected_idx) {
                                info!(style = style.name(), "cell style changed");
                                self.style = style;
                            }
                        }
                    }
                    self.editing = Editing::None;
                }
                _ => {}
            },
        }
        false
    }

    fn input_focused(&self) -> bool {
        self.code_input.active().is_some()
    }

    fn render(&mut self, frame: &mut Frame) {
        let block = self.outer_block();
        let inner = block.inner(frame.area());
        frame.render_widget(block, frame.area());

        let (width, height) = self.code_input.required_size(self.style.as_ref());
        let vertical = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(height),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Fill(1),
        ]);
        let [_, input_row, _, status, _] = inner.layout(&vertical);

        let input_area = top_centered(width, height, input_row);
        self.cell_areas = self.code_input.cell_areas(input_area, self.style.as_ref());
        frame.render_stateful_widget_ref(&self.code_input, input_area, &mut self.style);
        self.render_status(frame, status);

        if self.editing == Editing::None {
            if let Some(position) = self.code_input.cursor_position(&self.cell_areas) {
                frame.set_cursor_position(position);
            }
        }
        self.render_style_popup(frame);
    }

    fn outer_block(&self) -> Block<'static> {
        let help = if self.input_focused() {
            Line::from(vec![
                " Leave ".into(),
                "<Tab>".blue().bold(),
                " Quit ".into(),
                "<Ctrl+C> ".blue().bold(),
            ])
        } else {
            Line::from(vec![
                " Enter code ".into(),
                "<Tab>".blue().bold(),
                " Cell style ".into(),
                "<s>".blue().bold(),
                " Quit ".into(),
                "<q> ".blue().bold(),
            ])
        };
        let block = Block::bordered()
            .title_top(Line::from(" Verification code ").centered())
            .title_bottom(help.centered());
        if self.input_focused() {
            block.cyan()
        } else {
            block
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let label = Style::default().add_modifier(Modifier::BOLD);
        let completeness = if self.code_input.is_complete() {
            Span::raw("COMPLETE").green().add_modifier(Modifier::BOLD)
        } else {
            Span::raw("INCOMPLETE").red().add_modifier(Modifier::BOLD)
        };
        let focus = self
            .code_input
            .active()
            .map_or_else(|| "outside".to_string(), |i| format!("cell {}", i + 1));
        let lines = vec![
            Line::from(vec![
                Span::styled("Value  ", label),
                Span::styled(self.reported.borrow().clone(), Style::default().cyan()),
            ]),
            Line::from(vec![Span::styled("Status ", label), completeness]),
            Line::from(vec![Span::styled("Focus  ", label), Span::raw(focus)]),
        ];
        frame.render_widget(Paragraph::new(lines).centered(), area);
    }

    fn render_style_popup(&mut self, frame: &mut Frame) {
        let Editing::StyleType(idx) = self.editing else {
            return;
        };
        let names = cell_style_names();
        let items: Vec<ListItem> = names
            .iter()
            .map(|name| ListItem::new(Span::raw(*name)))
            .collect();
        // Figure out which index corresponds to the current style
        let selected_idx = idx.or_else(|| cell_style_index(self.style.name()));
        self.editing = Editing::StyleType(selected_idx);

        let title = "Choose a cell style (ESC to close)";
        let area = centered_rect(40, 40, frame.area());
        frame.render_widget(Clear, area);
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .style(Style::default().bg(Color::Black).fg(Color::White))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        let mut state = ListState::default();
        state.select(selected_idx);
        frame.render_stateful_widget(list, area, &mut state);
    }
}
