//! Rendering.

use std::time::Instant;

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap};

use super::{App, Screen};
use crate::card::{CARD_GAP, CARD_HEIGHT, CARD_WIDTH, CardView, truncate};
use crate::details::{DetailsState, DetailsView};
use crate::fixtures::{self, CATEGORIES, PROFILES};
use crate::hero::HeroState;
use crate::page::{
    BrowsePage, DetailsPage, FOOTER, HomeFocus, HomePage, InputMode, ProfilesPage, RowSlot,
};
use crate::route::Route;
use crate::row::{RANK_GUTTER, RowLoader};

/// Columns reserved on each side of a row for its scroll arrow.
const ARROW_WIDTH: u16 = 2;

/// Height of the hero banner.
const HERO_HEIGHT: u16 = 10;

/// Height of one row: title line plus cards.
const ROW_HEIGHT: u16 = CARD_HEIGHT + 1;

const ACCENT: Color = Color::Red;

/// Row viewport width for a terminal `width` columns wide.
pub fn row_viewport(width: u16) -> usize {
    usize::from(width.saturating_sub(ARROW_WIDTH * 2))
}

/// Draws the whole browser.
pub fn draw(frame: &mut Frame, app: &App, now: Instant) {
    let [navbar, main, footer] = Layout::vertical([
        Constraint::Length(3), // navbar
        Constraint::Min(5),    // page
        Constraint::Length(3), // footer
    ])
    .areas(frame.area());

    draw_navbar(frame, navbar, app);
    match app.screen() {
        Screen::Home(home) => draw_home(frame, main, home, now),
        Screen::Details(page) => draw_details(frame, main, page),
        Screen::Browse(page) => draw_browse(frame, main, page),
        Screen::Profiles(page) => draw_profiles(frame, main, page),
        Screen::NotFound(path) => draw_not_found(frame, main, path),
    }
    draw_footer(frame, footer, app);
}

fn draw_navbar(frame: &mut Frame, area: Rect, app: &App) {
    let [tabs_area, search_area] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(area);

    let tab = |label: &'static str, active: bool| {
        if active {
            Span::styled(
                format!(" {label} "),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {label} "), Style::default().fg(Color::Gray))
        }
    };
    let route = app.route();
    let tabs = Paragraph::new(Line::from(vec![
        Span::styled(
            "ZENFLIX ",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        tab("1 Home", matches!(route, Route::Home | Route::Details { .. })),
        tab("2 Browse", *route == Route::Browse),
        tab("3 Profiles", *route == Route::Profiles),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(tabs, tabs_area);

    let (text, style) = match app.screen() {
        Screen::Home(home) if home.input_mode == InputMode::Search => (
            format!("{}\u{2588}", home.query),
            Style::default().fg(Color::Yellow),
        ),
        Screen::Home(home) => (home.query.clone(), Style::default()),
        _ => (String::new(), Style::default().fg(Color::DarkGray)),
    };
    let search = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(" Search: / "));
    frame.render_widget(search, search_area);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let help = match app.screen() {
        Screen::Home(home) if home.input_mode == InputMode::Search => {
            "Type to search | Enter: search | Esc: clear"
        }
        Screen::Home(_) => {
            "\u{2191}\u{2193}/j/k: row  \u{2190}\u{2192}/h/l: card  [ ]: page  Enter: open  /: search  r: reload  q: quit"
        }
        Screen::Details(_) => {
            "h/l: card  Enter: open  p: play trailer  r: retry  b/Esc: back  q: quit"
        }
        Screen::Browse(_) => "h/l/Tab: category  j/k: move  Esc: home  q: quit",
        Screen::Profiles(_) => "h/l: move  Enter: select  m: manage  Esc: home  q: quit",
        Screen::NotFound(_) => "Enter: home  q: quit",
    };
    let mut lines = vec![Line::from(help)];
    if let Some(status) = &app.status {
        lines = vec![Line::from(Span::styled(
            status.as_str(),
            Style::default().fg(Color::Yellow),
        ))];
    }
    let title = match app.screen() {
        Screen::Home(_) => format!(" {FOOTER} "),
        _ => String::new(),
    };
    let footer = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title_bottom(Line::from(title).alignment(Alignment::Right)),
    );
    frame.render_widget(footer, area);
}

// --- Home ---

fn draw_home(frame: &mut Frame, area: Rect, home: &HomePage, now: Instant) {
    let [hero_area, rows_area] =
        Layout::vertical([Constraint::Length(HERO_HEIGHT), Constraint::Min(0)]).areas(area);

    draw_hero(frame, hero_area, home, now);

    let slots = home.visible_slots();
    if slots.is_empty() && home.rows().iter().any(RowLoader::is_loading) {
        let loading =
            Paragraph::new("Loading rows\u{2026}").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(loading, rows_area);
        return;
    }

    let capacity = usize::from(rows_area.height / ROW_HEIGHT);
    if capacity == 0 {
        return;
    }
    let focused = match home.focus {
        HomeFocus::Row(slot) => slots.iter().position(|s| *s == slot),
        HomeFocus::Hero => None,
    };
    let first = focused.map_or(0, |i| i.saturating_add(1).saturating_sub(capacity));

    let mut y = rows_area.y;
    for slot in slots.iter().skip(first).take(capacity) {
        let Some(row) = home.row(*slot) else {
            continue;
        };
        let row_area = Rect::new(rows_area.x, y, rows_area.width, ROW_HEIGHT);
        let is_focused = home.focus == HomeFocus::Row(*slot);
        draw_row(frame, row_area, row, is_focused, *slot == RowSlot::Search);
        y = y.saturating_add(ROW_HEIGHT);
    }
}

fn draw_hero(frame: &mut Frame, area: Rect, home: &HomePage, now: Instant) {
    let border = if home.focus == HomeFocus::Hero {
        Style::default().fg(ACCENT)
    } else {
        Style::default()
    };
    let block = Block::default().borders(Borders::ALL).border_style(border);

    let lines = match home.hero.state() {
        HeroState::Loading => vec![Line::from(Span::styled(
            "Loading featured content\u{2026}",
            Style::default().fg(Color::DarkGray),
        ))],
        HeroState::Error(_) => vec![
            Line::from(Span::styled(
                "Featured Content Unavailable",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(home.hero.error_message().unwrap_or_default()),
            Line::from(""),
            Line::from(Span::styled("[r] Retry", Style::default().fg(ACCENT))),
        ],
        HeroState::Ready { selection, .. } => {
            let base = if home.hero.is_revealed(now) {
                Style::default()
            } else {
                Style::default().add_modifier(Modifier::DIM)
            };
            let mut meta = vec![
                Span::styled(
                    format!("{}% Match", selection.match_score),
                    Style::default().fg(Color::Green),
                ),
                Span::raw("  "),
            ];
            if !selection.year.is_empty() {
                meta.push(Span::raw(format!("{}  ", selection.year)));
            }
            meta.push(Span::styled(
                format!(" {} ", selection.rating),
                Style::default().fg(Color::Gray).add_modifier(Modifier::REVERSED),
            ));
            meta.push(Span::raw(format!("  {}", selection.duration)));
            let genres = selection
                .genres
                .iter()
                .map(|g| Span::styled(format!("[{g}] "), Style::default().fg(Color::Gray)))
                .collect::<Vec<_>>();
            vec![
                Line::from(Span::styled(
                    selection.title.as_str(),
                    base.add_modifier(Modifier::BOLD),
                )),
                Line::from(meta),
                Line::from(genres),
                Line::from(Span::styled(selection.description.as_str(), base)),
                Line::from(""),
                Line::from(Span::styled(
                    "[Enter] More Info",
                    Style::default().fg(ACCENT),
                )),
            ]
        }
    };

    let hero = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(hero, area);
}

fn draw_row(frame: &mut Frame, area: Rect, row: &RowLoader, focused: bool, is_search: bool) {
    let title_style = if focused {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else if is_search {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let [title_area, body] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(CARD_HEIGHT)]).areas(area);
    frame.render_widget(Paragraph::new(Span::styled(row.title(), title_style)), title_area);

    let [left, viewport, right] = Layout::horizontal([
        Constraint::Length(ARROW_WIDTH),
        Constraint::Min(0),
        Constraint::Length(ARROW_WIDTH),
    ])
    .areas(body);

    let scroll = row.scroll();
    if scroll.show_left() {
        frame.render_widget(arrow("\u{2039}"), left);
    }
    if scroll.show_right() {
        frame.render_widget(arrow("\u{203a}"), right);
    }

    let offset = scroll.offset();
    let stride = row.stride();
    let view_end = offset.saturating_add(usize::from(viewport.width));
    let Ok(span) = u16::try_from(stride.saturating_sub(usize::from(CARD_GAP))) else {
        return;
    };
    for (index, card) in row.cards().iter().enumerate() {
        let start = index.saturating_mul(stride);
        if start.saturating_add(usize::from(span)) <= offset || start >= view_end {
            continue;
        }
        let (Ok(skip), Ok(dest)) = (
            u16::try_from(offset.saturating_sub(start)),
            u16::try_from(start.saturating_sub(offset)),
        ) else {
            continue;
        };
        let mut item = Buffer::empty(Rect::new(0, 0, span, CARD_HEIGHT));
        draw_row_item(
            &mut item,
            row,
            index,
            card,
            focused && index == row.cursor(),
        );
        blit(frame.buffer_mut(), &item, viewport, skip, dest);
    }
}

/// Draws the rank gutter (ranked rows) and card of one item into `buf`.
fn draw_row_item(buf: &mut Buffer, row: &RowLoader, index: usize, card: &CardView, hovered: bool) {
    let mut x = 0;
    if row.show_rank() {
        let rank = Paragraph::new(format!("{:>2}", index.saturating_add(1))).style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );
        rank.render(Rect::new(0, 2, 3, 1), buf);
        x = u16::try_from(RANK_GUTTER).unwrap_or(0);
    }
    draw_card(buf, Rect::new(x, 0, CARD_WIDTH, CARD_HEIGHT), card, hovered);
}

/// Copies columns `skip..` of `item` into `viewport`, `dest` columns in.
/// Cards straddling either edge of the row are clipped, not dropped.
fn blit(buf: &mut Buffer, item: &Buffer, viewport: Rect, skip: u16, dest: u16) {
    let height = item.area.height.min(viewport.height);
    for (col, x) in (skip..item.area.width).zip(dest..viewport.width) {
        for y in 0..height {
            let target = (viewport.x.saturating_add(x), viewport.y.saturating_add(y));
            if let Some(cell) = item.cell((col, y))
                && let Some(slot) = buf.cell_mut(target)
            {
                slot.clone_from(cell);
            }
        }
    }
}

fn arrow(glyph: &'static str) -> Paragraph<'static> {
    Paragraph::new(vec![Line::from(""), Line::from(""), Line::from(glyph)])
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
}

fn draw_card(buf: &mut Buffer, area: Rect, card: &CardView, hovered: bool) {
    let border = if hovered {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let inner_width = usize::from(CARD_WIDTH.saturating_sub(2));
    let mut lines = vec![Line::from(Span::styled(
        card.truncated_title(inner_width),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    let mut meta = Vec::new();
    if let Some(rating) = &card.rating {
        meta.push(Span::styled(
            format!("\u{2605} {rating}"),
            Style::default().fg(Color::Yellow),
        ));
    }
    if card.is_trending {
        meta.push(Span::raw(" "));
        meta.push(Span::styled(
            "NEW",
            Style::default().fg(Color::White).bg(ACCENT),
        ));
    }
    lines.push(Line::from(meta));
    if hovered {
        lines.push(Line::from(Span::styled(
            "Enter: details",
            Style::default().fg(Color::Gray),
        )));
    }
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border),
    );
    widget.render(area, buf);
}

// --- Details ---

fn draw_details(frame: &mut Frame, area: Rect, page: &DetailsPage) {
    match page.loader.state() {
        DetailsState::Loading => {
            let loading = Paragraph::new("Loading\u{2026}")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(loading, area);
        }
        DetailsState::Error(message) => {
            let lines = vec![
                Line::from(Span::styled(
                    "Details Unavailable",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(format!("Failed to load: {message}")),
                Line::from(""),
                Line::from(Span::styled("[r] Retry", Style::default().fg(ACCENT))),
            ];
            let widget =
                Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
            frame.render_widget(widget, area);
        }
        DetailsState::Ready(view) => draw_details_ready(frame, area, page, view),
    }
}

fn draw_details_ready(frame: &mut Frame, area: Rect, page: &DetailsPage, view: &DetailsView) {
    let [top, similar_area] =
        Layout::vertical([Constraint::Min(8), Constraint::Length(ROW_HEIGHT)]).areas(area);
    let [main, info] =
        Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)]).areas(top);

    let mut meta = vec![Span::styled(
        format!("\u{2605} {}", view.score),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )];
    for part in [view.year.as_str(), view.rating, view.duration.as_str()] {
        if !part.is_empty() {
            meta.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
            meta.push(Span::raw(part));
        }
    }
    let genres = view
        .genres
        .iter()
        .map(|g| Span::styled(format!("[{g}] "), Style::default().fg(Color::Gray)))
        .collect::<Vec<_>>();
    let cast = view
        .cast
        .iter()
        .map(|c| {
            if c.character.is_empty() {
                c.name.clone()
            } else {
                format!("{} as {}", c.name, c.character)
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    let lines = vec![
        Line::from(Span::styled(view.tagline.as_str(), Style::default().fg(ACCENT))),
        Line::from(Span::styled(
            view.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(meta),
        Line::from(genres),
        Line::from(""),
        Line::from(Span::styled(
            "Synopsis",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(view.synopsis.as_str()),
        Line::from(""),
        Line::from(Span::styled(
            "Cast & Crew",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(cast),
        Line::from(""),
        Line::from(Span::styled("[p] Play", Style::default().fg(ACCENT))),
    ];
    let main_widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(main_widget, main);

    let field = |label: &'static str, value: &str| {
        vec![
            Line::from(Span::styled(label, Style::default().fg(Color::DarkGray))),
            Line::from(String::from(if value.is_empty() { "-" } else { value })),
        ]
    };
    let mut info_lines = Vec::new();
    info_lines.extend(field("Director", &view.director));
    info_lines.extend(field("Release Date", &view.release_date));
    info_lines.extend(field("Duration", &view.duration));
    info_lines.extend(field("Rating", view.rating));
    let info_widget = Paragraph::new(info_lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(info_widget, info);

    if page.similar().is_visible() {
        draw_row(frame, similar_area, page.similar(), true, false);
    }
}

// --- Browse ---

fn draw_browse(frame: &mut Frame, area: Rect, page: &BrowsePage) {
    let [sidebar, content, detail] = Layout::horizontal([
        Constraint::Length(18),
        Constraint::Min(20),
        Constraint::Percentage(35),
    ])
    .areas(area);

    let categories: Vec<ListItem> = CATEGORIES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let style = if i == page.category_index() {
                Style::default().fg(Color::White).bg(ACCENT)
            } else {
                Style::default()
            };
            ListItem::new(Span::styled(format!(" {name} "), style))
        })
        .collect();
    frame.render_widget(
        List::new(categories).block(Block::default().borders(Borders::ALL).title(" Categories ")),
        sidebar,
    );

    let titles = page.titles();
    let items: Vec<ListItem> = titles
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let (marker, style) = if i == page.cursor {
                ("\u{25b8} ", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
            } else {
                ("  ", Style::default())
            };
            ListItem::new(Line::from(vec![
                Span::raw(marker),
                Span::styled(t.title, style),
                Span::styled(format!(" ({})", t.year), Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("  \u{2605} {:.1}", t.rating),
                    Style::default().fg(Color::Yellow),
                ),
            ]))
        })
        .collect();
    let title = format!(" Browse: Showing {} titles ", titles.len());
    frame.render_widget(
        List::new(items).block(Block::default().borders(Borders::ALL).title(title)),
        content,
    );

    let lines = match page.focused() {
        Some(t) => {
            let mut lines = vec![
                Line::from(Span::styled(t.title, Style::default().add_modifier(Modifier::BOLD))),
                Line::from(t.categories.join(" / ")),
            ];
            if let Some(d) = fixtures::sample_details(t.id) {
                lines.extend([
                    Line::from(Span::styled(d.tagline, Style::default().fg(ACCENT))),
                    Line::from(""),
                    Line::from(d.description),
                    Line::from(""),
                    Line::from(format!("Director: {}", d.director)),
                    Line::from(format!("{} | {}", d.duration, d.rating)),
                    Line::from(format!("Cast: {}", d.cast.join(", "))),
                ]);
            }
            lines
        }
        None => vec![Line::from("No titles")],
    };
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL)),
        detail,
    );
}

// --- Profiles ---

fn draw_profiles(frame: &mut Frame, area: Rect, page: &ProfilesPage) {
    let mut profile_spans = Vec::new();
    for (i, profile) in PROFILES.iter().enumerate() {
        let style = if i == page.cursor {
            Style::default().fg(Color::White).bg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let edit = if page.editing { " \u{270e}" } else { "" };
        let kids = if profile.is_kids { " (Kids)" } else { "" };
        profile_spans.push(Span::styled(
            format!(" {}{kids}{edit} ", truncate(profile.name, 12)),
            style,
        ));
        profile_spans.push(Span::raw("   "));
    }
    profile_spans.push(Span::styled("+ Add Profile", Style::default().fg(Color::DarkGray)));

    let manage = if page.editing { "[m] Done" } else { "[m] Manage Profiles" };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Who's Watching?",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Select your profile to continue",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(profile_spans),
        Line::from(""),
        Line::from(manage),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

// --- Not found ---

fn draw_not_found(frame: &mut Frame, area: Rect, path: &str) {
    let lines = vec![
        Line::from(Span::styled(
            "404",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Page not found: {path}")),
        Line::from(""),
        Line::from("[Enter] Go Home"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::time::Duration;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal
            .draw(|frame| draw(frame, app, Instant::now()))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_row_viewport_excludes_arrows() {
        // Arrange & Act & Assert
        assert_eq!(row_viewport(100), 96);
        assert_eq!(row_viewport(3), 0);
    }

    #[test]
    fn test_home_shows_loading_hero_and_footer() {
        // Arrange
        let mut app = App::new(Route::Home, Duration::ZERO);
        let _ = app.mount();

        // Act
        let screen = render(&app);

        // Assert
        assert!(screen.contains("ZENFLIX"));
        assert!(screen.contains("Loading featured content"));
        assert!(screen.contains(FOOTER));
    }

    #[test]
    fn test_row_clips_card_straddling_left_edge() {
        // Arrange
        let items = (1..=5)
            .map(|id| crate::testing::movie(id, "Title", None, 7.0))
            .collect();
        let mut row = RowLoader::with_items("Row", items);
        row.scroll_mut().set_viewport(40);
        row.scroll_mut().scroll(crate::row::ScrollDirection::Right);
        while row.scroll_mut().tick() {}
        let mut terminal = Terminal::new(TestBackend::new(44, 7)).unwrap();

        // Act
        terminal
            .draw(|frame| draw_row(frame, Rect::new(0, 0, 44, 7), &row, false, false))
            .unwrap();

        // Assert
        // offset 32: the second card (columns 19..37) shows its last five
        // columns, so its top-right corner lands four columns in.
        assert_eq!(row.scroll().offset(), 32);
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer.cell((6, 1)).unwrap().symbol(), "\u{2510}");
        assert_eq!(buffer.cell((2, 1)).unwrap().symbol(), "\u{2500}");
    }

    #[test]
    fn test_profiles_page_renders_fixture_names() {
        // Arrange
        let app = App::new(Route::Profiles, Duration::ZERO);

        // Act
        let screen = render(&app);

        // Assert
        assert!(screen.contains("Who's Watching?"));
        assert!(screen.contains("Kids"));
    }

    #[test]
    fn test_not_found_page() {
        // Arrange
        let app = App::new(Route::NotFound(String::from("/series")), Duration::ZERO);

        // Act
        let screen = render(&app);

        // Assert
        assert!(screen.contains("Page not found: /series"));
    }
}
