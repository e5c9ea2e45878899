//! Terminal demo: one loadable fetch rendered with the ratatui views.

mod input;
mod source;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use loadable::ui::theme::{MUTED_TEXT, STATUS_OK};
use loadable::ui::{centered_rect, render_view, setup_terminal, spinner_frame};
use loadable::{LoadableRenderer, LoadableTaskRunner, LoaderConfig, LoadingView, ViewLabels};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use input::{spawn_key_reader, DemoKey};
pub use source::SimulatedSource;

const TICK_RATE: Duration = Duration::from_millis(100);
const VIEW_WIDTH: u16 = 60;
const VIEW_HEIGHT: u16 = 8;
const HELP: &str = "f fetch   r refetch   c cancel   q quit";

pub async fn run(source: SimulatedSource, fallback: bool, config: &LoaderConfig) -> anyhow::Result<()> {
    let primary = source.clone();
    let mut runner = LoadableTaskRunner::new(move || {
        let source = primary.clone();
        async move { source.load().await }
    })
    .with_config(config);

    if fallback {
        runner = runner.with_fallback(move || {
            let source = source.clone();
            async move { source.cached().await }
        });
    }

    let tick = Arc::new(AtomicUsize::new(0));
    let spinner_tick = Arc::clone(&tick);
    let labels = config.labels.clone();
    let mut renderer = LoadableRenderer::new(runner.subscribe(), |value: &String| content_view(value))
        .with_config(config)
        .with_loading_view(move |view| {
            loading_view(view, &labels, spinner_tick.load(Ordering::Relaxed))
        });

    let (mut terminal, guard) = setup_terminal()?;
    let mut keys = spawn_key_reader();
    let mut ticker = tokio::time::interval(TICK_RATE);

    loop {
        runner.pump();
        let view = renderer.render();
        let status = runner.state().name();
        terminal.draw(|frame| draw(frame, view, status))?;

        tokio::select! {
            key = keys.recv() => match key {
                Some(DemoKey::Quit) | None => break,
                Some(DemoKey::Fetch) => runner.fetch(),
                Some(DemoKey::Refetch) => runner.refetch(),
                Some(DemoKey::Cancel) => runner.cancel(),
            },
            _ = runner.next_event() => {}
            _ = ticker.tick() => {
                tick.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    drop(guard);
    Ok(())
}

fn draw(frame: &mut Frame, view: Text<'static>, status: &str) {
    let area = frame.area();
    let body = centered_rect(VIEW_WIDTH, VIEW_HEIGHT, area);
    render_view(frame, body, &format!("Loadable: {}", status), view);

    if body.bottom() < area.bottom() {
        let help = Rect {
            x: body.x,
            y: body.bottom(),
            width: body.width,
            height: 1,
        };
        let paragraph = Paragraph::new(HELP).style(Style::default().fg(MUTED_TEXT));
        frame.render_widget(paragraph, help);
    }
}

fn content_view(value: &str) -> Text<'static> {
    Text::from(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  ✓ ", Style::default().fg(STATUS_OK)),
            Span::raw(value.to_string()),
        ]),
    ])
}

fn loading_view(view: LoadingView<'_, String>, labels: &ViewLabels, tick: usize) -> Text<'static> {
    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("  {} ", spinner_frame(tick)), Style::default().fg(STATUS_OK)),
            Span::raw(labels.loading.clone()),
            Span::styled(format!("   [c] {}", labels.cancel), Style::default().fg(MUTED_TEXT)),
        ]),
    ];
    // Keep the previous content visible, dimmed, while refreshing.
    if let Some(last) = view.last {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", last),
            Style::default().fg(MUTED_TEXT),
        )));
    }
    Text::from(lines)
}
