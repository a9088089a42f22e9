//! Chart panels for the visualization view
//!
//! Series extraction is kept separate from drawing so the plotted values
//! can be checked without a terminal.

use crate::model::{format_number, RocketStat, StatsPayload, YearlyStat};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::{self, Marker},
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, LegendPosition,
        Paragraph,
    },
    Frame,
};

const GRID: Color = Color::Rgb(70, 70, 70);

/// A named series and its color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Series {
    pub name: &'static str,
    pub color: Color,
}

pub const SUCCESS_RATE: Series = Series {
    name: "Success Rate (%)",
    color: Color::Rgb(76, 175, 80),
};
pub const TOTAL_LAUNCHES: Series = Series {
    name: "Total Launches",
    color: Color::Rgb(136, 132, 216),
};
pub const AVG_PAYLOAD: Series = Series {
    name: "Avg Payload (kg)",
    color: Color::Rgb(255, 152, 0),
};
pub const TOTAL_PAYLOAD: Series = Series {
    name: "Total Payload (kg)",
    color: Color::Rgb(33, 150, 243),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartPanel {
    #[default]
    SuccessRate,
    Launches,
    Payload,
}

impl ChartPanel {
    pub fn all() -> [ChartPanel; 3] {
        [ChartPanel::SuccessRate, ChartPanel::Launches, ChartPanel::Payload]
    }

    pub fn index(&self) -> usize {
        match self {
            ChartPanel::SuccessRate => 0,
            ChartPanel::Launches => 1,
            ChartPanel::Payload => 2,
        }
    }

    pub fn next(&self) -> ChartPanel {
        Self::all()[(self.index() + 1) % 3]
    }

    pub fn prev(&self) -> ChartPanel {
        Self::all()[(self.index() + 2) % 3]
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartPanel::SuccessRate => "Launch Success Rate Over Time",
            ChartPanel::Launches => "Launches Per Year",
            ChartPanel::Payload => "Payload Capacity by Rocket",
        }
    }

    pub fn series(&self) -> &'static [Series] {
        match self {
            ChartPanel::SuccessRate => &[SUCCESS_RATE],
            ChartPanel::Launches => &[TOTAL_LAUNCHES],
            ChartPanel::Payload => &[AVG_PAYLOAD, TOTAL_PAYLOAD],
        }
    }

    /// Number of x-axis categories this panel has for `stats`
    pub fn category_count(&self, stats: &StatsPayload) -> usize {
        match self {
            ChartPanel::SuccessRate | ChartPanel::Launches => stats.yearly_stats.len(),
            ChartPanel::Payload => stats.rocket_stats.len(),
        }
    }
}

/// One x-axis category with a value per series
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBars {
    pub label: String,
    pub values: Vec<f64>,
}

/// Line points: x is the category index, y the success rate
pub fn success_rate_points(yearly: &[YearlyStat]) -> Vec<(f64, f64)> {
    yearly
        .iter()
        .enumerate()
        .map(|(i, s)| (i as f64, s.success_rate))
        .collect()
}

pub fn launch_bars(yearly: &[YearlyStat]) -> Vec<CategoryBars> {
    yearly
        .iter()
        .map(|s| CategoryBars {
            label: s.year.to_string(),
            values: vec![s.total_launches as f64],
        })
        .collect()
}

pub fn payload_bars(rockets: &[RocketStat]) -> Vec<CategoryBars> {
    rockets
        .iter()
        .map(|s| CategoryBars {
            label: s.rocket.clone(),
            values: vec![s.avg_payload, s.total_payload],
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipEntry {
    pub name: &'static str,
    pub value: String,
    pub color: Color,
}

/// Label and formatted values of the hovered category
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub label: String,
    pub entries: Vec<TooltipEntry>,
}

pub fn tooltip(panel: ChartPanel, stats: &StatsPayload, index: usize) -> Option<Tooltip> {
    match panel {
        ChartPanel::SuccessRate => stats.yearly_stats.get(index).map(|s| Tooltip {
            label: format!("Year: {}", s.year),
            entries: vec![TooltipEntry {
                name: "Success Rate",
                value: format!("{}%", format_number(s.success_rate)),
                color: SUCCESS_RATE.color,
            }],
        }),
        ChartPanel::Launches => stats.yearly_stats.get(index).map(|s| Tooltip {
            label: format!("Year: {}", s.year),
            entries: vec![TooltipEntry {
                name: "Launches",
                value: s.total_launches.to_string(),
                color: TOTAL_LAUNCHES.color,
            }],
        }),
        ChartPanel::Payload => stats.rocket_stats.get(index).map(|s| Tooltip {
            label: format!("Rocket: {}", s.rocket),
            entries: [(AVG_PAYLOAD, s.avg_payload), (TOTAL_PAYLOAD, s.total_payload)]
                .into_iter()
                .map(|(series, v)| TooltipEntry {
                    name: "Payload Mass",
                    value: format!("{} kg", format_number(v)),
                    color: series.color,
                })
                .collect(),
        }),
    }
}

fn tooltip_line(tooltip: Option<&Tooltip>) -> Line<'static> {
    let Some(tooltip) = tooltip else {
        return Line::from("");
    };
    let mut spans = vec![Span::styled(
        format!(" {} ", tooltip.label),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )];
    for entry in &tooltip.entries {
        spans.push(Span::styled(" ■ ", Style::default().fg(entry.color)));
        spans.push(Span::raw(format!("{}: {}", entry.name, entry.value)));
    }
    Line::from(spans)
}

fn legend_line(series: &[Series]) -> Line<'static> {
    let spans: Vec<Span<'static>> = series
        .iter()
        .flat_map(|s| {
            [
                Span::styled(" ■ ", Style::default().fg(s.color)),
                Span::raw(s.name),
            ]
        })
        .collect();
    Line::from(spans)
}

fn panel_block(panel: ChartPanel, focused: bool) -> Block<'static> {
    let border = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" {} ", panel.title()))
        .title_style(
            Style::default()
                .fg(if focused { Color::Cyan } else { Color::White })
                .add_modifier(Modifier::BOLD),
        )
}

/// Thin the year labels so the evenly-spaced axis labels stay exact
fn x_labels(labels: &[String]) -> Vec<Span<'static>> {
    match labels.len() {
        0 => vec![],
        1 => vec![Span::raw(""), Span::raw(labels[0].clone()), Span::raw("")],
        n if n <= 8 => labels.iter().cloned().map(Span::raw).collect(),
        n => vec![Span::raw(labels[0].clone()), Span::raw(labels[n - 1].clone())],
    }
}

fn draw_empty(frame: &mut Frame, area: Rect, block: Block<'static>) {
    frame.render_widget(
        Paragraph::new(Span::styled("No data", Style::default().fg(Color::DarkGray))).block(block),
        area,
    );
}

/// Line chart of success rate by year, y fixed to 0-100
pub fn draw_success_rate(
    frame: &mut Frame,
    area: Rect,
    stats: &StatsPayload,
    cursor: usize,
    focused: bool,
) {
    let panel = ChartPanel::SuccessRate;
    let block = panel_block(panel, focused);
    if stats.yearly_stats.is_empty() {
        draw_empty(frame, area, block);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);
    frame.render_widget(
        Paragraph::new(tooltip_line(tooltip(panel, stats, cursor).as_ref())),
        rows[0],
    );

    let points = success_rate_points(&stats.yearly_stats);
    let labels: Vec<String> = stats.yearly_stats.iter().map(|s| s.year.to_string()).collect();
    let (x_min, x_max) = if points.len() == 1 {
        (-1.0, 1.0)
    } else {
        (0.0, (points.len() - 1) as f64)
    };

    let horizontal: Vec<[(f64, f64); 2]> = [25.0, 50.0, 75.0, 100.0]
        .iter()
        .map(|y| [(x_min, *y), (x_max, *y)])
        .collect();
    let vertical: Vec<[(f64, f64); 2]> = points.iter().map(|(x, _)| [(*x, 0.0), (*x, 100.0)]).collect();
    let hovered: Vec<(f64, f64)> = points.get(cursor).copied().into_iter().collect();

    let grid_style = Style::default().fg(GRID);
    let mut datasets: Vec<Dataset> = horizontal
        .iter()
        .chain(vertical.iter())
        .map(|line| {
            Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Line)
                .style(grid_style)
                .data(line)
        })
        .collect();
    datasets.push(
        Dataset::default()
            .name(SUCCESS_RATE.name)
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(SUCCESS_RATE.color))
            .data(&points),
    );
    datasets.push(
        Dataset::default()
            .marker(Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Yellow))
            .data(&hovered),
    );

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("Year")
                .style(Style::default().fg(Color::Gray))
                .bounds([x_min, x_max])
                .labels(x_labels(&labels)),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, 100.0])
                .labels(["0", "25", "50", "75", "100"].map(Span::raw).to_vec()),
        )
        .legend_position(Some(LegendPosition::TopRight))
        .hidden_legend_constraints((Constraint::Ratio(1, 1), Constraint::Ratio(1, 1)));

    frame.render_widget(chart, rows[1]);
}

/// Bar value in whole units; bars cannot be negative
fn bar_height(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

/// Grouped bar chart with a y scale gutter, gridlines and legend
pub fn draw_bars(
    frame: &mut Frame,
    area: Rect,
    panel: ChartPanel,
    bars: &[CategoryBars],
    hover: Option<&Tooltip>,
    cursor: usize,
    focused: bool,
) {
    let block = panel_block(panel, focused);
    if bars.is_empty() {
        draw_empty(frame, area, block);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);
    frame.render_widget(Paragraph::new(tooltip_line(hover)), rows[0]);
    frame.render_widget(Paragraph::new(legend_line(panel.series())), rows[1]);

    let max = bars
        .iter()
        .flat_map(|b| b.values.iter().map(|v| bar_height(*v)))
        .max()
        .unwrap_or(0)
        .max(1);
    let scale_labels = [format_number(max as f64), format_number((max / 2) as f64), "0".to_string()];
    let gutter = scale_labels.iter().map(|l| l.len()).max().unwrap_or(1) as u16 + 1;

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(gutter), Constraint::Min(0)])
        .split(rows[2]);
    let plot_block = Block::default()
        .borders(Borders::LEFT)
        .border_style(Style::default().fg(Color::Gray));
    let plot = plot_block.inner(body[1]);
    frame.render_widget(plot_block, body[1]);

    // Last row of the plot holds the category labels
    let bar_rows = plot.height.saturating_sub(1);
    if bar_rows == 0 {
        return;
    }
    let mid = bar_rows / 2;

    let mut scale = vec![Line::from(""); plot.height as usize];
    scale[0] = Line::from(scale_labels[0].clone());
    scale[mid as usize] = Line::from(scale_labels[1].clone());
    scale[(bar_rows - 1) as usize] = Line::from(scale_labels[2].clone());
    frame.render_widget(
        Paragraph::new(scale)
            .style(Style::default().fg(Color::Gray))
            .alignment(ratatui::layout::Alignment::Right),
        Rect::new(body[0].x, body[0].y, gutter.saturating_sub(1), body[0].height),
    );

    for row in [0, mid] {
        frame.render_widget(
            Paragraph::new(symbols::line::HORIZONTAL.repeat(plot.width as usize))
                .style(Style::default().fg(GRID)),
            Rect::new(plot.x, plot.y + row, plot.width, 1),
        );
    }

    let series = panel.series();
    let per_group = series.len() as u16;
    let group_gap = 2u16;
    let groups = bars.len() as u16;
    let bar_width = (plot.width.saturating_sub(groups * group_gap) / (groups * per_group).max(1)).clamp(1, 12);

    let mut chart = BarChart::default()
        .bar_width(bar_width)
        .bar_gap(0)
        .group_gap(group_gap)
        .max(max);

    for (i, category) in bars.iter().enumerate() {
        let hovered = i == cursor;
        let group_bars: Vec<Bar> = category
            .values
            .iter()
            .zip(series.iter())
            .map(|(value, s)| {
                let mut style = Style::default().fg(s.color);
                if hovered {
                    style = style.add_modifier(Modifier::BOLD);
                }
                Bar::default()
                    .value(bar_height(*value))
                    .text_value(format_number(*value))
                    .style(style)
                    .value_style(Style::default().fg(Color::Black).bg(s.color))
            })
            .collect();

        let label_style = if hovered {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        chart = chart.data(
            BarGroup::default()
                .label(Line::styled(category.label.clone(), label_style))
                .bars(&group_bars),
        );
    }

    frame.render_widget(chart, plot);
}
