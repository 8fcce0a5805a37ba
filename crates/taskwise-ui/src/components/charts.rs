use std::f64::consts::PI;

use yew::{Html, Properties, function_component, html};

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSlice {
    pub label: String,
    pub value: usize,
    pub color: String,
}

#[derive(Properties, PartialEq)]
pub struct PieChartProps {
    pub slices: Vec<ChartSlice>,
}

fn arc_point(center: f64, radius: f64, angle: f64) -> (f64, f64) {
    (
        center + radius * angle.cos(),
        center + radius * angle.sin(),
    )
}

/// Inline-SVG pie chart. Slice angles are plain fractions of the total; an
/// all-zero dataset renders as an empty ring.
#[function_component(PieChart)]
pub fn pie_chart(props: &PieChartProps) -> Html {
    const SIZE: f64 = 200.0;
    const CENTER: f64 = SIZE / 2.0;
    const RADIUS: f64 = 90.0;

    let total: usize = props.slices.iter().map(|slice| slice.value).sum();

    let mut paths = Vec::new();
    if total > 0 {
        let mut angle = -PI / 2.0;
        for slice in &props.slices {
            if slice.value == 0 {
                continue;
            }
            let sweep = (slice.value as f64 / total as f64) * 2.0 * PI;
            let end = angle + sweep;
            let (x1, y1) = arc_point(CENTER, RADIUS, angle);
            let (x2, y2) = arc_point(CENTER, RADIUS, end);
            let large_arc = if sweep > PI { 1 } else { 0 };

            // A single-slice pie is a full circle; an arc with identical
            // endpoints collapses to nothing.
            let d = if slice.value == total {
                format!(
                    "M {cx} {top} A {r} {r} 0 1 1 {cx} {bottom} A {r} {r} 0 1 1 {cx} {top} Z",
                    cx = CENTER,
                    top = CENTER - RADIUS,
                    bottom = CENTER + RADIUS,
                    r = RADIUS,
                )
            } else {
                format!(
                    "M {CENTER} {CENTER} L {x1} {y1} A {RADIUS} {RADIUS} 0 {large_arc} 1 {x2} {y2} Z"
                )
            };

            paths.push(html! {
                <path d={d} fill={slice.color.clone()}>
                    <title>{ format!("{}: {}", slice.label, slice.value) }</title>
                </path>
            });
            angle = end;
        }
    }

    html! {
        <div class="chart pie-chart">
            <svg viewBox={format!("0 0 {SIZE} {SIZE}")} width="200" height="200">
                if total == 0 {
                    <circle
                        cx={CENTER.to_string()}
                        cy={CENTER.to_string()}
                        r={RADIUS.to_string()}
                        style="fill: none; stroke: #e2e8f0; stroke-width: 2;"
                    />
                }
                { for paths }
            </svg>
            <ul class="chart-legend">
                {
                    for props.slices.iter().map(|slice| html! {
                        <li>
                            <span
                                class="legend-swatch"
                                style={format!("background-color: {};", slice.color)}
                            />
                            { format!("{} ({})", slice.label, slice.value) }
                        </li>
                    })
                }
            </ul>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct BarChartProps {
    pub bars: Vec<(String, usize)>,
    #[prop_or("#667eea".to_string())]
    pub color: String,
}

#[function_component(BarChart)]
pub fn bar_chart(props: &BarChartProps) -> Html {
    let max = props
        .bars
        .iter()
        .map(|(_, value)| *value)
        .max()
        .unwrap_or(0)
        .max(1);

    html! {
        <div class="chart bar-chart">
            {
                for props.bars.iter().map(|(label, value)| {
                    let percent = (*value as f64 / max as f64) * 100.0;
                    html! {
                        <div class="bar-row">
                            <span class="bar-label">{ label }</span>
                            <div class="bar-track">
                                <div
                                    class="bar-fill"
                                    style={format!(
                                        "width: {percent:.0}%; background-color: {};",
                                        props.color
                                    )}
                                />
                            </div>
                            <span class="bar-value">{ *value }</span>
                        </div>
                    }
                })
            }
            if props.bars.is_empty() {
                <div class="chart-empty">{ "No data yet" }</div>
            }
        </div>
    }
}
