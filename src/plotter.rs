use crate::error::AppError;
use crate::processing::{marker_radius_px, Marker, PlotData};
use hypertext::{html_elements, maud, GlobalAttributes, PreEscaped};
use image::codecs::png::PngEncoder;
use image::ImageEncoder;
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::Serialize;
use std::fmt::Display;
use std::path::Path;

/// File formats the plot can be written as, chosen by output extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
    Html,
}

impl OutputFormat {
    /// Picks the format from the extension of `path` (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_lowercase();

        match extension.as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            "html" | "htm" => Ok(OutputFormat::Html),
            _ => Err(AppError::UnsupportedFormat(
                path.to_string_lossy().to_string(),
            )),
        }
    }

    /// Whether the format needs a registered font to draw the title and labels.
    pub fn needs_font(self) -> bool {
        !matches!(self, OutputFormat::Html)
    }
}

/// Renders the plot into the bytes of a file of the given format.
///
/// `draw_text` controls whether the title, axis labels and tick labels are
/// drawn on PNG and SVG output; it requires a registered font.
pub fn render(plot_data: &PlotData, format: OutputFormat, draw_text: bool) -> Result<Vec<u8>, AppError> {
    match format {
        OutputFormat::Png => render_png(plot_data, draw_text),
        OutputFormat::Svg => render_svg(plot_data, draw_text).map(String::into_bytes),
        OutputFormat::Html => generate_html_plot(plot_data).map(String::into_bytes),
    }
}

fn render_err<E: Display>(e: E) -> AppError {
    AppError::Render(e.to_string())
}

/// Renders the plot into an RGB buffer and encodes it as PNG.
pub fn render_png(plot_data: &PlotData, draw_text: bool) -> Result<Vec<u8>, AppError> {
    let (width, height) = (plot_data.width, plot_data.height);
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(3))
        .ok_or_else(|| AppError::Render(format!("figure of {}x{} pixels is too large", width, height)))?;
    let mut buf = vec![0u8; len];

    {
        let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
        draw_scatter(&root, plot_data, draw_text)?;
    }

    encode_rgb_to_png(&buf, width, height)
}

/// Renders the plot as an SVG document.
pub fn render_svg(plot_data: &PlotData, draw_text: bool) -> Result<String, AppError> {
    let mut svg = String::new();

    {
        let root = SVGBackend::with_string(&mut svg, (plot_data.width, plot_data.height))
            .into_drawing_area();
        draw_scatter(&root, plot_data, draw_text)?;
    }

    Ok(svg)
}

/// Draws axes and markers onto any plotters backend.
fn draw_scatter<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    plot_data: &PlotData,
    draw_text: bool,
) -> Result<(), AppError> {
    root.fill(&WHITE).map_err(render_err)?;

    let (x_min, x_max) = plot_data.x_range;
    let (y_min, y_max) = plot_data.y_range;

    let mut builder = ChartBuilder::on(root);
    builder.margin(10);
    if draw_text {
        builder
            .caption(&plot_data.title, ("sans-serif", 20))
            .x_label_area_size(40)
            .y_label_area_size(50);
    }
    let mut chart = builder
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(render_err)?;

    {
        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh();
        if draw_text {
            mesh.x_desc(plot_data.x_label.as_str())
                .y_desc(plot_data.y_label.as_str());
        } else {
            mesh.x_labels(0).y_labels(0);
        }
        mesh.draw().map_err(render_err)?;
    }

    let style_of = |value: i64| {
        let (r, g, b) = plot_data.color_of(value);
        RGBColor(r, g, b).mix(plot_data.alpha).filled()
    };
    let radius_of = |size: i64| marker_radius_px(size).round() as i32;
    // Markers that round to nothing are not drawn.
    let points = plot_data
        .points
        .points()
        .filter(|&(_, _, _, s)| radius_of(s) > 0);

    match plot_data.marker {
        Marker::Circle => chart.draw_series(
            points.map(|(x, y, c, s)| Circle::new((x, y), radius_of(s), style_of(c))),
        ),
        Marker::Square => chart.draw_series(points.map(|(x, y, c, s)| {
            let r = radius_of(s);
            EmptyElement::at((x, y)) + Rectangle::new([(-r, -r), (r, r)], style_of(c))
        })),
        Marker::Triangle => chart.draw_series(
            points.map(|(x, y, c, s)| TriangleMarker::new((x, y), radius_of(s), style_of(c))),
        ),
        Marker::Cross => chart.draw_series(
            points.map(|(x, y, c, s)| Cross::new((x, y), radius_of(s), style_of(c))),
        ),
    }
    .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

/// Encode a raw RGB pixel buffer to PNG.
fn encode_rgb_to_png(rgb: &[u8], width: u32, height: u32) -> Result<Vec<u8>, AppError> {
    let mut png = Vec::new();
    let encoder = PngEncoder::new(&mut png);
    encoder.write_image(rgb, width, height, image::ExtendedColorType::Rgb8)?;
    Ok(png)
}

/// Serializes `value` as JSON that is safe to splice into a `<script>` element.
fn js_json<T: Serialize + ?Sized>(value: &T) -> Result<String, AppError> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// One embedded point: `[x, y, color, size, marker diameter in px]`.
#[derive(Serialize)]
struct ChartPoint(f64, f64, i64, i64, f64);

/// ECharts symbol for each marker shape.
fn echarts_symbol(marker: Marker) -> &'static str {
    match marker {
        Marker::Circle => "circle",
        Marker::Square => "rect",
        Marker::Triangle => "triangle",
        Marker::Cross => "path://M3,0H5V3H8V5H5V8H3V5H0V3H3Z",
    }
}

/// Generates a self-contained HTML file with an interactive ECharts scatter plot.
pub fn generate_html_plot(plot_data: &PlotData) -> Result<String, AppError> {
    let script = build_chart_script(plot_data)?;

    let markup = maud! {
        html {
            head {
                meta charset="utf-8";
                title { (plot_data.title.as_str()) }
                script src="https://cdn.jsdelivr.net/npm/echarts/dist/echarts.min.js" {}
            }
            body {
                div #main style="width: 100%; height: 95vh;" {}
                script {
                    // PreEscaped() injects the JavaScript without HTML escaping
                    (PreEscaped(script))
                }
            }
        }
    };

    Ok(format!("<!DOCTYPE html>\n{}", markup.render().as_str()))
}

/// Builds the chart initialisation script with the points embedded as JSON.
fn build_chart_script(plot_data: &PlotData) -> Result<String, AppError> {
    let rows: Vec<ChartPoint> = plot_data
        .points
        .points()
        .map(|(x, y, c, s)| ChartPoint(x, y, c, s, 2.0 * marker_radius_px(s)))
        .collect();

    let data_json = js_json(&rows)?;
    let title = js_json(&plot_data.title)?;
    let x_label = js_json(&plot_data.x_label)?;
    let y_label = js_json(&plot_data.y_label)?;
    let stops = js_json(&plot_data.colormap.stops_hex())?;
    let (x_min, x_max) = plot_data.x_range;
    let (y_min, y_max) = plot_data.y_range;

    Ok(format!(
        r#"
        var myChart = echarts.init(document.getElementById('main'));
        var points = {data};
        myChart.setOption({{
            title: {{ text: {title}, left: 'center' }},
            tooltip: {{
                trigger: 'item',
                formatter: function (p) {{
                    return 'x: ' + p.value[0].toFixed(3) + '<br/>y: ' + p.value[1].toFixed(3)
                        + '<br/>color: ' + p.value[2] + '<br/>size: ' + p.value[3];
                }}
            }},
            grid: {{ left: '5%', right: '12%', bottom: '10%', containLabel: true }},
            toolbox: {{
                feature: {{
                    dataZoom: {{}},
                    restore: {{}},
                    saveAsImage: {{}}
                }}
            }},
            xAxis: {{ type: 'value', name: {x_label}, nameLocation: 'middle', nameGap: 30, min: {x_min}, max: {x_max}, splitLine: {{ show: false }} }},
            yAxis: {{ type: 'value', name: {y_label}, nameLocation: 'middle', nameGap: 40, min: {y_min}, max: {y_max}, splitLine: {{ show: false }} }},
            visualMap: {{
                type: 'continuous',
                dimension: 2,
                min: {vmin},
                max: {vmax},
                calculable: true,
                right: 10,
                top: 'center',
                inRange: {{ color: {stops} }}
            }},
            dataZoom: [
                {{ type: 'inside', xAxisIndex: 0 }},
                {{ type: 'inside', yAxisIndex: 0 }}
            ],
            animation: false,
            series: [{{
                type: 'scatter',
                symbol: '{symbol}',
                symbolSize: function (v) {{ return v[4]; }},
                itemStyle: {{ opacity: {alpha} }},
                data: points
            }}]
        }});
        "#,
        data = data_json,
        title = title,
        x_label = x_label,
        y_label = y_label,
        x_min = x_min,
        x_max = x_max,
        y_min = y_min,
        y_max = y_max,
        vmin = plot_data.color_norm.vmin,
        vmax = plot_data.color_norm.vmax,
        stops = stops,
        symbol = echarts_symbol(plot_data.marker),
        alpha = plot_data.alpha,
    ))
}
