//! Inline SVG charts
//!
//! Charts carry no text. Axis labels, slice names and values are rendered
//! in HTML next to them so they follow the page font and theme.

use plotters::prelude::*;
use edviron_utils::escape_html;

const WIDTH: u32 = 480;
const HEIGHT: u32 = 260;

pub const PALETTE: [RGBColor; 8] = [
    RGBColor(79, 70, 229),
    RGBColor(16, 185, 129),
    RGBColor(245, 158, 11),
    RGBColor(239, 68, 68),
    RGBColor(14, 165, 233),
    RGBColor(168, 85, 247),
    RGBColor(236, 72, 153),
    RGBColor(100, 116, 139),
];

/// Canvas and grid colors for the current theme
struct Canvas {
    background: RGBColor,
    grid: RGBColor,
}

impl Canvas {
    fn new(dark: bool) -> Self {
        if dark {
            Self {
                background: RGBColor(31, 41, 55),
                grid: RGBColor(75, 85, 99),
            }
        } else {
            Self {
                background: WHITE,
                grid: RGBColor(229, 231, 235),
            }
        }
    }
}

pub fn color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

pub fn color_hex(index: usize) -> String {
    let RGBColor(r, g, b) = color(index);
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

fn upper_bound(values: &[f64]) -> f64 {
    values.iter().copied().fold(0.0, f64::max).max(1.0) * 1.1
}

/// Line through `values` at evenly spaced x positions
pub fn line_chart(values: &[f64], dark: bool) -> Result<String, String> {
    let canvas = Canvas::new(dark);
    let x_max = values.len().saturating_sub(1).max(1) as f64;
    let y_max = upper_bound(values);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&canvas.background).map_err(|e| e.to_string())?;

        let mut chart = ChartBuilder::on(&root)
            .margin(16)
            .build_cartesian_2d(0f64..x_max, 0f64..y_max)
            .map_err(|e| e.to_string())?;

        chart
            .draw_series((0..=4).map(|i| {
                let y = y_max * i as f64 / 4.0;
                PathElement::new(vec![(0.0, y), (x_max, y)], canvas.grid.stroke_width(1))
            }))
            .map_err(|e| e.to_string())?;

        let points: Vec<(f64, f64)> = values.iter().enumerate().map(|(i, v)| (i as f64, *v)).collect();
        chart
            .draw_series(LineSeries::new(points.clone(), color(0).stroke_width(2)))
            .map_err(|e| e.to_string())?;
        chart
            .draw_series(points.into_iter().map(|p| Circle::new(p, 3, color(0).filled())))
            .map_err(|e| e.to_string())?;

        root.present().map_err(|e| e.to_string())?;
    }
    Ok(svg)
}

/// One bar per value, colored by position
pub fn bar_chart(values: &[f64], dark: bool) -> Result<String, String> {
    let canvas = Canvas::new(dark);
    let x_max = values.len().max(1) as f64;
    let y_max = upper_bound(values);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&canvas.background).map_err(|e| e.to_string())?;

        let mut chart = ChartBuilder::on(&root)
            .margin(16)
            .build_cartesian_2d(0f64..x_max, 0f64..y_max)
            .map_err(|e| e.to_string())?;

        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(0.0, 0.0), (x_max, 0.0)],
                canvas.grid.stroke_width(1),
            )))
            .map_err(|e| e.to_string())?;

        chart
            .draw_series(values.iter().enumerate().map(|(i, v)| {
                let x = i as f64;
                Rectangle::new([(x + 0.15, 0.0), (x + 0.85, *v)], color(i).filled())
            }))
            .map_err(|e| e.to_string())?;

        root.present().map_err(|e| e.to_string())?;
    }
    Ok(svg)
}

/// Pie of `values`; an all-zero input draws an empty disc
pub fn pie_chart(values: &[f64], dark: bool) -> Result<String, String> {
    let canvas = Canvas::new(dark);
    let total: f64 = values.iter().filter(|v| **v > 0.0).sum();
    let center = ((WIDTH / 2) as i32, (HEIGHT / 2) as i32);
    let radius = (HEIGHT / 2) as f64 - 12.0;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&canvas.background).map_err(|e| e.to_string())?;

        if total <= 0.0 {
            root.draw(&Circle::new(center, radius as i32, canvas.grid.filled()))
                .map_err(|e| e.to_string())?;
        } else {
            let mut start = -std::f64::consts::FRAC_PI_2;
            for (i, value) in values.iter().enumerate() {
                if *value <= 0.0 {
                    continue;
                }
                let sweep = value / total * std::f64::consts::TAU;
                root.draw(&Polygon::new(slice_points(center, radius, start, sweep), color(i).filled()))
                    .map_err(|e| e.to_string())?;
                start += sweep;
            }
        }

        root.present().map_err(|e| e.to_string())?;
    }
    Ok(svg)
}

/// Center followed by points along the arc, about two degrees apart
fn slice_points(center: (i32, i32), radius: f64, start: f64, sweep: f64) -> Vec<(i32, i32)> {
    let steps = ((sweep.to_degrees() / 2.0).ceil() as usize).max(1);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for step in 0..=steps {
        let angle = start + sweep * step as f64 / steps as f64;
        points.push((
            center.0 + (radius * angle.cos()).round() as i32,
            center.1 + (radius * angle.sin()).round() as i32,
        ));
    }
    points
}

/// Swatch list matching the chart colors
pub fn legend(entries: &[(String, String)]) -> String {
    let items: String = entries
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            format!(
                "<li class='flex items-center gap-2'><span class='inline-block w-3 h-3 rounded-sm' style='background:{}'></span>\
                 <span class='flex-1'>{}</span><span class='font-medium'>{}</span></li>",
                color_hex(i),
                escape_html(label),
                escape_html(value)
            )
        })
        .collect();
    format!("<ul class='mt-3 space-y-1 text-sm'>{}</ul>", items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charts_render_svg() {
        for svg in [
            line_chart(&[1.0, 4.0, 2.0], false).unwrap(),
            bar_chart(&[3.0, 5.0], true).unwrap(),
            pie_chart(&[2.0, 1.0, 0.0], false).unwrap(),
            pie_chart(&[], false).unwrap(),
        ] {
            assert!(svg.contains("<svg"));
        }
    }

    #[test]
    fn test_line_chart_single_point() {
        assert!(line_chart(&[7.0], false).unwrap().contains("<svg"));
    }

    #[test]
    fn test_slice_points_cover_sweep() {
        let points = slice_points((100, 100), 50.0, 0.0, std::f64::consts::PI);
        assert_eq!(points[0], (100, 100));
        assert_eq!(points[1], (150, 100));
        assert_eq!(*points.last().unwrap(), (50, 100));
    }

    #[test]
    fn test_legend_colors_follow_palette() {
        let html = legend(&[("success".to_string(), "3".to_string()), ("pending".to_string(), "1".to_string())]);
        assert!(html.contains(&color_hex(0)));
        assert!(html.contains(&color_hex(1)));
        assert!(html.contains("success"));
        assert_eq!(color_hex(0), "#4f46e5");
    }
}
