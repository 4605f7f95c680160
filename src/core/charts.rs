use crate::core::stats::mean;
use crate::domain::model::{Dataset, Measurement};
use crate::utils::error::{LabError, Result};
use plotters::prelude::*;
use std::path::{Path, PathBuf};

const CHART_SIZE: (u32, u32) = (800, 500);
const HISTOGRAM_BINS: usize = 20;

fn chart_err<E: std::fmt::Display>(e: E) -> LabError {
    LabError::ChartError {
        message: e.to_string(),
    }
}

/// Renders the four exploration charts into `out_dir` and returns the file
/// names written.
pub fn render_all(dataset: &Dataset, out_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)?;

    let files = vec![
        line_chart(dataset, &out_dir.join("sepal_length_line.svg"))?,
        bar_chart(dataset, &out_dir.join("petal_length_by_species.svg"))?,
        histogram(dataset, &out_dir.join("sepal_width_histogram.svg"))?,
        scatter(dataset, &out_dir.join("sepal_vs_petal_scatter.svg"))?,
    ];

    Ok(files)
}

/// Sepal length across sample index.
fn line_chart(dataset: &Dataset, path: &Path) -> Result<PathBuf> {
    let values = dataset.column(Measurement::SepalLength);
    let (y_min, y_max) = value_bounds(&values);

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Sepal Length Across Samples", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..values.len() as f64, y_min..y_max)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc("Sample Index")
        .y_desc(Measurement::SepalLength.display_name())
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(LineSeries::new(
            values.iter().enumerate().map(|(i, v)| (i as f64, *v)),
            &BLUE,
        ))
        .map_err(chart_err)?
        .label("Sepal Length")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], BLUE));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(path.to_path_buf())
}

/// Average petal length per species.
fn bar_chart(dataset: &Dataset, path: &Path) -> Result<PathBuf> {
    let species = dataset.species_names();
    let averages: Vec<f64> = species
        .iter()
        .map(|name| {
            let values: Vec<f64> = dataset
                .filter_species(name)
                .iter()
                .map(|s| s.petal_length)
                .collect();
            mean(&values).unwrap_or(0.0)
        })
        .collect();

    let y_max = averages.iter().cloned().fold(0.0, f64::max) * 1.2;

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Average Petal Length by Species", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d((0usize..species.len()).into_segmented(), 0f64..y_max)
        .map_err(chart_err)?;

    let labels = species.clone();
    chart
        .configure_mesh()
        .x_desc("Species")
        .y_desc("Average Petal Length (cm)")
        .x_label_formatter(&move |value| match value {
            SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BLUE.mix(0.6).filled())
                .data(averages.iter().enumerate().map(|(i, v)| (i, *v))),
        )
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(path.to_path_buf())
}

/// Distribution of sepal width.
fn histogram(dataset: &Dataset, path: &Path) -> Result<PathBuf> {
    let values = dataset.column(Measurement::SepalWidth);
    let (min, max) = value_bounds(&values);
    let span = (max - min).max(f64::EPSILON);
    let bin_width = span / HISTOGRAM_BINS as f64;

    let mut counts = vec![0usize; HISTOGRAM_BINS];
    for value in &values {
        let bin = (((value - min) / bin_width) as usize).min(HISTOGRAM_BINS - 1);
        counts[bin] += 1;
    }
    let max_count = counts.iter().copied().max().unwrap_or(0) as f64;

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Histogram of Sepal Width", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(min..max, 0f64..max_count * 1.1)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc(Measurement::SepalWidth.display_name())
        .y_desc("Frequency")
        .draw()
        .map_err(chart_err)?;

    let fill = RGBColor(135, 206, 235);
    chart
        .draw_series(counts.iter().enumerate().map(|(i, count)| {
            let x0 = min + i as f64 * bin_width;
            let x1 = x0 + bin_width;
            Rectangle::new([(x0, 0.0), (x1, *count as f64)], fill.filled())
        }))
        .map_err(chart_err)?;

    // Bin outlines over the fills.
    chart
        .draw_series(counts.iter().enumerate().map(|(i, count)| {
            let x0 = min + i as f64 * bin_width;
            let x1 = x0 + bin_width;
            Rectangle::new([(x0, 0.0), (x1, *count as f64)], BLACK.stroke_width(1))
        }))
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(path.to_path_buf())
}

/// Sepal length vs petal length, one color per species.
fn scatter(dataset: &Dataset, path: &Path) -> Result<PathBuf> {
    let palette: [&RGBColor; 3] = [&RED, &GREEN, &BLUE];

    let xs = dataset.column(Measurement::SepalLength);
    let ys = dataset.column(Measurement::PetalLength);
    let (x_min, x_max) = value_bounds(&xs);
    let (y_min, y_max) = value_bounds(&ys);

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Sepal Length vs Petal Length", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc(Measurement::SepalLength.display_name())
        .y_desc(Measurement::PetalLength.display_name())
        .draw()
        .map_err(chart_err)?;

    for (i, species) in dataset.species_names().iter().enumerate() {
        let color = *palette[i % palette.len()];
        let points: Vec<(f64, f64)> = dataset
            .filter_species(species)
            .iter()
            .map(|s| (s.sepal_length, s.petal_length))
            .collect();

        chart
            .draw_series(
                points
                    .iter()
                    .map(|(x, y)| Circle::new((*x, *y), 3, color.filled())),
            )
            .map_err(chart_err)?
            .label(species.clone())
            .legend(move |(x, y)| Circle::new((x + 9, y), 4, color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(path.to_path_buf())
}

/// Axis bounds with a little padding so points never sit on the frame.
fn value_bounds(values: &[f64]) -> (f64, f64) {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let pad = ((max - min) * 0.05).max(0.1);
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analysis::load_dataset_from_reader;
    use crate::core::iris::REFERENCE_CSV;

    #[test]
    fn test_render_all_writes_four_svgs() {
        let report = load_dataset_from_reader("test", REFERENCE_CSV.as_bytes()).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let files = render_all(&report.dataset, dir.path()).unwrap();
        assert_eq!(files.len(), 4);

        for file in files {
            let content = std::fs::read_to_string(&file).unwrap();
            assert!(content.contains("<svg"), "{:?} is not an SVG", file);
        }
    }

    #[test]
    fn test_value_bounds_pad_the_range() {
        let (min, max) = value_bounds(&[1.0, 2.0, 3.0]);
        assert!(min < 1.0);
        assert!(max > 3.0);
    }

    #[test]
    fn test_value_bounds_of_empty_column() {
        assert_eq!(value_bounds(&[]), (0.0, 1.0));
    }
}
