use crate::core::charts;
use crate::core::iris::{REFERENCE_CSV, REFERENCE_DATASET_NAME};
use crate::core::stats::{mean, Summary};
use crate::core::Lab;
use crate::domain::model::{Dataset, Measurement, RawSample};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// A loaded dataset plus what was cleaned out of it on the way in.
pub struct LoadReport {
    pub dataset: Dataset,
    pub missing_counts: BTreeMap<&'static str, usize>,
    pub dropped_rows: usize,
}

impl LoadReport {
    pub fn has_missing(&self) -> bool {
        self.dropped_rows > 0
    }
}

/// Parse CSV rows, counting missing values per column and dropping
/// incomplete rows.
pub fn load_dataset_from_reader<R: std::io::Read>(name: &str, reader: R) -> Result<LoadReport> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut samples = Vec::new();
    let mut missing_counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut dropped_rows = 0usize;

    for row in csv_reader.deserialize::<RawSample>() {
        let raw = row?;
        let missing = raw.missing_fields();
        if missing.is_empty() {
            if let Some(sample) = raw.into_sample() {
                samples.push(sample);
            }
        } else {
            for field in missing {
                *missing_counts.entry(field).or_insert(0) += 1;
            }
            dropped_rows += 1;
        }
    }

    Ok(LoadReport {
        dataset: Dataset::new(name.to_string(), samples),
        missing_counts,
        dropped_rows,
    })
}

/// Load from a CSV file, falling back to the built-in reference dataset when
/// the file does not exist. Other read failures propagate.
pub fn load_dataset(path: &str) -> Result<LoadReport> {
    match std::fs::File::open(path) {
        Ok(file) => {
            tracing::info!("✅ Loaded dataset from CSV file: {}", path);
            load_dataset_from_reader(path, file)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("⚠️ CSV not found. Loading built-in reference dataset instead.");
            load_dataset_from_reader(REFERENCE_DATASET_NAME, REFERENCE_CSV.as_bytes())
        }
        Err(e) => Err(e.into()),
    }
}

/// Per-column descriptive statistics, keyed by column label.
pub fn describe(dataset: &Dataset) -> BTreeMap<String, Summary> {
    let mut table = BTreeMap::new();
    for column in Measurement::all() {
        if let Some(summary) = Summary::compute(&dataset.column(column)) {
            table.insert(column.label().to_string(), summary);
        }
    }
    table
}

/// Mean of each numeric column grouped by species.
pub fn species_means(dataset: &Dataset) -> BTreeMap<String, BTreeMap<String, f64>> {
    let mut grouped = BTreeMap::new();
    for species in dataset.species_names() {
        let samples = dataset.filter_species(&species);
        let mut columns = BTreeMap::new();
        for column in Measurement::all() {
            let values: Vec<f64> = samples.iter().map(|s| s.measurement(column)).collect();
            if let Some(m) = mean(&values) {
                columns.insert(column.label().to_string(), m);
            }
        }
        grouped.insert(species, columns);
    }
    grouped
}

#[derive(Debug, Serialize)]
pub struct AnalysisSummary {
    pub dataset: String,
    pub rows: usize,
    pub dropped_rows: usize,
    pub columns: BTreeMap<String, Summary>,
    pub species_means: BTreeMap<String, BTreeMap<String, f64>>,
}

pub struct AnalyzeLab {
    csv_path: String,
    output_dir: String,
    charts_enabled: bool,
}

impl AnalyzeLab {
    pub fn new(csv_path: String, output_dir: String, charts_enabled: bool) -> Self {
        Self {
            csv_path,
            output_dir,
            charts_enabled,
        }
    }

    fn print_head(dataset: &Dataset) {
        println!("\n🔹 First 5 rows of dataset:");
        println!(
            "{:>14} {:>13} {:>14} {:>13}  species",
            "sepal_length", "sepal_width", "petal_length", "petal_width"
        );
        for sample in dataset.samples.iter().take(5) {
            println!(
                "{:>14.1} {:>13.1} {:>14.1} {:>13.1}  {}",
                sample.sepal_length,
                sample.sepal_width,
                sample.petal_length,
                sample.petal_width,
                sample.species
            );
        }
    }

    fn print_describe(table: &BTreeMap<String, Summary>) {
        println!("\n🔹 Descriptive Statistics:");
        println!(
            "{:>14} {:>6} {:>7} {:>7} {:>6} {:>6} {:>6} {:>6} {:>6}",
            "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
        );
        for (label, s) in table {
            println!(
                "{:>14} {:>6} {:>7.2} {:>7.2} {:>6.2} {:>6.2} {:>6.2} {:>6.2} {:>6.2}",
                label, s.count, s.mean, s.std_dev, s.min, s.q25, s.median, s.q75, s.max
            );
        }
    }

    fn print_grouped(grouped: &BTreeMap<String, BTreeMap<String, f64>>) {
        println!("\n🔹 Mean values grouped by species:");
        for (species, columns) in grouped {
            let cells: Vec<String> = columns
                .iter()
                .map(|(label, value)| format!("{}={:.2}", label, value))
                .collect();
            println!("{:>12}: {}", species, cells.join("  "));
        }
    }
}

#[async_trait]
impl Lab for AnalyzeLab {
    fn name(&self) -> &'static str {
        "analyze"
    }

    async fn run(&self) -> Result<String> {
        let report = load_dataset(&self.csv_path)?;
        let dataset = &report.dataset;

        if dataset.is_empty() {
            return Err(crate::utils::error::LabError::ProcessingError {
                message: format!("{} contains no complete rows", dataset.name),
            });
        }

        Self::print_head(dataset);

        println!("\n🔹 Dataset Info:");
        println!("{} rows x 5 columns ({})", dataset.len(), dataset.name);

        println!("\n🔹 Missing Values:");
        if report.has_missing() {
            for (field, count) in &report.missing_counts {
                println!("{:>14}: {}", field, count);
            }
            tracing::warn!(
                "⚠️ Missing values found; {} incomplete rows removed.",
                report.dropped_rows
            );
        } else {
            println!("✅ No missing values.");
        }

        let columns = describe(dataset);
        Self::print_describe(&columns);

        let grouped = species_means(dataset);
        Self::print_grouped(&grouped);

        println!(
            "\nObservation: virginica generally has larger petal length/width \
             compared to the other species."
        );

        let out_dir = Path::new(&self.output_dir);
        std::fs::create_dir_all(out_dir)?;

        let summary = AnalysisSummary {
            dataset: dataset.name.clone(),
            rows: dataset.len(),
            dropped_rows: report.dropped_rows,
            columns,
            species_means: grouped,
        };
        let summary_path = out_dir.join("summary.json");
        std::fs::write(&summary_path, serde_json::to_string_pretty(&summary)?)?;
        tracing::info!("📁 Summary written to {}", summary_path.display());

        if self.charts_enabled {
            let files = charts::render_all(dataset, out_dir)?;
            tracing::info!("📊 {} charts written to {}", files.len(), self.output_dir);
        }

        Ok(format!(
            "Analyzed {} samples from {} (output in {})",
            dataset.len(),
            dataset.name,
            self.output_dir
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_CSV: &str = "\
sepal_length,sepal_width,petal_length,petal_width,species
5.0,3.0,1.0,0.2,setosa
6.0,3.0,4.0,1.2,versicolor
7.0,3.0,6.0,2.2,virginica
";

    const CSV_WITH_GAPS: &str = "\
sepal_length,sepal_width,petal_length,petal_width,species
5.0,3.0,1.0,0.2,setosa
,3.0,4.0,1.2,versicolor
6.0,3.0,,1.4,versicolor
7.0,3.0,6.0,2.2,virginica
";

    #[test]
    fn test_load_counts_and_drops_missing_rows() {
        let report = load_dataset_from_reader("gaps", CSV_WITH_GAPS.as_bytes()).unwrap();

        assert_eq!(report.dataset.len(), 2);
        assert_eq!(report.dropped_rows, 2);
        assert_eq!(report.missing_counts["sepal_length"], 1);
        assert_eq!(report.missing_counts["petal_length"], 1);
    }

    #[test]
    fn test_load_complete_csv_has_no_missing() {
        let report = load_dataset_from_reader("small", SMALL_CSV.as_bytes()).unwrap();
        assert_eq!(report.dataset.len(), 3);
        assert!(!report.has_missing());
    }

    #[test]
    fn test_reference_dataset_loads_cleanly() {
        let report =
            load_dataset_from_reader(REFERENCE_DATASET_NAME, REFERENCE_CSV.as_bytes()).unwrap();
        assert_eq!(report.dataset.len(), 150);
        assert!(!report.has_missing());
        assert_eq!(report.dataset.species_names().len(), 3);
    }

    #[test]
    fn test_missing_file_falls_back_to_reference_data() {
        let report = load_dataset("no_such_file_anywhere.csv").unwrap();
        assert_eq!(report.dataset.name, REFERENCE_DATASET_NAME);
        assert_eq!(report.dataset.len(), 150);
    }

    #[test]
    fn test_describe_covers_all_numeric_columns() {
        let report = load_dataset_from_reader("small", SMALL_CSV.as_bytes()).unwrap();
        let table = describe(&report.dataset);

        assert_eq!(table.len(), 4);
        let sepal = &table["sepal_length"];
        assert_eq!(sepal.count, 3);
        assert!((sepal.mean - 6.0).abs() < 1e-9);
        assert!((sepal.min - 5.0).abs() < 1e-9);
        assert!((sepal.max - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_species_means_are_per_group() {
        let report = load_dataset_from_reader("small", SMALL_CSV.as_bytes()).unwrap();
        let grouped = species_means(&report.dataset);

        assert_eq!(grouped.len(), 3);
        assert!((grouped["setosa"]["petal_length"] - 1.0).abs() < 1e-9);
        assert!((grouped["virginica"]["petal_length"] - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_virginica_petals_are_largest_in_reference_data() {
        let report =
            load_dataset_from_reader(REFERENCE_DATASET_NAME, REFERENCE_CSV.as_bytes()).unwrap();
        let grouped = species_means(&report.dataset);

        let virginica = grouped["virginica"]["petal_length"];
        let versicolor = grouped["versicolor"]["petal_length"];
        let setosa = grouped["setosa"]["petal_length"];
        assert!(virginica > versicolor);
        assert!(versicolor > setosa);
    }

    #[tokio::test]
    async fn test_lab_rejects_dataset_with_no_complete_rows() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("empty.csv");
        std::fs::write(
            &csv_path,
            "sepal_length,sepal_width,petal_length,petal_width,species\n,,,,\n",
        )
        .unwrap();

        let lab = AnalyzeLab::new(
            csv_path.to_string_lossy().to_string(),
            dir.path().join("out").to_string_lossy().to_string(),
            false,
        );
        let err = lab.run().await.unwrap_err();
        assert!(matches!(
            err,
            crate::utils::error::LabError::ProcessingError { .. }
        ));
    }

    #[tokio::test]
    async fn test_lab_writes_summary_json() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("out");

        let lab = AnalyzeLab::new(
            "no_such_file_anywhere.csv".to_string(),
            out_dir.to_string_lossy().to_string(),
            false,
        );
        lab.run().await.unwrap();

        let raw = std::fs::read_to_string(out_dir.join("summary.json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["rows"], 150);
        assert!(parsed["columns"]["sepal_length"]["mean"].is_number());
        assert!(parsed["species_means"]["setosa"].is_object());
    }
}
