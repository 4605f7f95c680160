use serde::{Deserialize, Serialize};

/// The four numeric columns of the flower dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measurement {
    SepalLength,
    SepalWidth,
    PetalLength,
    PetalWidth,
}

impl Measurement {
    pub fn all() -> [Measurement; 4] {
        [
            Measurement::SepalLength,
            Measurement::SepalWidth,
            Measurement::PetalLength,
            Measurement::PetalWidth,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Measurement::SepalLength => "sepal_length",
            Measurement::SepalWidth => "sepal_width",
            Measurement::PetalLength => "petal_length",
            Measurement::PetalWidth => "petal_width",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Measurement::SepalLength => "Sepal Length (cm)",
            Measurement::SepalWidth => "Sepal Width (cm)",
            Measurement::PetalLength => "Petal Length (cm)",
            Measurement::PetalWidth => "Petal Width (cm)",
        }
    }
}

/// One row as it arrives from CSV. Measurements are optional so missing
/// values can be counted before rows are dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSample {
    pub sepal_length: Option<f64>,
    pub sepal_width: Option<f64>,
    pub petal_length: Option<f64>,
    pub petal_width: Option<f64>,
    pub species: Option<String>,
}

impl RawSample {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.sepal_length.is_none() {
            missing.push("sepal_length");
        }
        if self.sepal_width.is_none() {
            missing.push("sepal_width");
        }
        if self.petal_length.is_none() {
            missing.push("petal_length");
        }
        if self.petal_width.is_none() {
            missing.push("petal_width");
        }
        if self.species.as_deref().map_or(true, |s| s.is_empty()) {
            missing.push("species");
        }
        missing
    }

    pub fn into_sample(self) -> Option<Sample> {
        Some(Sample {
            sepal_length: self.sepal_length?,
            sepal_width: self.sepal_width?,
            petal_length: self.petal_length?,
            petal_width: self.petal_width?,
            species: self.species.filter(|s| !s.is_empty())?,
        })
    }
}

/// One complete row of the dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sample {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
    pub species: String,
}

impl Sample {
    pub fn measurement(&self, column: Measurement) -> f64 {
        match column {
            Measurement::SepalLength => self.sepal_length,
            Measurement::SepalWidth => self.sepal_width,
            Measurement::PetalLength => self.petal_length,
            Measurement::PetalWidth => self.petal_width,
        }
    }
}

/// A loaded tabular dataset: rows of samples, numeric columns plus a
/// categorical species label.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub name: String,
    pub samples: Vec<Sample>,
}

impl Dataset {
    pub fn new(name: String, samples: Vec<Sample>) -> Self {
        Self { name, samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn column(&self, column: Measurement) -> Vec<f64> {
        self.samples.iter().map(|s| s.measurement(column)).collect()
    }

    /// Distinct species labels in first-seen order.
    pub fn species_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for sample in &self.samples {
            if !names.contains(&sample.species) {
                names.push(sample.species.clone());
            }
        }
        names
    }

    pub fn filter_species(&self, species: &str) -> Vec<&Sample> {
        self.samples
            .iter()
            .filter(|s| s.species == species)
            .collect()
    }
}
