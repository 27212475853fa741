use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Hotend and heated bed readings in °C.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Temperature {
    pub nozzle: Number,
    pub nozzle_target: Number,
    pub bed: Number,
    pub bed_target: Number,
}

/// Part cooling fan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fan {
    /// Percentage, 0-100.
    pub cooling_speed: Number,
}

/// Body of `GET /api/printer/status`.
///
/// Parsing is strict: every field is required and unknown keys are rejected,
/// so a firmware change shows up as an error instead of leaking new fields
/// into the page. Readings are kept as the JSON numbers the printer sent, so
/// `42` is written back as `42` and `42.5` as `42.5`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusPayload {
    pub temperature: Temperature,
    pub fan: Fan,
    /// Percentage, 0-100.
    pub print_percent: Number,
}

fn finite_reading(name: &str, value: &Number) -> Result<f64, String> {
    value
        .as_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("{name} is not a finite number"))
}

impl StatusPayload {
    /// Checks the value ranges serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("temperature.nozzle", &self.temperature.nozzle),
            ("temperature.nozzle_target", &self.temperature.nozzle_target),
            ("temperature.bed", &self.temperature.bed),
            ("temperature.bed_target", &self.temperature.bed_target),
        ] {
            finite_reading(name, value)?;
        }

        for (name, value) in [
            ("fan.cooling_speed", &self.fan.cooling_speed),
            ("print_percent", &self.print_percent),
        ] {
            if !(0.0..=100.0).contains(&finite_reading(name, value)?) {
                return Err(format!("{name} out of range 0-100: {value}"));
            }
        }

        Ok(())
    }
}

/// Webcam snapshot as a data URL, or nothing.
///
/// Serializes as the data URL string or `null`; the `image` key is always
/// written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageData(Option<String>);

impl ImageData {
    /// The "no image" marker.
    pub fn none() -> Self {
        Self(None)
    }

    pub fn from_data_url(data_url: String) -> Self {
        Self(Some(data_url))
    }

    pub fn as_data_url(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }
}

/// Everything the printer page renders: the status fields at the top level
/// plus `image`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageData {
    #[serde(flatten)]
    pub status: StatusPayload,
    pub image: ImageData,
}

impl PageData {
    pub fn new(status: StatusPayload, image: ImageData) -> Self {
        Self { status, image }
    }
}
