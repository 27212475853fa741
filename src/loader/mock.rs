//! Fixed readings for development mode

use serde_json::Number;

use crate::constants::mock;
use crate::loader::models::{Fan, ImageData, PageData, StatusPayload, Temperature};

// The mock constants are all finite.
fn celsius(value: f64) -> Number {
    Number::from_f64(value).unwrap_or_else(|| Number::from(0))
}

/// Status served in development mode.
pub fn mock_status() -> StatusPayload {
    StatusPayload {
        temperature: Temperature {
            nozzle: celsius(mock::NOZZLE_CELSIUS),
            nozzle_target: celsius(mock::NOZZLE_TARGET_CELSIUS),
            bed: celsius(mock::BED_CELSIUS),
            bed_target: celsius(mock::BED_TARGET_CELSIUS),
        },
        fan: Fan {
            cooling_speed: Number::from(mock::COOLING_FAN_PERCENT),
        },
        print_percent: Number::from(mock::PRINT_PERCENT),
    }
}

/// Page data served in development mode. There is never a webcam image.
pub fn mock_page_data() -> PageData {
    PageData::new(mock_status(), ImageData::none())
}
