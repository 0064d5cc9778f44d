/// Unit spelling used in exported files. Unknown units pass through.
pub fn standardize_unit(unit: &str) -> &str {
    match unit {
        "μL" | "µL" => "uL",
        "°C" => "degC",
        "mm/s" => "mm_per_s",
        other => other,
    }
}

#[cfg(test)]
#[path = "units_test.rs"]
mod tests;
