use super::standardize_unit;

#[test]
fn maps_symbols_to_ascii() {
    assert_eq!(standardize_unit("μL"), "uL");
    assert_eq!(standardize_unit("µL"), "uL");
    assert_eq!(standardize_unit("°C"), "degC");
    assert_eq!(standardize_unit("mm/s"), "mm_per_s");
    assert_eq!(standardize_unit("V/s"), "V/s");
}
