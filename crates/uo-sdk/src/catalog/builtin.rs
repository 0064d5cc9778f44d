use super::definition::NodeDefinition;
use crate::planner::ExecutionStep;
use uo_core::{DependencyGuard, ParameterDefinition as Param, ParameterGroup, SelectOption};

const WELL_PATTERN: &str = "^[A-D][1-6]$";

/// The pre-built node types, in palette order.
pub fn builtin_nodes() -> Vec<NodeDefinition> {
    vec![
        solution_preparation(),
        electrode_setup(),
        electrochemical_measurement(),
        wash_cleaning(),
        data_export(),
        sequence_control(),
        bayesian_optimization(),
    ]
}

fn options(pairs: &[(&str, &str)]) -> Vec<SelectOption> {
    pairs
        .iter()
        .map(|(value, label)| SelectOption::new(*value, *label))
        .collect()
}

fn plain(values: &[&str]) -> Vec<SelectOption> {
    values.iter().copied().map(SelectOption::plain).collect()
}

fn common_group(uo_name: &str, description: &str, wait_after: f64, error_handling: &str) -> ParameterGroup {
    ParameterGroup::new("Common Parameters")
        .with(
            "uo_name",
            Param::text("UO Name")
                .describe("Custom name for this operation")
                .default_value(uo_name),
        )
        .with(
            "description",
            Param::text("Description")
                .describe("Operation description")
                .default_value(description),
        )
        .with(
            "wait_before",
            Param::number("Wait Before")
                .describe("Wait time before execution")
                .default_value(0)
                .bounds(0.0, 3600.0)
                .step(1.0)
                .unit("s"),
        )
        .with(
            "wait_after",
            Param::number("Wait After")
                .describe("Wait time after execution")
                .default_value(wait_after)
                .bounds(0.0, 3600.0)
                .step(1.0)
                .unit("s"),
        )
        .with(
            "error_handling",
            Param::select(
                "Error Handling",
                options(&[("continue", "Continue"), ("stop", "Stop"), ("retry", "Retry")]),
            )
            .describe("How to handle errors")
            .default_value(error_handling)
            .required(),
        )
        .with(
            "log_level",
            Param::select("Log Level", plain(&["DEBUG", "INFO", "WARNING", "ERROR"]))
                .describe("Logging level")
                .default_value("INFO")
                .required(),
        )
}

/// Wraps a node's own steps with the optional waits every node carries.
fn with_waits(body: Vec<ExecutionStep>) -> Vec<ExecutionStep> {
    let mut steps = Vec::with_capacity(body.len() + 2);
    steps.push(
        ExecutionStep::new("wait")
            .when("wait_before > 0")
            .describe("Wait before starting"),
    );
    steps.extend(body);
    steps.push(
        ExecutionStep::new("wait")
            .when("wait_after > 0")
            .describe("Wait after completion"),
    );
    steps
}

fn step(operation: &str, description: &str) -> ExecutionStep {
    ExecutionStep::new(operation).describe(description)
}

fn operations(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn well(label: &str, description: &str, default: &str) -> Param {
    Param::text(label)
        .describe(description)
        .default_value(default)
        .pattern(WELL_PATTERN)
        .required()
}

fn labware_options() -> Vec<SelectOption> {
    options(&[
        ("vial_rack_2", "Vial Rack 2"),
        ("vial_rack_7", "Vial Rack 7"),
        ("vial_rack_11", "Vial Rack 11"),
        ("nis_reactor", "NIS Reactor"),
    ])
}

fn solution_preparation() -> NodeDefinition {
    let mut node = NodeDefinition::new(
        "sdl1SolutionPreparation",
        "Solution Preparation",
        "solution-prep",
        "Automated solution preparation and dispensing",
    );
    let offset = |label: &str, description: &str, default: f64| {
        Param::number(label)
            .describe(description)
            .default_value(default)
            .bounds(-5.0, 5.0)
            .step(0.1)
            .unit("mm")
    };
    node.parameter_groups.insert(
        "common".to_string(),
        common_group(
            "ZnSO4_Solution_Prep",
            "Prepare 5mL ZnSO4 solution for electrodeposition",
            0.0,
            "stop",
        ),
    );
    node.parameter_groups.insert(
        "source".to_string(),
        ParameterGroup::new("Source Configuration")
            .with(
                "source_labware",
                Param::select("Source Labware", labware_options())
                    .describe("Labware containing the source solution")
                    .default_value("vial_rack_2")
                    .required(),
            )
            .with(
                "source_well",
                well("Source Well", "Well position in source labware (e.g., A1, B2)", "A1"),
            ),
    );
    node.parameter_groups.insert(
        "target".to_string(),
        ParameterGroup::new("Target Configuration")
            .with(
                "target_labware",
                Param::select("Target Labware", labware_options())
                    .describe("Labware to dispense solution into")
                    .default_value("nis_reactor")
                    .required(),
            )
            .with(
                "target_well",
                well("Target Well", "Well position in target labware (e.g., A1-D6)", "A1"),
            ),
    );
    node.parameter_groups.insert(
        "liquid_handling".to_string(),
        ParameterGroup::new("Liquid Handling Parameters")
            .with(
                "volume",
                Param::number("Volume")
                    .describe("Volume to transfer")
                    .default_value(5000)
                    .bounds(1.0, 10000.0)
                    .step(1.0)
                    .unit("μL")
                    .required(),
            )
            .with(
                "pipette_type",
                Param::select(
                    "Pipette Type",
                    options(&[
                        ("p1000_single_gen2", "P1000 Single Gen2"),
                        ("p300_single_gen2", "P300 Single Gen2"),
                        ("p20_single_gen2", "P20 Single Gen2"),
                    ]),
                )
                .describe("Type of pipette to use")
                .default_value("p1000_single_gen2")
                .required(),
            )
            .with(
                "aspiration_offset_z",
                Param::number("Aspiration Offset Z")
                    .describe("Z-axis offset for aspiration")
                    .default_value(8)
                    .bounds(0.0, 20.0)
                    .step(0.1)
                    .unit("mm"),
            ),
    );
    node.parameter_groups.insert(
        "dispense_offsets".to_string(),
        ParameterGroup::new("Dispense Offset Configuration")
            .with("dispense_offset_x", offset("Dispense Offset X", "X-axis offset for dispensing", -1.0))
            .with("dispense_offset_y", offset("Dispense Offset Y", "Y-axis offset for dispensing", 0.5))
            .with("dispense_offset_z", offset("Dispense Offset Z", "Z-axis offset for dispensing", 0.0)),
    );
    node.primitive_operations = operations(&[
        "select_pipette",
        "aspirate_solution",
        "move_to_target",
        "dispense_solution",
        "drop_tip",
    ]);
    node.execution_steps = with_waits(vec![
        step("select_pipette", "Select appropriate pipette"),
        step("aspirate_solution", "Aspirate solution from source"),
        step("move_to_target", "Move to target location"),
        step("dispense_solution", "Dispense solution to target"),
        step("drop_tip", "Drop pipette tip"),
    ]);
    node
}

fn electrode_setup() -> NodeDefinition {
    let mut node = NodeDefinition::new(
        "sdl1ElectrodeSetup",
        "Electrode Setup",
        "electrode",
        "Electrode installation and positioning for electrochemical experiments",
    );
    let lateral = |label: &str, description: &str| {
        Param::number(label)
            .describe(description)
            .default_value(0.5)
            .bounds(-2.0, 2.0)
            .step(0.1)
            .unit("mm")
    };
    node.parameter_groups.insert(
        "common".to_string(),
        common_group(
            "Reference_Electrode_Setup",
            "Setup reference electrode for electrochemical measurement",
            0.0,
            "stop",
        ),
    );
    node.parameter_groups.insert(
        "electrode".to_string(),
        ParameterGroup::new("Electrode Configuration")
            .with(
                "electrode_type",
                Param::select(
                    "Electrode Type",
                    options(&[
                        ("reference", "Reference Electrode"),
                        ("counter", "Counter Electrode"),
                        ("working", "Working Electrode"),
                    ]),
                )
                .describe("Type of electrode to install")
                .default_value("reference")
                .required(),
            )
            .with(
                "electrode_position",
                Param::select("Electrode Position", plain(&["A1", "A2", "B1", "B2"]))
                    .describe("Storage position of the electrode")
                    .default_value("A2")
                    .required(),
            ),
    );
    node.parameter_groups.insert(
        "positioning".to_string(),
        ParameterGroup::new("Positioning Parameters")
            .with(
                "target_well",
                well("Target Well", "Reaction well address (e.g., A1-D6)", "A1"),
            )
            .with(
                "insertion_depth",
                Param::number("Insertion Depth")
                    .describe("How deep to insert the electrode")
                    .default_value(26)
                    .bounds(0.0, 60.0)
                    .step(1.0)
                    .unit("mm")
                    .required(),
            )
            .with("lateral_offset_x", lateral("Lateral Offset X", "X-axis offset at the well"))
            .with("lateral_offset_y", lateral("Lateral Offset Y", "Y-axis offset at the well")),
    );
    node.parameter_groups.insert(
        "motion".to_string(),
        ParameterGroup::new("Motion Parameters").with(
            "movement_speed",
            Param::number("Movement Speed")
                .describe("Robot speed while carrying the electrode")
                .default_value(50)
                .bounds(10.0, 100.0)
                .step(5.0)
                .unit("mm/s"),
        ),
    );
    node.primitive_operations = operations(&[
        "pick_electrode",
        "move_to_well",
        "insert_electrode",
        "secure_electrode",
        "verify_position",
    ]);
    node.execution_steps = with_waits(vec![
        step("pick_electrode", "Pick electrode from storage position"),
        step("move_to_well", "Move electrode to target well"),
        step("insert_electrode", "Insert electrode to specified depth"),
        step("secure_electrode", "Secure electrode in position"),
        step("verify_position", "Verify electrode position"),
    ]);
    node
}

fn electrochemical_measurement() -> NodeDefinition {
    let mut node = NodeDefinition::new(
        "sdl1ElectrochemicalMeasurement",
        "Electrochemical Measurement",
        "measurement",
        "Various electrochemical measurement techniques (OCV, CP, CVA, PEIS, LSV)",
    );
    let guarded = |technique: &str, label: &str, default: f64, min: f64, max: f64, step: f64, unit: &str| {
        let parameter = Param::number(label)
            .default_value(default)
            .bounds(min, max)
            .step(step)
            .depends_on(DependencyGuard::equals("measurement_type", technique));
        if unit.is_empty() {
            parameter
        } else {
            parameter.unit(unit)
        }
    };
    node.parameter_groups.insert(
        "common".to_string(),
        common_group(
            "Electrochemical_Measurement",
            "Unified electrochemical measurement supporting OCV, CP, CVA, PEIS, and LSV",
            0.0,
            "stop",
        ),
    );
    node.parameter_groups.insert(
        "hardware".to_string(),
        ParameterGroup::new("Hardware Configuration")
            .with(
                "com_port",
                Param::text("COM Port")
                    .describe("Serial port for potentiostat connection")
                    .default_value("COM4")
                    .required(),
            )
            .with(
                "channel",
                Param::number("Channel")
                    .describe("Potentiostat channel number")
                    .default_value(0)
                    .bounds(0.0, 3.0)
                    .step(1.0),
            ),
    );
    node.parameter_groups.insert(
        "measurement".to_string(),
        ParameterGroup::new("Measurement Configuration").with(
            "measurement_type",
            Param::select(
                "Measurement Type",
                options(&[
                    ("OCV", "Open Circuit Voltage (OCV)"),
                    ("CP", "Chronopotentiometry (CP)"),
                    ("CVA", "Cyclic Voltammetry (CVA)"),
                    ("PEIS", "Potentiostatic EIS (PEIS)"),
                    ("LSV", "Linear Sweep Voltammetry (LSV)"),
                ]),
            )
            .describe("Type of electrochemical measurement")
            .default_value("CP")
            .required(),
        ),
    );
    node.parameter_groups.insert(
        "ocv".to_string(),
        ParameterGroup::new("OCV Parameters")
            .with("ocv_duration", guarded("OCV", "Duration", 60.0, 1.0, 3600.0, 1.0, "s"))
            .with("ocv_sample_interval", guarded("OCV", "Sample Interval", 1.0, 0.1, 60.0, 0.1, "s"))
            .with("ocv_settle_time", guarded("OCV", "Settle Time", 5.0, 0.0, 60.0, 1.0, "s"))
            .with(
                "ocv_stability_threshold",
                guarded("OCV", "Stability Threshold", 0.001, 0.0001, 0.1, 0.0001, "V"),
            ),
    );
    node.parameter_groups.insert(
        "cp".to_string(),
        ParameterGroup::new("CP Parameters")
            .with("cp_current", guarded("CP", "Current", -0.004, -0.1, 0.1, 0.0001, "A"))
            .with("cp_duration", guarded("CP", "Duration", 720.0, 1.0, 7200.0, 1.0, "s"))
            .with("cp_sample_interval", guarded("CP", "Sample Interval", 1.0, 0.1, 60.0, 0.1, "s"))
            .with(
                "cp_voltage_limit_min",
                guarded("CP", "Min Voltage Limit", -2.0, -2.0, 0.0, 0.01, "V"),
            )
            .with(
                "cp_voltage_limit_max",
                guarded("CP", "Max Voltage Limit", 2.0, 0.0, 2.0, 0.01, "V"),
            ),
    );
    node.parameter_groups.insert(
        "cva".to_string(),
        ParameterGroup::new("CVA Parameters")
            .with("cva_start_voltage", guarded("CVA", "Start Voltage", -0.5, -2.0, 2.0, 0.01, "V"))
            .with("cva_end_voltage", guarded("CVA", "End Voltage", 0.5, -2.0, 2.0, 0.01, "V"))
            .with("cva_scan_rate", guarded("CVA", "Scan Rate", 0.05, 0.001, 1.0, 0.001, "V/s"))
            .with("cva_cycles", guarded("CVA", "Number of Cycles", 3.0, 1.0, 100.0, 1.0, "cycles"))
            .with(
                "cva_sample_interval",
                guarded("CVA", "Sample Interval", 0.01, 0.001, 1.0, 0.001, "s"),
            ),
    );
    node.parameter_groups.insert(
        "peis".to_string(),
        ParameterGroup::new("PEIS Parameters")
            .with(
                "peis_start_frequency",
                guarded("PEIS", "Start Frequency", 10000.0, 0.1, 100000.0, 1.0, "Hz"),
            )
            .with("peis_end_frequency", guarded("PEIS", "End Frequency", 0.1, 0.1, 1000.0, 0.1, "Hz"))
            .with(
                "peis_points_per_decade",
                guarded("PEIS", "Steps per Decade", 5.0, 1.0, 20.0, 0.5, ""),
            )
            .with("peis_minimum_cycles", guarded("PEIS", "Minimum Cycles", 1.0, 1.0, 10.0, 1.0, "cycles"))
            .with("peis_ac_amplitude", guarded("PEIS", "AC Amplitude", 0.01, 0.001, 0.1, 0.001, "V"))
            .with("peis_dc_bias", guarded("PEIS", "DC Bias", 0.0, -2.0, 2.0, 0.01, "V"))
            .with(
                "peis_bias_vs_ocp",
                Param::boolean("Bias vs OCP")
                    .describe("Apply the DC bias relative to open circuit potential")
                    .default_value(true)
                    .depends_on(DependencyGuard::equals("measurement_type", "PEIS")),
            ),
    );
    node.parameter_groups.insert(
        "lsv".to_string(),
        ParameterGroup::new("LSV Parameters")
            .with("lsv_start_voltage", guarded("LSV", "Start Voltage", -0.5, -2.0, 2.0, 0.01, "V"))
            .with("lsv_end_voltage", guarded("LSV", "End Voltage", 0.5, -2.0, 2.0, 0.01, "V"))
            .with("lsv_scan_rate", guarded("LSV", "Scan Rate", 0.01, 0.001, 1.0, 0.001, "V/s"))
            .with(
                "lsv_sample_interval",
                guarded("LSV", "Sample Interval", 0.01, 0.001, 1.0, 0.001, "s"),
            ),
    );
    node.parameter_groups.insert(
        "data_collection".to_string(),
        ParameterGroup::new("Data Collection Settings")
            .with(
                "data_collection_enabled",
                Param::boolean("Data Collection Enabled")
                    .describe("Whether to collect data from this measurement step")
                    .default_value(true),
            )
            .with(
                "cycle_dependent_collection",
                Param::boolean("Cycle Dependent Collection")
                    .describe("Data collection depends on the current cycle number")
                    .default_value(true),
            )
            .with(
                "data_tag",
                Param::text("Data Tag/Label")
                    .describe("Tag for identifying this data in analysis")
                    .default_value("Electrochemical_Measurement")
                    .required(),
            ),
    );
    node.primitive_operations = operations(&[
        "connect_electrodes",
        "initialize_potentiostat",
        "measure_ocv",
        "apply_current",
        "measure_impedance",
        "record_data",
        "disconnect_electrodes",
    ]);
    node.execution_steps = with_waits(vec![
        step("connect_electrodes", "Connect electrodes to potentiostat"),
        step("initialize_potentiostat", "Initialize potentiostat settings"),
        step("measure_ocv", "Measure open circuit voltage").when("measurement_type == OCV"),
        step("apply_current", "Apply constant current").when("measurement_type == CP"),
        step("measure_impedance", "Measure impedance spectrum").when("measurement_type == PEIS"),
        step("record_data", "Record measurement data"),
        step("disconnect_electrodes", "Disconnect electrodes"),
    ]);
    node
}

fn wash_cleaning() -> NodeDefinition {
    let mut node = NodeDefinition::new(
        "sdl1WashCleaning",
        "Wash/Cleaning",
        "cleaning",
        "Electrode and reactor cleaning operations",
    );
    let volume = |label: &str, description: &str, default: f64| {
        Param::number(label)
            .describe(description)
            .default_value(default)
            .bounds(0.0, 20.0)
            .step(0.5)
            .unit("mL")
            .required()
    };
    node.parameter_groups.insert(
        "common".to_string(),
        common_group(
            "Electrode_Cleaning_Sequence",
            "Multi-stage electrode and reactor cleaning with ultrasonic treatment",
            0.0,
            "stop",
        ),
    );
    node.parameter_groups.insert(
        "cleaning_setup".to_string(),
        ParameterGroup::new("Cleaning Setup")
            .with(
                "cleaning_tool_position",
                Param::select("Cleaning Tool Position", plain(&["B1", "B2", "C1", "C2"]))
                    .describe("Storage position of the flush tool")
                    .default_value("B1")
                    .required(),
            )
            .with("target_well", well("Target Well", "Well to clean (e.g., A1-D6)", "A1"))
            .with(
                "insertion_depth",
                Param::number("Insertion Depth")
                    .describe("How deep to insert the cleaning tool")
                    .default_value(57)
                    .bounds(0.0, 60.0)
                    .step(1.0)
                    .unit("mm")
                    .required(),
            ),
    );
    node.parameter_groups.insert(
        "cleaning_parameters".to_string(),
        ParameterGroup::new("Cleaning Parameters")
            .with("pump1_volume", volume("Pump 1 Volume", "Volume of cleaning solution from pump 1", 10.0))
            .with("pump2_volume", volume("Pump 2 Volume", "Volume of cleaning solution from pump 2", 4.0))
            .with(
                "ultrasonic_time",
                Param::number("Ultrasonic Time")
                    .describe("Duration of ultrasonic cleaning")
                    .default_value(5000)
                    .bounds(0.0, 10000.0)
                    .step(100.0)
                    .unit("ms"),
            )
            .with("final_wash_volume", volume("Final Wash Volume", "Volume of the final rinse", 10.0))
            .with(
                "cleaning_cycles",
                Param::number("Cleaning Cycles")
                    .describe("Number of wash repetitions")
                    .default_value(2)
                    .bounds(1.0, 5.0)
                    .step(1.0),
            ),
    );
    node.primitive_operations = operations(&[
        "pick_cleaning_tool",
        "move_to_well",
        "insert_tool",
        "dispense_cleaning_solution",
        "activate_ultrasonic",
        "aspirate_waste",
        "retract_tool",
        "return_tool",
    ]);
    node.execution_steps = with_waits(vec![
        step("pick_cleaning_tool", "Pick cleaning tool from storage"),
        step("move_to_well", "Move to target well"),
        step("insert_tool", "Insert cleaning tool"),
        step("dispense_cleaning_solution", "Dispense cleaning solutions"),
        step("activate_ultrasonic", "Activate ultrasonic cleaning").when("ultrasonic_time > 0"),
        step("aspirate_waste", "Remove waste solution"),
        step("retract_tool", "Retract cleaning tool"),
        step("return_tool", "Return tool to storage"),
    ]);
    node
}

fn data_export() -> NodeDefinition {
    let mut node = NodeDefinition::new(
        "sdl1DataExport",
        "Data Export",
        "data",
        "Export experimental data to various file formats",
    );
    let toggle = |label: &str, description: &str, default: bool| {
        Param::boolean(label).describe(description).default_value(default)
    };
    let when_enabled = |parameter: Param, flag: &str| {
        parameter.depends_on(DependencyGuard::equals(flag, true))
    };
    let cycle = |label: &str, description: &str, default: f64| {
        Param::number(label)
            .describe(description)
            .default_value(default)
            .bounds(1.0, 1000.0)
            .step(1.0)
    };
    node.parameter_groups.insert(
        "common".to_string(),
        common_group(
            "Experiment_Data_Export",
            "Export DC/AC electrochemical data, metadata, and logs with cycle range file naming",
            0.0,
            "stop",
        ),
    );
    node.parameter_groups.insert(
        "general_settings".to_string(),
        ParameterGroup::new("General Settings")
            .with(
                "data_path",
                Param::text("Data Path")
                    .describe("Directory the export files are written to")
                    .default_value("./data")
                    .required(),
            )
            .with(
                "export_format",
                Param::select(
                    "Export Format",
                    options(&[("CSV", "CSV"), ("Excel", "Excel (.xlsx)"), ("JSON", "JSON")]),
                )
                .describe("File format of the exported data")
                .default_value("CSV")
                .required(),
            ),
    );
    node.parameter_groups.insert(
        "file_naming".to_string(),
        ParameterGroup::new("File Naming")
            .with(
                "file_naming",
                Param::select(
                    "File Naming Template",
                    options(&[
                        ("{experiment_id}_cycles{cycle_range}_{data_type}", "Standard: exp_cycles1-5_dc"),
                        (
                            "{experiment_id}_{timestamp}_cycles{cycle_range}_{data_type}",
                            "With Timestamp: exp_20240723_cycles1-5_dc",
                        ),
                        ("{experiment_id}_c{cycle_start}-{cycle_end}_{data_type}", "Explicit Range: exp_c1-5_dc"),
                        ("{data_type}_{experiment_id}_cycles{cycle_range}", "Type First: dc_exp_cycles1-5"),
                        ("custom", "Custom Pattern"),
                    ]),
                )
                .describe("Pattern used to name export files")
                .default_value("{experiment_id}_cycles{cycle_range}_{data_type}"),
            )
            .with(
                "custom_file_naming",
                Param::text("Custom File Naming")
                    .describe("Custom file name pattern")
                    .depends_on(DependencyGuard::equals("file_naming", "custom"))
                    .required(),
            )
            .with(
                "cycle_range_format",
                Param::select(
                    "Cycle Range Format",
                    options(&[
                        ("{start}-{end}", "Range: 1-5"),
                        ("{start}to{end}", "Range: 1to5"),
                        ("{start}_{end}", "Underscore: 1_5"),
                        ("{total}cycles", "Total: 5cycles"),
                    ]),
                )
                .describe("How the cycle range appears in file names")
                .default_value("{start}-{end}"),
            )
            .with(
                "include_timestamp_in_filename",
                toggle("Include Timestamp", "Append a timestamp to file names", false),
            )
            .with(
                "timestamp_format",
                when_enabled(
                    Param::text("Timestamp Format")
                        .describe("Format of the file name timestamp")
                        .default_value("YYYYMMDD_HHMMSS"),
                    "include_timestamp_in_filename",
                ),
            ),
    );
    node.parameter_groups.insert(
        "cycle_range_info".to_string(),
        ParameterGroup::new("Cycle Range Information")
            .with("cycle_start", cycle("Cycle Start", "First cycle included in the export", 1.0))
            .with("cycle_end", cycle("Cycle End", "Last cycle included in the export", 5.0))
            .with("total_cycles", cycle("Total Cycles", "Number of cycles in the sequence", 5.0)),
    );
    node.parameter_groups.insert(
        "dc_data_export".to_string(),
        ParameterGroup::new("DC Data Export")
            .with("dc_data_export", toggle("Export DC Data", "Write the DC measurement file", true))
            .with(
                "dc_file_name",
                when_enabled(
                    Param::text("DC File Name").default_value("electrochemical_dc"),
                    "dc_data_export",
                ),
            ),
    );
    node.parameter_groups.insert(
        "ac_data_export".to_string(),
        ParameterGroup::new("AC Data Export")
            .with("ac_data_export", toggle("Export AC Data", "Write the impedance file", true))
            .with(
                "ac_file_name",
                when_enabled(
                    Param::text("AC File Name").default_value("electrochemical_ac"),
                    "ac_data_export",
                ),
            ),
    );
    node.parameter_groups.insert(
        "metadata_export".to_string(),
        ParameterGroup::new("Metadata Export")
            .with(
                "include_metadata",
                toggle("Include Metadata", "Write experiment metadata alongside the data", true),
            )
            .with(
                "include_parameters",
                when_enabled(
                    toggle("Include Parameters", "Record node parameters in the metadata", true),
                    "include_metadata",
                ),
            )
            .with(
                "include_timestamps",
                when_enabled(
                    toggle("Include Timestamps", "Record step timestamps in the metadata", true),
                    "include_metadata",
                ),
            ),
    );
    node.parameter_groups.insert(
        "log_export".to_string(),
        ParameterGroup::new("Log Export")
            .with("log_export", toggle("Export Logs", "Write the run log", true))
            .with(
                "log_level_filter",
                when_enabled(
                    Param::select("Log Level Filter", plain(&["DEBUG", "INFO", "WARNING", "ERROR"]))
                        .default_value("INFO"),
                    "log_export",
                ),
            )
            .with(
                "include_system_logs",
                when_enabled(
                    toggle("Include System Logs", "Include hardware driver logs", false),
                    "log_export",
                ),
            ),
    );
    node.primitive_operations = operations(&[
        "collect_data",
        "read_cycle_info_from_sequence_control",
        "generate_cycle_range_string",
        "format_filename_with_cycle_range",
        "format_data",
        "create_dc_file",
        "create_ac_file",
        "create_metadata_file",
        "create_log_file",
        "write_data",
        "save_file",
        "verify_export",
    ]);
    node.execution_steps = with_waits(vec![
        step("collect_data", "Collect data from memory buffer"),
        step("format_data", "Format data for export"),
        step("create_file", "Create export file(s)"),
        step("write_metadata", "Write experiment metadata").when("include_metadata == true"),
        step("write_data", "Write experimental data"),
        step("save_file", "Save file to disk"),
        step("verify_export", "Verify successful export"),
    ]);
    node
}

fn sequence_control() -> NodeDefinition {
    let mut node = NodeDefinition::new(
        "sdl1SequenceControl",
        "Sequence Control",
        "control",
        "Loop and conditional control for experimental sequences",
    );
    let condition_based = || DependencyGuard::equals("loop_type", "condition_based");
    node.parameter_groups.insert(
        "common".to_string(),
        common_group(
            "Sequence_Control_Loop",
            "Loop and conditional control for experimental sequences with data collection management",
            0.0,
            "continue",
        ),
    );
    node.parameter_groups.insert(
        "loop_configuration".to_string(),
        ParameterGroup::new("Loop Configuration")
            .with(
                "loop_type",
                Param::select(
                    "Loop Type",
                    options(&[
                        ("fixed_count", "Fixed Count"),
                        ("time_based", "Time Based"),
                        ("condition_based", "Condition Based"),
                    ]),
                )
                .describe("How the loop decides to repeat")
                .default_value("fixed_count")
                .required(),
            )
            .with(
                "loop_count",
                Param::number("Loop Count")
                    .describe("Number of iterations")
                    .default_value(5)
                    .bounds(1.0, 100.0)
                    .step(1.0)
                    .depends_on(DependencyGuard::equals("loop_type", "fixed_count")),
            )
            .with(
                "loop_condition",
                Param::select(
                    "Loop Condition",
                    options(&[
                        ("voltage_threshold", "Voltage Threshold"),
                        ("current_threshold", "Current Threshold"),
                        ("time_limit", "Time Limit"),
                    ]),
                )
                .describe("Condition type for loop control")
                .default_value("voltage_threshold")
                .depends_on(condition_based()),
            )
            .with(
                "break_condition",
                Param::text("Break Condition")
                    .describe("Expression for breaking the loop (e.g., \"voltage < -1.5\")")
                    .default_value("voltage < -1.5")
                    .depends_on(condition_based()),
            )
            .with(
                "max_iterations",
                Param::number("Max Iterations")
                    .describe("Upper bound on condition-based iterations")
                    .default_value(100)
                    .bounds(1.0, 1000.0)
                    .step(1.0)
                    .depends_on(condition_based()),
            )
            .with(
                "check_interval",
                Param::number("Check Interval")
                    .describe("Time between break condition checks")
                    .default_value(1)
                    .bounds(0.1, 3600.0)
                    .step(0.1)
                    .unit("s")
                    .depends_on(condition_based()),
            ),
    );
    node.parameter_groups.insert(
        "data_collection".to_string(),
        ParameterGroup::new("Data Collection Settings")
            .with(
                "data_collection_start",
                Param::number("Data Collection Start")
                    .describe("First cycle whose data is collected")
                    .default_value(3)
                    .bounds(1.0, 50.0)
                    .step(1.0)
                    .unit("cycle"),
            )
            .with(
                "data_collection_mode",
                Param::select(
                    "Data Collection Mode",
                    options(&[
                        ("all_cycles", "All Cycles"),
                        ("from_cycle_n", "From Cycle N"),
                        ("last_n_cycles", "Last N Cycles"),
                    ]),
                )
                .describe("Which cycles contribute data")
                .default_value("from_cycle_n"),
            )
            .with(
                "stabilization_cycles",
                Param::number("Stabilization Cycles")
                    .describe("Cycles discarded while the cell stabilizes")
                    .default_value(2)
                    .bounds(0.0, 20.0)
                    .step(1.0)
                    .unit("cycles"),
            )
            .with(
                "last_n_cycles",
                Param::number("Last N Cycles")
                    .describe("Number of trailing cycles to keep")
                    .default_value(3)
                    .bounds(1.0, 20.0)
                    .step(1.0)
                    .unit("cycles")
                    .depends_on(DependencyGuard::equals("data_collection_mode", "last_n_cycles")),
            ),
    );
    node.primitive_operations = operations(&[
        "initialize_loop",
        "check_condition",
        "increment_counter",
        "evaluate_break_condition",
        "loop_iteration",
        "finalize_loop",
    ]);
    node.execution_steps = with_waits(vec![
        step("initialize_loop", "Initialize loop control structure"),
        step("check_condition", "Check loop continuation condition")
            .when("loop_type == condition_based"),
        step("loop_iteration", "Execute loop iteration"),
        step("increment_counter", "Increment iteration counter").when("loop_type == fixed_count"),
        step("evaluate_break_condition", "Evaluate break condition")
            .when("loop_type == condition_based"),
        step("finalize_loop", "Finalize loop and cleanup"),
    ]);
    node
}

fn bayesian_optimization() -> NodeDefinition {
    let mut node = NodeDefinition::new(
        "sdl1BloxOptimization",
        "Blox Optimization",
        "optimization",
        "Multi-objective Bayesian optimization for autonomous experimental design",
    );
    let toggle = |label: &str, description: &str| {
        Param::boolean(label).describe(description).default_value(true)
    };
    let constrained = |label: &str, default: f64, min: f64| {
        Param::number(label)
            .default_value(default)
            .bounds(min, 7.0)
            .step(1.0)
            .depends_on(DependencyGuard::equals("constraint_handling", true))
    };
    node.parameter_groups.insert(
        "common".to_string(),
        common_group(
            "BloxOptimizer",
            "Multi-objective Bayesian optimization for autonomous experimental design",
            1.0,
            "continue",
        ),
    );
    node.parameter_groups.insert(
        "blox_core".to_string(),
        ParameterGroup::new("Optimizer Configuration")
            .with(
                "optimization_method",
                Param::select(
                    "Optimization Method",
                    options(&[
                        ("EHVI", "Expected Hypervolume Improvement (EHVI)"),
                        ("PAREGO", "ParEGO"),
                        ("NSGA2", "NSGA-II"),
                        ("MOEAD", "MOEA/D"),
                    ]),
                )
                .default_value("EHVI")
                .required(),
            )
            .with(
                "acquisition_function",
                Param::select(
                    "Acquisition Function",
                    options(&[
                        ("qEHVI", "Multi-objective qEHVI"),
                        ("qNEHVI", "Noisy qEHVI"),
                        ("qParEGO", "q-ParEGO"),
                        ("qEI", "Expected Improvement"),
                    ]),
                )
                .default_value("qEHVI")
                .required(),
            )
            .with(
                "surrogate_model",
                Param::select(
                    "Surrogate Model",
                    options(&[
                        ("MultiTaskGP", "Multi-Task Gaussian Process"),
                        ("SingleTaskGP", "Single-Task Gaussian Process"),
                        ("FixedNoiseGP", "Fixed Noise GP"),
                        ("HeteroskedasticSingleTaskGP", "Heteroskedastic GP"),
                    ]),
                )
                .default_value("MultiTaskGP")
                .required(),
            ),
    );
    node.parameter_groups.insert(
        "optimization_strategy".to_string(),
        ParameterGroup::new("Optimization Strategy")
            .with(
                "initial_strategy",
                Param::select(
                    "Initial Strategy",
                    options(&[
                        ("random_sampling", "Random Sampling"),
                        ("latin_hypercube", "Latin Hypercube Sampling"),
                        ("sobol_sequence", "Sobol Sequence"),
                        ("grid_search", "Grid Search"),
                    ]),
                )
                .default_value("random_sampling"),
            )
            .with(
                "initial_samples",
                Param::number("Initial Samples")
                    .default_value(3)
                    .bounds(1.0, 50.0)
                    .step(1.0)
                    .required(),
            )
            .with(
                "max_iterations",
                Param::number("Max Iterations")
                    .default_value(20)
                    .bounds(1.0, 500.0)
                    .step(1.0)
                    .required(),
            )
            .with(
                "batch_size",
                Param::number("Batch Size")
                    .default_value(1)
                    .bounds(1.0, 10.0)
                    .step(1.0),
            )
            .with(
                "convergence_threshold",
                Param::number("Convergence Threshold")
                    .default_value(0.01)
                    .bounds(0.0001, 1.0)
                    .step(0.0001),
            )
            .with(
                "exploration_weight",
                Param::number("Exploration Weight")
                    .default_value(0.1)
                    .bounds(0.0, 1.0)
                    .step(0.01),
            ),
    );
    node.parameter_groups.insert(
        "advanced_features".to_string(),
        ParameterGroup::new("Advanced Features")
            .with(
                "constraint_handling",
                toggle("Constraint Handling", "Limit how many additives a proposal may use"),
            )
            .with("max_additives_constraint", constrained("Max Additives", 4.0, 1.0))
            .with("min_additives_constraint", constrained("Min Additives", 1.0, 0.0)),
    );
    node.parameter_groups.insert(
        "workflow_integration".to_string(),
        ParameterGroup::new("Workflow Integration")
            .with(
                "auto_extract_objectives",
                toggle("Auto Extract Objectives", "Derive objective values from exported data"),
            )
            .with(
                "real_time_model_update",
                toggle("Real-time Model Update", "Refit the surrogate after every result"),
            ),
    );
    node.primitive_operations = operations(&[
        "initialize_blox_optimizer",
        "load_experiment_history",
        "generate_parameter_proposals",
        "update_surrogate_model",
        "extract_objectives_from_data",
        "check_convergence_criteria",
        "save_optimization_state",
        "export_pareto_front",
    ]);
    node.execution_steps = with_waits(vec![
        step("initialize_blox_optimizer", "Initialize optimizer"),
        step("load_experiment_history", "Load previous experiment results"),
        step("extract_objectives_from_data", "Extract objective values")
            .when("auto_extract_objectives == true"),
        step("update_surrogate_model", "Refit surrogate model").when("real_time_model_update == true"),
        step("generate_parameter_proposals", "Propose next parameters"),
        step("check_convergence_criteria", "Check convergence"),
        step("save_optimization_state", "Save optimizer state"),
        step("export_pareto_front", "Export Pareto front"),
    ]);
    node
}

#[cfg(test)]
#[path = "builtin_test.rs"]
mod tests;
