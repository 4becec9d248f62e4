//! Wire label example rendering a thermal roll and an office sheet

use tracing_subscriber::EnvFilter;
use wire_labels::{
    InputFormat, LabelEngine, LabelSettings, LayoutKind, OutputMode, PrinterProfile,
    parse_input,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging with debug level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .init();

    let csv = "Wire ID,Quantity\nW-100,3\nW-101,2\n\"PWR-24V,A\",5\nGND-1,1\n";
    let pairs = parse_input(csv, InputFormat::Csv);

    let engine = LabelEngine::default();

    // SATO M-84Pro roll: one row of labels per page
    let thermal = LabelSettings {
        auto_size: true,
        font_size: 10.0,
        ..Default::default()
    };
    let job = thermal.to_job(pairs.clone())?;
    let output = engine.render_pdf(&job, OutputMode::File("wire_labels_thermal.pdf".into()))?;
    println!(
        "Thermal: {} labels on {} pages -> wire_labels_thermal.pdf",
        output.report.labels_drawn(),
        output.report.pages()
    );

    // Letter sheet with 2 x 25.4mm labels
    let sheet = LabelSettings {
        label_width: 101.6,
        printable_height: 25.4,
        margin_top: 1.0,
        margin_bottom: 1.0,
        margin_left: 2.0,
        margin_right: 2.0,
        font_size: 8.0,
        auto_size: true,
        lines_per_label: 3,
        labels_per_row: 2,
        horizontal_spacing: 104.8,
        vertical_spacing: 25.4,
        page_margin_top: 12.7,
        page_margin_left: 4.0,
        show_border: true,
        layout: LayoutKind::Grid,
        profile: PrinterProfile::Standard,
        ..Default::default()
    };
    let job = sheet.to_job(pairs)?;
    let output = engine.render_pdf(&job, OutputMode::File("wire_labels_sheet.pdf".into()))?;
    println!(
        "Sheet: {} labels on {} pages -> wire_labels_sheet.pdf",
        output.report.labels_drawn(),
        output.report.pages()
    );

    if !output.report.fallback_labels.is_empty() {
        println!("Fallback font used for labels {:?}", output.report.fallback_labels);
    }

    Ok(())
}
