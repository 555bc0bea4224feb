//! Command implementations.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;
use tracing::{debug, info};

use fkp_convert::{
    ConvertOptions, VoiceAllocation, convert_instrument, convert_patch, has_converter,
};
use fkp_format::{FkpDocument, UnitType, read_document, read_instrument, read_patch};
use fkp_model::ConvertedPatch;

use crate::cli::{ConvertArgs, DumpArgs, KindArg};

pub fn run_convert(args: &ConvertArgs) -> Result<()> {
    let document = load_document(&args.input, args.kind)?;
    let options = ConvertOptions {
        voice_allocation: if args.voices_from_polyphony {
            VoiceAllocation::FromPolyphony
        } else {
            VoiceAllocation::FixedSingle
        },
    };

    let patch: ConvertedPatch = match &document {
        FkpDocument::Patch(doc) => convert_patch(doc, &options),
        FkpDocument::Instrument(doc) => convert_instrument(doc, &options),
    }
    .context("convert document")?;

    info!(
        instruments = patch.num_instruments(),
        units = patch.num_units(),
        "converted patch"
    );
    write_output(&patch, args.output.as_deref(), args.compact)
}

pub fn run_dump(args: &DumpArgs) -> Result<()> {
    let document = load_document(&args.input, args.kind)?;
    write_output(&document, args.output.as_deref(), args.compact)
}

pub fn run_units() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Id", "Mnemonic", "Name", "Converts"]);
    apply_table_style(&mut table);
    for row in unit_rows() {
        table.add_row(row.to_vec());
    }
    println!("{table}");
    Ok(())
}

/// One table row per unit-type discriminant.
fn unit_rows() -> Vec<[String; 4]> {
    UnitType::ALL
        .iter()
        .map(|&unit_type| {
            let converts = if unit_type == UnitType::None {
                "skipped"
            } else if has_converter(unit_type) {
                "yes"
            } else {
                "not implemented"
            };
            [
                format!("{:#04x}", unit_type.discriminant()),
                unit_type.mnemonic().to_string(),
                unit_type.name().to_string(),
                converts.to_string(),
            ]
        })
        .collect()
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

/// Read and decode a container file with the requested shape handling.
fn load_document(path: &Path, kind: KindArg) -> Result<FkpDocument> {
    let document = match kind {
        KindArg::Auto => read_document(path),
        KindArg::Patch => read_patch(path).map(FkpDocument::Patch),
        KindArg::Instrument => read_instrument(path).map(FkpDocument::Instrument),
    }
    .with_context(|| format!("decode {}", path.display()))?;

    info!(version = %document.version(), "decoded container");
    Ok(document)
}

/// Serialize a value as JSON to a file or stdout.
fn write_output<T: Serialize>(value: &T, output: Option<&Path>, compact: bool) -> Result<()> {
    let mut json = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
    .context("serialize output")?;
    json.push('\n');

    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
            debug!(path = %path.display(), "wrote output");
        }
        None => print!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_rows_cover_the_discriminant_space() {
        let rows = unit_rows();
        assert_eq!(rows.len(), UnitType::ALL.len());
        assert_eq!(rows[0], ["0x00", "NONE", "none", "skipped"]);
        assert_eq!(rows[2], ["0x02", "VCO", "oscillator", "yes"]);
        assert_eq!(rows[10], ["0x0a", "ACC", "accumulate", "not implemented"]);
    }

    #[test]
    fn test_units_table_snapshot() {
        insta::assert_debug_snapshot!(unit_rows(), @r#"
        [
            [
                "0x00",
                "NONE",
                "none",
                "skipped",
            ],
            [
                "0x01",
                "ENV",
                "envelope",
                "yes",
            ],
            [
                "0x02",
                "VCO",
                "oscillator",
                "yes",
            ],
            [
                "0x03",
                "VCF",
                "filter",
                "yes",
            ],
            [
                "0x04",
                "DST",
                "distort",
                "yes",
            ],
            [
                "0x05",
                "DLL",
                "delay",
                "yes",
            ],
            [
                "0x06",
                "FOP",
                "arithmetic",
                "yes",
            ],
            [
                "0x07",
                "FST",
                "store",
                "not implemented",
            ],
            [
                "0x08",
                "PAN",
                "pan",
                "yes",
            ],
            [
                "0x09",
                "OUT",
                "out",
                "yes",
            ],
            [
                "0x0a",
                "ACC",
                "accumulate",
                "not implemented",
            ],
            [
                "0x0b",
                "FLD",
                "load",
                "not implemented",
            ],
            [
                "0x0c",
                "GLITCH",
                "glitch",
                "not implemented",
            ],
            [
                "0x0d",
                "NUM_MODULES",
                "modules",
                "not implemented",
            ],
        ]
        "#);
    }
}
