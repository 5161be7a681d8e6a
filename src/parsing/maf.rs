//! Tab-separated Mutation Annotation Format.
//!
//! Known MAF columns map onto [`MutationRecord`] fields. Any other column is
//! carried through `extra` and written back after the known columns, sorted by
//! name, followed by `Annotation_Status`. Tabs and line breaks inside written
//! values are replaced with spaces.

use std::collections::BTreeSet;
use std::io::Write;

use serde_json::Value;

use crate::core::record::MutationRecord;
use crate::parsing::records::ParseError;
use crate::utils::validation::check_record_limit;

/// Column holding the annotation status label on output
pub const STATUS_COLUMN: &str = "Annotation_Status";

/// Known MAF columns in output order
pub const MAF_COLUMNS: &[&str] = &[
    "Hugo_Symbol",
    "Entrez_Gene_Id",
    "NCBI_Build",
    "Chromosome",
    "Start_Position",
    "End_Position",
    "Strand",
    "Variant_Classification",
    "Variant_Type",
    "Reference_Allele",
    "Tumor_Seq_Allele1",
    "Tumor_Seq_Allele2",
    "dbSNP_RS",
    "Tumor_Sample_Barcode",
    "HGVSc",
    "HGVSp",
    "HGVSp_Short",
    "Transcript_ID",
    "RefSeq",
    "Protein_position",
    "Codons",
    "Exon_Number",
    "Consequence",
    "SIFT_Prediction",
    "SIFT_Score",
    "Polyphen_Prediction",
    "Polyphen_Score",
];

fn column_mut<'a>(record: &'a mut MutationRecord, column: &str) -> Option<&'a mut String> {
    let field = match column {
        "Hugo_Symbol" => &mut record.hugo_symbol,
        "Entrez_Gene_Id" => &mut record.entrez_gene_id,
        "NCBI_Build" => &mut record.ncbi_build,
        "Chromosome" => &mut record.chromosome,
        "Start_Position" => &mut record.start_position,
        "End_Position" => &mut record.end_position,
        "Strand" => &mut record.strand,
        "Variant_Classification" => &mut record.variant_classification,
        "Variant_Type" => &mut record.variant_type,
        "Reference_Allele" => &mut record.reference_allele,
        "Tumor_Seq_Allele1" => &mut record.tumor_seq_allele1,
        "Tumor_Seq_Allele2" => &mut record.tumor_seq_allele2,
        "dbSNP_RS" => &mut record.dbsnp_rs,
        "Tumor_Sample_Barcode" => &mut record.tumor_sample_barcode,
        "HGVSc" => &mut record.hgvsc,
        "HGVSp" => &mut record.hgvsp,
        "HGVSp_Short" => &mut record.hgvsp_short,
        "Transcript_ID" => &mut record.transcript_id,
        "RefSeq" => &mut record.refseq,
        "Protein_position" => &mut record.protein_position,
        "Codons" => &mut record.codons,
        "Exon_Number" => &mut record.exon_number,
        "Consequence" => &mut record.consequence,
        "SIFT_Prediction" => &mut record.sift_prediction,
        "SIFT_Score" => &mut record.sift_score,
        "Polyphen_Prediction" => &mut record.polyphen_prediction,
        "Polyphen_Score" => &mut record.polyphen_score,
        _ => return None,
    };
    Some(field)
}

fn column_value<'a>(record: &'a MutationRecord, column: &str) -> Option<&'a str> {
    let value = match column {
        "Hugo_Symbol" => &record.hugo_symbol,
        "Entrez_Gene_Id" => &record.entrez_gene_id,
        "NCBI_Build" => &record.ncbi_build,
        "Chromosome" => &record.chromosome,
        "Start_Position" => &record.start_position,
        "End_Position" => &record.end_position,
        "Strand" => &record.strand,
        "Variant_Classification" => &record.variant_classification,
        "Variant_Type" => &record.variant_type,
        "Reference_Allele" => &record.reference_allele,
        "Tumor_Seq_Allele1" => &record.tumor_seq_allele1,
        "Tumor_Seq_Allele2" => &record.tumor_seq_allele2,
        "dbSNP_RS" => &record.dbsnp_rs,
        "Tumor_Sample_Barcode" => &record.tumor_sample_barcode,
        "HGVSc" => &record.hgvsc,
        "HGVSp" => &record.hgvsp,
        "HGVSp_Short" => &record.hgvsp_short,
        "Transcript_ID" => &record.transcript_id,
        "RefSeq" => &record.refseq,
        "Protein_position" => &record.protein_position,
        "Codons" => &record.codons,
        "Exon_Number" => &record.exon_number,
        "Consequence" => &record.consequence,
        "SIFT_Prediction" => &record.sift_prediction,
        "SIFT_Score" => &record.sift_score,
        "Polyphen_Prediction" => &record.polyphen_prediction,
        "Polyphen_Score" => &record.polyphen_score,
        _ => return None,
    };
    Some(value.as_str())
}

/// Parse MAF text into records
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the header is missing, a header
/// column is repeated, or a row has more fields than the header, or
/// `ParseError::TooManyRecords` if the limit is exceeded.
pub fn parse_maf_text(text: &str) -> Result<Vec<MutationRecord>, ParseError> {
    let mut header: Option<Vec<&str>> = None;
    let mut records = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();

        let Some(columns) = header.as_ref() else {
            let mut seen = BTreeSet::new();
            for column in &fields {
                if !seen.insert(column.trim()) {
                    return Err(ParseError::InvalidFormat(format!(
                        "Duplicate column '{}' in MAF header",
                        column.trim()
                    )));
                }
            }
            header = Some(fields.iter().map(|c| c.trim()).collect());
            continue;
        };

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        if fields.len() > columns.len() {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has {} fields but the header has {}",
                fields.len(),
                columns.len()
            )));
        }

        if check_record_limit(records.len()).is_some() {
            return Err(ParseError::TooManyRecords(records.len() + 1));
        }

        let mut record = MutationRecord::default();
        // Short rows leave trailing columns empty
        for (column, value) in columns.iter().zip(fields.iter()) {
            if *column == STATUS_COLUMN {
                continue;
            }
            match column_mut(&mut record, column) {
                Some(field) => *field = (*value).to_string(),
                None => {
                    record
                        .extra
                        .insert((*column).to_string(), Value::String((*value).to_string()));
                }
            }
        }
        records.push(record);
    }

    if header.is_none() {
        return Err(ParseError::InvalidFormat("No header line found in MAF input".to_string()));
    }

    Ok(records)
}

/// Tabs and line breaks would shift or split columns
fn cell_text(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}

fn extra_text(value: &Value) -> String {
    match value {
        Value::String(s) => cell_text(s),
        Value::Null => String::new(),
        other => cell_text(&other.to_string()),
    }
}

/// Write records as MAF with a header row
///
/// # Errors
///
/// Returns `ParseError::Io` if writing fails.
pub fn write_maf<W: Write>(records: &[MutationRecord], mut writer: W) -> Result<(), ParseError> {
    let extra_columns: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.extra.keys().map(String::as_str))
        .filter(|c| *c != STATUS_COLUMN)
        .collect();

    let header: Vec<String> = MAF_COLUMNS
        .iter()
        .copied()
        .chain(extra_columns.iter().copied())
        .chain(std::iter::once(STATUS_COLUMN))
        .map(cell_text)
        .collect();
    writeln!(writer, "{}", header.join("\t"))?;

    for record in records {
        let mut row: Vec<String> = MAF_COLUMNS
            .iter()
            .map(|c| cell_text(column_value(record, c).unwrap_or_default()))
            .collect();
        row.extend(
            extra_columns
                .iter()
                .map(|c| record.extra.get(*c).map(extra_text).unwrap_or_default()),
        );
        row.push(
            record
                .annotation_status
                .as_ref()
                .map(|s| s.label().to_string())
                .unwrap_or_default(),
        );
        writeln!(writer, "{}", row.join("\t"))?;
    }

    writer.flush()?;
    Ok(())
}
